use std::fmt;

use hex_voyage_core::{CardId, CommandParseError, OffsetCoord, TileId};
use serde::Serialize;
use thiserror::Error;

/// State a command needed but did not find.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Precondition {
    /// A tile must be focused before it can be confirmed.
    FocusedTile,
    /// A tile must be selected before the ship can move to it.
    SelectedTile,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FocusedTile => f.write_str("no tile is focused"),
            Self::SelectedTile => f.write_str("no tile is selected"),
        }
    }
}

/// Reasons the game rejected a command. The snapshot is never modified.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    /// The command needs state that is not present.
    #[error("precondition not met: {0}")]
    PreconditionNotMet(Precondition),
    /// The tile does not exist on the current board.
    #[error("tile {} does not exist on the current board", .0.get())]
    UnknownTile(TileId),
    /// The ship does not carry the card.
    #[error("card {} is not carried by the ship", .0.get())]
    UnknownCard(CardId),
    /// The name source produced an empty name during map generation.
    #[error("empty name generated for tile ({}, {})", .0.column(), .0.row())]
    EmptyTileName(OffsetCoord),
}

/// Failure to run a textual command line.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LineError {
    /// The line does not name a valid command.
    #[error(transparent)]
    Parse(#[from] CommandParseError),
    /// The command parsed but the game rejected it.
    #[error(transparent)]
    Rejected(#[from] GameError),
}
