#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Hex Voyage engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world's store runs those commands against
//! a draft of the game state, and then broadcasts the resulting snapshot along
//! with [`Event`] values describing what changed. The hex geometry every layer
//! agrees on lives in this crate as well.

mod hex;
mod parse;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use hex::{hex_distance, AxialCoord, HexDirection, OffsetCoord};
pub use parse::CommandParseError;

/// Commands that express all permissible game state mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Replaces the board with a freshly generated rectangular grid of tiles.
    GenerateMap,
    /// Marks a tile as pressed by the pointer, pending confirmation.
    FocusHex {
        /// Identifier of the tile under the pointer.
        tile: TileId,
    },
    /// Confirms the focused tile as the selected tile.
    SelectFocusedHex,
    /// Records whether the camera is being panned.
    SetMapPanning {
        /// Whether a pan gesture is in progress.
        panning: bool,
    },
    /// Records whether the camera is being zoomed.
    SetMapZooming {
        /// Whether a zoom gesture is in progress.
        zooming: bool,
    },
    /// Moves the ship onto the selected tile, spending moves by hex distance.
    MoveShipToSelectedTile,
    /// Removes a card from the ship and leaves it on the tile below.
    DropShipCard {
        /// Identifier of the card carried by the ship.
        card: CardId,
    },
    /// Removes a card from the ship and discards it.
    DestroyShipCard {
        /// Identifier of the card carried by the ship.
        card: CardId,
    },
    /// Resets the per-turn counters to the ship's effective stats.
    StartTurn,
}

impl Command {
    /// Action name used when the command is written as text.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GenerateMap => "generateMap",
            Self::FocusHex { .. } => "focusHex",
            Self::SelectFocusedHex => "selectFocusedHex",
            Self::SetMapPanning { .. } => "setMapPanning",
            Self::SetMapZooming { .. } => "setMapZooming",
            Self::MoveShipToSelectedTile => "moveShipToSelectedTile",
            Self::DropShipCard { .. } => "dropShipCard",
            Self::DestroyShipCard { .. } => "destroyShipCard",
            Self::StartTurn => "startTurn",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self {
            Self::FocusHex { tile } => write!(f, "{name} {}", tile.get()),
            Self::SetMapPanning { panning } => write!(f, "{name} {panning}"),
            Self::SetMapZooming { zooming } => write!(f, "{name} {zooming}"),
            Self::DropShipCard { card } | Self::DestroyShipCard { card } => {
                write!(f, "{name} {}", card.get())
            }
            Self::GenerateMap
            | Self::SelectFocusedHex
            | Self::MoveShipToSelectedTile
            | Self::StartTurn => f.write_str(name),
        }
    }
}

/// Events broadcast by the world after a command commits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Announces that the board was replaced.
    MapGenerated {
        /// Number of columns in the new board.
        columns: u32,
        /// Number of rows in the new board.
        rows: u32,
    },
    /// Confirms that a tile is pressed and awaiting confirmation.
    TileFocused {
        /// Tile under the pointer.
        tile: TileId,
    },
    /// Confirms that a tile became the selected target.
    TileSelected {
        /// Tile that was selected.
        tile: TileId,
    },
    /// Reports that a pending focus was dropped by a camera gesture.
    FocusCancelled {
        /// Tile whose focus was abandoned.
        tile: TileId,
    },
    /// Reports the camera interaction flags after a change.
    CameraChanged {
        /// Whether a pan gesture is in progress.
        panning: bool,
        /// Whether a zoom gesture is in progress.
        zooming: bool,
    },
    /// Confirms that the ship moved between two positions.
    ShipMoved {
        /// Position before moving.
        from: OffsetCoord,
        /// Position after moving.
        to: OffsetCoord,
        /// Hex distance that was travelled.
        distance: u32,
    },
    /// Confirms that the ship put a card down.
    CardDropped {
        /// Card that left the ship.
        card: CardId,
        /// Tile that received the card, or `None` when it fell into the graveyard.
        tile: Option<TileId>,
    },
    /// Confirms that a card was discarded into the graveyard.
    CardDestroyed {
        /// Card that was discarded.
        card: CardId,
    },
    /// Announces the start of a new turn.
    TurnStarted {
        /// One-based turn counter.
        turn: u32,
        /// Moves available this turn.
        moves: u32,
        /// Actions available this turn.
        actions: u32,
    },
}

/// Unique identifier assigned to a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(u32);

impl TileId {
    /// Creates a new tile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    /// Creates a new card identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Ship attributes that cards can modify.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Hexes the ship may travel per turn.
    Speed,
    /// Actions the ship may take per turn.
    Actions,
    /// Strength in combat.
    Combat,
}

impl Stat {
    /// Every stat in display order.
    pub const ALL: [Stat; 3] = [Stat::Speed, Stat::Actions, Stat::Combat];

    /// Human-readable label shown next to modifier values.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Speed => "Moves",
            Self::Actions => "Actions",
            Self::Combat => "Combat",
        }
    }
}

/// Signed stat adjustments granted by a card. Zero means no effect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Adjustment to the ship's speed.
    pub speed: i32,
    /// Adjustment to the ship's actions.
    pub actions: i32,
    /// Adjustment to the ship's combat strength.
    pub combat: i32,
}

impl Modifiers {
    /// Creates a modifier set from explicit values.
    #[must_use]
    pub const fn new(speed: i32, actions: i32, combat: i32) -> Self {
        Self {
            speed,
            actions,
            combat,
        }
    }

    /// Adjustment applied to the provided stat.
    #[must_use]
    pub const fn get(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Speed => self.speed,
            Stat::Actions => self.actions,
            Stat::Combat => self.combat,
        }
    }
}

/// A stat-modifying item carried by the ship or resting on a tile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    name: String,
    modifiers: Modifiers,
}

impl Card {
    /// Creates a new card.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            id,
            name: name.into(),
            modifiers,
        }
    }

    /// Identifier of the card.
    #[must_use]
    pub const fn id(&self) -> CardId {
        self.id
    }

    /// Display name of the card.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stat adjustments granted while the ship holds the card.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Adjustment applied to a single stat.
    #[must_use]
    pub const fn modifier(&self, stat: Stat) -> i32 {
        self.modifiers.get(stat)
    }
}

/// Supplies descriptive names for freshly generated tiles.
///
/// Called once per tile during map generation. Implementations may be random
/// but must never return an empty string.
pub trait NameSource {
    /// Produces the name for the tile about to be created at `coord`.
    fn next_name(&mut self, coord: OffsetCoord) -> String;
}

impl<F> NameSource for F
where
    F: FnMut(OffsetCoord) -> String,
{
    fn next_name(&mut self, coord: OffsetCoord) -> String {
        self(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_modifier_reads_each_stat() {
        let card = Card::new(CardId::new(1), "Afterburner", Modifiers::new(2, 0, -1));
        assert_eq!(card.modifier(Stat::Speed), 2);
        assert_eq!(card.modifier(Stat::Actions), 0);
        assert_eq!(card.modifier(Stat::Combat), -1);
    }

    #[test]
    fn command_display_matches_action_names() {
        assert_eq!(Command::GenerateMap.to_string(), "generateMap");
        assert_eq!(
            Command::FocusHex {
                tile: TileId::new(12)
            }
            .to_string(),
            "focusHex 12"
        );
        assert_eq!(
            Command::SetMapPanning { panning: true }.to_string(),
            "setMapPanning true"
        );
        assert_eq!(
            Command::DestroyShipCard {
                card: CardId::new(3)
            }
            .to_string(),
            "destroyShipCard 3"
        );
    }

    #[test]
    fn closures_act_as_name_sources() {
        let mut counter = 0;
        let mut source = |coord: OffsetCoord| {
            counter += 1;
            format!("{}-{}", coord.column(), coord.row())
        };
        assert_eq!(source.next_name(OffsetCoord::new(4, 1)), "4-1");
        assert_eq!(counter, 1);
    }
}
