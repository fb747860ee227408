//! Two-phase pointer selection.
//!
//! A press focuses a tile, a release confirms it. Any camera gesture between
//! the two cancels the focus, so dragging the map never selects a tile.

use hex_voyage_core::TileId;
use serde::Serialize;

use crate::Precondition;

/// Selection progress for the pointer interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Selection {
    /// Nothing pressed and nothing selected.
    #[default]
    Idle,
    /// A tile is pressed; an earlier selection, if any, is kept until confirmed.
    Focused {
        /// Tile under the pointer.
        tile: TileId,
        /// Selection that was active before the press.
        selected: Option<TileId>,
    },
    /// A tile is the confirmed target.
    Selected {
        /// Confirmed tile.
        tile: TileId,
    },
}

impl Selection {
    /// Tile pressed but not yet confirmed.
    #[must_use]
    pub const fn focused(&self) -> Option<TileId> {
        match self {
            Self::Focused { tile, .. } => Some(*tile),
            Self::Idle | Self::Selected { .. } => None,
        }
    }

    /// Confirmed target tile.
    #[must_use]
    pub const fn selected(&self) -> Option<TileId> {
        match self {
            Self::Idle => None,
            Self::Focused { selected, .. } => *selected,
            Self::Selected { tile } => Some(*tile),
        }
    }

    pub(crate) const fn focus(self, tile: TileId) -> Self {
        Self::Focused {
            tile,
            selected: self.selected(),
        }
    }

    pub(crate) fn confirm(self) -> Result<Self, Precondition> {
        match self {
            Self::Focused { tile, .. } => Ok(Self::Selected { tile }),
            Self::Idle | Self::Selected { .. } => Err(Precondition::FocusedTile),
        }
    }

    /// Drops a pending focus, returning the new state and the abandoned tile.
    pub(crate) const fn cancel(self) -> (Self, Option<TileId>) {
        match self {
            Self::Focused {
                tile,
                selected: Some(selected),
            } => (Self::Selected { tile: selected }, Some(tile)),
            Self::Focused {
                tile,
                selected: None,
            } => (Self::Idle, Some(tile)),
            Self::Idle | Self::Selected { .. } => (self, None),
        }
    }
}
