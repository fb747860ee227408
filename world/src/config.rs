//! Session configuration: board size, ship stats and the starting deck.

use hex_voyage_core::{Modifiers, OffsetCoord};
use serde::{Deserialize, Serialize};

const DEFAULT_COLUMNS: u16 = 9;
const DEFAULT_ROWS: u16 = 7;

/// Everything required to start a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Dimensions of generated maps.
    pub board: BoardConfig,
    /// Starting ship.
    pub ship: ShipConfig,
}

/// Dimensions of the rectangular board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of tile columns.
    pub columns: u16,
    /// Number of tile rows.
    pub rows: u16,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
        }
    }
}

/// Ship created at session start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    /// Starting position.
    pub start: OffsetCoord,
    /// Base speed.
    pub speed: i32,
    /// Base actions per turn.
    pub actions: i32,
    /// Base combat strength.
    pub combat: i32,
    /// Cards the ship carries when the session starts.
    pub deck: Vec<CardConfig>,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            start: OffsetCoord::new(0, 0),
            speed: 3,
            actions: 2,
            combat: 1,
            deck: vec![
                CardConfig::new("Afterburner", Modifiers::new(1, 0, 0)),
                CardConfig::new("Cargo Drone", Modifiers::new(0, 1, 0)),
                CardConfig::new("Railgun", Modifiers::new(0, 0, 2)),
            ],
        }
    }
}

/// Card description used to build the starting deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Display name.
    pub name: String,
    /// Speed adjustment.
    pub speed: i32,
    /// Actions adjustment.
    pub actions: i32,
    /// Combat adjustment.
    pub combat: i32,
}

impl CardConfig {
    /// Creates a card description.
    #[must_use]
    pub fn new(name: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            name: name.into(),
            speed: modifiers.speed,
            actions: modifiers.actions,
            combat: modifiers.combat,
        }
    }

    /// Modifiers granted by the card.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        Modifiers::new(self.speed, self.actions, self.combat)
    }
}
