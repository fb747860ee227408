//! Offset and axial coordinates for the flat-topped hex board.
//!
//! Tiles are addressed by offset coordinates: `column` grows to the east and
//! `row` grows to the south. Odd columns sit half a tile higher than their even
//! neighbours. Folding the column into the row with the face-row transform
//! `row + floor(column / 2)` yields axial coordinates, on which the distance
//! between two hexes reduces to a couple of comparisons.

use serde::{Deserialize, Serialize};

/// Location of a hex expressed as column and row on the rectangular board.
///
/// Coordinates are signed so that virtual positions just outside the board
/// (for example the neighbours of an edge tile) remain representable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OffsetCoord {
    column: i32,
    row: i32,
}

impl OffsetCoord {
    /// Creates a new offset coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the hex.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the hex.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Face-row transform: the row shifted by half the column, rounded down.
    ///
    /// This is the axial `r` of the hex. Tile (2, 2) has a face row of 3 and
    /// tile (3, 3) has a face row of 4.
    #[must_use]
    pub const fn face_row(&self) -> i32 {
        self.row + self.column.div_euclid(2)
    }

    /// Reports whether the hex lives in a raised (odd) column.
    #[must_use]
    pub const fn is_raised(&self) -> bool {
        self.column.rem_euclid(2) == 1
    }

    /// Converts the offset coordinate into its axial equivalent.
    #[must_use]
    pub const fn to_axial(self) -> AxialCoord {
        AxialCoord::new(self.column, self.face_row())
    }

    /// Number of single-hex steps separating two coordinates.
    #[must_use]
    pub fn distance(self, other: OffsetCoord) -> u32 {
        self.to_axial().distance(other.to_axial())
    }

    /// Returns the adjacent hex in the provided direction.
    #[must_use]
    pub fn neighbor(self, direction: HexDirection) -> OffsetCoord {
        let (dq, dr) = direction.axial_delta();
        let axial = self.to_axial();
        AxialCoord::new(axial.q() + dq, axial.r() + dr).to_offset()
    }

    /// All six adjacent hexes, ordered clockwise starting from the north.
    #[must_use]
    pub fn neighbors(self) -> [OffsetCoord; 6] {
        HexDirection::ALL.map(|direction| self.neighbor(direction))
    }
}

/// Axial hex coordinate with no vertical column shift.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxialCoord {
    q: i32,
    r: i32,
}

impl AxialCoord {
    /// Creates a new axial coordinate.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Axial column, identical to the offset column.
    #[must_use]
    pub const fn q(&self) -> i32 {
        self.q
    }

    /// Axial row, the face row of the offset coordinate.
    #[must_use]
    pub const fn r(&self) -> i32 {
        self.r
    }

    /// Converts back into offset coordinates.
    #[must_use]
    pub const fn to_offset(self) -> OffsetCoord {
        OffsetCoord::new(self.q, self.r - self.q.div_euclid(2))
    }

    /// Hex distance between two axial coordinates.
    ///
    /// When both deltas share a sign the longer axis dominates, otherwise the
    /// path has to walk both axes in full.
    #[must_use]
    pub fn distance(self, other: AxialCoord) -> u32 {
        let du = i64::from(other.q) - i64::from(self.q);
        let dv = i64::from(other.r) - i64::from(self.r);
        let steps = if (du >= 0) == (dv >= 0) {
            du.abs().max(dv.abs())
        } else {
            du.abs() + dv.abs()
        };
        u32::try_from(steps).unwrap_or(u32::MAX)
    }
}

/// Distance between two optional positions.
///
/// Returns `None` when either side is absent, such as a missing selection, so
/// callers cannot mistake "no relation" for "same hex".
#[must_use]
pub fn hex_distance(from: Option<OffsetCoord>, to: Option<OffsetCoord>) -> Option<u32> {
    match (from, to) {
        (Some(from), Some(to)) => Some(from.distance(to)),
        _ => None,
    }
}

/// The six edges shared with neighbouring hexes, screen y growing downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexDirection {
    /// Hex directly above in the same column.
    North,
    /// Upper hex in the column to the east.
    NorthEast,
    /// Lower hex in the column to the east.
    SouthEast,
    /// Hex directly below in the same column.
    South,
    /// Lower hex in the column to the west.
    SouthWest,
    /// Upper hex in the column to the west.
    NorthWest,
}

impl HexDirection {
    /// Every direction in clockwise order starting from the north.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::North,
        HexDirection::NorthEast,
        HexDirection::SouthEast,
        HexDirection::South,
        HexDirection::SouthWest,
        HexDirection::NorthWest,
    ];

    /// Axial `(dq, dr)` delta that reaches the neighbour.
    #[must_use]
    pub const fn axial_delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }
}
