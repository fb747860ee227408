#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Hex Voyage adapters.
//!
//! Adapters never read the game state directly. They receive a [`Scene`]
//! assembled from query results and lay it out with a [`HexLayout`].

use anyhow::Result as AnyResult;
use glam::Vec2;
use hex_voyage_core::{Card, CardId, OffsetCoord, Stat, TileId};
use std::{error::Error, f32::consts::TAU, fmt};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Formats the color as a CSS `rgba(...)` value.
    #[must_use]
    pub fn to_css(self) -> String {
        format!(
            "rgba({},{},{},{})",
            to_byte(self.red),
            to_byte(self.green),
            to_byte(self.blue),
            self.alpha.clamp(0.0, 1.0)
        )
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

fn to_byte(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Colors used for each kind of map element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Solid color behind the map.
    pub background: Color,
    /// Fill of an ordinary tile.
    pub tile: Color,
    /// Fill of the selected tile.
    pub selected: Color,
    /// Fill of a tile that is pressed but not yet confirmed.
    pub focused: Color,
    /// Overlay drawn on tiles the ship can reach this turn.
    pub range: Color,
    /// Fill of the ship marker.
    pub ship_fill: Color,
    /// Outline of the ship marker.
    pub ship_stroke: Color,
}

impl Default for Palette {
    fn default() -> Self {
        let tile = Color::from_rgb_u8(34, 40, 49);
        Self {
            background: Color::from_rgb_u8(12, 14, 20),
            tile,
            selected: Color::from_rgb_u8(200, 136, 34),
            focused: tile.lighten(0.25),
            range: Color::new(0.0, 100.0 / 255.0, 200.0 / 255.0, 0.45),
            ship_fill: Color::from_rgb_u8(255, 255, 255),
            ship_stroke: Color::from_rgb_u8(255, 0, 0),
        }
    }
}

/// Point on a circle of the given radius after `fraction` of a full turn,
/// measured clockwise in screen space from the positive x axis.
#[must_use]
pub fn point_at_fraction(fraction: f32, radius: f32) -> Vec2 {
    let angle = TAU * fraction;
    Vec2::new(angle.cos() * radius, angle.sin() * radius)
}

/// Vertices of a regular polygon centred on the origin, starting on the
/// positive x axis.
#[must_use]
pub fn regular_polygon(points: usize, radius: f32) -> Vec<Vec2> {
    (0..points)
        .map(|n| point_at_fraction(n as f32 / points as f32, radius))
        .collect()
}

/// Joins points into the `"x,y x,y ..."` form used by polygon outlines.
#[must_use]
pub fn points_to_string(points: &[Vec2]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x, point.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats an offset as an SVG `translate(x y)` transform.
#[must_use]
pub fn translate(offset: Vec2) -> String {
    format!("translate({} {})", offset.x, offset.y)
}

/// Signed label for a card modifier, e.g. `"+1 Moves"` or `"-2 Combat"`.
///
/// Zero modifiers have no label.
#[must_use]
pub fn modifier_label(value: i32, stat: Stat) -> Option<String> {
    if value == 0 {
        return None;
    }
    Some(format!("{value:+} {}", stat.label()))
}

/// Projects offset coordinates onto the plane.
///
/// Hexes are flat-topped. Odd columns sit half a step higher than even
/// columns, matching the distance metric of [`OffsetCoord`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexLayout {
    diameter: f32,
}

impl HexLayout {
    /// Diameter used when none is configured.
    pub const DEFAULT_DIAMETER: f32 = 200.0;

    /// Gap between a tile's outline and its neighbours' outlines.
    pub const OUTLINE_INSET: f32 = 8.0;

    /// Offset of the ship marker from the centre of its tile.
    pub const SHIP_OFFSET: Vec2 = Vec2::new(30.0, 30.0);

    /// Radius of the ship marker.
    pub const SHIP_RADIUS: f32 = 15.0;

    /// Creates a layout for hexes of the given corner-to-corner diameter.
    ///
    /// Returns an error unless the diameter is finite and positive.
    pub fn new(diameter: f32) -> std::result::Result<Self, RenderingError> {
        if !diameter.is_finite() || diameter <= 0.0 {
            return Err(RenderingError::InvalidDiameter { diameter });
        }
        Ok(Self { diameter })
    }

    /// Corner-to-corner diameter of a hex.
    #[must_use]
    pub const fn diameter(&self) -> f32 {
        self.diameter
    }

    /// Distance from a hex centre to each of its corners.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.diameter / 2.0
    }

    /// Horizontal distance between adjacent columns and vertical distance
    /// between adjacent rows.
    #[must_use]
    pub fn step(&self) -> Vec2 {
        let sixth = point_at_fraction(1.0 / 6.0, self.diameter);
        Vec2::new(sixth.x * 1.5, sixth.y)
    }

    /// Centre of the hex at `coord`.
    #[must_use]
    pub fn center(&self, coord: OffsetCoord) -> Vec2 {
        let step = self.step();
        let column = coord.column() as f32;
        let raise = coord.column().rem_euclid(2) as f32 / 2.0;
        Vec2::new(column * step.x, (coord.row() as f32 - raise) * step.y)
    }

    /// Corners of a hex relative to its centre.
    #[must_use]
    pub fn vertices(&self) -> [Vec2; 6] {
        hexagon(self.radius())
    }

    /// Corners of the visible tile outline, inset from [`Self::vertices`].
    #[must_use]
    pub fn outline_vertices(&self) -> [Vec2; 6] {
        hexagon(((self.diameter - Self::OUTLINE_INSET) / 2.0).max(0.0))
    }

    /// Position of the ship marker when the ship sits at `coord`.
    #[must_use]
    pub fn ship_anchor(&self, coord: OffsetCoord) -> Vec2 {
        self.center(coord) + Self::SHIP_OFFSET
    }

    /// Smallest axis-aligned box containing every hex of a board.
    ///
    /// Returns `None` when the board has no tiles.
    #[must_use]
    pub fn board_bounds(&self, columns: u32, rows: u32) -> Option<(Vec2, Vec2)> {
        if columns == 0 || rows == 0 {
            return None;
        }
        let corners = self.vertices();
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        for column in 0..columns.min(2) {
            for row in [0, rows - 1] {
                let center = self.center(OffsetCoord::new(column as i32, row as i32));
                for corner in corners {
                    min = min.min(center + corner);
                    max = max.max(center + corner);
                }
            }
        }
        let right = self.center(OffsetCoord::new(columns as i32 - 1, 0)).x + self.radius();
        max.x = max.x.max(right);
        Some((min, max))
    }
}

impl Default for HexLayout {
    fn default() -> Self {
        Self {
            diameter: Self::DEFAULT_DIAMETER,
        }
    }
}

fn hexagon(radius: f32) -> [Vec2; 6] {
    std::array::from_fn(|n| point_at_fraction(n as f32 / 6.0, radius))
}

/// A card as shown in the ship or tile panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneCard {
    /// Identifier used when dropping or destroying the card.
    pub id: CardId,
    /// Display name.
    pub name: String,
    /// One label per non-zero modifier, in stat order.
    pub labels: Vec<String>,
}

impl SceneCard {
    /// Describes a card for display.
    #[must_use]
    pub fn from_card(card: &Card) -> Self {
        Self {
            id: card.id(),
            name: card.name().to_owned(),
            labels: Stat::ALL
                .iter()
                .filter_map(|stat| modifier_label(card.modifier(*stat), *stat))
                .collect(),
        }
    }
}

/// A hex tile positioned on the plane.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneTile {
    /// Identifier of the tile.
    pub id: TileId,
    /// Board position of the tile.
    pub coord: OffsetCoord,
    /// Centre of the tile on the plane.
    pub center: Vec2,
    /// Place name.
    pub name: String,
    /// Number of cards resting on the tile.
    pub card_count: usize,
    /// Whether the tile is pressed but not yet confirmed.
    pub focused: bool,
    /// Whether the tile is the confirmed selection.
    pub selected: bool,
    /// Whether the ship sits on the tile.
    pub ship_here: bool,
    /// Whether the ship can reach the tile with its remaining moves.
    pub in_range: bool,
}

/// Ship marker and status panel.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneShip {
    /// Board position of the ship.
    pub coord: OffsetCoord,
    /// Position of the marker on the plane.
    pub anchor: Vec2,
    /// Moves remaining this turn.
    pub moves_left: u32,
    /// Effective speed.
    pub speed: i32,
    /// Actions remaining this turn.
    pub actions_left: u32,
    /// Effective actions per turn.
    pub actions: i32,
    /// Effective combat strength.
    pub combat: i32,
    /// Cards carried by the ship.
    pub cards: Vec<SceneCard>,
}

/// Details of the selected tile.
#[derive(Clone, Debug, PartialEq)]
pub struct TilePanel {
    /// Identifier of the selected tile.
    pub tile: TileId,
    /// Place name.
    pub name: String,
    /// Hex distance between the ship and the tile.
    pub distance_to_ship: u32,
    /// Whether a move order to this tile would be offered.
    pub can_move_ship_here: bool,
    /// Cards resting on the tile.
    pub cards: Vec<SceneCard>,
}

/// Everything an adapter needs to draw a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Projection used to position tiles.
    pub layout: HexLayout,
    /// Board tiles in generation order.
    pub tiles: Vec<SceneTile>,
    /// The player's ship.
    pub ship: SceneShip,
    /// Panel for the selected tile, if any.
    pub selected: Option<TilePanel>,
    /// One-based turn counter.
    pub turn: u32,
}

impl Scene {
    /// Tiles the ship can reach this turn.
    pub fn range_tiles(&self) -> impl Iterator<Item = &SceneTile> {
        self.tiles.iter().filter(|tile| tile.in_range)
    }
}

/// Rendering backend capable of presenting Hex Voyage scenes.
pub trait RenderingBackend {
    /// Presents a single frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// Hex diameter must be finite and positive.
    InvalidDiameter {
        /// Provided diameter that failed validation.
        diameter: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDiameter { diameter } => {
                write!(
                    f,
                    "hex diameter must be finite and positive (received {diameter})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_voyage_core::Modifiers;

    const EPSILON: f32 = 1e-3;

    fn layout() -> HexLayout {
        HexLayout::new(200.0).expect("positive diameter")
    }

    #[test]
    fn layout_rejects_non_positive_diameter() {
        assert_eq!(
            HexLayout::new(0.0),
            Err(RenderingError::InvalidDiameter { diameter: 0.0 })
        );
        assert!(HexLayout::new(f32::NAN).is_err());
        assert!(HexLayout::new(-4.0).is_err());
    }

    #[test]
    fn step_matches_flat_topped_spacing() {
        let step = layout().step();

        assert!((step.x - 150.0).abs() < EPSILON);
        assert!((step.y - 100.0 * 3.0_f32.sqrt()).abs() < EPSILON);
    }

    #[test]
    fn odd_columns_are_raised_half_a_step() {
        let layout = layout();
        let step = layout.step();

        assert_eq!(layout.center(OffsetCoord::new(0, 0)), Vec2::ZERO);
        assert!(layout
            .center(OffsetCoord::new(1, 0))
            .abs_diff_eq(Vec2::new(step.x, -step.y / 2.0), EPSILON));
        assert!(layout
            .center(OffsetCoord::new(2, 3))
            .abs_diff_eq(Vec2::new(2.0 * step.x, 3.0 * step.y), EPSILON));
    }

    #[test]
    fn neighbours_are_equidistant_on_the_plane() {
        let layout = layout();
        for origin in [OffsetCoord::new(2, 2), OffsetCoord::new(3, 3)] {
            let center = layout.center(origin);
            for neighbor in origin.neighbors() {
                let gap = center.distance(layout.center(neighbor));
                assert!(
                    (gap - layout.step().y).abs() < EPSILON,
                    "{origin:?} -> {neighbor:?} is {gap}"
                );
            }
        }
    }

    #[test]
    fn vertices_sit_on_the_circumcircle() {
        let layout = layout();
        let vertices = layout.vertices();

        assert!(vertices[0].abs_diff_eq(Vec2::new(100.0, 0.0), EPSILON));
        assert!(vertices
            .iter()
            .all(|corner| (corner.length() - 100.0).abs() < EPSILON));
        assert!(layout
            .outline_vertices()
            .iter()
            .all(|corner| (corner.length() - 96.0).abs() < EPSILON));
    }

    #[test]
    fn points_to_string_joins_pairs() {
        let points = [Vec2::new(1.0, 2.0), Vec2::new(-3.5, 0.0)];

        assert_eq!(points_to_string(&points), "1,2 -3.5,0");
        assert_eq!(points_to_string(&[]), "");
        assert_eq!(translate(Vec2::new(150.0, -30.0)), "translate(150 -30)");
    }

    #[test]
    fn regular_polygon_matches_hexagon_vertices() {
        let polygon = regular_polygon(6, 100.0);

        assert_eq!(polygon.len(), 6);
        for (a, b) in polygon.iter().zip(layout().vertices()) {
            assert!(a.abs_diff_eq(b, EPSILON));
        }
    }

    #[test]
    fn modifier_labels_are_signed() {
        assert_eq!(
            modifier_label(1, Stat::Speed).as_deref(),
            Some("+1 Moves")
        );
        assert_eq!(
            modifier_label(-2, Stat::Combat).as_deref(),
            Some("-2 Combat")
        );
        assert_eq!(modifier_label(0, Stat::Actions), None);
    }

    #[test]
    fn scene_card_lists_only_non_zero_modifiers() {
        let card = Card::new(CardId::new(4), "Ion Sail", Modifiers::new(2, 0, -1));

        let scene_card = SceneCard::from_card(&card);

        assert_eq!(scene_card.name, "Ion Sail");
        assert_eq!(scene_card.labels, vec!["+2 Moves", "-1 Combat"]);
    }

    #[test]
    fn board_bounds_cover_raised_columns() {
        let layout = layout();
        let (min, max) = layout.board_bounds(3, 2).expect("non-empty board");
        let step = layout.step();

        assert!((min.x + 100.0).abs() < EPSILON);
        assert!((max.x - (2.0 * step.x + 100.0)).abs() < EPSILON);
        assert!((min.y + step.y).abs() < EPSILON);
        assert!((max.y - 1.5 * step.y).abs() < EPSILON);
        assert!(layout.board_bounds(0, 4).is_none());
    }

    #[test]
    fn css_colors_use_byte_channels() {
        assert_eq!(Color::from_rgb_u8(0, 100, 200).to_css(), "rgba(0,100,200,1)");
        assert_eq!(
            Color::new(0.0, 0.0, 0.0, 1.0).lighten(1.0).to_css(),
            "rgba(255,255,255,1)"
        );
    }
}
