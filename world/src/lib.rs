#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Hex Voyage.
//!
//! The [`GameState`] value is owned by a [`Store`] and only changes through
//! [`Command`]s dispatched to it. Every dispatch runs the [`Game`] reducer on
//! a private draft; readers only ever see whole, committed snapshots and query
//! them through the [`query`] module.

mod config;
mod error;
mod selection;
mod stats;
mod store;

use std::sync::Arc;

use hex_voyage_core::{Card, CardId, Command, Event, NameSource, OffsetCoord, Stat, TileId};
use serde::Serialize;
use tracing::{debug, info};

pub use config::{BoardConfig, CardConfig, GameConfig, ShipConfig};
pub use error::{GameError, LineError, Precondition};
pub use selection::Selection;
pub use stats::{effective_stat, EffectiveStats};
pub use store::{Reducer, Store, SubscriptionId};

/// Store specialised to the game rules.
pub type GameStore = Store<Game>;

/// A hex on the board together with the cards resting on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Tile {
    id: TileId,
    coord: OffsetCoord,
    name: String,
    cards: Vec<Card>,
}

impl Tile {
    fn new(id: TileId, coord: OffsetCoord, name: String) -> Self {
        Self {
            id,
            coord,
            name,
            cards: Vec::new(),
        }
    }

    /// Identifier of the tile.
    #[must_use]
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Board position of the tile.
    #[must_use]
    pub const fn coord(&self) -> OffsetCoord {
        self.coord
    }

    /// Descriptive name generated when the tile was created.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Cards resting on the tile, oldest first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// The player's ship.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Ship {
    position: OffsetCoord,
    speed_base: i32,
    actions_base: i32,
    combat_base: i32,
    moves_left: u32,
    actions_left: u32,
    cards: Vec<Card>,
}

impl Ship {
    pub(crate) fn from_config(config: &ShipConfig) -> Self {
        let cards = config
            .deck
            .iter()
            .zip(1..)
            .map(|(card, id)| Card::new(CardId::new(id), card.name.clone(), card.modifiers()))
            .collect();
        let mut ship = Self {
            position: config.start,
            speed_base: config.speed,
            actions_base: config.actions,
            combat_base: config.combat,
            moves_left: 0,
            actions_left: 0,
            cards,
        };
        ship.refill_counters();
        ship
    }

    /// Current position. May lie outside the board after a regeneration.
    #[must_use]
    pub const fn position(&self) -> OffsetCoord {
        self.position
    }

    /// Base value of a stat before card modifiers.
    #[must_use]
    pub const fn base(&self, stat: Stat) -> i32 {
        match stat {
            Stat::Speed => self.speed_base,
            Stat::Actions => self.actions_base,
            Stat::Combat => self.combat_base,
        }
    }

    /// Moves remaining this turn.
    #[must_use]
    pub const fn moves_left(&self) -> u32 {
        self.moves_left
    }

    /// Actions remaining this turn.
    #[must_use]
    pub const fn actions_left(&self) -> u32 {
        self.actions_left
    }

    /// Cards carried by the ship, in pickup order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn refill_counters(&mut self) {
        let stats = EffectiveStats::of(self);
        self.moves_left = counter(i64::from(stats.speed));
        self.actions_left = counter(i64::from(stats.actions));
    }

    fn take_card(&mut self, card: CardId) -> Option<Card> {
        let index = self.cards.iter().position(|held| held.id() == card)?;
        let removed = self.cards.remove(index);
        let speed = i64::from(removed.modifier(Stat::Speed));
        self.moves_left = counter(i64::from(self.moves_left) - speed);
        Some(removed)
    }
}

fn counter(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

/// Camera interaction flags reported by the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Camera {
    /// Whether a pan gesture is in progress.
    pub panning: bool,
    /// Whether a zoom gesture is in progress.
    pub zooming: bool,
}

/// Represents the authoritative Hex Voyage game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameState {
    tiles: Arc<Vec<Tile>>,
    ship: Ship,
    selection: Selection,
    camera: Camera,
    graveyard: Vec<Card>,
    next_tile_id: u32,
    turn: u32,
}

impl GameState {
    /// Creates the session-start state: no board, the configured ship, turn one.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            tiles: Arc::new(Vec::new()),
            ship: Ship::from_config(&config.ship),
            selection: Selection::Idle,
            camera: Camera::default(),
            graveyard: Vec::new(),
            next_tile_id: 1,
            turn: 1,
        }
    }

    fn tile_index(&self, id: TileId) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.id == id)
    }

    fn tile_index_at(&self, coord: OffsetCoord) -> Option<usize> {
        self.tiles.iter().position(|tile| tile.coord == coord)
    }

    fn set_camera(&mut self, camera: Camera, out_events: &mut Vec<Event>) {
        self.camera = camera;
        let (selection, abandoned) = self.selection.cancel();
        self.selection = selection;
        if let Some(tile) = abandoned {
            out_events.push(Event::FocusCancelled { tile });
        }
        out_events.push(Event::CameraChanged {
            panning: camera.panning,
            zooming: camera.zooming,
        });
    }
}

/// Game rules applied by the store.
pub struct Game {
    board: BoardConfig,
    names: Box<dyn NameSource>,
}

impl Game {
    /// Creates the rules for boards of the given size, naming tiles with `names`.
    #[must_use]
    pub fn new(board: BoardConfig, names: impl NameSource + 'static) -> Self {
        Self {
            board,
            names: Box::new(names),
        }
    }

    /// Dimensions used by map generation.
    #[must_use]
    pub const fn board(&self) -> BoardConfig {
        self.board
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("board", &self.board)
            .finish_non_exhaustive()
    }
}

impl Reducer for Game {
    type State = GameState;
    type Action = Command;
    type Event = Event;
    type Error = GameError;

    fn reduce(
        &mut self,
        draft: &mut GameState,
        command: Command,
        out_events: &mut Vec<Event>,
    ) -> Result<(), GameError> {
        apply(draft, command, self.board, self.names.as_mut(), out_events)
    }
}

impl Store<Game> {
    /// Starts a session from configuration.
    #[must_use]
    pub fn new_game(config: &GameConfig, names: impl NameSource + 'static) -> Self {
        Store::new(Game::new(config.board, names), GameState::new(config))
    }

    /// Parses and dispatches a single textual command.
    ///
    /// Unknown action names fail before reaching the store, so the snapshot
    /// is left untouched.
    pub fn dispatch_line(&mut self, line: &str) -> Result<Vec<Event>, LineError> {
        let command: Command = line.parse()?;
        Ok(self.dispatch(command)?)
    }
}

/// Applies the provided command to the state in place.
///
/// A rejected command may leave `state` partially written; go through
/// [`Store::dispatch`] to get all-or-nothing semantics.
pub fn apply(
    state: &mut GameState,
    command: Command,
    board: BoardConfig,
    names: &mut dyn NameSource,
    out_events: &mut Vec<Event>,
) -> Result<(), GameError> {
    match command {
        Command::GenerateMap => {
            let capacity = usize::from(board.columns) * usize::from(board.rows);
            let mut tiles = Vec::with_capacity(capacity);
            for column in 0..board.columns {
                for row in 0..board.rows {
                    let coord = OffsetCoord::new(i32::from(column), i32::from(row));
                    let name = names.next_name(coord);
                    if name.trim().is_empty() {
                        return Err(GameError::EmptyTileName(coord));
                    }
                    let id = TileId::new(state.next_tile_id);
                    state.next_tile_id = state.next_tile_id.wrapping_add(1);
                    tiles.push(Tile::new(id, coord, name));
                }
            }

            state.tiles = Arc::new(tiles);
            state.selection = Selection::Idle;
            info!(
                columns = board.columns,
                rows = board.rows,
                tiles = state.tiles.len(),
                "generated map"
            );
            out_events.push(Event::MapGenerated {
                columns: u32::from(board.columns),
                rows: u32::from(board.rows),
            });
        }
        Command::FocusHex { tile } => {
            if state.tile_index(tile).is_none() {
                return Err(GameError::UnknownTile(tile));
            }
            state.selection = state.selection.focus(tile);
            out_events.push(Event::TileFocused { tile });
        }
        Command::SelectFocusedHex => {
            state.selection = state
                .selection
                .confirm()
                .map_err(GameError::PreconditionNotMet)?;
            if let Some(tile) = state.selection.selected() {
                out_events.push(Event::TileSelected { tile });
            }
        }
        Command::SetMapPanning { panning } => {
            let camera = Camera {
                panning,
                ..state.camera
            };
            state.set_camera(camera, out_events);
        }
        Command::SetMapZooming { zooming } => {
            let camera = Camera {
                zooming,
                ..state.camera
            };
            state.set_camera(camera, out_events);
        }
        Command::MoveShipToSelectedTile => {
            let selected = state
                .selection
                .selected()
                .ok_or(GameError::PreconditionNotMet(Precondition::SelectedTile))?;
            let index = state
                .tile_index(selected)
                .ok_or(GameError::UnknownTile(selected))?;
            let from = state.ship.position;
            let to = state.tiles[index].coord;
            let distance = from.distance(to);

            state.ship.position = to;
            state.ship.moves_left = state.ship.moves_left.saturating_sub(distance);
            out_events.push(Event::ShipMoved { from, to, distance });
        }
        Command::DropShipCard { card } => {
            let removed = state
                .ship
                .take_card(card)
                .ok_or(GameError::UnknownCard(card))?;
            match state.tile_index_at(state.ship.position) {
                Some(index) => {
                    let tile = &mut Arc::make_mut(&mut state.tiles)[index];
                    tile.cards.push(removed);
                    out_events.push(Event::CardDropped {
                        card,
                        tile: Some(tile.id),
                    });
                }
                None => {
                    state.graveyard.push(removed);
                    out_events.push(Event::CardDropped { card, tile: None });
                }
            }
        }
        Command::DestroyShipCard { card } => {
            let removed = state
                .ship
                .take_card(card)
                .ok_or(GameError::UnknownCard(card))?;
            state.graveyard.push(removed);
            out_events.push(Event::CardDestroyed { card });
        }
        Command::StartTurn => {
            state.ship.refill_counters();
            state.turn = state.turn.saturating_add(1);
            debug!(
                turn = state.turn,
                moves = state.ship.moves_left,
                actions = state.ship.actions_left,
                "turn started"
            );
            out_events.push(Event::TurnStarted {
                turn: state.turn,
                moves: state.ship.moves_left,
                actions: state.ship.actions_left,
            });
        }
    }

    Ok(())
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use hex_voyage_core::{hex_distance, Card, OffsetCoord, TileId};
    use serde::Serialize;

    use super::{Camera, EffectiveStats, GameState, Selection, Ship, Tile};

    /// Every tile on the board, in generation order.
    #[must_use]
    pub fn tiles(state: &GameState) -> &[Tile] {
        &state.tiles
    }

    /// Looks up a tile by identifier.
    #[must_use]
    pub fn tile(state: &GameState, id: TileId) -> Option<&Tile> {
        state.tiles.iter().find(|tile| tile.id == id)
    }

    /// Looks up the tile at a board position.
    #[must_use]
    pub fn tile_at(state: &GameState, coord: OffsetCoord) -> Option<&Tile> {
        state.tiles.iter().find(|tile| tile.coord == coord)
    }

    /// Provides read-only access to the ship.
    #[must_use]
    pub fn ship(state: &GameState) -> &Ship {
        &state.ship
    }

    /// Effective ship stats derived from base values and carried cards.
    #[must_use]
    pub fn ship_stats(state: &GameState) -> EffectiveStats {
        EffectiveStats::of(&state.ship)
    }

    /// Current pointer selection state.
    #[must_use]
    pub fn selection(state: &GameState) -> Selection {
        state.selection
    }

    /// Tile pressed but not yet confirmed.
    #[must_use]
    pub fn focused_tile(state: &GameState) -> Option<&Tile> {
        state.selection.focused().and_then(|id| tile(state, id))
    }

    /// Confirmed target tile.
    #[must_use]
    pub fn selected_tile(state: &GameState) -> Option<&Tile> {
        state.selection.selected().and_then(|id| tile(state, id))
    }

    /// Camera interaction flags.
    #[must_use]
    pub fn camera(state: &GameState) -> Camera {
        state.camera
    }

    /// Cards discarded during the session, oldest first.
    #[must_use]
    pub fn graveyard(state: &GameState) -> &[Card] {
        &state.graveyard
    }

    /// One-based turn counter.
    #[must_use]
    pub fn turn(state: &GameState) -> u32 {
        state.turn
    }

    /// Distance from `coord` to the selected tile, if one is selected.
    #[must_use]
    pub fn distance_to_selected(state: &GameState, coord: OffsetCoord) -> Option<u32> {
        hex_distance(Some(coord), selected_tile(state).map(Tile::coord))
    }

    /// Relationship between a tile, the ship and the current selection.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
    pub struct TileInfo {
        /// Distance to the selected tile; `None` when nothing is selected.
        pub distance_to_selected: Option<u32>,
        /// Distance to the ship.
        pub distance_to_ship: u32,
        /// Whether the ship sits on the tile.
        pub is_ship_here: bool,
        /// Whether the tile is the selected tile.
        pub is_selected: bool,
        /// Whether the ship has enough moves left to reach the tile.
        pub can_move_ship_here: bool,
    }

    /// Describes how the tile relates to the ship and the selection.
    #[must_use]
    pub fn tile_info(state: &GameState, id: TileId) -> Option<TileInfo> {
        let tile = tile(state, id)?;
        let ship = &state.ship;
        let distance_to_ship = tile.coord.distance(ship.position);
        let is_ship_here = tile.coord == ship.position;
        Some(TileInfo {
            distance_to_selected: distance_to_selected(state, tile.coord),
            distance_to_ship,
            is_ship_here,
            is_selected: state.selection.selected() == Some(id),
            can_move_ship_here: !is_ship_here && distance_to_ship <= ship.moves_left,
        })
    }

    /// Tiles the ship can reach with its remaining moves, excluding its own.
    #[must_use]
    pub fn reachable_tiles(state: &GameState) -> Vec<TileId> {
        state
            .tiles
            .iter()
            .filter(|tile| {
                tile.coord != state.ship.position
                    && tile.coord.distance(state.ship.position) <= state.ship.moves_left
            })
            .map(|tile| tile.id)
            .collect()
    }
}
