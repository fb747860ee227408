use std::collections::HashSet;

use hex_voyage_core::TileId;
use hex_voyage_rendering::{HexLayout, Scene, SceneCard, SceneShip, SceneTile, TilePanel};
use hex_voyage_world::{query, GameState};

/// Assembles the scene for a committed snapshot.
pub(crate) fn build(state: &GameState, layout: HexLayout) -> Scene {
    let ship = query::ship(state);
    let stats = query::ship_stats(state);
    let selection = query::selection(state);
    let reachable: HashSet<TileId> = query::reachable_tiles(state).into_iter().collect();

    let tiles = query::tiles(state)
        .iter()
        .map(|tile| SceneTile {
            id: tile.id(),
            coord: tile.coord(),
            center: layout.center(tile.coord()),
            name: tile.name().to_owned(),
            card_count: tile.cards().len(),
            focused: selection.focused() == Some(tile.id()),
            selected: selection.selected() == Some(tile.id()),
            ship_here: tile.coord() == ship.position(),
            in_range: reachable.contains(&tile.id()),
        })
        .collect();

    let selected = query::selected_tile(state).and_then(|tile| {
        let info = query::tile_info(state, tile.id())?;
        Some(TilePanel {
            tile: tile.id(),
            name: tile.name().to_owned(),
            distance_to_ship: info.distance_to_ship,
            can_move_ship_here: info.can_move_ship_here,
            cards: tile.cards().iter().map(SceneCard::from_card).collect(),
        })
    });

    Scene {
        layout,
        tiles,
        ship: SceneShip {
            coord: ship.position(),
            anchor: layout.ship_anchor(ship.position()),
            moves_left: ship.moves_left(),
            speed: stats.speed,
            actions_left: ship.actions_left(),
            actions: stats.actions,
            combat: stats.combat,
            cards: ship.cards().iter().map(SceneCard::from_card).collect(),
        },
        selected,
        turn: query::turn(state),
    }
}

#[cfg(test)]
mod tests {
    use hex_voyage_core::{CardId, Command, OffsetCoord};
    use hex_voyage_world::{BoardConfig, GameConfig, GameStore};

    use super::*;

    fn store() -> GameStore {
        let config = GameConfig {
            board: BoardConfig {
                columns: 4,
                rows: 3,
            },
            ..GameConfig::default()
        };
        let mut store = GameStore::new_game(&config, |coord: OffsetCoord| {
            format!("Shoals {}{}", coord.column(), coord.row())
        });
        let _ = store.dispatch(Command::GenerateMap).expect("map generates");
        store
    }

    #[test]
    fn tiles_carry_ship_and_range_flags() {
        let store = store();
        let scene = build(&store.read(), HexLayout::default());

        assert_eq!(scene.tiles.len(), 12);
        let ship_tiles: Vec<_> = scene.tiles.iter().filter(|tile| tile.ship_here).collect();
        assert_eq!(ship_tiles.len(), 1);
        assert_eq!(ship_tiles[0].coord, OffsetCoord::new(0, 0));
        assert!(!ship_tiles[0].in_range);
        assert_eq!(
            scene.range_tiles().count(),
            query::reachable_tiles(&store.read()).len()
        );
        assert_eq!(scene.ship.anchor, HexLayout::SHIP_OFFSET);
        assert!(scene.selected.is_none());
    }

    #[test]
    fn selected_tile_gets_a_panel() {
        let mut store = store();
        let _ = store
            .dispatch(Command::DropShipCard {
                card: CardId::new(1),
            })
            .expect("card carried");
        let _ = store
            .dispatch_line("focusHex 1")
            .expect("tile exists");
        let _ = store.dispatch_line("selectFocusedHex").expect("tile focused");

        let scene = build(&store.read(), HexLayout::default());

        let panel = scene.selected.expect("selection panel");
        assert_eq!(panel.name, "Shoals 00");
        assert_eq!(panel.distance_to_ship, 0);
        assert!(!panel.can_move_ship_here);
        assert_eq!(panel.cards.len(), 1);
        assert_eq!(panel.cards[0].labels, vec!["+1 Moves"]);
        assert_eq!(scene.ship.cards.len(), 2);
        assert!(scene.tiles.iter().any(|tile| tile.selected && tile.card_count == 1));
    }
}
