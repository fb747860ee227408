use hex_voyage_core::{CardId, Command, OffsetCoord, TileId};
use hex_voyage_world::{query, GameConfig, GameStore};

fn store() -> GameStore {
    let mut counter = 0_u32;
    GameStore::new_game(&GameConfig::default(), move |coord: OffsetCoord| {
        counter += 1;
        format!("Drift {counter} ({}, {})", coord.column(), coord.row())
    })
}

fn session_log() -> Vec<Command> {
    vec![
        Command::GenerateMap,
        Command::FocusHex {
            tile: TileId::new(9),
        },
        Command::SetMapPanning { panning: true },
        Command::SetMapPanning { panning: false },
        Command::FocusHex {
            tile: TileId::new(9),
        },
        Command::SelectFocusedHex,
        Command::MoveShipToSelectedTile,
        Command::DropShipCard {
            card: CardId::new(1),
        },
        Command::DestroyShipCard {
            card: CardId::new(3),
        },
        Command::StartTurn,
        Command::GenerateMap,
    ]
}

#[test]
fn replaying_an_encoded_log_reproduces_the_session() {
    let encoded = bincode::serialize(&session_log()).expect("serialize log");
    let decoded: Vec<Command> = bincode::deserialize(&encoded).expect("deserialize log");

    let mut original = store();
    let mut replayed = store();
    let mut original_events = Vec::new();
    let mut replayed_events = Vec::new();

    for command in session_log() {
        original_events.push(original.dispatch(command));
    }
    for command in decoded {
        replayed_events.push(replayed.dispatch(command));
    }

    assert_eq!(original_events, replayed_events);
    assert!(original_events.iter().all(Result::is_ok));
    assert_eq!(*original.read(), *replayed.read());
    assert_eq!(original.revision(), replayed.revision());
}

#[test]
fn replay_ends_in_the_expected_state() {
    let mut store = store();
    for command in session_log() {
        let _ = store.dispatch(command).expect("every logged command applies");
    }

    let state = store.read();
    let ship = query::ship(&state);
    // tile 9 is column 1, row 1 on the default 9x7 board
    assert_eq!(ship.position(), OffsetCoord::new(1, 1));
    assert_eq!(ship.cards().len(), 1);
    assert_eq!(query::graveyard(&state).len(), 1);
    assert_eq!(query::turn(&state), 2);
    assert!(query::selected_tile(&state).is_none());
    assert_eq!(query::tiles(&state).len(), 63);
    assert!(query::tiles(&state)
        .iter()
        .all(|tile| tile.id().get() > 63 && tile.cards().is_empty()));
}
