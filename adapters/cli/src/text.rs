use std::{collections::HashMap, io::Write};

use anyhow::{Context, Result as AnyResult};
use hex_voyage_core::OffsetCoord;
use hex_voyage_rendering::{RenderingBackend, Scene, SceneCard, SceneTile};

/// Presents scenes as plain text frames.
///
/// The map is drawn one board row per line. Odd columns are raised half a
/// step, so read `(c, r)` and `(c+1, r)` as touching for odd `c+1`.
#[derive(Debug)]
pub(crate) struct TextBackend<W> {
    out: W,
}

impl<W: Write> TextBackend<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        let frame = render_frame(scene);
        self.out
            .write_all(frame.as_bytes())
            .and_then(|()| self.out.flush())
            .context("failed to write text frame")
    }
}

fn render_frame(scene: &Scene) -> String {
    let mut frame = format!("== Turn {} ==\n", scene.turn);
    let ship = &scene.ship;
    frame.push_str(&format!(
        "Ship at ({}, {})  Moves {}/{}  Actions {}/{}  Combat {}\n",
        ship.coord.column(),
        ship.coord.row(),
        ship.moves_left,
        ship.speed,
        ship.actions_left,
        ship.actions,
        ship.combat
    ));
    frame.push_str(&format!("Cards: {}\n", card_list(&ship.cards)));
    frame.push_str(&render_map(&scene.tiles));

    if let Some(panel) = &scene.selected {
        frame.push_str(&format!(
            "Selected #{} {}  distance {}{}\n",
            panel.tile.get(),
            panel.name,
            panel.distance_to_ship,
            if panel.can_move_ship_here {
                "  [move ship here]"
            } else {
                ""
            }
        ));
        frame.push_str(&format!("  Cards: {}\n", card_list(&panel.cards)));
    }
    frame
}

fn card_list(cards: &[SceneCard]) -> String {
    if cards.is_empty() {
        return "none".to_owned();
    }
    cards
        .iter()
        .map(|card| {
            if card.labels.is_empty() {
                format!("[{}] {}", card.id.get(), card.name)
            } else {
                format!(
                    "[{}] {} ({})",
                    card.id.get(),
                    card.name,
                    card.labels.join(", ")
                )
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn render_map(tiles: &[SceneTile]) -> String {
    let Some(columns) = tiles.iter().map(|tile| tile.coord.column()).max() else {
        return "(no map)\n".to_owned();
    };
    let rows = tiles
        .iter()
        .map(|tile| tile.coord.row())
        .max()
        .unwrap_or_default();
    let by_coord: HashMap<OffsetCoord, &SceneTile> =
        tiles.iter().map(|tile| (tile.coord, tile)).collect();

    let mut map = String::new();
    for row in 0..=rows {
        let line: Vec<char> = (0..=columns)
            .map(|column| {
                by_coord
                    .get(&OffsetCoord::new(column, row))
                    .map_or(' ', |tile| glyph(tile))
            })
            .collect();
        map.push_str(&line.iter().map(char::to_string).collect::<Vec<_>>().join(" "));
        map.push('\n');
    }
    map
}

fn glyph(tile: &SceneTile) -> char {
    if tile.ship_here {
        '@'
    } else if tile.selected {
        '*'
    } else if tile.focused {
        '?'
    } else if tile.in_range {
        '+'
    } else if tile.card_count > 0 {
        '#'
    } else {
        '.'
    }
}
