use std::{fmt::Write as _, fs, path::PathBuf};

use anyhow::{Context, Result as AnyResult};
use hex_voyage_rendering::{
    points_to_string, translate, HexLayout, Palette, RenderingBackend, Scene, SceneTile,
};

/// Writes each presented scene to an SVG file, replacing the previous one.
#[derive(Debug)]
pub(crate) struct SvgBackend {
    path: PathBuf,
    palette: Palette,
}

impl SvgBackend {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self {
            path,
            palette: Palette::default(),
        }
    }
}

impl RenderingBackend for SvgBackend {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        let document = render_document(scene, &self.palette);
        fs::write(&self.path, document)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}

fn render_document(scene: &Scene, palette: &Palette) -> String {
    let layout = scene.layout;
    let (min, max) = board_extent(scene).unwrap_or_default();
    let size = max - min;
    let outline = points_to_string(&layout.outline_vertices());
    let hit_area = points_to_string(&layout.vertices());

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
        min.x, min.y, size.x, size.y
    );
    let _ = writeln!(
        svg,
        r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
        min.x,
        min.y,
        size.x,
        size.y,
        palette.background.to_css()
    );

    for tile in &scene.tiles {
        let _ = writeln!(
            svg,
            r#"  <g class="hex-tile" transform="{}"><polygon points="{}" fill="{}"/><title>{}</title></g>"#,
            translate(tile.center),
            outline,
            tile_fill(tile, palette),
            escape(&tile.name)
        );
    }
    for tile in scene.range_tiles() {
        let _ = writeln!(
            svg,
            r#"  <polygon class="range" transform="{}" points="{}" fill="{}"/>"#,
            translate(tile.center),
            hit_area,
            palette.range.to_css()
        );
    }
    let _ = writeln!(
        svg,
        r#"  <circle class="ship" r="{}" fill="{}" stroke="{}" stroke-width="3" transform="{}"/>"#,
        HexLayout::SHIP_RADIUS,
        palette.ship_fill.to_css(),
        palette.ship_stroke.to_css(),
        translate(scene.ship.anchor)
    );
    svg.push_str("</svg>\n");
    svg
}

fn board_extent(scene: &Scene) -> Option<(glam::Vec2, glam::Vec2)> {
    let columns = scene.tiles.iter().map(|tile| tile.coord.column()).max()?;
    let rows = scene.tiles.iter().map(|tile| tile.coord.row()).max()?;
    let columns = u32::try_from(columns + 1).ok()?;
    let rows = u32::try_from(rows + 1).ok()?;
    scene.layout.board_bounds(columns, rows)
}

fn tile_fill(tile: &SceneTile, palette: &Palette) -> String {
    let color = if tile.selected {
        palette.selected
    } else if tile.focused {
        palette.focused
    } else {
        palette.tile
    };
    color.to_css()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use hex_voyage_core::{OffsetCoord, TileId};
    use hex_voyage_rendering::SceneShip;

    use super::*;

    fn scene() -> Scene {
        let layout = HexLayout::default();
        let tiles = (0..2)
            .flat_map(|column| (0..2).map(move |row| OffsetCoord::new(column, row)))
            .zip(1..)
            .map(|(coord, id)| SceneTile {
                id: TileId::new(id),
                coord,
                center: layout.center(coord),
                name: format!("Nebula <{id}>"),
                card_count: 0,
                focused: false,
                selected: id == 4,
                ship_here: id == 1,
                in_range: id != 1,
            })
            .collect();
        Scene {
            layout,
            tiles,
            ship: SceneShip {
                coord: OffsetCoord::new(0, 0),
                anchor: layout.ship_anchor(OffsetCoord::new(0, 0)),
                moves_left: 3,
                speed: 3,
                actions_left: 2,
                actions: 2,
                combat: 1,
                cards: Vec::new(),
            },
            selected: None,
            turn: 1,
        }
    }

    #[test]
    fn document_draws_tiles_range_and_ship() {
        let palette = Palette::default();
        let document = render_document(&scene(), &palette);

        assert!(document.starts_with("<svg "));
        assert!(document.ends_with("</svg>\n"));
        assert_eq!(document.matches(r#"class="hex-tile""#).count(), 4);
        assert_eq!(document.matches(r#"class="range""#).count(), 3);
        assert_eq!(document.matches(r#"class="ship""#).count(), 1);
        assert!(document.contains(r#"transform="translate(30 30)""#));
        assert!(document.contains(&palette.selected.to_css()));
        assert!(document.contains("Nebula &lt;2&gt;"));
    }

    #[test]
    fn empty_board_still_produces_a_document() {
        let mut scene = scene();
        scene.tiles.clear();

        let document = render_document(&scene, &Palette::default());

        assert!(document.contains(r#"viewBox="0 0 0 0""#));
        assert!(!document.contains("hex-tile"));
    }

    #[test]
    fn view_box_covers_the_board() {
        let (min, max) = board_extent(&scene()).expect("tiles present");
        let layout = HexLayout::default();

        assert_eq!(Some((min, max)), layout.board_bounds(2, 2));
        assert!(min.cmple(Vec2::new(-100.0, 0.0)).all());
    }
}
