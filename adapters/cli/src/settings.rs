use std::{fs, path::Path};

use anyhow::{Context, Result};
use hex_voyage_rendering::HexLayout;
use hex_voyage_world::GameConfig;
use serde::Deserialize;

/// Settings file contents.
///
/// Game keys (`[board]`, `[ship]`) sit at the top level next to `seed` and
/// `[layout]`. Anything omitted keeps its default.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    /// Seed for procedural tile names.
    pub(crate) seed: Option<u64>,
    /// Board and ship configuration.
    #[serde(flatten)]
    pub(crate) game: GameConfig,
    /// Plane projection used by renderers.
    pub(crate) layout: LayoutSettings,
}

/// Plane projection settings.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct LayoutSettings {
    /// Corner-to-corner hex diameter in drawing units.
    pub(crate) diameter: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            diameter: HexLayout::DEFAULT_DIAMETER,
        }
    }
}

impl Settings {
    /// Reads settings from `path`, or returns the defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid settings in {}", path.display()))
    }

    fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validated projection built from the layout settings.
    pub(crate) fn layout(&self) -> Result<HexLayout> {
        HexLayout::new(self.layout.diameter).context("invalid [layout] settings")
    }
}

#[cfg(test)]
mod tests {
    use hex_voyage_core::{Modifiers, OffsetCoord};
    use hex_voyage_world::{BoardConfig, ShipConfig};

    use super::*;

    #[test]
    fn empty_file_keeps_defaults() {
        let settings = Settings::parse("").expect("empty settings parse");

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.game.board, BoardConfig::default());
        assert_eq!(settings.layout().expect("default layout").diameter(), 200.0);
    }

    #[test]
    fn partial_overrides_merge_with_defaults() {
        let settings = Settings::parse(
            r#"
            seed = 42

            [board]
            columns = 5

            [ship]
            start = { column = 2, row = 1 }
            speed = 1
            deck = [{ name = "Anchor", speed = -2 }]

            [layout]
            diameter = 120.0
            "#,
        )
        .expect("settings parse");

        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.game.board.columns, 5);
        assert_eq!(settings.game.board.rows, 7);
        assert_eq!(settings.game.ship.start, OffsetCoord::new(2, 1));
        assert_eq!(settings.game.ship.speed, 1);
        assert_eq!(settings.game.ship.actions, ShipConfig::default().actions);
        assert_eq!(
            settings.game.ship.deck[0].modifiers(),
            Modifiers::new(-2, 0, 0)
        );
        assert_eq!(settings.layout.diameter, 120.0);
    }

    #[test]
    fn non_positive_diameter_is_rejected() {
        let settings = Settings::parse("[layout]\ndiameter = 0.0\n").expect("settings parse");

        let error = settings.layout().expect_err("zero diameter is invalid");
        assert!(format!("{error:#}").contains("diameter"));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Settings::parse("[board\ncolumns = 3").is_err());
    }
}
