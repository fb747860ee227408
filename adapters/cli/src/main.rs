#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays Hex Voyage sessions from action scripts.

mod scene;
mod script;
mod settings;
mod svg;
mod text;

use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use hex_voyage_rendering::RenderingBackend;
use hex_voyage_system_naming::{Config as NamingConfig, ProceduralNames};
use hex_voyage_world::GameStore;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{settings::Settings, svg::SvgBackend, text::TextBackend};

/// Command-line arguments accepted by the Hex Voyage binary.
#[derive(Debug, Parser)]
#[command(name = "hex-voyage", about = "Plays a Hex Voyage session from an action script")]
struct CliArgs {
    /// TOML file with board, ship and layout settings.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed for procedural tile names. Random when neither flag nor config sets it.
    #[arg(long)]
    seed: Option<u64>,
    /// Action script, one action per line. Standard input when omitted.
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,
    /// Print the final state as JSON instead of a text frame.
    #[arg(long)]
    json: bool,
    /// Print a text frame after every committed action.
    #[arg(long)]
    frames: bool,
    /// Stop at the first rejected action and exit with an error.
    #[arg(long)]
    strict: bool,
    /// Write the final map to an SVG file.
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,
}

/// Entry point for the Hex Voyage command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let args = CliArgs::parse();

    let settings = Settings::load(args.config.as_deref())?;
    let layout = settings.layout()?;
    let seed = args.seed.or(settings.seed).unwrap_or_else(rand::random);
    info!(seed, "starting session");

    let names = ProceduralNames::new(NamingConfig::new(seed));
    let mut store = GameStore::new_game(&settings.game, names);

    if args.frames {
        let mut backend = TextBackend::new(io::stdout());
        let _ = store.subscribe(move |state, _events| {
            if let Err(error) = backend.present(&scene::build(state, layout)) {
                warn!(%error, "failed to present frame");
            }
        });
    }

    let source = read_script(args.script.as_deref())?;
    let summary = script::run(&mut store, &source, args.strict)?;
    info!(
        applied = summary.applied,
        rejected = summary.rejected,
        revision = store.revision(),
        "script finished"
    );

    let state = store.read();
    if args.json {
        let json =
            serde_json::to_string_pretty(&*state).context("failed to encode the final state")?;
        println!("{json}");
    } else if !args.frames {
        TextBackend::new(io::stdout()).present(&scene::build(&state, layout))?;
    }

    if let Some(path) = args.svg {
        SvgBackend::new(path).present(&scene::build(&state, layout))?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display())),
        None => {
            let mut source = String::new();
            let _ = io::stdin()
                .read_to_string(&mut source)
                .context("failed to read script from standard input")?;
            Ok(source)
        }
    }
}
