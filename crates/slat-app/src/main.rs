// slat: replays a scripted drag gesture against a proportional pane layout
// and prints the order, fractions and dividers after every step.

mod scene;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use slat_core::ReorderMode;

use scene::Scene;

/// Replay a drag-to-reorder scene against a proportional multi-pane layout
#[derive(Parser)]
#[command(name = "slat")]
#[command(version, about)]
struct Cli {
    /// Scene file (JSON). Runs the built-in four-pane demo when omitted.
    scene: Option<PathBuf>,

    /// Settings file; defaults to <config dir>/slat/settings.json
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Reorder mode, overriding both settings and scene
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    DirectSwap,
    PlaceholderInsert,
}

impl From<ModeArg> for ReorderMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::DirectSwap => ReorderMode::DirectSwap,
            ModeArg::PlaceholderInsert => ReorderMode::PlaceholderInsert,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let settings = settings::load_settings(cli.settings.as_deref());
    let mut scene = match &cli.scene {
        Some(path) => match Scene::load(path) {
            Ok(scene) => scene,
            Err(e) => {
                log::error!("{}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Scene::demo(),
    };
    if let Some(mode) = cli.mode {
        scene.mode = Some(mode.into());
    }

    match scene::run(&scene, settings) {
        Ok(reports) => {
            for report in reports {
                println!("{}", report);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
