use std::env;
use std::path::{Path, PathBuf};

use engine::{resolve_app_paths, LoopConfig, Scene, StartupError};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::gameplay::{self, Level, LevelError, Tuning, TuningError};

const MAP_ENV_VAR: &str = "SKYBOUND_MAP";
const TUNING_ENV_VAR: &str = "SKYBOUND_TUNING";
const DEFAULT_MAP_FILE: &str = "map.txt";
const DEFAULT_TUNING_FILE: &str = "tuning.json";

#[derive(Debug, Error)]
pub(crate) enum BootstrapError {
    #[error(transparent)]
    Startup(#[from] StartupError),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error(transparent)]
    Tuning(#[from] TuningError),
}

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> Result<AppWiring, BootstrapError> {
    init_tracing();
    info!("=== Skybound Ruins Startup ===");

    let assets_dir = resolve_app_paths()?.assets_dir;
    let tuning = load_tuning(&assets_dir)?;
    let map_path = env_path(MAP_ENV_VAR).unwrap_or_else(|| assets_dir.join(DEFAULT_MAP_FILE));
    let level = Level::load(&map_path)?;
    info!(
        path = %map_path.display(),
        cols = level.cols(),
        rows = level.rows(),
        enemies = level.enemy_spawns().len(),
        "level_loaded"
    );

    let config = loop_config_for(&level);
    Ok(AppWiring {
        config,
        scene: gameplay::build_scene(level, tuning),
    })
}

/// An explicit tuning path must exist; the bundled one is optional.
fn load_tuning(assets_dir: &Path) -> Result<Tuning, TuningError> {
    let path = match env_path(TUNING_ENV_VAR) {
        Some(path) => path,
        None => {
            let bundled = assets_dir.join(DEFAULT_TUNING_FILE);
            if !bundled.is_file() {
                info!(path = %bundled.display(), "tuning_defaults");
                return Ok(Tuning::default());
            }
            bundled
        }
    };
    let tuning = Tuning::load(&path)?;
    info!(path = %path.display(), seed = tuning.world.seed, "tuning_loaded");
    Ok(tuning)
}

/// The render buffer matches the level so one tile is always 32 logical pixels.
fn loop_config_for(level: &Level) -> LoopConfig {
    let width = level.width_px().round() as u32;
    let height = level.height_px().round() as u32;
    LoopConfig {
        window_width: width,
        window_height: height,
        buffer_width: width,
        buffer_height: height,
        ..LoopConfig::default()
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
