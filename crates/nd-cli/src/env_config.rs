//! Environment configuration for `ndice`.
//!
//! Reads `NDICE_LOG`, `NDICE_MAX_DICE` and `NDICE_NO_CHANCE_CACHE`. Command
//! line flags take precedence over these.

use nd_engine::EngineConfig;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `NDICE_LOG` holds an `EnvFilter`
/// directive (default `warn`); `verbose` forces `debug`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("NDICE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Ignore the error if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Build the engine configuration from the environment, letting
/// `max_dice` override `NDICE_MAX_DICE`.
pub fn engine_config(max_dice: Option<u32>) -> EngineConfig {
    let max_dice = max_dice
        .or_else(|| {
            std::env::var("NDICE_MAX_DICE")
                .ok()
                .and_then(|s| s.trim().parse().ok())
        })
        .unwrap_or(0);
    let cache_chances = std::env::var("NDICE_NO_CHANCE_CACHE").is_err();

    EngineConfig::default()
        .with_max_dice_per_kind(max_dice)
        .with_chance_cache(cache_chances)
}
