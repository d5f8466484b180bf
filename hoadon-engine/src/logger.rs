//! Logging setup

use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::EngineConfig;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over `level`. Call once from the composition root.
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json_format {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_timer(LocalTimer)
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_timer(LocalTimer)
                    .with_target(true)
                    .with_level(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?;
    }

    tracing::info!(level, json = json_format, "logging initialized");
    Ok(())
}

/// [`init_logger`] with the level and format from the engine config
pub fn init_from_config(config: &EngineConfig) -> anyhow::Result<()> {
    init_logger(&config.log_level, config.log_json)
}
