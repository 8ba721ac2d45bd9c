//! L5R4 Engine - Main entry point.

use l5r4_engine::config::{load_dotenv_from, DEFAULT_LOG_FILTER};
use l5r4_engine::{Command, EngineConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Before the subscriber, so RUST_LOG may come from .env
    let dotenv_failures = load_dotenv_from(std::path::Path::new("."));

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    for (path, err) in &dotenv_failures {
        tracing::warn!(path = %path.display(), error = %err, "Ignoring malformed env file");
    }

    let config = EngineConfig::from_env();
    let command = Command::parse(std::env::args().skip(1))?;
    tracing::debug!(?command, ?config, "Starting L5R4 Engine");

    let stdout = std::io::stdout();
    command.run(&config, &mut stdout.lock())
}
