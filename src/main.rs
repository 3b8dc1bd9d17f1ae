//! sidekick - tab-aware chat companion
//!
//! Main entry point for the sidekick CLI.

mod cli;
mod session;

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sidekick_activity::{ActivityRelay, DebounceSettings, TokioClock};
use sidekick_chat_http::HttpChatBackend;
use sidekick_config::{default_config_path, Config, ConfigLoader, ConfigValidator, LoggingConfig};
use sidekick_panel::{PanelController, PanelSettings};

use crate::cli::{Cli, Commands};

/// Initialize tracing with console and optional file output.
///
/// Console output goes to stderr so replies on stdout stay readable.
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let file_layer = if logging.file {
        let log_dir = PathBuf::from(ConfigLoader::expand_path(&logging.dir));
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("creating log directory {}", log_dir.display()))?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("sidekick")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&log_dir)
            .context("building log file appender")?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // Keep the writer alive for the whole process.
        static GUARD: OnceLock<WorkerGuard> = OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => ConfigLoader::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => match default_config_path() {
            Some(path) => ConfigLoader::load_or_default(&path)
                .with_context(|| format!("loading config from {}", path.display())),
            None => Ok(Config::default()),
        },
    }
}

fn build_panel(config: &Config) -> anyhow::Result<Arc<PanelController>> {
    let backend = HttpChatBackend::from_config(&config.chat).context("building chat client")?;
    info!("Chat endpoint: {}", backend.endpoint());
    Ok(Arc::new(PanelController::new(
        Arc::new(backend),
        PanelSettings::from_config(&config.activity),
    )))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    init_tracing(&config.logging)?;

    let warnings = ConfigValidator::validate(&config)
        .into_result()
        .context("invalid configuration")?;
    for warning in warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }

    match cli.command {
        None | Some(Commands::Chat) => {
            info!("Starting sidekick v{}", env!("CARGO_PKG_VERSION"));
            let panel = build_panel(&config)?;
            let settings = DebounceSettings::from_config(&config.activity);
            let relay = ActivityRelay::spawn(settings, Arc::new(TokioClock), panel.clone());
            session::run(panel, relay).await
        }
        Some(Commands::Send { message }) => {
            let panel = build_panel(&config)?;
            if let Some(shown) = panel.send_user_message(&message.join(" ")).await {
                println!("{}", shown);
            }
            Ok(())
        }
        Some(Commands::Alert { url }) => {
            let panel = build_panel(&config)?;
            let reply = panel
                .send_activity_alert(&url)
                .await
                .context("sending activity alert")?;
            println!("{}", reply);
            Ok(())
        }
        Some(Commands::Config) => {
            print!("{}", toml::to_string_pretty(&config).context("serializing config")?);
            Ok(())
        }
    }
}
