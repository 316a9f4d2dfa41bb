#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
pub mod domain;
pub mod http;
pub mod infrastructure;
pub mod ports;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use adapters::{CommandLogParser, DirectoryLogResolver, JsonConfigStore};
use app::StatusService;
use domain::AppPaths;
use http::AppState;
use infrastructure::{init_logging, Settings};

/// Wire up the helper from `settings` and serve until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let mut paths = AppPaths::detect();
    if let Some(data_dir) = settings
        .config_file
        .as_deref()
        .and_then(|f| f.parent())
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        paths = paths.with_data_dir(data_dir);
    }

    let _log_guard = init_logging(&paths.logs_dir(), settings.debug)
        .context("Failed to initialize logging")?;

    info!(platform = %paths.platform, "Twilight helper starting up");

    let config_path = settings
        .config_file
        .clone()
        .unwrap_or_else(|| paths.config_file());
    let config_store = JsonConfigStore::with_paths(config_path, paths.default_log_directory.clone())
        .context("Failed to initialize configuration store")?;

    let parser = CommandLogParser::new(&settings.parser_command)
        .with_args(settings.parser_args.iter());

    let service = StatusService::new(
        Arc::new(config_store),
        Arc::new(DirectoryLogResolver::new()),
        Arc::new(parser),
    )
    .with_platform(paths.platform);

    info!(
        parser = ?settings.parser_command,
        addr = %settings.bind_addr(),
        "Helper initialized"
    );

    http::server::run(AppState::new(service), settings.bind_addr(), &settings.cors_origins).await
}
