pub mod cli;
pub mod config;
pub mod coordinator;
pub mod db;
pub mod errors;
pub mod filter;
pub mod models;
pub mod repository;
pub mod selection;
pub mod sink;
pub mod site;

use crate::cli::{parse_command, Command};
use crate::config::SiteConfig;
use crate::coordinator::{FilterCoordinator, ViewSink};
use crate::db::PreferenceStore;
use crate::errors::{AppError, AppResult};
use crate::models::ColorScheme;
use crate::repository::ProjectRepository;
use crate::sink::{JsonLinesSink, ViewMessage};
use crate::site::contact::{build_mailto, parse_fields};
use crate::site::nav::{build_nav, Location};
use crate::site::profile::{fetch_profile, profile_url};
use crate::site::theme::{restore_color_scheme, save_color_scheme, theme_options};
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_appender::non_blocking::WorkerGuard;

static LOG_GUARD: std::sync::OnceLock<WorkerGuard> = std::sync::OnceLock::new();

/// Everything a page needs for the lifetime of the session.
pub struct Site {
    pub config: SiteConfig,
    pub repository: ProjectRepository,
    pub coordinator: FilterCoordinator,
    pub preferences: PreferenceStore,
}

impl Site {
    pub async fn load(config: SiteConfig, preferences: PreferenceStore) -> Self {
        let repository = ProjectRepository::fetch_or_empty(&config.projects_path).await;
        let coordinator = FilterCoordinator::new(repository.clone());
        Self {
            config,
            repository,
            coordinator,
            preferences,
        }
    }

    /// Handles one command. Returns `false` once the session should end.
    pub async fn handle<W: Write>(&mut self, command: Command, sink: &mut JsonLinesSink<W>) -> AppResult<bool> {
        match command {
            Command::Filter(event) => {
                self.coordinator.dispatch(event, sink);
            }
            Command::Latest => {
                sink.render(self.repository.latest(self.config.latest_count), "Latest Projects");
            }
            Command::Nav { host, pathname } => {
                let links = build_nav(
                    &self.config.nav_pages(),
                    &Location::new(&host, &pathname),
                    &self.config.base_path,
                );
                sink.send(&ViewMessage::Nav { links: &links })?;
            }
            Command::Theme(None) => {
                let scheme = restore_color_scheme(&self.preferences)?;
                self.send_theme(scheme, sink)?;
            }
            Command::Theme(Some(scheme)) => {
                save_color_scheme(&self.preferences, scheme)?;
                self.send_theme(scheme, sink)?;
            }
            Command::Contact(raw) => {
                let url = build_mailto(&self.config.contact_action, &parse_fields(&raw));
                sink.send(&ViewMessage::Navigate { url: &url })?;
            }
            Command::Profile => {
                let Some(path) = self.config.profile_path.clone() else {
                    let hint = match self.config.github_username.as_deref() {
                        Some(username) => format!("no profilePath configured; fetch {}", profile_url(username)),
                        None => "no profilePath configured".to_string(),
                    };
                    return Err(AppError::NotFound(hint));
                };
                let profile = fetch_profile(&path).await?;
                sink.send(&ViewMessage::Profile { profile: &profile })?;
            }
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    pub fn send_theme<W: Write>(&self, scheme: ColorScheme, sink: &mut JsonLinesSink<W>) -> std::io::Result<()> {
        let options = theme_options(self.config.prefers_dark);
        sink.send(&ViewMessage::Theme {
            scheme: scheme.as_str(),
            options: &options,
        })
    }
}

pub fn run() {
    let result = build_runtime().and_then(|runtime| runtime.block_on(serve()));
    if let Err(error) = result {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}

fn build_runtime() -> AppResult<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| AppError::Internal(format!("failed to start runtime: {}", error)))
}

async fn serve() -> AppResult<()> {
    let config = SiteConfig::load_from_env()?;
    std::fs::create_dir_all(&config.data_dir)?;
    init_tracing(&config.log_dir(), &config.log_filter)?;

    let preferences = PreferenceStore::new(&config.preferences_path())?;
    let mut site = Site::load(config, preferences).await;
    let mut sink = JsonLinesSink::new(std::io::stdout());

    let scheme = restore_color_scheme(&site.preferences)?;
    site.send_theme(scheme, &mut sink)?;
    site.coordinator.refresh(&mut sink);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !sink.is_closed() {
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                if let Err(error) = sink.send(&ViewMessage::Error { message: &message }) {
                    tracing::warn!(error = %error, "failed to report bad command");
                }
                continue;
            }
        };
        match site.handle(command, &mut sink).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(_) if sink.is_closed() => break,
            Err(error) => {
                tracing::warn!(error = %error, "command failed");
                if let Err(error) = sink.send(&ViewMessage::Error {
                    message: &error.to_string(),
                }) {
                    tracing::warn!(error = %error, "failed to report command failure");
                }
            }
        }
    }

    tracing::info!("session ended");
    Ok(())
}

fn init_tracing(log_dir: &Path, default_filter: &str) -> AppResult<()> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "portfolio.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .json()
        .with_writer(non_blocking)
        .try_init()
        .map_err(|error| AppError::Internal(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::build_runtime;

    #[test]
    fn runtime_builds_without_panicking() {
        let runtime = build_runtime().expect("runtime");
        assert_eq!(runtime.block_on(async { 2 + 2 }), 4);
    }
}
