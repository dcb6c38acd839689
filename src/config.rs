//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory
//! (or an explicit path), then applies `SUPABASE_BOOTSTRAP_LOG_LEVEL` and
//! `SUPABASE_BOOTSTRAP_PROJECT_ROOT` env overrides.
//!
//! The Supabase URL and key are never read from TOML; see
//! [`crate::supabase::ConfigPair`].

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::descriptor::Plugin;
use crate::error::AppError;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

pub const LOG_LEVEL_ENV: &str = "SUPABASE_BOOTSTRAP_LOG_LEVEL";
pub const PROJECT_ROOT_ENV: &str = "SUPABASE_BOOTSTRAP_PROJECT_ROOT";

/// `[build]` overrides layered onto the stock build descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSettings {
    /// Dev-server bind host. `None` keeps the stock host.
    pub host: Option<String>,
    /// Replaces the stock plugin list when set.
    pub plugins: Option<Vec<Plugin>>,
    /// Extra aliases: import name -> path relative to the project root.
    pub alias: BTreeMap<String, String>,
}

/// Fully-resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Absolute project root that alias paths resolve against.
    pub project_root: PathBuf,
    pub build: BuildSettings,
}

// ── raw TOML shape ────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    app: RawApp,
    #[serde(default)]
    build: RawBuild,
}

#[derive(Deserialize)]
struct RawApp {
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default = "default_project_root")]
    project_root: String,
}

impl Default for RawApp {
    fn default() -> Self {
        Self { log_level: default_log_level(), project_root: default_project_root() }
    }
}

#[derive(Deserialize, Default)]
struct RawBuild {
    host: Option<String>,
    plugins: Option<Vec<Plugin>>,
    #[serde(default)]
    alias: BTreeMap<String, String>,
}

fn default_log_level() -> String { "info".to_string() }
fn default_project_root() -> String { ".".to_string() }

// ── loading ───────────────────────────────────────────────────────────────────

/// Load config from `path`, or from [`DEFAULT_CONFIG_PATH`] when `path` is
/// `None`, then apply env-var overrides.
///
/// An explicit path must exist. A missing default file is not an error: the
/// built-in defaults are used instead.
pub fn load(path: Option<&Path>) -> Result<Config, AppError> {
    let log_level_override = env::var(LOG_LEVEL_ENV).ok();
    let project_root_override = env::var(PROJECT_ROOT_ENV).ok();

    match path {
        Some(p) => load_from(p, log_level_override.as_deref(), project_root_override.as_deref()),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                load_from(default_path, log_level_override.as_deref(), project_root_override.as_deref())
            } else {
                resolve(RawConfig::default(), log_level_override.as_deref(), project_root_override.as_deref())
            }
        }
    }
}

/// Internal loader — accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    log_level_override: Option<&str>,
    project_root_override: Option<&str>,
) -> Result<Config, AppError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?;

    resolve(parsed, log_level_override, project_root_override)
}

fn resolve(
    parsed: RawConfig,
    log_level_override: Option<&str>,
    project_root_override: Option<&str>,
) -> Result<Config, AppError> {
    let log_level = log_level_override.unwrap_or(&parsed.app.log_level).to_string();

    let root_str = project_root_override.unwrap_or(&parsed.app.project_root);
    let project_root = std::path::absolute(expand_home(root_str))
        .map_err(|e| AppError::Config(format!("cannot resolve project root '{root_str}': {e}")))?;

    Ok(Config {
        log_level,
        project_root,
        build: BuildSettings {
            host: parsed.build.host,
            plugins: parsed.build.plugins,
            alias: parsed.build.alias,
        },
    })
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
