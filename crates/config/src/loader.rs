use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::EmofuseConfig, validate};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "emofuse.toml",
    "emofuse.yaml",
    "emofuse.yml",
    "emofuse.json",
];

/// Load config from the given path (any supported format).
///
/// Fails if the file cannot be read or parsed, or if a tunable is out of range.
pub fn load_config(path: &Path) -> anyhow::Result<EmofuseConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    let config = parse_config(&raw, path)?;

    let errors: Vec<String> = validate::check_semantics(&config)
        .into_iter()
        .filter(|d| d.severity == validate::Severity::Error)
        .map(|d| format!("{}: {}", d.path, d.message))
        .collect();
    if !errors.is_empty() {
        anyhow::bail!("invalid config {}: {}", path.display(), errors.join("; "));
    }

    Ok(config)
}

/// Load the config file as a generic JSON value, after env substitution.
pub fn load_config_value(path: &Path) -> anyhow::Result<serde_json::Value> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config_value(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./emofuse.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/emofuse/emofuse.{toml,yaml,yml,json}` (user-global)
///
/// Returns `EmofuseConfig::default()` if no config file is found or the one
/// found is unusable.
pub fn discover_and_load() -> EmofuseConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    EmofuseConfig::default()
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    let dir = config_dir()?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/emofuse/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "emofuse").map(|d| d.config_dir().to_path_buf())
}

fn format_of(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("toml")
}

pub(crate) fn parse_config(raw: &str, path: &Path) -> anyhow::Result<EmofuseConfig> {
    match format_of(path) {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        ext => anyhow::bail!("unsupported config format: .{ext}"),
    }
}

pub(crate) fn parse_config_value(raw: &str, path: &Path) -> anyhow::Result<serde_json::Value> {
    match format_of(path) {
        "toml" => {
            let v: toml::Value = toml::from_str(raw)?;
            Ok(serde_json::to_value(v)?)
        },
        "yaml" | "yml" => {
            let v: serde_yaml::Value = serde_yaml::from_str(raw)?;
            Ok(serde_json::to_value(v)?)
        },
        "json" => Ok(serde_json::from_str(raw)?),
        ext => anyhow::bail!("unsupported config format: .{ext}"),
    }
}
