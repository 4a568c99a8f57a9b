use std::path::{Path, PathBuf};

use super::types::AppConfig;

/// Get the default planwatch data directory: ~/.planwatch
pub fn get_planwatch_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".planwatch"))
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.planwatch/config.toml
    let data_dir = get_planwatch_data_dir()?;
    let user_config = data_dir.join("config.toml");

    // Priority 2: ./planwatch.toml
    let local_config = Path::new("planwatch.toml");

    let mut cfg = if user_config.exists() {
        load_from_path(&user_config)?
    } else if local_config.exists() {
        load_from_path(local_config)?
    } else {
        AppConfig::default()
    };

    if cfg
        .logging
        .directory
        .as_deref()
        .map(|s| s.trim().is_empty())
        .unwrap_or(true)
    {
        cfg.logging.directory = Some(data_dir.join("logs").to_string_lossy().to_string());
    }

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    Ok(cfg)
}

pub fn load_from_path(path: &Path) -> anyhow::Result<AppConfig> {
    let s = std::fs::read_to_string(path)?;
    toml::from_str::<AppConfig>(&s)
        .map_err(|e| anyhow::anyhow!("invalid config {}: {e}", path.display()))
}

/// Environment variable overrides (highest priority). Blank values are ignored.
pub fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = lookup("PLANWATCH_LOG_LEVEL") {
        cfg.logging.level = v;
    }
    if let Some(v) = lookup("PLANWATCH_LOG_DIR") {
        cfg.logging.directory = Some(v);
    }
    if let Some(v) = lookup("PLANWATCH_REPLAY_DELAY_MS") {
        match v.trim().parse::<u64>() {
            Ok(ms) => cfg.replay.delay_ms = ms,
            Err(_) => tracing::warn!(value = %v, "ignoring invalid PLANWATCH_REPLAY_DELAY_MS"),
        }
    }
}
