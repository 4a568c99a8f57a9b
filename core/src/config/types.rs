use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub tui: TuiConfig,

    #[serde(default)]
    pub replay: ReplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr. Off by default so the interactive view stays clean.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "planwatch_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    false
}

fn default_logging_file() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Redraw/animation tick. Values below 16 are raised to 16.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    #[serde(default = "default_progress_max_width")]
    pub progress_max_width: u16,

    #[serde(default = "default_message_width")]
    pub message_width: usize,

    #[serde(default = "default_reasoning_width")]
    pub reasoning_width: usize,
}

fn default_update_interval_ms() -> u64 {
    100
}

fn default_progress_max_width() -> u16 {
    80
}

fn default_message_width() -> usize {
    80
}

fn default_reasoning_width() -> usize {
    100
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
            progress_max_width: default_progress_max_width(),
            message_width: default_message_width(),
            reasoning_width: default_reasoning_width(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Pause before each replayed event.
    #[serde(default)]
    pub delay_ms: u64,

    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize {
    100
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            channel_capacity: default_channel_capacity(),
        }
    }
}
