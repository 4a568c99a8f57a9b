use thiserror::Error;

use super::stream::PlanStreamError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Plan(#[from] PlanStreamError),
    #[error("config error: {0}")]
    Config(String),
    #[error("terminal error: {0}")]
    Terminal(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl CliError {
    /// Stream outcomes are printed by the renderer that observed them.
    pub fn already_reported(&self) -> bool {
        matches!(self, Self::Plan(_))
    }
}
