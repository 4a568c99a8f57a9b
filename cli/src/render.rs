//! Renderer strategy: one reducer, two ways of drawing it.

use std::io::{self, Write};

use async_trait::async_trait;
use planwatch_core::channel::PlanStreamChannels;
use planwatch_core::config::TuiConfig;
use planwatch_core::error::{CliError, PlanStreamError};
use planwatch_core::plan::{completion_summary, PlanResult, PlanningResources};

use crate::commands::cli::RenderMode;
use crate::log_renderer::LogRenderer;
use crate::tui::InteractiveRenderer;

pub const HEADER: &str = "🤖 Intelligent Task Planning";

#[async_trait]
pub trait ProgressRenderer: Send {
    fn name(&self) -> &str;

    /// Consumes the stream until a terminal state and reports the outcome.
    async fn render(&mut self, channels: PlanStreamChannels) -> Result<PlanResult, CliError>;
}

/// Whether stdout is attached to an interactive terminal.
pub fn is_interactive_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Picks the renderer once, at start.
pub fn select_renderer(
    mode: RenderMode,
    interactive_terminal: bool,
    tui: &TuiConfig,
    resources: Option<PlanningResources>,
) -> Box<dyn ProgressRenderer> {
    let interactive = match mode {
        RenderMode::Auto => interactive_terminal,
        RenderMode::Interactive => true,
        RenderMode::Log => false,
    };
    if interactive {
        Box::new(InteractiveRenderer::new(tui.clone(), resources))
    } else {
        Box::new(LogRenderer::new(io::stdout(), resources))
    }
}

/// Prints the terminal outcome. Both renderers use this, on stdout.
pub fn report_outcome<W: Write>(
    out: &mut W,
    outcome: &Result<PlanResult, PlanStreamError>,
) -> io::Result<()> {
    match outcome {
        Ok(plan) => {
            for line in completion_summary(plan) {
                writeln!(out, "{line}")?;
            }
        }
        Err(PlanStreamError::Cancelled) => writeln!(out, "\n⚠️  Cancelled by user\n")?,
        Err(err) => writeln!(out, "\n❌ Error: {err}\n")?,
    }
    out.flush()
}
