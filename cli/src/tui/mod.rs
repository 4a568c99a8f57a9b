mod app;
mod events;
mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use async_trait::async_trait;
use planwatch_core::channel::PlanStreamChannels;
use planwatch_core::config::TuiConfig;
use planwatch_core::error::CliError;
use planwatch_core::plan::{PlanResult, PlanningResources};
use ratatui::backend::Backend;
use ratatui::Terminal;
use tokio::sync::mpsc;

pub use app::TuiApp;
pub use events::{InputEvent, InputReader};
pub use terminal::{restore_terminal, setup_terminal};

use crate::render::{report_outcome, ProgressRenderer};

pub fn check_tui_support() -> Result<(), String> {
    if !atty::is(atty::Stream::Stdout) {
        return Err("stdout is not a terminal".to_string());
    }
    if !cfg!(windows) && std::env::var("TERM").is_err() {
        return Err("TERM environment variable not set".to_string());
    }
    Ok(())
}

/// Full-screen progress view with a bar, spinner and live action list.
pub struct InteractiveRenderer {
    config: TuiConfig,
    resources: Option<PlanningResources>,
}

impl InteractiveRenderer {
    pub fn new(config: TuiConfig, resources: Option<PlanningResources>) -> Self {
        Self { config, resources }
    }
}

#[async_trait]
impl ProgressRenderer for InteractiveRenderer {
    fn name(&self) -> &str {
        "interactive"
    }

    async fn render(&mut self, mut channels: PlanStreamChannels) -> Result<PlanResult, CliError> {
        check_tui_support().map_err(CliError::Terminal)?;
        let mut app = TuiApp::new(self.config.clone(), self.resources);
        if let Ok((width, _)) = crossterm::terminal::size() {
            app.resize(width);
        }

        let mut terminal = setup_terminal().map_err(CliError::Terminal)?;
        let (input_reader, mut input_rx) = InputReader::start();
        let result = run_on_terminal(&mut terminal, &mut app, &mut channels, &mut input_rx).await;
        input_reader.stop();
        restore_terminal(&mut terminal);
        result?;

        // Drawn after the alternate screen is gone so the summary stays in scrollback.
        let outcome = app.into_outcome();
        report_outcome(&mut io::stdout(), &outcome)?;
        outcome.map_err(CliError::from)
    }
}

/// Drives the view until the shared state reaches a terminal outcome.
///
/// Input is polled ahead of the stream so a cancel key wins over events
/// that are already queued.
pub async fn run_on_terminal<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut TuiApp,
    channels: &mut PlanStreamChannels,
    input_rx: &mut mpsc::UnboundedReceiver<InputEvent>,
) -> Result<(), CliError> {
    let mut tick =
        tokio::time::interval(Duration::from_millis(app.config.update_interval_ms.max(16)));

    terminal
        .draw(|f| ui::draw(f, app))
        .map_err(|e| CliError::Terminal(e.to_string()))?;

    loop {
        tokio::select! {
            biased;
            Some(input) = input_rx.recv() => {
                app.handle_input(input);
            }
            signal = channels.next_signal() => {
                app.apply_signal(signal);
            }
            _ = tick.tick() => app.on_tick(),
        }

        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| CliError::Terminal(e.to_string()))?;

        if app.is_done() {
            tracing::debug!("interactive view reached a terminal state");
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use planwatch_core::channel::plan_stream;
    use planwatch_core::error::PlanStreamError;
    use planwatch_core::event::PlanStreamEvent;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(100, 30)).expect("terminal")
    }

    #[tokio::test]
    async fn completes_on_plan() {
        let (tx, mut channels) = plan_stream(16);
        let (_input_tx, mut input_rx) = mpsc::unbounded_channel();
        let events = [
            PlanStreamEvent::new("progress", json!({"stage": "analyzing", "progress": 30})),
            PlanStreamEvent::new("tool_call", json!({"tool_id": "1", "tool_name": "list_agents"})),
            PlanStreamEvent::new("tool_result", json!({"tool_id": "1"})),
            PlanStreamEvent::new(
                "complete",
                json!({"plan": {"plan_id": "p-1", "title": "Ship", "summary": "Do it"}}),
            ),
        ];
        for event in events {
            tx.events.send(event).await.expect("send");
        }

        let mut app = TuiApp::new(TuiConfig::default(), None);
        let mut terminal = terminal();
        run_on_terminal(&mut terminal, &mut app, &mut channels, &mut input_rx)
            .await
            .expect("loop");

        assert_eq!(app.state.percent, 100.0);
        let plan = app.into_outcome().expect("plan");
        assert_eq!(plan.plan_id, "p-1");
    }

    #[tokio::test]
    async fn cancel_key_wins_over_queued_events() {
        let (tx, mut channels) = plan_stream(16);
        let (input_tx, mut input_rx) = mpsc::unbounded_channel();
        tx.events
            .send(PlanStreamEvent::new(
                "complete",
                json!({"plan": {"plan_id": "p-1", "title": "Ship"}}),
            ))
            .await
            .expect("send");
        input_tx
            .send(InputEvent::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL,
            )))
            .expect("send key");

        let mut app = TuiApp::new(TuiConfig::default(), None);
        let mut terminal = terminal();
        run_on_terminal(&mut terminal, &mut app, &mut channels, &mut input_rx)
            .await
            .expect("loop");

        assert!(matches!(app.into_outcome(), Err(PlanStreamError::Cancelled)));
    }

    #[tokio::test]
    async fn closed_stream_ends_the_view_with_an_error() {
        let (tx, mut channels) = plan_stream(4);
        drop(tx);
        let (_input_tx, mut input_rx) = mpsc::unbounded_channel();

        let mut app = TuiApp::new(TuiConfig::default(), None);
        let mut terminal = terminal();
        run_on_terminal(&mut terminal, &mut app, &mut channels, &mut input_rx)
            .await
            .expect("loop");

        assert!(matches!(
            app.into_outcome(),
            Err(PlanStreamError::StreamClosed)
        ));
    }
}
