//! Append-only renderer for non-interactive output (CI logs, pipes).

use std::future::Future;
use std::io::{self, Write};

use async_trait::async_trait;
use planwatch_core::action::describe;
use planwatch_core::channel::PlanStreamChannels;
use planwatch_core::error::CliError;
use planwatch_core::event::PlanEvent;
use planwatch_core::plan::{PlanResult, PlanningResources};
use planwatch_core::reducer::{self, Control};
use planwatch_core::segment::segment;
use planwatch_core::state::ProgressState;

use crate::render::{report_outcome, ProgressRenderer, HEADER};

pub struct LogRenderer<W> {
    out: W,
    resources: Option<PlanningResources>,
}

impl<W: Write + Send> LogRenderer<W> {
    pub fn new(out: W, resources: Option<PlanningResources>) -> Self {
        Self { out, resources }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Runs until the stream reaches a terminal state or `cancel` resolves.
    pub async fn run_until<C>(
        &mut self,
        mut channels: PlanStreamChannels,
        cancel: C,
    ) -> Result<PlanResult, CliError>
    where
        C: Future<Output = ()> + Send,
    {
        self.write_header()?;

        tokio::pin!(cancel);
        let mut state = ProgressState::new();
        loop {
            let control = tokio::select! {
                biased;
                _ = &mut cancel => reducer::cancel(&mut state),
                signal = channels.next_signal() => {
                    let reduced = reducer::apply_signal(&mut state, signal);
                    if let Some(event) = reduced.event.as_ref() {
                        for line in event_lines(event, &state) {
                            writeln!(self.out, "{line}")?;
                        }
                    }
                    reduced.control
                }
            };
            if control == Control::Finish {
                break;
            }
        }

        let outcome = state.into_outcome();
        report_outcome(&mut self.out, &outcome)?;
        outcome.map_err(CliError::from)
    }

    fn write_header(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{HEADER}")?;
        writeln!(self.out)?;
        if let Some(resources) = self.resources {
            writeln!(self.out, "✓ {}", resources.headline())?;
            writeln!(self.out)?;
        }
        writeln!(self.out, "⚙️  Generating execution plan...")?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

#[async_trait]
impl<W: Write + Send> ProgressRenderer for LogRenderer<W> {
    fn name(&self) -> &str {
        "log"
    }

    async fn render(&mut self, channels: PlanStreamChannels) -> Result<PlanResult, CliError> {
        let interrupt = async {
            if tokio::signal::ctrl_c().await.is_err() {
                tracing::warn!("cannot listen for Ctrl+C; cancellation disabled");
                std::future::pending::<()>().await;
            }
        };
        self.run_until(channels, interrupt).await
    }
}

/// Lines emitted for one event, after it was reduced into `state`.
///
/// Terminal events print nothing here; their outcome is reported once at the end.
pub fn event_lines(event: &PlanEvent, state: &ProgressState) -> Vec<String> {
    let mut lines = Vec::new();
    match event {
        PlanEvent::Progress {
            percent,
            message,
            stage,
        } => {
            match (stage, message) {
                (Some(stage), Some(message)) => lines.push(format!("  [{stage}] {message}")),
                (Some(stage), None) => lines.push(format!("  [{stage}]")),
                (None, Some(message)) => lines.push(format!("  {message}")),
                (None, None) => {}
            }
            if let Some(percent) = percent {
                lines.push(format!("  Progress: {}%", percent.clamp(0.0, 100.0) as u32));
            }
        }
        PlanEvent::Thinking {
            content: Some(content),
        } => {
            lines.extend(
                segment(content)
                    .into_iter()
                    .map(|sentence| format!("  [PLANNER]: {sentence}")),
            );
        }
        PlanEvent::ToolCall {
            name: Some(name), ..
        } if !name.is_empty() => {
            lines.push(format!("  › {}...", describe(name)));
        }
        PlanEvent::ToolResult {
            id, name, status, ..
        } => {
            let name = name.clone().or_else(|| {
                id.as_deref()
                    .and_then(|id| state.tool_call(id))
                    .map(|call| call.name.clone())
            });
            if let Some(name) = name {
                let action = describe(&name);
                if matches!(status.as_deref(), None | Some("") | Some("success")) {
                    lines.push(format!("  ✓ {action}"));
                } else {
                    lines.push(format!("  ✗ {action} (failed)"));
                }
            }
        }
        PlanEvent::StepStarted {
            name: Some(name),
            description,
        } => {
            lines.push(String::new());
            lines.push(format!("  ⚙️  {name}"));
            if let Some(description) = description {
                lines.push(format!("     {description}"));
            }
        }
        PlanEvent::StepCompleted { name: Some(name) } => {
            lines.push(format!("  ✓ {name} complete"));
        }
        _ => {}
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use planwatch_core::channel::plan_stream;
    use planwatch_core::error::PlanStreamError;
    use planwatch_core::event::PlanStreamEvent;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn ev(kind: &str, data: serde_json::Value) -> PlanStreamEvent {
        PlanStreamEvent::new(kind, data)
    }

    async fn run(events: Vec<PlanStreamEvent>) -> (String, Result<PlanResult, CliError>) {
        let (tx, channels) = plan_stream(64);
        for e in events {
            tx.events.send(e).await.expect("send");
        }
        drop(tx);
        let mut renderer = LogRenderer::new(Vec::new(), None);
        let result = renderer
            .run_until(channels, std::future::pending::<()>())
            .await;
        let text = String::from_utf8(renderer.into_inner()).expect("utf8");
        (text, result)
    }

    #[tokio::test]
    async fn logs_each_event_and_summary() {
        let events = vec![
            ev("progress", json!({"progress": 10, "stage": "discovery", "message": "Scanning"})),
            ev("thinking", json!({"content": "Looking for agents. Two found."})),
            ev("tool_call", json!({"tool_id": "t1", "tool_name": "list_agents"})),
            ev("tool_result", json!({"tool_id": "t1"})),
            ev("tool_call", json!({"tool_id": "t2", "tool_name": "search_teams"})),
            ev("tool_result", json!({"tool_id": "t2", "tool_name": "search_teams", "status": "timeout"})),
            ev("step_started", json!({"step_name": "Matching", "step_description": "Scoring"})),
            ev("step_completed", json!({"step_name": "Matching"})),
            ev("complete", json!({"plan": {"summary": "Ship it", "cost_estimate": {"estimated_cost_usd": 2}}})),
        ];
        let (text, result) = run(events).await;
        assert!(result.is_ok());

        let expected = [
            "🤖 Intelligent Task Planning",
            "⚙️  Generating execution plan...",
            "  [discovery] Scanning",
            "  Progress: 10%",
            "  [PLANNER]: Looking for agents.",
            "  [PLANNER]: Two found.",
            "  › Discovering available agents...",
            "  ✓ Discovering available agents",
            "  › Searching for matching teams...",
            "  ✗ Searching for matching teams (failed)",
            "  ⚙️  Matching",
            "     Scoring",
            "  ✓ Matching complete",
            "✓ Plan generated successfully",
            "  📋 Summary: Ship it",
            "  💰 Estimated cost: $2.00",
        ];
        let mut rest = text.as_str();
        for line in expected {
            let idx = rest
                .find(line)
                .unwrap_or_else(|| panic!("missing or out of order: {line:?}\n{text}"));
            rest = &rest[idx + line.len()..];
        }
    }

    #[tokio::test]
    async fn error_event_prints_error_and_fails() {
        let (text, result) = run(vec![ev("error", json!({"error": "no agents"}))]).await;
        assert!(text.contains("❌ Error: planning error: no agents"));
        match result {
            Err(CliError::Plan(PlanStreamError::Remote(msg))) => assert_eq!(msg, "no agents"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn closed_stream_is_reported() {
        let (text, result) = run(vec![]).await;
        assert!(text.contains("closed unexpectedly"));
        assert!(matches!(
            result,
            Err(CliError::Plan(PlanStreamError::StreamClosed))
        ));
    }

    #[tokio::test]
    async fn cancellation_wins_over_pending_events() {
        let (tx, channels) = plan_stream(8);
        tx.events
            .send(ev("complete", json!({"plan": {"summary": "late"}})))
            .await
            .expect("send");

        let mut renderer = LogRenderer::new(Vec::new(), None);
        let result = renderer.run_until(channels, async {}).await;
        let text = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert!(text.contains("Cancelled by user"));
        assert!(matches!(
            result,
            Err(CliError::Plan(PlanStreamError::Cancelled))
        ));
        drop(tx);
    }

    #[tokio::test]
    async fn header_includes_resources() {
        let (tx, channels) = plan_stream(8);
        drop(tx);
        let resources = PlanningResources {
            agents: 3,
            teams: 1,
            environments: 2,
        };
        let mut renderer = LogRenderer::new(Vec::new(), Some(resources));
        let _ = renderer
            .run_until(channels, std::future::pending::<()>())
            .await;
        let text = String::from_utf8(renderer.into_inner()).expect("utf8");
        assert!(text.contains("✓ Found 3 agents, 1 teams, 2 environments"));
    }

    #[test]
    fn event_lines_for_progress_without_stage() {
        let state = ProgressState::new();
        let lines = event_lines(
            &PlanEvent::Progress {
                percent: None,
                message: Some("Working".into()),
                stage: None,
            },
            &state,
        );
        assert_eq!(lines, vec!["  Working".to_string()]);
    }
}
