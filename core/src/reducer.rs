//! Transition table for a plan stream.
//!
//! Both renderers feed every signal through [`apply_signal`] and differ only
//! in how they present the resulting [`ProgressState`].

use crate::channel::StreamSignal;
use crate::error::PlanStreamError;
use crate::event::PlanEvent;
use crate::plan::decode_plan;
use crate::segment::segment;
use crate::state::ProgressState;

/// What the consumer loop should do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Finish,
}

impl Control {
    fn from_state(state: &ProgressState) -> Self {
        if state.is_done() {
            Self::Finish
        } else {
            Self::Continue
        }
    }
}

/// Result of applying one channel signal.
#[derive(Debug)]
pub struct Reduced {
    pub control: Control,
    /// The decoded event, when the signal carried one.
    pub event: Option<PlanEvent>,
}

/// Applies one remote event. Terminal states ignore further events.
pub fn reduce(state: &mut ProgressState, event: &PlanEvent) -> Control {
    if state.is_done() {
        tracing::trace!(kind = event.kind(), "event after terminal state ignored");
        return Control::Finish;
    }
    tracing::debug!(kind = event.kind(), "reducing plan event");

    match event {
        PlanEvent::Progress {
            percent,
            message,
            stage,
        } => {
            if let Some(percent) = percent {
                state.set_percent(*percent);
            }
            if let Some(message) = message {
                state.message = message.clone();
            }
            if let Some(stage) = stage {
                state.stage = stage.clone();
            }
        }
        PlanEvent::Thinking { content } => {
            if let Some(content) = content.as_deref().filter(|c| !c.is_empty()) {
                state.push_reasoning(segment(content));
            }
        }
        PlanEvent::ToolCall { id, name } => {
            if let Some(name) = name.as_deref().filter(|n| !n.is_empty()) {
                state.push_tool_call(id.clone().unwrap_or_default(), name.to_string());
            }
        }
        PlanEvent::ToolResult {
            id,
            status,
            duration_secs,
            ..
        } => {
            let success = matches!(status.as_deref(), None | Some("") | Some("success"));
            let id = id.as_deref().unwrap_or_default();
            if !state.settle_tool_call(id, success, *duration_secs) {
                tracing::debug!(tool_id = id, "tool_result without a running call dropped");
            }
        }
        PlanEvent::StepStarted { name, description } => {
            if let Some(name) = name {
                state.stage = name.clone();
            }
            if let Some(description) = description {
                state.message = description.clone();
            }
        }
        PlanEvent::StepCompleted { .. } | PlanEvent::ResourcesSummary => {}
        PlanEvent::Complete { plan } => match decode_plan(plan.as_ref()) {
            Ok(plan) => {
                state.set_percent(100.0);
                tracing::info!(plan_id = %plan.plan_id, "plan received");
                state.finish(Ok(plan));
            }
            Err(err) => {
                tracing::warn!(error = %err, "complete event rejected");
                state.finish(Err(err));
            }
        },
        PlanEvent::Error { message } => {
            tracing::info!(error = %message, "planner reported an error");
            state.finish(Err(PlanStreamError::Remote(message.clone())));
        }
        PlanEvent::Unknown { event_type } => {
            tracing::debug!(event_type = %event_type, "unrecognized event type ignored");
        }
    }

    Control::from_state(state)
}

/// Applies whatever arrived on the channels: an event or a channel-level condition.
pub fn apply_signal(state: &mut ProgressState, signal: StreamSignal) -> Reduced {
    match signal {
        StreamSignal::Event(raw) => {
            let event = PlanEvent::decode(&raw);
            let control = reduce(state, &event);
            Reduced {
                control,
                event: Some(event),
            }
        }
        StreamSignal::EventsClosed => {
            tracing::debug!("event channel closed");
            state.finish(Err(PlanStreamError::StreamClosed));
            channel_only(state)
        }
        StreamSignal::Transport(err) => {
            tracing::debug!(error = %err, "transport error");
            state.finish(Err(PlanStreamError::Transport(err)));
            channel_only(state)
        }
        StreamSignal::ErrorsEnded => {
            // A captured plan already made the state terminal; finish() keeps it.
            state.finish(Err(PlanStreamError::StreamEnded));
            channel_only(state)
        }
    }
}

/// Operator cancellation. Preempts anything still pending on the channels.
pub fn cancel(state: &mut ProgressState) -> Control {
    if !state.is_done() {
        tracing::info!("plan stream cancelled by user");
    }
    state.finish(Err(PlanStreamError::Cancelled));
    Control::Finish
}

fn channel_only(state: &ProgressState) -> Reduced {
    Reduced {
        control: Control::from_state(state),
        event: None,
    }
}
