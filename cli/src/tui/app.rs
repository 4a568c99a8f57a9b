use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use planwatch_core::channel::StreamSignal;
use planwatch_core::config::TuiConfig;
use planwatch_core::error::PlanStreamError;
use planwatch_core::event::PlanEvent;
use planwatch_core::plan::{PlanResult, PlanningResources};
use planwatch_core::reducer::{self, Control};
use planwatch_core::state::ProgressState;
use planwatch_core::util::truncate_display;
use planwatch_core::view::{dedup_actions, ActionLine};

use super::events::InputEvent;

const SPINNER_FRAMES: [&str; 4] = ["∙∙∙", "●∙∙", "∙●∙", "∙∙●"];

/// Interactive view model: the shared [`ProgressState`] plus render-only
/// bookkeeping (spinner frame, bar width, transient notice).
pub struct TuiApp {
    pub config: TuiConfig,
    pub state: ProgressState,
    pub resources: Option<PlanningResources>,
    pub progress_width: u16,
    /// Last completed step, shown until the next step starts.
    pub notice: Option<String>,
    spinner_frame: usize,
}

impl TuiApp {
    pub fn new(config: TuiConfig, resources: Option<PlanningResources>) -> Self {
        let progress_width = config.progress_max_width;
        Self {
            config,
            state: ProgressState::new(),
            resources,
            progress_width,
            notice: None,
            spinner_frame: 0,
        }
    }

    pub fn handle_input(&mut self, input: InputEvent) -> Control {
        match input {
            InputEvent::Key(key) if is_cancel_key(&key) => reducer::cancel(&mut self.state),
            InputEvent::Key(_) => Control::Continue,
            InputEvent::Resize(width, _) => {
                self.resize(width);
                Control::Continue
            }
        }
    }

    pub fn resize(&mut self, width: u16) {
        self.progress_width = width.saturating_sub(4).min(self.config.progress_max_width);
    }

    pub fn apply_signal(&mut self, signal: StreamSignal) -> Control {
        let reduced = reducer::apply_signal(&mut self.state, signal);
        match reduced.event {
            Some(PlanEvent::StepStarted { .. }) => self.notice = None,
            Some(PlanEvent::StepCompleted { name: Some(name) }) => {
                self.notice = Some(format!("✓ {name} complete"));
            }
            _ => {}
        }
        reduced.control
    }

    pub fn on_tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn is_done(&self) -> bool {
        self.state.is_done()
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame]
    }

    pub fn ratio(&self) -> f64 {
        (self.state.percent / 100.0).clamp(0.0, 1.0)
    }

    pub fn stage_label(&self) -> &str {
        if self.state.stage.is_empty() {
            "Initializing..."
        } else {
            &self.state.stage
        }
    }

    /// The status message, unless it is empty or repeats the stage.
    pub fn message_line(&self) -> Option<String> {
        let message = &self.state.message;
        if message.is_empty() || *message == self.state.stage {
            return None;
        }
        Some(truncate_display(message, self.config.message_width))
    }

    pub fn reasoning_view(&self) -> Vec<String> {
        self.state
            .reasoning_lines()
            .filter(|line| !line.is_empty())
            .map(|line| truncate_display(line, self.config.reasoning_width))
            .collect()
    }

    pub fn actions(&self) -> Vec<ActionLine> {
        dedup_actions(self.state.tool_calls())
    }

    pub fn into_outcome(self) -> Result<PlanResult, PlanStreamError> {
        self.state.into_outcome()
    }
}

fn is_cancel_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
