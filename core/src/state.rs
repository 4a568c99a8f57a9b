//! Bounded-memory model of one plan stream.

use crate::error::PlanStreamError;
use crate::plan::PlanResult;
use crate::util::BoundedDeque;

pub const REASONING_CAPACITY: usize = 5;
pub const TOOL_CALL_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    Running,
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallInfo {
    pub id: String,
    pub name: String,
    pub status: ToolStatus,
    pub duration_secs: Option<f64>,
}

/// Everything known about the stream so far. Owned by exactly one renderer
/// loop; once `outcome` is set the state is terminal and stops changing.
#[derive(Debug)]
pub struct ProgressState {
    pub stage: String,
    pub message: String,
    pub percent: f64,
    reasoning_lines: BoundedDeque<String>,
    tool_calls: BoundedDeque<ToolCallInfo>,
    outcome: Option<Result<PlanResult, PlanStreamError>>,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressState {
    pub fn new() -> Self {
        Self {
            stage: String::new(),
            message: String::new(),
            percent: 0.0,
            reasoning_lines: BoundedDeque::new(REASONING_CAPACITY),
            tool_calls: BoundedDeque::new(TOOL_CALL_CAPACITY),
            outcome: None,
        }
    }

    pub fn set_percent(&mut self, percent: f64) {
        self.percent = percent.clamp(0.0, 100.0);
    }

    pub fn push_reasoning<I: IntoIterator<Item = String>>(&mut self, sentences: I) {
        self.reasoning_lines.extend(sentences);
    }

    pub fn reasoning_lines(&self) -> impl Iterator<Item = &str> {
        self.reasoning_lines.iter().map(String::as_str)
    }

    /// Records a new running call. A buffered entry with the same id is
    /// replaced so ids stay unique; a missing id is the empty id.
    pub fn push_tool_call(&mut self, id: String, name: String) {
        self.tool_calls.remove_where(|call| call.id == id);
        self.tool_calls.push(ToolCallInfo {
            id,
            name,
            status: ToolStatus::Running,
            duration_secs: None,
        });
    }

    /// Settles the most recent running call with `id`. Returns false when
    /// nothing matched; unmatched results never create entries.
    pub fn settle_tool_call(&mut self, id: &str, success: bool, duration_secs: Option<f64>) -> bool {
        let Some(call) = self.tool_calls.iter_mut().rev().find(|call| call.id == id) else {
            return false;
        };
        if call.status != ToolStatus::Running {
            return false;
        }
        call.status = if success {
            ToolStatus::Success
        } else {
            ToolStatus::Failed
        };
        if duration_secs.is_some() {
            call.duration_secs = duration_secs;
        }
        true
    }

    pub fn tool_calls(&self) -> &BoundedDeque<ToolCallInfo> {
        &self.tool_calls
    }

    pub fn tool_call(&self, id: &str) -> Option<&ToolCallInfo> {
        self.tool_calls.iter().rev().find(|call| call.id == id)
    }

    pub fn is_done(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn plan(&self) -> Option<&PlanResult> {
        self.outcome.as_ref().and_then(|outcome| outcome.as_ref().ok())
    }

    pub fn error(&self) -> Option<&PlanStreamError> {
        self.outcome.as_ref().and_then(|outcome| outcome.as_ref().err())
    }

    /// Enters the terminal state. Ignored if a terminal state was already reached.
    pub(crate) fn finish(&mut self, outcome: Result<PlanResult, PlanStreamError>) {
        if self.outcome.is_none() {
            self.outcome = Some(outcome);
        }
    }

    /// Consumes the state. A state that never became terminal reports that
    /// the stream ended without a plan.
    pub fn into_outcome(self) -> Result<PlanResult, PlanStreamError> {
        self.outcome.unwrap_or(Err(PlanStreamError::StreamEnded))
    }
}
