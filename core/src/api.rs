//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `planwatch_core::api` instead of reaching into internal modules.

pub use crate::action::{describe, DEFAULT_ACTION};
pub use crate::channel::{plan_stream, PlanStreamChannels, PlanStreamSender, StreamSignal};
pub use crate::config::{load_default, AppConfig, LoggingConfig, ReplayConfig, TuiConfig};
pub use crate::error::{CliError, ErrorClass, PlanStreamError};
pub use crate::event::{PlanEvent, PlanStreamEvent};
pub use crate::plan::{completion_summary, decode_plan, PlanResult, PlanningResources};
pub use crate::reducer::{apply_signal, cancel, reduce, Control, Reduced};
pub use crate::segment::segment;
pub use crate::source::spawn_jsonl_replay;
pub use crate::state::{ProgressState, ToolCallInfo, ToolStatus};
pub use crate::util::truncate_display;
pub use crate::view::{dedup_actions, ActionLine};
