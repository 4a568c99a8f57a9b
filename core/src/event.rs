//! Inbound stream events: the raw wire shape and its typed decoding.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const UNKNOWN_ERROR: &str = "unknown error";

/// One message as delivered by the event source.
///
/// `data` is an open mapping. A JSON `null` decodes to an empty map and a bare
/// string is kept under `content`, so sources that send unstructured payloads
/// still produce a usable event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanStreamEvent {
    #[serde(rename = "type")]
    pub event_type: String,

    #[serde(default, deserialize_with = "deserialize_data")]
    pub data: Map<String, Value>,
}

impl PlanStreamEvent {
    pub fn new(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            event_type: event_type.into(),
            data: normalize_data(data),
        }
    }
}

fn deserialize_data<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(normalize_data)
}

fn normalize_data(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::String(content) => {
            let mut map = Map::new();
            map.insert("content".to_string(), Value::String(content));
            map
        }
        _ => Map::new(),
    }
}

/// Typed view over [`PlanStreamEvent`], holding only the fields each
/// transition reads. Fields of the wrong JSON type count as absent.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanEvent {
    Progress {
        percent: Option<f64>,
        message: Option<String>,
        stage: Option<String>,
    },
    Thinking {
        content: Option<String>,
    },
    ToolCall {
        id: Option<String>,
        name: Option<String>,
    },
    ToolResult {
        id: Option<String>,
        name: Option<String>,
        status: Option<String>,
        duration_secs: Option<f64>,
    },
    StepStarted {
        name: Option<String>,
        description: Option<String>,
    },
    StepCompleted {
        name: Option<String>,
    },
    ResourcesSummary,
    Complete {
        plan: Option<Value>,
    },
    Error {
        message: String,
    },
    Unknown {
        event_type: String,
    },
}

impl PlanEvent {
    pub fn decode(raw: &PlanStreamEvent) -> Self {
        let data = &raw.data;
        match raw.event_type.as_str() {
            "progress" => Self::Progress {
                percent: number(data, "progress"),
                message: text(data, "message"),
                stage: text(data, "stage"),
            },
            "thinking" => Self::Thinking {
                content: text(data, "content"),
            },
            "tool_call" => Self::ToolCall {
                id: text(data, "tool_id"),
                name: text(data, "tool_name"),
            },
            "tool_result" => Self::ToolResult {
                id: text(data, "tool_id"),
                name: text(data, "tool_name"),
                status: text(data, "status"),
                duration_secs: number(data, "duration"),
            },
            "step_started" => Self::StepStarted {
                name: text(data, "step_name"),
                description: text(data, "step_description"),
            },
            "step_completed" => Self::StepCompleted {
                name: text(data, "step_name"),
            },
            "resources_summary" => Self::ResourcesSummary,
            "complete" => Self::Complete {
                plan: data.get("plan").filter(|v| !v.is_null()).cloned(),
            },
            "error" => Self::Error {
                message: text(data, "error")
                    .or_else(|| text(data, "message"))
                    .unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            },
            other => Self::Unknown {
                event_type: other.to_string(),
            },
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Progress { .. } => "progress",
            Self::Thinking { .. } => "thinking",
            Self::ToolCall { .. } => "tool_call",
            Self::ToolResult { .. } => "tool_result",
            Self::StepStarted { .. } => "step_started",
            Self::StepCompleted { .. } => "step_completed",
            Self::ResourcesSummary => "resources_summary",
            Self::Complete { .. } => "complete",
            Self::Error { .. } => "error",
            Self::Unknown { .. } => "unknown",
        }
    }
}

fn text(data: &Map<String, Value>, key: &str) -> Option<String> {
    data.get(key).and_then(Value::as_str).map(str::to_string)
}

fn number(data: &Map<String, Value>, key: &str) -> Option<f64> {
    data.get(key).and_then(Value::as_f64)
}
