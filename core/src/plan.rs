//! The decoded planning result and its completion summary.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::PlanStreamError;
use crate::util::truncate_display;

/// Summary text is cut to this many characters in the completion summary.
pub const SUMMARY_MAX_CHARS: usize = 120;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    #[serde(default, deserialize_with = "nullable")]
    pub plan_id: String,

    #[serde(default, deserialize_with = "nullable")]
    pub title: String,

    #[serde(default, deserialize_with = "nullable")]
    pub summary: String,

    #[serde(default, deserialize_with = "nullable")]
    pub recommended_execution: RecommendedExecution,

    #[serde(default)]
    pub cost_estimate: Option<CostEstimate>,

    #[serde(default, deserialize_with = "nullable")]
    pub risks: Vec<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub prerequisites: Vec<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub success_criteria: Vec<String>,
}

/// Where the planner suggests running the task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendedExecution {
    /// `agent` or `team`.
    #[serde(default, deserialize_with = "nullable")]
    pub entity_type: String,

    #[serde(default, deserialize_with = "nullable")]
    pub entity_id: String,

    #[serde(default, deserialize_with = "nullable")]
    pub entity_name: String,

    #[serde(default, deserialize_with = "nullable")]
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    #[serde(default, deserialize_with = "nullable")]
    pub estimated_cost_usd: f64,
}

impl PlanResult {
    /// Estimated cost in USD, if one was given and it is positive.
    pub fn positive_cost(&self) -> Option<f64> {
        self.cost_estimate
            .as_ref()
            .map(|c| c.estimated_cost_usd)
            .filter(|cost| *cost > 0.0)
    }
}

/// Counts of the resources discovered before planning started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanningResources {
    pub agents: usize,
    pub teams: usize,
    pub environments: usize,
}

impl PlanningResources {
    pub fn headline(&self) -> String {
        format!(
            "Found {} agents, {} teams, {} environments",
            self.agents, self.teams, self.environments
        )
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decodes the `plan` payload of a `complete` event.
pub fn decode_plan(payload: Option<&Value>) -> Result<PlanResult, PlanStreamError> {
    let value = match payload {
        None | Some(Value::Null) => return Err(PlanStreamError::PlanMissing),
        Some(value) => value,
    };
    if !value.is_object() {
        return Err(PlanStreamError::PlanMalformed(format!(
            "expected an object, got {}",
            json_kind(value)
        )));
    }

    let plan = PlanResult::deserialize(value)
        .map_err(|e| PlanStreamError::PlanMalformed(e.to_string()))?;

    if let Some(cost) = plan.cost_estimate.as_ref() {
        if cost.estimated_cost_usd < 0.0 {
            return Err(PlanStreamError::PlanMalformed(format!(
                "negative cost estimate {}",
                cost.estimated_cost_usd
            )));
        }
    }

    Ok(plan)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Lines printed once a plan is received. Both renderers print exactly these.
pub fn completion_summary(plan: &PlanResult) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "✓ Plan generated successfully".to_string(),
        String::new(),
    ];

    let target = &plan.recommended_execution;
    if !target.entity_type.is_empty() {
        let icon = if target.entity_type == "team" {
            "👥"
        } else {
            "🤖"
        };
        lines.push(format!(
            "  {} Using {}: {}",
            icon, target.entity_type, target.entity_name
        ));
    }

    if !plan.summary.is_empty() {
        lines.push(format!(
            "  📋 Summary: {}",
            truncate_display(&plan.summary, SUMMARY_MAX_CHARS)
        ));
    }

    if let Some(cost) = plan.positive_cost() {
        lines.push(format!("  💰 Estimated cost: ${:.2}", cost));
    }

    lines.push(String::new());
    lines
}
