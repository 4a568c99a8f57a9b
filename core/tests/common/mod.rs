use planwatch_core::api::{PlanStreamEvent, PlanStreamSender};
use serde_json::{json, Value};

pub fn event(kind: &str, data: Value) -> PlanStreamEvent {
    PlanStreamEvent::new(kind, data)
}

pub fn valid_plan() -> Value {
    json!({
        "plan_id": "plan-42",
        "title": "Audit IAM roles",
        "summary": "Review unused IAM roles and open a cleanup ticket",
        "recommended_execution": {
            "entity_type": "agent",
            "entity_id": "agent-7",
            "entity_name": "security-auditor"
        },
        "cost_estimate": {"estimated_cost_usd": 1.5}
    })
}

/// progress(10%) -> thinking -> tool_call -> tool_result -> complete
pub fn happy_path() -> Vec<PlanStreamEvent> {
    vec![
        event("progress", json!({"progress": 10, "stage": "discovery", "message": "Starting"})),
        event("thinking", json!({"content": "Looking."})),
        event("tool_call", json!({"tool_id": "t1", "tool_name": "list_agents"})),
        event("tool_result", json!({"tool_id": "t1", "tool_name": "list_agents", "status": "success", "duration": 0.4})),
        event("complete", json!({"plan": valid_plan()})),
    ]
}

pub async fn send_all(tx: &PlanStreamSender, events: Vec<PlanStreamEvent>) {
    for ev in events {
        tx.events.send(ev).await.expect("send event");
    }
}
