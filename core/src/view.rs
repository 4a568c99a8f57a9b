//! Display-time projections of [`ProgressState`](crate::state::ProgressState).
//! Nothing here mutates state.

use crate::action::describe;
use crate::state::{ToolCallInfo, ToolStatus};

/// One displayed action after merging calls that share a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionLine {
    pub phrase: &'static str,
    pub status: ToolStatus,
}

/// Merges buffered tool calls by their action phrase, in first-seen order.
///
/// A later call replaces the shown one when it is running, or when it
/// succeeded and the shown one is not running. A later failure never hides
/// an earlier entry.
pub fn dedup_actions<'a, I>(calls: I) -> Vec<ActionLine>
where
    I: IntoIterator<Item = &'a ToolCallInfo>,
{
    let mut lines: Vec<ActionLine> = Vec::new();
    for call in calls {
        let phrase = describe(&call.name);
        match lines.iter_mut().find(|line| line.phrase == phrase) {
            None => lines.push(ActionLine {
                phrase,
                status: call.status,
            }),
            Some(line) => {
                let replace = call.status == ToolStatus::Running
                    || (call.status == ToolStatus::Success && line.status != ToolStatus::Running);
                if replace {
                    line.status = call.status;
                }
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn call(name: &str, status: ToolStatus) -> ToolCallInfo {
        ToolCallInfo {
            id: String::new(),
            name: name.to_string(),
            status,
            duration_secs: None,
        }
    }

    #[test]
    fn running_entry_wins_over_settled_ones() {
        let calls = vec![
            call("list_agents", ToolStatus::Success),
            call("list_agents", ToolStatus::Running),
            call("list_agents", ToolStatus::Success),
        ];
        assert_eq!(
            dedup_actions(&calls),
            vec![ActionLine {
                phrase: "Discovering available agents",
                status: ToolStatus::Running
            }]
        );
    }

    #[test]
    fn later_success_replaces_failure_but_not_vice_versa() {
        let calls = vec![
            call("list_teams", ToolStatus::Failed),
            call("list_teams", ToolStatus::Success),
            call("get_team", ToolStatus::Success),
            call("get_team", ToolStatus::Failed),
        ];
        assert_eq!(
            dedup_actions(&calls),
            vec![
                ActionLine {
                    phrase: "Discovering available teams",
                    status: ToolStatus::Success
                },
                ActionLine {
                    phrase: "Analyzing team composition",
                    status: ToolStatus::Success
                },
            ]
        );
    }

    #[test]
    fn distinct_tools_sharing_a_phrase_are_merged() {
        let calls = vec![
            call("mystery_tool", ToolStatus::Success),
            call("other_unknown", ToolStatus::Running),
        ];
        let lines = dedup_actions(&calls);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].phrase, "Processing");
        assert_eq!(lines[0].status, ToolStatus::Running);
    }

    #[test]
    fn projection_does_not_touch_input() {
        let calls = vec![
            call("list_agents", ToolStatus::Success),
            call("list_agents", ToolStatus::Running),
        ];
        let before = calls.clone();
        let _ = dedup_actions(&calls);
        assert_eq!(calls, before);
    }
}
