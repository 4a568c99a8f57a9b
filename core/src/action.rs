//! Human-readable phrases for planner tool invocations.

/// Phrase used when a tool name matches nothing in [`TOOL_ACTIONS`].
pub const DEFAULT_ACTION: &str = "Processing";

/// Ordered (pattern, phrase) pairs. Exact names come first so the substring
/// pass prefers the most specific pattern; the order is part of the contract.
pub const TOOL_ACTIONS: &[(&str, &str)] = &[
    // Agent/team discovery
    ("list_agents", "Discovering available agents"),
    ("search_agents", "Searching for matching agents"),
    ("get_agent", "Analyzing agent capabilities"),
    ("list_teams", "Discovering available teams"),
    ("search_teams", "Searching for matching teams"),
    ("get_team", "Analyzing team composition"),
    // Environments and queues
    ("list_environments", "Checking available environments"),
    ("get_environment", "Analyzing environment details"),
    ("list_worker_queues", "Finding available worker queues"),
    ("get_worker_queue", "Checking queue availability"),
    // Knowledge/context
    ("search_knowledge", "Searching knowledge base"),
    ("get_context", "Gathering execution context"),
    // Partial patterns
    ("agent", "Analyzing agents"),
    ("team", "Analyzing teams"),
    ("environment", "Checking environments"),
    ("queue", "Checking queues"),
    ("search", "Searching resources"),
    ("list", "Discovering resources"),
];

/// Maps a tool name to the phrase shown to the operator.
///
/// Exact match first, then a case-insensitive substring match in table order,
/// then [`DEFAULT_ACTION`].
pub fn describe(tool_name: &str) -> &'static str {
    if let Some((_, phrase)) = TOOL_ACTIONS.iter().find(|(name, _)| *name == tool_name) {
        return phrase;
    }

    let lower = tool_name.to_lowercase();
    TOOL_ACTIONS
        .iter()
        .find(|(pattern, _)| lower.contains(pattern))
        .map(|(_, phrase)| *phrase)
        .unwrap_or(DEFAULT_ACTION)
}
