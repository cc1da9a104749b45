//! Coarse user-agent classification for login logs.
//!
//! Best-effort substring matching over small ordered rule tables; the first
//! rule whose needle appears in the agent wins. Agents are trivially spoofed,
//! so nothing here may gate access.

const UNKNOWN: &str = "Unknown";

/// `(needle, label)` pairs, checked in order.
const BROWSER_RULES: &[(&str, &str)] = &[
    ("Chrome", "Chrome"),
    ("Firefox", "Firefox"),
    ("Safari", "Safari"),
    ("Edge", "Edge"),
];

const OS_RULES: &[(&str, &str)] = &[
    ("Windows", "Windows"),
    ("Mac", "MacOS"),
    ("Linux", "Linux"),
    ("Android", "Android"),
    ("iOS", "iOS"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    pub browser: &'static str,
    pub os: &'static str,
    pub device: &'static str,
}

fn first_match(agent: &str, rules: &[(&str, &'static str)]) -> &'static str {
    rules
        .iter()
        .find(|(needle, _)| agent.contains(needle))
        .map_or(UNKNOWN, |(_, label)| label)
}

pub fn classify(agent: &str) -> AgentProfile {
    AgentProfile {
        browser: first_match(agent, BROWSER_RULES),
        os: first_match(agent, OS_RULES),
        device: if agent.contains("Mobile") {
            "Mobile"
        } else {
            "Desktop"
        },
    }
}
