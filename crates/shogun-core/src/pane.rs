//! Agent ids and the tmux command lines used to read from and type into
//! an agent's pane. Running the commands is left to the caller.

use crate::error::DashboardError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static AGENT_ID_RE: OnceLock<Regex> = OnceLock::new();

fn agent_id_re() -> &'static Regex {
    AGENT_ID_RE.get_or_init(|| Regex::new(r"^(?i:ashigaru|足軽)([1-9][0-9]{0,2})$").unwrap())
}

// ---------------------------------------------------------------------------
// AgentId
// ---------------------------------------------------------------------------

/// A worker agent, written `ashigaruN` (or `足軽N` in dashboard tables).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(u32);

impl AgentId {
    pub fn number(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ashigaru{}", self.0)
    }
}

impl FromStr for AgentId {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        agent_id_re()
            .captures(s.trim())
            .and_then(|caps| caps[1].parse().ok())
            .map(AgentId)
            .ok_or_else(|| DashboardError::InvalidAgentId(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// tmux argument builders
// ---------------------------------------------------------------------------

/// `tmux capture-pane`: print the last `lines` lines of the pane, joining
/// wrapped lines.
pub fn capture_args(target: &str, lines: u32) -> Vec<String> {
    vec![
        "capture-pane".into(),
        "-p".into(),
        "-J".into(),
        "-t".into(),
        target.into(),
        "-S".into(),
        format!("-{lines}"),
    ]
}

/// `tmux send-keys -l`: type `text` literally, without key-name lookup.
pub fn send_text_args(target: &str, text: &str) -> Vec<String> {
    vec![
        "send-keys".into(),
        "-t".into(),
        target.into(),
        "-l".into(),
        text.into(),
    ]
}

pub fn send_enter_args(target: &str) -> Vec<String> {
    vec![
        "send-keys".into(),
        "-t".into(),
        target.into(),
        "Enter".into(),
    ]
}

/// Drop trailing blank lines that tmux pads a capture with.
pub fn trim_capture(output: &str) -> &str {
    output.trim_end_matches(['\n', '\r', ' '])
}
