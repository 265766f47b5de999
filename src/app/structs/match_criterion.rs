use std::fmt;

use super::window_ref::WindowRef;

pub type Pid = u32;

/// What a resolution looks for while walking the desktop windows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchCriterion {
    /// Windows owned by the process. The raw value is kept so out-of-range
    /// input can be rejected at resolution time instead of being truncated.
    ByProcessId(i64),
    /// Windows whose text contains the substring (case-sensitive). Empty matches all.
    ByTitleSubstring(String),
    /// The window whose handle address is exactly this value.
    ByHandleValue(isize),
}

impl MatchCriterion {
    pub fn pid(pid: Pid) -> Self {
        MatchCriterion::ByProcessId(i64::from(pid))
    }

    pub fn title(text: impl Into<String>) -> Self {
        MatchCriterion::ByTitleSubstring(text.into())
    }

    pub fn handle(window: impl Into<WindowRef>) -> Self {
        MatchCriterion::ByHandleValue(window.into().addr)
    }

    /// The process id to match, if this is a process criterion holding a representable pid.
    pub fn valid_pid(&self) -> Option<Pid> {
        match self {
            MatchCriterion::ByProcessId(raw) => Pid::try_from(*raw).ok(),
            _ => None,
        }
    }

    pub fn matches_title(&self, window_text: &str) -> bool {
        match self {
            MatchCriterion::ByTitleSubstring(text) => text.is_empty() || window_text.contains(text.as_str()),
            _ => false,
        }
    }
}

impl fmt::Display for MatchCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchCriterion::ByProcessId(pid) => write!(f, "pid={pid}"),
            MatchCriterion::ByTitleSubstring(text) => write!(f, "title=\"{text}\""),
            MatchCriterion::ByHandleValue(addr) => write!(f, "hwnd={addr}"),
        }
    }
}
