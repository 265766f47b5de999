use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("Invalid platform: win32 required")]
    PlatformUnavailable,
    #[error("value of nCmdShow invalid: {0}")]
    InvalidShowCmd(i64),
    #[error("pid value invalid: {0}")]
    InvalidPid(i64),
    #[error("invalid window handle: {0}")]
    InvalidWindow(isize),
    #[error("kill() matchType invalid: windows can only be killed by pid or title")]
    UnsupportedKillCriterion,
    #[error("{call} failed: {message}")]
    Native { call: &'static str, message: String },
    #[error("window enumeration failed: {0}")]
    EnumerationFailed(String),
}

impl ControllerError {
    pub fn native(call: &'static str, message: impl Into<String>) -> Self {
        Self::Native {
            call,
            message: message.into(),
        }
    }

    pub fn get_log_level(&self) -> log::Level {
        match self {
            Self::PlatformUnavailable | Self::EnumerationFailed(_) => log::Level::Error,
            Self::Native { .. } | Self::InvalidWindow(_) => log::Level::Warn,
            _ => log::Level::Debug,
        }
    }

    pub fn log(&self) {
        log::log!(self.get_log_level(), "{self}");
    }
}

#[cfg(windows)]
impl ControllerError {
    pub fn from_win32(call: &'static str, error: windows::core::Error) -> Self {
        Self::native(call, error.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ControllerError::InvalidShowCmd(-1).to_string(), "value of nCmdShow invalid: -1");
        assert_eq!(
            ControllerError::native("GetWindowThreadProcessId", "access denied").to_string(),
            "GetWindowThreadProcessId failed: access denied"
        );
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(ControllerError::PlatformUnavailable.get_log_level(), log::Level::Error);
        assert_eq!(ControllerError::native("ShowWindow", "x").get_log_level(), log::Level::Warn);
        assert_eq!(ControllerError::UnsupportedKillCriterion.get_log_level(), log::Level::Debug);
    }
}
