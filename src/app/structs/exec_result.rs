use std::fmt;

use super::match_criterion::Pid;
use super::window_ref::WindowRef;

/// Aggregated outcome of a batch operation.
///
/// `error_code` is 0 when every sub-operation succeeded and 1 otherwise. Failures are
/// appended to `message` without stopping the rest of the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecResult {
    pub error_code: i32,
    pub message: String,
    pub pids: Vec<Pid>,
    pub hwnds: Vec<isize>,
}

impl ExecResult {
    pub fn new() -> ExecResult {
        ExecResult::default()
    }

    pub fn failed(message: impl Into<String>) -> ExecResult {
        ExecResult {
            error_code: 1,
            message: message.into(),
            ..Default::default()
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error_code == 0
    }

    pub fn push_error(&mut self, error: impl fmt::Display) {
        self.error_code = 1;
        self.push_message(error);
    }

    pub fn push_message(&mut self, message: impl fmt::Display) {
        match self.message.is_empty() {
            true => self.message = message.to_string(),
            false => self.message.push_str(&format!("\n {message}")),
        }
    }

    pub fn push_window(&mut self, window: WindowRef) {
        self.hwnds.push(window.addr);
    }

    pub fn push_pid(&mut self, pid: Pid) {
        self.pids.push(pid);
    }
}

impl fmt::Display for ExecResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ err: {}, msg: {:?}, pids: {:?}, hwnds: {:?} }}",
            self.error_code, self.message, self.pids, self.hwnds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_accumulate() {
        let mut r = ExecResult::new();
        assert!(r.is_ok());

        r.push_error("first");
        r.push_error("second");
        assert_eq!(r.error_code, 1);
        assert_eq!(r.message, "first\n second");
    }

    #[test]
    fn test_message_keeps_success() {
        let mut r = ExecResult::new();
        r.push_message("nothing to kill");
        r.push_window(WindowRef::new(10));
        r.push_pid(3);
        assert!(r.is_ok());
        assert_eq!(r.hwnds, vec![10]);
        assert_eq!(r.pids, vec![3]);
        assert_eq!(r.to_string(), "{ err: 0, msg: \"nothing to kill\", pids: [3], hwnds: [10] }");
    }
}
