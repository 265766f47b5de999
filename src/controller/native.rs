use std::sync::Arc;

use super::result::ControllerError;
use super::task::TaskId;
use crate::app::structs::match_criterion::Pid;
use crate::app::structs::show_cmd::ShowCmd;
use crate::app::structs::window_ref::WindowRef;

type Result<T> = std::result::Result<T, ControllerError>;

/// Longest window text read back from the platform, in UTF-16 units.
pub const MAX_TITLE_LEN: usize = 254;

/// Native window-management capabilities the controller is built on.
///
/// Implementations are stateless handles to the platform: every call goes straight
/// to the underlying API and may be issued from any thread.
pub trait WindowApi: Send + Sync {
    /// Walks every top-level window, calling
    /// [`visit_window`](crate::controller::resolver::visit_window) once per window
    /// with the given `token`, and returns when the walk completes.
    fn enumerate_windows(&self, token: TaskId) -> Result<()>;

    fn get_owning_process_id(&self, window: WindowRef) -> Result<Pid>;
    fn get_window_text(&self, window: WindowRef) -> String;
    fn set_window_text(&self, window: WindowRef, text: &str) -> Result<()>;
    fn is_window_visible(&self, window: WindowRef) -> bool;
    fn get_parent(&self, window: WindowRef) -> Option<WindowRef>;
    fn get_owner(&self, window: WindowRef) -> Option<WindowRef>;
    fn get_root_owner(&self, window: WindowRef) -> Option<WindowRef>;
    fn get_style(&self, window: WindowRef) -> u32;
    fn get_extended_style(&self, window: WindowRef) -> u32;

    /// Returns whether the window was visible before the call.
    fn show_window(&self, window: WindowRef, cmd: ShowCmd) -> Result<bool>;

    fn is_process_alive(&self, pid: Pid) -> bool;
    fn terminate_process(&self, pid: Pid) -> Result<()>;
}

/// The window API of the running platform.
#[cfg(windows)]
pub fn system_api() -> Result<Arc<dyn WindowApi>> {
    Ok(Arc::new(crate::win32::win32_api::Win32Api))
}

#[cfg(not(windows))]
pub fn system_api() -> Result<Arc<dyn WindowApi>> {
    Err(ControllerError::PlatformUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(windows))]
    #[test]
    fn test_system_api_unavailable() {
        assert!(matches!(system_api(), Err(ControllerError::PlatformUnavailable)));
    }
}
