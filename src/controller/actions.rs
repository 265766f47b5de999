use super::native::WindowApi;
use super::result::ControllerError;
use crate::app::structs::match_criterion::Pid;
use crate::app::structs::show_cmd::ShowCmd;
use crate::app::structs::window_ref::WindowRef;

/// Applies `cmd` to the window.
///
/// Hiding a window that is already invisible does nothing and returns `Ok(None)`.
pub fn show_or_hide(api: &dyn WindowApi, window: WindowRef, cmd: ShowCmd) -> Result<Option<WindowRef>, ControllerError> {
    if window.is_null() {
        return Err(ControllerError::InvalidWindow(window.addr));
    }

    if cmd.is_hide() && !api.is_window_visible(window) {
        log::debug!("hWnd: {window} already hidden");
        return Ok(None);
    }

    api.show_window(window, cmd)
        .map_err(|e| ControllerError::native("ShowWindow", format!("hWnd {window}, nCmdShow {}: {e}", cmd.value())))?;
    log::debug!("hWnd: {window} done ({cmd:?})");
    Ok(Some(window))
}

/// Terminates the process if it is alive. Returns whether it was terminated.
pub fn kill_process(api: &dyn WindowApi, pid: Pid) -> bool {
    if !api.is_process_alive(pid) {
        log::warn!("Process {pid} not found");
        return false;
    }

    match api.terminate_process(pid) {
        Ok(()) => {
            log::info!("killed pid: {pid}");
            true
        }
        Err(e) => {
            log::error!("Can't kill pid {pid}: {e}");
            false
        }
    }
}

/// Writes the trimmed `text` as the window text.
pub fn set_title(api: &dyn WindowApi, window: WindowRef, text: &str) -> Result<WindowRef, ControllerError> {
    if window.is_null() {
        return Err(ControllerError::InvalidWindow(window.addr));
    }
    api.set_window_text(window, text.trim())?;
    Ok(window)
}
