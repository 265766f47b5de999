use windows::Win32::Foundation::HWND;

use crate::app::structs::match_criterion::Pid;
use crate::app::structs::show_cmd::ShowCmd;
use crate::app::structs::window_ref::WindowRef;
use crate::controller::native::WindowApi;
use crate::controller::result::ControllerError;
use crate::controller::task::TaskId;
use crate::win32::api::process;
use crate::win32::api::window;

type Result<T> = std::result::Result<T, ControllerError>;

/// [`WindowApi`] backed by user32 and kernel32.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Api;

fn hwnd(window: WindowRef) -> HWND {
    window.into()
}

impl WindowApi for Win32Api {
    fn enumerate_windows(&self, token: TaskId) -> Result<()> {
        window::enum_task_windows(token).map_err(|e| ControllerError::EnumerationFailed(e.message()))
    }

    fn get_owning_process_id(&self, window: WindowRef) -> Result<Pid> {
        window::get_window_process_id(hwnd(window)).map_err(|e| ControllerError::from_win32("GetWindowThreadProcessId", e))
    }

    fn get_window_text(&self, window: WindowRef) -> String {
        window::get_window_title(hwnd(window))
    }

    fn set_window_text(&self, window: WindowRef, text: &str) -> Result<()> {
        if !window::is_window(hwnd(window)) {
            return Err(ControllerError::InvalidWindow(window.addr));
        }
        window::set_window_title(hwnd(window), text).map_err(|e| ControllerError::from_win32("SetWindowTextW", e))
    }

    fn is_window_visible(&self, window: WindowRef) -> bool {
        window::is_window_visible(hwnd(window))
    }

    fn get_parent(&self, window: WindowRef) -> Option<WindowRef> {
        window::get_parent(hwnd(window)).map(WindowRef::from)
    }

    fn get_owner(&self, window: WindowRef) -> Option<WindowRef> {
        window::get_owner(hwnd(window)).map(WindowRef::from)
    }

    fn get_root_owner(&self, window: WindowRef) -> Option<WindowRef> {
        window::get_root_owner(hwnd(window)).map(WindowRef::from)
    }

    fn get_style(&self, window: WindowRef) -> u32 {
        window::get_window_style(hwnd(window))
    }

    fn get_extended_style(&self, window: WindowRef) -> u32 {
        window::get_window_ex_style(hwnd(window))
    }

    fn show_window(&self, window: WindowRef, cmd: ShowCmd) -> Result<bool> {
        match window::is_window(hwnd(window)) {
            true => Ok(window::show_window(hwnd(window), cmd.value())),
            false => Err(ControllerError::InvalidWindow(window.addr)),
        }
    }

    fn is_process_alive(&self, pid: Pid) -> bool {
        process::is_process_alive(pid)
    }

    fn terminate_process(&self, pid: Pid) -> Result<()> {
        process::terminate_process(pid).map_err(|e| ControllerError::from_win32("TerminateProcess", e))
    }
}
