use widestring::U16CString;
use windows::core::Error;
use windows::core::PCWSTR;
use windows::Win32::Foundation::HWND;
use windows::Win32::Foundation::LPARAM;
use windows::Win32::UI::WindowsAndMessaging::EnumWindows;
use windows::Win32::UI::WindowsAndMessaging::GetAncestor;
use windows::Win32::UI::WindowsAndMessaging::GetParent;
use windows::Win32::UI::WindowsAndMessaging::GetWindow;
use windows::Win32::UI::WindowsAndMessaging::GetWindowLongW;
use windows::Win32::UI::WindowsAndMessaging::GetWindowTextW;
use windows::Win32::UI::WindowsAndMessaging::GetWindowThreadProcessId;
use windows::Win32::UI::WindowsAndMessaging::IsWindow;
use windows::Win32::UI::WindowsAndMessaging::IsWindowVisible;
use windows::Win32::UI::WindowsAndMessaging::SetWindowTextW;
use windows::Win32::UI::WindowsAndMessaging::ShowWindow;
use windows::Win32::UI::WindowsAndMessaging::GA_ROOTOWNER;
use windows::Win32::UI::WindowsAndMessaging::GWL_EXSTYLE;
use windows::Win32::UI::WindowsAndMessaging::GWL_STYLE;
use windows::Win32::UI::WindowsAndMessaging::GW_OWNER;
use windows::Win32::UI::WindowsAndMessaging::SHOW_WINDOW_CMD;

use crate::controller::native::MAX_TITLE_LEN;
use crate::controller::task::TaskId;
use crate::win32::callbacks::enum_windows::visit_task_window;

fn non_null(hwnd: HWND) -> Option<HWND> {
    match hwnd.0.is_null() {
        true => None,
        false => Some(hwnd),
    }
}

/// Walks every top-level window, reporting each one to the task identified by `token`.
pub fn enum_task_windows(token: TaskId) -> Result<(), Error> {
    let lparam = LPARAM(isize::from(token));
    unsafe { EnumWindows(Some(visit_task_window), lparam) }
}

pub fn is_window(hwnd: HWND) -> bool {
    unsafe { IsWindow(hwnd).as_bool() }
}

pub fn is_window_visible(hwnd: HWND) -> bool {
    unsafe { IsWindowVisible(hwnd).as_bool() }
}

/// Returns the previous visibility of the window.
pub fn show_window(hwnd: HWND, cmd: i32) -> bool {
    unsafe { ShowWindow(hwnd, SHOW_WINDOW_CMD(cmd)).as_bool() }
}

pub fn get_window_title(hwnd: HWND) -> String {
    let mut buffer: [u16; MAX_TITLE_LEN + 1] = [0; MAX_TITLE_LEN + 1];
    let len = unsafe { GetWindowTextW(hwnd, &mut buffer) };
    match len {
        n if n <= 0 => String::new(),
        n => String::from_utf16_lossy(&buffer[..n as usize]),
    }
}

pub fn set_window_title(hwnd: HWND, title: &str) -> Result<(), Error> {
    let title = U16CString::from_str_truncate(title);
    unsafe { SetWindowTextW(hwnd, PCWSTR(title.as_ptr())) }
}

pub fn get_window_style(hwnd: HWND) -> u32 {
    unsafe { GetWindowLongW(hwnd, GWL_STYLE) as u32 }
}

pub fn get_window_ex_style(hwnd: HWND) -> u32 {
    unsafe { GetWindowLongW(hwnd, GWL_EXSTYLE) as u32 }
}

pub fn get_parent(hwnd: HWND) -> Option<HWND> {
    unsafe { GetParent(hwnd) }.ok().and_then(non_null)
}

pub fn get_owner(hwnd: HWND) -> Option<HWND> {
    unsafe { GetWindow(hwnd, GW_OWNER) }.ok().and_then(non_null)
}

pub fn get_root_owner(hwnd: HWND) -> Option<HWND> {
    non_null(unsafe { GetAncestor(hwnd, GA_ROOTOWNER) })
}

pub fn get_window_process_id(hwnd: HWND) -> Result<u32, Error> {
    let mut pid: u32 = 0;
    match unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) } {
        0 => Err(Error::from_win32()),
        _ => Ok(pid),
    }
}
