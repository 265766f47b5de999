use windows::Win32::Foundation::BOOL;
use windows::Win32::Foundation::HWND;
use windows::Win32::Foundation::LPARAM;

use crate::controller::resolver::visit_window;
use crate::controller::task::TaskId;
use crate::win32::win32_api::Win32Api;

/// `EnumWindows` callback; `param` carries the token of the resolution task, never a pointer.
pub extern "system" fn visit_task_window(hwnd: HWND, param: LPARAM) -> BOOL {
    visit_window(&Win32Api, hwnd.into(), TaskId::from(param.0)).into()
}
