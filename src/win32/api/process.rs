use windows::core::Error;
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::Foundation::BOOL;
use windows::Win32::Foundation::HANDLE;
use windows::Win32::Foundation::STILL_ACTIVE;
use windows::Win32::System::Threading::GetExitCodeProcess;
use windows::Win32::System::Threading::OpenProcess;
use windows::Win32::System::Threading::TerminateProcess;
use windows::Win32::System::Threading::PROCESS_ACCESS_RIGHTS;
use windows::Win32::System::Threading::PROCESS_QUERY_LIMITED_INFORMATION;
use windows::Win32::System::Threading::PROCESS_TERMINATE;

/// Exit code handed to terminated processes.
const KILLED_EXIT_CODE: u32 = 1;

fn with_process<R>(pid: u32, access: PROCESS_ACCESS_RIGHTS, f: impl FnOnce(HANDLE) -> R) -> Result<R, Error> {
    let handle = unsafe { OpenProcess(access, BOOL(0), pid) }?;
    let res = f(handle);
    unsafe {
        let _ = CloseHandle(handle);
    }
    Ok(res)
}

/// A process is alive when it can be opened and has not reported an exit code yet.
pub fn is_process_alive(pid: u32) -> bool {
    with_process(pid, PROCESS_QUERY_LIMITED_INFORMATION, |handle| {
        let mut code: u32 = 0;
        unsafe { GetExitCodeProcess(handle, &mut code) }.is_ok_and(|_| code == STILL_ACTIVE.0 as u32)
    })
    .unwrap_or(false)
}

pub fn terminate_process(pid: u32) -> Result<(), Error> {
    with_process(pid, PROCESS_TERMINATE, |handle| unsafe { TerminateProcess(handle, KILLED_EXIT_CODE) })?
}
