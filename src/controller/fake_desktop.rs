use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread::ThreadId;
use std::time::Duration;

use super::native::WindowApi;
use super::resolver::visit_window;
use super::result::ControllerError;
use super::task::TaskId;
use crate::app::structs::filter_rules::WS_SYSMENU;
use crate::app::structs::match_criterion::Pid;
use crate::app::structs::show_cmd::ShowCmd;
use crate::app::structs::window_ref::WindowRef;

type Result<T> = std::result::Result<T, ControllerError>;

#[derive(Debug, Clone)]
pub(crate) struct FakeWindow {
    pub addr: isize,
    pub pid: Option<Pid>,
    pub title: String,
    pub parent: Option<isize>,
    pub owner: Option<isize>,
    pub style: u32,
    pub ex_style: u32,
    pub visible: bool,
    /// Rejects show and retitle calls.
    pub broken: bool,
}

impl FakeWindow {
    /// A visible top-level application window.
    pub fn app(addr: isize, pid: Pid, title: &str) -> FakeWindow {
        FakeWindow {
            addr,
            pid: Some(pid),
            title: title.to_owned(),
            parent: None,
            owner: None,
            style: WS_SYSMENU,
            ex_style: 0,
            visible: true,
            broken: false,
        }
    }

    pub fn with_style(mut self, style: u32, ex_style: u32) -> FakeWindow {
        self.style = style;
        self.ex_style = ex_style;
        self
    }

    pub fn owned_by(mut self, owner: isize) -> FakeWindow {
        self.owner = Some(owner);
        self
    }

    pub fn child_of(mut self, parent: isize) -> FakeWindow {
        self.parent = Some(parent);
        self
    }

    pub fn hidden(mut self) -> FakeWindow {
        self.visible = false;
        self
    }

    pub fn broken(mut self) -> FakeWindow {
        self.broken = true;
        self
    }
}

/// In-memory desktop implementing [`WindowApi`].
#[derive(Default)]
pub(crate) struct FakeDesktop {
    windows: Mutex<Vec<FakeWindow>>,
    processes: Mutex<HashSet<Pid>>,
    protected: HashSet<Pid>,
    /// Enumeration visits this many windows, then sleeps for `stall` before the rest.
    stall: Option<(usize, Duration)>,
    enumeration_error: Option<String>,
    pub show_calls: AtomicUsize,
    pub terminate_calls: AtomicUsize,
    /// Callbacks run by `enumerate_windows`, including the ones after a timeout.
    pub visits: AtomicUsize,
    pub tokens: Mutex<Vec<TaskId>>,
    pub show_threads: Mutex<Vec<ThreadId>>,
}

impl FakeDesktop {
    pub fn new(windows: Vec<FakeWindow>) -> FakeDesktop {
        let processes = windows.iter().filter_map(|w| w.pid).collect();
        FakeDesktop {
            windows: Mutex::new(windows),
            processes: Mutex::new(processes),
            ..Default::default()
        }
    }

    pub fn stalling(mut self, visited: usize, stall: Duration) -> FakeDesktop {
        self.stall = Some((visited, stall));
        self
    }

    pub fn failing(mut self, message: &str) -> FakeDesktop {
        self.enumeration_error = Some(message.to_owned());
        self
    }

    /// Processes that are alive but refuse termination.
    pub fn protecting(mut self, pid: Pid) -> FakeDesktop {
        self.protected.insert(pid);
        self
    }

    pub fn into_api(self) -> Arc<FakeDesktop> {
        Arc::new(self)
    }

    pub fn window(&self, addr: isize) -> Option<FakeWindow> {
        self.windows.lock().unwrap().iter().find(|w| w.addr == addr).cloned()
    }

    pub fn is_alive(&self, pid: Pid) -> bool {
        self.processes.lock().unwrap().contains(&pid)
    }

    fn with_window<R>(&self, window: WindowRef, f: impl FnOnce(&mut FakeWindow) -> R) -> Option<R> {
        self.windows
            .lock()
            .unwrap()
            .iter_mut()
            .find(|w| w.addr == window.addr)
            .map(f)
    }
}

impl WindowApi for FakeDesktop {
    fn enumerate_windows(&self, token: TaskId) -> Result<()> {
        if let Some(message) = &self.enumeration_error {
            return Err(ControllerError::EnumerationFailed(message.clone()));
        }

        self.tokens.lock().unwrap().push(token);
        let addrs: Vec<isize> = self.windows.lock().unwrap().iter().map(|w| w.addr).collect();
        for (i, addr) in addrs.into_iter().enumerate() {
            if let Some((visited, stall)) = self.stall {
                if i == visited {
                    std::thread::sleep(stall);
                }
            }
            self.visits.fetch_add(1, Ordering::SeqCst);
            if !visit_window(self, WindowRef::new(addr), token) {
                break;
            }
        }
        Ok(())
    }

    fn get_owning_process_id(&self, window: WindowRef) -> Result<Pid> {
        self.with_window(window, |w| w.pid)
            .flatten()
            .ok_or(ControllerError::native("GetWindowThreadProcessId", format!("no process for {window}")))
    }

    fn get_window_text(&self, window: WindowRef) -> String {
        self.with_window(window, |w| w.title.clone()).unwrap_or_default()
    }

    fn set_window_text(&self, window: WindowRef, text: &str) -> Result<()> {
        self.with_window(window, |w| match w.broken {
            true => Err(ControllerError::native("SetWindowTextW", "Access is denied.")),
            false => {
                w.title = text.to_owned();
                Ok(())
            }
        })
        .unwrap_or(Err(ControllerError::InvalidWindow(window.addr)))
    }

    fn is_window_visible(&self, window: WindowRef) -> bool {
        self.with_window(window, |w| w.visible).unwrap_or(false)
    }

    fn get_parent(&self, window: WindowRef) -> Option<WindowRef> {
        self.with_window(window, |w| w.parent).flatten().map(WindowRef::new)
    }

    fn get_owner(&self, window: WindowRef) -> Option<WindowRef> {
        self.with_window(window, |w| w.owner).flatten().map(WindowRef::new)
    }

    fn get_root_owner(&self, window: WindowRef) -> Option<WindowRef> {
        let links: HashMap<isize, isize> = self
            .windows
            .lock()
            .unwrap()
            .iter()
            .filter_map(|w| w.parent.or(w.owner).map(|up| (w.addr, up)))
            .collect();

        let mut current = window.addr;
        while let Some(up) = links.get(&current) {
            current = *up;
        }
        Some(WindowRef::new(current))
    }

    fn get_style(&self, window: WindowRef) -> u32 {
        self.with_window(window, |w| w.style).unwrap_or(0)
    }

    fn get_extended_style(&self, window: WindowRef) -> u32 {
        self.with_window(window, |w| w.ex_style).unwrap_or(0)
    }

    fn show_window(&self, window: WindowRef, cmd: ShowCmd) -> Result<bool> {
        self.show_calls.fetch_add(1, Ordering::SeqCst);
        self.show_threads.lock().unwrap().push(std::thread::current().id());
        self.with_window(window, |w| {
            if w.broken {
                return Err(ControllerError::native("ShowWindow", "Access is denied."));
            }
            let was_visible = w.visible;
            w.visible = !matches!(cmd, ShowCmd::Hide);
            Ok(was_visible)
        })
        .unwrap_or(Err(ControllerError::InvalidWindow(window.addr)))
    }

    fn is_process_alive(&self, pid: Pid) -> bool {
        self.is_alive(pid)
    }

    fn terminate_process(&self, pid: Pid) -> Result<()> {
        self.terminate_calls.fetch_add(1, Ordering::SeqCst);
        if self.protected.contains(&pid) {
            return Err(ControllerError::native("TerminateProcess", "Access is denied."));
        }
        match self.processes.lock().unwrap().remove(&pid) {
            true => Ok(()),
            false => Err(ControllerError::native("OpenProcess", "The parameter is incorrect.")),
        }
    }
}
