use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use lazy_static::lazy_static;

use crate::app::structs::match_criterion::MatchCriterion;
use crate::app::structs::match_criterion::Pid;
use crate::app::structs::window_ref::WindowRef;

lazy_static! {
    static ref TASKS: Mutex<HashMap<TaskId, Task>> = Mutex::new(HashMap::new());
}

static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

/// Correlation token handed to the native enumeration and back to its callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl From<isize> for TaskId {
    fn from(value: isize) -> Self {
        TaskId(value as u64)
    }
}

impl From<TaskId> for isize {
    fn from(value: TaskId) -> Self {
        value.0 as isize
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State of one in-flight resolution.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    pub criterion: MatchCriterion,
    windows: Vec<WindowRef>,
    seen: HashSet<WindowRef>,
    pub pids: BTreeSet<Pid>,
    pub diagnostic: String,
}

impl Task {
    fn new(id: TaskId, criterion: MatchCriterion) -> Task {
        Task {
            id,
            criterion,
            windows: Vec::new(),
            seen: HashSet::new(),
            pids: BTreeSet::new(),
            diagnostic: String::new(),
        }
    }

    /// Adds the window unless one with the same address was already collected.
    pub fn add_window(&mut self, window: WindowRef) -> bool {
        let added = self.seen.insert(window);
        if added {
            self.windows.push(window);
        }
        added
    }

    pub fn add_pid(&mut self, pid: Pid) {
        self.pids.insert(pid);
    }

    pub fn note(&mut self, message: impl fmt::Display) {
        if !self.diagnostic.is_empty() {
            self.diagnostic.push('\n');
        }
        self.diagnostic.push_str(&message.to_string());
    }

    pub fn windows(&self) -> &[WindowRef] {
        &self.windows
    }
}

fn tasks() -> MutexGuard<'static, HashMap<TaskId, Task>> {
    TASKS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registers a new task and returns the guard that unregisters it.
pub fn register(criterion: MatchCriterion) -> TaskGuard {
    let id = TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed));
    tasks().insert(id, Task::new(id, criterion));
    log::trace!("Task {id} registered");
    TaskGuard { id }
}

/// Runs `f` on the task, if it is still registered.
pub fn with_task<R>(id: TaskId, f: impl FnOnce(&mut Task) -> R) -> Option<R> {
    tasks().get_mut(&id).map(f)
}

pub fn snapshot(id: TaskId) -> Option<Task> {
    tasks().get(&id).cloned()
}

/// Unregisters the task. Removing an unknown or already removed task is a no-op.
pub fn remove(id: TaskId) -> Option<Task> {
    let task = tasks().remove(&id);
    if task.is_some() {
        log::trace!("Task {id} unregistered");
    }
    task
}

/// Keeps a task registered for the lifetime of one resolution.
pub struct TaskGuard {
    id: TaskId,
}

impl TaskGuard {
    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Unregisters the task and returns its state at this instant.
    pub fn finish(self) -> Option<Task> {
        remove(self.id)
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        remove(self.id);
    }
}
