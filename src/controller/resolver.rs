use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;

use super::native::WindowApi;
use super::result::ControllerError;
use super::task;
use super::task::Task;
use super::task::TaskId;
use crate::app::structs::match_criterion::MatchCriterion;
use crate::app::structs::match_criterion::Pid;
use crate::app::structs::window_ref::WindowRef;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Windows (and, for title matches, their owning processes) collected by one resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub windows: Vec<WindowRef>,
    pub pids: Vec<Pid>,
    pub diagnostic: String,
    pub timed_out: bool,
}

impl Resolution {
    fn from_task(task: Option<Task>, timed_out: bool) -> Resolution {
        task.map(|t| Resolution {
            windows: t.windows().to_vec(),
            pids: t.pids.iter().copied().collect(),
            diagnostic: t.diagnostic,
            timed_out,
        })
        .unwrap_or(Resolution {
            timed_out,
            ..Default::default()
        })
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

/// Collects every window matching `criterion`.
///
/// The native enumeration runs on a worker thread and is raced against `timeout`. When the
/// timeout elapses first the partial result gathered so far is returned; the walk itself keeps
/// going in the background, but its remaining callbacks no longer find the task.
pub fn resolve(
    api: &Arc<dyn WindowApi>,
    criterion: &MatchCriterion,
    timeout: Duration,
) -> Result<Resolution, ControllerError> {
    if let MatchCriterion::ByProcessId(raw) = criterion {
        if criterion.valid_pid().is_none() {
            log::debug!("Skipping resolution, {} is not a valid pid", raw);
            return Ok(Resolution::default());
        }
    }

    let guard = task::register(criterion.clone());
    let token = guard.id();
    let (tx, rx) = crossbeam_channel::bounded(1);
    let worker_api = Arc::clone(api);

    thread::Builder::new()
        .name(format!("winctl-enum-{}", token.0))
        .spawn(move || {
            let res = worker_api.enumerate_windows(token);
            tx.send(res).ok();
        })
        .map_err(|e| ControllerError::EnumerationFailed(e.to_string()))?;

    let resolution = match rx.recv_timeout(timeout) {
        Ok(Ok(())) => Resolution::from_task(guard.finish(), false),
        Ok(Err(e)) => return Err(e),
        Err(RecvTimeoutError::Timeout) => {
            log::warn!("Resolution of {criterion} timed out after {timeout:?}, returning partial result");
            Resolution::from_task(guard.finish(), true)
        }
        Err(RecvTimeoutError::Disconnected) => {
            return Err(ControllerError::EnumerationFailed("enumeration worker exited".to_owned()));
        }
    };

    if !resolution.diagnostic.is_empty() {
        log::debug!("Resolution of {criterion} diagnostics:\n{}", resolution.diagnostic);
    }
    log::debug!("Resolution of {criterion}: {} window(s)", resolution.windows.len());

    Ok(resolution)
}

/// Per-window step of the enumeration started by [`resolve`].
///
/// Returns `true` to continue the walk. Native failures are recorded on the task and never
/// stop the enumeration; a token whose task is gone is ignored.
pub fn visit_window(api: &dyn WindowApi, window: WindowRef, token: TaskId) -> bool {
    let Some(criterion) = task::with_task(token, |t| t.criterion.clone()) else {
        return true;
    };

    match &criterion {
        MatchCriterion::ByProcessId(_) => {
            let Some(pid) = criterion.valid_pid() else {
                return true;
            };
            match api.get_owning_process_id(window) {
                Ok(owner) if owner == pid => {
                    task::with_task(token, |t| t.add_window(window));
                }
                Ok(_) => (),
                Err(e) => {
                    task::with_task(token, |t| t.note(format!("{window}: {e}")));
                }
            }
        }
        MatchCriterion::ByTitleSubstring(text) if text.is_empty() => {
            task::with_task(token, |t| t.add_window(window));
        }
        MatchCriterion::ByTitleSubstring(_) => {
            let title = api.get_window_text(window);
            if criterion.matches_title(&title) {
                let owner = api.get_owning_process_id(window);
                task::with_task(token, |t| {
                    t.add_window(window);
                    match owner {
                        Ok(pid) => t.add_pid(pid),
                        Err(e) => t.note(format!("{window}: {e}")),
                    }
                });
            }
        }
        MatchCriterion::ByHandleValue(addr) => {
            if window.addr == *addr {
                task::with_task(token, |t| t.add_window(window));
            }
        }
    }

    true
}
