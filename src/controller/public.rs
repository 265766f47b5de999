use std::sync::Arc;
use std::time::Duration;

use super::actions;
use super::filter;
use super::native::system_api;
use super::native::WindowApi;
use super::resolver;
use super::resolver::Resolution;
use super::result::ControllerError;
use crate::app::structs::exec_result::ExecResult;
use crate::app::structs::filter_rules::FilterRules;
use crate::app::structs::filter_rules::RulesPatch;
use crate::app::structs::filter_rules::TitleRule;
use crate::app::structs::match_criterion::MatchCriterion;
use crate::app::structs::show_cmd::ShowCmd;
use crate::app::structs::window_ref::WindowRef;

type Error = ControllerError;

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    pub timeout: Duration,
    pub hide_rules: FilterRules,
    pub show_rules: FilterRules,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            timeout: resolver::DEFAULT_TIMEOUT,
            hide_rules: FilterRules::hide_defaults(),
            show_rules: FilterRules::show_defaults(),
        }
    }
}

/// Entry point for every window operation.
///
/// Batch operations never fail as a whole: windows and processes are handled one after the
/// other on the calling thread and every outcome is folded into an [`ExecResult`].
pub struct WindowController {
    api: Arc<dyn WindowApi>,
    config: ControllerConfig,
}

impl WindowController {
    pub fn new(api: Arc<dyn WindowApi>, config: ControllerConfig) -> WindowController {
        WindowController { api, config }
    }

    /// Controller over the native API of this platform.
    pub fn system(config: ControllerConfig) -> Result<WindowController, Error> {
        Ok(WindowController::new(system_api()?, config))
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn resolve(&self, criterion: &MatchCriterion) -> Result<Resolution, Error> {
        resolver::resolve(&self.api, criterion, self.config.timeout)
    }

    /// Windows matching `criterion` that pass `rules`. Without rules, every match is returned.
    pub fn get_hwnds(&self, criterion: &MatchCriterion, rules: Option<&FilterRules>) -> Result<Vec<WindowRef>, Error> {
        let resolution = self.resolve(criterion)?;
        Ok(filter::filter_windows(self.api.as_ref(), &resolution.windows, rules))
    }

    /// The window whose handle is exactly `addr`, if it exists.
    pub fn find_hwnd(&self, addr: isize) -> Option<WindowRef> {
        self.get_hwnds(&MatchCriterion::ByHandleValue(addr), None)
            .inspect_err(|e| e.log())
            .ok()?
            .into_iter()
            .next()
    }

    /// The root owner shared by most windows matching `criterion`.
    pub fn main_hwnd(&self, criterion: &MatchCriterion) -> Option<WindowRef> {
        let windows = self.get_hwnds(criterion, None).inspect_err(|e| e.log()).ok()?;
        filter::main_window(self.api.as_ref(), &windows)
    }

    /// Hides the matching windows. `rules` is merged over the configured hide preset.
    pub fn hide(&self, criterion: &MatchCriterion, rules: RulesPatch) -> ExecResult {
        let rules = rules.apply_to(self.config.hide_rules);
        self.for_each_window(criterion, &rules, |api, w| actions::show_or_hide(api, w, ShowCmd::Hide))
    }

    /// Applies `cmd` to the matching windows. `rules` is merged over the configured show preset
    /// and an ignored title rule is enforced.
    pub fn show(&self, criterion: &MatchCriterion, cmd: ShowCmd, rules: RulesPatch) -> ExecResult {
        let mut rules = rules.apply_to(self.config.show_rules);
        if rules.title_exists == TitleRule::Ignore {
            rules.title_exists = TitleRule::Enforce(true);
        }
        self.for_each_window(criterion, &rules, |api, w| actions::show_or_hide(api, w, cmd))
    }

    /// Calls `ShowWindow` on a raw handle value, with no resolution or filtering.
    pub fn show_raw(&self, addr: isize, cmd: i64) -> ExecResult {
        if addr <= 0 {
            return ExecResult::failed(Error::InvalidWindow(addr).to_string());
        }
        let cmd = match ShowCmd::try_from(cmd) {
            Ok(cmd) => cmd,
            Err(e) => return ExecResult::failed(e.to_string()),
        };

        let mut result = ExecResult::new();
        match actions::show_or_hide(self.api.as_ref(), WindowRef::new(addr), cmd) {
            Ok(Some(w)) => result.push_window(w),
            Ok(None) => (),
            Err(e) => {
                e.log();
                result.push_error(e);
            }
        }
        result
    }

    pub fn set_title(&self, criterion: &MatchCriterion, text: &str, rules: RulesPatch) -> ExecResult {
        let rules = rules.apply_to(self.config.show_rules);
        self.for_each_window(criterion, &rules, |api, w| actions::set_title(api, w, text).map(Some))
    }

    /// Terminates the process given by pid, or every process owning a window whose title matches.
    pub fn kill(&self, criterion: &MatchCriterion) -> ExecResult {
        match criterion {
            MatchCriterion::ByProcessId(raw) => self.kill_pid(*raw, criterion),
            MatchCriterion::ByTitleSubstring(_) => self.kill_by_title(criterion),
            MatchCriterion::ByHandleValue(_) => {
                let e = Error::UnsupportedKillCriterion;
                e.log();
                ExecResult::failed(e.to_string())
            }
        }
    }

    fn kill_pid(&self, raw: i64, criterion: &MatchCriterion) -> ExecResult {
        let Some(pid) = criterion.valid_pid() else {
            return ExecResult::failed(Error::InvalidPid(raw).to_string());
        };

        let mut result = ExecResult::new();
        result.push_pid(pid);
        if pid == 0 {
            result.push_error(Error::InvalidPid(raw));
        } else if !actions::kill_process(self.api.as_ref(), pid) {
            result.push_error(format!("process {pid} could not be killed"));
        }
        result
    }

    fn kill_by_title(&self, criterion: &MatchCriterion) -> ExecResult {
        let mut result = ExecResult::new();
        let resolution = match self.resolve(criterion) {
            Ok(r) => r,
            Err(e) => {
                e.log();
                result.push_error(e);
                return result;
            }
        };

        if resolution.timed_out {
            result.push_message(timed_out_message(criterion));
        }

        if resolution.pids.is_empty() {
            log::info!("the pid list to be killed empty, none title matched");
            result.push_message("the pid list to be killed empty, none title matched");
            return result;
        }

        for pid in resolution.pids {
            match actions::kill_process(self.api.as_ref(), pid) {
                true => result.push_pid(pid),
                false => result.push_error(format!("process {pid} could not be killed")),
            }
        }
        result
    }

    fn for_each_window<F>(&self, criterion: &MatchCriterion, rules: &FilterRules, action: F) -> ExecResult
    where
        F: Fn(&dyn WindowApi, WindowRef) -> Result<Option<WindowRef>, Error>,
    {
        let mut result = ExecResult::new();
        let resolution = match self.resolve(criterion) {
            Ok(r) => r,
            Err(e) => {
                e.log();
                result.push_error(e);
                return result;
            }
        };
        if resolution.timed_out {
            result.push_message(timed_out_message(criterion));
        }

        let api = self.api.as_ref();
        let windows = filter::filter_windows(api, &resolution.windows, Some(rules));
        for window in windows {
            match action(api, window) {
                Ok(Some(w)) => result.push_window(w),
                Ok(None) => (),
                Err(e) => {
                    log::error!("hWnd {window}: {e}");
                    result.push_error(e);
                }
            }
        }
        result
    }
}

fn timed_out_message(criterion: &MatchCriterion) -> String {
    format!("resolution of {criterion} timed out, partial result used")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::fake_desktop::FakeDesktop;
    use crate::app::structs::filter_rules::WS_EX_TOOLWINDOW;
    use crate::app::structs::filter_rules::WS_SYSMENU;
    use crate::controller::fake_desktop::FakeWindow;
    use std::sync::atomic::Ordering;

    const CALC: &str = "Node-Calculator";

    fn controller(desktop: &Arc<FakeDesktop>) -> WindowController {
        let api: Arc<dyn WindowApi> = desktop.clone();
        WindowController::new(api, ControllerConfig::default())
    }

    fn calculator() -> Arc<FakeDesktop> {
        FakeDesktop::new(vec![
            FakeWindow::app(0x10, 1234, CALC),
            FakeWindow::app(0x11, 1234, "").child_of(0x10),
            FakeWindow::app(0x12, 1234, "IME").owned_by(0x10).hidden(),
            FakeWindow::app(0x20, 555, "Notepad"),
        ])
        .into_api()
    }

    #[test]
    fn test_hide_by_title() {
        let desktop = calculator();
        let res = controller(&desktop).hide(&MatchCriterion::title(CALC), RulesPatch::default());

        assert_eq!(res.error_code, 0);
        assert_eq!(res.hwnds, vec![0x10]);
        assert!(!desktop.window(0x10).unwrap().visible);
        assert!(desktop.window(0x20).unwrap().visible);
    }

    #[test]
    fn test_show_by_pid_after_hide() {
        let desktop = calculator();
        let ctl = controller(&desktop);
        ctl.hide(&MatchCriterion::title(CALC), RulesPatch::default());

        let res = ctl.show(&MatchCriterion::pid(1234), ShowCmd::Restore, RulesPatch::default());
        assert_eq!(res.error_code, 0);
        assert_eq!(res.hwnds, vec![0x10]);
        assert!(desktop.window(0x10).unwrap().visible);
    }

    #[test]
    fn test_hide_twice_is_idempotent() {
        let desktop = calculator();
        let ctl = controller(&desktop);
        ctl.hide(&MatchCriterion::pid(1234), RulesPatch::default());
        let calls = desktop.show_calls.load(Ordering::SeqCst);

        let res = ctl.hide(&MatchCriterion::pid(1234), RulesPatch::default());
        assert!(res.is_ok());
        assert!(res.hwnds.is_empty());
        assert_eq!(desktop.show_calls.load(Ordering::SeqCst), calls);
    }

    #[test]
    fn test_show_enforces_ignored_title_rule() {
        let desktop = FakeDesktop::new(vec![FakeWindow::app(1, 9, ""), FakeWindow::app(2, 9, "titled")]).into_api();
        let rules = RulesPatch {
            title_exists: Some(TitleRule::Ignore),
            ..Default::default()
        };

        let res = controller(&desktop).show(&MatchCriterion::pid(9), ShowCmd::Show, rules);
        assert_eq!(res.hwnds, vec![2]);
    }

    #[test]
    fn test_caller_rules_override_defaults() {
        let desktop = FakeDesktop::new(vec![FakeWindow::app(1, 9, "plain").with_style(0, 0)]).into_api();
        let ctl = controller(&desktop);

        assert!(ctl.show(&MatchCriterion::pid(9), ShowCmd::Show, RulesPatch::default()).hwnds.is_empty());

        let rules = RulesPatch {
            include_style: Some(None),
            ..Default::default()
        };
        assert_eq!(ctl.show(&MatchCriterion::pid(9), ShowCmd::Show, rules).hwnds, vec![1]);
    }

    #[test]
    fn test_caller_rules_keep_other_preset_masks() {
        let desktop = FakeDesktop::new(vec![FakeWindow::app(1, 9, "tool")
            .with_style(WS_SYSMENU, WS_EX_TOOLWINDOW)
            .hidden()])
        .into_api();
        let rules = RulesPatch {
            include_style: Some(Some(WS_SYSMENU)),
            ..Default::default()
        };

        let res = controller(&desktop).show(&MatchCriterion::pid(9), ShowCmd::Show, rules);
        assert_eq!(res.error_code, 0);
        assert!(res.hwnds.is_empty());
        assert!(!desktop.window(1).unwrap().visible);
        assert_eq!(desktop.show_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_partial_failure_keeps_going() {
        let desktop = FakeDesktop::new(vec![
            FakeWindow::app(1, 9, "a"),
            FakeWindow::app(2, 9, "b").broken(),
            FakeWindow::app(3, 9, "c"),
        ])
        .into_api();

        let res = controller(&desktop).hide(&MatchCriterion::pid(9), RulesPatch::default());
        assert_eq!(res.error_code, 1);
        assert_eq!(res.hwnds, vec![1, 3]);
        assert!(res.message.contains("ShowWindow"));
        assert!(!desktop.window(1).unwrap().visible);
        assert!(!desktop.window(3).unwrap().visible);
    }

    #[test]
    fn test_get_hwnds_title_not_exists() {
        let desktop = calculator();
        let ctl = controller(&desktop);
        let hwnds = ctl
            .get_hwnds(&MatchCriterion::title("title-not-exists"), Some(&FilterRules::show_defaults()))
            .unwrap();
        assert!(hwnds.is_empty());
    }

    #[test]
    fn test_get_hwnds_unfiltered() {
        let desktop = calculator();
        let hwnds = controller(&desktop).get_hwnds(&MatchCriterion::pid(1234), None).unwrap();
        assert_eq!(hwnds, vec![WindowRef::new(0x10), WindowRef::new(0x11), WindowRef::new(0x12)]);
    }

    #[test]
    fn test_find_and_main_hwnd() {
        let desktop = calculator();
        let ctl = controller(&desktop);
        assert_eq!(ctl.find_hwnd(0x20), Some(WindowRef::new(0x20)));
        assert_eq!(ctl.find_hwnd(0x99), None);
        assert_eq!(ctl.main_hwnd(&MatchCriterion::pid(1234)), Some(WindowRef::new(0x10)));
    }

    #[test]
    fn test_show_raw() {
        let desktop = calculator();
        let ctl = controller(&desktop);

        assert_eq!(ctl.show_raw(0x20, 0).hwnds, vec![0x20]);
        assert!(!desktop.window(0x20).unwrap().visible);
        assert_eq!(ctl.show_raw(0x20, 12).error_code, 1);
        assert_eq!(ctl.show_raw(0, 5).error_code, 1);
        assert_eq!(ctl.show_raw(0x20, -1).message, "value of nCmdShow invalid: -1");
    }

    #[test]
    fn test_set_title() {
        let desktop = calculator();
        let res = controller(&desktop).set_title(&MatchCriterion::title(CALC), "  Renamed  ", RulesPatch::default());
        assert_eq!(res.error_code, 0);
        assert_eq!(res.hwnds, vec![0x10]);
        assert_eq!(desktop.window(0x10).unwrap().title, "Renamed");
    }

    #[test]
    fn test_kill_by_pid() {
        let desktop = calculator();
        let res = controller(&desktop).kill(&MatchCriterion::pid(555));
        assert_eq!(res.error_code, 0);
        assert_eq!(res.pids, vec![555]);
        assert!(!desktop.is_alive(555));
    }

    #[test]
    fn test_kill_pid_zero() {
        let desktop = calculator();
        let res = controller(&desktop).kill(&MatchCriterion::pid(0));
        assert_eq!(res.error_code, 1);
        assert_eq!(res.pids, vec![0]);
        assert_eq!(desktop.terminate_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_kill_invalid_pid() {
        let desktop = calculator();
        let res = controller(&desktop).kill(&MatchCriterion::ByProcessId(-3));
        assert_eq!(res.error_code, 1);
        assert!(res.pids.is_empty());
    }

    #[test]
    fn test_kill_dead_process() {
        let desktop = calculator();
        let res = controller(&desktop).kill(&MatchCriterion::pid(4242));
        assert_eq!(res.error_code, 1);
        assert_eq!(res.pids, vec![4242]);
    }

    #[test]
    fn test_kill_by_title() {
        let desktop = FakeDesktop::new(vec![
            FakeWindow::app(1, 11, "X one"),
            FakeWindow::app(2, 11, "X two"),
            FakeWindow::app(3, 22, "X three"),
            FakeWindow::app(4, 33, "Y"),
        ])
        .into_api();

        let mut res = controller(&desktop).kill(&MatchCriterion::title("X"));
        res.pids.sort();
        assert_eq!(res.error_code, 0);
        assert_eq!(res.pids, vec![11, 22]);
        assert!(desktop.is_alive(33));
    }

    #[test]
    fn test_kill_by_title_timeout_uses_partial_result() {
        let desktop = FakeDesktop::new(vec![FakeWindow::app(1, 11, "X one"), FakeWindow::app(2, 22, "X two")])
            .stalling(1, Duration::from_millis(500))
            .into_api();
        let api: Arc<dyn WindowApi> = desktop.clone();
        let ctl = WindowController::new(
            api,
            ControllerConfig {
                timeout: Duration::from_millis(50),
                ..Default::default()
            },
        );

        let res = ctl.kill(&MatchCriterion::title("X"));
        assert_eq!(res.error_code, 0);
        assert_eq!(res.pids, vec![11]);
        assert!(res.message.contains("timed out"));
        assert!(!desktop.is_alive(11));
        assert!(desktop.is_alive(22));
    }

    #[test]
    fn test_kill_by_title_nothing_matched() {
        let desktop = calculator();
        let res = controller(&desktop).kill(&MatchCriterion::title("title-not-exists"));
        assert_eq!(res.error_code, 0);
        assert!(res.pids.is_empty());
        assert!(res.message.contains("empty"));
    }

    #[test]
    fn test_kill_by_handle_rejected() {
        let desktop = calculator();
        let res = controller(&desktop).kill(&MatchCriterion::handle(0x10));
        assert_eq!(res.error_code, 1);
        assert_eq!(desktop.terminate_calls.load(Ordering::SeqCst), 0);
        assert!(desktop.is_alive(1234));
    }

    #[test]
    fn test_timeout_is_not_an_error() {
        let desktop = FakeDesktop::new(vec![
            FakeWindow::app(1, 9, "a"),
            FakeWindow::app(2, 9, "b"),
        ])
        .stalling(1, Duration::from_millis(500))
        .into_api();
        let api: Arc<dyn WindowApi> = desktop.clone();
        let ctl = WindowController::new(
            api,
            ControllerConfig {
                timeout: Duration::from_millis(50),
                ..Default::default()
            },
        );

        let res = ctl.hide(&MatchCriterion::pid(9), RulesPatch::default());
        assert_eq!(res.error_code, 0);
        assert_eq!(res.hwnds, vec![1]);
        assert!(res.message.contains("timed out"));
    }

    #[test]
    fn test_enumeration_failure_is_reported() {
        let desktop = FakeDesktop::new(vec![]).failing("EnumWindows failed").into_api();
        let res = controller(&desktop).hide(&MatchCriterion::title(""), RulesPatch::default());
        assert_eq!(res.error_code, 1);
        assert!(res.message.contains("EnumWindows failed"));
    }

    #[test]
    fn test_batch_runs_in_order_on_caller_thread() {
        let windows = (1..=64).map(|addr| FakeWindow::app(addr, 9, "w")).collect();
        let desktop = FakeDesktop::new(windows).into_api();

        let res = controller(&desktop).hide(&MatchCriterion::pid(9), RulesPatch::default());
        assert_eq!(res.error_code, 0);
        assert_eq!(res.hwnds, (1..=64).collect::<Vec<isize>>());

        let caller = std::thread::current().id();
        let threads = desktop.show_threads.lock().unwrap();
        assert_eq!(threads.len(), 64);
        assert!(threads.iter().all(|t| *t == caller));
    }
}
