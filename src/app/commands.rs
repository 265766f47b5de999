use crate::app::cli_args::Command;
use crate::app::cli_args::MatchArgs;
use crate::app::structs::exec_result::ExecResult;
use crate::app::structs::filter_rules::RulesPatch;
use crate::app::structs::match_criterion::MatchCriterion;
use crate::app::structs::show_cmd::ShowCmd;
use crate::controller::public::WindowController;

const NO_CRITERION: &str = "one of --pid, --title or --hwnd is required";

/// Runs a parsed command against the controller.
pub fn execute(controller: &WindowController, command: &Command) -> ExecResult {
    match command {
        Command::Hide(target) => with_criterion(target, |c| controller.hide(c, RulesPatch::default())),
        Command::Show(target) => {
            let cmd = match target.status.map(ShowCmd::try_from).transpose() {
                Ok(cmd) => cmd.unwrap_or(ShowCmd::Restore),
                Err(e) => return ExecResult::failed(e.to_string()),
            };
            with_criterion(target, |c| controller.show(c, cmd, RulesPatch::default()))
        }
        Command::Kill(target) => with_criterion(target, |c| controller.kill(c)),
        Command::Title { text, target } => {
            with_criterion(target, |c| controller.set_title(c, text, RulesPatch::default()))
        }
        Command::List { all, main_only, target } => with_criterion(target, |c| list(controller, c, *all, *main_only)),
    }
}

fn with_criterion(target: &MatchArgs, f: impl FnOnce(&MatchCriterion) -> ExecResult) -> ExecResult {
    match target.criterion() {
        Some(criterion) => f(&criterion),
        None => {
            log::error!("{NO_CRITERION}");
            ExecResult::failed(NO_CRITERION)
        }
    }
}

fn list(controller: &WindowController, criterion: &MatchCriterion, all: bool, main_only: bool) -> ExecResult {
    let mut result = ExecResult::new();
    if main_only {
        controller.main_hwnd(criterion).into_iter().for_each(|w| result.push_window(w));
        return result;
    }

    let rules = controller.config().show_rules;
    let rules = match all {
        true => None,
        false => Some(&rules),
    };
    match controller.get_hwnds(criterion, rules) {
        Ok(windows) => windows.into_iter().for_each(|w| result.push_window(w)),
        Err(e) => {
            e.log();
            result.push_error(e);
        }
    }
    result
}
