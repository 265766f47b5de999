use std::collections::HashSet;

use super::native::WindowApi;
use crate::app::structs::filter_rules::FilterRules;
use crate::app::structs::window_ref::WindowRef;

pub trait WindowFilter {
    fn accepts(&self, api: &dyn WindowApi, window: WindowRef) -> bool;
}

impl WindowFilter for FilterRules {
    // NOTE: IME and message-only windows can slip through these checks
    fn accepts(&self, api: &dyn WindowApi, window: WindowRef) -> bool {
        is_top_level(api, window)
            && self.title_exists.accepts(&api.get_window_text(window))
            && self.style_accepts(api.get_style(window))
            && self.ex_style_accepts(api.get_extended_style(window))
    }
}

/// A window without parent and owner.
pub fn is_top_level(api: &dyn WindowApi, window: WindowRef) -> bool {
    api.get_parent(window).is_none_or(|p| p.is_null()) && api.get_owner(window).is_none_or(|o| o.is_null())
}

/// Narrows `windows` to the ones accepted by `rules`, dropping repeated addresses.
///
/// Without rules the windows are only deduplicated.
pub fn filter_windows(api: &dyn WindowApi, windows: &[WindowRef], rules: Option<&FilterRules>) -> Vec<WindowRef> {
    let mut seen: HashSet<WindowRef> = HashSet::new();
    let mut accepted = Vec::new();
    for w in windows.iter().copied() {
        if seen.contains(&w) || !rules.is_none_or(|r| r.accepts(api, w)) {
            continue;
        }
        seen.insert(w);
        accepted.push(w);
    }
    accepted
}

/// The root owner shared by most of `windows`; ties go to the first one seen.
pub fn main_window(api: &dyn WindowApi, windows: &[WindowRef]) -> Option<WindowRef> {
    let mut counts: Vec<(WindowRef, usize)> = Vec::new();
    for w in windows {
        let root = api.get_root_owner(*w).filter(|r| !r.is_null()).unwrap_or(*w);
        match counts.iter_mut().find(|(r, _)| *r == root) {
            Some((_, n)) => *n += 1,
            None => counts.push((root, 1)),
        }
    }

    counts
        .into_iter()
        .fold(None, |best: Option<(WindowRef, usize)>, (root, n)| match best {
            Some((_, max)) if max >= n => best,
            _ => Some((root, n)),
        })
        .map(|(root, _)| root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::structs::filter_rules::TitleRule;
    use crate::app::structs::filter_rules::WS_CHILD;
    use crate::app::structs::filter_rules::WS_EX_TOOLWINDOW;
    use crate::app::structs::filter_rules::WS_SYSMENU;
    use crate::controller::fake_desktop::FakeDesktop;
    use crate::controller::fake_desktop::FakeWindow;

    fn refs(addrs: &[isize]) -> Vec<WindowRef> {
        addrs.iter().map(|a| WindowRef::new(*a)).collect()
    }

    fn desktop() -> FakeDesktop {
        FakeDesktop::new(vec![
            FakeWindow::app(1, 10, "Main window"),
            FakeWindow::app(2, 10, "Dialog").owned_by(1),
            FakeWindow::app(3, 10, "Button").child_of(1),
            FakeWindow::app(4, 10, "   "),
            FakeWindow::app(5, 20, "Palette").with_style(WS_SYSMENU, WS_EX_TOOLWINDOW),
            FakeWindow::app(6, 20, "No menu").with_style(0, 0),
            FakeWindow::app(7, 20, "Child style").with_style(WS_SYSMENU | WS_CHILD, 0),
        ])
    }

    #[test]
    fn test_no_rules_only_dedups() {
        let api = desktop();
        let out = filter_windows(&api, &refs(&[3, 2, 3, 1, 2]), None);
        assert_eq!(out, refs(&[3, 2, 1]));
    }

    #[test]
    fn test_hide_defaults_keep_top_level_only() {
        let api = desktop();
        let out = filter_windows(&api, &refs(&[1, 2, 3, 4, 5, 6, 7]), Some(&FilterRules::hide_defaults()));
        assert_eq!(out, refs(&[1, 4, 5, 6, 7]));
    }

    #[test]
    fn test_show_defaults() {
        let api = desktop();
        let out = filter_windows(&api, &refs(&[1, 2, 3, 4, 5, 6, 7]), Some(&FilterRules::show_defaults()));
        assert_eq!(out, refs(&[1]));
    }

    #[test]
    fn test_title_must_be_empty() {
        let api = desktop();
        let rules = FilterRules {
            title_exists: TitleRule::Enforce(false),
            ..Default::default()
        };
        assert_eq!(filter_windows(&api, &refs(&[1, 4]), Some(&rules)), refs(&[4]));
    }

    #[test]
    fn test_exclude_bit_removes_window() {
        let api = desktop();
        let base = FilterRules::hide_defaults();
        let excluding = FilterRules {
            exclude_style: Some(WS_SYSMENU),
            ..base
        };
        assert!(base.accepts(&api, WindowRef::new(1)));
        assert!(!excluding.accepts(&api, WindowRef::new(1)));
    }

    #[test]
    fn test_include_missing_bit_removes_window() {
        let api = desktop();
        let including = FilterRules {
            include_ex_style: Some(WS_EX_TOOLWINDOW),
            ..Default::default()
        };
        assert!(!including.accepts(&api, WindowRef::new(1)));
        assert!(including.accepts(&api, WindowRef::new(5)));
    }

    #[test]
    fn test_ignored_rules_never_reduce() {
        let api = desktop();
        let all = refs(&[1, 2, 3, 4, 5, 6, 7]);
        let top_level: Vec<WindowRef> = all.iter().copied().filter(|w| is_top_level(&api, *w)).collect();
        assert_eq!(filter_windows(&api, &all, Some(&FilterRules::default())), top_level);
    }

    #[test]
    fn test_main_window() {
        let api = desktop();
        assert_eq!(main_window(&api, &refs(&[2, 3, 5])), Some(WindowRef::new(1)));
        assert_eq!(main_window(&api, &refs(&[6, 5])), Some(WindowRef::new(6)));
        assert_eq!(main_window(&api, &[]), None);
    }
}
