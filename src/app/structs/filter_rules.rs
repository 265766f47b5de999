use serde::Deserialize;
use serde::Serialize;

use crate::app::configs::deserializers::to_opt_mask;

pub const WS_CHILD: u32 = 0x4000_0000;
pub const WS_SYSMENU: u32 = 0x0008_0000;
pub const WS_EX_TOOLWINDOW: u32 = 0x0000_0080;

/// Whether the window text must be present, must be absent, or is not checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TitleRuleExt", into = "TitleRuleExt")]
pub enum TitleRule {
    Enforce(bool),
    #[default]
    Ignore,
}

impl TitleRule {
    pub fn accepts(&self, title: &str) -> bool {
        match self {
            TitleRule::Enforce(exists) => *exists != title.trim().is_empty(),
            TitleRule::Ignore => true,
        }
    }
}

/// Declarative rules a resolved window must obey to be acted upon.
///
/// Masks set to `None` are not checked. A window passes a mask rule when it has
/// all the `include_*` bits and does not have all the `exclude_*` bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FilterRules {
    pub title_exists: TitleRule,
    pub include_style: Option<u32>,
    pub exclude_style: Option<u32>,
    pub include_ex_style: Option<u32>,
    pub exclude_ex_style: Option<u32>,
}

impl FilterRules {
    /// Broad preset: only the top-level check applies.
    pub fn hide_defaults() -> FilterRules {
        FilterRules::default()
    }

    /// Heuristic for user-facing application windows.
    pub fn show_defaults() -> FilterRules {
        FilterRules {
            title_exists: TitleRule::Enforce(true),
            include_style: Some(WS_SYSMENU),
            exclude_style: Some(WS_CHILD),
            include_ex_style: None,
            exclude_ex_style: Some(WS_EX_TOOLWINDOW),
        }
    }

    pub fn style_accepts(&self, style: u32) -> bool {
        mask_accepts(style, self.include_style, self.exclude_style)
    }

    pub fn ex_style_accepts(&self, ex_style: u32) -> bool {
        mask_accepts(ex_style, self.include_ex_style, self.exclude_ex_style)
    }
}

/// Partial [`FilterRules`]: only the fields that are set replace the ones of the preset.
///
/// Masks are doubly optional: `Some(None)` turns the preset's mask off, `None` keeps it.
/// In config files a mask value of `0` turns it off.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct RulesPatch {
    pub title_exists: Option<TitleRule>,
    #[serde(deserialize_with = "to_opt_mask")]
    pub include_style: Option<Option<u32>>,
    #[serde(deserialize_with = "to_opt_mask")]
    pub exclude_style: Option<Option<u32>>,
    #[serde(deserialize_with = "to_opt_mask")]
    pub include_ex_style: Option<Option<u32>>,
    #[serde(deserialize_with = "to_opt_mask")]
    pub exclude_ex_style: Option<Option<u32>>,
}

impl RulesPatch {
    pub fn apply_to(&self, preset: FilterRules) -> FilterRules {
        FilterRules {
            title_exists: self.title_exists.unwrap_or(preset.title_exists),
            include_style: self.include_style.unwrap_or(preset.include_style),
            exclude_style: self.exclude_style.unwrap_or(preset.exclude_style),
            include_ex_style: self.include_ex_style.unwrap_or(preset.include_ex_style),
            exclude_ex_style: self.exclude_ex_style.unwrap_or(preset.exclude_ex_style),
        }
    }
}

fn mask_accepts(bits: u32, include: Option<u32>, exclude: Option<u32>) -> bool {
    let included = include.is_none_or(|mask| bits & mask == mask);
    let excluded = exclude.is_some_and(|mask| bits & mask == mask);
    included && !excluded
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(untagged)]
enum TitleRuleExt {
    Flag(bool),
    Keyword(String),
}

impl TryFrom<TitleRuleExt> for TitleRule {
    type Error = String;

    fn try_from(value: TitleRuleExt) -> Result<Self, Self::Error> {
        match value {
            TitleRuleExt::Flag(exists) => Ok(TitleRule::Enforce(exists)),
            TitleRuleExt::Keyword(k) if k.eq_ignore_ascii_case("ignore") => Ok(TitleRule::Ignore),
            TitleRuleExt::Keyword(k) => Err(format!("invalid title rule '{k}': expected true, false or \"ignore\"")),
        }
    }
}

impl From<TitleRule> for TitleRuleExt {
    fn from(value: TitleRule) -> Self {
        match value {
            TitleRule::Enforce(exists) => TitleRuleExt::Flag(exists),
            TitleRule::Ignore => TitleRuleExt::Keyword("ignore".to_owned()),
        }
    }
}
