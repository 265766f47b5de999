use serde::Deserialize;
use serde::Serialize;

use crate::app::structs::filter_rules::RulesPatch;

/// Overrides of the built-in hide and show presets.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    pub hide: RulesPatch,
    pub show: RulesPatch,
}
