use serde::Deserialize;
use serde::Serialize;

use super::deserializers::to_u64_minmax;

pub const DEFAULT_RESOLVE_TIMEOUT_MS: u64 = 30_000;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct General {
    #[serde(deserialize_with = "to_u64_minmax::<100, 600_000, _>")]
    pub resolve_timeout_ms: u64,
}

impl Default for General {
    fn default() -> Self {
        General {
            resolve_timeout_ms: DEFAULT_RESOLVE_TIMEOUT_MS,
        }
    }
}
