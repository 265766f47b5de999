use serde::de::Error;
use serde::Deserialize;
use serde::Deserializer;

pub fn to_u64_minmax<'de, const MIN: u64, const MAX: u64, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let v: u64 = u64::deserialize(deserializer)?;
    match v >= MIN && v <= MAX {
        true => Ok(v),
        false => Err(D::Error::custom(format!(
            "value must be between {MIN} and {MAX} (inclusive)"
        ))),
    }
}

/// Reads an optional style mask; `0` turns the mask off.
pub fn to_opt_mask<'de, D>(deserializer: D) -> Result<Option<Option<u32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Option<u32> = Option::deserialize(deserializer)?;
    Ok(v.map(|m| match m {
        0 => None,
        m => Some(m),
    }))
}
