use crate::{
    foundation::error::{KeyholdError, KeyholdResult},
    timeline::locator::LocatorKind,
};

/// What to do with query times outside an actor's keyframed range.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RangePolicy {
    /// Freeze at the first/last mark.
    #[default]
    Clamp,
    /// Freeze at the last mark, but leave the actor untouched before its first mark.
    SkipBeforeStart,
}

/// Evaluation settings shared by every actor on a stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EvalOpts {
    /// Segment lookup strategy.
    pub locator: LocatorKind,
    /// Handling of query times outside the keyframed range.
    pub range: RangePolicy,
}

impl EvalOpts {
    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_json_str(s: &str) -> KeyholdResult<Self> {
        serde_json::from_str(s).map_err(|e| KeyholdError::serde(format!("eval opts: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/opts.rs"]
mod tests;
