use crate::foundation::error::{KeyholdError, KeyholdResult};

pub use kurbo::Vec2;

/// Authored keyframe time in whole milliseconds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl std::fmt::Display for Millis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Inclusive time span `[start, end]` covered by an actor's keyframes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeRange {
    pub start: Millis,
    pub end: Millis, // inclusive
}

impl TimeRange {
    pub fn new(start: Millis, end: Millis) -> KeyholdResult<Self> {
        if start.0 > end.0 {
            return Err(KeyholdError::validation("TimeRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    pub fn len_ms(self) -> u64 {
        self.end.0 - self.start.0
    }

    pub fn contains(self, t: f64) -> bool {
        self.start.as_f64() <= t && t <= self.end.as_f64()
    }

    pub fn clamp(self, t: f64) -> f64 {
        t.clamp(self.start.as_f64(), self.end.as_f64())
    }
}

/// Reject query times that cannot be ordered against marks.
pub fn finite_query_time(t: f64) -> KeyholdResult<f64> {
    if !t.is_finite() {
        return Err(KeyholdError::validation(format!(
            "query time must be finite, got {t}"
        )));
    }
    Ok(t)
}

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque_alpha")]
    pub a: u8,
}

fn opaque_alpha() -> u8 {
    255
}

impl Rgba8 {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
