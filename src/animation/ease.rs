use std::str::FromStr;

use crate::foundation::error::{KeyholdError, KeyholdResult};

/// Easing curves used to map normalized segment progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Ease {
    /// Linear interpolation.
    Linear,
    /// Quadratic ease-in.
    InQuad,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-in.
    InCubic,
    /// Cubic ease-out.
    OutCubic,
    /// Cubic ease-in/out.
    InOutCubic,
    /// Sinusoidal ease-in.
    InSine,
    /// Sinusoidal ease-out.
    OutSine,
    /// Sinusoidal ease-in/out.
    InOutSine,
}

impl Ease {
    /// Every curve, in declaration order.
    pub const ALL: [Ease; 10] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
        Self::InSine,
        Self::OutSine,
        Self::InOutSine,
    ];

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        use std::f64::consts::PI;

        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            // Sine curves do not land exactly on the endpoints in floating point.
            Self::InSine => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - (t * PI / 2.0).cos()
                }
            }
            Self::OutSine => (t * PI / 2.0).sin().min(1.0),
            Self::InOutSine => {
                if t >= 1.0 {
                    1.0
                } else {
                    -((PI * t).cos() - 1.0) / 2.0
                }
            }
        }
    }

    /// Authoring name, as accepted by [`Ease::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "easeInQuad",
            Self::OutQuad => "easeOutQuad",
            Self::InOutQuad => "easeInOutQuad",
            Self::InCubic => "easeInCubic",
            Self::OutCubic => "easeOutCubic",
            Self::InOutCubic => "easeInOutCubic",
            Self::InSine => "easeInSine",
            Self::OutSine => "easeOutSine",
            Self::InOutSine => "easeInOutSine",
        }
    }
}

impl FromStr for Ease {
    type Err = KeyholdError;

    fn from_str(s: &str) -> KeyholdResult<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.name() == s)
            .ok_or_else(|| KeyholdError::validation(format!("unknown easing \"{s}\"")))
    }
}

impl TryFrom<String> for Ease {
    type Error = KeyholdError;

    fn try_from(s: String) -> KeyholdResult<Self> {
        s.parse()
    }
}

impl From<Ease> for &'static str {
    fn from(e: Ease) -> Self {
        e.name()
    }
}

/// Per-entry tween switch: `None` holds the entry's value until the next keyframe,
/// `Curve` tweens toward the next keyframe using that curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Easing {
    /// Hold; the sentinel assigned whenever authoring supplies no easing.
    #[default]
    None,
    /// Tween from this entry using the given curve.
    Curve(Ease),
}

impl Easing {
    pub fn is_tween(self) -> bool {
        matches!(self, Self::Curve(_))
    }

    pub fn curve(self) -> Option<Ease> {
        match self {
            Self::None => None,
            Self::Curve(e) => Some(e),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Curve(e) => e.name(),
        }
    }
}

impl From<Ease> for Easing {
    fn from(e: Ease) -> Self {
        Self::Curve(e)
    }
}

impl FromStr for Easing {
    type Err = KeyholdError;

    fn from_str(s: &str) -> KeyholdResult<Self> {
        if s == "none" {
            return Ok(Self::None);
        }
        s.parse::<Ease>().map(Self::Curve)
    }
}

impl TryFrom<String> for Easing {
    type Error = KeyholdError;

    fn try_from(s: String) -> KeyholdResult<Self> {
        s.parse()
    }
}

impl From<Easing> for &'static str {
    fn from(e: Easing) -> Self {
        e.name()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
