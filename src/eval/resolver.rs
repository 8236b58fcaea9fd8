use crate::animation::{
    chain::KeyframeEntry,
    ease::{Ease, Easing},
    interp::{EasedLerp, Interpolator},
};

/// Computes a property's output from its active origin entry.
///
/// `None` means "no output": the host keeps whatever value it already has.
pub trait ValueResolver<V> {
    fn resolve(
        &self,
        origin: &KeyframeEntry<V>,
        next: Option<&KeyframeEntry<V>>,
        t: f64,
    ) -> Option<V>;
}

/// Inputs handed to the interpolation primitive for one tweened segment.
#[derive(Debug, PartialEq)]
pub struct Tween<'a, V> {
    pub from: &'a V,
    pub to: &'a V,
    /// `(t - origin.time) / (next.time - origin.time)`, not clamped.
    pub position: f64,
    /// Always the origin's curve.
    pub ease: Ease,
}

/// What the hold/tween policy decided for one query.
#[derive(Debug, PartialEq)]
pub enum Resolution<'a, V> {
    Hold(&'a V),
    Tween(Tween<'a, V>),
}

/// Tween only when the origin opts in with an easing and has a successor; otherwise hold.
///
/// Returns `None` when `t` precedes the origin.
pub fn plan<'a, V>(
    origin: &'a KeyframeEntry<V>,
    next: Option<&'a KeyframeEntry<V>>,
    t: f64,
) -> Option<Resolution<'a, V>> {
    let start = origin.time.as_f64();
    if t < start {
        return None;
    }
    let (Easing::Curve(ease), Some(next)) = (origin.easing, next) else {
        return Some(Resolution::Hold(&origin.value));
    };
    let span = next.time.as_f64() - start;
    if span <= 0.0 {
        return Some(Resolution::Hold(&origin.value));
    }
    Some(Resolution::Tween(Tween {
        from: &origin.value,
        to: &next.value,
        position: (t - start) / span,
        ease,
    }))
}

/// Hold-by-default resolver; tweens use the origin's easing through `I`.
#[derive(Clone, Copy, Debug, Default)]
pub struct OriginEasedResolver<I = EasedLerp> {
    interp: I,
}

impl<I> OriginEasedResolver<I> {
    pub fn new(interp: I) -> Self {
        Self { interp }
    }

    pub fn interpolator(&self) -> &I {
        &self.interp
    }
}

impl<V, I> ValueResolver<V> for OriginEasedResolver<I>
where
    V: Clone,
    I: Interpolator<V>,
{
    fn resolve(
        &self,
        origin: &KeyframeEntry<V>,
        next: Option<&KeyframeEntry<V>>,
        t: f64,
    ) -> Option<V> {
        match plan(origin, next, t)? {
            Resolution::Hold(v) => Some(v.clone()),
            Resolution::Tween(tw) => {
                Some(self.interp.interpolate(tw.from, tw.to, tw.position, tw.ease))
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/resolver.rs"]
mod tests;
