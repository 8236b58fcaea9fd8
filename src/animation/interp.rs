use crate::{
    animation::ease::Ease,
    foundation::core::{Rgba8, Vec2},
};

/// Interpolation contract for keyframe value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for f32 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        (*a as f64 + ((*b as f64 - *a as f64) * t)) as f32
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// The opaque curve primitive consumed by the value resolver.
///
/// Implementations must be pure and total over `position` in `[0, 1]`.
pub trait Interpolator<V> {
    fn interpolate(&self, from: &V, to: &V, position: f64, ease: Ease) -> V;
}

/// Default primitive: shape `position` with the curve, then [`Lerp`] the values.
#[derive(Clone, Copy, Debug, Default)]
pub struct EasedLerp;

impl<V: Lerp> Interpolator<V> for EasedLerp {
    fn interpolate(&self, from: &V, to: &V, position: f64, ease: Ease) -> V {
        V::lerp(from, to, ease.apply(position))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
