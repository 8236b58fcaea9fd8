//! keyhold evaluates keyframe timelines the way frame-based animation tools do.
//!
//! Values *hold* by default: an entry keeps its value until the next keyframe of the same
//! property. A tween happens only when the origin entry carries an easing, and it is the
//! origin's easing (never the destination's) that shapes the segment.
//!
//! # Pipeline overview
//!
//! 1. **Author**: [`Actor::keyframe`] inserts entries into per-property [`PropertyChain`]s;
//!    properties given no easing get [`Easing::None`].
//! 2. **Rebuild**: [`TimelineCache::build`] merges every chain's times into one timeline and
//!    records, per mark, the active origin entry of each property.
//! 3. **Locate**: a [`SegmentLocator`] picks the bucket for a query time (floor, with exact
//!    marks selecting themselves).
//! 4. **Resolve**: a [`ValueResolver`] turns each active entry into a held or tweened value,
//!    delegating curve math to an [`Interpolator`].
//!
//! [`StateApplicator`] glues 3 and 4 together for one consistent bucket per call, and
//! [`Stage`] exposes `rebuild`/`evaluate` per actor to a host loop.
#![forbid(unsafe_code)]

mod animation;
mod eval;
mod foundation;
mod scene;
mod timeline;

pub use animation::chain::{KeyframeEntry, PropertyChain};
pub use animation::ease::{Ease, Easing};
pub use animation::interp::{EasedLerp, Interpolator, Lerp};
pub use animation::value::Value;
pub use eval::applicator::{InterpolateHook, PropertyUpdates, StateApplicator, StateSink};
pub use eval::opts::{EvalOpts, RangePolicy};
pub use eval::resolver::{OriginEasedResolver, Resolution, Tween, ValueResolver, plan};
pub use foundation::core::{Millis, Rgba8, TimeRange, Vec2, finite_query_time};
pub use foundation::error::{KeyholdError, KeyholdResult};
pub use scene::actor::{Actor, EasingSpec};
pub use scene::document::{ActorDoc, KeyframeDoc, SceneDoc};
pub use scene::stage::{ActorId, Stage};
pub use timeline::cache::{ActiveEntry, CacheBucket, TimelineCache};
pub use timeline::locator::{BinarySearch, LinearScan, LocatorKind, SegmentLocator};
