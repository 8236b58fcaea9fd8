use std::collections::{BTreeMap, HashMap};

use crate::{
    eval::opts::{EvalOpts, RangePolicy},
    eval::resolver::{OriginEasedResolver, ValueResolver},
    foundation::core::finite_query_time,
    foundation::error::{KeyholdError, KeyholdResult},
    timeline::cache::{ActiveEntry, TimelineCache},
    timeline::locator::{LocatorKind, SegmentLocator},
};

/// Resolved values for one query, keyed by property name.
pub type PropertyUpdates<V> = BTreeMap<String, V>;

/// Receives resolved values; the host's property setter.
pub trait StateSink<V> {
    fn set(&mut self, property: &str, value: V);
}

impl<V> StateSink<V> for BTreeMap<String, V> {
    fn set(&mut self, property: &str, value: V) {
        self.insert(property.to_string(), value);
    }
}

impl<V> StateSink<V> for HashMap<String, V> {
    fn set(&mut self, property: &str, value: V) {
        self.insert(property.to_string(), value);
    }
}

/// Observes each property around its resolution in [`StateApplicator::apply_observed`].
///
/// `before` runs with the active entry, `after` with what the resolver produced (`None`
/// for no output). Both default to no-ops; `()` is the hook that observes nothing.
pub trait InterpolateHook<V> {
    fn before(&mut self, _active: ActiveEntry<'_, V>, _t: f64) {}

    fn after(&mut self, _property: &str, _value: Option<&V>) {}
}

impl<V> InterpolateHook<V> for () {}

/// Clamps, locates one bucket and resolves every property present in it.
///
/// All properties of one call are resolved against the same bucket.
#[derive(Clone, Copy, Debug)]
pub struct StateApplicator<L = LocatorKind, R = OriginEasedResolver> {
    locator: L,
    resolver: R,
    range: RangePolicy,
}

impl StateApplicator {
    pub fn from_opts(opts: EvalOpts) -> Self {
        Self::new(opts.locator, OriginEasedResolver::default(), opts.range)
    }
}

impl Default for StateApplicator {
    fn default() -> Self {
        Self::from_opts(EvalOpts::default())
    }
}

impl<L, R> StateApplicator<L, R> {
    pub fn new(locator: L, resolver: R, range: RangePolicy) -> Self {
        Self {
            locator,
            resolver,
            range,
        }
    }

    pub fn range_policy(&self) -> RangePolicy {
        self.range
    }

    /// Resolve every property active at `t`.
    ///
    /// An empty cache, or `t` before the start under [`RangePolicy::SkipBeforeStart`],
    /// yields no updates.
    pub fn evaluate<V>(
        &self,
        cache: &TimelineCache<V>,
        t: f64,
    ) -> KeyholdResult<PropertyUpdates<V>>
    where
        L: SegmentLocator,
        R: ValueResolver<V>,
    {
        let mut updates = PropertyUpdates::new();
        self.apply(cache, t, &mut updates)?;
        Ok(updates)
    }

    /// Like [`Self::evaluate`] but writes straight into `sink`; returns how many
    /// properties were written.
    pub fn apply<V, S>(
        &self,
        cache: &TimelineCache<V>,
        t: f64,
        sink: &mut S,
    ) -> KeyholdResult<usize>
    where
        L: SegmentLocator,
        R: ValueResolver<V>,
        S: StateSink<V> + ?Sized,
    {
        self.apply_observed(cache, t, sink, &mut ())
    }

    /// [`Self::apply`] with `hook` called before and after each property is resolved.
    pub fn apply_observed<V, S, H>(
        &self,
        cache: &TimelineCache<V>,
        t: f64,
        sink: &mut S,
        hook: &mut H,
    ) -> KeyholdResult<usize>
    where
        L: SegmentLocator,
        R: ValueResolver<V>,
        S: StateSink<V> + ?Sized,
        H: InterpolateHook<V> + ?Sized,
    {
        let t = finite_query_time(t)?;
        let Some(range) = cache.range() else {
            return Ok(0);
        };
        if t < range.start.as_f64() && self.range == RangePolicy::SkipBeforeStart {
            tracing::trace!(t, start = %range.start, "query before first mark, skipped");
            return Ok(0);
        }
        let t = range.clamp(t);

        let index = self.locator.locate(cache.marks(), t)?;
        let bucket = cache.bucket(index).ok_or_else(|| {
            KeyholdError::invariant(format!(
                "locator returned {index} for {} marks",
                cache.marks().len()
            ))
        })?;

        let mut written = 0;
        for active in bucket.iter() {
            hook.before(active, t);
            let value = self.resolver.resolve(active.entry(), active.next(), t);
            hook.after(active.property(), value.as_ref());
            match value {
                Some(value) => {
                    sink.set(active.property(), value);
                    written += 1;
                }
                None => {
                    tracing::trace!(property = active.property(), t, "no output");
                }
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/eval/applicator.rs"]
mod tests;
