use std::sync::Arc;

use crate::{
    animation::chain::{KeyframeEntry, PropertyChain},
    foundation::core::{Millis, TimeRange},
    foundation::error::{KeyholdError, KeyholdResult},
};

/// Read-only snapshot of an actor's merged timeline.
///
/// For every mark (distinct keyframe time across all properties) it records, per property,
/// the index of the active origin entry: the latest entry with `time <= mark`. A property
/// is absent from a bucket only before its first keyframe.
#[derive(Clone, Debug)]
pub struct TimelineCache<V> {
    chains: Vec<Arc<PropertyChain<V>>>, // sorted by property name
    marks: Vec<Millis>,
    // Row-major `marks.len() x chains.len()`.
    slots: Vec<Option<usize>>,
}

impl<V> TimelineCache<V> {
    /// A cache with no properties and no marks.
    pub fn empty() -> Self {
        Self {
            chains: Vec::new(),
            marks: Vec::new(),
            slots: Vec::new(),
        }
    }

    /// Derive the timeline and its buckets from every property chain of one actor.
    ///
    /// Each chain is walked once alongside the sorted marks. Chains with entries sharing a
    /// time (or out of order) are rejected with [`KeyholdError::InvalidTimelineState`].
    pub fn build<I>(chains: I) -> KeyholdResult<Self>
    where
        I: IntoIterator<Item = Arc<PropertyChain<V>>>,
    {
        let mut chains: Vec<Arc<PropertyChain<V>>> =
            chains.into_iter().filter(|c| !c.is_empty()).collect();
        chains.sort_by(|a, b| a.property().cmp(b.property()));

        for w in chains.windows(2) {
            if w[0].property() == w[1].property() {
                return Err(KeyholdError::validation(format!(
                    "more than one chain for property '{}'",
                    w[0].property()
                )));
            }
        }
        for chain in &chains {
            chain.validate()?;
        }

        let mut marks: Vec<Millis> = chains
            .iter()
            .flat_map(|c| c.iter().map(|e| e.time))
            .collect();
        marks.sort_unstable();
        marks.dedup();

        let width = chains.len();
        let mut slots = vec![None; marks.len() * width];
        for (slot, chain) in chains.iter().enumerate() {
            let entries = chain.entries();
            let mut next = 0usize;
            let mut active = None;
            for (row, &mark) in marks.iter().enumerate() {
                while next < entries.len() && entries[next].time <= mark {
                    active = Some(next);
                    next += 1;
                }
                slots[row * width + slot] = active;
            }
        }

        tracing::debug!(
            marks = marks.len(),
            properties = width,
            "built timeline cache"
        );

        Ok(Self {
            chains,
            marks,
            slots,
        })
    }

    pub fn marks(&self) -> &[Millis] {
        &self.marks
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// `[first mark, last mark]`, or `None` when nothing is keyframed.
    pub fn range(&self) -> Option<TimeRange> {
        let start = *self.marks.first()?;
        let end = *self.marks.last()?;
        Some(TimeRange { start, end })
    }

    pub fn chains(&self) -> impl Iterator<Item = &PropertyChain<V>> {
        self.chains.iter().map(|c| c.as_ref())
    }

    pub fn chain(&self, property: &str) -> Option<&PropertyChain<V>> {
        self.slot_of(property).map(|s| self.chains[s].as_ref())
    }

    pub fn bucket(&self, index: usize) -> Option<CacheBucket<'_, V>> {
        (index < self.marks.len()).then_some(CacheBucket { cache: self, index })
    }

    fn slot_of(&self, property: &str) -> Option<usize> {
        self.chains
            .binary_search_by(|c| c.property().cmp(property))
            .ok()
    }

    fn row(&self, index: usize) -> &[Option<usize>] {
        let width = self.chains.len();
        &self.slots[index * width..(index + 1) * width]
    }
}

impl<V> Default for TimelineCache<V> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Active-entry snapshot for one mark.
#[derive(Debug)]
pub struct CacheBucket<'a, V> {
    cache: &'a TimelineCache<V>,
    index: usize,
}

impl<V> Clone for CacheBucket<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for CacheBucket<'_, V> {}

impl<'a, V> CacheBucket<'a, V> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn mark(&self) -> Millis {
        self.cache.marks[self.index]
    }

    /// Active origin for `property` as of this mark.
    pub fn get(&self, property: &str) -> Option<ActiveEntry<'a, V>> {
        let slot = self.cache.slot_of(property)?;
        let entry = self.cache.row(self.index)[slot]?;
        Some(ActiveEntry {
            chain: self.cache.chains[slot].as_ref(),
            index: entry,
        })
    }

    /// Properties with an active entry, in property-name order.
    pub fn iter(&self) -> impl Iterator<Item = ActiveEntry<'a, V>> + 'a {
        let cache = self.cache;
        cache
            .row(self.index)
            .iter()
            .zip(cache.chains.iter())
            .filter_map(|(slot, chain)| {
                slot.map(|index| ActiveEntry {
                    chain: chain.as_ref(),
                    index,
                })
            })
    }

    pub fn len(&self) -> usize {
        self.cache.row(self.index).iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A chain together with the index of its active origin entry.
#[derive(Debug)]
pub struct ActiveEntry<'a, V> {
    pub chain: &'a PropertyChain<V>,
    pub index: usize,
}

impl<V> Clone for ActiveEntry<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for ActiveEntry<'_, V> {}

impl<'a, V> ActiveEntry<'a, V> {
    pub fn property(&self) -> &'a str {
        self.chain.property()
    }

    pub fn entry(&self) -> &'a KeyframeEntry<V> {
        &self.chain.entries()[self.index]
    }

    /// The destination entry of the segment starting at this origin.
    pub fn next(&self) -> Option<&'a KeyframeEntry<V>> {
        self.chain.next(self.index)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/cache.rs"]
mod tests;
