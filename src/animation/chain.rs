use crate::{
    animation::ease::Easing,
    foundation::core::Millis,
    foundation::error::{KeyholdError, KeyholdResult},
};

/// One authored sample of one property.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeEntry<V> {
    /// Authored time of this sample.
    pub time: Millis,
    /// Value at `time`.
    pub value: V,
    /// Whether (and how) to tween from this entry toward the next one.
    #[serde(default)]
    pub easing: Easing,
}

impl<V> KeyframeEntry<V> {
    pub fn new(time: Millis, value: V, easing: Easing) -> Self {
        Self {
            time,
            value,
            easing,
        }
    }

    /// Entry authored without an easing; holds until the next entry.
    pub fn hold(time: Millis, value: V) -> Self {
        Self::new(time, value, Easing::None)
    }
}

/// Time-ordered keyframe entries for a single property.
///
/// The successor of the entry at index `i` is the entry at `i + 1`; there are no link
/// references to keep consistent, inserts and removals are sorted-array operations.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyChain<V> {
    property: String,
    entries: Vec<KeyframeEntry<V>>, // sorted by time
}

impl<V> PropertyChain<V> {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            entries: Vec::new(),
        }
    }

    /// Build a chain from raw entries, sorting by time.
    ///
    /// Entries sharing a time are kept (in input order) so that the cache builder can
    /// report them instead of one silently winning.
    pub fn from_entries(property: impl Into<String>, mut entries: Vec<KeyframeEntry<V>>) -> Self {
        entries.sort_by_key(|e| e.time);
        Self {
            property: property.into(),
            entries,
        }
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[KeyframeEntry<V>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyframeEntry<V>> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&KeyframeEntry<V>> {
        self.entries.get(index)
    }

    /// The entry following `index` in time, if any.
    pub fn next(&self, index: usize) -> Option<&KeyframeEntry<V>> {
        self.entries.get(index.checked_add(1)?)
    }

    pub fn position_of(&self, time: Millis) -> Option<usize> {
        self.entries.binary_search_by_key(&time, |e| e.time).ok()
    }

    pub fn entry_at(&self, time: Millis) -> Option<&KeyframeEntry<V>> {
        self.position_of(time).map(|i| &self.entries[i])
    }

    pub fn entry_at_mut(&mut self, time: Millis) -> Option<&mut KeyframeEntry<V>> {
        let i = self.position_of(time)?;
        self.entries.get_mut(i)
    }

    pub fn first_time(&self) -> Option<Millis> {
        self.entries.first().map(|e| e.time)
    }

    pub fn last_time(&self) -> Option<Millis> {
        self.entries.last().map(|e| e.time)
    }

    /// Insert in time order; an entry already at the same time is replaced and returned.
    pub fn insert(&mut self, entry: KeyframeEntry<V>) -> Option<KeyframeEntry<V>> {
        match self.entries.binary_search_by_key(&entry.time, |e| e.time) {
            Ok(i) => Some(std::mem::replace(&mut self.entries[i], entry)),
            Err(i) => {
                self.entries.insert(i, entry);
                None
            }
        }
    }

    pub fn remove(&mut self, time: Millis) -> Option<KeyframeEntry<V>> {
        let i = self.position_of(time)?;
        Some(self.entries.remove(i))
    }

    /// Check that times are strictly increasing.
    pub fn validate(&self) -> KeyholdResult<()> {
        for w in self.entries.windows(2) {
            if w[0].time >= w[1].time {
                return Err(KeyholdError::invalid_timeline(&self.property, w[1].time));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/chain.rs"]
mod tests;
