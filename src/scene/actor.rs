use std::{collections::BTreeMap, sync::Arc};

use crate::{
    animation::chain::{KeyframeEntry, PropertyChain},
    animation::ease::{Ease, Easing},
    eval::applicator::{PropertyUpdates, StateApplicator, StateSink},
    eval::resolver::ValueResolver,
    foundation::core::{Millis, TimeRange},
    foundation::error::{KeyholdError, KeyholdResult},
    timeline::cache::TimelineCache,
    timeline::locator::SegmentLocator,
};

/// Easing supplied with a keyframe call.
///
/// Any property this value does not name gets [`Easing::None`] when a keyframe is created.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum EasingSpec {
    /// No easing given.
    #[default]
    Unspecified,
    /// One easing for every property of the keyframe.
    All(Easing),
    /// Easing per property name.
    PerProperty(BTreeMap<String, Easing>),
}

impl EasingSpec {
    /// Easing explicitly given for `property`, if any.
    pub fn get(&self, property: &str) -> Option<Easing> {
        match self {
            Self::Unspecified => None,
            Self::All(e) => Some(*e),
            Self::PerProperty(map) => map.get(property).copied(),
        }
    }

    pub fn per_property<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Easing)>,
    {
        Self::PerProperty(pairs.into_iter().map(|(k, e)| (k.into(), e)).collect())
    }
}

impl From<Easing> for EasingSpec {
    fn from(e: Easing) -> Self {
        Self::All(e)
    }
}

impl From<Ease> for EasingSpec {
    fn from(e: Ease) -> Self {
        Self::All(Easing::Curve(e))
    }
}

/// An animated object: per-property keyframe chains, the published timeline snapshot and
/// the live property state the snapshot is applied to.
///
/// Every successful mutation rebuilds and republishes the snapshot. A failed rebuild keeps
/// both the previous chains and the previous snapshot.
#[derive(Clone, Debug)]
pub struct Actor<V> {
    name: String,
    chains: BTreeMap<String, Arc<PropertyChain<V>>>,
    cache: Arc<TimelineCache<V>>,
    state: BTreeMap<String, V>,
}

impl<V: Clone> Actor<V> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            chains: BTreeMap::new(),
            cache: Arc::new(TimelineCache::empty()),
            state: BTreeMap::new(),
        }
    }

    /// Build an actor from pre-assembled chains (e.g. loaded from a document).
    ///
    /// Duplicate times inside a chain surface as [`KeyholdError::InvalidTimelineState`].
    pub fn with_chains<I>(name: impl Into<String>, chains: I) -> KeyholdResult<Self>
    where
        I: IntoIterator<Item = PropertyChain<V>>,
    {
        let mut actor = Self::new(name);
        let mut staged = BTreeMap::new();
        for chain in chains {
            let property = chain.property().to_string();
            if staged.insert(property.clone(), Arc::new(chain)).is_some() {
                return Err(KeyholdError::validation(format!(
                    "actor '{}' has more than one chain for '{property}'",
                    actor.name
                )));
            }
        }
        actor.commit(staged)?;
        Ok(actor)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Author a keyframe at `ms` for every given property.
    ///
    /// Properties without an explicit easing in `easing` get [`Easing::None`]; a property
    /// that already has a keyframe at `ms` is overwritten.
    #[tracing::instrument(skip(self, properties, easing), fields(actor = %self.name))]
    pub fn keyframe<K, I>(
        &mut self,
        ms: Millis,
        properties: I,
        easing: impl Into<EasingSpec>,
    ) -> KeyholdResult<&mut Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let easing = easing.into();
        let properties: Vec<(String, V)> =
            properties.into_iter().map(|(k, v)| (k.into(), v)).collect();
        for (property, _) in &properties {
            check_property_name(property)?;
        }

        let mut staged = self.chains.clone();
        for (property, value) in properties {
            let entry = KeyframeEntry::new(ms, value, easing.get(&property).unwrap_or_default());
            let chain = staged
                .entry(property.clone())
                .or_insert_with(|| Arc::new(PropertyChain::new(property)));
            Arc::make_mut(chain).insert(entry);
        }
        self.commit(staged)?;
        Ok(self)
    }

    /// Change values (and, where `easing` names them, easings) of existing keyframes at `ms`.
    pub fn modify_keyframe<K, I>(
        &mut self,
        ms: Millis,
        properties: I,
        easing: impl Into<EasingSpec>,
    ) -> KeyholdResult<&mut Self>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        let easing = easing.into();
        let mut staged = self.chains.clone();
        for (property, value) in properties {
            let property = property.into();
            let entry = staged
                .get_mut(&property)
                .and_then(|c| Arc::make_mut(c).entry_at_mut(ms))
                .ok_or_else(|| {
                    KeyholdError::validation(format!(
                        "actor '{}' has no keyframe for '{property}' at {ms}",
                        self.name
                    ))
                })?;
            entry.value = value;
            if let Some(e) = easing.get(&property) {
                entry.easing = e;
            }
        }
        self.commit(staged)?;
        Ok(self)
    }

    /// Remove every property's keyframe at `ms`; returns how many entries were removed.
    pub fn remove_keyframe(&mut self, ms: Millis) -> KeyholdResult<usize> {
        let mut staged = self.chains.clone();
        let mut removed = 0;
        for chain in staged.values_mut() {
            if chain.position_of(ms).is_some() {
                Arc::make_mut(chain).remove(ms);
                removed += 1;
            }
        }
        staged.retain(|_, c| !c.is_empty());
        self.commit(staged)?;
        Ok(removed)
    }

    /// Remove one property's keyframe at `ms`.
    pub fn remove_property_keyframe(&mut self, property: &str, ms: Millis) -> KeyholdResult<bool> {
        let mut staged = self.chains.clone();
        let Some(chain) = staged.get_mut(property) else {
            return Ok(false);
        };
        if chain.position_of(ms).is_none() {
            return Ok(false);
        }
        Arc::make_mut(chain).remove(ms);
        if chain.is_empty() {
            staged.remove(property);
        }
        self.commit(staged)?;
        Ok(true)
    }

    pub fn remove_all_keyframes(&mut self) {
        self.chains.clear();
        self.cache = Arc::new(TimelineCache::empty());
    }

    /// Replace (or add) a whole property chain.
    pub fn set_chain(&mut self, chain: PropertyChain<V>) -> KeyholdResult<()> {
        let mut staged = self.chains.clone();
        staged.insert(chain.property().to_string(), Arc::new(chain));
        self.commit(staged)
    }

    /// Rebuild the timeline snapshot from the current chains.
    #[tracing::instrument(skip(self), fields(actor = %self.name))]
    pub fn rebuild(&mut self) -> KeyholdResult<()> {
        self.cache = Arc::new(TimelineCache::build(self.chains.values().cloned())?);
        Ok(())
    }

    fn commit(&mut self, staged: BTreeMap<String, Arc<PropertyChain<V>>>) -> KeyholdResult<()> {
        let cache = match TimelineCache::build(staged.values().cloned()) {
            Ok(cache) => cache,
            Err(err) => {
                tracing::warn!(
                    actor = %self.name,
                    error = %err,
                    "rebuild rejected, keeping previous timeline"
                );
                return Err(err);
            }
        };
        self.chains = staged;
        self.cache = Arc::new(cache);
        Ok(())
    }

    pub fn has_keyframe_at(&self, ms: Millis, property: Option<&str>) -> bool {
        match property {
            Some(p) => self
                .chains
                .get(p)
                .is_some_and(|c| c.position_of(ms).is_some()),
            None => self.chains.values().any(|c| c.position_of(ms).is_some()),
        }
    }

    pub fn chain(&self, property: &str) -> Option<&PropertyChain<V>> {
        self.chains.get(property).map(|c| c.as_ref())
    }

    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.chains.keys().map(String::as_str)
    }

    /// The published snapshot; stays valid (and unchanged) across later mutations.
    pub fn snapshot(&self) -> Arc<TimelineCache<V>> {
        Arc::clone(&self.cache)
    }

    pub fn range(&self) -> Option<TimeRange> {
        self.cache.range()
    }

    pub fn start(&self) -> Millis {
        self.range().map_or(Millis(0), |r| r.start)
    }

    pub fn end(&self) -> Millis {
        self.range().map_or(Millis(0), |r| r.end)
    }

    /// Values this actor's keyframes produce at `t`, without touching the live state.
    pub fn evaluate<L, R>(
        &self,
        app: &StateApplicator<L, R>,
        t: f64,
    ) -> KeyholdResult<PropertyUpdates<V>>
    where
        L: SegmentLocator,
        R: ValueResolver<V>,
    {
        app.evaluate(&self.cache, t)
    }

    /// Apply the values at `t` to the live state; returns how many properties changed.
    #[tracing::instrument(level = "debug", skip(self, app), fields(actor = %self.name))]
    pub fn update_state<L, R>(
        &mut self,
        app: &StateApplicator<L, R>,
        t: f64,
    ) -> KeyholdResult<usize>
    where
        L: SegmentLocator,
        R: ValueResolver<V>,
    {
        app.apply(&self.cache, t, &mut self.state)
    }

    pub fn get(&self, property: &str) -> Option<&V> {
        self.state.get(property)
    }

    pub fn state(&self) -> &BTreeMap<String, V> {
        &self.state
    }
}

pub(crate) fn check_property_name(property: &str) -> KeyholdResult<()> {
    if property.trim().is_empty() {
        return Err(KeyholdError::validation(format!(
            "property name must be non-empty, got {property:?}"
        )));
    }
    Ok(())
}

impl<V> StateSink<V> for Actor<V> {
    fn set(&mut self, property: &str, value: V) {
        self.state.insert(property.to_string(), value);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/actor.rs"]
mod tests;
