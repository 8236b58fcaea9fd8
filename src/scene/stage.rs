use std::collections::BTreeMap;

use crate::{
    eval::applicator::{PropertyUpdates, StateApplicator},
    eval::opts::EvalOpts,
    eval::resolver::{OriginEasedResolver, ValueResolver},
    foundation::error::{KeyholdError, KeyholdResult},
    scene::actor::Actor,
    timeline::locator::{LocatorKind, SegmentLocator},
};

/// Stable handle for an actor on a [`Stage`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ActorId(pub u32);

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A set of actors evaluated with one shared applicator.
///
/// This is the host-facing surface: the authoring side calls [`Stage::rebuild`] after
/// editing keyframes, the playback side calls [`Stage::evaluate`] or [`Stage::update`]
/// once per tick.
#[derive(Clone, Debug)]
pub struct Stage<V, L = LocatorKind, R = OriginEasedResolver> {
    actors: BTreeMap<ActorId, Actor<V>>,
    next_id: u32,
    applicator: StateApplicator<L, R>,
}

impl<V: Clone> Stage<V> {
    pub fn new(opts: EvalOpts) -> Self {
        Self::with_applicator(StateApplicator::from_opts(opts))
    }
}

impl<V: Clone> Default for Stage<V> {
    fn default() -> Self {
        Self::new(EvalOpts::default())
    }
}

impl<V: Clone, L, R> Stage<V, L, R> {
    pub fn with_applicator(applicator: StateApplicator<L, R>) -> Self {
        Self {
            actors: BTreeMap::new(),
            next_id: 0,
            applicator,
        }
    }

    pub fn applicator(&self) -> &StateApplicator<L, R> {
        &self.applicator
    }

    pub fn add_actor(&mut self, actor: Actor<V>) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        self.actors.insert(id, actor);
        id
    }

    pub fn remove_actor(&mut self, id: ActorId) -> Option<Actor<V>> {
        self.actors.remove(&id)
    }

    pub fn actor(&self, id: ActorId) -> KeyholdResult<&Actor<V>> {
        self.actors
            .get(&id)
            .ok_or_else(|| KeyholdError::validation(format!("unknown actor {id}")))
    }

    pub fn actor_mut(&mut self, id: ActorId) -> KeyholdResult<&mut Actor<V>> {
        self.actors
            .get_mut(&id)
            .ok_or_else(|| KeyholdError::validation(format!("unknown actor {id}")))
    }

    /// First actor with the given name.
    pub fn find(&self, name: &str) -> Option<ActorId> {
        self.actors
            .iter()
            .find(|(_, a)| a.name() == name)
            .map(|(id, _)| *id)
    }

    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &Actor<V>)> {
        self.actors.iter().map(|(id, a)| (*id, a))
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Republish one actor's timeline snapshot from its chains.
    pub fn rebuild(&mut self, id: ActorId) -> KeyholdResult<()> {
        self.actor_mut(id)?.rebuild()
    }

    /// Values one actor's keyframes produce at `t`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn evaluate(&self, id: ActorId, t: f64) -> KeyholdResult<PropertyUpdates<V>>
    where
        L: SegmentLocator,
        R: ValueResolver<V>,
    {
        self.actor(id)?.evaluate(&self.applicator, t)
    }

    /// Apply the values at `t` to every actor's live state; stops at the first failure.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn update(&mut self, t: f64) -> KeyholdResult<()>
    where
        L: SegmentLocator,
        R: ValueResolver<V>,
    {
        for actor in self.actors.values_mut() {
            actor.update_state(&self.applicator, t)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/stage.rs"]
mod tests;
