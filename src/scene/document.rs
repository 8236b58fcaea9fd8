use std::{collections::BTreeMap, path::Path};

use anyhow::Context as _;

use crate::{
    animation::chain::{KeyframeEntry, PropertyChain},
    animation::value::Value,
    eval::opts::EvalOpts,
    foundation::core::Millis,
    foundation::error::{KeyholdError, KeyholdResult},
    scene::actor::{Actor, EasingSpec, check_property_name},
    scene::stage::Stage,
};

/// JSON authoring format for a whole stage.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SceneDoc {
    /// Evaluation settings; omitted fields keep their defaults.
    #[serde(default)]
    pub opts: EvalOpts,
    pub actors: Vec<ActorDoc>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ActorDoc {
    pub name: String,
    #[serde(default)]
    pub keyframes: Vec<KeyframeDoc>,
}

/// One authored keyframe: a time, the properties sampled there and their easings.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct KeyframeDoc {
    pub ms: Millis,
    pub properties: BTreeMap<String, Value>,
    #[serde(default)]
    pub easing: EasingSpec,
}

impl SceneDoc {
    pub fn from_json_str(s: &str) -> KeyholdResult<Self> {
        serde_json::from_str(s).map_err(|e| KeyholdError::serde(format!("scene document: {e}")))
    }

    pub fn from_path(path: &Path) -> KeyholdResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Build every actor.
    ///
    /// Actor names must be unique. Unlike [`Actor::keyframe`], two keyframes of one actor
    /// that set the same property at the same time are not merged; they fail with
    /// [`KeyholdError::InvalidTimelineState`].
    #[tracing::instrument(skip(self), fields(actors = self.actors.len()))]
    pub fn into_stage(self) -> KeyholdResult<Stage<Value>> {
        let mut stage = Stage::new(self.opts);
        for actor in self.actors {
            if stage.find(&actor.name).is_some() {
                return Err(KeyholdError::validation(format!(
                    "duplicate actor name '{}'",
                    actor.name
                )));
            }
            stage.add_actor(actor.into_actor()?);
        }
        Ok(stage)
    }
}

impl ActorDoc {
    pub fn into_actor(self) -> KeyholdResult<Actor<Value>> {
        let mut per_property: BTreeMap<String, Vec<KeyframeEntry<Value>>> = BTreeMap::new();
        for kf in self.keyframes {
            for (property, value) in kf.properties {
                check_property_name(&property)?;
                let easing = kf.easing.get(&property).unwrap_or_default();
                per_property
                    .entry(property)
                    .or_default()
                    .push(KeyframeEntry::new(kf.ms, value, easing));
            }
        }
        let chains = per_property
            .into_iter()
            .map(|(property, entries)| PropertyChain::from_entries(property, entries));
        Actor::with_chains(self.name, chains)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/document.rs"]
mod tests;
