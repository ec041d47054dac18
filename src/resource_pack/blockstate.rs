//! Blockstate descriptors (`blockstates/*.json`).
//!
//! A blockstate maps a block's properties to one or more models, either as
//! "variants" keyed by property strings or as conditional "multipart" cases.

use crate::types::ResourceKey;
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub enum BlockstateDefinition {
    Variants(HashMap<String, Vec<ModelVariant>>),
    Multipart(Vec<MultipartCase>),
}

impl<'de> Deserialize<'de> for BlockstateDefinition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawBlockstate {
            variants: Option<HashMap<String, OneOrMany>>,
            multipart: Option<Vec<MultipartCase>>,
        }

        let raw = RawBlockstate::deserialize(deserializer)?;
        Ok(match (raw.variants, raw.multipart) {
            (Some(variants), _) => BlockstateDefinition::Variants(
                variants.into_iter().map(|(k, v)| (k, v.into_vec())).collect(),
            ),
            (None, Some(cases)) => BlockstateDefinition::Multipart(cases),
            (None, None) => BlockstateDefinition::Variants(HashMap::new()),
        })
    }
}

/// A single model or a weighted list of models.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(ModelVariant),
    Many(Vec<ModelVariant>),
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<ModelVariant> {
        match self {
            OneOrMany::One(v) => vec![v],
            OneOrMany::Many(v) => v,
        }
    }

    pub fn as_slice(&self) -> &[ModelVariant] {
        match self {
            OneOrMany::One(v) => std::slice::from_ref(v),
            OneOrMany::Many(v) => v,
        }
    }
}

/// A model reference with the rotation to apply to it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelVariant {
    pub model: String,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub uvlock: bool,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl ModelVariant {
    pub fn model_key(&self) -> ResourceKey {
        ResourceKey::parse(&self.model)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MultipartCase {
    #[serde(default)]
    pub when: Option<MultipartCondition>,
    pub apply: OneOrMany,
}

/// Condition deciding whether a multipart case applies.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
#[allow(non_snake_case)]
pub enum MultipartCondition {
    Or { OR: Vec<MultipartCondition> },
    And { AND: Vec<MultipartCondition> },
    Simple(HashMap<String, serde_json::Value>),
}

impl MultipartCondition {
    pub fn matches(&self, properties: &BTreeMap<String, String>) -> bool {
        match self {
            MultipartCondition::Or { OR: any } => any.iter().any(|c| c.matches(properties)),
            MultipartCondition::And { AND: all } => all.iter().all(|c| c.matches(properties)),
            MultipartCondition::Simple(cond) => cond.iter().all(|(key, expected)| {
                let expected = match expected {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                // "north|south" accepts either value
                let mut allowed = expected.split('|');
                match properties.get(key) {
                    Some(actual) => allowed.any(|v| v == actual),
                    // Missing properties are assumed to hold their default.
                    None => allowed.any(is_default_value),
                }
            }),
        }
    }
}

fn is_default_value(value: &str) -> bool {
    matches!(value, "false" | "none" | "0" | "normal" | "bottom" | "floor")
}
