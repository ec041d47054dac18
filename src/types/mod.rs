//! Shared types used throughout the library.

mod direction;
mod transform;

pub use direction::{Axis, Direction};
pub use transform::{BlockTransform, ElementRotation};

use std::collections::BTreeMap;
use std::fmt;

/// Namespace used when a resource location omits one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Identity of a texture, blockstate or model in the merged pack view.
///
/// Both parts are lower-cased and paths always use `/` separators, so keys
/// built from file system paths and keys parsed from JSON compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    namespace: String,
    path: String,
}

impl ResourceKey {
    pub fn new(namespace: impl AsRef<str>, path: impl AsRef<str>) -> Self {
        Self {
            namespace: namespace.as_ref().to_lowercase(),
            path: normalize_path(path.as_ref()),
        }
    }

    /// Parse a resource location.
    /// "minecraft:block/stone" -> ("minecraft", "block/stone")
    /// "block/stone" -> ("minecraft", "block/stone")
    pub fn parse(location: &str) -> Self {
        match location.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::new(DEFAULT_NAMESPACE, location),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
        .to_lowercase()
}

/// A resolved block state, used as the identity of a built model.
///
/// Properties are kept sorted so two states with the same properties hash
/// identically regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockState {
    /// Block name, e.g., "minecraft:stone"
    pub name: String,
    /// Block properties, e.g., {"facing": "north"}
    pub properties: BTreeMap<String, String>,
}

impl BlockState {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Get the namespace (e.g., "minecraft").
    pub fn namespace(&self) -> &str {
        self.name
            .split_once(':')
            .map(|(namespace, _)| namespace)
            .unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Get the block ID without namespace (e.g., "stone").
    pub fn block_id(&self) -> &str {
        self.name
            .split_once(':')
            .map(|(_, id)| id)
            .unwrap_or(&self.name)
    }

    /// Key of this block's blockstate descriptor.
    pub fn blockstate_key(&self) -> ResourceKey {
        ResourceKey::new(self.namespace(), self.block_id())
    }

    /// Build a property string for variant lookup.
    /// e.g., {"facing": "north", "half": "bottom"} -> "facing=north,half=bottom"
    pub fn property_string(&self) -> String {
        self.properties
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for BlockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.properties.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}[{}]", self.name, self.property_string())
        }
    }
}

/// Which faces of a model the builder should emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FaceMode {
    /// Only faces that carry a cullface (block boundary faces).
    Culled,
    /// Only faces without a cullface (interior geometry).
    Interior,
    /// Every face.
    #[default]
    All,
}

impl FaceMode {
    /// Whether a face with the given cullface passes this filter.
    pub fn includes(&self, cullface: Option<Direction>) -> bool {
        match self {
            FaceMode::Culled => cullface.is_some(),
            FaceMode::Interior => cullface.is_none(),
            FaceMode::All => true,
        }
    }
}
