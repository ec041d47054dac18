//! Model descriptors (`models/**/*.json`).

use crate::types::{Direction, ElementRotation, ResourceKey};
use serde::Deserialize;
use std::collections::HashMap;

/// A block or item model, possibly inheriting from a parent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BlockModel {
    #[serde(default)]
    pub parent: Option<String>,

    /// Unset means inherit from the parent, and `true` at the root.
    #[serde(default, rename = "ambientocclusion")]
    pub ambient_occlusion: Option<bool>,

    /// Texture variables, e.g. `"all": "block/stone"` or `"side": "#all"`.
    #[serde(default)]
    pub textures: HashMap<String, String>,

    #[serde(default)]
    pub elements: Vec<ModelElement>,

    /// Display transforms, kept opaque.
    #[serde(default)]
    pub display: Option<serde_json::Value>,
}

fn default_true() -> bool {
    true
}

impl BlockModel {
    pub fn uses_ambient_occlusion(&self) -> bool {
        self.ambient_occlusion.unwrap_or(true)
    }

    pub fn parent_key(&self) -> Option<ResourceKey> {
        self.parent.as_deref().map(ResourceKey::parse)
    }

    /// Follow `#variable` references until a texture location is reached.
    ///
    /// Returns `None` for unbound or cyclic variables.
    pub fn resolve_texture(&self, reference: &str) -> Option<ResourceKey> {
        let mut current = reference;
        for _ in 0..=self.textures.len() {
            match current.strip_prefix('#') {
                Some(variable) => current = self.textures.get(variable).map(String::as_str)?,
                None => return Some(ResourceKey::parse(current)),
            }
        }
        None
    }
}

/// A cuboid element within a model.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelElement {
    /// Minimum corner (0-16 range).
    pub from: [f32; 3],
    /// Maximum corner (0-16 range).
    pub to: [f32; 3],
    #[serde(default)]
    pub rotation: Option<ElementRotation>,
    #[serde(default = "default_true")]
    pub shade: bool,
    #[serde(default)]
    pub faces: HashMap<Direction, ModelFace>,
}

impl ModelElement {
    /// Corners scaled into block space (0..1).
    pub fn unit_bounds(&self) -> ([f32; 3], [f32; 3]) {
        (self.from.map(|v| v / 16.0), self.to.map(|v| v / 16.0))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelFace {
    /// UV rectangle [u1, v1, u2, v2] in 0-16 range.
    #[serde(default)]
    pub uv: Option<[f32; 4]>,
    pub texture: String,
    #[serde(default)]
    pub cullface: Option<Direction>,
    #[serde(default)]
    pub rotation: i32,
    #[serde(default = "default_tint_index")]
    pub tintindex: i32,
}

fn default_tint_index() -> i32 {
    -1
}

impl ModelFace {
    /// UV rectangle in 0..1, defaulting to the full texture.
    pub fn unit_uv(&self) -> [f32; 4] {
        self.uv.unwrap_or([0.0, 0.0, 16.0, 16.0]).map(|v| v / 16.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_child_model() {
        let json = r#"{
            "parent": "block/cube_all",
            "textures": { "all": "block/stone" }
        }"#;

        let model: BlockModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.parent_key(), Some(ResourceKey::parse("block/cube_all")));
        assert_eq!(model.ambient_occlusion, None);
        assert!(model.uses_ambient_occlusion());
        assert!(model.elements.is_empty());
    }

    #[test]
    fn test_parse_elements() {
        let json = r##"{
            "ambientocclusion": false,
            "elements": [
                {
                    "from": [0, 0, 0],
                    "to": [16, 8, 16],
                    "rotation": { "origin": [8, 8, 8], "axis": "y", "angle": 45 },
                    "faces": {
                        "up":   { "texture": "#top", "cullface": "up", "tintindex": 0 },
                        "down": { "texture": "#bottom", "uv": [0, 0, 8, 8] }
                    }
                }
            ]
        }"##;

        let model: BlockModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.ambient_occlusion, Some(false));
        let element = &model.elements[0];
        assert_eq!(element.unit_bounds(), ([0.0, 0.0, 0.0], [1.0, 0.5, 1.0]));
        assert_eq!(element.rotation.as_ref().unwrap().angle, 45.0);

        let up = &element.faces[&Direction::Up];
        assert_eq!(up.cullface, Some(Direction::Up));
        assert_eq!(up.tintindex, 0);
        assert_eq!(up.unit_uv(), [0.0, 0.0, 1.0, 1.0]);

        let down = &element.faces[&Direction::Down];
        assert_eq!(down.tintindex, -1);
        assert_eq!(down.unit_uv(), [0.0, 0.0, 0.5, 0.5]);
    }

    #[test]
    fn test_resolve_texture_chain() {
        let model = BlockModel {
            textures: [
                ("all".to_string(), "block/stone".to_string()),
                ("side".to_string(), "#all".to_string()),
                ("loop_a".to_string(), "#loop_b".to_string()),
                ("loop_b".to_string(), "#loop_a".to_string()),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        };

        assert_eq!(model.resolve_texture("#side"), Some(ResourceKey::parse("block/stone")));
        assert_eq!(
            model.resolve_texture("mymod:block/dirt"),
            Some(ResourceKey::new("mymod", "block/dirt"))
        );
        assert_eq!(model.resolve_texture("#missing"), None);
        assert_eq!(model.resolve_texture("#loop_a"), None);
    }
}
