//! Model inheritance resolution.

use crate::error::{ResolverError, Result};
use crate::resolver::ResourceView;
use crate::resource_pack::BlockModel;
use crate::types::ResourceKey;

/// Maximum depth for model inheritance to prevent infinite loops.
pub const MAX_INHERITANCE_DEPTH: usize = 10;

/// Resolve a model with all inherited properties folded in.
///
/// The returned model has no parent. `builtin/` parents end the chain.
pub fn resolve_model(view: &ResourceView<'_>, key: &ResourceKey) -> Result<BlockModel> {
    resolve_at_depth(view, key, 0)
}

fn resolve_at_depth(view: &ResourceView<'_>, key: &ResourceKey, depth: usize) -> Result<BlockModel> {
    if depth >= MAX_INHERITANCE_DEPTH {
        return Err(ResolverError::ModelInheritanceTooDeep(key.to_string()));
    }

    let model = view
        .model(key)
        .ok_or_else(|| ResolverError::ModelResolution(format!("Model not found: {}", key)))?;

    let parent = match model.parent_key() {
        Some(parent) if !parent.path().starts_with("builtin/") => parent,
        _ => {
            let mut resolved = model.clone();
            resolved.parent = None;
            return Ok(resolved);
        }
    };

    let parent_model = resolve_at_depth(view, &parent, depth + 1)?;
    Ok(merge_models(parent_model, model))
}

/// Fold a child over its resolved parent. Child values win.
fn merge_models(parent: BlockModel, child: &BlockModel) -> BlockModel {
    let mut merged = parent;

    for (key, value) in &child.textures {
        merged.textures.insert(key.clone(), value.clone());
    }

    if !child.elements.is_empty() {
        merged.elements = child.elements.clone();
    }

    if child.ambient_occlusion.is_some() {
        merged.ambient_occlusion = child.ambient_occlusion;
    }

    // Display contexts merge per key so views defined only by the parent survive.
    merged.display = match (merged.display.take(), &child.display) {
        (Some(serde_json::Value::Object(mut parent_obj)), Some(serde_json::Value::Object(child_obj))) => {
            for (key, value) in child_obj {
                parent_obj.insert(key.clone(), value.clone());
            }
            Some(serde_json::Value::Object(parent_obj))
        }
        (_, Some(child_display)) => Some(child_display.clone()),
        (parent, None) => parent,
    };

    merged.parent = None;
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TransparencyCache;
    use crate::resource_pack::{PackAssets, ResourceIndex};

    fn index_with(models: &[(&str, &str)]) -> (tempfile::TempDir, ResourceIndex) {
        let dir = tempfile::tempdir().unwrap();
        let mut assets = PackAssets::default();
        for (i, (name, json)) in models.iter().enumerate() {
            let path = dir.path().join(format!("model_{}.json", i));
            std::fs::write(&path, json).unwrap();
            assets.models.push((ResourceKey::parse(name), path));
        }
        let mut index = ResourceIndex::new();
        index.apply(&assets);
        index.load_descriptors().unwrap();
        (dir, index)
    }

    fn resolve(index: &ResourceIndex, key: &str) -> Result<BlockModel> {
        let transparency = TransparencyCache::new();
        resolve_model(&ResourceView::new(index, &transparency), &ResourceKey::parse(key))
    }

    const CUBE: &str = r##"{
        "display": { "gui": { "rotation": [30, 225, 0] } },
        "elements": [{
            "from": [0, 0, 0], "to": [16, 16, 16],
            "faces": {
                "down":  { "texture": "#down", "cullface": "down" },
                "up":    { "texture": "#up", "cullface": "up" },
                "north": { "texture": "#north", "cullface": "north" },
                "south": { "texture": "#south", "cullface": "south" },
                "west":  { "texture": "#west", "cullface": "west" },
                "east":  { "texture": "#east", "cullface": "east" }
            }
        }]
    }"##;

    const CUBE_ALL: &str = r##"{
        "parent": "block/cube",
        "textures": {
            "particle": "#all", "down": "#all", "up": "#all",
            "north": "#all", "south": "#all", "west": "#all", "east": "#all"
        }
    }"##;

    const STONE: &str = r#"{
        "parent": "block/cube_all",
        "display": { "head": { "scale": [1, 1, 1] } },
        "textures": { "all": "block/stone" }
    }"#;

    #[test]
    fn test_resolve_simple_model() {
        let (_dir, index) = index_with(&[("block/cube", CUBE)]);
        let model = resolve(&index, "block/cube").unwrap();
        assert_eq!(model.elements.len(), 1);
        assert!(model.parent.is_none());
    }

    #[test]
    fn test_resolve_with_inheritance() {
        let (_dir, index) = index_with(&[
            ("block/cube", CUBE),
            ("block/cube_all", CUBE_ALL),
            ("block/stone", STONE),
        ]);
        let model = resolve(&index, "minecraft:block/stone").unwrap();

        assert!(model.parent.is_none());
        assert_eq!(model.elements.len(), 1);
        assert_eq!(model.textures["all"], "block/stone");
        assert_eq!(model.resolve_texture("#north"), Some(ResourceKey::parse("block/stone")));

        let display = model.display.unwrap();
        assert!(display.get("gui").is_some());
        assert!(display.get("head").is_some());
    }

    #[test]
    fn test_ambient_occlusion_inherits_unless_set() {
        let (_dir, index) = index_with(&[
            ("block/cross", r##"{ "ambientocclusion": false, "textures": { "particle": "#cross" } }"##),
            ("block/poppy", r#"{ "parent": "block/cross", "textures": { "cross": "block/poppy" } }"#),
            ("block/lit", r#"{ "parent": "block/cross", "ambientocclusion": true }"#),
        ]);
        assert!(!resolve(&index, "block/poppy").unwrap().uses_ambient_occlusion());
        assert!(resolve(&index, "block/lit").unwrap().uses_ambient_occlusion());
    }

    #[test]
    fn test_builtin_parent_ends_chain() {
        let (_dir, index) = index_with(&[(
            "item/generated",
            r#"{ "parent": "builtin/generated", "textures": { "layer0": "item/stick" } }"#,
        )]);
        let model = resolve(&index, "item/generated").unwrap();
        assert!(model.parent.is_none());
        assert_eq!(model.textures["layer0"], "item/stick");
    }

    #[test]
    fn test_missing_model() {
        let (_dir, index) = index_with(&[]);
        assert!(matches!(
            resolve(&index, "block/nonexistent"),
            Err(ResolverError::ModelResolution(_))
        ));
    }

    #[test]
    fn test_missing_parent() {
        let (_dir, index) = index_with(&[("block/stone", STONE)]);
        assert!(matches!(
            resolve(&index, "block/stone"),
            Err(ResolverError::ModelResolution(_))
        ));
    }

    #[test]
    fn test_circular_inheritance() {
        let (_dir, index) = index_with(&[
            ("block/a", r#"{ "parent": "block/b" }"#),
            ("block/b", r#"{ "parent": "block/a" }"#),
        ]);
        assert!(matches!(
            resolve(&index, "block/a"),
            Err(ResolverError::ModelInheritanceTooDeep(_))
        ));
    }
}
