//! Walking a pack directory for textures, blockstates and models.

use crate::error::{IoResultExt, Result};
use crate::pack::Pack;
use crate::types::ResourceKey;
use std::path::{Path, PathBuf};

/// What to collect from a pack.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Texture subdirectories that never hold block or item textures.
    pub skipped_texture_dirs: Vec<String>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            skipped_texture_dirs: vec!["gui".to_string(), "font".to_string()],
        }
    }
}

/// Files found in a single pack, keyed the way the index keys them.
#[derive(Debug, Clone, Default)]
pub struct PackAssets {
    pub textures: Vec<(ResourceKey, PathBuf)>,
    pub blockstates: Vec<(ResourceKey, PathBuf)>,
    pub models: Vec<(ResourceKey, PathBuf)>,
}

/// Collect the asset files of one pack.
///
/// Layout: `assets/<namespace>/{textures/**.png, blockstates/*.json, models/**.json}`.
/// Entries are sorted by key so results do not depend on directory order.
pub fn scan_pack(pack: &Pack, options: &ScanOptions) -> Result<PackAssets> {
    let mut assets = PackAssets::default();

    let assets_path = pack.assets_dir();
    if !assets_path.is_dir() {
        return Ok(assets);
    }

    for namespace_entry in std::fs::read_dir(&assets_path).at_path(&assets_path)? {
        let namespace_entry = namespace_entry.at_path(&assets_path)?;
        if !namespace_entry
            .file_type()
            .at_path(&namespace_entry.path())?
            .is_dir()
        {
            continue;
        }

        let namespace = namespace_entry.file_name().to_string_lossy().to_string();
        let namespace_path = namespace_entry.path();

        let textures_path = namespace_path.join("textures");
        if textures_path.is_dir() {
            collect_recursive(&textures_path, &textures_path, "png", &mut |relative, path| {
                let skipped = relative
                    .split('/')
                    .next()
                    .map(|top| options.skipped_texture_dirs.iter().any(|d| d == top))
                    .unwrap_or(false);
                // A file directly under textures/ has no directory to skip.
                if !skipped || !relative.contains('/') {
                    assets
                        .textures
                        .push((ResourceKey::new(&namespace, relative), path));
                }
            })?;
        }

        let blockstates_path = namespace_path.join("blockstates");
        if blockstates_path.is_dir() {
            for entry in std::fs::read_dir(&blockstates_path).at_path(&blockstates_path)? {
                let path = entry.at_path(&blockstates_path)?.path();
                if path.is_file() && has_extension(&path, "json") {
                    if let Some(stem) = path.file_stem() {
                        let key = ResourceKey::new(&namespace, stem.to_string_lossy());
                        assets.blockstates.push((key, path));
                    }
                }
            }
        }

        let models_path = namespace_path.join("models");
        if models_path.is_dir() {
            collect_recursive(&models_path, &models_path, "json", &mut |relative, path| {
                assets.models.push((ResourceKey::new(&namespace, relative), path));
            })?;
        }
    }

    assets.textures.sort();
    assets.blockstates.sort();
    assets.models.sort();
    Ok(assets)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().map(|e| e == extension).unwrap_or(false)
}

/// Visit files with the given extension below `dir`, passing the path
/// relative to `base` with the extension stripped and `/` separators.
fn collect_recursive<F>(base: &Path, dir: &Path, extension: &str, handler: &mut F) -> Result<()>
where
    F: FnMut(&str, PathBuf),
{
    for entry in std::fs::read_dir(dir).at_path(dir)? {
        let path = entry.at_path(dir)?.path();

        if path.is_dir() {
            collect_recursive(base, &path, extension, handler)?;
        } else if has_extension(&path, extension) {
            let Ok(relative) = path.strip_prefix(base) else {
                continue;
            };
            let relative = relative
                .with_extension("")
                .to_string_lossy()
                .replace('\\', "/");
            handler(&relative, path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"{}").unwrap();
    }

    fn make_pack(root: &Path) -> Pack {
        std::fs::write(root.join("pack.mcmeta"), r#"{"pack": {"pack_format": 15}}"#).unwrap();
        Pack::open(root)
    }

    #[test]
    fn test_scan_layout() {
        let dir = tempfile::tempdir().unwrap();
        let ns = dir.path().join("assets").join("minecraft");
        touch(&ns.join("textures/block/stone.png"));
        touch(&ns.join("textures/item/apple.png"));
        touch(&ns.join("textures/block/stone.png.mcmeta"));
        touch(&ns.join("blockstates/stone.json"));
        touch(&ns.join("blockstates/nested/ignored.json"));
        touch(&ns.join("models/block/stone.json"));
        touch(&ns.join("models/block/cube/all.json"));
        touch(&ns.join("models/readme.txt"));

        let assets = scan_pack(&make_pack(dir.path()), &ScanOptions::default()).unwrap();

        let textures: Vec<_> = assets.textures.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(textures, vec!["minecraft:block/stone", "minecraft:item/apple"]);

        let blockstates: Vec<_> = assets.blockstates.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(blockstates, vec!["minecraft:stone"]);

        let models: Vec<_> = assets.models.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(models, vec!["minecraft:block/cube/all", "minecraft:block/stone"]);

        assert_eq!(assets.textures[0].1, ns.join("textures/block/stone.png"));
    }

    #[test]
    fn test_skips_gui_and_font() {
        let dir = tempfile::tempdir().unwrap();
        let ns = dir.path().join("assets").join("minecraft");
        touch(&ns.join("textures/gui/widgets.png"));
        touch(&ns.join("textures/font/ascii.png"));
        touch(&ns.join("textures/guide/page.png"));
        touch(&ns.join("textures/block/stone.png"));

        let assets = scan_pack(&make_pack(dir.path()), &ScanOptions::default()).unwrap();
        let textures: Vec<_> = assets.textures.iter().map(|(k, _)| k.path().to_string()).collect();
        assert_eq!(textures, vec!["block/stone", "guide/page"]);
    }

    #[test]
    fn test_multiple_namespaces() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("assets/minecraft/blockstates/stone.json"));
        touch(&dir.path().join("assets/mymod/blockstates/stone.json"));
        touch(&dir.path().join("assets/not_a_namespace.txt"));

        let assets = scan_pack(&make_pack(dir.path()), &ScanOptions::default()).unwrap();
        let keys: Vec<_> = assets.blockstates.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["minecraft:stone", "mymod:stone"]);
    }

    #[test]
    fn test_no_assets_dir() {
        let dir = tempfile::tempdir().unwrap();
        let assets = scan_pack(&make_pack(dir.path()), &ScanOptions::default()).unwrap();
        assert!(assets.textures.is_empty());
        assert!(assets.models.is_empty());
    }
}
