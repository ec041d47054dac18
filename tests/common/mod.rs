//! Fixture packs written into temporary directories.

#![allow(dead_code)]

use filetime::FileTime;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use pack_stack::resource_pack::TransparencyProbe;
use pack_stack::{ImageProbe, Result};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct PackDir {
    root: PathBuf,
}

impl PackDir {
    pub fn new(root: impl Into<PathBuf>, format: u32) -> Self {
        let root = root.into();
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(
            root.join("pack.mcmeta"),
            format!(
                r#"{{"pack": {{"pack_format": {}, "description": "fixture"}}}}"#,
                format
            ),
        )
        .unwrap();
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn asset(&self, namespace: &str, relative: &str) -> PathBuf {
        let path = self.root.join("assets").join(namespace).join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        path
    }

    /// RGBA texture filled with one alpha value.
    pub fn rgba_texture(&self, namespace: &str, name: &str, alpha: u8) -> PathBuf {
        let path = self.asset(namespace, &format!("textures/{}.png", name));
        RgbaImage::from_pixel(4, 4, Rgba([120, 120, 120, alpha]))
            .save(&path)
            .unwrap();
        path
    }

    /// RGBA texture that is opaque except for a single pixel.
    pub fn one_clear_pixel_texture(&self, namespace: &str, name: &str) -> PathBuf {
        let path = self.asset(namespace, &format!("textures/{}.png", name));
        let mut img = RgbaImage::from_pixel(4, 4, Rgba([120, 120, 120, 255]));
        img.put_pixel(3, 2, Rgba([120, 120, 120, 254]));
        img.save(&path).unwrap();
        path
    }

    /// RGB texture with no alpha channel.
    pub fn rgb_texture(&self, namespace: &str, name: &str) -> PathBuf {
        let path = self.asset(namespace, &format!("textures/{}.png", name));
        RgbImage::from_pixel(4, 4, Rgb([10, 200, 10])).save(&path).unwrap();
        path
    }

    /// 1x1 fully transparent texture.
    pub fn clear_texture(&self, namespace: &str, name: &str) -> PathBuf {
        let path = self.asset(namespace, &format!("textures/{}.png", name));
        RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0])).save(&path).unwrap();
        path
    }

    pub fn blockstate(&self, namespace: &str, block: &str, json: &str) -> PathBuf {
        let path = self.asset(namespace, &format!("blockstates/{}.json", block));
        std::fs::write(&path, json).unwrap();
        path
    }

    pub fn model(&self, namespace: &str, name: &str, json: &str) -> PathBuf {
        let path = self.asset(namespace, &format!("models/{}.json", name));
        std::fs::write(&path, json).unwrap();
        path
    }

    /// A full cube block: blockstate, `cube_all` style model and texture.
    pub fn cube_block(&self, block: &str, texture: &str) {
        self.blockstate(
            "minecraft",
            block,
            &format!(r#"{{"variants": {{"": {{"model": "block/{}"}}}}}}"#, block),
        );
        self.model("minecraft", "block/cube_all", CUBE_ALL);
        self.model(
            "minecraft",
            &format!("block/{}", block),
            &format!(
                r#"{{"parent": "block/cube_all", "textures": {{"all": "{}"}}}}"#,
                texture
            ),
        );
    }
}

pub const CUBE_ALL: &str = r##"{
    "textures": { "particle": "#all" },
    "elements": [{
        "from": [0, 0, 0], "to": [16, 16, 16],
        "faces": {
            "down":  { "texture": "#all", "cullface": "down" },
            "up":    { "texture": "#all", "cullface": "up" },
            "north": { "texture": "#all", "cullface": "north" },
            "south": { "texture": "#all", "cullface": "south" },
            "west":  { "texture": "#all", "cullface": "west" },
            "east":  { "texture": "#all", "cullface": "east" }
        }
    }]
}"##;

/// Push a file's modification time to a fixed point.
pub fn set_mtime(path: &Path, unix_seconds: i64) {
    filetime::set_file_mtime(path, FileTime::from_unix_time(unix_seconds, 0)).unwrap();
}

/// Decodes through [`ImageProbe`] and counts decodes.
#[derive(Clone, Default)]
pub struct CountingProbe {
    calls: Arc<AtomicUsize>,
}

impl CountingProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
    }
}

impl TransparencyProbe for CountingProbe {
    fn probe(&self, path: &Path) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ImageProbe.probe(path)
    }
}
