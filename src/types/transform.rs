//! Blockstate variant rotation and model element rotation.

use super::Axis;
use glam::{Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// Rotation taken from a blockstate variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockTransform {
    /// X rotation in degrees (0, 90, 180, 270).
    pub x: i32,
    /// Y rotation in degrees (0, 90, 180, 270).
    pub y: i32,
    /// If true, UV coordinates don't rotate with the block.
    pub uvlock: bool,
}

impl BlockTransform {
    pub fn new(x: i32, y: i32, uvlock: bool) -> Self {
        Self { x, y, uvlock }
    }

    pub fn is_identity(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Rotate a point in block space (0..1) around the block center.
    ///
    /// Minecraft rotates clockwise while glam follows the right-hand rule,
    /// hence the negated angles.
    pub fn apply(&self, point: [f32; 3]) -> [f32; 3] {
        if self.is_identity() {
            return point;
        }
        let rotation = Mat3::from_rotation_y((-self.y as f32).to_radians())
            * Mat3::from_rotation_x((-self.x as f32).to_radians());
        let center = Vec3::splat(0.5);
        let rotated = rotation * (Vec3::from(point) - center) + center;
        rotated.to_array()
    }
}

/// Rotation of a single model element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementRotation {
    /// Origin point for rotation (in 0-16 Minecraft coordinates).
    #[serde(default = "default_origin")]
    pub origin: [f32; 3],
    pub axis: Axis,
    /// Rotation angle in degrees (-45 to 45, in 22.5 increments).
    pub angle: f32,
    #[serde(default)]
    pub rescale: bool,
}

fn default_origin() -> [f32; 3] {
    [8.0, 8.0, 8.0]
}

impl ElementRotation {
    /// Rotate a point in block space (0..1) around this rotation's origin.
    pub fn apply(&self, point: [f32; 3]) -> [f32; 3] {
        let origin = Vec3::from(self.origin) / 16.0;
        let angle = self.angle.to_radians();
        let matrix = match self.axis {
            Axis::X => Mat3::from_rotation_x(angle),
            Axis::Y => Mat3::from_rotation_y(angle),
            Axis::Z => Mat3::from_rotation_z(angle),
        };
        let mut rotated = matrix * (Vec3::from(point) - origin);

        if self.rescale && angle.cos().abs() > f32::EPSILON {
            let factor = 1.0 / angle.cos();
            let scale = match self.axis {
                Axis::X => Vec3::new(1.0, factor, factor),
                Axis::Y => Vec3::new(factor, 1.0, factor),
                Axis::Z => Vec3::new(factor, factor, 1.0),
            };
            rotated *= scale;
        }

        (rotated + origin).to_array()
    }
}
