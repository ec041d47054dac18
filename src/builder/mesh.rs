//! Quad geometry produced by [`BlockModelBuilder`](super::BlockModelBuilder).

use crate::resource_pack::{ModelElement, ModelFace};
use crate::types::{BlockTransform, Direction, ResourceKey};

/// One textured face of a block model, in block space (0..1).
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    /// Facing after the variant rotation.
    pub direction: Direction,
    /// Neighbour that hides this face, after the variant rotation.
    pub cullface: Option<Direction>,
    /// Corners in counter-clockwise order.
    pub positions: [[f32; 3]; 4],
    pub uvs: [[f32; 2]; 4],
    pub texture: ResourceKey,
    pub tint_index: i32,
    pub shade: bool,
    /// Whether the texture has any non-opaque pixel.
    pub transparent: bool,
}

impl Quad {
    pub(crate) fn from_face(
        element: &ModelElement,
        direction: Direction,
        face: &ModelFace,
        transform: &BlockTransform,
        texture: ResourceKey,
        transparent: bool,
    ) -> Self {
        let (from, to) = element.unit_bounds();
        let mut positions = face_corners(direction, from, to);

        if let Some(rotation) = &element.rotation {
            positions = positions.map(|p| rotation.apply(p));
        }
        positions = positions.map(|p| transform.apply(p));
        let facing = direction.rotate_by_transform(transform.x, transform.y);

        // UV lock pins the texture to the world instead of the rotated model.
        let uvs = if transform.uvlock && !transform.is_identity() {
            positions.map(|p| locked_uv(facing, p))
        } else {
            rotate_uvs(base_uvs(face.unit_uv()), face.rotation)
        };

        Self {
            direction: facing,
            cullface: face
                .cullface
                .map(|d| d.rotate_by_transform(transform.x, transform.y)),
            positions,
            uvs,
            texture,
            tint_index: face.tintindex,
            shade: element.shade,
            transparent,
        }
    }
}

/// The quads of one block state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockMesh {
    pub quads: Vec<Quad>,
}

impl BlockMesh {
    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    /// Whether any quad samples a texture with transparency.
    pub fn has_transparency(&self) -> bool {
        self.quads.iter().any(|q| q.transparent)
    }

    /// Distinct textures in first-use order.
    pub fn textures(&self) -> Vec<&ResourceKey> {
        let mut seen = Vec::new();
        for quad in &self.quads {
            if !seen.contains(&&quad.texture) {
                seen.push(&quad.texture);
            }
        }
        seen
    }
}

fn face_corners(direction: Direction, from: [f32; 3], to: [f32; 3]) -> [[f32; 3]; 4] {
    match direction {
        Direction::Down => [
            [from[0], from[1], to[2]],
            [to[0], from[1], to[2]],
            [to[0], from[1], from[2]],
            [from[0], from[1], from[2]],
        ],
        Direction::Up => [
            [from[0], to[1], from[2]],
            [to[0], to[1], from[2]],
            [to[0], to[1], to[2]],
            [from[0], to[1], to[2]],
        ],
        Direction::North => [
            [to[0], to[1], from[2]],
            [from[0], to[1], from[2]],
            [from[0], from[1], from[2]],
            [to[0], from[1], from[2]],
        ],
        Direction::South => [
            [from[0], to[1], to[2]],
            [to[0], to[1], to[2]],
            [to[0], from[1], to[2]],
            [from[0], from[1], to[2]],
        ],
        Direction::West => [
            [from[0], to[1], from[2]],
            [from[0], to[1], to[2]],
            [from[0], from[1], to[2]],
            [from[0], from[1], from[2]],
        ],
        Direction::East => [
            [to[0], to[1], to[2]],
            [to[0], to[1], from[2]],
            [to[0], from[1], from[2]],
            [to[0], from[1], to[2]],
        ],
    }
}

fn base_uvs(uv: [f32; 4]) -> [[f32; 2]; 4] {
    let [u1, v1, u2, v2] = uv;
    [[u1, v1], [u2, v1], [u2, v2], [u1, v2]]
}

/// Project a block-space point onto the texture plane of a face.
fn locked_uv(facing: Direction, p: [f32; 3]) -> [f32; 2] {
    let [x, y, z] = p;
    match facing {
        Direction::Down => [x, 1.0 - z],
        Direction::Up => [x, z],
        Direction::North => [1.0 - x, 1.0 - y],
        Direction::South => [x, 1.0 - y],
        Direction::West => [z, 1.0 - y],
        Direction::East => [1.0 - z, 1.0 - y],
    }
}

fn rotate_uvs(uvs: [[f32; 2]; 4], rotation: i32) -> [[f32; 2]; 4] {
    let steps = (rotation / 90).rem_euclid(4);
    let mut result = uvs;
    for _ in 0..steps {
        result = [result[3], result[0], result[1], result[2]];
    }
    result
}
