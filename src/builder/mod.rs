//! Turning a resource view into built models.
//!
//! The resolver memoizes whatever a [`ModelBuilder`] produces; the builder
//! itself is stateless and only reads through the [`ResourceView`] it is
//! handed. [`BlockModelBuilder`] is the default: it maps a [`BlockState`] to
//! the quads of every model its blockstate selects.

pub mod mesh;
pub mod model_resolver;
pub mod state_resolver;

pub use mesh::{BlockMesh, Quad};
pub use model_resolver::{resolve_model, MAX_INHERITANCE_DEPTH};
pub use state_resolver::resolve_variants;

use crate::error::Result;
use crate::resolver::ResourceView;
use crate::resource_pack::missing_texture_key;
use crate::types::{BlockState, BlockTransform, Direction, FaceMode};
use std::fmt::Debug;
use std::hash::Hash;
use tracing::debug;

/// Builds a model for an entity from the current resource view.
pub trait ModelBuilder: Send + Sync {
    type Entity: Clone + Eq + Hash + Debug + Send + Sync;
    type Model: Clone + Send + Sync;

    fn build(
        &self,
        view: &ResourceView<'_>,
        entity: &Self::Entity,
        face_mode: FaceMode,
    ) -> Result<Self::Model>;
}

/// Builds the quads of a block state from its blockstate and models.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockModelBuilder;

impl ModelBuilder for BlockModelBuilder {
    type Entity = BlockState;
    type Model = BlockMesh;

    fn build(
        &self,
        view: &ResourceView<'_>,
        block: &BlockState,
        face_mode: FaceMode,
    ) -> Result<BlockMesh> {
        let variants = resolve_variants(view, block)?;
        let mut mesh = BlockMesh::default();

        for variant in &variants {
            let model = resolve_model(view, &variant.model_key())?;
            let transform = BlockTransform::new(variant.x, variant.y, variant.uvlock);

            for element in &model.elements {
                // Fixed face order keeps output stable across runs.
                for direction in Direction::ALL {
                    let Some(face) = element.faces.get(&direction) else {
                        continue;
                    };
                    let cullface = face
                        .cullface
                        .map(|d| d.rotate_by_transform(transform.x, transform.y));
                    if !face_mode.includes(cullface) {
                        continue;
                    }

                    let texture = model
                        .resolve_texture(&face.texture)
                        .filter(|key| view.texture_location(key).is_some())
                        .unwrap_or_else(missing_texture_key);
                    let transparent = view.is_transparent(&texture)?;

                    mesh.quads.push(Quad::from_face(
                        element,
                        direction,
                        face,
                        &transform,
                        texture,
                        transparent,
                    ));
                }
            }
        }

        debug!(block = %block, ?face_mode, quads = mesh.len(), "built block mesh");
        Ok(mesh)
    }
}
