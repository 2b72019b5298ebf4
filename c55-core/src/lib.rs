//! Contains the map node of a c55 world together with everything derived from a single node:
//! classification of its content, face decisions between neighbors, light levels, packed
//! directions and the versioned binary format.

mod content_features;
mod content_id;
mod direction;
mod face;
pub mod light;
mod map_node;
pub mod position;
pub mod serialization;

pub use content_features::*;
pub use content_id::*;
pub use direction::*;
pub use face::*;
pub use map_node::*;
pub use position::{MapNodePos, float_to_grid, grid_to_float};
pub use serialization::{NodeSerializer, SerializationError, SerializationVersions};
