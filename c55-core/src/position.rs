//! Conversions between floating point world positions and the integer grid of map nodes.

use std::fmt::{self, Display};

use glam::{I16Vec3, Vec3};

/// Size of a node in rendering units.
pub const BS: f32 = 10.0;

/// The coordinates of a single node within the world
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MapNodePos(pub I16Vec3);

impl MapNodePos {
    /// Position of the map node at the world's center
    pub const ZERO: Self = Self(I16Vec3::ZERO);
    /// Position of the map node with the lowest possible coordinates.
    pub const MIN: Self = Self(I16Vec3::MIN);
    /// Position of the map node with the highest possible coordinates.
    pub const MAX: Self = Self(I16Vec3::MAX);

    /// Returns the node containing the given world position.
    ///
    /// Each coordinate is rounded half away from zero, so a position exactly between two nodes
    /// belongs to the one farther from the origin. Positions beyond the map saturate at its
    /// border.
    #[must_use]
    pub fn from_world(position: Vec3) -> Self {
        let half = Vec3::select(
            position.cmpgt(Vec3::ZERO),
            Vec3::splat(BS / 2.0),
            Vec3::splat(-BS / 2.0),
        );
        // `as` truncates towards zero
        Self(((position + half) / BS).as_i16vec3())
    }

    /// Returns the world position of this node's center.
    #[must_use]
    pub fn to_world(self) -> Vec3 {
        self.0.as_vec3() * BS
    }
}

/// Returns the integer position of the node at the given floating point position.
#[must_use]
pub fn float_to_grid(position: Vec3) -> MapNodePos {
    MapNodePos::from_world(position)
}

/// Returns the floating point position of the given node's center.
#[must_use]
pub fn grid_to_float(position: MapNodePos) -> Vec3 {
    position.to_world()
}

impl Display for MapNodePos {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

impl From<MapNodePos> for I16Vec3 {
    fn from(value: MapNodePos) -> Self {
        value.0
    }
}

impl From<I16Vec3> for MapNodePos {
    fn from(value: I16Vec3) -> Self {
        Self(value)
    }
}
