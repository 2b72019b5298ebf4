//! Contains a single `MapNode` which is the fundamental building block (voxel, cube) of a c55
//! world.

use glam::I16Vec3;

use crate::{
    content_features::{AuxKind, ContentFeatures, Solidness},
    content_id::ContentId,
    direction::PackedDirection,
    light::LIGHT_MASK,
    serialization::{NodeSerializer, SerializationError},
};

/// A single map node with its parameters.
///
/// The default node is `AIR` with all parameters being zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapNode {
    /// describes the _material_ this node is made of.
    pub content_id: ContentId,
    /// Content-dependent auxiliary parameter.
    ///
    /// For content that propagates light, this holds the light intensity in its lower 4 bits,
    /// stored logarithmically from 0 to `LIGHT_MAX`. Sunlight is `LIGHT_SUN`.
    pub param: i8,
    /// Either the pressure of a liquid or the direction of a directional node, depending on the
    /// content. See `NodeAux`.
    aux: u8,
}

/// The content-dependent meaning of a node's auxiliary byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeAux {
    /// The content doesn't use the byte. The raw value is still kept.
    Unused(u8),
    /// Pressure of a liquid.
    Pressure(u8),
    /// Facing of a directional node, e.g. the wall a torch is attached to.
    Direction(PackedDirection),
}

impl MapNode {
    /// Creates a node from its raw parts.
    #[must_use]
    pub const fn new(content_id: ContentId, param: i8, aux: u8) -> Self {
        Self {
            content_id,
            param,
            aux,
        }
    }

    /// Creates a node which faces the given direction. The direction is dropped if the content
    /// isn't directional.
    #[must_use]
    pub fn with_direction(content_id: ContentId, direction: I16Vec3) -> Self {
        let mut node = Self::new(content_id, 0, 0);
        node.set_direction(direction);
        node
    }

    /// Returns the features of this node's content.
    #[must_use]
    pub fn features(&self) -> &'static ContentFeatures {
        self.content_id.features()
    }

    /// If true, light passes through this node and its level is stored in `param`.
    #[must_use]
    pub fn light_propagates(&self) -> bool {
        self.features().light_propagates()
    }

    /// If true, sunlight passes through this node without losing intensity.
    #[must_use]
    pub fn sunlight_propagates(&self) -> bool {
        self.features().sunlight_propagates()
    }

    /// Solidness of this node's content.
    #[must_use]
    pub fn solidness(&self) -> Solidness {
        self.features().solidness
    }

    /// Note that a node that isn't `light_propagates()` can be a light source.
    #[must_use]
    pub fn light_source(&self) -> u8 {
        self.features().light_source
    }

    /// Returns the brightest of light source and propagated light.
    #[must_use]
    pub fn light(&self) -> u8 {
        let stored = if self.light_propagates() {
            self.param_byte() & LIGHT_MASK
        } else {
            0
        };
        stored.max(self.light_source())
    }

    /// Stores a light level in `param`, replacing all of its bits.
    ///
    /// Nodes which don't let light pass can't store light; for them this does nothing.
    pub fn set_light(&mut self, light: u8) {
        if !self.light_propagates() {
            return;
        }
        self.param = param_from_byte(light);
    }

    /// `param` reinterpreted as an unsigned byte
    #[must_use]
    pub fn param_byte(&self) -> u8 {
        param_to_byte(self.param)
    }

    /// The auxiliary byte interpreted according to this node's content.
    #[must_use]
    pub fn aux(&self) -> NodeAux {
        match self.features().aux_kind() {
            AuxKind::Unused => NodeAux::Unused(self.aux),
            AuxKind::Pressure => NodeAux::Pressure(self.aux),
            AuxKind::Direction => NodeAux::Direction(PackedDirection::from_raw(self.aux)),
        }
    }

    /// The auxiliary byte without any interpretation.
    #[must_use]
    pub fn aux_raw(&self) -> u8 {
        self.aux
    }

    /// Overwrites the auxiliary byte without any interpretation.
    pub fn set_aux_raw(&mut self, aux: u8) {
        self.aux = aux;
    }

    /// Stores the pressure of a liquid node.
    ///
    /// Returns `false` without changing anything if the content isn't a liquid.
    pub fn set_pressure(&mut self, pressure: u8) -> bool {
        if self.features().aux_kind() != AuxKind::Pressure {
            return false;
        }
        self.aux = pressure;
        true
    }

    /// Stores the direction of a directional node.
    ///
    /// Returns `false` without changing anything if the content isn't directional.
    pub fn set_direction(&mut self, direction: I16Vec3) -> bool {
        if self.features().aux_kind() != AuxKind::Direction {
            return false;
        }
        self.aux = PackedDirection::pack(direction).into();
        true
    }

    /// Number of bytes `serialize` writes for the given version.
    ///
    /// # Errors
    ///
    /// Fails if `version` is not supported by `SerializationVersions::DEFAULT`.
    pub fn serialized_length(version: u8) -> Result<usize, SerializationError> {
        NodeSerializer::default().serialized_length(version)
    }

    /// Writes this node into the beginning of `dest`, using the layout of the given version.
    ///
    /// # Errors
    ///
    /// Fails if `version` is not supported by `SerializationVersions::DEFAULT` or if `dest` is
    /// too short.
    pub fn serialize(&self, dest: &mut [u8], version: u8) -> Result<(), SerializationError> {
        NodeSerializer::default().serialize(self, dest, version)
    }

    /// Reads a node from the beginning of `source`, using the layout of the given version.
    ///
    /// # Errors
    ///
    /// Fails if `version` is not supported by `SerializationVersions::DEFAULT` or if `source` is
    /// too short.
    pub fn deserialize(source: &[u8], version: u8) -> Result<Self, SerializationError> {
        NodeSerializer::default().deserialize(source, version)
    }
}

#[expect(clippy::cast_possible_wrap, reason = "param is a raw byte")]
pub(crate) const fn param_from_byte(byte: u8) -> i8 {
    byte as i8
}

#[expect(clippy::cast_sign_loss, reason = "param is a raw byte")]
pub(crate) const fn param_to_byte(param: i8) -> u8 {
    param as u8
}
