//! The versioned binary format of a single map node.
//!
//! These functions are used when a single node crosses a persistence or network boundary, e.g.
//! when informing a client of a single node being added. The layout depends on the serialization
//! format version negotiated between both sides:
//!
//! | version | bytes | layout                 |
//! |---------|-------|------------------------|
//! | 0       | 1     | content                |
//! | 1       | 2     | content, param         |
//! | 2 – 9   | 2     | content, param         |
//! | ≥ 10    | 3     | content, param, aux    |
//!
//! Version 1 predates saved lighting; any light level transmitted with it is discarded.

use log::{debug, trace};

use crate::{
    content_id::ContentId,
    map_node::{MapNode, param_from_byte},
};

/// Marks a serialization format version that hasn't been negotiated (yet).
pub const SER_FMT_VER_INVALID: u8 = 255;
/// The oldest serialization format version understood by default.
pub const SER_FMT_VER_LOWEST: u8 = 0;
/// The newest serialization format version understood by default.
pub const SER_FMT_VER_HIGHEST: u8 = 10;

/// Errors of the node serialization.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// The requested format version is out of the supported range.
    #[error("map node format version {version} not supported (supported: {lowest}..={highest})")]
    VersionMismatch {
        /// the rejected version
        version: u8,
        /// oldest supported version
        lowest: u8,
        /// newest supported version
        highest: u8,
    },
    /// The buffer can't hold a node of the requested format version.
    #[error("buffer too short for a map node: {needed} bytes needed, {available} available")]
    BufferTooShort {
        /// serialized length of the node
        needed: usize,
        /// length of the given buffer
        available: usize,
    },
}

/// An inclusive range of supported serialization format versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SerializationVersions {
    lowest: u8,
    highest: u8,
}

impl SerializationVersions {
    /// `SER_FMT_VER_LOWEST..=SER_FMT_VER_HIGHEST`
    pub const DEFAULT: Self = Self {
        lowest: SER_FMT_VER_LOWEST,
        highest: SER_FMT_VER_HIGHEST,
    };

    /// Creates a new range. Returns `None` if `lowest` is greater than `highest`.
    #[must_use]
    pub fn new(lowest: u8, highest: u8) -> Option<Self> {
        (lowest <= highest).then_some(Self { lowest, highest })
    }

    /// The oldest supported version.
    #[must_use]
    pub fn lowest(self) -> u8 {
        self.lowest
    }

    /// The newest supported version.
    #[must_use]
    pub fn highest(self) -> u8 {
        self.highest
    }

    /// Whether the given version is within this range.
    #[must_use]
    pub fn contains(self, version: u8) -> bool {
        (self.lowest..=self.highest).contains(&version)
    }

    fn check(self, version: u8) -> Result<(), SerializationError> {
        if self.contains(version) {
            Ok(())
        } else {
            debug!(
                "rejecting map node format version {version}; supported: {}..={}",
                self.lowest, self.highest
            );
            Err(SerializationError::VersionMismatch {
                version,
                lowest: self.lowest,
                highest: self.highest,
            })
        }
    }
}

impl Default for SerializationVersions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeField {
    Content,
    Param,
    Aux,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ParamPolicy {
    /// `param` is taken as it is.
    Trusted,
    /// `param` of light propagating or emitting content is reset to zero.
    DiscardLight,
}

/// The byte layout of a node, valid from `first_version` up to the version before the next
/// layout's `first_version`.
#[derive(Debug)]
struct NodeLayout {
    first_version: u8,
    fields: &'static [NodeField],
    param_policy: ParamPolicy,
}

/// All layouts, ordered by `first_version`
static LAYOUTS: [NodeLayout; 4] = [
    NodeLayout {
        first_version: 0,
        fields: &[NodeField::Content],
        param_policy: ParamPolicy::Trusted,
    },
    NodeLayout {
        first_version: 1,
        fields: &[NodeField::Content, NodeField::Param],
        param_policy: ParamPolicy::DiscardLight,
    },
    NodeLayout {
        first_version: 2,
        fields: &[NodeField::Content, NodeField::Param],
        param_policy: ParamPolicy::Trusted,
    },
    NodeLayout {
        first_version: 10,
        fields: &[NodeField::Content, NodeField::Param, NodeField::Aux],
        param_policy: ParamPolicy::Trusted,
    },
];

impl NodeLayout {
    fn for_version(version: u8) -> &'static Self {
        let [oldest, ..] = &LAYOUTS;
        LAYOUTS
            .iter()
            .rfind(|layout| layout.first_version <= version)
            .unwrap_or(oldest)
    }

    fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Encodes and decodes single map nodes for a given range of supported format versions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeSerializer {
    versions: SerializationVersions,
}

impl NodeSerializer {
    /// Creates a serializer accepting the given versions.
    #[must_use]
    pub fn new(versions: SerializationVersions) -> Self {
        Self { versions }
    }

    /// The versions this serializer accepts.
    #[must_use]
    pub fn versions(&self) -> SerializationVersions {
        self.versions
    }

    fn layout(&self, version: u8) -> Result<&'static NodeLayout, SerializationError> {
        self.versions.check(version)?;
        Ok(NodeLayout::for_version(version))
    }

    /// Number of bytes a node occupies in the given version.
    ///
    /// # Errors
    ///
    /// Fails with `VersionMismatch` if the version isn't supported.
    pub fn serialized_length(&self, version: u8) -> Result<usize, SerializationError> {
        self.layout(version).map(NodeLayout::len)
    }

    /// Writes `node` into the beginning of `dest`. Any remaining bytes of `dest` are left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Fails with `VersionMismatch` if the version isn't supported or with `BufferTooShort` if
    /// `dest` can't hold the node.
    pub fn serialize(
        &self,
        node: &MapNode,
        dest: &mut [u8],
        version: u8,
    ) -> Result<(), SerializationError> {
        let layout = self.layout(version)?;
        let available = dest.len();
        let Some(dest) = dest.get_mut(..layout.len()) else {
            return Err(SerializationError::BufferTooShort {
                needed: layout.len(),
                available,
            });
        };

        for (field, byte) in layout.fields.iter().zip(dest) {
            *byte = match field {
                NodeField::Content => node.content_id.0,
                NodeField::Param => node.param_byte(),
                NodeField::Aux => node.aux_raw(),
            };
        }
        Ok(())
    }

    /// Reads a node from the beginning of `source`. Parameters not contained in the given
    /// version are zero.
    ///
    /// # Errors
    ///
    /// Fails with `VersionMismatch` if the version isn't supported or with `BufferTooShort` if
    /// `source` is too short to contain a node.
    pub fn deserialize(&self, source: &[u8], version: u8) -> Result<MapNode, SerializationError> {
        let layout = self.layout(version)?;
        let Some(source) = source.get(..layout.len()) else {
            return Err(SerializationError::BufferTooShort {
                needed: layout.len(),
                available: source.len(),
            });
        };

        let mut node = MapNode::default();
        for (field, &byte) in layout.fields.iter().zip(source) {
            match field {
                NodeField::Content => node.content_id = ContentId(byte),
                NodeField::Param => node.param = param_from_byte(byte),
                NodeField::Aux => node.set_aux_raw(byte),
            }
        }

        if layout.param_policy == ParamPolicy::DiscardLight
            && (node.light_propagates() || node.light_source() > 0)
            && node.param != 0
        {
            trace!(
                "discarding light {} of {} sent with format version {version}",
                node.param, node.content_id
            );
            node.param = 0;
        }

        Ok(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PARAMS: [i8; 5] = [0, 1, 0x0f, -1, i8::MIN];
    const SAMPLE_AUX: [u8; 4] = [0, 1, 0b10_0100, 0xff];

    fn sample_nodes() -> impl Iterator<Item = MapNode> {
        (0..=u8::MAX).flat_map(|content| {
            SAMPLE_PARAMS.into_iter().flat_map(move |param| {
                SAMPLE_AUX
                    .into_iter()
                    .map(move |aux| MapNode::new(ContentId(content), param, aux))
            })
        })
    }

    fn round_trip(node: &MapNode, version: u8) -> MapNode {
        let mut buffer = [0_u8; 3];
        node.serialize(&mut buffer, version).unwrap();
        MapNode::deserialize(&buffer, version).unwrap()
    }

    #[test]
    fn serialized_length() {
        assert_eq!(MapNode::serialized_length(0), Ok(1));
        for version in 1..=9 {
            assert_eq!(MapNode::serialized_length(version), Ok(2));
        }
        assert_eq!(MapNode::serialized_length(10), Ok(3));
    }

    #[test]
    fn unsupported_versions() {
        for version in SER_FMT_VER_HIGHEST + 1..=u8::MAX {
            let expected = Err(SerializationError::VersionMismatch {
                version,
                lowest: SER_FMT_VER_LOWEST,
                highest: SER_FMT_VER_HIGHEST,
            });
            assert_eq!(MapNode::serialized_length(version), expected.clone().map(|()| 0));
            assert_eq!(
                MapNode::default().serialize(&mut [0; 3], version),
                expected.clone()
            );
            assert_eq!(
                MapNode::deserialize(&[0; 3], version),
                expected.map(|()| MapNode::default())
            );
        }
        assert!(MapNode::serialized_length(SER_FMT_VER_INVALID).is_err());
    }

    #[test]
    fn custom_version_range() {
        let versions = SerializationVersions::new(2, 20).unwrap();
        let serializer = NodeSerializer::new(versions);

        // the edges of the range are supported
        assert_eq!(serializer.serialized_length(2), Ok(2));
        assert_eq!(serializer.serialized_length(20), Ok(3));

        assert!(serializer.serialized_length(1).is_err());
        assert!(serializer.serialized_length(21).is_err());
        assert!(serializer.deserialize(&[0; 3], 0).is_err());

        assert!(SerializationVersions::new(3, 2).is_none());
        assert!(SerializationVersions::new(4, 4).is_some());
    }

    #[test]
    fn byte_layout() {
        let node = MapNode::new(ContentId::LIGHT, 0x12, 0x34);
        let mut buffer = [0xaa_u8; 4];

        node.serialize(&mut buffer, 0).unwrap();
        assert_eq!(buffer, [3, 0xaa, 0xaa, 0xaa]);
        node.serialize(&mut buffer, 5).unwrap();
        assert_eq!(buffer, [3, 0x12, 0xaa, 0xaa]);
        node.serialize(&mut buffer, 10).unwrap();
        assert_eq!(buffer, [3, 0x12, 0x34, 0xaa]);
    }

    #[test]
    fn version_0_keeps_content_only() {
        for node in sample_nodes() {
            assert_eq!(
                round_trip(&node, 0),
                MapNode::new(node.content_id, 0, 0)
            );
        }
    }

    #[test]
    fn version_1_discards_light() {
        for node in sample_nodes() {
            let features = node.features();
            let param = if features.light_propagates() || features.light_source > 0 {
                0
            } else {
                node.param
            };
            assert_eq!(
                round_trip(&node, 1),
                MapNode::new(node.content_id, param, 0)
            );
        }

        let air = MapNode::new(ContentId::AIR, 9, 0);
        assert_eq!(round_trip(&air, 1).param, 0);
        let torch = MapNode::new(ContentId::LIGHT, 9, 0);
        assert_eq!(round_trip(&torch, 1).param, 0);
        let stone = MapNode::new(ContentId::STONE, 9, 0);
        assert_eq!(round_trip(&stone, 1).param, 9);
    }

    #[test]
    fn versions_2_to_9_keep_param() {
        for version in 2..=9 {
            for node in sample_nodes() {
                assert_eq!(
                    round_trip(&node, version),
                    MapNode::new(node.content_id, node.param, 0)
                );
            }
        }
    }

    #[test]
    fn version_10_keeps_everything() {
        for node in sample_nodes() {
            assert_eq!(round_trip(&node, 10), node);
        }
    }

    #[test]
    fn short_buffers() {
        let node = MapNode::new(ContentId::WATER, 1, 2);
        assert_eq!(
            node.serialize(&mut [0; 2], 10),
            Err(SerializationError::BufferTooShort {
                needed: 3,
                available: 2
            })
        );
        assert_eq!(
            MapNode::deserialize(&[], 0),
            Err(SerializationError::BufferTooShort {
                needed: 1,
                available: 0
            })
        );

        // the version is checked first
        assert!(matches!(
            MapNode::deserialize(&[], 11),
            Err(SerializationError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let node = MapNode::deserialize(&[ContentId::MUD.0, 4, 5, 6, 7], 10).unwrap();
        assert_eq!(node, MapNode::new(ContentId::MUD, 4, 5));
    }

    #[test]
    fn error_messages() {
        let error = MapNode::serialized_length(42).unwrap_err();
        assert_eq!(
            error.to_string(),
            "map node format version 42 not supported (supported: 0..=10)"
        );
    }
}
