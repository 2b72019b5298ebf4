//! Classification of content kinds.
//!
//! Every property the rest of the engine derives from a content id (lighting, rendering,
//! collision, world generation) is looked up in a single table with one `ContentFeatures` entry
//! per content id. Adding a new content kind means adding one arm to `define`.

use std::fmt::{self, Display};

use bitflags::bitflags;

use crate::{content_id::ContentId, light::LIGHT_MAX};

bitflags! {
    /// Boolean capabilities of a content kind.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ContentFlags: u16 {
        /// Light passes through and the light level is stored in `param`.
        const LIGHT_PROPAGATES = 1 << 0;
        /// Sunlight passes through without losing intensity.
        const SUNLIGHT_PROPAGATES = 1 << 1;
        /// Objects collide with this content.
        const WALKABLE = 1 << 2;
        /// Resists fast movement.
        const LIQUID = 1 << 3;
        /// Can be pointed at in the map.
        const POINTABLE = 1 << 4;
        /// Can be dug by a player.
        const DIGGABLE = 1 << 5;
        /// May be overwritten when placing a node.
        const BUILDABLE_TO = 1 << 6;
        /// Forms the base ground following the main heightmap.
        const GROUND_CONTENT = 1 << 7;
        /// Gets a direction stored when placed.
        const DIRECTIONAL = 1 << 8;
        /// May be overwritten by a flowing liquid.
        const LIQUID_REPLACEABLE = 1 << 9;
    }
}

/// How a node is drawn. On a node-node surface the material with the higher solidness is used
/// for drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Solidness {
    /// Nothing is drawn.
    Invisible = 0,
    /// Drawn, but nodes behind it stay visible.
    Transparent = 1,
    /// Hides everything behind it.
    Opaque = 2,
}

impl From<Solidness> for u8 {
    fn from(value: Solidness) -> Self {
        value as u8
    }
}

impl Display for Solidness {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Solidness::Invisible => "invisible",
            Solidness::Transparent => "transparent",
            Solidness::Opaque => "opaque",
        })
    }
}

/// Meaning of a node's auxiliary byte, which is determined by the node's content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuxKind {
    /// The byte carries no meaning for this content.
    Unused,
    /// Liquid pressure.
    Pressure,
    /// A direction packed with `PackedDirection`.
    Direction,
}

/// All properties of a single content kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentFeatures {
    /// boolean capabilities
    pub flags: ContentFlags,
    /// rendering class used for face decisions
    pub solidness: Solidness,
    /// light level emitted by this content; 0 for non-emitting content
    pub light_source: u8,
    /// the tile drawn on every side of this content
    pub tile: ContentId,
}

impl ContentFeatures {
    /// The features of content that hasn't been given any: a plain solid block.
    const fn opaque(id: ContentId) -> Self {
        Self {
            flags: ContentFlags::WALKABLE
                .union(ContentFlags::POINTABLE)
                .union(ContentFlags::DIGGABLE),
            solidness: Solidness::Opaque,
            light_source: 0,
            tile: id,
        }
    }

    const fn with_flags(mut self, flags: ContentFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    const fn with_tile(mut self, tile: ContentId) -> Self {
        self.tile = tile;
        self
    }

    /// Returns whether all of the given flags are set.
    #[must_use]
    pub const fn has(&self, flags: ContentFlags) -> bool {
        self.flags.contains(flags)
    }

    /// If true, the material allows light propagation and brightness is stored in `param`.
    #[must_use]
    pub const fn light_propagates(&self) -> bool {
        self.has(ContentFlags::LIGHT_PROPAGATES)
    }

    /// If true, the material allows lossless sunlight propagation.
    #[must_use]
    pub const fn sunlight_propagates(&self) -> bool {
        self.has(ContentFlags::SUNLIGHT_PROPAGATES)
    }

    /// Objects collide with walkable contents.
    #[must_use]
    pub const fn walkable(&self) -> bool {
        self.has(ContentFlags::WALKABLE)
    }

    /// A liquid resists fast movement.
    #[must_use]
    pub const fn liquid(&self) -> bool {
        self.has(ContentFlags::LIQUID)
    }

    /// Pointable contents can be pointed to in the map.
    #[must_use]
    pub const fn pointable(&self) -> bool {
        self.has(ContentFlags::POINTABLE)
    }

    /// Whether a player may dig this content.
    #[must_use]
    pub const fn diggable(&self) -> bool {
        self.has(ContentFlags::DIGGABLE)
    }

    /// Placing a node may replace content that is buildable to.
    #[must_use]
    pub const fn buildable_to(&self) -> bool {
        self.has(ContentFlags::BUILDABLE_TO)
    }

    /// Returns true for contents that form the base ground that follows the main heightmap.
    #[must_use]
    pub const fn is_ground_content(&self) -> bool {
        self.has(ContentFlags::GROUND_CONTENT)
    }

    /// When placing a node, direction info is added to it if this is true.
    #[must_use]
    pub const fn directional(&self) -> bool {
        self.has(ContentFlags::DIRECTIONAL)
    }

    /// Whether a flowing liquid may overwrite this content.
    #[must_use]
    pub const fn liquid_replaces(&self) -> bool {
        self.has(ContentFlags::LIQUID_REPLACEABLE)
    }

    /// Tells how the auxiliary byte of a node with this content is to be interpreted.
    #[must_use]
    pub const fn aux_kind(&self) -> AuxKind {
        if self.liquid() {
            AuxKind::Pressure
        } else if self.directional() {
            AuxKind::Direction
        } else {
            AuxKind::Unused
        }
    }
}

/// The definitions of all registered content kinds. Unregistered ids fall back to
/// `ContentFeatures::opaque`.
const fn define(id: ContentId) -> ContentFeatures {
    match id {
        ContentId::STONE
        | ContentId::GRASS
        | ContentId::GRASS_FOOTSTEPS
        | ContentId::MESE
        | ContentId::MUD => ContentFeatures::opaque(id).with_flags(ContentFlags::GROUND_CONTENT),
        ContentId::WATER | ContentId::OCEAN => ContentFeatures {
            flags: ContentFlags::LIGHT_PROPAGATES
                .union(ContentFlags::LIQUID)
                .union(ContentFlags::BUILDABLE_TO),
            solidness: Solidness::Transparent,
            light_source: 0,
            tile: id,
        },
        ContentId::LIGHT => ContentFeatures {
            flags: ContentFlags::LIGHT_PROPAGATES
                .union(ContentFlags::SUNLIGHT_PROPAGATES)
                .union(ContentFlags::POINTABLE)
                .union(ContentFlags::DIGGABLE)
                .union(ContentFlags::DIRECTIONAL)
                .union(ContentFlags::LIQUID_REPLACEABLE),
            solidness: Solidness::Opaque,
            light_source: LIGHT_MAX,
            tile: ContentId::AIR,
        },
        ContentId::AIR => ContentFeatures {
            flags: ContentFlags::LIGHT_PROPAGATES
                .union(ContentFlags::SUNLIGHT_PROPAGATES)
                .union(ContentFlags::BUILDABLE_TO)
                .union(ContentFlags::LIQUID_REPLACEABLE),
            solidness: Solidness::Invisible,
            light_source: 0,
            tile: ContentId::AIR,
        },
        // never drawn, but still mapped to a harmless tile
        ContentId::IGNORE => ContentFeatures::opaque(id).with_tile(ContentId::AIR),
        _ => ContentFeatures::opaque(id),
    }
}

#[expect(
    clippy::indexing_slicing,
    clippy::cast_possible_truncation,
    reason = "the index never leaves the range of valid content ids"
)]
const fn build_table() -> [ContentFeatures; ContentId::MATERIALS_COUNT] {
    let mut table = [ContentFeatures::opaque(ContentId::IGNORE); ContentId::MATERIALS_COUNT];
    let mut index = 0;
    while index < ContentId::MATERIALS_COUNT {
        table[index] = define(ContentId(index as u8));
        index += 1;
    }
    table
}

static CONTENT_FEATURES: [ContentFeatures; ContentId::MATERIALS_COUNT] = build_table();

/// Returns the table entry of the given content id.
pub(crate) fn lookup(id: ContentId) -> &'static ContentFeatures {
    #[expect(
        clippy::indexing_slicing,
        reason = "the table has an entry for every possible content id"
    )]
    &CONTENT_FEATURES[usize::from(id)]
}
