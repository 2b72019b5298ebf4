//! Holds the content id type and the registry of all known content kinds.

use std::{
    fmt::{self, Display},
    num::ParseIntError,
    str::FromStr,
};

use crate::content_features::{self, ContentFeatures};

/// The content id describes the _material_ a `MapNode` is made of.
///
/// The registry is closed: every kind the game knows about is listed below as
/// an associated constant. All other values are valid content ids nevertheless
/// and are classified with safe defaults (see `ContentFeatures`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ContentId(pub u8);

impl Default for ContentId {
    fn default() -> Self {
        Self::AIR
    }
}

impl ContentId {
    /// Number of distinct content ids.
    pub const MATERIALS_COUNT: usize = 256;

    /// Number of regular content kinds. They occupy the ids `0..USEFUL_CONTENT_COUNT`.
    pub const USEFUL_CONTENT_COUNT: u8 = 10;

    /// Plain rock; the bulk of the underground.
    pub const STONE: Self = Self(0);
    /// Ground covered with grass.
    pub const GRASS: Self = Self(1);
    /// Flowing water.
    pub const WATER: Self = Self(2);
    /// A torch-like light source. Placed with a direction.
    pub const LIGHT: Self = Self(3);
    /// Tree trunk.
    pub const TREE: Self = Self(4);
    /// Tree foliage.
    pub const LEAVES: Self = Self(5);
    /// Grass that has been stepped on.
    pub const GRASS_FOOTSTEPS: Self = Self(6);
    /// A rare mineral found within stone.
    pub const MESE: Self = Self(7);
    /// Soil without grass cover.
    pub const MUD: Self = Self(8);
    /// Still water filling the sea level.
    pub const OCEAN: Self = Self(9);

    /// The common material through which the player can walk and which
    /// is transparent to light
    pub const AIR: Self = Self(254);

    /// Ignored node.
    ///
    /// Unloaded chunks are considered to consist of this. Anything that stores
    /// map nodes doesn't have to preserve parameters associated with this
    /// material.
    ///
    /// Doesn't create faces with anything and is considered being
    /// out-of-map in the game map.
    pub const IGNORE: Self = Self(255);

    /// The `param` an `IGNORE` node is reset to when its parameters are dropped.
    pub const IGNORE_DEFAULT_PARAM: i8 = 0;

    /// All registered content kinds with their names.
    pub const REGISTERED: [(Self, &'static str); 12] = [
        (Self::STONE, "stone"),
        (Self::GRASS, "grass"),
        (Self::WATER, "water"),
        (Self::LIGHT, "light"),
        (Self::TREE, "tree"),
        (Self::LEAVES, "leaves"),
        (Self::GRASS_FOOTSTEPS, "grass_footsteps"),
        (Self::MESE, "mese"),
        (Self::MUD, "mud"),
        (Self::OCEAN, "ocean"),
        (Self::AIR, "air"),
        (Self::IGNORE, "ignore"),
    ];

    /// Returns the name of this content kind or `None` if it hasn't been registered.
    #[must_use]
    pub fn name(self) -> Option<&'static str> {
        Self::REGISTERED
            .iter()
            .find(|(id, _)| *id == self)
            .map(|&(_, name)| name)
    }

    /// Looks up a registered content kind by its name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::REGISTERED
            .iter()
            .find(|(_, registered)| *registered == name)
            .map(|&(id, _)| id)
    }

    /// Whether this id names one of the registered content kinds.
    #[must_use]
    pub fn is_registered(self) -> bool {
        self.name().is_some()
    }

    /// Returns the features of this content kind, which classify how it is drawn, lit and
    /// collided with.
    #[must_use]
    pub fn features(self) -> &'static ContentFeatures {
        content_features::lookup(self)
    }
}

impl Display for ContentId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => formatter.write_str(name),
            None => write!(formatter, "#{}", self.0),
        }
    }
}

/// Accepts either a registered name (`"stone"`) or a numeric id (`"7"`, `"#7"`).
impl FromStr for ContentId {
    type Err = ParseIntError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if let Some(id) = Self::from_name(value) {
            return Ok(id);
        }
        value.strip_prefix('#').unwrap_or(value).parse().map(Self)
    }
}

impl From<ContentId> for usize {
    fn from(value: ContentId) -> Self {
        usize::from(value.0)
    }
}

impl From<ContentId> for u8 {
    fn from(value: ContentId) -> Self {
        value.0
    }
}

impl From<u8> for ContentId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn useful_contents_are_contiguous() {
        let useful: Vec<u8> = ContentId::REGISTERED
            .iter()
            .map(|(id, _)| id.0)
            .filter(|&id| id < ContentId::USEFUL_CONTENT_COUNT)
            .collect();
        assert_eq!(
            useful,
            (0..ContentId::USEFUL_CONTENT_COUNT).collect::<Vec<_>>()
        );
    }

    #[test]
    fn reserved_ids() {
        assert_eq!(ContentId::AIR.0, 254);
        assert_eq!(ContentId::IGNORE.0, 255);
        assert_eq!(ContentId::default(), ContentId::AIR);
    }

    #[test]
    fn names() {
        for (id, name) in ContentId::REGISTERED {
            assert_eq!(id.name(), Some(name));
            assert_eq!(name.parse::<ContentId>(), Ok(id));
            assert_eq!(id.to_string(), name);
        }
        assert_eq!(ContentId(100).name(), None);
        assert_eq!(ContentId(100).to_string(), "#100");
    }

    #[test]
    fn parse_numeric() {
        assert_eq!("7".parse::<ContentId>(), Ok(ContentId::MESE));
        assert_eq!("#100".parse::<ContentId>(), Ok(ContentId(100)));
        assert!("256".parse::<ContentId>().is_err());
        assert!("lava".parse::<ContentId>().is_err());
    }
}
