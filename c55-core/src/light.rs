//! Light level constants.
//!
//! Light intensity is stored logarithmically in the lower 4 bits of a node's `param`.

/// The brightest light any light source or propagation step can produce.
pub const LIGHT_MAX: u8 = 14;

/// Direct sunlight. Lies above the range reachable by propagation so it can be told apart from
/// artificial light.
pub const LIGHT_SUN: u8 = LIGHT_MAX + 1;

/// Bits of `param` holding the light level.
pub(crate) const LIGHT_MASK: u8 = 0x0f;
