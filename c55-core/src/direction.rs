//! Packs directions like `(1, 0, 0)` or `(1, -1, 0)` into a single byte.

use std::cmp::Ordering;

use glam::I16Vec3;

/// A direction with each component being one of `-1`, `0` or `1`, packed into one byte.
///
/// Each axis uses two bits: one for the positive and one for the negative direction. Neither bit
/// being set means the component is zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct PackedDirection(u8);

/// Bit positions as `(positive, negative)` for the x-, y- and z-axis
const AXIS_BITS: [(u8, u8); 3] = [(1 << 0, 1 << 1), (1 << 2, 1 << 3), (1 << 4, 1 << 5)];

impl PackedDirection {
    /// All bits that carry direction information.
    pub const MASK: u8 = 0b0011_1111;

    /// Wraps a raw byte without any validation.
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Packs the given direction. Only the sign of each component is retained.
    #[must_use]
    pub fn pack(direction: I16Vec3) -> Self {
        let [x, y, z] = AXIS_BITS;
        Self(pack_axis(direction.x, x) | pack_axis(direction.y, y) | pack_axis(direction.z, z))
    }

    /// Restores the direction. If both bits of an axis are set, the positive one wins.
    #[must_use]
    pub fn unpack(self) -> I16Vec3 {
        let [x, y, z] = AXIS_BITS;
        I16Vec3::new(
            unpack_axis(self.0, x),
            unpack_axis(self.0, y),
            unpack_axis(self.0, z),
        )
    }

    /// Whether this is the exact result of packing some direction, i.e. no unknown bits are set
    /// and no axis points both ways.
    #[must_use]
    pub fn is_canonical(self) -> bool {
        self.0 & !Self::MASK == 0
            && AXIS_BITS
                .iter()
                .all(|&(positive, negative)| self.0 & (positive | negative) != positive | negative)
    }
}

fn pack_axis(component: i16, (positive, negative): (u8, u8)) -> u8 {
    match component.cmp(&0) {
        Ordering::Greater => positive,
        Ordering::Less => negative,
        Ordering::Equal => 0,
    }
}

fn unpack_axis(bits: u8, (positive, negative): (u8, u8)) -> i16 {
    if bits & positive != 0 {
        1
    } else if bits & negative != 0 {
        -1
    } else {
        0
    }
}

impl From<PackedDirection> for u8 {
    fn from(value: PackedDirection) -> Self {
        value.0
    }
}

impl From<I16Vec3> for PackedDirection {
    fn from(value: I16Vec3) -> Self {
        Self::pack(value)
    }
}

impl From<PackedDirection> for I16Vec3 {
    fn from(value: PackedDirection) -> Self {
        value.unpack()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_directions() -> impl Iterator<Item = I16Vec3> {
        (-1..=1).flat_map(|x| (-1..=1).flat_map(move |y| (-1..=1).map(move |z| I16Vec3::new(x, y, z))))
    }

    #[test]
    fn bit_layout() {
        assert_eq!(u8::from(PackedDirection::pack(I16Vec3::X)), 0b00_0001);
        assert_eq!(u8::from(PackedDirection::pack(I16Vec3::NEG_X)), 0b00_0010);
        assert_eq!(u8::from(PackedDirection::pack(I16Vec3::Y)), 0b00_0100);
        assert_eq!(u8::from(PackedDirection::pack(I16Vec3::NEG_Y)), 0b00_1000);
        assert_eq!(u8::from(PackedDirection::pack(I16Vec3::Z)), 0b01_0000);
        assert_eq!(u8::from(PackedDirection::pack(I16Vec3::NEG_Z)), 0b10_0000);
        assert_eq!(u8::from(PackedDirection::pack(I16Vec3::ZERO)), 0);
        assert_eq!(
            u8::from(PackedDirection::pack(I16Vec3::new(1, -1, 0))),
            0b00_1001
        );
    }

    #[test]
    fn unit_directions_survive_packing() {
        let mut count = 0;
        for direction in unit_directions() {
            assert_eq!(PackedDirection::pack(direction).unpack(), direction);
            count += 1;
        }
        assert_eq!(count, 27);
    }

    #[test]
    fn canonical_bytes_survive_unpacking() {
        let canonical: Vec<u8> = (0..=u8::MAX)
            .filter(|&raw| PackedDirection::from_raw(raw).is_canonical())
            .collect();
        assert_eq!(canonical.len(), 27);
        for raw in canonical {
            let packed = PackedDirection::from_raw(raw);
            assert_eq!(PackedDirection::pack(packed.unpack()), packed);
        }
    }

    #[test]
    fn positive_bit_wins() {
        let conflicting = PackedDirection::from_raw(0b11_1111);
        assert!(!conflicting.is_canonical());
        assert_eq!(conflicting.unpack(), I16Vec3::ONE);
    }

    #[test]
    fn components_are_clamped_to_sign() {
        assert_eq!(
            PackedDirection::pack(I16Vec3::new(7, -300, 0)).unpack(),
            I16Vec3::new(1, -1, 0)
        );
        assert_eq!(
            PackedDirection::pack(I16Vec3::MIN).unpack(),
            I16Vec3::NEG_ONE
        );
    }
}
