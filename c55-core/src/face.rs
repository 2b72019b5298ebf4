//! Decides whether two neighboring nodes are separated by a visible face.

use crate::content_id::ContentId;

/// Which of two adjacent nodes a face between them belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FaceOwner {
    /// No face is drawn.
    None = 0,
    /// The face uses the first node's content.
    First = 1,
    /// The face uses the second node's content.
    Second = 2,
}

impl From<FaceOwner> for u8 {
    fn from(value: FaceOwner) -> Self {
        value as u8
    }
}

/// Nodes make a face if contents differ and solidness differs.
///
/// The content with the higher solidness is the one being drawn. `IGNORE` never creates a face,
/// no matter what it is adjacent to.
#[must_use]
pub fn face_contents(first: ContentId, second: ContentId) -> FaceOwner {
    if first == ContentId::IGNORE || second == ContentId::IGNORE {
        return FaceOwner::None;
    }

    let first_solidness = first.features().solidness;
    let second_solidness = second.features().solidness;

    // two different opaque contents touching each other don't produce a face either
    if first == second || first_solidness == second_solidness {
        return FaceOwner::None;
    }

    if first_solidness > second_solidness {
        FaceOwner::First
    } else {
        FaceOwner::Second
    }
}
