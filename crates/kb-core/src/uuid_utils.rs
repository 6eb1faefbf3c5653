//! UUIDv7 identifiers for graph entities.
//!
//! Every concept, translation, statement and reference is keyed by a UUIDv7,
//! whose leading 48 bits are the Unix timestamp in milliseconds. Ordering ids
//! therefore orders entities by creation time.

use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
///
/// ```
/// use kb_core::uuid_utils::new_v7;
///
/// let id = new_v7();
/// assert_eq!(id.get_version_num(), 7);
/// ```
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}
