//! UUIDv4-related functionality

use crate::Uuid;
use rand::{rngs::OsRng, RngCore};

/// Generates a UUIDv4 object from the operating system's secure random source.
///
/// This function holds no state and is independent of any [`Generator`](crate::Generator).
///
/// # Examples
///
/// ```rust
/// use ultra_uuid::uuid4;
///
/// let uuid = uuid4();
/// println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// ```
pub fn uuid4() -> Uuid {
    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    from_random_bytes(bytes)
}

/// Sets the version and variant bits of 16 random bytes.
pub(crate) fn from_random_bytes(mut bytes: [u8; 16]) -> Uuid {
    bytes[6] = 0x40 | (bytes[6] & 0x0f);
    bytes[8] = 0x80 | (bytes[8] & 0x3f);
    Uuid::from(bytes)
}
