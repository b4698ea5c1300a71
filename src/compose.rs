//! Composition of entropy components into hashed identifiers.

use fstr::FStr;
use sha2::{Digest, Sha256};

use crate::{encoding, Fingerprint, Uuid};

/// The fixed-order tuple of entropy components that makes up one hashed identifier.
///
/// [`Generator`](crate::Generator) fills this structure on every call; it is public so that
/// callers can reproduce an identifier from recorded inputs.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Components {
    /// Unix time in milliseconds.
    pub unix_ts_ms: u64,
    /// Monotonic clock reading in nanoseconds.
    pub high_res_ns: u128,
    /// Machine fingerprint.
    pub fingerprint: Fingerprint,
    /// Process ID.
    pub process_id: u32,
    /// Worker ordinal supplied by the orchestration layer.
    pub worker_id: u32,
    /// Two independent 4-byte random draws.
    pub random: [[u8; 4]; 2],
    /// 8-symbol alphanumeric random token.
    pub nano_token: FStr<8>,
    /// Counter value of the generator.
    pub counter: u32,
}

impl Components {
    /// Returns the components joined with `-`, in the order in which they are hashed.
    ///
    /// Numeric components are written in base 36 and random bytes in hex; the counter is
    /// padded to at least four digits.
    pub fn join(&self) -> String {
        let mut dst = String::with_capacity(96);
        encoding::push_base36(&mut dst, self.unix_ts_ms.into());
        dst.push('-');
        encoding::push_base36(&mut dst, self.high_res_ns);
        dst.push('-');
        dst.push_str(self.fingerprint.as_str());
        dst.push('-');
        encoding::push_base36(&mut dst, self.process_id.into());
        dst.push('-');
        encoding::push_base36(&mut dst, self.worker_id.into());
        for segment in &self.random {
            dst.push('-');
            encoding::push_hex(&mut dst, segment);
        }
        dst.push('-');
        dst.push_str(&self.nano_token);
        dst.push('-');
        encoding::push_base36_padded(&mut dst, self.counter.into(), 4);
        dst
    }

    /// Hashes the joined components with SHA-256 and keeps the first 16 digest bytes.
    pub fn digest(&self) -> Uuid {
        let hash = Sha256::digest(self.join());
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&hash[..16]);
        Uuid::from(bytes)
    }
}
