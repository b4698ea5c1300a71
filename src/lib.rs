//! UUID-shaped identifiers hashed from timestamp, machine, process and random entropy
//!
//! ```rust
//! use ultra_uuid::Generator;
//!
//! let mut g = Generator::new();
//! let id = g.generate();
//! println!("{}", id); // e.g. "615c6f69-17fa-461e-2a59-13d0e75cfc9b"
//! println!("{:?}", id.as_bytes()); // as 16-byte array
//! ```
//!
//! # Composition
//!
//! Each identifier produced by [`Generator::generate`] is the first half of the SHA-256 digest
//! of the following components, joined with `-` in this order:
//!
//! ```text
//! unix_ts_ms - high_res_ns - fingerprint - pid - worker_id - rand32 - rand32 - token - counter
//! ```
//!
//! Where:
//!
//! - `unix_ts_ms` is the Unix time in milliseconds, in base 36.
//! - `high_res_ns` is a monotonic clock reading in nanoseconds, in base 36.
//! - `fingerprint` is 8 hex digits derived from the hardware address of the first running
//!   network interface that has an IP address, the hostname, and the Rust target's CPU
//!   architecture and operating system names.
//! - `pid` and `worker_id` are the process ID and the orchestration ordinal (`0` by default),
//!   in base 36.
//! - `rand32` is a fresh 32-bit random value in hex, drawn twice.
//! - `token` is 8 symbols drawn uniformly from `[0-9A-Za-z]`.
//! - `counter` is a per-generator counter that increments on every call and wraps around to
//!   zero at `0xFFFFFF`, in base 36 padded to four digits.
//!
//! The 128-bit result is rendered in the 8-4-4-4-12 hexadecimal form. It is not an RFC 4122
//! UUID: the version and variant fields carry digest bits. All random values come from a
//! cryptographically secure source, but the identifiers are meant for uniqueness, not for
//! secrecy, and carry no ordering guarantee.
//!
//! Generators are constructed and shared explicitly; this crate keeps no process-wide
//! generator. Wrap one in a `Mutex` to share it across threads.
//!
//! # Other features
//!
//! This library also supports the generation of UUID version 4, a compact identifier form,
//! and batches:
//!
//! ```rust
//! use ultra_uuid::{uuid4, Generator};
//!
//! println!("{}", uuid4()); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//!
//! let mut g = Generator::new();
//! println!("{}", g.generate_v4());
//! println!("{}", g.generate_short()); // e.g. "loyw3v28a3f90001"
//! let batch = g.generate_batch(5)?;
//! assert_eq!(batch.len(), 5);
//! # Ok::<(), ultra_uuid::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{Uuid, Variant};

mod error;
pub use error::{Error, Result};

mod encoding;

pub mod entropy;
pub use entropy::Fingerprint;

pub mod compose;
pub use compose::Components;

mod config;
pub use config::Config;

pub mod generator;
pub use generator::{Generator, RandSource};

mod v4;
pub use v4::uuid4;
