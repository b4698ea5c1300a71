//! Entropy components mixed into hashed identifiers.

use std::{
    fmt, str,
    sync::OnceLock,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use fstr::FStr;
use sha2::{Digest, Sha256};

use crate::{encoding, generator::RandSource, Error};

/// Symbols of the nano token.
const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Hashed input that replaces the hardware address when no interface qualifies.
const UNKNOWN_ADDRESS: &str = "unknown";

/// A short value identifying the host machine, rendered as 8 lowercase hex digits.
///
/// The fingerprint is the SHA-256 digest prefix of a network hardware address concatenated with
/// the hostname, the CPU architecture and the operating system name. The hardware address is
/// taken from the first running interface that has an IP address and a non-zero hardware
/// address. Hosts sharing all four inputs share the fingerprint.
///
/// [`Fingerprint::detect`] hashes the architecture and operating system names of the Rust target
/// ([`std::env::consts::ARCH`] and [`std::env::consts::OS`], e.g. `x86_64` and `macos`). Other
/// implementations of the same scheme that spell these names differently (`x64`, `darwin`)
/// produce different fingerprints on the same host; pass their spellings to
/// [`Fingerprint::derive`] when matching values are needed.
///
/// # Examples
///
/// ```rust
/// use ultra_uuid::Fingerprint;
///
/// let fp = Fingerprint::derive(None, "build-host", "x86_64", "linux");
/// assert_eq!(fp.as_str().len(), 8);
/// assert_eq!(fp, Fingerprint::derive(None, "build-host", "x86_64", "linux"));
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Fingerprint(FStr<8>);

impl Fingerprint {
    /// Returns the fingerprint of the current host.
    ///
    /// The value is derived on first use and cached for the rest of the process lifetime.
    pub fn detect() -> Self {
        static CACHE: OnceLock<Fingerprint> = OnceLock::new();
        *CACHE.get_or_init(|| {
            let hostname = gethostname::gethostname();
            let fingerprint = Self::derive(
                first_hardware_address(),
                &hostname.to_string_lossy(),
                std::env::consts::ARCH,
                std::env::consts::OS,
            );
            tracing::debug!(%fingerprint, "derived machine fingerprint");
            fingerprint
        })
    }

    /// Derives a fingerprint from explicit host properties.
    ///
    /// `None` as `hardware_address` hashes the literal `"unknown"` in its place.
    pub fn derive(
        hardware_address: Option<[u8; 6]>,
        hostname: &str,
        arch: &str,
        os: &str,
    ) -> Self {
        let mut hasher = Sha256::new();
        match hardware_address {
            Some(bytes) => hasher.update(format_hardware_address(bytes)),
            None => hasher.update(UNKNOWN_ADDRESS),
        }
        hasher.update(hostname);
        hasher.update(arch);
        hasher.update(os);
        let digest = hasher.finalize();

        let mut hex = String::with_capacity(8);
        encoding::push_hex(&mut hex, &digest[..4]);
        Self::from_ascii(&hex)
    }

    /// Returns the 8-digit hex representation.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    fn from_ascii(src: &str) -> Self {
        let mut buffer = [0u8; 8];
        buffer.copy_from_slice(src.as_bytes());
        debug_assert!(buffer.is_ascii());
        // SAFETY: ok because callers only pass ASCII hex digits
        Self(unsafe { FStr::from_inner_unchecked(buffer) })
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl str::FromStr for Fingerprint {
    type Err = Error;

    /// Accepts exactly 8 hex digits in either case and stores them in lowercase.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        if src.len() == 8 && src.bytes().all(|c| c.is_ascii_hexdigit()) {
            Ok(Self::from_ascii(&src.to_ascii_lowercase()))
        } else {
            Err(Error::InvalidFormat)
        }
    }
}

/// One address record of a network interface, reduced to what hardware address selection needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct InterfaceRecord {
    pub name: String,
    /// Whether the interface is both up and running.
    pub running: bool,
    pub address: InterfaceAddress,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum InterfaceAddress {
    /// Link-layer address.
    Hardware([u8; 6]),
    /// IPv4 or IPv6 address.
    Network,
    /// No address, or one of another family.
    Other,
}

/// Picks the hardware address of the first running interface that carries a network address.
///
/// Interfaces are visited in the order of their network address records. Loopback and other
/// interfaces with an all-zero hardware address are skipped, as are interfaces without an IP
/// address, such as disconnected or link-only virtual devices.
pub(crate) fn select_hardware_address(records: &[InterfaceRecord]) -> Option<[u8; 6]> {
    let hardware_address_of = |name: &str| {
        records.iter().find_map(|e| match e.address {
            InterfaceAddress::Hardware(bytes) if e.name == name => Some(bytes),
            _ => None,
        })
    };
    records
        .iter()
        .filter(|e| e.running && e.address == InterfaceAddress::Network)
        .filter_map(|e| hardware_address_of(&e.name))
        .find(|e| e != &[0u8; 6])
}

/// Lists the address records of all network interfaces.
#[cfg(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "illumos"
))]
fn interface_records() -> Result<Vec<InterfaceRecord>, nix::Error> {
    use nix::net::if_::InterfaceFlags;

    let running = InterfaceFlags::IFF_UP | InterfaceFlags::IFF_RUNNING;
    let records = nix::ifaddrs::getifaddrs()?
        .map(|e| {
            let address = match &e.address {
                Some(addr) if addr.as_sockaddr_in().is_some() => InterfaceAddress::Network,
                Some(addr) if addr.as_sockaddr_in6().is_some() => InterfaceAddress::Network,
                Some(addr) => match addr.as_link_addr().and_then(|link| link.addr()) {
                    Some(bytes) => InterfaceAddress::Hardware(bytes),
                    None => InterfaceAddress::Other,
                },
                None => InterfaceAddress::Other,
            };
            InterfaceRecord {
                running: e.flags.contains(running),
                name: e.interface_name,
                address,
            }
        })
        .collect();
    Ok(records)
}

/// Lists the address records of all network adapters.
///
/// Adapter enumeration on these targets reports hardware addresses only, so every listed adapter
/// is treated as running and connected.
#[cfg(not(any(
    target_os = "linux",
    target_os = "android",
    target_os = "macos",
    target_os = "freebsd",
    target_os = "netbsd",
    target_os = "openbsd",
    target_os = "illumos"
)))]
fn interface_records() -> Result<Vec<InterfaceRecord>, mac_address::MacAddressError> {
    let records = mac_address::MacAddressIterator::new()?
        .enumerate()
        .flat_map(|(i, e)| {
            let name = i.to_string();
            [InterfaceAddress::Hardware(e.bytes()), InterfaceAddress::Network].map(|address| {
                InterfaceRecord {
                    name: name.clone(),
                    running: true,
                    address,
                }
            })
        })
        .collect();
    Ok(records)
}

/// Returns the hardware address of the first connected network interface.
fn first_hardware_address() -> Option<[u8; 6]> {
    let found = match interface_records() {
        Ok(records) => select_hardware_address(&records),
        Err(err) => {
            tracing::debug!(%err, "could not enumerate network interfaces");
            None
        }
    };
    if found.is_none() {
        tracing::debug!("no hardware address found; using fallback token");
    }
    found
}

/// Renders a hardware address as `aa:bb:cc:dd:ee:ff`.
fn format_hardware_address(bytes: [u8; 6]) -> String {
    let mut dst = String::with_capacity(17);
    for (i, e) in bytes.iter().enumerate() {
        if i > 0 {
            dst.push(':');
        }
        encoding::push_hex(&mut dst, &[*e]);
    }
    dst
}

/// Returns the current Unix time in milliseconds.
pub(crate) fn unix_ts_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock may have gone backwards")
        .as_millis() as u64
}

/// Returns the nanoseconds elapsed on the monotonic clock since the first call in this process.
pub(crate) fn high_res_ns() -> u128 {
    static ANCHOR: OnceLock<Instant> = OnceLock::new();
    ANCHOR.get_or_init(Instant::now).elapsed().as_nanos()
}

/// Draws `N` random bytes.
pub(crate) fn random_segment<const N: usize>(rng: &mut impl RandSource) -> [u8; N] {
    let mut bytes = [0u8; N];
    rng.fill_bytes(&mut bytes);
    bytes
}

/// Draws 8 symbols uniformly from the 62-symbol alphanumeric alphabet.
pub(crate) fn nano_token(rng: &mut impl RandSource) -> FStr<8> {
    // largest multiple of 62 that fits in a byte; larger bytes are rejected to avoid bias
    const LIMIT: u8 = 248;

    let mut token = [0u8; 8];
    let mut filled = 0;
    let mut pool = [0u8; 16];
    while filled < token.len() {
        rng.fill_bytes(&mut pool);
        for e in pool.iter().filter(|&&e| e < LIMIT) {
            token[filled] = ALPHABET[(e % 62) as usize];
            filled += 1;
            if filled == token.len() {
                break;
            }
        }
    }
    debug_assert!(token.is_ascii());
    // SAFETY: ok because token consists of ASCII code points
    unsafe { FStr::from_inner_unchecked(token) }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Fingerprint};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Fingerprint {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.as_str())
        }
    }

    impl<'de> serde::Deserialize<'de> for Fingerprint {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(VisitorImpl)
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Fingerprint;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "8 hexadecimal digits")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }
    }
}
