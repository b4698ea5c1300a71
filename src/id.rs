use std::{fmt, str};

use fstr::FStr;

use crate::Error;

/// Represents a 128-bit identifier rendered in the 8-4-4-4-12 hexadecimal form.
///
/// Both the entropy-hashed identifiers and the standard UUIDv4 identifiers are carried by this
/// type. Only the latter have meaningful [`version`](Uuid::version) and
/// [`variant`](Uuid::variant) fields; the hashed form takes whatever bits the digest produced.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns the variant field value.
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 => Variant::Var0,
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value if the variant field is `0b10`, or `None` otherwise.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ultra_uuid::Uuid;
    ///
    /// let x = "3f0c5e1a-9b2d-4e7f-8a61-0c4d2b9e7f13".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(y.as_str(), "3f0c5e1a-9b2d-4e7f-8a61-0c4d2b9e7f13");
    /// assert_eq!(format!("{}", y), "3f0c5e1a-9b2d-4e7f-8a61-0c4d2b9e7f13");
    /// # Ok::<(), ultra_uuid::Error>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for (i, e) in self.0.iter().enumerate() {
            let e = *e as usize;
            *buf_iter.next().unwrap() = DIGITS[e >> 4];
            *buf_iter.next().unwrap() = DIGITS[e & 15];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: ok because buffer consists of ASCII code points
        unsafe { FStr::from_inner_unchecked(buffer) }
    }
}

/// The variant field of a [`Uuid`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// `0b0xxx` (reserved for NCS backward compatibility)
    Var0,
    /// `0b10xx` (RFC 4122 layout)
    Var10,
    /// `0b110x` (reserved for Microsoft backward compatibility)
    Var110,
    /// `0b111x` (reserved for future definition)
    VarReserved,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = Error;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = hex_digit(iter.next())?;
            let lo = hex_digit(iter.next())?;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next() != Some('-') {
                return Err(Error::InvalidFormat);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(Error::InvalidFormat)
        }
    }
}

fn hex_digit(c: Option<char>) -> Result<u8, Error> {
    c.and_then(|c| c.to_digit(16))
        .map(|d| d as u8)
        .ok_or(Error::InvalidFormat)
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.encode().as_str().to_owned()
    }
}

impl TryFrom<String> for Uuid {
    type Error = Error;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{Uuid, Variant};

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [(u128, &'static str)] {
        &[
            (0, "00000000-0000-0000-0000-000000000000"),
            (
                0x0123_4567_89ab_cdef_0123_4567_89ab_cdef,
                "01234567-89ab-cdef-0123-456789abcdef",
            ),
            (
                0x2ca4_b2ce_6c13_40d4_bccf_37d2_2282_0f6f,
                "2ca4b2ce-6c13-40d4-bccf-37d222820f6f",
            ),
            (u128::MAX, "ffffffff-ffff-ffff-ffff-ffffffffffff"),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for (num, text) in prepare_cases() {
            let from_num = Uuid::from(*num);
            assert_eq!(Ok(from_num), text.parse());
            assert_eq!(Ok(from_num), text.to_uppercase().parse());
            assert_eq!(from_num.encode().as_str(), *text);
            assert_eq!(&from_num.to_string(), text);
            assert_eq!(&String::from(from_num), text);
            #[cfg(feature = "uuid")]
            assert_eq!(&uuid::Uuid::from(from_num).to_string(), text);
        }
    }

    /// Returns error to invalid string representation
    #[test]
    fn returns_error_to_invalid_string_representation() {
        let cases = [
            "",
            " 0180a8f0-5b82-75b4-9fef-ecad657c30bb",
            "0180a8f0-5b84-7438-ab50-f0626f78002b ",
            " 0180a8f0-5b84-7438-ab50-f063bd5331af ",
            "+0180a8f0-5b84-7438-ab50-f06405d35edb",
            "-0180a8f0-5b84-7438-ab50-f06508df4c2d",
            "0180a8f05b847438ab50f068decfbfd7",
            "0180a8f0-5b847438-ab50-f06991838802",
            "{0180a8f0-5b84-7438-ab50-f06ac2e5e082}",
            "0180a8f0-5b84-74 8-ab50-f06bed27bdc7",
            "0180a8g0-5b84-7438-ab50-f06c91175b8a",
            "0180a8f0-5b84-7438-ab50_f06d3ea24429",
        ];

        for e in cases {
            assert_eq!(e.parse::<Uuid>(), Err(crate::Error::InvalidFormat));
        }
    }

    /// Returns Nil and Max UUIDs
    #[test]
    fn returns_nil_and_max_uuids() {
        assert_eq!(
            Uuid::NIL.encode().as_str(),
            "00000000-0000-0000-0000-000000000000"
        );
        assert_eq!(
            Uuid::MAX.encode().as_str(),
            "ffffffff-ffff-ffff-ffff-ffffffffffff"
        );
    }

    /// Reads variant and version fields
    #[test]
    fn reads_variant_and_version_fields() {
        let v4: Uuid = "2ca4b2ce-6c13-40d4-bccf-37d222820f6f".parse().unwrap();
        assert_eq!(v4.variant(), Variant::Var10);
        assert_eq!(v4.version(), Some(4));

        let var0: Uuid = "7d1f0c3a-55e2-09b4-46a8-31f0e92d4b7c".parse().unwrap();
        assert_eq!(var0.variant(), Variant::Var0);
        assert_eq!(var0.version(), None);

        assert_eq!(Uuid::MAX.variant(), Variant::VarReserved);
        assert_eq!(Uuid::from(0xc0_u128 << 56).variant(), Variant::Var110);
    }

    /// Has symmetric converters
    #[test]
    fn has_symmetric_converters() {
        for (num, _) in prepare_cases() {
            let e = Uuid::from(*num);
            assert_eq!(Uuid::from(<[u8; 16]>::from(e)), e);
            assert_eq!(Uuid::from(u128::from(e)), e);
            assert_eq!(e.encode().parse(), Ok(e));
            assert_eq!(e.encode().to_uppercase().parse(), Ok(e));
            assert_eq!(Uuid::try_from(e.to_string()), Ok(e));
            assert_eq!(Uuid::try_from(e.to_string().to_uppercase()), Ok(e));
            #[cfg(feature = "uuid")]
            assert_eq!(Uuid::from(<uuid::Uuid>::from(e)), e);
        }
    }
}
