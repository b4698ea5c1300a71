//! Error type shared by the crate.

/// Errors returned by the fallible operations of this crate.
///
/// Identifier generation itself never fails; these variants cover caller-supplied input only.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum Error {
    /// An argument or configuration value outside of the accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A string that does not follow the expected textual representation.
    #[error("invalid string representation")]
    InvalidFormat,
}

/// Result type alias with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;
