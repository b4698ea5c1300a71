//! Generator configuration.

use crate::{Error, Fingerprint, Result};

/// Settings applied when constructing a [`Generator`](crate::Generator).
///
/// # Examples
///
/// ```rust
/// use ultra_uuid::{Config, Generator};
///
/// let config = Config::new().with_worker_id(3);
/// let mut g = Generator::with_config(config);
/// assert_eq!(g.worker_id(), 3);
/// println!("{}", g.generate());
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Ordinal assigned by the surrounding process orchestration layer, or `0` if there is none.
    pub worker_id: u32,

    /// Machine fingerprint to use instead of the detected one.
    pub fingerprint: Option<Fingerprint>,
}

impl Config {
    /// Environment variable read by [`Config::from_env`] for the worker ordinal.
    pub const WORKER_ID_VAR: &'static str = "ULTRA_UUID_WORKER_ID";

    /// Environment variable read by [`Config::from_env`] for the fingerprint override.
    pub const FINGERPRINT_VAR: &'static str = "ULTRA_UUID_FINGERPRINT";

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the worker ordinal.
    pub fn with_worker_id(mut self, worker_id: u32) -> Self {
        self.worker_id = worker_id;
        self
    }

    /// Sets the fingerprint override.
    pub fn with_fingerprint(mut self, fingerprint: Fingerprint) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// Unset variables keep their defaults; set but malformed ones are reported as
    /// [`Error::InvalidArgument`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key-value lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(Self::WORKER_ID_VAR) {
            config.worker_id = value.trim().parse::<u32>().map_err(|err| {
                tracing::warn!(%value, "malformed worker id in configuration");
                Error::InvalidArgument(format!("{}={:?}: {}", Self::WORKER_ID_VAR, value, err))
            })?;
        }

        if let Some(value) = lookup(Self::FINGERPRINT_VAR) {
            config.fingerprint = Some(value.trim().parse::<Fingerprint>().map_err(|_| {
                tracing::warn!(%value, "malformed fingerprint in configuration");
                Error::InvalidArgument(format!(
                    "{}={:?}: expected 8 hex digits",
                    Self::FINGERPRINT_VAR,
                    value
                ))
            })?);
        }

        Ok(config)
    }
}
