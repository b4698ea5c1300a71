//! Integration with `rand` (v0.8) crate.

use super::{Config, Generator, RandSource};
use rand::{CryptoRng, RngCore};

/// An adapter that implements [`RandSource`] for cryptographically secure [`RngCore`] types.
///
/// The [`CryptoRng`] bound keeps general-purpose pseudo-random generators out of identifier
/// generation.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore + CryptoRng> RandSource for Adapter<T> {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
}

impl<T: RngCore + CryptoRng> Generator<Adapter<T>> {
    /// Creates a generator object with a specified random number generator that implements
    /// [`RngCore`] and [`CryptoRng`] from `rand` (v0.8) crate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ultra_uuid::Generator;
    ///
    /// let mut g = Generator::with_rand08(rand::rngs::OsRng);
    /// println!("{}", g.generate());
    /// ```
    pub fn with_rand08(rng: T) -> Self {
        Self::with_rand_source(Adapter(rng), Config::default())
    }

    /// Creates a generator object with a specified random number generator and configuration.
    pub fn with_rand08_and_config(rng: T, config: Config) -> Self {
        Self::with_rand_source(Adapter(rng), config)
    }
}
