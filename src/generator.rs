//! Identifier generator and related types.

use std::fmt;

use crate::{entropy, v4, Components, Config, Error, Fingerprint, Result, Uuid};

pub mod with_rand08;

#[cfg(test)]
mod tests;

/// The counter wraps around to zero when it reaches this value.
const COUNTER_MODULUS: u32 = 0xff_ffff;

/// A trait that defines the minimum random number generator interface for [`Generator`].
///
/// Implementations must draw from a cryptographically secure source; the uniqueness of generated
/// identifiers depends on it.
pub trait RandSource {
    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// Represents an identifier generator that encapsulates the host fingerprint, the process and
/// worker identity, a rolling counter, and a random number generator.
///
/// Each call to [`generate`] hashes the current time, a monotonic clock reading, the fingerprint,
/// the process and worker IDs, fresh random values and the next counter value into one
/// UUID-shaped identifier. The counter makes two consecutive calls on the same instance differ
/// even if every other component happens to repeat.
///
/// Generators are independent of each other; there is no process-wide default instance. All
/// mutating methods take `&mut self`, so sharing one instance across threads requires a lock.
///
/// # Examples
///
/// ```rust
/// use std::{sync, thread};
/// use ultra_uuid::Generator;
///
/// let g = sync::Arc::new(sync::Mutex::new(Generator::new()));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
///
/// # Generator functions
///
/// | Method             | Output                               | Advances counter |
/// | ------------------ | ------------------------------------ | ---------------- |
/// | [`generate`]       | hashed 8-4-4-4-12 identifier         | Yes              |
/// | [`generate_v4`]    | RFC 4122 version 4 UUID              | No               |
/// | [`generate_short`] | compact lowercase alphanumeric string | Yes              |
/// | [`generate_batch`] | `count` results of [`generate`]      | `count` times    |
///
/// [`generate`]: Generator::generate
/// [`generate_v4`]: Generator::generate_v4
/// [`generate_short`]: Generator::generate_short
/// [`generate_batch`]: Generator::generate_batch
pub struct Generator<R = with_rand08::Adapter<rand::rngs::OsRng>> {
    fingerprint: Fingerprint,
    process_id: u32,
    worker_id: u32,
    counter: u32,

    /// The random number generator used by the generator.
    rng: R,
}

impl Generator {
    /// Creates a generator instance backed by the operating system's secure random source.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a generator instance backed by the operating system's secure random source, with
    /// the specified configuration.
    pub fn with_config(config: Config) -> Self {
        Self::with_rand_source(with_rand08::Adapter(rand::rngs::OsRng), config)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandSource> Generator<R> {
    /// Creates a generator instance with a custom random source.
    pub fn with_rand_source(rng: R, config: Config) -> Self {
        let fingerprint = config.fingerprint.unwrap_or_else(Fingerprint::detect);
        let process_id = std::process::id();
        tracing::debug!(
            %fingerprint,
            process_id,
            worker_id = config.worker_id,
            "created identifier generator"
        );
        Self {
            fingerprint,
            process_id,
            worker_id: config.worker_id,
            counter: 0,
            rng,
        }
    }

    /// Returns the machine fingerprint mixed into every hashed identifier.
    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Returns the process ID captured at construction.
    pub fn process_id(&self) -> u32 {
        self.process_id
    }

    /// Returns the worker ordinal captured at construction.
    pub fn worker_id(&self) -> u32 {
        self.worker_id
    }

    /// Generates a new hashed identifier from the current time.
    ///
    /// The result matches `^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$` but
    /// carries no fixed version or variant bits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ultra_uuid::Generator;
    ///
    /// let mut g = Generator::new();
    /// let (a, b) = (g.generate(), g.generate());
    /// assert_ne!(a, b);
    /// println!("{}", a); // e.g. "615c6f69-17fa-461e-2a59-13d0e75cfc9b"
    /// ```
    pub fn generate(&mut self) -> Uuid {
        self.generate_core(entropy::unix_ts_ms(), entropy::high_res_ns())
    }

    /// Generates a new hashed identifier from the clock readings passed.
    ///
    /// `unix_ts_ms` is the Unix time in milliseconds and `high_res_ns` a monotonic clock reading
    /// in nanoseconds. Random components and the counter are drawn from the generator as usual.
    pub fn generate_core(&mut self, unix_ts_ms: u64, high_res_ns: u128) -> Uuid {
        self.components(unix_ts_ms, high_res_ns).digest()
    }

    /// Collects the entropy components for one hashed identifier, advancing the counter.
    fn components(&mut self, unix_ts_ms: u64, high_res_ns: u128) -> Components {
        let random = [
            entropy::random_segment(&mut self.rng),
            entropy::random_segment(&mut self.rng),
        ];
        let nano_token = entropy::nano_token(&mut self.rng);
        Components {
            unix_ts_ms,
            high_res_ns,
            fingerprint: self.fingerprint,
            process_id: self.process_id,
            worker_id: self.worker_id,
            random,
            nano_token,
            counter: self.next_counter(),
        }
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    ///
    /// The counter and the other entropy components are left untouched.
    pub fn generate_v4(&mut self) -> Uuid {
        v4::from_random_bytes(entropy::random_segment(&mut self.rng))
    }

    /// Generates a compact identifier from the current time.
    ///
    /// The result is the base-36 timestamp, 4 random hex digits and the base-36 counter
    /// concatenated without separators, e.g. `"loyw3v28a3f90001"`.
    pub fn generate_short(&mut self) -> String {
        self.generate_short_core(entropy::unix_ts_ms())
    }

    /// Generates a compact identifier from the `unix_ts_ms` passed.
    pub fn generate_short_core(&mut self, unix_ts_ms: u64) -> String {
        use crate::encoding::{push_base36, push_base36_padded, push_hex};

        let random: [u8; 2] = entropy::random_segment(&mut self.rng);
        let counter = self.next_counter();

        let mut dst = String::with_capacity(20);
        push_base36(&mut dst, unix_ts_ms.into());
        push_hex(&mut dst, &random);
        push_base36_padded(&mut dst, counter.into(), 4);
        dst
    }

    /// Generates `count` hashed identifiers in generation order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `count` is negative or otherwise does not fit in
    /// `usize`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ultra_uuid::{Error, Generator};
    ///
    /// let mut g = Generator::new();
    /// assert_eq!(g.generate_batch(3)?.len(), 3);
    /// assert!(g.generate_batch(0)?.is_empty());
    /// assert!(matches!(g.generate_batch(-1), Err(Error::InvalidArgument(_))));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn generate_batch<N>(&mut self, count: N) -> Result<Vec<Uuid>>
    where
        N: TryInto<usize> + Copy + fmt::Display,
    {
        let n = batch_len(count)?;
        Ok(std::iter::repeat_with(|| self.generate()).take(n).collect())
    }

    /// Generates `count` hashed identifiers in generation order from the clock readings passed.
    ///
    /// Every identifier in the batch shares `unix_ts_ms` and `high_res_ns`; the counter and the
    /// random components still differ between them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `count` is negative or otherwise does not fit in
    /// `usize`.
    pub fn generate_batch_core<N>(
        &mut self,
        count: N,
        unix_ts_ms: u64,
        high_res_ns: u128,
    ) -> Result<Vec<Uuid>>
    where
        N: TryInto<usize> + Copy + fmt::Display,
    {
        let n = batch_len(count)?;
        Ok(std::iter::repeat_with(|| self.generate_core(unix_ts_ms, high_res_ns))
            .take(n)
            .collect())
    }

    /// Increments the counter modulo `0xFFFFFF` and returns the new value.
    fn next_counter(&mut self) -> u32 {
        self.counter = (self.counter + 1) % COUNTER_MODULUS;
        self.counter
    }
}

/// Converts a requested batch size into a length.
fn batch_len<N>(count: N) -> Result<usize>
where
    N: TryInto<usize> + Copy + fmt::Display,
{
    let n: usize = count.try_into().map_err(|_| {
        Error::InvalidArgument(format!("batch count must be a non-negative integer: {count}"))
    })?;
    tracing::trace!(count = n, "generating batch");
    Ok(n)
}

impl<R> fmt::Debug for Generator<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("fingerprint", &self.fingerprint)
            .field("process_id", &self.process_id)
            .field("worker_id", &self.worker_id)
            .field("counter", &self.counter)
            .finish_non_exhaustive()
    }
}

/// Supports operations as an infinite iterator that produces a new hashed identifier for each
/// call of `next()`.
///
/// # Examples
///
/// ```rust
/// use ultra_uuid::Generator;
///
/// Generator::new()
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{i}] {e}"));
/// ```
impl<R: RandSource> Iterator for Generator<R> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RandSource> std::iter::FusedIterator for Generator<R> {}
