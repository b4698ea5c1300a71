use super::*;
use crate::encoding::base36;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// A random source that repeats one byte, for reproducible component values.
struct FixedRandSource(u8);

impl RandSource for FixedRandSource {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(self.0);
    }
}

fn seeded(seed: u64, config: Config) -> Generator<with_rand08::Adapter<ChaCha12Rng>> {
    Generator::with_rand08_and_config(ChaCha12Rng::seed_from_u64(seed), config)
}

fn test_config() -> Config {
    Config::new()
        .with_worker_id(7)
        .with_fingerprint("0a1b2c3d".parse().unwrap())
}

const HASHED_PATTERN: &str = r"^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";

const N_SAMPLES: usize = 10_000;
thread_local!(static SAMPLES: Vec<String> = {
    let mut g = Generator::new();
    (0..N_SAMPLES).map(|_| g.generate().into()).collect()
});

/// Generates canonical string
#[test]
fn generates_canonical_string() {
    let re = regex::Regex::new(HASHED_PATTERN).unwrap();
    SAMPLES.with(|samples| {
        for e in samples {
            assert!(re.is_match(e));
        }
    });
}

/// Generates 10k identifiers without collision
#[test]
fn generates_10k_identifiers_without_collision() {
    use std::collections::HashSet;
    SAMPLES.with(|samples| {
        let s: HashSet<&String> = samples.iter().collect();
        assert_eq!(s.len(), N_SAMPLES);
    });
}

/// Returns different values on consecutive calls
#[test]
fn returns_different_values_on_consecutive_calls() {
    let mut g = Generator::new();
    let mut prev = g.generate();
    for _ in 0..1_000 {
        let curr = g.generate();
        assert_ne!(prev, curr);
        prev = curr;
    }
}

/// Differs on consecutive calls even with repeating clock and random values
#[test]
fn differs_on_consecutive_calls_even_with_repeating_clock_and_random_values() {
    let mut g = Generator::with_rand_source(FixedRandSource(0xab), test_config());
    let a = g.generate_core(1_700_000_000_000, 42);
    let b = g.generate_core(1_700_000_000_000, 42);
    assert_ne!(a, b);
}

/// Generates unique identifiers across instances
#[test]
fn generates_unique_identifiers_across_instances() {
    use std::collections::HashSet;
    let mut g1 = Generator::new();
    let mut g2 = Generator::new();
    let mut s = HashSet::new();
    s.extend(g1.generate_batch(50).unwrap());
    s.extend(g2.generate_batch(50).unwrap());
    assert_eq!(s.len(), 100);
}

/// Hashes components in fixed order
#[test]
fn hashes_components_in_fixed_order() {
    let mut g = Generator::with_rand_source(FixedRandSource(0xab), test_config());
    let e = g.generate_core(1_700_000_000_000, 123_456_789);

    // 0xab is accepted by the token sampler and maps to symbol 171 % 62 = 47 ('l')
    let expected = Components {
        unix_ts_ms: 1_700_000_000_000,
        high_res_ns: 123_456_789,
        fingerprint: "0a1b2c3d".parse().unwrap(),
        process_id: std::process::id(),
        worker_id: 7,
        random: [[0xab; 4]; 2],
        nano_token: fstr::FStr::from_inner(*b"llllllll").unwrap(),
        counter: 1,
    };
    assert_eq!(
        expected.join(),
        format!(
            "loyw3v28-21i3v9-0a1b2c3d-{}-7-abababab-abababab-llllllll-0001",
            base36(std::process::id().into())
        )
    );
    assert_eq!(e, expected.digest());
}

/// Reproduces identifiers from identical seeds and clock readings
#[test]
fn reproduces_identifiers_from_identical_seeds_and_clock_readings() {
    let mut g1 = seeded(42, test_config());
    let mut g2 = seeded(42, test_config());
    let mut g3 = seeded(43, test_config());
    for i in 0..100u64 {
        let ts = 1_700_000_000_000 + i;
        let e = g1.generate_core(ts, i.into());
        assert_eq!(e, g2.generate_core(ts, i.into()));
        assert_ne!(e, g3.generate_core(ts, i.into()));
    }
}

/// Mixes worker id and fingerprint into identifiers
#[test]
fn mixes_worker_id_and_fingerprint_into_identifiers() {
    let mut base = seeded(42, test_config());
    let mut other_worker = seeded(42, test_config().with_worker_id(8));
    let other_fingerprint = "0a1b2c3e".parse().unwrap();
    let mut other_host = seeded(42, test_config().with_fingerprint(other_fingerprint));
    let e = base.generate_core(1_700_000_000_000, 0);
    assert_ne!(e, other_worker.generate_core(1_700_000_000_000, 0));
    assert_ne!(e, other_host.generate_core(1_700_000_000_000, 0));
}

/// Captures identity at construction
#[test]
fn captures_identity_at_construction() {
    let g = Generator::with_config(test_config());
    assert_eq!(g.worker_id(), 7);
    assert_eq!(g.fingerprint().as_str(), "0a1b2c3d");
    assert_eq!(g.process_id(), std::process::id());

    let g = Generator::new();
    assert_eq!(g.worker_id(), 0);
    assert_eq!(g.fingerprint(), Fingerprint::detect());
}

/// Wraps counter around at maximum
#[test]
fn wraps_counter_around_at_maximum() {
    let mut g = Generator::with_rand_source(FixedRandSource(0), test_config());
    assert_eq!(g.next_counter(), 1);
    assert_eq!(g.next_counter(), 2);

    g.counter = 0xff_fffd;
    assert_eq!(g.next_counter(), 0xff_fffe);
    assert_eq!(g.next_counter(), 0);
    assert_eq!(g.next_counter(), 1);
}

/// Advances counter on hashed and short forms only
#[test]
fn advances_counter_on_hashed_and_short_forms_only() {
    let mut g = Generator::with_config(test_config());
    g.generate();
    assert_eq!(g.counter, 1);
    g.generate_short();
    assert_eq!(g.counter, 2);
    g.generate_v4();
    assert_eq!(g.counter, 2);
    g.generate_batch(5u8).unwrap();
    assert_eq!(g.counter, 7);
}

/// Generates standard UUIDv4 values from the inner source
#[test]
fn generates_standard_uuidv4_values_from_the_inner_source() {
    let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
    let re = regex::Regex::new(pattern).unwrap();
    let mut g = Generator::new();
    for _ in 0..1_000 {
        let e = g.generate_v4();
        assert!(re.is_match(&e.encode()));
        assert_eq!(e.version(), Some(4));
    }

    let mut g = Generator::with_rand_source(FixedRandSource(0xff), test_config());
    assert_eq!(
        g.generate_v4().to_string(),
        "ffffffff-ffff-4fff-bfff-ffffffffffff"
    );
}

/// Generates short identifiers of lowercase alphanumerics
#[test]
fn generates_short_identifiers_of_lowercase_alphanumerics() {
    let re = regex::Regex::new(r"^[a-z0-9]+$").unwrap();
    let mut g = Generator::new();
    let mut prev = String::new();
    for _ in 0..1_000 {
        let e = g.generate_short();
        assert!(re.is_match(&e));
        assert!(e.len() > 8);
        assert_ne!(e, prev);
        prev = e;
    }
}

/// Concatenates timestamp, random segment and counter in short form
#[test]
fn concatenates_timestamp_random_segment_and_counter_in_short_form() {
    let mut g = Generator::with_rand_source(FixedRandSource(0x3c), test_config());
    assert_eq!(g.generate_short_core(1_700_000_000_000), "loyw3v283c3c0001");
    assert_eq!(g.generate_short_core(1_700_000_000_000), "loyw3v283c3c0002");

    g.counter = 36 * 36 * 36 * 36 - 1;
    assert_eq!(g.generate_short_core(35), "z3c3c10000");
}

/// Returns batch of requested length
#[test]
fn returns_batch_of_requested_length() {
    use std::collections::HashSet;
    let mut g = Generator::new();
    for n in [1usize, 10, 1_000] {
        let batch = g.generate_batch(n).unwrap();
        assert_eq!(batch.len(), n);
        assert_eq!(batch.iter().collect::<HashSet<_>>().len(), n);
    }
    assert!(g.generate_batch(0).unwrap().is_empty());
    assert!(g.generate_batch(0u64).unwrap().is_empty());
}

/// Returns batch in generation order
#[test]
fn returns_batch_in_generation_order() {
    let mut batched = seeded(42, test_config());
    let mut single = seeded(42, test_config());
    let batch = batched
        .generate_batch_core(16, 1_700_000_000_000, 123_456_789)
        .unwrap();
    let expected: Vec<Uuid> = (0..16)
        .map(|_| single.generate_core(1_700_000_000_000, 123_456_789))
        .collect();
    assert_eq!(batch, expected);
    assert_eq!(batched.counter, 16);

    let mut reversed = expected.clone();
    reversed.reverse();
    assert_ne!(batch, reversed);
}

/// Rejects negative batch count
#[test]
fn rejects_negative_batch_count() {
    let mut g = Generator::new();
    assert!(matches!(
        g.generate_batch(-1),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        g.generate_batch(i64::MIN),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        g.generate_batch_core(-1, 1_700_000_000_000, 0),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(g.counter, 0);
}

/// Supports iterator interface
#[test]
fn supports_iterator_interface() {
    let re = regex::Regex::new(HASHED_PATTERN).unwrap();
    let g = Generator::new();
    let v: Vec<Uuid> = g.take(8).collect();
    assert_eq!(v.len(), 8);
    for e in v {
        assert!(re.is_match(&e.encode()));
    }
}

/// Generates no duplicates under multithreading with a shared instance
#[test]
fn generates_no_duplicates_under_multithreading_with_a_shared_instance(
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    use std::{
        collections::HashSet,
        sync::{mpsc, Arc, Mutex},
        thread,
    };

    let g = Arc::new(Mutex::new(Generator::new()));
    let (tx, rx) = mpsc::channel();
    for _ in 0..4 {
        let (g, tx) = (Arc::clone(&g), tx.clone());
        thread::Builder::new()
            .spawn(move || {
                for _ in 0..2_500 {
                    let e = g.lock().unwrap().generate();
                    tx.send(e).unwrap();
                }
            })
            .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
    }
    drop(tx);

    let mut s = HashSet::new();
    while let Ok(e) = rx.recv() {
        s.insert(e);
    }

    assert_eq!(s.len(), 4 * 2_500);
    assert_eq!(g.lock().unwrap().counter, 4 * 2_500);
    Ok(())
}
