use rand::{rngs::StdRng, SeedableRng};

/// Stream used for model weights.
pub const WEIGHT_STREAM: u64 = 0;
/// Stream used for per-evaluation noise.
pub const NOISE_STREAM: u64 = 1;

/// Construct a deterministic RNG from a fixed seed.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Construct a deterministic RNG for one named stream of an experiment seed.
///
/// Different streams of the same seed never share a state, so drawing noise
/// cannot perturb the weights an instance was built with.
pub fn stream_rng(seed: u64, stream: u64) -> StdRng {
    seeded_rng(mix(seed ^ mix(stream.wrapping_add(0x9E37_79B9_7F4A_7C15))))
}

// splitmix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
