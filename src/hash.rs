//! Stateless hash-based randomness.
//!
//! Every random decision in a transition is a pure function of a few small
//! integers, so a transition can be replayed exactly without storing a seed.

const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Hash four integers into a well-mixed 32-bit value.
///
/// FNV-1a over the four inputs (each offset by one so that an all-zero input
/// differs from the empty hash), followed by an avalanche finalizer.
/// Inputs are bit patterns: callers holding signed values can cast with `as u32`.
///
/// ## Example
///
/// ```rust
/// use cascii_morph::hash32;
///
/// assert_eq!(hash32(1, 0, 0, 11), hash32(1, 0, 0, 11));
/// assert_ne!(hash32(1, 0, 0, 11), hash32(2, 0, 0, 11));
/// ```
#[inline]
pub fn hash32(a: u32, b: u32, c: u32, d: u32) -> u32 {
    let mut h = FNV_OFFSET_BASIS;
    for input in [a, b, c, d] {
        h = (h ^ input.wrapping_add(1)).wrapping_mul(FNV_PRIME);
    }

    h ^= h >> 16;
    h = h.wrapping_mul(0xCC9E_2D51);
    h ^= h >> 13;
    h = h.wrapping_mul(0xC2B2_AE35);
    h ^= h >> 16;
    h
}

/// Map four integers to a value in `[0, 0.9999]` with four-decimal granularity.
#[inline]
pub fn rand01(a: u32, b: u32, c: u32, d: u32) -> f64 {
    (hash32(a, b, c, d) % 10_000) as f64 / 10_000.0
}
