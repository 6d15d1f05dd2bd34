//! Deterministic seed derivation and math helpers.
//!
//! Sprite jobs derive their noise seed from a batch seed and a stable job key,
//! and the sampler routes its trigonometry through `libm` so the same seed
//! produces the same pixels on every platform.

use xxhash_rust::xxh3::Xxh3;

/// Derive a per-job seed from a batch seed and a job key such as
/// `"moon/rocky/3"`.
///
/// XXH3-64 of the little-endian base seed followed by the key bytes. The
/// algorithm is fixed, so cached manifests stay valid across toolchains.
pub fn derive_seed(base_seed: u64, key: &str) -> u64 {
    let mut hasher = Xxh3::new();
    hasher.update(&base_seed.to_le_bytes());
    hasher.update(key.as_bytes());
    hasher.digest()
}

/// Deterministic sine using libm (not platform libc).
#[inline]
pub fn det_sin(x: f64) -> f64 {
    libm::sin(x)
}

/// Deterministic cosine using libm.
#[inline]
pub fn det_cos(x: f64) -> f64 {
    libm::cos(x)
}

/// Deterministic atan2 using libm.
#[inline]
pub fn det_atan2(y: f64, x: f64) -> f64 {
    libm::atan2(y, x)
}

/// Deterministic sqrt using libm.
#[inline]
pub fn det_sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_seed_deterministic() {
        assert_eq!(derive_seed(999, "star/g/0"), derive_seed(999, "star/g/0"));
    }

    #[test]
    fn test_derive_seed_different_keys() {
        assert_ne!(derive_seed(42, "moon/rocky/0"), derive_seed(42, "moon/rocky/1"));
    }

    #[test]
    fn test_derive_seed_different_base_seeds() {
        assert_ne!(derive_seed(0, "gas_giant/jovian/0"), derive_seed(1, "gas_giant/jovian/0"));
    }

    #[test]
    fn test_derive_seed_is_plain_xxh3() {
        let mut bytes = 12345u64.to_le_bytes().to_vec();
        bytes.extend_from_slice(b"moon/rocky/0");
        assert_eq!(derive_seed(12345, "moon/rocky/0"), xxhash_rust::xxh3::xxh3_64(&bytes));
    }

    #[test]
    fn test_deterministic_math_functions() {
        let x = 1.234_567_890_123_4;
        assert_eq!(det_sin(x), det_sin(x));
        assert_eq!(det_cos(x), det_cos(x));
        assert_eq!(det_sqrt(x), det_sqrt(x));
        assert_eq!(det_atan2(x, 0.5), det_atan2(x, 0.5));
        assert!((det_sin(0.0)).abs() < 1e-15);
        assert!((det_cos(0.0) - 1.0).abs() < 1e-15);
    }
}
