//! Permutation-table gradient noise in three dimensions.
//!
//! Integer lattice cells are hashed through a seeded permutation table, each of
//! the eight cell corners contributes the dot product of a gradient (one of the
//! twelve cube-edge directions) with the corner-relative offset, and the
//! contributions are blended with the quintic fade curve.

use noise::NoiseFn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of entries in the doubled permutation table.
pub const PERMUTATION_LEN: usize = 512;

/// A seeded 3D gradient-noise field.
///
/// Immutable after construction. Every sprite builds its own field so that no
/// two bodies share noise state.
#[derive(Clone)]
pub struct NoiseField {
    seed: u64,
    perm: [u8; PERMUTATION_LEN],
}

impl NoiseField {
    /// Build the field for `seed`.
    ///
    /// The base table `0..=255` is shuffled with Fisher–Yates driven by a
    /// ChaCha8 stream seeded from `seed`, then duplicated so corner lookups
    /// never need to wrap.
    pub fn new(seed: u64) -> Self {
        let mut base: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for i in (1..base.len()).rev() {
            let j = rng.random_range(0..=i);
            base.swap(i, j);
        }

        let mut perm = [0u8; PERMUTATION_LEN];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = base[i & 255];
        }

        Self { seed, perm }
    }

    /// The seed this field was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The doubled permutation table.
    pub fn permutation(&self) -> &[u8; PERMUTATION_LEN] {
        &self.perm
    }

    /// Sample the noise at `(x, y, z)`. The result is in `[-1, 1]`.
    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let xf = x.floor();
        let yf = y.floor();
        let zf = z.floor();

        let xi = (xf as i64 & 255) as usize;
        let yi = (yf as i64 & 255) as usize;
        let zi = (zf as i64 & 255) as usize;

        let x = x - xf;
        let y = y - yf;
        let z = z - zf;

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        let value = lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], x, y, z), grad(p[ba], x - 1.0, y, z)),
                lerp(u, grad(p[ab], x, y - 1.0, z), grad(p[bb], x - 1.0, y - 1.0, z)),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa + 1], x, y, z - 1.0),
                    grad(p[ba + 1], x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p[ab + 1], x, y - 1.0, z - 1.0),
                    grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        );

        value.clamp(-1.0, 1.0)
    }
}

impl NoiseFn<f64, 3> for NoiseField {
    fn get(&self, point: [f64; 3]) -> f64 {
        self.noise(point[0], point[1], point[2])
    }
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot the corner offset with one of the twelve cube-edge gradients selected
/// by the low four bits of `hash` (four of the sixteen codes repeat).
#[inline]
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_noise() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        for i in 0..500 {
            let t = i as f64 * 0.173;
            assert_eq!(a.noise(t, t * 0.5, -t), b.noise(t, t * 0.5, -t));
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let differs = (0..200).any(|i| {
            let t = i as f64 * 0.37 + 0.1;
            (a.noise(t, 0.3, 0.7) - b.noise(t, 0.3, 0.7)).abs() > 1e-9
        });
        assert!(differs, "Seeds 1 and 2 should produce different fields");
    }

    #[test]
    fn test_noise_within_unit_range() {
        let field = NoiseField::new(7);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..10_000 {
            let x = rng.random_range(-500.0..500.0);
            let y = rng.random_range(-500.0..500.0);
            let z = rng.random_range(-500.0..500.0);
            let n = field.noise(x, y, z);
            assert!(
                (-1.0..=1.0).contains(&n),
                "noise({x}, {y}, {z}) = {n} out of range"
            );
        }
    }

    #[test]
    fn test_zero_at_lattice_points() {
        let field = NoiseField::new(12345);
        for (x, y, z) in [(0.0, 0.0, 0.0), (3.0, -2.0, 17.0), (-101.0, 64.0, 255.0)] {
            assert_eq!(field.noise(x, y, z), 0.0);
        }
    }

    #[test]
    fn test_seed_zero_permutation_is_shuffled() {
        let field = NoiseField::new(0);
        let perm = field.permutation();
        let identity = (0..256).all(|i| perm[i] as usize == i);
        assert!(!identity, "Seed 0 must not produce the identity permutation");

        let nonzero = (0..100).any(|i| field.noise(i as f64 * 0.31 + 0.5, 0.25, 0.75) != 0.0);
        assert!(nonzero, "Seed 0 field must not be degenerate");
    }

    #[test]
    fn test_permutation_is_doubled_shuffle() {
        let field = NoiseField::new(5);
        let perm = field.permutation();
        let mut seen = [false; 256];
        for &v in &perm[..256] {
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s), "First half must be a permutation of 0..=255");
        assert_eq!(&perm[..256], &perm[256..]);
    }

    #[test]
    fn test_continuous_across_cells() {
        let field = NoiseField::new(3);
        let step = 0.001;
        for i in 0..5_000 {
            let x = i as f64 * step;
            let delta = (field.noise(x + step, 0.4, 0.6) - field.noise(x, 0.4, 0.6)).abs();
            assert!(delta < 0.05, "Discontinuity at x={x}: delta={delta}");
        }
    }

    #[test]
    fn test_noise_fn_matches_inherent() {
        let field = NoiseField::new(11);
        assert_eq!(field.get([1.25, 2.5, -3.75]), field.noise(1.25, 2.5, -3.75));
    }
}
