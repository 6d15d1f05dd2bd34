//! Fractal compositions of a single noise source.
//!
//! Every composition samples octaves at doubling frequency and halving
//! amplitude, then divides by the summed amplitude so the result stays in the
//! range of its per-octave term.

use glam::DVec3;
use noise::NoiseFn;

const LACUNARITY: f64 = 2.0;
const GAIN: f64 = 0.5;

/// How octaves of noise are combined into one scalar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Composition {
    /// Signed sum, smooth multi-scale terrain. Range `[-1, 1]`.
    Fbm,
    /// Sum of `|noise|`, chaotic cloud-like texture. Range `[0, 1]`.
    Turbulence,
    /// Sum of `(1 - |noise|)^2`, sharp ridge lines. Range `[0, 1]`.
    Ridged,
}

impl Composition {
    /// Evaluate this composition at `point`.
    pub fn sample<N>(self, noise: &N, point: DVec3, octaves: u32) -> f64
    where
        N: NoiseFn<f64, 3> + ?Sized,
    {
        match self {
            Composition::Fbm => fbm(noise, point, octaves),
            Composition::Turbulence => turbulence(noise, point, octaves),
            Composition::Ridged => ridged(noise, point, octaves),
        }
    }
}

/// Fractal Brownian motion.
pub fn fbm<N>(noise: &N, point: DVec3, octaves: u32) -> f64
where
    N: NoiseFn<f64, 3> + ?Sized,
{
    accumulate(noise, point, octaves, |n| n)
}

/// Fractal sum of absolute noise values.
pub fn turbulence<N>(noise: &N, point: DVec3, octaves: u32) -> f64
where
    N: NoiseFn<f64, 3> + ?Sized,
{
    accumulate(noise, point, octaves, f64::abs)
}

/// Ridged multifractal: each octave contributes `(1 - |n|)^2`.
pub fn ridged<N>(noise: &N, point: DVec3, octaves: u32) -> f64
where
    N: NoiseFn<f64, 3> + ?Sized,
{
    accumulate(noise, point, octaves, |n| {
        let r = 1.0 - n.abs();
        r * r
    })
}

fn accumulate<N>(noise: &N, point: DVec3, octaves: u32, shape: impl Fn(f64) -> f64) -> f64
where
    N: NoiseFn<f64, 3> + ?Sized,
{
    let mut total = 0.0;
    let mut norm = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;

    for _ in 0..octaves {
        let p = point * frequency;
        total += shape(noise.get([p.x, p.y, p.z])) * amplitude;
        norm += amplitude;
        frequency *= LACUNARITY;
        amplitude *= GAIN;
    }

    if norm > 0.0 { total / norm } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoiseField;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    struct Constant(f64);

    impl NoiseFn<f64, 3> for Constant {
        fn get(&self, _point: [f64; 3]) -> f64 {
            self.0
        }
    }

    fn random_points(count: usize) -> Vec<DVec3> {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        (0..count)
            .map(|_| {
                DVec3::new(
                    rng.random_range(-64.0..64.0),
                    rng.random_range(-64.0..64.0),
                    rng.random_range(-64.0..64.0),
                )
            })
            .collect()
    }

    #[test]
    fn test_fbm_within_unit_range() {
        let field = NoiseField::new(17);
        for p in random_points(10_000) {
            let v = fbm(&field, p, 6);
            assert!((-1.0..=1.0).contains(&v), "fbm at {p} = {v}");
        }
    }

    #[test]
    fn test_turbulence_non_negative() {
        let field = NoiseField::new(17);
        for p in random_points(10_000) {
            let v = turbulence(&field, p, 5);
            assert!((0.0..=1.0).contains(&v), "turbulence at {p} = {v}");
        }
    }

    #[test]
    fn test_ridged_within_unit_range() {
        let field = NoiseField::new(17);
        for p in random_points(2_000) {
            let v = ridged(&field, p, 4);
            assert!((0.0..=1.0).contains(&v), "ridged at {p} = {v}");
        }
    }

    #[test]
    fn test_constant_source_normalizes_to_itself() {
        let source = Constant(-0.4);
        let p = DVec3::new(1.0, 2.0, 3.0);
        assert!((fbm(&source, p, 5) + 0.4).abs() < 1e-12);
        assert!((turbulence(&source, p, 5) - 0.4).abs() < 1e-12);
        assert!((ridged(&source, p, 5) - 0.36).abs() < 1e-12);
    }

    #[test]
    fn test_zero_octaves_is_zero() {
        let field = NoiseField::new(1);
        let p = DVec3::new(0.3, 0.4, 0.5);
        assert_eq!(fbm(&field, p, 0), 0.0);
        assert_eq!(turbulence(&field, p, 0), 0.0);
        assert_eq!(ridged(&field, p, 0), 0.0);
    }

    #[test]
    fn test_composition_dispatch() {
        let field = NoiseField::new(8);
        let p = DVec3::new(1.1, -0.7, 2.3);
        assert_eq!(Composition::Fbm.sample(&field, p, 4), fbm(&field, p, 4));
        assert_eq!(
            Composition::Turbulence.sample(&field, p, 4),
            turbulence(&field, p, 4)
        );
        assert_eq!(Composition::Ridged.sample(&field, p, 4), ridged(&field, p, 4));
    }

    #[test]
    fn test_works_through_trait_object() {
        let field = NoiseField::new(8);
        let dynamic: &dyn NoiseFn<f64, 3> = &field;
        let p = DVec3::new(0.9, 0.1, -4.2);
        assert_eq!(fbm(dynamic, p, 3), fbm(&field, p, 3));
    }
}
