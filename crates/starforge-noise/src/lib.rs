//! Seeded coherent noise for sprite synthesis: a permutation-table gradient
//! noise, its fractal compositions, and named frequency stacks that derive
//! several scalar fields from one noise source.

mod fractal;
mod gradient;
mod seed;
mod stack;

pub use fractal::{Composition, fbm, ridged, turbulence};
pub use gradient::{NoiseField, PERMUTATION_LEN};
pub use noise::NoiseFn;
pub use seed::{derive_seed, det_atan2, det_cos, det_sin, det_sqrt};
pub use stack::{FieldSpec, Fields, FrequencyStack};
