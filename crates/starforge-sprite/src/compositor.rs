//! Per-body feature compositors.
//!
//! Each body kind turns its evaluated noise [`Fields`] into a [`Shade`] by
//! walking an ordered table of feature layers (see [`chain`]). Bodies with
//! effects beyond the disc (halo, corona, rings, accretion disk) add an
//! outside chain, and ringed bodies an overlay drawn over the disc.

pub mod chain;

mod asteroid;
mod black_hole;
mod gas_giant;
mod moon;
mod rocky;
mod star;

use glam::DVec3;
use noise::NoiseFn;
use starforge_noise::{Fields, FrequencyStack, det_cos, det_sin};

use crate::body::BodyKind;
use crate::palette::{PaletteSet, Rgb};
use crate::sampler::{FrameLayout, LightingModel, OutsideSample, SurfaceSample};

pub use asteroid::{AsteroidCompositor, AsteroidTuning};
pub use black_hole::{BlackHoleCompositor, BlackHoleTuning, RadialSample};
pub use gas_giant::{GasGiantCompositor, GasGiantTuning, Rings, Spot};
pub use moon::{CraterScale, MoonCompositor, MoonTuning};
pub use rocky::{RockyCompositor, RockyTuning};
pub use star::{StarCompositor, StarTuning};

/// How strongly the micro-detail term perturbs lit colors.
pub const DETAIL_STRENGTH: f64 = 0.06;
/// Frequency multiplier of the micro-detail term.
const DETAIL_FREQUENCY: f64 = 16.0;
const DETAIL_OFFSET: DVec3 = DVec3::new(3.0, 5.0, 7.0);

/// A resolved pixel color before lighting and quantization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shade {
    /// Linear color in 0..=255 units.
    pub color: [f64; 3],
    /// Coverage in `[0, 1]`.
    pub alpha: f64,
    /// Emissive shades ignore lighting and detail.
    pub emissive: bool,
}

impl Shade {
    /// An opaque surface color that takes lighting.
    pub fn lit(rgb: Rgb) -> Self {
        Self {
            color: rgb.map(f64::from),
            alpha: 1.0,
            emissive: false,
        }
    }

    /// A self-luminous color.
    pub fn emissive(rgb: Rgb, alpha: f64) -> Self {
        Self {
            color: rgb.map(f64::from),
            alpha,
            emissive: true,
        }
    }

    /// Nothing drawn.
    pub fn transparent() -> Self {
        Self {
            color: [0.0; 3],
            alpha: 0.0,
            emissive: true,
        }
    }

    /// Multiply the color.
    pub fn scaled(mut self, factor: f64) -> Self {
        self.color = self.color.map(|c| c * factor);
        self
    }

    /// Linear blend toward `other` by `t`.
    pub fn mix(mut self, other: Rgb, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        for (c, o) in self.color.iter_mut().zip(other) {
            *c += (f64::from(o) - *c) * t;
        }
        self
    }

    /// Quantize to RGBA. Lit shades are perturbed by `detail` and multiplied
    /// by `brightness` first.
    pub fn to_rgba(&self, detail: f64, brightness: f64) -> [u8; 4] {
        let factor = if self.emissive {
            1.0
        } else {
            (1.0 + detail * DETAIL_STRENGTH) * brightness
        };
        let [r, g, b] = self.color.map(|c| quantize(c * factor));
        [r, g, b, quantize(self.alpha.clamp(0.0, 1.0) * 255.0)]
    }
}

fn quantize(value: f64) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.round().clamp(0.0, 255.0) as u8
    }
}

/// The winning layer of a chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerHit {
    pub layer: &'static str,
    pub shade: Shade,
}

/// Per-frame inputs shared by every layer.
#[derive(Clone, Copy)]
pub struct FrameContext<'a> {
    /// The sprite's noise source, for layers that sample beyond the stack.
    pub noise: &'a dyn NoiseFn<f64, 3>,
    /// Animation phase in `[0, 2π)`.
    pub phase: f64,
    /// Phase times the body's spin.
    pub rotation: f64,
    /// `(cos phase, sin phase)`, a loop-safe time coordinate.
    pub time: (f64, f64),
    pub layout: FrameLayout,
}

impl<'a> FrameContext<'a> {
    pub fn new(noise: &'a dyn NoiseFn<f64, 3>, phase: f64, spin: u32, layout: FrameLayout) -> Self {
        Self {
            noise,
            phase,
            rotation: phase * f64::from(spin),
            time: (det_cos(phase), det_sin(phase)),
            layout,
        }
    }

    /// Raw noise at a point.
    pub fn sample(&self, point: DVec3) -> f64 {
        self.noise.get([point.x, point.y, point.z])
    }

    /// The micro-detail term at a world-space surface point.
    pub fn detail(&self, world: DVec3) -> f64 {
        self.sample(world * DETAIL_FREQUENCY + DETAIL_OFFSET)
    }
}

impl std::fmt::Debug for FrameContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameContext")
            .field("phase", &self.phase)
            .field("rotation", &self.rotation)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

/// Feature logic for one body kind and variant.
pub trait BodyCompositor: Send + Sync {
    fn kind(&self) -> BodyKind;

    /// Named fields evaluated at every disc sample.
    fn stack(&self) -> FrequencyStack;

    fn lighting(&self) -> LightingModel;

    /// Integer rotation multiplier so animations loop seamlessly.
    fn spin(&self) -> u32 {
        1
    }

    /// Sphere radius as a fraction of the half frame.
    fn disc_fraction(&self) -> f64;

    /// Outside samples beyond this many radii are skipped.
    fn effect_extent(&self) -> f64 {
        1.0
    }

    fn shade_disc(
        &self,
        sample: &SurfaceSample,
        fields: &Fields,
        palette: &PaletteSet,
        ctx: &FrameContext<'_>,
    ) -> Option<LayerHit>;

    fn shade_outside(
        &self,
        _sample: &OutsideSample,
        _palette: &PaletteSet,
        _ctx: &FrameContext<'_>,
    ) -> Option<LayerHit> {
        None
    }

    /// Drawn over the disc result, alpha-composited.
    fn shade_overlay(
        &self,
        _sample: &SurfaceSample,
        _palette: &PaletteSet,
        _ctx: &FrameContext<'_>,
    ) -> Option<LayerHit> {
        None
    }
}

/// The compositor for `kind`, tuned for `variant`. Unknown variants get the
/// kind's default tuning.
pub fn compositor_for(kind: BodyKind, variant: &str) -> Box<dyn BodyCompositor> {
    match kind {
        BodyKind::Star => Box::new(StarCompositor::new(variant)),
        BodyKind::RockyPlanet => Box::new(RockyCompositor::new(variant)),
        BodyKind::GasGiant => Box::new(GasGiantCompositor::new(variant)),
        BodyKind::Moon => Box::new(MoonCompositor::new(variant)),
        BodyKind::Asteroid => Box::new(AsteroidCompositor::new(variant)),
        BodyKind::BlackHole => Box::new(BlackHoleCompositor::new(variant)),
    }
}

/// Map `value` from `[low, high]` to `[0, 1]`, clamped.
pub(crate) fn remap(value: f64, low: f64, high: f64) -> f64 {
    if high <= low {
        return if value >= high { 1.0 } else { 0.0 };
    }
    ((value - low) / (high - low)).clamp(0.0, 1.0)
}

/// Hermite smoothstep over `[edge0, edge1]`.
pub(crate) fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = remap(x, edge0, edge1);
    t * t * (3.0 - 2.0 * t)
}

/// Emissive atmosphere rim fading from the limb out to `extent` radii.
pub(crate) fn atmosphere_halo(normalized_distance: f64, palette: &PaletteSet, extent: f64) -> Shade {
    let fade = 1.0 - remap(normalized_distance, 1.0, extent);
    let color = palette.ramp("atmosphere").pick(fade);
    Shade::emissive(color, 0.8 * fade * fade)
}

/// Map a signed value in `[-1, 1]` to `[0, 1]`.
pub(crate) fn unit(value: f64) -> f64 {
    ((value + 1.0) * 0.5).clamp(0.0, 1.0)
}

#[cfg(test)]
pub(crate) mod testing {
    use noise::NoiseFn;

    use super::FrameContext;
    use crate::sampler::{FrameLayout, LightingModel, PixelSample, SurfaceSample, SurfaceSampler};

    /// Noise stub returning one value everywhere.
    #[derive(Clone, Copy, Debug)]
    pub struct ConstantNoise(pub f64);

    impl NoiseFn<f64, 3> for ConstantNoise {
        fn get(&self, _point: [f64; 3]) -> f64 {
            self.0
        }
    }

    pub fn context(
        noise: &dyn NoiseFn<f64, 3>,
        phase: f64,
        width: u32,
        height: u32,
        disc_fraction: f64,
    ) -> FrameContext<'_> {
        FrameContext::new(noise, phase, 1, FrameLayout::new(width, height, disc_fraction))
    }

    /// The disc sample at `(x, y)` of the context's frame.
    pub fn disc_sample(ctx: &FrameContext<'_>, x: u32, y: u32, lighting: LightingModel) -> SurfaceSample {
        match SurfaceSampler::new(ctx.layout, 1, ctx.rotation, lighting).sample(x, y) {
            PixelSample::Disc(sample) => sample,
            PixelSample::Outside(_) => panic!("({x}, {y}) is outside the disc"),
        }
    }

    /// The outside sample at `(x, y)` of the context's frame.
    pub fn outside_sample(ctx: &FrameContext<'_>, x: u32, y: u32) -> crate::sampler::OutsideSample {
        let lighting = LightingModel::new(1.0, 1.0, 1.0, 0.0);
        match SurfaceSampler::new(ctx.layout, 1, ctx.rotation, lighting).sample(x, y) {
            PixelSample::Outside(sample) => sample,
            PixelSample::Disc(_) => panic!("({x}, {y}) is on the disc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lit_shade_takes_brightness() {
        let shade = Shade::lit([100, 200, 50]);
        assert_eq!(shade.to_rgba(0.0, 1.0), [100, 200, 50, 255]);
        assert_eq!(shade.to_rgba(0.0, 0.5), [50, 100, 25, 255]);
        assert_eq!(shade.to_rgba(0.0, 2.0), [200, 255, 100, 255]);
    }

    #[test]
    fn test_detail_perturbs_lit_only() {
        let lit = Shade::lit([100, 100, 100]);
        assert_eq!(lit.to_rgba(1.0, 1.0), [106, 106, 106, 255]);
        let glow = Shade::emissive([100, 100, 100], 0.5);
        assert_eq!(glow.to_rgba(1.0, 0.1), [100, 100, 100, 128]);
    }

    #[test]
    fn test_transparent_quantizes_to_zero() {
        assert_eq!(Shade::transparent().to_rgba(0.3, 0.7), [0, 0, 0, 0]);
    }

    #[test]
    fn test_mix_and_scale() {
        let shade = Shade::lit([0, 100, 200]).mix([100, 100, 100], 0.5).scaled(2.0);
        assert_eq!(shade.color, [100.0, 200.0, 300.0]);
        assert_eq!(shade.to_rgba(0.0, 1.0), [100, 200, 255, 255]);
    }

    #[test]
    fn test_remap_and_smoothstep() {
        assert_eq!(remap(0.5, 0.0, 1.0), 0.5);
        assert_eq!(remap(-3.0, 0.0, 1.0), 0.0);
        assert_eq!(remap(3.0, 0.0, 1.0), 1.0);
        assert_eq!(smoothstep(0.0, 1.0, 0.5), 0.5);
        assert_eq!(unit(0.0), 0.5);
    }

    #[test]
    fn test_every_kind_has_a_compositor() {
        for kind in BodyKind::ALL {
            let compositor = compositor_for(kind, kind.default_variant());
            assert_eq!(compositor.kind(), kind);
            assert!(compositor.disc_fraction() > 0.0 && compositor.disc_fraction() <= 1.0);
            assert!(compositor.effect_extent() >= 1.0);
            assert!(compositor.spin() >= 1);
            assert!(!compositor.stack().specs().is_empty() || kind == BodyKind::BlackHole);
        }
    }

    #[test]
    fn test_unknown_variant_uses_default_tuning() {
        let fallback = compositor_for(BodyKind::GasGiant, "plaid");
        let default = compositor_for(BodyKind::GasGiant, "jovian");
        assert_eq!(fallback.disc_fraction(), default.disc_fraction());
        assert_eq!(fallback.lighting(), default.lighting());
    }
}
