//! Black holes: event horizon, lensing ring, accretion disk, jets and glow.
//!
//! The sphere radius is the event horizon. Every other feature lies outside
//! it, so a single chain runs over [`RadialSample`]s built from both disc and
//! outside samples; the horizon layer claims every disc pixel.

use glam::DVec3;
use starforge_noise::{FieldSpec, Fields, FrequencyStack, det_atan2, det_cos, det_sin, det_sqrt, fbm};

use super::chain::{Layer, LayerInput, PriorityChain};
use super::{BodyCompositor, FrameContext, LayerHit, Shade, remap};
use crate::body::BodyKind;
use crate::palette::PaletteSet;
use crate::sampler::{LightingModel, OutsideSample, SurfaceSample};

const SPECS: &[FieldSpec] = &[];
const STACK: FrequencyStack = FrequencyStack::new(SPECS);

/// The disk turns this many times per animation loop.
const DISK_SPIN: f64 = 8.0;
const DOPPLER: f64 = 0.35;

/// Polar offset from the hole's center, in horizon radii.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialSample {
    /// Horizontal offset in radii.
    pub x: f64,
    /// Vertical offset in radii, y grows down.
    pub y: f64,
    pub normalized_distance: f64,
}

impl From<&SurfaceSample> for RadialSample {
    fn from(sample: &SurfaceSample) -> Self {
        Self {
            x: sample.normal.x,
            y: sample.normal.y,
            normalized_distance: sample.normalized_distance,
        }
    }
}

impl RadialSample {
    fn from_outside(sample: &OutsideSample, radius: f64) -> Self {
        Self {
            x: sample.dx / radius,
            y: sample.dy / radius,
            normalized_distance: sample.normalized_distance,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlackHoleTuning {
    /// Lensing ring width beyond the horizon, in radii.
    pub lensing_width: f64,
    pub disk_inner: f64,
    pub disk_outer: f64,
    /// Minor/major axis ratio of the projected disk.
    pub disk_tilt: f64,
    /// Disk structure noise below this opens a gap.
    pub gap_threshold: f64,
    /// Disk brightness multiplier.
    pub disk_boost: f64,
    pub jets: bool,
    /// Jet half-width at the horizon, in radii.
    pub jet_width: f64,
    pub glow_extent: f64,
}

const STELLAR: BlackHoleTuning = BlackHoleTuning {
    lensing_width: 0.22,
    disk_inner: 1.7,
    disk_outer: 4.2,
    disk_tilt: 0.35,
    gap_threshold: -0.3,
    disk_boost: 1.0,
    jets: false,
    jet_width: 0.0,
    glow_extent: 5.4,
};

const SUPERMASSIVE: BlackHoleTuning = BlackHoleTuning {
    lensing_width: 0.22,
    disk_inner: 1.8,
    disk_outer: 4.6,
    disk_tilt: 0.35,
    gap_threshold: -0.3,
    disk_boost: 1.1,
    jets: true,
    jet_width: 0.3,
    glow_extent: 5.4,
};

const QUASAR: BlackHoleTuning = BlackHoleTuning {
    lensing_width: 0.22,
    disk_inner: 1.5,
    disk_outer: 5.0,
    disk_tilt: 0.35,
    gap_threshold: -0.45,
    disk_boost: 1.3,
    jets: true,
    jet_width: 0.4,
    glow_extent: 5.4,
};

impl BlackHoleTuning {
    pub fn for_variant(variant: &str) -> Self {
        match variant {
            "supermassive" => SUPERMASSIVE,
            "quasar" => QUASAR,
            _ => STELLAR,
        }
    }
}

/// Accretion disk shade, `None` off the disk or in a gap.
fn disk_at(
    sample: &RadialSample,
    tuning: &BlackHoleTuning,
    palette: &PaletteSet,
    ctx: &FrameContext<'_>,
) -> Option<Shade> {
    let x = sample.x;
    let y = sample.y / tuning.disk_tilt;
    let rr = det_sqrt(x * x + y * y);
    if rr < tuning.disk_inner || rr > tuning.disk_outer {
        return None;
    }
    let theta = det_atan2(y, x);
    let swirl = theta - ctx.phase * DISK_SPIN;
    let structure = fbm(
        ctx.noise,
        DVec3::new(3.0 * det_cos(swirl), 3.0 * det_sin(swirl), 4.0 * rr),
        3,
    );
    if structure < tuning.gap_threshold {
        return None;
    }
    let temperature = 1.0 - remap(rr, tuning.disk_inner, tuning.disk_outer);
    let doppler = 1.0 + DOPPLER * det_cos(theta);
    let color = palette.ramp("disk").pick(temperature);
    Some(Shade::emissive(color, 0.6 + 0.4 * temperature).scaled(doppler * tuning.disk_boost))
}

type Input<'a> = LayerInput<'a, RadialSample, BlackHoleTuning>;

fn is_horizon(input: &Input<'_>) -> bool {
    input.sample.normalized_distance <= 1.0
}

fn horizon(input: &Input<'_>) -> Shade {
    Shade::emissive(input.palette.ramp("horizon").pick(0.0), 1.0)
}

fn is_lensing(input: &Input<'_>) -> bool {
    input.sample.normalized_distance <= 1.0 + input.tuning.lensing_width
}

fn lensing(input: &Input<'_>) -> Shade {
    let tuning = input.tuning;
    let fade = 1.0 - remap(input.sample.normalized_distance, 1.0, 1.0 + tuning.lensing_width);
    Shade::emissive(input.palette.ramp("lensing").pick(fade), fade.sqrt())
}

fn disk(input: &Input<'_>) -> Option<Shade> {
    disk_at(input.sample, input.tuning, input.palette, input.ctx)
}

fn jet_core(input: &Input<'_>) -> Option<f64> {
    let tuning = input.tuning;
    if !tuning.jets {
        return None;
    }
    let along = input.sample.y.abs();
    let width = tuning.jet_width * (1.0 + 0.15 * along);
    let across = input.sample.x.abs();
    (along > 1.0 && along <= tuning.glow_extent && across < width).then(|| 1.0 - across / width)
}

fn is_jet(input: &Input<'_>) -> bool {
    jet_core(input).is_some()
}

fn jet(input: &Input<'_>) -> Shade {
    let core = jet_core(input).unwrap_or(0.0);
    let (cos_t, sin_t) = input.ctx.time;
    let along = input.sample.y.abs();
    let knots = 0.7 + 0.3 * input.ctx.sample(DVec3::new(2.0 * along, cos_t, sin_t + 29.0));
    let fade = 1.0 - remap(along, 1.0, input.tuning.glow_extent);
    let color = input.palette.ramp("jet").pick(core * fade);
    Shade::emissive(color, core * fade * knots)
}

fn is_glow(input: &Input<'_>) -> bool {
    input.sample.normalized_distance <= input.tuning.glow_extent
}

fn glow(input: &Input<'_>) -> Shade {
    let fade = 1.0 - remap(input.sample.normalized_distance, 1.0, input.tuning.glow_extent);
    Shade::emissive(input.palette.ramp("glow").pick(fade), 0.5 * fade * fade)
}

const LAYERS: &[Layer<RadialSample, BlackHoleTuning>] = &[
    Layer::new("event_horizon", is_horizon, horizon),
    Layer::new("lensing", is_lensing, lensing),
    Layer::fused("accretion_disk", disk),
    Layer::new("jet", is_jet, jet),
    Layer::new("glow", is_glow, glow),
];
const CHAIN: PriorityChain<RadialSample, BlackHoleTuning> = PriorityChain::new(LAYERS);

#[derive(Clone, Copy, Debug)]
pub struct BlackHoleCompositor {
    tuning: BlackHoleTuning,
}

impl BlackHoleCompositor {
    pub fn new(variant: &str) -> Self {
        Self {
            tuning: BlackHoleTuning::for_variant(variant),
        }
    }

    pub fn tuning(&self) -> &BlackHoleTuning {
        &self.tuning
    }

    fn resolve(&self, sample: &RadialSample, palette: &PaletteSet, ctx: &FrameContext<'_>) -> Option<LayerHit> {
        CHAIN.resolve(&LayerInput {
            sample,
            fields: &Fields::new(),
            palette,
            tuning: &self.tuning,
            ctx,
        })
    }
}

impl BodyCompositor for BlackHoleCompositor {
    fn kind(&self) -> BodyKind {
        BodyKind::BlackHole
    }

    fn stack(&self) -> FrequencyStack {
        STACK
    }

    fn lighting(&self) -> LightingModel {
        LightingModel::new(1.0, 1.0, 1.0, 0.0)
    }

    fn disc_fraction(&self) -> f64 {
        0.18
    }

    fn effect_extent(&self) -> f64 {
        self.tuning.glow_extent
    }

    fn shade_disc(
        &self,
        sample: &SurfaceSample,
        _fields: &Fields,
        palette: &PaletteSet,
        ctx: &FrameContext<'_>,
    ) -> Option<LayerHit> {
        self.resolve(&RadialSample::from(sample), palette, ctx)
    }

    fn shade_outside(
        &self,
        sample: &OutsideSample,
        palette: &PaletteSet,
        ctx: &FrameContext<'_>,
    ) -> Option<LayerHit> {
        self.resolve(&RadialSample::from_outside(sample, ctx.layout.radius), palette, ctx)
    }

}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::compositor::testing::{ConstantNoise, context, disc_sample};
    use crate::palette::PaletteTable;

    fn polar(angle: f64, distance: f64) -> RadialSample {
        RadialSample {
            x: distance * det_cos(angle),
            y: distance * det_sin(angle),
            normalized_distance: distance,
        }
    }

    fn classify(variant: &str, noise_value: f64, sample: RadialSample) -> LayerHit {
        let compositor = BlackHoleCompositor::new(variant);
        let noise = ConstantNoise(noise_value);
        let ctx = context(&noise, 0.0, 192, 192, compositor.disc_fraction());
        let palette = PaletteTable::resolve(BodyKind::BlackHole, variant);
        compositor.resolve(&sample, palette, &ctx).unwrap()
    }

    #[test]
    fn test_horizon_is_opaque_black() {
        let hit = classify("stellar", 0.7, polar(0.3, 0.0));
        assert_eq!(hit.layer, "event_horizon");
        assert_eq!(hit.shade.to_rgba(0.9, 0.1), [0, 0, 0, 255]);
    }

    #[test]
    fn test_lensing_ring_just_outside_horizon() {
        assert_eq!(classify("stellar", 0.0, polar(1.0, 1.1)).layer, "lensing");
    }

    #[test]
    fn test_disk_and_gaps() {
        // Along the major axis the disk spans its full radial range.
        let on_disk = polar(0.0, 3.0);
        assert_eq!(classify("stellar", 0.0, on_disk).layer, "accretion_disk");
        assert_eq!(classify("stellar", -0.9, on_disk).layer, "glow");
    }

    #[test]
    fn test_disk_hotter_near_inner_edge() {
        let inner = classify("stellar", 0.0, polar(0.0, 1.8)).shade;
        let outer = classify("stellar", 0.0, polar(0.0, 4.0)).shade;
        let sum = |s: Shade| s.color.iter().sum::<f64>();
        assert!(sum(inner) > sum(outer));
    }

    #[test]
    fn test_jets_only_on_jetted_variants() {
        let above = polar(-PI / 2.0, 3.0);
        assert_eq!(classify("supermassive", 0.0, above).layer, "jet");
        assert_eq!(classify("quasar", 0.0, above).layer, "jet");
        assert_eq!(classify("stellar", 0.0, above).layer, "glow");
    }

    #[test]
    fn test_horizon_hides_near_disk() {
        let compositor = BlackHoleCompositor::new("quasar");
        let noise = ConstantNoise(0.0);
        let ctx = context(&noise, 0.0, 192, 192, compositor.disc_fraction());
        let palette = PaletteTable::resolve(BodyKind::BlackHole, "quasar");
        let fields = Fields::new();
        let lighting = compositor.lighting();
        // Radius 17.28: the lower rim sits where the projected disk would
        // cross in front.
        for (x, y) in [(96, 96), (96, 110), (96, 82), (108, 100)] {
            let sample = disc_sample(&ctx, x, y, lighting);
            let hit = compositor.shade_disc(&sample, &fields, palette, &ctx).unwrap();
            assert_eq!(hit.layer, "event_horizon", "({x}, {y})");
            assert!(compositor.shade_overlay(&sample, palette, &ctx).is_none());
        }
    }
}
