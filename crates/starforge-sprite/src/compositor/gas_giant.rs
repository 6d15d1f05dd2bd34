//! Banded gas giants with storms, lightning and optional rings.

use std::f64::consts::{FRAC_PI_3, FRAC_PI_6, PI, TAU};

use glam::DVec3;
use starforge_noise::{FieldSpec, Fields, FrequencyStack, det_atan2, det_cos, det_sin, det_sqrt, fbm};

use super::chain::{Layer, LayerInput, PriorityChain, always};
use super::{BodyCompositor, FrameContext, LayerHit, Shade, atmosphere_halo, remap, unit};
use crate::body::BodyKind;
use crate::palette::PaletteSet;
use crate::sampler::{LightingModel, OutsideSample, SurfaceSample, WORLD_SCALE};

const SPECS: &[FieldSpec] = &[
    FieldSpec::fbm("jet", 2.0, 3),
    FieldSpec::turbulence("turbulence", 6.0, 4).offset(31.0, 0.0, 0.0),
    FieldSpec::fbm("swirl", 3.0, 3).offset(0.0, 19.0, 0.0),
    FieldSpec::fbm("storms", 8.0, 2).offset(0.0, 0.0, 43.0),
];
const STACK: FrequencyStack = FrequencyStack::new(SPECS);

const NIGHT: f64 = 0.05;
const LIGHTNING_FREQUENCY: f64 = 12.0;
const RING_STRUCTURE_FREQUENCY: f64 = 14.0;

/// An elliptical storm fixed to the rotating surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spot {
    pub latitude: f64,
    pub longitude: f64,
    /// Half-width in radians of longitude.
    pub width: f64,
    /// Half-height in latitude units.
    pub height: f64,
}

/// A tilted ring system in units of the planet radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rings {
    pub inner: f64,
    pub outer: f64,
    /// Minor/major axis ratio of the projected ellipse.
    pub tilt: f64,
    /// Ring-structure noise below this leaves a gap.
    pub gap_threshold: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GasGiantTuning {
    /// Light/dark band pairs from pole to pole.
    pub band_count: f64,
    pub jet_weight: f64,
    pub turbulence_weight: f64,
    pub storm_threshold: f64,
    pub lightning_threshold: f64,
    pub spot: Option<Spot>,
    pub polar_hexagon: bool,
    pub rings: Option<Rings>,
    pub halo_extent: f64,
}

const JOVIAN: GasGiantTuning = GasGiantTuning {
    band_count: 7.0,
    jet_weight: 0.12,
    turbulence_weight: 0.06,
    storm_threshold: 0.58,
    lightning_threshold: 0.62,
    spot: Some(Spot {
        latitude: 0.38,
        longitude: 0.6,
        width: 0.5,
        height: 0.18,
    }),
    polar_hexagon: false,
    rings: None,
    halo_extent: 1.04,
};

const SATURNIAN: GasGiantTuning = GasGiantTuning {
    band_count: 9.0,
    jet_weight: 0.08,
    turbulence_weight: 0.04,
    storm_threshold: 0.66,
    lightning_threshold: 0.7,
    spot: None,
    polar_hexagon: true,
    rings: Some(Rings {
        inner: 1.3,
        outer: 2.2,
        tilt: 0.3,
        gap_threshold: -0.12,
    }),
    halo_extent: 1.04,
};

const ICE: GasGiantTuning = GasGiantTuning {
    band_count: 4.0,
    jet_weight: 0.06,
    turbulence_weight: 0.03,
    storm_threshold: 0.64,
    lightning_threshold: 0.72,
    spot: Some(Spot {
        latitude: -0.3,
        longitude: -1.2,
        width: 0.32,
        height: 0.12,
    }),
    polar_hexagon: false,
    rings: None,
    halo_extent: 1.04,
};

const HOT: GasGiantTuning = GasGiantTuning {
    band_count: 5.0,
    jet_weight: 0.16,
    turbulence_weight: 0.14,
    storm_threshold: 0.55,
    lightning_threshold: 0.5,
    spot: None,
    polar_hexagon: false,
    rings: None,
    halo_extent: 1.06,
};

impl GasGiantTuning {
    pub fn for_variant(variant: &str) -> Self {
        match variant {
            "saturnian" => SATURNIAN,
            "ice" => ICE,
            "hot" => HOT,
            _ => JOVIAN,
        }
    }
}

/// Shortest signed angle from `b` to `a`.
fn angle_between(a: f64, b: f64) -> f64 {
    (a - b + PI).rem_euclid(TAU) - PI
}

/// Ring shade at a frame offset, `None` off the rings or in a gap.
fn ring_at(dx: f64, dy: f64, rings: &Rings, palette: &PaletteSet, ctx: &FrameContext<'_>) -> Option<Shade> {
    let radius = ctx.layout.radius;
    let x = dx / radius;
    let y = dy / radius / rings.tilt;
    let rr = det_sqrt(x * x + y * y);
    if rr < rings.inner || rr > rings.outer {
        return None;
    }
    let structure = fbm(ctx.noise, DVec3::new(rr * RING_STRUCTURE_FREQUENCY, 0.5, 0.5), 3);
    if structure < rings.gap_threshold {
        return None;
    }
    let density = remap(structure, rings.gap_threshold, 1.0);
    let facing = 0.7 + 0.3 * det_sin(det_atan2(y, x));
    let color = palette.ramp("ring").pick(remap(rr, rings.inner, rings.outer));
    Some(Shade::emissive(color, 0.55 + 0.45 * density).scaled(facing))
}

type Input<'a> = LayerInput<'a, SurfaceSample, GasGiantTuning>;

fn lightning_value(input: &Input<'_>) -> f64 {
    let (cos_t, sin_t) = input.ctx.time;
    let point = input.sample.world * LIGHTNING_FREQUENCY + DVec3::new(3.0 * cos_t, 3.0 * sin_t, 0.0);
    input.ctx.sample(point)
}

fn is_lightning(input: &Input<'_>) -> bool {
    input.sample.light_intensity < NIGHT && lightning_value(input) > input.tuning.lightning_threshold
}

fn lightning(input: &Input<'_>) -> Shade {
    let t = remap(lightning_value(input), input.tuning.lightning_threshold, 1.0);
    Shade::emissive(input.palette.ramp("lightning").pick(t), 1.0)
}

/// Distance from the north pole in units of the hexagon's edge, `< 1` inside.
fn hexagon_distance(sample: &SurfaceSample) -> f64 {
    const APOTHEM: f64 = 0.34;
    let p = sample.world / WORLD_SCALE;
    let rho = det_sqrt(p.x * p.x + p.z * p.z);
    let theta = det_atan2(p.z, p.x).rem_euclid(FRAC_PI_3) - FRAC_PI_6;
    rho * det_cos(theta) / APOTHEM
}

fn is_polar(input: &Input<'_>) -> bool {
    input.tuning.polar_hexagon && input.sample.latitude() < 0.0 && hexagon_distance(input.sample) < 1.0
}

fn polar(input: &Input<'_>) -> Shade {
    let t = 1.0 - hexagon_distance(input.sample) + 0.2 * input.fields.get("swirl");
    Shade::lit(input.palette.ramp("polar").pick(t))
}

fn spot_distance(input: &Input<'_>) -> Option<f64> {
    let spot = input.tuning.spot?;
    let dlat = (input.sample.latitude() - spot.latitude) / spot.height;
    let dlon = angle_between(input.sample.longitude(), spot.longitude) / spot.width;
    Some(det_sqrt(dlat * dlat + dlon * dlon) + 0.15 * input.fields.get("swirl"))
}

fn is_spot(input: &Input<'_>) -> bool {
    spot_distance(input).is_some_and(|d| d < 1.0)
}

fn spot(input: &Input<'_>) -> Shade {
    let d = spot_distance(input).unwrap_or(1.0);
    Shade::lit(input.palette.ramp("spot").pick(1.0 - d))
}

fn is_storm(input: &Input<'_>) -> bool {
    input.fields.get("storms") > input.tuning.storm_threshold
}

fn storm(input: &Input<'_>) -> Shade {
    let t = remap(input.fields.get("storms"), input.tuning.storm_threshold, 1.0);
    Shade::lit(input.palette.ramp("storm").pick(t))
}

fn band(input: &Input<'_>) -> Shade {
    let tuning = input.tuning;
    let fields = input.fields;
    let latitude = input.sample.latitude()
        + tuning.jet_weight * fields.get("jet")
        + 0.05 * fields.get("swirl")
        + tuning.turbulence_weight * fields.get("turbulence");
    let wave = det_sin(latitude * tuning.band_count * PI);
    let class = if wave >= 0.0 { "band_light" } else { "band_dark" };
    let t = 0.7 * wave.abs() + 0.3 * unit(fields.get("swirl"));
    Shade::lit(input.palette.ramp(class).pick(t))
}

const LAYERS: &[Layer<SurfaceSample, GasGiantTuning>] = &[
    Layer::new("lightning", is_lightning, lightning),
    Layer::new("polar_hexagon", is_polar, polar),
    Layer::new("great_spot", is_spot, spot),
    Layer::new("storm", is_storm, storm),
    Layer::new("band", always, band),
];
const CHAIN: PriorityChain<SurfaceSample, GasGiantTuning> = PriorityChain::new(LAYERS);

type OutsideInput<'a> = LayerInput<'a, OutsideSample, GasGiantTuning>;

fn ring(input: &OutsideInput<'_>) -> Option<Shade> {
    let rings = input.tuning.rings.as_ref()?;
    ring_at(input.sample.dx, input.sample.dy, rings, input.palette, input.ctx)
}

fn is_halo(input: &OutsideInput<'_>) -> bool {
    input.sample.normalized_distance <= input.tuning.halo_extent
}

fn halo(input: &OutsideInput<'_>) -> Shade {
    atmosphere_halo(input.sample.normalized_distance, input.palette, input.tuning.halo_extent)
}

const OUTSIDE_LAYERS: &[Layer<OutsideSample, GasGiantTuning>] = &[
    Layer::fused("ring", ring),
    Layer::new("atmosphere", is_halo, halo),
];
const OUTSIDE: PriorityChain<OutsideSample, GasGiantTuning> = PriorityChain::new(OUTSIDE_LAYERS);

#[derive(Clone, Copy, Debug)]
pub struct GasGiantCompositor {
    tuning: GasGiantTuning,
}

impl GasGiantCompositor {
    pub fn new(variant: &str) -> Self {
        Self {
            tuning: GasGiantTuning::for_variant(variant),
        }
    }

    pub fn tuning(&self) -> &GasGiantTuning {
        &self.tuning
    }
}

impl BodyCompositor for GasGiantCompositor {
    fn kind(&self) -> BodyKind {
        BodyKind::GasGiant
    }

    fn stack(&self) -> FrequencyStack {
        STACK
    }

    fn lighting(&self) -> LightingModel {
        LightingModel::new(0.05, 0.9, 0.6, 0.45)
    }

    fn spin(&self) -> u32 {
        2
    }

    fn disc_fraction(&self) -> f64 {
        if self.tuning.rings.is_some() { 0.42 } else { 0.88 }
    }

    fn effect_extent(&self) -> f64 {
        match self.tuning.rings {
            Some(rings) => rings.outer.max(self.tuning.halo_extent),
            None => self.tuning.halo_extent,
        }
    }

    fn shade_disc(
        &self,
        sample: &SurfaceSample,
        fields: &Fields,
        palette: &PaletteSet,
        ctx: &FrameContext<'_>,
    ) -> Option<LayerHit> {
        CHAIN.resolve(&LayerInput {
            sample,
            fields,
            palette,
            tuning: &self.tuning,
            ctx,
        })
    }

    fn shade_outside(
        &self,
        sample: &OutsideSample,
        palette: &PaletteSet,
        ctx: &FrameContext<'_>,
    ) -> Option<LayerHit> {
        OUTSIDE.resolve(&LayerInput {
            sample,
            fields: &Fields::new(),
            palette,
            tuning: &self.tuning,
            ctx,
        })
    }

    /// The near half of the rings passes in front of the disc.
    fn shade_overlay(
        &self,
        sample: &SurfaceSample,
        palette: &PaletteSet,
        ctx: &FrameContext<'_>,
    ) -> Option<LayerHit> {
        let rings = self.tuning.rings.as_ref()?;
        if sample.dy <= 0.0 {
            return None;
        }
        ring_at(sample.dx, sample.dy, rings, palette, ctx).map(|shade| LayerHit {
            layer: "ring",
            shade,
        })
    }
}
