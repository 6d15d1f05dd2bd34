//! Self-luminous stars: granulated photosphere, sunspots, flares, corona and
//! coronal mass ejections.

use glam::DVec3;
use starforge_noise::{FieldSpec, Fields, FrequencyStack, det_cos, det_sin, fbm};

use super::chain::{Layer, LayerInput, PriorityChain, always};
use super::{BodyCompositor, FrameContext, LayerHit, Shade, remap};
use crate::body::BodyKind;
use crate::palette::PaletteSet;
use crate::sampler::{LightingModel, OutsideSample, SurfaceSample};

const SPECS: &[FieldSpec] = &[
    FieldSpec::fbm("granule_coarse", 8.0, 3),
    FieldSpec::fbm("granule_fine", 24.0, 2).offset(13.0, 0.0, 7.0),
    FieldSpec::fbm("activity", 2.0, 4).offset(0.0, 37.0, 0.0),
];
const STACK: FrequencyStack = FrequencyStack::new(SPECS);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarTuning {
    /// Activity below this darkens into a sunspot.
    pub spot_threshold: f64,
    /// Activity above this flares.
    pub flare_threshold: f64,
    /// Brightness swing of the granulation term.
    pub granulation: f64,
    /// Corona reach in radii.
    pub corona_extent: f64,
    /// Limb noise above this erupts.
    pub cme_threshold: f64,
    /// Streamers around the limb.
    pub streamers: f64,
}

const HOT: StarTuning = StarTuning {
    spot_threshold: -0.72,
    flare_threshold: 0.55,
    granulation: 0.12,
    corona_extent: 1.5,
    cme_threshold: 0.5,
    streamers: 9.0,
};

const WHITE: StarTuning = StarTuning {
    spot_threshold: -0.65,
    flare_threshold: 0.58,
    granulation: 0.15,
    corona_extent: 1.45,
    cme_threshold: 0.52,
    streamers: 8.0,
};

const YELLOW: StarTuning = StarTuning {
    spot_threshold: -0.55,
    flare_threshold: 0.6,
    granulation: 0.2,
    corona_extent: 1.4,
    cme_threshold: 0.48,
    streamers: 7.0,
};

const ORANGE: StarTuning = StarTuning {
    spot_threshold: -0.5,
    flare_threshold: 0.62,
    granulation: 0.22,
    corona_extent: 1.35,
    cme_threshold: 0.5,
    streamers: 6.0,
};

const RED: StarTuning = StarTuning {
    spot_threshold: -0.42,
    flare_threshold: 0.5,
    granulation: 0.25,
    corona_extent: 1.3,
    cme_threshold: 0.45,
    streamers: 5.0,
};

impl StarTuning {
    pub fn for_variant(variant: &str) -> Self {
        match variant {
            "o" | "b" => HOT,
            "a" | "f" => WHITE,
            "k" => ORANGE,
            "m" => RED,
            _ => YELLOW,
        }
    }
}

type Input<'a> = LayerInput<'a, SurfaceSample, StarTuning>;

fn is_sunspot(input: &Input<'_>) -> bool {
    input.fields.get("activity") < input.tuning.spot_threshold
}

fn sunspot(input: &Input<'_>) -> Shade {
    let threshold = input.tuning.spot_threshold;
    let t = remap(-input.fields.get("activity"), -threshold, 1.0);
    Shade::lit(input.palette.ramp("spot").pick(t))
}

fn is_flare(input: &Input<'_>) -> bool {
    input.fields.get("activity") > input.tuning.flare_threshold
}

fn flare(input: &Input<'_>) -> Shade {
    let (cos_t, sin_t) = input.ctx.time;
    let flicker = input
        .ctx
        .sample(input.sample.world * 4.0 + DVec3::new(2.0 * cos_t, 2.0 * sin_t, 11.0));
    let strength = remap(input.fields.get("activity"), input.tuning.flare_threshold, 1.0);
    let t = strength * (0.75 + 0.25 * flicker);
    Shade::emissive(input.palette.ramp("flare").pick(t), 1.0)
}

fn photosphere(input: &Input<'_>) -> Shade {
    let granules = 0.6 * input.fields.get("granule_coarse") + 0.4 * input.fields.get("granule_fine");
    let color = input.palette.ramp("photosphere").pick(input.sample.normalized_distance);
    Shade::lit(color).scaled(1.0 + granules * input.tuning.granulation)
}

const LAYERS: &[Layer<SurfaceSample, StarTuning>] = &[
    Layer::new("sunspot", is_sunspot, sunspot),
    Layer::new("flare", is_flare, flare),
    Layer::new("photosphere", always, photosphere),
];
const CHAIN: PriorityChain<SurfaceSample, StarTuning> = PriorityChain::new(LAYERS);

type OutsideInput<'a> = LayerInput<'a, OutsideSample, StarTuning>;

/// Eruption strength in `(0, 1]` at this limb angle, if one is active.
fn eruption(input: &OutsideInput<'_>) -> Option<f64> {
    let (cos_t, sin_t) = input.ctx.time;
    let angle = input.sample.angle;
    let point = DVec3::new(2.0 * det_cos(angle) + cos_t, 2.0 * det_sin(angle) + sin_t, 7.0);
    let value = fbm(input.ctx.noise, point, 3);
    (value > input.tuning.cme_threshold).then(|| remap(value, input.tuning.cme_threshold, 1.0))
}

fn cme_reach(tuning: &StarTuning, intensity: f64) -> f64 {
    1.0 + (tuning.corona_extent - 1.0) * (1.0 + intensity)
}

fn cme(input: &OutsideInput<'_>) -> Option<Shade> {
    let intensity = eruption(input)?;
    let reach = cme_reach(input.tuning, intensity);
    if input.sample.normalized_distance > reach {
        return None;
    }
    let fade = 1.0 - remap(input.sample.normalized_distance, 1.0, reach);
    let color = input.palette.ramp("flare").pick(fade * intensity);
    Some(Shade::emissive(color, fade * (0.4 + 0.6 * intensity)))
}

fn is_corona(input: &OutsideInput<'_>) -> bool {
    input.sample.normalized_distance <= input.tuning.corona_extent
}

fn corona(input: &OutsideInput<'_>) -> Shade {
    let angle = input.sample.angle;
    let wobble = fbm(
        input.ctx.noise,
        DVec3::new(3.0 * det_cos(angle), 3.0 * det_sin(angle), 17.0),
        2,
    );
    let streamer = 0.5 + 0.5 * det_sin(angle * input.tuning.streamers + 2.0 * wobble);
    let fade = 1.0 - remap(input.sample.normalized_distance, 1.0, input.tuning.corona_extent);
    let color = input.palette.ramp("corona").pick(fade);
    Shade::emissive(color, fade * fade * (0.55 + 0.45 * streamer))
}

const OUTSIDE_LAYERS: &[Layer<OutsideSample, StarTuning>] = &[
    Layer::fused("cme", cme),
    Layer::new("corona", is_corona, corona),
];
const OUTSIDE: PriorityChain<OutsideSample, StarTuning> = PriorityChain::new(OUTSIDE_LAYERS);

#[derive(Clone, Copy, Debug)]
pub struct StarCompositor {
    tuning: StarTuning,
}

impl StarCompositor {
    pub fn new(variant: &str) -> Self {
        Self {
            tuning: StarTuning::for_variant(variant),
        }
    }

    pub fn tuning(&self) -> &StarTuning {
        &self.tuning
    }
}

impl BodyCompositor for StarCompositor {
    fn kind(&self) -> BodyKind {
        BodyKind::Star
    }

    fn stack(&self) -> FrequencyStack {
        STACK
    }

    fn lighting(&self) -> LightingModel {
        LightingModel::new(1.0, 1.0, 0.45, 0.35).with_boost(1.1)
    }

    fn disc_fraction(&self) -> f64 {
        0.5
    }

    /// The furthest a full-strength eruption reaches.
    fn effect_extent(&self) -> f64 {
        cme_reach(&self.tuning, 1.0)
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
}
