//! Small irregular rocks.

use glam::DVec3;
use starforge_noise::{FieldSpec, Fields, FrequencyStack, det_atan2, det_cos, det_sin, fbm};

use super::chain::{Layer, LayerInput, PriorityChain, always};
use super::{BodyCompositor, FrameContext, LayerHit, Shade, remap, unit};
use crate::body::BodyKind;
use crate::palette::PaletteSet;
use crate::sampler::{LightingModel, SurfaceSample};

const SPECS: &[FieldSpec] = &[
    FieldSpec::fbm("elevation", 3.0, 4),
    FieldSpec::fbm("crater", 6.0, 2).offset(29.0, 0.0, 3.0),
    FieldSpec::ridged("vein", 5.0, 3).offset(0.0, 41.0, 0.0),
    FieldSpec::fbm("vein_gate", 2.0, 2).offset(17.0, 17.0, 0.0),
];
const STACK: FrequencyStack = FrequencyStack::new(SPECS);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsteroidTuning {
    /// Largest inward dent of the silhouette, in radii.
    pub lobe: f64,
    pub crater_threshold: f64,
    /// Ridged vein value that exposes metal; `None` for veinless rock.
    pub vein_threshold: Option<f64>,
    pub vein_gate: f64,
}

const SILICATE: AsteroidTuning = AsteroidTuning {
    lobe: 0.28,
    crater_threshold: 0.45,
    vein_threshold: None,
    vein_gate: 0.0,
};

const CARBONACEOUS: AsteroidTuning = AsteroidTuning {
    lobe: 0.22,
    crater_threshold: 0.4,
    vein_threshold: None,
    vein_gate: 0.0,
};

const METALLIC: AsteroidTuning = AsteroidTuning {
    lobe: 0.18,
    crater_threshold: 0.5,
    vein_threshold: Some(0.82),
    vein_gate: 0.1,
};

impl AsteroidTuning {
    pub fn for_variant(variant: &str) -> Self {
        match variant {
            "carbonaceous" => CARBONACEOUS,
            "metallic" => METALLIC,
            _ => SILICATE,
        }
    }
}

type Input<'a> = LayerInput<'a, SurfaceSample, AsteroidTuning>;

/// Normalized distance at which the silhouette ends along this pixel's
/// bearing. The outline tumbles with the frame rotation.
fn silhouette_edge(input: &Input<'_>) -> f64 {
    let bearing = det_atan2(input.sample.dy, input.sample.dx) - input.ctx.rotation;
    let point = DVec3::new(2.0 * det_cos(bearing), 2.0 * det_sin(bearing), 23.0);
    let dent = 0.5 + 0.5 * fbm(input.ctx.noise, point, 3);
    1.0 - input.tuning.lobe * dent
}

fn is_void(input: &Input<'_>) -> bool {
    input.sample.normalized_distance > silhouette_edge(input)
}

fn void(_: &Input<'_>) -> Shade {
    Shade::transparent()
}

fn is_crater(input: &Input<'_>) -> bool {
    input.fields.get("crater") > input.tuning.crater_threshold
}

fn crater(input: &Input<'_>) -> Shade {
    let t = remap(input.fields.get("crater"), input.tuning.crater_threshold, 1.0);
    Shade::lit(input.palette.ramp("crater").pick(t))
}

fn is_vein(input: &Input<'_>) -> bool {
    input.tuning.vein_threshold.is_some_and(|threshold| {
        input.fields.get("vein_gate") > input.tuning.vein_gate
            && input.fields.get("vein") > threshold
    })
}

fn vein(input: &Input<'_>) -> Shade {
    let threshold = input.tuning.vein_threshold.unwrap_or(1.0);
    let t = remap(input.fields.get("vein"), threshold, 1.0);
    Shade::lit(input.palette.ramp("vein").pick(t))
}

fn rock(input: &Input<'_>) -> Shade {
    Shade::lit(input.palette.ramp("rock").pick(unit(input.fields.get("elevation"))))
}

const LAYERS: &[Layer<SurfaceSample, AsteroidTuning>] = &[
    Layer::new("void", is_void, void),
    Layer::new("crater", is_crater, crater),
    Layer::new("vein", is_vein, vein),
    Layer::new("rock", always, rock),
];
const CHAIN: PriorityChain<SurfaceSample, AsteroidTuning> = PriorityChain::new(LAYERS);

#[derive(Clone, Copy, Debug)]
pub struct AsteroidCompositor {
    tuning: AsteroidTuning,
}

impl AsteroidCompositor {
    pub fn new(variant: &str) -> Self {
        Self {
            tuning: AsteroidTuning::for_variant(variant),
        }
    }

    pub fn tuning(&self) -> &AsteroidTuning {
        &self.tuning
    }
}

impl BodyCompositor for AsteroidCompositor {
    fn kind(&self) -> BodyKind {
        BodyKind::Asteroid
    }

    fn stack(&self) -> FrequencyStack {
        STACK
    }

    fn lighting(&self) -> LightingModel {
        LightingModel::new(0.04, 1.4, 0.6, 0.35)
    }

    fn disc_fraction(&self) -> f64 {
        0.9
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
}
