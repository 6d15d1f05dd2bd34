//! Airless cratered moons.

use starforge_noise::{FieldSpec, Fields, FrequencyStack};

use super::chain::{Layer, LayerInput, PriorityChain, always};
use super::{BodyCompositor, FrameContext, LayerHit, Shade, remap, unit};
use crate::body::BodyKind;
use crate::palette::PaletteSet;
use crate::sampler::{LightingModel, SurfaceSample};

// Integer frequencies and offsets: the frame-0 disc center lands on lattice
// points for every field.
const SPECS: &[FieldSpec] = &[
    FieldSpec::fbm("elevation", 2.0, 5),
    FieldSpec::fbm("maria", 1.0, 3).offset(37.0, 11.0, 5.0),
    FieldSpec::fbm("crater_deep", 3.0, 2).offset(101.0, 0.0, 0.0),
    FieldSpec::fbm("crater_medium", 6.0, 2).offset(0.0, 203.0, 0.0),
    FieldSpec::fbm("crater_shallow", 12.0, 1).offset(0.0, 0.0, 307.0),
    FieldSpec::ridged("ejecta", 4.0, 3).offset(53.0, 71.0, 0.0),
    FieldSpec::fbm("ray_gate", 2.0, 2).offset(19.0, 0.0, 83.0),
    FieldSpec::fbm("rille", 5.0, 1).offset(13.0, 29.0, 41.0),
    FieldSpec::fbm("rille_gate", 2.0, 2).offset(61.0, 5.0, 17.0),
    FieldSpec::ridged("highland", 4.0, 4).offset(7.0, 13.0, 19.0),
];
const STACK: FrequencyStack = FrequencyStack::new(SPECS);

/// One crater scale: field, trigger threshold and depth falloff exponent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CraterScale {
    pub field: &'static str,
    pub threshold: f64,
    pub exponent: f64,
}

impl CraterScale {
    const fn new(field: &'static str, threshold: f64, exponent: f64) -> Self {
        Self {
            field,
            threshold,
            exponent,
        }
    }

    /// Depth in `(0, 1]` if the field clears the threshold.
    fn strength(&self, fields: &Fields) -> Option<f64> {
        let value = fields.get(self.field);
        (value > self.threshold).then(|| remap(value, self.threshold, 1.0).powf(self.exponent))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoonTuning {
    /// Deep, medium and shallow crater scales.
    pub craters: [CraterScale; 3],
    pub maria_threshold: f64,
    pub ray_gate: f64,
    pub ray_threshold: f64,
    /// Half-width of the rille band around the zero crossing.
    pub rille_width: f64,
    pub rille_gate: f64,
    pub highland_threshold: f64,
}

const ROCKY: MoonTuning = MoonTuning {
    craters: [
        CraterScale::new("crater_deep", 0.42, 1.5),
        CraterScale::new("crater_medium", 0.48, 1.2),
        CraterScale::new("crater_shallow", 0.55, 0.8),
    ],
    maria_threshold: -0.22,
    ray_gate: 0.32,
    ray_threshold: 0.8,
    rille_width: 0.025,
    rille_gate: 0.35,
    highland_threshold: 0.3,
};

const ICY: MoonTuning = MoonTuning {
    craters: [
        CraterScale::new("crater_deep", 0.46, 1.6),
        CraterScale::new("crater_medium", 0.52, 1.3),
        CraterScale::new("crater_shallow", 0.58, 0.9),
    ],
    maria_threshold: -0.38,
    ray_gate: 0.25,
    ray_threshold: 0.78,
    rille_width: 0.035,
    rille_gate: 0.2,
    highland_threshold: 0.35,
};

const RUST: MoonTuning = MoonTuning {
    craters: [
        CraterScale::new("crater_deep", 0.4, 1.4),
        CraterScale::new("crater_medium", 0.46, 1.1),
        CraterScale::new("crater_shallow", 0.52, 0.7),
    ],
    maria_threshold: -0.28,
    ray_gate: 0.4,
    ray_threshold: 0.8,
    rille_width: 0.02,
    rille_gate: 0.4,
    highland_threshold: 0.25,
};

impl MoonTuning {
    pub fn for_variant(variant: &str) -> Self {
        match variant {
            "icy" => ICY,
            "rust" => RUST,
            _ => ROCKY,
        }
    }

    /// The strongest matching crater depth.
    fn crater_depth(&self, fields: &Fields) -> Option<f64> {
        self.craters
            .iter()
            .filter_map(|scale| scale.strength(fields))
            .reduce(f64::max)
    }
}

type Input<'a> = LayerInput<'a, SurfaceSample, MoonTuning>;

fn is_ejecta(input: &Input<'_>) -> bool {
    input.fields.get("ray_gate") > input.tuning.ray_gate
        && input.fields.get("ejecta") > input.tuning.ray_threshold
}

fn ejecta(input: &Input<'_>) -> Shade {
    let t = remap(input.fields.get("ejecta"), input.tuning.ray_threshold, 1.0);
    Shade::lit(input.palette.ramp("ejecta").pick(t))
}

fn is_crater(input: &Input<'_>) -> bool {
    input.tuning.crater_depth(input.fields).is_some()
}

fn crater(input: &Input<'_>) -> Shade {
    let depth = input.tuning.crater_depth(input.fields).unwrap_or(0.0);
    Shade::lit(input.palette.ramp("crater").pick(depth))
}

fn is_maria(input: &Input<'_>) -> bool {
    input.fields.get("maria") < input.tuning.maria_threshold
}

fn maria(input: &Input<'_>) -> Shade {
    let threshold = input.tuning.maria_threshold;
    let t = remap(-input.fields.get("maria"), -threshold, 1.0);
    Shade::lit(input.palette.ramp("maria").pick(t))
}

fn is_rille(input: &Input<'_>) -> bool {
    input.fields.get("rille_gate") > input.tuning.rille_gate
        && input.fields.get("rille").abs() < input.tuning.rille_width
}

fn rille(input: &Input<'_>) -> Shade {
    let t = 1.0 - input.fields.get("rille").abs() / input.tuning.rille_width;
    Shade::lit(input.palette.ramp("rille").pick(t))
}

fn is_highland(input: &Input<'_>) -> bool {
    input.fields.get("elevation") > input.tuning.highland_threshold
}

fn highland(input: &Input<'_>) -> Shade {
    let lift = remap(input.fields.get("elevation"), input.tuning.highland_threshold, 1.0);
    let t = 0.5 * lift + 0.5 * input.fields.get("highland");
    Shade::lit(input.palette.ramp("highland").pick(t))
}

fn regolith(input: &Input<'_>) -> Shade {
    Shade::lit(input.palette.ramp("regolith").pick(unit(input.fields.get("elevation"))))
}

const LAYERS: &[Layer<SurfaceSample, MoonTuning>] = &[
    Layer::new("ejecta", is_ejecta, ejecta),
    Layer::new("crater", is_crater, crater),
    Layer::new("maria", is_maria, maria),
    Layer::new("rille", is_rille, rille),
    Layer::new("highland", is_highland, highland),
    Layer::new("regolith", always, regolith),
];
const CHAIN: PriorityChain<SurfaceSample, MoonTuning> = PriorityChain::new(LAYERS);

#[derive(Clone, Copy, Debug)]
pub struct MoonCompositor {
    tuning: MoonTuning,
}

impl MoonCompositor {
    pub fn new(variant: &str) -> Self {
        Self {
            tuning: MoonTuning::for_variant(variant),
        }
    }

    pub fn tuning(&self) -> &MoonTuning {
        &self.tuning
    }
}

impl BodyCompositor for MoonCompositor {
    fn kind(&self) -> BodyKind {
        BodyKind::Moon
    }

    fn stack(&self) -> FrequencyStack {
        STACK
    }

    fn lighting(&self) -> LightingModel {
        LightingModel::new(0.03, 1.6, 0.5, 0.3)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::testing::{ConstantNoise, context, disc_sample};
    use crate::palette::PaletteTable;

    fn classify(variant: &str, fields: &Fields) -> LayerHit {
        let compositor = MoonCompositor::new(variant);
        let noise = ConstantNoise(0.0);
        let ctx = context(&noise, 0.0, 64, 64, compositor.disc_fraction());
        let sample = disc_sample(&ctx, 32, 32, compositor.lighting());
        let palette = PaletteTable::resolve(BodyKind::Moon, variant);
        compositor
            .shade_disc(&sample, fields, palette, &ctx)
            .expect("moon chain ends in a base layer")
    }

    #[test]
    fn test_crater_beats_maria() {
        let fields = Fields::new()
            .with("crater_deep", 0.9)
            .with("maria", -0.9);
        assert_eq!(classify("rocky", &fields).layer, "crater");
    }

    #[test]
    fn test_ejecta_beats_crater() {
        let fields = Fields::new()
            .with("ray_gate", 0.5)
            .with("ejecta", 0.95)
            .with("crater_deep", 0.9);
        assert_eq!(classify("rocky", &fields).layer, "ejecta");
    }

    #[test]
    fn test_strongest_crater_scale_wins() {
        let tuning = MoonTuning::for_variant("rocky");
        let shallow_only = Fields::new().with("crater_shallow", 0.95);
        let both = shallow_only.clone().with("crater_deep", 0.43);
        assert_eq!(tuning.crater_depth(&both), tuning.crater_depth(&shallow_only));

        let deep = Fields::new().with("crater_deep", 1.0);
        assert_eq!(tuning.crater_depth(&deep), Some(1.0));
        assert_eq!(tuning.crater_depth(&Fields::new()), None);
    }

    #[test]
    fn test_rille_needs_gate() {
        let ungated = Fields::new().with("rille", 0.0);
        assert_eq!(classify("rocky", &ungated).layer, "regolith");
        let gated = ungated.with("rille_gate", 0.6);
        assert_eq!(classify("rocky", &gated).layer, "rille");
    }

    #[test]
    fn test_highland_above_threshold() {
        let fields = Fields::new().with("elevation", 0.6).with("highland", 0.5);
        assert_eq!(classify("rocky", &fields).layer, "highland");
    }

    #[test]
    fn test_zero_fields_are_mid_regolith() {
        let hit = classify("rocky", &Fields::new());
        assert_eq!(hit.layer, "regolith");
        let regolith = PaletteTable::resolve(BodyKind::Moon, "rocky").ramp("regolith");
        assert_eq!(hit.shade, Shade::lit(regolith.pick(0.5)));
    }

    #[test]
    fn test_variant_tuning_differs() {
        let fields = Fields::new().with("maria", -0.3);
        assert_eq!(classify("rocky", &fields).layer, "maria");
        assert_eq!(classify("icy", &fields).layer, "regolith");
        assert_eq!(MoonTuning::for_variant("unknown"), MoonTuning::for_variant("rocky"));
    }

    #[test]
    fn test_chain_order() {
        let names: Vec<_> = CHAIN.names().collect();
        assert_eq!(
            names,
            ["ejecta", "crater", "maria", "rille", "highland", "regolith"]
        );
    }
}
