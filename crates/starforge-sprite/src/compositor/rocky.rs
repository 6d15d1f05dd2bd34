//! Terrestrial planets: oceans, biomes, ice caps, clouds and city lights.

use starforge_noise::{FieldSpec, Fields, FrequencyStack};

use super::chain::{Layer, LayerInput, PriorityChain, always};
use super::{
    BodyCompositor, FrameContext, LayerHit, Shade, atmosphere_halo, remap, smoothstep, unit,
};
use crate::body::BodyKind;
use crate::palette::PaletteSet;
use crate::sampler::{LightingModel, OutsideSample, SurfaceSample};

const SPECS: &[FieldSpec] = &[
    FieldSpec::fbm("continents", 1.0, 6),
    FieldSpec::fbm("moisture", 2.0, 3).offset(41.0, 7.0, 0.0),
    FieldSpec::ridged("mountains", 4.0, 4).offset(0.0, 23.0, 0.0),
    FieldSpec::turbulence("clouds", 3.0, 4).offset(0.0, 0.0, 59.0).drift(1.0),
    FieldSpec::fbm("cloud_shape", 2.0, 3).offset(83.0, 0.0, 0.0).drift(1.0),
    FieldSpec::fbm("volcano", 6.0, 2).offset(11.0, 31.0, 0.0),
    FieldSpec::fbm("crater", 8.0, 2).offset(0.0, 47.0, 13.0),
    FieldSpec::fbm("cities", 16.0, 2).offset(5.0, 3.0, 97.0),
];
const STACK: FrequencyStack = FrequencyStack::new(SPECS);

/// Light intensity below which the surface counts as night side.
const NIGHT: f64 = 0.05;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RockyTuning {
    /// Continents value at and below which the surface is water.
    pub sea_level: f64,
    pub cloud_threshold: f64,
    /// `|latitude|` above which ice caps form.
    pub ice_latitude: f64,
    /// `None` for uninhabited worlds.
    pub city_threshold: Option<f64>,
    pub volcano_threshold: f64,
    pub crater_threshold: f64,
    pub mountain_threshold: f64,
    /// Depth below sea level still drawn as shallow water.
    pub shallow_band: f64,
    /// Atmosphere halo extent in radii.
    pub halo_extent: f64,
}

const TERRAN: RockyTuning = RockyTuning {
    sea_level: 0.0,
    cloud_threshold: 0.52,
    ice_latitude: 0.8,
    city_threshold: Some(0.42),
    volcano_threshold: 0.78,
    crater_threshold: 0.72,
    mountain_threshold: 0.72,
    shallow_band: 0.15,
    halo_extent: 1.08,
};

const DESERT: RockyTuning = RockyTuning {
    sea_level: -0.55,
    cloud_threshold: 0.78,
    ice_latitude: 0.95,
    city_threshold: None,
    volcano_threshold: 0.75,
    crater_threshold: 0.6,
    mountain_threshold: 0.62,
    shallow_band: 0.2,
    halo_extent: 1.05,
};

const ARCTIC: RockyTuning = RockyTuning {
    sea_level: -0.05,
    cloud_threshold: 0.6,
    ice_latitude: 0.35,
    city_threshold: None,
    volcano_threshold: 0.8,
    crater_threshold: 0.7,
    mountain_threshold: 0.7,
    shallow_band: 0.1,
    halo_extent: 1.06,
};

const VOLCANIC: RockyTuning = RockyTuning {
    sea_level: -0.35,
    cloud_threshold: 0.66,
    ice_latitude: 1.2,
    city_threshold: None,
    volcano_threshold: 0.45,
    crater_threshold: 0.65,
    mountain_threshold: 0.6,
    shallow_band: 0.12,
    halo_extent: 1.07,
};

const OCEAN: RockyTuning = RockyTuning {
    sea_level: 0.32,
    cloud_threshold: 0.48,
    ice_latitude: 0.85,
    city_threshold: None,
    volcano_threshold: 0.82,
    crater_threshold: 0.8,
    mountain_threshold: 0.78,
    shallow_band: 0.18,
    halo_extent: 1.1,
};

impl RockyTuning {
    pub fn for_variant(variant: &str) -> Self {
        match variant {
            "desert" => DESERT,
            "arctic" => ARCTIC,
            "volcanic" => VOLCANIC,
            "ocean" => OCEAN,
            _ => TERRAN,
        }
    }
}

type Input<'a> = LayerInput<'a, SurfaceSample, RockyTuning>;

fn cloud_cover(fields: &Fields) -> f64 {
    0.6 * fields.get("clouds") + 0.4 * unit(fields.get("cloud_shape"))
}

fn is_land(input: &Input<'_>) -> bool {
    input.fields.get("continents") > input.tuning.sea_level
}

fn is_cloud(input: &Input<'_>) -> bool {
    cloud_cover(input.fields) > input.tuning.cloud_threshold
}

fn cloud(input: &Input<'_>) -> Shade {
    let t = remap(cloud_cover(input.fields), input.tuning.cloud_threshold, 1.0);
    Shade::lit(input.palette.ramp("cloud").pick(smoothstep(0.0, 0.6, t)))
}

fn is_ice(input: &Input<'_>) -> bool {
    input.sample.latitude().abs() + 0.08 * input.fields.get("continents") > input.tuning.ice_latitude
}

fn ice(input: &Input<'_>) -> Shade {
    let t = remap(input.sample.latitude().abs(), input.tuning.ice_latitude - 0.1, 1.0);
    Shade::lit(input.palette.ramp("ice").pick(t))
}

fn is_city(input: &Input<'_>) -> bool {
    match input.tuning.city_threshold {
        Some(threshold) => {
            input.sample.light_intensity < NIGHT
                && is_land(input)
                && input.fields.get("cities") > threshold
        }
        None => false,
    }
}

fn city(input: &Input<'_>) -> Shade {
    let threshold = input.tuning.city_threshold.unwrap_or(1.0);
    let t = remap(input.fields.get("cities"), threshold, 1.0);
    Shade::emissive(input.palette.ramp("city").pick(t), 1.0)
}

fn is_volcano(input: &Input<'_>) -> bool {
    is_land(input) && input.fields.get("volcano") > input.tuning.volcano_threshold
}

fn volcano(input: &Input<'_>) -> Shade {
    let t = remap(input.fields.get("volcano"), input.tuning.volcano_threshold, 1.0);
    Shade::emissive(input.palette.ramp("lava").pick(t), 1.0)
}

fn is_crater(input: &Input<'_>) -> bool {
    is_land(input) && input.fields.get("crater") > input.tuning.crater_threshold
}

fn crater(input: &Input<'_>) -> Shade {
    let t = remap(input.fields.get("crater"), input.tuning.crater_threshold, 1.0);
    Shade::lit(input.palette.ramp("crater").pick(t))
}

fn depth(input: &Input<'_>) -> f64 {
    input.tuning.sea_level - input.fields.get("continents")
}

fn is_shallow_water(input: &Input<'_>) -> bool {
    !is_land(input) && depth(input) < input.tuning.shallow_band
}

fn shallow_water(input: &Input<'_>) -> Shade {
    let t = depth(input) / input.tuning.shallow_band;
    Shade::lit(input.palette.ramp("shallow_water").pick(t))
}

fn is_deep_water(input: &Input<'_>) -> bool {
    !is_land(input)
}

fn deep_water(input: &Input<'_>) -> Shade {
    let t = remap(depth(input), input.tuning.shallow_band, 1.0 + input.tuning.sea_level);
    Shade::lit(input.palette.ramp("deep_water").pick(t))
}

fn is_mountain(input: &Input<'_>) -> bool {
    input.fields.get("mountains") > input.tuning.mountain_threshold
}

fn mountain(input: &Input<'_>) -> Shade {
    let t = remap(input.fields.get("mountains"), input.tuning.mountain_threshold, 1.0);
    Shade::lit(input.palette.ramp("mountain").pick(t))
}

fn biome(input: &Input<'_>) -> Shade {
    let height = remap(input.fields.get("continents"), input.tuning.sea_level, 1.0);
    let t = 0.6 * height + 0.4 * unit(input.fields.get("moisture"));
    Shade::lit(input.palette.ramp("biome").pick(t))
}

const LAYERS: &[Layer<SurfaceSample, RockyTuning>] = &[
    Layer::new("cloud", is_cloud, cloud),
    Layer::new("ice", is_ice, ice),
    Layer::new("city", is_city, city),
    Layer::new("volcano", is_volcano, volcano),
    Layer::new("crater", is_crater, crater),
    Layer::new("shallow_water", is_shallow_water, shallow_water),
    Layer::new("deep_water", is_deep_water, deep_water),
    Layer::new("mountain", is_mountain, mountain),
    Layer::new("biome", always, biome),
];
const CHAIN: PriorityChain<SurfaceSample, RockyTuning> = PriorityChain::new(LAYERS);

fn is_halo(input: &LayerInput<'_, OutsideSample, RockyTuning>) -> bool {
    input.sample.normalized_distance <= input.tuning.halo_extent
}

fn halo(input: &LayerInput<'_, OutsideSample, RockyTuning>) -> Shade {
    atmosphere_halo(
        input.sample.normalized_distance,
        input.palette,
        input.tuning.halo_extent,
    )
}

const OUTSIDE_LAYERS: &[Layer<OutsideSample, RockyTuning>] = &[Layer::new("atmosphere", is_halo, halo)];
const OUTSIDE: PriorityChain<OutsideSample, RockyTuning> = PriorityChain::new(OUTSIDE_LAYERS);

#[derive(Clone, Copy, Debug)]
pub struct RockyCompositor {
    tuning: RockyTuning,
}

impl RockyCompositor {
    pub fn new(variant: &str) -> Self {
        Self {
            tuning: RockyTuning::for_variant(variant),
        }
    }

    pub fn tuning(&self) -> &RockyTuning {
        &self.tuning
    }
}

impl BodyCompositor for RockyCompositor {
    fn kind(&self) -> BodyKind {
        BodyKind::RockyPlanet
    }

    fn stack(&self) -> FrequencyStack {
        STACK
    }

    fn lighting(&self) -> LightingModel {
        LightingModel::new(0.06, 1.0, 0.35, 0.25)
    }

    fn disc_fraction(&self) -> f64 {
        0.88
    }

    fn effect_extent(&self) -> f64 {
        self.tuning.halo_extent
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::testing::{ConstantNoise, context, disc_sample, outside_sample};
    use crate::palette::PaletteTable;

    fn classify_at(variant: &str, x: u32, y: u32, fields: &Fields) -> LayerHit {
        let compositor = RockyCompositor::new(variant);
        let noise = ConstantNoise(0.0);
        let ctx = context(&noise, 0.0, 64, 64, compositor.disc_fraction());
        let sample = disc_sample(&ctx, x, y, compositor.lighting());
        let palette = PaletteTable::resolve(BodyKind::RockyPlanet, variant);
        compositor
            .shade_disc(&sample, fields, palette, &ctx)
            .expect("rocky chain ends in a base layer")
    }

    fn classify(variant: &str, fields: &Fields) -> LayerHit {
        classify_at(variant, 32, 32, fields)
    }

    #[test]
    fn test_clouds_occlude_everything() {
        let fields = Fields::new()
            .with("clouds", 1.0)
            .with("cloud_shape", 1.0)
            .with("continents", 0.5)
            .with("volcano", 0.99);
        assert_eq!(classify("terran", &fields).layer, "cloud");
    }

    #[test]
    fn test_water_depth_bands() {
        let shallow = Fields::new().with("continents", -0.05);
        assert_eq!(classify("terran", &shallow).layer, "shallow_water");
        let deep = Fields::new().with("continents", -0.6);
        assert_eq!(classify("terran", &deep).layer, "deep_water");
    }

    #[test]
    fn test_sea_level_per_variant() {
        let fields = Fields::new().with("continents", 0.2);
        assert_eq!(classify("terran", &fields).layer, "biome");
        assert_eq!(classify("ocean", &fields).layer, "shallow_water");
    }

    #[test]
    fn test_volcano_is_emissive_on_land() {
        let fields = Fields::new().with("continents", 0.3).with("volcano", 0.9);
        let hit = classify("terran", &fields);
        assert_eq!(hit.layer, "volcano");
        assert!(hit.shade.emissive);

        let sea = Fields::new().with("continents", -0.3).with("volcano", 0.9);
        assert_ne!(classify("terran", &sea).layer, "volcano");
    }

    #[test]
    fn test_ice_caps_near_poles() {
        let land = Fields::new().with("continents", 0.3);
        assert_eq!(classify_at("terran", 32, 6, &land).layer, "ice");
        assert_eq!(classify("terran", &land).layer, "biome");
        assert_eq!(classify_at("volcanic", 32, 6, &land).layer, "biome");
    }

    #[test]
    fn test_city_lights_only_on_night_side() {
        let fields = Fields::new().with("continents", 0.3).with("cities", 0.9);
        let night = classify_at("terran", 50, 50, &fields);
        assert_eq!(night.layer, "city");
        assert!(night.shade.emissive);
        assert_eq!(classify_at("terran", 20, 20, &fields).layer, "biome");
        assert_eq!(classify_at("desert", 50, 50, &fields).layer, "biome");
    }

    #[test]
    fn test_halo_fades_out() {
        let compositor = RockyCompositor::new("terran");
        let noise = ConstantNoise(0.0);
        let ctx = context(&noise, 0.0, 64, 64, compositor.disc_fraction());
        let palette = PaletteTable::resolve(BodyKind::RockyPlanet, "terran");
        let near = outside_sample(&ctx, 61, 32);
        let hit = compositor.shade_outside(&near, palette, &ctx).unwrap();
        assert_eq!(hit.layer, "atmosphere");
        assert!(hit.shade.alpha > 0.0);

        let far = outside_sample(&ctx, 0, 0);
        assert!(compositor.shade_outside(&far, palette, &ctx).is_none());
    }
}
