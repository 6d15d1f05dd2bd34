//! Turning config and command-line selections into an ordered job list.

use starforge_config::{CliArgs, Config};
use starforge_noise::derive_seed;
use starforge_sprite::{BodyKind, BodySpec, SpriteError};

/// One sheet to generate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteJob {
    /// Manifest key, `"<kind>/<variant>/<index>"`.
    pub key: String,
    /// Fully resolved body parameters.
    pub spec: BodySpec,
}

/// The jobs for one run plus every request that could not be planned.
#[derive(Debug, Default)]
pub struct BatchPlan {
    pub jobs: Vec<SpriteJob>,
    /// Unknown names and invalid dimensions; reported and skipped.
    pub rejected: Vec<SpriteError>,
}

impl BatchPlan {
    /// Plan the run. No category flag means every kind.
    pub fn from_args(config: &Config, args: &CliArgs) -> Self {
        let mut plan = BatchPlan::default();
        let mut selection: Vec<(BodyKind, &'static str)> = Vec::new();
        let limit = config.batch.variants_per_type;

        let select_kind = |selection: &mut Vec<(BodyKind, &'static str)>, kind: BodyKind| {
            for variant in limited_variants(kind, limit) {
                push_unique(selection, (kind, variant));
            }
        };

        if args.all || !args.has_selection() {
            for kind in BodyKind::ALL {
                select_kind(&mut selection, kind);
            }
        } else {
            if args.stars {
                select_kind(&mut selection, BodyKind::Star);
            }
            match &args.planets {
                Some(names) if names.is_empty() => {
                    select_kind(&mut selection, BodyKind::RockyPlanet);
                    select_kind(&mut selection, BodyKind::GasGiant);
                }
                Some(names) => {
                    for name in names {
                        match resolve_planet(name, limit) {
                            Ok(picked) => {
                                for entry in picked {
                                    push_unique(&mut selection, entry);
                                }
                            }
                            Err(err) => plan.rejected.push(err),
                        }
                    }
                }
                None => {}
            }
            if args.gas_giants {
                select_kind(&mut selection, BodyKind::GasGiant);
            }
            if args.moons {
                select_kind(&mut selection, BodyKind::Moon);
            }
            if args.asteroids {
                select_kind(&mut selection, BodyKind::Asteroid);
            }
            if args.black_holes {
                select_kind(&mut selection, BodyKind::BlackHole);
            }
        }

        for (kind, variant) in selection {
            for index in 0..config.batch.sprites_per_variant {
                let key = format!("{kind}/{variant}/{index}");
                let seed = derive_seed(config.batch.base_seed, &key);
                let mut spec = BodySpec::new(kind, seed).with_variant(variant);
                if let Some(size) = config.sprites.get(kind.as_str()) {
                    spec = spec
                        .with_frame_size(size.frame_size)
                        .with_frame_count(size.frame_count)
                        .with_pixel_size(size.pixel_size);
                }
                match spec.validated() {
                    Ok(spec) => plan.jobs.push(SpriteJob { key, spec }),
                    Err(err) => plan.rejected.push(err),
                }
            }
        }
        plan
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// The first `limit` variants of `kind` (0 = all of them).
fn limited_variants(kind: BodyKind, limit: u32) -> impl Iterator<Item = &'static str> {
    let variants = kind.variants();
    let take = if limit == 0 {
        variants.len()
    } else {
        limit as usize
    };
    variants.iter().copied().take(take)
}

fn push_unique(selection: &mut Vec<(BodyKind, &'static str)>, entry: (BodyKind, &'static str)) {
    if !selection.contains(&entry) {
        selection.push(entry);
    }
}

/// Resolve one `--planets` entry: a kind name, a rocky or gas giant variant,
/// or a `variant-kind` name such as `icy-moon`.
fn resolve_planet(name: &str, limit: u32) -> Result<Vec<(BodyKind, &'static str)>, SpriteError> {
    let normalized = name.trim().to_ascii_lowercase();
    if let Ok(kind) = normalized.parse::<BodyKind>() {
        return Ok(limited_variants(kind, limit).map(|v| (kind, v)).collect());
    }
    for kind in [BodyKind::RockyPlanet, BodyKind::GasGiant] {
        if let Some(variant) = find_variant(kind, &normalized) {
            return Ok(vec![(kind, variant)]);
        }
    }
    let spec = BodySpec::parse(&normalized, 0)?;
    find_variant(spec.kind, &spec.variant)
        .map(|variant| vec![(spec.kind, variant)])
        .ok_or_else(|| SpriteError::UnknownBodyKind(name.to_string()))
}

fn find_variant(kind: BodyKind, name: &str) -> Option<&'static str> {
    kind.variants().iter().copied().find(|v| *v == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(plan: &BatchPlan) -> Vec<&str> {
        plan.jobs.iter().map(|job| job.key.as_str()).collect()
    }

    #[test]
    fn test_no_selection_plans_everything() {
        let plan = BatchPlan::from_args(&Config::default(), &CliArgs::default());
        let expected: usize = BodyKind::ALL.iter().map(|k| k.variants().len()).sum();
        assert_eq!(plan.len(), expected);
        assert!(plan.rejected.is_empty());
        assert_eq!(plan.jobs[0].key, "star/g/0");
    }

    #[test]
    fn test_category_flags() {
        let args = CliArgs {
            moons: true,
            asteroids: true,
            ..CliArgs::default()
        };
        let plan = BatchPlan::from_args(&Config::default(), &args);
        assert_eq!(
            keys(&plan),
            [
                "moon/rocky/0",
                "moon/icy/0",
                "moon/rust/0",
                "asteroid/silicate/0",
                "asteroid/carbonaceous/0",
                "asteroid/metallic/0",
            ]
        );
    }

    #[test]
    fn test_planet_subset() {
        let args = CliArgs {
            planets: Some(vec![
                "desert".to_string(),
                "saturnian".to_string(),
                "icy-moon".to_string(),
                "desert".to_string(),
            ]),
            ..CliArgs::default()
        };
        let plan = BatchPlan::from_args(&Config::default(), &args);
        assert_eq!(
            keys(&plan),
            ["rocky_planet/desert/0", "gas_giant/saturnian/0", "moon/icy/0"]
        );
    }

    #[test]
    fn test_unknown_planet_rejected_not_fatal() {
        let args = CliArgs {
            planets: Some(vec!["plaid".to_string(), "ocean".to_string()]),
            ..CliArgs::default()
        };
        let plan = BatchPlan::from_args(&Config::default(), &args);
        assert_eq!(keys(&plan), ["rocky_planet/ocean/0"]);
        assert_eq!(
            plan.rejected,
            vec![SpriteError::UnknownBodyKind("plaid".to_string())]
        );
    }

    #[test]
    fn test_variant_limit_and_count() {
        let mut config = Config::default();
        config.batch.variants_per_type = 2;
        config.batch.sprites_per_variant = 3;
        let args = CliArgs {
            stars: true,
            ..CliArgs::default()
        };
        let plan = BatchPlan::from_args(&config, &args);
        assert_eq!(
            keys(&plan),
            ["star/g/0", "star/g/1", "star/g/2", "star/o/0", "star/o/1", "star/o/2"]
        );
    }

    #[test]
    fn test_seeds_derive_from_key() {
        let args = CliArgs {
            black_holes: true,
            ..CliArgs::default()
        };
        let a = BatchPlan::from_args(&Config::default(), &args);
        let b = BatchPlan::from_args(&Config::default(), &args);
        assert_eq!(a.jobs, b.jobs);
        assert_ne!(a.jobs[0].spec.seed, a.jobs[1].spec.seed);

        let mut reseeded = Config::default();
        reseeded.batch.base_seed = 1;
        let c = BatchPlan::from_args(&reseeded, &args);
        assert_ne!(a.jobs[0].spec.seed, c.jobs[0].spec.seed);
    }

    #[test]
    fn test_sprite_sizes_from_config() {
        let mut config = Config::default();
        config.sprites.moon.frame_size = 64;
        config.sprites.moon.pixel_size = 2;
        let args = CliArgs {
            moons: true,
            ..CliArgs::default()
        };
        let plan = BatchPlan::from_args(&config, &args);
        let spec = &plan.jobs[0].spec;
        assert_eq!((spec.frame_width, spec.frame_height), (64, 64));
        assert_eq!(spec.pixel_size, 2);
        assert_eq!(spec.frame_count, 24);
    }

    #[test]
    fn test_zero_frames_rejected() {
        let mut config = Config::default();
        config.sprites.asteroid.frame_count = 0;
        let args = CliArgs {
            asteroids: true,
            ..CliArgs::default()
        };
        let plan = BatchPlan::from_args(&config, &args);
        assert!(plan.is_empty());
        assert_eq!(plan.rejected.len(), 3);
    }
}
