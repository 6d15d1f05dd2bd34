//! Command-line argument parsing for the starforge binary.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// starforge command-line arguments.
///
/// Category flags select what to generate (nothing selected means `--all`).
/// The remaining values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default, Clone, PartialEq)]
#[command(name = "starforge", about = "Procedural celestial-body sprite sheets")]
pub struct CliArgs {
    /// Generate stars.
    #[arg(long)]
    pub stars: bool,

    /// Generate planets; optionally only these comma-separated types
    /// (e.g. `terran,desert,saturnian`).
    #[arg(long, num_args = 0.., value_delimiter = ',')]
    pub planets: Option<Vec<String>>,

    /// Generate gas giants.
    #[arg(long)]
    pub gas_giants: bool,

    /// Generate moons.
    #[arg(long)]
    pub moons: bool,

    /// Generate asteroids.
    #[arg(long)]
    pub asteroids: bool,

    /// Generate black holes.
    #[arg(long)]
    pub black_holes: bool,

    /// Generate every body kind.
    #[arg(long)]
    pub all: bool,

    /// Variants per body kind (0 = all).
    #[arg(long)]
    pub variants: Option<u32>,

    /// Sheets per variant.
    #[arg(long)]
    pub count: Option<u32>,

    /// Base seed for the batch.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads (0 = one per CPU).
    #[arg(long)]
    pub jobs: Option<usize>,

    /// Output directory.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Regenerate sheets that already exist in the manifest.
    #[arg(long)]
    pub force: bool,

    /// Animation frames per sheet, for every kind.
    #[arg(long)]
    pub frames: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    /// Returns `true` if any category flag was given.
    pub fn has_selection(&self) -> bool {
        self.all
            || self.stars
            || self.planets.is_some()
            || self.gas_giants
            || self.moons
            || self.asteroids
            || self.black_holes
    }
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(variants) = args.variants {
            self.batch.variants_per_type = variants;
        }
        if let Some(count) = args.count {
            self.batch.sprites_per_variant = count;
        }
        if let Some(seed) = args.seed {
            self.batch.base_seed = seed;
        }
        if let Some(jobs) = args.jobs {
            self.batch.jobs = jobs;
        }
        if let Some(ref out) = args.out {
            self.output.directory = out.clone();
        }
        if let Some(frames) = args.frames {
            for size in self.sprites.iter_mut() {
                size.frame_count = frames;
            }
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            seed: Some(7),
            out: Some(PathBuf::from("build/sprites")),
            frames: Some(12),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.batch.base_seed, 7);
        assert_eq!(config.output.directory, PathBuf::from("build/sprites"));
        assert_eq!(config.sprites.moon.frame_count, 12);
        assert_eq!(config.sprites.asteroid.frame_count, 12);
        // Non-overridden fields retain defaults
        assert_eq!(config.batch.sprites_per_variant, 1);
        assert_eq!(config.sprites.moon.frame_size, 96);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_category_flags() {
        let args = CliArgs::parse_from(["starforge", "--stars", "--moons", "--seed", "3"]);
        assert!(args.stars && args.moons);
        assert!(!args.all);
        assert_eq!(args.seed, Some(3));
        assert!(args.has_selection());
    }

    #[test]
    fn test_parse_planet_list() {
        let args = CliArgs::parse_from(["starforge", "--planets", "terran,saturnian"]);
        assert_eq!(
            args.planets,
            Some(vec!["terran".to_string(), "saturnian".to_string()])
        );

        let args = CliArgs::parse_from(["starforge", "--planets", "--force"]);
        assert_eq!(args.planets, Some(Vec::new()));
        assert!(args.force);
    }

    #[test]
    fn test_no_flags_selects_nothing() {
        let args = CliArgs::parse_from(["starforge"]);
        assert!(!args.has_selection());
    }
}
