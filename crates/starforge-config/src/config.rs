//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where sheets and the manifest are written.
    pub output: OutputConfig,
    /// Batch size and seeding.
    pub batch: BatchConfig,
    /// Per-kind frame geometry.
    pub sprites: SpriteConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving the PNG sheets.
    pub directory: PathBuf,
    /// Manifest file name inside `directory`.
    pub manifest_file: String,
}

/// Batch configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads (0 = one per logical CPU).
    pub jobs: usize,
    /// Seed every job seed is derived from.
    pub base_seed: u64,
    /// Variants generated per body kind (0 = every known variant).
    pub variants_per_type: u32,
    /// Sheets generated per variant.
    pub sprites_per_variant: u32,
}

/// Frame geometry for one body kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SpriteSize {
    /// Square frame side in pixels.
    pub frame_size: u32,
    /// Animation frames per sheet.
    pub frame_count: u32,
    /// Pixel block size (1 = full resolution).
    pub pixel_size: u32,
}

/// Frame geometry for every body kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpriteConfig {
    pub star: SpriteSize,
    pub rocky_planet: SpriteSize,
    pub gas_giant: SpriteSize,
    pub moon: SpriteSize,
    pub asteroid: SpriteSize,
    pub black_hole: SpriteSize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("sprites"),
            manifest_file: "manifest.json".to_string(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            jobs: 0,
            base_seed: 12345,
            variants_per_type: 0,
            sprites_per_variant: 1,
        }
    }
}

impl SpriteSize {
    pub const fn new(frame_size: u32, frame_count: u32) -> Self {
        Self {
            frame_size,
            frame_count,
            pixel_size: 1,
        }
    }
}

impl Default for SpriteSize {
    fn default() -> Self {
        Self::new(128, 24)
    }
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            star: SpriteSize::new(192, 24),
            rocky_planet: SpriteSize::new(128, 24),
            gas_giant: SpriteSize::new(192, 24),
            moon: SpriteSize::new(96, 24),
            asteroid: SpriteSize::new(48, 16),
            black_hole: SpriteSize::new(192, 24),
        }
    }
}

impl SpriteConfig {
    /// Geometry for a snake_case kind name such as `"gas_giant"`.
    pub fn get(&self, kind: &str) -> Option<&SpriteSize> {
        match kind {
            "star" => Some(&self.star),
            "rocky_planet" => Some(&self.rocky_planet),
            "gas_giant" => Some(&self.gas_giant),
            "moon" => Some(&self.moon),
            "asteroid" => Some(&self.asteroid),
            "black_hole" => Some(&self.black_hole),
            _ => None,
        }
    }

    /// Every entry, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SpriteSize> {
        [
            &mut self.star,
            &mut self.rocky_planet,
            &mut self.gas_giant,
            &mut self.moon,
            &mut self.asteroid,
            &mut self.black_hole,
        ]
        .into_iter()
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// The platform config directory for starforge, e.g. `~/.config/starforge`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("starforge"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Re-read the file: `Some(new_config)` if it changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Manifest path inside the output directory.
    pub fn manifest_path(&self) -> PathBuf {
        self.output.directory.join(&self.output.manifest_file)
    }
}
