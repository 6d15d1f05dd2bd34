//! Body kinds and the typed body specification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SpriteError;

/// The kind of celestial body a sprite depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Self-luminous star with corona.
    Star,
    /// Terrestrial planet with oceans, biomes and clouds.
    RockyPlanet,
    /// Banded gas giant, optionally ringed.
    GasGiant,
    /// Airless cratered moon.
    Moon,
    /// Small irregular rock.
    Asteroid,
    /// Event horizon with accretion disk.
    BlackHole,
}

impl BodyKind {
    /// Every body kind, in batch order.
    pub const ALL: [BodyKind; 6] = [
        BodyKind::Star,
        BodyKind::RockyPlanet,
        BodyKind::GasGiant,
        BodyKind::Moon,
        BodyKind::Asteroid,
        BodyKind::BlackHole,
    ];

    /// Stable snake_case name used in manifest keys and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyKind::Star => "star",
            BodyKind::RockyPlanet => "rocky_planet",
            BodyKind::GasGiant => "gas_giant",
            BodyKind::Moon => "moon",
            BodyKind::Asteroid => "asteroid",
            BodyKind::BlackHole => "black_hole",
        }
    }

    /// Recognized variants. The first entry is the fallback for unknown names.
    pub fn variants(&self) -> &'static [&'static str] {
        match self {
            BodyKind::Star => &["g", "o", "b", "a", "f", "k", "m"],
            BodyKind::RockyPlanet => &["terran", "desert", "arctic", "volcanic", "ocean"],
            BodyKind::GasGiant => &["jovian", "saturnian", "ice", "hot"],
            BodyKind::Moon => &["rocky", "icy", "rust"],
            BodyKind::Asteroid => &["silicate", "carbonaceous", "metallic"],
            BodyKind::BlackHole => &["stellar", "supermassive", "quasar"],
        }
    }

    /// The fallback variant.
    pub fn default_variant(&self) -> &'static str {
        self.variants()[0]
    }

    /// Returns `true` if `variant` is one of [`BodyKind::variants`].
    pub fn is_known_variant(&self, variant: &str) -> bool {
        self.variants().contains(&variant)
    }

    /// Default square frame size in pixels.
    pub fn default_frame_size(&self) -> u32 {
        match self {
            BodyKind::Star => 192,
            BodyKind::RockyPlanet => 128,
            BodyKind::GasGiant => 192,
            BodyKind::Moon => 96,
            BodyKind::Asteroid => 48,
            BodyKind::BlackHole => 192,
        }
    }

    /// Default number of animation frames.
    pub fn default_frame_count(&self) -> u32 {
        match self {
            BodyKind::Asteroid => 16,
            _ => 24,
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyKind {
    type Err = SpriteError;

    /// Parses snake_case or kebab-case names plus a few short aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "star" | "stars" | "sun" => Ok(BodyKind::Star),
            "rocky_planet" | "planet" | "planets" | "rocky" => Ok(BodyKind::RockyPlanet),
            "gas_giant" | "gas_giants" | "giant" => Ok(BodyKind::GasGiant),
            "moon" | "moons" => Ok(BodyKind::Moon),
            "asteroid" | "asteroids" => Ok(BodyKind::Asteroid),
            "black_hole" | "black_holes" | "blackhole" => Ok(BodyKind::BlackHole),
            _ => Err(SpriteError::UnknownBodyKind(s.to_string())),
        }
    }
}

/// Everything needed to render one sprite sheet.
///
/// Built with [`BodySpec::new`] (kind defaults) and the `with_*` setters, then
/// checked with [`BodySpec::validate`]. The assembler re-validates before
/// rendering.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodySpec {
    /// Body kind.
    pub kind: BodyKind,
    /// Palette/tuning variant. Unknown names fall back to the kind's default.
    pub variant: String,
    /// Noise seed.
    pub seed: u64,
    /// Frame width in pixels.
    pub frame_width: u32,
    /// Frame height in pixels.
    pub frame_height: u32,
    /// Number of animation frames in the filmstrip.
    pub frame_count: u32,
    /// Side of the square pixel block every sample covers (1 = full resolution).
    pub pixel_size: u32,
}

impl BodySpec {
    /// A spec with the kind's default variant, frame size and frame count.
    pub fn new(kind: BodyKind, seed: u64) -> Self {
        let size = kind.default_frame_size();
        Self {
            kind,
            variant: kind.default_variant().to_string(),
            seed,
            frame_width: size,
            frame_height: size,
            frame_count: kind.default_frame_count(),
            pixel_size: 1,
        }
    }

    /// Parse a `kind` or `variant-kind` name such as `"rocky-moon"` or
    /// `"saturnian_gas_giant"`.
    pub fn parse(name: &str, seed: u64) -> Result<Self, SpriteError> {
        if let Ok(kind) = name.parse::<BodyKind>() {
            return Ok(Self::new(kind, seed));
        }
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        if let Some((variant, rest)) = normalized.split_once('_')
            && let Ok(kind) = rest.parse::<BodyKind>()
        {
            return Ok(Self::new(kind, seed).with_variant(variant));
        }
        Err(SpriteError::UnknownBodyKind(name.to_string()))
    }

    /// Set the variant name.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = variant.into();
        self
    }

    /// Set a square frame size.
    pub fn with_frame_size(mut self, size: u32) -> Self {
        self.frame_width = size;
        self.frame_height = size;
        self
    }

    /// Set independent frame width and height.
    pub fn with_frame_dimensions(mut self, width: u32, height: u32) -> Self {
        self.frame_width = width;
        self.frame_height = height;
        self
    }

    /// Set the number of animation frames.
    pub fn with_frame_count(mut self, frame_count: u32) -> Self {
        self.frame_count = frame_count;
        self
    }

    /// Set the pixel block size.
    pub fn with_pixel_size(mut self, pixel_size: u32) -> Self {
        self.pixel_size = pixel_size;
        self
    }

    /// Check every dimension is positive and the packed sheet fits.
    pub fn validate(&self) -> Result<(), SpriteError> {
        let checks = [
            ("frame_width", self.frame_width),
            ("frame_height", self.frame_height),
            ("frame_count", self.frame_count),
            ("pixel_size", self.pixel_size),
        ];
        for (name, value) in checks {
            if value == 0 {
                return Err(SpriteError::InvalidDimension {
                    name,
                    value: value as u64,
                });
            }
        }
        self.sheet_width().map(|_| ())
    }

    /// Consume and return the spec if it is valid.
    pub fn validated(self) -> Result<Self, SpriteError> {
        self.validate()?;
        Ok(self)
    }

    /// Total width of the packed filmstrip.
    pub fn sheet_width(&self) -> Result<u32, SpriteError> {
        self.frame_width
            .checked_mul(self.frame_count)
            .ok_or(SpriteError::InvalidDimension {
                name: "sheet_width",
                value: self.frame_width as u64 * self.frame_count as u64,
            })
    }

    /// Returns `true` if the variant is recognized for this kind.
    pub fn has_known_variant(&self) -> bool {
        self.kind.is_known_variant(&self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_names() {
        assert_eq!("star".parse::<BodyKind>().unwrap(), BodyKind::Star);
        assert_eq!("gas-giant".parse::<BodyKind>().unwrap(), BodyKind::GasGiant);
        assert_eq!("Black_Hole".parse::<BodyKind>().unwrap(), BodyKind::BlackHole);
        assert_eq!("planet".parse::<BodyKind>().unwrap(), BodyKind::RockyPlanet);
    }

    #[test]
    fn test_unknown_kind_is_error() {
        let err = "comet".parse::<BodyKind>().unwrap_err();
        assert_eq!(err, SpriteError::UnknownBodyKind("comet".to_string()));
    }

    #[test]
    fn test_display_roundtrips_through_from_str() {
        for kind in BodyKind::ALL {
            assert_eq!(kind.to_string().parse::<BodyKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_parse_variant_prefixed_name() {
        let spec = BodySpec::parse("rocky-moon", 12345).unwrap();
        assert_eq!(spec.kind, BodyKind::Moon);
        assert_eq!(spec.variant, "rocky");
        assert_eq!(spec.seed, 12345);

        let spec = BodySpec::parse("saturnian-gas-giant", 1).unwrap();
        assert_eq!(spec.kind, BodyKind::GasGiant);
        assert_eq!(spec.variant, "saturnian");

        assert!(BodySpec::parse("purple-comet", 1).is_err());
    }

    #[test]
    fn test_new_uses_kind_defaults() {
        let spec = BodySpec::new(BodyKind::Asteroid, 7);
        assert_eq!(spec.variant, "silicate");
        assert_eq!(spec.frame_width, 48);
        assert_eq!(spec.frame_count, 16);
        assert_eq!(spec.pixel_size, 1);
        assert!(spec.validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let spec = BodySpec::new(BodyKind::Moon, 1).with_frame_size(0);
        assert_eq!(
            spec.validate(),
            Err(SpriteError::InvalidDimension {
                name: "frame_width",
                value: 0
            })
        );

        let spec = BodySpec::new(BodyKind::Moon, 1).with_frame_count(0);
        assert!(matches!(
            spec.validate(),
            Err(SpriteError::InvalidDimension { name: "frame_count", .. })
        ));

        let spec = BodySpec::new(BodyKind::Moon, 1).with_pixel_size(0);
        assert!(spec.validated().is_err());
    }

    #[test]
    fn test_sheet_width_overflow_rejected() {
        let spec = BodySpec::new(BodyKind::Star, 1)
            .with_frame_size(1 << 20)
            .with_frame_count(1 << 13);
        assert!(matches!(
            spec.validate(),
            Err(SpriteError::InvalidDimension { name: "sheet_width", .. })
        ));
    }

    #[test]
    fn test_known_variants() {
        let spec = BodySpec::new(BodyKind::GasGiant, 1).with_variant("saturnian");
        assert!(spec.has_known_variant());
        let spec = spec.with_variant("plaid");
        assert!(!spec.has_known_variant());
    }

    #[test]
    fn test_spec_serializes_kind_snake_case() {
        let spec = BodySpec::new(BodyKind::BlackHole, 3);
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"kind\":\"black_hole\""));
        let back: BodySpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
    }
}
