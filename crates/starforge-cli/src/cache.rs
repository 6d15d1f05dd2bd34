//! On-disk sprite cache: PNG sheets plus a JSON manifest.
//!
//! Owned by the coordinating thread; workers never touch the output
//! directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use image::error::{ParameterError, ParameterErrorKind};
use serde::{Deserialize, Serialize};
use starforge_sprite::SpriteSheet;
use tracing::{debug, info, warn};

/// Errors from reading or writing the output directory.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to read manifest {}: {source}", path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize manifest: {0}")]
    ManifestSerialize(#[source] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Where a sheet lives and how to slice it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path relative to the output directory.
    pub file: String,
    pub frames: u32,
    /// Total sheet width.
    pub width: u32,
    /// Frame height.
    pub height: u32,
}

impl ManifestEntry {
    pub fn frame_width(&self) -> u32 {
        if self.frames == 0 {
            0
        } else {
            self.width / self.frames
        }
    }

    /// The frame to show at `angle` radians.
    pub fn frame_index_for_angle(&self, angle: f64) -> u32 {
        starforge_sprite::frame_index_for_angle(angle, self.frames)
    }
}

/// Manifest entries keyed by `"<kind>/<variant>/<index>"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    entries: BTreeMap<String, ManifestEntry>,
}

impl Manifest {
    /// Load a manifest; a missing file is an empty manifest.
    pub fn load(path: &Path) -> Result<Self, CacheError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(CacheError::ManifestRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&contents).map_err(|source| CacheError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), CacheError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CacheError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(CacheError::ManifestSerialize)?;
        std::fs::write(path, json).map_err(|source| CacheError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get(&self, key: &str) -> Option<&ManifestEntry> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: ManifestEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ManifestEntry)> {
        self.entries.iter()
    }
}

/// The output directory and its manifest.
#[derive(Debug)]
pub struct SpriteCache {
    root: PathBuf,
    manifest_path: PathBuf,
    manifest: Manifest,
}

impl SpriteCache {
    /// Open `root`, loading `root/manifest_file` if present.
    pub fn open(root: impl Into<PathBuf>, manifest_file: &str) -> Result<Self, CacheError> {
        let mut cache = Self::fresh(root, manifest_file);
        cache.manifest = Manifest::load(&cache.manifest_path)?;
        debug!(entries = cache.manifest.len(), root = %cache.root.display(), "sprite cache opened");
        Ok(cache)
    }

    /// A cache that ignores whatever manifest is on disk.
    pub fn fresh(root: impl Into<PathBuf>, manifest_file: &str) -> Self {
        let root = root.into();
        Self {
            manifest_path: root.join(manifest_file),
            root,
            manifest: Manifest::default(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Returns `true` if `key` is recorded and its sheet is still on disk.
    pub fn contains(&self, key: &str) -> bool {
        match self.manifest.get(key) {
            Some(entry) => {
                let exists = self.root.join(&entry.file).is_file();
                if !exists {
                    warn!(key, file = %entry.file, "manifest entry without sheet");
                }
                exists
            }
            None => false,
        }
    }

    /// Encode `sheet` as PNG and record it under `key`.
    pub fn store(&mut self, key: &str, sheet: &SpriteSheet) -> Result<ManifestEntry, CacheError> {
        std::fs::create_dir_all(&self.root).map_err(|source| CacheError::Write {
            path: self.root.clone(),
            source,
        })?;
        let file = file_name_for(key);
        let path = self.root.join(&file);
        sheet
            .to_rgba_image()
            .ok_or_else(|| {
                image::ImageError::Parameter(ParameterError::from_kind(ParameterErrorKind::DimensionMismatch))
            })
            .and_then(|image| image.save_with_format(&path, image::ImageFormat::Png))
            .map_err(|source| CacheError::Encode {
                path: path.clone(),
                source,
            })?;
        info!(key, path = %path.display(), "sheet written");

        let entry = ManifestEntry {
            file,
            frames: sheet.frame_count,
            width: sheet.width(),
            height: sheet.frame_height,
        };
        self.manifest.insert(key, entry.clone());
        Ok(entry)
    }

    pub fn save_manifest(&self) -> Result<(), CacheError> {
        self.manifest.save(&self.manifest_path)
    }
}

/// PNG file name for a manifest key: `"moon/rocky/0"` -> `"moon_rocky_0.png"`.
pub fn file_name_for(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}.png")
}

#[cfg(test)]
mod tests {
    use super::*;
    use starforge_sprite::{BodyKind, BodySpec, generate};

    fn sheet() -> SpriteSheet {
        let spec = BodySpec::new(BodyKind::Asteroid, 3)
            .with_frame_size(12)
            .with_frame_count(3);
        generate(&spec).unwrap()
    }

    #[test]
    fn test_file_name_for_key() {
        assert_eq!(file_name_for("moon/rocky/0"), "moon_rocky_0.png");
        assert_eq!(file_name_for("gas_giant/saturnian/12"), "gas_giant_saturnian_12.png");
    }

    #[test]
    fn test_store_writes_png_and_entry() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = SpriteCache::open(dir.path().join("out"), "manifest.json").unwrap();
        let sheet = sheet();

        let entry = cache.store("asteroid/silicate/0", &sheet).unwrap();
        assert_eq!(
            entry,
            ManifestEntry {
                file: "asteroid_silicate_0.png".to_string(),
                frames: 3,
                width: 36,
                height: 12,
            }
        );
        assert_eq!(entry.frame_width(), 12);
        assert!(cache.contains("asteroid/silicate/0"));

        let decoded = image::open(dir.path().join("out").join(&entry.file))
            .unwrap()
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (36, 12));
        assert_eq!(decoded.into_raw(), sheet.image.pixels);
    }

    #[test]
    fn test_manifest_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = SpriteCache::open(dir.path(), "manifest.json").unwrap();
        cache.store("asteroid/silicate/0", &sheet()).unwrap();
        cache.save_manifest().unwrap();

        let reopened = SpriteCache::open(dir.path(), "manifest.json").unwrap();
        assert_eq!(reopened.manifest(), cache.manifest());
        assert!(reopened.contains("asteroid/silicate/0"));
        assert!(!reopened.contains("asteroid/silicate/1"));
    }

    #[test]
    fn test_manifest_json_shape() {
        let mut manifest = Manifest::default();
        manifest.insert(
            "star/g/0",
            ManifestEntry {
                file: "star_g_0.png".to_string(),
                frames: 24,
                width: 4608,
                height: 192,
            },
        );
        let json: serde_json::Value = serde_json::to_value(&manifest).unwrap();
        assert_eq!(json["star/g/0"]["file"], "star_g_0.png");
        assert_eq!(json["star/g/0"]["frames"], 24);
        assert_eq!(json["star/g/0"]["width"], 4608);
        assert_eq!(json["star/g/0"]["height"], 192);
    }

    #[test]
    fn test_missing_sheet_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = SpriteCache::open(dir.path(), "manifest.json").unwrap();
        cache.store("asteroid/silicate/0", &sheet()).unwrap();
        std::fs::remove_file(dir.path().join("asteroid_silicate_0.png")).unwrap();
        assert!(!cache.contains("asteroid/silicate/0"));
    }

    #[test]
    fn test_mismatched_pixels_fail_to_encode() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = SpriteCache::open(dir.path(), "manifest.json").unwrap();
        let mut broken = sheet();
        broken.image.pixels.truncate(8);
        assert!(matches!(
            cache.store("asteroid/silicate/0", &broken),
            Err(CacheError::Encode { .. })
        ));
        assert!(cache.manifest().is_empty());
    }

    #[test]
    fn test_missing_manifest_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SpriteCache::open(dir.path(), "manifest.json").unwrap();
        assert!(cache.manifest().is_empty());
    }

    #[test]
    fn test_corrupt_manifest_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("manifest.json"), "{not json").unwrap();
        assert!(matches!(
            SpriteCache::open(dir.path(), "manifest.json"),
            Err(CacheError::ManifestParse { .. })
        ));
    }

    #[test]
    fn test_entry_frame_lookup() {
        let entry = ManifestEntry {
            file: "x.png".to_string(),
            frames: 8,
            width: 64,
            height: 8,
        };
        assert_eq!(entry.frame_index_for_angle(std::f64::consts::PI), 4);
    }
}
