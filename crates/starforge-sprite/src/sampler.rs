//! Spherical projection of a frame's pixel grid.
//!
//! Every pixel block is classified as either on the projected disc of a unit
//! sphere ([`SurfaceSample`], with normal, depth, rotated world position and
//! lighting) or outside it ([`OutsideSample`], with polar coordinates for
//! halo, corona and ring passes).

use glam::DVec3;
use starforge_noise::{det_atan2, det_cos, det_sin, det_sqrt};

/// Scale from the unit sphere to noise space.
pub const WORLD_SCALE: f64 = 2.0;

/// Fixed directional light plus per-body shading exponents.
///
/// `brightness = boost * (ambient + (1 - ambient) * light^terminator)
///             * (1 - limb_strength + limb_strength * z^limb)`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightingModel {
    /// Unit vector toward the light (upper left, toward the viewer).
    pub light_direction: DVec3,
    /// Floor on the night side. `1.0` means self-lit.
    pub ambient: f64,
    /// Exponent on `max(0, n·L)`; higher is a harsher terminator.
    pub terminator_exponent: f64,
    /// Exponent on depth for limb darkening.
    pub limb_exponent: f64,
    /// How much of the brightness limb darkening may remove.
    pub limb_strength: f64,
    /// Final multiplier.
    pub boost: f64,
}

impl LightingModel {
    /// Lighting with the standard light direction and no boost.
    pub fn new(
        ambient: f64,
        terminator_exponent: f64,
        limb_exponent: f64,
        limb_strength: f64,
    ) -> Self {
        Self {
            light_direction: DVec3::new(-0.5, -0.45, 0.74).normalize(),
            ambient,
            terminator_exponent,
            limb_exponent,
            limb_strength,
            boost: 1.0,
        }
    }

    /// Set the brightness boost.
    pub fn with_boost(mut self, boost: f64) -> Self {
        self.boost = boost;
        self
    }

    /// `max(0, normal · light)`.
    pub fn light_intensity(&self, normal: DVec3) -> f64 {
        normal.dot(self.light_direction).max(0.0)
    }

    /// Limb darkening factor for sphere depth `z`.
    pub fn limb_factor(&self, z: f64) -> f64 {
        1.0 - self.limb_strength + self.limb_strength * z.max(0.0).powf(self.limb_exponent)
    }

    /// Combined brightness at a surface point.
    pub fn brightness(&self, normal: DVec3, z: f64) -> f64 {
        let light = self.light_intensity(normal);
        let lit = self.ambient + (1.0 - self.ambient) * light.powf(self.terminator_exponent);
        self.boost * lit * self.limb_factor(z)
    }

    /// Brightness at the disc center (`z = 1`, normal facing the viewer).
    pub fn center_brightness(&self) -> f64 {
        self.brightness(DVec3::Z, 1.0)
    }
}

/// Frame geometry: canvas size, disc center and sphere radius in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameLayout {
    pub width: u32,
    pub height: u32,
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl FrameLayout {
    /// A centered sphere whose radius is `disc_fraction` of the half frame.
    pub fn new(width: u32, height: u32, disc_fraction: f64) -> Self {
        Self {
            width,
            height,
            center_x: width as f64 / 2.0,
            center_y: height as f64 / 2.0,
            radius: width.min(height) as f64 / 2.0 * disc_fraction,
        }
    }
}

/// A pixel block on the sphere's projected disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSample {
    /// Signed offset from the frame center, x grows right.
    pub dx: f64,
    /// Signed offset from the frame center, y grows down.
    pub dy: f64,
    pub distance: f64,
    /// `distance / radius`, in `[0, 1]`.
    pub normalized_distance: f64,
    /// Sphere depth `sqrt(1 - nd²)`.
    pub z: f64,
    /// Unrotated surface normal `(dx/r, dy/r, z)`.
    pub normal: DVec3,
    /// Normal rotated by the frame rotation and scaled by [`WORLD_SCALE`].
    pub world: DVec3,
    pub light_intensity: f64,
    pub brightness: f64,
}

impl SurfaceSample {
    /// Screen-space latitude in `[-1, 1]`, negative toward the top.
    pub fn latitude(&self) -> f64 {
        self.normal.y
    }

    /// Longitude of the rotated point, in `(-π, π]`.
    pub fn longitude(&self) -> f64 {
        det_atan2(self.world.x, self.world.z)
    }
}

/// A pixel block outside the disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutsideSample {
    pub dx: f64,
    pub dy: f64,
    pub distance: f64,
    /// `distance / radius`, greater than 1.
    pub normalized_distance: f64,
    /// `atan2(dy, dx)`.
    pub angle: f64,
}

/// Classification of one pixel block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PixelSample {
    Disc(SurfaceSample),
    Outside(OutsideSample),
}

/// Maps frame pixels onto a rotating, lit sphere.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceSampler {
    layout: FrameLayout,
    pixel_size: u32,
    lighting: LightingModel,
    sin_rotation: f64,
    cos_rotation: f64,
}

impl SurfaceSampler {
    /// `rotation` is the frame phase already multiplied by the body's spin.
    pub fn new(layout: FrameLayout, pixel_size: u32, rotation: f64, lighting: LightingModel) -> Self {
        Self {
            layout,
            pixel_size: pixel_size.max(1),
            lighting,
            sin_rotation: det_sin(rotation),
            cos_rotation: det_cos(rotation),
        }
    }

    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    /// Sample the block containing pixel `(px, py)` at the block's center.
    pub fn sample(&self, px: u32, py: u32) -> PixelSample {
        let half = (self.pixel_size - 1) as f64 / 2.0;
        let bx = (px - px % self.pixel_size) as f64 + half;
        let by = (py - py % self.pixel_size) as f64 + half;
        let (dx, dy) = self.offset(bx, by);
        let distance = det_sqrt(dx * dx + dy * dy);
        let radius = self.layout.radius;
        let normalized_distance = if radius > 0.0 {
            distance / radius
        } else {
            f64::INFINITY
        };

        if distance > radius || radius <= 0.0 {
            return PixelSample::Outside(OutsideSample {
                dx,
                dy,
                distance,
                normalized_distance,
                angle: det_atan2(dy, dx),
            });
        }

        let z = det_sqrt((1.0 - normalized_distance * normalized_distance).max(0.0));
        let normal = DVec3::new(dx / radius, dy / radius, z);
        let world = self.rotate(normal) * WORLD_SCALE;
        PixelSample::Disc(SurfaceSample {
            dx,
            dy,
            distance,
            normalized_distance,
            z,
            normal,
            world,
            light_intensity: self.lighting.light_intensity(normal),
            brightness: self.lighting.brightness(normal, z),
        })
    }

    /// Whether pixel `(px, py)` itself lies on the disc, regardless of the
    /// block it belongs to.
    pub fn on_disc(&self, px: u32, py: u32) -> bool {
        let (dx, dy) = self.offset(px as f64, py as f64);
        self.layout.radius > 0.0 && det_sqrt(dx * dx + dy * dy) <= self.layout.radius
    }

    fn offset(&self, x: f64, y: f64) -> (f64, f64) {
        (x - self.layout.center_x, y - self.layout.center_y)
    }

    /// Every block origin in row-major order with its sample.
    pub fn blocks(&self) -> impl Iterator<Item = (u32, u32, PixelSample)> + '_ {
        let step = self.pixel_size as usize;
        (0..self.layout.height).step_by(step).flat_map(move |y| {
            (0..self.layout.width)
                .step_by(step)
                .map(move |x| (x, y, self.sample(x, y)))
        })
    }

    fn rotate(&self, p: DVec3) -> DVec3 {
        let (s, c) = (self.sin_rotation, self.cos_rotation);
        DVec3::new(p.x * c + p.z * s, p.y, -p.x * s + p.z * c)
    }
}
