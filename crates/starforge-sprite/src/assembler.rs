//! Frame rendering and filmstrip assembly.

use std::f64::consts::TAU;

use noise::NoiseFn;
use starforge_noise::{Fields, FrequencyStack, NoiseField};
use tracing::{debug, instrument};

use crate::body::BodySpec;
use crate::buffer::PixelBuffer;
use crate::compositor::{BodyCompositor, FrameContext, compositor_for};
use crate::error::SpriteError;
use crate::palette::{PaletteSet, PaletteTable};
use crate::sampler::{FrameLayout, PixelSample, SurfaceSampler};
use crate::sheet::SpriteSheet;

/// Renders the frames of one body.
///
/// Resolves the palette and compositor once; each frame is then a pure
/// function of the spec, the noise source and the frame phase.
pub struct FrameAssembler<N = NoiseField> {
    spec: BodySpec,
    noise: N,
    palette: &'static PaletteSet,
    compositor: Box<dyn BodyCompositor>,
}

impl FrameAssembler<NoiseField> {
    /// An assembler over a gradient noise field seeded from `spec.seed`.
    pub fn new(spec: &BodySpec) -> Result<Self, SpriteError> {
        Self::with_noise(spec, NoiseField::new(spec.seed))
    }
}

impl<N: NoiseFn<f64, 3>> FrameAssembler<N> {
    /// An assembler over any noise source. Fails on invalid dimensions.
    pub fn with_noise(spec: &BodySpec, noise: N) -> Result<Self, SpriteError> {
        spec.validate()?;
        if !spec.has_known_variant() {
            debug!(kind = %spec.kind, variant = %spec.variant, "unknown variant, using defaults");
        }
        Ok(Self {
            spec: spec.clone(),
            noise,
            palette: PaletteTable::resolve(spec.kind, &spec.variant),
            compositor: compositor_for(spec.kind, &spec.variant),
        })
    }

    pub fn spec(&self) -> &BodySpec {
        &self.spec
    }

    pub fn compositor(&self) -> &dyn BodyCompositor {
        self.compositor.as_ref()
    }

    /// Frame geometry shared by every frame.
    pub fn layout(&self) -> FrameLayout {
        FrameLayout::new(
            self.spec.frame_width,
            self.spec.frame_height,
            self.compositor.disc_fraction(),
        )
    }

    /// Animation phase of frame `index`; indices wrap at the frame count.
    pub fn phase(&self, index: u32) -> f64 {
        let count = self.spec.frame_count;
        (index % count) as f64 / count as f64 * TAU
    }

    /// Render frame `index` into its own buffer.
    pub fn render_frame(&self, index: u32) -> PixelBuffer {
        self.render_phase(self.phase(index))
    }

    /// Render one frame at an arbitrary animation phase.
    pub fn render_phase(&self, phase: f64) -> PixelBuffer {
        let compositor = self.compositor.as_ref();
        let layout = self.layout();
        let pixel_size = self.spec.pixel_size;
        let ctx = FrameContext::new(&self.noise, phase, compositor.spin(), layout);
        let sampler = SurfaceSampler::new(layout, pixel_size, ctx.rotation, compositor.lighting());
        let stack: FrequencyStack = compositor.stack();
        let extent = compositor.effect_extent();

        let mut frame = PixelBuffer::new(layout.width, layout.height);
        let mut fields = Fields::with_capacity(stack.specs().len());
        for (x, y, sample) in sampler.blocks() {
            let on_disc = matches!(sample, PixelSample::Disc(_));
            let rgba = match sample {
                PixelSample::Disc(surface) => {
                    stack.evaluate_into(&self.noise, surface.world, phase, &mut fields);
                    let base = compositor
                        .shade_disc(&surface, &fields, self.palette, &ctx)
                        .map(|hit| hit.shade.to_rgba(ctx.detail(surface.world), surface.brightness));
                    let overlay = compositor
                        .shade_overlay(&surface, self.palette, &ctx)
                        .map(|hit| hit.shade.to_rgba(0.0, 1.0));
                    composite(base, overlay)
                }
                PixelSample::Outside(outside) if outside.normalized_distance <= extent => compositor
                    .shade_outside(&outside, self.palette, &ctx)
                    .map(|hit| hit.shade.to_rgba(0.0, 1.0)),
                PixelSample::Outside(_) => None,
            };
            if let Some(rgba) = rgba
                && rgba[3] > 0
            {
                // Edge blocks only paint the pixels on their own side of the limb.
                frame.fill_rect_where(x, y, pixel_size, pixel_size, rgba, |px, py| {
                    sampler.on_disc(px, py) == on_disc
                });
            }
        }
        frame
    }

    /// Render every frame into a packed filmstrip.
    #[instrument(skip(self), fields(kind = %self.spec.kind, variant = %self.spec.variant, seed = self.spec.seed))]
    pub fn assemble(&self) -> SpriteSheet {
        let spec = &self.spec;
        let mut sheet = SpriteSheet::new(spec.frame_width, spec.frame_height, spec.frame_count);
        for index in 0..spec.frame_count {
            let frame = self.render_frame(index);
            sheet.place(index, &frame);
        }
        debug!(
            width = sheet.width(),
            height = sheet.height(),
            frames = sheet.frame_count,
            "sprite sheet assembled"
        );
        sheet
    }
}

/// Generate the full sprite sheet for `spec`.
pub fn generate(spec: &BodySpec) -> Result<SpriteSheet, SpriteError> {
    Ok(FrameAssembler::new(spec)?.assemble())
}

/// Generate with a caller-supplied noise source.
pub fn generate_with_noise<N: NoiseFn<f64, 3>>(
    spec: &BodySpec,
    noise: N,
) -> Result<SpriteSheet, SpriteError> {
    Ok(FrameAssembler::with_noise(spec, noise)?.assemble())
}

/// Source-over composite of `top` onto `base`.
fn composite(base: Option<[u8; 4]>, top: Option<[u8; 4]>) -> Option<[u8; 4]> {
    let (base, top) = match (base, top) {
        (base, None) => return base,
        (None, top) => return top,
        (Some(base), Some(top)) => (base, top),
    };
    let top_alpha = f64::from(top[3]) / 255.0;
    let base_alpha = f64::from(base[3]) / 255.0;
    let out_alpha = top_alpha + base_alpha * (1.0 - top_alpha);
    if out_alpha <= 0.0 {
        return Some([0; 4]);
    }
    let channel = |i: usize| {
        let c = (f64::from(top[i]) * top_alpha + f64::from(base[i]) * base_alpha * (1.0 - top_alpha))
            / out_alpha;
        c.round().clamp(0.0, 255.0) as u8
    };
    Some([
        channel(0),
        channel(1),
        channel(2),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
