//! Celestial-body sprite synthesis.
//!
//! A [`BodySpec`] names the body kind, variant, seed and frame geometry. The
//! [`FrameAssembler`] renders one frame per animation phase by projecting the
//! frame's pixel grid onto a rotating sphere ([`SurfaceSampler`]), evaluating
//! the body's noise fields, resolving its feature layers
//! ([`compositor`]) against the [`PaletteTable`], and packing the frames into a
//! horizontal filmstrip ([`SpriteSheet`]).

mod assembler;
mod body;
mod buffer;
mod error;
mod sampler;
mod sheet;

pub mod compositor;
pub mod palette;

pub use assembler::{FrameAssembler, generate, generate_with_noise};
pub use body::{BodyKind, BodySpec};
pub use compositor::{BodyCompositor, FrameContext, LayerHit, Shade, compositor_for};
pub use buffer::PixelBuffer;
pub use error::SpriteError;
pub use palette::{PaletteSet, PaletteTable, Ramp, Rgb};
pub use sampler::{
    FrameLayout, LightingModel, OutsideSample, PixelSample, SurfaceSample, SurfaceSampler,
    WORLD_SCALE,
};
pub use sheet::{SpriteFrame, SpriteSheet, frame_index_for_angle};
