//! Sprite configuration error types.

/// Errors raised while validating a body specification.
///
/// Rendering itself performs no I/O, so configuration problems are the only
/// failures the core reports.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpriteError {
    /// A frame dimension, frame count or pixel size is zero, or the packed
    /// sheet would not fit in `u32` pixels.
    #[error("invalid dimension: {name} = {value}")]
    InvalidDimension {
        /// Which dimension was rejected.
        name: &'static str,
        /// The rejected value.
        value: u64,
    },

    /// The body kind string does not name a known body kind.
    #[error("unknown body kind: {0}")]
    UnknownBodyKind(String),
}
