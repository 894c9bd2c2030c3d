//! Error types for map geometry and configuration

use thiserror::Error;

/// Structural problems found by [`Path::validate`](crate::path::Path::validate).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PathError {
    /// Numeric operands appear before the first command letter
    #[error("operand at token {index} precedes any command")]
    MissingCommand { index: usize },

    /// Command letter outside the supported alphabet
    #[error("unsupported path command `{command}` at token {index}")]
    UnknownCommand { command: char, index: usize },

    /// Command whose operands are not x/y pairs (H, V, A)
    #[error("path command `{command}` at token {index} breaks x/y operand pairing")]
    UnpairedOperands { command: char, index: usize },

    /// Operand count is not a multiple of the command's arity
    #[error("path command `{command}` at token {index} has {count} operands, expected a multiple of {arity}")]
    DanglingOperands {
        command: char,
        index: usize,
        count: usize,
        arity: usize,
    },

    /// Operand text that did not parse as a number
    #[error("operand at token {index} is not a number")]
    NotANumber { index: usize },
}

/// Unrecognized color text.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unrecognized color `{0}`")]
pub struct ColorParseError(pub String);

/// Configuration invariant violations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A gradient needs both end colors
    #[error("color gradient is missing its `{0}` color")]
    MissingGradientColor(&'static str),

    /// Discrete ranges and a gradient are mutually exclusive
    #[error("color ranges and a color gradient cannot both be configured")]
    ConflictingColorScales,

    /// Centroid bias fractions live in 0..=1
    #[error("centroid bias {value} for `{axis}` is outside 0..=1")]
    BiasOutOfRange { axis: &'static str, value: f32 },

    /// Zoom factors must be finite and positive
    #[error("zoom factor for `{button}` must be positive, got {factor}")]
    InvalidZoomFactor { button: &'static str, factor: f32 },

    /// Navigation buttons need a visible size
    #[error("navigation button size must be positive, got {width}x{height}")]
    InvalidButtonSize { width: f32, height: f32 },

    #[error(transparent)]
    Color(#[from] ColorParseError),
}

/// Result type for configuration validation
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
