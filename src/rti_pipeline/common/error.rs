use thiserror::Error;

/// Structural problems in an RTI file or a compressed container.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("bad magic line: expected \"3\", found {0:?}")]
    BadMagic(String),

    #[error("unsupported coefficient type {0} (only 2, quantized linear, is supported)")]
    UnsupportedCoefficientType(i64),

    #[error("truncated stream: needed {needed} bytes for {what}, {available} available")]
    Truncated {
        what: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("unexpected end of stream while reading the {0} header line")]
    UnexpectedEof(&'static str),

    #[error("malformed {line} header line: {reason}")]
    MalformedHeader { line: &'static str, reason: String },

    #[error("corrupt segment: {0}")]
    CorruptBlob(String),

    #[error("wrong segment count: expected {expected}, found {found}")]
    WrongBlobCount { expected: usize, found: usize },
}

/// Internal contracts broken by a caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("segment {got} written out of order, expected segment {expected}")]
    SegmentOutOfOrder { expected: usize, got: usize },

    #[error("container {0} before the scale/bias header was written")]
    HeaderNotWritten(&'static str),

    #[error("container header written twice")]
    HeaderRewritten,

    #[error("container finished after {written} of {expected} segments")]
    IncompleteContainer { written: usize, expected: usize },

    #[error("plane {index} is {found}, expected {expected}")]
    PlaneDimensionMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("dataset shape {found} does not match the configured shape {expected}")]
    ShapeMismatch { expected: String, found: String },

    #[error("expected {expected} {what}, found {found}")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("chroma-shared transform needs 3-channel planes, found {0}")]
    ChromaNeedsRgb(usize),

    #[error("segment of {0} bytes does not fit a 32-bit length prefix")]
    SegmentTooLarge(usize),
}

/// Rejections from the wrapped image codec.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("quality {0} outside the supported range 1..=100")]
    InvalidQuality(u8),

    #[error("dimensions {width}x{height} are not representable by the codec")]
    InvalidDimensions { width: usize, height: usize },

    #[error("unsupported channel count {0}")]
    UnsupportedChannels(usize),

    #[error("encoder failure: {0}")]
    EncodeFailed(String),
}

#[derive(Error, Debug)]
pub enum RtiError {
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    #[error("invariant violation: {0}")]
    Invariant(#[from] InvariantViolation),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("external tool failed: {0}")]
    ExternalTool(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RtiError>;
