use thiserror::Error;

/// Main error type for playlist generation
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// The single output-buffer reservation could not be satisfied
    #[error("allocation failed: {0}")]
    Alloc(#[from] std::collections::TryReserveError),

    /// The asset would split into more segments than the configured maximum
    #[error("invalid segment count {count}, maximum is {max}")]
    SegmentCountExceeded { count: u32, max: u32 },

    /// A zero segment duration was requested
    #[error("invalid segment duration")]
    InvalidSegmentDuration,

    /// A codec name in the metadata is longer than the sizing limit allows
    #[error("codec name too long: {0}")]
    CodecNameTooLong(String),

    /// Frame simulation is not available for the source asset, so an
    /// I-frame playlist cannot be produced for it
    #[error("frame simulation not supported for this asset")]
    SimulationUnsupported,

    /// The written length exceeded the precomputed bound; the size
    /// estimate and the writer have drifted apart
    #[error("result length {written} exceeded allocated length {allocated}")]
    LengthExceeded { written: usize, allocated: usize },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PlaylistError>;
