//! Error types for trail-atlas.
//!
//! All errors are local and recoverable: pure computation rejects invalid
//! parameters at the call site, and per-track load failures never abort a
//! batch. Nothing here should ever take down the whole application.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    /// The geometry sampler was asked for a non-positive interval.
    #[error("sample interval must be at least 1")]
    InvalidSampleInterval,

    /// A color string did not parse as a 6-hex-digit RGB triple.
    #[error("invalid hex color: {value:?}")]
    InvalidColor { value: String },

    /// A gradient was requested with fewer than two steps.
    #[error("gradient needs at least 2 steps, got {steps}")]
    InvalidStepCount { steps: usize },

    /// A derivation was asked to operate on geometry with no points.
    #[error("track {id:?} has no points")]
    EmptyGeometry { id: String },

    /// Statistics or completion-dependent layers were requested before every
    /// expected track load settled.
    #[error("registry incomplete: {settled} of {expected} tracks settled")]
    RegistryIncomplete { settled: usize, expected: usize },

    /// A track file could not be read from the source directory.
    #[cfg(feature = "loader")]
    #[error("failed to read track {id}")]
    TrackRead {
        id: String,
        #[source]
        source: std::io::Error,
    },

    /// A track file was not valid GeoJSON of the expected shape.
    #[cfg(feature = "loader")]
    #[error("failed to parse track {id}")]
    TrackParse {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    /// A track file parsed but contained no feature to register.
    #[cfg(feature = "loader")]
    #[error("track {id} has no features")]
    NoFeatures { id: String },

    /// A coordinate array had fewer than two components.
    #[cfg(feature = "loader")]
    #[error("track {id} has a malformed coordinate")]
    MalformedCoordinate { id: String },

    /// A track's recording timestamp was not RFC 3339.
    #[cfg(feature = "loader")]
    #[error("track {id} has an unparseable timestamp")]
    BadTimestamp {
        id: String,
        #[source]
        source: chrono::ParseError,
    },
}
