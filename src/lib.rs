//! # Trail Atlas
//!
//! Hiking track aggregation, distance statistics and map rendering payloads.
//!
//! This library provides:
//! - A track registry with an explicit load-completeness state machine
//! - Distance statistics (total, current-year, monthly, goal progress)
//! - Track simplification and point sampling for map rendering
//! - Elevation color gradients and density point clouds for visual layers
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch simplification with rayon
//! - **`loader`** - Enable the asynchronous GeoJSON track source loader
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use trail_atlas::{compute_stats, Track, TrackGeometry, TrackPoint, TrackRegistry};
//! use chrono::Utc;
//!
//! let geometry = TrackGeometry::Path(vec![
//!     TrackPoint::new(22.3700, 114.1535),
//!     TrackPoint::new(22.3750, 114.1600),
//! ]);
//! let track = Track::new("1", "Lion Rock", Utc::now(), geometry);
//!
//! // A registry expecting a single track is complete after one registration.
//! let mut registry = TrackRegistry::new(1);
//! registry.register(track);
//! assert!(registry.is_complete());
//!
//! let stats = compute_stats(&registry, 500.0, Utc::now()).unwrap();
//! println!("Total distance: {:.2} km", stats.total_km);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod error;
pub use error::AtlasError;

pub mod geo_utils;

pub mod gradient;
pub use gradient::color_gradient;

pub mod simplify;
pub use simplify::simplify_geometry;

pub mod registry;
pub use registry::{LoadState, RegistryEvent, TrackRegistry};

pub mod stats;
pub use stats::{compute_stats, compute_stats_now, StatsSnapshot};

pub mod layers;
pub use layers::{
    density_points, elevation_stops, track_layer, ElevationStop, GeometryPayload, TrackLayer,
};

// Asynchronous track source loading
#[cfg(feature = "loader")]
pub mod loader;

#[cfg(feature = "loader")]
pub use loader::{LoadReport, ProgressCallback, TrackSourceLoader};

// ============================================================================
// Core Types
// ============================================================================

/// A single recorded coordinate: latitude, longitude and elevation in meters.
///
/// Track sources without a vertical component report an elevation of `0.0`.
///
/// # Example
/// ```
/// use trail_atlas::TrackPoint;
/// let summit = TrackPoint::with_elevation(22.3964, 114.1095, 957.0); // Tai Mo Shan
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl TrackPoint {
    /// Create a new point at sea level.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude, elevation: 0.0 }
    }

    /// Create a new point with an elevation in meters.
    pub fn with_elevation(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self { latitude, longitude, elevation }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.elevation.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Recorded geometry of a track: a single open path, or several disjoint
/// sub-paths (a recording that was paused and resumed, or split by tunnels).
///
/// Sub-paths of a [`TrackGeometry::MultiPath`] keep their recording order and
/// are never merged.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackGeometry {
    Path(Vec<TrackPoint>),
    MultiPath(Vec<Vec<TrackPoint>>),
}

impl TrackGeometry {
    /// Total number of points across all sub-paths.
    pub fn point_count(&self) -> usize {
        match self {
            TrackGeometry::Path(points) => points.len(),
            TrackGeometry::MultiPath(paths) => paths.iter().map(|p| p.len()).sum(),
        }
    }

    /// True when the geometry holds no points at all.
    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }

    /// Flatten the geometry into a single ordered point list.
    ///
    /// Sub-paths are concatenated in order; no points are invented or dropped.
    pub fn flatten(&self) -> Vec<TrackPoint> {
        match self {
            TrackGeometry::Path(points) => points.clone(),
            TrackGeometry::MultiPath(paths) => paths.iter().flatten().copied().collect(),
        }
    }
}

/// One hiking recording: identity, display metadata and geometry.
///
/// `length_km` is derived from the geometry when the track is created and is
/// only recomputed when the geometry is replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    /// Stable identifier, unique within a registry (e.g. `"12"` or `"12-1"`).
    pub id: String,
    /// Display label.
    pub name: String,
    /// Recording timestamp. The year/month partition for statistics is taken
    /// from this value at statistics-computation time.
    pub recorded_at: DateTime<Utc>,
    /// Path length in kilometers, derived from the geometry.
    pub length_km: f64,
    /// Recorded geometry.
    pub geometry: TrackGeometry,
}

impl Track {
    /// Create a track, deriving its length from the geometry.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        recorded_at: DateTime<Utc>,
        geometry: TrackGeometry,
    ) -> Self {
        let length_km = geo_utils::geometry_length_km(&geometry);
        Self {
            id: id.into(),
            name: name.into(),
            recorded_at,
            length_km,
            geometry,
        }
    }

    /// Replace the geometry and recompute the derived length.
    pub fn replace_geometry(&mut self, geometry: TrackGeometry) {
        self.length_km = geo_utils::geometry_length_km(&geometry);
        self.geometry = geometry;
    }
}

/// Bounding box for a track, used by the map widget to fit the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from track points. Returns `None` for empty input.
    pub fn from_points(points: &[TrackPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self { min_lat, max_lat, min_lng, max_lng })
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> TrackPoint {
        TrackPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Line styling for track rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackStyle {
    /// Line color as a hex triple (e.g. `"#ee6c4d"`).
    pub color: String,
    /// Line width in pixels.
    pub width: f64,
}

/// Static application configuration, consumed read-only by every component.
#[derive(Debug, Clone)]
pub struct AtlasConfig {
    /// Number of primary tracks. Track ids are `"1"` through this count.
    pub track_count: u32,

    /// Primary track ids that have a secondary recording stored alongside
    /// them as `"<id>-1"`. Counted toward the expected total.
    pub extra_track_ids: Vec<u32>,

    /// Cumulative distance goal for the current calendar year, in km.
    /// Default: 500.0
    pub yearly_goal_km: f64,

    /// Tolerance for Douglas-Peucker simplification (in degrees).
    /// Smaller values preserve more detail. Default: 0.0001 (~11 meters)
    pub simplification_tolerance: f64,

    /// Sample interval for the density point cloud: every n-th point of each
    /// track is kept. Default: 10
    pub density_sample_interval: usize,

    /// Number of color stops in the elevation gradient. Default: 10
    pub elevation_gradient_steps: usize,

    /// Gradient endpoint for the lowest elevation. Default: "#2a9d8f"
    pub elevation_low_color: String,

    /// Gradient endpoint for the highest elevation. Default: "#e76f51"
    pub elevation_high_color: String,

    /// Styling for unselected tracks.
    pub default_style: TrackStyle,

    /// Styling for the selected track.
    pub selected_style: TrackStyle,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            track_count: 114,
            extra_track_ids: vec![51, 55, 66],
            yearly_goal_km: 500.0,
            simplification_tolerance: 0.0001,
            density_sample_interval: 10,
            elevation_gradient_steps: 10,
            elevation_low_color: "#2a9d8f".to_string(),
            elevation_high_color: "#e76f51".to_string(),
            default_style: TrackStyle { color: "#ee6c4d".to_string(), width: 2.0 },
            selected_style: TrackStyle { color: "#3d5a80".to_string(), width: 3.0 },
        }
    }
}

impl AtlasConfig {
    /// Total number of track files expected by the registry: every primary
    /// track plus one secondary recording per extra track id.
    pub fn expected_track_count(&self) -> usize {
        self.track_count as usize + self.extra_track_ids.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
