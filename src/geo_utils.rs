//! # Geographic Utilities
//!
//! Core geographic computation utilities for hiking track data.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two points |
//! | [`path_length_km`] | Length of a single path in kilometers |
//! | [`geometry_length_km`] | Length of a whole track geometry in kilometers |
//! | [`sample_every`] | Keep every n-th point of a path |
//!
//! ## Coordinate System
//!
//! All functions expect WGS84 coordinates (latitude/longitude in degrees),
//! the standard used by GPS receivers and mapping services. Distances use the
//! haversine formula, accurate to within 0.3% for hiking-scale tracks.

use crate::{AtlasError, TrackGeometry, TrackPoint};
use geo::{Distance, Haversine, Point};

// =============================================================================
// Distance Functions
// =============================================================================

/// Calculate the great-circle distance between two track points using the
/// Haversine formula.
///
/// Returns the distance in meters along the Earth's surface. Elevation is
/// ignored; over hiking distances the horizontal component dominates.
///
/// # Example
///
/// ```rust
/// use trail_atlas::{geo_utils, TrackPoint};
///
/// let london = TrackPoint::new(51.5074, -0.1278);
/// let paris = TrackPoint::new(48.8566, 2.3522);
///
/// let distance = geo_utils::haversine_distance(&london, &paris);
/// assert!((distance - 343_560.0).abs() < 1000.0); // ~344 km
/// ```
#[inline]
pub fn haversine_distance(p1: &TrackPoint, p2: &TrackPoint) -> f64 {
    let point1 = Point::new(p1.longitude, p1.latitude);
    let point2 = Point::new(p2.longitude, p2.latitude);
    Haversine::distance(point1, point2)
}

/// Calculate the length of a single path in kilometers.
///
/// Sums the haversine distance between consecutive points. Empty or
/// single-point paths return 0.0.
pub fn path_length_km(points: &[TrackPoint]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| haversine_distance(&w[0], &w[1]))
        .sum::<f64>()
        / 1000.0
}

/// Calculate the length of a whole track geometry in kilometers.
///
/// Multi-path geometry sums each sub-path independently; the gaps between
/// sub-paths contribute nothing.
pub fn geometry_length_km(geometry: &TrackGeometry) -> f64 {
    match geometry {
        TrackGeometry::Path(points) => path_length_km(points),
        TrackGeometry::MultiPath(paths) => paths.iter().map(|p| path_length_km(p)).sum(),
    }
}

// =============================================================================
// Point Sampling
// =============================================================================

/// Keep every `interval`-th point of a path, starting at index 0.
///
/// The input is never mutated; the output preserves original order and
/// contains `ceil(len / interval)` points. An interval of 1 returns the input
/// content unchanged, and an interval at or beyond the path length keeps only
/// the first point. An interval of 0 is rejected.
///
/// # Example
///
/// ```rust
/// use trail_atlas::{geo_utils, TrackPoint};
///
/// let path: Vec<TrackPoint> = (0..10)
///     .map(|i| TrackPoint::new(22.37 + i as f64 * 0.001, 114.15))
///     .collect();
///
/// let sampled = geo_utils::sample_every(&path, 3).unwrap();
/// assert_eq!(sampled.len(), 4); // indices 0, 3, 6, 9
/// assert_eq!(sampled[0], path[0]);
/// ```
pub fn sample_every(points: &[TrackPoint], interval: usize) -> Result<Vec<TrackPoint>, AtlasError> {
    if interval == 0 {
        return Err(AtlasError::InvalidSampleInterval);
    }

    Ok(points.iter().step_by(interval).copied().collect())
}

// =============================================================================
// Unit Tests
// =============================================================================
