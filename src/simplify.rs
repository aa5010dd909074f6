//! Track simplification.
//!
//! Reduces the point count of recorded geometry with the Ramer-Douglas-Peucker
//! algorithm while keeping the perpendicular deviation of every removed point
//! within the configured tolerance. Simplification is index-based: every
//! retained point is one of the original recorded points, so elevation values
//! survive untouched.
//!
//! Malformed geometry (no points, or a path too short to simplify) is returned
//! unchanged and reported through the log; it never fails the caller.

use crate::{TrackGeometry, TrackPoint};
use geo::algorithm::simplify::SimplifyIdx;
use geo::{Coord, LineString};
use log::warn;

/// Simplify a single path, returning the retained subset of its points.
///
/// Tolerance is in degrees, matching the coordinate space; 0.0001 is roughly
/// 11 meters at mid latitudes. Paths with fewer than 3 points are returned
/// unchanged (there is nothing to remove).
pub fn simplify_path(points: &[TrackPoint], tolerance: f64) -> Vec<TrackPoint> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let line = LineString::new(
        points
            .iter()
            .map(|p| Coord { x: p.longitude, y: p.latitude })
            .collect(),
    );

    line.simplify_idx(&tolerance)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Simplify a track geometry within the given tolerance.
///
/// Single paths are simplified directly. Multi-path geometry is simplified one
/// sub-path at a time and reassembled in the original order; sub-paths are
/// never merged or reordered. Empty geometry is returned unchanged with a
/// warning.
///
/// # Example
///
/// ```rust
/// use trail_atlas::{simplify_geometry, TrackGeometry, TrackPoint};
///
/// // A detour of ~0.0001 degrees disappears at a coarser tolerance
/// let geometry = TrackGeometry::Path(vec![
///     TrackPoint::new(22.3700, 114.1500),
///     TrackPoint::new(22.3750, 114.1501),
///     TrackPoint::new(22.3800, 114.1500),
/// ]);
///
/// let simplified = simplify_geometry(&geometry, 0.001);
/// assert_eq!(simplified.point_count(), 2);
/// ```
pub fn simplify_geometry(geometry: &TrackGeometry, tolerance: f64) -> TrackGeometry {
    if geometry.is_empty() {
        warn!("simplify: geometry has no points, returning unchanged");
        return geometry.clone();
    }

    match geometry {
        TrackGeometry::Path(points) => TrackGeometry::Path(simplify_path(points, tolerance)),
        TrackGeometry::MultiPath(paths) => TrackGeometry::MultiPath(
            paths
                .iter()
                .map(|path| simplify_path(path, tolerance))
                .collect(),
        ),
    }
}

/// Simplify many geometries in parallel.
///
/// Useful when preparing a whole collection of dense recordings at once.
#[cfg(feature = "parallel")]
pub fn simplify_batch(geometries: &[TrackGeometry], tolerance: f64) -> Vec<TrackGeometry> {
    use log::info;
    use rayon::prelude::*;

    info!(
        "simplifying {} geometries (tolerance {})",
        geometries.len(),
        tolerance
    );

    geometries
        .par_iter()
        .map(|g| simplify_geometry(g, tolerance))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contains_point(haystack: &[TrackPoint], needle: &TrackPoint) -> bool {
        haystack.iter().any(|p| p == needle)
    }

    fn wiggly_path() -> Vec<TrackPoint> {
        // Alternating offsets around a northward line, no three points collinear
        (0..20)
            .map(|i| {
                let jitter = if i % 2 == 0 { 0.0002 } else { -0.0002 };
                TrackPoint::with_elevation(22.37 + i as f64 * 0.001, 114.15 + jitter, i as f64 * 5.0)
            })
            .collect()
    }

    #[test]
    fn test_simplified_points_are_subset_of_original() {
        let original = wiggly_path();
        let simplified = simplify_path(&original, 0.0005);

        assert!(simplified.len() < original.len());
        for p in &simplified {
            assert!(contains_point(&original, p));
        }
    }

    #[test]
    fn test_zero_tolerance_keeps_non_collinear_points() {
        let original = wiggly_path();
        let simplified = simplify_path(&original, 0.0);
        assert_eq!(simplified, original);
    }

    #[test]
    fn test_collinear_point_removed() {
        let path = vec![
            TrackPoint::new(22.3700, 114.1500),
            TrackPoint::new(22.3750, 114.1500),
            TrackPoint::new(22.3800, 114.1500),
        ];
        let simplified = simplify_path(&path, 0.00001);
        assert_eq!(simplified, vec![path[0], path[2]]);
    }

    #[test]
    fn test_elevation_survives_simplification() {
        let simplified = simplify_path(&wiggly_path(), 0.001);
        // Endpoints always survive, with the elevations they were recorded at
        assert_eq!(simplified.first().unwrap().elevation, 0.0);
        assert_eq!(simplified.last().unwrap().elevation, 95.0);
    }

    #[test]
    fn test_short_path_unchanged() {
        let two = vec![
            TrackPoint::new(22.37, 114.15),
            TrackPoint::new(22.38, 114.16),
        ];
        assert_eq!(simplify_path(&two, 1.0), two);
    }

    #[test]
    fn test_multi_path_preserves_count_and_order() {
        let first = wiggly_path();
        let second: Vec<TrackPoint> = wiggly_path()
            .into_iter()
            .map(|p| TrackPoint::with_elevation(p.latitude + 1.0, p.longitude, p.elevation))
            .collect();
        let geometry = TrackGeometry::MultiPath(vec![first.clone(), second.clone()]);

        let simplified = simplify_geometry(&geometry, 0.0005);
        match simplified {
            TrackGeometry::MultiPath(paths) => {
                assert_eq!(paths.len(), 2);
                assert_eq!(paths[0][0], first[0]);
                assert_eq!(paths[1][0], second[0]);
            }
            TrackGeometry::Path(_) => panic!("multi-path became a single path"),
        }
    }

    #[test]
    fn test_empty_geometry_unchanged() {
        let empty = TrackGeometry::Path(vec![]);
        assert_eq!(simplify_geometry(&empty, 0.0001), empty);

        let empty_multi = TrackGeometry::MultiPath(vec![]);
        assert_eq!(simplify_geometry(&empty_multi, 0.0001), empty_multi);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_simplify_batch_matches_sequential() {
        let geometries = vec![
            TrackGeometry::Path(wiggly_path()),
            TrackGeometry::MultiPath(vec![wiggly_path(), wiggly_path()]),
        ];
        let batch = simplify_batch(&geometries, 0.0005);
        for (original, simplified) in geometries.iter().zip(&batch) {
            assert_eq!(simplified, &simplify_geometry(original, 0.0005));
        }
    }
}
