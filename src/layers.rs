//! Rendering payload derivation.
//!
//! Builds the three payloads the external map widget consumes, pre-computing
//! everything the renderer needs so it never has to touch raw tracks:
//! - a styled geometry payload per track (path rendering, camera fitting)
//! - an elevation-to-color stop list per track (elevation profile rendering)
//! - a flattened, sampled point cloud over all tracks (density rendering)
//!
//! The payloads are serde-serializable; the widget receives them as JSON and
//! is never queried back.

use crate::{
    color_gradient, geo_utils, AtlasError, Bounds, Track, TrackGeometry, TrackPoint,
    TrackRegistry, TrackStyle,
};
use log::warn;
use serde::Serialize;

/// One elevation-to-color mapping entry. Stop lists are monotonic in
/// elevation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElevationStop {
    pub elevation: f64,
    pub color: String,
}

/// Track geometry in the renderer's coordinate order: `[lng, lat, elevation]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum GeometryPayload {
    LineString(Vec<[f64; 3]>),
    MultiLineString(Vec<Vec<[f64; 3]>>),
}

/// Geometry-plus-style payload for rendering one track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackLayer {
    pub id: String,
    pub name: String,
    pub geometry: GeometryPayload,
    pub color: String,
    pub width: f64,
    /// Pre-computed for camera fitting; `None` for point-free geometry.
    pub bounds: Option<Bounds>,
    pub center: Option<TrackPoint>,
}

fn payload_coords(points: &[TrackPoint]) -> Vec<[f64; 3]> {
    points
        .iter()
        .map(|p| [p.longitude, p.latitude, p.elevation])
        .collect()
}

/// Build the rendering payload for one track.
pub fn track_layer(track: &Track, style: &TrackStyle) -> TrackLayer {
    let geometry = match &track.geometry {
        TrackGeometry::Path(points) => GeometryPayload::LineString(payload_coords(points)),
        TrackGeometry::MultiPath(paths) => {
            GeometryPayload::MultiLineString(paths.iter().map(|p| payload_coords(p)).collect())
        }
    };

    let bounds = Bounds::from_points(&track.geometry.flatten());

    TrackLayer {
        id: track.id.clone(),
        name: track.name.clone(),
        geometry,
        color: style.color.clone(),
        width: style.width,
        bounds,
        center: bounds.map(|b| b.center()),
    }
}

/// Build the elevation-to-color stop list for one track.
///
/// The stops span the track's elevation range with `steps` gradient colors,
/// lowest elevation first. A track whose points all share one elevation (or
/// that carries no elevation data at all) degenerates to two stops at that
/// shared elevation, bounded by the gradient's endpoint colors.
///
/// Fails with [`AtlasError::EmptyGeometry`] when the track has no points;
/// callers skip the track and report, they do not abort.
pub fn elevation_stops(
    track: &Track,
    steps: usize,
    low_color: &str,
    high_color: &str,
) -> Result<Vec<ElevationStop>, AtlasError> {
    let colors = color_gradient(low_color, high_color, steps)?;

    let points = track.geometry.flatten();
    if points.is_empty() {
        return Err(AtlasError::EmptyGeometry { id: track.id.clone() });
    }

    let min = points.iter().map(|p| p.elevation).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.elevation).fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 {
        let first = colors.first().cloned().unwrap_or_default();
        let last = colors.last().cloned().unwrap_or_default();
        return Ok(vec![
            ElevationStop { elevation: min, color: first },
            ElevationStop { elevation: min, color: last },
        ]);
    }

    Ok(colors
        .into_iter()
        .enumerate()
        .map(|(i, color)| ElevationStop {
            elevation: min + (i as f64 / (steps - 1) as f64) * range,
            color,
        })
        .collect())
}

/// Build the density point cloud over every registered track.
///
/// Each track's geometry is flattened to one ordered point list and sampled
/// at the given interval to bound the payload size; tracks are concatenated
/// in id order. Requires a complete registry for the same reason statistics
/// do, and rejects a zero interval up front.
pub fn density_points(
    registry: &TrackRegistry,
    interval: usize,
) -> Result<Vec<TrackPoint>, AtlasError> {
    if interval == 0 {
        return Err(AtlasError::InvalidSampleInterval);
    }
    if !registry.is_complete() {
        return Err(AtlasError::RegistryIncomplete {
            settled: registry.settled_count(),
            expected: registry.expected(),
        });
    }

    let mut tracks: Vec<_> = registry.tracks().collect();
    tracks.sort_by(|a, b| a.id.cmp(&b.id));

    let mut points = Vec::new();
    for track in tracks {
        let flat = track.geometry.flatten();
        if flat.is_empty() {
            warn!("density: skipping track {} with no points", track.id);
            continue;
        }
        points.extend(geo_utils::sample_every(&flat, interval)?);
    }

    Ok(points)
}
