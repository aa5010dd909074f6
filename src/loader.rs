//! Asynchronous track source loading.
//!
//! Reads one GeoJSON file per expected track id from a base directory:
//! - Unordered concurrent reads with bounded in-flight loads
//! - Per-load progress callbacks for a loading indicator
//! - Per-track failure tolerance: a bad file is logged and its registry slot
//!   recorded as failed, never fatal to the batch
//!
//! Registration happens on the single driving task as each load finishes, so
//! the registry sees one writer and needs no locking.

use crate::{
    simplify_geometry, AtlasConfig, AtlasError, RegistryEvent, Track, TrackGeometry, TrackPoint,
    TrackRegistry,
};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Bound on in-flight file reads. Track files are small; this is about not
/// exhausting file handles, not about throughput.
const MAX_CONCURRENT_LOADS: usize = 8;

/// Progress callback type, called with (settled, total) after every load.
pub type ProgressCallback = Arc<dyn Fn(u32, u32) + Send + Sync>;

/// Outcome of a whole loading pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Tracks registered successfully.
    pub loaded: u32,
    /// Loads that settled as failed.
    pub failed: u32,
    /// True when the registry reached its completeness transition.
    pub completed: bool,
}

// ============================================================================
// Track file document shapes (only the fields the atlas reads)
// ============================================================================

#[derive(Debug, Deserialize)]
struct TrackDocument {
    features: Vec<FeatureDoc>,
}

#[derive(Debug, Deserialize)]
struct FeatureDoc {
    properties: PropertiesDoc,
    geometry: GeometryDoc,
}

#[derive(Debug, Deserialize)]
struct PropertiesDoc {
    name: String,
    time: String,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum GeometryDoc {
    LineString { coordinates: Vec<Vec<f64>> },
    MultiLineString { coordinates: Vec<Vec<Vec<f64>>> },
}

fn parse_path(id: &str, coords: Vec<Vec<f64>>) -> Result<Vec<TrackPoint>, AtlasError> {
    coords
        .into_iter()
        .map(|c| {
            if c.len() < 2 {
                return Err(AtlasError::MalformedCoordinate { id: id.to_string() });
            }
            // GeoJSON coordinate order is [lng, lat, elevation?]
            Ok(TrackPoint::with_elevation(c[1], c[0], c.get(2).copied().unwrap_or(0.0)))
        })
        .collect()
}

fn parse_geometry(id: &str, doc: GeometryDoc) -> Result<TrackGeometry, AtlasError> {
    match doc {
        GeometryDoc::LineString { coordinates } => {
            Ok(TrackGeometry::Path(parse_path(id, coordinates)?))
        }
        GeometryDoc::MultiLineString { coordinates } => Ok(TrackGeometry::MultiPath(
            coordinates
                .into_iter()
                .map(|path| parse_path(id, path))
                .collect::<Result<_, _>>()?,
        )),
    }
}

/// Every track id the configuration expects a file for: primary ids plus the
/// `"<id>-1"` secondary recording of each extra track.
pub fn expected_track_ids(config: &AtlasConfig) -> Vec<String> {
    let mut ids = Vec::with_capacity(config.expected_track_count());
    for i in 1..=config.track_count {
        ids.push(i.to_string());
        if config.extra_track_ids.contains(&i) {
            ids.push(format!("{i}-1"));
        }
    }
    ids
}

// ============================================================================
// Loader
// ============================================================================

/// Loads track files from a directory of static GeoJSON assets.
pub struct TrackSourceLoader {
    base_dir: PathBuf,
}

impl TrackSourceLoader {
    /// Create a loader reading from the given directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into() }
    }

    /// Path of the file backing a track id.
    pub fn track_path(&self, id: &str) -> PathBuf {
        self.base_dir.join(format!("{id}.geojson"))
    }

    /// Read and parse a single track file.
    ///
    /// The registered name is `"#<id> - <recorded name>"` with the source's
    /// `**` markers stripped. A positive tolerance simplifies the geometry
    /// before the track is built, so the derived length reflects what will be
    /// rendered.
    pub async fn load_track(&self, id: &str, tolerance: f64) -> Result<Track, AtlasError> {
        let path = self.track_path(id);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| AtlasError::TrackRead { id: id.to_string(), source })?;

        let document: TrackDocument = serde_json::from_slice(&bytes)
            .map_err(|source| AtlasError::TrackParse { id: id.to_string(), source })?;

        let feature = document
            .features
            .into_iter()
            .next()
            .ok_or_else(|| AtlasError::NoFeatures { id: id.to_string() })?;

        let recorded_at = DateTime::parse_from_rfc3339(&feature.properties.time)
            .map_err(|source| AtlasError::BadTimestamp { id: id.to_string(), source })?
            .with_timezone(&Utc);

        let mut geometry = parse_geometry(id, feature.geometry)?;
        if tolerance > 0.0 {
            geometry = simplify_geometry(&geometry, tolerance);
        }

        let name = format!("#{id} - {}", feature.properties.name.replace("**", ""));
        debug!("loaded track {} ({} points)", id, geometry.point_count());

        Ok(Track::new(id, name, recorded_at, geometry))
    }

    async fn load_entry(&self, id: String, tolerance: f64) -> (String, Result<Track, AtlasError>) {
        let outcome = self.load_track(&id, tolerance).await;
        (id, outcome)
    }

    /// Load every expected track file and register the results.
    ///
    /// Loads run unordered with bounded concurrency; each one settles its
    /// registry slot exactly once as it finishes. Failed files are tolerated
    /// and reported through the log and the returned [`LoadReport`].
    pub async fn load_all(
        &self,
        config: &AtlasConfig,
        registry: &mut TrackRegistry,
        on_progress: Option<ProgressCallback>,
    ) -> LoadReport {
        let ids = expected_track_ids(config);
        let total = ids.len() as u32;
        let tolerance = config.simplification_tolerance;

        info!(
            "loading {} track files from {} (max {} in flight)",
            total,
            self.base_dir.display(),
            MAX_CONCURRENT_LOADS
        );

        let mut results = stream::iter(ids)
            .map(|id| self.load_entry(id, tolerance))
            .buffer_unordered(MAX_CONCURRENT_LOADS);

        let mut loaded = 0u32;
        let mut failed = 0u32;
        let mut completed = false;

        while let Some((id, outcome)) = results.next().await {
            let event = match outcome {
                Ok(track) => {
                    loaded += 1;
                    registry.register(track)
                }
                Err(err) => {
                    failed += 1;
                    warn!("track {id} failed to load: {err}");
                    registry.record_failed(&id)
                }
            };

            if let Some(callback) = &on_progress {
                callback(loaded + failed, total);
            }

            if event == RegistryEvent::Complete {
                completed = true;
            }
        }

        info!("track loading finished: {loaded} loaded, {failed} failed");
        LoadReport { loaded, failed, completed }
    }
}
