//! Distance statistics over a complete track registry.
//!
//! Produces the figures behind the sidebar: total distance, current-year
//! distance, the per-month breakdown and progress against the yearly goal.
//! The computation is a pure function of (registry, goal, "now") and refuses
//! to run on an incomplete registry, so partial sums can never be shown.

use crate::{AtlasError, TrackRegistry};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

/// Derived distance statistics, recomputed on demand.
///
/// All distances are raw `f64` kilometers; rounding happens only in the
/// display helpers, so repeated computations over an unchanged registry
/// compare equal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    /// Sum of every registered track's length.
    pub total_km: f64,
    /// Sum restricted to tracks recorded in the current calendar year.
    pub current_year_km: f64,
    /// Current-year distance bucketed by recording month (January = 0).
    pub monthly_km: [f64; 12],
    /// The configured goal the progress figure is measured against.
    pub yearly_goal_km: f64,
    /// Goal progress, clamped to [0, 100].
    pub progress_percent: f64,
}

impl StatsSnapshot {
    /// Total distance formatted for display, e.g. `"9.30 km"`.
    pub fn total_display(&self) -> String {
        format!("{:.2} km", self.total_km)
    }

    /// Yearly progress formatted for display, e.g. `"8.30 / 500 km"`.
    pub fn yearly_display(&self) -> String {
        format!("{:.2} / {:.0} km", self.current_year_km, self.yearly_goal_km)
    }

    /// Goal progress rounded to a whole percentage.
    pub fn progress_rounded(&self) -> u32 {
        self.progress_percent.round() as u32
    }
}

/// Compute statistics for a complete registry against a yearly goal.
///
/// `now` decides which calendar year counts as "current"; tracks are
/// re-partitioned on every call, so a snapshot taken in January of a new year
/// starts the yearly figures over. The goal must be positive.
///
/// Fails with [`AtlasError::RegistryIncomplete`] while any expected track
/// load is still outstanding.
///
/// # Example
///
/// ```rust
/// use trail_atlas::{compute_stats, Track, TrackGeometry, TrackPoint, TrackRegistry};
/// use chrono::Utc;
///
/// let mut registry = TrackRegistry::new(1);
/// registry.register(Track::new(
///     "1",
///     "Dragon's Back",
///     Utc::now(),
///     TrackGeometry::Path(vec![
///         TrackPoint::new(22.2250, 114.2360),
///         TrackPoint::new(22.2400, 114.2500),
///     ]),
/// ));
///
/// let stats = compute_stats(&registry, 500.0, Utc::now()).unwrap();
/// assert_eq!(stats.total_km, stats.current_year_km);
/// ```
pub fn compute_stats(
    registry: &TrackRegistry,
    yearly_goal_km: f64,
    now: DateTime<Utc>,
) -> Result<StatsSnapshot, AtlasError> {
    if !registry.is_complete() {
        return Err(AtlasError::RegistryIncomplete {
            settled: registry.settled_count(),
            expected: registry.expected(),
        });
    }

    let current_year = now.year();

    // Sum in id order so the totals do not depend on load completion order
    let mut tracks: Vec<_> = registry.tracks().collect();
    tracks.sort_by(|a, b| a.id.cmp(&b.id));

    let mut total_km = 0.0;
    let mut current_year_km = 0.0;
    let mut monthly_km = [0.0f64; 12];

    for track in tracks {
        total_km += track.length_km;
        if track.recorded_at.year() == current_year {
            current_year_km += track.length_km;
            monthly_km[track.recorded_at.month0() as usize] += track.length_km;
        }
    }

    let progress_percent = (current_year_km / yearly_goal_km * 100.0).min(100.0).max(0.0);

    Ok(StatsSnapshot {
        total_km,
        current_year_km,
        monthly_km,
        yearly_goal_km,
        progress_percent,
    })
}

/// Compute statistics with the current wall-clock time as "now".
pub fn compute_stats_now(
    registry: &TrackRegistry,
    yearly_goal_km: f64,
) -> Result<StatsSnapshot, AtlasError> {
    compute_stats(registry, yearly_goal_km, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Track, TrackGeometry};
    use chrono::TimeZone;

    fn track_with_length(id: &str, length_km: f64, year: i32, month: u32) -> Track {
        Track {
            id: id.to_string(),
            name: format!("Track {id}"),
            recorded_at: Utc.with_ymd_and_hms(year, month, 10, 9, 0, 0).unwrap(),
            length_km,
            geometry: TrackGeometry::Path(vec![]),
        }
    }

    fn registry_of(tracks: Vec<Track>) -> TrackRegistry {
        let mut registry = TrackRegistry::new(tracks.len());
        for track in tracks {
            registry.register(track);
        }
        registry
    }

    fn mid_2024() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_goal_reached_and_halfway() {
        let registry = registry_of(vec![
            track_with_length("1", 3.0, 2024, 2),
            track_with_length("2", 4.5, 2024, 5),
            track_with_length("3", 2.5, 2024, 9),
        ]);

        let stats = compute_stats(&registry, 10.0, mid_2024()).unwrap();
        assert_eq!(stats.total_display(), "10.00 km");
        assert_eq!(stats.current_year_km, stats.total_km);
        assert_eq!(stats.progress_percent, 100.0);

        let stats = compute_stats(&registry, 20.0, mid_2024()).unwrap();
        assert_eq!(stats.progress_percent, 50.0);
    }

    #[test]
    fn test_prior_year_counts_toward_total_only() {
        let registry = registry_of(vec![
            track_with_length("1", 3.0, 2024, 2),
            track_with_length("2", 7.0, 2022, 11),
        ]);

        let stats = compute_stats(&registry, 10.0, mid_2024()).unwrap();
        assert_eq!(stats.total_km, 10.0);
        assert_eq!(stats.current_year_km, 3.0);
        assert_eq!(stats.monthly_km[1], 3.0);
        assert_eq!(stats.monthly_km[10], 0.0);
    }

    #[test]
    fn test_now_decides_the_current_year() {
        let registry = registry_of(vec![track_with_length("1", 3.0, 2024, 2)]);

        let in_2024 = compute_stats(&registry, 10.0, mid_2024()).unwrap();
        assert_eq!(in_2024.current_year_km, 3.0);

        // The same registry, asked a year later, re-partitions the tracks
        let later = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        let in_2025 = compute_stats(&registry, 10.0, later).unwrap();
        assert_eq!(in_2025.current_year_km, 0.0);
        assert_eq!(in_2025.total_km, 3.0);
    }

    #[test]
    fn test_incomplete_registry_is_refused() {
        let mut registry = TrackRegistry::new(2);
        registry.register(track_with_length("1", 3.0, 2024, 2));

        let result = compute_stats(&registry, 10.0, mid_2024());
        assert!(matches!(
            result,
            Err(AtlasError::RegistryIncomplete { settled: 1, expected: 2 })
        ));
    }

    #[test]
    fn test_idempotent_for_fixed_now() {
        let registry = registry_of(vec![
            track_with_length("1", 5.2, 2024, 1),
            track_with_length("2", 3.1, 2024, 6),
            track_with_length("3", 1.0, 2023, 12),
        ]);

        let first = compute_stats(&registry, 10.0, mid_2024()).unwrap();
        let second = compute_stats(&registry, 10.0, mid_2024()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_end_to_end_breakdown() {
        let registry = registry_of(vec![
            track_with_length("A", 5.2, 2024, 1),
            track_with_length("B", 3.1, 2024, 6),
            track_with_length("C", 1.0, 2023, 12),
        ]);

        let stats = compute_stats(&registry, 10.0, mid_2024()).unwrap();
        assert_eq!(stats.total_display(), "9.30 km");
        assert_eq!(stats.yearly_display(), "8.30 / 10 km");
        assert_eq!(stats.monthly_km[0], 5.2);
        assert_eq!(stats.monthly_km[5], 3.1);
        for month in [1, 2, 3, 4, 6, 7, 8, 9, 10, 11] {
            assert_eq!(stats.monthly_km[month], 0.0);
        }
        assert_eq!(stats.progress_rounded(), 83);
    }

    #[test]
    fn test_progress_is_clamped() {
        let registry = registry_of(vec![track_with_length("1", 42.0, 2024, 3)]);
        let stats = compute_stats(&registry, 10.0, mid_2024()).unwrap();
        assert_eq!(stats.progress_percent, 100.0);
    }
}
