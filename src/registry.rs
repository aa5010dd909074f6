//! The track registry and its load-completeness state machine.
//!
//! The registry is the single owner of the loaded track collection. Load
//! operations complete independently and in any order; each one settles its
//! slot exactly once, whether it succeeded or definitively failed, and the
//! registry reports completeness when the settled count reaches the expected
//! total. Consumers (statistics, completion-dependent layers) are read-only.
//!
//! A load that never reports leaves the registry in `Loading` forever; the
//! accepted degraded mode is that completion-dependent features stay
//! inactive rather than showing partial figures.

use crate::Track;
use log::{debug, info};
use std::collections::{HashMap, HashSet};

/// Observable load state of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No load has settled yet.
    Empty,
    /// Some, but not all, expected loads have settled.
    Loading { settled: usize },
    /// Every expected load has settled.
    Complete,
}

/// Event returned by each registration or failure record.
///
/// [`RegistryEvent::Complete`] is emitted exactly once, on the settling that
/// takes the registry to its expected total; callers can trigger
/// completion-dependent work (statistics, density layers) on it without
/// polling or risk of running twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryEvent {
    Progress { settled: usize, expected: usize },
    Complete,
}

/// In-memory collection of all loaded tracks.
///
/// Owned by the application context and passed by reference to consumers.
/// Entries are never removed; re-registering an id replaces its entry in one
/// map insert and does not count toward completeness a second time.
#[derive(Debug)]
pub struct TrackRegistry {
    expected: usize,
    tracks: HashMap<String, Track>,
    settled: HashSet<String>,
    completed: bool,
}

impl TrackRegistry {
    /// Create a registry expecting the given number of track loads.
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            tracks: HashMap::new(),
            settled: HashSet::new(),
            // Nothing to wait for when nothing is expected
            completed: expected == 0,
        }
    }

    /// Register a loaded track, replacing any previous entry with the same id.
    pub fn register(&mut self, track: Track) -> RegistryEvent {
        debug!("registered track {} ({:.2} km)", track.id, track.length_km);
        let id = track.id.clone();
        self.tracks.insert(id.clone(), track);
        self.settle(id)
    }

    /// Record that a track's load failed definitively.
    ///
    /// The slot still settles (exactly once), so one unreadable file cannot
    /// block the completeness transition forever. The track itself is absent
    /// from statistics and layers.
    pub fn record_failed(&mut self, id: &str) -> RegistryEvent {
        debug!("track {} settled as failed", id);
        self.settle(id.to_string())
    }

    fn settle(&mut self, id: String) -> RegistryEvent {
        self.settled.insert(id);

        if !self.completed && self.settled.len() >= self.expected {
            self.completed = true;
            info!(
                "registry complete: {} of {} tracks loaded",
                self.tracks.len(),
                self.expected
            );
            return RegistryEvent::Complete;
        }

        RegistryEvent::Progress {
            settled: self.settled.len(),
            expected: self.expected,
        }
    }

    /// Current load state.
    pub fn state(&self) -> LoadState {
        if self.completed {
            LoadState::Complete
        } else if self.settled.is_empty() {
            LoadState::Empty
        } else {
            LoadState::Loading { settled: self.settled.len() }
        }
    }

    /// True once every expected load has settled.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Number of loads (successful or failed) that have settled.
    pub fn settled_count(&self) -> usize {
        self.settled.len()
    }

    /// Number of track loads the registry is waiting for in total.
    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Number of successfully registered tracks.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// True when no track has been registered.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Look up a track by id.
    pub fn get(&self, id: &str) -> Option<&Track> {
        self.tracks.get(id)
    }

    /// Iterate over all registered tracks, in no particular order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }
}
