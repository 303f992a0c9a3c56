use crate::core::constants::DEFAULT_FOV_SCAN_DELAY_MS;
use crate::core::geo::{LatLng, LatLngBounds};
use crate::core::viewport::MapViewport;
use crate::prelude::HashMap;
use crate::scheduler::Debouncer;
use instant::{Duration, Instant};
use rstar::{RTree, RTreeObject, AABB};
use serde::{Deserialize, Serialize};

/// A marker that has been placed on the map. Identity is the location name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRecord {
    pub name: String,
    pub position: LatLng,
    pub blurb: String,
    pub icon: String,
}

/// Session-lifetime set of placed markers, keyed by name. Registration is
/// permanent: an entry is never removed or replaced, so repeated scans over
/// the same candidates are no-ops.
#[derive(Debug, Default)]
pub struct MarkerRegistry {
    records: HashMap<String, MarkerRecord>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self {
            records: HashMap::default(),
        }
    }

    /// Registers a marker unless its name is already present. Returns
    /// whether the record was inserted.
    pub fn register(&mut self, record: MarkerRecord) -> bool {
        if self.records.contains_key(&record.name) {
            return false;
        }
        self.records.insert(record.name.clone(), record);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&MarkerRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarkerRecord> {
        self.records.values()
    }
}

/// A known location that may become a marker once it enters the view
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub position: LatLng,
}

impl Candidate {
    pub fn new(name: impl Into<String>, position: LatLng) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

impl RTreeObject for Candidate {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.position.lng, self.position.lat])
    }
}

/// Source of marker candidates, queryable by geographic box
pub trait CandidateSource {
    fn in_bounds(&self, bounds: &LatLngBounds) -> Vec<Candidate>;
}

/// Fixed candidate set indexed in an R-tree
pub struct StaticCandidates {
    tree: RTree<Candidate>,
}

impl StaticCandidates {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self {
            tree: RTree::bulk_load(candidates),
        }
    }

    /// The built-in demo set around Buea.
    pub fn demo() -> Self {
        Self::new(vec![
            Candidate::new("Mile 17", LatLng::new(4.1506595505986645, 9.30054799695078)),
            Candidate::new("GCE Board", LatLng::new(4.161167564109226, 9.27561418277514)),
            Candidate::new(
                "Central Admin UB",
                LatLng::new(4.149268458906271, 9.287887970242025),
            ),
            Candidate::new(
                "Mountain Ice Cream",
                LatLng::new(4.149289860272598, 9.261988560666916),
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl CandidateSource for StaticCandidates {
    fn in_bounds(&self, bounds: &LatLngBounds) -> Vec<Candidate> {
        let envelope = AABB::from_corners(
            [bounds.south_west.lng, bounds.south_west.lat],
            [bounds.north_east.lng, bounds.north_east.lat],
        );
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .cloned()
            .collect()
    }
}

/// Populates markers for candidates inside the visible area.
///
/// Scans are debounced with cancel-then-reschedule semantics so a burst of
/// view changes costs one scan, and the registry makes population
/// idempotent: a candidate scrolling out and back in is never added twice.
pub struct ViewportMarkerManager {
    registry: MarkerRegistry,
    timer: Debouncer,
}

impl ViewportMarkerManager {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(DEFAULT_FOV_SCAN_DELAY_MS))
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            registry: MarkerRegistry::new(),
            timer: Debouncer::new(delay),
        }
    }

    /// Cancels any pending scan and schedules a fresh one.
    pub fn schedule_fov_scan(&mut self, now: Instant) {
        self.timer.schedule(now);
    }

    pub fn scan_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Runs the debounced scan if it is due; returns the markers that are
    /// new this scan.
    pub fn poll(
        &mut self,
        now: Instant,
        viewport: &dyn MapViewport,
        source: &dyn CandidateSource,
    ) -> Vec<MarkerRecord> {
        if !self.timer.fire_if_due(now) {
            return Vec::new();
        }
        self.scan(viewport, source)
    }

    /// Immediate scan: every candidate inside the current view that has not
    /// been registered before becomes a marker now.
    pub fn scan(
        &mut self,
        viewport: &dyn MapViewport,
        source: &dyn CandidateSource,
    ) -> Vec<MarkerRecord> {
        let bounds = viewport.bounds();
        let mut added = Vec::new();

        for candidate in source.in_bounds(&bounds) {
            if self.registry.contains(&candidate.name) {
                continue;
            }
            let record = MarkerRecord {
                name: candidate.name,
                position: candidate.position,
                blurb: "Here will be some data about this location".to_string(),
                icon: "marker.png".to_string(),
            };
            self.registry.register(record.clone());
            added.push(record);
        }

        if !added.is_empty() {
            log::debug!("placed {} new markers in view", added.len());
        }
        added
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }
}

impl Default for ViewportMarkerManager {
    fn default() -> Self {
        Self::new()
    }
}
