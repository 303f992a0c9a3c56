use crate::core::fit::RouteFitter;
use crate::core::viewport::MapViewport;
use crate::layers::gps::GpsIndicator;
use crate::layers::marker::{CandidateSource, MarkerRecord, MarkerRegistry, ViewportMarkerManager};
use crate::layers::route::RouteLayer;
use crate::providers::directions::DirectionsService;
use crate::providers::location::{GpsNotice, LocationProvider, LocationTracker};
use crate::rendering::context::OverlayCanvas;
use crate::Result;
use instant::Instant;

/// What one poll pass did, for the host to react to
#[derive(Debug, Default)]
pub struct PollOutcome {
    /// Markers placed by a field-of-view scan this pass
    pub new_markers: Vec<MarkerRecord>,
    /// User-facing notices from the location provider
    pub notices: Vec<GpsNotice>,
    /// Whether the route overlay was redrawn
    pub redrew: bool,
}

/// Wires the overlay pieces to one viewport and drives them from the host's
/// event loop. Every collaborator comes in through the constructor; nothing
/// is looked up through globals.
///
/// The host forwards view-change events to [`on_view_changed`] and calls
/// [`poll`] once per frame; everything else (debounce windows, cache
/// invalidation, route arrival, marker population) happens in here.
///
/// [`on_view_changed`]: Self::on_view_changed
/// [`poll`]: Self::poll
pub struct RouteMap<V: MapViewport> {
    viewport: V,
    route: RouteLayer,
    markers: ViewportMarkerManager,
    candidates: Box<dyn CandidateSource>,
    indicator: GpsIndicator,
    tracker: LocationTracker,
    location: Box<dyn LocationProvider>,
    directions: DirectionsService,
}

impl<V: MapViewport> RouteMap<V> {
    pub fn new(
        viewport: V,
        directions: DirectionsService,
        location: Box<dyn LocationProvider>,
        candidates: Box<dyn CandidateSource>,
        now: Instant,
    ) -> Self {
        Self {
            viewport,
            route: RouteLayer::new(),
            markers: ViewportMarkerManager::new(),
            candidates,
            indicator: GpsIndicator::new(now),
            tracker: LocationTracker::new(),
            location,
            directions,
        }
    }

    /// Starts fetching a route between two addresses or `lat,lng` pairs.
    /// The overlay updates when the decoded route arrives in a later poll.
    pub fn request_route(&mut self, origin: &str, destination: &str) {
        self.directions.request(origin, destination);
    }

    /// Host hook for any viewport change (pan, zoom, gesture settle):
    /// reschedules the debounced redraw and field-of-view scan.
    pub fn on_view_changed(&mut self, now: Instant) {
        self.route.on_viewport_changed(&self.viewport.state(), now);
        self.markers.schedule_fov_scan(now);
    }

    /// One frame of cooperative work: ingest a fetched route, drain
    /// location events, advance the blink cycle, and run whichever
    /// debounced jobs are due.
    pub fn poll(&mut self, now: Instant, canvas: &mut dyn OverlayCanvas) -> Result<PollOutcome> {
        let mut outcome = PollOutcome::default();

        if let Some(decoded) = self.directions.try_recv() {
            // Center before the first draw of the new line.
            let corners = [decoded.bounds.south_west, decoded.bounds.north_east];
            RouteFitter::fit_viewport(&mut self.viewport, &corners);
            self.route.set_coordinates(decoded.coordinates, now);
            self.markers.schedule_fov_scan(now);
        }

        while let Some(event) = self.location.poll() {
            if let Some(notice) =
                self.tracker
                    .handle_event(event, &mut self.viewport, &mut self.indicator)
            {
                outcome.notices.push(notice);
            }
        }

        self.indicator.tick(now);

        if self.route.poll_redraw(now) {
            self.route.draw(&self.viewport.state(), canvas)?;
            outcome.redrew = true;
        }

        outcome.new_markers = self.markers.poll(now, &self.viewport, &*self.candidates);

        Ok(outcome)
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn route(&self) -> &RouteLayer {
        &self.route
    }

    pub fn indicator(&self) -> &GpsIndicator {
        &self.indicator
    }

    pub fn registry(&self) -> &MarkerRegistry {
        self.markers.registry()
    }
}
