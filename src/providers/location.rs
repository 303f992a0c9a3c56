use crate::core::geo::LatLng;
use crate::core::viewport::MapViewport;
use crate::layers::gps::GpsIndicator;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};

/// Provider status as the platform reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationStatus {
    ProviderEnabled,
    /// Anything other than "provider-enabled": disabled, denied, restricted.
    ProviderDisabled(String),
}

/// One event from the device location service
#[derive(Debug, Clone, PartialEq)]
pub enum LocationEvent {
    Position(LatLng),
    Status(LocationStatus),
}

/// Capability seam for device location. Selected once at startup; no
/// platform conditionals appear past this trait.
pub trait LocationProvider {
    /// Next pending event, if any. Non-blocking.
    fn poll(&mut self) -> Option<LocationEvent>;
}

/// Provider for platforms without a location service: never emits anything.
#[derive(Debug, Default)]
pub struct NoOpProvider;

impl LocationProvider for NoOpProvider {
    fn poll(&mut self) -> Option<LocationEvent> {
        None
    }
}

/// Provider fed by a platform bridge. The OS callback (JNI on Android,
/// CoreLocation on iOS, a simulator in tests) pushes events into the
/// sender; the UI thread drains them here.
pub struct ChannelProvider {
    rx: Receiver<LocationEvent>,
}

impl ChannelProvider {
    pub fn new() -> (Self, Sender<LocationEvent>) {
        let (tx, rx) = unbounded();
        (Self { rx }, tx)
    }
}

impl LocationProvider for ChannelProvider {
    fn poll(&mut self) -> Option<LocationEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

/// Picks the location capability for this platform, once, at startup.
/// Returns the feed for the platform bridge to push into, or None when the
/// platform has no location service to bridge.
pub fn select_provider() -> (Box<dyn LocationProvider>, Option<Sender<LocationEvent>>) {
    if cfg!(any(target_os = "android", target_os = "ios")) {
        let (provider, feed) = ChannelProvider::new();
        (Box::new(provider), Some(feed))
    } else {
        (Box::new(NoOpProvider), None)
    }
}

/// User-facing notice for the host UI to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpsNotice {
    pub title: String,
    pub body: String,
}

/// Applies location events to the view: repositions the indicator on every
/// fix and centers the viewport exactly once per session, on the first fix.
/// Later fixes move only the indicator.
pub struct LocationTracker {
    has_centered: bool,
}

impl LocationTracker {
    pub fn new() -> Self {
        Self {
            has_centered: false,
        }
    }

    pub fn has_centered(&self) -> bool {
        self.has_centered
    }

    /// Handles one event. A disabled status comes back as a notice for the
    /// host UI; it never halts rendering.
    pub fn handle_event(
        &mut self,
        event: LocationEvent,
        viewport: &mut dyn MapViewport,
        indicator: &mut GpsIndicator,
    ) -> Option<GpsNotice> {
        match event {
            LocationEvent::Position(position) => {
                indicator.set_position(position);
                if !self.has_centered {
                    viewport.center_on(position);
                    self.has_centered = true;
                    log::debug!(
                        "centered viewport on first fix {}, {}",
                        position.lat,
                        position.lng
                    );
                }
                None
            }
            LocationEvent::Status(LocationStatus::ProviderEnabled) => None,
            LocationEvent::Status(LocationStatus::ProviderDisabled(status)) => {
                log::warn!("location provider unavailable: {status}");
                Some(GpsNotice {
                    title: "GPS Error".to_string(),
                    body: "You need to turn on location services for your device".to_string(),
                })
            }
        }
    }
}

impl Default for LocationTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;
    use crate::core::viewport::SimpleViewport;
    use instant::Instant;

    fn fixtures() -> (SimpleViewport, GpsIndicator, LocationTracker) {
        (
            SimpleViewport::new(13.0, Point::new(365.0, 600.0)),
            GpsIndicator::new(Instant::now()),
            LocationTracker::new(),
        )
    }

    #[test]
    fn test_first_fix_centers_once() {
        let (mut viewport, mut indicator, mut tracker) = fixtures();
        let first = LatLng::new(4.1587278341067755, 9.28267375685355);
        let second = LatLng::new(4.20, 9.40);

        tracker.handle_event(LocationEvent::Position(first), &mut viewport, &mut indicator);
        assert!(tracker.has_centered());
        assert!(viewport.bounds().contains(&first));

        // The second fix moves the indicator but not the view.
        let bounds_before = viewport.bounds();
        tracker.handle_event(LocationEvent::Position(second), &mut viewport, &mut indicator);
        assert_eq!(viewport.bounds(), bounds_before);
        assert_eq!(indicator.position(), second);
    }

    #[test]
    fn test_disabled_status_surfaces_notice() {
        let (mut viewport, mut indicator, mut tracker) = fixtures();

        let enabled = tracker.handle_event(
            LocationEvent::Status(LocationStatus::ProviderEnabled),
            &mut viewport,
            &mut indicator,
        );
        assert!(enabled.is_none());

        let notice = tracker.handle_event(
            LocationEvent::Status(LocationStatus::ProviderDisabled("denied".to_string())),
            &mut viewport,
            &mut indicator,
        );
        assert!(notice.is_some());
        assert_eq!(notice.unwrap().title, "GPS Error");
        // Still not centered: a notice is not a fix.
        assert!(!tracker.has_centered());
    }

    #[test]
    fn test_channel_provider_drains_in_order() {
        let (mut provider, feed) = ChannelProvider::new();
        feed.send(LocationEvent::Status(LocationStatus::ProviderEnabled))
            .unwrap();
        feed.send(LocationEvent::Position(LatLng::new(4.15, 9.3)))
            .unwrap();

        assert_eq!(
            provider.poll(),
            Some(LocationEvent::Status(LocationStatus::ProviderEnabled))
        );
        assert_eq!(
            provider.poll(),
            Some(LocationEvent::Position(LatLng::new(4.15, 9.3)))
        );
        assert_eq!(provider.poll(), None);
    }

    #[test]
    fn test_noop_provider_is_silent() {
        assert!(NoOpProvider.poll().is_none());
    }
}
