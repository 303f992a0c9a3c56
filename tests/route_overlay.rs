//! End-to-end scenarios: a decoded route flowing through projection, the
//! zoom-keyed cache, the transform chain, and the draw pass, plus the
//! debounce and marker population behavior a host would observe.

use std::sync::Arc;

use wayline::prelude::*;

const ORIGIN: (f64, f64) = (4.1506595505986645, 9.30054799695078);
const DESTINATION: (f64, f64) = (4.149268458906271, 9.287887970242025);

/// Encoded driving route between the origin and destination, three points.
const ROUTE_POLYLINE: &str = "stiXmoww@xAvZzDjr@";

struct CannedProvider;

impl DirectionsProvider for CannedProvider {
    fn route(&self, _origin: &str, _destination: &str) -> Result<RoutePlan> {
        Ok(RoutePlan {
            polyline: ROUTE_POLYLINE.to_string(),
            bounds: LatLngBounds::from_coords(
                DESTINATION.0,
                DESTINATION.1,
                ORIGIN.0,
                ORIGIN.1,
            ),
        })
    }
}

#[test]
fn decoded_route_round_trips_through_cache_and_projection() {
    let decoded = polyline::decode(ROUTE_POLYLINE).unwrap();
    assert!(decoded.len() >= 2);
    assert!((decoded[0].lat - ORIGIN.0).abs() < 1e-5);
    assert!((decoded[0].lng - ORIGIN.1).abs() < 1e-5);
    assert!((decoded[decoded.len() - 1].lat - DESTINATION.0).abs() < 1e-5);

    let mut viewport = SimpleViewport::new(15.0, Point::new(365.0, 600.0));
    viewport.center_on(LatLng::new(
        (ORIGIN.0 + DESTINATION.0) / 2.0,
        (ORIGIN.1 + DESTINATION.1) / 2.0,
    ));
    let state = viewport.state();

    let mut route = RouteLayer::new();
    route.set_coordinates(decoded.clone(), Instant::now());
    let (points, offset) = route.screen_points(&state).unwrap();

    // Cached points are relative to the first coordinate's projection;
    // adding the offset back and unprojecting recovers every decoded
    // coordinate.
    let projection = state.projection();
    for (cached, original) in points.iter().zip(decoded.iter()) {
        let absolute = cached.add(&offset);
        let restored = projection.unproject(&absolute);
        assert!((restored.lat - original.lat).abs() < 1e-9);
        assert!((restored.lng - original.lng).abs() < 1e-9);
    }
}

#[test]
fn cache_recomputes_once_per_zoom_and_results_differ() {
    let decoded = polyline::decode(ROUTE_POLYLINE).unwrap();
    let mut route = RouteLayer::new();
    route.set_coordinates(decoded, Instant::now());

    let z1 = ViewportState::new(14.0, Point::new(365.0, 600.0));
    let z2 = ViewportState::new(15.0, Point::new(365.0, 600.0));

    let at_z1: Vec<Point> = route.screen_points(&z1).unwrap().0.to_vec();
    route.screen_points(&z1);
    assert_eq!(route.recompute_count(), 1);

    let at_z2: Vec<Point> = route.screen_points(&z2).unwrap().0.to_vec();
    assert_eq!(route.recompute_count(), 2);
    assert_ne!(at_z1, at_z2);

    // Both computations share the same relative origin.
    assert_eq!(at_z1[0], Point::new(0.0, 0.0));
    assert_eq!(at_z2[0], Point::new(0.0, 0.0));
}

#[test]
fn full_map_session_draws_route_and_places_markers() {
    let (location, location_feed) = ChannelProvider::new();
    let mut map = RouteMap::new(
        SimpleViewport::new(14.0, Point::new(365.0, 600.0)),
        DirectionsService::new(Arc::new(CannedProvider)),
        Box::new(location),
        Box::new(StaticCandidates::demo()),
        Instant::now(),
    );
    let mut canvas = RecordingCanvas::new();

    // A GPS fix arrives before the route; the view centers on it once.
    location_feed
        .send(LocationEvent::Position(LatLng::new(
            4.1587278341067755,
            9.28267375685355,
        )))
        .unwrap();
    map.poll(Instant::now(), &mut canvas).unwrap();
    assert_eq!(
        map.indicator().position(),
        LatLng::new(4.1587278341067755, 9.28267375685355)
    );

    map.request_route(
        "4.1506595505986645,9.30054799695078",
        "4.149268458906271,9.287887970242025",
    );

    // Pump until the background fetch lands, then let the debounce windows
    // elapse.
    let mut now = Instant::now();
    for _ in 0..200 {
        map.poll(now, &mut canvas).unwrap();
        if !map.route().coordinates().is_empty() {
            break;
        }
        std::thread::sleep(Duration::from_millis(5));
        now = Instant::now();
    }
    assert_eq!(map.route().coordinates().len(), 3);

    let settled = Instant::now() + Duration::from_millis(1200);
    let outcome = map.poll(settled, &mut canvas).unwrap();
    assert!(outcome.redrew);
    assert_eq!(canvas.calls.len(), 3);

    // The route fit centered the view between the endpoints, so the scan
    // found at least the endpoints' markers; scanning again adds nothing.
    assert!(!outcome.new_markers.is_empty());
    let placed = map.registry().len();
    map.on_view_changed(settled);
    let again = map.poll(settled + Duration::from_millis(1200), &mut canvas).unwrap();
    assert!(again.new_markers.is_empty());
    assert_eq!(map.registry().len(), placed);
}

#[test]
fn redraw_requests_within_window_collapse_to_one() {
    let mut scheduler = RedrawScheduler::with_delay(Duration::from_millis(50));
    let t0 = Instant::now();

    for i in 0..25 {
        scheduler.request_redraw(t0 + Duration::from_millis(i));
    }
    let mut fired = 0;
    for i in 0..200 {
        if scheduler.poll(t0 + Duration::from_millis(i)) {
            fired += 1;
        }
    }
    assert_eq!(fired, 1);
    assert_eq!(scheduler.executed(), 1);
}
