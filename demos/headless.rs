//! Headless driver: fetches no network, feeds a canned route and scripted
//! GPS fixes through a full `RouteMap`, and prints what the overlay would
//! draw. Run with `cargo run --example headless`.

use std::sync::Arc;

use anyhow::Context;
use wayline::prelude::*;

struct CannedProvider;

impl DirectionsProvider for CannedProvider {
    fn route(&self, _origin: &str, _destination: &str) -> Result<RoutePlan> {
        Ok(RoutePlan {
            polyline: "stiXmoww@xAvZzDjr@".to_string(),
            bounds: LatLngBounds::from_coords(
                4.149268458906271,
                9.287887970242025,
                4.1506595505986645,
                9.30054799695078,
            ),
        })
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let (location, location_feed) = ChannelProvider::new();
    let mut map = RouteMap::new(
        SimpleViewport::new(14.0, Point::new(365.0, 600.0)),
        DirectionsService::new(Arc::new(CannedProvider)),
        Box::new(location),
        Box::new(StaticCandidates::demo()),
        Instant::now(),
    );
    let mut canvas = RecordingCanvas::new();

    location_feed
        .send(LocationEvent::Position(LatLng::new(
            4.1587278341067755,
            9.28267375685355,
        )))
        .context("location feed closed")?;

    map.request_route(
        "4.1506595505986645,9.30054799695078",
        "4.149268458906271,9.287887970242025",
    );

    // Simulate the host event loop at ~60 fps for two seconds.
    for frame in 0..120 {
        let now = Instant::now();
        if frame == 30 {
            map.on_view_changed(now);
        }
        canvas.clear();
        let outcome = map
            .poll(now, &mut canvas)
            .map_err(|err| anyhow::anyhow!("poll failed: {err}"))?;

        for marker in &outcome.new_markers {
            println!("placed marker {:?} at {:?}", marker.name, marker.position);
        }
        for notice in &outcome.notices {
            println!("notice: {} - {}", notice.title, notice.body);
        }
        if outcome.redrew {
            println!("redrew route: {} stroke passes", canvas.calls.len());
        }
        std::thread::sleep(Duration::from_millis(16));
    }

    println!(
        "session done: {} markers, {} route points, indicator at {:?}",
        map.registry().len(),
        map.route().coordinates().len(),
        map.indicator().position()
    );
    Ok(())
}
