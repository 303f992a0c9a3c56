use crate::core::geo::{LatLng, LatLngBounds};
use crate::data::polyline;
use crate::{MapError, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::thread;

/// Shared blocking HTTP client with a custom User-Agent. Building the client
/// once avoids the cost of TLS and connection pool setup for every request.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("wayline/0.1 (+https://github.com/example/wayline)")
        .build()
        .expect("failed to build reqwest blocking client")
});

/// A route as the backend describes it: still encoded, plus the bounding
/// box the backend computed for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePlan {
    pub polyline: String,
    pub bounds: LatLngBounds,
}

/// Trait representing anything that can answer a directions query.
pub trait DirectionsProvider: Send + Sync {
    fn route(&self, origin: &str, destination: &str) -> Result<RoutePlan>;
}

// Wire shape of the directions payload; only the fields the overlay reads.
#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    overview_polyline: OverviewPolyline,
    bounds: BoundsEntry,
}

#[derive(Debug, Deserialize)]
struct OverviewPolyline {
    points: String,
}

#[derive(Debug, Deserialize)]
struct BoundsEntry {
    southwest: CoordEntry,
    northeast: CoordEntry,
}

#[derive(Debug, Deserialize)]
struct CoordEntry {
    lat: f64,
    lng: f64,
}

/// Directions provider backed by the Google Directions web service.
pub struct GoogleDirections {
    api_key: String,
    endpoint: String,
}

impl GoogleDirections {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: "https://maps.googleapis.com/maps/api/directions/json".to_string(),
        }
    }

    /// Points the provider at a different host (stub servers in tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl DirectionsProvider for GoogleDirections {
    fn route(&self, origin: &str, destination: &str) -> Result<RoutePlan> {
        let response = HTTP_CLIENT
            .get(&self.endpoint)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", "driving"),
                ("key", self.api_key.as_str()),
            ])
            .send()?;
        if !response.status().is_success() {
            return Err(MapError::Directions(format!("HTTP {}", response.status())).into());
        }

        let payload: DirectionsResponse = response.json()?;
        let route = payload
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| MapError::Directions("no routes in response".to_string()))?;

        Ok(RoutePlan {
            polyline: route.overview_polyline.points,
            bounds: LatLngBounds::new(
                LatLng::new(route.bounds.southwest.lat, route.bounds.southwest.lng),
                LatLng::new(route.bounds.northeast.lat, route.bounds.northeast.lng),
            ),
        })
    }
}

/// A fetched route, decoded and ready for the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRoute {
    pub coordinates: Vec<LatLng>,
    pub bounds: LatLngBounds,
}

/// Runs directions queries on detached threads and hands decoded results
/// back to the UI thread over a channel.
///
/// A failed request is logged and swallowed: no retry, nothing is sent, and
/// whatever route is currently displayed stays as it is.
pub struct DirectionsService {
    provider: Arc<dyn DirectionsProvider>,
    tx: Sender<DecodedRoute>,
    rx: Receiver<DecodedRoute>,
}

impl DirectionsService {
    pub fn new(provider: Arc<dyn DirectionsProvider>) -> Self {
        let (tx, rx) = unbounded();
        Self { provider, tx, rx }
    }

    /// Starts fetching a route. Returns immediately; the decoded result
    /// arrives through [`try_recv`](Self::try_recv).
    pub fn request(&self, origin: &str, destination: &str) {
        log::info!("getting directions from {origin:?} to {destination:?}");

        let provider = self.provider.clone();
        let tx = self.tx.clone();
        let origin = origin.to_string();
        let destination = destination.to_string();

        thread::spawn(move || {
            let result = provider.route(&origin, &destination).and_then(|plan| {
                let coordinates = polyline::decode(&plan.polyline)?;
                Ok(DecodedRoute {
                    coordinates,
                    bounds: plan.bounds,
                })
            });
            match result {
                Ok(route) => {
                    log::info!("decoded route with {} points", route.coordinates.len());
                    let _ = tx.send(route);
                }
                Err(err) => log::warn!("directions request failed: {err}"),
            }
        });
    }

    /// Next decoded route, if one has arrived.
    pub fn try_recv(&self) -> Option<DecodedRoute> {
        self.rx.try_recv().ok()
    }
}
