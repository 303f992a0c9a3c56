//! # Wayline
//!
//! Route overlay engine for tiled web maps.
//!
//! The crate projects geographic coordinates into the map's tile
//! projection, caches the derived screen geometry per zoom level, and
//! composes the transform chain that keeps a route polyline and its
//! point-of-interest markers registered with a pannable, zoomable,
//! animating viewport. The viewport engine itself, the directions backend,
//! and the device location service are consumed through traits, never
//! reimplemented here.

pub mod core;
pub mod data;
pub mod layers;
pub mod prelude;
pub mod providers;
pub mod rendering;
pub mod scheduler;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    fit::RouteFitter,
    geo::{LatLng, LatLngBounds, Point},
    map::{PollOutcome, RouteMap},
    projection::Projection,
    viewport::{MapViewport, ScatterTransform, SimpleViewport, ViewportState},
};

pub use crate::layers::{
    compose::{TransformChain, TransformComposer, TransformOp},
    gps::{BlinkPhase, GpsIndicator},
    marker::{Candidate, CandidateSource, MarkerRecord, MarkerRegistry, StaticCandidates,
        ViewportMarkerManager},
    route::{RouteLayer, RouteStyle, StrokePass},
};

pub use crate::providers::{
    directions::{DecodedRoute, DirectionsProvider, DirectionsService, GoogleDirections, RoutePlan},
    location::{GpsNotice, LocationEvent, LocationProvider, LocationStatus, LocationTracker},
};

pub use crate::rendering::context::{Color, OverlayCanvas, RecordingCanvas};

pub use crate::scheduler::{Debouncer, RedrawScheduler};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Directions error: {0}")]
    Directions(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Error type alias for convenience
pub type Error = MapError;
