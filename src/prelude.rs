//! Prelude module for common wayline types and traits
//!
//! Re-exports the most commonly used types, traits, and functions for easy
//! importing with `use wayline::prelude::*;`

pub use crate::core::{
    constants,
    fit::RouteFitter,
    geo::{LatLng, LatLngBounds, Point},
    map::{PollOutcome, RouteMap},
    projection::Projection,
    viewport::{MapViewport, ScatterTransform, SimpleViewport, ViewportState},
};

pub use crate::layers::{
    animation::{lerp, EasingType},
    compose::{TransformChain, TransformComposer, TransformOp},
    gps::{BlinkPhase, GpsIndicator},
    marker::{
        Candidate, CandidateSource, MarkerRecord, MarkerRegistry, StaticCandidates,
        ViewportMarkerManager,
    },
    route::{RouteLayer, RouteStyle, StrokePass},
};

pub use crate::data::polyline;

pub use crate::providers::{
    directions::{
        DecodedRoute, DirectionsProvider, DirectionsService, GoogleDirections, RoutePlan,
    },
    location::{
        select_provider, ChannelProvider, GpsNotice, LocationEvent, LocationProvider,
        LocationStatus, LocationTracker, NoOpProvider,
    },
};

pub use crate::rendering::context::{Color, DrawCall, OverlayCanvas, RecordingCanvas};

pub use crate::scheduler::{Debouncer, RedrawScheduler};

pub use crate::{Error as MapError, Result};

pub use instant::{Duration, Instant};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
