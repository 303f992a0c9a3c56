pub mod directions;
pub mod location;

pub use directions::{DecodedRoute, DirectionsProvider, DirectionsService, GoogleDirections, RoutePlan};
pub use location::{
    select_provider, ChannelProvider, GpsNotice, LocationEvent, LocationProvider, LocationStatus,
    LocationTracker, NoOpProvider,
};
