//! Engine-wide constants shared by the projection, scheduling, and overlay
//! code. Keeping them in a single place makes it easier to tweak the
//! engine-wide magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Latitude limits of the tile projection. Values beyond these are clamped
/// before any trigonometry runs, so the poles never reach tan/sec.
pub const MIN_LATITUDE: f64 = -85.0511287798;
pub const MAX_LATITUDE: f64 = 85.0511287798;

/// Longitude limits of the tile projection.
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;

/// Default delay before a requested redraw executes. The viewport engine
/// updates its own transform on the same event; redrawing in the same tick
/// produces a frame with stale transforms, so the delay must stay positive.
pub const DEFAULT_REDRAW_DELAY_MS: u64 = 50;

/// Default delay before a field-of-view marker scan executes.
pub const DEFAULT_FOV_SCAN_DELAY_MS: u64 = 1000;

/// One full expand-and-reset cycle of the device-position ring.
pub const BLINK_PERIOD_MS: u64 = 1000;

/// Resting diameter of the device-position ring, in pixels.
pub const BLINK_BASE_SIZE: f64 = 25.0;

/// Diameter the ring expands to before resetting, in pixels.
pub const BLINK_MAX_SIZE: f64 = 50.0;
