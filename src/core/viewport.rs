use crate::core::constants::TILE_SIZE;
use crate::core::geo::{LatLng, LatLngBounds, Point};
use crate::core::projection::Projection;
use serde::{Deserialize, Serialize};

/// The tile engine's live pan-zoom transform, applied to tiles and overlays
/// alike while a zoom gesture or animation is in flight. Identity when the
/// view is settled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterTransform {
    /// Translation in window pixels
    pub pos: Point,
    /// Scale factor (1.0 = no scaling)
    pub scale: f64,
}

impl Default for ScatterTransform {
    fn default() -> Self {
        Self {
            pos: Point::new(0.0, 0.0),
            scale: 1.0,
        }
    }
}

impl ScatterTransform {
    pub fn new(pos: Point, scale: f64) -> Self {
        Self { pos, scale }
    }

    /// Identity transform (no in-flight animation)
    pub fn identity() -> Self {
        Self::default()
    }

    /// Check if this is effectively an identity transform
    pub fn is_identity(&self) -> bool {
        (self.scale - 1.0).abs() < 0.001 && self.pos.x.abs() < 0.1 && self.pos.y.abs() < 0.1
    }
}

/// One frame's view of the external tile engine, read-only from the
/// overlay's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Current zoom level (a discrete change here invalidates cached
    /// overlay geometry)
    pub zoom: f64,
    /// Settled scale factor of the view
    pub scale: f64,
    /// Pan position in projection pixel space
    pub pos: Point,
    /// In-flight pan-zoom animation transform
    pub scatter: ScatterTransform,
    /// Overlay anchor: the view's position in the window
    pub origin: Point,
    /// Viewport size in window pixels
    pub size: Point,
    /// Square tile edge in pixels
    pub tile_size: u32,
}

impl ViewportState {
    pub fn new(zoom: f64, size: Point) -> Self {
        Self {
            zoom,
            scale: 1.0,
            pos: Point::new(0.0, 0.0),
            scatter: ScatterTransform::identity(),
            origin: Point::new(0.0, 0.0),
            size,
            tile_size: TILE_SIZE,
        }
    }

    /// Projection for this frame's zoom level.
    pub fn projection(&self) -> Projection {
        Projection::new(self.zoom, self.tile_size)
    }

    /// Total map edge length in pixels at the current zoom.
    pub fn map_size(&self) -> f64 {
        self.projection().map_size()
    }
}

/// Seam to the external viewport/tile engine. The overlay core only ever
/// reads a state snapshot, asks for the visible geographic box, or requests
/// a re-center; everything else about the engine stays on the other side.
pub trait MapViewport {
    /// Snapshot of the engine's current view parameters
    fn state(&self) -> ViewportState;

    /// Geographic bounding box of the visible area
    fn bounds(&self) -> LatLngBounds;

    /// Centers the view on a coordinate
    fn center_on(&mut self, target: LatLng);
}

/// Self-contained [`MapViewport`] for headless embedding and tests: it keeps
/// the same state a real tile engine would expose and derives the visible
/// bounds from its own projection.
#[derive(Debug, Clone)]
pub struct SimpleViewport {
    state: ViewportState,
}

impl SimpleViewport {
    pub fn new(zoom: f64, size: Point) -> Self {
        Self {
            state: ViewportState::new(zoom, size),
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.state.zoom = zoom;
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.state.scale = scale;
    }

    pub fn set_scatter(&mut self, scatter: ScatterTransform) {
        self.state.scatter = scatter;
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.state.origin = origin;
    }

    /// Pans by a pixel delta in projection space.
    pub fn pan(&mut self, delta: Point) {
        self.state.pos = self.state.pos.add(&delta);
    }

    /// World-pixel position of a coordinate, with the half-map shift that
    /// moves projected x out of its signed range.
    fn world_pixel(&self, coord: &LatLng) -> Point {
        let projection = self.state.projection();
        let projected = projection.project(coord);
        Point::new(projected.x + projection.map_size() / 2.0, projected.y)
    }
}

impl MapViewport for SimpleViewport {
    fn state(&self) -> ViewportState {
        self.state
    }

    fn bounds(&self) -> LatLngBounds {
        let projection = self.state.projection();
        let half_map = projection.map_size() / 2.0;
        let span = self.state.size.multiply(1.0 / self.state.scale);

        let a = projection.unproject(&Point::new(
            self.state.pos.x - half_map,
            self.state.pos.y,
        ));
        let b = projection.unproject(&Point::new(
            self.state.pos.x + span.x - half_map,
            self.state.pos.y + span.y,
        ));

        // Corner order depends on the y axis direction; from_points sorts it.
        LatLngBounds::from_points(&[a, b])
            .unwrap_or_else(|| LatLngBounds::new(a, b))
    }

    fn center_on(&mut self, target: LatLng) {
        let center = self.world_pixel(&target);
        let span = self.state.size.multiply(1.0 / self.state.scale);
        self.state.pos = center.subtract(&span.multiply(0.5));
    }
}
