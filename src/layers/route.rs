use crate::core::geo::{LatLng, Point};
use crate::core::projection::Projection;
use crate::core::viewport::ViewportState;
use crate::layers::compose::TransformComposer;
use crate::rendering::context::{Color, OverlayCanvas};
use crate::scheduler::RedrawScheduler;
use crate::Result;
use instant::Instant;
use serde::{Deserialize, Serialize};

/// One stroke of the route halo
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePass {
    pub color: Color,
    pub width: f32,
}

/// Fixed three-pass halo style: wide translucent underlay, opaque body,
/// bright narrow core. A layer property, not a per-draw argument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteStyle {
    pub passes: [StrokePass; 3],
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            passes: [
                StrokePass {
                    color: Color::new(41, 162, 251, 64),
                    width: 3.25,
                },
                StrokePass {
                    color: Color::rgb(41, 162, 251),
                    width: 3.0,
                },
                StrokePass {
                    color: Color::rgb(0, 178, 255),
                    width: 2.0,
                },
            ],
        }
    }
}

/// Screen geometry derived from the route at one zoom level.
///
/// Points are stored relative to the first coordinate's projection (the
/// `offset`); keeping the magnitudes near zero avoids float precision loss
/// far from the projection origin, and the offset goes back in as a single
/// translation in the draw transform.
#[derive(Debug, Clone)]
struct LineCache {
    points: Vec<Point>,
    offset: Point,
    zoom: f64,
}

/// Route polyline overlay: owns the geographic coordinates and their cached
/// screen-space projection.
///
/// The cache is valid only while the viewport stays at the zoom it was
/// computed for. Pans and the continuous scale of an in-flight zoom
/// animation never invalidate it (the draw transform absorbs those); a
/// discrete zoom-level change always does.
pub struct RouteLayer {
    coordinates: Vec<LatLng>,
    cache: Option<LineCache>,
    style: RouteStyle,
    scheduler: RedrawScheduler,
    recomputes: u64,
}

impl RouteLayer {
    pub fn new() -> Self {
        Self::with_style(RouteStyle::default())
    }

    pub fn with_style(style: RouteStyle) -> Self {
        Self {
            coordinates: Vec::new(),
            cache: None,
            style,
            scheduler: RedrawScheduler::new(),
            recomputes: 0,
        }
    }

    pub fn coordinates(&self) -> &[LatLng] {
        &self.coordinates
    }

    pub fn style(&self) -> &RouteStyle {
        &self.style
    }

    /// Replaces the route wholesale, drops the cached geometry, and requests
    /// a redraw. There are no partial updates; the next route replaces this
    /// one the same way.
    pub fn set_coordinates(&mut self, coordinates: Vec<LatLng>, now: Instant) {
        self.coordinates = coordinates;
        self.invalidate();
        self.scheduler.request_redraw(now);
    }

    /// Reacts to a viewport change: only a zoom-level change drops the
    /// cache, but any change re-requests the debounced redraw.
    pub fn on_viewport_changed(&mut self, state: &ViewportState, now: Instant) {
        if self
            .cache
            .as_ref()
            .map(|cache| cache.zoom != state.zoom)
            .unwrap_or(false)
        {
            self.invalidate();
        }
        self.scheduler.request_redraw(now);
    }

    /// True when the debounced redraw should run now.
    pub fn poll_redraw(&mut self, now: Instant) -> bool {
        self.scheduler.poll(now)
    }

    pub fn redraw_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Cached screen points and their shared offset for the current zoom,
    /// recomputing only if the cache is missing or was computed at another
    /// zoom. Returns None for an empty route: nothing to draw.
    pub fn screen_points(&mut self, state: &ViewportState) -> Option<(&[Point], Point)> {
        self.ensure_cache(state);
        self.cache
            .as_ref()
            .map(|cache| (cache.points.as_slice(), cache.offset))
    }

    /// Number of times the screen geometry has been recomputed. Stays flat
    /// across repeated reads at an unchanged zoom.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Strokes the three halo passes through the composed draw transform.
    pub fn draw(&mut self, state: &ViewportState, canvas: &mut dyn OverlayCanvas) -> Result<()> {
        self.ensure_cache(state);
        let cache = match &self.cache {
            Some(cache) => cache,
            None => return Ok(()),
        };

        let chain = TransformComposer::compose(state, cache.offset);
        canvas.set_transform(chain.matrix());
        for pass in &self.style.passes {
            canvas.stroke_polyline(&cache.points, pass.color, pass.width)?;
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.cache = None;
    }

    fn ensure_cache(&mut self, state: &ViewportState) {
        if self.coordinates.is_empty() {
            self.cache = None;
            return;
        }
        let stale = match &self.cache {
            Some(cache) => cache.zoom != state.zoom,
            None => true,
        };
        if !stale {
            return;
        }

        let projection = Projection::new(state.zoom, state.tile_size);
        let offset = projection.project(&self.coordinates[0]);
        let points = self
            .coordinates
            .iter()
            .map(|coord| projection.project(coord).subtract(&offset))
            .collect();

        self.cache = Some(LineCache {
            points,
            offset,
            zoom: state.zoom,
        });
        self.recomputes += 1;
        log::debug!(
            "recomputed {} route points at zoom {}",
            self.coordinates.len(),
            state.zoom
        );
    }
}

impl Default for RouteLayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;
    use crate::rendering::context::RecordingCanvas;

    fn sample_route() -> Vec<LatLng> {
        vec![
            LatLng::new(4.15066, 9.30055),
            LatLng::new(4.15021, 9.29611),
            LatLng::new(4.14927, 9.28789),
        ]
    }

    fn state_at_zoom(zoom: f64) -> ViewportState {
        ViewportState::new(zoom, Point::new(365.0, 600.0))
    }

    #[test]
    fn test_first_point_is_origin() {
        let mut layer = RouteLayer::new();
        layer.set_coordinates(sample_route(), Instant::now());

        let (points, offset) = layer.screen_points(&state_at_zoom(14.0)).unwrap();
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert!(offset.x != 0.0 && offset.y != 0.0);
    }

    #[test]
    fn test_recompute_once_per_zoom() {
        let mut layer = RouteLayer::new();
        layer.set_coordinates(sample_route(), Instant::now());

        let z14 = state_at_zoom(14.0);
        layer.screen_points(&z14);
        layer.screen_points(&z14);
        layer.screen_points(&z14);
        assert_eq!(layer.recompute_count(), 1);

        let z15 = state_at_zoom(15.0);
        let at_15: Vec<Point> = layer.screen_points(&z15).unwrap().0.to_vec();
        assert_eq!(layer.recompute_count(), 2);

        let at_14_again: Vec<Point> = layer.screen_points(&z14).unwrap().0.to_vec();
        assert_eq!(layer.recompute_count(), 3);
        assert_ne!(at_15, at_14_again);
    }

    #[test]
    fn test_replacing_coordinates_invalidates() {
        let mut layer = RouteLayer::new();
        let now = Instant::now();
        layer.set_coordinates(sample_route(), now);

        let state = state_at_zoom(14.0);
        let before: Vec<Point> = layer.screen_points(&state).unwrap().0.to_vec();

        layer.set_coordinates(
            vec![LatLng::new(4.1587, 9.2827), LatLng::new(4.15, 9.3)],
            now,
        );
        assert!(layer.redraw_pending());
        let after: Vec<Point> = layer.screen_points(&state).unwrap().0.to_vec();
        assert_ne!(before, after);
        assert_eq!(after[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_pan_keeps_cache_zoom_change_drops_it() {
        let mut layer = RouteLayer::new();
        let now = Instant::now();
        layer.set_coordinates(sample_route(), now);

        let mut state = state_at_zoom(14.0);
        layer.screen_points(&state);
        assert_eq!(layer.recompute_count(), 1);

        // A pan moves the viewport but not the zoom.
        state.pos = Point::new(500.0, 500.0);
        layer.on_viewport_changed(&state, now);
        layer.screen_points(&state);
        assert_eq!(layer.recompute_count(), 1);

        state.zoom = 15.0;
        layer.on_viewport_changed(&state, now);
        layer.screen_points(&state);
        assert_eq!(layer.recompute_count(), 2);
    }

    #[test]
    fn test_empty_route_draws_nothing() {
        let mut layer = RouteLayer::new();
        let mut canvas = RecordingCanvas::new();
        layer.draw(&state_at_zoom(14.0), &mut canvas).unwrap();

        assert!(layer.screen_points(&state_at_zoom(14.0)).is_none());
        assert!(canvas.calls.is_empty());
    }

    #[test]
    fn test_draw_emits_three_halo_passes() {
        let mut layer = RouteLayer::new();
        layer.set_coordinates(sample_route(), Instant::now());

        let mut canvas = RecordingCanvas::new();
        layer.draw(&state_at_zoom(14.0), &mut canvas).unwrap();

        assert_eq!(canvas.calls.len(), 3);
        // Widths narrow; the translucent pass comes first.
        assert!(canvas.calls[0].width > canvas.calls[1].width);
        assert!(canvas.calls[1].width > canvas.calls[2].width);
        assert!(canvas.calls[0].color.a < 255);
        assert_eq!(canvas.calls[1].color.a, 255);
        // All passes share one transform and one point list.
        assert_eq!(canvas.calls[0].matrix, canvas.calls[2].matrix);
        assert_eq!(canvas.calls[0].points, canvas.calls[1].points);
    }
}
