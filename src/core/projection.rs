use crate::core::constants::TILE_SIZE;
use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Tile projection at one fixed zoom level.
///
/// The whole map is `map_size = 2^zoom * tile_size` pixels wide, and that
/// factor is the only zoom-dependent part of the math, so it is computed once
/// here and reused for every point instead of being recomputed per
/// coordinate. `x`/`y` are pure: for a fixed zoom the same input always
/// produces the same output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    map_size: f64,
}

impl Projection {
    /// Builds the projection for a zoom level and tile size.
    pub fn new(zoom: f64, tile_size: u32) -> Self {
        Self {
            map_size: 2_f64.powf(zoom) * tile_size as f64,
        }
    }

    /// Builds the projection for a zoom level with the default tile size.
    pub fn for_zoom(zoom: f64) -> Self {
        Self::new(zoom, TILE_SIZE)
    }

    /// Total map edge length in pixels at this zoom.
    pub fn map_size(&self) -> f64 {
        self.map_size
    }

    /// Horizontal pixel position for a longitude.
    ///
    /// Longitude maps linearly onto `[-map_size/2, map_size/2]`; the draw
    /// transform re-adds the half-map shift as a single translation.
    pub fn x(&self, lng: f64) -> f64 {
        LatLng::clamp_lng(lng) * self.map_size / 360.0
    }

    /// Vertical pixel position for a latitude.
    ///
    /// Latitude is clamped before the tangent/secant terms, so the exact
    /// poles stay finite.
    pub fn y(&self, lat: f64) -> f64 {
        let phi = LatLng::clamp_lat(-lat).to_radians();
        (1.0 - (phi.tan() + 1.0 / phi.cos()).ln() / PI) * self.map_size / 2.0
    }

    /// Projects a coordinate into pixel space at this zoom.
    pub fn project(&self, coord: &LatLng) -> Point {
        Point::new(self.x(coord.lng), self.y(coord.lat))
    }

    /// Longitude for a horizontal pixel position (inverse of [`x`](Self::x)).
    pub fn lng_at(&self, x: f64) -> f64 {
        x * 360.0 / self.map_size
    }

    /// Latitude for a vertical pixel position (inverse of [`y`](Self::y)).
    pub fn lat_at(&self, y: f64) -> f64 {
        let phi = ((1.0 - 2.0 * y / self.map_size) * PI).sinh().atan();
        -phi.to_degrees()
    }

    /// Converts a pixel-space point back into a coordinate.
    pub fn unproject(&self, point: &Point) -> LatLng {
        LatLng::new(self.lat_at(point.y), self.lng_at(point.x))
    }
}
