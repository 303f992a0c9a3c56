use crate::core::geo::{LatLng, LatLngBounds};
use crate::core::viewport::MapViewport;

/// Centers the view on a set of route points.
///
/// The box is accumulated with a running min *and* a running max per axis;
/// folding the max against the running minimum silently corrupts the box as
/// soon as a third point arrives.
pub struct RouteFitter;

impl RouteFitter {
    /// Midpoint of the bounding box over `points`, or None when there is
    /// nothing to fit.
    pub fn fit(points: &[LatLng]) -> Option<LatLng> {
        LatLngBounds::from_points(points).map(|bounds| bounds.center())
    }

    /// Computes the midpoint and centers the viewport on it.
    pub fn fit_viewport(viewport: &mut dyn MapViewport, points: &[LatLng]) -> Option<LatLng> {
        let center = Self::fit(points)?;
        viewport.center_on(center);
        Some(center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_two_points() {
        let center = RouteFitter::fit(&[
            LatLng::new(4.1506595505986645, 9.30054799695078),
            LatLng::new(4.149268458906271, 9.287887970242025),
        ])
        .unwrap();

        assert!((center.lat - 4.149964004752468).abs() < 1e-12);
        assert!((center.lng - 9.294217983596402).abs() < 1e-12);
    }

    #[test]
    fn test_fit_empty() {
        assert!(RouteFitter::fit(&[]).is_none());
    }

    // With three or more points a reducer that folds the running max against
    // the running *min* reports a wrong corner; pin the correct box here.
    #[test]
    fn test_fit_three_points_uses_true_max() {
        let points = [
            LatLng::new(0.0, 0.0),
            LatLng::new(10.0, 10.0),
            LatLng::new(-5.0, -5.0),
        ];

        let bounds = LatLngBounds::from_points(&points).unwrap();
        assert_eq!(bounds.north_east, LatLng::new(10.0, 10.0));
        assert_eq!(bounds.south_west, LatLng::new(-5.0, -5.0));

        let center = RouteFitter::fit(&points).unwrap();
        assert_eq!(center, LatLng::new(2.5, 2.5));
    }
}
