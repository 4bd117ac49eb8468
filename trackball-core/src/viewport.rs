/// Viewport geometry and the trackball hemisphere it hosts
use log::warn;
use nalgebra::{Point2, Vector3};
use serde::{Deserialize, Serialize};

use crate::error::TrackballError;

/// Fraction of the viewport width used as trackball radius by default.
pub const DEFAULT_RADIUS_FRACTION: f32 = 1.0 / 3.0;

/// Trackball settings that can be loaded from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackballConfig {
    /// Radius of the virtual sphere as a fraction of the viewport width.
    pub radius_fraction: f32,
}

impl Default for TrackballConfig {
    fn default() -> Self {
        Self {
            radius_fraction: DEFAULT_RADIUS_FRACTION,
        }
    }
}

impl TrackballConfig {
    /// Build a viewport of the given pixel size using this configuration
    pub fn viewport(&self, width: f32, height: f32) -> Result<Viewport, TrackballError> {
        Viewport::with_radius_fraction(width, height, self.radius_fraction)
    }
}

/// A rectangular drawing area in pixel coordinates (y grows downward)
/// together with the circle the trackball sphere is centered on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub center: Point2<f32>,
    pub radius: f32,
}

impl Viewport {
    /// Viewport with the trackball radius at one third of the width
    pub fn new(width: f32, height: f32) -> Result<Self, TrackballError> {
        Self::with_radius_fraction(width, height, DEFAULT_RADIUS_FRACTION)
    }

    pub fn with_radius_fraction(
        width: f32,
        height: f32,
        fraction: f32,
    ) -> Result<Self, TrackballError> {
        if !(fraction.is_finite() && fraction > 0.0) {
            warn!("rejecting trackball radius fraction {fraction}");
            return Err(TrackballError::InvalidRadiusFraction(fraction));
        }
        Self::with_radius(width, height, width * fraction)
    }

    /// Viewport with an explicit trackball radius in pixels
    pub fn with_radius(width: f32, height: f32, radius: f32) -> Result<Self, TrackballError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            warn!("rejecting viewport of size {width}x{height}");
            return Err(TrackballError::InvalidViewport { width, height });
        }
        if !(radius.is_finite() && radius > 0.0) {
            warn!("rejecting trackball radius {radius}");
            return Err(TrackballError::InvalidRadius(radius));
        }

        Ok(Self {
            width,
            height,
            center: Point2::new(width / 2.0, height / 2.0),
            radius,
        })
    }

    /// Whether a pointer position lies on the viewport
    pub fn contains(&self, pointer: &Point2<f32>) -> bool {
        pointer.x >= 0.0 && pointer.x < self.width && pointer.y >= 0.0 && pointer.y < self.height
    }

    /// Map a pointer position onto the sphere of radius `self.radius`.
    ///
    /// Positions inside the trackball circle land on the front hemisphere.
    /// Positions outside are pulled onto the rim (z = 0). The result is not
    /// normalized; its length is always `self.radius`.
    pub fn hemisphere_point(&self, pointer: &Point2<f32>) -> Vector3<f32> {
        let x = pointer.x - self.center.x;
        // Screen y grows downward, trackball y grows upward
        let y = self.center.y - pointer.y;

        let radius_sq = self.radius * self.radius;
        let planar_sq = x * x + y * y;

        if planar_sq <= radius_sq {
            Vector3::new(x, y, (radius_sq - planar_sq).sqrt())
        } else {
            let scale = self.radius / planar_sq.sqrt();
            Vector3::new(x * scale, y * scale, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport_300() -> Viewport {
        Viewport::with_radius(300.0, 300.0, 100.0).unwrap()
    }

    #[test]
    fn test_default_radius_is_third_of_width() {
        let viewport = Viewport::new(600.0, 400.0).unwrap();
        assert!((viewport.radius - 200.0).abs() < 1e-4);
        assert_eq!(viewport.center, Point2::new(300.0, 200.0));
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        assert_eq!(
            Viewport::new(0.0, 100.0),
            Err(TrackballError::InvalidViewport {
                width: 0.0,
                height: 100.0
            })
        );
        assert!(Viewport::new(100.0, f32::NAN).is_err());
        assert_eq!(
            Viewport::with_radius_fraction(100.0, 100.0, -0.5),
            Err(TrackballError::InvalidRadiusFraction(-0.5))
        );
        assert!(Viewport::with_radius(300.0, 300.0, 0.0).is_err());
    }

    #[test]
    fn test_contains() {
        let viewport = viewport_300();
        assert!(viewport.contains(&Point2::new(0.0, 0.0)));
        assert!(viewport.contains(&Point2::new(299.5, 150.0)));
        assert!(!viewport.contains(&Point2::new(300.0, 150.0)));
        assert!(!viewport.contains(&Point2::new(-1.0, 10.0)));
        assert!(!viewport.contains(&Point2::new(10.0, 301.0)));
    }

    #[test]
    fn test_center_maps_to_front_pole() {
        let viewport = viewport_300();
        let point = viewport.hemisphere_point(&Point2::new(150.0, 150.0));
        assert!((point - Vector3::new(0.0, 0.0, 100.0)).norm() < 1e-4);
    }

    #[test]
    fn test_vertical_axis_is_flipped() {
        let viewport = viewport_300();
        // Above the center on screen means positive trackball y
        let point = viewport.hemisphere_point(&Point2::new(150.0, 100.0));
        assert!(point.y > 0.0);
        assert!((point.y - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_outside_circle_lands_on_rim() {
        let viewport = viewport_300();
        for pointer in [
            Point2::new(260.0, 150.0),
            Point2::new(290.0, 20.0),
            Point2::new(0.0, 299.0),
        ] {
            let point = viewport.hemisphere_point(&pointer);
            assert_eq!(point.z, 0.0);
            let planar = (point.x * point.x + point.y * point.y).sqrt();
            assert!((planar - viewport.radius).abs() < 1e-4);
        }
    }

    #[test]
    fn test_config_deserializes_partial_toml() {
        let config: TrackballConfig = toml::from_str("").unwrap();
        assert_eq!(config, TrackballConfig::default());

        let config: TrackballConfig = toml::from_str("radius_fraction = 0.5").unwrap();
        let viewport = config.viewport(200.0, 100.0).unwrap();
        assert!((viewport.radius - 100.0).abs() < 1e-4);
    }
}
