//! Ellipsoidal volume helpers.
//!
//! The modelled organ volume is an axis-aligned ellipsoid centred on the
//! origin. These helpers size the ellipsoid from gross measurements and test
//! whether sampled points fall inside it, feeding the grid locator and the
//! mesh generators upstream of this crate.

use std::f64::consts::PI;

use nalgebra::Point3;

/// Tolerance for a point to count as lying on the surface.
const SURFACE_TOL: f64 = 1e-10;

/// An axis-aligned ellipsoid centred on the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-axis along x.
    pub x_radius: f64,
    /// Semi-axis along y.
    pub y_radius: f64,
    /// Semi-axis along z.
    pub z_radius: f64,
}

impl Ellipsoid {
    /// Create an ellipsoid from its three semi-axes.
    #[inline]
    pub fn new(x_radius: f64, y_radius: f64, z_radius: f64) -> Self {
        Self {
            x_radius,
            y_radius,
            z_radius,
        }
    }

    /// Size an ellipsoid from its volume, total thickness, and ellipticity.
    ///
    /// The z semi-axis is half the thickness, the x semi-axis follows from
    /// the volume formula, and ellipticity is the y:x radius ratio.
    pub fn from_volume(volume: f64, thickness: f64, ellipticity: f64) -> Self {
        let z_radius = thickness / 2.0;
        let x_radius = (volume * 3.0 / (4.0 * PI * ellipticity * z_radius)).sqrt();
        Self {
            x_radius,
            y_radius: ellipticity * x_radius,
            z_radius,
        }
    }

    /// Volume enclosed by the ellipsoid.
    pub fn volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.x_radius * self.y_radius * self.z_radius
    }

    /// Squared normalised radius: `(x/a)² + (y/b)² + (z/c)²`.
    ///
    /// Less than 1 inside the ellipsoid, 1 on its surface.
    #[inline]
    pub fn normalized_radius_sq(&self, point: Point3<f64>) -> f64 {
        (point.x / self.x_radius).powi(2)
            + (point.y / self.y_radius).powi(2)
            + (point.z / self.z_radius).powi(2)
    }

    /// Height of the upper surface above `(x, y)`, or `None` when the
    /// footprint does not cover that position.
    pub fn surface_z(&self, x: f64, y: f64) -> Option<f64> {
        let s = 1.0 - (x / self.x_radius).powi(2) - (y / self.y_radius).powi(2);
        (s >= 0.0).then(|| self.z_radius * s.sqrt())
    }

    /// Whether `point` lies strictly inside the ellipsoid.
    pub fn contains(&self, point: Point3<f64>) -> bool {
        self.normalized_radius_sq(point) < 1.0
    }

    /// Whether `point` lies on the surface, within tolerance.
    pub fn on_surface(&self, point: Point3<f64>) -> bool {
        (self.normalized_radius_sq(point) - 1.0).abs() < SURFACE_TOL
    }

    /// Whether `point` lies inside the ellipsoid or on its surface.
    pub fn contains_or_on(&self, point: Point3<f64>) -> bool {
        let check = self.normalized_radius_sq(point);
        check < 1.0 || (check - 1.0).abs() < SURFACE_TOL
    }
}
