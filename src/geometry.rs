//! Rotation, angle, and plane-fitting utilities.
//!
//! Small closed-form helpers used when orienting branches and fitting local
//! coordinate frames during mesh construction. All of them are stateless.

use std::f64::consts::PI;

use nalgebra::{Matrix3, Point3, Rotation3, Unit, Vector3};

/// Dot-product distance from 1 below which two directions count as parallel
/// for [`angle_between`].
const PARALLEL_DOT_TOL: f64 = 1e-8;

/// Unit-direction distance below which three points count as collinear.
const COLLINEAR_TOL: f64 = 1e-9;

/// Rotation matrix about an arbitrary axis.
///
/// The axis need not be unit length; it is normalised first.
pub fn rotation_about_axis(axis: Vector3<f64>, angle: f64) -> Matrix3<f64> {
    let axis = Unit::new_normalize(axis);
    Rotation3::from_axis_angle(&axis, angle).into_inner()
}

/// Angle between two vectors, in radians.
///
/// Componentwise-equal unit directions return exactly 0 and exactly opposite
/// ones exactly π. Near-parallel directions use the small-angle form
/// `sqrt(2(1 - dot))` instead of `acos`, which loses precision as the dot
/// product approaches 1.
pub fn angle_between(v1: Vector3<f64>, v2: Vector3<f64>) -> f64 {
    let u1 = v1.normalize();
    let u2 = v2.normalize();

    if u1 == u2 {
        return 0.0;
    }
    if u1 == -u2 {
        return PI;
    }

    let dot = u1.dot(&u2).clamp(-1.0, 1.0);
    if 1.0 - dot < PARALLEL_DOT_TOL {
        (2.0 * (1.0 - dot)).sqrt()
    } else {
        dot.acos()
    }
}

/// Plane through three non-collinear points.
///
/// Returns the coefficients `[a, b, c, d]` of `aX + bY + cZ + d = 0`, with
/// `(a, b, c)` normal to the plane. Pass `normalize = true` for a unit
/// normal.
pub fn plane_from_points(
    x0: Point3<f64>,
    x1: Point3<f64>,
    x2: Point3<f64>,
    normalize: bool,
) -> [f64; 4] {
    let diff1 = x1 - x0;
    let diff2 = x1 - x2;

    let mut normal = diff1.cross(&diff2);
    if normalize {
        normal.normalize_mut();
    }

    let d = -normal.dot(&x0.coords);
    [normal.x, normal.y, normal.z, d]
}

/// Whether three points lie on a single line, within tolerance.
pub fn collinear(x0: Point3<f64>, x1: Point3<f64>, x2: Point3<f64>) -> bool {
    let u = (x1 - x0).normalize();
    let v = (x1 - x2).normalize();
    (u - v).norm() < COLLINEAR_TOL || (u + v).norm() < COLLINEAR_TOL
}
