//! Basic geodesic and planar primitives for layout operations.

mod coordinate;

pub use coordinate::{Coordinate, Vector2};

use crate::projection::MetricProjection;

/// Mean earth radius in metres used by [`haversine_distance`].
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates in metres.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    // Rounding can push `h` marginally outside [0, 1] for near-identical or
    // antipodal points.
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Direction from `a` to `b` as a planar vector in degree space.
pub fn local_direction(a: Coordinate, b: Coordinate) -> Vector2 {
    Vector2::new(b.lat - a.lat, b.lng - a.lng)
}

/// Unit vector rotated 90 degrees counter-clockwise from `direction`.
///
/// A zero-length input yields `(0, 1)`.
pub fn perpendicular(direction: Vector2) -> Vector2 {
    let len = direction.length();
    if len < f64::EPSILON {
        return Vector2::new(0.0, 1.0);
    }
    Vector2::new(-direction.y / len, direction.x / len)
}

/// Rotates `v` counter-clockwise by `degrees`.
pub fn rotate(v: Vector2, degrees: f64) -> Vector2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vector2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

/// Moves `meters` from `origin` along `sign * direction`.
///
/// `direction` is interpreted as a unit vector; the displacement is converted
/// back to degrees with the local scale at `origin`.
pub fn project_along_direction(
    origin: Coordinate,
    direction: Vector2,
    sign: f64,
    meters: f64,
) -> Coordinate {
    let projection = MetricProjection::new(origin.lat);
    projection.offset(
        origin,
        direction.x * sign * meters,
        direction.y * sign * meters,
    )
}
