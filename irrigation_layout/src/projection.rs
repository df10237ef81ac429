//! Local metric approximation around a reference latitude.

use crate::geometry::Coordinate;

/// Metres per degree of latitude used by the local approximation.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Flat-earth conversion between degrees and metres.
///
/// Longitude degrees shrink with `cos(reference_lat)`; latitude degrees are a
/// fixed length. Only valid for field-scale areas away from the poles.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MetricProjection {
    /// Latitude in degrees at which the longitude scale is evaluated.
    pub reference_lat: f64,
}

impl MetricProjection {
    /// Creates a projection anchored at `reference_lat`.
    pub fn new(reference_lat: f64) -> Self {
        Self { reference_lat }
    }

    pub fn meters_per_degree_lat(&self) -> f64 {
        METERS_PER_DEGREE
    }

    pub fn meters_per_degree_lng(&self) -> f64 {
        METERS_PER_DEGREE * self.reference_lat.to_radians().cos()
    }

    /// Returns `origin` shifted by `north_m` and `east_m` metres.
    pub fn offset(&self, origin: Coordinate, north_m: f64, east_m: f64) -> Coordinate {
        Coordinate::new(
            origin.lat + north_m / self.meters_per_degree_lat(),
            origin.lng + east_m / self.meters_per_degree_lng(),
        )
    }

    /// Converts `p` to `(north_m, east_m)` relative to `origin`.
    pub fn to_local(&self, origin: Coordinate, p: Coordinate) -> (f64, f64) {
        (
            (p.lat - origin.lat) * self.meters_per_degree_lat(),
            (p.lng - origin.lng) * self.meters_per_degree_lng(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let proj = MetricProjection::new(45.0);
        let origin = Coordinate::new(45.0, 7.0);
        let moved = proj.offset(origin, 120.0, -35.0);
        let (n, e) = proj.to_local(origin, moved);
        assert!((n - 120.0).abs() < 1e-6);
        assert!((e + 35.0).abs() < 1e-6);
    }

    #[test]
    fn longitude_scale_shrinks_with_latitude() {
        let equator = MetricProjection::new(0.0);
        let north = MetricProjection::new(60.0);
        assert!((equator.meters_per_degree_lng() - METERS_PER_DEGREE).abs() < 1e-9);
        assert!((north.meters_per_degree_lng() - METERS_PER_DEGREE * 0.5).abs() < 1e-6);
    }
}
