//! Bisection search for how far a ray stays inside a polygon.

use crate::geometry::{project_along_direction, Coordinate, Vector2};
use crate::polygon::point_in_polygon;

/// Default upper bound of the search in metres.
pub const DEFAULT_MAX_SEARCH: f64 = 500.0;
/// Default width of the final search interval in metres.
pub const DEFAULT_PRECISION: f64 = 0.1;
/// Finest precision honoured; smaller values are raised to it.
pub const MIN_PRECISION: f64 = 1e-6;
/// Upper bound on bisection steps regardless of configuration.
const MAX_ITERATIONS: usize = 64;

/// Parameters of the boundary bisection.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoundarySearch {
    /// Longest distance probed from the start point, in metres.
    pub max_search: f64,
    /// The search stops once the bracketing interval is narrower than this.
    pub precision: f64,
}

impl Default for BoundarySearch {
    fn default() -> Self {
        Self {
            max_search: DEFAULT_MAX_SEARCH,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl BoundarySearch {
    pub fn new(max_search: f64, precision: f64) -> Self {
        Self {
            max_search,
            precision,
        }
    }

    /// Largest distance along `sign * direction` from `start` whose end point
    /// still lies inside `polygon`.
    ///
    /// Assumes a single inside-to-outside crossing along the ray. On strongly
    /// concave shapes the result may be shorter than the true reach but its end
    /// point is always inside. Returns 0 when nothing inside is found.
    ///
    /// Precision is clamped to [`MIN_PRECISION`] and the search never takes
    /// more than a fixed number of steps.
    pub fn max_distance(
        &self,
        start: Coordinate,
        direction: Vector2,
        sign: f64,
        polygon: &[Coordinate],
    ) -> f64 {
        let precision = if self.precision.is_finite() && self.precision > 0.0 {
            self.precision.max(MIN_PRECISION)
        } else {
            DEFAULT_PRECISION
        };
        let max_search = if self.max_search.is_finite() {
            self.max_search.max(0.0)
        } else {
            DEFAULT_MAX_SEARCH
        };
        let mut lo = 0.0;
        let mut hi = max_search;
        let mut best = 0.0;
        for _ in 0..MAX_ITERATIONS {
            if hi - lo <= precision {
                break;
            }
            let mid = (lo + hi) / 2.0;
            if mid <= lo || mid >= hi {
                break;
            }
            let candidate = project_along_direction(start, direction, sign, mid);
            if point_in_polygon(candidate, polygon) {
                best = mid;
                lo = mid;
            } else {
                hi = mid;
            }
        }
        best
    }
}

/// [`BoundarySearch::max_distance`] with an explicit search bound and the
/// default precision.
pub fn max_distance_inside_polygon(
    start: Coordinate,
    direction: Vector2,
    sign: f64,
    polygon: &[Coordinate],
    max_search: f64,
) -> f64 {
    BoundarySearch::new(max_search, DEFAULT_PRECISION).max_distance(start, direction, sign, polygon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::METERS_PER_DEGREE;

    fn square() -> Vec<Coordinate> {
        vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 0.0009),
            Coordinate::new(0.0009, 0.0009),
            Coordinate::new(0.0009, 0.0),
        ]
    }

    #[test]
    fn finds_east_edge_of_square() {
        let start = Coordinate::new(0.00045, 0.00045);
        let d = max_distance_inside_polygon(start, Vector2::new(0.0, 1.0), 1.0, &square(), 500.0);
        let expected = 0.00045 * METERS_PER_DEGREE * 0.00045f64.to_radians().cos();
        assert!(d <= expected);
        assert!(expected - d < 0.1);
    }

    #[test]
    fn endpoint_stays_inside() {
        let start = Coordinate::new(0.0002, 0.0007);
        let dir = Vector2::new(0.6, -0.8);
        for sign in [-1.0, 1.0] {
            let d = max_distance_inside_polygon(start, dir, sign, &square(), 500.0);
            let end = project_along_direction(start, dir, sign, d);
            assert!(point_in_polygon(end, &square()));
        }
    }

    #[test]
    fn start_outside_returns_zero() {
        let start = Coordinate::new(0.01, 0.01);
        let d = max_distance_inside_polygon(start, Vector2::new(1.0, 0.0), 1.0, &square(), 500.0);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn empty_polygon_returns_zero() {
        let d = max_distance_inside_polygon(
            Coordinate::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            1.0,
            &[],
            500.0,
        );
        assert_eq!(d, 0.0);
    }

    #[test]
    fn search_bound_caps_result() {
        let start = Coordinate::new(0.00045, 0.00045);
        let d = max_distance_inside_polygon(start, Vector2::new(0.0, 1.0), 1.0, &square(), 20.0);
        assert!(d <= 20.0 && d > 19.8);
    }

    #[test]
    fn zero_precision_falls_back_to_default() {
        let search = BoundarySearch::new(500.0, 0.0);
        let start = Coordinate::new(0.00045, 0.00045);
        let d = search.max_distance(start, Vector2::new(1.0, 0.0), -1.0, &square());
        assert!(d > 49.0 && d < 50.0);
    }

    #[test]
    fn tiny_precision_still_terminates() {
        let search = BoundarySearch::new(500.0, 1e-20);
        let start = Coordinate::new(0.00045, 0.00045);
        let d = search.max_distance(start, Vector2::new(1.0, 0.0), -1.0, &square());
        assert!(d > 49.9 && d < 50.0);
        let end = project_along_direction(start, Vector2::new(1.0, 0.0), -1.0, d);
        assert!(point_in_polygon(end, &square()));
    }

    #[test]
    fn non_finite_parameters_fall_back_to_defaults() {
        let start = Coordinate::new(0.00045, 0.00045);
        for search in [
            BoundarySearch::new(f64::INFINITY, 0.1),
            BoundarySearch::new(500.0, f64::NAN),
        ] {
            let d = search.max_distance(start, Vector2::new(0.0, 1.0), 1.0, &square());
            assert!(d > 49.8 && d < 50.0);
        }
    }
}
