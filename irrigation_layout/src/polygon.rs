use crate::geometry::Coordinate;
use crate::projection::MetricProjection;

/// Edge spans below this (in degrees) are treated as horizontal.
const EDGE_EPSILON: f64 = 1e-12;

/// Ray-casting point-in-polygon test using the odd-crossing rule.
///
/// The polygon is implicitly closed. Fewer than three vertices never contain
/// anything.
pub fn point_in_polygon(point: Coordinate, polygon: &[Coordinate]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let (px, py) = (point.lng, point.lat);
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = (polygon[i].lng, polygon[i].lat);
        let (xj, yj) = (polygon[j].lng, polygon[j].lat);
        if (yi > py) != (yj > py) {
            let span = yj - yi;
            if span.abs() > EDGE_EPSILON {
                let x_cross = (xj - xi) * (py - yi) / span + xi;
                if px < x_cross {
                    inside = !inside;
                }
            }
        }
        j = i;
    }
    inside
}

/// Returns `true` when `point` lies in at least one of `polygons`.
pub fn inside_any(point: Coordinate, polygons: &[Vec<Coordinate>]) -> bool {
    polygons.iter().any(|poly| point_in_polygon(point, poly))
}

/// Mean of the vertex latitudes; 0 for an empty polygon.
pub fn polygon_centroid_latitude(polygon: &[Coordinate]) -> f64 {
    if polygon.is_empty() {
        return 0.0;
    }
    polygon.iter().map(|c| c.lat).sum::<f64>() / polygon.len() as f64
}

/// Approximate area in square metres using the shoelace formula.
///
/// Degrees are scaled with a single [`MetricProjection`] anchored at the mean
/// latitude, so the result is only meaningful for field-scale polygons.
pub fn polygon_area(polygon: &[Coordinate]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..polygon.len() {
        let j = (i + 1) % polygon.len();
        sum += polygon[i].lng * polygon[j].lat - polygon[j].lng * polygon[i].lat;
    }
    let proj = MetricProjection::new(polygon_centroid_latitude(polygon));
    let area = sum.abs() * 0.5 * proj.meters_per_degree_lat() * proj.meters_per_degree_lng();
    if area.is_finite() {
        area
    } else {
        0.0
    }
}
