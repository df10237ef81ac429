//! Length, interpolation and projection along pipe polylines.

use crate::geometry::{haversine_distance, Coordinate};

/// Closest point on a polyline to some query point.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipeProjection {
    /// Projected position on the polyline.
    pub position: Coordinate,
    /// Great-circle distance in metres from the query point to `position`.
    pub distance: f64,
    /// Index of the segment `coords[segment_index]..coords[segment_index + 1]`.
    pub segment_index: usize,
}

/// Total great-circle length of the polyline in metres.
pub fn pipe_length(coords: &[Coordinate]) -> f64 {
    coords
        .windows(2)
        .map(|pair| haversine_distance(pair[0], pair[1]))
        .sum()
}

/// Returns the position `distance` metres along the polyline.
///
/// Distances beyond the end clamp to the last vertex. Negative distances and
/// polylines with fewer than two vertices yield `None`.
pub fn interpolate_at_distance(coords: &[Coordinate], distance: f64) -> Option<Coordinate> {
    locate_at_distance(coords, distance).map(|(p, _)| p)
}

/// Like [`interpolate_at_distance`] but also reports the segment index.
pub(crate) fn locate_at_distance(
    coords: &[Coordinate],
    distance: f64,
) -> Option<(Coordinate, usize)> {
    if coords.len() < 2 || !(distance >= 0.0) {
        return None;
    }
    let mut travelled = 0.0;
    for (idx, pair) in coords.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let seg = haversine_distance(a, b);
        if travelled + seg >= distance {
            let t = if seg < f64::EPSILON {
                0.0
            } else {
                (distance - travelled) / seg
            };
            let p = Coordinate::new(a.lat + t * (b.lat - a.lat), a.lng + t * (b.lng - a.lng));
            return Some((p, idx));
        }
        travelled += seg;
    }
    coords.last().map(|last| (*last, coords.len() - 2))
}

/// Projects `point` onto every segment and returns the nearest projection.
///
/// Segments are treated as planar in degree space, which is adequate at
/// sub-kilometre scale.
pub fn closest_point_on_pipe(point: Coordinate, coords: &[Coordinate]) -> Option<PipeProjection> {
    if coords.len() < 2 {
        return None;
    }
    let mut best: Option<PipeProjection> = None;
    for (idx, pair) in coords.windows(2).enumerate() {
        let (a, b) = (pair[0], pair[1]);
        let dx = b.lat - a.lat;
        let dy = b.lng - a.lng;
        let len_sq = dx * dx + dy * dy;
        let t = if len_sq < f64::EPSILON * f64::EPSILON {
            0.0
        } else {
            (((point.lat - a.lat) * dx + (point.lng - a.lng) * dy) / len_sq).clamp(0.0, 1.0)
        };
        let position = Coordinate::new(a.lat + t * dx, a.lng + t * dy);
        let distance = haversine_distance(point, position);
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(PipeProjection {
                position,
                distance,
                segment_index: idx,
            });
        }
    }
    best
}

/// Cumulative length up to the vertex nearest to `target`.
///
/// This snaps to a vertex rather than projecting onto a segment, so it is
/// only suitable for reporting.
pub fn distance_along_pipe(coords: &[Coordinate], target: Coordinate) -> f64 {
    let nearest = coords
        .iter()
        .enumerate()
        .map(|(idx, c)| (idx, haversine_distance(*c, target)))
        .fold(None, |best: Option<(usize, f64)>, (idx, d)| match best {
            Some((_, bd)) if bd <= d => best,
            _ => Some((idx, d)),
        });
    match nearest {
        Some((idx, _)) => pipe_length(&coords[..=idx]),
        None => 0.0,
    }
}

/// Cumulative length up to the closest-point projection of `target`.
pub fn projected_distance_along_pipe(coords: &[Coordinate], target: Coordinate) -> f64 {
    match closest_point_on_pipe(target, coords) {
        Some(proj) => {
            let idx = proj.segment_index;
            pipe_length(&coords[..=idx]) + haversine_distance(coords[idx], proj.position)
        }
        None => 0.0,
    }
}
