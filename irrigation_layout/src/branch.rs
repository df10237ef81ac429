//! Generation of symmetric branch pipes along a sub-main.

use log::{debug, trace};

use crate::config::LayoutConfig;
use crate::geometry::{
    haversine_distance, local_direction, perpendicular, project_along_direction, rotate,
    Coordinate, Vector2,
};
use crate::network::{BranchPipe, PlantSpacingSpec, Side, SubMainPipe};
use crate::placement::{place_plants, plant_positions_count};
use crate::polygon::{inside_any, point_in_polygon};
use crate::polyline::{closest_point_on_pipe, locate_at_distance, pipe_length};

/// Shortest branch worth laying, in metres.
pub const MIN_BRANCH_LENGTH: f64 = 15.0;

/// Points closer than this to a sub-main, in metres, count as lying on it.
const ON_PIPE_TOLERANCE: f64 = 1e-3;

/// Longest branch not exceeding `max_valid` whose plants fall on whole
/// spacing intervals.
///
/// Returns 0 when not even the first plant fits.
pub fn optimal_branch_length(max_valid: f64, plant_spacing: f64) -> f64 {
    let count = plant_positions_count(max_valid, plant_spacing);
    if count == 0 {
        return 0.0;
    }
    let buffer = plant_spacing * 0.5;
    (buffer + (count - 1) as f64 * plant_spacing).min(max_valid)
}

/// Direction of the sub-main segment at `seg`, falling back to the zero
/// vector for out-of-range indices.
fn segment_direction(coords: &[Coordinate], seg: usize) -> Vector2 {
    match (coords.get(seg), coords.get(seg + 1)) {
        (Some(a), Some(b)) => local_direction(*a, *b),
        _ => Vector2::new(0.0, 0.0),
    }
}

/// Lays out branch pairs every `row_spacing` metres along `sub_main`.
///
/// For each station both sides are tried. A branch is kept only when its
/// optimal length reaches [`MIN_BRANCH_LENGTH`], both of its end points lie
/// inside `target` and its far end is clear of every exclusion. Invalid
/// branches are skipped silently; the result may be empty.
pub fn generate_branch_pipes(
    sub_main: &SubMainPipe,
    target: &[Coordinate],
    spacing: &PlantSpacingSpec,
    exclusions: &[Vec<Coordinate>],
    angle: f64,
    config: &LayoutConfig,
) -> Vec<BranchPipe> {
    let coords = &sub_main.coordinates;
    let length = pipe_length(coords);
    let row = spacing.row_spacing;
    if !(row > 0.0) || !(spacing.plant_spacing > 0.0) || !(length > 0.0) {
        return Vec::new();
    }

    let stations = ((length / row).floor() as usize + 1).max(2);
    let mut branches = Vec::new();
    for i in 0..stations {
        let offset = row * 0.5 + i as f64 * row;
        if offset > length {
            break;
        }
        let Some((origin, seg)) = locate_at_distance(coords, offset) else {
            continue;
        };
        let lateral = rotate(perpendicular(segment_direction(coords, seg)), angle - 90.0);

        for side in [Side::Left, Side::Right] {
            let sign = side.sign();
            let max_valid = config.boundary.max_distance(origin, lateral, sign, target);
            let optimal = optimal_branch_length(max_valid, spacing.plant_spacing);
            if optimal < MIN_BRANCH_LENGTH {
                trace!(
                    "{}: station {:.2} {:?} too short ({:.2} m)",
                    sub_main.id,
                    offset,
                    side,
                    optimal
                );
                continue;
            }
            let end = project_along_direction(origin, lateral, sign, optimal);
            if !point_in_polygon(origin, target) || !point_in_polygon(end, target) {
                debug!(
                    "{}: station {:.2} {:?} leaves the target area",
                    sub_main.id, offset, side
                );
                continue;
            }
            if inside_any(end, exclusions) {
                debug!(
                    "{}: station {:.2} {:?} ends in an exclusion area",
                    sub_main.id, offset, side
                );
                continue;
            }

            let branch_coords = vec![origin, end];
            let plants = place_plants(&branch_coords, spacing, target, exclusions);
            branches.push(BranchPipe {
                id: format!("{}-B{:03}-{}", sub_main.id, i, side.tag()),
                sub_main_id: sub_main.id.clone(),
                length: pipe_length(&branch_coords),
                coordinates: branch_coords,
                diameter: config.branch_diameter_mm,
                angle,
                connection_point: (offset / length).clamp(0.0, 1.0),
                side,
                plants,
            });
        }
    }
    debug!(
        "{}: {} branches over {:.2} m",
        sub_main.id,
        branches.len(),
        length
    );
    branches
}

/// Builds a single hand-placed branch from the nearest point of `sub_main`
/// to `end`.
///
/// Returns `None` when the sub-main is degenerate or `end` lies on it.
pub fn attach_branch(
    sub_main: &SubMainPipe,
    end: Coordinate,
    spacing: &PlantSpacingSpec,
    target: &[Coordinate],
    exclusions: &[Vec<Coordinate>],
    config: &LayoutConfig,
) -> Option<BranchPipe> {
    let coords = &sub_main.coordinates;
    let proj = closest_point_on_pipe(end, coords)?;
    if proj.distance < ON_PIPE_TOLERANCE {
        return None;
    }
    let origin = proj.position;
    let seg = proj.segment_index;
    let station = pipe_length(&coords[..=seg]) + haversine_distance(coords[seg], origin);
    let total = pipe_length(coords);
    let connection_point = if total > 0.0 {
        (station / total).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let along = segment_direction(coords, seg);
    let lateral = local_direction(origin, end);
    let normal = perpendicular(along);
    let side = if lateral.x * normal.x + lateral.y * normal.y >= 0.0 {
        Side::Right
    } else {
        Side::Left
    };
    let denom = along.length() * lateral.length();
    let angle = if denom > 0.0 {
        ((along.x * lateral.x + along.y * lateral.y) / denom)
            .clamp(-1.0, 1.0)
            .acos()
            .to_degrees()
    } else {
        90.0
    };

    let branch_coords = vec![origin, end];
    let index = sub_main.branches.len();
    Some(BranchPipe {
        id: format!("{}-M{:03}-{}", sub_main.id, index, side.tag()),
        sub_main_id: sub_main.id.clone(),
        length: pipe_length(&branch_coords),
        plants: place_plants(&branch_coords, spacing, target, exclusions),
        coordinates: branch_coords,
        diameter: config.branch_diameter_mm,
        angle,
        connection_point,
        side,
    })
}
