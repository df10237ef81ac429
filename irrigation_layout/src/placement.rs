//! Fixed-spacing plant placement along pipes.

use crate::geometry::Coordinate;
use crate::network::{PlantPlacement, PlantSpacingSpec};
use crate::polygon::{inside_any, point_in_polygon};
use crate::polyline::{interpolate_at_distance, pipe_length};

/// Number of plant slots on a pipe of `length` metres.
///
/// The first plant sits half a spacing from the start; slots never run past
/// the end. Returns 0 when the pipe is shorter than that half spacing.
pub fn plant_positions_count(length: f64, plant_spacing: f64) -> usize {
    if !(plant_spacing > 0.0) {
        return 0;
    }
    let buffer = plant_spacing * 0.5;
    let available = length - buffer;
    if !(available > 0.0) {
        return 0;
    }
    let count = (available / plant_spacing).floor() + 1.0;
    if count.is_finite() {
        count.max(1.0) as usize
    } else {
        0
    }
}

/// Places plants every `spacing.plant_spacing` metres along `coords`.
///
/// Positions outside `zone` or inside any of `exclusions` are dropped.
pub fn place_plants(
    coords: &[Coordinate],
    spacing: &PlantSpacingSpec,
    zone: &[Coordinate],
    exclusions: &[Vec<Coordinate>],
) -> Vec<PlantPlacement> {
    let length = pipe_length(coords);
    let count = plant_positions_count(length, spacing.plant_spacing);
    let buffer = spacing.plant_spacing * 0.5;
    let mut plants = Vec::with_capacity(count);
    for i in 0..count {
        let distance = buffer + i as f64 * spacing.plant_spacing;
        if distance > length {
            break;
        }
        let Some(position) = interpolate_at_distance(coords, distance) else {
            continue;
        };
        if point_in_polygon(position, zone) && !inside_any(position, exclusions) {
            plants.push(PlantPlacement {
                position,
                spacing: *spacing,
            });
        }
    }
    plants
}
