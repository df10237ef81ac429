//! Realised spacing figures of a generated network.

use crate::geometry::{haversine_distance, Coordinate};
use crate::network::SubMainPipe;
use crate::polyline::{distance_along_pipe, projected_distance_along_pipe};

/// Branch origins closer than this, in metres, are the same station.
const SAME_ORIGIN_TOLERANCE: f64 = 0.01;

/// Reported spacing accuracy; not derived from the layout.
pub const SPACING_ACCURACY: f64 = 100.0;

/// How the station of a point along a pipe is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationMethod {
    /// Cumulative length to the nearest vertex.
    #[default]
    NearestVertex,
    /// Cumulative length to the closest-point projection.
    Projected,
}

impl StationMethod {
    /// Station of `target` along `coords` in metres.
    pub fn station(self, coords: &[Coordinate], target: Coordinate) -> f64 {
        match self {
            StationMethod::NearestVertex => distance_along_pipe(coords, target),
            StationMethod::Projected => projected_distance_along_pipe(coords, target),
        }
    }
}

/// Summary of a generated network.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatistics {
    pub total_branches: usize,
    pub total_plants: usize,
    /// Mean distance between neighbouring branch stations on a sub-main.
    pub average_row_spacing: f64,
    /// Mean distance between neighbouring plants on a branch.
    pub average_plant_spacing: f64,
    pub spacing_accuracy: f64,
}

#[derive(Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    /// Adds the gaps between consecutive values of `stations` once sorted.
    fn add_gaps(&mut self, mut stations: Vec<f64>) {
        stations.sort_by(f64::total_cmp);
        for pair in stations.windows(2) {
            self.sum += pair[1] - pair[0];
            self.count += 1;
        }
    }

    fn value(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }
}

/// Origins of `sub_main`'s branches with left/right pairs merged.
fn distinct_origins(sub_main: &SubMainPipe) -> Vec<Coordinate> {
    let mut origins: Vec<Coordinate> = Vec::new();
    for origin in sub_main.branches.iter().filter_map(|b| b.origin()) {
        if !origins
            .iter()
            .any(|o| haversine_distance(*o, origin) < SAME_ORIGIN_TOLERANCE)
        {
            origins.push(origin);
        }
    }
    origins
}

/// Computes row and plant spacing statistics over `sub_mains`.
pub fn network_statistics(sub_mains: &[SubMainPipe], method: StationMethod) -> NetworkStatistics {
    let mut rows = Mean::default();
    let mut plants = Mean::default();
    let mut total_branches = 0;
    let mut total_plants = 0;

    for sub in sub_mains {
        total_branches += sub.branches.len();
        let stations = distinct_origins(sub)
            .into_iter()
            .map(|o| method.station(&sub.coordinates, o))
            .collect();
        rows.add_gaps(stations);

        for branch in &sub.branches {
            total_plants += branch.plants.len();
            let stations = branch
                .plants
                .iter()
                .map(|p| method.station(&branch.coordinates, p.position))
                .collect();
            plants.add_gaps(stations);
        }
    }

    NetworkStatistics {
        total_branches,
        total_plants,
        average_row_spacing: rows.value(),
        average_plant_spacing: plants.value(),
        spacing_accuracy: SPACING_ACCURACY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{BranchPipe, PlantPlacement, PlantSpacingSpec, Side};

    fn spec() -> PlantSpacingSpec {
        PlantSpacingSpec::new(5.0, 10.0, 1.0)
    }

    fn branch(origin: Coordinate, side: Side, plant_lngs: &[f64]) -> BranchPipe {
        let end = Coordinate::new(origin.lat, origin.lng + 0.0004);
        BranchPipe {
            id: "b".into(),
            sub_main_id: "s".into(),
            coordinates: vec![origin, end],
            length: 0.0,
            diameter: 16.0,
            angle: 90.0,
            connection_point: 0.0,
            side,
            plants: plant_lngs
                .iter()
                .map(|lng| PlantPlacement {
                    position: Coordinate::new(origin.lat, *lng),
                    spacing: spec(),
                })
                .collect(),
        }
    }

    #[test]
    fn empty_network() {
        let stats = network_statistics(&[], StationMethod::NearestVertex);
        assert_eq!(stats.total_branches, 0);
        assert_eq!(stats.average_row_spacing, 0.0);
        assert_eq!(stats.spacing_accuracy, 100.0);
    }

    #[test]
    fn symmetric_pairs_count_once_for_rows() {
        let coords: Vec<Coordinate> = (0..=10)
            .map(|i| Coordinate::new(i as f64 * 0.0001, 0.0))
            .collect();
        let mut sub = SubMainPipe::new("s", "z", coords, 32.0);
        for lat in [0.0001, 0.0003, 0.0005] {
            let o = Coordinate::new(lat, 0.0);
            sub.branches.push(branch(o, Side::Left, &[]));
            sub.branches.push(branch(o, Side::Right, &[]));
        }
        let stats = network_statistics(&[sub], StationMethod::NearestVertex);
        let expected = haversine_distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0002, 0.0));
        assert_eq!(stats.total_branches, 6);
        assert!((stats.average_row_spacing - expected).abs() < 1e-6);
    }

    #[test]
    fn projected_stations_on_two_vertex_pipe() {
        let coords = vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.001, 0.0)];
        let mut sub = SubMainPipe::new("s", "z", coords, 32.0);
        let o1 = Coordinate::new(0.0002, 0.0);
        let o2 = Coordinate::new(0.0004, 0.0);
        sub.branches.push(branch(o1, Side::Right, &[0.0001, 0.0002, 0.0003]));
        sub.branches.push(branch(o2, Side::Right, &[]));

        let projected = network_statistics(&[sub.clone()], StationMethod::Projected);
        let gap = haversine_distance(o1, o2);
        assert!((projected.average_row_spacing - gap).abs() < 1e-6);
        let plant_gap = haversine_distance(
            Coordinate::new(0.0002, 0.0001),
            Coordinate::new(0.0002, 0.0002),
        );
        assert!((projected.average_plant_spacing - plant_gap).abs() < 1e-3);
        assert_eq!(projected.total_plants, 3);

        // Both origins snap to the first vertex.
        let snapped = network_statistics(&[sub], StationMethod::NearestVertex);
        assert_eq!(snapped.average_row_spacing, 0.0);
    }
}
