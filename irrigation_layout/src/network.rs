//! Records describing zones, exclusion areas and the generated pipe network.

use serde::{Deserialize, Serialize};

use crate::geometry::Coordinate;
use crate::polygon::polygon_area;
use crate::polyline::pipe_length;

/// Plant and row spacing supplied by the caller, in metres and litres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantSpacingSpec {
    /// Distance between neighbouring plants on one pipe.
    pub plant_spacing: f64,
    /// Distance between neighbouring branch pipes on a sub-main.
    pub row_spacing: f64,
    #[serde(default = "default_water_need")]
    pub water_need: f64,
}

fn default_water_need() -> f64 {
    1.0
}

impl PlantSpacingSpec {
    pub fn new(plant_spacing: f64, row_spacing: f64, water_need: f64) -> Self {
        Self {
            plant_spacing,
            row_spacing,
            water_need,
        }
    }
}

/// One plant position along a pipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlantPlacement {
    pub position: Coordinate,
    pub spacing: PlantSpacingSpec,
}

/// Planting zone with its own spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub boundary: Vec<Coordinate>,
    pub spacing: PlantSpacingSpec,
}

impl Zone {
    pub fn new(id: impl Into<String>, boundary: Vec<Coordinate>, spacing: PlantSpacingSpec) -> Self {
        Self {
            id: id.into(),
            boundary,
            spacing,
        }
    }

    /// Approximate area in square metres.
    pub fn area(&self) -> f64 {
        polygon_area(&self.boundary)
    }

    /// Number of plants the zone holds at its nominal spacing.
    pub fn plant_count_estimate(&self) -> usize {
        let cell = self.spacing.plant_spacing * self.spacing.row_spacing;
        if !(cell > 0.0) {
            return 0;
        }
        let count = (self.area() / cell).floor();
        if count.is_finite() && count > 0.0 {
            count as usize
        } else {
            0
        }
    }
}

/// Descriptive tag of an exclusion area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExclusionCategory {
    Building,
    Road,
    Water,
    Rock,
    #[default]
    Other,
}

/// Region in which no plants or branch end points may be placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionArea {
    pub id: String,
    #[serde(default)]
    pub category: ExclusionCategory,
    pub boundary: Vec<Coordinate>,
}

impl ExclusionArea {
    pub fn new(id: impl Into<String>, category: ExclusionCategory, boundary: Vec<Coordinate>) -> Self {
        Self {
            id: id.into(),
            category,
            boundary,
        }
    }
}

/// Pipe leaving the pump towards a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainPipe {
    pub id: String,
    pub source: Coordinate,
    pub destination_zone_id: String,
    pub coordinates: Vec<Coordinate>,
    pub length: f64,
    pub diameter: f64,
}

impl MainPipe {
    pub fn new(
        id: impl Into<String>,
        source: Coordinate,
        destination_zone_id: impl Into<String>,
        coordinates: Vec<Coordinate>,
        diameter: f64,
    ) -> Self {
        let length = pipe_length(&coordinates);
        Self {
            id: id.into(),
            source,
            destination_zone_id: destination_zone_id.into(),
            coordinates,
            length,
            diameter,
        }
    }
}

/// Which side of its sub-main a branch extends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Multiplier applied to the lateral direction.
    pub fn sign(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }

    pub fn tag(self) -> char {
        match self {
            Side::Left => 'L',
            Side::Right => 'R',
        }
    }
}

/// Lateral pipe carrying plants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchPipe {
    pub id: String,
    pub sub_main_id: String,
    pub coordinates: Vec<Coordinate>,
    pub length: f64,
    pub diameter: f64,
    /// Deviation from the sub-main direction in degrees.
    pub angle: f64,
    /// Fractional position (0 to 1) along the parent sub-main.
    pub connection_point: f64,
    pub side: Side,
    pub plants: Vec<PlantPlacement>,
}

impl BranchPipe {
    /// Position where the branch leaves its sub-main.
    pub fn origin(&self) -> Option<Coordinate> {
        self.coordinates.first().copied()
    }
}

/// Sub-main pipe together with its generated branches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubMainPipe {
    pub id: String,
    pub zone_id: String,
    pub coordinates: Vec<Coordinate>,
    pub length: f64,
    pub diameter: f64,
    pub branches: Vec<BranchPipe>,
}

impl SubMainPipe {
    /// Creates a sub-main without branches.
    pub fn new(
        id: impl Into<String>,
        zone_id: impl Into<String>,
        coordinates: Vec<Coordinate>,
        diameter: f64,
    ) -> Self {
        let length = pipe_length(&coordinates);
        Self {
            id: id.into(),
            zone_id: zone_id.into(),
            coordinates,
            length,
            diameter,
            branches: Vec::new(),
        }
    }

    pub fn plant_count(&self) -> usize {
        self.branches.iter().map(|b| b.plants.len()).sum()
    }
}
