//! Validated entry point turning a layout request into a pipe network.

use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::branch::generate_branch_pipes;
use crate::config::LayoutConfig;
use crate::error::{Diagnostic, LayoutError};
use crate::geometry::Coordinate;
use crate::network::{ExclusionArea, MainPipe, PlantSpacingSpec, SubMainPipe, Zone};
use crate::stats::{network_statistics, NetworkStatistics};

fn default_sub_main_diameter() -> f64 {
    32.0
}

fn default_main_diameter() -> f64 {
    50.0
}

/// Hand-drawn sub-main supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubMainInput {
    pub id: String,
    /// Zone whose boundary and spacing apply; the field is used when no zone
    /// matches.
    #[serde(default)]
    pub zone_id: String,
    pub coordinates: Vec<Coordinate>,
    #[serde(default = "default_sub_main_diameter")]
    pub diameter: f64,
}

/// Main pipe supplied by the caller; only its length is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MainPipeInput {
    pub id: String,
    pub source: Coordinate,
    pub destination_zone_id: String,
    pub coordinates: Vec<Coordinate>,
    #[serde(default = "default_main_diameter")]
    pub diameter: f64,
}

/// Everything a layout run needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutRequest {
    /// Whole-field boundary used by sub-mains without a matching zone.
    pub field: Vec<Coordinate>,
    /// Spacing used together with `field`.
    pub spacing: Option<PlantSpacingSpec>,
    pub zones: Vec<Zone>,
    pub exclusions: Vec<ExclusionArea>,
    pub sub_mains: Vec<SubMainInput>,
    pub main_pipes: Vec<MainPipeInput>,
    /// Overrides [`LayoutConfig::default_branch_angle`].
    pub branch_angle: Option<f64>,
}

/// Output of a layout run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutResult {
    pub sub_mains: Vec<SubMainPipe>,
    pub main_pipes: Vec<MainPipe>,
    pub statistics: NetworkStatistics,
    pub diagnostics: Vec<Diagnostic>,
}

impl LayoutResult {
    pub fn branch_count(&self) -> usize {
        self.sub_mains.iter().map(|s| s.branches.len()).sum()
    }

    pub fn plant_count(&self) -> usize {
        self.sub_mains.iter().map(SubMainPipe::plant_count).sum()
    }
}

fn check_points(context: &str, coords: &[Coordinate], required: usize) -> Result<(), LayoutError> {
    if coords.len() < required {
        return Err(LayoutError::TooFewPoints {
            context: context.to_string(),
            required,
            found: coords.len(),
        });
    }
    if !coords.iter().all(Coordinate::is_finite) {
        return Err(LayoutError::NonFiniteCoordinate {
            context: context.to_string(),
        });
    }
    Ok(())
}

fn check_positive(name: &'static str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidSpacing { name, value })
    }
}

fn check_spacing(spacing: &PlantSpacingSpec) -> Result<(), LayoutError> {
    check_positive("plant spacing", spacing.plant_spacing)?;
    check_positive("row spacing", spacing.row_spacing)?;
    check_positive("water need", spacing.water_need)
}

fn check_angle(angle: f64) -> Result<(), LayoutError> {
    if (0.0..=180.0).contains(&angle) {
        Ok(())
    } else {
        Err(LayoutError::AngleOutOfRange(angle))
    }
}

/// Runs layouts with a fixed configuration.
///
/// The engine holds no state between runs; every call is a pure function of
/// its request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out branches and plants for every sub-main in `request`.
    ///
    /// Invalid inputs never abort the run: a bad sub-main, main pipe or
    /// exclusion is skipped and reported in [`LayoutResult::diagnostics`].
    /// An out-of-range branch angle rejects the whole request.
    pub fn run(&self, request: &LayoutRequest) -> LayoutResult {
        info!(
            "laying out {} sub-mains across {} zones",
            request.sub_mains.len(),
            request.zones.len()
        );
        let mut result = LayoutResult::default();

        let angle = request
            .branch_angle
            .unwrap_or(self.config.default_branch_angle);
        if let Err(err) = check_angle(angle) {
            warn!("request rejected: {}", err);
            result.diagnostics.push(Diagnostic::new(None, &err));
            return result;
        }

        let mut exclusions = Vec::with_capacity(request.exclusions.len());
        for area in &request.exclusions {
            match check_points(&format!("exclusion {}", area.id), &area.boundary, 3) {
                Ok(()) => exclusions.push(area.boundary.clone()),
                Err(err) => {
                    warn!("exclusion ignored: {}", err);
                    result.diagnostics.push(Diagnostic::new(None, &err));
                }
            }
        }

        let outcomes: Vec<Result<SubMainPipe, LayoutError>> = request
            .sub_mains
            .par_iter()
            .map(|input| self.layout_sub_main(input, request, &exclusions, angle))
            .collect();
        for (input, outcome) in request.sub_mains.iter().zip(outcomes) {
            match outcome {
                Ok(sub_main) => result.sub_mains.push(sub_main),
                Err(err) => {
                    warn!("sub-main {} skipped: {}", input.id, err);
                    result.diagnostics.push(Diagnostic::new(Some(&input.id), &err));
                }
            }
        }

        for input in &request.main_pipes {
            match check_points(&format!("main pipe {}", input.id), &input.coordinates, 2) {
                Ok(()) => result.main_pipes.push(MainPipe::new(
                    input.id.clone(),
                    input.source,
                    input.destination_zone_id.clone(),
                    input.coordinates.clone(),
                    input.diameter,
                )),
                Err(err) => {
                    warn!("main pipe ignored: {}", err);
                    result.diagnostics.push(Diagnostic::new(None, &err));
                }
            }
        }

        result.statistics = network_statistics(&result.sub_mains, self.config.station_method);
        info!(
            "generated {} branches with {} plants",
            result.statistics.total_branches, result.statistics.total_plants
        );
        result
    }

    fn layout_sub_main(
        &self,
        input: &SubMainInput,
        request: &LayoutRequest,
        exclusions: &[Vec<Coordinate>],
        angle: f64,
    ) -> Result<SubMainPipe, LayoutError> {
        let (target, spacing, context) = match request
            .zones
            .iter()
            .find(|z| !input.zone_id.is_empty() && z.id == input.zone_id)
        {
            Some(zone) => (&zone.boundary, Some(&zone.spacing), format!("zone {}", zone.id)),
            None => (&request.field, request.spacing.as_ref(), "field boundary".to_string()),
        };
        check_points(&format!("sub-main {}", input.id), &input.coordinates, 2)?;
        check_points(&context, target, 3)?;
        let spacing = spacing.ok_or_else(|| LayoutError::MissingSpacing {
            context: context.clone(),
        })?;
        check_spacing(spacing)?;

        let mut sub_main = SubMainPipe::new(
            input.id.clone(),
            input.zone_id.clone(),
            input.coordinates.clone(),
            input.diameter,
        );
        sub_main.branches =
            generate_branch_pipes(&sub_main, target, spacing, exclusions, angle, &self.config);
        Ok(sub_main)
    }
}
