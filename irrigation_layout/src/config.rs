//! Tunable parameters of a layout run.

use crate::boundary::BoundarySearch;
use crate::stats::StationMethod;

/// Branch angle used when a request does not override it, in degrees.
pub const DEFAULT_BRANCH_ANGLE: f64 = 90.0;
/// Nominal branch pipe diameter in millimetres.
pub const DEFAULT_BRANCH_DIAMETER_MM: f64 = 16.0;

/// Settings shared by every sub-main in a run.
///
/// Missing fields in a JSON document fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Deviation of branches from their sub-main in degrees (0 to 180).
    pub default_branch_angle: f64,
    /// Diameter recorded on generated branches.
    pub branch_diameter_mm: f64,
    pub boundary: BoundarySearch,
    /// How stations along a pipe are measured for statistics.
    pub station_method: StationMethod,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_branch_angle: DEFAULT_BRANCH_ANGLE,
            branch_diameter_mm: DEFAULT_BRANCH_DIAMETER_MM,
            boundary: BoundarySearch::default(),
            station_method: StationMethod::default(),
        }
    }
}

impl LayoutConfig {
    /// Saves this configuration to a JSON file.
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Loads a configuration from a JSON file.
    pub fn load(path: &str) -> std::io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let config: LayoutConfig = serde_json::from_str(&data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let path = path.to_str().unwrap();
        let config = LayoutConfig {
            default_branch_angle: 75.0,
            station_method: StationMethod::Projected,
            ..LayoutConfig::default()
        };
        config.save(path).unwrap();
        assert_eq!(LayoutConfig::load(path).unwrap(), config);
    }

    #[test]
    fn partial_document_uses_defaults() {
        let config: LayoutConfig =
            serde_json::from_str(r#"{"boundary": {"max_search": 200.0}}"#).unwrap();
        assert_eq!(config.boundary.max_search, 200.0);
        assert_eq!(config.boundary.precision, 0.1);
        assert_eq!(config.default_branch_angle, DEFAULT_BRANCH_ANGLE);
        assert_eq!(config.station_method, StationMethod::NearestVertex);
    }

    #[test]
    fn invalid_document_is_invalid_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        let err = LayoutConfig::load(path.to_str().unwrap()).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }
}
