use thiserror::Error;

/// Reasons an input is rejected at the engine boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("{context} contains a non-finite coordinate")]
    NonFiniteCoordinate { context: String },
    #[error("{context} needs at least {required} points, got {found}")]
    TooFewPoints {
        context: String,
        required: usize,
        found: usize,
    },
    #[error("{context} has no plant spacing")]
    MissingSpacing { context: String },
    #[error("{name} must be a positive finite number, got {value}")]
    InvalidSpacing { name: &'static str, value: f64 },
    #[error("branch angle {0} is outside 0..=180 degrees")]
    AngleOutOfRange(f64),
}

/// Record of an input that was skipped during a layout run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Sub-main the message refers to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_main_id: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(sub_main_id: Option<&str>, err: &LayoutError) -> Self {
        Self {
            sub_main_id: sub_main_id.map(str::to_string),
            message: err.to_string(),
        }
    }
}
