//! Geometric layout engine for irrigation networks.
//!
//! Given a hand-drawn sub-main, a target polygon, plant spacing and exclusion
//! areas, the engine derives perpendicular branch pipes reaching the boundary
//! and the plant positions along every branch. All computations are pure and
//! deterministic.

pub mod boundary;
pub mod branch;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod io;
pub mod network;
pub mod placement;
pub mod polygon;
pub mod polyline;
pub mod projection;
pub mod stats;

pub use config::LayoutConfig;
pub use engine::{LayoutEngine, LayoutRequest, LayoutResult};
pub use error::{Diagnostic, LayoutError};
