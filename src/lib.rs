pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod optimizer;

pub use error::{OptimizerError, Result};
pub use models::{MenuItem, Nutrition, OptimizationResult, SelectionState};
pub use optimizer::{optimize, DistanceConfig, OptimizeOptions};
