pub mod constants;
pub mod distance;
pub mod greedy;
pub mod local_search;
pub mod search;

pub use constants::*;
pub use distance::{
    distance, distance_with, load_distance_config, nutrient_penalty, DistanceConfig,
    NutrientGroup, Tolerance,
};
pub use greedy::greedy_construct;
pub use local_search::{local_search, LocalSearchOutcome};
pub use search::{optimize, OptimizeOptions, SearchContext};
