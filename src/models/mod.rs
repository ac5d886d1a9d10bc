mod menu;
mod nutrition;
mod result;
mod selection;

pub use menu::MenuItem;
pub use nutrition::Nutrition;
pub use result::{OptimizationResult, RunSummary, SelectionWarning};
pub use selection::{MenuState, SelectionState};
