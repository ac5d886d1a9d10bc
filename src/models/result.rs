use std::fmt;

use serde::Serialize;

use crate::models::{MenuItem, Nutrition};

/// Non-fatal problems found while applying the caller's selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum SelectionWarning {
    /// A fixed name does not exist in the day's catalog; it was dropped.
    FixedNotFound(String),
    /// A name is both fixed and excluded; it was kept as fixed.
    FixedAndExcluded(String),
}

impl fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionWarning::FixedNotFound(name) => {
                write!(f, "fixed menu '{}' is not on today's menu", name)
            }
            SelectionWarning::FixedAndExcluded(name) => {
                write!(f, "'{}' is both fixed and excluded; keeping it fixed", name)
            }
        }
    }
}

/// Outcome of one greedy + local search run of the multi-start loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunSummary {
    pub run: usize,
    pub greedy_distance: f64,
    pub final_distance: f64,
    /// Local search moves accepted in this run.
    pub moves: usize,
}

/// The optimizer's answer. Owns clones of the chosen items.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
    /// Forced items that were actually found in the catalog.
    pub fixed_items: Vec<MenuItem>,

    /// Items chosen by the optimizer.
    pub additional_items: Vec<MenuItem>,

    /// Totals over fixed and additional items.
    pub total_nutrition: Nutrition,

    pub distance: f64,

    /// Fixed items' totals, one entry per target key.
    pub minimum_limits: Nutrition,

    pub target: Nutrition,

    pub warnings: Vec<SelectionWarning>,

    pub runs: Vec<RunSummary>,
}

impl OptimizationResult {
    pub fn fixed_nutrition(&self) -> Nutrition {
        Nutrition::total_of(&self.fixed_items)
    }

    pub fn additional_nutrition(&self) -> Nutrition {
        Nutrition::total_of(&self.additional_items)
    }

    /// Actual minus target for every target key.
    pub fn difference(&self) -> Nutrition {
        self.total_nutrition.difference_from(&self.target)
    }

    /// Fixed items first, then additional ones.
    pub fn selected_items(&self) -> impl Iterator<Item = &MenuItem> {
        self.fixed_items.iter().chain(self.additional_items.iter())
    }

    pub fn len(&self) -> usize {
        self.fixed_items.len() + self.additional_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
