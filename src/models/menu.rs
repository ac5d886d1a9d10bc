use serde::{Deserialize, Serialize};

use crate::models::Nutrition;

/// A dish offered on a given day.
///
/// The name is the only identifier; it must be unique within a day's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,

    #[serde(default)]
    pub nutrition: Nutrition,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, nutrition: Nutrition) -> Self {
        Self {
            name: name.into(),
            nutrition,
        }
    }

    /// Build an item from `(key, value)` pairs.
    pub fn with_values<'a, I>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        Self::new(name, values.into_iter().collect())
    }
}
