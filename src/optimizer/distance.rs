use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Nutrition;
use crate::optimizer::constants::*;

/// How a nutrient's error is weighted above vs. below target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientGroup {
    /// Surplus hurts more than deficit (energy, fat, carbohydrate).
    SurplusAverse,
    /// Deficit hurts more than surplus (protein, vegetables).
    DeficitAverse,
    Neutral,
}

/// Tolerance band for one nutrient group, as fractions of the target value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub over: f64,
    pub under: f64,

    /// Any surplus contributes nothing and is left out of the average.
    #[serde(default)]
    pub ignore_surplus: bool,

    /// Any deficit contributes nothing and is left out of the average.
    #[serde(default)]
    pub ignore_deficit: bool,
}

impl Tolerance {
    pub fn new(over: f64, under: f64) -> Self {
        Self {
            over,
            under,
            ignore_surplus: false,
            ignore_deficit: false,
        }
    }

    pub fn symmetric(band: f64) -> Self {
        Self::new(band, band)
    }

    pub fn ignoring_surplus(mut self) -> Self {
        self.ignore_surplus = true;
        self
    }
}

/// Parameters of the distance metric.
///
/// Nutrient keys absent from `groups` are scored as [`NutrientGroup::Neutral`].
/// When loaded from JSON, any omitted field keeps its default; a provided
/// `groups` table replaces the default one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceConfig {
    pub groups: HashMap<String, NutrientGroup>,
    pub surplus_averse: Tolerance,
    pub deficit_averse: Tolerance,
    pub neutral: Tolerance,
    pub power: f64,
    pub epsilon: f64,
}

impl Default for DistanceConfig {
    fn default() -> Self {
        let mut groups = HashMap::new();
        for key in SURPLUS_AVERSE_KEYS {
            groups.insert(key.to_string(), NutrientGroup::SurplusAverse);
        }
        for key in DEFICIT_AVERSE_KEYS {
            groups.insert(key.to_string(), NutrientGroup::DeficitAverse);
        }

        Self {
            groups,
            surplus_averse: Tolerance::new(
                SURPLUS_AVERSE_OVER_TOLERANCE,
                SURPLUS_AVERSE_UNDER_TOLERANCE,
            ),
            deficit_averse: Tolerance::new(
                DEFICIT_AVERSE_OVER_TOLERANCE,
                DEFICIT_AVERSE_UNDER_TOLERANCE,
            )
            .ignoring_surplus(),
            neutral: Tolerance::symmetric(NEUTRAL_TOLERANCE),
            power: DEFAULT_DISTANCE_POWER,
            epsilon: SCALE_EPSILON,
        }
    }
}

impl DistanceConfig {
    /// Classify (or reclassify) a nutrient key.
    pub fn with_group(mut self, key: impl Into<String>, group: NutrientGroup) -> Self {
        self.groups.insert(key.into(), group);
        self
    }

    pub fn group_of(&self, key: &str) -> NutrientGroup {
        self.groups
            .get(key)
            .copied()
            .unwrap_or(NutrientGroup::Neutral)
    }

    pub fn tolerance_for(&self, key: &str) -> &Tolerance {
        match self.group_of(key) {
            NutrientGroup::SurplusAverse => &self.surplus_averse,
            NutrientGroup::DeficitAverse => &self.deficit_averse,
            NutrientGroup::Neutral => &self.neutral,
        }
    }
}

/// Load a distance configuration from a JSON file.
pub fn load_distance_config<P: AsRef<Path>>(path: P) -> Result<DistanceConfig> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Penalty for a single nutrient, or `None` when its error direction is ignored.
///
/// Non-positive targets fall back to the raw absolute error.
pub fn nutrient_penalty(key: &str, target: f64, actual: f64, config: &DistanceConfig) -> Option<f64> {
    let error = actual - target;
    if target <= 0.0 {
        return Some(error.abs());
    }

    let tolerance = config.tolerance_for(key);
    if (error > 0.0 && tolerance.ignore_surplus) || (error < 0.0 && tolerance.ignore_deficit) {
        return None;
    }

    let band = if error >= 0.0 {
        tolerance.over
    } else {
        tolerance.under
    };
    let scale = (target * band).max(config.epsilon);
    Some((error / scale).abs().powf(config.power))
}

/// Score how far `actual` is from `target`. 0 is an exact match.
///
/// Averages per-nutrient penalties over the nutrients that contributed; keys
/// outside `target` play no role.
pub fn distance(target: &Nutrition, actual: &Nutrition, config: &DistanceConfig) -> f64 {
    distance_with(target, config, |key| actual.get(key))
}

/// [`distance`] with totals supplied by a lookup, so callers can score a
/// candidate set without materializing its totals.
pub fn distance_with<F>(target: &Nutrition, config: &DistanceConfig, actual: F) -> f64
where
    F: Fn(&str) -> f64,
{
    let mut sum = 0.0;
    let mut counted = 0usize;

    for (key, t) in target.iter() {
        if let Some(penalty) = nutrient_penalty(key, t, actual(key), config) {
            sum += penalty;
            counted += 1;
        }
    }

    if counted == 0 {
        0.0
    } else {
        sum / counted as f64
    }
}
