use std::collections::HashMap;
use std::sync::LazyLock;

// ─────────────────────────────────────────────────────────────────────────────
// Distance metric defaults
// ─────────────────────────────────────────────────────────────────────────────

/// Surplus-averse nutrients: tolerated surplus as a fraction of the target.
pub const SURPLUS_AVERSE_OVER_TOLERANCE: f64 = 0.10;
/// Surplus-averse nutrients: tolerated deficit as a fraction of the target.
pub const SURPLUS_AVERSE_UNDER_TOLERANCE: f64 = 0.20;

pub const DEFICIT_AVERSE_OVER_TOLERANCE: f64 = 0.20;
pub const DEFICIT_AVERSE_UNDER_TOLERANCE: f64 = 0.10;

/// Unclassified nutrients use a symmetric band.
pub const NEUTRAL_TOLERANCE: f64 = 0.15;

/// Exponent applied to each normalized error.
pub const DEFAULT_DISTANCE_POWER: f64 = 2.0;

/// Lower bound on a tolerance band so near-zero targets never divide by zero.
pub const SCALE_EPSILON: f64 = 1e-6;

// ─────────────────────────────────────────────────────────────────────────────
// Search limits
// ─────────────────────────────────────────────────────────────────────────────

/// Default cap on items picked beyond the fixed ones.
pub const DEFAULT_MAX_ADDITIONAL: usize = 10;

/// Default number of greedy + local search runs.
pub const DEFAULT_MULTI_START: usize = 3;

/// Default seed for the randomized runs.
pub const DEFAULT_SEED: u64 = 42;

/// Upper bound on local search passes per run.
pub const MAX_LOCAL_SEARCH_PASSES: usize = 20;

/// A move must beat the current distance by more than this to count.
pub const IMPROVEMENT_EPSILON: f64 = 1e-12;

/// Candidates scoring within this window of the best are considered tied.
pub const TIE_EPSILON: f64 = 1e-12;

// ─────────────────────────────────────────────────────────────────────────────
// Nutrient keys
// ─────────────────────────────────────────────────────────────────────────────

/// Keys that are penalized harder above target than below.
pub const SURPLUS_AVERSE_KEYS: &[&str] = &[
    "energy",
    "fat",
    "carbohydrate",
    "エネルギー",
    "脂質",
    "炭水化物",
];

/// Keys that are penalized harder below target than above.
pub const DEFICIT_AVERSE_KEYS: &[&str] = &["protein", "vegetable_weight", "たんぱく質", "野菜重量"];

/// Targets offered when prompting, keyed by the labels the scraped catalog uses.
pub const DEFAULT_TARGETS: &[(&str, f64)] = &[
    ("エネルギー", 650.0),
    ("たんぱく質", 30.0),
    ("脂質", 25.0),
    ("炭水化物", 95.0),
    ("野菜重量", 120.0),
];

/// Map from nutrient key to a one-letter column label.
pub static NUTRIENT_LABELS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    m.insert("energy", "E");
    m.insert("protein", "P");
    m.insert("fat", "F");
    m.insert("carbohydrate", "C");
    m.insert("vegetable_weight", "V");
    m.insert("エネルギー", "E");
    m.insert("たんぱく質", "P");
    m.insert("脂質", "F");
    m.insert("炭水化物", "C");
    m.insert("野菜重量", "V");
    m
});

/// Short label for a nutrient key, falling back to the key itself.
pub fn nutrient_label(key: &str) -> &str {
    NUTRIENT_LABELS.get(key).copied().unwrap_or(key)
}
