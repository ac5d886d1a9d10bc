use assert_float_eq::*;

use menu_optimizer_rs::logging;
use menu_optimizer_rs::models::{MenuItem, Nutrition, SelectionState, SelectionWarning};
use menu_optimizer_rs::optimizer::{distance, optimize, DistanceConfig, OptimizeOptions};

fn menus() -> Vec<MenuItem> {
    vec![
        MenuItem::with_values("A", [("energy", 300.0), ("protein", 20.0)]),
        MenuItem::with_values("B", [("energy", 400.0), ("protein", 5.0)]),
    ]
}

fn target(energy: f64, protein: f64) -> Nutrition {
    [("energy", energy), ("protein", protein)].into_iter().collect()
}

fn names(items: &[MenuItem]) -> Vec<&str> {
    items.iter().map(|m| m.name.as_str()).collect()
}

fn options(max_additional: usize) -> OptimizeOptions {
    logging::init_test();
    OptimizeOptions::default().with_max_additional(max_additional)
}

#[test]
fn test_two_items_hit_target_exactly() {
    let result = optimize(
        &menus(),
        &target(700.0, 25.0),
        &SelectionState::default(),
        &options(2),
        &DistanceConfig::default(),
    );

    assert!(result.fixed_items.is_empty());
    let mut picked = names(&result.additional_items);
    picked.sort();
    assert_eq!(picked, vec!["A", "B"]);
    assert_float_absolute_eq!(result.distance, 0.0, 1e-9);
    assert_float_absolute_eq!(result.total_nutrition.get("energy"), 700.0, 1e-9);
    assert_float_absolute_eq!(result.total_nutrition.get("protein"), 25.0, 1e-9);
}

#[test]
fn test_fixed_item_is_completed_by_optimizer() {
    let selection = SelectionState::new(["B"], Vec::<String>::new());
    let result = optimize(
        &menus(),
        &target(700.0, 25.0),
        &selection,
        &options(2),
        &DistanceConfig::default(),
    );

    assert_eq!(names(&result.fixed_items), vec!["B"]);
    assert_eq!(names(&result.additional_items), vec!["A"]);
    assert_float_absolute_eq!(result.total_nutrition.get("energy"), 700.0, 1e-9);
    assert_float_absolute_eq!(result.total_nutrition.get("protein"), 25.0, 1e-9);
    assert_float_absolute_eq!(result.distance, 0.0, 1e-9);
    assert_float_absolute_eq!(result.minimum_limits.get("energy"), 400.0, 1e-9);
    assert_float_absolute_eq!(result.minimum_limits.get("protein"), 5.0, 1e-9);
}

#[test]
fn test_excluded_item_and_ignored_protein_surplus() {
    let selection = SelectionState::new(Vec::<String>::new(), ["B"]);
    let result = optimize(
        &menus(),
        &target(400.0, 5.0),
        &selection,
        &options(2),
        &DistanceConfig::default(),
    );

    assert!(result.fixed_items.is_empty());
    assert_eq!(names(&result.additional_items), vec!["A"]);
    // Energy 100 short with a 20% under-tolerance; protein surplus is not scored.
    assert_float_absolute_eq!(result.distance, 1.5625, 1e-9);
}

#[test]
fn test_missing_fixed_name_is_reported() {
    let selection = SelectionState::new(["Z"], Vec::<String>::new());
    let result = optimize(
        &menus(),
        &target(700.0, 25.0),
        &selection,
        &options(2),
        &DistanceConfig::default(),
    );

    assert!(result.fixed_items.is_empty());
    assert_eq!(
        result.warnings,
        vec![SelectionWarning::FixedNotFound("Z".to_string())]
    );
    assert_eq!(result.additional_items.len(), 2);
}

#[test]
fn test_empty_target_selects_nothing() {
    let result = optimize(
        &menus(),
        &Nutrition::new(),
        &SelectionState::default(),
        &options(2),
        &DistanceConfig::default(),
    );

    assert!(result.additional_items.is_empty());
    assert_float_absolute_eq!(result.distance, 0.0, 1e-12);
    assert!(result.minimum_limits.is_empty());
}

#[test]
fn test_overlapping_selection_keeps_item_fixed() {
    let selection = SelectionState::new(["A"], ["A"]);
    let result = optimize(
        &menus(),
        &target(700.0, 25.0),
        &selection,
        &options(2),
        &DistanceConfig::default(),
    );

    assert_eq!(names(&result.fixed_items), vec!["A"]);
    assert_eq!(names(&result.additional_items), vec!["B"]);
    assert_eq!(
        result.warnings,
        vec![SelectionWarning::FixedAndExcluded("A".to_string())]
    );
}

#[test]
fn test_zero_max_additional_returns_fixed_only() {
    let selection = SelectionState::new(["A"], Vec::<String>::new());
    let target = target(700.0, 25.0);
    let result = optimize(
        &menus(),
        &target,
        &selection,
        &options(0),
        &DistanceConfig::default(),
    );

    assert_eq!(names(&result.fixed_items), vec!["A"]);
    assert!(result.additional_items.is_empty());
    let fixed_only = distance(&target, &result.fixed_nutrition(), &DistanceConfig::default());
    assert_float_absolute_eq!(result.distance, fixed_only, 1e-12);
}

#[test]
fn test_empty_catalog() {
    let result = optimize(
        &[],
        &target(700.0, 25.0),
        &SelectionState::default(),
        &options(5),
        &DistanceConfig::default(),
    );

    assert!(result.is_empty());
    // Both nutrients fully missing: energy (700/140)^2 = 25, protein (25/2.5)^2 = 100.
    assert_float_absolute_eq!(result.distance, 62.5, 1e-9);
}

#[test]
fn test_temporary_exclusion_leaves_saved_state_alone() {
    let saved = SelectionState::default();
    let effective = saved.with_temporary_exclusions(["A"]);
    let result = optimize(
        &menus(),
        &target(700.0, 25.0),
        &effective,
        &options(2),
        &DistanceConfig::default(),
    );

    assert_eq!(names(&result.additional_items), vec!["B"]);
    assert!(saved.is_empty());
}

#[test]
fn test_same_inputs_same_result() {
    let catalog = menus();
    let target = target(650.0, 30.0);
    let selection = SelectionState::default();
    let options = OptimizeOptions::default().with_multi_start(4).with_seed(7);
    let config = DistanceConfig::default();

    let first = optimize(&catalog, &target, &selection, &options, &config);
    let second = optimize(&catalog, &target, &selection, &options, &config);
    assert_eq!(first, second);
}
