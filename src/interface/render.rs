use chrono::NaiveDate;

use crate::catalog::{format_date, to_date_label};
use crate::models::{MenuItem, MenuState, Nutrition, OptimizationResult, SelectionState};
use crate::optimizer::constants::nutrient_label;

fn name_width<'a, I: Iterator<Item = &'a MenuItem>>(items: I) -> usize {
    items.map(|m| m.name.chars().count()).max().unwrap_or(10)
}

fn value_columns(nutrition: &Nutrition, keys: &[&str]) -> String {
    keys.iter()
        .map(|k| format!("{}:{:>7.1}", nutrient_label(k), nutrition.get(k)))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Display an optimization result in a formatted table.
pub fn display_result(result: &OptimizationResult) {
    for warning in &result.warnings {
        println!("! {}", warning);
    }

    if result.is_empty() {
        println!("No menus selected (nothing improves on an empty tray).");
        return;
    }

    let keys: Vec<&str> = result.target.keys().collect();
    let width = name_width(result.selected_items());

    println!();
    println!("=== Selected Menus ===");
    println!();

    for (i, item) in result.selected_items().enumerate() {
        let tag = if i < result.fixed_items.len() {
            "[fixed]"
        } else {
            "       "
        };
        let pad = width.saturating_sub(item.name.chars().count());
        println!(
            "{:>3}. {} {}{}  {}",
            i + 1,
            tag,
            item.name,
            " ".repeat(pad),
            value_columns(&item.nutrition, &keys)
        );
    }

    println!();
    println!("--- Totals ---");
    let difference = result.difference();
    for key in &keys {
        let target = result.target.get(key);
        let actual = result.total_nutrition.get(key);
        let diff = difference.get(key);
        let pct = if target > 0.0 {
            format!(" ({:+.0}%)", diff / target * 100.0)
        } else {
            String::new()
        };
        let floor = result.minimum_limits.get(key);
        println!(
            "{:<6} {:>8.1} / {:>8.1}  {:+8.1}{}  fixed: {:.1}",
            nutrient_label(key),
            actual,
            target,
            diff,
            pct,
            floor
        );
    }

    println!();
    println!("Fixed menus: {}", result.fixed_items.len());
    println!("Added menus: {}", result.additional_items.len());
    println!("Distance: {:.3}", result.distance);
    println!();
}

/// Display a day's catalog with each item's selection state.
pub fn display_menu_list(items: &[MenuItem], date: NaiveDate, selection: &SelectionState) {
    if items.is_empty() {
        println!("{}: (no menus)", to_date_label(date));
        return;
    }

    println!();
    println!(
        "=== {} {} ({} menus) ===",
        format_date(date),
        to_date_label(date),
        items.len()
    );
    println!();

    for item in items {
        let marker = match selection.state_of(&item.name) {
            MenuState::Fixed => "[fixed]   ",
            MenuState::Excluded => "[excluded]",
            MenuState::Normal => "          ",
        };
        let values: Vec<String> = item
            .nutrition
            .iter()
            .map(|(k, v)| format!("{}:{}", nutrient_label(k), v))
            .collect();
        println!("  {} {} - {}", marker, item.name, values.join(" "));
    }

    println!();
}

/// Display the days that have a catalog.
pub fn display_dates(dates: &[NaiveDate]) {
    if dates.is_empty() {
        println!("No menu catalogs available.");
        return;
    }

    println!("Available dates:");
    for date in dates {
        println!("  {} {}", format_date(*date), to_date_label(*date));
    }
}
