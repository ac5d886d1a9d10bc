use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::models::{MenuItem, Nutrition, OptimizationResult};

/// Round a float to n decimal places.
fn truncate(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn value_cells(nutrition: &Nutrition, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .map(|k| format!("{:.1}", nutrition.get(k)))
        .collect()
}

fn names(items: &[MenuItem]) -> Vec<&str> {
    items.iter().map(|m| m.name.as_str()).collect()
}

fn item_row(role: &str, item: &MenuItem, keys: &[&str]) -> Vec<String> {
    let mut row = vec![role.to_string(), item.name.clone()];
    row.extend(value_cells(&item.nutrition, keys));
    row
}

/// Write the selection as CSV: one row per menu, then totals and target.
pub fn write_result_csv(result: &OptimizationResult, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    let keys: Vec<&str> = result.target.keys().collect();

    let mut header = vec!["role".to_string(), "name".to_string()];
    header.extend(keys.iter().map(|k| k.to_string()));
    wtr.write_record(&header)?;

    for item in &result.fixed_items {
        wtr.write_record(item_row("fixed", item, &keys))?;
    }
    for item in &result.additional_items {
        wtr.write_record(item_row("additional", item, &keys))?;
    }

    let mut total = vec!["total".to_string(), String::new()];
    total.extend(value_cells(&result.total_nutrition, &keys));
    wtr.write_record(&total)?;

    let mut target = vec!["target".to_string(), String::new()];
    target.extend(value_cells(&result.target, &keys));
    wtr.write_record(&target)?;

    wtr.flush()?;
    Ok(())
}

/// Write the full result as pretty JSON.
pub fn write_result_json(result: &OptimizationResult, path: &Path) -> Result<()> {
    let json = serde_json::json!({
        "fixed": names(&result.fixed_items),
        "additional": names(&result.additional_items),
        "distance": truncate(result.distance, 6),
        "result": result,
    });

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(&json)?.as_bytes())?;
    Ok(())
}
