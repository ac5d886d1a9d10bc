use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::Result;
use crate::models::{MenuItem, SelectionState};

/// Shapes a day's catalog file may take.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    /// Scraper output: `{"dateLabel": "1/12(月)", "count": 2, "menus": [...]}`.
    Day { menus: Vec<MenuItem> },
    Items(Vec<MenuItem>),
}

/// Parse a catalog from JSON text.
///
/// Deduplicates by name (last occurrence wins, first position kept).
pub fn parse_catalog(content: &str) -> Result<Vec<MenuItem>> {
    let items = match serde_json::from_str(content)? {
        CatalogFile::Day { menus } => menus,
        CatalogFile::Items(items) => items,
    };
    Ok(dedupe_by_name(items))
}

/// Load a catalog from a JSON file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<MenuItem>> {
    let content = fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Save a catalog as a JSON array.
pub fn save_catalog<P: AsRef<Path>>(path: P, items: &[MenuItem]) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    fs::write(path, json)?;
    Ok(())
}

fn dedupe_by_name(items: Vec<MenuItem>) -> Vec<MenuItem> {
    let mut position: HashMap<String, usize> = HashMap::new();
    let mut deduped: Vec<MenuItem> = Vec::with_capacity(items.len());

    for item in items {
        match position.get(&item.name) {
            Some(&idx) => {
                warn!(menu = %item.name, "duplicate menu name in catalog, keeping last entry");
                deduped[idx] = item;
            }
            None => {
                position.insert(item.name.clone(), deduped.len());
                deduped.push(item);
            }
        }
    }

    deduped
}

/// Load a saved selection state.
pub fn load_selection<P: AsRef<Path>>(path: P) -> Result<SelectionState> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save a selection state as pretty JSON.
pub fn save_selection<P: AsRef<Path>>(path: P, selection: &SelectionState) -> Result<()> {
    let json = serde_json::to_string_pretty(selection)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_scraper_day_file() {
        let json = r#"{
            "dateLabel": "1/12(月)",
            "count": 2,
            "menus": [
                {"name": "日替わり定食", "nutrition": {"エネルギー": 720, "たんぱく質": 28.4}},
                {"name": "味噌汁", "nutrition": {"エネルギー": 35, "食塩相当量": "-"}}
            ]
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let items = load_catalog(file.path()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "日替わり定食");
        assert_eq!(items[1].nutrition.len(), 1);
    }

    #[test]
    fn test_load_plain_array_and_save_roundtrip() {
        let json = r#"[{"name": "Curry", "nutrition": {"energy": 800}}]"#;
        let items = parse_catalog(json).unwrap();

        let out_file = NamedTempFile::new().unwrap();
        save_catalog(out_file.path(), &items).unwrap();

        let reloaded = load_catalog(out_file.path()).unwrap();
        assert_eq!(reloaded, items);
    }

    #[test]
    fn test_deduplication() {
        let json = r#"[
            {"name": "Curry", "nutrition": {"energy": 800}},
            {"name": "Salad", "nutrition": {"energy": 90}},
            {"name": "Curry", "nutrition": {"energy": 760}}
        ]"#;

        let items = parse_catalog(json).unwrap();
        assert_eq!(items.len(), 2);
        // Last occurrence wins, first position kept
        assert_eq!(items[0].name, "Curry");
        assert_eq!(items[0].nutrition.get("energy"), 760.0);
    }

    #[test]
    fn test_row_without_nutrition_object_is_kept() {
        let json = r#"[
            {"name": "Curry", "nutrition": {"energy": 800}},
            {"name": "Dessert", "nutrition": null},
            {"name": "Tea", "nutrition": "-"}
        ]"#;

        let items = parse_catalog(json).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].nutrition.get("energy"), 800.0);
        assert!(items[1].nutrition.is_empty());
        assert!(items[2].nutrition.is_empty());
    }

    #[test]
    fn test_malformed_catalog_is_an_error() {
        assert!(parse_catalog(r#"{"menus": 3}"#).is_err());
        assert!(parse_catalog("null").is_err());
    }

    #[test]
    fn test_selection_roundtrip() {
        let mut selection = SelectionState::default();
        selection.set_fixed("Soup");
        selection.set_excluded("Cake");

        let file = NamedTempFile::new().unwrap();
        save_selection(file.path(), &selection).unwrap();

        let reloaded = load_selection(file.path()).unwrap();
        assert_eq!(reloaded, selection);
    }
}
