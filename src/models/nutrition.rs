use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::MenuItem;

/// Nutrient values keyed by nutrient name.
///
/// Used for per-item values, caller targets and accumulated totals alike.
/// Missing keys read as 0. Keys are kept ordered so rendering and
/// serialization are stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Nutrition(BTreeMap<String, f64>);

impl Nutrition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `key`, or 0 when absent.
    #[inline]
    pub fn get(&self, key: &str) -> f64 {
        self.0.get(key).copied().unwrap_or(0.0)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add every entry of `other` into `self`.
    pub fn accumulate(&mut self, other: &Nutrition) {
        for (key, value) in &other.0 {
            *self.0.entry(key.clone()).or_insert(0.0) += value;
        }
    }

    /// Entry-wise sum of two maps as a new value.
    pub fn plus(&self, other: &Nutrition) -> Nutrition {
        let mut total = self.clone();
        total.accumulate(other);
        total
    }

    /// Sum nutrition across menu items.
    pub fn total_of<'a, I>(items: I) -> Nutrition
    where
        I: IntoIterator<Item = &'a MenuItem>,
    {
        let mut total = Nutrition::new();
        for item in items {
            total.accumulate(&item.nutrition);
        }
        total
    }

    /// One entry per key of `keys`, read from `self` (0 when absent).
    pub fn project_onto(&self, keys: &Nutrition) -> Nutrition {
        keys.keys().map(|k| (k, self.get(k))).collect()
    }

    /// `self - target` for every key of `target`.
    pub fn difference_from(&self, target: &Nutrition) -> Nutrition {
        target
            .iter()
            .map(|(k, t)| (k, self.get(k) - t))
            .collect()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Nutrition {
    fn from_iter<T: IntoIterator<Item = (K, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<'de> Deserialize<'de> for Nutrition {
    /// Scraped catalogs keep unparseable cells as strings; anything that is
    /// not a finite number is dropped and therefore reads as 0. A value that
    /// is not an object at all (`null`, `"-"`) reads as an empty map.
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let serde_json::Value::Object(raw) = serde_json::Value::deserialize(deserializer)? else {
            return Ok(Nutrition::new());
        };
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_f64()
                    .filter(|v| v.is_finite())
                    .map(|v| (key, v))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_zero() {
        let n: Nutrition = [("energy", 300.0)].into_iter().collect();
        assert_eq!(n.get("energy"), 300.0);
        assert_eq!(n.get("protein"), 0.0);
    }

    #[test]
    fn test_accumulate_merges_keys() {
        let mut a: Nutrition = [("energy", 300.0), ("protein", 20.0)].into_iter().collect();
        let b: Nutrition = [("energy", 400.0), ("fat", 12.0)].into_iter().collect();
        a.accumulate(&b);

        assert_eq!(a.get("energy"), 700.0);
        assert_eq!(a.get("protein"), 20.0);
        assert_eq!(a.get("fat"), 12.0);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_non_numeric_values_dropped() {
        let json = r#"{"エネルギー": 512, "たんぱく質": 21.5, "アレルゲン": "小麦", "塩分": null}"#;
        let n: Nutrition = serde_json::from_str(json).unwrap();

        assert_eq!(n.len(), 2);
        assert_eq!(n.get("エネルギー"), 512.0);
        assert_eq!(n.get("アレルゲン"), 0.0);
    }

    #[test]
    fn test_non_object_reads_empty() {
        for json in ["null", r#""-""#, "42", "[1, 2]"] {
            let n: Nutrition = serde_json::from_str(json).unwrap();
            assert!(n.is_empty(), "{} should read as empty", json);
        }
    }

    #[test]
    fn test_project_and_difference_follow_target_keys() {
        let totals: Nutrition = [("energy", 650.0), ("fat", 30.0)].into_iter().collect();
        let target: Nutrition = [("energy", 700.0), ("protein", 25.0)].into_iter().collect();

        let projected = totals.project_onto(&target);
        assert_eq!(projected.len(), 2);
        assert_eq!(projected.get("protein"), 0.0);

        let diff = totals.difference_from(&target);
        assert_eq!(diff.get("energy"), -50.0);
        assert_eq!(diff.get("protein"), -25.0);
        assert!(!diff.contains_key("fat"));
    }
}
