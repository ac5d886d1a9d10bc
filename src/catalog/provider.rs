use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::debug;

use crate::catalog::dates::{format_date, DATE_FORMAT};
use crate::catalog::persistence::load_catalog;
use crate::error::{OptimizerError, Result};
use crate::models::MenuItem;

/// Source of daily menu catalogs.
pub trait CatalogProvider {
    /// Items offered on `date`. Fails with [`OptimizerError::CatalogNotFound`]
    /// when no catalog exists for that day.
    fn get_catalog(&self, date: NaiveDate) -> Result<Vec<MenuItem>>;

    /// Days with a catalog, oldest first.
    fn available_dates(&self) -> Result<Vec<NaiveDate>>;
}

/// Catalogs stored one file per day as `<root>/<YYYY-MM-DD>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirCatalog {
    root: PathBuf,
}

impl JsonDirCatalog {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.root.join(format!("{}.json", format_date(date)))
    }
}

impl CatalogProvider for JsonDirCatalog {
    fn get_catalog(&self, date: NaiveDate) -> Result<Vec<MenuItem>> {
        let path = self.path_for(date);
        if !path.exists() {
            return Err(OptimizerError::CatalogNotFound(date));
        }

        let items = load_catalog(&path)?;
        debug!(path = %path.display(), menus = items.len(), "catalog loaded");
        Ok(items)
    }

    fn available_dates(&self) -> Result<Vec<NaiveDate>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut dates = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(stem) = file_name.to_str().and_then(|n| n.strip_suffix(".json")) else {
                continue;
            };
            if let Ok(date) = NaiveDate::parse_from_str(stem, DATE_FORMAT) {
                dates.push(date);
            }
        }

        dates.sort();
        Ok(dates)
    }
}

/// Catalogs held in memory, keyed by day.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    days: BTreeMap<NaiveDate, Vec<MenuItem>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, date: NaiveDate, items: Vec<MenuItem>) {
        self.days.insert(date, items);
    }

    pub fn with_day(mut self, date: NaiveDate, items: Vec<MenuItem>) -> Self {
        self.insert(date, items);
        self
    }
}

impl CatalogProvider for InMemoryCatalog {
    fn get_catalog(&self, date: NaiveDate) -> Result<Vec<MenuItem>> {
        self.days
            .get(&date)
            .cloned()
            .ok_or(OptimizerError::CatalogNotFound(date))
    }

    fn available_dates(&self) -> Result<Vec<NaiveDate>> {
        Ok(self.days.keys().copied().collect())
    }
}
