mod dates;
mod persistence;
mod provider;

pub use dates::{
    format_date, is_weekday, nearest_weekday, parse_date, to_date_label, DATE_FORMAT,
};
pub use persistence::{load_catalog, load_selection, parse_catalog, save_catalog, save_selection};
pub use provider::{CatalogProvider, InMemoryCatalog, JsonDirCatalog};
