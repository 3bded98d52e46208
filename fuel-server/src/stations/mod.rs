//! Fuel station price catalog.
//!
//! Loads geocoded stations with their prices from a JSON file at
//! startup, validates and deduplicates them, and serves immutable
//! snapshots to planning requests. The file is reloaded periodically.

mod catalog;
mod error;
mod record;

pub use catalog::{CatalogSnapshot, StationCatalog, StationCatalogConfig};
pub use error::StationError;
pub use record::{ParsedCatalog, RecordId, StationRecord, parse_catalog};
