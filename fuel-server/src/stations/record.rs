//! Catalog file records and their validation into domain stations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Coordinates, DomainError, FuelStation, StationId};

use super::error::StationError;

/// Station id as it appears in the file: text or a bare number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Text(String),
    Number(u64),
}

impl RecordId {
    fn to_text(&self) -> String {
        match self {
            RecordId::Text(s) => s.clone(),
            RecordId::Number(n) => n.to_string(),
        }
    }
}

/// One geocoded station row from the catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub truckstop_id: RecordId,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    pub price_per_gallon: f64,
}

impl StationRecord {
    /// Validate into a domain station.
    pub fn to_station(&self) -> Result<FuelStation, DomainError> {
        let id = StationId::parse(&self.truckstop_id.to_text())?;
        let position = Coordinates::new(self.latitude, self.longitude)?;
        FuelStation::new(
            id,
            self.name.trim(),
            self.address.trim(),
            self.city.trim(),
            self.state.trim(),
            position,
            self.price_per_gallon,
        )
    }
}

/// Result of parsing a catalog file.
#[derive(Debug, Clone)]
pub struct ParsedCatalog {
    /// Valid stations, one per id, sorted by id.
    pub stations: Vec<FuelStation>,

    /// Records rejected by validation.
    pub rejected: usize,

    /// Records dropped as pricier duplicates of another id.
    pub duplicates: usize,
}

/// Parse catalog JSON: an array of [`StationRecord`].
///
/// Invalid records are skipped with a warning. When an id appears more
/// than once the cheapest price wins.
pub fn parse_catalog(json: &str) -> Result<ParsedCatalog, StationError> {
    let records: Vec<StationRecord> =
        serde_json::from_str(json).map_err(|e| StationError::Json {
            message: e.to_string(),
        })?;

    let mut rejected = 0;
    let mut duplicates = 0;
    let mut by_id: HashMap<StationId, FuelStation> = HashMap::new();

    for record in &records {
        let station = match record.to_station() {
            Ok(s) => s,
            Err(e) => {
                warn!(id = ?record.truckstop_id, name = %record.name, error = %e, "skipping station record");
                rejected += 1;
                continue;
            }
        };

        match by_id.get(&station.id) {
            Some(existing) if existing.price_per_gallon() <= station.price_per_gallon() => {
                duplicates += 1;
            }
            Some(_) => {
                duplicates += 1;
                by_id.insert(station.id.clone(), station);
            }
            None => {
                by_id.insert(station.id.clone(), station);
            }
        }
    }

    let mut stations: Vec<FuelStation> = by_id.into_values().collect();
    stations.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(ParsedCatalog {
        stations,
        rejected,
        duplicates,
    })
}
