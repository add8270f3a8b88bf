use crate::error::{CleanerError, Result};
use crate::normalize::rules;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// One source row, typed but not yet cleaned. Blank cells are already absent;
/// the date and coordinate columns are coerced while loading, unparseable
/// values degrading to absent rather than failing the run.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub name: Option<String>,
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub postal_code: Option<String>,
    pub city_name: Option<String>,
    pub phone: Option<String>,
    pub maintenance_frequency: Option<String>,
    pub last_maintenance_date: Option<NaiveDate>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// The ten columns the pipeline consumes, as named by the open-data portal.
pub const SOURCE_COLUMNS: [&str; 10] = [
    "nom",
    "adr_num",
    "adr_voie",
    "com_cp",
    "com_nom",
    "tel1",
    "freq_mnt",
    "dermnt",
    "lat_coor1",
    "long_coor1",
];

/// Raw CSV row as shipped by the portal. Everything is text at this point;
/// columns outside [`SOURCE_COLUMNS`] are ignored.
#[derive(Debug, Deserialize)]
struct SourceRow {
    nom: Option<String>,
    adr_num: Option<String>,
    adr_voie: Option<String>,
    com_cp: Option<String>,
    com_nom: Option<String>,
    tel1: Option<String>,
    freq_mnt: Option<String>,
    dermnt: Option<String>,
    lat_coor1: Option<String>,
    long_coor1: Option<String>,
}

/// Reads the cached source file into typed records, one per source row,
/// preserving row order. A missing required column is fatal; malformed cell
/// values are not.
pub fn load_raw_table(path: &Path) -> Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    ensure_columns(reader.headers()?)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: SourceRow = row?;
        records.push(type_row(row));
    }
    info!(rows = records.len(), "loaded raw table");
    Ok(records)
}

fn ensure_columns(headers: &csv::StringRecord) -> Result<()> {
    for column in SOURCE_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CleanerError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

fn type_row(row: SourceRow) -> RawRecord {
    RawRecord {
        name: text(row.nom),
        street_number: text(row.adr_num),
        street_name: text(row.adr_voie),
        postal_code: text(row.com_cp),
        city_name: text(row.com_nom),
        // A date in the frequency column is garbage that landed in the wrong
        // field, not a frequency
        maintenance_frequency: text(row.freq_mnt).filter(|v| !rules::frequency_is_date(v)),
        phone: text(row.tel1),
        last_maintenance_date: text(row.dermnt).as_deref().and_then(rules::coerce_date),
        latitude: text(row.lat_coor1).as_deref().and_then(rules::coerce_float),
        longitude: text(row.long_coor1).as_deref().and_then(rules::coerce_float),
    }
}

fn text(cell: Option<String>) -> Option<String> {
    cell.filter(|v| !v.trim().is_empty())
}
