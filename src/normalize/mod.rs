pub mod rules;

use crate::table::RawRecord;
use chrono::NaiveDate;

/// A record whose fields have all passed their cleaning rule. Same shape as
/// [`RawRecord`]; the separate type marks that placeholder sentinels are gone
/// and the text fields follow the registry's formatting conventions.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
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

/// Applies every per-field rule to every record. Pure and total: one output
/// record per input record, in input order, and absent fields stay absent.
pub fn normalize(records: Vec<RawRecord>) -> Vec<NormalizedRecord> {
    records.into_iter().map(normalize_record).collect()
}

/// Cleans a single record, field by field. The typed date and coordinate
/// fields were already coerced while loading and pass through unchanged.
pub fn normalize_record(record: RawRecord) -> NormalizedRecord {
    NormalizedRecord {
        name: record.name,
        street_number: record
            .street_number
            .as_deref()
            .and_then(rules::clean_street_number),
        street_name: record
            .street_name
            .as_deref()
            .and_then(rules::clean_street_name),
        postal_code: record
            .postal_code
            .as_deref()
            .and_then(rules::clean_postal_code),
        city_name: record.city_name.as_deref().map(rules::clean_city_name),
        phone: record.phone.as_deref().and_then(rules::clean_phone),
        maintenance_frequency: record
            .maintenance_frequency
            .as_deref()
            .map(rules::clean_frequency),
        last_maintenance_date: record.last_maintenance_date,
        latitude: record.latitude,
        longitude: record.longitude,
    }
}
