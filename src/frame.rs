use crate::normalize::NormalizedRecord;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Terminal record shape, serialized under the display column names. The four
/// address sub-fields are gone; they only survive merged into `Address`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "Phone number")]
    pub phone: Option<String>,
    #[serde(rename = "Maintenance frequency")]
    pub maintenance_frequency: Option<String>,
    #[serde(rename = "Last maintenance")]
    pub last_maintenance: Option<NaiveDate>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
}

/// Reshapes normalized records into the output schema. Total, one-to-one and
/// order-preserving.
pub fn frame(records: Vec<NormalizedRecord>) -> Vec<OutputRecord> {
    records.into_iter().map(frame_record).collect()
}

fn frame_record(record: NormalizedRecord) -> OutputRecord {
    let address = compose_address(
        record.street_number.as_deref(),
        record.street_name.as_deref(),
        record.postal_code.as_deref(),
        record.city_name.as_deref(),
    );
    OutputRecord {
        name: record.name,
        address,
        phone: record.phone,
        maintenance_frequency: record.maintenance_frequency,
        last_maintenance: record.last_maintenance_date,
        latitude: record.latitude,
        longitude: record.longitude,
    }
}

/// Joins the four address components in fixed order, absent parts contributing
/// nothing. Whitespace runs left by the gaps collapse to single spaces; a
/// fully empty result is absent, never the empty string.
pub fn compose_address(
    street_number: Option<&str>,
    street_name: Option<&str>,
    postal_code: Option<&str>,
    city_name: Option<&str>,
) -> Option<String> {
    let joined = [street_number, street_name, postal_code, city_name]
        .iter()
        .map(|part| part.unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ");
    let collapsed = joined.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}
