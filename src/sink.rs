use crate::error::Result;
use crate::frame::OutputRecord;
use std::fs;
use std::path::Path;

/// Display header row of the cleaned table, in output-schema order.
pub const OUTPUT_HEADERS: [&str; 7] = [
    "Name",
    "Address",
    "Phone number",
    "Maintenance frequency",
    "Last maintenance",
    "Latitude",
    "Longitude",
];

/// Writes the cleaned table. Absent fields serialize as empty cells and the
/// header row is written even for an empty table.
pub fn write_table(path: &Path, records: &[OutputRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(OUTPUT_HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a previously written table back into memory. Empty cells come back
/// as absent fields, so a write/read round trip reproduces the records.
pub fn read_table(path: &Path) -> Result<Vec<OutputRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for row in reader.deserialize() {
        records.push(row?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn sample() -> Vec<OutputRecord> {
        vec![
            OutputRecord {
                name: Some("Mairie".to_string()),
                address: Some("12 Rue Foch 34000 Montpellier".to_string()),
                phone: Some("+33 4 12 34 56 78".to_string()),
                maintenance_frequency: Some("Tous les ans".to_string()),
                last_maintenance: NaiveDate::from_ymd_opt(2023, 5, 17),
                latitude: Some(43.6112),
                longitude: Some(3.8767),
            },
            OutputRecord {
                name: Some("Gymnase".to_string()),
                address: None,
                phone: None,
                maintenance_frequency: None,
                last_maintenance: None,
                latitude: None,
                longitude: None,
            },
        ]
    }

    #[test]
    fn round_trip_reproduces_records() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("out/cleaned.csv");

        let records = sample();
        write_table(&path, &records).unwrap();
        let read_back = read_table(&path).unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn empty_table_still_has_headers() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("cleaned.csv");

        write_table(&path, &[]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.lines().next(),
            Some("Name,Address,Phone number,Maintenance frequency,Last maintenance,Latitude,Longitude")
        );
        assert_eq!(read_table(&path).unwrap(), vec![]);
    }

    #[test]
    fn absent_fields_are_empty_cells() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("cleaned.csv");

        write_table(&path, &sample()).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().nth(2), Some("Gymnase,,,,,,"));
    }
}
