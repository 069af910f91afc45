//! CSV-to-record decoding.
//!
//! Decodes delimited text into [`IncidentRecord`]s by header name, so
//! the full 19-column schema and the reduced evolution schema
//! (`date, year, latitude, longitude`) share one decoder. Columns the
//! header row lacks simply stay `None` on every record.

use crime_dash_models::IncidentRecord;

use crate::SourceError;
use crate::parsing::{parse_coordinate, parse_date_field, parse_flag, parse_region_id};

/// Column positions resolved from one CSV header row.
struct ColumnIndex {
    id: Option<usize>,
    case_number: Option<usize>,
    date: Option<usize>,
    block: Option<usize>,
    iucr: Option<usize>,
    primary_type: Option<usize>,
    description: Option<usize>,
    location_description: Option<usize>,
    fbi_code: Option<usize>,
    arrest: Option<usize>,
    domestic: Option<usize>,
    beat: Option<usize>,
    district: Option<usize>,
    ward: Option<usize>,
    community_area: Option<usize>,
    latitude: Option<usize>,
    longitude: Option<usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let names: Vec<String> = headers
            .iter()
            .map(|h| h.trim().to_ascii_lowercase())
            .collect();
        let find = |name: &str| names.iter().position(|h| h.as_str() == name);

        Self {
            id: find("id"),
            case_number: find("case_number"),
            date: find("date"),
            block: find("block"),
            iucr: find("iucr"),
            primary_type: find("primary_type"),
            description: find("description"),
            location_description: find("location_description"),
            fbi_code: find("fbi_code"),
            arrest: find("arrest"),
            domestic: find("domestic"),
            beat: find("beat"),
            district: find("district"),
            ward: find("ward"),
            community_area: find("community_area"),
            latitude: find("latitude"),
            longitude: find("longitude"),
        }
    }
}

/// Returns the trimmed field at `index`, or `None` when absent or empty.
fn field<'a>(record: &'a csv::StringRecord, index: Option<usize>) -> Option<&'a str> {
    let value = record.get(index?)?.trim();
    if value.is_empty() { None } else { Some(value) }
}

fn decode_row(columns: &ColumnIndex, record: &csv::StringRecord) -> IncidentRecord {
    let mut incident = IncidentRecord::empty();

    incident.id = field(record, columns.id).map(str::to_owned);
    incident.case_number = field(record, columns.case_number).map(str::to_owned);
    if let Some(raw) = field(record, columns.date) {
        incident.date = parse_date_field(raw);
    }
    incident.block = field(record, columns.block).map(str::to_owned);
    incident.iucr = field(record, columns.iucr).map(str::to_owned);
    incident.primary_type = field(record, columns.primary_type).map(str::to_owned);
    incident.description = field(record, columns.description).map(str::to_owned);
    incident.location_description = field(record, columns.location_description).map(str::to_owned);
    incident.fbi_code = field(record, columns.fbi_code).map(str::to_owned);
    incident.arrest = field(record, columns.arrest).and_then(parse_flag);
    incident.domestic = field(record, columns.domestic).and_then(parse_flag);
    incident.beat = field(record, columns.beat).and_then(parse_region_id);
    incident.district = field(record, columns.district).and_then(parse_region_id);
    incident.ward = field(record, columns.ward).and_then(parse_region_id);
    incident.community_area = field(record, columns.community_area).and_then(parse_region_id);
    incident.latitude = field(record, columns.latitude).and_then(parse_coordinate);
    incident.longitude = field(record, columns.longitude).and_then(parse_coordinate);

    incident
}

/// Decodes delimited text into incident records, preserving row order.
///
/// Rows with unparseable dates are kept with [`crime_dash_models::DateField::Missing`];
/// only structurally broken CSV aborts the decode.
///
/// # Errors
///
/// Returns [`SourceError::Csv`] if the text is not valid CSV.
pub fn parse_csv_incidents(text: &str) -> Result<Vec<IncidentRecord>, SourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns = ColumnIndex::from_headers(reader.headers()?);

    let mut incidents = Vec::new();
    for result in reader.records() {
        let record = result?;
        incidents.push(decode_row(&columns, &record));
    }

    Ok(incidents)
}
