//! Delimited-text parser for the vehicle dataset.

use std::collections::HashMap;

use crate::error::LoadError;

/// One data line keyed by the header row's field names.
pub type RawRecord = HashMap<String, String>;

/// Splits comma-separated text into records keyed by the header row.
///
/// Short rows are padded with empty strings for the missing columns and
/// surplus fields beyond the header are dropped. No validation against an
/// expected schema happens here.
///
/// # Errors
///
/// Returns [`LoadError::Parse`] if the text is not valid CSV.
pub fn parse_records(text: &str) -> Result<Vec<RawRecord>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let raw: RawRecord = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), record.get(i).unwrap_or("").to_string()))
            .collect();
        records.push(raw);
    }

    Ok(records)
}
