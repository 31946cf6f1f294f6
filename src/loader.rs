//! Fetch, parse and coerce the vehicle dataset.

use tracing::{debug, info};

use crate::error::LoadError;
use crate::fetch::TextSource;
use crate::parser::parse_records;
use crate::row::VehicleRow;

/// Retrieves the dataset text from `source` and turns every record into a
/// [`VehicleRow`]. Not memoized; see [`crate::store::DataStore::load_rows`].
///
/// # Errors
///
/// Propagates the source's [`LoadError`] or a [`LoadError::Parse`].
#[tracing::instrument(skip(source), fields(source = %source.describe()))]
pub async fn load_rows<S: TextSource + ?Sized>(source: &S) -> Result<Vec<VehicleRow>, LoadError> {
    let text = source.fetch_text().await?;
    debug!(bytes = text.len(), "Dataset text received, parsing");

    let records = parse_records(&text)?;
    let rows: Vec<VehicleRow> = records.iter().map(VehicleRow::from_record).collect();

    info!(rows = rows.len(), "Vehicle rows loaded");
    Ok(rows)
}
