//! Output formatting and persistence for the aggregate views.
//!
//! Supports pretty JSON logging, JSON files and CSV files.

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::categories::GroupScheme;

/// Envelope written around every exported view.
#[derive(Debug, Serialize)]
pub struct Report<T> {
    pub schema_version: u8,
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub group_scheme: GroupScheme,
    pub data: T,
}

impl<T: Serialize> Report<T> {
    pub fn new(source: impl Into<String>, group_scheme: GroupScheme, data: T) -> Self {
        Self {
            schema_version: 1,
            generated_at: Utc::now(),
            source: source.into(),
            group_scheme,
            data,
        }
    }
}

/// Logs a value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a value as pretty-printed JSON, creating parent directories.
pub fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
    ensure_parent(path)?;
    let body = serde_json::to_vec_pretty(value)?;
    fs::write(path, body)?;
    debug!(path = %path.display(), "JSON written");
    Ok(())
}

/// Writes rows as CSV with a header line, replacing any existing file.
pub fn write_csv<'a, T, I>(path: &Path, rows: I) -> Result<usize>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    ensure_parent(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_path(path)?;

    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = count, "CSV written");
    Ok(count)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregators::GroupUsageRow;
    use std::env;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn usage_row(vehicle: &str, people: usize) -> GroupUsageRow {
        GroupUsageRow {
            semester_time: "WS24".to_string(),
            vehicle: vehicle.to_string(),
            vehicle_label: vehicle.to_string(),
            vehicle_rank: 1,
            group: "student".to_string(),
            group_label: "Students".to_string(),
            group_rank: 1,
            people,
        }
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let report = Report::new("test", GroupScheme::Buckets, vec![usage_row("bus", 2)]);
        print_json(&report).unwrap();
    }

    #[test]
    fn test_write_json_creates_dirs() {
        let dir = temp_path("mobility_dashboard_test_json");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("nested/usage.json");

        let report = Report::new("test", GroupScheme::Raw, vec![usage_row("bus", 2)]);
        write_json(&path, &report).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["group_scheme"], "raw");
        assert_eq!(value["data"][0]["people"], 2);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_csv_header_and_rows() {
        let path = temp_path("mobility_dashboard_test_usage.csv");
        let _ = fs::remove_file(&path);

        let rows = vec![usage_row("bus", 2), usage_row("walk", 1)];
        let written = write_csv(&path, &rows).unwrap();
        assert_eq!(written, 2);

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("semester_time,vehicle,"));
        assert!(lines[1].ends_with(",2"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_csv_replaces_file() {
        let path = temp_path("mobility_dashboard_test_replace.csv");
        let _ = fs::remove_file(&path);

        write_csv(&path, &vec![usage_row("bus", 2)]).unwrap();
        write_csv(&path, &vec![usage_row("walk", 1)]).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(!content.contains("bus"));

        fs::remove_file(&path).unwrap();
    }
}
