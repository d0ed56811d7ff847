//! CSV output for the raw session table and the three category tables.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::classify::{OralPosterEntry, PersonRoleEntry, ReshapedTables};
use crate::record::{SessionRecord, split_list};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("IO error in {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.display().to_string(),
            source,
        }
    }

    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Row of the raw table; list fields are joined with `", "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSessionRow {
    pub session_id: String,
    pub title: String,
    pub chairs: String,
    pub presenters: String,
    pub speakers: String,
    pub moderators: String,
    pub panelists: String,
}

impl From<&SessionRecord> for RawSessionRow {
    fn from(record: &SessionRecord) -> Self {
        Self {
            session_id: record.session_id.clone(),
            title: record.title.clone(),
            chairs: record.chairs_joined(),
            presenters: record.presenters_joined(),
            speakers: record.speakers_joined(),
            moderators: record.moderators_joined(),
            panelists: record.panelists_joined(),
        }
    }
}

impl From<RawSessionRow> for SessionRecord {
    fn from(row: RawSessionRow) -> Self {
        Self {
            session_id: row.session_id,
            title: row.title,
            chairs: split_list(&row.chairs),
            presenters: split_list(&row.presenters),
            speakers: split_list(&row.speakers),
            moderators: split_list(&row.moderators),
            panelists: split_list(&row.panelists),
        }
    }
}

/// Output file locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub sessions: PathBuf,
    pub oral: PathBuf,
    pub poster: PathBuf,
    pub panel: PathBuf,
}

impl ReportPaths {
    /// `<dir>/<prefix>_sessions.csv`, `<prefix>_oral_sessions.csv`, and so on.
    #[must_use]
    pub fn new(dir: &Path, prefix: &str) -> Self {
        Self {
            sessions: dir.join(format!("{prefix}_sessions.csv")),
            oral: dir.join(format!("{prefix}_oral_sessions.csv")),
            poster: dir.join(format!("{prefix}_poster_sessions.csv")),
            panel: dir.join(format!("{prefix}_panel_sessions.csv")),
        }
    }

    /// Write the three category tables.
    pub fn write_tables(&self, tables: &ReshapedTables) -> Result<(), ReportError> {
        write_oral_poster(&self.oral, &tables.oral)?;
        write_oral_poster(&self.poster, &tables.poster)?;
        write_panel(&self.panel, &tables.panel)?;
        info!(
            "Saved category tables to {}, {}, {}",
            self.oral.display(),
            self.poster.display(),
            self.panel.display()
        );
        Ok(())
    }
}

fn create_parent(path: &Path) -> Result<(), ReportError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))
        }
        _ => Ok(()),
    }
}

fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<(), ReportError> {
    create_parent(path)?;
    // Header written explicitly so empty tables still carry their columns.
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| ReportError::csv(path, e))?;

    wtr.write_record(header)
        .map_err(|e| ReportError::csv(path, e))?;
    for row in rows {
        wtr.serialize(row).map_err(|e| ReportError::csv(path, e))?;
    }

    wtr.flush().map_err(|e| ReportError::io(path, e))
}

pub const RAW_HEADER: [&str; 7] = [
    "session_id",
    "title",
    "chairs",
    "presenters",
    "speakers",
    "moderators",
    "panelists",
];

pub const ORAL_POSTER_HEADER: [&str; 7] = [
    "presenter",
    "chair1",
    "chair2",
    "title",
    "presenter_gender",
    "chair1_gender",
    "chair2_gender",
];

pub const PANEL_HEADER: [&str; 4] = ["name", "role", "title", "gender"];

pub fn write_sessions(path: &Path, records: &[SessionRecord]) -> Result<(), ReportError> {
    let rows: Vec<RawSessionRow> = records.iter().map(RawSessionRow::from).collect();
    write_rows(path, &RAW_HEADER, &rows)?;
    info!("Saved session data to {}", path.display());
    Ok(())
}

pub fn write_oral_poster(path: &Path, rows: &[OralPosterEntry]) -> Result<(), ReportError> {
    write_rows(path, &ORAL_POSTER_HEADER, rows)
}

pub fn write_panel(path: &Path, rows: &[PersonRoleEntry]) -> Result<(), ReportError> {
    write_rows(path, &PANEL_HEADER, rows)
}

/// Read back a raw table written by [`write_sessions`].
pub fn read_sessions(path: &Path) -> Result<Vec<SessionRecord>, ReportError> {
    let mut rdr = csv::Reader::from_path(path).map_err(|e| ReportError::csv(path, e))?;
    rdr.deserialize::<RawSessionRow>()
        .map(|row| row.map(SessionRecord::from).map_err(|e| ReportError::csv(path, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gender::GenderLabel;

    #[test]
    fn test_report_paths_use_prefix() {
        let paths = ReportPaths::new(Path::new("out"), "esa_lps25");
        assert_eq!(paths.sessions, Path::new("out/esa_lps25_sessions.csv"));
        assert_eq!(paths.oral, Path::new("out/esa_lps25_oral_sessions.csv"));
        assert_eq!(paths.poster, Path::new("out/esa_lps25_poster_sessions.csv"));
        assert_eq!(paths.panel, Path::new("out/esa_lps25_panel_sessions.csv"));
    }

    #[test]
    fn test_raw_row_joins_lists() {
        let mut record = SessionRecord::error("s1");
        record.title = "Ice".into();
        record.chairs = vec!["Jane Doe".into(), "John Smith".into()];
        let row = RawSessionRow::from(&record);
        assert_eq!(row.chairs, "Jane Doe, John Smith");
        assert_eq!(row.presenters, "");
    }

    #[test]
    fn test_oral_table_columns() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("oral.csv");
        let rows = vec![OralPosterEntry {
            presenter: "Alice Brown".into(),
            chair1: "Jane Doe".into(),
            chair2: "N/A".into(),
            title: "Ice, Snow and Sea".into(),
            presenter_gender: GenderLabel::Female,
            chair1_gender: GenderLabel::Female,
            chair2_gender: GenderLabel::Unknown,
        }];
        write_oral_poster(&path, &rows)?;

        let content = std::fs::read_to_string(&path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "presenter,chair1,chair2,title,presenter_gender,chair1_gender,chair2_gender"
        );
        assert_eq!(
            lines[1],
            "Alice Brown,Jane Doe,N/A,\"Ice, Snow and Sea\",female,female,unknown"
        );
        Ok(())
    }

    #[test]
    fn test_empty_panel_table_keeps_header() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("panel.csv");
        write_panel(&path, &[])?;
        assert_eq!(std::fs::read_to_string(&path)?, "name,role,title,gender\n");
        Ok(())
    }

    #[test]
    fn test_sessions_read_back_into_records() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("sessions.csv");
        let mut record = SessionRecord::error("s1");
        record.title = "Panel on Data".into();
        record.speakers = vec!["Dr. Emma Stone".into(), "Luca Bianchi".into()];
        write_sessions(&path, &[record.clone(), SessionRecord::error("s2")])?;

        let records = read_sessions(&path)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], record);
        assert!(records[1].is_error());
        Ok(())
    }
}
