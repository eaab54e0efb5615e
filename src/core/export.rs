//! Attendance log export (CSV / JSON).

use crate::errors::{AppError, AppResult};
use crate::models::AttendanceEvent;
use crate::ui::messages::{info, success, warning};
use clap::ValueEnum;
use csv::Writer;
use std::io::{self, Write};
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

pub struct ExportLogic;

impl ExportLogic {
    /// Write `events` to `path`. An existing file is only replaced with
    /// `force` or after the user confirms.
    pub fn export(
        events: &[AttendanceEvent],
        format: ExportFormat,
        path: &Path,
        force: bool,
    ) -> AppResult<()> {
        ensure_writable(path, force)?;

        match format {
            ExportFormat::Csv => write_csv(path, events)?,
            ExportFormat::Json => write_json(path, events)?,
        }

        success(format!(
            "{} export completed: {} ({} events)",
            format.as_str().to_uppercase(),
            path.display(),
            events.len()
        ));
        Ok(())
    }
}

pub fn write_csv(path: &Path, events: &[AttendanceEvent]) -> AppResult<()> {
    let mut wtr = Writer::from_path(path)?;

    wtr.write_record(["id", "date", "time", "location", "status"])?;

    for ev in events {
        wtr.write_record([
            ev.id.to_string(),
            ev.date_str(),
            ev.time_str(),
            ev.location.clone(),
            ev.status.to_db_str().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn write_json(path: &Path, events: &[AttendanceEvent]) -> AppResult<()> {
    let json = serde_json::to_string_pretty(events)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Check whether a file may be created or overwritten.
///
/// - file missing → Ok
/// - file present and `force` → Ok
/// - file present otherwise → ask the user.
fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    warning(format!("The file '{}' already exists.", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    let ans = answer.trim().to_ascii_lowercase();

    if ans == "y" || ans == "yes" {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::from(io::Error::other(
            "Export cancelled: existing file not overwritten",
        )))
    }
}
