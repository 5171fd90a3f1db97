use crate::indicator::{ExportIndicator, ResetTicket};
use crate::sprint::SprintSection;
use chrono::{DateTime, Local, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

pub const JSON_FILE_NAME: &str = "VOP_H1_Config.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupFormat {
    Text,
    Json,
}

impl BackupFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackupFormat::Text => "text",
            BackupFormat::Json => "json",
        }
    }
}

impl FromStr for BackupFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(BackupFormat::Text),
            "json" => Ok(BackupFormat::Json),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum ExportError {
    DownloadUnavailable { target: PathBuf, source: io::Error },
    UnknownFormat(String),
}

impl ExportError {
    /// Short message suitable for showing next to the export button.
    pub fn notice(&self) -> String {
        match self {
            ExportError::DownloadUnavailable { target, .. } => format!(
                "Backup could not be saved to {}; the calendar itself is unaffected.",
                target.display()
            ),
            ExportError::UnknownFormat(format) => {
                format!("Unknown backup format '{format}' (expected json or text).")
            }
        }
    }
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::DownloadUnavailable { target, source } => {
                write!(f, "download unavailable at {}: {source}", target.display())
            }
            ExportError::UnknownFormat(format) => write!(f, "unknown backup format '{format}'"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::DownloadUnavailable { source, .. } => Some(source),
            ExportError::UnknownFormat(_) => None,
        }
    }
}

/// Fixed labels stamped into every backup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupProfile {
    pub project: String,
    pub version: String,
    pub note: String,
}

impl Default for BackupProfile {
    fn default() -> Self {
        Self {
            project: "VOP 2026 H1".to_string(),
            version: "2.0".to_string(),
            note: "Calendar data is compiled into the application; this file only records export metadata."
                .to_string(),
        }
    }
}

/// JSON backup body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupMetadata {
    pub project: String,
    pub version: String,
    pub timestamp: String,
    pub host: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    pub file_name: String,
    pub content_type: &'static str,
    pub contents: String,
}

impl BackupFile {
    pub fn text_file_name(date: NaiveDate) -> String {
        format!("VOP_Calendar_Backup_{}.txt", date.format("%Y-%m-%d"))
    }
}

/// Where a finished backup goes.
pub trait BackupSink {
    fn deliver(&self, file: &BackupFile) -> Result<(), ExportError>;
}

/// Writes backups into a directory, one file per export.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BackupSink for DirectorySink {
    fn deliver(&self, file: &BackupFile) -> Result<(), ExportError> {
        let target = self.dir.join(&file.file_name);
        fs::write(&target, file.contents.as_bytes())
            .map_err(|source| ExportError::DownloadUnavailable { target, source })
    }
}

#[derive(Debug)]
pub struct ExportOutcome {
    pub file: BackupFile,
    pub ticket: ResetTicket,
    pub error: Option<ExportError>,
}

impl ExportOutcome {
    pub fn notice(&self) -> Option<String> {
        self.error.as_ref().map(ExportError::notice)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Exporter {
    profile: BackupProfile,
}

impl Exporter {
    pub fn new(profile: BackupProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &BackupProfile {
        &self.profile
    }

    pub fn metadata(&self, host: &str, generated_at: DateTime<Utc>) -> BackupMetadata {
        BackupMetadata {
            project: self.profile.project.clone(),
            version: self.profile.version.clone(),
            timestamp: iso_timestamp(generated_at),
            host: host.to_string(),
            note: self.profile.note.clone(),
        }
    }

    pub fn build(
        &self,
        format: BackupFormat,
        host: &str,
        sections: &[SprintSection],
        generated_at: DateTime<Utc>,
    ) -> BackupFile {
        match format {
            BackupFormat::Json => {
                let metadata = self.metadata(host, generated_at);
                let contents = serde_json::to_string_pretty(&metadata)
                    .expect("backup metadata holds only string fields");
                BackupFile {
                    file_name: JSON_FILE_NAME.to_string(),
                    content_type: "application/json",
                    contents,
                }
            }
            BackupFormat::Text => {
                let local_date = generated_at.with_timezone(&Local).date_naive();
                BackupFile {
                    file_name: BackupFile::text_file_name(local_date),
                    content_type: "text/plain; charset=utf-8",
                    contents: self.text_body(host, sections, generated_at),
                }
            }
        }
    }

    fn text_body(&self, host: &str, sections: &[SprintSection], generated_at: DateTime<Utc>) -> String {
        let mut out = String::new();
        out.push_str("=== VOP 2026 H1 PROJECT BACKUP ===\n");
        out.push_str(&format!("Generated: {}\n", iso_timestamp(generated_at)));
        out.push_str(&format!("Project: {} (v{})\n", self.profile.project, self.profile.version));
        out.push_str(&format!("Host: {host}\n"));
        out.push_str("\n--- Sprints ---\n");
        for section in sections {
            let weeks = section.week_indices();
            let span = match (weeks.first(), weeks.last()) {
                (Some(first), Some(last)) => format!("weeks {first}-{last}"),
                _ => "no weeks".to_string(),
            };
            out.push_str(&format!(
                "{:<4} {:<18} {}\n",
                section.id,
                section.month_label.as_deref().unwrap_or("-"),
                span
            ));
        }
        out.push_str("\n--- 提示 ---\n");
        out.push_str("1. 日历数据已内置于应用中，本文件仅记录导出信息。\n");
        out.push_str("2. 建议直接在当前页面按下 Ctrl+S 保存完整的 HTML。\n");
        out
    }

    /// Arm the indicator, build the payload and hand it to `sink`.
    ///
    /// Never fails: a sink error is carried in the outcome as a notice and
    /// the reset ticket is issued regardless.
    pub fn export(
        &self,
        indicator: &mut ExportIndicator,
        format: BackupFormat,
        host: &str,
        sections: &[SprintSection],
        sink: &dyn BackupSink,
    ) -> ExportOutcome {
        let ticket = indicator.trigger(Instant::now());
        let file = self.build(format, host, sections, Utc::now());
        let error = match sink.deliver(&file) {
            Ok(()) => {
                tracing::info!(file = %file.file_name, format = format.as_str(), "backup exported");
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "backup download unavailable");
                Some(err)
            }
        };
        ExportOutcome {
            file,
            ticket,
            error,
        }
    }
}

/// ISO-8601 in UTC with millisecond precision, e.g. `2026-01-16T08:30:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
