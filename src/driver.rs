//! Weekly preprocessing driver
//!
//! Walks every configured week, parses `week_<N>_mcqs.pdf`, and writes the
//! accepted records to `week_<N>_questions.json` sorted by question number.
//! One week failing never stops the batch.

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::mcq::{try_parse_mcq_pdf, QuestionRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// What happened to one week
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeekStatus {
    /// Records were written to `path`
    Written { path: PathBuf, count: usize },
    /// The PDF was read but no block passed validation
    NoValidRecords,
    /// The PDF was missing or could not be read
    Unreadable { reason: String },
    /// Records were parsed but the JSON file could not be written
    WriteFailed { reason: String },
}

/// Outcome for a single week
#[derive(Debug, Clone, Serialize)]
pub struct WeekReport {
    pub week: u32,
    pub pdf_path: PathBuf,
    #[serde(flatten)]
    pub status: WeekStatus,
    /// Rejected blocks per reason label
    pub rejections: BTreeMap<String, usize>,
}

impl WeekReport {
    pub fn is_success(&self) -> bool {
        matches!(self.status, WeekStatus::Written { .. })
    }
}

/// Summary of one preprocessing run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub weeks: Vec<WeekReport>,
}

impl BatchReport {
    pub fn all_successful(&self) -> bool {
        self.weeks.iter().all(WeekReport::is_success)
    }

    pub fn succeeded(&self) -> usize {
        self.weeks.iter().filter(|w| w.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.weeks.len() - self.succeeded()
    }

    /// Total records written across all weeks
    pub fn records_written(&self) -> usize {
        self.weeks
            .iter()
            .map(|w| match w.status {
                WeekStatus::Written { count, .. } => count,
                _ => 0,
            })
            .sum()
    }
}

/// Sort records by question number, keeping source order among equal numbers
pub fn sort_records(records: &mut [QuestionRecord]) {
    records.sort_by_key(|r| r.question_number);
}

/// Write records as pretty-printed UTF-8 JSON
pub fn write_questions_json(path: &Path, records: &[QuestionRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Parse and write a single week
pub fn process_week(config: &PipelineConfig, week: u32) -> WeekReport {
    let pdf_path = config.mcq_pdf_path(week);
    tracing::info!(week, path = %pdf_path.display(), "processing week");

    let report = match try_parse_mcq_pdf(&pdf_path) {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!(week, error = %e, "failed to read MCQ PDF");
            return WeekReport {
                week,
                pdf_path,
                status: WeekStatus::Unreadable {
                    reason: e.to_string(),
                },
                rejections: BTreeMap::new(),
            };
        }
    };

    let rejections = report.rejection_counts();
    let mut records = report.into_records();

    if records.is_empty() {
        tracing::warn!(week, "no valid MCQs parsed");
        return WeekReport {
            week,
            pdf_path,
            status: WeekStatus::NoValidRecords,
            rejections,
        };
    }

    sort_records(&mut records);
    let json_path = config.questions_json_path(week);

    let status = match write_questions_json(&json_path, &records) {
        Ok(()) => {
            tracing::info!(
                week,
                count = records.len(),
                path = %json_path.display(),
                "saved parsed MCQs"
            );
            WeekStatus::Written {
                path: json_path,
                count: records.len(),
            }
        }
        Err(e) => {
            tracing::warn!(week, error = %e, "failed to save JSON");
            WeekStatus::WriteFailed {
                reason: e.to_string(),
            }
        }
    };

    WeekReport {
        week,
        pdf_path,
        status,
        rejections,
    }
}

/// Run the preprocessing batch over every configured week.
///
/// Fails only when the MCQ PDF directory is missing or the output directory
/// cannot be created.
pub fn run_preprocessing(config: &PipelineConfig) -> Result<BatchReport> {
    if !config.mcq_pdf_dir.is_dir() {
        return Err(Error::MissingFile {
            path: config.mcq_pdf_dir.display().to_string(),
        });
    }

    if !config.output_dir.exists() {
        std::fs::create_dir_all(&config.output_dir)?;
        tracing::info!(path = %config.output_dir.display(), "created output directory");
    }

    let started_at = Utc::now();
    tracing::info!(total_weeks = config.total_weeks, "starting MCQ PDF parsing");

    let weeks: Vec<WeekReport> = config
        .weeks()
        .map(|week| process_week(config, week))
        .collect();

    let report = BatchReport {
        started_at,
        finished_at: Utc::now(),
        weeks,
    };

    tracing::info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        records = report.records_written(),
        "MCQ PDF parsing complete"
    );
    if !report.all_successful() {
        tracing::warn!("errors occurred during parsing; some JSON files may be missing");
    }

    Ok(report)
}
