//! MCQ text parsing and validation
//!
//! Recovers validated question records from the plain text of a generated
//! MCQ PDF. The text follows this convention:
//!
//! ```text
//! 1. What is 2+2?
//! A. 3
//! B. 4 (Correct)
//! C. 5
//! D. 22
//! ```
//!
//! Each block is scanned line by line, finalized when the next question
//! number or the end of input is reached, then either accepted or rejected
//! with a [`Rejection`] reason. Question or option text wrapped onto a
//! second physical line is not reconstructed; the continuation is dropped.

mod line;
mod parser;
mod validate;

pub use line::{classify, strip_correct_marker, Line, OptionLabel};
pub use parser::{McqParser, ParserState};
pub use validate::{finalize, DraftRecord, PLACEHOLDER_PREFIX, REQUIRED_OPTIONS};

use crate::error::Result;
use crate::pdf::extract_text;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// A validated multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Number printed before the question in the source
    pub question_number: u32,
    /// Question text from the first line of the block
    pub question: String,
    /// Exactly four options in A-D order
    pub options: Vec<String>,
    /// Text of the correct option; always one of `options`
    pub correct_answer_text: String,
}

impl QuestionRecord {
    /// Index of the correct option by exact text match
    pub fn correct_index(&self) -> Option<usize> {
        self.options
            .iter()
            .position(|o| *o == self.correct_answer_text)
    }
}

/// Why a parsed block was dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Upstream generation failed and left a placeholder question
    Placeholder,
    /// Block did not have exactly four options
    WrongOptionCount { found: usize },
    /// No option carried the correct marker
    MissingCorrectMarker,
    /// Marked answer does not match any collected option
    CorrectAnswerNotInOptions,
}

impl Rejection {
    /// Stable label used when counting rejections
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::Placeholder => "placeholder",
            Rejection::WrongOptionCount { .. } => "wrong_option_count",
            Rejection::MissingCorrectMarker => "missing_correct_marker",
            Rejection::CorrectAnswerNotInOptions => "correct_answer_not_in_options",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::Placeholder => write!(f, "placeholder question"),
            Rejection::WrongOptionCount { found } => {
                write!(f, "expected {} options, found {}", REQUIRED_OPTIONS, found)
            }
            Rejection::MissingCorrectMarker => write!(f, "no '(Correct)' marker"),
            Rejection::CorrectAnswerNotInOptions => {
                write!(f, "correct answer text not found in options")
            }
        }
    }
}

/// Result of finalizing one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Accepted(QuestionRecord),
    Rejected {
        question_number: u32,
        reason: Rejection,
    },
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }
}

/// Every block outcome of one parse, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub outcomes: Vec<Outcome>,
}

impl ParseReport {
    /// Accepted records in the order they appeared
    pub fn accepted(&self) -> impl Iterator<Item = &QuestionRecord> {
        self.outcomes.iter().filter_map(|o| match o {
            Outcome::Accepted(record) => Some(record),
            Outcome::Rejected { .. } => None,
        })
    }

    /// Consume the report, keeping only accepted records
    pub fn into_records(self) -> Vec<QuestionRecord> {
        self.outcomes
            .into_iter()
            .filter_map(|o| match o {
                Outcome::Accepted(record) => Some(record),
                Outcome::Rejected { .. } => None,
            })
            .collect()
    }

    pub fn accepted_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_accepted()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.accepted_count()
    }

    /// Number of rejections per reason label
    pub fn rejection_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for outcome in &self.outcomes {
            if let Outcome::Rejected { reason, .. } = outcome {
                *counts.entry(reason.as_str().to_string()).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Parse extracted MCQ text. Pure; performs no I/O.
pub fn parse_mcq_text(text: &str) -> ParseReport {
    let mut parser = McqParser::new();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Extract and parse an MCQ PDF, propagating extraction failures
pub fn try_parse_mcq_pdf<P: AsRef<Path>>(path: P) -> Result<ParseReport> {
    let path = path.as_ref();
    let text = extract_text(path)?;
    let report = parse_mcq_text(&text);

    tracing::info!(
        path = %path.display(),
        accepted = report.accepted_count(),
        rejected = report.rejected_count(),
        "parsed MCQ PDF"
    );

    Ok(report)
}

/// Extract and parse an MCQ PDF.
///
/// Never fails: a missing or unreadable file yields no records.
pub fn parse_mcq_pdf<P: AsRef<Path>>(path: P) -> Vec<QuestionRecord> {
    let path = path.as_ref();
    match try_parse_mcq_pdf(path) {
        Ok(report) => report.into_records(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to parse MCQ PDF");
            Vec::new()
        }
    }
}
