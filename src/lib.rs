//! MCQ Pipeline Library
//!
//! This crate turns generated multiple-choice question PDFs into validated
//! weekly question banks:
//! - `pdf`: Extract plain text from a PDF in page order
//! - `mcq`: Parse and validate question blocks from that text
//! - `driver`: Process every week and write sorted JSON files
//! - `bank`: Load the JSON files, serve random quizzes, and grade them

pub mod bank;
pub mod config;
pub mod driver;
pub mod error;
pub mod mcq;
pub mod pdf;

pub use bank::{available_weeks, Quiz, QuizItem, QuizResult, QuestionBank};
pub use config::PipelineConfig;
pub use driver::{run_preprocessing, BatchReport, WeekReport, WeekStatus};
pub use error::{Error, Result};
pub use mcq::{
    parse_mcq_pdf, parse_mcq_text, try_parse_mcq_pdf, Outcome, ParseReport, QuestionRecord,
    Rejection,
};
