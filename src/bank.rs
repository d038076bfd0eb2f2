//! Read-only question bank built from the parsed weekly JSON files
//!
//! Serves random quizzes and grades submissions by locating the correct
//! option through an exact text match against `options`.

use crate::config::PipelineConfig;
use crate::driver::sort_records;
use crate::error::{Error, Result};
use crate::mcq::QuestionRecord;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Weeks whose parsed question file exists
pub fn available_weeks(config: &PipelineConfig) -> Vec<u32> {
    config
        .weeks()
        .filter(|&week| config.questions_json_path(week).exists())
        .collect()
}

/// All accepted questions for one week, sorted by question number
#[derive(Debug, Clone)]
pub struct QuestionBank {
    week: u32,
    questions: Vec<QuestionRecord>,
}

impl QuestionBank {
    /// Load the bank for `week` from the configured output directory
    pub fn load(config: &PipelineConfig, week: u32) -> Result<Self> {
        if !config.contains_week(week) {
            return Err(Error::WeekOutOfRange {
                week,
                total: config.total_weeks,
            });
        }

        let path = config.questions_json_path(week);
        if !path.exists() {
            return Err(Error::QuestionBankMissing {
                week,
                path: path.display().to_string(),
            });
        }

        let raw = std::fs::read_to_string(&path)?;
        let questions: Vec<QuestionRecord> = serde_json::from_str(&raw)?;
        tracing::debug!(week, count = questions.len(), "loaded question bank");

        Ok(Self::new(week, questions))
    }

    pub fn new(week: u32, mut questions: Vec<QuestionRecord>) -> Self {
        sort_records(&mut questions);
        Self { week, questions }
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Draw `count` distinct questions uniformly at random
    pub fn sample_quiz<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Quiz> {
        if self.questions.len() < count {
            return Err(Error::NotEnoughQuestions {
                week: self.week,
                available: self.questions.len(),
                required: count,
            });
        }

        let questions: Vec<QuestionRecord> = self
            .questions
            .choose_multiple(rng, count)
            .cloned()
            .collect();

        Ok(Quiz {
            week: self.week,
            questions,
        })
    }
}

/// A question as shown to the quiz taker, without its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizItem {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
}

/// Graded answer for one quiz question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub question_id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub selected_option_index: Option<usize>,
    pub correct_option_index: Option<usize>,
    pub is_correct: bool,
}

/// Score of a submitted quiz
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub week: u32,
    pub score: usize,
    pub total_questions: usize,
    /// Rounded score percentage
    pub percentage: u32,
    pub results: Vec<AnswerResult>,
}

/// A served quiz. Keeps the answer records so the submission can be graded.
#[derive(Debug, Clone)]
pub struct Quiz {
    week: u32,
    questions: Vec<QuestionRecord>,
}

impl Quiz {
    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Questions with ids `q_0`, `q_1`, ... in served order
    pub fn items(&self) -> Vec<QuizItem> {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| QuizItem {
                id: question_id(i),
                question: q.question.clone(),
                options: q.options.clone(),
            })
            .collect()
    }

    /// Grade answers keyed by question id, valued by selected option index.
    ///
    /// An id missing from `answers` counts as unanswered.
    pub fn grade(&self, answers: &HashMap<String, usize>) -> Result<QuizResult> {
        if answers.len() != self.questions.len() {
            return Err(Error::AnswerCountMismatch {
                expected: self.questions.len(),
                got: answers.len(),
            });
        }

        let results: Vec<AnswerResult> = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let id = question_id(i);
                let selected = answers.get(&id).copied();
                let correct = q.correct_index();
                AnswerResult {
                    question_id: id,
                    question_text: q.question.clone(),
                    options: q.options.clone(),
                    selected_option_index: selected,
                    correct_option_index: correct,
                    is_correct: selected.is_some() && selected == correct,
                }
            })
            .collect();

        let score = results.iter().filter(|r| r.is_correct).count();
        let total_questions = results.len();
        let percentage = if total_questions > 0 {
            ((score as f64 / total_questions as f64) * 100.0).round() as u32
        } else {
            0
        };

        tracing::info!(week = self.week, score, total_questions, "graded quiz");

        Ok(QuizResult {
            week: self.week,
            score,
            total_questions,
            percentage,
            results,
        })
    }
}

fn question_id(index: usize) -> String {
    format!("q_{}", index)
}
