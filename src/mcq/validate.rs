//! Finalization of an in-progress question block

use super::{Outcome, QuestionRecord, Rejection};

/// Prefix the generation stage writes when it could not produce a question
pub const PLACEHOLDER_PREFIX: &str = "Placeholder: Generation failed/incomplete";

/// Options every accepted question must have
pub const REQUIRED_OPTIONS: usize = 4;

/// Question block still being accumulated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftRecord {
    pub question_number: u32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer_text: Option<String>,
}

impl DraftRecord {
    pub fn new(question_number: u32, question: impl Into<String>) -> Self {
        Self {
            question_number,
            question: question.into(),
            options: Vec::with_capacity(REQUIRED_OPTIONS),
            correct_answer_text: None,
        }
    }

    /// Append an option; the first correct-marked option becomes the answer
    pub fn push_option(&mut self, text: &str, is_correct: bool) {
        if is_correct && self.correct_answer_text.is_none() {
            self.correct_answer_text = Some(text.to_string());
        }
        self.options.push(text.to_string());
    }
}

/// Validate a finished block.
///
/// Checks run in a fixed order and the first failure wins: placeholder,
/// option count, correct marker presence, then answer membership.
pub fn finalize(draft: DraftRecord) -> Outcome {
    let question_number = draft.question_number;
    let reject = |reason: Rejection| Outcome::Rejected {
        question_number,
        reason,
    };

    if draft.question.starts_with(PLACEHOLDER_PREFIX) {
        tracing::debug!(question_number, "skipping placeholder question");
        return reject(Rejection::Placeholder);
    }

    if draft.options.len() != REQUIRED_OPTIONS {
        let reason = Rejection::WrongOptionCount {
            found: draft.options.len(),
        };
        tracing::warn!(question_number, reason = %reason, "skipping question");
        return reject(reason);
    }

    let Some(correct_answer_text) = draft.correct_answer_text else {
        let reason = Rejection::MissingCorrectMarker;
        tracing::warn!(question_number, reason = %reason, "skipping question");
        return reject(reason);
    };

    if !draft.options.contains(&correct_answer_text) {
        let reason = Rejection::CorrectAnswerNotInOptions;
        tracing::warn!(question_number, reason = %reason, "skipping question");
        return reject(reason);
    }

    Outcome::Accepted(QuestionRecord {
        question_number,
        question: draft.question,
        options: draft.options,
        correct_answer_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(question: &str, options: &[&str], correct: Option<&str>) -> DraftRecord {
        DraftRecord {
            question_number: 1,
            question: question.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer_text: correct.map(str::to_string),
        }
    }

    fn reason(outcome: Outcome) -> Option<Rejection> {
        match outcome {
            Outcome::Accepted(_) => None,
            Outcome::Rejected { reason, .. } => Some(reason),
        }
    }

    #[test]
    fn test_accepts_well_formed() {
        let outcome = finalize(draft("Q?", &["a", "b", "c", "d"], Some("b")));
        assert!(outcome.is_accepted());
    }

    #[test]
    fn test_placeholder_checked_first() {
        // Also has the wrong option count; placeholder must still win
        let outcome = finalize(draft(
            "Placeholder: Generation failed/incomplete for Week 2 - Q7",
            &["a"],
            None,
        ));
        assert_eq!(reason(outcome), Some(Rejection::Placeholder));
    }

    #[test]
    fn test_count_checked_before_marker() {
        let outcome = finalize(draft("Q?", &["a", "b", "c"], None));
        assert_eq!(reason(outcome), Some(Rejection::WrongOptionCount { found: 3 }));
    }

    #[test]
    fn test_missing_marker() {
        let outcome = finalize(draft("Q?", &["a", "b", "c", "d"], None));
        assert_eq!(reason(outcome), Some(Rejection::MissingCorrectMarker));
    }

    #[test]
    fn test_answer_not_in_options() {
        let outcome = finalize(draft("Q?", &["a", "b", "c", "d"], Some("e")));
        assert_eq!(reason(outcome), Some(Rejection::CorrectAnswerNotInOptions));
    }

    #[test]
    fn test_first_marked_option_wins() {
        let mut d = DraftRecord::new(4, "Q?");
        d.push_option("a", false);
        d.push_option("b", true);
        d.push_option("c", true);
        d.push_option("d", false);
        match finalize(d) {
            Outcome::Accepted(record) => assert_eq!(record.correct_answer_text, "b"),
            other => panic!("expected acceptance, got {:?}", other),
        }
    }

    #[test]
    fn test_placeholder_prefix_only_at_start() {
        let outcome = finalize(draft(
            "Why would a Placeholder: Generation failed/incomplete appear?",
            &["a", "b", "c", "d"],
            Some("a"),
        ));
        assert!(outcome.is_accepted());
    }
}
