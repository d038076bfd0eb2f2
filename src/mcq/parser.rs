//! Two-state line machine over extracted MCQ text

use super::line::{classify, Line};
use super::validate::{finalize, DraftRecord};
use super::{Outcome, ParseReport};

/// Parser state between lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ParserState {
    /// Before the first question number
    #[default]
    NoOpenRecord,
    /// A question block is open and collecting options
    AccumulatingOptions(DraftRecord),
}

/// Incremental MCQ parser.
///
/// | state                 | line           | action                                |
/// |-----------------------|----------------|---------------------------------------|
/// | `NoOpenRecord`        | question start | open draft                            |
/// | `NoOpenRecord`        | option / other | ignore                                |
/// | `AccumulatingOptions` | question start | finalize current, open new draft      |
/// | `AccumulatingOptions` | option         | append option                         |
/// | `AccumulatingOptions` | other          | ignore                                |
/// | any                   | oversized start| finalize current, drop the new block  |
/// | any                   | end of input   | finalize current if open              |
#[derive(Debug, Default)]
pub struct McqParser {
    state: ParserState,
    outcomes: Vec<Outcome>,
}

impl McqParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ParserState {
        &self.state
    }

    /// Feed one physical line of text
    pub fn feed_line(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        match classify(line) {
            Line::QuestionStart { number, text } => {
                self.close_open_record();
                self.state = ParserState::AccumulatingOptions(DraftRecord::new(number, text));
            }
            Line::Option {
                text, is_correct, ..
            } => {
                if let ParserState::AccumulatingOptions(draft) = &mut self.state {
                    draft.push_option(text, is_correct);
                }
            }
            Line::OversizedQuestionStart { digits } => {
                self.close_open_record();
                tracing::warn!(digits, "question number out of range, skipping block");
            }
            Line::Other => {}
        }
    }

    /// Finalize any open record and return every outcome in source order
    pub fn finish(mut self) -> ParseReport {
        self.close_open_record();
        ParseReport {
            outcomes: self.outcomes,
        }
    }

    fn close_open_record(&mut self) {
        if let ParserState::AccumulatingOptions(draft) = std::mem::take(&mut self.state) {
            self.outcomes.push(finalize(draft));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcq::{parse_mcq_text, QuestionRecord, Rejection};
    use pretty_assertions::assert_eq;

    fn block(number: u32, question: &str, correct: usize) -> String {
        let mut out = format!("{}. {}\n", number, question);
        for (i, label) in ["A", "B", "C", "D"].iter().enumerate() {
            let marker = if i == correct { " (Correct)" } else { "" };
            out.push_str(&format!("{}. option {}{}\n", label, i + 1, marker));
        }
        out
    }

    fn numbers(records: &[QuestionRecord]) -> Vec<u32> {
        records.iter().map(|r| r.question_number).collect()
    }

    #[test]
    fn test_state_transitions() {
        let mut parser = McqParser::new();
        assert_eq!(parser.state(), &ParserState::NoOpenRecord);

        parser.feed_line("A. stray option before any question");
        assert_eq!(parser.state(), &ParserState::NoOpenRecord);

        parser.feed_line("1. First?");
        let ParserState::AccumulatingOptions(draft) = parser.state() else {
            panic!("expected open record");
        };
        assert_eq!(draft.question_number, 1);
        assert!(draft.options.is_empty());

        parser.feed_line("A. yes (Correct)");
        let ParserState::AccumulatingOptions(draft) = parser.state() else {
            panic!("expected open record");
        };
        assert_eq!(draft.options, vec!["yes".to_string()]);
        assert_eq!(draft.correct_answer_text.as_deref(), Some("yes"));
    }

    #[test]
    fn test_finalize_on_end_of_input() {
        let report = parse_mcq_text(&block(9, "Last?", 3));
        assert_eq!(numbers(&report.into_records()), vec![9]);
    }

    #[test]
    fn test_round_trip_block() {
        let records = parse_mcq_text(&block(1, "Which?", 2)).into_records();
        assert_eq!(
            records,
            vec![QuestionRecord {
                question_number: 1,
                question: "Which?".to_string(),
                options: vec![
                    "option 1".into(),
                    "option 2".into(),
                    "option 3".into(),
                    "option 4".into()
                ],
                correct_answer_text: "option 3".to_string(),
            }]
        );
    }

    #[test]
    fn test_source_order_preserved() {
        let text = [block(3, "Three?", 0), block(1, "One?", 1), block(2, "Two?", 2)].concat();
        let records = parse_mcq_text(&text).into_records();
        assert_eq!(numbers(&records), vec![3, 1, 2]);
    }

    #[test]
    fn test_each_rejection_isolated() {
        let text = [
            block(1, "Good one?", 0),
            "2. Placeholder: Generation failed/incomplete for Week 4 - Q2\nA. a\nB. b\nC. c (Correct)\nD. d\n".to_string(),
            "3. Three options?\nA. a (Correct)\nB. b\nC. c\n".to_string(),
            "4. No marker?\nA. a\nB. b\nC. c\nD. d\n".to_string(),
            block(5, "Good two?", 3),
        ]
        .concat();

        let report = parse_mcq_text(&text);
        let reasons: Vec<_> = report
            .outcomes
            .iter()
            .filter_map(|o| match o {
                Outcome::Rejected {
                    question_number,
                    reason,
                } => Some((*question_number, reason.clone())),
                Outcome::Accepted(_) => None,
            })
            .collect();

        assert_eq!(
            reasons,
            vec![
                (2, Rejection::Placeholder),
                (3, Rejection::WrongOptionCount { found: 3 }),
                (4, Rejection::MissingCorrectMarker),
            ]
        );
        assert_eq!(numbers(&report.into_records()), vec![1, 5]);
    }

    #[test]
    fn test_oversized_number_closes_previous_block() {
        let text = format!(
            "{}99999999999. Big?\nA. w (Correct)\nB. x\nC. y\nD. z\n{}",
            block(1, "Good?", 0),
            block(2, "After?", 1)
        );
        let report = parse_mcq_text(&text);

        assert_eq!(report.rejected_count(), 0);
        assert_eq!(numbers(&report.into_records()), vec![1, 2]);
    }

    #[test]
    fn test_oversized_number_leaves_no_open_record() {
        let mut parser = McqParser::new();
        parser.feed_line("1. First?");
        parser.feed_line("4294967296. Just past u32");
        assert_eq!(parser.state(), &ParserState::NoOpenRecord);
    }

    #[test]
    fn test_fifth_labelled_option_is_ignored() {
        let text = format!("{}E. extra\n", block(1, "Q?", 0));
        assert_eq!(parse_mcq_text(&text).accepted_count(), 1);
    }

    #[test]
    fn test_duplicate_label_counts_as_extra_option() {
        let text = format!("{}A. again\n", block(1, "Q?", 0));
        let report = parse_mcq_text(&text);
        assert_eq!(
            report.outcomes,
            vec![Outcome::Rejected {
                question_number: 1,
                reason: Rejection::WrongOptionCount { found: 5 },
            }]
        );
    }

    #[test]
    fn test_wrapped_text_is_dropped() {
        let text = "1. A question that\nwraps onto a second line?\n\
                    A. one (Correct)\nB. two\nC. three\nD. four that\ncontinues\n";
        let records = parse_mcq_text(text).into_records();
        assert_eq!(records[0].question, "A question that");
        assert_eq!(records[0].options[3], "four that");
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let text = "\r\n  1.  Spaced?  \r\n\r\n   a. x  \r\nB. y (correct)\r\nc. z\r\nD. w\r\n";
        let records = parse_mcq_text(text).into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Spaced?");
        assert_eq!(records[0].options, vec!["x", "y", "z", "w"]);
        assert_eq!(records[0].correct_answer_text, "y");
    }
}
