//! Line classification for generated MCQ text

use regex::Regex;
use std::sync::OnceLock;

fn question_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([0-9]+)\.\s*(.*)$").expect("valid question pattern"))
}

fn option_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Da-d])\.\s*(.*)$").expect("valid option pattern"))
}

fn correct_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\s*\(correct\)$").expect("valid marker pattern"))
}

/// Answer label of an option line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionLabel::A),
            'B' => Some(OptionLabel::B),
            'C' => Some(OptionLabel::C),
            'D' => Some(OptionLabel::D),
            _ => None,
        }
    }
}

/// What a single trimmed, non-empty line means to the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// `<N>. <question text>`
    QuestionStart { number: u32, text: &'a str },
    /// `<A-D>. <option text>`, with the correct marker already stripped
    Option {
        label: OptionLabel,
        text: &'a str,
        is_correct: bool,
    },
    /// `<N>. <text>` where `N` does not fit a question number
    OversizedQuestionStart { digits: &'a str },
    /// Anything else, including wrapped continuation text
    Other,
}

/// Classify one line. `line` must already be trimmed.
///
/// Question starts win over options, so `1. A. text` is a question. Only
/// ASCII digits form a question number; a run too large for `u32` is still a
/// question start but is reported as oversized.
pub fn classify(line: &str) -> Line<'_> {
    if let Some(caps) = question_re().captures(line) {
        let digits = caps.get(1).map_or("", |m| m.as_str());
        if let Ok(number) = digits.parse::<u32>() {
            let text = caps.get(2).map_or("", |m| m.as_str()).trim();
            return Line::QuestionStart { number, text };
        }
        return Line::OversizedQuestionStart { digits };
    }

    if let Some(caps) = option_re().captures(line) {
        let label = caps
            .get(1)
            .and_then(|m| m.as_str().chars().next())
            .and_then(OptionLabel::from_char);
        if let Some(label) = label {
            let raw = caps.get(2).map_or("", |m| m.as_str()).trim();
            let (text, is_correct) = strip_correct_marker(raw);
            return Line::Option {
                label,
                text,
                is_correct,
            };
        }
    }

    Line::Other
}

/// Remove a trailing `(Correct)` marker (any case, optional leading
/// whitespace) and report whether one was present.
pub fn strip_correct_marker(text: &str) -> (&str, bool) {
    match correct_marker_re().find(text) {
        Some(m) => (text[..m.start()].trim(), true),
        None => (text, false),
    }
}
