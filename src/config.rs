//! Pipeline configuration

use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Directory layout and batch sizing for the preprocessing driver and
/// question bank.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory holding `week_<N>_mcqs.pdf` files
    pub mcq_pdf_dir: PathBuf,
    /// Directory receiving `week_<N>_questions.json` files
    pub output_dir: PathBuf,
    /// Number of weeks in the course (weeks are numbered from 1)
    pub total_weeks: u32,
    /// Questions drawn per quiz (default: 10)
    pub questions_per_quiz: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mcq_pdf_dir: PathBuf::from("mcq_pdfs"),
            output_dir: PathBuf::from("data"),
            total_weeks: 12,
            questions_per_quiz: 10,
        }
    }
}

impl PipelineConfig {
    /// All week numbers covered by this configuration
    pub fn weeks(&self) -> RangeInclusive<u32> {
        1..=self.total_weeks
    }

    /// Whether `week` falls inside the configured range
    pub fn contains_week(&self, week: u32) -> bool {
        self.weeks().contains(&week)
    }

    /// Location of the generated MCQ PDF for a week
    pub fn mcq_pdf_path(&self, week: u32) -> PathBuf {
        self.mcq_pdf_dir.join(format!("week_{}_mcqs.pdf", week))
    }

    /// Location of the parsed question bank for a week
    pub fn questions_json_path(&self, week: u32) -> PathBuf {
        self.output_dir.join(format!("week_{}_questions.json", week))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let config = PipelineConfig::default();
        assert_eq!(config.total_weeks, 12);
        assert_eq!(config.questions_per_quiz, 10);
        assert_eq!(
            config.mcq_pdf_path(3),
            PathBuf::from("mcq_pdfs/week_3_mcqs.pdf")
        );
        assert_eq!(
            config.questions_json_path(12),
            PathBuf::from("data/week_12_questions.json")
        );
    }

    #[test]
    fn test_week_range() {
        let config = PipelineConfig {
            total_weeks: 3,
            ..PipelineConfig::default()
        };
        assert_eq!(config.weeks().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(config.contains_week(1));
        assert!(!config.contains_week(0));
        assert!(!config.contains_week(4));
    }
}
