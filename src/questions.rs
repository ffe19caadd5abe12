//! The question bank — a fixed, cyclic list of discussion questions.
//!
//! The built-in list covers business-English interview topics. Users can
//! replace it by dropping a `questions.json` file (a JSON array of strings)
//! into the platform config directory:
//!
//! | Platform | Path |
//! |----------|------|
//! | Windows  | `%APPDATA%\interview-practice\questions.json` |
//! | macOS    | `~/Library/Application Support/interview-practice/questions.json` |
//! | Linux    | `~/.config/interview-practice/questions.json` |
//!
//! An unreadable, invalid, or empty file falls back to the built-ins with a
//! logged warning — the app never starts with zero questions.

use std::path::Path;

/// Built-in discussion questions, used when no user question file exists.
const BUILTIN_QUESTIONS: &[&str] = &[
    "How has technology changed the way businesses operate?",
    "How do managers keep employees motivated?",
    "How should managers handle workplace conflicts?",
    "Why is networking important for career growth?",
    "Why is market research important? Discuss different methods businesses use to gather data on customers.",
];

// ---------------------------------------------------------------------------
// QuestionBank
// ---------------------------------------------------------------------------

/// An immutable, ordered, index-addressed list of questions that wraps at
/// the end.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<String>,
}

impl QuestionBank {
    /// The built-in question list.
    pub fn builtin() -> Self {
        Self {
            questions: BUILTIN_QUESTIONS.iter().map(|q| q.to_string()).collect(),
        }
    }

    /// Build a bank from an explicit list.
    ///
    /// Returns `None` when `questions` is empty — a bank always holds at
    /// least one question.
    pub fn from_list(questions: Vec<String>) -> Option<Self> {
        if questions.is_empty() {
            None
        } else {
            Some(Self { questions })
        }
    }

    /// Load the user question file at `path`, falling back to the built-in
    /// list when the file is missing, unreadable, invalid JSON, or empty.
    pub fn load_or_builtin(path: &Path) -> Self {
        if !path.exists() {
            return Self::builtin();
        }

        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("failed to read {} ({e}); using built-in questions", path.display());
                return Self::builtin();
            }
        };

        match serde_json::from_str::<Vec<String>>(&data) {
            Ok(list) => match Self::from_list(list) {
                Some(bank) => {
                    log::info!("loaded {} questions from {}", bank.len(), path.display());
                    bank
                }
                None => {
                    log::warn!("{} contains no questions; using built-ins", path.display());
                    Self::builtin()
                }
            },
            Err(e) => {
                log::warn!("invalid question file {} ({e}); using built-ins", path.display());
                Self::builtin()
            }
        }
    }

    /// Number of questions in the bank (always at least 1).
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns `false` — a bank is never empty. Provided for symmetry with
    /// `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The question at `index`. Indices are taken modulo the bank length, so
    /// any index is valid.
    pub fn get(&self, index: usize) -> &str {
        &self.questions[index % self.questions.len()]
    }

    /// The index following `index`, wrapping to 0 after the last question.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.questions.len()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_bank_has_five_questions() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.len(), 5);
        assert!(bank.get(0).starts_with("How has technology"));
    }

    #[test]
    fn next_index_increments_then_wraps() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.next_index(0), 1);
        assert_eq!(bank.next_index(3), 4);
        assert_eq!(bank.next_index(4), 0);
    }

    #[test]
    fn get_is_total_over_any_index() {
        let bank = QuestionBank::builtin();
        assert_eq!(bank.get(5), bank.get(0));
        assert_eq!(bank.get(12), bank.get(2));
    }

    #[test]
    fn from_list_rejects_empty() {
        assert!(QuestionBank::from_list(Vec::new()).is_none());
        let bank = QuestionBank::from_list(vec!["Only one?".into()]).unwrap();
        assert_eq!(bank.len(), 1);
        assert_eq!(bank.next_index(0), 0);
    }

    #[test]
    fn load_missing_file_uses_builtins() {
        let dir = tempfile::tempdir().expect("temp dir");
        let bank = QuestionBank::load_or_builtin(&dir.path().join("questions.json"));
        assert_eq!(bank.len(), 5);
    }

    #[test]
    fn load_valid_file_overrides_builtins() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("questions.json");
        std::fs::write(&path, r#"["Tell me about yourself.", "Why this role?"]"#)
            .expect("write");

        let bank = QuestionBank::load_or_builtin(&path);
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.get(1), "Why this role?");
    }

    #[test]
    fn load_invalid_json_falls_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("questions.json");
        std::fs::write(&path, "not json").expect("write");

        let bank = QuestionBank::load_or_builtin(&path);
        assert_eq!(bank.len(), 5);
    }

    #[test]
    fn load_empty_list_falls_back() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("questions.json");
        std::fs::write(&path, "[]").expect("write");

        let bank = QuestionBank::load_or_builtin(&path);
        assert_eq!(bank.len(), 5);
    }
}
