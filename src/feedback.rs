//! Heuristic feedback on a typed answer transcript.
//!
//! [`generate`] is a pure function over the transcript text apart from tip
//! selection, which goes through the injected [`TipPicker`] seam so tests
//! can pin down which tips are chosen. Production code uses
//! [`RandomTipPicker`].
//!
//! The metrics are deliberately simple — this is B1-level language feedback,
//! not linguistic analysis: a word count drives which of four content tips
//! is shown, and one grammar tip plus one vocabulary tip are drawn at random
//! from fixed lists.

// ---------------------------------------------------------------------------
// Tip tables
// ---------------------------------------------------------------------------

/// Content tips, indexed by word-count bucket (fewest words first).
const CONTENT_TIPS: [&str; 4] = [
    "Try to provide more details and specific examples.",
    "Good start, but you could expand on your ideas.",
    "Nice response with some good points!",
    "Excellent answer with clear explanations!",
];

/// Grammar tips, drawn uniformly at random.
const GRAMMAR_TIPS: [&str; 3] = [
    "Consider using more complex sentence structures.",
    "Check your verb tenses and agreement.",
    "Try to use more specific vocabulary related to the topic.",
];

/// Vocabulary tips, drawn uniformly at random.
const VOCABULARY_TIPS: [&str; 3] = [
    "Use more business-related vocabulary.",
    "Try to vary your word choice.",
    "Include some professional terminology.",
];

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// The result of one stop-recording event. Immutable after creation;
/// discarded when the user advances to the next question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Content tip selected by word-count bucket.
    pub content_tip: String,
    /// One grammar tip and one vocabulary tip, space-joined.
    pub language_tip: String,
    /// Whitespace-delimited tokens in the trimmed transcript.
    pub word_count: usize,
    /// Non-empty segments after splitting on `.`, `!`, `?` runs.
    pub sentence_count: usize,
}

// ---------------------------------------------------------------------------
// TipPicker
// ---------------------------------------------------------------------------

/// Source of tip indices. Injected so tests can make tip selection
/// deterministic.
pub trait TipPicker {
    /// Pick an index in `0..len`. `len` is always at least 1.
    fn pick(&mut self, len: usize) -> usize;
}

/// Production picker backed by the thread-local RNG.
#[derive(Debug, Default)]
pub struct RandomTipPicker;

impl TipPicker for RandomTipPicker {
    fn pick(&mut self, len: usize) -> usize {
        use rand::Rng;
        rand::rng().random_range(0..len)
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Count whitespace-delimited words in `text`.
///
/// Empty or whitespace-only input counts as 0 words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count sentences in `text`: segments between runs of `.`, `!`, `?` that
/// contain at least one non-whitespace character.
pub fn sentence_count(text: &str) -> usize {
    text.split(['.', '!', '?'])
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

/// Map a word count onto its content-tip bucket index.
///
/// Buckets are half-open: `[0, 20)`, `[20, 40)`, `[40, 70)`, `[70, ∞)`.
fn content_bucket(words: usize) -> usize {
    match words {
        0..=19 => 0,
        20..=39 => 1,
        40..=69 => 2,
        _ => 3,
    }
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

/// Generate feedback for `transcript`.
///
/// Total over any input string; only the tip draw is non-deterministic, and
/// that is controlled by `picker`.
pub fn generate(transcript: &str, picker: &mut dyn TipPicker) -> Feedback {
    let words = word_count(transcript);
    let sentences = sentence_count(transcript);

    let content_tip = CONTENT_TIPS[content_bucket(words)].to_string();

    let grammar = GRAMMAR_TIPS[picker.pick(GRAMMAR_TIPS.len())];
    let vocabulary = VOCABULARY_TIPS[picker.pick(VOCABULARY_TIPS.len())];

    Feedback {
        content_tip,
        language_tip: format!("{grammar} {vocabulary}"),
        word_count: words,
        sentence_count: sentences,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Picker that always returns a fixed index.
    pub struct FixedPicker(pub usize);

    impl TipPicker for FixedPicker {
        fn pick(&mut self, len: usize) -> usize {
            self.0 % len
        }
    }

    fn n_words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    // ---- word_count ---

    #[test]
    fn empty_transcript_counts_zero_words() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \t\n  "), 0);
    }

    #[test]
    fn words_split_on_any_whitespace_run() {
        assert_eq!(word_count("one two three"), 3);
        assert_eq!(word_count("  one\t two \n three  "), 3);
    }

    // ---- sentence_count ---

    #[test]
    fn empty_transcript_counts_zero_sentences() {
        assert_eq!(sentence_count(""), 0);
        assert_eq!(sentence_count("..."), 0);
    }

    #[test]
    fn consecutive_punctuation_is_one_break() {
        assert_eq!(sentence_count("Hi! Hi!"), 2);
        assert_eq!(sentence_count("Really?! No way..."), 2);
    }

    #[test]
    fn text_without_punctuation_is_one_sentence() {
        assert_eq!(sentence_count("no punctuation"), 1);
    }

    // ---- content tip buckets ---

    #[test]
    fn bucket_boundaries_are_half_open() {
        let mut picker = FixedPicker(0);

        assert_eq!(generate(&n_words(19), &mut picker).content_tip, CONTENT_TIPS[0]);
        assert_eq!(generate(&n_words(20), &mut picker).content_tip, CONTENT_TIPS[1]);
        assert_eq!(generate(&n_words(39), &mut picker).content_tip, CONTENT_TIPS[1]);
        assert_eq!(generate(&n_words(40), &mut picker).content_tip, CONTENT_TIPS[2]);
        assert_eq!(generate(&n_words(69), &mut picker).content_tip, CONTENT_TIPS[2]);
        assert_eq!(generate(&n_words(70), &mut picker).content_tip, CONTENT_TIPS[3]);
    }

    #[test]
    fn empty_transcript_gets_the_shortest_bucket_tip() {
        let mut picker = FixedPicker(0);
        let fb = generate("", &mut picker);
        assert_eq!(fb.word_count, 0);
        assert_eq!(fb.sentence_count, 0);
        assert_eq!(fb.content_tip, CONTENT_TIPS[0]);
    }

    // ---- language tip selection ---

    #[test]
    fn language_tip_joins_grammar_and_vocabulary() {
        let mut picker = FixedPicker(1);
        let fb = generate("Some answer.", &mut picker);
        assert_eq!(
            fb.language_tip,
            format!("{} {}", GRAMMAR_TIPS[1], VOCABULARY_TIPS[1])
        );
    }

    #[test]
    fn picker_indices_select_distinct_tips() {
        let mut a = FixedPicker(0);
        let mut b = FixedPicker(2);
        assert_ne!(
            generate("x", &mut a).language_tip,
            generate("x", &mut b).language_tip
        );
    }

    #[test]
    fn random_picker_stays_in_range() {
        let mut picker = RandomTipPicker;
        for _ in 0..100 {
            assert!(picker.pick(3) < 3);
        }
    }

    // ---- full record ---

    #[test]
    fn seventeen_word_answer_gets_first_tip() {
        let transcript = "I think technology helps businesses a lot by making \
                          things faster and more efficient for everyone involved";
        let mut picker = FixedPicker(0);
        let fb = generate(transcript, &mut picker);

        assert_eq!(fb.word_count, 17);
        assert_eq!(fb.sentence_count, 1);
        assert_eq!(fb.content_tip, CONTENT_TIPS[0]);
    }
}
