//! Word statistics and reading-time estimation
//!
//! The two counting paths are intentionally different and may disagree:
//! the word count tokenizes the raw authored content by whitespace (a known
//! undercount for scripts without space-delimited words), while the reading
//! time segments the stripped rendered output. Raw authoring stats and a
//! rendered reading estimate serve different purposes.

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::artifact::WordCount;
use crate::infrastructure::render::html_to_text;

/// Average adult reading speed used for the time-to-read estimate
pub const AVERAGE_WORDS_PER_MINUTE: f64 = 265.0;

/// Naive whitespace-delimited word count over the raw document content
pub fn word_count(content: &str) -> WordCount {
    WordCount {
        words: content.split_whitespace().count(),
    }
}

/// Estimated reading time in whole minutes, derived from rendered output.
///
/// Strips markup, counts words, divides by the average reading speed,
/// rounds to nearest, and clamps to a minimum of one minute.
pub fn time_to_read(rendered_html: &str) -> u32 {
    let text = html_to_text(rendered_html);
    let words = text.unicode_words().count();
    let minutes = (words as f64 / AVERAGE_WORDS_PER_MINUTE).round() as u32;

    minutes.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html_of_words(count: usize) -> String {
        let words = vec!["word"; count].join(" ");
        format!("<p>{}</p>\n", words)
    }

    #[test]
    fn test_word_count_is_whitespace_delimited() {
        assert_eq!(word_count("one two  three\nfour").words, 4);
    }

    #[test]
    fn test_word_count_counts_markup_tokens() {
        // Raw content, not the tree: markup characters count as-written
        assert_eq!(word_count("# Title with *stars*").words, 4);
    }

    #[test]
    fn test_word_count_empty() {
        assert_eq!(word_count("").words, 0);
        assert_eq!(word_count("   \n  ").words, 0);
    }

    #[test]
    fn test_time_to_read_floor_is_one() {
        assert_eq!(time_to_read("<p>tiny</p>"), 1);
        assert_eq!(time_to_read(""), 1);
    }

    #[test]
    fn test_time_to_read_at_reading_speed() {
        assert_eq!(time_to_read(&html_of_words(265)), 1);
        assert_eq!(time_to_read(&html_of_words(530)), 2);
    }

    #[test]
    fn test_time_to_read_rounds_to_nearest() {
        // 400 words / 265 wpm = 1.51 minutes, rounds to 2
        assert_eq!(time_to_read(&html_of_words(400)), 2);
        // 330 words / 265 wpm = 1.24 minutes, rounds to 1
        assert_eq!(time_to_read(&html_of_words(330)), 1);
    }

    #[test]
    fn test_counting_paths_can_disagree() {
        // Hyphenated compounds: one whitespace token, two unicode words
        let raw = "well-known fact";
        assert_eq!(word_count(raw).words, 2);
        assert_eq!(raw.unicode_words().count(), 3);
    }
}
