//! Reading-time estimate for post bodies

use serde::Serialize;
use std::fmt;

/// Words per minute used when the site config does not override it
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 225;

/// Estimated minutes needed to read a post, displayed as `<N>min`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ReadingTime {
    pub minutes: u32,
}

impl ReadingTime {
    /// Estimate from whitespace-separated words, rounding up.
    ///
    /// Returns `None` for an empty body. A rate of zero is treated as one.
    pub fn estimate(text: &str, words_per_minute: u32) -> Option<Self> {
        let words = count_words(text);
        if words == 0 {
            return None;
        }
        let words = u32::try_from(words).unwrap_or(u32::MAX);
        let minutes = words.div_ceil(words_per_minute.max(1));
        Some(Self { minutes })
    }
}

impl fmt::Display for ReadingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}min", self.minutes)
    }
}

/// Count whitespace-separated words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_exact_minutes() {
        let rt = ReadingTime::estimate(&words(450), 225).unwrap();
        assert_eq!(rt.minutes, 2);
        assert_eq!(rt.to_string(), "2min");
    }

    #[test]
    fn test_rounds_up() {
        assert_eq!(ReadingTime::estimate(&words(451), 225).unwrap().minutes, 3);
        assert_eq!(ReadingTime::estimate("one", 225).unwrap().to_string(), "1min");
    }

    #[test]
    fn test_empty_body_has_no_estimate() {
        assert_eq!(ReadingTime::estimate("", 225), None);
        assert_eq!(ReadingTime::estimate("  \n\t ", 225), None);
    }

    #[test]
    fn test_zero_rate_does_not_divide_by_zero() {
        assert_eq!(ReadingTime::estimate(&words(3), 0).unwrap().minutes, 3);
    }

    #[test]
    fn test_count_words_ignores_line_breaks() {
        assert_eq!(count_words("a b\nc\n\n  d"), 4);
    }
}
