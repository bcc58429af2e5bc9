//! Greedy word wrap to a pixel width.
//!
//! The chat view re-wraps every paragraph on each repaint instead of
//! caching wrapped lines, so lines are built into fixed-capacity buffers
//! and never allocate.
//!
//! Rules:
//! - words are separated by spaces; `\n` ends a line
//! - a line is its words joined by single spaces; it grows while
//!   `line + " " + word` still fits `max_width`
//! - a word wider than `max_width` starts a fresh line and is split per
//!   character; a single character wider than the budget gets its own line
//! - blank lines are never produced (consecutive `\n` collapse)
//! - at most [`MAX_WRAPPED_LINES`] lines per call; the rest is dropped
//! - a line also ends when its [`WRAP_LINE_BYTES`] buffer is full

use platform::TextMetrics;

use crate::config::{MAX_WRAPPED_LINES, WRAP_LINE_BYTES};

/// One wrapped line.
pub type WrappedLine = heapless::String<WRAP_LINE_BYTES>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Word(&'a str),
    Break,
}

/// Iterator over the wrapped lines of a text.
#[derive(Debug, Clone)]
pub struct WrappedLines<'a, M> {
    rest: &'a str,
    emitted: usize,
    max_width: u32,
    metrics: M,
}

/// Wrap `text` to `max_width` pixels as measured by `metrics`.
pub fn wrap<M: TextMetrics>(text: &str, max_width: u32, metrics: M) -> WrappedLines<'_, M> {
    WrappedLines {
        rest: text,
        emitted: 0,
        max_width,
        metrics,
    }
}

/// Number of wrapped lines `text` occupies; an empty text still takes one.
pub fn line_count<M: TextMetrics>(text: &str, max_width: u32, metrics: M) -> usize {
    wrap(text, max_width, metrics).count().max(1)
}

impl<'a, M: TextMetrics> WrappedLines<'a, M> {
    fn fits(&self, text: &str) -> bool {
        self.metrics.text_width(text) <= self.max_width
    }

    /// Next token and the input left after it.
    fn peek(&self) -> Option<(Token<'a>, &'a str)> {
        let rest = self.rest.trim_start_matches(' ');
        if let Some(after) = rest.strip_prefix('\n') {
            return Some((Token::Break, after));
        }
        if rest.is_empty() {
            return None;
        }
        let end = rest.find([' ', '\n']).unwrap_or(rest.len());
        let (word, after) = rest.split_at(end);
        Some((Token::Word(word), after))
    }

    /// `line + " " + word`, or `None` when it does not fit.
    fn extend(&self, line: &WrappedLine, word: &str) -> Option<WrappedLine> {
        let mut candidate = line.clone();
        candidate.push(' ').ok()?;
        candidate.push_str(word).ok()?;
        self.fits(&candidate).then_some(candidate)
    }

    /// Start a line with the head of a word too wide for a line of its own.
    /// Returns the unsplit remainder.
    fn split_word(&self, line: &mut WrappedLine, word: &'a str) -> &'a str {
        for (idx, ch) in word.char_indices() {
            let mut candidate = line.clone();
            if candidate.push(ch).is_err() || (!line.is_empty() && !self.fits(&candidate)) {
                return word.get(idx..).unwrap_or("");
            }
            *line = candidate;
        }
        ""
    }
}

impl<M: TextMetrics> Iterator for WrappedLines<'_, M> {
    type Item = WrappedLine;

    fn next(&mut self) -> Option<WrappedLine> {
        if self.emitted >= MAX_WRAPPED_LINES {
            self.rest = "";
            return None;
        }

        let mut line = WrappedLine::new();
        while let Some((token, after)) = self.peek() {
            match token {
                Token::Break => {
                    self.rest = after;
                    if !line.is_empty() {
                        break;
                    }
                }
                Token::Word(word) if line.is_empty() => {
                    let mut whole = WrappedLine::new();
                    if whole.push_str(word).is_ok() && self.fits(word) {
                        line = whole;
                        self.rest = after;
                    } else {
                        let remainder = self.split_word(&mut line, word);
                        if !remainder.is_empty() {
                            // Resume inside the word; `after` starts right behind it.
                            let consumed = word.len().saturating_sub(remainder.len());
                            self.rest = self
                                .rest
                                .trim_start_matches(' ')
                                .get(consumed..)
                                .unwrap_or("");
                            break;
                        }
                        self.rest = after;
                    }
                }
                Token::Word(word) => match self.extend(&line, word) {
                    Some(longer) => {
                        line = longer;
                        self.rest = after;
                    }
                    None => break,
                },
            }
        }

        if line.is_empty() {
            return None;
        }
        self.emitted = self.emitted.saturating_add(1);
        Some(line)
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use platform::{mocks::FixedMetrics, Font};

    // 7 px per character.
    const BODY: FixedMetrics = FixedMetrics::new(Font::Body);

    fn lines(text: &str, chars: u32) -> Vec<WrappedLine> {
        wrap(text, chars * 7, BODY).collect()
    }

    #[test]
    fn test_fits_on_one_line() {
        assert_eq!(lines("hello world", 20), ["hello world"]);
    }

    #[test]
    fn test_greedy_break() {
        assert_eq!(lines("the quick brown fox", 10), ["the quick", "brown fox"]);
    }

    #[test]
    fn test_exact_width_fits() {
        assert_eq!(lines("abcde fghij", 11), ["abcde fghij"]);
        assert_eq!(lines("abcde fghij", 10), ["abcde", "fghij"]);
    }

    #[test]
    fn test_long_word_hard_split() {
        assert_eq!(lines("abcdefghij", 4), ["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_long_word_after_text_starts_fresh_line() {
        assert_eq!(lines("hi abcdefgh", 4), ["hi", "abcd", "efgh"]);
    }

    #[test]
    fn test_split_remainder_takes_following_words() {
        assert_eq!(lines("abcdef g h", 4), ["abcd", "ef g", "h"]);
    }

    #[test]
    fn test_zero_width_one_char_per_line() {
        assert_eq!(wrap("ab c", 0, BODY).collect::<Vec<_>>(), ["a", "b", "c"]);
    }

    #[test]
    fn test_newlines_flush_and_collapse() {
        assert_eq!(lines("one\ntwo", 20), ["one", "two"]);
        assert_eq!(lines("one\n\n  \ntwo\n", 20), ["one", "two"]);
    }

    #[test]
    fn test_words_joined_by_single_space() {
        assert_eq!(lines("  a  b  ", 20), ["a b"]);
        // Measured as "ab cd", which is exactly five characters.
        assert_eq!(lines("ab   cd", 5), ["ab cd"]);
        assert_eq!(lines("AI:  hi there", 20), ["AI: hi there"]);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(wrap("", 100, BODY).count(), 0);
        assert_eq!(line_count("", 100, BODY), 1);
        assert_eq!(line_count("   \n ", 100, BODY), 1);
    }

    #[test]
    fn test_line_count_matches_lines() {
        assert_eq!(line_count("the quick brown fox", 70, BODY), 2);
    }

    #[test]
    fn test_soft_cap_spans_the_whole_text() {
        let text = "x ".repeat(MAX_WRAPPED_LINES + 50);
        assert_eq!(wrap(&text, 7, BODY).count(), MAX_WRAPPED_LINES);

        let many = "x\n".repeat(MAX_WRAPPED_LINES + 100);
        assert_eq!(wrap(&many, 100, BODY).count(), MAX_WRAPPED_LINES);

        let two = format!("{text}\n{text}");
        assert_eq!(wrap(&two, 7, BODY).count(), MAX_WRAPPED_LINES);
    }

    #[test]
    fn test_line_buffer_full_breaks_line() {
        let word = "y".repeat(WRAP_LINE_BYTES + 10);
        let wrapped = lines(&word, u32::MAX / 7);
        assert_eq!(wrapped.len(), 2);
        assert_eq!(wrapped[0].len(), WRAP_LINE_BYTES);
        assert_eq!(wrapped[1].len(), 10);
    }

    #[test]
    fn test_multibyte_split_on_char_boundary() {
        assert_eq!(lines("ééééé", 2), ["éé", "éé", "é"]);
    }

    #[test]
    fn test_iterator_restarts_when_cloned() {
        let it = wrap("a b c d", 21, BODY);
        let first: Vec<_> = it.clone().collect();
        let second: Vec<_> = it.collect();
        assert_eq!(first, second);
    }
}
