//! Pull-based character sources
//!
//! The tokenizer never reads a line itself; it pulls chunks of text from a [`CharSource`]
//! until the source reports the end of its input. This keeps the tokenizer independent of
//! how the text is obtained: a string that is already in memory, input that arrives in
//! pieces, or anything a closure can produce.

/// A source of text chunks. `None` signals the end of input.
pub trait CharSource {
    fn next_chunk(&mut self) -> Option<String>;
}

impl<F> CharSource for F
where
    F: FnMut() -> Option<String>,
{
    fn next_chunk(&mut self) -> Option<String> {
        self()
    }
}

/// Yields a whole string as a single chunk.
#[derive(Debug, Clone)]
pub struct StrSource {
    text: Option<String>,
}

impl StrSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

impl CharSource for StrSource {
    fn next_chunk(&mut self) -> Option<String> {
        self.text.take()
    }
}

/// Yields a string in chunks of at most `size` characters.
#[derive(Debug, Clone)]
pub struct ChunkedSource {
    chars: Vec<char>,
    size: usize,
    offset: usize,
}

impl ChunkedSource {
    /// A `size` of zero is treated as one.
    pub fn new(text: &str, size: usize) -> Self {
        Self {
            chars: text.chars().collect(),
            size: size.max(1),
            offset: 0,
        }
    }
}

impl CharSource for ChunkedSource {
    fn next_chunk(&mut self) -> Option<String> {
        if self.offset >= self.chars.len() {
            return None;
        }
        let end = (self.offset + self.size).min(self.chars.len());
        let chunk = self.chars[self.offset..end].iter().collect();
        self.offset = end;
        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(mut source: impl CharSource) -> Vec<String> {
        std::iter::from_fn(|| source.next_chunk()).collect()
    }

    #[test]
    fn test_str_source_yields_once() {
        assert_eq!(drain(StrSource::new("foo bar")), vec!["foo bar"]);
    }

    #[test]
    fn test_chunked_source_splits_on_characters() {
        assert_eq!(drain(ChunkedSource::new("héllo", 2)), vec!["hé", "ll", "o"]);
    }

    #[test]
    fn test_chunked_source_zero_size() {
        assert_eq!(drain(ChunkedSource::new("ab", 0)), vec!["a", "b"]);
    }

    #[test]
    fn test_empty_sources() {
        assert!(drain(ChunkedSource::new("", 4)).is_empty());
        assert_eq!(drain(StrSource::new("")), vec![""]);
    }

    #[test]
    fn test_closure_source() {
        let mut lines = vec!["b".to_string(), "a".to_string()];
        assert_eq!(drain(move || lines.pop()), vec!["a", "b"]);
    }
}
