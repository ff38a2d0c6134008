//! Fixed-size text chunking.

/// Maximum characters per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Split each text into pieces of at most `max_chars` characters.
///
/// Texts are trimmed first, every piece is trimmed again, and pieces left
/// empty are dropped. Sizes count `char`s, never splitting a code point.
pub fn chunk_texts<S: AsRef<str>>(texts: &[S], max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    for text in texts {
        let chars: Vec<char> = text.as_ref().trim().chars().collect();
        for window in chars.chunks(max_chars) {
            let chunk: String = window.iter().collect();
            let chunk = chunk.trim();
            if !chunk.is_empty() {
                chunks.push(chunk.to_string());
            }
        }
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(chunk_texts(&["  hello world  "], 500), vec!["hello world"]);
    }

    #[test]
    fn test_splits_at_size() {
        let text = "a".repeat(1200);
        let chunks = chunk_texts(&[text], DEFAULT_CHUNK_SIZE);
        let sizes: Vec<usize> = chunks.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![500, 500, 200]);
    }

    #[test]
    fn test_pieces_are_trimmed_and_blank_dropped() {
        let chunks = chunk_texts(&["abc   ", "     ", "de f"], 3);
        assert_eq!(chunks, vec!["abc", "de", "f"]);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let chunks = chunk_texts(&["привет"], 4);
        assert_eq!(chunks, vec!["прив", "ет"]);
    }
}
