//! Fixed-window chunking for the content index.

/// Split `content` into windows of `size` characters, each sharing
/// `overlap` characters with the previous one.
///
/// Empty content yields no chunks. `overlap` must be smaller than `size`.
pub fn chunk_content(content: &str, size: usize, overlap: usize) -> Vec<String> {
    if content.is_empty() || size == 0 {
        return Vec::new();
    }
    let step = size.saturating_sub(overlap).max(1);
    let chars: Vec<char> = content.chars().collect();

    let mut chunks = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_has_no_chunks() {
        assert!(chunk_content("", 10, 2).is_empty());
    }

    #[test]
    fn test_short_content_is_one_chunk() {
        assert_eq!(chunk_content("hello", 10, 2), vec!["hello".to_string()]);
    }

    #[test]
    fn test_windows_overlap() {
        let chunks = chunk_content("abcdefghij", 4, 1);
        assert_eq!(chunks, vec!["abcd", "defg", "ghij"]);
    }

    #[test]
    fn test_multibyte_characters_are_not_split() {
        let chunks = chunk_content("ééééé", 2, 0);
        assert_eq!(chunks, vec!["éé", "éé", "é"]);
    }
}
