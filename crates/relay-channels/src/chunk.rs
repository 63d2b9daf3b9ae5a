/// Split `text` into ordered, contiguous chunks of at most `limit` characters.
///
/// Lengths are counted in Unicode scalar values, never bytes, so a chunk
/// boundary can't land inside a multi-byte character. Every chunk except the
/// last has exactly `limit` characters and concatenating the chunks gives back
/// `text` unchanged. Empty input yields no chunks.
///
/// A `limit` of zero is treated as one.
pub fn split_chunks(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::with_capacity(text.len() / limit + 1);
    let mut remaining = text;

    while !remaining.is_empty() {
        let split_at = remaining
            .char_indices()
            .nth(limit)
            .map(|(idx, _)| idx)
            .unwrap_or(remaining.len());
        chunks.push(remaining[..split_at].to_string());
        remaining = &remaining[split_at..];
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(split_chunks("", 10).is_empty());
    }

    #[test]
    fn short_text_is_single_chunk() {
        let chunks = split_chunks("Hello, world!", 2000);
        assert_eq!(chunks, vec!["Hello, world!".to_string()]);
    }

    #[test]
    fn exactly_limit_is_single_chunk() {
        let text = "a".repeat(4096);
        let chunks = split_chunks(&text, 4096);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn one_over_limit_leaves_single_char_tail() {
        let text = "a".repeat(4097);
        let chunks = split_chunks(&text, 4096);
        assert_eq!(chunks.len(), 2);
        assert_eq!(char_len(&chunks[0]), 4096);
        assert_eq!(char_len(&chunks[1]), 1);
    }

    #[test]
    fn chunks_concatenate_to_original() {
        let text: String = (0..1234).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        for limit in [1, 7, 240, 1000, 1234, 5000] {
            let chunks = split_chunks(&text, limit);
            assert_eq!(chunks.concat(), text, "limit {limit}");

            let (last, full) = chunks.split_last().unwrap();
            assert!(full.iter().all(|c| char_len(c) == limit), "limit {limit}");
            assert!((1..=limit).contains(&char_len(last)), "limit {limit}");
        }
    }

    #[test]
    fn multibyte_characters_are_never_split() {
        // 3 bytes each in UTF-8; byte slicing at 240 would panic mid-char.
        let text = "\u{20ac}".repeat(500);
        let chunks = split_chunks(&text, 240);
        assert_eq!(chunks.len(), 3);
        assert_eq!(char_len(&chunks[0]), 240);
        assert_eq!(char_len(&chunks[2]), 20);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn whitespace_is_preserved_at_boundaries() {
        let chunks = split_chunks("ab cd ef", 3);
        assert_eq!(chunks, vec!["ab ", "cd ", "ef"]);
    }

    #[test]
    fn zero_limit_does_not_loop_forever() {
        let chunks = split_chunks("abc", 0);
        assert_eq!(chunks, vec!["a", "b", "c"]);
    }
}
