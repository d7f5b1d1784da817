//! Bounded-size partitioning of input units.
//!
//! Both entry points are pure and deterministic: chunks preserve input order, partition the
//! input exactly (no unit duplicated or dropped), every chunk holds at most `k` units, and
//! only the last chunk may be smaller. Empty input yields zero chunks.

/// Group an ordered sequence of units into chunks of at most `max_units` consecutive items.
///
/// Used for feedback lists, where one unit is one feedback string.
pub fn chunk_units(units: &[String], max_units: usize) -> Vec<Vec<String>> {
    debug_assert!(max_units >= 1, "chunk size must be at least 1");
    units
        .chunks(max_units.max(1))
        .map(|group| group.to_vec())
        .collect()
}

/// Split prose into chunks of at most `max_words` whitespace-delimited words, each chunk
/// re-joined with single spaces.
///
/// Used for document text, where one unit is one word. All-whitespace input yields no chunks.
pub fn chunk_words(text: &str, max_words: usize) -> Vec<String> {
    debug_assert!(max_words >= 1, "chunk size must be at least 1");
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(max_words.max(1))
        .map(|group| group.join(" "))
        .collect()
}
