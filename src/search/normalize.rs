//! Key normalization shared by shard loading and query parsing.

/// Reduces symbol text to the normal form used for matching: characters
/// outside the symbol-safe set (letters, digits, underscore) are stripped
/// and the remainder is lower-cased.
///
/// The original display text is never touched; this form exists only as a
/// map key or query needle. Applying the same function on both sides is
/// what makes matching case-insensitive and punctuation-blind: `Add`,
/// `add` and `operator+=` all reduce deterministically (`add`, `add`,
/// `operator`).
///
/// Returns an empty string for text with no searchable characters; callers
/// decide whether that is malformed input (shard entries) or a rejected
/// query.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .flat_map(char::to_lowercase)
        .collect()
}
