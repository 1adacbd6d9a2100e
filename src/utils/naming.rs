/// Longest directory token `sanitize` produces
pub const MAX_NAME_LEN: usize = 50;

/// Name used when nothing usable survives sanitizing
pub const UNKNOWN_NAME: &str = "unknown";

/// Reduce an arbitrary family-ish string to a lowercase ASCII alphanumeric
/// directory token of at most 50 characters.
///
/// Separators, whitespace, punctuation and non-ASCII characters are dropped,
/// and a string that is an exact repetition of a shorter block ("ababab") is
/// collapsed to that block. Never returns an empty string.
pub fn sanitize(raw: &str) -> String {
    let cleaned: String = raw
        .to_ascii_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '.'))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();

    let mut name = collapse_repetition(&cleaned).to_string();
    if name.is_empty() {
        name = UNKNOWN_NAME.to_string();
    }

    if name.len() > MAX_NAME_LEN {
        // ASCII only at this point, so byte truncation is safe
        name.truncate(MAX_NAME_LEN);
        name = collapse_repetition(&name).to_string();
    }

    name
}

/// Return the shortest block that tiles `s` exactly, or `s` itself when no
/// shorter block does. `"abcabc"` gives `"abc"`, `"abcab"` is returned as is.
pub fn collapse_repetition(s: &str) -> &str {
    let len = s.len();
    let bytes = s.as_bytes();

    for period in 1..=len / 2 {
        if len % period != 0 || !s.is_char_boundary(period) {
            continue;
        }
        let block = &bytes[..period];
        if bytes.chunks(period).all(|chunk| chunk == block) {
            return &s[..period];
        }
    }

    s
}
