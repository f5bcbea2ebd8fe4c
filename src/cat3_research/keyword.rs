//! Keyword occurrence tests.

/// Whether `term` occurs in `text` preceded by whitespace and followed by
/// whitespace, optionally after a plural `s`.
///
/// A term at the very start or end of `text` does not count.
#[must_use]
pub fn find_delimited(text: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    text.char_indices()
        .filter(|&(_, c)| c.is_whitespace())
        .any(|(i, c)| {
            let start = i + c.len_utf8();
            text[start..]
                .strip_prefix(term)
                .is_some_and(|rest| {
                    let rest = match rest.strip_prefix('s') {
                        Some(after_s) if after_s.starts_with(char::is_whitespace) => after_s,
                        _ => rest,
                    };
                    rest.starts_with(char::is_whitespace)
                })
        })
}

/// Whether `" " + term + " "` is a substring of `text`.
#[must_use]
pub fn contains_padded(text: &str, term: &str) -> bool {
    text.contains(&format!(" {term} "))
}
