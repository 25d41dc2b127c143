//! German spelling normalization.
//!
//! Umlauts and the eszett are expanded into their ASCII spellings so that a
//! word can be played on a plain `a`-`z` keyboard: `ä` → `ae`, `ö` → `oe`,
//! `ü` → `ue`, `ß` → `ss`.

/// Lowercase `input` and expand `ß` to `ss`.
///
/// `char::to_lowercase` already maps the capital sharp S (`ẞ`) to `ß`, so both
/// spellings end up as `ss`.
#[must_use]
pub fn fold_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars().flat_map(char::to_lowercase) {
        if c == 'ß' {
            out.push_str("ss");
        } else {
            out.push(c);
        }
    }
    out
}

/// Map a German string to its playable form.
#[must_use]
pub fn normalize(input: &str) -> String {
    let folded = fold_case(input);
    let mut out = String::with_capacity(folded.len() + 4);
    for c in folded.chars() {
        match c {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'ß' => out.push_str("ss"),
            _ => out.push(c),
        }
    }
    out
}
