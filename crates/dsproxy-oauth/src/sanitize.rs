//! Private key cleanup.
//!
//! Keys reach the proxy through JSON bodies, environment variables and web
//! forms. Any of those can double-escape newlines or carry invisible
//! characters pasted along with the key. The PEM parser needs real line
//! breaks and no blank lines, so every key goes through
//! [`sanitize_private_key`] before it is used.

/// Two-character escape sequence (`\` followed by `n`).
const ESCAPED_NEWLINE: &str = "\\n";

/// U+00A0 NO-BREAK SPACE.
const NBSP: char = '\u{00A0}';

/// Normalize a raw private key into canonical PEM text.
///
/// Never fails and is idempotent. Non-breaking spaces are removed before
/// escape expansion so that removing one can never create a fresh `\n`
/// sequence that a second pass would expand. Every carriage return at the
/// end of a line is dropped, not only the last one.
pub fn sanitize_private_key(raw: &str) -> String {
    let without_nbsp: String = raw.chars().filter(|c| *c != NBSP).collect();

    let expanded = if without_nbsp.contains(ESCAPED_NEWLINE) {
        without_nbsp.replace(ESCAPED_NEWLINE, "\n")
    } else {
        without_nbsp
    };

    expanded
        .split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// First line of a key, for diagnostics.
///
/// Only the PEM armor line is ever logged, never key material.
pub fn first_line(key: &str) -> &str {
    key.lines().next().unwrap_or_default()
}
