//! Line-break escape convention for cell text.
//!
//! The transport step may not preserve quoted multi-line cells, so authors
//! write a literal two-character `\n` token instead of a real newline. A
//! literal backslash is written as `\\` so that decoding stays unambiguous.

/// Decodes the `\n` / `\\` escape tokens in a single left-to-right pass.
///
/// Each token is interpreted exactly once; the output of `decode` is never
/// re-scanned, so already-decoded text cannot be double-decoded. A trailing
/// lone backslash or an unknown escape is kept verbatim.
#[must_use]
pub fn decode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Encodes real line breaks and backslashes into the escape tokens.
///
/// Exact inverse of [`decode`]: `decode(&encode(s)) == s` for any `s`.
#[must_use]
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\\' => out.push_str("\\\\"),
            other => out.push(other),
        }
    }

    out
}
