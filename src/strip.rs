//! Display text for matched segments.

use crate::kind::TagKind;

/// Remove markup delimiters from a matched segment's raw text.
///
/// Delimited kinds and blockquotes gain one trailing space so adjacent runs
/// do not run together once the punctuation is gone. Line breaks collapse to
/// a single `\n`. Any other kind, and plain text, is returned unchanged.
///
/// # Examples
///
/// ```
/// use tagtext::{TagKind, strip_delimiters};
///
/// assert_eq!(strip_delimiters(Some(TagKind::BoldStar), "**hi**"), "hi ");
/// assert_eq!(strip_delimiters(None, "**hi**"), "**hi**");
/// ```
#[must_use]
pub fn strip_delimiters(kind: Option<TagKind>, text: &str) -> String {
    let Some(kind) = kind else {
        return text.to_string();
    };
    match kind {
        TagKind::BoldStar | TagKind::BoldUnderscore | TagKind::Strikethrough => trim_ends(text, 2),
        TagKind::ItalicStar | TagKind::ItalicUnderscore | TagKind::Underline => trim_ends(text, 1),
        TagKind::Blockquote => {
            let mut out: String = text.chars().skip(2).collect();
            out.push(' ');
            out
        }
        TagKind::Newline | TagKind::Linebreak => "\n".to_string(),
        TagKind::Phone | TagKind::Email | TagKind::Url | TagKind::Username | TagKind::Hashtag => {
            text.to_string()
        }
    }
}

/// Drop `n` characters from each end and append a space.
fn trim_ends(text: &str, n: usize) -> String {
    let len = text.chars().count();
    let mut out: String = text.chars().skip(n).take(len.saturating_sub(n * 2)).collect();
    out.push(' ');
    out
}
