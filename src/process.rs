//! High-level text processing: normalise, extract, render and print.

use std::borrow::Cow;

use crate::{
    extract::{TextSegment, extract, render_segments},
    html::normalize_html,
    kind::TagKind,
    pattern::PatternDefinition,
};

/// Label printed for plain segments.
pub const PLAIN_LABEL: &str = "text";

/// Parse a `KIND=N` match cap.
///
/// # Errors
/// Returns a message if the kind is unknown or the count is not a number.
pub fn parse_limit(spec: &str) -> Result<(TagKind, usize), String> {
    let (kind, count) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected KIND=N, got `{spec}`"))?;
    let kind = kind.parse::<TagKind>().map_err(|e| e.to_string())?;
    let count = count
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid count in `{spec}`: {e}"))?;
    Ok((kind, count))
}

/// Cap the matches of each listed kind. Later entries win.
pub fn apply_limits(patterns: &mut [PatternDefinition], limits: &[(TagKind, usize)]) {
    for &(kind, max) in limits {
        for pattern in patterns.iter_mut().filter(|p| p.kind == kind) {
            pattern.max_matches = Some(max);
        }
    }
}

/// Run the full pipeline over one input.
#[must_use]
pub fn process_text(
    text: &str,
    patterns: &[PatternDefinition],
    html: bool,
    render: bool,
) -> Vec<TextSegment> {
    let source = if html {
        Cow::Owned(normalize_html(text))
    } else {
        Cow::Borrowed(text)
    };
    let segments = extract(&source, patterns);
    if render {
        render_segments(segments)
    } else {
        segments
    }
}

/// Escape backslashes, newlines and tabs so a segment fits on one line.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '\n', '\t']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// One `KIND<TAB>TEXT` line per segment.
#[must_use]
pub fn format_segments(segments: &[TextSegment]) -> Vec<String> {
    segments
        .iter()
        .map(|segment| {
            let label = segment.kind.map_or(PLAIN_LABEL, TagKind::name);
            format!("{label}\t{}", escape(&segment.text))
        })
        .collect()
}
