//! Segment extraction.
//!
//! [`extract`] applies every pattern of a registry, in order, to the parts
//! of the text no earlier pattern has claimed. Each unclaimed part is split
//! into `[prefix, match, suffix]` runs; matches are final and later
//! patterns never look inside them.
//!
//! Matching goes through [`find_from`], which searches from an explicit
//! offset. Compiled expressions carry no scan position, so a registry can be
//! reused across calls without any reset step.

use std::{fmt, sync::Arc};

use regex::{Captures, Regex};

use crate::{
    kind::TagKind,
    pattern::{Callback, PatternDefinition},
    strip::strip_delimiters,
    style::Style,
};

/// Zero-argument action bound to one occurrence.
pub type Action = Arc<dyn Fn() + Send + Sync>;

/// A run of text produced by [`extract`].
#[derive(Clone, Default)]
pub struct TextSegment {
    /// Kind of the owning pattern; `None` for plain text.
    pub kind: Option<TagKind>,
    pub style: Option<Style>,
    pub text: String,
    pub on_activate: Option<Action>,
    pub on_hold: Option<Action>,
}

impl TextSegment {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_match(&self) -> bool { self.kind.is_some() }

    /// Run the tap action. Returns `false` when the segment has none.
    pub fn activate(&self) -> bool {
        self.on_activate.as_ref().map(|action| action()).is_some()
    }

    /// Run the long-press action. Returns `false` when the segment has none.
    pub fn hold(&self) -> bool { self.on_hold.as_ref().map(|action| action()).is_some() }
}

impl fmt::Debug for TextSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextSegment")
            .field("kind", &self.kind)
            .field("style", &self.style)
            .field("text", &self.text)
            .field("on_activate", &self.on_activate.is_some())
            .field("on_hold", &self.on_hold.is_some())
            .finish()
    }
}

/// Working state of a segment during extraction.
enum Working {
    /// Not yet claimed by any pattern.
    Pending(String),
    /// Claimed; later passes leave it alone.
    Claimed(TextSegment),
}

/// Find the next match of `re` in `text` starting at byte offset `start`.
///
/// Anchors and word boundaries see the whole of `text`, so a match found
/// from an offset is the same one a scan over the full text would report.
#[must_use]
pub fn find_from<'t>(re: &Regex, text: &'t str, start: usize) -> Option<Captures<'t>> {
    if start > text.len() {
        return None;
    }
    re.captures_at(text, start)
}

/// Split `text` into plain and matched segments using `patterns` in order.
///
/// Empty segments are dropped, so empty input yields an empty list.
#[must_use]
pub fn extract(text: &str, patterns: &[PatternDefinition]) -> Vec<TextSegment> {
    let mut segments = vec![Working::Pending(text.to_string())];
    for pattern in patterns {
        segments = apply_pattern(segments, pattern);
    }
    segments
        .into_iter()
        .map(|item| match item {
            Working::Pending(text) => TextSegment::plain(text),
            Working::Claimed(segment) => segment,
        })
        .filter(|segment| !segment.text.is_empty())
        .collect()
}

/// Display view of extracted segments: delimiters stripped from matches.
#[must_use]
pub fn render_segments(segments: Vec<TextSegment>) -> Vec<TextSegment> {
    segments
        .into_iter()
        .map(|mut segment| {
            segment.text = strip_delimiters(segment.kind, &segment.text);
            segment
        })
        .collect()
}

fn apply_pattern(segments: Vec<Working>, pattern: &PatternDefinition) -> Vec<Working> {
    let mut out = Vec::with_capacity(segments.len());
    let mut count = 0usize;
    for item in segments {
        match item {
            Working::Pending(text) => split_pending(text, pattern, &mut count, &mut out),
            claimed @ Working::Claimed(_) => out.push(claimed),
        }
    }
    log::debug!("{} pass: {count} match(es)", pattern.kind);
    out
}

/// Split one unclaimed run. A candidate rejected by the acceptance
/// predicate ends the scan: the rest of the run stays plain for this pass.
fn split_pending(text: String, pattern: &PatternDefinition, count: &mut usize, out: &mut Vec<Working>) {
    let mut cursor = 0;
    let mut pieces = Vec::new();
    while pattern.max_matches.is_none_or(|max| *count < max) {
        let Some(caps) = find_from(&pattern.matcher, &text, cursor) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        if whole.is_empty() || !pattern.accepts(whole.as_str(), &text[cursor..]) {
            break;
        }
        if whole.start() > cursor {
            pieces.push(Working::Pending(text[cursor..whole.start()].to_string()));
        }
        log::trace!("{} match #{count} at {}: {:?}", pattern.kind, whole.start(), whole.as_str());
        pieces.push(Working::Claimed(matched_segment(pattern, &caps, *count)));
        *count += 1;
        cursor = whole.end();
    }

    if pieces.is_empty() {
        out.push(Working::Pending(text));
        return;
    }
    out.append(&mut pieces);
    if cursor < text.len() {
        out.push(Working::Pending(text[cursor..].to_string()));
    }
}

fn matched_segment(pattern: &PatternDefinition, caps: &Captures<'_>, index: usize) -> TextSegment {
    let raw = &caps[0];
    let text = match pattern.render {
        Some(render) => render(raw, caps),
        None => raw.to_string(),
    };
    TextSegment {
        kind: Some(pattern.kind),
        style: Some(pattern.style.clone()),
        text,
        on_activate: bind(pattern.on_activate.as_ref(), raw, index),
        on_hold: bind(pattern.on_hold.as_ref(), raw, index),
    }
}

fn bind(callback: Option<&Callback>, value: &str, index: usize) -> Option<Action> {
    callback.map(|callback| {
        let callback = Arc::clone(callback);
        let value = value.to_string();
        Arc::new(move || callback(&value, index)) as Action
    })
}
