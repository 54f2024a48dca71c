//! Pattern definitions and their acceptance predicates.

use std::{fmt, sync::Arc};

use regex::{Captures, Regex};

use crate::{kind::TagKind, style::Style};

/// Interaction callback, invoked with the matched text and the index of the
/// occurrence within its extraction pass.
pub type Callback = Arc<dyn Fn(&str, usize) + Send + Sync>;

/// Transform from a raw match to the text stored on the segment.
pub type RenderFn = fn(&str, &Captures<'_>) -> String;

/// One entry of a pattern registry.
#[derive(Clone)]
pub struct PatternDefinition {
    pub kind: TagKind,
    pub matcher: Regex,
    /// Maximum number of matches converted per extraction pass.
    pub max_matches: Option<usize>,
    pub style: Style,
    pub on_activate: Option<Callback>,
    pub on_hold: Option<Callback>,
    pub render: Option<RenderFn>,
}

impl PatternDefinition {
    #[must_use]
    pub fn new(kind: TagKind, matcher: Regex) -> Self {
        Self {
            kind,
            matcher,
            max_matches: None,
            style: Style::default(),
            on_activate: None,
            on_hold: None,
            render: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_max_matches(mut self, max: usize) -> Self {
        self.max_matches = Some(max);
        self
    }

    #[must_use]
    pub fn with_render(mut self, render: RenderFn) -> Self {
        self.render = Some(render);
        self
    }

    #[must_use]
    pub fn on_activate(mut self, callback: Callback) -> Self {
        self.on_activate = Some(callback);
        self
    }

    #[must_use]
    pub fn on_hold(mut self, callback: Callback) -> Self {
        self.on_hold = Some(callback);
        self
    }

    /// Whether `candidate` is well-formed markup of this pattern's kind.
    ///
    /// `remaining` is the segment text from the current scan position on.
    /// An escaped newline is only a break when text follows it there.
    #[must_use]
    pub fn accepts(&self, candidate: &str, remaining: &str) -> bool {
        accepts(self.kind, candidate, remaining)
    }
}

impl fmt::Debug for PatternDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternDefinition")
            .field("kind", &self.kind)
            .field("matcher", &self.matcher.as_str())
            .field("max_matches", &self.max_matches)
            .field("style", &self.style)
            .field("on_activate", &self.on_activate.is_some())
            .field("on_hold", &self.on_hold.is_some())
            .field("render", &self.render.is_some())
            .finish()
    }
}

const NEWLINE_TOKEN: &str = "\\n";
const BLOCKQUOTE_PREFIX: &str = "> ";

/// Acceptance predicate for a raw regex hit of `kind`.
///
/// Delimited kinds need both delimiters and a non-empty interior, so `****`
/// is not bold and `**` is not italic.
#[must_use]
pub fn accepts(kind: TagKind, candidate: &str, remaining: &str) -> bool {
    if let Some(delim) = kind.delimiter() {
        return candidate.len() > delim.len() * 2
            && candidate.starts_with(delim)
            && candidate.ends_with(delim);
    }
    match kind {
        TagKind::Blockquote => {
            candidate.starts_with(BLOCKQUOTE_PREFIX) && candidate.len() > BLOCKQUOTE_PREFIX.len()
        }
        TagKind::Newline => remaining
            .split_once(NEWLINE_TOKEN)
            .is_some_and(|(_, after)| !after.is_empty()),
        TagKind::Linebreak => {
            let tag = candidate.trim().to_ascii_lowercase();
            tag == "<br />" || tag == "<br/>"
        }
        _ => true,
    }
}
