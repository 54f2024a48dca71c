//! Split chat-style text into styled, tappable segments.
//!
//! A registry of [`PatternDefinition`]s (phone numbers, emails, URLs,
//! mentions, hashtags and a small inline markup language) is applied in
//! order by [`extract`]. Matched segments carry their pattern's style and
//! callbacks; a [`Dispatcher`] turns taps into URIs for an [`Opener`].

#[macro_use]
mod macros;

pub mod actions;
pub mod error;
pub mod extract;
pub mod html;
pub mod kind;
pub mod logging;
pub mod pattern;
pub mod process;
pub mod registry;
pub mod strip;
pub mod style;

pub use actions::{
    Clipboard,
    CommandOpener,
    Dispatch,
    Dispatcher,
    Launch,
    LogNotifier,
    LogReporter,
    MemoryClipboard,
    Notifier,
    Opener,
    Platform,
    RecordingOpener,
    Reporter,
    action_uri,
    copy_link,
};
pub use error::DispatchError;
pub use extract::{Action, TextSegment, extract, find_from, render_segments};
pub use html::normalize_html;
pub use kind::TagKind;
pub use pattern::{Callback, PatternDefinition};
pub use process::{apply_limits, format_segments, parse_limit, process_text};
pub use registry::{Hooks, default_patterns};
pub use strip::strip_delimiters;
pub use style::{Modifiers, Style, Theme};
