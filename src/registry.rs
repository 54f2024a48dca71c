//! The default pattern registry.
//!
//! Order matters: a pattern earlier in the list claims text before later
//! ones see it. Emails precede usernames so `a@b.com` is never read as the
//! mention `@b`, and `**` precedes `*` so bold is not read as two italics.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::{
    actions::Dispatch,
    kind::TagKind,
    pattern::{Callback, PatternDefinition},
    style::{Modifiers, Style, Theme},
};

// Both ends are anchored so the tail of a longer digit run is not a number.
// `\B` before `+` or `(` stands in for a lookbehind on the preceding space.
static PHONE_RE: LazyLock<Regex> = lazy_regex!(
    r"(?:\B\+\d{1,3}[\s.-]?(?:\(\d{3}\)|\d{3})|\B\(\d{3}\)|\b\d{3})[\s.-]?\d{3}[\s.-]?\d{4}\b",
    "phone pattern regex should compile"
);
static EMAIL_RE: LazyLock<Regex> = lazy_regex!(
    r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
    "email pattern regex should compile"
);
static URL_RE: LazyLock<Regex> = lazy_regex!(
    r#"(?i)\b(?:https?://|www\.)[^\s<>]*[^\s<>.,;:!?)'"*_~]|\b[a-z0-9-]+(?:\.[a-z0-9-]+)*\.(?:com|org|net|io|dev|app|co|edu|gov)\b(?:/[^\s<>]*[^\s<>.,;:!?)'"*_~])?"#,
    "url pattern regex should compile"
);
static USERNAME_RE: LazyLock<Regex> = lazy_regex!(r"@\w+", "username pattern regex should compile");
static HASHTAG_RE: LazyLock<Regex> = lazy_regex!(r"#\w+", "hashtag pattern regex should compile");
static BOLD_STAR_RE: LazyLock<Regex> = lazy_regex!(r"\*\*.*?\*\*", "bold pattern regex should compile");
static BOLD_UNDERSCORE_RE: LazyLock<Regex> =
    lazy_regex!(r"__.*?__", "bold pattern regex should compile");
static ITALIC_STAR_RE: LazyLock<Regex> = lazy_regex!(r"\*.*?\*", "italic pattern regex should compile");
static ITALIC_UNDERSCORE_RE: LazyLock<Regex> =
    lazy_regex!(r"_.*?_", "italic pattern regex should compile");
static STRIKETHROUGH_RE: LazyLock<Regex> =
    lazy_regex!(r"~~.*?~~", "strikethrough pattern regex should compile");
static UNDERLINE_RE: LazyLock<Regex> = lazy_regex!(r"~.*?~", "underline pattern regex should compile");
static BLOCKQUOTE_RE: LazyLock<Regex> =
    lazy_regex!(r"(?m)^> [^\r\n]*", "blockquote pattern regex should compile");
static NEWLINE_RE: LazyLock<Regex> = lazy_regex!(r"\\n", "newline pattern regex should compile");
static LINEBREAK_RE: LazyLock<Regex> =
    lazy_regex!(r"(?i)[ \t]*<\s*br\s*/?\s*>[ \t]*", "line break pattern regex should compile");

/// Interaction handlers a registry closes over.
#[derive(Clone, Default)]
pub struct Hooks {
    /// Receives taps on phone numbers, emails, links, hashtags and underlined text.
    pub dispatcher: Option<Arc<dyn Dispatch>>,
    /// Receives taps on `@username` mentions.
    pub on_username: Option<Callback>,
    /// Receives long presses on links, usually [`crate::copy_link`].
    pub on_link_hold: Option<Callback>,
}

/// Build the default registry, in evaluation order.
///
/// # Examples
///
/// ```
/// use tagtext::{Hooks, TagKind, Theme, default_patterns, extract};
///
/// let patterns = default_patterns(&Theme::default(), &Hooks::default());
/// let segments = extract("ping @sam", &patterns);
/// assert_eq!(segments[1].kind, Some(TagKind::Username));
/// ```
#[must_use]
pub fn default_patterns(theme: &Theme, hooks: &Hooks) -> Vec<PatternDefinition> {
    let link = Style {
        modifiers: Modifiers::UNDERLINE,
        color: Some(theme.link.clone()),
    };
    let quote = Style {
        modifiers: Modifiers::QUOTE | Modifiers::ITALIC,
        color: Some(theme.quote.clone()),
    };
    let dispatch = |kind| hooks.dispatcher.as_ref().map(|d| dispatch_to(d, kind));

    let entries = [
        (TagKind::Phone, &PHONE_RE, link.clone()),
        (TagKind::Email, &EMAIL_RE, link.clone()),
        (TagKind::Url, &URL_RE, link),
        (TagKind::Username, &USERNAME_RE, Style::colored(&theme.mention)),
        (TagKind::Hashtag, &HASHTAG_RE, Style::colored(&theme.hashtag)),
        (TagKind::BoldStar, &BOLD_STAR_RE, Style::with_modifiers(Modifiers::BOLD)),
        (TagKind::BoldUnderscore, &BOLD_UNDERSCORE_RE, Style::with_modifiers(Modifiers::BOLD)),
        (TagKind::ItalicStar, &ITALIC_STAR_RE, Style::with_modifiers(Modifiers::ITALIC)),
        (TagKind::ItalicUnderscore, &ITALIC_UNDERSCORE_RE, Style::with_modifiers(Modifiers::ITALIC)),
        (TagKind::Strikethrough, &STRIKETHROUGH_RE, Style::with_modifiers(Modifiers::STRIKETHROUGH)),
        (TagKind::Underline, &UNDERLINE_RE, Style::with_modifiers(Modifiers::UNDERLINE)),
        (TagKind::Blockquote, &BLOCKQUOTE_RE, quote),
        (TagKind::Newline, &NEWLINE_RE, Style::plain()),
        (TagKind::Linebreak, &LINEBREAK_RE, Style::plain()),
    ];

    entries
        .into_iter()
        .map(|(kind, re, style)| {
            let mut pattern = PatternDefinition::new(kind, Regex::clone(re)).with_style(style);
            pattern.on_activate = match kind {
                TagKind::Phone
                | TagKind::Email
                | TagKind::Url
                | TagKind::Hashtag
                | TagKind::Underline => dispatch(kind),
                TagKind::Username => hooks.on_username.clone(),
                _ => None,
            };
            if kind == TagKind::Url {
                pattern.on_hold = hooks.on_link_hold.clone();
            }
            pattern
        })
        .collect()
}

fn dispatch_to(dispatcher: &Arc<dyn Dispatch>, kind: TagKind) -> Callback {
    let dispatcher = Arc::clone(dispatcher);
    Arc::new(move |value: &str, _index: usize| dispatcher.dispatch(value, kind))
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use rstest::rstest;

    use super::*;
    use crate::extract::extract;

    #[derive(Default)]
    struct Spy(Mutex<Vec<(String, TagKind)>>);

    impl Dispatch for Spy {
        fn dispatch(&self, value: &str, kind: TagKind) {
            self.0.lock().unwrap().push((value.to_string(), kind));
        }
    }

    fn kinds(text: &str) -> Vec<(Option<TagKind>, String)> {
        extract(text, &default_patterns(&Theme::default(), &Hooks::default()))
            .into_iter()
            .map(|s| (s.kind, s.text))
            .collect()
    }

    #[test]
    fn registry_follows_kind_order() {
        let patterns = default_patterns(&Theme::default(), &Hooks::default());
        let order: Vec<_> = patterns.iter().map(|p| p.kind).collect();
        assert_eq!(order, TagKind::ALL.to_vec());
    }

    #[test]
    fn only_interactive_kinds_bind_taps() {
        let hooks = Hooks {
            dispatcher: Some(Arc::new(Spy::default())),
            on_username: Some(Arc::new(|_: &str, _: usize| {})),
            on_link_hold: Some(Arc::new(|_: &str, _: usize| {})),
        };
        for pattern in default_patterns(&Theme::default(), &hooks) {
            let tappable = matches!(
                pattern.kind,
                TagKind::Phone
                    | TagKind::Email
                    | TagKind::Url
                    | TagKind::Username
                    | TagKind::Hashtag
                    | TagKind::Underline
            );
            assert_eq!(pattern.on_activate.is_some(), tappable, "{}", pattern.kind);
            assert_eq!(pattern.on_hold.is_some(), pattern.kind == TagKind::Url);
        }
    }

    #[test]
    fn taps_reach_the_dispatcher() {
        let spy = Arc::new(Spy::default());
        let hooks = Hooks {
            dispatcher: Some(spy.clone()),
            ..Hooks::default()
        };
        let patterns = default_patterns(&Theme::default(), &hooks);
        for segment in extract("call 555-123-4567 or see #news", &patterns) {
            segment.activate();
        }
        assert_eq!(
            *spy.0.lock().unwrap(),
            vec![
                ("555-123-4567".to_string(), TagKind::Phone),
                ("#news".to_string(), TagKind::Hashtag),
            ]
        );
    }

    #[test]
    fn recognises_contact_kinds() {
        assert_eq!(
            kinds("mail a@b.com or visit https://x.io/a_b."),
            vec![
                (None, "mail ".to_string()),
                (Some(TagKind::Email), "a@b.com".to_string()),
                (None, " or visit ".to_string()),
                (Some(TagKind::Url), "https://x.io/a_b".to_string()),
                (None, ".".to_string()),
            ]
        );
    }

    #[rstest]
    #[case("call +1 (555) 123-4567", "+1 (555) 123-4567")]
    #[case("call (555) 123-4567", "(555) 123-4567")]
    #[case("call +15551234567", "+15551234567")]
    #[case("call 555.123.4567", "555.123.4567")]
    fn phone_shapes(#[case] text: &str, #[case] number: &str) {
        assert_eq!(
            kinds(text),
            vec![
                (None, "call ".to_string()),
                (Some(TagKind::Phone), number.to_string()),
            ]
        );
    }

    #[rstest]
    #[case("order 1234567890123 shipped")]
    #[case("id 15551234567890")]
    #[case("ref abc5551234567")]
    fn longer_digit_runs_are_not_phones(#[case] text: &str) {
        assert_eq!(kinds(text), vec![(None, text.to_string())]);
    }

    #[test]
    fn bold_is_not_two_italics() {
        assert_eq!(
            kinds("**a** *b*"),
            vec![
                (Some(TagKind::BoldStar), "**a**".to_string()),
                (None, " ".to_string()),
                (Some(TagKind::ItalicStar), "*b*".to_string()),
            ]
        );
    }

    #[test]
    fn strikethrough_precedes_underline() {
        assert_eq!(
            kinds("~~x~~ ~y~"),
            vec![
                (Some(TagKind::Strikethrough), "~~x~~".to_string()),
                (None, " ".to_string()),
                (Some(TagKind::Underline), "~y~".to_string()),
            ]
        );
    }

    #[test]
    fn blockquote_takes_the_line() {
        assert_eq!(
            kinds("> quoted\nreply"),
            vec![
                (Some(TagKind::Blockquote), "> quoted".to_string()),
                (None, "\nreply".to_string()),
            ]
        );
    }

    #[test]
    fn blockquote_stops_before_crlf() {
        assert_eq!(
            kinds("> quoted\r\nreply"),
            vec![
                (Some(TagKind::Blockquote), "> quoted".to_string()),
                (None, "\r\nreply".to_string()),
            ]
        );
    }

    #[test]
    fn line_breaks() {
        assert_eq!(
            kinds("a<br />b\\nc"),
            vec![
                (None, "a".to_string()),
                (Some(TagKind::Linebreak), "<br />".to_string()),
                (None, "b".to_string()),
                (Some(TagKind::Newline), "\\n".to_string()),
                (None, "c".to_string()),
            ]
        );
    }

    #[test]
    fn non_canonical_break_stays_plain() {
        assert_eq!(kinds("a<br>b"), vec![(None, "a<br>b".to_string())]);
    }

    #[test]
    fn trailing_escaped_newline_stays_plain() {
        assert_eq!(kinds("done\\n"), vec![(None, "done\\n".to_string())]);
    }
}
