//! Integration tests for segment extraction with the default registry.
//!
//! Covers ordering, precedence between kinds, match caps, rejected markup
//! and reuse of one registry across calls.

use tagtext::{
    Hooks,
    Modifiers,
    PatternDefinition,
    TagKind,
    Theme,
    default_patterns,
    extract,
    normalize_html,
    render_segments,
    strip_delimiters,
};

mod prelude;
use prelude::*;

#[rstest]
#[case("just words, nothing else")]
#[case("numbers like 42 and 7 stay put")]
#[case("ünïcödé text")]
fn plain_text_is_one_segment(patterns: Vec<PatternDefinition>, #[case] text: &str) {
    assert_eq!(view(&extract(text, &patterns)), vec![(None, text.to_string())]);
}

#[rstest]
fn empty_text_is_no_segments(patterns: Vec<PatternDefinition>) {
    assert!(extract("", &patterns).is_empty());
}

#[rstest]
fn bold_alone(patterns: Vec<PatternDefinition>) {
    let segments = extract("**bold**", &patterns);
    assert_eq!(view(&segments), vec![(Some(TagKind::BoldStar), "**bold**".to_string())]);
    assert_eq!(strip_delimiters(segments[0].kind, &segments[0].text), "bold ");
}

#[rstest]
fn empty_bold_is_plain(patterns: Vec<PatternDefinition>) {
    assert_eq!(view(&extract("****", &patterns)), vec![(None, "****".to_string())]);
}

#[rstest]
fn two_urls_make_five_segments(patterns: Vec<PatternDefinition>) {
    let segments = extract("see https://a.io and https://b.io today", &patterns);
    assert_eq!(
        view(&segments),
        vec![
            (None, "see ".to_string()),
            (Some(TagKind::Url), "https://a.io".to_string()),
            (None, " and ".to_string()),
            (Some(TagKind::Url), "https://b.io".to_string()),
            (None, " today".to_string()),
        ]
    );
}

#[rstest]
fn leading_and_trailing_plain_runs_are_omitted(patterns: Vec<PatternDefinition>) {
    let segments = extract("https://a.io and https://b.io", &patterns);
    assert_eq!(segments.len(), 3);
    assert!(segments[0].is_match() && segments[2].is_match());
}

#[rstest]
fn email_wins_over_username(patterns: Vec<PatternDefinition>) {
    let segments = extract("write to a@b.com, cc @carol", &patterns);
    assert_eq!(
        view(&segments),
        vec![
            (None, "write to ".to_string()),
            (Some(TagKind::Email), "a@b.com".to_string()),
            (None, ", cc ".to_string()),
            (Some(TagKind::Username), "@carol".to_string()),
        ]
    );
}

#[test]
fn cap_of_one_leaves_later_occurrences_plain() {
    let patterns = default_patterns(&Theme::default(), &Hooks::default())
        .into_iter()
        .map(|p| if p.kind == TagKind::Hashtag { p.with_max_matches(1) } else { p })
        .collect::<Vec<_>>();
    let segments = extract("#one #two #three", &patterns);
    assert_eq!(
        view(&segments),
        vec![
            (Some(TagKind::Hashtag), "#one".to_string()),
            (None, " #two #three".to_string()),
        ]
    );
}

#[rstest]
#[case("")]
#[case("hello")]
#[case("call +1 555-123-4567 or mail me@site.org")]
#[case("**b** __b__ *i* _i_ ~~s~~ ~u~")]
#[case("> quote\nnext line\\nthen<br />done")]
#[case("@sam #tag www.example.com/path?q=1")]
#[case("**** ~~~~ <br> trailing\\n")]
fn raw_segments_roundtrip(patterns: Vec<PatternDefinition>, #[case] text: &str) {
    assert_eq!(joined(&extract(text, &patterns)), text);
}

#[rstest]
fn registry_reuse_is_independent(patterns: Vec<PatternDefinition>) {
    let first = extract("a **x** b", &patterns);
    let second = extract("**y**", &patterns);
    let first_again = extract("a **x** b", &patterns);
    assert_eq!(view(&second), vec![(Some(TagKind::BoldStar), "**y**".to_string())]);
    assert_eq!(view(&first), view(&first_again));
}

#[rstest]
fn display_view_drops_delimiters(patterns: Vec<PatternDefinition>) {
    let segments = render_segments(extract("> hi\nthere **you**\\nbye", &patterns));
    assert_eq!(joined(&segments), "hi \nthere you \nbye");
}

#[rstest]
fn crlf_quote_renders_without_carriage_return(patterns: Vec<PatternDefinition>) {
    let segments = render_segments(extract("> quoted\r\nreply", &patterns));
    assert_eq!(joined(&segments), "quoted \r\nreply");
}

#[rstest]
fn styles_follow_the_pattern(patterns: Vec<PatternDefinition>) {
    let segments = extract("~~gone~~ and *here*", &patterns);
    let struck = segments[0].style.as_ref().expect("matched segments carry a style");
    assert!(struck.modifiers.contains(Modifiers::STRIKETHROUGH));
    assert!(segments[1].style.is_none());
}

#[rstest]
fn html_then_markup(patterns: Vec<PatternDefinition>) {
    let text = normalize_html("<p><b>Hi</b> <a href=\"https://x.io\">https://x.io</a></p>");
    assert_eq!(
        view(&extract(&text, &patterns)),
        vec![
            (Some(TagKind::BoldStar), "**Hi**".to_string()),
            (None, " ".to_string()),
            (Some(TagKind::Url), "https://x.io".to_string()),
        ]
    );
}
