//! Markup kinds recognised by the extractor.

use std::{fmt, str::FromStr};

/// Kind of a matched segment.
///
/// The declaration order is the evaluation order of the default registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Phone,
    Email,
    Url,
    Username,
    Hashtag,
    /// `**bold**`
    BoldStar,
    /// `__bold__`
    BoldUnderscore,
    /// `*italic*`
    ItalicStar,
    /// `_italic_`
    ItalicUnderscore,
    /// `~~struck~~`
    Strikethrough,
    /// `~underlined~`
    Underline,
    /// A line starting with `> `.
    Blockquote,
    /// The two characters `\n` written literally in the source text.
    Newline,
    /// `<br />` or `<br/>`.
    Linebreak,
}

impl TagKind {
    /// Every kind, in registry order.
    pub const ALL: [TagKind; 14] = [
        TagKind::Phone,
        TagKind::Email,
        TagKind::Url,
        TagKind::Username,
        TagKind::Hashtag,
        TagKind::BoldStar,
        TagKind::BoldUnderscore,
        TagKind::ItalicStar,
        TagKind::ItalicUnderscore,
        TagKind::Strikethrough,
        TagKind::Underline,
        TagKind::Blockquote,
        TagKind::Newline,
        TagKind::Linebreak,
    ];

    /// Kebab-case name used on the command line and in output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TagKind::Phone => "phone",
            TagKind::Email => "email",
            TagKind::Url => "url",
            TagKind::Username => "username",
            TagKind::Hashtag => "hashtag",
            TagKind::BoldStar => "bold-star",
            TagKind::BoldUnderscore => "bold-underscore",
            TagKind::ItalicStar => "italic-star",
            TagKind::ItalicUnderscore => "italic-underscore",
            TagKind::Strikethrough => "strikethrough",
            TagKind::Underline => "underline",
            TagKind::Blockquote => "blockquote",
            TagKind::Newline => "newline",
            TagKind::Linebreak => "linebreak",
        }
    }

    /// Delimiter written on both sides of the content, for the kinds that
    /// are spelled `<delim>content<delim>`.
    #[must_use]
    pub const fn delimiter(self) -> Option<&'static str> {
        match self {
            TagKind::BoldStar => Some("**"),
            TagKind::BoldUnderscore => Some("__"),
            TagKind::Strikethrough => Some("~~"),
            TagKind::ItalicStar => Some("*"),
            TagKind::ItalicUnderscore => Some("_"),
            TagKind::Underline => Some("~"),
            _ => None,
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// Error returned when parsing an unknown kind name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tag kind `{0}`")]
pub struct UnknownKind(pub String);

impl FromStr for TagKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}
