//! Display styles attached to matched segments.
//!
//! The extractor never inspects a [`Style`]; it only copies the owning
//! pattern's style onto each match so a renderer can apply it.

use bitflags::bitflags;

bitflags! {
    /// Text decoration flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const BOLD = 1;
        const ITALIC = 1 << 1;
        const UNDERLINE = 1 << 2;
        const STRIKETHROUGH = 1 << 3;
        const QUOTE = 1 << 4;
    }
}

/// Visual attributes of a segment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    pub modifiers: Modifiers,
    /// Foreground colour, in whatever notation the renderer understands.
    pub color: Option<String>,
}

impl Style {
    #[must_use]
    pub fn plain() -> Self { Self::default() }

    #[must_use]
    pub fn with_modifiers(modifiers: Modifiers) -> Self {
        Self {
            modifiers,
            color: None,
        }
    }

    #[must_use]
    pub fn colored(color: &str) -> Self {
        Self {
            modifiers: Modifiers::empty(),
            color: Some(color.to_string()),
        }
    }
}

/// Colours a registry closes over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub link: String,
    pub mention: String,
    pub hashtag: String,
    pub quote: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            link: "#1e88e5".to_string(),
            mention: "#8e24aa".to_string(),
            hashtag: "#43a047".to_string(),
            quote: "#757575".to_string(),
        }
    }
}
