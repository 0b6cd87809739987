//! Semantic formats for highlighted spans
//!
//! A `FormatKind` names what a span of text *is* (comment, string,
//! keyword...); a `Format` pairs a kind with the repository-allocated id
//! that makes it unique within one load generation. Themes translate
//! kinds into concrete styles.

use serde::Deserialize;

use crate::style::{Color, Style};

/// Semantic classes of highlighted text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum FormatKind {
    /// Source code comments
    Comment,
    /// String literals
    String,
    /// Character literals
    Char,
    /// Numeric literals
    Number,
    /// Language keywords
    Keyword,
    /// Type names
    Type,
    /// Function names
    Function,
    /// Operators
    Operator,
    /// Preprocessor directives
    Preprocessor,
    /// Macros
    Macro,
    /// Constants and enum variants
    Constant,
    /// Escape sequences and other special tokens
    Special,
    /// Attributes and annotations
    Attribute,
    /// Section headings (markup languages)
    Heading,
    /// Plain text (no special highlighting)
    Normal,
}

impl FormatKind {
    /// Get the fallback style for this kind, used when the active theme
    /// does not override it
    pub fn default_style(&self) -> Style {
        match self {
            FormatKind::Comment => Style::fg(Color::BrightBlack).with_italic(),
            FormatKind::String => Style::fg(Color::Green),
            FormatKind::Char => Style::fg(Color::Green),
            FormatKind::Number => Style::fg(Color::Cyan),
            FormatKind::Keyword => Style::fg(Color::Magenta).with_bold(),
            FormatKind::Type => Style::fg(Color::Yellow),
            FormatKind::Function => Style::fg(Color::Blue),
            FormatKind::Operator => Style::fg(Color::BrightWhite),
            FormatKind::Preprocessor => Style::fg(Color::BrightMagenta),
            FormatKind::Macro => Style::fg(Color::BrightCyan),
            FormatKind::Constant => Style::fg(Color::BrightRed),
            FormatKind::Special => Style::fg(Color::BrightYellow),
            FormatKind::Attribute => Style::fg(Color::BrightBlue),
            FormatKind::Heading => Style::fg(Color::Yellow).with_bold(),
            FormatKind::Normal => Style::default(),
        }
    }

    /// Get a human-readable name for this kind
    pub fn name(&self) -> &'static str {
        match self {
            FormatKind::Comment => "Comment",
            FormatKind::String => "String",
            FormatKind::Char => "Char",
            FormatKind::Number => "Number",
            FormatKind::Keyword => "Keyword",
            FormatKind::Type => "Type",
            FormatKind::Function => "Function",
            FormatKind::Operator => "Operator",
            FormatKind::Preprocessor => "Preprocessor",
            FormatKind::Macro => "Macro",
            FormatKind::Constant => "Constant",
            FormatKind::Special => "Special",
            FormatKind::Attribute => "Attribute",
            FormatKind::Heading => "Heading",
            FormatKind::Normal => "Normal",
        }
    }

    /// Parse a kind from its name (for grammar/theme file loading)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Comment" => Some(FormatKind::Comment),
            "String" => Some(FormatKind::String),
            "Char" => Some(FormatKind::Char),
            "Number" => Some(FormatKind::Number),
            "Keyword" => Some(FormatKind::Keyword),
            "Type" => Some(FormatKind::Type),
            "Function" => Some(FormatKind::Function),
            "Operator" => Some(FormatKind::Operator),
            "Preprocessor" => Some(FormatKind::Preprocessor),
            "Macro" => Some(FormatKind::Macro),
            "Constant" => Some(FormatKind::Constant),
            "Special" => Some(FormatKind::Special),
            "Attribute" => Some(FormatKind::Attribute),
            "Heading" => Some(FormatKind::Heading),
            "Normal" => Some(FormatKind::Normal),
            _ => None,
        }
    }
}

/// A format instance within one definition
///
/// The id is allocated by the repository (`next_format_id`) when the
/// definition's rule body is compiled, so formats are distinguishable
/// across definitions within one load generation. Id 0 never appears on
/// a compiled format; it is reserved to mean "no format".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Process-unique id for this load generation
    pub id: u16,
    /// Semantic class
    pub kind: FormatKind,
}

impl Format {
    /// Whether spans carrying this format are comment text
    pub fn is_comment(&self) -> bool {
        self.kind == FormatKind::Comment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles() {
        assert!(!FormatKind::Comment.default_style().is_default());
        assert!(!FormatKind::String.default_style().is_default());
        assert!(!FormatKind::Keyword.default_style().is_default());
        assert!(FormatKind::Normal.default_style().is_default());
    }

    #[test]
    fn test_from_name_roundtrip() {
        let kinds = [
            FormatKind::Comment,
            FormatKind::String,
            FormatKind::Keyword,
            FormatKind::Normal,
        ];
        for kind in kinds {
            assert_eq!(FormatKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_from_name_invalid() {
        assert_eq!(FormatKind::from_name("NoSuchKind"), None);
        assert_eq!(FormatKind::from_name(""), None);
    }

    #[test]
    fn test_is_comment() {
        let comment = Format {
            id: 1,
            kind: FormatKind::Comment,
        };
        let keyword = Format {
            id: 2,
            kind: FormatKind::Keyword,
        };
        assert!(comment.is_comment());
        assert!(!keyword.is_comment());
    }
}
