//! Bundled default grammars and themes
//!
//! Embedded at compile time and fed through the same loader as on-disk
//! files, so a fresh repository is usable without any installed data.
//! On-disk copies of the same names win when they carry a higher
//! version or revision.

/// Grammar sources, scanned after the system locations
pub(crate) const GRAMMARS: &[&str] = &[
    include_str!("../data/syntax/rust.toml"),
    include_str!("../data/syntax/c.toml"),
    include_str!("../data/syntax/markdown.toml"),
];

/// Theme sources, including both well-known default themes
pub(crate) const THEMES: &[&str] = &[
    include_str!("../data/themes/default.toml"),
    include_str!("../data/themes/default-dark.toml"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader;
    use std::path::Path;

    #[test]
    fn test_builtin_grammars_parse() {
        for text in GRAMMARS {
            let meta = loader::parse_grammar_meta(text, Path::new("<builtin>")).unwrap();
            assert!(!meta.name.is_empty());
            assert!(!meta.matchers.is_empty());
        }
    }

    #[test]
    fn test_builtin_themes_parse() {
        for text in THEMES {
            let theme = loader::parse_theme(text, Path::new("<builtin>")).unwrap();
            assert!(theme.is_valid());
            assert!(theme.revision() >= 1);
        }
    }
}
