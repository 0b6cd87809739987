//! Color themes
//!
//! A theme is an immutable, named set of style attributes keyed by
//! format kind, with a revision number used for precedence when the
//! same theme name is found in more than one search location.

use std::collections::HashMap;
use std::sync::Arc;

use crate::format::FormatKind;
use crate::style::Style;

#[derive(Debug)]
struct ThemeInner {
    name: String,
    translated_name: String,
    revision: i64,
    styles: HashMap<FormatKind, Style>,
}

/// A loaded color theme
///
/// Cheap to clone; all clones share one immutable attribute set.
/// `Theme::default()` is the empty/invalid theme returned by failed
/// repository lookups.
#[derive(Debug, Clone)]
pub struct Theme {
    inner: Option<Arc<ThemeInner>>,
}

impl Default for Theme {
    fn default() -> Self {
        Self { inner: None }
    }
}

impl Theme {
    pub(crate) fn new(
        name: String,
        translated_name: String,
        revision: i64,
        styles: HashMap<FormatKind, Style>,
    ) -> Self {
        let translated_name = if translated_name.is_empty() {
            name.clone()
        } else {
            translated_name
        };
        Self {
            inner: Some(Arc::new(ThemeInner {
                name,
                translated_name,
                revision,
                styles,
            })),
        }
    }

    /// Whether this theme was actually loaded
    ///
    /// `Repository::theme` returns an invalid theme for unknown names.
    pub fn is_valid(&self) -> bool {
        self.inner.is_some()
    }

    /// Unique theme name
    pub fn name(&self) -> &str {
        self.inner.as_ref().map(|t| t.name.as_str()).unwrap_or("")
    }

    /// Display name
    pub fn translated_name(&self) -> &str {
        self.inner
            .as_ref()
            .map(|t| t.translated_name.as_str())
            .unwrap_or("")
    }

    /// Monotonic revision; a higher revision of the same name wins
    pub fn revision(&self) -> i64 {
        self.inner.as_ref().map(|t| t.revision).unwrap_or(0)
    }

    /// Resolve the style for a format kind
    ///
    /// Falls back to the kind's built-in default style when the theme
    /// does not override it (or when the theme is invalid).
    pub fn style(&self, kind: FormatKind) -> Style {
        self.inner
            .as_ref()
            .and_then(|t| t.styles.get(&kind).copied())
            .unwrap_or_else(|| kind.default_style())
    }
}
