//! glint - incremental syntax highlighting core
//!
//! This crate provides two things: a [`Repository`] that discovers,
//! version-merges, and serves language grammars and color themes from
//! overlapping search locations, and a per-line highlighting engine
//! that threads a cheap-to-copy context-stack [`State`] across line
//! boundaries so only edited regions need re-processing. Fold-region
//! queries are derived from the per-line events a [`Highlighter`]
//! accumulates.
//!
//! ```no_run
//! use glint::{Highlighter, Repository};
//!
//! let repo = Repository::new();
//! let mut hl = Highlighter::new();
//! hl.set_definition(repo.definition_for_file_name("main.rs"));
//! hl.set_theme(repo.default_theme(glint::DefaultTheme::Light));
//!
//! let lines = ["fn main() {", "    // hello", "}"];
//! hl.rehighlight_all(&lines);
//! for span in hl.line_spans(1) {
//!     let _style = hl.style_for(span.format);
//! }
//! ```
//!
//! Rendering, document storage, and the grammar file schema beyond the
//! fields loaded here are out of scope; hosts provide those.

mod builtin;
mod context;
mod definition;
mod error;
mod format;
mod highlighter;
mod loader;
mod repository;
mod state;
mod style;
mod theme;

pub use context::{
    Context, ContextGraph, ContextId, FoldDirective, FoldKind, RegexEngine, Rule, RuleEngine,
    RuleMatch, Transition,
};
pub use definition::Definition;
pub use error::{Error, Result};
pub use format::{Format, FormatKind};
pub use highlighter::{highlight_line, FoldEvent, HighlightedSpan, Highlighter, LineHighlight};
pub use repository::{DefaultTheme, Repository};
pub use state::State;
pub use style::{Color, Style};
pub use theme::Theme;
