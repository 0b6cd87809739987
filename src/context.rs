//! Context graph and rule matching
//!
//! A definition's rule body is a graph of named contexts. Rules are
//! scoped to the context on top of the highlighting stack; a matching
//! rule styles its span, may open or close a folding region, and may
//! transition the stack (push, pop, or switch in place).
//!
//! Rule matching itself sits behind the `RuleEngine` trait so the line
//! driver stays independent of the matching primitives. The default
//! engine matches compiled regexes anchored at the current offset.

use regex::Regex;

use crate::format::Format;

/// Index of a context within its definition's graph
pub type ContextId = usize;

/// Stack transition requested by a matched rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transition {
    /// Remain in the current context
    #[default]
    Stay,
    /// Enter a nested context
    Push(ContextId),
    /// Leave this many nesting levels (popping past the root is a no-op)
    Pop(usize),
    /// Replace the current context without changing depth
    Switch(ContextId),
}

/// Whether a rule opens or closes a folding region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldKind {
    Begin,
    End,
}

/// Folding action attached to a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldDirective {
    pub kind: FoldKind,
    /// Repository-allocated region id, unique per load generation
    pub region: u16,
}

/// One matching rule within a context
#[derive(Debug)]
pub struct Rule {
    /// Compiled pattern, matched at the current offset only
    pub pattern: Regex,
    /// Format applied to the matched span; falls back to the context's
    /// default format when absent
    pub format: Option<Format>,
    /// Stack transition applied after the match
    pub transition: Transition,
    /// Folding region opened or closed by the match
    pub fold: Option<FoldDirective>,
}

/// A named state within a definition's rule graph
#[derive(Debug)]
pub struct Context {
    pub name: String,
    /// Default format for text no rule claims
    pub format: Format,
    /// Rules tried in order; first match at the offset wins
    pub rules: Vec<Rule>,
}

/// The compiled rule body of one definition
///
/// Context 0 is the document-default (root) context.
#[derive(Debug, Default)]
pub struct ContextGraph {
    contexts: Vec<Context>,
}

impl ContextGraph {
    pub fn new(contexts: Vec<Context>) -> Self {
        Self { contexts }
    }

    /// The document-default context
    pub fn root(&self) -> ContextId {
        0
    }

    pub fn context(&self, id: ContextId) -> Option<&Context> {
        self.contexts.get(id)
    }

    /// Find a context id by name
    pub fn context_by_name(&self, name: &str) -> Option<ContextId> {
        self.contexts.iter().position(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

/// Result of matching one rule at an offset
#[derive(Debug, Clone)]
pub struct RuleMatch {
    /// Byte offset where the match starts (equals the queried offset)
    pub start: usize,
    /// Byte offset one past the end of the match; may equal `start`
    pub end: usize,
    /// Capture group strings bound to a pushed context
    pub captures: Vec<String>,
    /// Format for the matched span
    pub format: Option<Format>,
    /// Stack transition to apply
    pub transition: Transition,
    /// Folding action for the matched span
    pub fold: Option<FoldDirective>,
}

/// Rule-matching capability used by the line driver
///
/// `captures` carries the capture strings bound to the current stack
/// frame, for engines supporting capture-dependent patterns. The line
/// driver guarantees forward progress itself, so engines may legally
/// report zero-length matches.
pub trait RuleEngine {
    fn match_at(
        &self,
        graph: &ContextGraph,
        context: ContextId,
        captures: &[String],
        text: &str,
        offset: usize,
    ) -> Option<RuleMatch>;
}

/// Default engine: regexes anchored at the current offset
#[derive(Debug, Default)]
pub struct RegexEngine;

impl RuleEngine for RegexEngine {
    fn match_at(
        &self,
        graph: &ContextGraph,
        context: ContextId,
        _captures: &[String],
        text: &str,
        offset: usize,
    ) -> Option<RuleMatch> {
        let ctx = graph.context(context)?;
        for rule in &ctx.rules {
            let caps = match rule.pattern.captures_at(text, offset) {
                Some(caps) => caps,
                None => continue,
            };
            let whole = caps.get(0).expect("capture 0 always present");
            if whole.start() != offset {
                // Matched further ahead; rules only apply at the offset
                continue;
            }
            let captures = caps
                .iter()
                .skip(1)
                .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect();
            return Some(RuleMatch {
                start: whole.start(),
                end: whole.end(),
                captures,
                format: rule.format,
                transition: rule.transition,
                fold: rule.fold,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatKind;

    fn format(id: u16, kind: FormatKind) -> Format {
        Format { id, kind }
    }

    fn test_graph() -> ContextGraph {
        let root = Context {
            name: "Normal".into(),
            format: format(1, FormatKind::Normal),
            rules: vec![
                Rule {
                    pattern: Regex::new(r"//.*").unwrap(),
                    format: Some(format(2, FormatKind::Comment)),
                    transition: Transition::Stay,
                    fold: None,
                },
                Rule {
                    pattern: Regex::new(r#"""#).unwrap(),
                    format: Some(format(3, FormatKind::String)),
                    transition: Transition::Push(1),
                    fold: None,
                },
            ],
        };
        let string = Context {
            name: "String".into(),
            format: format(3, FormatKind::String),
            rules: vec![Rule {
                pattern: Regex::new(r#"""#).unwrap(),
                format: Some(format(3, FormatKind::String)),
                transition: Transition::Pop(1),
                fold: None,
            }],
        };
        ContextGraph::new(vec![root, string])
    }

    #[test]
    fn test_match_anchored_at_offset() {
        let graph = test_graph();
        let engine = RegexEngine;

        // Comment later in the line must not match at offset 0
        assert!(engine
            .match_at(&graph, 0, &[], "x // tail", 0)
            .is_none());

        let m = engine.match_at(&graph, 0, &[], "x // tail", 2).unwrap();
        assert_eq!(m.start, 2);
        assert_eq!(m.end, 9);
        assert_eq!(m.transition, Transition::Stay);
    }

    #[test]
    fn test_match_reports_transition() {
        let graph = test_graph();
        let engine = RegexEngine;

        let m = engine.match_at(&graph, 0, &[], "\"s\"", 0).unwrap();
        assert_eq!(m.transition, Transition::Push(1));

        let m = engine.match_at(&graph, 1, &[], "\"s\"", 2).unwrap();
        assert_eq!(m.transition, Transition::Pop(1));
    }

    #[test]
    fn test_context_lookup() {
        let graph = test_graph();
        assert_eq!(graph.root(), 0);
        assert_eq!(graph.context_by_name("String"), Some(1));
        assert_eq!(graph.context_by_name("Missing"), None);
        assert!(graph.context(5).is_none());
    }
}
