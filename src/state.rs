//! Per-line highlighting state
//!
//! The state carried from one line to the next is a stack of nested
//! contexts, each with the capture strings bound when it was entered.
//! Consecutive lines usually share an unchanged state, so `State` is a
//! cheap-to-clone value: clones share one buffer and mutation copies on
//! write.

use std::sync::{Arc, Weak};

use crate::context::ContextId;
use crate::definition::{Definition, DefinitionInner};

/// One nesting level of the context stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StackFrame {
    pub context: ContextId,
    pub captures: Vec<String>,
}

#[derive(Debug, Clone, Default)]
struct StateData {
    /// Weak reference to the owning definition, to filter out states
    /// that outlived a repository reload or teardown
    def: Weak<DefinitionInner>,
    /// Innermost context last
    stack: Vec<StackFrame>,
}

/// The context stack carried across line boundaries
///
/// A state is only meaningful together with the definition it was
/// produced by; after that definition is invalidated (repository reload
/// or teardown) the state reads as empty. Ownership rests with whoever
/// keeps per-line highlighting data, typically a `Highlighter`.
#[derive(Debug, Clone, Default)]
pub struct State {
    data: Arc<StateData>,
}

impl State {
    /// Create the empty state for the first line of a document
    pub fn new(def: &Definition) -> Self {
        Self {
            data: Arc::new(StateData {
                def: def.downgrade(),
                stack: Vec::new(),
            }),
        }
    }

    /// Whether this state still belongs to a live, current definition
    pub fn is_valid(&self) -> bool {
        match self.data.def.upgrade() {
            Some(inner) => Definition::from_inner(inner).is_valid(),
            None => false,
        }
    }

    /// The definition this state belongs to (invalid if gone)
    pub fn definition(&self) -> Definition {
        match self.data.def.upgrade() {
            Some(inner) => Definition::from_inner(inner),
            None => Definition::default(),
        }
    }

    /// Whether this state belongs to the given definition
    pub(crate) fn belongs_to(&self, def: &Definition) -> bool {
        match self.data.def.upgrade() {
            Some(inner) => def.is_same_instance(&inner),
            None => false,
        }
    }

    /// Number of nested contexts
    pub fn len(&self) -> usize {
        self.data.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.stack.is_empty()
    }

    /// Innermost context, if any nesting is active
    ///
    /// An empty stack means the document-default context.
    pub fn top_context(&self) -> Option<ContextId> {
        self.data.stack.last().map(|f| f.context)
    }

    /// Captures bound to the innermost context
    pub fn top_captures(&self) -> &[String] {
        self.data
            .stack
            .last()
            .map(|f| f.captures.as_slice())
            .unwrap_or(&[])
    }

    /// Enter a nested context with its bound captures
    pub fn push(&mut self, context: ContextId, captures: Vec<String>) {
        Arc::make_mut(&mut self.data)
            .stack
            .push(StackFrame { context, captures });
    }

    /// Leave the innermost context
    ///
    /// Popping an empty stack is a no-op: a grammar may legally pop past
    /// its own root, which means "stay at the document-default context".
    pub fn pop(&mut self) {
        if self.data.stack.is_empty() {
            return;
        }
        Arc::make_mut(&mut self.data).stack.pop();
    }

    /// Drop all nesting
    pub fn clear(&mut self) {
        if self.data.stack.is_empty() {
            return;
        }
        Arc::make_mut(&mut self.data).stack.clear();
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        Weak::ptr_eq(&self.data.def, &other.data.def) && self.data.stack == other.data.stack
    }
}

impl Eq for State {}
