//! Language definitions
//!
//! A `Definition` is one loaded grammar: identifying metadata read from
//! a single file plus a lazily-compiled rule body. The handle is cheap
//! to clone and stays safe to hold across a repository reload or
//! teardown, turning invalid instead of dangling.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock, Weak};

use globset::GlobMatcher;

use crate::context::ContextGraph;
use crate::loader;
use crate::repository::RepoCore;

/// Identifying metadata, extracted without compiling the rule body
#[derive(Debug, Default)]
pub(crate) struct DefinitionMeta {
    pub name: String,
    pub version: i64,
    pub priority: i64,
    pub extensions: Vec<String>,
    pub file_names: Vec<String>,
    pub translated_name: String,
    /// Compiled extension globs, aligned with `extensions` minus any
    /// patterns that failed to compile (logged at load time)
    pub matchers: Vec<GlobMatcher>,
}

/// Where the full grammar text lives for the deferred body parse
#[derive(Debug)]
pub(crate) enum GrammarSource {
    File(PathBuf),
    Embedded(&'static str),
}

/// Compiled rule body: context graph plus this definition's folding
/// region name table (label -> generation-unique id)
#[derive(Debug, Default)]
pub(crate) struct Body {
    pub graph: ContextGraph,
    pub fold_regions: HashMap<String, u16>,
}

#[derive(Debug)]
pub(crate) struct DefinitionInner {
    /// Non-owning link back to the repository, so use after teardown is
    /// detectable rather than undefined
    repo: Weak<RepoCore>,
    /// Load generation this definition belongs to
    generation: u64,
    meta: DefinitionMeta,
    source: GrammarSource,
    body: OnceLock<Arc<Body>>,
}

/// A loaded language grammar
///
/// `Definition::default()` is the empty/invalid definition returned by
/// failed repository lookups; callers treat it as "no highlighting".
#[derive(Debug, Clone, Default)]
pub struct Definition {
    inner: Option<Arc<DefinitionInner>>,
}

impl Definition {
    pub(crate) fn new(core: &Arc<RepoCore>, meta: DefinitionMeta, source: GrammarSource) -> Self {
        Self {
            inner: Some(Arc::new(DefinitionInner {
                repo: Arc::downgrade(core),
                generation: core.generation(),
                meta,
                source,
                body: OnceLock::new(),
            })),
        }
    }

    pub(crate) fn from_inner(inner: Arc<DefinitionInner>) -> Self {
        Self { inner: Some(inner) }
    }

    pub(crate) fn downgrade(&self) -> Weak<DefinitionInner> {
        match &self.inner {
            Some(inner) => Arc::downgrade(inner),
            None => Weak::new(),
        }
    }

    pub(crate) fn is_same_instance(&self, other: &Arc<DefinitionInner>) -> bool {
        match &self.inner {
            Some(inner) => Arc::ptr_eq(inner, other),
            None => false,
        }
    }

    /// Whether this definition was loaded and still belongs to the
    /// current load generation of a live repository
    pub fn is_valid(&self) -> bool {
        match &self.inner {
            Some(inner) => match inner.repo.upgrade() {
                Some(core) => core.generation() == inner.generation,
                None => false,
            },
            None => false,
        }
    }

    /// Unique logical name
    pub fn name(&self) -> &str {
        self.inner
            .as_ref()
            .map(|i| i.meta.name.as_str())
            .unwrap_or("")
    }

    /// Monotonic grammar version; the repository keeps the highest
    /// version per name
    pub fn version(&self) -> i64 {
        self.inner.as_ref().map(|i| i.meta.version).unwrap_or(0)
    }

    /// Tie-break weight for file-name matches
    pub fn priority(&self) -> i64 {
        self.inner.as_ref().map(|i| i.meta.priority).unwrap_or(0)
    }

    /// File-extension glob patterns, e.g. `*.rs`
    pub fn extensions(&self) -> &[String] {
        self.inner
            .as_ref()
            .map(|i| i.meta.extensions.as_slice())
            .unwrap_or(&[])
    }

    /// Exact file names this grammar claims (fallback matching only)
    pub fn file_names(&self) -> &[String] {
        self.inner
            .as_ref()
            .map(|i| i.meta.file_names.as_slice())
            .unwrap_or(&[])
    }

    /// Display and sort name
    pub fn translated_name(&self) -> &str {
        match &self.inner {
            Some(inner) if !inner.meta.translated_name.is_empty() => &inner.meta.translated_name,
            Some(inner) => &inner.meta.name,
            None => "",
        }
    }

    /// Whether any extension glob matches the given base file name
    /// (full-string wildcard match, not substring)
    pub fn matches_file_name(&self, base_name: &str) -> bool {
        let inner = match &self.inner {
            Some(inner) => inner,
            None => return false,
        };
        inner
            .meta
            .matchers
            .iter()
            .any(|m| m.is_match(base_name))
    }

    /// The folding region id allocated for a symbolic region label of
    /// this definition, if the label exists
    pub fn folding_region_id(&self, label: &str) -> Option<u16> {
        self.body()
            .and_then(|b| b.fold_regions.get(label).copied())
    }

    /// The compiled rule body, parsing it on first use
    ///
    /// Most installed grammars are never highlighted in a session, so
    /// the body parse (regex compilation, id allocation) is deferred
    /// until here. Returns `None` for invalid definitions; a malformed
    /// body is logged once and behaves as an empty grammar.
    pub(crate) fn body(&self) -> Option<Arc<Body>> {
        let inner = self.inner.as_ref()?;
        if !self.is_valid() {
            return None;
        }
        let body = inner.body.get_or_init(|| {
            let core = match inner.repo.upgrade() {
                Some(core) => core,
                None => return Arc::new(Body::default()),
            };
            match loader::compile_body(&inner.source, &inner.meta.name, &core) {
                Ok(body) => Arc::new(body),
                Err(err) => {
                    log::warn!(
                        "failed to compile rule body for definition {}: {}",
                        inner.meta.name,
                        err
                    );
                    Arc::new(Body::default())
                }
            }
        });
        Some(body.clone())
    }
}
