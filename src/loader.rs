//! On-disk file parsing
//!
//! All external files are TOML: grammar files, the optional per-location
//! `index.toml`, theme files, and the per-search-path content-detection
//! description. This module turns them into runtime types; everything
//! here follows the partial-success policy: one bad entry is logged and
//! skipped; it never blanks out the rest of a location.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use globset::Glob;
use regex::Regex;
use serde::Deserialize;

use crate::context::{Context, ContextGraph, FoldDirective, FoldKind, Rule, Transition};
use crate::definition::{Body, DefinitionMeta, GrammarSource};
use crate::error::{Error, Result};
use crate::format::{Format, FormatKind};
use crate::repository::RepoCore;
use crate::style::Style;
use crate::theme::Theme;

/// Metadata header of a grammar file (`[grammar]` table)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
struct MetaDoc {
    name: String,
    version: i64,
    priority: i64,
    extensions: Vec<String>,
    file_names: Vec<String>,
    translated_name: String,
}

/// Grammar file with only the header deserialized; the rule body stays
/// untouched until the definition is first used
#[derive(Debug, Deserialize)]
struct MetaOnlyDoc {
    grammar: MetaDoc,
}

#[derive(Debug, Deserialize)]
struct GrammarDoc {
    #[allow(dead_code)]
    grammar: MetaDoc,
    #[serde(default, rename = "context")]
    contexts: Vec<ContextDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ContextDoc {
    name: String,
    #[serde(default)]
    format: Option<String>,
    #[serde(default, rename = "rule")]
    rules: Vec<RuleDoc>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
struct RuleDoc {
    pattern: String,
    format: Option<String>,
    push: Option<String>,
    pop: Option<usize>,
    switch: Option<String>,
    begin_region: Option<String>,
    end_region: Option<String>,
}

fn build_meta(doc: MetaDoc) -> DefinitionMeta {
    let mut matchers = Vec::with_capacity(doc.extensions.len());
    for pattern in &doc.extensions {
        match Glob::new(pattern) {
            Ok(glob) => matchers.push(glob.compile_matcher()),
            Err(err) => log::warn!(
                "definition {}: skipping bad extension pattern `{}`: {}",
                doc.name,
                pattern,
                err
            ),
        }
    }
    DefinitionMeta {
        name: doc.name,
        version: doc.version,
        priority: doc.priority,
        extensions: doc.extensions,
        file_names: doc.file_names,
        translated_name: doc.translated_name,
        matchers,
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse only the metadata header of a grammar file's text
pub(crate) fn parse_grammar_meta(text: &str, origin: &Path) -> Result<DefinitionMeta> {
    let doc: MetaOnlyDoc = toml::from_str(text).map_err(|err| Error::Grammar {
        path: origin.to_path_buf(),
        message: err.to_string(),
    })?;
    if doc.grammar.name.is_empty() {
        return Err(Error::Grammar {
            path: origin.to_path_buf(),
            message: "missing grammar name".into(),
        });
    }
    Ok(build_meta(doc.grammar))
}

/// Load the metadata header of one loose grammar file
pub(crate) fn load_grammar_meta(path: &Path) -> Result<DefinitionMeta> {
    parse_grammar_meta(&read_file(path)?, path)
}

/// Load a prebuilt `index.toml`: grammar file name -> metadata, letting
/// a whole location be scanned with a single read
pub(crate) fn load_index(path: &Path) -> Result<Vec<(String, DefinitionMeta)>> {
    let text = read_file(path)?;
    let doc: HashMap<String, MetaDoc> = toml::from_str(&text).map_err(|err| Error::Index {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let mut entries: Vec<(String, DefinitionMeta)> = doc
        .into_iter()
        .filter(|(file, meta)| {
            if meta.name.is_empty() {
                log::warn!("index {}: entry {} has no grammar name, skipped", path.display(), file);
                return false;
            }
            true
        })
        .map(|(file, meta)| (file, build_meta(meta)))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(entries)
}

fn resolve_format(
    name: &Option<String>,
    def_name: &str,
    core: &Arc<RepoCore>,
) -> Option<Format> {
    let name = name.as_deref()?;
    match FormatKind::from_name(name) {
        Some(kind) => Some(Format {
            id: core.next_format_id(),
            kind,
        }),
        None => {
            log::warn!("definition {}: unknown format kind `{}`", def_name, name);
            None
        }
    }
}

/// Compile a grammar's full rule body
///
/// Formats and folding regions get their generation-unique ids here,
/// which is why this runs against the live repository core. Bad rule
/// patterns and dangling context references are skipped with a
/// diagnostic; the rest of the grammar stays usable.
pub(crate) fn compile_body(
    source: &GrammarSource,
    def_name: &str,
    core: &Arc<RepoCore>,
) -> Result<Body> {
    let owned;
    let (text, origin) = match source {
        GrammarSource::File(path) => {
            owned = read_file(path)?;
            (owned.as_str(), path.clone())
        }
        GrammarSource::Embedded(text) => (*text, Path::new("<builtin>").to_path_buf()),
    };

    let doc: GrammarDoc = toml::from_str(text).map_err(|err| Error::Grammar {
        path: origin.clone(),
        message: err.to_string(),
    })?;

    // Context names must all be known before rules can reference them
    let ids: HashMap<&str, usize> = doc
        .contexts
        .iter()
        .enumerate()
        .map(|(i, c)| (c.name.as_str(), i))
        .collect();

    let mut fold_regions: HashMap<String, u16> = HashMap::new();
    let region_id = |label: &str, fold_regions: &mut HashMap<String, u16>| -> u16 {
        if let Some(id) = fold_regions.get(label) {
            return *id;
        }
        let id = core.folding_region_id(def_name, label);
        fold_regions.insert(label.to_string(), id);
        id
    };

    let mut contexts = Vec::with_capacity(doc.contexts.len());
    for ctx_doc in &doc.contexts {
        let format = resolve_format(&ctx_doc.format, def_name, core).unwrap_or(Format {
            id: core.next_format_id(),
            kind: FormatKind::Normal,
        });

        let mut rules = Vec::with_capacity(ctx_doc.rules.len());
        for rule_doc in &ctx_doc.rules {
            let pattern = match Regex::new(&rule_doc.pattern) {
                Ok(pattern) => pattern,
                Err(err) => {
                    log::warn!(
                        "definition {}: context {}: skipping rule with bad pattern `{}`: {}",
                        def_name,
                        ctx_doc.name,
                        rule_doc.pattern,
                        err
                    );
                    continue;
                }
            };

            let transition = match (&rule_doc.push, rule_doc.pop, &rule_doc.switch) {
                (Some(target), None, None) => match ids.get(target.as_str()) {
                    Some(&id) => Transition::Push(id),
                    None => {
                        log::warn!(
                            "definition {}: context {}: rule pushes unknown context `{}`, skipped",
                            def_name,
                            ctx_doc.name,
                            target
                        );
                        continue;
                    }
                },
                (None, Some(levels), None) => Transition::Pop(levels),
                (None, None, Some(target)) => match ids.get(target.as_str()) {
                    Some(&id) => Transition::Switch(id),
                    None => {
                        log::warn!(
                            "definition {}: context {}: rule switches to unknown context `{}`, skipped",
                            def_name,
                            ctx_doc.name,
                            target
                        );
                        continue;
                    }
                },
                (None, None, None) => Transition::Stay,
                _ => {
                    log::warn!(
                        "definition {}: context {}: rule mixes push/pop/switch, skipped",
                        def_name,
                        ctx_doc.name
                    );
                    continue;
                }
            };

            let fold = match (&rule_doc.begin_region, &rule_doc.end_region) {
                (Some(label), None) => Some(FoldDirective {
                    kind: FoldKind::Begin,
                    region: region_id(label, &mut fold_regions),
                }),
                (None, Some(label)) => Some(FoldDirective {
                    kind: FoldKind::End,
                    region: region_id(label, &mut fold_regions),
                }),
                (None, None) => None,
                (Some(_), Some(_)) => {
                    log::warn!(
                        "definition {}: context {}: rule both begins and ends a region, skipped",
                        def_name,
                        ctx_doc.name
                    );
                    continue;
                }
            };

            rules.push(Rule {
                pattern,
                format: resolve_format(&rule_doc.format, def_name, core),
                transition,
                fold,
            });
        }

        contexts.push(Context {
            name: ctx_doc.name.clone(),
            format,
            rules,
        });
    }

    Ok(Body {
        graph: ContextGraph::new(contexts),
        fold_regions,
    })
}

/// Theme file: `[theme]` header plus a `[styles]` table keyed by format
/// kind name
#[derive(Debug, Deserialize)]
struct ThemeDoc {
    theme: ThemeMetaDoc,
    #[serde(default)]
    styles: toml::Table,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
struct ThemeMetaDoc {
    name: String,
    revision: i64,
    translated_name: String,
}

/// Parse a theme file's text
pub(crate) fn parse_theme(text: &str, origin: &Path) -> Result<Theme> {
    let doc: ThemeDoc = toml::from_str(text).map_err(|err| Error::Theme {
        path: origin.to_path_buf(),
        message: err.to_string(),
    })?;
    if doc.theme.name.is_empty() {
        return Err(Error::Theme {
            path: origin.to_path_buf(),
            message: "missing theme name".into(),
        });
    }

    let mut styles = HashMap::new();
    for (key, value) in doc.styles {
        let kind = match FormatKind::from_name(&key) {
            Some(kind) => kind,
            None => {
                log::warn!(
                    "theme {}: unknown format kind `{}`, skipped",
                    doc.theme.name,
                    key
                );
                continue;
            }
        };
        match value.try_into::<Style>() {
            Ok(style) => {
                styles.insert(kind, style);
            }
            Err(err) => log::warn!(
                "theme {}: bad style for `{}`: {}, skipped",
                doc.theme.name,
                key,
                err
            ),
        }
    }

    Ok(Theme::new(
        doc.theme.name,
        doc.theme.translated_name,
        doc.theme.revision,
        styles,
    ))
}

/// Load one theme file
pub(crate) fn load_theme(path: &Path) -> Result<Theme> {
    parse_theme(&read_file(path)?, path)
}

/// One entry of a content-detection description file
#[derive(Debug)]
pub(crate) struct DetectionEntry {
    /// Definition logical name the rules belong to
    pub name: String,
    /// Compiled first-line patterns
    pub content: Vec<Regex>,
    /// Literal file names
    pub file_names: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
struct DetectionDoc {
    content: Vec<String>,
    file_names: Vec<String>,
}

/// Load a `content-detection.toml` file: definition name -> optional
/// first-line patterns and literal file names, in file order
pub(crate) fn load_detection(path: &Path) -> Result<Vec<DetectionEntry>> {
    let text = read_file(path)?;
    let table: toml::Table = toml::from_str(&text).map_err(|err| Error::Grammar {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;

    let mut entries = Vec::new();
    for (name, value) in table {
        let doc: DetectionDoc = match value.try_into() {
            Ok(doc) => doc,
            Err(err) => {
                log::warn!(
                    "content detection {}: bad entry for `{}`: {}, skipped",
                    path.display(),
                    name,
                    err
                );
                continue;
            }
        };
        let mut content = Vec::with_capacity(doc.content.len());
        for pattern in doc.content {
            match Regex::new(&pattern) {
                Ok(regex) => content.push(regex),
                Err(err) => log::warn!(
                    "content detection {}: `{}`: bad pattern `{}`: {}, skipped",
                    path.display(),
                    name,
                    pattern,
                    err
                ),
            }
        }
        entries.push(DetectionEntry {
            name,
            content,
            file_names: doc.file_names,
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAMMAR: &str = r#"
[grammar]
name = "Test"
version = 2
priority = 7
extensions = ["*.tst"]
file-names = ["Testfile"]
translated-name = "Test Grammar"

[[context]]
name = "Normal"
format = "Normal"

[[context.rule]]
pattern = '//.*'
format = "Comment"
"#;

    #[test]
    fn test_parse_grammar_meta() {
        let meta = parse_grammar_meta(GRAMMAR, Path::new("test.toml")).unwrap();
        assert_eq!(meta.name, "Test");
        assert_eq!(meta.version, 2);
        assert_eq!(meta.priority, 7);
        assert_eq!(meta.extensions, ["*.tst"]);
        assert_eq!(meta.file_names, ["Testfile"]);
        assert_eq!(meta.translated_name, "Test Grammar");
        assert_eq!(meta.matchers.len(), 1);
        assert!(meta.matchers[0].is_match("a.tst"));
        assert!(!meta.matchers[0].is_match("a.tst.bak"));
    }

    #[test]
    fn test_meta_requires_name() {
        let err = parse_grammar_meta("[grammar]\nversion = 1\n", Path::new("x.toml"));
        assert!(err.is_err());
    }

    #[test]
    fn test_bad_extension_pattern_skipped() {
        let text = r#"
[grammar]
name = "Globs"
extensions = ["*.ok", "[bad"]
"#;
        let meta = parse_grammar_meta(text, Path::new("x.toml")).unwrap();
        assert_eq!(meta.extensions.len(), 2);
        // Only the valid pattern compiled
        assert_eq!(meta.matchers.len(), 1);
    }

    #[test]
    fn test_parse_theme() {
        let text = r#"
[theme]
name = "Plain"
revision = 3

[styles.Comment]
fg = "Blue"
italic = true

[styles.Bogus]
fg = "Red"
"#;
        let theme = parse_theme(text, Path::new("plain.toml")).unwrap();
        assert_eq!(theme.name(), "Plain");
        assert_eq!(theme.revision(), 3);
        let style = theme.style(FormatKind::Comment);
        assert!(style.italic);
        // Unknown kind skipped, falls through to defaults elsewhere
        assert_eq!(
            theme.style(FormatKind::Keyword),
            FormatKind::Keyword.default_style()
        );
    }

    #[test]
    fn test_detection_doc_order_and_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("content-detection.toml");
        fs::write(
            &path,
            r#"
[Python]
content = ['^#!.*\bpython']

[Makefile]
file-names = ["Makefile", "GNUmakefile"]

[Broken]
content = ['[']
"#,
        )
        .unwrap();

        let entries = load_detection(&path).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].name, "Python");
        assert_eq!(entries[0].content.len(), 1);
        assert_eq!(entries[1].file_names, ["Makefile", "GNUmakefile"]);
        // Bad regex skipped, entry retained
        assert!(entries[2].content.is_empty());
    }
}
