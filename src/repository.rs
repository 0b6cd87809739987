//! Definition and theme repository
//!
//! The repository discovers grammar and theme files across several
//! overlapping search locations, merges same-named entries by version,
//! and answers all selection queries (by name, file name, or document
//! content). It also owns the id counters for formats and folding
//! regions; ids are unique and stable within one load generation and
//! reset by `reload`.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use regex::Regex;

use crate::builtin;
use crate::definition::{Definition, GrammarSource};
use crate::loader;
use crate::theme::Theme;

/// Well-known default theme kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultTheme {
    Light,
    Dark,
}

#[derive(Default)]
struct IdTables {
    folding_ids: HashMap<(String, String), u16>,
    folding_counter: u16,
    format_counter: u16,
}

/// State shared between the repository and every definition it loaded
///
/// Definitions (and through them, highlighting states) hold only a weak
/// reference, so a definition used after the repository is gone detects
/// that instead of dereferencing freed data. The generation number
/// makes definitions from before a `reload` detectably stale.
pub(crate) struct RepoCore {
    generation: AtomicU64,
    ids: Mutex<IdTables>,
}

impl std::fmt::Debug for RepoCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoCore")
            .field("generation", &self.generation)
            .finish()
    }
}

impl RepoCore {
    fn new() -> Self {
        Self {
            generation: AtomicU64::new(1),
            ids: Mutex::new(IdTables::default()),
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    fn begin_generation(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        let mut ids = self.ids.lock().unwrap();
        *ids = IdTables::default();
    }

    /// Id for a (definition, fold label) pair, allocating on first use
    ///
    /// Ids start at 1; 0 is reserved for "no folding region". Running
    /// out of the u16 id space is a programming error.
    pub(crate) fn folding_region_id(&self, def_name: &str, label: &str) -> u16 {
        let mut ids = self.ids.lock().unwrap();
        let key = (def_name.to_string(), label.to_string());
        if let Some(id) = ids.folding_ids.get(&key) {
            return *id;
        }
        assert!(
            ids.folding_counter < u16::MAX,
            "folding region id space exhausted"
        );
        ids.folding_counter += 1;
        let id = ids.folding_counter;
        ids.folding_ids.insert(key, id);
        id
    }

    /// Next sequential format id, starting at 1
    pub(crate) fn next_format_id(&self) -> u16 {
        let mut ids = self.ids.lock().unwrap();
        assert!(ids.format_counter < u16::MAX, "format id space exhausted");
        ids.format_counter += 1;
        ids.format_counter
    }
}

struct ContentDetection {
    def: Definition,
    rules: Vec<Regex>,
}

struct FileNameDetection {
    def: Definition,
    file_names: Vec<String>,
}

/// The set of loaded definitions and themes
///
/// Collections are mutated only by `load`/`reload`; every query is
/// read-only. Dropping the repository (or reloading it) invalidates all
/// outstanding definitions and highlighting states.
pub struct Repository {
    core: Arc<RepoCore>,
    defs: HashMap<String, Definition>,
    sorted_defs: Vec<Definition>,
    themes: Vec<Theme>,
    content_detections: Vec<ContentDetection>,
    file_name_detections: Vec<FileNameDetection>,
    custom_search_paths: Vec<PathBuf>,
}

impl Repository {
    /// Create a repository and load all standard search locations
    pub fn new() -> Self {
        let mut repo = Self {
            core: Arc::new(RepoCore::new()),
            defs: HashMap::new(),
            sorted_defs: Vec::new(),
            themes: Vec::new(),
            content_detections: Vec::new(),
            file_name_detections: Vec::new(),
            custom_search_paths: Vec::new(),
        };
        repo.load();
        repo
    }

    /// Create a repository with one custom search path already set
    pub fn with_search_path<P: Into<PathBuf>>(path: P) -> Self {
        let mut repo = Self {
            core: Arc::new(RepoCore::new()),
            defs: HashMap::new(),
            sorted_defs: Vec::new(),
            themes: Vec::new(),
            content_detections: Vec::new(),
            file_name_detections: Vec::new(),
            custom_search_paths: vec![path.into()],
        };
        repo.load();
        repo
    }

    fn load(&mut self) {
        for dir in system_dirs("syntax") {
            self.load_syntax_folder(&dir);
        }
        // Backward compatibility with the pre-index grammar layout
        for dir in system_dirs("grammars") {
            self.load_syntax_folder(&dir);
        }
        self.load_builtin_syntax();
        for path in self.custom_search_paths.clone() {
            self.load_syntax_folder(&path.join("syntax"));
        }

        self.sorted_defs = self.defs.values().cloned().collect();
        self.sorted_defs.sort_by(|a, b| {
            a.translated_name()
                .to_lowercase()
                .cmp(&b.translated_name().to_lowercase())
        });

        for dir in system_dirs("themes") {
            self.load_theme_folder(&dir);
        }
        self.load_builtin_themes();
        for path in self.custom_search_paths.clone() {
            self.load_theme_folder(&path.join("themes"));
        }

        // Detection rules reference definitions by name, so definitions
        // must all be in place by now
        for path in self.custom_search_paths.clone() {
            self.load_detection_file(&path);
        }
    }

    fn load_syntax_folder(&mut self, dir: &Path) {
        if self.load_syntax_folder_from_index(dir) {
            return;
        }
        for path in toml_files(dir) {
            if path.file_name().map(|n| n == "index.toml").unwrap_or(false) {
                continue;
            }
            match loader::load_grammar_meta(&path) {
                Ok(meta) => {
                    let def = Definition::new(&self.core, meta, GrammarSource::File(path));
                    self.add_definition(def);
                }
                Err(err) => log::warn!("skipping grammar file: {}", err),
            }
        }
    }

    /// Load a whole location from its prebuilt `index.toml`
    ///
    /// Present and parsable means the index is used exclusively, loose
    /// files in the same directory are not scanned. Absent or
    /// unreadable falls back to per-file scanning transparently.
    fn load_syntax_folder_from_index(&mut self, dir: &Path) -> bool {
        let index = dir.join("index.toml");
        if !index.is_file() {
            return false;
        }
        match loader::load_index(&index) {
            Ok(entries) => {
                for (file, meta) in entries {
                    let def =
                        Definition::new(&self.core, meta, GrammarSource::File(dir.join(file)));
                    self.add_definition(def);
                }
                true
            }
            Err(err) => {
                log::warn!("falling back to loose grammar files: {}", err);
                false
            }
        }
    }

    fn load_builtin_syntax(&mut self) {
        for text in builtin::GRAMMARS {
            match loader::parse_grammar_meta(text, Path::new("<builtin>")) {
                Ok(meta) => {
                    let def = Definition::new(&self.core, meta, GrammarSource::Embedded(text));
                    self.add_definition(def);
                }
                Err(err) => log::warn!("skipping builtin grammar: {}", err),
            }
        }
    }

    /// Merge one discovered definition by logical name
    ///
    /// The first copy of a name wins unless a later copy carries a
    /// strictly higher version; an equal version is an equally good
    /// copy already on hand, so it is skipped rather than reparsed.
    fn add_definition(&mut self, def: Definition) {
        let name = def.name().to_string();
        match self.defs.get(&name) {
            Some(existing) if existing.version() >= def.version() => {}
            _ => {
                self.defs.insert(name, def);
            }
        }
    }

    fn load_theme_folder(&mut self, dir: &Path) {
        for path in toml_files(dir) {
            match loader::load_theme(&path) {
                Ok(theme) => self.add_theme(theme),
                Err(err) => log::warn!("skipping theme file: {}", err),
            }
        }
    }

    fn load_builtin_themes(&mut self) {
        for text in builtin::THEMES {
            match loader::parse_theme(text, Path::new("<builtin>")) {
                Ok(theme) => self.add_theme(theme),
                Err(err) => log::warn!("skipping builtin theme: {}", err),
            }
        }
    }

    /// Merge one theme into the name-sorted collection, keeping the
    /// strictly higher revision for duplicate names
    fn add_theme(&mut self, theme: Theme) {
        match self
            .themes
            .binary_search_by(|probe| probe.name().cmp(theme.name()))
        {
            Ok(pos) => {
                if self.themes[pos].revision() < theme.revision() {
                    self.themes[pos] = theme;
                }
            }
            Err(pos) => self.themes.insert(pos, theme),
        }
    }

    fn load_detection_file(&mut self, path: &Path) {
        let file = path.join("content-detection.toml");
        if !file.is_file() {
            return;
        }
        let entries = match loader::load_detection(&file) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("skipping content detection file: {}", err);
                return;
            }
        };
        for entry in entries {
            let def = match self.defs.get(&entry.name) {
                Some(def) => def.clone(),
                None => {
                    log::warn!(
                        "content detection rules for unknown definition `{}`, skipped",
                        entry.name
                    );
                    continue;
                }
            };
            if !entry.content.is_empty() {
                self.content_detections.push(ContentDetection {
                    def: def.clone(),
                    rules: entry.content,
                });
            }
            if !entry.file_names.is_empty() {
                self.file_name_detections.push(FileNameDetection {
                    def,
                    file_names: entry.file_names,
                });
            }
        }
    }

    /// Look up a definition by its unique logical name
    ///
    /// Returns the empty definition if absent; never an error.
    pub fn definition_for_name(&self, name: &str) -> Definition {
        self.defs.get(name).cloned().unwrap_or_default()
    }

    /// Select the definition for a file name
    ///
    /// Extension globs are matched against the base name; among
    /// matching definitions the numerically highest priority wins, ties
    /// going to the first in sorted enumeration order. With no glob
    /// candidate, exact file-name detection rules are tried in load
    /// order. An empty result means "no highlighting", not an error.
    pub fn definition_for_file_name(&self, file_name: &str) -> Definition {
        let base = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file_name);

        let mut best: Option<&Definition> = None;
        for def in &self.sorted_defs {
            if !def.matches_file_name(base) {
                continue;
            }
            match best {
                Some(current) if current.priority() >= def.priority() => {}
                _ => best = Some(def),
            }
        }
        if let Some(def) = best {
            return def.clone();
        }

        for det in &self.file_name_detections {
            if det.file_names.iter().any(|n| n == base) {
                return det.def.clone();
            }
        }

        Definition::default()
    }

    /// Select a definition by sniffing a document's first line
    ///
    /// The first line is everything before the first line terminator;
    /// content without one is all first line, and empty content is an
    /// empty first line. Rules are tried in load order, first matching
    /// pattern wins.
    pub fn definition_for_content(&self, content: &str) -> Definition {
        let first_line = content.lines().next().unwrap_or("");
        for det in &self.content_detections {
            if det.rules.iter().any(|rule| rule.is_match(first_line)) {
                return det.def.clone();
            }
        }
        Definition::default()
    }

    /// All definitions, sorted case-insensitively by display name
    pub fn definitions(&self) -> &[Definition] {
        &self.sorted_defs
    }

    /// All themes, sorted by name
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Look up a theme by name; empty theme if absent
    pub fn theme(&self, name: &str) -> Theme {
        self.themes
            .iter()
            .find(|t| t.name() == name)
            .cloned()
            .unwrap_or_default()
    }

    /// Resolve one of the two well-known default themes
    pub fn default_theme(&self, kind: DefaultTheme) -> Theme {
        match kind {
            DefaultTheme::Light => self.theme("Default"),
            DefaultTheme::Dark => self.theme("Default Dark"),
        }
    }

    /// Id for a (definition, fold label) pair; stable within this load
    /// generation, reset by `reload`
    pub fn folding_region_id(&self, def_name: &str, label: &str) -> u16 {
        self.core.folding_region_id(def_name, label)
    }

    /// Allocate the next format id for this load generation
    pub fn next_format_id(&self) -> u16 {
        self.core.next_format_id()
    }

    /// Discard everything and re-run the full load sequence
    ///
    /// Every definition and state handed out before this call becomes
    /// detectably invalid, and all id counters restart; ids from before
    /// a reload must never be compared against ids from after. This is
    /// the only way to pick up on-disk grammar or theme changes.
    pub fn reload(&mut self) {
        self.core.begin_generation();
        self.defs.clear();
        self.sorted_defs.clear();
        self.themes.clear();
        self.content_detections.clear();
        self.file_name_detections.clear();
        self.load();
    }

    /// Append a custom search path and reload
    ///
    /// Path changes are rare, so the cost of a full reload is paid once
    /// rather than keeping an incremental merge correct.
    pub fn add_custom_search_path<P: Into<PathBuf>>(&mut self, path: P) {
        self.custom_search_paths.push(path.into());
        self.reload();
    }

    /// The configured custom search paths, in registration order
    pub fn custom_search_paths(&self) -> &[PathBuf] {
        &self.custom_search_paths
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

/// System-wide data locations, highest precedence first
fn system_dirs(subdir: &str) -> Vec<PathBuf> {
    let mut roots = Vec::new();
    match env::var("XDG_DATA_HOME") {
        Ok(xdg) if !xdg.is_empty() => roots.push(PathBuf::from(xdg)),
        _ => {
            if let Ok(home) = env::var("HOME") {
                roots.push(PathBuf::from(home).join(".local/share"));
            }
        }
    }
    roots.push(PathBuf::from("/usr/share"));
    roots
        .into_iter()
        .map(|root| root.join("glint").join(subdir))
        .collect()
}

/// The `.toml` files of a directory in stable name order
///
/// A missing or unreadable directory is simply empty; search locations
/// are optional by design.
fn toml_files(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().map(|x| x == "toml").unwrap_or(false))
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn grammar(name: &str, version: i64, priority: i64, extensions: &[&str]) -> String {
        let exts = extensions
            .iter()
            .map(|e| format!("\"{}\"", e))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "[grammar]\nname = \"{}\"\nversion = {}\npriority = {}\nextensions = [{}]\n\n\
             [[context]]\nname = \"Normal\"\n",
            name, version, priority, exts
        )
    }

    fn write(dir: &Path, file: &str, text: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(file), text).unwrap();
    }

    #[test]
    fn test_version_merge_keeps_highest_both_orders() {
        for (first, second) in [(3, 5), (5, 3)] {
            let tmp = TempDir::new().unwrap();
            let dir = tmp.path().join("syntax");
            write(&dir, "a.toml", &grammar("Same", first, 0, &["*.sm"]));
            write(&dir, "b.toml", &grammar("Same", second, 0, &["*.sm"]));

            let repo = Repository::with_search_path(tmp.path());
            let def = repo.definition_for_name("Same");
            assert!(def.is_valid());
            assert_eq!(def.version(), 5);
        }
    }

    #[test]
    fn test_equal_version_keeps_existing() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("syntax");
        write(&dir, "a.toml", &grammar("Twin", 3, 1, &["*.tw"]));
        write(&dir, "b.toml", &grammar("Twin", 3, 9, &["*.tw"]));

        let repo = Repository::with_search_path(tmp.path());
        let def = repo.definition_for_name("Twin");
        assert_eq!(def.version(), 3);
        // a.toml scanned first; the equal-version copy from b.toml is
        // skipped, so a.toml's priority survives
        assert_eq!(def.priority(), 1);
    }

    #[test]
    fn test_equal_version_copy_allocates_no_ids() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("syntax");
        write(&dir, "a.toml", &grammar("Twin", 3, 1, &["*.tw"]));
        write(&dir, "b.toml", &grammar("Twin", 3, 9, &["*.tw"]));

        let repo = Repository::with_search_path(tmp.path());
        // The duplicate equal-version copy is skipped before any body
        // compilation, so loading it allocated no ids: the first
        // explicit allocations still take the first id of each counter
        assert_eq!(repo.next_format_id(), 1);
        assert_eq!(repo.folding_region_id("Twin", "Region"), 1);
    }

    #[test]
    fn test_theme_precedence_and_sorting() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("themes");
        write(
            &dir,
            "a.toml",
            "[theme]\nname = \"Zeta\"\nrevision = 1\n",
        );
        write(
            &dir,
            "b.toml",
            "[theme]\nname = \"Zeta\"\nrevision = 2\n",
        );
        write(
            &dir,
            "c.toml",
            "[theme]\nname = \"Alpha\"\nrevision = 1\n",
        );

        let repo = Repository::with_search_path(tmp.path());
        assert_eq!(repo.theme("Zeta").revision(), 2);
        assert!(repo.theme("Alpha").is_valid());

        let names: Vec<&str> = repo.themes().iter().map(|t| t.name()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_default_themes_resolve() {
        let repo = Repository::new();
        assert!(repo.default_theme(DefaultTheme::Light).is_valid());
        assert!(repo.default_theme(DefaultTheme::Dark).is_valid());
    }

    #[test]
    fn test_file_name_priority() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("syntax");
        write(&dir, "low.toml", &grammar("CLow", 1, 5, &["*.c"]));
        write(&dir, "high.toml", &grammar("CHigh", 1, 10, &["*.c"]));

        let repo = Repository::with_search_path(tmp.path());
        assert_eq!(repo.definition_for_file_name("x.c").name(), "CHigh");
        assert_eq!(repo.definition_for_file_name("/deep/path/x.c").name(), "CHigh");
    }

    #[test]
    fn test_file_name_fallback_rules() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("syntax"),
            "make.toml",
            &grammar("Make", 1, 0, &[]),
        );
        write(
            tmp.path(),
            "content-detection.toml",
            "[Make]\nfile-names = [\"Makefile\"]\n",
        );

        let repo = Repository::with_search_path(tmp.path());
        assert_eq!(repo.definition_for_file_name("Makefile").name(), "Make");
        assert!(!repo.definition_for_file_name("unknown.zzz").is_valid());
    }

    #[test]
    fn test_content_sniffing() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("syntax"),
            "py.toml",
            &grammar("Python", 1, 0, &["*.py"]),
        );
        write(
            tmp.path(),
            "content-detection.toml",
            "[Python]\ncontent = ['^#!.*\\bpython']\n",
        );

        let repo = Repository::with_search_path(tmp.path());
        let def = repo.definition_for_content("#!/usr/bin/env python\nprint(1)");
        assert_eq!(def.name(), "Python");

        // No newline: the whole string is the first line
        assert_eq!(
            repo.definition_for_content("#!/usr/bin/env python").name(),
            "Python"
        );
        assert!(!repo.definition_for_content("").is_valid());
        assert!(!repo.definition_for_content("\n#!/usr/bin/env python").is_valid());
    }

    #[test]
    fn test_unknown_detection_name_skipped() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "content-detection.toml",
            "[NoSuchGrammar]\ncontent = ['^x']\n",
        );
        let repo = Repository::with_search_path(tmp.path());
        assert!(!repo.definition_for_content("x").is_valid());
    }

    #[test]
    fn test_index_used_exclusively() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("syntax");
        write(&dir, "listed.toml", &grammar("Listed", 1, 0, &["*.ls"]));
        write(&dir, "loose.toml", &grammar("Loose", 1, 0, &["*.lo"]));
        write(
            &dir,
            "index.toml",
            "[\"listed.toml\"]\nname = \"Listed\"\nversion = 1\nextensions = [\"*.ls\"]\n",
        );

        let repo = Repository::with_search_path(tmp.path());
        assert!(repo.definition_for_name("Listed").is_valid());
        // Not in the index, so never scanned
        assert!(!repo.definition_for_name("Loose").is_valid());
    }

    #[test]
    fn test_bad_index_falls_back_to_loose_files() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("syntax");
        write(&dir, "loose.toml", &grammar("Loose", 1, 0, &["*.lo"]));
        write(&dir, "index.toml", "not valid toml [[[");

        let repo = Repository::with_search_path(tmp.path());
        assert!(repo.definition_for_name("Loose").is_valid());
    }

    #[test]
    fn test_fold_ids_stable_within_generation_reset_across_reload() {
        let tmp = TempDir::new().unwrap();
        let mut repo = Repository::with_search_path(tmp.path());

        let id = repo.folding_region_id("Foo", "Bar");
        assert!(id > 0);
        assert_eq!(repo.folding_region_id("Foo", "Bar"), id);
        let other = repo.folding_region_id("Foo", "Baz");
        assert_ne!(other, id);

        repo.reload();
        // Fresh generation: counters restart, so the first allocation
        // for a new pair takes the first id again
        assert_eq!(repo.folding_region_id("Other", "Label"), 1);
    }

    #[test]
    fn test_format_ids_sequential() {
        let tmp = TempDir::new().unwrap();
        let repo = Repository::with_search_path(tmp.path());
        let a = repo.next_format_id();
        let b = repo.next_format_id();
        assert_eq!(b, a + 1);
    }

    #[test]
    fn test_reload_invalidates_definitions() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("syntax"),
            "a.toml",
            &grammar("Keep", 1, 0, &["*.kp"]),
        );
        let mut repo = Repository::with_search_path(tmp.path());
        let def = repo.definition_for_name("Keep");
        assert!(def.is_valid());

        repo.reload();
        assert!(!def.is_valid());
        assert!(repo.definition_for_name("Keep").is_valid());
    }

    #[test]
    fn test_definition_outlives_repository() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("syntax"),
            "a.toml",
            &grammar("Orphan", 1, 0, &["*.or"]),
        );
        let def = {
            let repo = Repository::with_search_path(tmp.path());
            repo.definition_for_name("Orphan")
        };
        // Repository gone: still answers queries, but reads invalid
        assert!(!def.is_valid());
        assert_eq!(def.name(), "Orphan");
        assert!(def.body().is_none());
    }

    #[test]
    fn test_add_custom_search_path_reloads() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write(
            &second.path().join("syntax"),
            "b.toml",
            &grammar("Late", 1, 0, &["*.lt"]),
        );

        let mut repo = Repository::with_search_path(first.path());
        assert!(!repo.definition_for_name("Late").is_valid());

        repo.add_custom_search_path(second.path());
        assert_eq!(repo.custom_search_paths().len(), 2);
        assert!(repo.definition_for_name("Late").is_valid());
    }

    #[test]
    fn test_definitions_sorted_by_display_name() {
        let repo = Repository::new();
        let names: Vec<String> = repo
            .definitions()
            .iter()
            .map(|d| d.translated_name().to_lowercase())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_builtin_grammars_present() {
        let repo = Repository::new();
        assert!(repo.definition_for_name("Rust").is_valid());
        assert_eq!(repo.definition_for_file_name("main.rs").name(), "Rust");
    }
}
