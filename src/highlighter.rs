//! Incremental highlighting engine
//!
//! `highlight_line` drives the rule engine over one line, producing a
//! left-to-right partition of styled spans, folding events, and the
//! state the next line starts from. `Highlighter` keeps that data per
//! line for a whole document, rehighlights edited regions up to a fixed
//! point, and answers the folding and comment queries.

use crate::context::{FoldKind, RegexEngine, RuleEngine, Transition};
use crate::definition::Definition;
use crate::format::{Format, FormatKind};
use crate::state::State;
use crate::style::Style;
use crate::theme::Theme;

/// Format used when no definition or rule claims the text
const PLAIN: Format = Format {
    id: 0,
    kind: FormatKind::Normal,
};

/// One formatted run within a line
///
/// The spans of a line are contiguous, non-overlapping, and cover the
/// line exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightedSpan {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    pub format: Format,
}

impl HighlightedSpan {
    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }
}

/// A folding region opening or closing within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoldEvent {
    /// Byte offset of the span that triggered the event
    pub offset: usize,
    /// Length of that span
    pub len: usize,
    /// Generation-unique region id
    pub region: u16,
    pub kind: FoldKind,
}

/// Result of highlighting one line
#[derive(Debug)]
pub struct LineHighlight {
    pub spans: Vec<HighlightedSpan>,
    pub folds: Vec<FoldEvent>,
    /// Initial state for the following line
    pub end_state: State,
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    let mut next = pos + 1;
    while next < text.len() && !text.is_char_boundary(next) {
        next += 1;
    }
    next.min(text.len())
}

fn plain_line(def: &Definition, text: &str) -> LineHighlight {
    let mut spans = Vec::new();
    if !text.is_empty() {
        spans.push(HighlightedSpan {
            start: 0,
            end: text.len(),
            format: PLAIN,
        });
    }
    LineHighlight {
        spans,
        folds: Vec::new(),
        end_state: State::new(def),
    }
}

/// Highlight one line of text
///
/// `state` is the state produced by the previous line; an invalid state
/// or one belonging to a different definition is treated as empty. With
/// an empty or invalid definition the whole line comes back as one
/// plain span, so callers can treat "no highlighting" uniformly.
pub fn highlight_line(
    def: &Definition,
    engine: &dyn RuleEngine,
    text: &str,
    state: &State,
) -> LineHighlight {
    let body = match def.body() {
        Some(body) => body,
        None => return plain_line(def, text),
    };
    let graph = &body.graph;
    if graph.is_empty() {
        return plain_line(def, text);
    }

    let mut state = if state.is_valid() && state.belongs_to(def) {
        state.clone()
    } else {
        State::new(def)
    };

    let root = graph.root();
    let mut spans: Vec<HighlightedSpan> = Vec::new();
    let mut folds: Vec<FoldEvent> = Vec::new();
    let mut pos = 0;

    let push_span = |spans: &mut Vec<HighlightedSpan>, start: usize, end: usize, format: Format| {
        if end <= start {
            return;
        }
        if let Some(last) = spans.last_mut() {
            if last.end == start && last.format == format {
                last.end = end;
                return;
            }
        }
        spans.push(HighlightedSpan { start, end, format });
    };

    while pos < text.len() {
        let top = state.top_context().unwrap_or(root);
        let context_format = graph
            .context(top)
            .or_else(|| graph.context(root))
            .map(|c| c.format)
            .unwrap_or(PLAIN);

        let matched = engine.match_at(graph, top, state.top_captures(), text, pos);
        let m = match matched {
            Some(m) => m,
            None => {
                // No rule claims this position: one character of the
                // context's default format, then retry
                let next = next_char_boundary(text, pos);
                push_span(&mut spans, pos, next, context_format);
                pos = next;
                continue;
            }
        };

        let end = m.end.min(text.len());
        if let Some(fold) = m.fold {
            folds.push(FoldEvent {
                offset: pos,
                len: end.saturating_sub(pos),
                region: fold.region,
                kind: fold.kind,
            });
        }

        match m.transition {
            Transition::Stay => {}
            Transition::Push(ctx) => state.push(ctx, m.captures),
            Transition::Pop(levels) => {
                for _ in 0..levels {
                    state.pop();
                }
            }
            Transition::Switch(ctx) => {
                state.pop();
                state.push(ctx, m.captures);
            }
        }

        if end > pos {
            push_span(&mut spans, pos, end, m.format.unwrap_or(context_format));
            pos = end;
        } else {
            // Zero-length match: still advance one position so the
            // line is always consumed in finitely many steps
            let after = state.top_context().unwrap_or(root);
            let fallback = graph
                .context(after)
                .or_else(|| graph.context(root))
                .map(|c| c.format)
                .unwrap_or(PLAIN);
            let next = next_char_boundary(text, pos);
            push_span(&mut spans, pos, next, fallback);
            pos = next;
        }
    }

    LineHighlight {
        spans,
        folds,
        end_state: state,
    }
}

#[derive(Debug)]
struct LineData {
    start_state: State,
    end_state: State,
    spans: Vec<HighlightedSpan>,
    folds: Vec<FoldEvent>,
}

/// Per-document highlighting driver
///
/// Keeps the state chain, spans, and folding events for every line of
/// one document. Rehighlighting is cooperative: each call processes at
/// most a caller-chosen number of lines and reports whether work
/// remains, so large documents never block a session in one call.
#[derive(Debug, Default)]
pub struct Highlighter {
    definition: Definition,
    theme: Theme,
    engine: RegexEngine,
    lines: Vec<LineData>,
    /// (next line to process, last line forced dirty) when work pends
    pending: Option<(usize, usize)>,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the grammar for this document; discards all cached lines
    pub fn set_definition(&mut self, definition: Definition) {
        self.definition = definition;
        self.lines.clear();
        self.pending = Some((0, usize::MAX));
    }

    pub fn definition(&self) -> &Definition {
        &self.definition
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Resolve the concrete style for a span's format
    pub fn style_for(&self, format: Format) -> Style {
        self.theme.style(format.kind)
    }

    fn mark_dirty(&mut self, first: usize, last: usize) {
        self.pending = Some(match self.pending {
            Some((from, to)) => (from.min(first), to.max(last)),
            None => (first, last),
        });
    }

    /// Mark one edited line range as needing rehighlighting
    pub fn invalidate_region(&mut self, first_line: usize, last_line: usize) {
        self.mark_dirty(first_line, last_line);
    }

    /// Mark everything from a line onwards as needing rehighlighting
    /// (use when lines were inserted or removed)
    pub fn invalidate_from(&mut self, line: usize) {
        self.mark_dirty(line, usize::MAX);
    }

    /// Rehighlight pending lines, processing at most `max_lines` lines
    /// (0 means unlimited); returns whether work remains
    ///
    /// Processing starts from the state at the end of the nearest
    /// preceding unchanged line. Past the edited region it stops early
    /// once a line's incoming state equals the state it was previously
    /// highlighted with, since downstream lines cannot have changed.
    pub fn rehighlight_pass<S: AsRef<str>>(&mut self, lines: &[S], max_lines: usize) -> bool {
        if self.lines.len() > lines.len() {
            self.lines.truncate(lines.len());
            // A shrunken document may have lost fold ends; nothing to
            // reprocess for that alone, cached lines stay consistent
        }
        if self.pending.is_none() && self.lines.len() < lines.len() {
            self.pending = Some((self.lines.len(), usize::MAX));
        }
        let (start, forced_to) = match self.pending {
            Some(pending) => pending,
            None => return false,
        };

        let mut line = start.min(self.lines.len());
        if line >= lines.len() {
            self.pending = None;
            return false;
        }

        let mut prev_state = if line == 0 {
            State::new(&self.definition)
        } else {
            self.lines[line - 1].end_state.clone()
        };
        let mut processed = 0usize;

        while line < lines.len() {
            if max_lines != 0 && processed >= max_lines {
                self.pending = Some((line, forced_to));
                return true;
            }
            if line > forced_to {
                if let Some(data) = self.lines.get(line) {
                    if data.start_state == prev_state {
                        // Fixed point: this line was highlighted from
                        // the same state, so all cached lines are
                        // current. Appended lines past the cache still
                        // need their first pass.
                        if self.lines.len() >= lines.len() {
                            self.pending = None;
                            return false;
                        }
                        line = self.lines.len();
                        prev_state = self.lines[line - 1].end_state.clone();
                        continue;
                    }
                }
            }

            let result = highlight_line(
                &self.definition,
                &self.engine,
                lines[line].as_ref(),
                &prev_state,
            );
            let data = LineData {
                start_state: prev_state,
                end_state: result.end_state.clone(),
                spans: result.spans,
                folds: result.folds,
            };
            if line < self.lines.len() {
                self.lines[line] = data;
            } else {
                self.lines.push(data);
            }
            prev_state = result.end_state;
            line += 1;
            processed += 1;
        }

        self.pending = None;
        false
    }

    /// Highlight the whole document from scratch in one call
    pub fn rehighlight_all<S: AsRef<str>>(&mut self, lines: &[S]) {
        self.lines.clear();
        self.pending = Some((0, usize::MAX));
        self.rehighlight_pass(lines, 0);
    }

    /// Number of lines with cached highlighting data
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The styled spans of a line (empty if never highlighted)
    pub fn line_spans(&self, line: usize) -> &[HighlightedSpan] {
        self.lines
            .get(line)
            .map(|d| d.spans.as_slice())
            .unwrap_or(&[])
    }

    /// The folding events of a line
    pub fn line_folds(&self, line: usize) -> &[FoldEvent] {
        self.lines
            .get(line)
            .map(|d| d.folds.as_slice())
            .unwrap_or(&[])
    }

    /// The state at the end of a line
    pub fn line_state(&self, line: usize) -> State {
        self.lines
            .get(line)
            .map(|d| d.end_state.clone())
            .unwrap_or_default()
    }

    /// Whether at least one folding region begins on this line
    pub fn starts_folding_region(&self, line: usize) -> bool {
        self.line_folds(line)
            .iter()
            .any(|e| e.kind == FoldKind::Begin)
    }

    /// Find the line where the folding region starting at `start_line`
    /// ends
    ///
    /// If multiple regions open on the start line, the innermost
    /// still-open one is matched. `None` means the region is
    /// unterminated and folds to the document end. This is a sequential
    /// forward scan; an unterminated region near the top of a large
    /// document makes it expensive.
    pub fn find_folding_region_end(&self, start_line: usize) -> Option<usize> {
        let events = self.line_folds(start_line);

        // Opens surviving the start line itself, innermost last
        let mut open: Vec<(usize, u16)> = Vec::new();
        for (i, event) in events.iter().enumerate() {
            match event.kind {
                FoldKind::Begin => open.push((i, event.region)),
                FoldKind::End => {
                    if let Some(p) = open.iter().rposition(|(_, r)| *r == event.region) {
                        open.remove(p);
                    }
                }
            }
        }
        let (_, region) = *open.last()?;

        let mut depth: u32 = 1;
        for line in start_line + 1..self.lines.len() {
            for event in self.line_folds(line) {
                if event.region != region {
                    continue;
                }
                match event.kind {
                    FoldKind::Begin => depth += 1,
                    FoldKind::End => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(line);
                        }
                    }
                }
            }
        }
        None
    }

    /// Whether the given position lies inside a comment span
    pub fn is_position_in_comment(&self, line: usize, column: usize) -> bool {
        self.line_spans(line)
            .iter()
            .any(|span| span.contains(column) && span.format.is_comment())
    }
}
