#![forbid(unsafe_code)]

//! IME editor state.
//!
//! [`EditorState`] is the complete, externally visible state an input method
//! negotiates with: the selection, the active composition region, and the
//! snippet of text the IME is allowed to rewrite directly. All offsets are
//! counted in Unicode scalar values (runes), never bytes or UTF-16 units.
//!
//! # Example
//! ```
//! use mado_core::editor::{EditorState, TextRange};
//!
//! let mut state = EditorState::default();
//! state.replace(TextRange::new(0, 0), "héllo");
//! assert_eq!(state.snippet.range, TextRange::new(0, 5));
//! assert_eq!(state.snippet.text, "héllo");
//! ```

use crate::geometry::Point;

/// A span of rune offsets into editable text.
///
/// `start` may exceed `end`; that denotes a reversed selection and is kept
/// as given. Callers that need a canonical order use [`TextRange::sorted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    /// Create a new range.
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty range at `pos`.
    #[inline]
    pub const fn caret(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// Lower bound of the range.
    #[inline]
    pub fn min(&self) -> usize {
        self.start.min(self.end)
    }

    /// Upper bound of the range.
    #[inline]
    pub fn max(&self) -> usize {
        self.start.max(self.end)
    }

    /// The same span with `start <= end`.
    #[inline]
    #[must_use]
    pub fn sorted(&self) -> Self {
        Self::new(self.min(), self.max())
    }

    /// Whether `start > end`.
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.start > self.end
    }

    /// Whether the range covers no text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of runes covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.max() - self.min()
    }
}

/// Caret geometry, used by platform IME bridges to place candidate windows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Caret {
    /// Baseline position of the caret, in window coordinates.
    pub pos: Point,
    /// Distance from the baseline to the top of the caret.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the caret.
    pub descent: f32,
}

/// The selection plus its caret geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EditorSelection {
    pub range: TextRange,
    pub caret: Caret,
}

/// The portion of text the input method may rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snippet {
    pub range: TextRange,
    pub text: String,
}

/// Complete IME state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub selection: EditorSelection,
    pub snippet: Snippet,
    /// Active composition region; `None` when not composing.
    pub compose: Option<TextRange>,
}

/// Number of runes in `text`.
#[inline]
pub fn rune_count(text: &str) -> usize {
    text.chars().count()
}

impl EditorState {
    /// Replace the runes in `range` with `text`.
    ///
    /// The range is ordered first. Selection and composition offsets inside
    /// the replaced span collapse to the end of the new text; offsets past it
    /// shift by the length difference. A snippet that does not overlap the
    /// range is discarded and restarted at the range start; otherwise the
    /// replacement is spliced into the snippet text and the snippet range is
    /// widened to cover it.
    pub fn replace(&mut self, range: TextRange, text: &str) {
        let r = range.sorted();
        let runes: Vec<char> = text.chars().collect();
        let new_end = r.start + runes.len();
        let adjust = |pos: usize| -> usize {
            if new_end < pos && pos <= r.end {
                new_end
            } else if r.end < pos {
                new_end + (pos - r.end)
            } else {
                pos
            }
        };

        let sel = &mut self.selection.range;
        sel.start = adjust(sel.start);
        sel.end = adjust(sel.end);
        if let Some(compose) = &mut self.compose {
            compose.start = adjust(compose.start);
            compose.end = adjust(compose.end);
        }

        let mut snippet = std::mem::take(&mut self.snippet);
        if r.end < snippet.range.start || r.start > snippet.range.end {
            snippet = Snippet {
                range: TextRange::caret(r.start),
                text: String::new(),
            };
        }
        let s = snippet.range;
        let old: Vec<char> = snippet.text.chars().collect();

        let mut spliced = String::with_capacity(snippet.text.len() + text.len());
        // Prefix of the old snippet before the replacement.
        let prefix = r.start.saturating_sub(s.start).min(old.len());
        spliced.extend(&old[..prefix]);
        spliced.push_str(text);
        // Suffix of the old snippet after the replacement.
        if r.end < s.end {
            let from = (r.end - s.start.min(r.end)).min(old.len());
            spliced.extend(&old[from..]);
        }

        let start = s.start.min(r.start);
        let len = rune_count(&spliced);
        self.snippet = Snippet {
            range: TextRange::new(start, start + len),
            text: spliced,
        };
        crate::trace!(
            start = r.start,
            end = r.end,
            snippet_len = len,
            "editor replace"
        );
    }
}
