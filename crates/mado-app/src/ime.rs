#![forbid(unsafe_code)]

//! Input-method editing operations.
//!
//! A platform IME bridge calls these on the [`Dispatcher`](crate::Dispatcher);
//! window code running inside a dispatch cycle calls them on its
//! [`Context`](crate::Context). Each operation updates the shared
//! [`EditorState`] and emits the matching event, so the focused text widget
//! learns about every change in the order it happened.

use mado_core::editor::{EditorState, TextRange, rune_count};
use mado_core::event::{EditEvent, Event};

/// Something that owns IME state and can emit events.
pub trait EditorHost {
    /// Current IME state.
    fn editor(&self) -> &EditorState;

    /// Mutable IME state.
    fn editor_mut(&mut self) -> &mut EditorState;

    /// Emit an event toward the window.
    fn emit(&mut self, event: Event) -> bool;
}

/// IME operations, available on every [`EditorHost`].
pub trait InputMethod: EditorHost {
    /// Replace the selection with `text` and collapse the selection to just
    /// after the inserted text.
    ///
    /// Emits `Edit`, `Snippet`, then `Selection`.
    fn insert(&mut self, text: &str) {
        let sel = self.editor().selection.range;
        self.replace(sel, text);
        let caret = sel.min() + rune_count(text);
        self.set_selection(TextRange::caret(caret));
    }

    /// Replace the runes in `range` with `text`.
    ///
    /// Emits `Edit` with the range as given, then `Snippet` with the snippet
    /// range as it stands after the edit was processed.
    fn replace(&mut self, range: TextRange, text: &str) {
        self.editor_mut().replace(range, text);
        self.emit(Event::Edit(EditEvent::new(range, text)));
        let snippet = self.editor().snippet.range;
        self.emit(Event::Snippet(snippet));
    }

    /// Set the selection and emit `Selection`.
    fn set_selection(&mut self, range: TextRange) {
        self.editor_mut().selection.range = range;
        self.emit(Event::Selection(range));
    }

    /// Set or clear the composition region. Emits nothing.
    fn set_composing_region(&mut self, range: Option<TextRange>) {
        self.editor_mut().compose = range;
    }

    /// Request a different snippet window.
    ///
    /// No-op when `range` already is the snippet range. Otherwise the range
    /// is stored and `Snippet` emitted; the window refills the text.
    fn set_snippet(&mut self, range: TextRange) {
        if self.editor().snippet.range == range {
            return;
        }
        self.editor_mut().snippet.range = range;
        self.emit(Event::Snippet(range));
    }
}

impl<T: EditorHost + ?Sized> InputMethod for T {}
