#![forbid(unsafe_code)]

//! The window contract the dispatcher drives.

use std::time::Duration;

use mado_core::action::Actions;
use mado_core::config::Decorations;
use mado_core::event::Event;
use mado_core::geometry::{Metric, Point};
use mado_core::semantic::{SemanticId, SemanticNode};

use crate::dispatcher::Context;
use crate::semantic::SemanticTree;

/// Application-side window logic.
///
/// Every method runs on the window thread, from inside a
/// [`Dispatcher`](crate::Dispatcher) call. Events emitted through the
/// [`Context`] are queued and delivered after the current one returns.
pub trait Window {
    /// Handle one event. Returns whether it was consumed.
    fn process_event(&mut self, cx: &mut Context<'_>, event: Event) -> bool;

    /// Reconcile after a batch of events (focus, IME state, redraw requests).
    fn update_state(&mut self, cx: &mut Context<'_>);

    /// Advance or reschedule animation.
    fn update_animation(&mut self, _cx: &mut Context<'_>) {}

    /// Append this frame's semantic nodes in pre-order, root first.
    fn append_semantics(&mut self, _nodes: &mut Vec<SemanticNode>) {}

    /// Topmost semantic node under `point`.
    fn semantic_at(&self, tree: &SemanticTree, point: Point) -> Option<SemanticId> {
        tree.hit_test(point)
    }

    /// Whether the window has been torn down.
    fn is_destroyed(&self) -> bool;

    /// Current unit conversion.
    fn metric(&self) -> Metric;

    /// Decoration settings, updated in place by config reconciliation.
    fn decorations_mut(&mut self) -> &mut Decorations;

    /// Move focus to where the last pointer press landed.
    fn click_focus(&mut self) {}

    /// Schedule the next frame; `None` means as soon as possible.
    fn set_next_frame(&mut self, _at: Option<Duration>) {}

    /// Window-manager action for a point in the decoration area.
    fn action_at(&self, _point: Point) -> Option<Actions> {
        None
    }
}
