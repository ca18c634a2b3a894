#![forbid(unsafe_code)]

//! Per-window event dispatch.
//!
//! The [`Dispatcher`] is the only way events reach a [`Window`]. It
//! serializes delivery: an event emitted while another is being processed
//! is queued and delivered, in order, before the outermost
//! [`deliver`](Dispatcher::deliver) returns. No two `process_event` calls
//! ever overlap.
//!
//! # Dispatch cycle
//!
//! ```text
//! deliver(e) ─▶ queue e ─▶ drain ─▶ update_state ─▶ [wake-up only]
//!                            ▲                       options ▶ configure
//!                            │                       actions ▶ perform
//!                            └──── events emitted ◀──┘
//! ```
//!
//! The window sees a [`Context`] rather than the dispatcher, so anything it
//! emits from inside a callback can only be queued.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, debug_span, trace, warn};

use mado_core::action::Actions;
use mado_core::config::{ConfigOption, Decorations, WindowConfig};
use mado_core::editor::EditorState;
use mado_core::event::Event;
use mado_core::geometry::{Metric, Point};
use mado_core::semantic::{SemanticId, SemanticNode};

use crate::driver::{Driver, waker_for};
use crate::ime::EditorHost;
use crate::mailbox::WindowRequests;
use crate::semantic::SemanticTree;
use crate::window::Window;

/// Errors from [`Dispatcher::try_deliver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchError {
    /// An event arrived while no driver was bound.
    NoActiveDriver,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActiveDriver => write!(f, "event while no driver active"),
        }
    }
}

impl std::error::Error for DispatchError {}

/// Counters for dispatcher activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Completed dispatch cycles.
    pub cycles: u64,
    /// Events handed to the window.
    pub events_processed: u64,
    /// Events queued while a cycle was running.
    pub events_deferred: u64,
    /// Largest queue length observed.
    pub max_queue_depth: usize,
}

/// State shared between the dispatcher and the window's [`Context`].
#[derive(Default)]
struct Core {
    driver: Option<Arc<dyn Driver>>,
    busy: bool,
    pending: VecDeque<Event>,
    editor: EditorState,
    semantic: SemanticTree,
    stats: DispatchStats,
}

impl fmt::Debug for Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Core")
            .field("bound", &self.driver.is_some())
            .field("busy", &self.busy)
            .field("pending", &self.pending.len())
            .field("editor", &self.editor)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl Core {
    /// Queue `event`. Returns `true` when the caller must drain the queue.
    fn enqueue(&mut self, event: Event) -> bool {
        self.pending.push_back(event);
        self.stats.max_queue_depth = self.stats.max_queue_depth.max(self.pending.len());
        if self.busy {
            self.stats.events_deferred += 1;
            return false;
        }
        true
    }
}

/// What a [`Window`] may touch while the dispatcher is running it.
pub struct Context<'a> {
    driver: &'a dyn Driver,
    core: &'a mut Core,
}

impl<'a> Context<'a> {
    fn new(driver: &'a dyn Driver, core: &'a mut Core) -> Self {
        Self { driver, core }
    }

    /// The bound driver.
    pub fn driver(&self) -> &dyn Driver {
        self.driver
    }

    /// Queue an event for delivery after the current one.
    ///
    /// Always returns `true`: the event is accepted and will be delivered
    /// before the outermost `deliver` returns.
    pub fn submit(&mut self, event: Event) -> bool {
        trace!(kind = event.kind_name(), "event deferred");
        self.core.enqueue(event);
        true
    }

    /// Number of events waiting behind the current one.
    pub fn pending(&self) -> usize {
        self.core.pending.len()
    }

    /// Current IME state.
    pub fn editor_state(&self) -> &EditorState {
        &self.core.editor
    }

    /// Mutable IME state, for the window's own reconciliation.
    pub fn editor_state_mut(&mut self) -> &mut EditorState {
        &mut self.core.editor
    }

    /// Force a semantic tree rebuild on the next query.
    pub fn invalidate_semantics(&mut self) {
        self.core.semantic.invalidate();
    }
}

impl EditorHost for Context<'_> {
    fn editor(&self) -> &EditorState {
        &self.core.editor
    }

    fn editor_mut(&mut self) -> &mut EditorState {
        &mut self.core.editor
    }

    fn emit(&mut self, event: Event) -> bool {
        self.submit(event)
    }
}

/// Serializes event delivery to one window.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use mado_app::{Dispatcher, HeadlessDriver, RecordingWindow};
/// use mado_core::event::Event;
///
/// let driver = Arc::new(HeadlessDriver::new());
/// let mut dispatcher = Dispatcher::new(RecordingWindow::new());
/// dispatcher.set_driver(Some(driver.clone()));
///
/// assert!(dispatcher.deliver(Event::Focus(true)));
/// assert_eq!(dispatcher.window().events(), &[Event::Focus(true)]);
/// assert_eq!(dispatcher.window().updates(), 1);
/// ```
#[derive(Debug)]
pub struct Dispatcher<W: Window> {
    window: W,
    core: Core,
    requests: WindowRequests,
}

impl<W: Window> Dispatcher<W> {
    /// A dispatcher with no driver bound.
    pub fn new(window: W) -> Self {
        Self {
            window,
            core: Core::default(),
            requests: WindowRequests::new(),
        }
    }

    /// The window being driven.
    pub fn window(&self) -> &W {
        &self.window
    }

    /// Mutable access to the window outside of a dispatch cycle.
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    /// Consume the dispatcher, returning the window.
    pub fn into_window(self) -> W {
        self.window
    }

    /// A handle for posting options and actions from any thread.
    pub fn requests(&self) -> WindowRequests {
        self.requests.clone()
    }

    /// Activity counters.
    pub fn stats(&self) -> DispatchStats {
        self.core.stats
    }

    /// Whether a driver is bound.
    pub fn has_driver(&self) -> bool {
        self.core.driver.is_some()
    }

    /// Bind or unbind the platform driver.
    ///
    /// Also posts a matching wake-up callback to the request handle: the
    /// driver's `wakeup`, or a no-op when unbinding.
    pub fn set_driver(&mut self, driver: Option<Arc<dyn Driver>>) {
        debug!(bound = driver.is_some(), "driver changed");
        self.requests.set_waker(waker_for(driver.as_ref()));
        self.core.driver = driver;
    }

    /// Deliver an event and run a dispatch cycle.
    ///
    /// Returns whether the last event processed in the drain was handled.
    ///
    /// # Panics
    ///
    /// Panics if no driver is bound; see [`try_deliver`](Self::try_deliver).
    pub fn deliver(&mut self, event: Event) -> bool {
        match self.try_deliver(event) {
            Ok(handled) => handled,
            Err(err) => panic!("{err}"),
        }
    }

    /// Deliver an event and run a dispatch cycle.
    ///
    /// # Errors
    ///
    /// [`DispatchError::NoActiveDriver`] if no driver is bound. The event
    /// is dropped.
    pub fn try_deliver(&mut self, event: Event) -> Result<bool, DispatchError> {
        let Some(driver) = self.core.driver.clone() else {
            warn!(kind = event.kind_name(), "event dropped: no driver bound");
            return Err(DispatchError::NoActiveDriver);
        };
        let wakeup = event.is_wakeup();
        let trigger = event.kind_name();
        if !self.core.enqueue(event) {
            return Ok(true);
        }

        let _span = debug_span!(
            "mado.dispatch.cycle",
            trigger,
            processed = tracing::field::Empty,
            handled = tracing::field::Empty
        )
        .entered();

        let before = self.core.stats.events_processed;
        self.core.busy = true;
        let handled = self.drain(driver.as_ref());
        if self.window.is_destroyed() {
            debug!("window destroyed, skipping reconciliation");
        } else {
            self.reconcile(driver.as_ref(), wakeup);
            self.drain(driver.as_ref());
        }
        self.core.busy = false;
        self.core.semantic.invalidate();
        self.core.stats.cycles += 1;

        let processed = self.core.stats.events_processed - before;
        tracing::Span::current().record("processed", processed);
        tracing::Span::current().record("handled", handled);
        crate::debug_trace!(
            "cycle {} trigger={} processed={} handled={}",
            self.core.stats.cycles,
            trigger,
            processed,
            handled
        );
        Ok(handled)
    }

    /// Hand queued events to the window until the queue is empty.
    fn drain(&mut self, driver: &dyn Driver) -> bool {
        let mut handled = false;
        while let Some(event) = self.core.pending.pop_front() {
            trace!(kind = event.kind_name(), "process event");
            let mut cx = Context::new(driver, &mut self.core);
            handled = self.window.process_event(&mut cx, event);
            self.core.stats.events_processed += 1;
        }
        handled
    }

    fn reconcile(&mut self, driver: &dyn Driver, wakeup: bool) {
        let mut cx = Context::new(driver, &mut self.core);
        self.window.update_state(&mut cx);
        if !wakeup {
            return;
        }
        if let Some(options) = self.requests.take_options() {
            let metric = self.window.metric();
            let options = finalize_options(options, metric, self.window.decorations_mut());
            debug!(count = options.len(), "configure");
            driver.configure(options);
        }
        if let Some(actions) = self.requests.take_actions() {
            debug!(?actions, "perform");
            driver.perform(actions);
        }
    }

    /// Focus whatever the last click landed on and restart animation.
    ///
    /// Events emitted during the animation update are delivered before
    /// returning. Without a bound driver only the focus change happens.
    pub fn click_focus(&mut self) {
        self.window.click_focus();
        self.window.set_next_frame(None);
        let Some(driver) = self.core.driver.clone() else {
            debug!("click focus without driver, animation not updated");
            return;
        };
        self.core.busy = true;
        let mut cx = Context::new(driver.as_ref(), &mut self.core);
        self.window.update_animation(&mut cx);
        self.drain(driver.as_ref());
        self.core.busy = false;
    }

    /// Window-manager action for `point`, if it lies in a decoration.
    pub fn action_at(&self, point: Point) -> Option<Actions> {
        self.window.action_at(point)
    }

    /// Current IME state.
    pub fn editor_state(&self) -> &EditorState {
        &self.core.editor
    }

    fn update_semantics(&mut self) {
        let window = &mut self.window;
        self.core
            .semantic
            .refresh(|nodes| window.append_semantics(nodes));
    }

    /// Id of the semantic root, or [`SemanticId::ROOT`] when the tree is empty.
    pub fn semantic_root(&mut self) -> SemanticId {
        self.update_semantics();
        self.core.semantic.root()
    }

    /// Semantic node by id. [`SemanticId::ROOT`] resolves to the real root.
    pub fn lookup_semantic(&mut self, id: SemanticId) -> Option<&SemanticNode> {
        self.update_semantics();
        self.core.semantic.lookup(id)
    }

    /// Append ids of semantic nodes changed since the previous call.
    pub fn append_semantic_diffs(&mut self, diffs: &mut Vec<SemanticId>) {
        self.update_semantics();
        self.core.semantic.append_diffs(diffs);
    }

    /// Topmost semantic node under `point`.
    pub fn semantic_at(&mut self, point: Point) -> Option<SemanticId> {
        self.update_semantics();
        self.window.semantic_at(&self.core.semantic, point)
    }
}

impl<W: Window> EditorHost for Dispatcher<W> {
    fn editor(&self) -> &EditorState {
        &self.core.editor
    }

    fn editor_mut(&mut self) -> &mut EditorState {
        &mut self.core.editor
    }

    fn emit(&mut self, event: Event) -> bool {
        self.deliver(event)
    }
}

/// Fold `options` over the window's decoration state and append the
/// resulting decoration height.
///
/// The decoration flag the options settle on is written back into
/// `decorations`.
fn finalize_options(
    mut options: Vec<ConfigOption>,
    metric: Metric,
    decorations: &mut Decorations,
) -> Vec<ConfigOption> {
    let cnf = WindowConfig::fold(WindowConfig::seeded(decorations.enabled), metric, &options);
    decorations.enabled = cnf.decorated;
    options.push(ConfigOption::DecorationHeight(decorations.effective_height()));
    options
}
