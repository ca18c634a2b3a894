#![forbid(unsafe_code)]

//! Headless driver and window for deterministic testing.
//!
//! [`HeadlessDriver`] records every call the dispatcher makes instead of
//! talking to a platform. [`RecordingWindow`] records every event it is
//! handed and can be scripted to emit events back, which is how reentrant
//! delivery is exercised without a real toolkit.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mado_app::{Dispatcher, DriverCall, HeadlessDriver, RecordingWindow};
//! use mado_core::action::Actions;
//! use mado_core::event::Event;
//!
//! let driver = Arc::new(HeadlessDriver::new());
//! let mut dispatcher = Dispatcher::new(RecordingWindow::new());
//! dispatcher.set_driver(Some(driver.clone()));
//!
//! dispatcher.requests().perform(Actions::CLOSE);
//! assert_eq!(driver.wakeups(), 1);
//!
//! dispatcher.deliver(Event::Wakeup);
//! assert_eq!(driver.calls().last(), Some(&DriverCall::Perform(Actions::CLOSE)));
//! ```

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use mado_core::action::Actions;
use mado_core::config::{ConfigOption, Decorations};
use mado_core::event::Event;
use mado_core::geometry::{Metric, Point, Rect};
use mado_core::semantic::SemanticNode;

use crate::dispatcher::Context;
use crate::driver::Driver;
use crate::window::Window;

/// One call made on a [`HeadlessDriver`].
#[derive(Debug, Clone, PartialEq)]
pub enum DriverCall {
    Wakeup,
    Configure(Vec<ConfigOption>),
    Perform(Actions),
}

/// A driver that records calls instead of acting on them.
#[derive(Debug, Default)]
pub struct HeadlessDriver {
    calls: Mutex<Vec<DriverCall>>,
}

impl HeadlessDriver {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: DriverCall) {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(call);
    }

    /// All calls so far, oldest first.
    pub fn calls(&self) -> Vec<DriverCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return all recorded calls.
    pub fn take_calls(&self) -> Vec<DriverCall> {
        std::mem::take(&mut *self.calls.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Number of wake-up requests.
    pub fn wakeups(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|c| matches!(c, DriverCall::Wakeup))
            .count()
    }
}

impl Driver for HeadlessDriver {
    fn wakeup(&self) {
        self.record(DriverCall::Wakeup);
    }

    fn configure(&self, options: Vec<ConfigOption>) {
        self.record(DriverCall::Configure(options));
    }

    fn perform(&self, actions: Actions) {
        self.record(DriverCall::Perform(actions));
    }
}

/// Callback run for every event a [`RecordingWindow`] receives.
pub type Reaction = Box<dyn FnMut(&mut Context<'_>, &Event)>;

/// A window that records what the dispatcher does to it.
pub struct RecordingWindow {
    events: Vec<Event>,
    handling: bool,
    reaction: Option<Reaction>,
    emit_on_update: Vec<Event>,
    updates: usize,
    animations: usize,
    focus_clicks: usize,
    next_frame: Option<Option<Duration>>,
    destroyed: bool,
    metric: Metric,
    decorations: Decorations,
    semantics: Vec<SemanticNode>,
    action_regions: Vec<(Rect, Actions)>,
}

impl Default for RecordingWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RecordingWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingWindow")
            .field("events", &self.events.len())
            .field("updates", &self.updates)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl RecordingWindow {
    /// A live window that consumes every event.
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            handling: true,
            reaction: None,
            emit_on_update: Vec::new(),
            updates: 0,
            animations: 0,
            focus_clicks: 0,
            next_frame: None,
            destroyed: false,
            metric: Metric::default(),
            decorations: Decorations::default(),
            semantics: Vec::new(),
            action_regions: Vec::new(),
        }
    }

    /// Set what `process_event` returns.
    #[must_use]
    pub fn handling(mut self, handled: bool) -> Self {
        self.handling = handled;
        self
    }

    /// Run `reaction` on every event, after it is recorded.
    #[must_use]
    pub fn on_event(mut self, reaction: impl FnMut(&mut Context<'_>, &Event) + 'static) -> Self {
        self.reaction = Some(Box::new(reaction));
        self
    }

    #[must_use]
    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    #[must_use]
    pub fn with_decorations(mut self, decorations: Decorations) -> Self {
        self.decorations = decorations;
        self
    }

    /// Semantic nodes appended on every rebuild, pre-order.
    #[must_use]
    pub fn with_semantics(mut self, nodes: Vec<SemanticNode>) -> Self {
        self.semantics = nodes;
        self
    }

    /// Report `actions` for points inside `region`.
    #[must_use]
    pub fn with_action_region(mut self, region: Rect, actions: Actions) -> Self {
        self.action_regions.push((region, actions));
        self
    }

    pub fn set_handling(&mut self, handled: bool) {
        self.handling = handled;
    }

    pub fn set_semantics(&mut self, nodes: Vec<SemanticNode>) {
        self.semantics = nodes;
    }

    /// Emit `event` from the next `update_state`.
    pub fn emit_on_update(&mut self, event: Event) {
        self.emit_on_update.push(event);
    }

    /// Mark the window destroyed.
    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    /// Events received, in delivery order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn animations(&self) -> usize {
        self.animations
    }

    pub fn focus_clicks(&self) -> usize {
        self.focus_clicks
    }

    /// The last frame request; the outer `None` means none was made.
    pub fn next_frame(&self) -> Option<Option<Duration>> {
        self.next_frame
    }

    pub fn decorations(&self) -> Decorations {
        self.decorations
    }
}

impl Window for RecordingWindow {
    fn process_event(&mut self, cx: &mut Context<'_>, event: Event) -> bool {
        self.events.push(event.clone());
        if let Some(reaction) = self.reaction.as_mut() {
            reaction(cx, &event);
        }
        if matches!(event, Event::Destroy(_)) {
            self.destroyed = true;
        }
        self.handling
    }

    fn update_state(&mut self, cx: &mut Context<'_>) {
        self.updates += 1;
        for event in self.emit_on_update.drain(..) {
            cx.submit(event);
        }
    }

    fn update_animation(&mut self, _cx: &mut Context<'_>) {
        self.animations += 1;
    }

    fn append_semantics(&mut self, nodes: &mut Vec<SemanticNode>) {
        nodes.extend(self.semantics.iter().cloned());
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn metric(&self) -> Metric {
        self.metric
    }

    fn decorations_mut(&mut self) -> &mut Decorations {
        &mut self.decorations
    }

    fn click_focus(&mut self) {
        self.focus_clicks += 1;
    }

    fn set_next_frame(&mut self, at: Option<Duration>) {
        self.next_frame = Some(at);
    }

    fn action_at(&self, point: Point) -> Option<Actions> {
        self.action_regions
            .iter()
            .rev()
            .find(|(region, _)| region.contains(point))
            .map(|&(_, actions)| actions)
    }
}
