#![forbid(unsafe_code)]

//! End-to-end dispatcher behavior against the headless driver.

use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use mado_app::{
    Context, Dispatcher, DriverCall, HeadlessDriver, InputMethod, RecordingWindow, Window,
};
use mado_core::action::Actions;
use mado_core::config::{ConfigOption, Decorations};
use mado_core::editor::TextRange;
use mado_core::event::{DestroyEvent, EditEvent, Event, KeyEvent};
use mado_core::geometry::{Dp, Metric, Point, Rect};
use mado_core::semantic::{SemanticDesc, SemanticId, SemanticNode};

// ============================================================================
// Helpers
// ============================================================================

fn bound(window: RecordingWindow) -> (Dispatcher<RecordingWindow>, Arc<HeadlessDriver>) {
    let driver = Arc::new(HeadlessDriver::new());
    let mut dispatcher = Dispatcher::new(window);
    dispatcher.set_driver(Some(driver.clone()));
    (dispatcher, driver)
}

fn key(name: &str) -> Event {
    Event::Key(KeyEvent::new(name))
}

fn non_wakeup_calls(driver: &HeadlessDriver) -> Vec<DriverCall> {
    driver
        .calls()
        .into_iter()
        .filter(|c| !matches!(c, DriverCall::Wakeup))
        .collect()
}

fn decorated(enabled: bool) -> Decorations {
    Decorations {
        enabled,
        height: Dp(30.0),
    }
}

/// Window that tracks how deeply `process_event` is nested.
struct NestingWindow {
    depth: usize,
    max_depth: usize,
    seen: Vec<Event>,
    decorations: Decorations,
}

impl NestingWindow {
    fn new() -> Self {
        Self {
            depth: 0,
            max_depth: 0,
            seen: Vec::new(),
            decorations: Decorations::default(),
        }
    }
}

impl Window for NestingWindow {
    fn process_event(&mut self, cx: &mut Context<'_>, event: Event) -> bool {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        if event == key("a") {
            cx.submit(key("b"));
            cx.submit(key("c"));
        }
        if event == key("b") {
            cx.submit(key("d"));
        }
        self.seen.push(event);
        self.depth -= 1;
        true
    }

    fn update_state(&mut self, _cx: &mut Context<'_>) {}

    fn is_destroyed(&self) -> bool {
        false
    }

    fn metric(&self) -> Metric {
        Metric::default()
    }

    fn decorations_mut(&mut self) -> &mut Decorations {
        &mut self.decorations
    }
}

// ============================================================================
// Ordering and reentrancy
// ============================================================================

#[test]
fn nested_emissions_are_delivered_fifo_without_overlap() {
    let driver = Arc::new(HeadlessDriver::new());
    let mut dispatcher = Dispatcher::new(NestingWindow::new());
    dispatcher.set_driver(Some(driver));

    assert!(dispatcher.deliver(key("a")));

    let window = dispatcher.window();
    assert_eq!(window.seen, vec![key("a"), key("b"), key("c"), key("d")]);
    assert_eq!(window.max_depth, 1);
}

#[test]
fn update_state_runs_once_per_outer_delivery() {
    let window = RecordingWindow::new().on_event(|cx, event| {
        if *event == key("first") {
            cx.submit(key("second"));
        }
    });
    let (mut dispatcher, _driver) = bound(window);
    dispatcher.deliver(key("first"));
    assert_eq!(dispatcher.window().updates(), 1);
    dispatcher.deliver(key("third"));
    assert_eq!(dispatcher.window().updates(), 2);
    assert_eq!(
        dispatcher.window().events(),
        &[key("first"), key("second"), key("third")]
    );
}

#[test]
fn destroyed_window_skips_update_but_reports_handled() {
    let (mut dispatcher, _driver) = bound(RecordingWindow::new());
    assert!(dispatcher.deliver(Event::Destroy(DestroyEvent::default())));
    assert!(dispatcher.window().is_destroyed());
    assert_eq!(dispatcher.window().updates(), 0);
}

fn destroying_on_wakeup(handling: bool) -> RecordingWindow {
    RecordingWindow::new()
        .handling(handling)
        .on_event(|cx, event| {
            if *event == Event::Wakeup {
                cx.submit(key("before"));
                cx.submit(Event::Destroy(DestroyEvent::default()));
                cx.submit(key("after"));
            }
        })
}

#[test]
fn destroy_mid_drain_still_delivers_queued_events() {
    let (mut dispatcher, driver) = bound(destroying_on_wakeup(true));
    let requests = dispatcher.requests();
    requests.option([ConfigOption::Title("late".into())]);
    requests.perform(Actions::CLOSE);

    assert!(dispatcher.deliver(Event::Wakeup));

    assert_eq!(
        dispatcher.window().events(),
        &[
            Event::Wakeup,
            key("before"),
            Event::Destroy(DestroyEvent::default()),
            key("after"),
        ]
    );
    assert!(dispatcher.window().is_destroyed());
    assert_eq!(dispatcher.window().updates(), 0);
    assert!(non_wakeup_calls(&driver).is_empty());
    // Batches stay posted for nobody to collect.
    assert_eq!(
        requests.take_options(),
        Some(vec![ConfigOption::Title("late".into())])
    );
    assert_eq!(requests.take_actions(), Some(Actions::CLOSE));
}

#[test]
fn destroy_mid_drain_reports_drain_result() {
    let (mut dispatcher, _driver) = bound(destroying_on_wakeup(false));
    assert!(!dispatcher.deliver(Event::Wakeup));
    assert_eq!(dispatcher.window().events().len(), 4);
    assert_eq!(dispatcher.window().updates(), 0);
}

#[test]
#[should_panic(expected = "event while no driver active")]
fn deliver_without_driver_panics() {
    let mut dispatcher = Dispatcher::new(RecordingWindow::new());
    dispatcher.deliver(Event::Focus(true));
}

// ============================================================================
// Wake-up reconciliation
// ============================================================================

#[test]
fn wakeup_applies_options_with_decoration_height() {
    let (mut dispatcher, driver) =
        bound(RecordingWindow::new().with_decorations(decorated(true)));
    let requests = dispatcher.requests();
    requests.option([ConfigOption::Title("mado".into())]);
    assert_eq!(driver.wakeups(), 1);

    dispatcher.deliver(Event::Wakeup);

    assert_eq!(
        non_wakeup_calls(&driver),
        vec![DriverCall::Configure(vec![
            ConfigOption::Title("mado".into()),
            ConfigOption::DecorationHeight(Dp(30.0)),
        ])]
    );
}

#[test]
fn disabling_decorations_reports_zero_height() {
    let (mut dispatcher, driver) =
        bound(RecordingWindow::new().with_decorations(decorated(true)));
    dispatcher
        .requests()
        .option([ConfigOption::Decorated(false)]);
    dispatcher.deliver(Event::Wakeup);

    assert!(!dispatcher.window().decorations().enabled);
    assert_eq!(
        non_wakeup_calls(&driver),
        vec![DriverCall::Configure(vec![
            ConfigOption::Decorated(false),
            ConfigOption::DecorationHeight(Dp(0.0)),
        ])]
    );
}

#[test]
fn batches_posted_before_collection_are_concatenated() {
    let (mut dispatcher, driver) = bound(RecordingWindow::new());
    let requests = dispatcher.requests();
    requests.option([ConfigOption::Title("a".into())]);
    requests.option([ConfigOption::Decorated(true)]);
    dispatcher.deliver(Event::Wakeup);

    assert_eq!(
        non_wakeup_calls(&driver),
        vec![DriverCall::Configure(vec![
            ConfigOption::Title("a".into()),
            ConfigOption::Decorated(true),
            ConfigOption::DecorationHeight(Dp(0.0)),
        ])]
    );
    assert!(dispatcher.window().decorations().enabled);
}

#[test]
fn non_wakeup_events_leave_batches_pending() {
    let (mut dispatcher, driver) = bound(RecordingWindow::new());
    let requests = dispatcher.requests();
    requests.option([ConfigOption::Title("later".into())]);
    requests.perform(Actions::MAXIMIZE);

    dispatcher.deliver(Event::Focus(true));
    assert!(non_wakeup_calls(&driver).is_empty());

    dispatcher.deliver(Event::Wakeup);
    assert_eq!(
        non_wakeup_calls(&driver),
        vec![
            DriverCall::Configure(vec![
                ConfigOption::Title("later".into()),
                ConfigOption::DecorationHeight(Dp(0.0)),
            ]),
            DriverCall::Perform(Actions::MAXIMIZE),
        ]
    );

    // Collected once.
    driver.take_calls();
    dispatcher.deliver(Event::Wakeup);
    assert!(driver.calls().is_empty());
}

#[test]
fn actions_merge_until_collected() {
    let (mut dispatcher, driver) = bound(RecordingWindow::new());
    let requests = dispatcher.requests();
    requests.perform(Actions::RAISE);
    requests.perform(Actions::CENTER);
    dispatcher.deliver(Event::Wakeup);
    assert_eq!(
        non_wakeup_calls(&driver),
        vec![DriverCall::Perform(Actions::RAISE | Actions::CENTER)]
    );
}

#[test]
fn destroyed_window_does_not_collect_batches() {
    let (mut dispatcher, driver) = bound(RecordingWindow::new());
    dispatcher.window_mut().destroy();
    dispatcher.requests().perform(Actions::CLOSE);
    dispatcher.deliver(Event::Wakeup);
    assert!(non_wakeup_calls(&driver).is_empty());
}

#[test]
fn unbinding_driver_installs_noop_waker() {
    let (mut dispatcher, driver) = bound(RecordingWindow::new());
    dispatcher.set_driver(None);
    dispatcher.requests().perform(Actions::RAISE);
    assert_eq!(driver.wakeups(), 0);
}

// ============================================================================
// IME
// ============================================================================

#[test]
fn insert_into_empty_editor() {
    let (mut dispatcher, _driver) = bound(RecordingWindow::new());
    dispatcher.insert("hi");

    assert_eq!(
        dispatcher.window().events(),
        &[
            Event::Edit(EditEvent::new(TextRange::caret(0), "hi")),
            Event::Snippet(TextRange::new(0, 2)),
            Event::Selection(TextRange::caret(2)),
        ]
    );
    let state = dispatcher.editor_state();
    assert_eq!(state.snippet.text, "hi");
    assert_eq!(state.selection.range, TextRange::caret(2));
    assert_eq!(dispatcher.window().updates(), 3);
}

#[test]
fn insert_moves_caret_by_rune_count() {
    let (mut dispatcher, _driver) = bound(RecordingWindow::new());
    dispatcher.set_selection(TextRange::caret(3));
    dispatcher.insert("abc");
    assert_eq!(dispatcher.editor_state().selection.range, TextRange::caret(6));

    let (mut dispatcher, _driver) = bound(RecordingWindow::new());
    dispatcher.insert("äöü");
    assert_eq!(dispatcher.editor_state().selection.range, TextRange::caret(3));
}

#[test]
fn replace_reports_snippet_after_edit() {
    let (mut dispatcher, _driver) = bound(RecordingWindow::new());
    dispatcher.insert("hello");
    dispatcher.replace(TextRange::new(5, 0), "bye");
    let events = dispatcher.window().events();
    assert_eq!(
        &events[3..],
        &[
            Event::Edit(EditEvent::new(TextRange::new(5, 0), "bye")),
            Event::Snippet(TextRange::new(0, 3)),
        ]
    );
    assert_eq!(dispatcher.editor_state().snippet.text, "bye");
}

#[test]
fn set_snippet_twice_emits_once() {
    let (mut dispatcher, _driver) = bound(RecordingWindow::new());
    dispatcher.set_snippet(TextRange::new(1, 4));
    dispatcher.set_snippet(TextRange::new(1, 4));
    assert_eq!(
        dispatcher.window().events(),
        &[Event::Snippet(TextRange::new(1, 4))]
    );
}

#[test]
fn composing_region_emits_nothing() {
    let (mut dispatcher, _driver) = bound(RecordingWindow::new());
    dispatcher.set_composing_region(Some(TextRange::new(0, 2)));
    assert_eq!(dispatcher.editor_state().compose, Some(TextRange::new(0, 2)));
    assert!(dispatcher.window().events().is_empty());
}

#[test]
fn ime_from_inside_a_callback_is_queued() {
    let window = RecordingWindow::new().on_event(|cx, event| {
        if *event == key("x") {
            cx.insert("x");
        }
    });
    let (mut dispatcher, _driver) = bound(window);
    dispatcher.deliver(key("x"));
    assert_eq!(
        dispatcher.window().events(),
        &[
            key("x"),
            Event::Edit(EditEvent::new(TextRange::caret(0), "x")),
            Event::Snippet(TextRange::new(0, 1)),
            Event::Selection(TextRange::caret(1)),
        ]
    );
    assert_eq!(dispatcher.window().updates(), 1);
}

// ============================================================================
// Semantic tree
// ============================================================================

fn labeled(id: u64, parent: Option<u64>, children: &[u64], label: &str) -> SemanticNode {
    SemanticNode::new(
        SemanticId(id),
        parent.map(SemanticId),
        SemanticDesc {
            label: label.into(),
            bounds: Rect::new(0, 0, 100, 100),
            ..Default::default()
        },
    )
    .with_children(children.iter().copied().map(SemanticId))
}

#[test]
fn semantic_root_and_lookup() {
    let window = RecordingWindow::new().with_semantics(vec![
        labeled(10, None, &[11], "root"),
        labeled(11, Some(10), &[], "ok"),
    ]);
    let (mut dispatcher, _driver) = bound(window);
    assert_eq!(dispatcher.semantic_root(), SemanticId(10));
    assert_eq!(
        dispatcher
            .lookup_semantic(SemanticId::ROOT)
            .map(|n| n.id),
        Some(SemanticId(10))
    );
    assert_eq!(
        dispatcher
            .lookup_semantic(SemanticId(11))
            .map(|n| n.desc.label.clone()),
        Some("ok".to_string())
    );
    assert_eq!(dispatcher.semantic_at(Point::new(5.0, 5.0)), Some(SemanticId(11)));
}

#[test]
fn empty_window_has_root_alias() {
    let (mut dispatcher, _driver) = bound(RecordingWindow::new());
    assert_eq!(dispatcher.semantic_root(), SemanticId::ROOT);
    assert!(dispatcher.lookup_semantic(SemanticId::ROOT).is_none());
}

#[test]
fn semantic_diffs_across_cycles() {
    let window = RecordingWindow::new().with_semantics(vec![
        labeled(1, None, &[2], "root"),
        labeled(2, Some(1), &[], "before"),
    ]);
    let (mut dispatcher, _driver) = bound(window);

    let mut diffs = Vec::new();
    dispatcher.append_semantic_diffs(&mut diffs);
    assert!(diffs.is_empty(), "first frame has nothing to diff against");

    dispatcher.window_mut().set_semantics(vec![
        labeled(1, None, &[2], "root"),
        labeled(2, Some(1), &[], "after"),
    ]);
    // Still the cached tree until a cycle runs.
    dispatcher.append_semantic_diffs(&mut diffs);
    assert!(diffs.is_empty());

    dispatcher.deliver(Event::Focus(true));
    dispatcher.append_semantic_diffs(&mut diffs);
    assert_eq!(diffs, vec![SemanticId(2)]);

    diffs.clear();
    dispatcher.append_semantic_diffs(&mut diffs);
    assert!(diffs.is_empty(), "repeat diff without rebuild is stale");
}

#[test]
fn deleted_semantic_nodes_are_not_reported() {
    let window = RecordingWindow::new().with_semantics(vec![
        labeled(1, None, &[2, 3], "root"),
        labeled(2, Some(1), &[], "a"),
        labeled(3, Some(1), &[], "b"),
    ]);
    let (mut dispatcher, _driver) = bound(window);
    dispatcher.append_semantic_diffs(&mut Vec::new());

    dispatcher.window_mut().set_semantics(vec![
        labeled(1, None, &[3], "root"),
        labeled(3, Some(1), &[], "b2"),
    ]);
    dispatcher.deliver(Event::Focus(true));
    let mut diffs = Vec::new();
    dispatcher.append_semantic_diffs(&mut diffs);
    assert_eq!(diffs, vec![SemanticId(1), SemanticId(3)]);
}

// ============================================================================
// Focus and decorations
// ============================================================================

#[test]
fn click_focus_requests_immediate_frame() {
    let (mut dispatcher, _driver) = bound(RecordingWindow::new());
    dispatcher.click_focus();
    assert_eq!(dispatcher.window().focus_clicks(), 1);
    assert_eq!(dispatcher.window().next_frame(), Some(None::<Duration>));
    assert_eq!(dispatcher.window().animations(), 1);
}

#[test]
fn action_at_defers_to_window() {
    let window = RecordingWindow::new()
        .with_action_region(Rect::new(0, 0, 200, 24), Actions::MOVE)
        .with_action_region(Rect::new(176, 0, 24, 24), Actions::CLOSE);
    let (dispatcher, _driver) = bound(window);
    assert_eq!(dispatcher.action_at(Point::new(180.0, 10.0)), Some(Actions::CLOSE));
    assert_eq!(dispatcher.action_at(Point::new(20.0, 10.0)), Some(Actions::MOVE));
    assert_eq!(dispatcher.action_at(Point::new(20.0, 100.0)), None);
}
