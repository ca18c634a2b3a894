#![forbid(unsafe_code)]

//! Canonical event types.
//!
//! [`Event`] is the closed set of values a window receives through the
//! dispatcher. The IME variants ([`Event::Edit`], [`Event::Selection`],
//! [`Event::Snippet`]) and [`Event::Wakeup`] are produced and interpreted by
//! the dispatch core; the input, stage, frame and destroy variants come from
//! platform drivers and are forwarded to the window untouched.
//!
//! # Design Notes
//!
//! - Pointer coordinates are window pixels with the origin at top-left
//! - `KeyEventKind` defaults to `Press` when the platform cannot tell
//! - `Modifiers` use bitflags for easy combination

use core::time::Duration;

use bitflags::bitflags;

use crate::editor::TextRange;
use crate::geometry::{Metric, Point, Size};

/// Canonical window event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Check for pending configuration and action batches.
    ///
    /// Drivers deliver this after the wake-up callback fires.
    Wakeup,

    /// Text was replaced by an input method.
    Edit(EditEvent),

    /// The selection changed.
    Selection(TextRange),

    /// The snippet range changed.
    Snippet(TextRange),

    /// A keyboard event.
    Key(KeyEvent),

    /// A pointer (mouse, touch, pen) event.
    Pointer(PointerEvent),

    /// Keyboard focus gained (`true`) or lost (`false`).
    Focus(bool),

    /// The window changed lifecycle stage.
    Stage(Stage),

    /// The driver requests a new frame.
    Frame(FrameEvent),

    /// The window is being destroyed.
    Destroy(DestroyEvent),
}

impl Event {
    /// Whether this is the wake-up sentinel.
    #[inline]
    pub const fn is_wakeup(&self) -> bool {
        matches!(self, Self::Wakeup)
    }

    /// Short name of the variant, for logs and span fields.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Wakeup => "Wakeup",
            Self::Edit(_) => "Edit",
            Self::Selection(_) => "Selection",
            Self::Snippet(_) => "Snippet",
            Self::Key(_) => "Key",
            Self::Pointer(_) => "Pointer",
            Self::Focus(_) => "Focus",
            Self::Stage(_) => "Stage",
            Self::Frame(_) => "Frame",
            Self::Destroy(_) => "Destroy",
        }
    }
}

/// Text replacement reported by an input method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    /// Replaced range, as given by the input method (may be reversed).
    pub range: TextRange,
    /// Replacement text.
    pub text: String,
}

impl EditEvent {
    /// Create a new edit event.
    #[must_use]
    pub fn new(range: TextRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// Key name, for example `"A"`, `"⏎"` or `"F1"`.
    pub name: String,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// Press or release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a key press with no modifiers.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during an input event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE    = 0b0000_0000;
        /// Shift key.
        const SHIFT   = 0b0000_0001;
        /// Alt/Option key.
        const ALT     = 0b0000_0010;
        /// Control key.
        const CTRL    = 0b0000_0100;
        /// Super/Windows key.
        const SUPER   = 0b0000_1000;
        /// Command key (macOS).
        const COMMAND = 0b0001_0000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// What happened.
    pub kind: PointerKind,

    /// Kind of device that produced the event.
    pub source: PointerSource,

    /// Position in window pixels.
    pub position: Point,

    /// Buttons held after the event.
    pub buttons: Buttons,

    /// Scroll amount for [`PointerKind::Scroll`], in pixels.
    pub scroll: Point,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// Time of the event, relative to an arbitrary driver epoch.
    pub time: Duration,
}

impl PointerEvent {
    /// Create a mouse event at `position`.
    #[must_use]
    pub fn new(kind: PointerKind, position: Point) -> Self {
        Self {
            kind,
            source: PointerSource::Mouse,
            position,
            buttons: Buttons::empty(),
            scroll: Point::default(),
            modifiers: Modifiers::NONE,
            time: Duration::ZERO,
        }
    }

    /// Set the held buttons.
    #[must_use]
    pub const fn with_buttons(mut self, buttons: Buttons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Set the device kind.
    #[must_use]
    pub const fn with_source(mut self, source: PointerSource) -> Self {
        self.source = source;
        self
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Press,
    Release,
    Move,
    Drag,
    Scroll,
    Enter,
    Leave,
    /// The gesture was cancelled by the platform.
    Cancel,
}

/// Pointer device kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

bitflags! {
    /// Pointer buttons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        const PRIMARY   = 0b001;
        const SECONDARY = 0b010;
        const TERTIARY  = 0b100;
    }
}

/// Window lifecycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Stage {
    /// Not visible; no frames are produced.
    #[default]
    Paused,
    /// Visible but not focused.
    Inactive,
    /// Visible and focused.
    Running,
}

/// A frame request from the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameEvent {
    /// Frame time, relative to the driver epoch.
    pub now: Duration,
    /// Window size in pixels.
    pub size: Size,
    /// Unit conversion for this frame.
    pub metric: Metric,
}

/// The window is going away.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DestroyEvent {
    /// Platform failure that caused the destruction, if any.
    pub error: Option<String>,
}
