#![forbid(unsafe_code)]

//! mado public facade crate.
//!
//! Re-exports the event model and the dispatch core, and offers a prelude
//! for platform drivers and window implementations.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use mado_core::action::Actions;
pub use mado_core::config::{
    ConfigOption, Decorations, Orientation, Rgba, WindowConfig, WindowMode,
};
pub use mado_core::editor::{Caret, EditorSelection, EditorState, Snippet, TextRange};
pub use mado_core::event::{
    Buttons, DestroyEvent, EditEvent, Event, FrameEvent, KeyEvent, KeyEventKind, Modifiers,
    PointerEvent, PointerKind, PointerSource, Stage,
};
pub use mado_core::geometry::{Dp, Metric, Point, Rect, Size, Sp};
pub use mado_core::semantic::{
    SemanticClass, SemanticDesc, SemanticGestures, SemanticId, SemanticNode,
};

// --- Dispatch re-exports ---------------------------------------------------

pub use mado_app::{
    Context, DispatchError, DispatchStats, Dispatcher, Driver, EditorHost, InputMethod,
    SemanticTree, Waker, Window, WindowRequests,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for mado apps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Event delivery failed.
    Dispatch(DispatchError),
    /// Platform driver failure with message.
    Platform(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dispatch(err) => write!(f, "{err}"),
            Self::Platform(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dispatch(err) => Some(err),
            Self::Platform(_) => None,
        }
    }
}

impl From<DispatchError> for Error {
    fn from(err: DispatchError) -> Self {
        Self::Dispatch(err)
    }
}

/// Standard result type for mado APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Actions, ConfigOption, Context, Decorations, Dispatcher, Driver, Error, Event,
        InputMethod, KeyEvent, Metric, Point, Result, SemanticId, SemanticNode, TextRange,
        Window,
    };

    pub use crate::{app, core};
}

pub use mado_app as app;
pub use mado_core as core;
