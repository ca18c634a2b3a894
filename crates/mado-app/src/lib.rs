#![forbid(unsafe_code)]

//! mado dispatch core
//!
//! This crate owns the per-window state that sits between a platform driver
//! and the application: the event queue and its reentrancy guard, the IME
//! editor state, and the accessibility semantic tree.
//!
//! # Key Components
//!
//! - [`Dispatcher`] - In-order, non-overlapping event delivery plus per-cycle
//!   configuration and action reconciliation
//! - [`Context`] - What a [`Window`] may touch while the dispatcher runs it
//! - [`InputMethod`] - IME operations (insert, replace, selection, snippet)
//! - [`SemanticTree`] - Lazily rebuilt accessibility tree with diffing
//! - [`WindowRequests`] - Thread-safe handle for posting options and actions
//! - [`Driver`] / [`Window`] - The collaborator contracts
//!
//! # How it fits in the system
//! A platform driver decodes native input into [`mado_core::event::Event`]s
//! and calls [`Dispatcher::deliver`]. The dispatcher hands each event to the
//! window, which may emit further events through its [`Context`]; those are
//! queued and delivered before `deliver` returns.

pub mod debug_trace;
pub mod dispatcher;
pub mod driver;
pub mod headless;
pub mod ime;
pub mod mailbox;
pub mod semantic;
pub mod window;

pub use dispatcher::{Context, DispatchError, DispatchStats, Dispatcher};
pub use driver::{Driver, Waker};
pub use headless::{DriverCall, HeadlessDriver, RecordingWindow};
pub use ime::{EditorHost, InputMethod};
pub use mailbox::{Mailbox, WindowRequests};
pub use semantic::SemanticTree;
pub use window::Window;
