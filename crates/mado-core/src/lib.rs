#![forbid(unsafe_code)]

//! Core: value types shared by the mado dispatch layer and platform drivers.
//!
//! Nothing in this crate holds long-lived state. It defines the event model,
//! the IME editor state and its replacement arithmetic, accessibility
//! semantic nodes, window configuration options, and geometry/units.

pub mod action;
pub mod config;
pub mod editor;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod semantic;

// Re-export the tracing macro at crate root so `crate::trace!` resolves.
#[cfg(feature = "tracing")]
pub use logging::trace;
