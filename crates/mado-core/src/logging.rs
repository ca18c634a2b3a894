#![forbid(unsafe_code)]

//! Logging facade.
//!
//! With the `tracing` feature `trace!` is re-exported from `tracing`.
//! Without it the macro expands to nothing, so value-type code can log
//! freely without forcing a subscriber dependency on drivers.

#[cfg(feature = "tracing")]
pub use tracing::trace;

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op trace macro when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }
}
