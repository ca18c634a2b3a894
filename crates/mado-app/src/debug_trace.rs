#![forbid(unsafe_code)]

//! Subscriber-free debug output controlled by an environment variable.
//!
//! Set `MADO_DEBUG_TRACE=1` to get timestamped dispatch heartbeats on stderr
//! without installing a `tracing` subscriber. Useful when debugging a driver
//! on a platform where attaching a subscriber is awkward (mobile, embedded
//! views). When unset, each check is a single static bool load.
//!
//! ```ignore
//! use mado_app::debug_trace;
//! debug_trace!("cycle {} drained {} events", cycle, n);
//! ```

use std::sync::LazyLock;
use std::time::Instant;

/// Environment variable that switches heartbeats on.
const ENV_VAR: &str = "MADO_DEBUG_TRACE";

static DEBUG_TRACE_ENABLED: LazyLock<bool> =
    LazyLock::new(|| flag_enabled(std::env::var(ENV_VAR).ok().as_deref()));

/// Interpret a raw `MADO_DEBUG_TRACE` value.
///
/// Only `1` and a case-insensitive `true` enable output; anything else,
/// including an unset variable, leaves it off.
fn flag_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Whether `MADO_DEBUG_TRACE` enabled debug output. Read once per process.
#[inline]
pub fn is_enabled() -> bool {
    *DEBUG_TRACE_ENABLED
}

/// Milliseconds since the first trace call.
#[inline]
pub fn elapsed_ms() -> u64 {
    START_TIME.elapsed().as_millis() as u64
}

/// Print a timestamped line to stderr when `MADO_DEBUG_TRACE=1`.
#[macro_export]
macro_rules! debug_trace {
    ($($arg:tt)*) => {
        if $crate::debug_trace::is_enabled() {
            eprintln!(
                "[MADO {:>8}ms] {}",
                $crate::debug_trace::elapsed_ms(),
                format_args!($($arg)*)
            );
        }
    };
}
