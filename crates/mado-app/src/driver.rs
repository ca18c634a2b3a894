#![forbid(unsafe_code)]

//! The platform driver contract.

use std::sync::Arc;

use mado_core::action::Actions;
use mado_core::config::ConfigOption;

/// A platform window driver.
///
/// The dispatcher calls into the driver; the driver only calls back through
/// [`Dispatcher::deliver`](crate::Dispatcher::deliver). All calls are
/// fire-and-forget: failures are the driver's to handle.
///
/// Drivers are shared with the platform layer and with application threads
/// (through the wake-up callback), hence `Send + Sync` and `&self` receivers.
pub trait Driver: Send + Sync {
    /// Schedule a future `deliver(Event::Wakeup)` on the window thread.
    ///
    /// May be called from any thread.
    fn wakeup(&self);

    /// Apply window options. The last option is always
    /// [`ConfigOption::DecorationHeight`].
    fn configure(&self, options: Vec<ConfigOption>);

    /// Perform window-manager actions.
    fn perform(&self, actions: Actions);
}

/// Zero-argument callback that forces delivery of a wake-up event.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// The wake-up callback for `driver`, or a no-op when there is none.
pub(crate) fn waker_for(driver: Option<&Arc<dyn Driver>>) -> Waker {
    match driver {
        Some(driver) => {
            let driver = Arc::clone(driver);
            Arc::new(move || driver.wakeup())
        }
        None => Arc::new(|| {}),
    }
}
