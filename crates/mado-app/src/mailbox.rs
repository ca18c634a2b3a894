#![forbid(unsafe_code)]

//! Cross-thread request slots.
//!
//! Application threads post configuration options and window actions; the
//! window thread collects them at most once per wake-up cycle. A [`Mailbox`]
//! is a single slot that never blocks the reader: if the slot is contended
//! at collection time the batch is left for the next cycle.

use std::sync::{Arc, Mutex, PoisonError, TryLockError};

use mado_core::action::Actions;
use mado_core::config::ConfigOption;

use crate::driver::Waker;

/// A single-value slot shared between threads.
#[derive(Debug, Default)]
pub struct Mailbox<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Mailbox<T> {
    /// An empty mailbox.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Store `value`, returning the one it displaced.
    pub fn post(&self, value: T) -> Option<T> {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        slot.replace(value)
    }

    /// Store `value`, combining it with any value not yet taken.
    pub fn post_with(&self, value: T, merge: impl FnOnce(&mut T, T)) {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_mut() {
            Some(pending) => merge(pending, value),
            None => *slot = Some(value),
        }
    }

    /// Take the stored value without blocking.
    ///
    /// Returns `None` when empty or when another thread holds the slot.
    pub fn try_take(&self) -> Option<T> {
        match self.slot.try_lock() {
            Ok(mut slot) => slot.take(),
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().take(),
            Err(TryLockError::WouldBlock) => None,
        }
    }
}

struct Requests {
    options: Mailbox<Vec<ConfigOption>>,
    actions: Mailbox<Actions>,
    /// Hand-off slot for a new wake-up callback.
    waker_handoff: Mailbox<Waker>,
    /// The callback currently in use.
    waker: Mutex<Option<Waker>>,
}

/// Thread-safe handle for posting requests to a window.
///
/// Cloning is cheap; all clones share the same slots. Posting a request
/// wakes the window so the batch is collected on the next wake-up cycle.
///
/// # Example
///
/// ```
/// use mado_app::WindowRequests;
/// use mado_core::action::Actions;
/// use mado_core::config::ConfigOption;
///
/// let requests = WindowRequests::new();
/// requests.option([ConfigOption::Title("hello".into())]);
/// requests.perform(Actions::RAISE);
/// requests.perform(Actions::CENTER);
///
/// assert_eq!(requests.take_actions(), Some(Actions::RAISE | Actions::CENTER));
/// assert_eq!(requests.take_options().map(|o| o.len()), Some(1));
/// assert!(requests.take_options().is_none());
/// ```
#[derive(Clone)]
pub struct WindowRequests {
    inner: Arc<Requests>,
}

impl std::fmt::Debug for WindowRequests {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowRequests")
            .field("options", &self.inner.options)
            .field("actions", &self.inner.actions)
            .finish_non_exhaustive()
    }
}

impl Default for WindowRequests {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRequests {
    /// A handle with empty slots and no wake-up callback.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Requests {
                options: Mailbox::new(),
                actions: Mailbox::new(),
                waker_handoff: Mailbox::new(),
                waker: Mutex::new(None),
            }),
        }
    }

    /// Queue configuration options and wake the window.
    ///
    /// Batches posted before the window collects them are concatenated, so
    /// the driver sees them in posting order.
    pub fn option(&self, options: impl IntoIterator<Item = ConfigOption>) {
        let options: Vec<ConfigOption> = options.into_iter().collect();
        if options.is_empty() {
            return;
        }
        self.inner
            .options
            .post_with(options, |pending, more| pending.extend(more));
        self.wake();
    }

    /// Queue window actions and wake the window.
    pub fn perform(&self, actions: Actions) {
        if actions.is_empty() {
            return;
        }
        self.inner
            .actions
            .post_with(actions, |pending, more| *pending |= more);
        self.wake();
    }

    /// Collect the pending options batch, if any.
    pub fn take_options(&self) -> Option<Vec<ConfigOption>> {
        self.inner.options.try_take()
    }

    /// Collect the pending actions, if any.
    pub fn take_actions(&self) -> Option<Actions> {
        self.inner.actions.try_take()
    }

    /// Install the wake-up callback used by [`wake`](Self::wake).
    pub fn set_waker(&self, waker: Waker) {
        self.inner.waker_handoff.post(waker);
    }

    /// Invoke the current wake-up callback.
    ///
    /// A callback posted through [`set_waker`](Self::set_waker) is picked
    /// up first. Does nothing before any callback was installed.
    pub fn wake(&self) {
        let waker = {
            let mut current = self
                .inner
                .waker
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(fresh) = self.inner.waker_handoff.try_take() {
                *current = Some(fresh);
            }
            current.clone()
        };
        if let Some(waker) = waker {
            waker();
        }
    }
}
