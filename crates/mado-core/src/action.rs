#![forbid(unsafe_code)]

//! System actions a window asks its driver to perform.

use bitflags::bitflags;

bitflags! {
    /// A set of window-manager actions.
    ///
    /// Batches posted by the application are merged by union until the
    /// dispatcher hands them to the driver.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Actions: u16 {
        const MINIMIZE   = 1 << 0;
        const MAXIMIZE   = 1 << 1;
        const UNMAXIMIZE = 1 << 2;
        const FULLSCREEN = 1 << 3;
        const RAISE      = 1 << 4;
        const CENTER     = 1 << 5;
        const CLOSE      = 1 << 6;
        /// Start an interactive move (a title-bar drag).
        const MOVE       = 1 << 7;
    }
}
