#![forbid(unsafe_code)]

//! Window configuration options.
//!
//! Applications request window changes as a list of [`ConfigOption`]s. The
//! list is applied left to right over a [`WindowConfig`] by the pure
//! [`WindowConfig::fold`], so a later option overrides an earlier one.
//!
//! # Example
//! ```
//! use mado_core::config::{ConfigOption, WindowConfig, WindowMode};
//! use mado_core::geometry::{Dp, Metric, Size};
//!
//! let opts = [
//!     ConfigOption::Title("notes".into()),
//!     ConfigOption::Size { width: Dp(400.0), height: Dp(300.0) },
//!     ConfigOption::Mode(WindowMode::Maximized),
//! ];
//! let cnf = WindowConfig::fold(WindowConfig::seeded(true), Metric::new(2.0, 2.0), &opts);
//! assert_eq!(cnf.title, "notes");
//! assert_eq!(cnf.size, Size::new(800, 600));
//! assert_eq!(cnf.mode, WindowMode::Maximized);
//! ```

use crate::geometry::{Dp, Metric, Size};

/// How the window occupies the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowMode {
    #[default]
    Windowed,
    Fullscreen,
    Minimized,
    Maximized,
}

/// Allowed screen orientations (mobile platforms).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Any,
    Landscape,
    Portrait,
}

/// Non-premultiplied 8-bit colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a colour from components.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A single configuration change.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigOption {
    Title(String),
    Size { width: Dp, height: Dp },
    MinSize { width: Dp, height: Dp },
    MaxSize { width: Dp, height: Dp },
    Mode(WindowMode),
    Orientation(Orientation),
    /// Colour of the system status bar.
    StatusColor(Rgba),
    /// Colour of the system navigation bar.
    NavigationColor(Rgba),
    /// Whether the toolkit draws its own decorations.
    Decorated(bool),
    /// Height of toolkit-drawn decorations. Appended by the dispatcher.
    DecorationHeight(Dp),
    /// Whether the application renders through its own GPU context.
    CustomRenderer(bool),
}

/// Window decoration settings owned by the window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Decorations {
    /// Whether toolkit-drawn decorations are shown.
    pub enabled: bool,
    /// Height of the decoration bar.
    pub height: Dp,
}

impl Decorations {
    /// The height to report to the driver: zero when disabled.
    #[inline]
    pub fn effective_height(&self) -> Dp {
        if self.enabled { self.height } else { Dp(0.0) }
    }
}

/// The folded result of a list of [`ConfigOption`]s.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowConfig {
    /// Requested window size in pixels.
    pub size: Size,
    /// Minimum window size in pixels.
    pub min_size: Size,
    /// Maximum window size in pixels; zero means unbounded.
    pub max_size: Size,
    pub title: String,
    pub mode: WindowMode,
    pub orientation: Orientation,
    pub status_color: Option<Rgba>,
    pub navigation_color: Option<Rgba>,
    pub decorated: bool,
    pub decoration_height: Dp,
    pub custom_renderer: bool,
}

impl WindowConfig {
    /// Config seeded with the window's current decoration flag.
    #[must_use]
    pub fn seeded(decorated: bool) -> Self {
        Self {
            decorated,
            ..Default::default()
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the window mode.
    #[must_use]
    pub fn with_mode(mut self, mode: WindowMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the size in pixels.
    #[must_use]
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Apply one option in place. Dp sizes are converted with `metric`.
    pub fn apply(&mut self, metric: Metric, option: &ConfigOption) {
        match option {
            ConfigOption::Title(title) => self.title.clone_from(title),
            ConfigOption::Size { width, height } => {
                self.size = Size::new(metric.dp(*width), metric.dp(*height));
            }
            ConfigOption::MinSize { width, height } => {
                self.min_size = Size::new(metric.dp(*width), metric.dp(*height));
            }
            ConfigOption::MaxSize { width, height } => {
                self.max_size = Size::new(metric.dp(*width), metric.dp(*height));
            }
            ConfigOption::Mode(mode) => self.mode = *mode,
            ConfigOption::Orientation(o) => self.orientation = *o,
            ConfigOption::StatusColor(c) => self.status_color = Some(*c),
            ConfigOption::NavigationColor(c) => self.navigation_color = Some(*c),
            ConfigOption::Decorated(enabled) => self.decorated = *enabled,
            ConfigOption::DecorationHeight(h) => self.decoration_height = *h,
            ConfigOption::CustomRenderer(enabled) => self.custom_renderer = *enabled,
        }
    }

    /// Apply `options` to `seed` left to right.
    #[must_use]
    pub fn fold<'a>(
        seed: Self,
        metric: Metric,
        options: impl IntoIterator<Item = &'a ConfigOption>,
    ) -> Self {
        options.into_iter().fold(seed, |mut cnf, opt| {
            cnf.apply(metric, opt);
            cnf
        })
    }
}
