#![forbid(unsafe_code)]

//! Geometric primitives and density-independent units.

/// A point in window coordinates, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An integer size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// A pixel rectangle used for semantic bounds and hit regions.
///
/// Origin at top-left; `x`/`y` inclusive, right/bottom exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Whether the rectangle has no area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point lies inside the rectangle.
    ///
    /// Empty rectangles contain nothing.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        !self.is_empty()
            && p.x >= self.x as f32
            && p.x < self.right() as f32
            && p.y >= self.y as f32
            && p.y < self.bottom() as f32
    }
}

/// Device independent pixels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Dp(pub f32);

/// Scaled (font) pixels.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Sp(pub f32);

/// Conversion factors from [`Dp`] and [`Sp`] to pixels.
///
/// A zero factor is treated as 1 so an unconfigured metric is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Metric {
    pub px_per_dp: f32,
    pub px_per_sp: f32,
}

impl Metric {
    /// Create a metric with the given scale factors.
    #[inline]
    pub const fn new(px_per_dp: f32, px_per_sp: f32) -> Self {
        Self {
            px_per_dp,
            px_per_sp,
        }
    }

    /// Convert dp to whole pixels, rounding to nearest.
    #[inline]
    pub fn dp(&self, v: Dp) -> i32 {
        (non_zero(self.px_per_dp) * v.0).round() as i32
    }

    /// Convert sp to whole pixels, rounding to nearest.
    #[inline]
    pub fn sp(&self, v: Sp) -> i32 {
        (non_zero(self.px_per_sp) * v.0).round() as i32
    }

    /// Convert pixels back to dp.
    #[inline]
    pub fn px_to_dp(&self, px: i32) -> Dp {
        Dp(px as f32 / non_zero(self.px_per_dp))
    }
}

fn non_zero(v: f32) -> f32 {
    if v == 0.0 { 1.0 } else { v }
}
