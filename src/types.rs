use alloc::string::String;
use core::fmt;

/// A page scroll position in CSS pixels.
///
/// Mirrors the pair of scroll offsets a scrolling container reports
/// (`x` grows to the right, `y` grows downward).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
}

impl ScrollPosition {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An element's offset from the viewport origin at measure time.
///
/// This is the `left`/`top` of the element's bounding rect *before* any
/// transform is applied; adding the scroll position at the same instant
/// yields the element's document-relative baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementOffset {
    pub left: f64,
    pub top: f64,
}

impl ElementOffset {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// A computed parallax translation in CSS pixels.
///
/// The `Display` implementation renders the exact inline style value written
/// to an element, `translate3d(<x>px, <y>px, 0)`. Rendering is deterministic:
/// equal translations always produce byte-identical strings.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Translation {
    pub x: f64,
    pub y: f64,
}

impl Translation {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Renders the CSS transform value for this translation.
    pub fn to_transform_style(&self) -> String {
        alloc::format!("{self}")
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "translate3d({}px, {}px, 0)", self.x, self.y)
    }
}

/// Which scroll offset drives an axis.
///
/// Accepted for compatibility with the original option set; the computation
/// always drives the vertical axis from `y` and the horizontal axis from `x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAxis {
    X,
    Y,
}
