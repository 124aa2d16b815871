use alloc::sync::Arc;

use crate::parallax::Parallax;
use crate::{ScrollAxis, ScrollPosition, Viewport};

/// A callback fired after a batched engine update.
///
/// Fires at most once per logical update (see [`Parallax::batch_update`]):
/// a scroll event that changes the scroll position, a resize that changes
/// the viewport, an options replacement, and so on. It is the headless
/// counterpart of the original option's per-pass `callback`.
pub type OnUpdateCallback = Arc<dyn Fn(&Parallax) + Send + Sync>;

/// Initial scroll position configuration.
#[derive(Clone)]
pub enum InitialScroll {
    /// A fixed initial scroll position.
    Value(ScrollPosition),
    /// A lazily evaluated provider (called by `Parallax::new`).
    Provider(Arc<dyn Fn() -> ScrollPosition + Send + Sync>),
}

impl InitialScroll {
    pub(crate) fn resolve(&self) -> ScrollPosition {
        match self {
            Self::Value(v) => *v,
            Self::Provider(f) => f(),
        }
    }
}

impl Default for InitialScroll {
    fn default() -> Self {
        Self::Value(ScrollPosition::ORIGIN)
    }
}

impl core::fmt::Debug for InitialScroll {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// Configuration for [`crate::Parallax`].
///
/// Field values are not validated: a non-finite `speed` simply propagates
/// into the arithmetic and produces a non-finite translation, which hosts
/// typically ignore when styling.
///
/// Several fields of the original option set are accepted for compatibility
/// but never read by the computation; each of those is marked "reserved"
/// below.
#[derive(Clone)]
pub struct ParallaxOptions {
    /// Default speed multiplier for elements without a usable
    /// `data-rellax-speed` attribute. Negative speeds move elements against
    /// the scroll direction.
    pub speed: f64,
    /// When set, replaces the element speed on the vertical axis.
    pub vertical_speed: Option<f64>,
    /// When set, replaces the element speed on the horizontal axis.
    pub horizontal_speed: Option<f64>,
    /// Reserved: ascending viewport-width thresholds in pixels. Accepted,
    /// never read by the computation.
    pub breakpoints: [u32; 3],
    /// Reserved: accepted, never read by the computation.
    pub center: bool,
    /// Rounds translations to the nearest 1/100 px before styling. Ties
    /// round away from zero.
    ///
    /// Off by default, so translations equal the raw formula result exactly.
    pub round: bool,
    /// Vertical axis enable flag. A disabled axis always translates to 0.
    pub vertical: bool,
    /// Horizontal axis enable flag. A disabled axis always translates to 0.
    pub horizontal: bool,
    /// Reserved: accepted, never read by the computation.
    pub vertical_scroll_axis: ScrollAxis,
    /// Reserved: accepted, never read by the computation.
    pub horizontal_scroll_axis: ScrollAxis,
    /// Optional callback fired after each batched engine update.
    pub on_update: Option<OnUpdateCallback>,
    /// The viewport applied at construction, when known.
    pub initial_viewport: Option<Viewport>,
    /// The scroll position applied at construction. Baselines are captured
    /// against this value.
    pub initial_scroll: InitialScroll,
}

impl ParallaxOptions {
    pub fn new() -> Self {
        Self {
            speed: -2.0,
            vertical_speed: None,
            horizontal_speed: None,
            breakpoints: [576, 768, 1201],
            center: false,
            round: false,
            vertical: true,
            horizontal: false,
            vertical_scroll_axis: ScrollAxis::Y,
            horizontal_scroll_axis: ScrollAxis::X,
            on_update: None,
            initial_viewport: None,
            initial_scroll: InitialScroll::default(),
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_vertical_speed(mut self, vertical_speed: Option<f64>) -> Self {
        self.vertical_speed = vertical_speed;
        self
    }

    pub fn with_horizontal_speed(mut self, horizontal_speed: Option<f64>) -> Self {
        self.horizontal_speed = horizontal_speed;
        self
    }

    pub fn with_breakpoints(mut self, breakpoints: [u32; 3]) -> Self {
        self.breakpoints = breakpoints;
        self
    }

    pub fn with_center(mut self, center: bool) -> Self {
        self.center = center;
        self
    }

    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    pub fn with_horizontal(mut self, horizontal: bool) -> Self {
        self.horizontal = horizontal;
        self
    }

    pub fn with_vertical_scroll_axis(mut self, axis: ScrollAxis) -> Self {
        self.vertical_scroll_axis = axis;
        self
    }

    pub fn with_horizontal_scroll_axis(mut self, axis: ScrollAxis) -> Self {
        self.horizontal_scroll_axis = axis;
        self
    }

    pub fn with_on_update(
        mut self,
        on_update: Option<impl Fn(&Parallax) + Send + Sync + 'static>,
    ) -> Self {
        self.on_update = on_update.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_initial_viewport(mut self, initial_viewport: Option<Viewport>) -> Self {
        self.initial_viewport = initial_viewport;
        self
    }

    pub fn with_initial_scroll(mut self, initial_scroll: InitialScroll) -> Self {
        self.initial_scroll = initial_scroll;
        self
    }

    pub fn with_initial_scroll_value(mut self, initial_scroll: ScrollPosition) -> Self {
        self.initial_scroll = InitialScroll::Value(initial_scroll);
        self
    }

    pub fn with_initial_scroll_provider(
        mut self,
        initial_scroll: impl Fn() -> ScrollPosition + Send + Sync + 'static,
    ) -> Self {
        self.initial_scroll = InitialScroll::Provider(Arc::new(initial_scroll));
        self
    }
}

impl Default for ParallaxOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ParallaxOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParallaxOptions")
            .field("speed", &self.speed)
            .field("vertical_speed", &self.vertical_speed)
            .field("horizontal_speed", &self.horizontal_speed)
            .field("breakpoints", &self.breakpoints)
            .field("center", &self.center)
            .field("round", &self.round)
            .field("vertical", &self.vertical)
            .field("horizontal", &self.horizontal)
            .field("vertical_scroll_axis", &self.vertical_scroll_axis)
            .field("horizontal_scroll_axis", &self.horizontal_scroll_axis)
            .field("initial_viewport", &self.initial_viewport)
            .field("initial_scroll", &self.initial_scroll)
            .finish_non_exhaustive()
    }
}
