use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::element::TrackedElement;
use crate::{
    ElementDescriptor, FrameState, ParallaxOptions, ScrollPosition, ScrollState, Translation,
    Viewport, ViewportState,
};

/// Speed factors are scaled down by 10 so that small integer speeds stay
/// usable: `speed = -2` translates an element by -0.2px per scrolled pixel.
const SPEED_SCALE: f64 = 0.1;

/// A headless parallax engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects; element identity lives in your adapter.
/// - Your adapter drives it by pushing viewport geometry and scroll positions.
/// - Output is exposed via zero-allocation iteration ([`Self::for_each_translation`]).
///
/// For the selector/listener/frame-loop lifecycle, see the
/// `parallaxer-adapter` crate.
#[derive(Clone, Debug)]
pub struct Parallax {
    options: ParallaxOptions,
    elements: Vec<TrackedElement>,
    viewport: Viewport,
    scroll: ScrollPosition,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl Parallax {
    /// Creates a new engine, capturing each element's baseline.
    ///
    /// Baselines are measured against `options.initial_scroll`
    /// (`base = descriptor offset + initial scroll`) and stay fixed for the
    /// engine's lifetime. Per-element speeds are resolved here as well: a
    /// parseable, finite `speed_attribute` wins over `options.speed`.
    ///
    /// An empty descriptor set yields an inert engine: no translations, and
    /// [`Self::is_empty`] returns `true`.
    pub fn new(
        options: ParallaxOptions,
        descriptors: impl IntoIterator<Item = ElementDescriptor>,
    ) -> Self {
        let viewport = options.initial_viewport.unwrap_or_default();
        let scroll = options.initial_scroll.resolve();
        let elements: Vec<TrackedElement> = descriptors
            .into_iter()
            .map(|d| TrackedElement::capture(&d, scroll, options.speed))
            .collect();
        pdebug!(
            elements = elements.len(),
            speed = options.speed,
            vertical = options.vertical,
            horizontal = options.horizontal,
            "Parallax::new"
        );
        Self {
            options,
            elements,
            viewport,
            scroll,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }

    pub fn options(&self) -> &ParallaxOptions {
        &self.options
    }

    /// Replaces the options.
    ///
    /// Axis flags, per-axis speed overrides and `round` take effect on the
    /// next computation. Element speeds and baselines were resolved at
    /// construction and are not revisited; in particular a new
    /// `options.speed` only matters to engines constructed with it.
    pub fn set_options(&mut self, options: ParallaxOptions) {
        self.options = options;
        ptrace!(
            speed = self.options.speed,
            vertical = self.options.vertical,
            horizontal = self.options.horizontal,
            round = self.options.round,
            "Parallax::set_options"
        );
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// [`Self::set_options`].
    pub fn update_options(&mut self, f: impl FnOnce(&mut ParallaxOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_update(
        &mut self,
        on_update: Option<impl Fn(&Parallax) + Send + Sync + 'static>,
    ) {
        self.options.on_update = on_update.map(|f| Arc::new(f) as _);
        self.notify();
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_update {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_update` notification.
    ///
    /// Recommended for adapters: a typical scroll event updates the scroll
    /// position and possibly the viewport together. Without batching, each
    /// setter may trigger `on_update`, which can be expensive if the callback
    /// drives rendering.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// `true` when no element matched at construction; the engine is inert.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Tracked elements in query order.
    pub fn elements(&self) -> &[TrackedElement] {
        &self.elements
    }

    pub fn element(&self, index: usize) -> Option<&TrackedElement> {
        self.elements.get(index)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Updates the cached viewport dimensions. Dimensions only: baselines
    /// and translations do not depend on the viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        self.notify();
    }

    pub fn scroll_position(&self) -> ScrollPosition {
        self.scroll
    }

    /// Applies a scroll position update from your UI layer.
    pub fn set_scroll_position(&mut self, scroll: ScrollPosition) {
        if self.scroll == scroll {
            return;
        }
        ptrace!(x = scroll.x, y = scroll.y, "Parallax::set_scroll_position");
        self.scroll = scroll;
        self.notify();
    }

    /// Updates viewport and scroll position in a single coalesced update.
    pub fn set_viewport_and_scroll(&mut self, viewport: Viewport, scroll: ScrollPosition) {
        self.batch_update(|p| {
            p.set_viewport(viewport);
            p.set_scroll_position(scroll);
        });
    }

    /// Returns a lightweight snapshot of the current viewport state.
    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            viewport: self.viewport,
        }
    }

    /// Returns a lightweight snapshot of the current scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        ScrollState {
            position: self.scroll,
        }
    }

    /// Returns a combined snapshot of viewport + scroll state.
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            scroll: self.scroll_state(),
        }
    }

    /// Restores viewport geometry from a previously captured snapshot.
    pub fn restore_viewport_state(&mut self, state: ViewportState) {
        self.set_viewport(state.viewport);
    }

    /// Restores the scroll position from a previously captured snapshot.
    pub fn restore_scroll_state(&mut self, state: ScrollState) {
        self.set_scroll_position(state.position);
    }

    /// Restores both viewport + scroll from a previously captured snapshot.
    pub fn restore_frame_state(&mut self, state: FrameState) {
        self.batch_update(|p| {
            p.set_viewport(state.viewport.viewport);
            p.set_scroll_position(state.scroll.position);
        });
    }

    /// Computes the translation for the element at `index` at the current
    /// scroll position.
    pub fn translation(&self, index: usize) -> Option<Translation> {
        self.translation_at(index, self.scroll)
    }

    /// Computes the translation for the element at `index` as if the page
    /// were scrolled to `scroll`.
    pub fn translation_at(&self, index: usize, scroll: ScrollPosition) -> Option<Translation> {
        self.elements
            .get(index)
            .map(|e| self.translation_for(e, scroll))
    }

    /// Iterates all translations at the current scroll position without
    /// allocating. `f` receives `(index, translation)` in query order.
    pub fn for_each_translation(&self, f: impl FnMut(usize, Translation)) {
        self.for_each_translation_at(self.scroll, f);
    }

    /// Iterates all translations as if the page were scrolled to `scroll`.
    pub fn for_each_translation_at(
        &self,
        scroll: ScrollPosition,
        mut f: impl FnMut(usize, Translation),
    ) {
        for (index, element) in self.elements.iter().enumerate() {
            f(index, self.translation_for(element, scroll));
        }
    }

    /// Collects all translations into `out` (clears `out` first).
    ///
    /// This is a convenience wrapper around [`Self::for_each_translation`].
    /// For maximum performance, prefer `for_each_translation` and reuse a
    /// scratch buffer in your adapter.
    pub fn collect_translations(&self, out: &mut Vec<Translation>) {
        out.clear();
        self.for_each_translation(|_, t| out.push(t));
    }

    /// The one formula in the system:
    /// `translate = (scroll - base) * speed * 0.1`, per axis, with a disabled
    /// axis pinned to 0.
    fn translation_for(&self, element: &TrackedElement, scroll: ScrollPosition) -> Translation {
        let vertical_speed = self.options.vertical_speed.unwrap_or(element.speed);
        let horizontal_speed = self.options.horizontal_speed.unwrap_or(element.speed);

        let mut y = if self.options.vertical {
            (scroll.y - element.base_y) * vertical_speed * SPEED_SCALE
        } else {
            0.0
        };
        let mut x = if self.options.horizontal {
            (scroll.x - element.base_x) * horizontal_speed * SPEED_SCALE
        } else {
            0.0
        };

        if self.options.round {
            x = round_hundredths(x);
            y = round_hundredths(y);
        }

        Translation {
            x: normalize_zero(x),
            y: normalize_zero(y),
        }
    }
}

fn round_hundredths(value: f64) -> f64 {
    // `f64::round` is std-only; an exact `i64` cast rounds half away from
    // zero instead. Past 2^52 every f64 is already whole, and NaN and the
    // infinities take the same early return untouched.
    let scaled = value * 100.0;
    if !(scaled > -4_503_599_627_370_496.0 && scaled < 4_503_599_627_370_496.0) {
        return value;
    }
    let rounded = if scaled >= 0.0 {
        (scaled + 0.5) as i64
    } else {
        (scaled - 0.5) as i64
    };
    rounded as f64 / 100.0
}

/// `-0.0` must style identically to `0.0` (`0px`). NaN passes through.
fn normalize_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}
