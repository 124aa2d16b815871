use crate::*;

use alloc::format;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::AtomicUsize;
use core::sync::atomic::{AtomicU64, Ordering};

static INITIAL_SCROLL_PROVIDER_CALLED: AtomicU64 = AtomicU64::new(0);
static ON_UPDATE_SEEN_Y: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_i64(&mut self, start: i64, end_exclusive: i64) -> i64 {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as i64
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_i64(start as i64, end_exclusive as i64) as usize
    }

    fn gen_bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }

    // Whole CSS pixels; exact in f64.
    fn gen_coord(&mut self) -> f64 {
        self.gen_range_i64(-1000, 1001) as f64
    }

    // Quarter-step speeds; exact in f64 and exact through `format!`/`parse`.
    fn gen_speed(&mut self) -> f64 {
        self.gen_range_i64(-40, 41) as f64 / 4.0
    }
}

fn expected_axis_translation(enabled: bool, scroll: f64, base: f64, speed: f64) -> f64 {
    if !enabled {
        return 0.0;
    }
    (scroll - base) * speed * 0.1
}

#[test]
fn defaults_match_original_option_set() {
    let o = ParallaxOptions::new();
    assert_eq!(o.speed, -2.0);
    assert_eq!(o.vertical_speed, None);
    assert_eq!(o.horizontal_speed, None);
    assert_eq!(o.breakpoints, [576, 768, 1201]);
    assert!(!o.center);
    assert!(!o.round);
    assert!(o.vertical);
    assert!(!o.horizontal);
    assert_eq!(o.vertical_scroll_axis, ScrollAxis::Y);
    assert_eq!(o.horizontal_scroll_axis, ScrollAxis::X);
    assert!(o.on_update.is_none());
    assert_eq!(o.initial_viewport, None);
    assert!(matches!(o.initial_scroll, InitialScroll::Value(v) if v == ScrollPosition::ORIGIN));
}

#[test]
fn vertical_element_translates_against_scroll() {
    let mut p = Parallax::new(ParallaxOptions::new(), [ElementDescriptor::at(100.0, 500.0)]);
    // At the construction scroll the element is offset by its own distance
    // from the document origin: (0 - 500) * -2 * 0.1.
    assert_eq!(p.translation(0), Some(Translation::new(0.0, 100.0)));

    p.set_scroll_position(ScrollPosition::new(0.0, 600.0));
    let t = p.translation(0).unwrap();
    assert_eq!(t, Translation::new(0.0, -20.0));
    assert_eq!(t.to_transform_style(), "translate3d(0px, -20px, 0)");
}

#[test]
fn speed_attribute_overrides_default_speed() {
    let mut p = Parallax::new(
        ParallaxOptions::new()
            .with_vertical(false)
            .with_horizontal(true),
        [ElementDescriptor::at(200.0, 0.0).with_speed_attribute("4")],
    );
    assert_eq!(p.elements()[0].speed, 4.0);

    p.set_scroll_position(ScrollPosition::new(250.0, 0.0));
    let t = p.translation(0).unwrap();
    assert_eq!(t, Translation::new(20.0, 0.0));
    assert_eq!(t.to_transform_style(), "translate3d(20px, 0px, 0)");
}

#[test]
fn disabled_axes_pin_translations_to_zero() {
    // Default options: vertical only. Horizontal scrolling must not leak in.
    let mut p = Parallax::new(ParallaxOptions::new(), [ElementDescriptor::at(100.0, 500.0)]);
    p.set_scroll_position(ScrollPosition::new(1000.0, 600.0));
    assert_eq!(p.translation(0), Some(Translation::new(0.0, -20.0)));

    // Both axes off: always the identity transform.
    let mut p = Parallax::new(
        ParallaxOptions::new().with_vertical(false),
        [ElementDescriptor::at(100.0, 500.0)],
    );
    p.set_scroll_position(ScrollPosition::new(1000.0, 600.0));
    let t = p.translation(0).unwrap();
    assert_eq!(t, Translation::ZERO);
    assert_eq!(t.to_transform_style(), "translate3d(0px, 0px, 0)");
}

#[test]
fn speed_attribute_parsing_is_strict() {
    assert_eq!(resolve_speed(None, -2.0), -2.0);
    assert_eq!(resolve_speed(Some("4"), -2.0), 4.0);
    assert_eq!(resolve_speed(Some(" 3.5 "), -2.0), 3.5);
    assert_eq!(resolve_speed(Some("-0.5"), -2.0), -0.5);
    assert_eq!(resolve_speed(Some("1e2"), -2.0), 100.0);
    // An explicit zero is honored, not treated as missing.
    assert_eq!(resolve_speed(Some("0"), -2.0), 0.0);
    // Whole-token parsing: trailing garbage is a parse failure.
    assert_eq!(resolve_speed(Some("3.5abc"), -2.0), -2.0);
    assert_eq!(resolve_speed(Some(""), -2.0), -2.0);
    assert_eq!(resolve_speed(Some("fast"), -2.0), -2.0);
    // Non-finite values fall back even though they parse.
    assert_eq!(resolve_speed(Some("NaN"), -2.0), -2.0);
    assert_eq!(resolve_speed(Some("inf"), -2.0), -2.0);
    assert_eq!(resolve_speed(Some("-inf"), -2.0), -2.0);
}

#[test]
fn baseline_includes_construction_scroll() {
    let mut p = Parallax::new(
        ParallaxOptions::new().with_initial_scroll_value(ScrollPosition::new(50.0, 300.0)),
        [ElementDescriptor::at(100.0, 200.0)],
    );
    let e = p.elements()[0];
    assert_eq!(e.base_x, 150.0);
    assert_eq!(e.base_y, 500.0);
    // At the construction scroll: (300 - 500) * -2 * 0.1.
    assert_eq!(p.translation(0), Some(Translation::new(0.0, 40.0)));

    // Scrolling to the baseline zeroes the translation.
    p.set_scroll_position(ScrollPosition::new(50.0, 500.0));
    assert_eq!(p.translation(0), Some(Translation::ZERO));
}

#[test]
fn baselines_survive_option_and_viewport_changes() {
    let mut p = Parallax::new(ParallaxOptions::new(), [ElementDescriptor::at(0.0, 500.0)]);
    p.set_viewport(Viewport::new(1280.0, 720.0));
    p.update_options(|o| o.round = false);
    assert_eq!(p.elements()[0].base_y, 500.0);

    p.set_scroll_position(ScrollPosition::new(0.0, 600.0));
    assert_eq!(p.translation(0), Some(Translation::new(0.0, -20.0)));

    // Element speeds were resolved at construction; a later default-speed
    // change does not re-resolve them.
    p.update_options(|o| o.speed = 10.0);
    assert_eq!(p.translation(0), Some(Translation::new(0.0, -20.0)));
}

#[test]
fn empty_engine_is_inert() {
    let p = Parallax::new(ParallaxOptions::new(), []);
    assert!(p.is_empty());
    assert_eq!(p.element_count(), 0);
    assert_eq!(p.element(0), None);
    assert_eq!(p.translation(0), None);

    let mut visits = 0usize;
    p.for_each_translation(|_, _| visits += 1);
    assert_eq!(visits, 0);

    let mut out = Vec::new();
    out.push(Translation::new(1.0, 1.0));
    p.collect_translations(&mut out);
    assert!(out.is_empty());
}

#[test]
fn per_axis_speed_overrides_replace_element_speed() {
    let mut p = Parallax::new(
        ParallaxOptions::new()
            .with_horizontal(true)
            .with_vertical_speed(Some(1.0))
            .with_horizontal_speed(Some(-1.0)),
        [ElementDescriptor::at(100.0, 500.0).with_speed_attribute("8")],
    );
    p.set_scroll_position(ScrollPosition::new(150.0, 600.0));
    let t = p.translation(0).unwrap();
    // The element speed (8) is replaced per axis, not multiplied.
    assert_eq!(t.y, 10.0);
    assert_eq!(t.x, -5.0);
}

#[test]
fn round_snaps_to_hundredths() {
    let mut p = Parallax::new(
        ParallaxOptions::new().with_round(true).with_speed(3.0),
        [ElementDescriptor::at(0.0, 0.0)],
    );
    p.set_scroll_position(ScrollPosition::new(0.0, 1.0));
    // Raw formula gives 1 * 3 * 0.1 = 0.30000000000000004; rounding snaps it.
    let t = p.translation(0).unwrap();
    assert_eq!(t.y, 0.3);
    assert_eq!(t.to_transform_style(), "translate3d(0px, 0.3px, 0)");

    // Off by default: the raw product is styled verbatim.
    let mut raw = Parallax::new(
        ParallaxOptions::new().with_speed(3.0),
        [ElementDescriptor::at(0.0, 0.0)],
    );
    raw.set_scroll_position(ScrollPosition::new(0.0, 1.0));
    assert_eq!(raw.translation(0).unwrap().y, 1.0 * 3.0 * 0.1);
}

#[test]
fn round_is_half_away_from_zero() {
    // 5 * 0.25 * 0.1 is exactly 0.125; the 12.5-hundredths tie rounds away
    // from zero on both sides.
    let mut p = Parallax::new(
        ParallaxOptions::new().with_round(true).with_speed(0.25),
        [ElementDescriptor::at(0.0, 0.0)],
    );
    p.set_scroll_position(ScrollPosition::new(0.0, 5.0));
    assert_eq!(p.translation(0).unwrap().y, 0.13);
    p.set_scroll_position(ScrollPosition::new(0.0, -5.0));
    assert_eq!(p.translation(0).unwrap().y, -0.13);

    // (482 - 400) * -0.5 * 0.1 = -4.100000000000001 raw; rounding snaps it.
    let mut down = Parallax::new(
        ParallaxOptions::new().with_round(true).with_speed(-0.5),
        [ElementDescriptor::at(0.0, 400.0)],
    );
    down.set_scroll_position(ScrollPosition::new(0.0, 482.0));
    let t = down.translation(0).unwrap();
    assert_eq!(t.y, -4.1);
    assert_eq!(t.to_transform_style(), "translate3d(0px, -4.1px, 0)");
}

#[test]
fn zero_delta_renders_plain_zero() {
    // (0 - 0) * -2 * 0.1 is IEEE -0.0; styling must render plain zero.
    let p = Parallax::new(ParallaxOptions::new(), [ElementDescriptor::at(0.0, 0.0)]);
    let t = p.translation(0).unwrap();
    assert!(t.y.is_sign_positive());
    assert_eq!(t.to_transform_style(), "translate3d(0px, 0px, 0)");
}

#[test]
fn speed_zero_pins_elements() {
    let mut p = Parallax::new(
        ParallaxOptions::new(),
        [ElementDescriptor::at(0.0, 500.0).with_speed_attribute("0")],
    );
    p.set_scroll_position(ScrollPosition::new(0.0, 987.0));
    let t = p.translation(0).unwrap();
    assert_eq!(t, Translation::ZERO);
    assert_eq!(t.to_transform_style(), "translate3d(0px, 0px, 0)");
}

#[test]
fn non_finite_speed_propagates() {
    let mut p = Parallax::new(
        ParallaxOptions::new().with_speed(f64::NAN),
        [ElementDescriptor::at(0.0, 0.0)],
    );
    p.set_scroll_position(ScrollPosition::new(0.0, 10.0));
    assert!(p.translation(0).unwrap().y.is_nan());

    // Rounding must not collapse NaN to a number either.
    let mut rounded = Parallax::new(
        ParallaxOptions::new().with_speed(f64::NAN).with_round(true),
        [ElementDescriptor::at(0.0, 0.0)],
    );
    rounded.set_scroll_position(ScrollPosition::new(0.0, 10.0));
    assert!(rounded.translation(0).unwrap().y.is_nan());
}

#[test]
fn translation_at_does_not_touch_state() {
    let p = Parallax::new(ParallaxOptions::new(), [ElementDescriptor::at(0.0, 500.0)]);
    let t = p
        .translation_at(0, ScrollPosition::new(0.0, 600.0))
        .unwrap();
    assert_eq!(t.y, -20.0);
    assert_eq!(p.scroll_position(), ScrollPosition::ORIGIN);
    assert_eq!(p.translation(0).unwrap().y, 100.0);
}

#[test]
fn collect_translations_matches_for_each() {
    let mut p = Parallax::new(
        ParallaxOptions::new(),
        [
            ElementDescriptor::at(0.0, 100.0),
            ElementDescriptor::at(0.0, 200.0).with_speed_attribute("1.5"),
            ElementDescriptor::at(0.0, 300.0),
        ],
    );
    p.set_scroll_position(ScrollPosition::new(0.0, 250.0));

    let mut a = Vec::new();
    p.collect_translations(&mut a);

    let mut b = Vec::new();
    p.for_each_translation(|_, t| b.push(t));

    assert_eq!(a, b);
    assert_eq!(a.len(), 3);
}

#[test]
fn batch_update_coalesces_on_update() {
    let calls: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let mut p = Parallax::new(
        ParallaxOptions::new().with_on_update(Some({
            let calls = Arc::clone(&calls);
            move |_: &Parallax| {
                calls.fetch_add(1, Ordering::Relaxed);
            }
        })),
        [ElementDescriptor::at(0.0, 0.0)],
    );

    p.batch_update(|p| {
        p.set_viewport(Viewport::new(1280.0, 720.0));
        p.set_scroll_position(ScrollPosition::new(0.0, 10.0));
    });

    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn batch_update_is_nestable() {
    let calls: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let mut p = Parallax::new(
        ParallaxOptions::new().with_on_update(Some({
            let calls = Arc::clone(&calls);
            move |_: &Parallax| {
                calls.fetch_add(1, Ordering::Relaxed);
            }
        })),
        [ElementDescriptor::at(0.0, 0.0)],
    );

    p.batch_update(|p| {
        p.set_viewport(Viewport::new(1280.0, 720.0));
        p.batch_update(|p| {
            p.set_scroll_position(ScrollPosition::new(0.0, 10.0));
        });
    });

    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn no_op_setters_do_not_notify() {
    let calls: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let mut p = Parallax::new(
        ParallaxOptions::new().with_on_update(Some({
            let calls = Arc::clone(&calls);
            move |_: &Parallax| {
                calls.fetch_add(1, Ordering::Relaxed);
            }
        })),
        [ElementDescriptor::at(0.0, 0.0)],
    );

    p.set_scroll_position(ScrollPosition::ORIGIN);
    p.set_viewport(Viewport::default());
    assert_eq!(calls.load(Ordering::Relaxed), 0);

    p.set_scroll_position(ScrollPosition::new(0.0, 1.0));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    p.set_scroll_position(ScrollPosition::new(0.0, 1.0));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn set_viewport_and_scroll_coalesces() {
    let calls: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let mut p = Parallax::new(
        ParallaxOptions::new().with_on_update(Some({
            let calls = Arc::clone(&calls);
            move |_: &Parallax| {
                calls.fetch_add(1, Ordering::Relaxed);
            }
        })),
        [ElementDescriptor::at(0.0, 0.0)],
    );

    p.set_viewport_and_scroll(Viewport::new(800.0, 600.0), ScrollPosition::new(0.0, 42.0));
    assert_eq!(calls.load(Ordering::Relaxed), 1);
}

#[test]
fn on_update_sees_applied_state() {
    ON_UPDATE_SEEN_Y.store(0, Ordering::Relaxed);
    let mut p = Parallax::new(
        ParallaxOptions::new().with_on_update(Some(|p: &Parallax| {
            ON_UPDATE_SEEN_Y.store(p.scroll_position().y.to_bits(), Ordering::Relaxed);
        })),
        [ElementDescriptor::at(0.0, 500.0)],
    );
    p.set_scroll_position(ScrollPosition::new(0.0, 600.0));
    assert_eq!(f64::from_bits(ON_UPDATE_SEEN_Y.load(Ordering::Relaxed)), 600.0);
}

#[test]
fn set_on_update_replaces_callback() {
    let calls: Arc<AtomicUsize> = Arc::new(AtomicUsize::new(0));
    let mut p = Parallax::new(ParallaxOptions::new(), [ElementDescriptor::at(0.0, 0.0)]);

    p.set_on_update(Some({
        let calls = Arc::clone(&calls);
        move |_: &Parallax| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    }));
    // Registration itself notifies once.
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    p.set_scroll_position(ScrollPosition::new(0.0, 5.0));
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    p.set_on_update(None::<fn(&Parallax)>);
    p.set_scroll_position(ScrollPosition::new(0.0, 6.0));
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn initial_scroll_provider_is_used() {
    INITIAL_SCROLL_PROVIDER_CALLED.store(0, Ordering::Relaxed);
    let opts = ParallaxOptions::new().with_initial_scroll(InitialScroll::Provider(Arc::new(|| {
        INITIAL_SCROLL_PROVIDER_CALLED.fetch_add(1, Ordering::Relaxed);
        ScrollPosition::new(0.0, 300.0)
    })));
    let p = Parallax::new(opts, [ElementDescriptor::at(0.0, 200.0)]);
    assert_eq!(p.scroll_position(), ScrollPosition::new(0.0, 300.0));
    assert_eq!(p.elements()[0].base_y, 500.0);
    assert!(INITIAL_SCROLL_PROVIDER_CALLED.load(Ordering::Relaxed) >= 1);
}

#[test]
fn frame_state_can_roundtrip() {
    let mut p1 = Parallax::new(ParallaxOptions::new(), [ElementDescriptor::at(0.0, 500.0)]);
    p1.set_viewport_and_scroll(Viewport::new(1280.0, 720.0), ScrollPosition::new(0.0, 600.0));

    let state = p1.frame_state();

    let mut p2 = Parallax::new(ParallaxOptions::new(), [ElementDescriptor::at(0.0, 500.0)]);
    p2.restore_frame_state(state);

    assert_eq!(p2.viewport(), Viewport::new(1280.0, 720.0));
    assert_eq!(p2.scroll_position(), ScrollPosition::new(0.0, 600.0));
    assert_eq!(p2.translation(0), p1.translation(0));
}

#[test]
fn transform_style_is_deterministic() {
    let mut p = Parallax::new(ParallaxOptions::new(), [ElementDescriptor::at(0.0, 500.0)]);
    p.set_scroll_position(ScrollPosition::new(0.0, 641.3));

    let first = p.translation(0).unwrap().to_transform_style();
    let second = p.translation(0).unwrap().to_transform_style();
    assert_eq!(first, second);

    // Re-applying the same scroll cannot change the style.
    p.set_scroll_position(ScrollPosition::new(0.0, 641.3));
    assert_eq!(p.translation(0).unwrap().to_transform_style(), first);
}

#[test]
fn property_random_scrolls_match_reference_formula() {
    let mut rng = Lcg::new(0x5eed_cafe);

    for _case in 0..200 {
        let vertical = rng.gen_bool();
        let horizontal = rng.gen_bool();
        let default_speed = rng.gen_speed();
        let vertical_speed = rng.gen_bool().then(|| rng.gen_speed());
        let horizontal_speed = rng.gen_bool().then(|| rng.gen_speed());
        let initial = ScrollPosition::new(rng.gen_coord(), rng.gen_coord());

        let count = rng.gen_range_usize(1, 16);
        let mut descriptors = Vec::new();
        let mut speeds = Vec::new();
        let mut bases = Vec::new();
        for _ in 0..count {
            let offset = ElementOffset::new(rng.gen_coord(), rng.gen_coord());
            bases.push((offset.left + initial.x, offset.top + initial.y));
            let mut d = ElementDescriptor::new(offset, None);
            if rng.gen_bool() {
                let s = rng.gen_speed();
                d = d.with_speed_attribute(format!("{s}"));
                speeds.push(s);
            } else {
                speeds.push(default_speed);
            }
            descriptors.push(d);
        }

        let mut p = Parallax::new(
            ParallaxOptions::new()
                .with_speed(default_speed)
                .with_vertical(vertical)
                .with_horizontal(horizontal)
                .with_vertical_speed(vertical_speed)
                .with_horizontal_speed(horizontal_speed)
                .with_initial_scroll_value(initial),
            descriptors,
        );
        assert_eq!(p.element_count(), count);

        for _ in 0..8 {
            let scroll = ScrollPosition::new(rng.gen_coord(), rng.gen_coord());
            p.set_scroll_position(scroll);
            let mut visited = 0usize;
            p.for_each_translation(|i, t| {
                visited += 1;
                let (base_x, base_y) = bases[i];
                let vs = vertical_speed.unwrap_or(speeds[i]);
                let hs = horizontal_speed.unwrap_or(speeds[i]);
                assert_eq!(t.y, expected_axis_translation(vertical, scroll.y, base_y, vs));
                assert_eq!(t.x, expected_axis_translation(horizontal, scroll.x, base_x, hs));
                assert_eq!(p.translation(i), Some(t));
            });
            assert_eq!(visited, count);
        }
    }
}
