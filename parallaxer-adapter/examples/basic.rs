//! Drives a [`ParallaxController`] against the in-memory simulation host.
//!
//! Run with: `cargo run -p parallaxer-adapter --example basic`

use parallaxer::{ElementOffset, ParallaxOptions, ScrollPosition, Viewport};
use parallaxer_adapter::{ParallaxController, SPEED_ATTRIBUTE, SimHost};

fn main() {
    let host = SimHost::new(Viewport::new(1280.0, 720.0));

    // Two layers: one on the default speed, one with a per-element override.
    let hero = host.insert_element(".rellax", ElementOffset::new(100.0, 500.0));
    let badge = host.insert_element(".rellax", ElementOffset::new(40.0, 900.0));
    host.set_element_attribute(badge, SPEED_ATTRIBUTE, "4");

    let controller = ParallaxController::new(host.clone(), ".rellax", ParallaxOptions::new());
    println!(
        "tracking {} elements, {} listeners registered",
        controller.element_count(),
        host.listener_count()
    );

    for y in [0.0, 150.0, 300.0, 600.0] {
        host.scroll_to(ScrollPosition::new(0.0, y));
        println!(
            "scroll y={y:>5}: hero {:<28} badge {}",
            host.transform_of(hero).unwrap_or_default(),
            host.transform_of(badge).unwrap_or_default()
        );
    }

    controller.destroy();
    println!(
        "destroyed: {} listeners, {} pending frames",
        host.listener_count(),
        host.pending_frames()
    );
}
