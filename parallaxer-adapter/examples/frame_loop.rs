//! Shows the animation-frame loop picking up scroll changes that never fire
//! a scroll event, the way compositor-driven scrolling can move a page
//! between events.
//!
//! Run with: `cargo run -p parallaxer-adapter --example frame_loop`

use parallaxer::{ElementOffset, ParallaxOptions, ScrollPosition, Viewport};
use parallaxer_adapter::{ParallaxController, SimHost};

fn main() {
    let host = SimHost::new(Viewport::new(1280.0, 720.0));
    let layer = host.insert_element(".layer", ElementOffset::new(0.0, 400.0));

    let controller = ParallaxController::new(
        host.clone(),
        ".layer",
        ParallaxOptions::new().with_speed(-0.5).with_round(true),
    );

    for frame in 0..5u32 {
        host.scroll_silently(ScrollPosition::new(0.0, f64::from(frame) * 120.5));
        host.run_frame();
        println!(
            "frame {frame}: {}",
            host.transform_of(layer).unwrap_or_default()
        );
    }

    controller.destroy();
    println!("loop stopped, pending frames: {}", host.pending_frames());
}
