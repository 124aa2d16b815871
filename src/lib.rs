//! A headless parallax engine inspired by Rellax.
//!
//! For adapter-level utilities (scroll hosts, the listener/frame-loop lifecycle), see the
//! `parallaxer-adapter` crate.
//!
//! This crate focuses on the core algorithm needed to drive parallax motion at interactive
//! frame rates: per-element baselines captured once at startup, per-axis speed resolution,
//! and the translation formula `(scroll - base) * speed * 0.1`.
//!
//! It is UI-agnostic. A DOM/GUI layer is expected to provide:
//! - viewport size (width/height)
//! - scroll positions
//! - element offsets and (optionally) per-element speed attributes
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod element;
mod options;
mod parallax;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use element::{ElementDescriptor, TrackedElement, resolve_speed};
pub use options::{InitialScroll, OnUpdateCallback, ParallaxOptions};
pub use parallax::Parallax;
pub use state::{FrameState, ScrollState, ViewportState};
pub use types::{ElementOffset, ScrollAxis, ScrollPosition, Translation, Viewport};
