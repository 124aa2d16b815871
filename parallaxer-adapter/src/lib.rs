//! Adapter utilities for the `parallaxer` crate.
//!
//! The `parallaxer` crate is UI-agnostic and focuses on the core math and state. This crate
//! provides the lifecycle glue a real page integration needs:
//!
//! - [`ScrollHost`]: the platform capabilities a controller consumes (element queries,
//!   scroll/resize listeners, frame scheduling, transform writes)
//! - [`ParallaxController`]: selector-driven setup, immediate scroll application, a
//!   self-rescheduling frame loop, and token-based deterministic teardown
//! - [`SimHost`]: an in-memory host for tests and headless integrations
//!
//! This crate is intentionally framework-agnostic (no web/winit bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod host;
mod sim;


pub use controller::ParallaxController;
pub use host::{FrameId, HostCallback, ListenerId, SPEED_ATTRIBUTE, ScrollHost};
pub use sim::{SimElement, SimHost};
