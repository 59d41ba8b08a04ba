#![deny(unsafe_code)]
//! Core types for the constellation particle background.
//!
//! Provides colors (`Rgb`, `Rgba`), theme `Palette`s, the `RandomSource`
//! trait with the `Xorshift64` PRNG, reproducible scene `Seed`s, and the
//! host-facing seams the animator is built against: `Surface`, `Scheduler`
//! and `Signal`.

pub mod color;
pub mod error;
pub mod palette;
pub mod params;
pub mod prng;
pub mod scheduler;
pub mod seed;
pub mod signal;
pub mod surface;
pub mod viewport;

pub use color::{Rgb, Rgba};
pub use error::ConstellationError;
pub use palette::{Palette, PALETTE_SLOTS};
pub use prng::{RandomSource, Xorshift64};
pub use scheduler::{FrameCallback, FrameHandle, ManualScheduler, Scheduler};
pub use seed::Seed;
pub use signal::{Signal, Subscription};
pub use surface::{DrawCommand, Glow, Recorder, Surface};
pub use viewport::Viewport;

pub use glam::DVec2;
