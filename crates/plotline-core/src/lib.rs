//! Plotline Core
//!
//! Shared leaf utilities for the plotline chart engine: pixel-space geometry,
//! easing curves, frame timing, and logging bootstrap.

pub mod easing;
pub mod geometry;
pub mod logging;
pub mod time;
