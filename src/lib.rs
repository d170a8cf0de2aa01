//! Mockframe turns an app screenshot into a downloadable iPhone "mockup" photo.
//!
//! The crate is two pure components behind a thin HTTP boundary:
//!
//! 1. **Detect**: `(pixel width, pixel height) -> Detection` — which catalog
//!    model does a screenshot belong to, via an exact-resolution pass and an
//!    aspect-ratio fallback ([`detect`]).
//! 2. **Compose**: `(frame bytes, screenshot bytes, insets) -> PNG bytes` —
//!    viewport math, cover-fit resize, rounded-corner masking, and layered
//!    alpha composition ([`compose`]).
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: detection and composition are pure and
//!   stable for a given input; identical inputs produce byte-identical PNGs.
//! - **No IO in the core**: frame bytes are fetched up front by [`FrameStore`];
//!   the compositor only ever sees in-memory buffers.
//! - **Injectable catalog**: the device registry is an explicitly constructed
//!   [`Catalog`] value, never process-wide mutable state.
#![forbid(unsafe_code)]

mod assets;
mod catalog;
mod compose;
mod detect;
mod foundation;

/// HTTP boundary: axum router, handlers, and error translation.
pub mod web;

pub use assets::frames::{FrameKey, FrameStore, Orientation};
pub use catalog::models::{Catalog, DeviceModel, Series};
pub use compose::compositor::{InsetConfig, Viewport, compose, compose_with_defaults};
pub use detect::matcher::{Detection, Tolerances, detect, detect_with};
pub use foundation::error::{MockupError, MockupResult};
