//! Procedural stent frames swept along a centerline.
//!
//! Given an open centerline polyline, this crate produces a sequence of
//! closed sinusoidal rings wrapped around a tube that follows the curve,
//! approximating the wire lattice of a stent.
//!
//! The pipeline has three stages:
//!
//! - [`BezierFitter`] - optional cubic Bezier smoothing that flattens the
//!   centerline into a dense polyline, then [`subsample_anchors`] reduces it
//!   to `part_count + 1` anchors
//! - [`transport_frames`] - rotation-minimizing (parallel transport) frames,
//!   one per centerline segment
//! - [`RingSweeper`] - places a precomputed periodic wave pattern in each
//!   frame and closes it into a [`Ring`]
//!
//! [`StentFrameGenerator`] composes the stages.
//!
//! # Quick Start
//!
//! ```
//! use stent_frame::{StentFrameGenerator, StentParams};
//! use nalgebra::Point3;
//!
//! let params = StentParams::default()
//!     .with_sample_count(32)
//!     .with_period_count(12)
//!     .with_xz_scale(0.1)
//!     .with_y_scale(0.02);
//! let generator = StentFrameGenerator::new(params).unwrap();
//!
//! let centerline = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 1.0),
//! ];
//!
//! let stent = generator.generate(&centerline).unwrap();
//! for ring in &stent {
//!     assert_eq!(ring.len(), 32 * 12 + 1);
//!     assert!(ring.is_closed());
//! }
//! ```
//!
//! # Ring Layout
//!
//! In frame-local coordinates a ring point `k` is
//!
//! ```text
//! x = xz_scale · cos(2πk / (sample_count · period_count))
//! y = y_scale  · sin(2π(k mod sample_count) / sample_count)
//! z = xz_scale · sin(2πk / (sample_count · period_count))
//! ```
//!
//! and is placed in world space as `origin + normal·x + tangent·y +
//! binormal·z`.
//!
//! # Errors
//!
//! Degenerate input is reported through [`StentError`] rather than leaking
//! NaN into the output: coincident consecutive points, too few points, or a
//! centerline that doubles back on itself. An empty centerline is not an
//! error and yields an empty [`StentFrame`].
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for parameters, frames
//!   and output types

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions,
    clippy::suboptimal_flops,
    clippy::missing_const_for_fn
)]

mod bezier;
mod error;
mod frame;
mod generate;
mod params;
mod ring;
mod types;

pub use bezier::{BezierFitter, CubicBezier, tangent_handles};
pub use error::{StentError, StentResult};
pub use frame::{
    Frame, PARALLEL_ANGLE_EPSILON, segment_tangent, transport_frames, transport_rotation,
};
pub use generate::{StentFrameGenerator, create_stent_frame, subsample_anchors};
pub use params::StentParams;
pub use ring::{RingSweeper, SineTable};
pub use types::{Ring, StentFrame};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
