//! # parfilt-core
//!
//! Core types for the parfilt dual-path image filtering workspace.
//!
//! This crate provides the foundation the other crates build on:
//!
//! - [`PixelBuffer`] - flat, row-major u8 raster with shape metadata
//! - [`Error`], [`Result`] - buffer construction/access failures
//! - [`pattern`] - deterministic procedural test images
//!
//! ## Crate Structure
//!
//! `parfilt-core` has no internal dependencies; everything else depends
//! on it:
//!
//! ```text
//! parfilt-core (this crate)
//!    ^
//!    |
//!    +-- parfilt-filters (kernels, sequential reference engine)
//!    +-- parfilt-compute (parallel dispatch, comparison harness)
//!    +-- parfilt-cli (file I/O and reporting)
//! ```
//!
//! Buffers are deliberately dumb: filtering semantics live entirely in the
//! crates above so the two execution paths cannot disagree about layout.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod pattern;

pub use buffer::PixelBuffer;
pub use error::{Error, Result};
