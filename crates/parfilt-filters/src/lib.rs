//! # parfilt-filters
//!
//! Convolution kernels and the sequential reference engine.
//!
//! # Modules
//!
//! - [`kernel`] - the [`Kernel`] type and the fixed blur/sharpen/edge matrices
//! - [`catalog`] - filter-name resolution ([`resolve`], [`FilterKind`])
//! - [`border`] - the replicate-border sampling policy
//! - [`sequential`] - the single-threaded reference engine
//!
//! # Example
//!
//! ```rust
//! use parfilt_core::PixelBuffer;
//! use parfilt_filters::{apply_sequential, catalog};
//!
//! let input = PixelBuffer::filled(8, 8, 3, 128).unwrap();
//! let kernel = catalog::resolve("sharpen").unwrap();
//! let output = apply_sequential(&input, &kernel).unwrap();
//! assert_eq!(output.dimensions(), input.dimensions());
//! ```
//!
//! Both execution paths of the workspace route their per-sample arithmetic
//! through [`sequential::convolve_sample`] or its WGSL mirror; this crate
//! is the single owner of filter numerics.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod border;
pub mod catalog;
mod error;
pub mod kernel;
pub mod sequential;

pub use catalog::{resolve, FilterKind};
pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, MAX_SAMPLE};
pub use sequential::{apply_sequential, check_dimensions, convolve_sample};
