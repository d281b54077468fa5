//! Multi-scale sliding-window [HoG] descriptors built on the
//! [image] crate.
//!
//! The work for a single image is split into four stages:
//!
//! 1. [`window_sampling`] enumerates candidate rectangles over a range
//!    of scales.
//! 2. [`binning`] splits a two-channel [`gradient_field`] into one
//!    magnitude image per orientation bin.
//! 3. [`integral_image`] turns each bin image into a summed-area table.
//! 4. [`descriptor`] reads cell histograms for any rectangle from those
//!    tables and returns an L2-normalised vector.
//!
//! [`pipeline`] wires these together for one decoded image, and
//! [`gradients`] provides a gradient operator for `image` buffers.
//!
//! [HoG]: http://lear.inrialpes.fr/people/triggs/pubs/Dalal-cvpr05.pdf
//! [image]: https://github.com/image-rs/image
#![deny(missing_docs)]
#![allow(
    clippy::cast_lossless,
    clippy::too_many_arguments,
    clippy::needless_range_loop,
    clippy::many_single_char_names,
    clippy::nonminimal_bool
)]

#[cfg(test)]
#[macro_use]
extern crate assert_approx_eq;

#[macro_use]
mod doc_macros;

pub mod binning;
pub mod definitions;
pub mod descriptor;
pub mod error;
pub mod gradient_field;
pub mod gradients;
pub mod integral_image;
pub mod math;
pub mod pipeline;
#[cfg(test)]
mod proptest_utils;
pub mod rect;
pub mod window_sampling;

pub use crate::error::{HogError, Result};
