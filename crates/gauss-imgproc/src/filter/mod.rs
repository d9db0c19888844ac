//! Filter operations
//!
//! This module provides the gaussian kernel and the 2D convolution used to blur images.

/// Filter kernels
pub mod kernels;

/// Border policies for the pixels a convolution cannot reach
mod border;
pub use border::*;

/// 2D convolution over the image interior
mod convolution;
pub use convolution::*;

/// Filter operations
mod ops;
pub use ops::*;
