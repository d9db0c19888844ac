use gauss_image::ImageError;

use crate::parallel::ParallelError;

/// Errors that can occur while building kernels or filtering images.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum FilterError {
    /// The kernel size is zero or even, so the kernel has no center cell.
    #[error("kernel size must be a positive odd number, got {0}")]
    InvalidKernelSize(usize),

    /// The sigma of the gaussian is not a finite positive number.
    #[error("sigma must be finite and > 0, got {0}")]
    InvalidSigma(f32),

    /// The kernel weights do not fill a square of the given size.
    #[error("kernel data length ({0}) does not match a {1}x{1} kernel")]
    InvalidKernelShape(usize, usize),

    /// The kernel weights could not be allocated.
    #[error("failed to allocate {0} kernel weights")]
    KernelAllocationFailed(usize),

    /// The image has a channel layout the filter cannot process.
    #[error("unsupported number of channels: {0}, expected 1, 2, 3 or 4")]
    UnsupportedChannels(usize),

    /// The border mode could not be parsed.
    #[error("invalid border mode: {0}")]
    InvalidBorderMode(String),

    /// Error coming from the image buffers.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error coming from the parallel executor.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
