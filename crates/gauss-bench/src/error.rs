use gauss_image::ImageError;
use gauss_imgproc::{parallel::ParallelError, FilterError};
use gauss_io::IoError;

/// An error type for the benchmark runner.
#[derive(thiserror::Error, Debug)]
pub enum BenchError {
    /// The list of thread counts is empty.
    #[error("at least one thread count is required")]
    NoTrials,

    /// Error reading or writing an image file.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Error allocating an image buffer.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Error building the kernel or filtering the image.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// Error setting up the worker threads.
    #[error(transparent)]
    Parallel(#[from] ParallelError),
}
