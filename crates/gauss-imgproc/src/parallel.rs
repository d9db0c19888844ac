use rayon::prelude::*;
use thiserror::Error;

use gauss_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls how parallel operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Split the work over the Rayon pool of the caller.
    ///
    /// This is the global pool, or the pool installed with [`rayon::ThreadPool::install`].
    #[default]
    ParallelElements,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or as a reference result.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for tests or specific isolation needs.
    Fixed(usize),
}

/// Build a Rayon thread pool with exactly `num_threads` workers.
///
/// # Errors
///
/// Returns [`ParallelError::InvalidThreadCount`] for zero threads and
/// [`ParallelError::BuildError`] if the operating system refuses to spawn the workers.
pub fn build_thread_pool(num_threads: usize) -> Result<rayon::ThreadPool, ParallelError> {
    if num_threads == 0 {
        return Err(ParallelError::InvalidThreadCount(num_threads));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .map_err(|e| ParallelError::BuildError(e.to_string()))
}

/// Apply a function to every interior pixel of the image.
///
/// The interior excludes a frame of `radius` pixels on each side. The closure receives
/// the row, the column and the mutable samples of one destination pixel. Every pixel is
/// visited exactly once, so the closure may write its pixel without synchronization.
///
/// With a parallel strategy the rows are distributed across the workers and the pixels
/// of each row are split again, so both loops are shared among the workers.
///
/// # Arguments
///
/// * `dst` - The destination image with shape (H, W, C).
/// * `radius` - The width of the excluded frame in pixels.
/// * `strategy` - The execution strategy.
/// * `f` - The per-pixel operation taking `(row, col, pixel)`.
pub fn par_iter_interior<T, const C: usize>(
    dst: &mut Image<T, C>,
    radius: usize,
    strategy: ExecutionStrategy,
    f: impl Fn(usize, usize, &mut [T]) + Send + Sync,
) -> Result<(), ParallelError>
where
    T: Send,
{
    let (rows, cols) = (dst.rows(), dst.cols());
    if rows <= 2 * radius || cols <= 2 * radius {
        return Ok(());
    }

    let row_stride = cols * C;
    let col_range = radius * C..(cols - radius) * C;
    let interior = &mut dst.as_slice_mut()[radius * row_stride..(rows - radius) * row_stride];

    match strategy {
        ExecutionStrategy::Serial => {
            interior
                .chunks_exact_mut(row_stride)
                .enumerate()
                .for_each(|(r, dst_row)| {
                    dst_row[col_range.clone()]
                        .chunks_exact_mut(C)
                        .enumerate()
                        .for_each(|(c, dst_pixel)| f(r + radius, c + radius, dst_pixel));
                });
        }
        ExecutionStrategy::ParallelElements => {
            par_interior_rows::<T, C, _>(interior, row_stride, col_range, radius, &f);
        }
        ExecutionStrategy::Fixed(n) => {
            let pool = build_thread_pool(n)?;
            pool.install(|| {
                par_interior_rows::<T, C, _>(interior, row_stride, col_range, radius, &f)
            });
        }
    }

    Ok(())
}

fn par_interior_rows<T, const C: usize, F>(
    interior: &mut [T],
    row_stride: usize,
    col_range: std::ops::Range<usize>,
    radius: usize,
    f: &F,
) where
    T: Send,
    F: Fn(usize, usize, &mut [T]) + Send + Sync,
{
    interior
        .par_chunks_exact_mut(row_stride)
        .enumerate()
        .for_each(|(r, dst_row)| {
            dst_row[col_range.clone()]
                .par_chunks_exact_mut(C)
                .enumerate()
                .for_each(|(c, dst_pixel)| f(r + radius, c + radius, dst_pixel));
        });
}
