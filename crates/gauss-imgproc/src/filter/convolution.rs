use gauss_image::{Image, ImageError};

use super::kernels::Kernel2d;
use crate::error::FilterError;
use crate::parallel::{par_iter_interior, ExecutionStrategy};

/// Number of leading channels that carry color for an image with `channels` channels.
///
/// The remaining channels (alpha) are copied through unfiltered.
///
/// | channels | layout | filtered |
/// |----------|--------|----------|
/// | 1        | L      | 1        |
/// | 2        | LA     | 1        |
/// | 3        | RGB    | 3        |
/// | 4        | RGBA   | 3        |
pub fn color_channels(channels: usize) -> Result<usize, FilterError> {
    match channels {
        1 | 2 => Ok(1),
        3 | 4 => Ok(3),
        _ => Err(FilterError::UnsupportedChannels(channels)),
    }
}

/// Clamp a filter response to the 8-bit range and round it to the nearest sample.
#[inline]
fn saturate_u8(x: f32) -> u8 {
    x.round().clamp(0.0, 255.0) as u8
}

/// Convolve the interior of an 8-bit image with a square kernel.
///
/// For every pixel whose `K x K` neighborhood lies inside the image, each color channel
/// of `dst` receives the weighted sum of the neighborhood in `src`, clamped to `[0, 255]`.
/// Kernel cell `(ky, kx)` weights the source pixel `(row + ky - r, col + kx - r)` with
/// `r = K / 2`. The alpha channel of two and four channel images is copied unchanged.
///
/// Pixels closer than `r` to any edge are never written: `dst` keeps whatever the caller
/// stored there. Use [`super::fill_border`] to give them a defined value.
///
/// The result does not depend on the execution strategy or the number of threads.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The convolution kernel.
/// * `strategy` - How the pixels are distributed over threads.
///
/// # Errors
///
/// Returns an error if the images have different sizes, if `C` is not 1, 2, 3 or 4, or
/// if the thread pool of [`ExecutionStrategy::Fixed`] cannot be built.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn convolve_interior<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel: &Kernel2d,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    let num_color = color_channels(C)?;

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    let radius = kernel.radius();
    if src.rows() <= 2 * radius || src.cols() <= 2 * radius {
        log::debug!(
            "image {} has no interior for a {}x{} kernel",
            src.size(),
            kernel.size(),
            kernel.size()
        );
        return Ok(());
    }

    let src_data = src.as_slice();
    let src_cols = src.cols();
    let ksize = kernel.size();
    let weights = kernel.as_slice();

    par_iter_interior(dst, radius, strategy, |row, col, dst_pixel| {
        for (ch, dst_val) in dst_pixel.iter_mut().enumerate().take(num_color) {
            let mut sum = 0.0f32;
            for (ky, kernel_row) in weights.chunks_exact(ksize).enumerate() {
                let src_row_offset = ((row + ky - radius) * src_cols + col - radius) * C;
                for (kx, &w) in kernel_row.iter().enumerate() {
                    sum += src_data[src_row_offset + kx * C + ch] as f32 * w;
                }
            }
            *dst_val = saturate_u8(sum);
        }

        // alpha passthrough
        let src_offset = (row * src_cols + col) * C;
        dst_pixel[num_color..].copy_from_slice(&src_data[src_offset + num_color..src_offset + C]);
    })?;

    Ok(())
}
