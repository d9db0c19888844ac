use gauss_image::Image;

use super::{convolve_interior, fill_border, kernels, BorderMode};
use crate::error::FilterError;
use crate::parallel::ExecutionStrategy;

/// Blur an image using a gaussian blur filter
///
/// The kernel is built with [`kernels::gaussian_kernel_2d`] and applied as a full 2D
/// convolution on the image interior, then the border is filled with `border`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the square kernel. Must be odd.
/// * `sigma` - The sigma of the gaussian kernel.
/// * `border` - How the pixels closer than `kernel_size / 2` to an edge are filled.
/// * `strategy` - How the work is distributed over threads.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn gaussian_blur<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel_size: usize,
    sigma: f32,
    border: BorderMode,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    let kernel = kernels::gaussian_kernel_2d(kernel_size, sigma)?;
    blur_with_border(src, dst, &kernel, border, strategy)
}

/// Convolve the interior with `kernel` and fill the border with `border`.
///
/// Border modes that read the filtered result run after the convolution, the others
/// before it.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn blur_with_border<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel: &kernels::Kernel2d,
    border: BorderMode,
    strategy: ExecutionStrategy,
) -> Result<(), FilterError> {
    if !border.needs_filtered_interior() {
        fill_border(src, dst, kernel.radius(), border)?;
    }

    convolve_interior(src, dst, kernel, strategy)?;

    if border.needs_filtered_interior() {
        fill_border(src, dst, kernel.radius(), border)?;
    }

    Ok(())
}
