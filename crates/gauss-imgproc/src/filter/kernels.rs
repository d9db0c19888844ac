use crate::error::FilterError;

/// A square convolution kernel with an odd size.
///
/// The weights are stored row-major in a flat buffer. The kernel is immutable once
/// built, so a single instance can be shared by reference across worker threads.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel2d {
    size: usize,
    data: Vec<f32>,
}

impl Kernel2d {
    /// Create a kernel from its row-major weights.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of rows and columns of the kernel. Must be odd.
    /// * `data` - The `size * size` weights.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidKernelSize`] for an even or zero size and
    /// [`FilterError::InvalidKernelShape`] if the number of weights does not match.
    pub fn new(size: usize, data: Vec<f32>) -> Result<Self, FilterError> {
        if size == 0 || size % 2 == 0 {
            return Err(FilterError::InvalidKernelSize(size));
        }
        if size.checked_mul(size) != Some(data.len()) {
            return Err(FilterError::InvalidKernelShape(data.len(), size));
        }
        Ok(Self { size, data })
    }

    /// The number of rows (and columns) of the kernel.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The distance from the center cell to the kernel edge, `size / 2`.
    ///
    /// This is also the width of the image border a full convolution cannot reach.
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Get the weight at the given row and column.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.data.get(row * self.size + col).copied()
    }

    /// The weights as a flat row-major slice.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The sum of all the weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

/// Check the gaussian parameters and return the number of weights of the 2D kernel.
fn validate_gaussian(kernel_size: usize, sigma: f32) -> Result<usize, FilterError> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(FilterError::InvalidKernelSize(kernel_size));
    }
    // 2σ² must stay a positive finite divisor in f32
    let denom = 2.0 * sigma * sigma;
    if !sigma.is_finite() || sigma <= 0.0 || !denom.is_normal() {
        return Err(FilterError::InvalidSigma(sigma));
    }
    kernel_size
        .checked_mul(kernel_size)
        .ok_or(FilterError::InvalidKernelSize(kernel_size))
}

fn alloc_weights(len: usize) -> Result<Vec<f32>, FilterError> {
    let mut kernel = Vec::new();
    kernel
        .try_reserve_exact(len)
        .map_err(|_| FilterError::KernelAllocationFailed(len))?;
    Ok(kernel)
}

/// Create a normalized 1D gaussian kernel.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel. Must be odd.
/// * `sigma` - The sigma of the gaussian kernel. Must be finite and positive.
///
/// # Returns
///
/// A vector of `kernel_size` weights that sum to one.
pub fn gaussian_kernel_1d(kernel_size: usize, sigma: f32) -> Result<Vec<f32>, FilterError> {
    validate_gaussian(kernel_size, sigma)?;

    let mut kernel = alloc_weights(kernel_size)?;

    let mean = (kernel_size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    // compute the kernel
    for i in 0..kernel_size {
        let x = i as f32 - mean;
        kernel.push((-(x * x) / (2.0 * sigma_sq)).exp());
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);
    Ok(kernel)
}

/// Create a normalized 2D gaussian blur kernel.
///
/// Every cell at offset `(dx, dy)` from the center gets `exp(-(dx² + dy²) / (2σ²))`,
/// then all the cells are divided by their sum.
///
/// # Arguments
///
/// * `kernel_size` - The size of the kernel. Must be odd.
/// * `sigma` - The sigma of the gaussian kernel. Must be finite and positive.
///
/// # Returns
///
/// A kernel whose weights sum to one.
///
/// # Errors
///
/// Returns [`FilterError::InvalidSigma`] if `2σ²` is not a normal f32,
/// [`FilterError::InvalidKernelSize`] if the size is even or its square overflows, and
/// [`FilterError::KernelAllocationFailed`] if the weights cannot be allocated.
///
/// # Example
///
/// ```
/// use gauss_imgproc::filter::kernels::gaussian_kernel_2d;
///
/// let kernel = gaussian_kernel_2d(5, 1.5).unwrap();
///
/// assert_eq!(kernel.size(), 5);
/// assert_eq!(kernel.radius(), 2);
/// assert!((kernel.sum() - 1.0).abs() < 1e-5);
/// ```
pub fn gaussian_kernel_2d(kernel_size: usize, sigma: f32) -> Result<Kernel2d, FilterError> {
    let num_weights = validate_gaussian(kernel_size, sigma)?;

    let radius = (kernel_size / 2) as isize;
    let denom = 2.0 * sigma * sigma;

    // compute the kernel
    let mut kernel = alloc_weights(num_weights)?;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let dist_sq = (dx * dx + dy * dy) as f32;
            kernel.push((-dist_sq / denom).exp());
        }
    }

    // normalize the kernel
    let norm = kernel.iter().sum::<f32>();
    kernel.iter_mut().for_each(|k| *k /= norm);

    Kernel2d::new(kernel_size, kernel)
}
