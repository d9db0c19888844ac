use std::str::FromStr;

use gauss_image::{Image, ImageError};

use crate::error::FilterError;

/// How the border left by [`super::convolve_interior`] is filled.
///
/// The border is the frame of `radius` pixels along each edge where the kernel does not
/// fit inside the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Leave the border as it is in the destination.
    #[default]
    Untouched,

    /// Fill every border sample with a single value.
    ///
    /// Example: ...d c b | 0 0 0
    Constant(u8),

    /// Copy the unfiltered source pixels into the border.
    ///
    /// Example: ...d' c' b' | a b c
    CopySource,

    /// Repeat the outermost filtered pixel of the destination into the border.
    ///
    /// Example: ...d' c' b' | b' b' b'
    ///
    /// Must be applied after the interior has been filtered.
    Replicate,
}

impl BorderMode {
    /// Whether the mode reads the filtered interior, so it must run after the convolution.
    pub fn needs_filtered_interior(&self) -> bool {
        matches!(self, BorderMode::Replicate)
    }
}

impl FromStr for BorderMode {
    type Err = FilterError;

    /// Parse `untouched`, `copy`, `replicate` or `constant:<value>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "untouched" | "none" => Ok(BorderMode::Untouched),
            "copy" => Ok(BorderMode::CopySource),
            "replicate" => Ok(BorderMode::Replicate),
            other => other
                .strip_prefix("constant:")
                .and_then(|v| v.trim().parse::<u8>().ok())
                .map(BorderMode::Constant)
                .ok_or_else(|| FilterError::InvalidBorderMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for BorderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BorderMode::Untouched => write!(f, "untouched"),
            BorderMode::Constant(v) => write!(f, "constant:{v}"),
            BorderMode::CopySource => write!(f, "copy"),
            BorderMode::Replicate => write!(f, "replicate"),
        }
    }
}

/// Fill the border frame of `dst` according to `mode`.
///
/// Only the pixels closer than `radius` to an edge are written. If the image has no
/// interior at all, [`BorderMode::Replicate`] falls back to copying the source.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `radius` - The width of the border frame in pixels.
/// * `mode` - The fill policy.
///
/// PRECONDITION: `src` and `dst` must have the same shape.
pub fn fill_border<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    radius: usize,
    mode: BorderMode,
) -> Result<(), FilterError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    if mode == BorderMode::Untouched || radius == 0 {
        return Ok(());
    }

    let (rows, cols) = (dst.rows(), dst.cols());
    let has_interior = rows > 2 * radius && cols > 2 * radius;
    let mode = match mode {
        BorderMode::Replicate if !has_interior => BorderMode::CopySource,
        m => m,
    };

    let src_data = src.as_slice();
    let dst_data = dst.as_slice_mut();

    for row in 0..rows {
        let border_row = row < radius || row >= rows.saturating_sub(radius);
        let left = radius.min(cols);
        let right = cols.saturating_sub(radius).max(left);

        let (head, tail) = if border_row {
            (0..cols, 0..0)
        } else {
            (0..left, right..cols)
        };

        for col in head.chain(tail) {
            let offset = (row * cols + col) * C;
            match mode {
                BorderMode::Constant(v) => dst_data[offset..offset + C].fill(v),
                BorderMode::CopySource => {
                    dst_data[offset..offset + C].copy_from_slice(&src_data[offset..offset + C])
                }
                BorderMode::Replicate => {
                    let r = row.clamp(radius, rows - radius - 1);
                    let c = col.clamp(radius, cols - radius - 1);
                    let nearest = (r * cols + c) * C;
                    dst_data.copy_within(nearest..nearest + C, offset);
                }
                BorderMode::Untouched => {}
            }
        }
    }

    Ok(())
}
