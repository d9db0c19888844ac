use std::path::Path;

use gauss_image::{Image, ImageSize};

use crate::error::IoError;
use crate::jpeg::{write_image_jpeg_gray8, write_image_jpeg_rgb8, write_image_jpeg_rgba8};
use crate::png::{
    write_image_png_gray8, write_image_png_gray_alpha8, write_image_png_rgb8,
    write_image_png_rgba8,
};

/// An 8-bit image whose channel count is only known at runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum DynamicRaster {
    /// 8-bit grayscale image
    Mono8(Image<u8, 1>),
    /// 8-bit grayscale image with alpha channel
    MonoAlpha8(Image<u8, 2>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
}

impl DynamicRaster {
    /// The size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            DynamicRaster::Mono8(img) => img.size(),
            DynamicRaster::MonoAlpha8(img) => img.size(),
            DynamicRaster::Rgb8(img) => img.size(),
            DynamicRaster::Rgba8(img) => img.size(),
        }
    }

    /// The number of interleaved channels.
    pub fn num_channels(&self) -> usize {
        match self {
            DynamicRaster::Mono8(_) => 1,
            DynamicRaster::MonoAlpha8(_) => 2,
            DynamicRaster::Rgb8(_) => 3,
            DynamicRaster::Rgba8(_) => 4,
        }
    }

    /// The raw interleaved samples.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            DynamicRaster::Mono8(img) => img.as_slice(),
            DynamicRaster::MonoAlpha8(img) => img.as_slice(),
            DynamicRaster::Rgb8(img) => img.as_slice(),
            DynamicRaster::Rgba8(img) => img.as_slice(),
        }
    }
}

impl From<Image<u8, 1>> for DynamicRaster {
    fn from(img: Image<u8, 1>) -> Self {
        DynamicRaster::Mono8(img)
    }
}

impl From<Image<u8, 2>> for DynamicRaster {
    fn from(img: Image<u8, 2>) -> Self {
        DynamicRaster::MonoAlpha8(img)
    }
}

impl From<Image<u8, 3>> for DynamicRaster {
    fn from(img: Image<u8, 3>) -> Self {
        DynamicRaster::Rgb8(img)
    }
}

impl From<Image<u8, 4>> for DynamicRaster {
    fn from(img: Image<u8, 4>) -> Self {
        DynamicRaster::Rgba8(img)
    }
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate. Images
/// with more than 8 bits per sample are narrowed to 8 bits.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An 8-bit image with one, two, three or four channels.
///
/// # Errors
///
/// Returns [`IoError::FileDoesNotExist`] if the path is missing and
/// [`IoError::ImageDecodeError`] if the content is not a supported image.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<DynamicRaster, IoError> {
    // resolve the file path correctly
    let file_path = file_path.as_ref().to_owned();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    // open the file and map it to memory
    let file = std::fs::File::open(&file_path)?;
    let mmap = unsafe { memmap2::Mmap::map(&file)? };

    // decode the data directly from memory
    let img = image::ImageReader::new(std::io::Cursor::new(&mmap[..]))
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    let color = img.color();
    log::debug!("decoded {:?} as {:?} with size {}", file_path, color, size);

    let image = match (color.has_color(), color.has_alpha()) {
        (false, false) => DynamicRaster::Mono8(Image::new(size, img.into_luma8().into_raw())?),
        (false, true) => {
            DynamicRaster::MonoAlpha8(Image::new(size, img.into_luma_alpha8().into_raw())?)
        }
        (true, false) => DynamicRaster::Rgb8(Image::new(size, img.into_rgb8().into_raw())?),
        (true, true) => DynamicRaster::Rgba8(Image::new(size, img.into_rgba8().into_raw())?),
    };

    Ok(image)
}

/// Writes an image to the given file path.
///
/// The format is chosen from the extension: `jpg`/`jpeg` or `png`. JPEG has no alpha
/// channel, so the alpha of [`DynamicRaster::MonoAlpha8`] and [`DynamicRaster::Rgba8`] is
/// dropped in that format.
///
/// # Arguments
///
/// * `file_path` - The path of the file to create.
/// * `image` - The image to encode.
/// * `quality` - The JPEG quality from 0 to 100, ignored for PNG.
pub fn write_image_any(
    file_path: impl AsRef<Path>,
    image: &DynamicRaster,
    quality: u8,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let extension = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => match image {
            DynamicRaster::Mono8(img) => write_image_jpeg_gray8(file_path, img, quality),
            DynamicRaster::MonoAlpha8(img) => {
                let luma = img.as_slice().iter().step_by(2).copied().collect();
                let luma = Image::<u8, 1>::new(img.size(), luma)?;
                write_image_jpeg_gray8(file_path, &luma, quality)
            }
            DynamicRaster::Rgb8(img) => write_image_jpeg_rgb8(file_path, img, quality),
            DynamicRaster::Rgba8(img) => write_image_jpeg_rgba8(file_path, img, quality),
        },
        Some("png") => match image {
            DynamicRaster::Mono8(img) => write_image_png_gray8(file_path, img),
            DynamicRaster::MonoAlpha8(img) => write_image_png_gray_alpha8(file_path, img),
            DynamicRaster::Rgb8(img) => write_image_png_rgb8(file_path, img),
            DynamicRaster::Rgba8(img) => write_image_png_rgba8(file_path, img),
        },
        _ => Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
    }
}
