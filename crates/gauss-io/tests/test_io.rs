use gauss_image::{Image, ImageSize};
use gauss_io::{read_image_any, write_image_any, DynamicRaster, IoError};

fn gradient_rgba(size: ImageSize) -> Result<Image<u8, 4>, IoError> {
    let mut data = Vec::with_capacity(size.width * size.height * 4);
    for row in 0..size.height {
        for col in 0..size.width {
            data.extend_from_slice(&[(col * 8) as u8, (row * 8) as u8, 128, (row + col) as u8]);
        }
    }
    Ok(Image::new(size, data)?)
}

#[test]
fn test_read_missing_file() {
    let res = read_image_any("/definitely/not/here.jpg");
    assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
}

#[test]
fn test_read_corrupt_file() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("garbage.jpg");
    std::fs::write(&file_path, b"this is not an image")?;

    let res = read_image_any(&file_path);
    assert!(res.is_err(), "decoding garbage should fail");
    Ok(())
}

#[test]
fn test_write_any_invalid_extension() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("output.bmpx");
    let image = DynamicRaster::from(Image::<u8, 3>::from_size_val([4, 4].into(), 0)?);

    let res = write_image_any(&file_path, &image, 90);
    assert!(matches!(res, Err(IoError::InvalidFileExtension(_))));
    assert!(!file_path.exists());
    Ok(())
}

#[test]
fn test_png_rgba_round_trip() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("rgba.PNG");

    let image = gradient_rgba(ImageSize {
        width: 12,
        height: 9,
    })?;
    let raster = DynamicRaster::from(image);
    write_image_any(&file_path, &raster, 0)?;

    let raster_back = read_image_any(&file_path)?;
    assert_eq!(raster_back.num_channels(), 4);
    assert_eq!(raster_back, raster);
    Ok(())
}

#[test]
fn test_jpeg_rgb_round_trip() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;
    let file_path = tmp_dir.path().join("output.jpg");

    let size = ImageSize {
        width: 24,
        height: 16,
    };
    let image = Image::<u8, 3>::from_size_val(size, 100)?;
    write_image_any(&file_path, &DynamicRaster::Rgb8(image), 100)?;

    let raster_back = read_image_any(&file_path)?;
    assert_eq!(raster_back.size(), size);
    assert_eq!(raster_back.num_channels(), 3);
    // lossy codec, a flat field survives within a few levels
    assert!(raster_back
        .as_slice()
        .iter()
        .all(|&v| (v as i32 - 100).abs() <= 3));
    Ok(())
}

#[test]
fn test_jpeg_drops_alpha() -> Result<(), IoError> {
    let tmp_dir = tempfile::tempdir()?;

    let size = ImageSize {
        width: 16,
        height: 16,
    };

    let rgba = gradient_rgba(size)?;
    let rgba_path = tmp_dir.path().join("rgba.jpeg");
    write_image_any(&rgba_path, &DynamicRaster::Rgba8(rgba), 95)?;
    let back = read_image_any(&rgba_path)?;
    assert_eq!(back.num_channels(), 3);
    assert_eq!(back.size(), size);

    let la = Image::<u8, 2>::from_size_val(size, 60)?;
    let la_path = tmp_dir.path().join("la.jpg");
    write_image_any(&la_path, &DynamicRaster::MonoAlpha8(la), 95)?;
    let back = read_image_any(&la_path)?;
    assert_eq!(back.num_channels(), 1);
    assert_eq!(back.size(), size);

    Ok(())
}
