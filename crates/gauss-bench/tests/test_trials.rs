use gauss_bench::{run, run_trials, BenchError, TrialConfig};
use gauss_image::{Image, ImageSize};
use gauss_imgproc::filter::{kernels::gaussian_kernel_2d, BorderMode};
use gauss_imgproc::parallel::ParallelError;
use gauss_imgproc::FilterError;
use gauss_io::{read_image_any, write_image_any, DynamicRaster};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn checkerboard(size: ImageSize) -> Result<Image<u8, 3>, gauss_image::ImageError> {
    let mut data = Vec::with_capacity(size.width * size.height * 3);
    for row in 0..size.height {
        for col in 0..size.width {
            let v = if (row / 4 + col / 4) % 2 == 0 { 30 } else { 220 };
            data.extend_from_slice(&[v, 255 - v, v / 2]);
        }
    }
    Image::new(size, data)
}

#[test]
fn test_run_trials_consistent() -> TestResult {
    let src = checkerboard(ImageSize {
        width: 40,
        height: 28,
    })?;
    let kernel = gaussian_kernel_2d(5, 1.5)?;
    let config = TrialConfig {
        num_threads: vec![1, 2, 4, 8],
        ..Default::default()
    };

    let (dst, report) = run_trials(&src, &kernel, &config)?;

    assert!(report.consistent);
    let threads = report
        .trials
        .iter()
        .map(|t| t.num_threads)
        .collect::<Vec<_>>();
    assert_eq!(threads, vec![1, 2, 4, 8]);

    // the border keeps the unfiltered source
    for col in 0..src.width() {
        for ch in 0..3 {
            assert_eq!(dst.get_pixel(col, 0, ch)?, src.get_pixel(col, 0, ch)?);
            assert_eq!(dst.get_pixel(col, 27, ch)?, src.get_pixel(col, 27, ch)?);
        }
    }
    // the interior is smoothed
    assert_ne!(dst, src);

    Ok(())
}

#[test]
fn test_run_trials_errors() -> TestResult {
    let src = checkerboard(ImageSize {
        width: 16,
        height: 16,
    })?;
    let kernel = gaussian_kernel_2d(3, 1.0)?;

    let config = TrialConfig {
        num_threads: vec![],
        ..Default::default()
    };
    assert!(matches!(
        run_trials(&src, &kernel, &config),
        Err(BenchError::NoTrials)
    ));

    let config = TrialConfig {
        num_threads: vec![2, 0],
        ..Default::default()
    };
    assert!(matches!(
        run_trials(&src, &kernel, &config),
        Err(BenchError::Parallel(ParallelError::InvalidThreadCount(0)))
    ));

    Ok(())
}

#[test]
fn test_run_end_to_end() -> TestResult {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.png");
    let output = tmp_dir.path().join("output.png");

    let size = ImageSize {
        width: 33,
        height: 21,
    };
    let src = checkerboard(size)?;
    write_image_any(&input, &DynamicRaster::Rgb8(src.clone()), 100)?;

    let config = TrialConfig {
        input,
        output: output.clone(),
        num_threads: vec![1, 3],
        border: BorderMode::Replicate,
        ..Default::default()
    };
    let report = run(&config)?;

    assert!(report.consistent);
    assert_eq!(report.trials.len(), 2);
    assert_eq!(report.speedups().len(), 2);

    let DynamicRaster::Rgb8(blurred) = read_image_any(&output)? else {
        panic!("expected an rgb8 output");
    };
    assert_eq!(blurred.size(), size);
    // replicated corner equals the nearest interior pixel
    for ch in 0..3 {
        assert_eq!(blurred.get_pixel(0, 0, ch)?, blurred.get_pixel(2, 2, ch)?);
    }

    Ok(())
}

#[test]
fn test_run_rgba_keeps_alpha() -> TestResult {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.png");
    let output = tmp_dir.path().join("output.png");

    let size = ImageSize {
        width: 12,
        height: 10,
    };
    let data = (0..size.width * size.height)
        .flat_map(|i| [200u8, 100, 50, (i % 256) as u8])
        .collect();
    let src = Image::<u8, 4>::new(size, data)?;
    write_image_any(&input, &DynamicRaster::Rgba8(src.clone()), 0)?;

    let config = TrialConfig {
        input,
        output: output.clone(),
        num_threads: vec![2],
        ..Default::default()
    };
    run(&config)?;

    let DynamicRaster::Rgba8(blurred) = read_image_any(&output)? else {
        panic!("expected an rgba8 output");
    };
    // uniform color and untouched alpha everywhere: copied border, blurred flat interior
    assert_eq!(blurred, src);

    Ok(())
}

#[test]
fn test_run_missing_input() {
    let config = TrialConfig {
        input: "/no/such/image.jpg".into(),
        ..Default::default()
    };
    assert!(matches!(run(&config), Err(BenchError::Io(_))));
}

#[test]
fn test_run_invalid_kernel_writes_nothing() -> TestResult {
    let tmp_dir = tempfile::tempdir()?;
    let input = tmp_dir.path().join("input.png");
    let output = tmp_dir.path().join("output.png");

    let src = checkerboard(ImageSize {
        width: 8,
        height: 8,
    })?;
    write_image_any(&input, &DynamicRaster::Rgb8(src), 100)?;

    let config = TrialConfig {
        input,
        output: output.clone(),
        kernel_size: 6,
        ..Default::default()
    };
    assert!(matches!(
        run(&config),
        Err(BenchError::Filter(FilterError::InvalidKernelSize(6)))
    ));
    assert!(!output.exists());

    Ok(())
}
