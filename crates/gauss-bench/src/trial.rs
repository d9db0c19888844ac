use std::path::PathBuf;
use std::time::{Duration, Instant};

use gauss_image::Image;
use gauss_imgproc::filter::{
    convolve_interior, fill_border, kernels::gaussian_kernel_2d, kernels::Kernel2d, BorderMode,
};
use gauss_imgproc::parallel::{build_thread_pool, ExecutionStrategy};
use gauss_io::{read_image_any, write_image_any, DynamicRaster};

use crate::error::BenchError;

/// Default thread counts, one trial each.
pub const DEFAULT_NUM_THREADS: [usize; 4] = [1, 2, 4, 8];

/// Configuration of a benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialConfig {
    /// Path of the image to blur.
    pub input: PathBuf,
    /// Path of the blurred image, written once after the last trial.
    pub output: PathBuf,
    /// Size of the square gaussian kernel, must be odd.
    pub kernel_size: usize,
    /// Sigma of the gaussian kernel.
    pub sigma: f32,
    /// Number of worker threads of each trial, in execution order.
    pub num_threads: Vec<usize>,
    /// How the border the kernel cannot reach is filled.
    pub border: BorderMode,
    /// JPEG quality of the output, from 0 to 100.
    pub quality: u8,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.jpg"),
            output: PathBuf::from("output.jpg"),
            kernel_size: 5,
            sigma: 1.5,
            num_threads: DEFAULT_NUM_THREADS.to_vec(),
            border: BorderMode::CopySource,
            quality: 100,
        }
    }
}

/// Timing of a single trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialResult {
    /// Number of worker threads used.
    pub num_threads: usize,
    /// Wall time spent in the convolution.
    pub elapsed: Duration,
}

/// Outcome of all the trials of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkReport {
    /// One entry per trial, in execution order.
    pub trials: Vec<TrialResult>,
    /// Whether every trial produced the same bytes as the first one.
    pub consistent: bool,
}

impl BenchmarkReport {
    /// The trial with the shortest wall time.
    pub fn fastest(&self) -> Option<&TrialResult> {
        self.trials.iter().min_by_key(|t| t.elapsed)
    }

    /// Speedup of every trial relative to the first one.
    pub fn speedups(&self) -> Vec<(usize, f64)> {
        let Some(baseline) = self.trials.first() else {
            return Vec::new();
        };
        let base = baseline.elapsed.as_secs_f64();
        self.trials
            .iter()
            .map(|t| {
                let secs = t.elapsed.as_secs_f64();
                let speedup = if secs > 0.0 { base / secs } else { f64::INFINITY };
                (t.num_threads, speedup)
            })
            .collect()
    }
}

/// Blur `src` once per configured thread count and time each convolution.
///
/// A single destination buffer is allocated and reused by every trial. Before each trial
/// the border is filled according to `config.border`; only the convolution itself is
/// timed. The thread pool of each trial is built before the clock starts.
///
/// # Returns
///
/// The destination of the last trial and the report of all trials.
pub fn run_trials<const C: usize>(
    src: &Image<u8, C>,
    kernel: &Kernel2d,
    config: &TrialConfig,
) -> Result<(Image<u8, C>, BenchmarkReport), BenchError> {
    if config.num_threads.is_empty() {
        return Err(BenchError::NoTrials);
    }

    let mut dst = Image::<u8, C>::from_size_val(src.size(), 0)?;
    let mut first: Option<Image<u8, C>> = None;
    let mut consistent = true;
    let mut trials = Vec::with_capacity(config.num_threads.len());

    for &num_threads in config.num_threads.iter() {
        let pool = build_thread_pool(num_threads)?;

        if !config.border.needs_filtered_interior() {
            fill_border(src, &mut dst, kernel.radius(), config.border)?;
        }

        let elapsed = pool.install(|| {
            let now = Instant::now();
            convolve_interior(src, &mut dst, kernel, ExecutionStrategy::ParallelElements)
                .map(|_| now.elapsed())
        })?;

        if config.border.needs_filtered_interior() {
            fill_border(src, &mut dst, kernel.radius(), config.border)?;
        }

        log::debug!("threads: {}, elapsed: {:?}", num_threads, elapsed);
        trials.push(TrialResult {
            num_threads,
            elapsed,
        });

        match &first {
            None => first = Some(dst.clone()),
            Some(reference) if *reference != dst => {
                log::warn!("output with {} threads differs from the first trial", num_threads);
                consistent = false;
            }
            Some(_) => {}
        }
    }

    Ok((dst, BenchmarkReport { trials, consistent }))
}

/// Decode the input, run every trial and encode the result of the last one.
///
/// Nothing is computed if the input cannot be decoded, and nothing is written if a trial
/// fails.
pub fn run(config: &TrialConfig) -> Result<BenchmarkReport, BenchError> {
    let raster = read_image_any(&config.input)?;
    log::info!(
        "loaded {:?}: {} with {} channels",
        config.input,
        raster.size(),
        raster.num_channels()
    );

    let kernel = gaussian_kernel_2d(config.kernel_size, config.sigma)?;

    let (output, report) = match &raster {
        DynamicRaster::Mono8(img) => {
            let (dst, report) = run_trials(img, &kernel, config)?;
            (DynamicRaster::from(dst), report)
        }
        DynamicRaster::MonoAlpha8(img) => {
            let (dst, report) = run_trials(img, &kernel, config)?;
            (DynamicRaster::from(dst), report)
        }
        DynamicRaster::Rgb8(img) => {
            let (dst, report) = run_trials(img, &kernel, config)?;
            (DynamicRaster::from(dst), report)
        }
        DynamicRaster::Rgba8(img) => {
            let (dst, report) = run_trials(img, &kernel, config)?;
            (DynamicRaster::from(dst), report)
        }
    };

    write_image_any(&config.output, &output, config.quality)?;
    log::info!("saved {:?}", config.output);

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(num_threads: usize, millis: u64) -> TrialResult {
        TrialResult {
            num_threads,
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn test_report_speedups() {
        let report = BenchmarkReport {
            trials: vec![trial(1, 400), trial(2, 200), trial(4, 100)],
            consistent: true,
        };
        assert_eq!(report.speedups(), vec![(1, 1.0), (2, 2.0), (4, 4.0)]);
        assert_eq!(report.fastest().map(|t| t.num_threads), Some(4));
    }

    #[test]
    fn test_report_empty() {
        let report = BenchmarkReport {
            trials: vec![],
            consistent: true,
        };
        assert!(report.speedups().is_empty());
        assert!(report.fastest().is_none());
    }

    #[test]
    fn test_default_config() {
        let config = TrialConfig::default();
        assert_eq!(config.kernel_size, 5);
        assert_eq!(config.sigma, 1.5);
        assert_eq!(config.num_threads, vec![1, 2, 4, 8]);
        assert_eq!(config.border, BorderMode::CopySource);
    }
}
