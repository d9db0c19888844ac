use argh::FromArgs;
use std::path::PathBuf;

use gauss_bench::{trial::DEFAULT_NUM_THREADS, TrialConfig};
use gauss_imgproc::filter::BorderMode;

#[derive(FromArgs)]
/// Blur an image with a gaussian kernel and time it with several thread counts
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// path to the output image, jpg or png
    #[argh(option, short = 'o', default = "PathBuf::from(\"output.jpg\")")]
    output: PathBuf,

    /// size of the square kernel, must be odd
    #[argh(option, short = 'k', default = "5")]
    kernel_size: usize,

    /// sigma of the gaussian kernel
    #[argh(option, short = 's', default = "1.5")]
    sigma: f32,

    /// number of threads of a trial, repeat the flag for several trials (default: 1 2 4 8)
    #[argh(option, short = 't')]
    threads: Vec<usize>,

    /// jpeg quality of the output, from 0 to 100
    #[argh(option, short = 'q', default = "100")]
    quality: u8,

    /// border fill: untouched, copy, replicate or constant:<value>
    #[argh(option, short = 'b', default = "BorderMode::CopySource")]
    border: BorderMode,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    let num_threads = if args.threads.is_empty() {
        DEFAULT_NUM_THREADS.to_vec()
    } else {
        args.threads
    };

    let config = TrialConfig {
        input: args.input,
        output: args.output,
        kernel_size: args.kernel_size,
        sigma: args.sigma,
        num_threads,
        border: args.border,
        quality: args.quality,
    };

    let report = gauss_bench::run(&config)?;

    for (trial, (_, speedup)) in report.trials.iter().zip(report.speedups()) {
        println!(
            "threads: {}, elapsed: {:.6} s, speedup: {:.2}x",
            trial.num_threads,
            trial.elapsed.as_secs_f64(),
            speedup
        );
    }

    if !report.consistent {
        log::warn!("the trials did not all produce the same image");
    }

    println!("Blur done. Saved {}", config.output.display());

    Ok(())
}
