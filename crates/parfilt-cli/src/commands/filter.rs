//! Filter command
//!
//! Decodes an image, runs the selected convolution filter on the chosen
//! backend, and optionally checks the result against the sequential path.

use crate::FilterArgs;
use anyhow::Result;
use parfilt_compute::{DIVERGENCE_TOLERANCE, FilterPipeline};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: FilterArgs, verbose: bool) -> Result<()> {
    trace!(input = %args.input.display(), filter = %args.filter, backend = %args.backend, "filter::run");

    let input = super::load_image(&args.input)?;
    let (width, height, channels) = input.dimensions();

    if verbose {
        println!(
            "Loaded {} ({}x{}, {} channels, {})",
            args.input.display(),
            width,
            height,
            channels,
            super::format_size(input.size_bytes() as u64)
        );
    }

    info!(filter = %args.filter, backend = %args.backend, w = width, h = height, "Applying filter");

    let pipeline = FilterPipeline::new(args.backend)?;
    let run = if args.compare {
        pipeline.run_compared(&input, &args.filter)?
    } else {
        pipeline.run(&input, &args.filter)?
    };

    println!("Applied '{}' on {} backend:", args.filter, args.backend);
    println!("{}", run.timing);

    if let Some(divergence) = run.divergence {
        println!("Sequential reference comparison:");
        println!("{divergence}");
        if divergence.within(DIVERGENCE_TOLERANCE) {
            println!("PASS");
        } else {
            println!(
                "WARNING: accelerated output diverges from the sequential reference (max abs diff {})",
                divergence.max_abs_diff
            );
        }
    }

    super::save_image(&args.output, &run.output)?;

    if verbose {
        println!("Saved {}", args.output.display());
    }

    Ok(())
}
