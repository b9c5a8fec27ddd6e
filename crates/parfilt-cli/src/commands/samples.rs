//! Samples command
//!
//! Writes the procedural test images as PNGs.

use crate::SamplesArgs;
use anyhow::{Context, Result};
use parfilt_core::pattern::{self, Orientation};
#[allow(unused_imports)]
use tracing::{debug, info, trace};

pub fn run(args: SamplesArgs, verbose: bool) -> Result<()> {
    trace!(dir = %args.dir.display(), w = args.width, h = args.height, seed = args.seed, "samples::run");

    std::fs::create_dir_all(&args.dir)
        .with_context(|| format!("Failed to create directory: {}", args.dir.display()))?;

    let (w, h, seed) = (args.width, args.height, args.seed);
    let images = [
        (
            "gradient.png",
            pattern::gradient(w, h, 3, &[10, 10, 30], &[240, 240, 255], Orientation::Vertical)?,
        ),
        ("checker.png", pattern::checker(w, h, 3, 16, &[235, 235, 235], &[20, 20, 20])?),
        ("noise.png", pattern::noise(w, h, 3, seed)?),
        ("scene.png", pattern::scene(w, h, 3, seed)?),
    ];

    for (name, buffer) in &images {
        let path = args.dir.join(*name);
        super::save_image(&path, buffer)?;
        if verbose {
            println!("Wrote {}", path.display());
        }
    }

    println!("Generated {} sample images in {}", images.len(), args.dir.display());
    Ok(())
}
