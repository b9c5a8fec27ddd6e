//! Backends command
//!
//! Lists compute backends with availability markers.

use anyhow::Result;
use parfilt_compute::{describe_backends, detect_backends, select_best_backend};

pub fn run(verbose: bool) -> Result<()> {
    print!("{}", describe_backends());
    println!("Selected by priority: {}", select_best_backend());

    if verbose {
        for info in detect_backends() {
            println!(
                "  {}: priority {}, available {}",
                info.name, info.priority, info.available
            );
        }
    }

    Ok(())
}
