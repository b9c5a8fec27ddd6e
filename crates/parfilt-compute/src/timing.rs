//! Wall-clock timing for the staged filter run.
//!
//! Each stage is measured around a call that blocks until the device has
//! finished, so the three numbers add up to the real elapsed time of the
//! accelerated path. Device and pipeline setup happen once at backend
//! construction and are never counted here.

use std::fmt;
use std::time::Duration;

/// Per-stage wall-clock times for one filter run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimingRecord {
    /// Host-to-device transfer of the image and kernel.
    pub upload: Duration,
    /// Kernel execution on the device.
    pub compute: Duration,
    /// Device-to-host transfer of the result.
    pub download: Duration,
    /// Single-threaded reference run, when one was made.
    pub sequential: Option<Duration>,
}

impl TimingRecord {
    /// Total wall time of the accelerated path.
    pub fn accelerated_total(&self) -> Duration {
        self.upload + self.compute + self.download
    }

    /// Sequential time over accelerated total.
    ///
    /// `None` when no reference run was made or the accelerated total is
    /// too small to divide by.
    pub fn speedup(&self) -> Option<f64> {
        let total = self.accelerated_total().as_secs_f64();
        if total <= 0.0 {
            return None;
        }
        self.sequential.map(|s| s.as_secs_f64() / total)
    }
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}

impl fmt::Display for TimingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  upload:     {:>9.3} ms", ms(self.upload))?;
        writeln!(f, "  compute:    {:>9.3} ms", ms(self.compute))?;
        writeln!(f, "  download:   {:>9.3} ms", ms(self.download))?;
        write!(f, "  total:      {:>9.3} ms", ms(self.accelerated_total()))?;
        if let Some(sequential) = self.sequential {
            write!(f, "\n  sequential: {:>9.3} ms", ms(sequential))?;
            if let Some(speedup) = self.speedup() {
                write!(f, " ({speedup:.2}x)")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_accelerated_total_sums_stages() {
        let timing = TimingRecord {
            upload: Duration::from_millis(2),
            compute: Duration::from_millis(5),
            download: Duration::from_millis(3),
            sequential: None,
        };
        assert_eq!(timing.accelerated_total(), Duration::from_millis(10));
    }

    #[test]
    fn test_speedup_ratio() {
        let timing = TimingRecord {
            upload: Duration::from_millis(1),
            compute: Duration::from_millis(2),
            download: Duration::from_millis(1),
            sequential: Some(Duration::from_millis(40)),
        };
        let speedup = timing.speedup().unwrap();
        assert_relative_eq!(speedup, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_speedup_requires_reference_run() {
        let timing = TimingRecord {
            upload: Duration::from_millis(1),
            compute: Duration::from_millis(1),
            download: Duration::from_millis(1),
            sequential: None,
        };
        assert!(timing.speedup().is_none());
    }

    #[test]
    fn test_speedup_undefined_for_zero_total() {
        let timing = TimingRecord {
            sequential: Some(Duration::from_millis(5)),
            ..TimingRecord::default()
        };
        assert!(timing.speedup().is_none());
    }

    #[test]
    fn test_display_reports_each_stage() {
        let timing = TimingRecord {
            upload: Duration::from_micros(1500),
            compute: Duration::from_micros(2500),
            download: Duration::from_micros(1000),
            sequential: Some(Duration::from_millis(50)),
        };
        let text = timing.to_string();
        assert!(text.contains("upload"));
        assert!(text.contains("compute"));
        assert!(text.contains("download"));
        assert!(text.contains("sequential"));
        assert!(text.contains("ms"));
        assert!(text.contains("10.00x"));
    }
}
