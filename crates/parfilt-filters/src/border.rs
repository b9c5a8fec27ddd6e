//! Replicate-border sampling policy.
//!
//! Out-of-bounds neighborhood reads are substituted with the nearest
//! in-bounds sample by clamping each coordinate to its axis. This is the
//! single border policy of the whole system: the sequential engine and the
//! CPU dispatch backend call [`clamp_coord`] directly, and the GPU shader
//! carries the same clamp expression in WGSL. Changing the policy here
//! without changing the shader will trip the cross-path equality tests.

/// Clamps a (possibly negative) sample coordinate to `[0, len - 1]`.
///
/// `len` is the axis length in pixels and must be non-zero, which every
/// validated buffer guarantees.
///
/// # Example
///
/// ```rust
/// use parfilt_filters::border::clamp_coord;
///
/// assert_eq!(clamp_coord(-2, 10), 0);
/// assert_eq!(clamp_coord(4, 10), 4);
/// assert_eq!(clamp_coord(12, 10), 9);
/// ```
#[inline]
pub fn clamp_coord(coord: i64, len: u32) -> u32 {
    coord.clamp(0, len as i64 - 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_in_range_is_identity() {
        for v in 0..8 {
            assert_eq!(clamp_coord(v, 8), v as u32);
        }
    }

    #[test]
    fn test_clamp_negative_replicates_first() {
        assert_eq!(clamp_coord(-1, 8), 0);
        assert_eq!(clamp_coord(-100, 8), 0);
    }

    #[test]
    fn test_clamp_overflow_replicates_last() {
        assert_eq!(clamp_coord(8, 8), 7);
        assert_eq!(clamp_coord(1000, 8), 7);
    }

    #[test]
    fn test_single_pixel_axis() {
        // every coordinate collapses onto the only sample
        assert_eq!(clamp_coord(-3, 1), 0);
        assert_eq!(clamp_coord(0, 1), 0);
        assert_eq!(clamp_coord(3, 1), 0);
    }
}
