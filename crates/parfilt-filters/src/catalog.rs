//! Filter name catalog.
//!
//! Maps the three recognized filter names onto their fixed kernels. Pure
//! lookup: resolving allocates a fresh [`Kernel`] and nothing else.

use std::fmt;
use std::str::FromStr;

use crate::error::{FilterError, FilterResult};
use crate::kernel::Kernel;

/// The recognized filter identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// 3x3 normalized averaging blur.
    Blur,
    /// Identity-plus-negative-Laplacian contrast amplification.
    Sharpen,
    /// Zero-sum Laplacian difference signal.
    Edge,
}

impl FilterKind {
    /// Every catalog entry, in presentation order.
    pub const ALL: [FilterKind; 3] = [FilterKind::Blur, FilterKind::Sharpen, FilterKind::Edge];

    /// The names accepted by [`resolve`], aligned with [`FilterKind::ALL`].
    pub const NAMES: [&'static str; 3] = ["blur", "sharpen", "edge"];

    /// Returns the canonical name for this filter.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Blur => "blur",
            FilterKind::Sharpen => "sharpen",
            FilterKind::Edge => "edge",
        }
    }

    /// Builds the kernel for this filter.
    pub fn kernel(&self) -> Kernel {
        match self {
            FilterKind::Blur => Kernel::box_blur(),
            FilterKind::Sharpen => Kernel::sharpen(),
            FilterKind::Edge => Kernel::edge_detect(),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> FilterResult<Self> {
        match s {
            "blur" => Ok(FilterKind::Blur),
            "sharpen" => Ok(FilterKind::Sharpen),
            "edge" => Ok(FilterKind::Edge),
            other => Err(FilterError::unknown_filter(other, &FilterKind::NAMES)),
        }
    }
}

/// Resolves a filter name to its kernel.
///
/// # Errors
///
/// Returns [`FilterError::UnknownFilter`] for any name outside the
/// catalog; nothing is processed in that case.
///
/// # Example
///
/// ```rust
/// use parfilt_filters::catalog::resolve;
///
/// let kernel = resolve("blur").unwrap();
/// assert_eq!(kernel.size, 3);
/// assert!(resolve("gaussian_unknown").is_err());
/// ```
pub fn resolve(name: &str) -> FilterResult<Kernel> {
    name.parse::<FilterKind>().map(|kind| kind.kernel())
}
