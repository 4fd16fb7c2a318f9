//! Kernel-level configuration building on the shared `config` crate.
//!
//! Batch operations (fracturing, K-DOP construction from defaults) read their
//! scalars from [`KernelConfig`] so callers can tune tolerances without
//! touching literal constants.

use config::constants::{
    validate_kdop, ConfigError, GlobalConfig, DEFAULT_HULL_VERTEX_LIMIT, DEFAULT_KDOP_AXIS_COUNT,
    DEFAULT_KDOP_GAP, DELAUNAY_EPSILON, ON_PLANE_EPSILON,
};
use serde::{Deserialize, Serialize};

/// Geometry kernel configuration.
///
/// # Examples
/// ```
/// use fracture_kernel::config::KernelConfig;
/// let cfg = KernelConfig::default();
/// assert!(cfg.on_plane_epsilon > 0.0);
/// assert_eq!(cfg.hull_vertex_limit, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KernelConfig {
    /// Plane classification tolerance used by the clippers.
    pub on_plane_epsilon: f64,
    /// Circumsphere containment tolerance used by triangulation.
    pub delaunay_epsilon: f64,
    /// Hull vertex limit; zero builds the exact hull.
    pub hull_vertex_limit: usize,
    /// Number of K-DOP half-spaces (6, 14, 18 or 26).
    pub kdop_axis_count: usize,
    /// K-DOP gap as a fraction of the source bounding diagonal.
    pub kdop_gap_fraction: f64,
}

impl KernelConfig {
    /// Creates a configuration from explicit tolerances, keeping the other
    /// defaults.
    ///
    /// # Examples
    /// ```
    /// use fracture_kernel::config::KernelConfig;
    /// let cfg = KernelConfig::new(1.0e-8, 1.0e-5).unwrap();
    /// assert_eq!(cfg.delaunay_epsilon, 1.0e-5);
    /// ```
    pub fn new(on_plane_epsilon: f64, delaunay_epsilon: f64) -> Result<Self, ConfigError> {
        GlobalConfig::new(on_plane_epsilon, delaunay_epsilon).map(|cfg| Self {
            on_plane_epsilon: cfg.on_plane_epsilon,
            delaunay_epsilon: cfg.delaunay_epsilon,
            ..Self::default()
        })
    }

    /// Sets the hull vertex limit.
    pub fn with_hull_vertex_limit(mut self, limit: usize) -> Self {
        self.hull_vertex_limit = limit;
        self
    }

    /// Sets the K-DOP half-space count and gap, validating both.
    ///
    /// # Examples
    /// ```
    /// use fracture_kernel::config::KernelConfig;
    /// assert!(KernelConfig::default().with_kdop(14, 0.02).is_ok());
    /// assert!(KernelConfig::default().with_kdop(10, 0.02).is_err());
    /// ```
    pub fn with_kdop(mut self, axis_count: usize, gap_fraction: f64) -> Result<Self, ConfigError> {
        validate_kdop(axis_count, gap_fraction)?;
        self.kdop_axis_count = axis_count;
        self.kdop_gap_fraction = gap_fraction;
        Ok(self)
    }
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            on_plane_epsilon: ON_PLANE_EPSILON,
            delaunay_epsilon: DELAUNAY_EPSILON,
            hull_vertex_limit: DEFAULT_HULL_VERTEX_LIMIT,
            kdop_axis_count: DEFAULT_KDOP_AXIS_COUNT,
            kdop_gap_fraction: DEFAULT_KDOP_GAP,
        }
    }
}
