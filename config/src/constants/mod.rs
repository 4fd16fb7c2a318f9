//! Centralized configuration values shared across the fracture kernel.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Tolerance for the Bowyer–Watson circumcircle/circumsphere test.
///
/// A point is inside a circumsphere when `distance² − radius² <= DELAUNAY_EPSILON`.
///
/// # Examples
/// ```
/// use config::constants::DELAUNAY_EPSILON;
/// let (distance_sq, radius_sq) = (1.00005, 1.0);
/// assert!(distance_sq - radius_sq <= DELAUNAY_EPSILON);
/// ```
pub const DELAUNAY_EPSILON: f64 = 1.0e-4;

/// Signed distance below which a vertex is classified as lying on a plane.
///
/// # Examples
/// ```
/// use config::constants::ON_PLANE_EPSILON;
/// assert!(1.0e-12_f64.abs() <= ON_PLANE_EPSILON);
/// ```
pub const ON_PLANE_EPSILON: f64 = 1.0e-10;

/// Guard for near-zero determinants, volumes and distance differences.
///
/// # Examples
/// ```
/// use config::constants::DEGENERATE_EPSILON;
/// let determinant = 0.0_f64;
/// assert!(determinant.abs() < DEGENERATE_EPSILON);
/// ```
pub const DEGENERATE_EPSILON: f64 = 1.0e-15;

/// Distance under which two coordinates are welded into one vertex.
///
/// # Examples
/// ```
/// use config::constants::VERTEX_MERGE_EPSILON;
/// let (a, b) = ([0.0_f64, 0.0, 0.0], [1.0e-9_f64, 0.0, 0.0]);
/// let d = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt();
/// assert!(d < VERTEX_MERGE_EPSILON);
/// ```
pub const VERTEX_MERGE_EPSILON: f64 = 1.0e-8;

/// Tolerance on both normal components and offset when deciding that two
/// planes coincide.
///
/// # Examples
/// ```
/// use config::constants::PLANE_COINCIDENCE_EPSILON;
/// assert!(PLANE_COINCIDENCE_EPSILON < 1.0e-3);
/// ```
pub const PLANE_COINCIDENCE_EPSILON: f64 = 1.0e-6;

/// Distance a point may lie outside a hull face and still be contained.
///
/// # Examples
/// ```
/// use config::constants::HULL_CONTAINS_EPSILON;
/// assert!(HULL_CONTAINS_EPSILON > 0.0);
/// ```
pub const HULL_CONTAINS_EPSILON: f64 = 1.0e-8;

/// Distance a point must lie above a hull face to count as seeing it, as a
/// fraction of the point cloud's bounding-box diagonal.
///
/// # Examples
/// ```
/// use config::constants::HULL_VISIBILITY_EPSILON;
/// let tolerance = HULL_VISIBILITY_EPSILON * 2.0e-3;
/// assert!(tolerance < 1.0e-12);
/// ```
pub const HULL_VISIBILITY_EPSILON: f64 = 1.0e-10;

// =============================================================================
// ALGORITHM DEFAULTS
// =============================================================================

/// Size of the Delaunay super triangle/tetrahedron relative to the input
/// bounding-box extent.
///
/// # Examples
/// ```
/// use config::constants::SUPER_SIMPLEX_SCALE;
/// assert!(SUPER_SIMPLEX_SCALE >= 10.0);
/// ```
pub const SUPER_SIMPLEX_SCALE: f64 = 20.0;

/// Default hull vertex limit. Zero builds the exact hull.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_HULL_VERTEX_LIMIT;
/// assert_eq!(DEFAULT_HULL_VERTEX_LIMIT, 0);
/// ```
pub const DEFAULT_HULL_VERTEX_LIMIT: usize = 0;

/// Default number of K-DOP half-spaces (13 axes, two slabs each).
///
/// # Examples
/// ```
/// use config::constants::{DEFAULT_KDOP_AXIS_COUNT, KDOP_AXIS_COUNTS};
/// assert!(KDOP_AXIS_COUNTS.contains(&DEFAULT_KDOP_AXIS_COUNT));
/// ```
pub const DEFAULT_KDOP_AXIS_COUNT: usize = 26;

/// Supported K-DOP half-space counts.
pub const KDOP_AXIS_COUNTS: [usize; 4] = [6, 14, 18, 26];

/// Default K-DOP gap as a fraction of the source bounding diagonal.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_KDOP_GAP;
/// assert!(DEFAULT_KDOP_GAP > 0.0 && DEFAULT_KDOP_GAP < 1.0);
/// ```
pub const DEFAULT_KDOP_GAP: f64 = 0.01;

/// Immutable snapshot of the kernel tolerances that can be shared between
/// crates.
///
/// # Examples
/// ```
/// use config::constants::GlobalConfig;
/// let config = GlobalConfig::default();
/// assert!(config.on_plane_epsilon > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalConfig {
    /// Plane classification tolerance forwarded to the clippers.
    pub on_plane_epsilon: f64,
    /// Circumsphere containment tolerance forwarded to triangulation.
    pub delaunay_epsilon: f64,
}

impl GlobalConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerances.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GlobalConfig;
    /// let cfg = GlobalConfig::new(1.0e-9, 1.0e-5).expect("valid config");
    /// assert_eq!(cfg.delaunay_epsilon, 1.0e-5);
    /// ```
    pub fn new(on_plane_epsilon: f64, delaunay_epsilon: f64) -> Result<Self, ConfigError> {
        if on_plane_epsilon.is_nan() || on_plane_epsilon <= 0.0 {
            return Err(ConfigError::InvalidTolerance(on_plane_epsilon));
        }
        if delaunay_epsilon.is_nan() || delaunay_epsilon <= 0.0 {
            return Err(ConfigError::InvalidTolerance(delaunay_epsilon));
        }
        Ok(Self {
            on_plane_epsilon,
            delaunay_epsilon,
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            on_plane_epsilon: ON_PLANE_EPSILON,
            delaunay_epsilon: DELAUNAY_EPSILON,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when a tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when a K-DOP half-space count is not one of [`KDOP_AXIS_COUNTS`].
    InvalidAxisCount(usize),
    /// Raised when the K-DOP gap fraction is negative or not finite.
    InvalidGap(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidAxisCount(value) => {
                write!(f, "k-dop axis count must be one of {KDOP_AXIS_COUNTS:?}: {value}")
            }
            ConfigError::InvalidGap(value) => {
                write!(f, "k-dop gap must be finite and >= 0: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validates a K-DOP half-space count and gap fraction.
///
/// # Examples
/// ```
/// use config::constants::validate_kdop;
/// assert!(validate_kdop(14, 0.05).is_ok());
/// assert!(validate_kdop(7, 0.05).is_err());
/// ```
pub fn validate_kdop(axis_count: usize, gap_fraction: f64) -> Result<(), ConfigError> {
    if !KDOP_AXIS_COUNTS.contains(&axis_count) {
        return Err(ConfigError::InvalidAxisCount(axis_count));
    }
    if !gap_fraction.is_finite() || gap_fraction < 0.0 {
        return Err(ConfigError::InvalidGap(gap_fraction));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
