//! Tests for the centralized configuration constants.

use super::*;

/// Ensures default constants are sane and positive.
#[test]
fn default_constants_are_valid() {
    let cfg = GlobalConfig::default();
    assert!(cfg.on_plane_epsilon > 0.0);
    assert!(cfg.delaunay_epsilon > 0.0);
}

/// Validates the builder rejects invalid values.
#[test]
fn new_validates_inputs() {
    assert_eq!(
        GlobalConfig::new(0.0, 1.0e-4).unwrap_err(),
        ConfigError::InvalidTolerance(0.0)
    );
    assert_eq!(
        GlobalConfig::new(1.0e-9, -1.0).unwrap_err(),
        ConfigError::InvalidTolerance(-1.0)
    );
    assert!(GlobalConfig::new(f64::NAN, 1.0e-4).is_err());
}

#[test]
fn kdop_validation() {
    for count in KDOP_AXIS_COUNTS {
        assert!(validate_kdop(count, 0.0).is_ok());
    }
    assert_eq!(
        validate_kdop(8, 0.1).unwrap_err(),
        ConfigError::InvalidAxisCount(8)
    );
    assert_eq!(
        validate_kdop(6, -0.5).unwrap_err(),
        ConfigError::InvalidGap(-0.5)
    );
}

#[test]
fn error_display_mentions_value() {
    let err = ConfigError::InvalidAxisCount(9);
    assert!(err.to_string().contains('9'));
}
