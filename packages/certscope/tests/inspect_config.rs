//! Configuration loading and validation

use certscope::{DecoderLimits, InspectConfig};
use certscope_common::ErrorKind;
use chrono::Duration;

#[test]
fn test_defaults() {
    let config = InspectConfig::default();
    assert_eq!(config.max_input_len, 64 * 1024);
    assert_eq!(config.max_depth, 32);
    assert_eq!(config.expiring_window_days, 30);
    assert_eq!(config.decoder_limits(), DecoderLimits::default());
    assert_eq!(config.expiring_window(), Duration::days(30));
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_takes_defaults() {
    let config = InspectConfig::from_json_str(r#"{"max_depth": 8}"#).unwrap();
    assert_eq!(config.max_depth, 8);
    assert_eq!(config.max_input_len, 64 * 1024);
    assert_eq!(config.expiring_window_days, 30);

    let config = InspectConfig::from_json_str("{}").unwrap();
    assert_eq!(config, InspectConfig::default());
}

#[test]
fn test_zero_limits_rejected() {
    let err = InspectConfig::from_json_str(r#"{"max_input_len": 0}"#).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Configuration);
    assert_eq!(err.get_context(), Some("max_input_len must be non-zero"));

    let config = InspectConfig {
        max_depth: 0,
        ..InspectConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Configuration);
    assert!(err.to_string().contains("max_depth"));
}

#[test]
fn test_malformed_json() {
    let err = InspectConfig::from_json_str(r#"{"max_depth": "deep"}"#).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Configuration);
    assert_eq!(err.get_context(), Some("invalid inspect configuration"));
    assert!(std::error::Error::source(&err).is_some());
}
