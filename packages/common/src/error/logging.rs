//! Structured logging setup and helpers
//!
//! Provides `env_logger`-based logging. Library code emits events through
//! `tracing`, whose `log` feature forwards them here when no subscriber is
//! installed. Untrusted input bytes are never written to the log; callers pass
//! them to [`LoggingTransformer::input_fingerprint`] and log the result.

use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging entry point for the certscope crates
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Install the process logger; later calls are no-ops
    ///
    /// Levels come from `RUST_LOG`, e.g. `RUST_LOG=certscope=debug`.
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("certscope logging ready");
        });
    }

    /// Test-harness logger; tolerates an already installed logger
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a binary framing failure for an input blob
    pub fn log_decode_failure(stage: &str, input: &[u8], error: &dyn std::error::Error) {
        warn!(
            "Decode failed: {stage} (input: {}, len: {}): {error}",
            Self::input_fingerprint(input),
            input.len()
        );
    }

    /// Log a recognized extension that could not be parsed and was kept opaque
    pub fn log_extension_fallback(oid: &str, reason: &str) {
        debug!("Extension {oid} kept opaque: {reason}");
    }

    /// Log a non-fatal hierarchy assembly warning
    pub fn log_assembly_warning(node_id: &str, warning: &dyn std::fmt::Display) {
        warn!("CA hierarchy: node {node_id}: {warning}");
    }

    /// Log the outcome of a hierarchy assembly run
    pub fn log_assembly_summary(records: usize, roots: usize, warnings: usize) {
        if warnings == 0 {
            debug!("CA hierarchy assembled: {records} records, {roots} roots");
        } else {
            info!("CA hierarchy assembled: {records} records, {roots} roots, {warnings} warnings");
        }
    }

    /// Short SHA-256 fingerprint of untrusted input, safe to log
    ///
    /// Returns `#` followed by the first 12 hex characters of the digest.
    #[must_use]
    pub fn input_fingerprint(input: &[u8]) -> String {
        let digest = Sha256::digest(input);
        let prefix: String = digest[..6].iter().map(|b| format!("{b:02x}")).collect();
        format!("#{prefix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_fingerprint() {
        LoggingTransformer::init_test();

        let first = LoggingTransformer::input_fingerprint(&[0x30, 0x03, 0x02, 0x01, 0x05]);
        let second = LoggingTransformer::input_fingerprint(&[0x30, 0x00]);

        assert_ne!(first, second);
        assert_eq!(
            first,
            LoggingTransformer::input_fingerprint(&[0x30, 0x03, 0x02, 0x01, 0x05])
        );
        assert!(first.starts_with('#'));
        assert_eq!(first.len(), 13);
    }

    #[test]
    fn test_logging_helpers_do_not_panic() {
        LoggingTransformer::init_test();

        let err = std::io::Error::other("boom");
        LoggingTransformer::log_decode_failure("certificate", &[0xff; 4], &err);
        LoggingTransformer::log_extension_fallback("2.5.29.17", "truncated");
        LoggingTransformer::log_assembly_warning("ca-1", &"cycle broken");
        LoggingTransformer::log_assembly_summary(3, 1, 1);
    }
}
