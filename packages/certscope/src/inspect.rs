//! Decode-and-extract entry points used by the console

use certscope_common::{LoggingTransformer, Result};
use chrono::{DateTime, Utc};

use crate::config::InspectConfig;
use crate::der::decode_with_limits;
use crate::hierarchy::{assemble_at, Assembly, CaSummary};
use crate::x509::{extract_certificate_with, extract_csr_with, DecodedCertificate, DecodedCsr};

/// Decode and extract one DER certificate
///
/// The caller strips any PEM armour first. Decode and extraction failures
/// are logged with a fingerprint of the input, never the input itself.
pub fn inspect_certificate(der: &[u8], config: &InspectConfig) -> Result<DecodedCertificate> {
    let limits = config.decoder_limits();
    let tree = decode_with_limits(der, limits)
        .inspect_err(|e| LoggingTransformer::log_decode_failure("certificate", der, e))?;
    let certificate = extract_certificate_with(&tree, limits)
        .inspect_err(|e| LoggingTransformer::log_decode_failure("certificate fields", der, e))?;

    tracing::debug!(
        subject = %certificate.subject,
        fingerprint = %certificate.fingerprint_sha256,
        "certificate decoded"
    );
    Ok(certificate)
}

/// Decode and extract one DER PKCS#10 request
pub fn inspect_csr(der: &[u8], config: &InspectConfig) -> Result<DecodedCsr> {
    let limits = config.decoder_limits();
    let tree = decode_with_limits(der, limits)
        .inspect_err(|e| LoggingTransformer::log_decode_failure("certification request", der, e))?;
    let csr = extract_csr_with(&tree, limits)
        .inspect_err(|e| LoggingTransformer::log_decode_failure("certification request fields", der, e))?;

    tracing::debug!(subject = %csr.subject, "certification request decoded");
    Ok(csr)
}

/// Assemble the CA forest at `now` using the configured expiring window
#[must_use]
pub fn assemble_hierarchy(
    records: &[CaSummary],
    config: &InspectConfig,
    now: DateTime<Utc>,
) -> Assembly {
    assemble_at(records, now, Some(config.expiring_window()))
}
