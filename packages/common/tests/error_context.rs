//! Tests for error construction, context chaining and display

use certscope_common::{bail, ensure, err, Error, ErrorKind, ResultExt};

#[test]
fn test_kind_and_context() {
    let error = Error::decode().context("certificate body");

    assert_eq!(error.kind(), &ErrorKind::Decode);
    assert_eq!(error.get_context(), Some("certificate body"));
    assert_eq!(error.to_string(), "Decode error: certificate body");
}

#[test]
fn test_source_is_preserved_through_context() {
    let io = std::io::Error::other("underlying");
    let error = Error::with_source(ErrorKind::Extract, io).context("subject");

    let rendered = error.to_string();
    assert!(rendered.starts_with("Extraction error: subject"));
    assert!(rendered.contains("Caused by:"));
    assert!(rendered.contains("underlying"));
    assert!(std::error::Error::source(&error).is_some());
}

#[test]
fn test_err_macro_formats_context() {
    let error = err!(configuration, "max_depth must be at least {}", 1);

    assert_eq!(error.kind(), &ErrorKind::Configuration);
    assert_eq!(error.get_context(), Some("max_depth must be at least 1"));
}

fn guarded(limit: usize) -> certscope_common::Result<usize> {
    ensure!(limit > 0, configuration, "limit must be non-zero");
    if limit > 10 {
        bail!(resource_exhausted, "limit {limit} too large");
    }
    Ok(limit)
}

#[test]
fn test_bail_and_ensure() {
    assert_eq!(guarded(3).ok(), Some(3));

    let zero = guarded(0).err();
    assert_eq!(zero.map(|e| e.kind().clone()), Some(ErrorKind::Configuration));

    let large = guarded(11).err();
    assert_eq!(
        large.map(|e| e.kind().clone()),
        Some(ErrorKind::ResourceExhausted)
    );
}

#[test]
fn test_result_extensions() {
    let parsed: Result<u8, std::num::ParseIntError> = "x".parse::<u8>();
    let converted = parsed.with_context(ErrorKind::Configuration, "depth field");
    let error = converted.err();
    assert_eq!(error.as_ref().map(|e| e.kind().clone()), Some(ErrorKind::Configuration));
    assert_eq!(error.as_ref().and_then(|e| e.get_context()), Some("depth field"));

    let parsed: Result<u8, std::num::ParseIntError> = "300".parse::<u8>();
    let error = parsed.with_kind(ErrorKind::Extract).err();
    assert_eq!(error.map(|e| e.kind().clone()), Some(ErrorKind::Extract));
}
