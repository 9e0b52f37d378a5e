//! UTCTime / GeneralizedTime parsing
//!
//! Only the DER profile from RFC 5280 is accepted: seconds present, no
//! fractional seconds, and a terminating `Z`.

use chrono::{DateTime, NaiveDate, Utc};

use crate::der::{universal, ParseNode};
use crate::errors::ExtractError;

/// Parse a Time CHOICE node
pub(crate) fn parse_time(
    node: &ParseNode<'_>,
    field: &'static str,
) -> Result<DateTime<Utc>, ExtractError> {
    let value = node.value().ok_or(ExtractError::MalformedStructure(field))?;
    let parsed = if node.is_universal(universal::UTC_TIME) {
        parse_utc_time(value)
    } else if node.is_universal(universal::GENERALIZED_TIME) {
        parse_generalized_time(value)
    } else {
        None
    };
    parsed.ok_or(ExtractError::MalformedStructure(field))
}

/// `YYMMDDHHMMSSZ`; years 50..=99 are 19xx, the rest 20xx
fn parse_utc_time(value: &[u8]) -> Option<DateTime<Utc>> {
    let digits = value.strip_suffix(b"Z")?;
    if digits.len() != 12 {
        return None;
    }
    let yy = two_digits(&digits[0..2])?;
    let year = if yy >= 50 { 1900 + yy } else { 2000 + yy };
    assemble(year, &digits[2..])
}

/// `YYYYMMDDHHMMSSZ`
fn parse_generalized_time(value: &[u8]) -> Option<DateTime<Utc>> {
    let digits = value.strip_suffix(b"Z")?;
    if digits.len() != 14 {
        return None;
    }
    let year = two_digits(&digits[0..2])? * 100 + two_digits(&digits[2..4])?;
    assemble(year, &digits[4..])
}

/// `MMDDHHMMSS` after the year
fn assemble(year: u32, rest: &[u8]) -> Option<DateTime<Utc>> {
    let month = two_digits(&rest[0..2])?;
    let day = two_digits(&rest[2..4])?;
    let hour = two_digits(&rest[4..6])?;
    let minute = two_digits(&rest[6..8])?;
    let second = two_digits(&rest[8..10])?;

    let date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)?;
    let naive = date.and_hms_opt(hour, minute, second)?;
    Some(naive.and_utc())
}

fn two_digits(pair: &[u8]) -> Option<u32> {
    match pair {
        [tens @ b'0'..=b'9', ones @ b'0'..=b'9'] => {
            Some(u32::from(tens - b'0') * 10 + u32::from(ones - b'0'))
        }
        _ => None,
    }
}
