//! OBJECT IDENTIFIER content octets <-> dotted decimal

use super::tag::push_base128;

/// Decode OBJECT IDENTIFIER content octets into dotted-decimal form
///
/// Returns `None` for empty input, a trailing unterminated subidentifier,
/// a subidentifier with a leading `0x80` group, or an arc that overflows `u64`.
#[must_use]
pub fn decode(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() || bytes[bytes.len() - 1] & 0x80 != 0 {
        return None;
    }

    let mut arcs: Vec<u64> = Vec::new();
    let mut accum: u64 = 0;
    let mut fresh = true;
    for &b in bytes {
        if fresh && b == 0x80 {
            return None;
        }
        fresh = false;
        accum = accum.checked_mul(128)? | u64::from(b & 0x7F);
        if b & 0x80 == 0 {
            if arcs.is_empty() {
                // First subidentifier packs the first two arcs
                let (first, second) = match accum {
                    0..=39 => (0, accum),
                    40..=79 => (1, accum - 40),
                    _ => (2, accum - 80),
                };
                arcs.push(first);
                arcs.push(second);
            } else {
                arcs.push(accum);
            }
            accum = 0;
            fresh = true;
        }
    }

    Some(
        arcs.iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join("."),
    )
}

/// Encode a dotted-decimal OID into content octets
///
/// Returns `None` unless there are at least two arcs, the first is 0, 1 or 2,
/// and the second is below 40 when the first is 0 or 1.
#[must_use]
pub fn encode(dotted: &str) -> Option<Vec<u8>> {
    let arcs = dotted
        .split('.')
        .map(|arc| arc.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    let (&first, rest) = arcs.split_first()?;
    let (&second, rest) = rest.split_first()?;
    if first > 2 || (first < 2 && second >= 40) {
        return None;
    }

    let mut out = Vec::new();
    push_base128(first.checked_mul(40)?.checked_add(second)?, &mut out);
    for &arc in rest {
        push_base128(arc, &mut out);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_common_oids() {
        assert_eq!(decode(&[0x55, 0x04, 0x03]).as_deref(), Some("2.5.4.3"));
        assert_eq!(
            decode(&[0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01]).as_deref(),
            Some("1.2.840.113549.1.1.1")
        );
        assert_eq!(
            decode(&[0x2B, 0x81, 0x04, 0x00, 0x22]).as_deref(),
            Some("1.3.132.0.34")
        );
    }

    #[test]
    fn test_decode_rejects_bad_encodings() {
        assert_eq!(decode(&[]), None);
        // unterminated last subidentifier
        assert_eq!(decode(&[0x55, 0x84]), None);
        // leading 0x80 group
        assert_eq!(decode(&[0x55, 0x80, 0x01]), None);
        // arc wider than u64
        let mut wide = vec![0x55];
        wide.extend([0xFF; 10]);
        wide.push(0x7F);
        assert_eq!(decode(&wide), None);
    }

    #[test]
    fn test_encode_matches_decode() {
        for dotted in ["2.5.4.3", "1.2.840.10045.3.1.7", "0.9.2342.19200300.100.1.25", "2.999.3"] {
            let bytes = encode(dotted);
            assert!(bytes.is_some(), "{dotted} should encode");
            assert_eq!(bytes.and_then(|b| decode(&b)).as_deref(), Some(dotted));
        }
        assert_eq!(encode("3.1"), None);
        assert_eq!(encode("1.40"), None);
        assert_eq!(encode("1"), None);
        assert_eq!(encode("1.x.3"), None);
    }
}
