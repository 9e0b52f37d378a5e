//! Identifier octets: tag class, constructed bit and tag number

use serde::Serialize;

/// Universal tag numbers used by X.509 and PKCS#10
pub mod universal {
    /// BOOLEAN
    pub const BOOLEAN: u32 = 1;
    /// INTEGER
    pub const INTEGER: u32 = 2;
    /// BIT STRING
    pub const BIT_STRING: u32 = 3;
    /// OCTET STRING
    pub const OCTET_STRING: u32 = 4;
    /// NULL
    pub const NULL: u32 = 5;
    /// OBJECT IDENTIFIER
    pub const OBJECT_IDENTIFIER: u32 = 6;
    /// UTF8String
    pub const UTF8_STRING: u32 = 12;
    /// SEQUENCE and SEQUENCE OF
    pub const SEQUENCE: u32 = 16;
    /// SET and SET OF
    pub const SET: u32 = 17;
    /// NumericString
    pub const NUMERIC_STRING: u32 = 18;
    /// PrintableString
    pub const PRINTABLE_STRING: u32 = 19;
    /// TeletexString (T61String)
    pub const TELETEX_STRING: u32 = 20;
    /// IA5String
    pub const IA5_STRING: u32 = 22;
    /// UTCTime
    pub const UTC_TIME: u32 = 23;
    /// GeneralizedTime
    pub const GENERALIZED_TIME: u32 = 24;
    /// VisibleString
    pub const VISIBLE_STRING: u32 = 26;
    /// UniversalString
    pub const UNIVERSAL_STRING: u32 = 28;
    /// BMPString
    pub const BMP_STRING: u32 = 30;
}

/// The two class bits of an identifier octet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TagClass {
    /// Types defined by X.680 itself
    Universal,
    /// Application-wide types
    Application,
    /// `[n]` tags whose meaning depends on position
    ContextSpecific,
    /// Enterprise-specific types
    Private,
}

impl TagClass {
    pub(crate) fn from_bits(octet: u8) -> Self {
        match octet >> 6 {
            0 => Self::Universal,
            1 => Self::Application,
            2 => Self::ContextSpecific,
            _ => Self::Private,
        }
    }

    pub(crate) fn bits(self) -> u8 {
        match self {
            Self::Universal => 0x00,
            Self::Application => 0x40,
            Self::ContextSpecific => 0x80,
            Self::Private => 0xC0,
        }
    }
}

/// A decoded identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    /// Class bits
    pub class: TagClass,
    /// Tag number
    pub number: u32,
    /// Constructed bit
    pub constructed: bool,
}

impl Tag {
    /// A universal-class tag
    #[must_use]
    pub const fn universal(number: u32, constructed: bool) -> Self {
        Self {
            class: TagClass::Universal,
            number,
            constructed,
        }
    }

    /// A context-specific tag, `[number]` in ASN.1 notation
    #[must_use]
    pub const fn context(number: u32, constructed: bool) -> Self {
        Self {
            class: TagClass::ContextSpecific,
            number,
            constructed,
        }
    }

    /// Append the identifier octets (short or long form) to `out`
    pub fn encode_into(self, out: &mut Vec<u8>) {
        let mut first = self.class.bits();
        if self.constructed {
            first |= 0x20;
        }
        if self.number < 0x1F {
            // Fits in the low five bits
            #[allow(clippy::cast_possible_truncation)]
            out.push(first | self.number as u8);
            return;
        }

        out.push(first | 0x1F);
        push_base128(self.number.into(), out);
    }
}

/// Append `value` as big-endian base-128 groups, high bit set on all but the last
pub(crate) fn push_base128(value: u64, out: &mut Vec<u8>) {
    let mut groups = [0u8; 10];
    let mut count = 0;
    let mut rest = value;
    loop {
        #[allow(clippy::cast_possible_truncation)]
        let group = (rest & 0x7F) as u8;
        groups[count] = group;
        count += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    for (i, group) in groups[..count].iter().rev().enumerate() {
        if i + 1 < count {
            out.push(group | 0x80);
        } else {
            out.push(*group);
        }
    }
}
