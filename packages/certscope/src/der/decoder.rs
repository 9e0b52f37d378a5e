//! Work-stack decoder for definite-length tag/length/value data
//!
//! Constructed nodes are opened as frames on an explicit stack instead of
//! recursing, so nesting depth is bounded by [`DecoderLimits::max_depth`]
//! rather than by the call stack. Every declared length is checked against
//! the bytes actually present before the node is accepted.

use serde::{Deserialize, Serialize};

use super::node::{Content, ParseNode};
use super::tag::{Tag, TagClass};
use crate::errors::DecodeError;

/// Default upper bound on input size (64 KiB)
pub const DEFAULT_MAX_INPUT_LEN: usize = 64 * 1024;

/// Default upper bound on constructed-node nesting
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Resource limits applied to a single decode call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderLimits {
    /// Longest accepted input in bytes
    pub max_input_len: usize,
    /// Deepest accepted nesting of constructed nodes; the root counts as one
    pub max_depth: usize,
}

impl Default for DecoderLimits {
    fn default() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Decode a single top-level node with the default limits
pub fn decode(input: &[u8]) -> Result<ParseNode<'_>, DecodeError> {
    decode_with_limits(input, DecoderLimits::default())
}

/// Decode a single top-level node spanning exactly all of `input`
pub fn decode_with_limits(
    input: &[u8],
    limits: DecoderLimits,
) -> Result<ParseNode<'_>, DecodeError> {
    if input.is_empty() {
        return Err(DecodeError::EmptyInput);
    }
    if input.len() > limits.max_input_len {
        return Err(DecodeError::InputTooLarge {
            len: input.len(),
            limit: limits.max_input_len,
        });
    }

    let root = read_header(input, 0)?;
    if root.content_end() != input.len() {
        return Err(DecodeError::LengthMismatch {
            offset: 0,
            declared: root.length,
            actual: input.len() - root.content_start(),
        });
    }
    if !root.tag.constructed {
        return Ok(root.into_primitive(input));
    }
    if limits.max_depth == 0 {
        return Err(DecodeError::NestingTooDeep {
            offset: 0,
            limit: limits.max_depth,
        });
    }

    let mut current = Frame::open(root);
    let mut ancestors: Vec<Frame<'_>> = Vec::new();
    loop {
        if current.cursor == current.end {
            let node = current.close(input);
            match ancestors.pop() {
                Some(mut parent) => {
                    parent.children.push(node);
                    current = parent;
                }
                None => return Ok(node),
            }
            continue;
        }

        let header = read_header(input, current.cursor)?;
        if header.content_end() > current.end {
            let content_start = current.header.content_start();
            return Err(DecodeError::LengthMismatch {
                offset: current.header.offset,
                declared: current.header.length,
                actual: header.content_end() - content_start,
            });
        }
        current.cursor = header.content_end();

        if header.tag.constructed {
            // `current` sits at depth `ancestors.len() + 1`
            if ancestors.len() + 1 >= limits.max_depth {
                return Err(DecodeError::NestingTooDeep {
                    offset: header.offset,
                    limit: limits.max_depth,
                });
            }
            let parent = std::mem::replace(&mut current, Frame::open(header));
            ancestors.push(parent);
        } else {
            current.children.push(header.into_primitive(input));
        }
    }
}

/// Identifier and length octets of one node, validated against the input
#[derive(Debug, Clone, Copy)]
struct Header {
    tag: Tag,
    offset: usize,
    header_len: usize,
    length: usize,
}

impl Header {
    fn content_start(&self) -> usize {
        self.offset + self.header_len
    }

    fn content_end(&self) -> usize {
        self.content_start() + self.length
    }

    fn into_primitive(self, input: &[u8]) -> ParseNode<'_> {
        ParseNode {
            tag: self.tag,
            offset: self.offset,
            header_len: self.header_len,
            length: self.length,
            raw: &input[self.offset..self.content_end()],
            content: Content::Primitive(&input[self.content_start()..self.content_end()]),
        }
    }
}

/// An open constructed node whose children are still being read
struct Frame<'a> {
    header: Header,
    cursor: usize,
    end: usize,
    children: Vec<ParseNode<'a>>,
}

impl<'a> Frame<'a> {
    fn open(header: Header) -> Self {
        Self {
            header,
            cursor: header.content_start(),
            end: header.content_end(),
            children: Vec::new(),
        }
    }

    fn close(self, input: &'a [u8]) -> ParseNode<'a> {
        ParseNode {
            tag: self.header.tag,
            offset: self.header.offset,
            header_len: self.header.header_len,
            length: self.header.length,
            raw: &input[self.header.offset..self.header.content_end()],
            content: Content::Constructed(self.children),
        }
    }
}

/// Read identifier and length octets at `offset` and check the declared
/// content fits in what remains of `input`.
fn read_header(input: &[u8], offset: usize) -> Result<Header, DecodeError> {
    let mut pos = offset;
    let first = next_octet(input, &mut pos, offset)?;

    let class = TagClass::from_bits(first);
    let constructed = first & 0x20 != 0;
    let mut number = u32::from(first & 0x1F);

    if number == 0x1F {
        number = 0;
        let mut leading = true;
        loop {
            let octet = next_octet(input, &mut pos, offset)?;
            if leading && octet == 0x80 {
                return Err(DecodeError::UnsupportedEncoding {
                    offset,
                    reason: "tag number has leading zero groups",
                });
            }
            leading = false;
            number = number
                .checked_mul(128)
                .map(|n| n | u32::from(octet & 0x7F))
                .ok_or(DecodeError::UnsupportedEncoding {
                    offset,
                    reason: "tag number overflows u32",
                })?;
            if octet & 0x80 == 0 {
                break;
            }
        }
        if number < 0x1F {
            return Err(DecodeError::UnsupportedEncoding {
                offset,
                reason: "long-form tag number below 31",
            });
        }
    }

    let length = read_length(input, &mut pos, offset)?;
    let header_len = pos - offset;

    let available = input.len() - pos;
    if length > available {
        return Err(DecodeError::Truncated {
            offset,
            needed: length,
            available,
        });
    }

    Ok(Header {
        tag: Tag {
            class,
            number,
            constructed,
        },
        offset,
        header_len,
        length,
    })
}

fn read_length(input: &[u8], pos: &mut usize, offset: usize) -> Result<usize, DecodeError> {
    let first = next_octet(input, pos, offset)?;
    if first < 0x80 {
        return Ok(usize::from(first));
    }
    if first == 0x80 {
        return Err(DecodeError::UnsupportedEncoding {
            offset,
            reason: "indefinite length",
        });
    }
    if first == 0xFF {
        return Err(DecodeError::UnsupportedEncoding {
            offset,
            reason: "reserved length octet",
        });
    }

    let count = usize::from(first & 0x7F);
    if count > std::mem::size_of::<usize>() {
        return Err(DecodeError::UnsupportedEncoding {
            offset,
            reason: "length field wider than the platform word",
        });
    }

    let mut length: usize = 0;
    for i in 0..count {
        let octet = next_octet(input, pos, offset)?;
        if i == 0 && octet == 0 {
            return Err(DecodeError::UnsupportedEncoding {
                offset,
                reason: "non-minimal length",
            });
        }
        length = length
            .checked_mul(256)
            .map(|l| l | usize::from(octet))
            .ok_or(DecodeError::UnsupportedEncoding {
                offset,
                reason: "length overflows usize",
            })?;
    }
    if length < 0x80 {
        return Err(DecodeError::UnsupportedEncoding {
            offset,
            reason: "non-minimal length",
        });
    }
    Ok(length)
}

fn next_octet(input: &[u8], pos: &mut usize, offset: usize) -> Result<u8, DecodeError> {
    let Some(&octet) = input.get(*pos) else {
        return Err(DecodeError::Truncated {
            offset,
            needed: *pos + 1 - offset,
            available: input.len() - offset,
        });
    };
    *pos += 1;
    Ok(octet)
}
