//! Generic parse tree produced by the decoder

use super::oid;
use super::tag::{Tag, TagClass};

/// Content of a node: a primitive value or an ordered list of children,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content<'a> {
    /// Content octets of a primitive node
    Primitive(&'a [u8]),
    /// Children of a constructed node, in encoding order
    Constructed(Vec<ParseNode<'a>>),
}

/// One decoded tag/length/value unit
///
/// Borrows from the input buffer. `offset` is the absolute position of the
/// first identifier octet; `length` is the declared content length, which the
/// decoder guarantees equals the number of content bytes actually consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNode<'a> {
    /// Identifier octets
    pub tag: Tag,
    /// Absolute offset of the first identifier octet
    pub offset: usize,
    /// Identifier plus length octets
    pub header_len: usize,
    /// Declared content length
    pub length: usize,
    pub(crate) raw: &'a [u8],
    /// Value or children
    pub content: Content<'a>,
}

impl<'a> ParseNode<'a> {
    /// Class bits of the identifier
    #[must_use]
    pub fn tag_class(&self) -> TagClass {
        self.tag.class
    }

    /// Tag number, short or long form
    #[must_use]
    pub fn tag_number(&self) -> u32 {
        self.tag.number
    }

    /// Whether the node holds children
    #[must_use]
    pub fn is_constructed(&self) -> bool {
        matches!(self.content, Content::Constructed(_))
    }

    /// Primitive content, `None` for constructed nodes
    #[must_use]
    pub fn value(&self) -> Option<&'a [u8]> {
        match self.content {
            Content::Primitive(value) => Some(value),
            Content::Constructed(_) => None,
        }
    }

    /// Children, `None` for primitive nodes
    #[must_use]
    pub fn children(&self) -> Option<&[ParseNode<'a>]> {
        match &self.content {
            Content::Primitive(_) => None,
            Content::Constructed(children) => Some(children),
        }
    }

    /// The complete encoding of this node as it appeared in the input
    #[must_use]
    pub fn raw(&self) -> &'a [u8] {
        self.raw
    }

    /// The content octets as they appeared in the input, for either shape
    #[must_use]
    pub fn content_bytes(&self) -> &'a [u8] {
        &self.raw[self.header_len..]
    }

    /// Header plus content length
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.header_len + self.length
    }

    /// True for a universal-class node with the given tag number, of either shape
    #[must_use]
    pub fn is_universal(&self, number: u32) -> bool {
        self.tag.class == TagClass::Universal && self.tag.number == number
    }

    /// True for a context-specific `[number]` node, of either shape
    #[must_use]
    pub fn is_context(&self, number: u32) -> bool {
        self.tag.class == TagClass::ContextSpecific && self.tag.number == number
    }

    /// Dotted form of a primitive OBJECT IDENTIFIER node
    #[must_use]
    pub fn as_oid(&self) -> Option<String> {
        if !self.is_universal(super::tag::universal::OBJECT_IDENTIFIER) {
            return None;
        }
        self.value().and_then(oid::decode)
    }

    /// Re-serialize with minimal definite lengths
    ///
    /// For DER input this reproduces [`ParseNode::raw`] byte for byte.
    #[must_use]
    pub fn to_der(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_into(&mut out);
        out
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        self.tag.encode_into(out);
        encode_length(self.length, out);
        match &self.content {
            Content::Primitive(value) => out.extend_from_slice(value),
            Content::Constructed(children) => {
                for child in children {
                    child.encode_into(out);
                }
            }
        }
    }
}

/// Append a definite length in its shortest form
pub(crate) fn encode_length(length: usize, out: &mut Vec<u8>) {
    if length < 0x80 {
        #[allow(clippy::cast_possible_truncation)]
        out.push(length as u8);
        return;
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    #[allow(clippy::cast_possible_truncation)]
    out.push(0x80 | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}
