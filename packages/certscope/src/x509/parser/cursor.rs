//! Positional field navigation
//!
//! X.509 and PKCS#10 fields are identified by position, not by name. A
//! [`FieldCursor`] walks the children of one constructed node and every step
//! names the field it expects, so a shape mismatch reports exactly which
//! field was malformed.

use crate::der::{universal, ParseNode, TagClass};
use crate::errors::ExtractError;

pub(crate) struct FieldCursor<'n, 'a> {
    children: &'n [ParseNode<'a>],
    pos: usize,
}

impl<'n, 'a> FieldCursor<'n, 'a> {
    /// Open `node`, which must be a constructed universal SEQUENCE
    pub(crate) fn sequence(
        node: &'n ParseNode<'a>,
        field: &'static str,
    ) -> Result<Self, ExtractError> {
        Self::constructed(node, universal::SEQUENCE, field)
    }

    /// Open `node`, which must be a constructed universal SET
    pub(crate) fn set(node: &'n ParseNode<'a>, field: &'static str) -> Result<Self, ExtractError> {
        Self::constructed(node, universal::SET, field)
    }

    fn constructed(
        node: &'n ParseNode<'a>,
        number: u32,
        field: &'static str,
    ) -> Result<Self, ExtractError> {
        match node.children() {
            Some(children) if node.is_universal(number) => Ok(Self { children, pos: 0 }),
            _ => Err(ExtractError::MalformedStructure(field)),
        }
    }

    /// Open any constructed node regardless of its tag
    pub(crate) fn inside(
        node: &'n ParseNode<'a>,
        field: &'static str,
    ) -> Result<Self, ExtractError> {
        node.children()
            .map(|children| Self { children, pos: 0 })
            .ok_or(ExtractError::MalformedStructure(field))
    }

    pub(crate) fn is_done(&self) -> bool {
        self.pos >= self.children.len()
    }

    pub(crate) fn peek(&self) -> Option<&'n ParseNode<'a>> {
        self.children.get(self.pos)
    }

    /// Take the next node, whatever its shape
    pub(crate) fn next(&mut self, field: &'static str) -> Result<&'n ParseNode<'a>, ExtractError> {
        let node = self
            .children
            .get(self.pos)
            .ok_or(ExtractError::MalformedStructure(field))?;
        self.pos += 1;
        Ok(node)
    }

    /// Take the next node; it must be a constructed SEQUENCE
    pub(crate) fn next_sequence(
        &mut self,
        field: &'static str,
    ) -> Result<FieldCursor<'n, 'a>, ExtractError> {
        let node = self.next(field)?;
        FieldCursor::sequence(node, field)
    }

    /// Take the next node; it must be a primitive of universal type `number`
    pub(crate) fn next_primitive(
        &mut self,
        number: u32,
        field: &'static str,
    ) -> Result<&'a [u8], ExtractError> {
        let node = self.next(field)?;
        primitive(node, number, field)
    }

    /// Take the next node; it must be an OBJECT IDENTIFIER
    pub(crate) fn next_oid(&mut self, field: &'static str) -> Result<String, ExtractError> {
        let node = self.next(field)?;
        node.as_oid().ok_or(ExtractError::MalformedStructure(field))
    }

    /// Take the next node only if it is the context-specific `[number]`
    pub(crate) fn optional_context(&mut self, number: u32) -> Option<&'n ParseNode<'a>> {
        let node = self.peek()?;
        if node.tag_class() == TagClass::ContextSpecific && node.tag_number() == number {
            self.pos += 1;
            Some(node)
        } else {
            None
        }
    }

    /// Take the next node only if it is a primitive of universal type `number`
    pub(crate) fn optional_primitive(&mut self, number: u32) -> Option<&'n ParseNode<'a>> {
        let node = self.peek()?;
        if node.is_universal(number) && !node.is_constructed() {
            self.pos += 1;
            Some(node)
        } else {
            None
        }
    }
}

/// `node` must be a primitive of universal type `number`
pub(crate) fn primitive<'a>(
    node: &ParseNode<'a>,
    number: u32,
    field: &'static str,
) -> Result<&'a [u8], ExtractError> {
    match node.value() {
        Some(value) if node.is_universal(number) => Ok(value),
        _ => Err(ExtractError::MalformedStructure(field)),
    }
}

/// Content of a BIT STRING with no unused bits
pub(crate) fn octet_aligned_bits<'a>(
    value: &'a [u8],
    field: &'static str,
) -> Result<&'a [u8], ExtractError> {
    match value.split_first() {
        Some((0, bits)) => Ok(bits),
        _ => Err(ExtractError::MalformedStructure(field)),
    }
}
