//! Fixed-size record layouts.
//!
//! Every record starts with `{byteCount: u16, kind: u16}` and is encoded
//! little-endian with explicit byte ranges. Field offsets are listed in each
//! struct's docs.

/// Implements the kind methods of a record with exactly one kind tag.
macro_rules! single_kind {
    ($kind:expr) => {
        fn kind(&self) -> Kind {
            $kind
        }

        fn accepts(kind: Kind) -> bool {
            kind == $kind
        }

        fn expected_kind() -> Kind {
            $kind
        }
    };
}

mod directives;
mod instructions;
mod operands;


pub use directives::{
    DirectiveArgBlock, DirectiveExecutable, DirectiveLabel, DirectiveVariable, DirectiveVersion,
};
pub use instructions::{
    InstAddr, InstAtomic, InstBase, InstBasic, InstBr, InstCmp, InstCvt, InstMem, InstMod,
    InstSegCvt,
};
pub use operands::{OperandAddress, OperandCodeList, OperandCodeRef, OperandData, OperandReg};

use crate::error::FormatError;
use crate::kinds::Kind;

/// Size of the `{byteCount, kind}` prefix shared by all records.
pub const RECORD_PREFIX_SIZE: usize = 4;

/// A fixed-size record.
pub trait Record: Sized {
    /// Encoded size in bytes, prefix included.
    const SIZE: usize;

    /// Kind tag written for this value.
    fn kind(&self) -> Kind;

    /// Whether `kind` decodes into this record type.
    fn accepts(kind: Kind) -> bool;

    /// Writes the fields after the prefix into `bytes` (`SIZE` long).
    fn write_fields(&self, bytes: &mut [u8]);

    /// Reads the fields from `bytes` (`SIZE` long, prefix already checked).
    fn read_fields(kind: Kind, bytes: &[u8]) -> Result<Self, FormatError>;

    /// Encode to `SIZE` bytes.
    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; Self::SIZE];
        put_u16(&mut bytes, 0, Self::SIZE as u16);
        put_u16(&mut bytes, 2, self.kind().0);
        self.write_fields(&mut bytes);
        bytes
    }

    /// Decode from the start of `bytes`, checking kind and declared size.
    fn from_bytes(bytes: &[u8]) -> Result<Self, FormatError> {
        let header = RecordHeader::read(bytes)?;
        if !Self::accepts(header.kind) {
            return Err(FormatError::KindMismatch {
                expected: Self::expected_kind(),
                found: header.kind,
            });
        }
        if header.byte_count as usize != Self::SIZE {
            return Err(FormatError::SizeMismatch {
                kind: header.kind,
                expected: Self::SIZE,
                found: header.byte_count as usize,
            });
        }
        if bytes.len() < Self::SIZE {
            return Err(FormatError::Truncated {
                needed: Self::SIZE,
                available: bytes.len(),
            });
        }
        Self::read_fields(header.kind, &bytes[..Self::SIZE])
    }

    /// Representative kind used in mismatch errors.
    fn expected_kind() -> Kind;
}

/// The `{byteCount, kind}` prefix of any record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordHeader {
    pub byte_count: u16,
    pub kind: Kind,
}

impl RecordHeader {
    pub fn read(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < RECORD_PREFIX_SIZE {
            return Err(FormatError::Truncated {
                needed: RECORD_PREFIX_SIZE,
                available: bytes.len(),
            });
        }
        Ok(Self {
            byte_count: get_u16(bytes, 0),
            kind: Kind(get_u16(bytes, 2)),
        })
    }
}

#[inline]
pub(crate) fn put_u8(bytes: &mut [u8], at: usize, value: u8) {
    bytes[at] = value;
}

#[inline]
pub(crate) fn put_u16(bytes: &mut [u8], at: usize, value: u16) {
    bytes[at..at + 2].copy_from_slice(&value.to_le_bytes());
}

#[inline]
pub(crate) fn put_u32(bytes: &mut [u8], at: usize, value: u32) {
    bytes[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

#[inline]
pub(crate) fn put_u64(bytes: &mut [u8], at: usize, value: u64) {
    bytes[at..at + 8].copy_from_slice(&value.to_le_bytes());
}

#[inline]
pub(crate) fn get_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

#[inline]
pub(crate) fn get_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[inline]
pub(crate) fn get_u64(bytes: &[u8], at: usize) -> u64 {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(raw)
}

/// Decodes a single-byte code field.
pub(crate) fn get_code<T>(
    bytes: &[u8],
    at: usize,
    field: &'static str,
    decode: fn(u8) -> Option<T>,
) -> Result<T, FormatError> {
    let raw = bytes[at];
    decode(raw).ok_or(FormatError::InvalidCode {
        field,
        value: raw as u32,
    })
}
