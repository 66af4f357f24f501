use crate::codes::RegisterKind;
use crate::error::FormatError;
use crate::kinds::Kind;

use super::{Record, get_u16, get_u32, put_u16, put_u32};

/// Immediate constant. Points at a `{u32 len, bytes}` data-section blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperandData {
    pub data: u32,
}

impl Record for OperandData {
    const SIZE: usize = 8;

    single_kind!(Kind::OPERAND_DATA);

    fn write_fields(&self, bytes: &mut [u8]) {
        put_u32(bytes, 4, self.data);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            data: get_u32(bytes, 4),
        })
    }
}

/// Hardware register. Kind at 4, number at 6.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperandReg {
    pub reg_kind: RegisterKind,
    pub reg_num: u16,
}

impl Record for OperandReg {
    const SIZE: usize = 8;

    single_kind!(Kind::OPERAND_REG);

    fn write_fields(&self, bytes: &mut [u8]) {
        put_u16(bytes, 4, self.reg_kind as u16);
        put_u16(bytes, 6, self.reg_num);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        let raw = get_u16(bytes, 4);
        let reg_kind = RegisterKind::from_raw(raw).ok_or(FormatError::InvalidCode {
            field: "register kind",
            value: raw as u32,
        })?;
        Ok(Self {
            reg_kind,
            reg_num: get_u16(bytes, 6),
        })
    }
}

/// Memory address: symbol directive at 4, base register operand at 8,
/// displacement low/high halves at 12/16.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperandAddress {
    pub symbol: u32,
    pub reg: u32,
    pub offset_lo: u32,
    pub offset_hi: u32,
}

impl OperandAddress {
    pub fn new(symbol: u32, reg: u32, offset: i64) -> Self {
        let raw = offset as u64;
        Self {
            symbol,
            reg,
            offset_lo: raw as u32,
            offset_hi: (raw >> 32) as u32,
        }
    }

    /// Displacement reassembled from its halves.
    pub fn offset(&self) -> i64 {
        (((self.offset_hi as u64) << 32) | self.offset_lo as u64) as i64
    }
}

impl Record for OperandAddress {
    const SIZE: usize = 20;

    single_kind!(Kind::OPERAND_ADDRESS);

    fn write_fields(&self, bytes: &mut [u8]) {
        put_u32(bytes, 4, self.symbol);
        put_u32(bytes, 8, self.reg);
        put_u32(bytes, 12, self.offset_lo);
        put_u32(bytes, 16, self.offset_hi);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            symbol: get_u32(bytes, 4),
            reg: get_u32(bytes, 8),
            offset_lo: get_u32(bytes, 12),
            offset_hi: get_u32(bytes, 16),
        })
    }
}

/// Reference to a code-section directive (label or function). Target at 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperandCodeRef {
    pub reference: u32,
}

impl OperandCodeRef {
    /// Offset of `reference` within the record.
    pub const REFERENCE_AT: usize = 4;
}

impl Record for OperandCodeRef {
    const SIZE: usize = 8;

    single_kind!(Kind::OPERAND_CODE_REF);

    fn write_fields(&self, bytes: &mut [u8]) {
        put_u32(bytes, Self::REFERENCE_AT, self.reference);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            reference: get_u32(bytes, Self::REFERENCE_AT),
        })
    }
}

/// List of code-section offsets. Points at a `{u32 byteCount, u32...}`
/// data-section blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperandCodeList {
    pub elements: u32,
}

impl Record for OperandCodeList {
    const SIZE: usize = 8;

    single_kind!(Kind::OPERAND_CODE_LIST);

    fn write_fields(&self, bytes: &mut [u8]) {
        put_u32(bytes, 4, self.elements);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            elements: get_u32(bytes, 4),
        })
    }
}
