use brig_format::BrigType;
use brig_format::records::{
    OperandAddress, OperandCodeList, OperandCodeRef, OperandData, OperandReg, Record,
};

use super::{BlockId, FunctionId, OperandId, SymbolId};

/// Constant payload of an immediate operand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImmediateValue {
    Int(i64),
    Float(f64),
}

impl ImmediateValue {
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Int(v) => v,
            Self::Float(v) => v as i64,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

/// Target of a code reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeRefTarget {
    /// A block label in the same function.
    Label(BlockId),
    /// A function, resolved when the unit is finished.
    Function(FunctionId),
}

/// An instruction argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Immediate {
        ty: BrigType,
        value: ImmediateValue,
    },
    Register {
        ty: BrigType,
        hard_num: u16,
    },
    Address {
        symbol: Option<SymbolId>,
        /// Base register, itself an operand of the same function.
        reg: Option<OperandId>,
        offset: i64,
    },
    CodeRef(CodeRefTarget),
    /// Symbols whose directive offsets form the list.
    CodeList(Vec<SymbolId>),
}

impl Operand {
    pub fn immediate(ty: BrigType, value: i64) -> Self {
        Self::Immediate {
            ty,
            value: ImmediateValue::Int(value),
        }
    }

    pub fn float(ty: BrigType, value: f64) -> Self {
        Self::Immediate {
            ty,
            value: ImmediateValue::Float(value),
        }
    }

    pub fn register(ty: BrigType, hard_num: u16) -> Self {
        Self::Register { ty, hard_num }
    }

    pub fn symbol_address(symbol: SymbolId, offset: i64) -> Self {
        Self::Address {
            symbol: Some(symbol),
            reg: None,
            offset,
        }
    }

    /// Size of the operand-section record this operand encodes to.
    pub fn record_size(&self) -> u32 {
        let size = match self {
            Self::Immediate { .. } => OperandData::SIZE,
            Self::Register { .. } => OperandReg::SIZE,
            Self::Address { .. } => OperandAddress::SIZE,
            Self::CodeRef(_) => OperandCodeRef::SIZE,
            Self::CodeList(_) => OperandCodeList::SIZE,
        };
        size as u32
    }

    /// Value type of a register or immediate.
    pub fn value_type(&self) -> Option<BrigType> {
        match self {
            Self::Immediate { ty, .. } | Self::Register { ty, .. } => Some(*ty),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Immediate { .. } => "immediate",
            Self::Register { .. } => "register",
            Self::Address { .. } => "address",
            Self::CodeRef(_) => "code reference",
            Self::CodeList(_) => "code list",
        }
    }
}
