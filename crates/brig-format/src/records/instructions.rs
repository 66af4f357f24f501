use crate::codes::{
    Alignment, AtomicOp, CompareOp, MemoryOrder, MemoryScope, Pack, Round, Segment, Width,
};
use crate::error::FormatError;
use crate::kinds::Kind;
use crate::opcode::Opcode;
use crate::types::BrigType;

use super::{Record, get_code, get_u16, get_u32, put_u8, put_u16, put_u32};

/// Fields shared by every instruction record.
///
/// Layout: opcode at 4, type at 6, operand-list data offset at 8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstBase {
    pub opcode: Opcode,
    pub ty: BrigType,
    /// Data-section offset of the operand-list blob.
    pub operands: u32,
}

impl InstBase {
    pub const SIZE: usize = 12;

    fn write(&self, bytes: &mut [u8]) {
        put_u16(bytes, 4, self.opcode.0);
        put_u16(bytes, 6, self.ty.0);
        put_u32(bytes, 8, self.operands);
    }

    fn read(bytes: &[u8]) -> Self {
        Self {
            opcode: Opcode(get_u16(bytes, 4)),
            ty: BrigType(get_u16(bytes, 6)),
            operands: get_u32(bytes, 8),
        }
    }
}

/// Instruction without modifiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InstBasic {
    pub base: InstBase,
}

impl Record for InstBasic {
    const SIZE: usize = InstBase::SIZE;

    single_kind!(Kind::INST_BASIC);

    fn write_fields(&self, bytes: &mut [u8]) {
        self.base.write(bytes);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            base: InstBase::read(bytes),
        })
    }
}

/// Basic instruction with rounding and packing modifiers. Round at 12,
/// pack at 13.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstMod {
    pub base: InstBase,
    pub round: Round,
    pub pack: Pack,
}

impl Record for InstMod {
    const SIZE: usize = 16;

    single_kind!(Kind::INST_MOD);

    fn write_fields(&self, bytes: &mut [u8]) {
        self.base.write(bytes);
        put_u8(bytes, 12, self.round as u8);
        put_u8(bytes, 13, self.pack as u8);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            base: InstBase::read(bytes),
            round: get_code(bytes, 12, "round", Round::from_raw)?,
            pack: get_code(bytes, 13, "pack", Pack::from_raw)?,
        })
    }
}

/// Load or store. Segment at 12, align 13, equivalence class 14, width 15,
/// modifier 16.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstMem {
    pub base: InstBase,
    pub segment: Segment,
    pub align: Alignment,
    pub equiv_class: u8,
    pub width: Width,
    pub modifier: u8,
}

impl Record for InstMem {
    const SIZE: usize = 20;

    single_kind!(Kind::INST_MEM);

    fn write_fields(&self, bytes: &mut [u8]) {
        self.base.write(bytes);
        put_u8(bytes, 12, self.segment as u8);
        put_u8(bytes, 13, self.align as u8);
        put_u8(bytes, 14, self.equiv_class);
        put_u8(bytes, 15, self.width as u8);
        put_u8(bytes, 16, self.modifier);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            base: InstBase::read(bytes),
            segment: get_code(bytes, 12, "segment", Segment::from_raw)?,
            align: get_code(bytes, 13, "alignment", Alignment::from_raw)?,
            equiv_class: bytes[14],
            width: get_code(bytes, 15, "width", Width::from_raw)?,
            modifier: bytes[16],
        })
    }
}

/// Atomic read-modify-write. Segment at 12, memory order 13, memory scope
/// 14, atomic operation 15, equivalence class 16.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstAtomic {
    pub base: InstBase,
    pub segment: Segment,
    pub memory_order: MemoryOrder,
    pub memory_scope: MemoryScope,
    pub atomic_op: AtomicOp,
    pub equiv_class: u8,
}

impl Record for InstAtomic {
    const SIZE: usize = 20;

    single_kind!(Kind::INST_ATOMIC);

    fn write_fields(&self, bytes: &mut [u8]) {
        self.base.write(bytes);
        put_u8(bytes, 12, self.segment as u8);
        put_u8(bytes, 13, self.memory_order as u8);
        put_u8(bytes, 14, self.memory_scope as u8);
        put_u8(bytes, 15, self.atomic_op as u8);
        put_u8(bytes, 16, self.equiv_class);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            base: InstBase::read(bytes),
            segment: get_code(bytes, 12, "segment", Segment::from_raw)?,
            memory_order: get_code(bytes, 13, "memory order", MemoryOrder::from_raw)?,
            memory_scope: get_code(bytes, 14, "memory scope", MemoryScope::from_raw)?,
            atomic_op: get_code(bytes, 15, "atomic operation", AtomicOp::from_raw)?,
            equiv_class: bytes[16],
        })
    }
}

/// Address computation (`lda`). Segment at 12.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstAddr {
    pub base: InstBase,
    pub segment: Segment,
}

impl Record for InstAddr {
    const SIZE: usize = 16;

    single_kind!(Kind::INST_ADDR);

    fn write_fields(&self, bytes: &mut [u8]) {
        self.base.write(bytes);
        put_u8(bytes, 12, self.segment as u8);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            base: InstBase::read(bytes),
            segment: get_code(bytes, 12, "segment", Segment::from_raw)?,
        })
    }
}

/// Segment conversion. Source type at 12, segment 14, modifier 15.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstSegCvt {
    pub base: InstBase,
    pub source_type: BrigType,
    pub segment: Segment,
    pub modifier: u8,
}

impl Record for InstSegCvt {
    const SIZE: usize = 16;

    single_kind!(Kind::INST_SEG_CVT);

    fn write_fields(&self, bytes: &mut [u8]) {
        self.base.write(bytes);
        put_u16(bytes, 12, self.source_type.0);
        put_u8(bytes, 14, self.segment as u8);
        put_u8(bytes, 15, self.modifier);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            base: InstBase::read(bytes),
            source_type: BrigType(get_u16(bytes, 12)),
            segment: get_code(bytes, 14, "segment", Segment::from_raw)?,
            modifier: bytes[15],
        })
    }
}

/// Comparison. Source type at 12, modifier 14, compare 15, pack 16.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstCmp {
    pub base: InstBase,
    pub source_type: BrigType,
    pub modifier: u8,
    pub compare: CompareOp,
    pub pack: Pack,
}

impl Record for InstCmp {
    const SIZE: usize = 20;

    single_kind!(Kind::INST_CMP);

    fn write_fields(&self, bytes: &mut [u8]) {
        self.base.write(bytes);
        put_u16(bytes, 12, self.source_type.0);
        put_u8(bytes, 14, self.modifier);
        put_u8(bytes, 15, self.compare as u8);
        put_u8(bytes, 16, self.pack as u8);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            base: InstBase::read(bytes),
            source_type: BrigType(get_u16(bytes, 12)),
            modifier: bytes[14],
            compare: get_code(bytes, 15, "compare", CompareOp::from_raw)?,
            pack: get_code(bytes, 16, "pack", Pack::from_raw)?,
        })
    }
}

/// Branch or call. Width at 12.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstBr {
    pub base: InstBase,
    pub width: Width,
}

impl Record for InstBr {
    const SIZE: usize = 16;

    single_kind!(Kind::INST_BR);

    fn write_fields(&self, bytes: &mut [u8]) {
        self.base.write(bytes);
        put_u8(bytes, 12, self.width as u8);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            base: InstBase::read(bytes),
            width: get_code(bytes, 12, "width", Width::from_raw)?,
        })
    }
}

/// Type conversion. Source type at 12, rounding modifier 14.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstCvt {
    pub base: InstBase,
    pub source_type: BrigType,
    pub round: Round,
}

impl Record for InstCvt {
    const SIZE: usize = 16;

    single_kind!(Kind::INST_CVT);

    fn write_fields(&self, bytes: &mut [u8]) {
        self.base.write(bytes);
        put_u16(bytes, 12, self.source_type.0);
        put_u8(bytes, 14, self.round as u8);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            base: InstBase::read(bytes),
            source_type: BrigType(get_u16(bytes, 12)),
            round: get_code(bytes, 14, "round", Round::from_raw)?,
        })
    }
}
