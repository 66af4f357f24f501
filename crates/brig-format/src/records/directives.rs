use crate::codes::{Alignment, Allocation, Linkage, MachineModel, Profile, Segment};
use crate::error::FormatError;
use crate::kinds::Kind;
use crate::types::BrigType;

use super::{Record, get_code, get_u16, get_u32, get_u64, put_u8, put_u16, put_u32, put_u64};

/// Module version stamp, the first record of every code section.
///
/// Layout: hsail major/minor at 4/8, brig major/minor at 12/16, profile at
/// 20, machine model at 21.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectiveVersion {
    pub hsail_major: u32,
    pub hsail_minor: u32,
    pub brig_major: u32,
    pub brig_minor: u32,
    pub profile: Profile,
    pub machine_model: MachineModel,
}

impl Record for DirectiveVersion {
    const SIZE: usize = 24;

    single_kind!(Kind::DIRECTIVE_VERSION);

    fn write_fields(&self, bytes: &mut [u8]) {
        put_u32(bytes, 4, self.hsail_major);
        put_u32(bytes, 8, self.hsail_minor);
        put_u32(bytes, 12, self.brig_major);
        put_u32(bytes, 16, self.brig_minor);
        put_u8(bytes, 20, self.profile as u8);
        put_u8(bytes, 21, self.machine_model as u8);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            hsail_major: get_u32(bytes, 4),
            hsail_minor: get_u32(bytes, 8),
            brig_major: get_u32(bytes, 12),
            brig_minor: get_u32(bytes, 16),
            profile: get_code(bytes, 20, "profile", Profile::from_raw)?,
            machine_model: get_code(bytes, 21, "machine model", MachineModel::from_raw)?,
        })
    }
}

/// Variable, argument, local or spill declaration.
///
/// Layout: name at 4, init at 8, type at 12, segment 14, align 15, dim (u64)
/// at 16, modifier 24, linkage 25, allocation 26.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectiveVariable {
    /// Data-section offset of the name entry.
    pub name: u32,
    /// Code-section offset of an initializer, 0 if none.
    pub init: u32,
    pub ty: BrigType,
    pub segment: Segment,
    pub align: Alignment,
    pub dim: u64,
    pub modifier: u8,
    pub linkage: Linkage,
    pub allocation: Allocation,
}

impl Record for DirectiveVariable {
    const SIZE: usize = 28;

    single_kind!(Kind::DIRECTIVE_VARIABLE);

    fn write_fields(&self, bytes: &mut [u8]) {
        put_u32(bytes, 4, self.name);
        put_u32(bytes, 8, self.init);
        put_u16(bytes, 12, self.ty.0);
        put_u8(bytes, 14, self.segment as u8);
        put_u8(bytes, 15, self.align as u8);
        put_u64(bytes, 16, self.dim);
        put_u8(bytes, 24, self.modifier);
        put_u8(bytes, 25, self.linkage as u8);
        put_u8(bytes, 26, self.allocation as u8);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            name: get_u32(bytes, 4),
            init: get_u32(bytes, 8),
            ty: BrigType(get_u16(bytes, 12)),
            segment: get_code(bytes, 14, "segment", Segment::from_raw)?,
            align: get_code(bytes, 15, "alignment", Alignment::from_raw)?,
            dim: get_u64(bytes, 16),
            modifier: bytes[24],
            linkage: get_code(bytes, 25, "linkage", Linkage::from_raw)?,
            allocation: get_code(bytes, 26, "allocation", Allocation::from_raw)?,
        })
    }
}

/// Function or kernel header.
///
/// Layout: name at 4, out-arg count 8, in-arg count 10, first in-arg 12,
/// first code-block entry 16, next module entry 20, code-block entry count
/// 24, modifier 28, linkage 29.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectiveExecutable {
    pub kernel: bool,
    pub name: u32,
    pub out_arg_count: u16,
    pub in_arg_count: u16,
    pub first_in_arg: u32,
    pub first_code_block_entry: u32,
    pub next_module_entry: u32,
    pub code_block_entry_count: u32,
    pub modifier: u8,
    pub linkage: Linkage,
}

impl DirectiveExecutable {
    /// Offset of `code_block_entry_count` within the record.
    pub const CODE_BLOCK_ENTRY_COUNT_AT: usize = 24;
    /// Offset of `next_module_entry` within the record.
    pub const NEXT_MODULE_ENTRY_AT: usize = 20;
}

impl Record for DirectiveExecutable {
    const SIZE: usize = 32;

    fn kind(&self) -> Kind {
        if self.kernel {
            Kind::DIRECTIVE_KERNEL
        } else {
            Kind::DIRECTIVE_FUNCTION
        }
    }

    fn accepts(kind: Kind) -> bool {
        kind == Kind::DIRECTIVE_FUNCTION || kind == Kind::DIRECTIVE_KERNEL
    }

    fn expected_kind() -> Kind {
        Kind::DIRECTIVE_FUNCTION
    }

    fn write_fields(&self, bytes: &mut [u8]) {
        put_u32(bytes, 4, self.name);
        put_u16(bytes, 8, self.out_arg_count);
        put_u16(bytes, 10, self.in_arg_count);
        put_u32(bytes, 12, self.first_in_arg);
        put_u32(bytes, 16, self.first_code_block_entry);
        put_u32(bytes, Self::NEXT_MODULE_ENTRY_AT, self.next_module_entry);
        put_u32(
            bytes,
            Self::CODE_BLOCK_ENTRY_COUNT_AT,
            self.code_block_entry_count,
        );
        put_u8(bytes, 28, self.modifier);
        put_u8(bytes, 29, self.linkage as u8);
    }

    fn read_fields(kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            kernel: kind == Kind::DIRECTIVE_KERNEL,
            name: get_u32(bytes, 4),
            out_arg_count: get_u16(bytes, 8),
            in_arg_count: get_u16(bytes, 10),
            first_in_arg: get_u32(bytes, 12),
            first_code_block_entry: get_u32(bytes, 16),
            next_module_entry: get_u32(bytes, Self::NEXT_MODULE_ENTRY_AT),
            code_block_entry_count: get_u32(bytes, Self::CODE_BLOCK_ENTRY_COUNT_AT),
            modifier: bytes[28],
            linkage: get_code(bytes, 29, "linkage", Linkage::from_raw)?,
        })
    }
}

/// Basic-block label. Name at 4.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectiveLabel {
    pub name: u32,
}

impl Record for DirectiveLabel {
    const SIZE: usize = 8;

    single_kind!(Kind::DIRECTIVE_LABEL);

    fn write_fields(&self, bytes: &mut [u8]) {
        put_u32(bytes, 4, self.name);
    }

    fn read_fields(_kind: Kind, bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self {
            name: get_u32(bytes, 4),
        })
    }
}

/// Argument scope marker around a call. Prefix only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectiveArgBlock {
    Start,
    End,
}

impl Record for DirectiveArgBlock {
    const SIZE: usize = 4;

    fn kind(&self) -> Kind {
        match self {
            Self::Start => Kind::DIRECTIVE_ARG_BLOCK_START,
            Self::End => Kind::DIRECTIVE_ARG_BLOCK_END,
        }
    }

    fn accepts(kind: Kind) -> bool {
        kind == Kind::DIRECTIVE_ARG_BLOCK_START || kind == Kind::DIRECTIVE_ARG_BLOCK_END
    }

    fn expected_kind() -> Kind {
        Kind::DIRECTIVE_ARG_BLOCK_START
    }

    fn write_fields(&self, _bytes: &mut [u8]) {}

    fn read_fields(kind: Kind, _bytes: &[u8]) -> Result<Self, FormatError> {
        if kind == Kind::DIRECTIVE_ARG_BLOCK_START {
            Ok(Self::Start)
        } else {
            Ok(Self::End)
        }
    }
}
