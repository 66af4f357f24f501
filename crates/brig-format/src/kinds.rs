//! Record kind tags.
//!
//! Every record starts with `{byteCount: u16, kind: u16}`. Kinds are grouped
//! by high nibble: `0x1xxx` directives, `0x2xxx` instructions, `0x3xxx`
//! operands.

/// Record kind tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct Kind(pub u16);

impl Kind {
    pub const DIRECTIVE_ARG_BLOCK_END: Self = Self(0x1000);
    pub const DIRECTIVE_ARG_BLOCK_START: Self = Self(0x1001);
    pub const DIRECTIVE_FUNCTION: Self = Self(0x1006);
    pub const DIRECTIVE_KERNEL: Self = Self(0x1008);
    pub const DIRECTIVE_LABEL: Self = Self(0x1009);
    pub const DIRECTIVE_VARIABLE: Self = Self(0x100e);
    pub const DIRECTIVE_VERSION: Self = Self(0x100f);

    pub const INST_ADDR: Self = Self(0x2000);
    pub const INST_ATOMIC: Self = Self(0x2001);
    pub const INST_BASIC: Self = Self(0x2002);
    pub const INST_BR: Self = Self(0x2003);
    pub const INST_CMP: Self = Self(0x2004);
    pub const INST_CVT: Self = Self(0x2005);
    pub const INST_MEM: Self = Self(0x2008);
    pub const INST_MOD: Self = Self(0x200a);
    pub const INST_SEG_CVT: Self = Self(0x200f);

    pub const OPERAND_ADDRESS: Self = Self(0x3000);
    pub const OPERAND_CODE_LIST: Self = Self(0x3002);
    pub const OPERAND_CODE_REF: Self = Self(0x3003);
    pub const OPERAND_DATA: Self = Self(0x3004);
    pub const OPERAND_REG: Self = Self(0x3007);

    #[inline]
    pub fn is_directive(self) -> bool {
        self.0 & 0xf000 == 0x1000
    }

    #[inline]
    pub fn is_instruction(self) -> bool {
        self.0 & 0xf000 == 0x2000
    }

    #[inline]
    pub fn is_operand(self) -> bool {
        self.0 & 0xf000 == 0x3000
    }

    /// Short display name, `None` for kinds this crate does not know.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::DIRECTIVE_ARG_BLOCK_END => "arg_block_end",
            Self::DIRECTIVE_ARG_BLOCK_START => "arg_block_start",
            Self::DIRECTIVE_FUNCTION => "function",
            Self::DIRECTIVE_KERNEL => "kernel",
            Self::DIRECTIVE_LABEL => "label",
            Self::DIRECTIVE_VARIABLE => "variable",
            Self::DIRECTIVE_VERSION => "version",
            Self::INST_ADDR => "inst_addr",
            Self::INST_ATOMIC => "inst_atomic",
            Self::INST_BASIC => "inst_basic",
            Self::INST_BR => "inst_br",
            Self::INST_CMP => "inst_cmp",
            Self::INST_CVT => "inst_cvt",
            Self::INST_MEM => "inst_mem",
            Self::INST_MOD => "inst_mod",
            Self::INST_SEG_CVT => "inst_seg_cvt",
            Self::OPERAND_ADDRESS => "address",
            Self::OPERAND_CODE_LIST => "code_list",
            Self::OPERAND_CODE_REF => "code_ref",
            Self::OPERAND_DATA => "data",
            Self::OPERAND_REG => "reg",
            _ => return None,
        };
        Some(name)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "kind({:#06x})", self.0),
        }
    }
}
