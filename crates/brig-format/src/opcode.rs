//! Instruction opcodes.

/// HSAIL opcode as stored in instruction records.
///
/// Only the opcodes the emitter produces or special-cases have named
/// constants; any other value passes through unchanged.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(transparent)]
pub struct Opcode(pub u16);

impl Opcode {
    pub const NOP: Self = Self(0);
    pub const ABS: Self = Self(1);
    pub const ADD: Self = Self(2);
    pub const DIV: Self = Self(7);
    pub const MAX: Self = Self(12);
    pub const MIN: Self = Self(13);
    pub const MUL: Self = Self(14);
    pub const NEG: Self = Self(16);
    pub const REM: Self = Self(17);
    pub const SQRT: Self = Self(19);
    pub const SUB: Self = Self(20);
    pub const SHL: Self = Self(26);
    pub const SHR: Self = Self(27);
    pub const AND: Self = Self(28);
    pub const NOT: Self = Self(29);
    pub const OR: Self = Self(30);
    pub const XOR: Self = Self(32);
    pub const LDA: Self = Self(42);
    pub const MOV: Self = Self(43);
    pub const CMOV: Self = Self(49);
    pub const FTOS: Self = Self(67);
    pub const STOF: Self = Self(68);
    pub const CMP: Self = Self(69);
    pub const CVT: Self = Self(70);
    pub const LD: Self = Self(71);
    pub const ST: Self = Self(72);
    pub const ATOMIC: Self = Self(73);
    pub const ATOMICNORET: Self = Self(74);
    pub const BR: Self = Self(84);
    pub const CBR: Self = Self(85);
    pub const CALL: Self = Self(95);
    pub const RET: Self = Self(97);

    /// Bit-logical and move opcodes, which take register storage types
    /// instead of value types.
    #[inline]
    pub fn uses_storage_type(self) -> bool {
        matches!(
            self,
            Self::MOV | Self::AND | Self::OR | Self::XOR | Self::NOT | Self::CMP
        )
    }

    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::NOP => "nop",
            Self::ABS => "abs",
            Self::ADD => "add",
            Self::DIV => "div",
            Self::MAX => "max",
            Self::MIN => "min",
            Self::MUL => "mul",
            Self::NEG => "neg",
            Self::REM => "rem",
            Self::SQRT => "sqrt",
            Self::SUB => "sub",
            Self::SHL => "shl",
            Self::SHR => "shr",
            Self::AND => "and",
            Self::NOT => "not",
            Self::OR => "or",
            Self::XOR => "xor",
            Self::LDA => "lda",
            Self::MOV => "mov",
            Self::CMOV => "cmov",
            Self::FTOS => "ftos",
            Self::STOF => "stof",
            Self::CMP => "cmp",
            Self::CVT => "cvt",
            Self::LD => "ld",
            Self::ST => "st",
            Self::ATOMIC => "atomic",
            Self::ATOMICNORET => "atomicnoret",
            Self::BR => "br",
            Self::CBR => "cbr",
            Self::CALL => "call",
            Self::RET => "ret",
            _ => return None,
        };
        Some(name)
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "op{}", self.0),
        }
    }
}
