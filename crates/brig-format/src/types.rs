//! BRIG value types.
//!
//! A type is a 16-bit code: the low five bits select the base type, bits 5-6
//! select the packing width (none, 32, 64 or 128 bits).

use super::codes::Alignment;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(transparent)]
pub struct BrigType(pub u16);

const PACK_SHIFT: u16 = 5;

impl BrigType {
    pub const BASE_MASK: u16 = (1 << PACK_SHIFT) - 1;
    pub const PACK_MASK: u16 = 3 << PACK_SHIFT;
    pub const PACK_NONE: u16 = 0;
    pub const PACK_32: u16 = 1 << PACK_SHIFT;
    pub const PACK_64: u16 = 2 << PACK_SHIFT;
    pub const PACK_128: u16 = 3 << PACK_SHIFT;

    pub const NONE: Self = Self(0);
    pub const U8: Self = Self(1);
    pub const U16: Self = Self(2);
    pub const U32: Self = Self(3);
    pub const U64: Self = Self(4);
    pub const S8: Self = Self(5);
    pub const S16: Self = Self(6);
    pub const S32: Self = Self(7);
    pub const S64: Self = Self(8);
    pub const F16: Self = Self(9);
    pub const F32: Self = Self(10);
    pub const F64: Self = Self(11);
    pub const B1: Self = Self(12);
    pub const B8: Self = Self(13);
    pub const B16: Self = Self(14);
    pub const B32: Self = Self(15);
    pub const B64: Self = Self(16);
    pub const B128: Self = Self(17);

    pub const U8X4: Self = Self(Self::U8.0 | Self::PACK_32);
    pub const U8X8: Self = Self(Self::U8.0 | Self::PACK_64);
    pub const U8X16: Self = Self(Self::U8.0 | Self::PACK_128);
    pub const U16X2: Self = Self(Self::U16.0 | Self::PACK_32);
    pub const U16X4: Self = Self(Self::U16.0 | Self::PACK_64);
    pub const U16X8: Self = Self(Self::U16.0 | Self::PACK_128);
    pub const U32X2: Self = Self(Self::U32.0 | Self::PACK_64);
    pub const U32X4: Self = Self(Self::U32.0 | Self::PACK_128);
    pub const U64X2: Self = Self(Self::U64.0 | Self::PACK_128);
    pub const S8X4: Self = Self(Self::S8.0 | Self::PACK_32);
    pub const S8X8: Self = Self(Self::S8.0 | Self::PACK_64);
    pub const S8X16: Self = Self(Self::S8.0 | Self::PACK_128);
    pub const S16X2: Self = Self(Self::S16.0 | Self::PACK_32);
    pub const S16X4: Self = Self(Self::S16.0 | Self::PACK_64);
    pub const S16X8: Self = Self(Self::S16.0 | Self::PACK_128);
    pub const S32X2: Self = Self(Self::S32.0 | Self::PACK_64);
    pub const S32X4: Self = Self(Self::S32.0 | Self::PACK_128);
    pub const S64X2: Self = Self(Self::S64.0 | Self::PACK_128);
    pub const F16X2: Self = Self(Self::F16.0 | Self::PACK_32);
    pub const F16X4: Self = Self(Self::F16.0 | Self::PACK_64);
    pub const F16X8: Self = Self(Self::F16.0 | Self::PACK_128);
    pub const F32X2: Self = Self(Self::F32.0 | Self::PACK_64);
    pub const F32X4: Self = Self(Self::F32.0 | Self::PACK_128);
    pub const F64X2: Self = Self(Self::F64.0 | Self::PACK_128);

    /// Element type with packing stripped.
    #[inline]
    pub fn base(self) -> Self {
        Self(self.0 & Self::BASE_MASK)
    }

    #[inline]
    pub fn pack(self) -> u16 {
        self.0 & Self::PACK_MASK
    }

    #[inline]
    pub fn is_packed(self) -> bool {
        self.pack() != Self::PACK_NONE
    }

    /// Whether the element type is a floating-point type.
    #[inline]
    pub fn is_float(self) -> bool {
        matches!(self.base(), Self::F16 | Self::F32 | Self::F64)
    }

    /// Width in bits of a value of this type, or `None` for types without
    /// a defined width (`NONE`, opaque handles).
    pub fn bit_width(self) -> Option<u32> {
        match self.pack() {
            Self::PACK_32 => return Some(32),
            Self::PACK_64 => return Some(64),
            Self::PACK_128 => return Some(128),
            _ => {}
        }
        let bits = match self {
            Self::B1 => 1,
            Self::U8 | Self::S8 | Self::B8 => 8,
            Self::U16 | Self::S16 | Self::F16 | Self::B16 => 16,
            Self::U32 | Self::S32 | Self::F32 | Self::B32 => 32,
            Self::U64 | Self::S64 | Self::F64 | Self::B64 => 64,
            Self::B128 => 128,
            _ => return None,
        };
        Some(bits)
    }

    /// Untyped bit type of the same width (`s32` → `b32`).
    pub fn bit_type(self) -> Option<Self> {
        let ty = match self.bit_width()? {
            1 => Self::B1,
            8 => Self::B8,
            16 => Self::B16,
            32 => Self::B32,
            64 => Self::B64,
            128 => Self::B128,
            _ => return None,
        };
        Some(ty)
    }

    /// Type of the register or constant holding a value of this type.
    ///
    /// Registers are 1, 32, 64 or 128 bits wide, so 8- and 16-bit values
    /// widen to `b32`.
    pub fn reg_type(self) -> Option<Self> {
        let ty = match self.bit_width()? {
            1 => Self::B1,
            8 | 16 | 32 => Self::B32,
            64 => Self::B64,
            128 => Self::B128,
            _ => return None,
        };
        Some(ty)
    }

    /// Natural alignment of a variable of this type, by bit-width bucket.
    pub fn alignment(self) -> Option<Alignment> {
        let align = match self.bit_width()? {
            1 | 8 => Alignment::A1,
            16 => Alignment::A2,
            32 => Alignment::A4,
            64 => Alignment::A8,
            128 => Alignment::A16,
            _ => return None,
        };
        Some(align)
    }

    /// Whether converting a value of type `source` to `self` narrows one
    /// floating-point type to a smaller one.
    #[inline]
    pub fn is_float_narrowing_from(self, source: Self) -> bool {
        self.is_float() && source.is_float() && self.base().0 < source.base().0
    }

    pub fn name(self) -> String {
        let base = match self.base() {
            Self::NONE => "none",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::S8 => "s8",
            Self::S16 => "s16",
            Self::S32 => "s32",
            Self::S64 => "s64",
            Self::F16 => "f16",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::B1 => "b1",
            Self::B8 => "b8",
            Self::B16 => "b16",
            Self::B32 => "b32",
            Self::B64 => "b64",
            Self::B128 => "b128",
            other => return format!("type({})", other.0 | self.pack()),
        };
        if !self.is_packed() {
            return base.to_string();
        }
        let lanes = self.bit_width().unwrap_or(0) / self.base().bit_width().unwrap_or(1);
        format!("{base}x{lanes}")
    }
}

impl std::fmt::Display for BrigType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}
