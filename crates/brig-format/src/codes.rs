//! Single-byte field codes stored inside records.

macro_rules! raw_codes {
    ($ty:ident: $repr:ty { $($variant:ident),+ $(,)? }) => {
        impl $ty {
            /// Decodes a raw field value, `None` if no variant matches.
            pub fn from_raw(raw: $repr) -> Option<Self> {
                $(
                    if raw == Self::$variant as $repr {
                        return Some(Self::$variant);
                    }
                )+
                None
            }
        }
    };
}

/// Memory segment of a symbol or memory access.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Segment {
    #[default]
    None = 0,
    Flat = 1,
    Global = 2,
    Readonly = 3,
    Kernarg = 4,
    Group = 5,
    Private = 6,
    Spill = 7,
    Arg = 8,
}

impl Segment {
    /// Name used when synthesizing identifiers for anonymous symbols.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Flat => "flat",
            Self::Global => "global",
            Self::Readonly => "readonly",
            Self::Kernarg => "kernarg",
            Self::Group => "group",
            Self::Private => "private",
            Self::Spill => "spill",
            Self::Arg => "arg",
        }
    }
}

/// Symbol visibility.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Linkage {
    #[default]
    None = 0,
    Program = 1,
    Module = 2,
    Function = 3,
    Arg = 4,
}

/// Storage allocation class of a variable.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Allocation {
    #[default]
    None = 0,
    Program = 1,
    Agent = 2,
    Automatic = 3,
}

/// Alignment, encoded as `log2(bytes) + 1`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Alignment {
    #[default]
    None = 0,
    A1 = 1,
    A2 = 2,
    A4 = 3,
    A8 = 4,
    A16 = 5,
}

impl Alignment {
    pub fn bytes(self) -> u32 {
        match self {
            Self::None => 0,
            Self::A1 => 1,
            Self::A2 => 2,
            Self::A4 => 4,
            Self::A8 => 8,
            Self::A16 => 16,
        }
    }
}

/// Hardware register class.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u16)]
pub enum RegisterKind {
    /// 1-bit control register (`$c`).
    Control = 0,
    /// 32-bit register (`$s`).
    Single = 1,
    /// 64-bit register (`$d`).
    Double = 2,
    /// 128-bit register (`$q`).
    Quad = 3,
}

/// Branch and memory access width.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Width {
    #[default]
    None = 0,
    W1 = 1,
    All = 34,
}

/// Rounding modifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Round {
    #[default]
    None = 0,
    FloatDefault = 1,
    FloatNearEven = 2,
}

/// Packing mode of packed (SIMD-lane) operations.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Pack {
    #[default]
    NoPack = 0,
    /// Unary: packed source.
    P = 1,
    /// Binary: both sources packed.
    Pp = 2,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum Profile {
    Base = 0,
    #[default]
    Full = 1,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum MachineModel {
    Small = 0,
    #[default]
    Large = 1,
}

/// Comparison performed by `cmp`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum CompareOp {
    Eq = 0,
    Ne = 1,
    Lt = 2,
    Le = 3,
    Gt = 4,
    Ge = 5,
}

/// Read-modify-write operation performed by `atomic`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum AtomicOp {
    And = 0,
    Or = 1,
    Xor = 2,
    Cas = 3,
    Exch = 4,
    Add = 5,
    Sub = 8,
    Max = 9,
    Min = 10,
    Ld = 11,
    St = 12,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum MemoryOrder {
    #[default]
    None = 0,
    Relaxed = 1,
    ScAcquire = 2,
    ScRelease = 3,
    ScAcquireRelease = 4,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[repr(u8)]
pub enum MemoryScope {
    #[default]
    None = 0,
    WorkItem = 1,
    Wavefront = 2,
    WorkGroup = 3,
    Agent = 4,
    System = 5,
}

raw_codes!(Segment: u8 { None, Flat, Global, Readonly, Kernarg, Group, Private, Spill, Arg });
raw_codes!(Linkage: u8 { None, Program, Module, Function, Arg });
raw_codes!(Allocation: u8 { None, Program, Agent, Automatic });
raw_codes!(Alignment: u8 { None, A1, A2, A4, A8, A16 });
raw_codes!(RegisterKind: u16 { Control, Single, Double, Quad });
raw_codes!(Width: u8 { None, W1, All });
raw_codes!(Round: u8 { None, FloatDefault, FloatNearEven });
raw_codes!(Pack: u8 { NoPack, P, Pp });
raw_codes!(Profile: u8 { Base, Full });
raw_codes!(MachineModel: u8 { Small, Large });
raw_codes!(CompareOp: u8 { Eq, Ne, Lt, Le, Gt, Ge });
raw_codes!(AtomicOp: u8 { And, Or, Xor, Cas, Exch, Add, Sub, Max, Min, Ld, St });
raw_codes!(MemoryOrder: u8 { None, Relaxed, ScAcquire, ScRelease, ScAcquireRelease });
raw_codes!(MemoryScope: u8 { None, WorkItem, Wavefront, WorkGroup, Agent, System });
