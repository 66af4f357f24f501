//! Error types for BRIG emission.

use brig_format::{FormatError, Kind, Opcode};

use crate::diagnostics::Diagnostics;
use crate::ir::{BlockId, FunctionId, OperandId, SymbolId};

/// Internal-consistency fault. The unit's output must be discarded.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error(transparent)]
    Section(#[from] FormatError),

    #[error("operand {operand:?} was queued at {queued} but lands at {actual}")]
    QueueMismatch {
        operand: OperandId,
        queued: u32,
        actual: u32,
    },

    #[error("operand {0:?} does not exist in function `{1}`")]
    MissingOperand(OperandId, String),

    #[error("symbol {0:?} does not exist")]
    MissingSymbol(SymbolId),

    #[error("`{opcode}` expects {expected} in slot {slot}, found {found}")]
    UnexpectedOperand {
        opcode: Opcode,
        slot: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("`{0}` branches are not supported")]
    UnsupportedBranch(Opcode),

    #[error("conditional branch in block {block} needs exactly one true edge, found {found}")]
    TrueEdgeCount { block: u32, found: usize },

    #[error("block {block} needs exactly one fallthrough edge, found {found}")]
    FallthroughEdgeCount { block: u32, found: usize },

    #[error("block {block} branches to the function exit")]
    BranchToExit { block: u32 },

    #[error("code list references symbol {0:?} before its directive was emitted")]
    MissingDirective(SymbolId),

    #[error("label for block {0:?} was referenced before it was emitted")]
    MissingLabel(BlockId),

    #[error("register of type `{0}` has no storage class")]
    RegisterClass(brig_format::BrigType),

    #[error("immediate of type `{0}` has no encoding")]
    UnencodableImmediate(brig_format::BrigType),

    #[error("call to `{name}` ({callee}) was never emitted")]
    MissingFunctionOffset { callee: FunctionId, name: String },

    #[error("first input argument of `{function}` landed at {actual}, header says {expected}")]
    HeaderLayoutMismatch {
        function: String,
        expected: u32,
        actual: u32,
    },

    #[error("call patch target at {offset} is a {found} record, not a code reference")]
    NotCodeRef { offset: u32, found: Kind },

    /// Finishing failed. Holds the diagnostics the unit had collected.
    #[error("{source}")]
    Unfinished {
        #[source]
        source: Box<EmitError>,
        diagnostics: Diagnostics,
    },

    #[error("failed to write sections: {0}")]
    Io(#[from] std::io::Error),
}

impl EmitError {
    /// Diagnostics collected before the unit failed, if the error carries them.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Unfinished { diagnostics, .. } => Some(diagnostics),
            _ => None,
        }
    }

    /// The underlying fault, unwrapping [`EmitError::Unfinished`].
    pub fn root(&self) -> &EmitError {
        match self {
            Self::Unfinished { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, EmitError>;
