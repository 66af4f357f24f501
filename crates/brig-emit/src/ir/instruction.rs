use brig_format::{AtomicOp, BrigType, CompareOp, MemoryOrder, MemoryScope, Opcode, Segment};

use super::{FunctionId, OperandId, SymbolId};

/// Operand slots per instruction.
pub const MAX_OPERANDS: usize = 5;

/// Record family and kind-specific fields of an instruction.
#[derive(Clone, Debug, PartialEq)]
pub enum InstKind {
    /// Plain arithmetic or move. `cvt` is recognised by opcode.
    Basic,
    Mem {
        equiv_class: u8,
    },
    Atomic {
        op: AtomicOp,
        order: MemoryOrder,
        scope: MemoryScope,
        equiv_class: u8,
    },
    Addr,
    SegCvt {
        segment: Segment,
    },
    Cmp {
        compare: CompareOp,
    },
    /// Conditional branch on the block's true edge.
    Br,
    Call(CallInsn),
    CallBlock(Box<CallBlock>),
}

/// A call instruction.
#[derive(Clone, Debug, PartialEq)]
pub struct CallInsn {
    pub callee: FunctionId,
    /// Code-list operand naming the result argument (possibly empty).
    pub result: OperandId,
    /// Code-reference operand to the callee.
    pub func: OperandId,
    /// Code-list operand naming the input arguments.
    pub args: OperandId,
}

/// The argument scope around a call.
#[derive(Clone, Debug, PartialEq)]
pub struct CallBlock {
    pub input_args: Vec<SymbolId>,
    pub output_arg: Option<SymbolId>,
    /// Stores that fill the input arguments.
    pub input_arg_insns: Vec<Instruction>,
    pub call: Instruction,
    /// Load that reads the result back.
    pub output_arg_insn: Option<Instruction>,
}

/// One instruction of a basic block.
#[derive(Clone, Debug, PartialEq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub ty: BrigType,
    pub operands: [Option<OperandId>; MAX_OPERANDS],
    pub kind: InstKind,
}

impl Instruction {
    pub fn new(opcode: Opcode, ty: BrigType, kind: InstKind) -> Self {
        Self {
            opcode,
            ty,
            operands: [None; MAX_OPERANDS],
            kind,
        }
    }

    pub fn basic(opcode: Opcode, ty: BrigType) -> Self {
        Self::new(opcode, ty, InstKind::Basic)
    }

    pub fn mem(opcode: Opcode, ty: BrigType) -> Self {
        Self::new(opcode, ty, InstKind::Mem { equiv_class: 0 })
    }

    pub fn cmp(ty: BrigType, compare: CompareOp) -> Self {
        Self::new(Opcode::CMP, ty, InstKind::Cmp { compare })
    }

    pub fn cbr() -> Self {
        Self::new(Opcode::CBR, BrigType::B1, InstKind::Br)
    }

    pub fn call(call: CallInsn) -> Self {
        Self::new(Opcode::CALL, BrigType::NONE, InstKind::Call(call))
    }

    pub fn call_block(block: CallBlock) -> Self {
        Self::new(Opcode::CALL, BrigType::NONE, InstKind::CallBlock(Box::new(block)))
    }

    /// Fills slots from the front.
    pub fn with_operands(mut self, operands: &[OperandId]) -> Self {
        for (slot, id) in self.operands.iter_mut().zip(operands) {
            *slot = Some(*id);
        }
        self
    }

    pub fn with_operand(mut self, slot: usize, id: OperandId) -> Self {
        self.operands[slot] = Some(id);
        self
    }

    pub fn operand(&self, slot: usize) -> Option<OperandId> {
        self.operands.get(slot).copied().flatten()
    }

    /// Populated slots in order.
    pub fn populated(&self) -> impl Iterator<Item = OperandId> + '_ {
        self.operands.iter().filter_map(|slot| *slot)
    }
}
