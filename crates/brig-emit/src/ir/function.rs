use super::{BlockId, CodeRefTarget, FunctionId, Instruction, Operand, OperandId, SymbolId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    True,
    False,
}

/// Successor of a block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockRef {
    Block(BlockId),
    /// Leaving the function.
    Exit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub dest: BlockRef,
    pub kind: EdgeKind,
}

impl Edge {
    pub fn on_true(dest: BlockRef) -> Self {
        Self {
            dest,
            kind: EdgeKind::True,
        }
    }

    pub fn on_false(dest: BlockRef) -> Self {
        Self {
            dest,
            kind: EdgeKind::False,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BasicBlock {
    /// CFG index, used in the label name.
    pub index: u32,
    pub insns: Vec<Instruction>,
    pub succs: Vec<Edge>,
    /// Code reference to this block's label; `None` for the entry block.
    pub label_ref: Option<OperandId>,
}

impl BasicBlock {
    fn new(index: u32, label_ref: Option<OperandId>) -> Self {
        Self {
            index,
            insns: Vec::new(),
            succs: Vec::new(),
            label_ref,
        }
    }

    pub fn push(&mut self, insn: Instruction) {
        self.insns.push(insn);
    }

    pub fn true_edge(&self) -> Option<&Edge> {
        self.succs.iter().find(|e| e.kind == EdgeKind::True)
    }

    pub fn false_edges(&self) -> impl Iterator<Item = &Edge> {
        self.succs.iter().filter(|e| e.kind == EdgeKind::False)
    }
}

/// A function or kernel body.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub(super) id: FunctionId,
    pub name: String,
    /// Unit-wide number used to keep label names unique.
    pub uid: u32,
    pub kernel: bool,
    pub output_arg: Option<SymbolId>,
    pub input_args: Vec<SymbolId>,
    pub locals: Vec<SymbolId>,
    pub spills: Vec<SymbolId>,
    operands: Vec<Operand>,
    entry: BasicBlock,
    blocks: Vec<BasicBlock>,
}

impl Function {
    pub fn new(name: impl Into<String>, uid: u32) -> Self {
        Self {
            id: FunctionId(u32::MAX),
            name: name.into(),
            uid,
            kernel: false,
            output_arg: None,
            input_args: Vec::new(),
            locals: Vec::new(),
            spills: Vec::new(),
            operands: Vec::new(),
            entry: BasicBlock::new(0, None),
            blocks: Vec::new(),
        }
    }

    pub fn kernel(name: impl Into<String>, uid: u32) -> Self {
        Self {
            kernel: true,
            ..Self::new(name, uid)
        }
    }

    /// Id assigned by [`super::Program::add_function`].
    pub fn id(&self) -> FunctionId {
        self.id
    }

    pub fn add_operand(&mut self, operand: Operand) -> OperandId {
        let id = OperandId(self.operands.len() as u32);
        self.operands.push(operand);
        id
    }

    pub fn operand(&self, id: OperandId) -> Option<&Operand> {
        self.operands.get(id.index())
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// Appends a block in layout order, along with its label reference.
    pub fn add_block(&mut self, index: u32) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        let label_ref = self.add_operand(Operand::CodeRef(CodeRefTarget::Label(id)));
        self.blocks.push(BasicBlock::new(index, Some(label_ref)));
        id
    }

    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.index())
    }

    pub fn block_mut(&mut self, id: BlockId) -> Option<&mut BasicBlock> {
        self.blocks.get_mut(id.index())
    }

    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    pub fn entry(&self) -> &BasicBlock {
        &self.entry
    }

    pub fn entry_mut(&mut self) -> &mut BasicBlock {
        &mut self.entry
    }
}
