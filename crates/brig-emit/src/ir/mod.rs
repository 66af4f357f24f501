//! Program representation consumed by the emitter.
//!
//! The front-end builds these values; the emitter only reads them. Symbols
//! and functions live in a [`Program`], operands in their owning
//! [`Function`]'s arena, and everything is referenced by index newtypes.

mod function;
mod instruction;
mod operand;
mod symbol;

pub use function::{BasicBlock, BlockRef, Edge, EdgeKind, Function};
pub use instruction::{CallBlock, CallInsn, InstKind, Instruction, MAX_OPERANDS};
pub use operand::{CodeRefTarget, ImmediateValue, Operand};
pub use symbol::{DeclKind, Symbol};

/// Index into [`Program`] symbols.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(transparent)]
pub struct SymbolId(pub u32);

/// Index into [`Program`] functions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[repr(transparent)]
pub struct FunctionId(pub u32);

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fn#{}", self.0)
    }
}

/// Index into a function's layout-ordered blocks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct BlockId(pub u32);

/// Index into a function's operand arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct OperandId(pub u32);

impl SymbolId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FunctionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl BlockId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl OperandId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Symbols and functions of one compilation unit.
#[derive(Debug, Default)]
pub struct Program {
    symbols: Vec<Symbol>,
    functions: Vec<Function>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_symbol(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    /// Registers a function and assigns its id.
    pub fn add_function(&mut self, mut function: Function) -> FunctionId {
        let id = FunctionId(self.functions.len() as u32);
        function.id = id;
        self.functions.push(function);
        id
    }

    pub fn function(&self, id: FunctionId) -> Option<&Function> {
        self.functions.get(id.index())
    }

    pub fn function_mut(&mut self, id: FunctionId) -> Option<&mut Function> {
        self.functions.get_mut(id.index())
    }

    pub fn functions(&self) -> &[Function] {
        &self.functions
    }
}
