use brig_format::{BrigType, Linkage, Segment};

/// What declared a symbol.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum DeclKind {
    #[default]
    Variable,
    Parameter,
    /// The function's return value. All result symbols share one name.
    Result,
    Constant,
    /// Compiler temporary with no source declaration.
    Artificial,
}

/// A variable, argument, local or spill slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    /// `None` for anonymous symbols, which get `__<segment>_<ordinal>`.
    pub name: Option<String>,
    pub ordinal: u32,
    pub segment: Segment,
    pub ty: BrigType,
    /// Array dimension, 0 for scalars.
    pub dim: u64,
    pub linkage: Linkage,
    pub decl: DeclKind,
    /// Program-scope symbol.
    pub global: bool,
}

impl Symbol {
    pub fn new(name: impl Into<String>, segment: Segment, ty: BrigType) -> Self {
        Self {
            name: Some(name.into()),
            ordinal: 0,
            segment,
            ty,
            dim: 0,
            linkage: Linkage::Function,
            decl: DeclKind::Variable,
            global: false,
        }
    }

    pub fn anonymous(ordinal: u32, segment: Segment, ty: BrigType) -> Self {
        Self {
            name: None,
            ordinal,
            ..Self::new("", segment, ty)
        }
    }

    /// Program-scope global variable.
    pub fn global(name: impl Into<String>, segment: Segment, ty: BrigType) -> Self {
        Self {
            linkage: Linkage::Program,
            global: true,
            ..Self::new(name, segment, ty)
        }
    }

    /// Function argument in the `arg` segment.
    pub fn parameter(name: impl Into<String>, ty: BrigType) -> Self {
        Self {
            linkage: Linkage::Arg,
            decl: DeclKind::Parameter,
            ..Self::new(name, Segment::Arg, ty)
        }
    }

    /// Function return value in the `arg` segment.
    pub fn result(ty: BrigType) -> Self {
        Self {
            name: None,
            linkage: Linkage::Arg,
            decl: DeclKind::Result,
            ..Self::new("", Segment::Arg, ty)
        }
    }

    pub fn with_decl(mut self, decl: DeclKind) -> Self {
        self.decl = decl;
        self
    }

    pub fn with_dim(mut self, dim: u64) -> Self {
        self.dim = dim;
        self
    }

    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Whether this symbol is a true variable (counted among emitted locals).
    pub fn is_variable(&self) -> bool {
        self.decl == DeclKind::Variable
    }
}
