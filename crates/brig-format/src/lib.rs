//! BRIG container format: record layouts, type codes and section storage.
//!
//! This crate knows nothing about the program being compiled. It defines
//! how records are laid out, how sections grow and are written, and how to
//! render finished sections for inspection.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod codes;
pub mod constants;
pub mod dump;
pub mod error;
pub mod kinds;
pub mod opcode;
pub mod output;
pub mod records;
pub mod section;
pub mod types;

#[cfg(test)]
mod types_tests;

pub use codes::{
    Alignment, Allocation, AtomicOp, CompareOp, Linkage, MachineModel, MemoryOrder, MemoryScope,
    Pack, Profile, RegisterKind, Round, Segment, Width,
};
pub use constants::{
    CODE_SECTION_NAME, DATA_SECTION_NAME, OPERAND_SECTION_NAME, PREFIX_GLOBAL, PREFIX_LABEL,
    PREFIX_LOCAL,
};
pub use dump::{SectionBytes, dump};
pub use error::FormatError;
pub use kinds::Kind;
pub use opcode::Opcode;
pub use output::{MemoryWriter, SectionWriter, StreamWriter};
pub use records::{Record, RecordHeader};
pub use section::Section;
pub use types::BrigType;
