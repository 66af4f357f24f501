//! BRIG emission from the program representation.
//!
//! This module handles:
//! - String interning into the data section
//! - Variable, function and label directives
//! - Instruction records and their operand lists
//! - Operand records, written per function in enqueue order
//! - Call linkage once every function of the unit is emitted
//!
//! Entry point: [`BrigUnit`].

mod directives;
mod error;
mod function;
mod instructions;
mod operands;
mod string_table;
mod unit;

#[cfg(test)]
mod string_table_tests;
#[cfg(test)]
mod unit_tests;

pub use error::{EmitError, Result};
pub use string_table::StringTable;
pub use unit::{BrigUnit, PendingCall};
