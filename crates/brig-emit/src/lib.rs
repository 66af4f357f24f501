//! brig-emit: serializes HSAIL-level programs into BRIG sections.
//!
//! # Example
//!
//! ```
//! use brig_emit::ir::{BlockRef, Edge, Function, Program};
//! use brig_emit::{BrigUnit, EmitOptions};
//! use brig_format::MemoryWriter;
//!
//! let mut program = Program::new();
//! let mut kernel = Function::kernel("main", 1);
//! kernel.entry_mut().succs.push(Edge::on_false(BlockRef::Exit));
//! let id = program.add_function(kernel);
//!
//! let mut unit = BrigUnit::new(EmitOptions::default()).unwrap();
//! unit.emit_function(&program, program.function(id).unwrap()).unwrap();
//!
//! let mut writer = MemoryWriter::new();
//! let diagnostics = unit.finish(&mut writer).unwrap();
//! assert!(diagnostics.is_empty());
//! assert!(writer.section("hsa_code").is_some());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod ir;

#[cfg(test)]
mod test_utils;

pub use config::EmitOptions;
pub use diagnostics::{DiagnosticKind, Diagnostics, Severity};
pub use emit::{BrigUnit, EmitError, PendingCall, Result, StringTable};
