//! Variable, function and label directives.

use brig_format::constants::{EXECUTABLE_DEFINITION, SYMBOL_DEFINITION};
use brig_format::records::{DirectiveExecutable, DirectiveLabel, DirectiveVariable, Record};
use brig_format::{Alignment, Allocation, Linkage, PREFIX_GLOBAL, PREFIX_LABEL, PREFIX_LOCAL};

use super::error::{EmitError, Result};
use super::function::FunctionEmitter;
use super::unit::BrigUnit;
use crate::diagnostics::DiagnosticKind;
use crate::ir::{BasicBlock, BlockId, DeclKind, Program, SymbolId};

/// Name of result symbols that carry none.
const RESULT_NAME: &str = "res";

const VARIABLE_SIZE: u32 = DirectiveVariable::SIZE as u32;

impl BrigUnit {
    pub(super) fn intern(&mut self, text: &str, prefix: Option<u8>) -> Result<u32> {
        self.strings.intern(&mut self.data, text, prefix)
    }

    /// Returns the offset of `symbol`'s variable directive, writing it to the
    /// code section on first use.
    pub fn emit_variable_directive(&mut self, program: &Program, symbol: SymbolId) -> Result<u32> {
        self.variable_directive(program, symbol, None)
    }

    pub(super) fn variable_directive(
        &mut self,
        program: &Program,
        id: SymbolId,
        function: Option<&str>,
    ) -> Result<u32> {
        if let Some(&offset) = self.directives.get(&id) {
            return Ok(offset);
        }
        let symbol = program.symbol(id).ok_or(EmitError::MissingSymbol(id))?;

        let (prefix, allocation) = if symbol.global {
            (PREFIX_GLOBAL, Allocation::Program)
        } else {
            (PREFIX_LOCAL, Allocation::Automatic)
        };

        let name = match (&symbol.name, symbol.decl) {
            (_, DeclKind::Result) => match self.result_name {
                Some(offset) => offset,
                None => {
                    let text = symbol.name.as_deref().unwrap_or(RESULT_NAME);
                    let offset = self.intern(text, Some(PREFIX_LOCAL))?;
                    self.result_name = Some(offset);
                    offset
                }
            },
            (Some(name), _) => self.intern(name, Some(prefix))?,
            (None, _) => {
                let synthesized = format!("__{}_{}", symbol.segment.name(), symbol.ordinal);
                self.intern(&synthesized, Some(prefix))?
            }
        };

        if symbol.global && symbol.decl == DeclKind::Variable {
            let display = symbol.name.as_deref().unwrap_or_default();
            let mut report = self
                .diagnostics
                .report(DiagnosticKind::GlobalReferencedByName)
                .message(format!("&{display}"));
            if let Some(function) = function {
                report = report.in_function(function);
            }
            report.emit();
        }

        let repr = DirectiveVariable {
            name,
            init: 0,
            ty: symbol.ty,
            segment: symbol.segment,
            align: symbol.ty.alignment().unwrap_or(Alignment::None),
            dim: symbol.dim,
            modifier: SYMBOL_DEFINITION,
            linkage: symbol.linkage,
            allocation,
        };
        let offset = self.code.add_record(&repr)?;
        tracing::trace!(symbol = id.0, offset, "variable directive");

        self.directives.insert(id, offset);
        Ok(offset)
    }
}

impl FunctionEmitter<'_> {
    pub(super) fn variable_directive(&mut self, symbol: SymbolId) -> Result<u32> {
        self.unit
            .variable_directive(self.program, symbol, Some(&self.function.name))
    }

    /// Writes the function or kernel directive followed by its argument,
    /// local and spill directives. Returns the header's offset.
    ///
    /// The header's argument and entry offsets are projected from record
    /// sizes before anything after it is written.
    pub(super) fn emit_function_header(&mut self) -> Result<u32> {
        let function = self.function;
        let name = self.unit.intern(&function.name, Some(PREFIX_GLOBAL))?;

        let mut scoped_count = function.spills.len() as u32;
        for &local in &function.locals {
            let symbol = self
                .program
                .symbol(local)
                .ok_or(EmitError::MissingSymbol(local))?;
            if symbol.is_variable() {
                scoped_count += 1;
            }
        }

        let header = self.unit.code.total_size();
        let output_size = if function.output_arg.is_some() {
            VARIABLE_SIZE
        } else {
            0
        };
        let first_in_arg = header + DirectiveExecutable::SIZE as u32 + output_size;
        let first_code_block_entry = first_in_arg + function.input_args.len() as u32 * VARIABLE_SIZE;
        let next_module_entry = first_code_block_entry + scoped_count * VARIABLE_SIZE;

        let repr = DirectiveExecutable {
            kernel: function.kernel,
            name,
            out_arg_count: u16::from(function.output_arg.is_some()),
            in_arg_count: function.input_args.len() as u16,
            first_in_arg,
            first_code_block_entry,
            next_module_entry,
            code_block_entry_count: 0,
            modifier: EXECUTABLE_DEFINITION,
            linkage: Linkage::Program,
        };
        self.unit.function_offsets.insert(function.id(), header);
        self.unit.code.add_record(&repr)?;

        if let Some(output) = function.output_arg {
            self.variable_directive(output)?;
        }

        let mut landed = None;
        for &arg in &function.input_args {
            let offset = self.variable_directive(arg)?;
            landed.get_or_insert(offset);
        }
        if let Some(actual) = landed
            && actual != first_in_arg
        {
            return Err(EmitError::HeaderLayoutMismatch {
                function: function.name.clone(),
                expected: first_in_arg,
                actual,
            });
        }

        for &local in &function.locals {
            if self.program.symbol(local).is_some_and(|s| s.is_variable()) {
                self.insn_count += 1;
            }
            self.variable_directive(local)?;
        }
        for &spill in &function.spills {
            self.variable_directive(spill)?;
            self.insn_count += 1;
        }

        Ok(header)
    }

    /// Writes `BB_<uid>_<index>` for `block` and remembers where it went.
    pub(super) fn emit_label_directive(&mut self, id: BlockId, block: &BasicBlock) -> Result<u32> {
        let text = format!("BB_{}_{}", self.function.uid, block.index);
        let name = self.unit.intern(&text, Some(PREFIX_LABEL))?;

        let offset = self.unit.code.add_record(&DirectiveLabel { name })?;
        tracing::trace!(label = %text, offset, "label directive");

        if let Some(slot) = self.labels.get_mut(id.index()) {
            *slot = Some(offset);
        }
        self.insn_count += 1;
        Ok(offset)
    }
}
