//! One compilation unit's BRIG state.

use std::collections::HashMap;

use brig_format::constants::{BRIG_MAJOR, BRIG_MINOR, HSAIL_MAJOR, HSAIL_MINOR};
use brig_format::records::{DirectiveVersion, OperandCodeRef, Record, RecordHeader};
use brig_format::{
    CODE_SECTION_NAME, DATA_SECTION_NAME, Kind, OPERAND_SECTION_NAME, Section, SectionWriter,
};
use indexmap::IndexMap;

use super::error::{EmitError, Result};
use super::function::FunctionEmitter;
use super::string_table::StringTable;
use crate::config::EmitOptions;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ir::{Function, FunctionId, Program, SymbolId};

/// A call whose code reference is resolved when the unit is finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingCall {
    pub callee: FunctionId,
    /// Callee name for error reporting.
    pub callee_name: String,
    /// Operand-section offset of the code-reference record to patch.
    pub operand_offset: u32,
}

/// Owns the three sections and everything shared between functions.
///
/// Functions are emitted one at a time with [`BrigUnit::emit_function`];
/// [`BrigUnit::finish`] links calls and writes the sections out.
#[derive(Debug)]
pub struct BrigUnit {
    pub(super) options: EmitOptions,
    pub(super) data: Section,
    pub(super) code: Section,
    pub(super) operand: Section,
    pub(super) strings: StringTable,
    /// Code-section offset of each symbol's variable directive.
    pub(super) directives: HashMap<SymbolId, u32>,
    /// Name shared by every result symbol, interned on first use.
    pub(super) result_name: Option<u32>,
    pub(super) function_offsets: IndexMap<FunctionId, u32>,
    pub(super) pending_calls: Vec<PendingCall>,
    pub(super) diagnostics: Diagnostics,
}

impl BrigUnit {
    /// Creates the sections and writes the version directive.
    pub fn new(options: EmitOptions) -> Result<Self> {
        let mut unit = Self {
            options,
            data: Section::with_chunk_size(DATA_SECTION_NAME, options.chunk_size)?,
            code: Section::with_chunk_size(CODE_SECTION_NAME, options.chunk_size)?,
            operand: Section::with_chunk_size(OPERAND_SECTION_NAME, options.chunk_size)?,
            strings: StringTable::new(),
            directives: HashMap::new(),
            result_name: None,
            function_offsets: IndexMap::new(),
            pending_calls: Vec::new(),
            diagnostics: Diagnostics::new(),
        };
        unit.emit_version_directive()?;
        Ok(unit)
    }

    fn emit_version_directive(&mut self) -> Result<u32> {
        let version = DirectiveVersion {
            hsail_major: HSAIL_MAJOR,
            hsail_minor: HSAIL_MINOR,
            brig_major: BRIG_MAJOR,
            brig_minor: BRIG_MINOR,
            profile: self.options.profile,
            machine_model: self.options.machine_model,
        };
        Ok(self.code.add_record(&version)?)
    }

    /// Emits one function: directives, instructions, then its operands.
    ///
    /// Returns the code-section offset of the function's header.
    pub fn emit_function(&mut self, program: &Program, function: &Function) -> Result<u32> {
        FunctionEmitter::new(self, program, function).run()
    }

    /// Resolves pending calls and writes data, code and operand sections.
    ///
    /// A call to a function never emitted in this unit is reported as
    /// [`DiagnosticKind::MissingFunctionOffset`] and fails the unit. On
    /// failure the error carries every diagnostic collected so far.
    pub fn finish(mut self, writer: &mut dyn SectionWriter) -> Result<Diagnostics> {
        match self.write_out(writer) {
            Ok(()) => Ok(self.diagnostics),
            Err(source) => Err(EmitError::Unfinished {
                source: Box::new(source),
                diagnostics: self.diagnostics,
            }),
        }
    }

    fn write_out(&mut self, writer: &mut dyn SectionWriter) -> Result<()> {
        self.link_calls()?;

        for section in [&mut self.data, &mut self.code, &mut self.operand] {
            section.round_up(4)?;
        }

        tracing::debug!(
            data = self.data.total_size(),
            code = self.code.total_size(),
            operand = self.operand.total_size(),
            "writing brig sections"
        );

        self.data.output(writer)?;
        self.code.output(writer)?;
        self.operand.output(writer)?;
        Ok(())
    }

    fn link_calls(&mut self) -> Result<()> {
        tracing::debug!(count = self.pending_calls.len(), "linking calls");

        for call in &self.pending_calls {
            let Some(&target) = self.function_offsets.get(&call.callee) else {
                self.diagnostics
                    .report(DiagnosticKind::MissingFunctionOffset)
                    .message(&call.callee_name)
                    .emit();
                return Err(EmitError::MissingFunctionOffset {
                    callee: call.callee,
                    name: call.callee_name.clone(),
                });
            };

            let at = call.operand_offset;
            let header = RecordHeader::read(self.operand.record(at, OperandCodeRef::SIZE)?)?;
            if header.kind != Kind::OPERAND_CODE_REF {
                return Err(EmitError::NotCodeRef {
                    offset: at,
                    found: header.kind,
                });
            }
            self.operand
                .patch_u32(at + OperandCodeRef::REFERENCE_AT as u32, target)?;
        }
        Ok(())
    }

    pub fn options(&self) -> &EmitOptions {
        &self.options
    }

    pub fn data(&self) -> &Section {
        &self.data
    }

    pub fn code(&self) -> &Section {
        &self.code
    }

    pub fn operand(&self) -> &Section {
        &self.operand
    }

    /// Code-section offset of each emitted function's header, in emission order.
    pub fn function_offsets(&self) -> &IndexMap<FunctionId, u32> {
        &self.function_offsets
    }

    pub fn function_offset(&self, id: FunctionId) -> Option<u32> {
        self.function_offsets.get(&id).copied()
    }

    pub fn pending_calls(&self) -> &[PendingCall] {
        &self.pending_calls
    }

    pub fn directive_offset(&self, symbol: SymbolId) -> Option<u32> {
        self.directives.get(&symbol).copied()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }
}
