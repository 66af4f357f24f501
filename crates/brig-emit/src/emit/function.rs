//! Per-function emission state and block layout.

use brig_format::records::{DirectiveExecutable, InstBase, InstBr};
use brig_format::{BrigType, Opcode, Width};

use super::error::{EmitError, Result};
use super::operands::OperandQueue;
use super::unit::BrigUnit;
use crate::ir::{BasicBlock, BlockId, BlockRef, Function, OperandId, Program};

/// State that lives while one function is being emitted.
pub(super) struct FunctionEmitter<'a> {
    pub(super) unit: &'a mut BrigUnit,
    pub(super) program: &'a Program,
    pub(super) function: &'a Function,
    pub(super) queue: OperandQueue,
    /// Value written to the header's code block entry count.
    pub(super) insn_count: u32,
    /// Label directive offset per block.
    pub(super) labels: Vec<Option<u32>>,
}

impl<'a> FunctionEmitter<'a> {
    pub(super) fn new(unit: &'a mut BrigUnit, program: &'a Program, function: &'a Function) -> Self {
        let queue = OperandQueue::new(function.operands().len(), unit.operand.total_size());
        Self {
            unit,
            program,
            function,
            queue,
            insn_count: 0,
            labels: vec![None; function.blocks().len()],
        }
    }

    pub(super) fn run(mut self) -> Result<u32> {
        let function = self.function;
        tracing::debug!(function = %function.name, kernel = function.kernel, "emitting function");

        let header = self.emit_function_header()?;

        let entry = function.entry();
        for insn in &entry.insns {
            self.emit_insn(entry, insn)?;
        }

        let mut prev = entry;
        for (index, block) in function.blocks().iter().enumerate() {
            let id = BlockId(index as u32);
            self.emit_fallthrough(prev, Some(id))?;
            self.emit_label_directive(id, block)?;
            for insn in &block.insns {
                self.emit_insn(block, insn)?;
            }
            prev = block;
        }
        self.emit_fallthrough(prev, None)?;

        let code = &mut self.unit.code;
        code.patch_u32(
            header + DirectiveExecutable::CODE_BLOCK_ENTRY_COUNT_AT as u32,
            self.insn_count,
        )?;
        let next_module_entry = code.total_size();
        code.patch_u32(
            header + DirectiveExecutable::NEXT_MODULE_ENTRY_AT as u32,
            next_module_entry,
        )?;

        self.flush_operands()?;

        tracing::debug!(
            function = %function.name,
            insns = self.insn_count,
            code_size = next_module_entry - header,
            "emitted function"
        );
        Ok(header)
    }

    /// Jumps to `block`'s false successor unless it is `next` in layout or
    /// the function exit.
    fn emit_fallthrough(&mut self, block: &BasicBlock, next: Option<BlockId>) -> Result<()> {
        let found = block.false_edges().count();
        let target = match block.false_edges().next() {
            Some(edge) if found == 1 => edge.dest,
            _ => {
                return Err(EmitError::FallthroughEdgeCount {
                    block: block.index,
                    found,
                });
            }
        };

        let target = match target {
            BlockRef::Exit => return Ok(()),
            BlockRef::Block(id) if Some(id) == next => return Ok(()),
            BlockRef::Block(id) => id,
        };

        let label_ref = self.label_ref(target)?;
        let offsets = [self.enqueue(label_ref)?];
        let repr = InstBr {
            base: InstBase {
                opcode: Opcode::BR,
                ty: BrigType::NONE,
                operands: self.operand_list(&offsets)?,
            },
            width: Width::All,
        };
        self.unit.code.add_record(&repr)?;
        self.insn_count += 1;
        Ok(())
    }

    pub(super) fn label_ref(&self, block: BlockId) -> Result<OperandId> {
        self.function
            .block(block)
            .and_then(|b| b.label_ref)
            .ok_or(EmitError::MissingLabel(block))
    }

    /// Writes an operand-list blob to the data section.
    pub(super) fn operand_list(&mut self, offsets: &[u32]) -> Result<u32> {
        let mut blob = Vec::with_capacity(4 + 4 * offsets.len());
        blob.extend_from_slice(&(4 * offsets.len() as u32).to_le_bytes());
        for offset in offsets {
            blob.extend_from_slice(&offset.to_le_bytes());
        }
        let at = self.unit.data.add(&blob)?;
        self.unit.data.round_up(4)?;
        Ok(at)
    }
}
