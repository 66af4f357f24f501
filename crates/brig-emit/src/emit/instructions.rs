//! Instruction records.
//!
//! Every handler enqueues the populated operand slots, writes the offsets as
//! an operand-list blob to the data section and appends one record to the
//! code section. Each appended record counts as one code block entry.

use brig_format::records::{
    DirectiveArgBlock, InstAddr, InstAtomic, InstBase, InstBasic, InstBr, InstCmp, InstCvt,
    InstMem, InstMod, InstSegCvt, Record,
};
use brig_format::{Alignment, BrigType, Opcode, Pack, Round, Segment, Width};

use super::error::{EmitError, Result};
use super::function::FunctionEmitter;
use super::unit::PendingCall;
use crate::ir::{
    BasicBlock, BlockRef, CallBlock, CallInsn, CodeRefTarget, EdgeKind, InstKind, Instruction,
    Operand,
};

impl<'a> FunctionEmitter<'a> {
    pub(super) fn emit_insn(&mut self, block: &BasicBlock, insn: &Instruction) -> Result<()> {
        match &insn.kind {
            InstKind::Atomic {
                op,
                order,
                scope,
                equiv_class,
            } => {
                let repr = InstAtomic {
                    base: self.base(insn, insn.ty)?,
                    segment: self.address_segment(insn)?,
                    memory_order: *order,
                    memory_scope: *scope,
                    atomic_op: *op,
                    equiv_class: *equiv_class,
                };
                self.push(&repr)
            }
            InstKind::Mem { equiv_class } => {
                let repr = InstMem {
                    base: self.base(insn, insn.ty)?,
                    segment: self.address_segment(insn)?,
                    align: Alignment::A1,
                    equiv_class: *equiv_class,
                    width: if insn.opcode == Opcode::LD {
                        Width::W1
                    } else {
                        Width::None
                    },
                    modifier: 0,
                };
                self.push(&repr)
            }
            InstKind::Addr => {
                let repr = InstAddr {
                    base: self.base(insn, insn.ty)?,
                    segment: self.address_segment(insn)?,
                };
                self.push(&repr)
            }
            InstKind::SegCvt { segment } => {
                let source_type = match self.slot(insn, 1)? {
                    Operand::Register { ty, .. } => *ty,
                    other => return Err(unexpected(insn, 1, "a register", other)),
                };
                let repr = InstSegCvt {
                    base: self.base(insn, insn.ty)?,
                    source_type,
                    segment: *segment,
                    modifier: 0,
                };
                self.push(&repr)
            }
            InstKind::Cmp { compare } => {
                let source_type = self.source_type(insn)?;
                let repr = InstCmp {
                    base: self.base(insn, storage_type(insn))?,
                    source_type,
                    modifier: 0,
                    compare: *compare,
                    pack: Pack::NoPack,
                };
                self.push(&repr)
            }
            InstKind::Br => self.emit_branch(block, insn),
            InstKind::CallBlock(call_block) => self.emit_call_block(block, call_block),
            InstKind::Call(call) => self.emit_call(call),
            InstKind::Basic if insn.opcode == Opcode::CVT => self.emit_cvt(insn),
            InstKind::Basic => self.emit_basic(insn),
        }
    }

    fn push<R: Record>(&mut self, repr: &R) -> Result<()> {
        self.unit.code.add_record(repr)?;
        self.insn_count += 1;
        Ok(())
    }

    /// Record prefix with the operand list of `insn`'s populated slots.
    fn base(&mut self, insn: &Instruction, ty: BrigType) -> Result<InstBase> {
        let mut offsets = Vec::with_capacity(insn.operands.len());
        for id in insn.populated() {
            offsets.push(self.enqueue(id)?);
        }
        Ok(InstBase {
            opcode: insn.opcode,
            ty,
            operands: self.operand_list(&offsets)?,
        })
    }

    fn slot(&self, insn: &Instruction, slot: usize) -> Result<&'a Operand> {
        match insn.operand(slot) {
            Some(id) => self.operand(id),
            None => Err(EmitError::UnexpectedOperand {
                opcode: insn.opcode,
                slot,
                expected: "an operand",
                found: "an empty slot",
            }),
        }
    }

    /// Segment of the symbol behind the address in slot 1, flat if none.
    fn address_segment(&self, insn: &Instruction) -> Result<Segment> {
        let operand = self.slot(insn, 1)?;
        let Operand::Address { symbol, .. } = operand else {
            return Err(unexpected(insn, 1, "an address", operand));
        };
        match symbol {
            Some(id) => Ok(self
                .program
                .symbol(*id)
                .ok_or(EmitError::MissingSymbol(*id))?
                .segment),
            None => Ok(Segment::Flat),
        }
    }

    /// Type of the register or immediate in slot 1.
    fn source_type(&self, insn: &Instruction) -> Result<BrigType> {
        let operand = self.slot(insn, 1)?;
        operand
            .value_type()
            .ok_or_else(|| unexpected(insn, 1, "a register or immediate", operand))
    }

    fn emit_basic(&mut self, insn: &Instruction) -> Result<()> {
        let ty = storage_type(insn);
        let base = self.base(insn, ty)?;

        if ty.is_packed() {
            let repr = InstMod {
                base,
                round: if ty.is_float() {
                    Round::FloatNearEven
                } else {
                    Round::None
                },
                // Destination and sources share the packing layout.
                pack: if insn.operand(2).is_some() {
                    Pack::Pp
                } else {
                    Pack::P
                },
            };
            self.push(&repr)
        } else {
            self.push(&InstBasic { base })
        }
    }

    fn emit_cvt(&mut self, insn: &Instruction) -> Result<()> {
        let source_type = self.source_type(insn)?;
        let repr = InstCvt {
            base: self.base(insn, insn.ty)?,
            source_type,
            round: if insn.ty.is_float_narrowing_from(source_type) {
                Round::FloatNearEven
            } else {
                Round::None
            },
        };
        self.push(&repr)
    }

    /// Conditional branch to the block's true successor.
    fn emit_branch(&mut self, block: &BasicBlock, insn: &Instruction) -> Result<()> {
        if insn.opcode != Opcode::CBR || insn.operand(2).is_some() {
            return Err(EmitError::UnsupportedBranch(insn.opcode));
        }
        let Some(condition) = insn.operand(0) else {
            return Err(EmitError::UnexpectedOperand {
                opcode: insn.opcode,
                slot: 0,
                expected: "a condition",
                found: "an empty slot",
            });
        };

        let found = block.succs.iter().filter(|e| e.kind == EdgeKind::True).count();
        let target = match block.true_edge() {
            Some(edge) if found == 1 => edge.dest,
            _ => {
                return Err(EmitError::TrueEdgeCount {
                    block: block.index,
                    found,
                });
            }
        };
        let BlockRef::Block(target) = target else {
            return Err(EmitError::BranchToExit { block: block.index });
        };

        let label_ref = self.label_ref(target)?;
        let offsets = [self.enqueue(condition)?, self.enqueue(label_ref)?];
        let repr = InstBr {
            base: InstBase {
                opcode: Opcode::CBR,
                ty: BrigType::B1,
                operands: self.operand_list(&offsets)?,
            },
            width: Width::W1,
        };
        self.push(&repr)
    }

    fn emit_call(&mut self, call: &CallInsn) -> Result<()> {
        match self.operand(call.func)? {
            Operand::CodeRef(CodeRefTarget::Function(_)) => {}
            other => {
                return Err(EmitError::UnexpectedOperand {
                    opcode: Opcode::CALL,
                    slot: 1,
                    expected: "a function reference",
                    found: other.kind_name(),
                });
            }
        }

        let result = self.enqueue(call.result)?;
        let func = self.enqueue(call.func)?;
        let args = self.enqueue(call.args)?;

        let callee_name = self
            .program
            .function(call.callee)
            .map_or_else(|| call.callee.to_string(), |f| f.name.clone());
        self.unit.pending_calls.push(PendingCall {
            callee: call.callee,
            callee_name,
            operand_offset: func,
        });

        let repr = InstBr {
            base: InstBase {
                opcode: Opcode::CALL,
                ty: BrigType::NONE,
                operands: self.operand_list(&[result, func, args])?,
            },
            width: Width::All,
        };
        self.push(&repr)
    }

    /// Argument scope: start marker, argument directives, argument stores,
    /// the call, the result load, end marker.
    fn emit_call_block(&mut self, block: &BasicBlock, call_block: &CallBlock) -> Result<()> {
        self.push(&DirectiveArgBlock::Start)?;

        for &arg in &call_block.input_args {
            self.variable_directive(arg)?;
            self.insn_count += 1;
        }
        if let Some(output) = call_block.output_arg {
            self.variable_directive(output)?;
            self.insn_count += 1;
        }

        for store in &call_block.input_arg_insns {
            self.emit_insn(block, store)?;
        }
        self.emit_insn(block, &call_block.call)?;
        if let Some(load) = &call_block.output_arg_insn {
            self.emit_insn(block, load)?;
        }

        self.push(&DirectiveArgBlock::End)
    }
}

/// Bit-logical ops, moves and compares take the register storage type.
fn storage_type(insn: &Instruction) -> BrigType {
    if insn.opcode.uses_storage_type() {
        insn.ty.reg_type().unwrap_or(insn.ty)
    } else {
        insn.ty
    }
}

fn unexpected(insn: &Instruction, slot: usize, expected: &'static str, found: &Operand) -> EmitError {
    EmitError::UnexpectedOperand {
        opcode: insn.opcode,
        slot,
        expected,
        found: found.kind_name(),
    }
}
