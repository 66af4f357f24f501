//! Operand queue and operand records.
//!
//! Instructions reference operands by offsets that do not exist yet. Each
//! operand gets its offset the first time an instruction enqueues it,
//! projected from the fixed record sizes; the records themselves are
//! written in enqueue order when the function is flushed.

use brig_format::records::{
    OperandAddress, OperandCodeList, OperandCodeRef, OperandData, OperandReg,
};
use brig_format::{BrigType, RegisterKind};

use super::error::{EmitError, Result};
use super::function::FunctionEmitter;
use crate::diagnostics::DiagnosticKind;
use crate::ir::{CodeRefTarget, ImmediateValue, Operand, OperandId, SymbolId};

/// Operands of one function awaiting their records.
#[derive(Debug)]
pub(super) struct OperandQueue {
    offsets: Vec<Option<u32>>,
    order: Vec<OperandId>,
    projected: u32,
}

impl OperandQueue {
    /// `start` is the operand section's size when the function begins.
    pub(super) fn new(operand_count: usize, start: u32) -> Self {
        Self {
            offsets: vec![None; operand_count],
            order: Vec::new(),
            projected: start,
        }
    }

    pub(super) fn offset(&self, id: OperandId) -> Option<u32> {
        self.offsets.get(id.index()).copied().flatten()
    }

    pub(super) fn len(&self) -> usize {
        self.order.len()
    }

    /// Offset at which `id` will be written. Queues it on first use.
    pub(super) fn enqueue(&mut self, id: OperandId, record_size: u32) -> Option<u32> {
        let slot = self.offsets.get_mut(id.index())?;
        if let Some(offset) = *slot {
            return Some(offset);
        }
        let offset = self.projected;
        *slot = Some(offset);
        self.order.push(id);
        self.projected += record_size;
        Some(offset)
    }
}

impl<'a> FunctionEmitter<'a> {
    pub(super) fn operand(&self, id: OperandId) -> Result<&'a Operand> {
        self.function
            .operand(id)
            .ok_or_else(|| EmitError::MissingOperand(id, self.function.name.clone()))
    }

    pub(super) fn enqueue(&mut self, id: OperandId) -> Result<u32> {
        let size = self.operand(id)?.record_size();
        self.queue
            .enqueue(id, size)
            .ok_or_else(|| EmitError::MissingOperand(id, self.function.name.clone()))
    }

    /// Writes every queued operand. Queue order grows while flushing when an
    /// address pulls in a base register seen for the first time.
    pub(super) fn flush_operands(&mut self) -> Result<()> {
        let mut next = 0;
        while let Some(&id) = self.queue.order.get(next) {
            next += 1;

            let queued = self.queue.offset(id).unwrap_or_default();
            let actual = self.unit.operand.total_size();
            if queued != actual {
                return Err(EmitError::QueueMismatch {
                    operand: id,
                    queued,
                    actual,
                });
            }

            match self.operand(id)? {
                Operand::Immediate { ty, value } => self.emit_immediate(*ty, *value)?,
                Operand::Register { ty, hard_num } => self.emit_register(*ty, *hard_num)?,
                Operand::Address {
                    symbol,
                    reg,
                    offset,
                } => self.emit_address(*symbol, *reg, *offset)?,
                Operand::CodeRef(target) => self.emit_code_ref(*target)?,
                Operand::CodeList(symbols) => self.emit_code_list(symbols)?,
            }
        }

        tracing::debug!(
            function = %self.function.name,
            operands = self.queue.len(),
            "flushed operands"
        );
        Ok(())
    }

    fn emit_immediate(&mut self, ty: BrigType, value: ImmediateValue) -> Result<()> {
        let bytes = match immediate_bytes(ty, value) {
            Some(bytes) => bytes,
            None => {
                let width = unsupported_immediate_width(ty)
                    .ok_or(EmitError::UnencodableImmediate(ty))?;
                self.unit
                    .diagnostics
                    .report(DiagnosticKind::UnsupportedImmediate)
                    .message(ty.name())
                    .in_function(&self.function.name)
                    .emit();
                vec![0; width]
            }
        };

        let mut blob = Vec::with_capacity(4 + bytes.len());
        blob.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        blob.extend_from_slice(&bytes);
        let data = self.unit.data.add(&blob)?;

        self.unit.operand.add_record(&OperandData { data })?;
        self.unit.data.round_up(4)?;
        Ok(())
    }

    fn emit_register(&mut self, ty: BrigType, hard_num: u16) -> Result<()> {
        let reg_kind = match ty.reg_type() {
            Some(BrigType::B1) => RegisterKind::Control,
            Some(BrigType::B32) => RegisterKind::Single,
            Some(BrigType::B64) => RegisterKind::Double,
            Some(BrigType::B128) => RegisterKind::Quad,
            _ => return Err(EmitError::RegisterClass(ty)),
        };
        self.unit.operand.add_record(&OperandReg {
            reg_kind,
            reg_num: hard_num,
        })?;
        Ok(())
    }

    fn emit_address(
        &mut self,
        symbol: Option<SymbolId>,
        reg: Option<OperandId>,
        offset: i64,
    ) -> Result<()> {
        let symbol = match symbol {
            Some(symbol) => self.variable_directive(symbol)?,
            None => 0,
        };
        let reg = match reg {
            Some(reg) => self.enqueue(reg)?,
            None => 0,
        };
        self.unit
            .operand
            .add_record(&OperandAddress::new(symbol, reg, offset))?;
        Ok(())
    }

    fn emit_code_ref(&mut self, target: CodeRefTarget) -> Result<()> {
        let reference = match target {
            CodeRefTarget::Label(block) => self
                .labels
                .get(block.index())
                .copied()
                .flatten()
                .ok_or(EmitError::MissingLabel(block))?,
            // Patched once every function of the unit has an offset.
            CodeRefTarget::Function(_) => 0,
        };
        self.unit.operand.add_record(&OperandCodeRef { reference })?;
        Ok(())
    }

    fn emit_code_list(&mut self, symbols: &[SymbolId]) -> Result<()> {
        let mut blob = Vec::with_capacity(4 + 4 * symbols.len());
        blob.extend_from_slice(&(4 * symbols.len() as u32).to_le_bytes());
        for &symbol in symbols {
            let offset = self
                .unit
                .directive_offset(symbol)
                .ok_or(EmitError::MissingDirective(symbol))?;
            blob.extend_from_slice(&offset.to_le_bytes());
        }

        let elements = self.unit.data.add(&blob)?;
        self.unit.data.round_up(4)?;
        self.unit
            .operand
            .add_record(&OperandCodeList { elements })?;
        Ok(())
    }
}

/// Little-endian payload of a supported immediate.
fn immediate_bytes(ty: BrigType, value: ImmediateValue) -> Option<Vec<u8>> {
    let bytes = match ty {
        BrigType::U8 | BrigType::S8 | BrigType::B8 | BrigType::B1 => {
            vec![value.as_i64() as u8]
        }
        BrigType::U16 | BrigType::S16 | BrigType::B16 => {
            (value.as_i64() as u16).to_le_bytes().to_vec()
        }
        BrigType::U32 | BrigType::S32 | BrigType::B32 => {
            (value.as_i64() as u32).to_le_bytes().to_vec()
        }
        BrigType::U64 | BrigType::S64 | BrigType::B64 => {
            (value.as_i64() as u64).to_le_bytes().to_vec()
        }
        // `as` rounds to nearest, ties to even.
        BrigType::F32 => (value.as_f64() as f32).to_bits().to_le_bytes().to_vec(),
        BrigType::F64 => value.as_f64().to_bits().to_le_bytes().to_vec(),
        _ => return None,
    };
    Some(bytes)
}

/// Zeroed payload width written for immediates with no encoding yet.
fn unsupported_immediate_width(ty: BrigType) -> Option<usize> {
    if ty == BrigType::F16 {
        return Some(2);
    }
    if ty.is_packed() {
        return ty.bit_width().map(|bits| bits as usize / 8);
    }
    None
}
