//! Human-readable dump of finished BRIG sections.
//!
//! Takes the three sections exactly as written (headers included) and lists
//! every code and operand record by offset. Names are resolved through the
//! data section.

use std::fmt::Write as _;

use crate::codes::RegisterKind;
use crate::error::FormatError;
use crate::kinds::Kind;
use crate::records::{
    DirectiveExecutable, DirectiveLabel, DirectiveVariable, DirectiveVersion, InstAddr,
    InstAtomic, InstBase, InstBasic, InstBr, InstCmp, InstCvt, InstMem, InstMod, InstSegCvt,
    OperandAddress, OperandCodeList, OperandCodeRef, OperandData, OperandReg, Record,
    RecordHeader,
};

/// Finished section bytes, as produced by [`crate::Section::to_bytes`].
#[derive(Clone, Copy, Debug)]
pub struct SectionBytes<'a> {
    pub data: &'a [u8],
    pub code: &'a [u8],
    pub operand: &'a [u8],
}

/// Render the code and operand sections.
pub fn dump(sections: SectionBytes<'_>) -> Result<String, FormatError> {
    let ctx = DumpContext { data: sections.data };
    let mut out = String::new();

    writeln!(out, "[code]").unwrap();
    for (offset, bytes) in records(sections.code)? {
        let line = ctx.code_line(bytes)?;
        writeln!(out, "{offset:>5} {line}").unwrap();
    }

    writeln!(out).unwrap();
    writeln!(out, "[operand]").unwrap();
    for (offset, bytes) in records(sections.operand)? {
        let line = ctx.operand_line(bytes)?;
        writeln!(out, "{offset:>5} {line}").unwrap();
    }

    Ok(out)
}

/// Splits a section body into `(offset, record bytes)` pairs.
pub fn records(section: &[u8]) -> Result<Vec<(u32, &[u8])>, FormatError> {
    let header_len = header_byte_count(section)?;
    let mut at = header_len;
    let mut out = Vec::new();
    while at < section.len() {
        let header = RecordHeader::read(&section[at..])?;
        let len = header.byte_count as usize;
        if len == 0 {
            // trailing alignment padding
            break;
        }
        let end = at + len;
        if end > section.len() {
            return Err(FormatError::Truncated {
                needed: end,
                available: section.len(),
            });
        }
        out.push((at as u32, &section[at..end]));
        at = end;
    }
    Ok(out)
}

fn header_byte_count(section: &[u8]) -> Result<usize, FormatError> {
    if section.len() < 8 {
        return Err(FormatError::Truncated {
            needed: 8,
            available: section.len(),
        });
    }
    Ok(u32::from_le_bytes([section[4], section[5], section[6], section[7]]) as usize)
}

struct DumpContext<'a> {
    data: &'a [u8],
}

impl DumpContext<'_> {
    /// Length-prefixed data-section entry at `offset`.
    fn blob(&self, offset: u32) -> Result<&[u8], FormatError> {
        let at = offset as usize;
        let Some(prefix) = self.data.get(at..at + 4) else {
            return Err(FormatError::Truncated {
                needed: at + 4,
                available: self.data.len(),
            });
        };
        let len = u32::from_le_bytes([prefix[0], prefix[1], prefix[2], prefix[3]]) as usize;
        self.data
            .get(at + 4..at + 4 + len)
            .ok_or(FormatError::Truncated {
                needed: at + 4 + len,
                available: self.data.len(),
            })
    }

    fn name(&self, offset: u32) -> Result<String, FormatError> {
        Ok(String::from_utf8_lossy(self.blob(offset)?).into_owned())
    }

    fn offset_list(&self, offset: u32) -> Result<String, FormatError> {
        let items: Vec<String> = self
            .blob(offset)?
            .chunks_exact(4)
            .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]).to_string())
            .collect();
        Ok(format!("[{}]", items.join(", ")))
    }

    fn inst(&self, base: &InstBase) -> Result<String, FormatError> {
        Ok(format!(
            "{} {} {}",
            base.opcode,
            base.ty,
            self.offset_list(base.operands)?
        ))
    }

    fn code_line(&self, bytes: &[u8]) -> Result<String, FormatError> {
        let kind = RecordHeader::read(bytes)?.kind;
        let line = match kind {
            Kind::DIRECTIVE_VERSION => {
                let v = DirectiveVersion::from_bytes(bytes)?;
                format!(
                    "version hsail {}.{} brig {}.{} {:?} {:?}",
                    v.hsail_major, v.hsail_minor, v.brig_major, v.brig_minor, v.profile,
                    v.machine_model
                )
            }
            Kind::DIRECTIVE_VARIABLE => {
                let v = DirectiveVariable::from_bytes(bytes)?;
                format!(
                    "variable {} {} {} align {} dim {} {:?} {:?}",
                    self.name(v.name)?,
                    v.ty,
                    v.segment.name(),
                    v.align.bytes(),
                    v.dim,
                    v.linkage,
                    v.allocation
                )
            }
            Kind::DIRECTIVE_FUNCTION | Kind::DIRECTIVE_KERNEL => {
                let e = DirectiveExecutable::from_bytes(bytes)?;
                format!(
                    "{kind} {} out {} in {} first_in_arg {} first_entry {} next {} entries {}",
                    self.name(e.name)?,
                    e.out_arg_count,
                    e.in_arg_count,
                    e.first_in_arg,
                    e.first_code_block_entry,
                    e.next_module_entry,
                    e.code_block_entry_count
                )
            }
            Kind::DIRECTIVE_LABEL => {
                let l = DirectiveLabel::from_bytes(bytes)?;
                format!("label {}", self.name(l.name)?)
            }
            Kind::DIRECTIVE_ARG_BLOCK_START | Kind::DIRECTIVE_ARG_BLOCK_END => kind.to_string(),
            Kind::INST_BASIC => {
                let i = InstBasic::from_bytes(bytes)?;
                format!("{kind} {}", self.inst(&i.base)?)
            }
            Kind::INST_MOD => {
                let i = InstMod::from_bytes(bytes)?;
                format!(
                    "{kind} {} round {:?} pack {:?}",
                    self.inst(&i.base)?,
                    i.round,
                    i.pack
                )
            }
            Kind::INST_MEM => {
                let i = InstMem::from_bytes(bytes)?;
                format!(
                    "{kind} {} {} width {:?}",
                    self.inst(&i.base)?,
                    i.segment.name(),
                    i.width
                )
            }
            Kind::INST_ATOMIC => {
                let i = InstAtomic::from_bytes(bytes)?;
                format!(
                    "{kind} {} {} {:?} {:?} {:?}",
                    self.inst(&i.base)?,
                    i.segment.name(),
                    i.atomic_op,
                    i.memory_order,
                    i.memory_scope
                )
            }
            Kind::INST_ADDR => {
                let i = InstAddr::from_bytes(bytes)?;
                format!("{kind} {} {}", self.inst(&i.base)?, i.segment.name())
            }
            Kind::INST_SEG_CVT => {
                let i = InstSegCvt::from_bytes(bytes)?;
                format!(
                    "{kind} {} from {} {}",
                    self.inst(&i.base)?,
                    i.source_type,
                    i.segment.name()
                )
            }
            Kind::INST_CMP => {
                let i = InstCmp::from_bytes(bytes)?;
                format!(
                    "{kind} {} {:?} from {}",
                    self.inst(&i.base)?,
                    i.compare,
                    i.source_type
                )
            }
            Kind::INST_BR => {
                let i = InstBr::from_bytes(bytes)?;
                format!("{kind} {} width {:?}", self.inst(&i.base)?, i.width)
            }
            Kind::INST_CVT => {
                let i = InstCvt::from_bytes(bytes)?;
                format!(
                    "{kind} {} from {} round {:?}",
                    self.inst(&i.base)?,
                    i.source_type,
                    i.round
                )
            }
            other => other.to_string(),
        };
        Ok(line)
    }

    fn operand_line(&self, bytes: &[u8]) -> Result<String, FormatError> {
        let kind = RecordHeader::read(bytes)?.kind;
        let line = match kind {
            Kind::OPERAND_DATA => {
                let d = OperandData::from_bytes(bytes)?;
                let hex: Vec<String> = self
                    .blob(d.data)?
                    .iter()
                    .map(|b| format!("{b:02x}"))
                    .collect();
                format!("data {}", hex.join(" "))
            }
            Kind::OPERAND_REG => {
                let r = OperandReg::from_bytes(bytes)?;
                let class = match r.reg_kind {
                    RegisterKind::Control => 'c',
                    RegisterKind::Single => 's',
                    RegisterKind::Double => 'd',
                    RegisterKind::Quad => 'q',
                };
                format!("reg ${class}{}", r.reg_num)
            }
            Kind::OPERAND_ADDRESS => {
                let a = OperandAddress::from_bytes(bytes)?;
                format!(
                    "address symbol {} reg {} offset {}",
                    a.symbol,
                    a.reg,
                    a.offset()
                )
            }
            Kind::OPERAND_CODE_REF => {
                let c = OperandCodeRef::from_bytes(bytes)?;
                format!("code_ref {}", c.reference)
            }
            Kind::OPERAND_CODE_LIST => {
                let c = OperandCodeList::from_bytes(bytes)?;
                format!("code_list {}", self.offset_list(c.elements)?)
            }
            other => other.to_string(),
        };
        Ok(line)
    }
}

#[cfg(test)]
#[path = "dump_tests.rs"]
mod tests;
