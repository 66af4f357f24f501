use brig_format::dump::{SectionBytes, dump, records};
use brig_format::{MemoryWriter, Record, RecordHeader, Section};

use crate::ir::{BasicBlock, BlockRef, Edge};
use crate::{BrigUnit, EmitOptions};

pub fn unit() -> BrigUnit {
    BrigUnit::new(EmitOptions::default()).unwrap()
}

/// Gives `block` a fallthrough edge to `dest`.
pub fn falls_to(block: &mut BasicBlock, dest: BlockRef) {
    block.succs.push(Edge::on_false(dest));
}

/// Gives `block` a fallthrough edge to the function exit.
pub fn falls_to_exit(block: &mut BasicBlock) {
    falls_to(block, BlockRef::Exit);
}

/// Dump of the sections as they stand, before linking.
pub fn dump_unit(unit: &BrigUnit) -> String {
    let (data, code, operand) = (
        unit.data().to_bytes(),
        unit.code().to_bytes(),
        unit.operand().to_bytes(),
    );
    dump(SectionBytes {
        data: &data,
        code: &code,
        operand: &operand,
    })
    .unwrap()
}

/// Dump of finished sections.
pub fn dump_written(writer: &MemoryWriter) -> String {
    dump(SectionBytes {
        data: writer.section("hsa_data").unwrap(),
        code: writer.section("hsa_code").unwrap(),
        operand: writer.section("hsa_operand").unwrap(),
    })
    .unwrap()
}

/// Only the `[operand]` part of a dump, heading included.
pub fn operand_lines(dump: &str) -> String {
    let start = dump.find("[operand]").unwrap();
    dump[start..].to_string()
}

/// Every record of type `R` in `section`, in order.
pub fn decoded<R: Record>(section: &Section) -> Vec<R> {
    let bytes = section.to_bytes();
    records(&bytes)
        .unwrap()
        .into_iter()
        .filter(|(_, bytes)| R::accepts(RecordHeader::read(bytes).unwrap().kind))
        .map(|(_, bytes)| R::from_bytes(bytes).unwrap())
        .collect()
}

/// Offsets stored in the length-prefixed list at `offset` in the data section.
pub fn offset_list(data: &Section, offset: u32) -> Vec<u32> {
    let len = data.record(offset, 4).unwrap();
    let len = u32::from_le_bytes([len[0], len[1], len[2], len[3]]) as usize;
    data.record(offset + 4, len)
        .unwrap()
        .chunks_exact(4)
        .map(|w| u32::from_le_bytes([w[0], w[1], w[2], w[3]]))
        .collect()
}
