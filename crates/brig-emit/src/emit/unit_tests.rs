use brig_format::records::{DirectiveExecutable, DirectiveLabel, DirectiveVersion, OperandCodeRef};
use brig_format::{
    BrigType, CompareOp, FormatError, Linkage, MachineModel, MemoryWriter, Opcode, Profile,
    Segment,
};

use crate::diagnostics::DiagnosticKind;
use crate::emit::{BrigUnit, EmitError, PendingCall};
use crate::ir::{
    BlockId, BlockRef, CallBlock, CallInsn, CodeRefTarget, Edge, Function, FunctionId,
    Instruction, Operand, Program, Symbol,
};
use crate::test_utils::{decoded, dump_unit, dump_written, falls_to, falls_to_exit, unit};
use crate::EmitOptions;

/// Blocks indexed `first..first + count`, falling through in layout order
/// except where `jumps` says otherwise.
fn blocks(uid: u32, first: u32, count: usize, jumps: &[(usize, BlockRef)]) -> Function {
    let mut f = Function::new("g", uid);
    let ids: Vec<BlockId> = (0..count).map(|i| f.add_block(first + i as u32)).collect();
    falls_to(f.entry_mut(), BlockRef::Block(ids[0]));
    for (i, &id) in ids.iter().enumerate() {
        let dest = jumps
            .iter()
            .find(|(from, _)| *from == i)
            .map(|(_, dest)| *dest)
            .unwrap_or_else(|| ids.get(i + 1).map_or(BlockRef::Exit, |&next| BlockRef::Block(next)));
        falls_to(f.block_mut(id).unwrap(), dest);
    }
    f
}

fn emit_one(program: &Program, id: FunctionId) -> BrigUnit {
    let mut unit = unit();
    unit.emit_function(program, program.function(id).unwrap())
        .unwrap();
    unit
}

#[test]
fn version_directive_comes_first() {
    let unit = BrigUnit::new(
        EmitOptions::new()
            .with_profile(Profile::Base)
            .with_machine_model(MachineModel::Small),
    )
    .unwrap();

    assert_eq!(unit.code().total_size(), 48);
    assert_eq!(
        unit.code().read_record::<DirectiveVersion>(24).unwrap(),
        DirectiveVersion {
            hsail_major: 1,
            hsail_minor: 0,
            brig_major: 1,
            brig_minor: 0,
            profile: Profile::Base,
            machine_model: MachineModel::Small,
        }
    );
}

#[test]
fn fallthrough_to_next_block_is_elided() {
    let mut program = Program::new();
    let id = program.add_function(blocks(5, 1, 4, &[]));

    let unit = emit_one(&program, id);

    insta::assert_snapshot!(dump_unit(&unit), @r"
    [code]
       24 version hsail 1.0 brig 1.0 Full Large
       48 function &g out 0 in 0 first_in_arg 80 first_entry 80 next 112 entries 4
       80 label @BB_5_1
       88 label @BB_5_2
       96 label @BB_5_3
      104 label @BB_5_4

    [operand]
    ");
}

#[test]
fn fallthrough_elsewhere_inserts_branch() {
    let mut program = Program::new();
    let id = program.add_function(blocks(5, 1, 4, &[(1, BlockRef::Block(BlockId(3)))]));

    let unit = emit_one(&program, id);

    insta::assert_snapshot!(dump_unit(&unit), @r"
    [code]
       24 version hsail 1.0 brig 1.0 Full Large
       48 function &g out 0 in 0 first_in_arg 80 first_entry 80 next 128 entries 5
       80 label @BB_5_1
       88 label @BB_5_2
       96 inst_br br none [24] width All
      112 label @BB_5_3
      120 label @BB_5_4

    [operand]
       24 code_ref 120
    ");
}

#[test]
fn last_block_branches_back() {
    let mut program = Program::new();
    let id = program.add_function(blocks(9, 0, 2, &[(1, BlockRef::Block(BlockId(0)))]));

    let unit = emit_one(&program, id);

    insta::assert_snapshot!(dump_unit(&unit), @r"
    [code]
       24 version hsail 1.0 brig 1.0 Full Large
       48 function &g out 0 in 0 first_in_arg 80 first_entry 80 next 112 entries 3
       80 label @BB_9_0
       88 label @BB_9_1
       96 inst_br br none [24] width All

    [operand]
       24 code_ref 80
    ");
}

#[test]
fn conditional_branch_targets_true_edge() {
    let mut program = Program::new();
    let mut f = Function::new("h", 2);
    let b0 = f.add_block(1);
    let b1 = f.add_block(2);
    let b2 = f.add_block(3);
    let cond = f.add_operand(Operand::register(BrigType::B1, 0));
    let lhs = f.add_operand(Operand::register(BrigType::S32, 1));
    let rhs = f.add_operand(Operand::immediate(BrigType::S32, 5));

    falls_to(f.entry_mut(), BlockRef::Block(b0));
    let block = f.block_mut(b0).unwrap();
    block.push(Instruction::cmp(BrigType::B1, CompareOp::Lt).with_operands(&[cond, lhs, rhs]));
    block.push(Instruction::cbr().with_operands(&[cond]));
    block.succs.push(Edge::on_true(BlockRef::Block(b2)));
    block.succs.push(Edge::on_false(BlockRef::Block(b1)));
    falls_to_exit(f.block_mut(b1).unwrap());
    falls_to_exit(f.block_mut(b2).unwrap());
    let id = program.add_function(f);

    let unit = emit_one(&program, id);

    insta::assert_snapshot!(dump_unit(&unit), @r"
    [code]
       24 version hsail 1.0 brig 1.0 Full Large
       48 function &h out 0 in 0 first_in_arg 80 first_entry 80 next 140 entries 5
       80 label @BB_2_1
       88 inst_cmp cmp b1 [24, 32, 40] Lt from s32
      108 inst_br cbr b1 [24, 48] width W1
      124 label @BB_2_2
      132 label @BB_2_3

    [operand]
       24 reg $c0
       32 reg $s1
       40 data 05 00 00 00
       48 code_ref 132
    ");
}

fn branch_error(configure: impl FnOnce(&mut Function, BlockId, Instruction)) -> EmitError {
    let mut program = Program::new();
    let mut f = Function::new("bad", 1);
    let b0 = f.add_block(0);
    let b1 = f.add_block(1);
    let cond = f.add_operand(Operand::register(BrigType::B1, 0));
    falls_to(f.entry_mut(), BlockRef::Block(b0));
    falls_to_exit(f.block_mut(b1).unwrap());
    configure(&mut f, b1, Instruction::cbr().with_operands(&[cond]));
    let id = program.add_function(f);

    let mut unit = unit();
    unit.emit_function(&program, program.function(id).unwrap())
        .unwrap_err()
}

#[test]
fn branch_without_true_edge() {
    let err = branch_error(|f, _, cbr| {
        let block = f.block_mut(BlockId(0)).unwrap();
        block.push(cbr);
        block.succs.push(Edge::on_false(BlockRef::Exit));
    });

    assert!(matches!(err, EmitError::TrueEdgeCount { block: 0, found: 0 }));
}

#[test]
fn branch_to_exit() {
    let err = branch_error(|f, _, cbr| {
        let block = f.block_mut(BlockId(0)).unwrap();
        block.push(cbr);
        block.succs.push(Edge::on_true(BlockRef::Exit));
        block.succs.push(Edge::on_false(BlockRef::Exit));
    });

    assert!(matches!(err, EmitError::BranchToExit { block: 0 }));
}

#[test]
fn branch_with_third_operand() {
    let err = branch_error(|f, b1, cbr| {
        let extra = f.add_operand(Operand::register(BrigType::B1, 1));
        let block = f.block_mut(BlockId(0)).unwrap();
        block.push(cbr.with_operand(2, extra));
        block.succs.push(Edge::on_true(BlockRef::Block(b1)));
        block.succs.push(Edge::on_false(BlockRef::Exit));
    });

    assert!(matches!(err, EmitError::UnsupportedBranch(Opcode::CBR)));
}

#[test]
fn unconditional_branch_instruction_is_unsupported() {
    let err = branch_error(|f, b1, mut cbr| {
        cbr.opcode = Opcode::BR;
        let block = f.block_mut(BlockId(0)).unwrap();
        block.push(cbr);
        block.succs.push(Edge::on_true(BlockRef::Block(b1)));
        block.succs.push(Edge::on_false(BlockRef::Exit));
    });

    assert!(matches!(err, EmitError::UnsupportedBranch(Opcode::BR)));
}

#[test]
fn block_without_fallthrough_edge() {
    let err = branch_error(|_, _, _| {});

    assert!(matches!(
        err,
        EmitError::FallthroughEdgeCount { block: 0, found: 0 }
    ));
}

/// `caller` stores `$s0` into `x`, calls `callee`, loads `ret` back.
fn call_program() -> (Program, FunctionId, FunctionId) {
    let mut program = Program::new();
    let x = program.add_symbol(
        Symbol::new("x", Segment::Arg, BrigType::S32).with_linkage(Linkage::Arg),
    );
    let ret = program.add_symbol(
        Symbol::new("ret", Segment::Arg, BrigType::S32).with_linkage(Linkage::Arg),
    );

    let mut callee = Function::new("callee", 2);
    falls_to_exit(callee.entry_mut());
    let callee = program.add_function(callee);

    let mut caller = Function::new("caller", 1);
    let reg = caller.add_operand(Operand::register(BrigType::S32, 0));
    let x_addr = caller.add_operand(Operand::symbol_address(x, 0));
    let ret_addr = caller.add_operand(Operand::symbol_address(ret, 0));
    let result = caller.add_operand(Operand::CodeList(vec![ret]));
    let func = caller.add_operand(Operand::CodeRef(CodeRefTarget::Function(callee)));
    let args = caller.add_operand(Operand::CodeList(vec![x]));

    let call = Instruction::call(CallInsn {
        callee,
        result,
        func,
        args,
    });
    let block = CallBlock {
        input_args: vec![x],
        output_arg: Some(ret),
        input_arg_insns: vec![
            Instruction::mem(Opcode::ST, BrigType::S32).with_operands(&[reg, x_addr]),
        ],
        call,
        output_arg_insn: Some(
            Instruction::mem(Opcode::LD, BrigType::S32).with_operands(&[reg, ret_addr]),
        ),
    };
    caller.entry_mut().push(Instruction::call_block(block));
    falls_to_exit(caller.entry_mut());
    let caller = program.add_function(caller);

    (program, caller, callee)
}

#[test]
fn call_block_layout() {
    let (program, caller, _) = call_program();

    let unit = emit_one(&program, caller);

    insta::assert_snapshot!(dump_unit(&unit), @r"
    [code]
       24 version hsail 1.0 brig 1.0 Full Large
       48 function &caller out 0 in 0 first_in_arg 80 first_entry 80 next 200 entries 7
       80 arg_block_start
       84 variable %x s32 arg align 4 dim 0 Arg Automatic
      112 variable %ret s32 arg align 4 dim 0 Arg Automatic
      140 inst_mem st s32 [24, 32] arg width None
      160 inst_br call none [52, 60, 68] width All
      176 inst_mem ld s32 [24, 76] arg width W1
      196 arg_block_end

    [operand]
       24 reg $s0
       32 address symbol 84 reg 0 offset 0
       52 code_list [112]
       60 code_ref 0
       68 code_list [84]
       76 address symbol 112 reg 0 offset 0
    ");
}

#[test]
fn call_linked_after_callee_is_emitted() {
    let (program, caller, callee) = call_program();
    let mut unit = unit();

    unit.emit_function(&program, program.function(caller).unwrap())
        .unwrap();
    unit.emit_function(&program, program.function(callee).unwrap())
        .unwrap();

    assert_eq!(
        unit.pending_calls(),
        &[PendingCall {
            callee,
            callee_name: "callee".to_string(),
            operand_offset: 60,
        }]
    );
    assert_eq!(
        unit.operand().read_record::<OperandCodeRef>(60).unwrap(),
        OperandCodeRef { reference: 0 }
    );
    assert_eq!(unit.function_offset(callee), Some(200));
    assert_eq!(
        unit.function_offsets().keys().copied().collect::<Vec<_>>(),
        vec![caller, callee]
    );

    let mut writer = MemoryWriter::new();
    let diagnostics = unit.finish(&mut writer).unwrap();
    assert!(diagnostics.is_empty());

    let dump = dump_written(&writer);
    insta::assert_snapshot!(crate::test_utils::operand_lines(&dump), @r"
    [operand]
       24 reg $s0
       32 address symbol 84 reg 0 offset 0
       52 code_list [112]
       60 code_ref 200
       68 code_list [84]
       76 address symbol 112 reg 0 offset 0
    ");
}

#[test]
fn call_to_missing_function_fails_finish() {
    let mut program = Program::new();
    let mut caller = Function::new("caller", 1);
    let half = caller.add_operand(Operand::register(BrigType::F16, 0));
    let imm = caller.add_operand(Operand::float(BrigType::F16, 1.0));
    let result = caller.add_operand(Operand::CodeList(vec![]));
    let func = caller.add_operand(Operand::CodeRef(CodeRefTarget::Function(FunctionId(5))));
    let args = caller.add_operand(Operand::CodeList(vec![]));
    caller
        .entry_mut()
        .push(Instruction::basic(Opcode::MOV, BrigType::F16).with_operands(&[half, imm]));
    caller.entry_mut().push(Instruction::call(CallInsn {
        callee: FunctionId(5),
        result,
        func,
        args,
    }));
    falls_to_exit(caller.entry_mut());
    let caller = program.add_function(caller);

    let unit = emit_one(&program, caller);
    assert_eq!(unit.diagnostics().len(), 1);
    let err = unit.finish(&mut MemoryWriter::new()).unwrap_err();

    assert!(matches!(
        err.root(),
        EmitError::MissingFunctionOffset { callee: FunctionId(5), name } if name == "fn#5"
    ));
    assert_eq!(err.to_string(), "call to `fn#5` (fn#5) was never emitted");

    let diagnostics = err.diagnostics().unwrap();
    let kinds: Vec<DiagnosticKind> = diagnostics.iter().map(|d| d.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::UnsupportedImmediate,
            DiagnosticKind::MissingFunctionOffset,
        ]
    );
    assert_eq!(
        diagnostics.iter().last().unwrap().message(),
        "call target `fn#5` was never emitted in this unit"
    );
    assert_eq!(diagnostics.error_count(), 2);
}

#[test]
fn invalid_chunk_size_is_an_error() {
    let err = BrigUnit::new(EmitOptions::new().with_chunk_size(100)).unwrap_err();

    assert!(matches!(
        err,
        EmitError::Section(FormatError::InvalidChunkSize {
            chunk_size: 100,
            ..
        })
    ));
    assert!(BrigUnit::new(EmitOptions::new().with_chunk_size(32)).is_err());
}

#[test]
fn call_through_non_function_operand() {
    let mut program = Program::new();
    let mut caller = Function::new("caller", 1);
    let list = caller.add_operand(Operand::CodeList(vec![]));
    let reg = caller.add_operand(Operand::register(BrigType::U64, 0));
    caller.entry_mut().push(Instruction::call(CallInsn {
        callee: FunctionId(0),
        result: list,
        func: reg,
        args: list,
    }));
    falls_to_exit(caller.entry_mut());
    let caller = program.add_function(caller);

    let mut unit = unit();
    let err = unit
        .emit_function(&program, program.function(caller).unwrap())
        .unwrap_err();

    assert!(matches!(
        err,
        EmitError::UnexpectedOperand {
            opcode: Opcode::CALL,
            slot: 1,
            ..
        }
    ));
}

#[test]
fn finish_writes_sections_in_order() {
    let mut program = Program::new();
    let id = program.add_function(blocks(1, 0, 3, &[]));
    let unit = emit_one(&program, id);

    let mut writer = MemoryWriter::new();
    unit.finish(&mut writer).unwrap();

    assert_eq!(
        writer.section_names().collect::<Vec<_>>(),
        vec!["hsa_data", "hsa_code", "hsa_operand"]
    );
    for (_, bytes) in writer.into_sections() {
        let byte_count = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        assert_eq!(byte_count as usize, bytes.len());
        assert_eq!(bytes.len() % 4, 0);
    }
}

#[test]
fn small_chunks_keep_records_whole() {
    let mut program = Program::new();
    let id = program.add_function(blocks(4, 0, 12, &[]));
    let mut unit = BrigUnit::new(EmitOptions::new().with_chunk_size(64)).unwrap();

    unit.emit_function(&program, program.function(id).unwrap())
        .unwrap();

    let code = unit.code();
    assert!(code.chunk_count() > 1);
    assert_eq!(decoded::<DirectiveLabel>(code).len(), 12);
    let header = code.read_record::<DirectiveExecutable>(48).unwrap();
    assert_eq!(header.code_block_entry_count, 12);
    assert_eq!(header.next_module_entry, code.total_size());
    assert_eq!(
        code.total_size() as usize,
        code.header_byte_count() as usize + code.chunk_lens().sum::<usize>()
    );
}
