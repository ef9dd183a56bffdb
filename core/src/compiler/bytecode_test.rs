//! Tests for the bytecode compiler.

use crate::{
    ast::{BinaryOp, ComparisonOp},
    compiler::BytecodeCompiler,
    parser,
    values::Value,
    vm::{Code, Instruction},
};

fn compile(source: &str) -> Code {
    let expr = parser::parse(source).unwrap();
    BytecodeCompiler::compile(&expr).unwrap()
}

#[test]
fn test_compile_simple_integer() {
    let code = compile("42");

    assert_eq!(code.instructions, vec![Instruction::LoadConst(0)]);
    assert_eq!(code.symbols.literals(), &[Value::Int(42)]);
    assert_eq!(code.max_stack_size, 1);
}

#[test]
fn test_compile_arithmetic_follows_precedence() {
    let code = compile("1 + 2 * 3");

    assert_eq!(
        code.instructions,
        vec![
            Instruction::LoadConst(0),
            Instruction::LoadConst(1),
            Instruction::LoadConst(2),
            Instruction::BinaryOp(BinaryOp::Mul),
            Instruction::BinaryOp(BinaryOp::Add),
        ]
    );
    assert_eq!(code.max_stack_size, 3);
}

#[test]
fn test_compile_left_associative_chain_keeps_stack_shallow() {
    let code = compile("1 - 2 - 3 - 4");
    assert_eq!(code.max_stack_size, 2);
    assert_eq!(
        code.instructions.last(),
        Some(&Instruction::BinaryOp(BinaryOp::Sub))
    );
}

#[test]
fn test_compile_comparison() {
    use Instruction::*;
    let code = compile("x <= 3");
    assert_eq!(
        code.instructions,
        vec![LoadRef(0), LoadConst(0), CompareOp(ComparisonOp::LessEq)]
    );
    assert_eq!(code.symbols.references(), &["x".to_string()]);
}

#[test]
fn test_compile_unary_operators() {
    use Instruction::*;
    assert_eq!(compile("-x").instructions, vec![LoadRef(0), Negate]);
    assert_eq!(compile("+x").instructions, vec![LoadRef(0), Positive]);
    assert_eq!(compile("!x").instructions, vec![LoadRef(0), Not]);
}

#[test]
fn test_literals_and_references_are_deduplicated() {
    use Instruction::*;
    let code = compile("x + 1 + x + 1 + 'a' + 'a'");

    assert_eq!(code.symbols.literals(), &[Value::Int(1), Value::from("a")]);
    assert_eq!(code.symbols.references(), &["x".to_string()]);
    let loads: Vec<_> = code
        .instructions
        .iter()
        .filter(|i| matches!(i, LoadConst(_) | LoadRef(_)))
        .copied()
        .collect();
    assert_eq!(
        loads,
        vec![
            LoadRef(0),
            LoadConst(0),
            LoadRef(0),
            LoadConst(0),
            LoadConst(1),
            LoadConst(1)
        ]
    );
}

#[test]
fn test_equal_values_of_different_types_are_distinct_literals() {
    let code = compile("1 == 1.0");
    assert_eq!(code.symbols.literals().len(), 2);
}

#[test]
fn test_compile_or_short_circuit() {
    use Instruction::*;
    let code = compile("a || b");

    // Jump lands right after the right operand.
    assert_eq!(
        code.instructions,
        vec![LoadRef(0), JumpIfTrue(2), Pop, LoadRef(1)]
    );
    assert_eq!(code.max_stack_size, 1);
}

#[test]
fn test_compile_and_short_circuit() {
    use Instruction::*;
    let code = compile("a && b");
    assert_eq!(
        code.instructions,
        vec![LoadRef(0), JumpIfFalse(2), Pop, LoadRef(1)]
    );
}

#[test]
fn test_compile_ternary() {
    use Instruction::*;
    let code = compile("a ? b : c");

    assert_eq!(
        code.instructions,
        vec![
            LoadRef(0),
            PopJumpIfFalse(2),
            LoadRef(1),
            JumpForward(1),
            LoadRef(2),
        ]
    );
    assert_eq!(code.max_stack_size, 1);
}

#[test]
fn test_compile_nested_ternary_offsets() {
    use Instruction::*;
    let code = compile("a ? b : c ? d : e");

    assert_eq!(
        code.instructions,
        vec![
            LoadRef(0),
            PopJumpIfFalse(2),
            LoadRef(1),
            JumpForward(5),
            LoadRef(2),
            PopJumpIfFalse(2),
            LoadRef(3),
            JumpForward(1),
            LoadRef(4),
        ]
    );
}

#[test]
fn test_compile_method_call() {
    use Instruction::*;
    let code = compile("name.upper()");

    assert_eq!(
        code.instructions,
        vec![LoadRef(0), LoadConst(0), GetAttr, Call(0)]
    );
    assert_eq!(code.symbols.literals(), &[Value::from("upper")]);
    assert_eq!(code.max_stack_size, 2);
}

#[test]
fn test_compile_call_pushes_callee_before_arguments() {
    use Instruction::*;
    let code = compile("f(1, 2, 3)");

    assert_eq!(
        code.instructions,
        vec![LoadRef(0), LoadConst(0), LoadConst(1), LoadConst(2), Call(3)]
    );
    assert_eq!(code.max_stack_size, 4);
}

#[test]
fn test_compile_index() {
    use Instruction::*;
    let code = compile("items[0]");
    assert_eq!(
        code.instructions,
        vec![LoadRef(0), LoadConst(0), GetItem(1)]
    );
}

#[test]
fn test_compile_slice_fills_missing_bounds_with_none() {
    use Instruction::*;
    let code = compile("s[1:]");

    assert_eq!(
        code.instructions,
        vec![
            LoadRef(0),
            LoadConst(0),
            LoadConst(1),
            LoadConst(1),
            GetItem(3)
        ]
    );
    assert_eq!(code.symbols.literals(), &[Value::Int(1), Value::None]);
    assert_eq!(code.max_stack_size, 4);
}

#[test]
fn test_max_stack_size_for_right_heavy_expression() {
    // Each nested right operand holds one more value on the stack.
    let code = compile("1 + (2 + (3 + (4 + 5)))");
    assert_eq!(code.max_stack_size, 5);
}

#[test]
fn test_disassembly_listing() {
    let code = compile("x > 1 ? 'big' : 'small'");
    let listing = code.to_string();
    assert!(listing.contains("LOAD_REF 0 (x)"), "{listing}");
    assert!(listing.contains("LOAD_CONST 1 ('big')"), "{listing}");
    assert!(listing.contains("POP_JUMP_IF_FALSE"), "{listing}");
}
