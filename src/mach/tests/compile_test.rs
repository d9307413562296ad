use crate::lang::ErrorCode;
use crate::mach::{Layout, Opcode::*, Program};

fn compile(s: &str) -> Program {
    Program::compile(s, Layout::Origin)
}

fn codes(program: &Program) -> Vec<(ErrorCode, Option<usize>)> {
    program
        .errors()
        .iter()
        .map(|e| (e.code(), e.statement()))
        .collect()
}

#[test]
fn test_counter_at_origin() {
    let p = compile("var counter = 0; counter += 5;");
    assert!(p.is_ok());
    assert_eq!(
        p.ops(),
        &[
            Load(0, 0),
            LoadIndex(0x200),
            Store(0),
            LoadIndex(0x200),
            Fill(0),
            AddImm(0, 5),
            LoadIndex(0x200),
            Store(0),
        ]
    );
    assert_eq!(p.warnings().len(), 1);
    assert_eq!(p.warnings()[0].code(), ErrorCode::VariableOverlapsCode);
}

#[test]
fn test_counter_after_code() {
    let p = Program::compile("var counter = 0; counter += 5;", Layout::AfterCode);
    assert!(p.is_ok());
    assert_eq!(p.layout(), Layout::AfterCode);
    assert_eq!(p.link().unlinked_len(), 0);
    assert_eq!(p.end(), 0x210);
    assert_eq!(p.var().address("counter"), Some(0x210));
    assert_eq!(p.ops()[1], LoadIndex(0x210));
    assert_eq!(p.ops()[3], LoadIndex(0x210));
    assert_eq!(p.ops()[6], LoadIndex(0x210));
    assert!(p.warnings().is_empty());
}

#[test]
fn test_declarations_take_one_byte_each() {
    let p = compile("var a = 1; var b = 2; var c = 3;");
    let addrs: Vec<u16> = p.var().iter().map(|slot| slot.address).collect();
    assert_eq!(addrs, vec![0x200, 0x201, 0x202]);
    assert_eq!(p.var().get(2).map(|slot| slot.default), Some(3));
    assert_eq!(p.ops()[3..6], [Load(0, 2), LoadIndex(0x201), Store(0)]);
}

#[test]
fn test_register_forms() {
    let p = compile("v[3] = 9; V[3] += 2; v[ 15 ]=0;");
    assert!(p.is_ok());
    assert_eq!(p.ops(), &[Load(3, 9), AddImm(3, 2), Load(15, 0)]);
    assert!(p.warnings().is_empty());
}

#[test]
fn test_draw_char_literal_and_register() {
    let p = Program::compile("var a = 2; draw_char(a, 3, v[4]);", Layout::AfterCode);
    assert!(p.is_ok());
    let a = p.var().address("a").unwrap();
    assert_eq!(
        p.ops()[3..],
        [LoadIndex(a), Fill(0), Load(1, 3), Glyph(4), Draw(0, 1, 5)]
    );
}

#[test]
fn test_draw_char_loads_variables_highest_first() {
    let p = Program::compile(
        "var a = 1; var b = 2; draw_char(a, b, 7);",
        Layout::AfterCode,
    );
    assert!(p.is_ok());
    let a = p.var().address("a").unwrap();
    let b = p.var().address("b").unwrap();
    assert_eq!(b, a + 1);
    assert_eq!(
        p.ops()[6..],
        [
            LoadIndex(b - 1),
            Fill(1),
            LoadIndex(a),
            Fill(0),
            Load(2, 7),
            Glyph(2),
            Draw(0, 1, 5),
        ]
    );
}

#[test]
fn test_label_and_jump() {
    let p = compile("label(start); v[0] += 1; jump(start);");
    assert!(p.is_ok());
    assert_eq!(p.ops(), &[AddImm(0, 1), Jump(0x200)]);
    let p = compile("v[0] = 1; label(here); jump(here);");
    assert_eq!(p.label("here"), Some(0x202));
    assert_eq!(p.ops()[1], Jump(0x202));
}

#[test]
fn test_label_redefinition_replaces() {
    let p = compile("label(a); v[0] = 1; label(a); jump(a);");
    assert_eq!(p.ops(), &[Load(0, 1), Jump(0x202)]);
}

#[test]
fn test_forward_jump_is_error() {
    let p = compile("jump(later); label(later);");
    assert_eq!(codes(&p), vec![(ErrorCode::UndefinedLabel, Some(1))]);
    assert!(p.ops().is_empty());
}

#[test]
fn test_errors_do_not_stop_compilation() {
    let p = compile("x += 1; var a = 1; var a = 2; a = 5; v[0] += 300; v[16] = 1; v[1] = 2;");
    assert_eq!(
        codes(&p),
        vec![
            (ErrorCode::UndefinedVariable, Some(1)),
            (ErrorCode::DuplicateDefinition, Some(3)),
            (ErrorCode::SyntaxError, Some(4)),
            (ErrorCode::Overflow, Some(5)),
            (ErrorCode::SyntaxError, Some(6)),
        ]
    );
    assert_eq!(p.ops().last(), Some(&Load(1, 2)));
}

#[test]
fn test_unmatched_statements_are_ignored() {
    let p = compile("hello world; foo(1); v[0] = 1; trailing");
    assert!(p.is_ok());
    assert_eq!(p.ops(), &[Load(0, 1)]);
}

#[test]
fn test_image_is_big_endian() {
    let p = compile("v[1] = 7; label(l); jump(l);");
    assert_eq!(p.image(), vec![0x61, 0x07, 0x12, 0x02]);
}

#[test]
fn test_program_too_large() {
    let p = compile(&"v[0] = 1;".repeat(1793));
    assert_eq!(p.len(), 1792);
    assert_eq!(codes(&p), vec![(ErrorCode::OutOfMemory, Some(1793))]);
    assert_eq!(p.errors()[0].to_string(), "OUT OF MEMORY IN 1793; PROGRAM TOO LARGE");
}

#[test]
fn test_too_many_variables() {
    let source: String = (0..597).map(|n| format!("var a{} = 0;", n)).collect();
    let p = Program::compile(&source, Layout::AfterCode);
    assert_eq!(p.end(), 0xFFE);
    assert_eq!(codes(&p), vec![(ErrorCode::OutOfMemory, None)]);
    assert_eq!(p.errors()[0].to_string(), "OUT OF MEMORY; TOO MANY VARIABLES");
    let source: String = (0..512).map(|n| format!("var a{} = 0;", n)).collect();
    let p = Program::compile(&source, Layout::AfterCode);
    assert!(p.is_ok());
    assert_eq!(p.var().address("a511"), Some(0xFFF));
}
