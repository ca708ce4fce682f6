//! Integration tests for end-to-end compilation.
//!
//! These tests drive the complete pipeline from source text through
//! tokenization, parsing and C emission, and run the `scopec` binary itself.

use std::{fs, path::Path, process::Command};

use scopec::{
    ast::ast::NodeKind,
    codegen::codegen::emit_c,
    errors::errors::ErrorClass,
    lexer::config::LexerConfig,
    session::compile_source,
};

const PROGRAM: &str = "\
#foreign from(libc, putchar: (c: int) -> int);

{- prints a letter {- and a newline -} -}
letter: int = 72;

shout: (c: int) -> int {
    count: int = 0;
    while count < 2 {
        putchar(c);
        count = count + 1;
    }
    return count;
}

main: () -> int {
    return 0;
}

// directive calls run at startup
shout(letter);
putchar(main() + 10);
";

fn compile(source: &str) -> Result<scopec::ast::ast::Ast, Vec<scopec::errors::errors::Error>> {
    compile_source(source.as_bytes(), "main.sc", &LexerConfig::default())
}

#[test]
fn test_compile_program() {
    let ast = compile(PROGRAM).unwrap();
    let statements = ast.root_statements();
    assert_eq!(statements.len(), 6);

    let directives = statements
        .iter()
        .filter(|&&id| matches!(&ast.node(id).kind, NodeKind::FunctionCall(call) if call.is_directive_call))
        .count();
    assert_eq!(directives, 2);

    let c = emit_c(&ast).unwrap();
    assert!(c.contains("int32_t sc_shout(int32_t sc_c) {"));
    assert!(c.contains("    sc_letter = 72;\n    sc_shout(sc_letter);\n    putchar((sc_main() + 10));\n"));
}

#[test]
fn test_lex_error_stops_compilation() {
    let errors = compile("x: int = 1; {- never closed").unwrap_err();

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].class(), ErrorClass::Lexical);
    assert_eq!(errors[0].get_error_name(), "UnterminatedComment");
    assert_eq!(errors[0].get_position().column, 13);
}

#[test]
fn test_all_parse_errors_are_returned() {
    let errors = compile("x: int = 1;\nx: int = 2;\ny = 3;\nmissing();").unwrap_err();

    let names: Vec<&str> = errors.iter().map(|error| error.get_error_name()).collect();
    assert_eq!(
        names,
        vec!["Redeclaration", "UndeclaredIdentifier", "UndeclaredFunction"]
    );
    assert!(errors.iter().all(|error| error.class() == ErrorClass::Semantic));

    let lines: Vec<u32> = errors.iter().map(|error| error.get_position().line).collect();
    assert_eq!(lines, vec![2, 3, 4]);
}

#[test]
fn test_syntax_error_is_rendered() {
    let source = "a: int = 1;\n    x: int = ;\n";
    let errors = compile(source).unwrap_err();

    let rendered = scopec::render_error(&errors[0], source);
    assert!(rendered.starts_with("Error: ExpectedExpression"));
    assert!(rendered.contains("-> main.sc:2:14"));
    assert!(rendered.contains("2 | x: int = ;"));
}

#[test]
fn test_compile_empty_source() {
    let ast = compile("").unwrap();
    assert!(ast.root_statements().is_empty());

    let c = emit_c(&ast).unwrap();
    assert!(c.contains("int main(void) {"));
}

fn scopec() -> Command {
    Command::new(env!("CARGO_BIN_EXE_scopec"))
}

#[test]
fn test_cli_requires_arguments() {
    let output = scopec().output().unwrap();
    assert!(!output.status.success());

    let output = scopec().arg("only-input.sc").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_cli_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = scopec()
        .arg(dir.path().join("absent.sc"))
        .arg(dir.path().join("out"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn test_cli_emit_c() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("main.sc");
    fs::write(&input, PROGRAM).unwrap();

    let output = scopec()
        .arg(&input)
        .arg(dir.path().join("out"))
        .arg("--emit-c")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let c = fs::read_to_string(dir.path().join("out.c")).unwrap();
    assert!(c.contains("static void __scopec_startup(void) {"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_cli_dumps_tokens_once() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("main.sc");
    fs::write(&input, "x: int = 1;\n").unwrap();

    let output = scopec()
        .arg(&input)
        .arg(dir.path().join("out"))
        .arg("--emit-c")
        .arg("--dump-tokens")
        .arg("-v")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.matches("kind: EOF").count(), 1);
    assert!(stderr.contains("token: 'x', kind: Identifier, line: 1, column: 1"));
}

#[test]
fn test_cli_reports_errors() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.sc");
    fs::write(&input, "x: int = 1;\nx: int = 2;\n").unwrap();

    let output = scopec()
        .arg(&input)
        .arg(dir.path().join("out"))
        .arg("--emit-c")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: Redeclaration"));
    assert!(stderr.contains("-> bad.sc:2:1"));
    assert!(!dir.path().join("out.c").exists());
}

#[test]
fn test_cli_builds_executable() {
    // Needs a working C compiler on the host
    let has_cc = Command::new("cc")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);
    if !has_cc {
        return;
    }

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("main.sc");
    let executable = dir.path().join("hello");
    fs::write(&input, PROGRAM).unwrap();

    let output = scopec()
        .arg(&input)
        .arg(&executable)
        .arg("--cc")
        .arg("cc")
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(Path::new(&executable).exists());

    let run = Command::new(&executable).output().unwrap();
    assert!(run.status.success());
    assert_eq!(String::from_utf8_lossy(&run.stdout), "HH\n");
}
