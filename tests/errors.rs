//! Lex, parse and runtime errors and their diagnostics

mod common;

use common::run_err;
use jist::diagnostic::{render_diagnostics, Severity};
use jist::interpreter::{parse, parse_and_run_with_diagnostics};
use jist::lexer::{tokenize, LexError};
use jist::Diagnostic;

fn diagnostics(source: &str) -> Vec<Diagnostic> {
    match parse_and_run_with_diagnostics(source) {
        Ok(evaluation) => panic!("expected failure, got {:?}", evaluation.value),
        Err(diagnostics) => diagnostics,
    }
}

fn error_code(source: &str) -> Option<String> {
    diagnostics(source).last().and_then(|d| d.code.clone())
}

// =============================================================================
// LEX ERRORS
// =============================================================================

#[test]
fn test_lone_ampersand_is_rejected() {
    assert_eq!(
        tokenize("a & b"),
        Err(LexError {
            character: Some('&'),
            position: 2
        })
    );
}

#[test]
fn test_unknown_character_reports_offset() {
    let err = tokenize("let x = 1;\nlet y = #;").unwrap_err();
    assert_eq!(err.character, Some('#'));
    assert_eq!(err.position, 19);
}

#[test]
fn test_lex_error_surfaces_through_parse() {
    let err = parse("let a = 1 | 2;").unwrap_err();
    assert_eq!(err.to_diagnostic().code.as_deref(), Some("E0001"));
    assert_eq!(run_err("@"), "Parse error: unrecognized character `@` at offset 0");
}

#[test]
fn test_lex_error_help_for_single_pipe() {
    let diagnostic = diagnostics("a | b;").pop().unwrap();
    assert!(diagnostic
        .notes
        .iter()
        .any(|note| note.contains("`&&` and `||`")));
}

// =============================================================================
// PARSE ERRORS
// =============================================================================

#[test]
fn test_missing_semicolon_after_declaration() {
    let err = parse("let x = 1 let y = 2;").unwrap_err();
    assert_eq!(err.message, "expected `;`, found `let`");
    assert_eq!(err.to_diagnostic().code.as_deref(), Some("E0101"));
}

#[test]
fn test_unterminated_function_body() {
    let err = parse("function f() { return 1;").unwrap_err();
    assert!(err.message.contains("end of input"), "{}", err.message);
}

#[test]
fn test_comparison_operators_are_not_expressions() {
    assert!(parse("1 < 2;").is_err());
    assert!(parse("a == b;").is_err());
    assert!(parse("a && b;").is_err());
}

#[test]
fn test_unary_minus_is_not_supported() {
    assert!(parse("let x = -1;").is_err());
}

#[test]
fn test_object_literal_is_not_an_operand() {
    assert!(parse("1 + {a: 1};").is_err());
}

#[test]
fn test_parse_failure_is_not_partial() {
    let source = "let ok = 1; let broken = ;";
    assert_eq!(error_code(source).as_deref(), Some("E0101"));
}

// =============================================================================
// RUNTIME ERRORS
// =============================================================================

#[test]
fn test_runtime_error_codes() {
    let cases = [
        ("let x = 1; let x = 2;", "E0201"),
        ("nope;", "E0202"),
        ("const x = 1; x = 2;", "E0203"),
        ("let o = {}; o.a = 1;", "E0204"),
        ("let [a, b] = [1];", "E0205"),
        ("let [a] = 1;", "E0206"),
        ("let s = \"x\"; s();", "E0207"),
        ("useState();", "E0208"),
    ];
    for (source, code) in cases {
        assert_eq!(error_code(source).as_deref(), Some(code), "source: {}", source);
    }
}

#[test]
fn test_invalid_assignment_target_message() {
    assert_eq!(
        run_err("let o = {}; o.a = 1;"),
        "Runtime error: invalid assignment target: a member expression"
    );
    assert!(run_err("1 = 2;").contains("a number literal"));
}

#[test]
fn test_first_error_stops_execution() {
    let diagnostics = diagnostics("useState:Number(\"x\"); missing; alsoMissing;");
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].severity, Severity::Warning);
    assert_eq!(diagnostics[1].severity, Severity::Error);
    assert_eq!(diagnostics[1].message, "cannot resolve `missing`: it does not exist");
}

// =============================================================================
// RENDERING
// =============================================================================

#[test]
fn test_rendered_parse_error_points_at_source() {
    let source = "let x = 1;\nlet y = ];";
    let err = parse(source).unwrap_err();
    let rendered = render_diagnostics(source, "main.jist", &[err.to_diagnostic()], false);

    assert!(rendered.starts_with("error[E0101]: "), "{}", rendered);
    assert!(rendered.contains("main.jist:2:9"), "{}", rendered);
    assert!(rendered.contains("let y = ];"), "{}", rendered);
    assert!(rendered.ends_with("error: aborting due to 1 error\n"), "{}", rendered);
}

#[test]
fn test_rendered_runtime_error_has_code() {
    let rendered = render_diagnostics("", "main.jist", &diagnostics("x;"), false);
    assert!(rendered.starts_with("error[E0202]: cannot resolve `x`"), "{}", rendered);
}
