//! Member access, literals, display forms and program-level edge cases

mod common;

use common::{num, numbers, run, run_err, strings};
use jist::interpreter::builtins::format_mark_line;
use jist::{parse, tokenize, Token, Value};
use pretty_assertions::assert_eq;

// =============================================================================
// PROGRAM RESULT
// =============================================================================

#[test]
fn test_empty_program_is_null() {
    assert_eq!(run(""), Value::Null);
    assert_eq!(run("   \n\t "), Value::Null);
}

#[test]
fn test_top_level_return_stops_program() {
    assert_eq!(num("let a = 1; return a + 1; missing;"), 2.0);
    assert_eq!(run("return;"), Value::Undefined);
}

#[test]
fn test_semicolons_are_optional_after_expressions() {
    assert_eq!(num("let a = 2;\na * 3\na * 4"), 8.0);
}

#[test]
fn test_return_is_an_identifier_outside_statement_position() {
    assert!(run_err("let x = return;").contains("cannot resolve `return`"));
}

// =============================================================================
// MEMBER ACCESS
// =============================================================================

#[test]
fn test_object_members() {
    let source = r#"
        let user = {name: "Ada", tags: ["a", "b"], inner: {depth: 2}};
        [user.name, user["name"], user.tags[1], user.inner.depth];
    "#;
    let value = run(source);
    assert_eq!(value.to_string(), r#"["Ada", "Ada", "b", 2]"#);
}

#[test]
fn test_missing_members_are_undefined() {
    assert_eq!(run("let o = {a: 1}; o.b;"), Value::Undefined);
    assert_eq!(run("let o = {a: 1}; o.b.c;"), Value::Undefined);
    assert_eq!(run("[1, 2][5];"), Value::Undefined);
    assert_eq!(run("let n = 5; n.length;"), Value::Undefined);
    assert_eq!(run("null.x;"), Value::Undefined);
}

#[test]
fn test_array_length_and_indexes() {
    assert_eq!(num("[10, 20, 30].length;"), 3.0);
    assert_eq!(num("[10, 20, 30][1];"), 20.0);
    assert_eq!(num(r#"[10, 20, 30]["2"];"#), 30.0);
    assert_eq!(run("[10, 20, 30][1.5];"), Value::Undefined);
    assert_eq!(run(r#"[10, 20, 30]["01"];"#), Value::Undefined);
}

#[test]
fn test_string_length_and_indexes() {
    assert_eq!(num(r#""hello".length;"#), 5.0);
    assert_eq!(run(r#""hello"[1];"#), Value::string("e"));
    assert_eq!(run(r#""hello"[9];"#), Value::Undefined);
}

#[test]
fn test_numeric_keys_on_objects() {
    assert_eq!(run("let o = {a: 1}; o[0];"), Value::Undefined);
}

#[test]
fn test_computed_key_expression() {
    let source = r#"
        let data = {first: 1, second: 2};
        let keys = ["first", "second"];
        data[keys[1]];
    "#;
    assert_eq!(num(source), 2.0);
}

// =============================================================================
// LITERALS
// =============================================================================

#[test]
fn test_object_shorthand_resolves_at_evaluation() {
    let source = r#"
        let x = 1;
        function snapshot() { return {x}; }
        x = 2;
        snapshot().x;
    "#;
    assert_eq!(num(source), 2.0);
}

#[test]
fn test_object_shorthand_unknown_name() {
    assert!(run_err("let o = {ghost};").contains("cannot resolve `ghost`"));
}

#[test]
fn test_object_keys_keep_insertion_order() {
    let value = run("let z = 1; let o = {z, a: 2, m: 3}; o;");
    let keys: Vec<String> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys.join(","), "z,a,m");
}

#[test]
fn test_type_name_keys() {
    assert_eq!(run(r#"let o = {String: "s", Number: 1}; o["Number"];"#), Value::Number(1.0));
}

#[test]
fn test_nested_arrays_and_trailing_comma() {
    assert_eq!(run("[[1, 2], [3],];").to_string(), "[[1, 2], [3]]");
    assert_eq!(run("[];"), Value::array(vec![]));
}

#[test]
fn test_single_and_double_quotes() {
    assert_eq!(run(r#"'it"s';"#), Value::string("it\"s"));
    assert_eq!(run(r#""it's";"#), Value::string("it's"));
}

#[test]
fn test_no_escape_processing() {
    assert_eq!(run(r#""a\nb";"#), Value::string("a\\nb"));
}

#[test]
fn test_unterminated_string_runs_to_end() {
    let tokens = tokenize("let s = \"open").unwrap();
    assert_eq!(tokens[3], Token::String("open".to_string()));
    assert_eq!(tokens.last(), Some(&Token::Eof));
}

#[test]
fn test_keywords_need_exact_match() {
    assert_eq!(num("let letter = 3; letter;"), 3.0);
    assert_eq!(num("let functional = 4; functional;"), 4.0);
}

// =============================================================================
// DISPLAY
// =============================================================================

#[test]
fn test_mark_line_format() {
    let values = [
        Value::Number(20.0),
        Value::string("TestCase"),
        numbers(&[1.5, -0.0]),
        strings(&["x"]),
        Value::Undefined,
        Value::Null,
        Value::Bool(true),
    ];
    assert_eq!(
        format_mark_line(&values),
        r#"20 TestCase [1.5, 0] ["x"] undefined null true"#
    );
}

#[test]
fn test_display_of_objects_and_functions() {
    assert_eq!(run("let o = {a: 1, b: \"two\", c: [null]}; o;").to_string(), r#"{ a: 1, b: "two", c: [null] }"#);
    assert_eq!(run("let o = {}; o;").to_string(), "{}");
    assert_eq!(run("mark;").to_string(), "[Function: mark]");
}

#[test]
fn test_special_numbers_display() {
    assert_eq!(run("1 / 0;").to_string(), "Infinity");
    assert_eq!(run("0 - 1 / 0;").to_string(), "-Infinity");
    assert_eq!(run("0 / 0;").to_string(), "NaN");
    assert_eq!(run("2.50;").to_string(), "2.5");
}

// =============================================================================
// AST REUSE
// =============================================================================

#[test]
fn test_ast_is_unchanged_by_evaluation() {
    let program = parse("let a = [1, 2]; function f(x) { return x; } f(a);").unwrap();
    let before = format!("{:?}", program);
    jist::evaluate(&program, &jist::create_root_environment()).unwrap();
    jist::evaluate(&program, &jist::create_root_environment()).unwrap();
    assert_eq!(format!("{:?}", program), before);
}
