mod common;

#[test]
fn arity_mismatch_is_a_pipeline_error() {
    let err = common::run("fn f(x) { return x + 1; } fn main() { print(f(1, 2)); }").unwrap_err();
    assert_eq!(err.to_string(), "Function f expected 1 args, got 2");
}

#[test]
fn calling_an_undefined_function_is_a_pipeline_error() {
    let err = common::run("fn main() { print(nope()); }").unwrap_err();
    assert_eq!(err.to_string(), "Undefined function nope");
}

#[test]
fn both_main_and_top_level_statements_run() {
    let (_, out) = common::run(r#"print("top"); fn main() { print("main"); }"#).unwrap();
    assert_eq!(out, "top\nmain\n");
}
