mod common;

#[test]
fn whole_number_arithmetic_prints_without_trailing_zero() {
    let (_, out) = common::run("fn main() { print(1 + 2 * 3); }").unwrap();
    assert_eq!(out, "7\n");
}

#[test]
fn undefined_variable_is_a_pipeline_error() {
    let err = common::run("fn main() { print(undefined_name); }").unwrap_err();
    assert_eq!(err.to_string(), "Undefined variable undefined_name");
}
