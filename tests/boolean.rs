mod common;

#[test]
fn string_equality_and_inequality() {
    let (_, out) = common::run(r#"fn main() { print("a" == "a"); print("a" != "b"); }"#).unwrap();
    assert_eq!(out, "true\ntrue\n");
}

#[test]
fn mixed_type_equality_is_false_not_an_error() {
    let (_, out) = common::run(r#"print(1 == "1"); print(1 != "1");"#).unwrap();
    assert_eq!(out, "false\ntrue\n");
}
