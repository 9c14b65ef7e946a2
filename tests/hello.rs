mod common;

#[test]
fn prints_hello_world() {
    let (_, out) = common::run(r#"fn main() { print("Hello, World!"); }"#).unwrap();
    assert_eq!(out, "Hello, World!\n");
}
