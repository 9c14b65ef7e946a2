mod common;

#[test]
fn assignment_to_unbound_name_creates_a_global() {
    let (_, out) = common::run(
        "fn bump() { counter = counter + 1; } fn main() { counter = 0; bump(); bump(); print(counter); }",
    )
    .unwrap();
    assert_eq!(out, "3\n");
}

#[test]
fn let_shadows_global_within_the_declaring_frame() {
    let (_, out) =
        common::run("fn f() { let x = 99; print(x); } fn main() { x = 1; f(); print(x); }").unwrap();
    assert_eq!(out, "99\n1\n");
}
