mod common;

#[test]
fn while_loop_counts_up() {
    let (_, out) = common::run("let x = 0; while (x < 3) { print(x); x = x + 1; }").unwrap();
    assert_eq!(out, "0\n1\n2\n");
}

#[test]
fn while_with_false_condition_runs_zero_times() {
    let (_, out) = common::run(r#"while (false) { print("never"); } print("done");"#).unwrap();
    assert_eq!(out, "done\n");
}
