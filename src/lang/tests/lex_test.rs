use super::*;

#[test]
fn test_statements_and_columns() {
    let s = "var a = 1;\n  a += 2 ;";
    let v = lex(s);
    assert_eq!(v, vec![(0..9, "var a = 1"), (13..19, "a += 2")]);
    assert_eq!(&s[13..19], "a += 2");
}

#[test]
fn test_empty_statements_dropped() {
    assert!(lex(";;  ;\r\n;").is_empty());
    assert_eq!(lex("\tjump(x);;"), vec![(1..8, "jump(x)")]);
}

#[test]
fn test_unterminated_tail_dropped() {
    assert_eq!(lex("v[0] = 1; v[1] = 2"), vec![(0..8, "v[0] = 1")]);
    assert!(lex("no terminator").is_empty());
}
