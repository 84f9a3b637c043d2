use super::*;

#[test]
fn test_parse_functions_in_source_order() {
    let source = "package main\n\nfunc a() {\n}\n\nfunc b() {\n\tx()\n}\n";
    let functions = parse_functions(source).expect("Should parse");
    assert_eq!(functions.len(), 2);
    assert_eq!(functions[0].name, "a");
    assert_eq!(functions[1].name, "b");
    assert!(functions[0].body.is_empty());
    assert_eq!(functions[1].body.len(), 1);
}

#[test]
fn test_comments_are_skipped() {
    let source = "package main\n\nfunc f() {\n\t// leading comment\n\tx()\n\t// trailing comment\n}\n";
    let function = find_function(source, "f").expect("Should parse");
    assert_eq!(function.body.len(), 1);
    assert!(matches!(function.body[0], Stmt::Simple(_)));
}

#[test]
fn test_if_condition_span_covers_init_statement() {
    let source = "package main\n\nfunc f() {\n\tif x := g(); x > 0 {\n\t\tuse(x)\n\t}\n}\n";
    let function = find_function(source, "f").expect("Should parse");
    let Stmt::Cond(cond) = &function.body[0] else {
        panic!("Expected a conditional");
    };
    assert_eq!(cond.cond.text(source), "if x := g(); x > 0");
}

#[test]
fn test_for_clause_fields() {
    let source = "package main\n\nfunc f() {\n\tfor i := 0; i < 10; i++ {\n\t\tuse(i)\n\t}\n}\n";
    let function = find_function(source, "f").expect("Should parse");
    let Stmt::For {
        init, cond, post, ..
    } = &function.body[0]
    else {
        panic!("Expected a for loop");
    };
    assert_eq!(init.map(|s| s.text(source)), Some("i := 0"));
    assert_eq!(cond.map(|s| s.text(source)), Some("i < 10"));
    assert_eq!(post.map(|s| s.text(source)), Some("i++"));
}

#[test]
fn test_bare_condition_loop() {
    let source = "package main\n\nfunc f() {\n\tfor running {\n\t\tstep()\n\t}\n}\n";
    let function = find_function(source, "f").expect("Should parse");
    let Stmt::For {
        init, cond, post, ..
    } = &function.body[0]
    else {
        panic!("Expected a for loop");
    };
    assert!(init.is_none());
    assert_eq!(cond.map(|s| s.text(source)), Some("running"));
    assert!(post.is_none());
}

#[test]
fn test_infinite_loop_has_no_clause() {
    let source = "package main\n\nfunc f() {\n\tfor {\n\t\tstep()\n\t}\n}\n";
    let function = find_function(source, "f").expect("Should parse");
    let Stmt::For { cond, .. } = &function.body[0] else {
        panic!("Expected a for loop");
    };
    assert!(cond.is_none());
}

#[test]
fn test_range_clause_expression() {
    let source = "package main\n\nfunc f(items []int) {\n\tfor _, v := range items {\n\t\tuse(v)\n\t}\n}\n";
    let function = find_function(source, "f").expect("Should parse");
    let Stmt::Range { expr, .. } = &function.body[0] else {
        panic!("Expected a range loop");
    };
    assert_eq!(expr.text(source), "items");
}

#[test]
fn test_else_if_becomes_nested_conditional() {
    let source = "package main\n\nfunc f(x int) {\n\tif x > 1 {\n\t\ta()\n\t} else if x > 0 {\n\t\tb()\n\t} else {\n\t\tc()\n\t}\n}\n";
    let function = find_function(source, "f").expect("Should parse");
    let Stmt::Cond(cond) = &function.body[0] else {
        panic!("Expected a conditional");
    };
    let Some(ElseArm::If(inner)) = &cond.or_else else {
        panic!("Expected an else-if arm");
    };
    assert_eq!(inner.cond.text(source), "if x > 0");
    assert!(matches!(inner.or_else, Some(ElseArm::Block(_))));
}

#[test]
fn test_unmodeled_statements_become_simple_spans() {
    let source = "package main\n\nfunc f(ch chan int) {\n\tswitch v := <-ch; v {\n\tcase 1:\n\t\ta()\n\t}\n\tdefer close(ch)\n\tgo work()\n}\n";
    let function = find_function(source, "f").expect("Should parse");
    assert_eq!(function.body.len(), 3);
    assert!(function
        .body
        .iter()
        .all(|s| matches!(s, Stmt::Simple(_))));
}

#[test]
fn test_span_join_covers_both() {
    let a = Span::new(4, 10);
    let b = Span::new(12, 20);
    assert_eq!(a.join(b), Span::new(4, 20));
    assert_eq!(b.join(a), Span::new(4, 20));
}

#[test]
fn test_declaration_without_body_is_skipped() {
    let source = "package main\n\nfunc compiled() int\n\nfunc real() {\n}\n";
    let functions = parse_functions(source).expect("Should parse");
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].name, "real");
}
