//! Renderer output tests: text dump format, DOT structure, JSON shape.

use gocfg::cfg::{build_all, render, Edge, Graph, Node, NodeKind};

const SOURCE: &str = r#"package main

func count(n int) int {
	total := 0
	for i := 0; i < n; i++ {
		total += i
	}
	return total
}
"#;

#[test]
fn text_dump_of_empty_function() {
    let source = "package main\n\nfunc nop() {\n}\n";
    let graph = Graph::from_source(source, "nop").unwrap();
    let text = render::to_text(&graph);
    insta::assert_snapshot!(text.trim_end(), @r"
    function: 'nop'
    -- 0 >> 1 --
    EMPTY BLOCK

    -- 1 --
    RETURN
    ");
}

#[test]
fn text_dump_lists_successor_indices() {
    let graph = Graph::from_source(SOURCE, "count").unwrap();
    let text = render::to_text(&graph);

    assert!(text.starts_with("function: 'count'\n"));
    // The loop condition has two successors, body and fall-through.
    assert!(text.contains("-- 2 >> 4 5 --\ni < n\n"));
    // The exit node closes the dump without successors.
    assert!(text.trim_end().ends_with("-- 6 --\nRETURN"));
}

#[test]
fn rendering_is_deterministic() {
    let first = render::to_text(&Graph::from_source(SOURCE, "count").unwrap());
    let second = render::to_text(&Graph::from_source(SOURCE, "count").unwrap());
    assert_eq!(first, second);

    let graphs = build_all(SOURCE).unwrap();
    assert_eq!(render::dot_document(&graphs), render::dot_document(&graphs));
}

#[test]
fn dot_document_wraps_clusters() {
    let graphs = build_all(SOURCE).unwrap();
    let dot = render::dot_document(&graphs);

    assert!(dot.starts_with("digraph {\n"));
    assert!(dot.trim_end().ends_with('}'));
    assert!(dot.contains("subgraph cluster_0 {"));
    assert!(dot.contains("label=\"count\";"));
    // Condition nodes are diamonds, the exit is an ellipse.
    assert!(dot.contains("[shape=diamond, label=\"i < n\"]"));
    assert!(dot.contains("[shape=ellipse, label=\"RETURN\"]"));
    // Branch edges carry their labels.
    assert!(dot.contains("[label=\"true\"];"));
    assert!(dot.contains("[label=\"false\"];"));
}

#[test]
fn dot_labels_are_escaped() {
    let source = "package main\n\nfunc say() {\n\tprintln(\"hi\")\n}\n";
    let graphs = build_all(source).unwrap();
    let dot = render::dot_document(&graphs);
    assert!(dot.contains(r#"label="println(\"hi\")""#));
}

#[test]
fn carriage_returns_never_reach_the_output() {
    let graph = Graph {
        name: "crlf".to_string(),
        nodes: vec![
            Node {
                index: 0,
                kind: NodeKind::Sequence,
                text: "x()\r\n".to_string(),
                successors: vec![Edge {
                    target: 1,
                    label: None,
                }],
            },
            Node {
                index: 1,
                kind: NodeKind::Branch,
                text: "RETURN".to_string(),
                successors: vec![],
            },
        ],
        root: 0,
        exit: 1,
    };

    let text = render::to_text(&graph);
    assert!(text.contains("-- 0 >> 1 --\nx()\n"));
    assert!(!text.contains('\r'));

    let dot = render::to_dot(&graph, 0);
    assert!(dot.contains(r#"label="x()\n""#));
    assert!(!dot.contains('\r'));
}

#[test]
fn json_carries_graph_structure() {
    let graph = Graph::from_source(SOURCE, "count").unwrap();
    let json = render::to_json(&graph).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["name"], "count");
    assert_eq!(value["root"], 0);
    assert_eq!(value["exit"], 6);
    assert_eq!(value["nodes"][2]["kind"], "condition");
    assert_eq!(value["nodes"][2]["successors"][0]["label"], "true");
    let empty_label = &value["nodes"][0]["successors"][0]["label"];
    assert!(empty_label.is_null());
}
