//! Integration tests for statistics gathering and DOT output.

use serde_json::json;

use logsieve_engine::Context;

fn sample_context() -> Context {
    let mut ctx = Context::new();
    let mut comp = ctx.define_component("@addr").unwrap();
    ctx.add_parser(
        &mut comp,
        json!([
            {"type": "ipv4", "name": "ip"},
            {"type": "literal", "text": ":"},
            {"type": "number", "name": "port"}
        ]),
    )
    .unwrap();
    ctx.mark_terminal(comp, None);

    ctx.add_rule(
        json!([
            {"type": "literal", "text": "connect from "},
            {"type": "@addr", "name": "."}
        ]),
        None,
    )
    .unwrap();
    ctx.add_rule(
        json!([
            {"type": "literal", "text": "connect from "},
            {"type": "word", "name": "host"}
        ]),
        None,
    )
    .unwrap();
    ctx.optimize();
    ctx
}

#[test]
fn stats_count_the_main_graph() {
    let ctx = sample_context();
    let stats = ctx.stats(ctx.root());

    // root -> "connect from " -> fork (@addr | word) -> shared/terminal
    assert_eq!(stats.edges, 3);
    assert_eq!(stats.motif_counts.get("literal"), Some(&1));
    assert_eq!(stats.motif_counts.get("USER-DEFINED"), Some(&1));
    assert_eq!(stats.motif_counts.get("word"), Some(&1));
    assert!(stats.terminal_nodes >= 1);
    assert!(stats.longest_path >= 3);
}

#[test]
fn full_stats_cover_components_and_main() {
    let ctx = sample_context();
    let full = ctx.full_stats();

    assert_eq!(full.components.len(), 1);
    assert_eq!(full.components[0].0, "@addr");
    let comp_stats = &full.components[0].1;
    assert_eq!(comp_stats.edges, 3);
    assert_eq!(comp_stats.terminal_nodes, 1);

    let report = full.to_string();
    assert!(report.contains("User-Defined Types"));
    assert!(report.contains("type: @addr"));
    assert!(report.contains("Main PDAG"));
    assert!(report.contains("nodes.............:"));
}

#[test]
fn stats_are_stable_across_runs() {
    let ctx = sample_context();
    let a = ctx.stats(ctx.root());
    let b = ctx.stats(ctx.root());
    assert_eq!(a.nodes, b.nodes);
    assert_eq!(a.edges, b.edges);
    assert_eq!(a.longest_path, b.longest_path);
}

#[test]
fn dot_output_is_a_digraph_with_labels() {
    let ctx = sample_context();
    let dot = ctx.dot(ctx.root());

    assert!(dot.starts_with("digraph pdag {\n"));
    assert!(dot.trim_end().ends_with('}'));
    assert!(dot.contains("label=\"literal:connect from \""));
    assert!(dot.contains("label=\"USER-DEFINED:\""));
    assert!(dot.contains("style=\"bold\""));
}

#[test]
fn dot_renders_shared_nodes_once() {
    let mut ctx = Context::new();
    ctx.add_rule(
        json!([
            {
                "type": "alternative",
                "parser": [
                    {"type": "literal", "text": "a"},
                    {"type": "literal", "text": "b"}
                ]
            },
            {"type": "number", "name": "n"}
        ]),
        None,
    )
    .unwrap();
    ctx.optimize();

    let dot = ctx.dot(ctx.root());
    let shared = ctx.node(ctx.root()).parsers[0].node;
    let decl = format!("{shared} [ label=");
    assert_eq!(dot.matches(&decl).count(), 1);
}
