//! Integration tests for the optimizer: priority ordering and literal path
//! compaction.

use std::collections::HashSet;

use serde_json::{Value, json};

use logsieve_engine::{Context, MotifData, NodeId};

/// Walks every node reachable from the main root and the components.
fn all_nodes(ctx: &Context) -> Vec<NodeId> {
    fn walk(ctx: &Context, id: NodeId, seen: &mut HashSet<NodeId>, out: &mut Vec<NodeId>) {
        if !seen.insert(id) {
            return;
        }
        out.push(id);
        for prs in &ctx.node(id).parsers {
            if let MotifData::Repeat { parser, while_cond } = prs.data {
                walk(ctx, parser, seen, out);
                walk(ctx, while_cond, seen, out);
            }
            walk(ctx, prs.node, seen, out);
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for (id, _) in ctx.components() {
        walk(ctx, ctx.component_root(id), &mut seen, &mut out);
    }
    walk(ctx, ctx.root(), &mut seen, &mut out);
    out
}

fn mixed_rulebase() -> Context {
    let mut ctx = Context::new();
    let mut comp = ctx.define_component("@kv").unwrap();
    ctx.add_parser(
        &mut comp,
        json!([
            {"type": "word", "name": "key"},
            {"type": "literal", "text": "="},
            {"type": "word", "name": "val"}
        ]),
    )
    .unwrap();
    ctx.mark_terminal(comp, None);

    ctx.add_rule(
        json!([
            {"type": "literal", "text": "up "},
            {"type": "number", "name": "secs"}
        ]),
        None,
    )
    .unwrap();
    ctx.add_rule(
        json!([
            {"type": "literal", "text": "up "},
            {"type": "rest", "name": "tail"}
        ]),
        None,
    )
    .unwrap();
    ctx.add_rule(
        json!([
            {"type": "literal", "text": "set "},
            {"type": "@kv", "name": "."}
        ]),
        None,
    )
    .unwrap();
    ctx.add_rule(
        json!([
            {"type": "literal", "text": "list "},
            {
                "type": "repeat",
                "name": "items",
                "parser": {"type": "word", "name": "item"},
                "while": {"type": "literal", "text": ","}
            }
        ]),
        None,
    )
    .unwrap();
    ctx
}

#[test]
fn priorities_are_monotone_after_optimize() {
    let mut ctx = mixed_rulebase();
    ctx.optimize();

    for id in all_nodes(&ctx) {
        let prios: Vec<u32> = ctx.node(id).parsers.iter().map(|p| p.prio).collect();
        assert!(
            prios.windows(2).all(|w| w[0] <= w[1]),
            "edges of {id:?} are out of order: {prios:?}"
        );
    }
}

#[test]
fn literal_chains_collapse_to_single_edges() {
    let mut ctx = Context::new();
    ctx.add_rule(
        json!([
            {"type": "literal", "text": "kernel"},
            {"type": "literal", "text": ": "},
            {"type": "literal", "text": "panic"}
        ]),
        None,
    )
    .unwrap();
    ctx.optimize();

    let root = ctx.node(ctx.root());
    assert_eq!(root.parsers.len(), 1);
    assert!(matches!(
        &root.parsers[0].data,
        MotifData::Literal(text) if text == "kernel: panic"
    ));
    assert!(ctx.node(root.parsers[0].node).terminal);
}

#[test]
fn compaction_preserves_accepted_language() {
    let rules = [
        json!([
            {"type": "literal", "text": "con"},
            {"type": "literal", "text": "nect"},
            {"type": "literal", "text": " ok"}
        ]),
        json!([
            {"type": "literal", "text": "con"},
            {"type": "literal", "text": "sole"}
        ]),
        json!([
            {"type": "literal", "text": "dis"},
            {"type": "literal", "text": "connect"}
        ]),
    ];
    let mut plain = Context::new();
    let mut optimized = Context::new();
    for rule in &rules {
        plain.add_rule(rule.clone(), None).unwrap();
        optimized.add_rule(rule.clone(), None).unwrap();
    }
    optimized.optimize();

    for input in [
        "connect ok",
        "console",
        "disconnect",
        "connect",
        "con",
        "consoles",
        "",
    ] {
        let a = plain.normalize(input);
        let b = optimized.normalize(input);
        assert_eq!(
            a.outcome, b.outcome,
            "outcome diverged on {input:?} after optimization"
        );
        if a.is_structured() {
            assert_eq!(Value::Object(a.record), Value::Object(b.record));
        }
    }
}

#[test]
fn optimize_is_idempotent() {
    let mut once = mixed_rulebase();
    once.optimize();
    let shape_once: Vec<(usize, Vec<u32>)> = all_nodes(&once)
        .iter()
        .map(|&id| {
            let n = once.node(id);
            (n.parsers.len(), n.parsers.iter().map(|p| p.prio).collect())
        })
        .collect();

    let mut twice = mixed_rulebase();
    twice.optimize();
    twice.optimize();
    let shape_twice: Vec<(usize, Vec<u32>)> = all_nodes(&twice)
        .iter()
        .map(|&id| {
            let n = twice.node(id);
            (n.parsers.len(), n.parsers.iter().map(|p| p.prio).collect())
        })
        .collect();

    assert_eq!(shape_once, shape_twice);
}

#[test]
fn tagged_nodes_survive_compaction() {
    let mut ctx = Context::new();
    // "restart" is a tagged rule; "restart now" continues through the
    // tagged node. Compaction must not swallow it.
    ctx.add_rule(
        json!({"type": "literal", "text": "restart"}),
        Some(vec!["action".to_string()]),
    )
    .unwrap();
    ctx.add_rule(
        json!([
            {"type": "literal", "text": "restart"},
            {"type": "literal", "text": " now"}
        ]),
        None,
    )
    .unwrap();
    ctx.optimize();

    let out = ctx.normalize("restart");
    assert!(out.is_structured());
    assert_eq!(out.record.get("event.tags"), Some(&json!(["action"])));

    let out = ctx.normalize("restart now");
    assert!(out.is_structured());
    assert!(!out.record.contains_key("event.tags"));
}
