//! Integration tests for normalization: capture semantics, priorities,
//! custom types, tags, and failure reporting.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use logsieve_engine::{Annotate, Context};
use logsieve_foundation::Record;

fn loaded(rules: &[Value]) -> Context {
    let mut ctx = Context::new();
    for rule in rules {
        ctx.add_rule(rule.clone(), None).unwrap();
    }
    ctx.optimize();
    ctx
}

#[test]
fn literal_then_word_capture() {
    let ctx = loaded(&[json!([
        {"type": "literal", "text": "user="},
        {"type": "word", "name": "user"}
    ])]);

    let out = ctx.normalize("user=alice");
    assert!(out.is_structured());
    assert_eq!(Value::Object(out.record), json!({"user": "alice"}));
}

#[test]
fn shared_prefix_picks_more_specific_motif() {
    let ctx = loaded(&[
        json!([
            {"type": "literal", "text": "err "},
            {"type": "rest", "name": "msg"}
        ]),
        json!([
            {"type": "literal", "text": "err "},
            {"type": "number", "name": "code"}
        ]),
    ]);

    // number (intrinsic 16) outranks rest (255) behind the shared prefix.
    let out = ctx.normalize("err 42");
    assert!(out.is_structured());
    assert_eq!(Value::Object(out.record), json!({"code": 42}));
}

#[test]
fn alternative_branches_share_one_successor() {
    let ctx = loaded(&[json!([
        {
            "type": "alternative",
            "parser": [
                {"type": "literal", "text": "ok"},
                {"type": "literal", "text": "OK"}
            ]
        },
        {"type": "literal", "text": " done"}
    ])]);

    for input in ["ok done", "OK done"] {
        let out = ctx.normalize(input);
        assert!(out.is_structured(), "{input} should match");
        assert!(out.record.is_empty());
    }
    assert!(!ctx.normalize("ko done").is_structured());
}

#[test]
fn custom_type_splices_into_the_record() {
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
    ctx.add_rule(json!({"type": "@addr", "name": "."}), None).unwrap();
    ctx.optimize();

    let out = ctx.normalize("10.0.0.1:80");
    assert!(out.is_structured());
    assert_eq!(
        Value::Object(out.record),
        json!({"ip": "10.0.0.1", "port": 80})
    );
}

#[test]
fn custom_type_under_a_name_nests_the_record() {
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
            {"type": "literal", "text": "peer "},
            {"type": "@addr", "name": "peer"}
        ]),
        None,
    )
    .unwrap();
    ctx.optimize();

    let out = ctx.normalize("peer 10.0.0.1:80");
    assert!(out.is_structured());
    assert_eq!(
        Value::Object(out.record),
        json!({"peer": {"ip": "10.0.0.1", "port": 80}})
    );
}

#[test]
fn partial_failure_reports_unparsed_tail() {
    let mut ctx = Context::new();
    ctx.add_rule(
        json!([
            {"type": "literal", "text": "foo"},
            {"type": "literal", "text": "bar"}
        ]),
        None,
    )
    .unwrap();

    let out = ctx.normalize("foobaz");
    assert!(!out.is_structured());
    assert_eq!(
        Value::Object(out.record),
        json!({"originalmsg": "foobaz", "unparsed-data": "baz"})
    );
}

#[test]
fn unparsed_tail_uses_the_deepest_attempt() {
    let ctx = loaded(&[
        json!([
            {"type": "literal", "text": "ab"},
            {"type": "number", "name": "n"},
            {"type": "literal", "text": "!"}
        ]),
        json!([
            {"type": "literal", "text": "ab"},
            {"type": "literal", "text": "c"}
        ]),
    ]);

    // "ab12x": the number path reaches offset 4 before "!" fails; the
    // literal path stops at 2.
    let out = ctx.normalize("ab12x");
    assert!(!out.is_structured());
    assert_eq!(out.record.get("unparsed-data"), Some(&json!("x")));
}

#[test]
fn lower_priority_number_wins() {
    let ctx = loaded(&[
        json!({"type": "word", "name": "second", "priority": 20}),
        json!({"type": "word", "name": "first", "priority": 10}),
    ]);

    let out = ctx.normalize("token");
    assert!(out.is_structured());
    assert_eq!(Value::Object(out.record), json!({"first": "token"}));
}

#[test]
fn absent_capture_name_adds_nothing() {
    let ctx = loaded(&[json!([
        {"type": "word", "name": "-"},
        {"type": "literal", "text": " "},
        {"type": "number", "name": "n"}
    ])]);

    let out = ctx.normalize("ignored 7");
    assert!(out.is_structured());
    assert_eq!(Value::Object(out.record), json!({"n": 7}));
}

struct CountingAnnotator {
    calls: Arc<AtomicUsize>,
}

impl Annotate for CountingAnnotator {
    fn annotate(&self, record: &mut Record, tags: &[String]) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for tag in tags {
            record.insert(format!("annotated.{tag}"), Value::Bool(true));
        }
    }
}

#[test]
fn tags_are_attached_and_annotator_runs_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut ctx = Context::new();
    ctx.set_annotator(Box::new(CountingAnnotator {
        calls: Arc::clone(&calls),
    }));
    ctx.add_rule(
        json!([
            {"type": "literal", "text": "session opened for "},
            {"type": "word", "name": "user"}
        ]),
        Some(vec!["login".to_string()]),
    )
    .unwrap();
    ctx.optimize();

    let out = ctx.normalize("session opened for alice");
    assert!(out.is_structured());
    assert_eq!(out.record.get("event.tags"), Some(&json!(["login"])));
    assert_eq!(out.record.get("annotated.login"), Some(&json!(true)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Untagged failures never reach the annotator.
    let out = ctx.normalize("nothing matches this");
    assert!(!out.is_structured());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn matching_reads_a_frozen_context_from_threads() {
    let ctx = loaded(&[json!([
        {"type": "literal", "text": "n="},
        {"type": "number", "name": "n"}
    ])]);

    std::thread::scope(|scope| {
        for i in 0..4 {
            let ctx = &ctx;
            scope.spawn(move || {
                let line = format!("n={i}");
                let out = ctx.normalize(&line);
                assert!(out.is_structured());
                assert_eq!(out.record.get("n"), Some(&json!(i)));
            });
        }
    });
}

#[test]
fn empty_input_matches_only_terminal_root_rules() {
    let ctx = loaded(&[json!({"type": "rest", "name": "all"})]);
    let out = ctx.normalize("");
    assert!(out.is_structured());
    assert_eq!(Value::Object(out.record), json!({"all": ""}));
}
