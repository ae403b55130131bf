//! Tracing integration tests.
//!
//! These tests install a capturing layer and verify the spans and events the
//! engine, loader and batch runner emit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use autosim::batch::run_batch;
use autosim::core::Tape;
use autosim::engine::execute;
use autosim::loader::{load_str, read_inputs};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span or event with its fields.
#[derive(Debug, Clone)]
struct Captured {
    name: String,
    level: tracing::Level,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

impl Captured {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn message(&self) -> Option<&str> {
        self.field("message")
    }
}

#[derive(Default)]
struct Capture {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

struct CaptureHandle {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<Captured> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }

    fn event(&self, message: &str) -> Option<Captured> {
        self.events()
            .into_iter()
            .find(|e| e.message() == Some(message))
    }
}

/// Visitor that extracts fields as strings.
struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);

        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.spans.lock().unwrap().push(Captured {
            name: attrs.metadata().name().to_string(),
            level: *attrs.metadata().level(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);

        let parent_name = ctx
            .event_span(event)
            .map(|span_ref| span_ref.name().to_string());

        self.events.lock().unwrap().push(Captured {
            name: event.metadata().name().to_string(),
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
            parent_name,
        });
    }
}

/// Set up a tracing subscriber with capture and run a closure.
fn with_captured<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let layer = Capture::default();
    let handle = CaptureHandle {
        spans: layer.spans.clone(),
        events: layer.events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    handle
}

const BALANCED: &str = r#"{
    "type": "1_stack_machine",
    "states": ["Q0", "Q1"],
    "initialState": "Q0",
    "finalStates": ["Q1"],
    "alphabet": ["a", "b"],
    "acceptance": "final_state_and_empty_stacks",
    "transitions": {
        "Q0": ["(a, &, X, Q0)", "(b, X, &, Q1)"],
        "Q1": ["(b, X, &, Q1)"]
    }
}"#;

// ============================================================================
// Tests
// ============================================================================

#[test]
fn execute_opens_a_span_with_kind_and_tape_length() {
    let handle = with_captured(|| {
        let mut machine = load_str(BALANCED).unwrap().machine;
        execute(&mut machine, &mut Tape::from(vec!["a", "b"]));
    });

    let spans = handle.spans();
    let span = spans
        .iter()
        .find(|s| s.name == "execute")
        .expect("execute span should be recorded");

    assert_eq!(span.level, tracing::Level::DEBUG);
    assert_eq!(span.fields.get("kind").map(String::as_str), Some("1_stack_machine"));
    assert_eq!(span.fields.get("tape_len").map(String::as_str), Some("2"));
    assert_eq!(span.parent_name, None);
}

#[test]
fn every_fired_transition_is_traced_inside_the_span() {
    let handle = with_captured(|| {
        let mut machine = load_str(BALANCED).unwrap().machine;
        execute(&mut machine, &mut Tape::from(vec!["a", "a", "b", "b"]));
    });

    let fired: Vec<Captured> = handle
        .events()
        .into_iter()
        .filter(|e| e.message() == Some("transition fired"))
        .collect();

    assert_eq!(fired.len(), 4);
    assert!(fired.iter().all(|e| e.level == tracing::Level::TRACE));
    assert!(fired.iter().all(|e| e.parent_name.as_deref() == Some("execute")));
    assert_eq!(fired[2].field("from"), Some("Q0"));
    assert_eq!(fired[2].field("to"), Some("Q1"));
    assert_eq!(fired[2].field("symbol"), Some("b"));
}

#[test]
fn verdict_is_logged_at_debug() {
    let handle = with_captured(|| {
        let mut machine = load_str(BALANCED).unwrap().machine;
        execute(&mut machine, &mut Tape::from(vec!["b"]));
    });

    let finished = handle.event("run finished").expect("verdict event");
    assert_eq!(finished.level, tracing::Level::DEBUG);
    assert_eq!(finished.field("verdict"), Some("REJECTED"));
    assert_eq!(finished.field("records"), Some("1"));

    let stuck = handle
        .event("no applicable transition")
        .expect("stuck event");
    assert_eq!(stuck.field("symbol"), Some("b"));
}

#[test]
fn loader_warns_about_symbols_outside_the_alphabet() {
    let handle = with_captured(|| {
        let document = BALANCED.replace(r#"["a", "b"]"#, r#"["a"]"#);
        load_str(&document).unwrap();
    });

    let warning = handle
        .event("transition symbol is not in the declared alphabet")
        .expect("alphabet warning");
    assert_eq!(warning.level, tracing::Level::WARN);
    assert_eq!(warning.field("symbol"), Some("b"));

    let loaded = handle.event("machine definition loaded").expect("load event");
    assert_eq!(loaded.level, tracing::Level::DEBUG);
}

#[test]
fn batch_summary_is_logged_at_info() {
    let handle = with_captured(|| {
        let mut machine = load_str(BALANCED).unwrap().machine;
        run_batch(&mut machine, read_inputs("a,b\na\nb,a"));
    });

    let summary = handle.event("batch finished").expect("batch summary");
    assert_eq!(summary.level, tracing::Level::INFO);
    assert_eq!(summary.field("tapes"), Some("3"));
    assert_eq!(summary.field("accepted"), Some("1"));
    assert_eq!(summary.field("rejected"), Some("2"));

    let runs = handle.spans().iter().filter(|s| s.name == "execute").count();
    assert_eq!(runs, 3);
}

#[test]
fn idle_closure_captures_nothing() {
    let handle = with_captured(|| {});
    assert!(handle.spans().is_empty());
    assert!(handle.events().is_empty());
}
