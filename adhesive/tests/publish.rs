//! Publish pipeline tests.

use adhesive::{
    BoxError, Bus, ContextError, PublishError,
    testing::{CallLog, Counter, counting},
};

mod common;
use common::{Context, EVENT, event, fixture_bus};

#[test]
fn test_context_and_events_on_construction() {
    let bus = fixture_bus();
    let mut cx = Context::default();

    bus.publish_with(&mut cx).event(event("simple"));
    assert_eq!(cx.counter, 1);

    bus.publish_with(&mut cx)
        .events([event("simple"), event("simple")]);
    assert_eq!(cx.counter, 3);
}

#[test]
fn test_events_without_names_is_a_no_op() {
    let bus = fixture_bus();
    let mut cx = Context::default();
    let publish = bus.publish_with(&mut cx).events(Vec::<String>::new()).events("");
    assert!(!publish.is_halted());
    assert_eq!(publish.context_ref().counter, 0);
}

#[test]
fn test_matching_listeners_run_logic() {
    let bus = fixture_bus();
    let mut cx = Context::default();
    bus.emit(&mut cx, EVENT).unwrap();
    assert_eq!(cx.then, 2);
}

#[test]
fn test_predicates_run_then_logic() {
    let bus = fixture_bus();
    let mut cx = Context::default();
    bus.emit(&mut cx, event("predicates")).unwrap();
    assert_eq!(cx.filter, 2);
    assert_eq!(cx.then, 2);
}

#[test]
fn test_failed_predicate_skips_listener_without_error() {
    let bus = fixture_bus();
    let mut cx = Context {
        fail: true,
        ..Context::default()
    };
    let result = bus.emit(&mut cx, event("predicates"));
    assert!(result.is_ok());
    assert_eq!(cx.then, 1, "next listener still runs");
}

#[test]
fn test_dependencies_run_after_predicates() {
    let bus = fixture_bus();
    let mut cx = Context::default();
    bus.emit(&mut cx, event("dependencies")).unwrap();
    assert_eq!(cx.test, 2);
    assert!(cx.continued);
}

#[test]
fn test_dependencies_skipped_when_predicates_fail() {
    let bus = fixture_bus();
    let mut cx = Context {
        pass: false,
        ..Context::default()
    };
    bus.emit(&mut cx, event("dependencies")).unwrap();
    assert_eq!(cx.test, 0);
}

#[test]
fn test_failed_dependency_records_context_error_and_stops() {
    let bus = fixture_bus();
    let mut cx = Context {
        depend: None,
        ..Context::default()
    };
    let err = bus
        .emit(&mut cx, [event("dependencies"), event("simple")])
        .unwrap_err();

    assert!(matches!(
        &err,
        PublishError::Context(ContextError { event }) if event == "default:dependencies"
    ));
    assert_eq!(cx.test, 1);
    assert_eq!(cx.then, 0);
    assert!(!cx.continued, "listeners after the failure must not run");
    assert_eq!(cx.counter, 0, "later event names must not fire");
}

#[test]
fn test_logic_error_halts_the_publish() {
    let bus = fixture_bus();
    let mut cx = Context::default();
    let publish = bus
        .publish_with(&mut cx)
        .events([event("simple"), event("error"), event("simple")]);

    assert_eq!(publish.error().map(ToString::to_string).as_deref(), Some("msg"));
    // One from the first "simple", one from "error" itself.
    assert_eq!(publish.context_ref().counter, 2);

    let publish = publish.events(event("simple")).tasks(EVENT, ["task"]);
    assert_eq!(publish.context_ref().counter, 2);
}

#[test]
fn test_tasks() {
    let bus = fixture_bus();
    let mut cx = Context::default();
    bus.publish_with(&mut cx).tasks(EVENT, ["task", "1"]);
    assert_eq!(cx.counter, 2);

    let mut cx = Context::default();
    bus.publish_with(&mut cx)
        .task(EVENT, "task")
        .task(EVENT, ":task")
        .task(EVENT, "task:subtask");
    assert_eq!(cx.counter, 3);
}

#[test]
fn test_then_runs_in_order_and_sees_context() {
    let bus = fixture_bus();
    let log = CallLog::new();
    let mut cx = Context::default();

    bus.publish_with(&mut cx)
        .then(|_| log.record("before"))
        .event(event("simple"))
        .then(|cx| log.record(format!("after:{}", cx.counter)));

    assert_eq!(log.calls(), vec!["before", "after:1"]);
}

#[test]
fn test_then_is_skipped_once_halted() {
    let bus = fixture_bus();
    let mut cx = Context::default();
    let publish = bus
        .publish_with(&mut cx)
        .event(event("error"))
        .then(|cx| cx.continued = true);
    assert!(publish.is_halted());
    assert!(!publish.context_ref().continued);
}

#[derive(Debug, thiserror::Error)]
#[error("typed failure")]
struct TypedFailure;

#[test]
fn test_then_catch_receives_the_exact_error() {
    let mut bus = fixture_bus();
    bus.subscribe("typed")
        .then(|_| -> Result<(), TypedFailure> { Err(TypedFailure) });

    let mut cx = Context::default();
    let mut received = false;
    let publish = bus
        .publish_with(&mut cx)
        .event("typed")
        .then_catch(|_, err| {
            received = err.and_then(|e| e.downcast_ref::<TypedFailure>()).is_some();
        });

    assert!(publish.error().and_then(|e| e.downcast_ref::<TypedFailure>()).is_some());
    assert!(received);
}

#[test]
fn test_then_catch_runs_without_error() {
    let bus = fixture_bus();
    let mut seen = Vec::new();
    let mut cx = Context::default();
    bus.publish_with(&mut cx)
        .event(event("simple"))
        .then_catch(|cx, err| seen.push((cx.counter, err.is_some())));
    assert_eq!(seen, vec![(1, false)]);
}

#[test]
fn test_then_catch_error_replaces_recorded_error() {
    let bus = fixture_bus();
    let mut cx = Context::default();
    let err = bus
        .publish_with(&mut cx)
        .event(event("error"))
        .then_catch(|_, _| -> Result<(), BoxError> { Err("replaced".into()) })
        .into_result()
        .unwrap_err();
    assert_eq!(err.to_string(), "replaced");
}

#[test]
fn test_then_catch_ok_keeps_recorded_error() {
    let bus = fixture_bus();
    let mut cx = Context::default();
    let publish = bus
        .publish_with(&mut cx)
        .event(event("error"))
        .then_catch(|_, _| ());
    assert_eq!(publish.error().map(ToString::to_string).as_deref(), Some("msg"));
}

#[test]
fn test_recover_resumes_event_processing() {
    let bus = fixture_bus();
    let mut cx = Context::default();
    let result = bus
        .publish_with(&mut cx)
        .event(event("error"))
        .recover(|cx, err| {
            assert_eq!(err.to_string(), "msg");
            cx.continued = true;
        })
        .event(event("simple"))
        .into_result();

    assert!(result.is_ok());
    assert!(cx.continued);
    assert_eq!(cx.counter, 2);
}

#[test]
fn test_recover_does_not_run_without_error() {
    let bus = fixture_bus();
    let mut cx = Context::default();
    bus.publish_with(&mut cx)
        .recover(|cx, _| cx.continued = true)
        .event(event("simple"));
    assert!(!cx.continued);
}

#[test]
fn test_rebinding_context_affects_only_later_calls() {
    let bus = fixture_bus();
    let mut first = Context::default();
    let mut second = Context::default();

    bus.publish_with(&mut first)
        .event(event("simple"))
        .context(&mut second)
        .events([event("simple"), event("simple")]);

    assert_eq!(first.counter, 1);
    assert_eq!(second.counter, 2);
}

#[test]
fn test_publish_without_context_uses_default() {
    let bus = fixture_bus();
    let (cx, err) = bus.publish().event(EVENT).into_parts();
    assert!(err.is_none());
    assert_eq!(cx.map(|cx| cx.then), Some(2));
}

#[test]
fn test_publish_with_borrowed_context_returns_no_owned_context() {
    let bus = fixture_bus();
    let mut cx = Context::default();
    let (owned, err) = bus.publish_with(&mut cx).event(EVENT).into_parts();
    assert!(owned.is_none());
    assert!(err.is_none());
    assert_eq!(cx.then, 2);
}

#[test]
fn test_empty_task_is_not_fired() {
    let counter = Counter::new();
    let mut bus = Bus::<Context>::new();
    bus.subscribe("evt:").then(counting(&counter));
    bus.subscribe("evt").then(counting(&counter));

    let mut cx = Context::default();
    bus.publish_with(&mut cx).task("evt", "").tasks("evt", ["", ":"]);
    assert_eq!(counter.count(), 1, "only the explicit ':' task reaches evt:");
}

#[test]
fn test_rebinding_an_owned_context_hands_back_none() {
    let bus = fixture_bus();
    let mut other = Context::default();
    let (owned, err) = bus
        .publish()
        .event(event("simple"))
        .context(&mut other)
        .event(event("simple"))
        .into_parts();
    assert!(owned.is_none());
    assert!(err.is_none());
    assert_eq!(other.counter, 1);
}
