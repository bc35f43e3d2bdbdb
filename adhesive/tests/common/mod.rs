#![allow(dead_code)]

use adhesive::{BoxError, Bus};

// ============================================================================
// Test Context
// ============================================================================

#[derive(Debug, Clone)]
pub struct Context {
    // :simple
    pub counter: u32,
    // :predicates
    pub filter: u32,
    pub then: u32,
    pub fail: bool,
    // :dependencies
    pub depend: Option<bool>,
    pub test: u32,
    pub pass: bool,
    pub continued: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            counter: 0,
            filter: 0,
            then: 0,
            fail: false,
            depend: Some(true),
            test: 0,
            pass: true,
            continued: false,
        }
    }
}

// ============================================================================
// Fixture Bus
// ============================================================================

pub const EVENT: &str = "default";

pub fn event(suffix: &str) -> String {
    format!("{EVENT}:{suffix}")
}

/// A bus with the listeners most publish tests fire against.
pub fn fixture_bus() -> Bus<Context> {
    let mut bus = Bus::<Context>::new();

    bus.subscribe(event("simple")).then(|cx| cx.counter += 1);
    bus.subscribe(EVENT).then(|cx| cx.then += 1);
    bus.subscribe(EVENT).then(|cx| cx.then += 1);

    bus.subscribe(event("predicates"))
        .filter(|cx| {
            cx.filter += 1;
            true
        })
        .filter(|cx| {
            cx.filter += 1;
            !cx.fail
        })
        .then(|cx| cx.then += 1);
    // Makes sure the listener above only skips and does not stop.
    bus.subscribe(event("predicates")).then(|cx| cx.then += 1);

    bus.subscribe(event("dependencies"))
        .filter(|cx| cx.pass)
        .require(|cx| {
            cx.test += 1;
            cx.depend.is_some()
        })
        .require(|cx| {
            cx.test += 1;
            true
        })
        .then(|cx| cx.then += 1);
    // Must not run once the listener above records an error.
    bus.subscribe(event("dependencies")).then(|cx| cx.continued = true);

    bus.subscribe(event("task")).then(|cx| cx.counter += 1);
    bus.subscribe(event("1")).then(|cx| cx.counter += 1);
    bus.subscribe(event("task:subtask")).then(|cx| cx.counter += 1);
    bus.subscribe(event("error"))
        .then(|cx| -> Result<(), BoxError> {
            cx.counter += 1;
            Err("msg".into())
        });

    bus
}
