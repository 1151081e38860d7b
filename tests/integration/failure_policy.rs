//! The two failure policies: hand the errors back, or report and exit.

use std::cell::Cell;

use envreg::{ColorChoice, FailurePolicy, MockEnv, Registry, Var};

use crate::assert_plain_snapshot;
use crate::common::SharedBuffer;

thread_local! {
    static EXIT_CODE: Cell<Option<i32>> = const { Cell::new(None) };
}

fn record_exit(code: i32) {
    EXIT_CODE.with(|c| c.set(Some(code)));
}

fn last_exit() -> Option<i32> {
    EXIT_CODE.with(|c| c.take())
}

#[test]
fn test_exit_policy_reports_and_exits_with_one() {
    let sink = SharedBuffer::default();
    let mut registry = Registry::builder()
        .failure_policy(FailurePolicy::Exit)
        .diagnostics(sink.clone())
        .exit_with(record_exit)
        .color(ColorChoice::Never)
        .build();

    registry.register(
        Var::<i64>::new("TEST_REQUIRED")
            .description("Must be set.")
            .required(),
    );
    registry.register(
        Var::<i64>::new("ANOTHER")
            .description("Also must be set.")
            .required(),
    );

    let mut env = MockEnv::from_pairs([("TEST_REQUIRED", "1")]);
    let result = registry.parse_from(&mut env);

    assert_eq!(last_exit(), Some(1));
    assert!(result.is_err());
    assert_plain_snapshot!(sink.contents(), @r"
Errors:
variable is required: ANOTHER

Environment variables:

TEST_REQUIRED (integer, required): Must be set.
ANOTHER (integer, required)      : Also must be set.
");
}

#[test]
fn test_exit_policy_colored_header_strips_to_plain_text() {
    let sink = SharedBuffer::default();
    let mut registry = Registry::builder()
        .diagnostics(sink.clone())
        .exit_with(record_exit)
        .color(ColorChoice::Always)
        .build();
    registry.register(Var::<bool>::new("FLAG"));

    let mut env = MockEnv::from_pairs([("FLAG", "maybe")]);
    let _ = registry.parse_from(&mut env);

    assert_eq!(last_exit(), Some(1));
    let output = sink.contents();
    assert!(output.contains('\u{1b}'), "expected ANSI codes in {output:?}");
    let plain = strip_ansi_escapes::strip_str(&output);
    assert!(plain.starts_with("Errors:\nvariable is not a valid boolean: FLAG=\"maybe\""));
}

#[test]
fn test_exit_policy_does_nothing_on_success() {
    let sink = SharedBuffer::default();
    let mut registry = Registry::builder()
        .diagnostics(sink.clone())
        .exit_with(record_exit)
        .build();
    let port = registry.register(Var::<i64>::new("PORT").default(80));

    let resolved = registry.parse_from(&mut MockEnv::new()).unwrap();

    assert_eq!(*resolved.get(port), 80);
    assert_eq!(last_exit(), None);
    assert!(sink.contents().is_empty());
}

#[test]
fn test_return_policy_never_writes_or_exits() {
    let sink = SharedBuffer::default();
    let mut registry = Registry::builder()
        .return_errors()
        .diagnostics(sink.clone())
        .exit_with(record_exit)
        .build();
    registry.register(Var::<i64>::new("TEST_VALIDATE").validate(|i: &i64| {
        if *i == 10 {
            Ok(())
        } else {
            Err(format!("expected 10, got {i}"))
        }
    }));

    let mut env = MockEnv::from_pairs([("TEST_VALIDATE", "5")]);
    let err = registry.parse_from(&mut env).unwrap_err();

    assert_eq!(err.len(), 1);
    assert_eq!(last_exit(), None);
    assert!(sink.contents().is_empty());
    assert_eq!(
        err.to_string(),
        "failed to parse env vars:\nvariable validation failed: TEST_VALIDATE: expected 10, got 5"
    );
}
