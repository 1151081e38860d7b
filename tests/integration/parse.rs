//! End-to-end parsing through the public API.

use envreg::{EnvSource, MockEnv, Origin, Registry, Value, Var, VarErrorKind};

fn registry() -> Registry {
    Registry::builder().return_errors().build()
}

#[test]
fn test_port_not_in_accepted_set() {
    let mut registry = registry();
    registry.register(Var::<i64>::new("PORT").accepted([80, 443]));

    let mut env = MockEnv::from_pairs([("PORT", "334")]);
    let err = registry.parse_from(&mut env).unwrap_err();

    let error = err.for_key("PORT").expect("PORT error");
    match &error.kind {
        VarErrorKind::NotAccepted {
            raw,
            value,
            accepted,
        } => {
            assert_eq!(raw, "334");
            assert_eq!(value, &Value::Integer(334));
            assert_eq!(accepted, &[Value::Integer(80), Value::Integer(443)]);
        }
        other => panic!("expected NotAccepted, got {other:?}"),
    }
    assert_eq!(
        error.to_string(),
        "variable value not in accepted values: PORT=334 [80, 443]"
    );
}

#[test]
fn test_log_level_defaults_to_info() {
    let mut registry = registry();
    let level = registry.register(Var::<String>::new("LOG_LEVEL").default("INFO"));

    let resolved = registry.parse_from(&mut MockEnv::new()).unwrap();

    assert_eq!(resolved.get(level), "INFO");
}

#[test]
fn test_string_accepted_values() {
    let mut registry = registry();
    let level = registry.register(
        Var::<String>::new("LOG_LEVEL")
            .default("INFO")
            .accepted(["DEBUG", "INFO", "WARN", "ERROR", "FATAL"]),
    );

    let resolved = registry
        .parse_from(&mut MockEnv::from_pairs([("LOG_LEVEL", "WARN")]))
        .unwrap();
    assert_eq!(resolved.get(level), "WARN");

    let err = registry
        .parse_from(&mut MockEnv::from_pairs([("LOG_LEVEL", "warn")]))
        .unwrap_err();
    assert_eq!(
        err.errors()[0].to_string(),
        "variable value not in accepted values: LOG_LEVEL=warn [DEBUG, INFO, WARN, ERROR, FATAL]"
    );
}

#[test]
fn test_float_accepted_is_exact() {
    let mut registry = registry();
    registry.register(Var::<f64>::new("RATIO").accepted([0.5, 1.0]));

    assert!(
        registry
            .parse_from(&mut MockEnv::from_pairs([("RATIO", "0.50")]))
            .is_ok()
    );
    assert!(
        registry
            .parse_from(&mut MockEnv::from_pairs([("RATIO", "0.5000001")]))
            .is_err()
    );
}

#[test]
fn test_every_error_is_collected() {
    let mut registry = Registry::builder().prefix("APP").return_errors().build();
    registry.register(Var::<String>::new(""));
    registry.register(Var::<i64>::new("port"));
    registry.register(Var::<bool>::new("PORT"));
    registry.register(Var::<String>::new("token").required());
    registry.register(Var::<String>::new("cache_dir").required().create());
    registry.register(
        Var::<i64>::new("workers")
            .accepted([1, 2])
            .validate(|_: &i64| Ok::<(), String>(())),
    );
    registry.register(Var::<f64>::new("ratio"));
    registry.register(Var::<i64>::new("retries").accepted([3]));
    registry.register(
        Var::<String>::new("addr").validate(|addr: &String| {
            if addr.len() > 8 {
                Err("address too long")
            } else {
                Ok(())
            }
        }),
    );
    registry.register(Var::<bool>::new("debug"));

    let mut env = MockEnv::from_pairs([
        ("APP_RATIO", "half"),
        ("APP_RETRIES", "5"),
        ("APP_ADDR", "example.com"),
        ("APP_DEBUG", "1"),
    ]);
    let err = registry.parse_from(&mut env).unwrap_err();

    let codes: Vec<(&str, &str)> = err
        .iter()
        .map(|e| (e.key.as_str(), e.kind.code()))
        .collect();
    assert_eq!(
        codes,
        [
            ("APP_", "env::invalid_name"),
            ("APP_PORT", "env::duplicate_name"),
            ("APP_TOKEN", "env::missing_required"),
            ("APP_CACHE_DIR", "env::create_and_required"),
            ("APP_WORKERS", "env::validator_and_accepted"),
            ("APP_RATIO", "env::conversion"),
            ("APP_RETRIES", "env::not_accepted"),
            ("APP_ADDR", "env::validation"),
        ]
    );
    assert!(err.for_key("APP_DEBUG").is_none());
}

#[test]
fn test_successful_parse_reports_origins() {
    let mut registry = registry();
    let from_env = registry.register(Var::<i64>::new("A"));
    let from_default = registry.register(Var::<i64>::new("B").default(2));
    let created = registry.register(Var::<bool>::new("C").default(true).create());

    let mut env = MockEnv::from_pairs([("A", "1")]);
    let resolved = registry.parse_from(&mut env).unwrap();

    assert_eq!(
        resolved.origin(from_env),
        &Origin::Environment {
            raw: "1".to_string()
        }
    );
    assert_eq!(resolved.origin(from_default), &Origin::Default);
    assert_eq!(resolved.origin(created), &Origin::Created);
    assert_eq!(env.get("C").as_deref(), Some("true"));

    let dumped: Vec<String> = resolved
        .iter()
        .map(|(key, value, origin)| format!("{key}={value} ({})", origin.as_str()))
        .collect();
    assert_eq!(
        dumped,
        ["A=1 (environment)", "B=2 (default)", "C=true (created)"]
    );
}

#[test]
#[should_panic(expected = "different registry")]
fn test_handle_from_other_registry_panics() {
    let mut first = registry();
    let mut second = registry();
    let _ = first.register(Var::<i64>::new("N"));
    let foreign = second.register(Var::<i64>::new("N"));

    let resolved = first
        .parse_from(&mut MockEnv::from_pairs([("N", "1")]))
        .unwrap();
    resolved.get(foreign);
}

#[test]
#[should_panic(expected = "registered after this parse")]
fn test_handle_registered_after_parse_panics() {
    let mut registry = registry();
    registry.register(Var::<i64>::new("N"));
    let resolved = registry
        .parse_from(&mut MockEnv::from_pairs([("N", "1")]))
        .unwrap();

    let late = registry.register(Var::<i64>::new("M"));
    resolved.get(late);
}
