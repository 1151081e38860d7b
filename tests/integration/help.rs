//! Help text: one aligned line per variable.

use envreg::{MockEnv, Registry, Var};

use crate::assert_plain_snapshot;

fn example_registry(prefix: &str) -> Registry {
    let mut registry = Registry::builder().prefix(prefix).return_errors().build();
    registry.register(
        Var::<String>::new("LOG_LEVEL")
            .description("Log level.")
            .default("INFO"),
    );
    registry.register(
        Var::<String>::new("SERVER_ADDR")
            .description("Server address.")
            .required(),
    );
    registry.register(
        Var::<i64>::new("SERVER_PORT")
            .description("Server port.")
            .required()
            .accepted([80, 443]),
    );
    registry.register(
        Var::<f64>::new("SAMPLE_RATE")
            .description("Trace sample rate.")
            .default(0.5),
    );
    registry
}

#[test]
fn test_help_without_prefix() {
    assert_plain_snapshot!(example_registry("").help(), @r"
Environment variables:

LOG_LEVEL (string)             : Log level. (default: INFO)
SERVER_ADDR (string, required) : Server address.
SERVER_PORT (integer, required): Server port.
SAMPLE_RATE (float)            : Trace sample rate. (default: 0.5)
");
}

#[test]
fn test_help_with_prefix() {
    assert_plain_snapshot!(example_registry("MYAPP").help(), @r"
Environment variables:

MYAPP_LOG_LEVEL (string)             : Log level. (default: INFO)
MYAPP_SERVER_ADDR (string, required) : Server address.
MYAPP_SERVER_PORT (integer, required): Server port.
MYAPP_SAMPLE_RATE (float)            : Trace sample rate. (default: 0.5)
");
}

#[test]
fn test_help_width_is_widest_meta_column() {
    let registry = example_registry("MYAPP");
    let widest = registry
        .keys()
        .zip(registry.descriptors())
        .map(|(key, d)| envreg::help::meta_width(&key, d))
        .max()
        .unwrap();

    for line in registry.help().lines().skip(2) {
        let (meta, _) = line.split_once(": ").unwrap();
        assert_eq!(meta.len(), widest, "line {line:?}");
    }
}

#[test]
fn test_help_is_unchanged_by_parsing() {
    let registry = example_registry("");
    let before = registry.help();

    let mut env = MockEnv::from_pairs([
        ("SERVER_ADDR", "localhost"),
        ("SERVER_PORT", "443"),
        ("LOG_LEVEL", "DEBUG"),
    ]);
    registry.parse_from(&mut env).unwrap();

    assert_eq!(registry.help(), before);
}
