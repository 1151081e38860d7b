//! Declares three variables without a prefix and prints them.
//!
//! ```text
//! SERVER_ADDR=localhost SERVER_PORT=8080 cargo run --example basic
//! cargo run --example basic -- --help
//! ```

use envreg::{Registry, Var};

fn main() {
    let mut registry = Registry::new();

    let log_level = registry.register(
        Var::<String>::new("LOG_LEVEL")
            .description("Log level.")
            .default("INFO"),
    );
    let server_addr = registry.register(
        Var::<String>::new("SERVER_ADDR")
            .description("Server address.")
            .required(),
    );
    let server_port = registry.register(
        Var::<i64>::new("SERVER_PORT")
            .description("Server port.")
            .required(),
    );

    if std::env::args().any(|arg| arg == "--help" || arg == "-h") {
        print!("{}", registry.help());
        return;
    }

    // Exits with code 1 and prints every problem if anything is wrong.
    let Ok(env) = registry.parse() else {
        return;
    };

    println!("Log level: {}", env.get(log_level));
    println!("Server address: {}", env.get(server_addr));
    println!("Server port: {}", env.get(server_port));
}
