//! Prefixed variables with validation.
//!
//! ```text
//! MYAPP_SERVER_ADDR=localhost MYAPP_SERVER_PORT=443 cargo run --example prefix
//! ```

use envreg::{Registry, Var};

const LOG_LEVELS: [&str; 5] = ["DEBUG", "INFO", "WARN", "ERROR", "FATAL"];

fn main() {
    let mut registry = Registry::builder().prefix("MYAPP").build();

    let log_level = registry.register(
        Var::<String>::new("LOG_LEVEL")
            .description("Log level.")
            .default("INFO")
            .validate(|level: &String| {
                if LOG_LEVELS.contains(&level.as_str()) {
                    Ok(())
                } else {
                    Err(format!(
                        "invalid log level: {level}, accepted values are: {}",
                        LOG_LEVELS.join(", ")
                    ))
                }
            }),
    );
    let server_addr = registry.register(
        Var::<String>::new("SERVER_ADDR")
            .description("Server address.")
            .required()
            .validate(|addr: &String| match addr.len() {
                0 => Err("address can't be empty"),
                256.. => Err("address too long"),
                _ => Ok(()),
            }),
    );
    let server_port = registry.register(
        Var::<i64>::new("SERVER_PORT")
            .description("Server port.")
            .required()
            .accepted([80, 443]),
    );
    let cache_dir = registry.register(
        Var::<String>::new("CACHE_DIR")
            .description("Cache directory, exported for child processes.")
            .default("/tmp/myapp")
            .create(),
    );

    if std::env::args().any(|arg| arg == "--help" || arg == "-h") {
        print!("{}", registry.help());
        return;
    }

    let Ok(env) = registry.parse() else {
        return;
    };

    for (key, value, origin) in env.iter() {
        println!("{key} = {value} ({})", origin.as_str());
    }
    println!();
    println!("Log level: {}", env.get(log_level));
    println!("Server: {}:{}", env.get(server_addr), env.get(server_port));
    println!("Cache: {}", env.get(cache_dir));
}
