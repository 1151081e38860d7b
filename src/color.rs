//! Colour selection for failure diagnostics.

use supports_color::Stream;

/// Whether the `Errors:` header of failure diagnostics is coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Colour when stderr supports it. Honours `NO_COLOR` and `FORCE_COLOR`.
    #[default]
    Auto,
    /// Always colour.
    Always,
    /// Never colour.
    Never,
}

impl ColorChoice {
    /// Resolve to a yes/no decision for the diagnostics stream.
    pub fn enabled(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => stderr_supports_color(),
        }
    }
}

fn stderr_supports_color() -> bool {
    // insta compares plain text
    std::env::var_os("INSTA_UPDATE").is_none()
        && std::env::var_os("INSTA_WORKSPACE").is_none()
        && supports_color::on(Stream::Stderr).is_some()
}
