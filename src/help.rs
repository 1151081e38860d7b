//! Help text generation.
//!
//! One line per registered variable, in registration order:
//!
//! ```text
//! Environment variables:
//!
//! MYAPP_LOG_LEVEL (string)             : Log level. (default: INFO)
//! MYAPP_SERVER_PORT (integer, required): Server port.
//! ```
//!
//! The `KEY (type)` column is padded to the widest entry.

use std::string::String;
use std::vec::Vec;

use unicode_width::UnicodeWidthStr;

use crate::var::Descriptor;

/// Heading printed above the variable list.
pub const HELP_HEADING: &str = "Environment variables:";

const REQUIRED_SUFFIX: &str = ", required";

/// Space, parentheses around the type label.
const PUNCTUATION_WIDTH: usize = 3;

/// Display width of the `KEY (type[, required])` column for one variable.
pub fn meta_width(key: &str, descriptor: &Descriptor) -> usize {
    let mut width = key.width() + descriptor.kind.label().width() + PUNCTUATION_WIDTH;
    if descriptor.required {
        width += REQUIRED_SUFFIX.len();
    }
    width
}

/// Generate help text for `(effective key, descriptor)` pairs.
pub(crate) fn generate_help<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (String, &'a Descriptor)>,
{
    let entries: Vec<(String, &Descriptor)> = entries.into_iter().collect();

    let longest = entries
        .iter()
        .map(|(key, descriptor)| meta_width(key, descriptor))
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(HELP_HEADING);
    out.push_str("\n\n");

    for (key, descriptor) in &entries {
        write_variable_help(&mut out, key, descriptor, longest);
    }

    out
}

fn write_variable_help(out: &mut String, key: &str, descriptor: &Descriptor, longest: usize) {
    let mut type_info = descriptor.kind.label().to_string();
    if descriptor.required {
        type_info.push_str(REQUIRED_SUFFIX);
    }
    let meta = format!("{key} ({type_info})");

    out.push_str(&meta);
    for _ in meta.width()..longest {
        out.push(' ');
    }
    out.push_str(": ");
    out.push_str(&descriptor.description);

    if !descriptor.required {
        out.push_str(&format!(" (default: {})", descriptor.default));
    }
    out.push('\n');
}
