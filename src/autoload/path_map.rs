//! Relative symbol name → relative file path.
//!
//! The mapping is purely lexical: `Qux.My_Thing` with separator `.` and
//! extension `.src` becomes `qux/my-thing.src`.

use std::path::MAIN_SEPARATOR;

use super::types::AutoloadOptions;

/// Map the part of a name below its prefix to a path relative to a base directory.
///
/// Namespace separators become path separators, underscores become hyphens,
/// the whole string is lower-cased and the extension appended. Never fails.
pub fn map_to_relative_path(relative_name: &str, options: &AutoloadOptions) -> String {
    let mut mapped = String::with_capacity(relative_name.len() + options.extension.len());
    for c in relative_name.chars() {
        if c == options.separator {
            mapped.push(MAIN_SEPARATOR);
        } else if c == '_' {
            mapped.push('-');
        } else {
            mapped.extend(c.to_lowercase());
        }
    }
    mapped.push_str(&options.extension);
    mapped
}
