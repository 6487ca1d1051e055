//! Shared text formatting utilities for consistent styling

use console::style;
use std::fmt::Display;

/// Format text with key field styling (bold and cyan when colors enabled)
pub(crate) fn format_key<T: Display>(text: T, use_colors: bool) -> String {
    if use_colors {
        style(text).bold().cyan().to_string()
    } else {
        text.to_string()
    }
}

/// Format secondary text such as paths (dim when colors enabled)
pub(crate) fn format_dim<T: Display>(text: T, use_colors: bool) -> String {
    if use_colors {
        style(text).dim().to_string()
    } else {
        text.to_string()
    }
}

/// Quote `text` for a POSIX shell
///
/// The result is a single-quoted word; embedded single quotes become `'\''`.
pub(crate) fn shell_quote<T: Display>(text: T) -> String {
    format!("'{}'", text.to_string().replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_quote() {
        assert_eq!(shell_quote("/a/b c.sh"), "'/a/b c.sh'");
        assert_eq!(shell_quote("/it's.sh"), r"'/it'\''s.sh'");
    }

    #[test]
    fn test_plain_when_colors_disabled() {
        assert_eq!(format_key("name", false), "name");
        assert_eq!(format_dim("/path", false), "/path");
    }
}
