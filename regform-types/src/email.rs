use std::sync::LazyLock;

use regex::Regex;

// The regex crate has no lookaround; the leading-dot and double-dot
// restrictions are checked separately in `is_email`.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("email pattern is valid")
});

/// Whether `value` is shaped like an email address.
pub fn is_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL.is_match(value)
}
