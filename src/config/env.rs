//! # Environment Variable Utilities
//!
//! Helpers for reading environment variables with common type conversions:
//! boolean flags, unsigned integers and comma-separated lists.
//!
//! Every reader has a `*_from` variant taking a provider closure, so the
//! configuration types can be loaded from a fake environment in tests.
//!
//! # Examples
//! ```rust,no_run
//! use csrf_gate::config::env::{read_flag, read_list, read_u32};
//!
//! let secure = read_flag("CSRF_COOKIE_SECURE", true);
//! let days = read_u32("CSRF_TIMEOUT_DAYS", 7);
//! let prefixes = read_list("CSRF_EXEMPT_PREFIXES", &["/assets/"]);
//! ```

/// Reads a boolean flag from an environment variable.
///
/// Returns `true` for any of the following case-insensitive values:
/// `"1"`, `"true"`, `"yes"`, `"on"`.
pub fn read_flag(name: &str, default: bool) -> bool {
    read_flag_from(|k| std::env::var(k).ok(), name, default)
}

/// Reads a boolean flag using a custom provider function.
///
/// # Example
/// ```rust
/// use csrf_gate::config::env::read_flag_from;
///
/// let val = read_flag_from(|_| Some("true".into()), "CSRF_COOKIE_SECURE", false);
/// assert!(val);
/// ```
pub fn read_flag_from<F>(provider: F, name: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match provider(name) {
        Some(v) => {
            let s = v.trim().trim_matches(|c| c == '"' || c == '\'');
            matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
        }
        None => default,
    }
}

/// Reads an unsigned integer (`u32`) from an environment variable,
/// returning the provided default if it is missing or unparsable.
pub fn read_u32(name: &str, default: u32) -> u32 {
    read_u32_from(|k| std::env::var(k).ok(), name, default)
}

/// Reads an unsigned integer using a custom provider function.
pub fn read_u32_from<F>(provider: F, name: &str, default: u32) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    provider(name)
        .and_then(|s| s.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

/// Reads a comma-separated list from an environment variable.
///
/// Entries are trimmed and empty entries dropped. A missing variable yields
/// `default`; a variable set to an empty string yields an empty list.
pub fn read_list(name: &str, default: &[&str]) -> Vec<String> {
    read_list_from(|k| std::env::var(k).ok(), name, default)
}

/// Reads a comma-separated list using a custom provider function.
///
/// # Example
/// ```rust
/// use csrf_gate::config::env::read_list_from;
///
/// let got = read_list_from(|_| Some(" /a/ , ,/b/".into()), "X", &[]);
/// assert_eq!(got, vec!["/a/", "/b/"]);
/// ```
pub fn read_list_from<F>(provider: F, name: &str, default: &[&str]) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    match provider(name) {
        Some(v) => v
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect(),
        None => default.iter().map(|s| (*s).to_owned()).collect(),
    }
}
