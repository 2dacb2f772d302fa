//! Configuration for the reporter and harness.
//!
//! The reporter never interprets its own argument vector, so everything it can
//! be told comes from the build (the `null-separator` feature) or from the
//! environment variables defined here. The resolvers take the variable's value
//! rather than reading the environment themselves so they can be tested.

use log::warn;

use crate::report::Separator;

/// Separator used when nothing in the environment overrides it.
#[cfg(feature = "null-separator")]
pub const DEFAULT_SEPARATOR: Separator = Separator::Null;
/// Separator used when nothing in the environment overrides it.
#[cfg(not(feature = "null-separator"))]
pub const DEFAULT_SEPARATOR: Separator = Separator::Line;

/// Overrides the record separator at run time (`line` or `null`).
pub const SEPARATOR_ENV_VAR: &str = "ARGDUMP_SEPARATOR";

/// Disables the reconstructed fallback when no native raw command line exists.
pub const STRICT_RAW_ENV_VAR: &str = "ARGDUMP_STRICT_RAW";

/// Default characters used by the harness when enumerating command lines.
pub const DEFAULT_PERMUTATION_ALPHABET: &str = "\\a\" \t";

/// Default longest command line produced by the harness permutations.
pub const DEFAULT_PERMUTATION_MAX_LEN: usize = 4;

/// Resolves the active separator from the value of [`SEPARATOR_ENV_VAR`].
///
/// # Arguments
///
/// * `value` - The variable's value, or `None` when it is unset
///
/// # Examples
///
/// ```
/// use argdump_core::config::resolve_separator;
/// use argdump_core::report::Separator;
///
/// assert_eq!(resolve_separator(Some("null")), Separator::Null);
/// assert_eq!(resolve_separator(Some(" Line ")), Separator::Line);
/// ```
pub fn resolve_separator(value: Option<&str>) -> Separator {
    let Some(value) = value else {
        return DEFAULT_SEPARATOR;
    };

    match value.trim().to_lowercase().as_str() {
        "line" | "newline" => Separator::Line,
        "null" | "nul" | "zero" => Separator::Null,
        "" => DEFAULT_SEPARATOR,
        other => {
            warn!(
                "Ignoring unknown {} value `{}`, using {:?}",
                SEPARATOR_ENV_VAR, other, DEFAULT_SEPARATOR
            );
            DEFAULT_SEPARATOR
        }
    }
}

/// Resolves whether the reconstructed fallback is disabled from the value of
/// [`STRICT_RAW_ENV_VAR`].
pub fn resolve_strict_raw(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_lowercase()).as_deref(),
        Some("1" | "true" | "yes")
    )
}

/// Expands shell variables like `~` in a harness file path.
///
/// # Examples
///
/// ```
/// use argdump_core::config::expand_path;
///
/// assert_eq!(expand_path("/tmp/cases.yml"), "/tmp/cases.yml");
/// assert!(!expand_path("~/cases.yml").starts_with('~'));
/// ```
pub fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).to_string()
}
