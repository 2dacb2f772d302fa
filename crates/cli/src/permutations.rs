//! Exhaustive command-line generation.
//!
//! Quoting bugs hide in short strings made of a handful of special
//! characters, so the harness can enumerate every string over a small
//! alphabet up to a given length.

use itertools::Itertools;
use std::iter;

/// Every string of length `1..=max_len` over `alphabet`, shortest first.
///
/// Duplicate characters in the alphabet are ignored.
///
/// # Examples
///
/// ```
/// use argdump_cli::permutations::command_lines;
///
/// let lines: Vec<String> = command_lines("ab", 2).collect();
/// assert_eq!(lines, ["a", "b", "aa", "ab", "ba", "bb"]);
/// ```
pub fn command_lines(alphabet: &str, max_len: usize) -> impl Iterator<Item = String> {
    let alphabet: Vec<char> = alphabet.chars().unique().collect();

    (1..=max_len).flat_map(move |len| {
        iter::repeat(alphabet.clone().into_iter())
            .take(len)
            .multi_cartesian_product()
            .map(|chars| chars.into_iter().collect::<String>())
    })
}

/// How many strings [`command_lines`] will produce, saturating on overflow.
pub fn count(alphabet: &str, max_len: usize) -> usize {
    let base = alphabet.chars().unique().count();
    (1..=max_len)
        .map(|len| {
            u32::try_from(len)
                .ok()
                .and_then(|len| base.checked_pow(len))
                .unwrap_or(usize::MAX)
        })
        .fold(0usize, usize::saturating_add)
}
