//! Splitting a Windows command line into arguments.
//!
//! Windows passes a process one string. The C runtime (and Rust's standard
//! library on Windows) split it using the post-2008 MSVC rules, which this
//! module reproduces on every platform so a recorded raw line can be checked
//! against the vector the reporter printed for it.
//!
//! The program name follows simpler rules than the other arguments: it starts
//! at the very first character, backslashes are literal and a `"` only toggles
//! quoting. For the remaining arguments:
//!
//! - `2n` backslashes followed by `"` give `n` backslashes, and the `"` toggles quoting
//! - `2n + 1` backslashes followed by `"` give `n` backslashes and a literal `"`
//! - backslashes not followed by `"` are literal
//! - `""` inside a quoted section is a literal `"` and quoting continues
//! - an unquoted space or tab ends the argument

use std::iter;

const QUOTE: char = '"';
const BACKSLASH: char = '\\';

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Splits `command_line` the way a Windows C runtime builds `argv`.
///
/// An empty command line yields no arguments at all.
///
/// # Examples
///
/// ```
/// use argdump_core::winparse::split;
///
/// assert_eq!(split(r#"EXE "hello world" a\"b"#), ["EXE", "hello world", "a\"b"]);
/// assert_eq!(split(r#"EXE "" x"#), ["EXE", "", "x"]);
/// ```
pub fn split(command_line: &str) -> Vec<String> {
    let units: Vec<char> = command_line.chars().collect();
    split_units(&units)
        .into_iter()
        .map(|arg| arg.into_iter().collect())
        .collect()
}

/// Renders a program path as the first token of a command line.
///
/// The path is quoted when it is empty or contains blanks. The program name
/// has no escape syntax, so a path containing `"` cannot round-trip.
pub fn program_token(program: &str) -> String {
    if program.is_empty() || program.chars().any(is_blank) {
        format!("\"{program}\"")
    } else {
        program.to_string()
    }
}

fn split_units(line: &[char]) -> Vec<Vec<char>> {
    let mut args = Vec::new();
    if line.is_empty() {
        return args;
    }

    let (program, mut rest) = program_name(line);
    args.push(program);

    loop {
        rest = skip_blanks(rest);
        if rest.is_empty() {
            break;
        }
        let (arg, remaining) = argument(rest);
        args.push(arg);
        rest = remaining;
    }

    args
}

fn skip_blanks(line: &[char]) -> &[char] {
    let start = line
        .iter()
        .position(|&unit| !is_blank(unit))
        .unwrap_or(line.len());
    &line[start..]
}

fn program_name(line: &[char]) -> (Vec<char>, &[char]) {
    let mut arg = Vec::new();
    let mut quoted = false;
    let mut pos = 0;

    while let Some(&unit) = line.get(pos) {
        if is_blank(unit) && !quoted {
            break;
        }
        if unit == QUOTE {
            quoted = !quoted;
        } else {
            arg.push(unit);
        }
        pos += 1;
    }

    (arg, &line[pos..])
}

fn argument(line: &[char]) -> (Vec<char>, &[char]) {
    let mut arg = Vec::new();
    let mut quoted = false;
    let mut pos = 0;

    while let Some(&unit) = line.get(pos) {
        if is_blank(unit) && !quoted {
            break;
        }

        if unit == BACKSLASH {
            let run = line[pos..]
                .iter()
                .take_while(|&&u| u == BACKSLASH)
                .count();
            pos += run;
            if line.get(pos) == Some(&QUOTE) {
                arg.extend(iter::repeat(BACKSLASH).take(run / 2));
                if run % 2 == 1 {
                    arg.push(QUOTE);
                    pos += 1;
                }
                // An even run leaves the quote for the next pass.
            } else {
                arg.extend(iter::repeat(BACKSLASH).take(run));
            }
        } else if unit == QUOTE {
            pos += 1;
            if quoted && line.get(pos) == Some(&QUOTE) {
                arg.push(QUOTE);
                pos += 1;
            } else {
                quoted = !quoted;
            }
        } else {
            arg.push(unit);
            pos += 1;
        }
    }

    (arg, &line[pos..])
}
