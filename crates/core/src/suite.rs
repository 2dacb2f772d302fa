//! Suites of command lines for the harness.
//!
//! A suite is a YAML list of named groups, each holding command-line tails
//! (everything after the program name):
//!
//! ```yaml
//! - name: doubled_quotes
//!   lines:
//!     - '"" ""'
//!     - '"a"" a'
//! ```

use std::fmt::{Display, Formatter};
use std::fs::File;

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CaseGroup {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub lines: Vec<String>,
}

impl Display for CaseGroup {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(description) => write!(formatter, "{} ({})", self.name, description),
            None => formatter.write_str(&self.name),
        }
    }
}

/// Reads a suite file.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened
/// - The file is not valid YAML for a list of groups
/// - No group contains any command line
pub fn get_suite(path: &str) -> Result<Vec<CaseGroup>> {
    let reader = File::open(path)
        .map_err(|e| Error::io_error("suite".to_string(), path.to_string(), e))?;

    let groups: Vec<CaseGroup> = serde_yaml::from_reader(reader).map_err(|e| {
        Error::yaml_error(
            "reading".to_string(),
            "suite".to_string(),
            path.to_string(),
            e,
        )
    })?;

    if groups.iter().all(|group| group.lines.is_empty()) {
        return Err(Error::EmptySuite {
            path: path.to_string(),
        });
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn suite_file(yaml: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{yaml}").unwrap();
        file
    }

    #[test]
    fn test_get_suite_reads_groups() {
        let file = suite_file(
            r#"
- name: quoting
  description: "Quoted arguments"
  lines:
    - '"hello world"'
    - 'a\"b'
- name: empty
  lines:
    - '""'
"#,
        );

        let groups = get_suite(file.path().to_str().unwrap()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].lines, [r#""hello world""#, r#"a\"b"#]);
        assert_eq!(groups[0].to_string(), "quoting (Quoted arguments)");
        assert_eq!(groups[1].lines, [r#""""#]);
        assert_eq!(groups[1].to_string(), "empty");
    }

    #[test]
    fn test_get_suite_rejects_empty_suite() {
        let file = suite_file("- name: nothing\n  lines: []\n");
        let result = get_suite(file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::EmptySuite { .. })));
    }

    #[test]
    fn test_get_suite_rejects_bad_yaml() {
        let file = suite_file("lines: [unclosed");
        let result = get_suite(file.path().to_str().unwrap());
        assert!(matches!(result, Err(Error::Yaml { .. })));
    }

    #[test]
    fn test_get_suite_missing_file() {
        let result = get_suite("/definitely/not/a/suite.yml");
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
