use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("The raw command line is not available from this environment.")]
    EnvironmentUnavailable,

    #[error("Could not write to standard output: {}", .0)]
    Output(#[source] std::io::Error),

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("No command lines were found in the suite YAML. Is `{}` empty?", .path)]
    EmptySuite { path: String },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Malformed record at byte {}: {}", .offset, .reason)]
    MalformedRecord { offset: usize, reason: String },

    #[error("Could not launch reporter `{}`: {}", .program, .original)]
    Spawn {
        program: String,
        original: std::io::Error,
    },

    #[error("Reporter exited with {} for command line `{}`", .status, .command_line)]
    ReporterExit { status: String, command_line: String },

    #[error("Command line `{}` splits differently at argument {}: expected {:?}, got {:?}", .command_line, .index, .expected, .actual)]
    Mismatch {
        command_line: String,
        index: usize,
        expected: Option<String>,
        actual: Option<String>,
    },

    #[error("{} of {} recorded command lines failed verification", .failed, .total)]
    VerificationFailed { failed: usize, total: usize },
}

impl Error {
    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            offset,
            reason: reason.into(),
        }
    }
}
