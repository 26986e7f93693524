//! Platform detection utilities for cross-platform shell selection

use std::env;

/// The shell a task command is executed through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    /// Shell program name or path (e.g. "sh", "cmd")
    pub program: String,
    /// Flag that makes the shell run the next argument as a command string
    pub command_flag: &'static str,
}

impl Shell {
    /// Detect the host platform's default shell
    pub fn host_default() -> Self {
        Self::from_os(env::consts::OS)
    }

    /// Create shell info from an OS name string
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Self {
                program: "cmd".to_string(),
                command_flag: "/C",
            },
            _ => Self {
                program: "sh".to_string(),
                command_flag: "-c",
            },
        }
    }

    /// Use a specific shell program with the platform's command flag
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::host_default()
        }
    }
}
