use std::fmt;
use std::path::{Path, PathBuf};

/// One external tool call: program, argument list and working directory.
///
/// Arguments are passed to the program verbatim; no shell is involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    /// Captured stdout is written here when set
    pub stdout_path: Option<PathBuf>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, working_dir: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: working_dir.to_path_buf(),
            stdout_path: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Redirects stdout to a file inside the working directory
    pub fn stdout_to(mut self, file_name: &str) -> Self {
        self.stdout_path = Some(self.working_dir.join(file_name));
        self
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        if let Some(path) = &self.stdout_path {
            write!(f, " > {}", path.display())?;
        }
        Ok(())
    }
}

/// What the runner observed after the process exited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolOutcome {
    pub exit_code: Option<i32>,
    pub success: bool,
}

impl ToolOutcome {
    pub fn ok() -> Self {
        Self {
            exit_code: Some(0),
            success: true,
        }
    }
}
