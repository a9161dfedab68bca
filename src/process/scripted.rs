use super::{ToolInvocation, ToolOutcome, ToolRunner};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::sync::Mutex;

/// Stand-in for the external docking tools.
///
/// Every invocation is recorded. A scripted step matching the invocation
/// writes its files into the invocation's working directory, which is how the
/// real tools communicate their results.
pub struct ScriptedToolRunner {
    steps: Mutex<Vec<ScriptedStep>>,
    invocations: Mutex<Vec<ToolInvocation>>,
}

#[derive(Debug, Clone)]
pub struct ScriptedStep {
    pub program: String,
    /// Only match invocations carrying this argument
    pub arg: Option<String>,
    pub files: Vec<(String, String)>,
    pub unavailable: bool,
}

impl ScriptedStep {
    fn matches(&self, invocation: &ToolInvocation) -> bool {
        self.program == invocation.program
            && self
                .arg
                .as_deref()
                .map_or(true, |arg| invocation.has_arg(arg))
    }
}

impl ScriptedToolRunner {
    pub fn new() -> Self {
        Self {
            steps: Mutex::new(Vec::new()),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// Writes `files` (name, contents) when `program` runs with `arg`
    pub fn when<N, C>(
        &self,
        program: &str,
        arg: Option<&str>,
        files: impl IntoIterator<Item = (N, C)>,
    ) -> &Self
    where
        N: Into<String>,
        C: Into<String>,
    {
        self.steps.lock().unwrap().push(ScriptedStep {
            program: program.to_string(),
            arg: arg.map(str::to_string),
            files: files
                .into_iter()
                .map(|(name, contents)| (name.into(), contents.into()))
                .collect(),
            unavailable: false,
        });
        self
    }

    /// Makes every invocation of `program` fail to launch
    pub fn unavailable(&self, program: &str) -> &Self {
        self.steps.lock().unwrap().push(ScriptedStep {
            program: program.to_string(),
            arg: None,
            files: Vec::new(),
            unavailable: true,
        });
        self
    }

    pub fn invocations(&self) -> Vec<ToolInvocation> {
        self.invocations.lock().unwrap().clone()
    }

    pub fn invoked(&self, program: &str) -> bool {
        self.count(program, None) > 0
    }

    pub fn count(&self, program: &str, arg: Option<&str>) -> usize {
        self.invocations
            .lock()
            .unwrap()
            .iter()
            .filter(|inv| inv.program == program && arg.map_or(true, |a| inv.has_arg(a)))
            .count()
    }
}

impl Default for ScriptedToolRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ToolRunner for ScriptedToolRunner {
    async fn run(&self, invocation: &ToolInvocation) -> Result<ToolOutcome> {
        self.invocations.lock().unwrap().push(invocation.clone());

        let matching: Vec<ScriptedStep> = self
            .steps
            .lock()
            .unwrap()
            .iter()
            .filter(|step| step.matches(invocation))
            .cloned()
            .collect();

        if matching.iter().any(|step| step.unavailable) {
            return Err(anyhow!("Failed to launch {}", invocation.program));
        }

        for step in matching {
            for (name, contents) in &step.files {
                let path = invocation.working_dir.join(name);
                std::fs::write(&path, contents)
                    .with_context(|| format!("Failed to write scripted output {}", path.display()))?;
            }
        }

        if let Some(path) = &invocation.stdout_path {
            std::fs::write(path, format!("{}\n", invocation))
                .with_context(|| format!("Failed to write tool output to {}", path.display()))?;
        }

        Ok(ToolOutcome::ok())
    }
}
