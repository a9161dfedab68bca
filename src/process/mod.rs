//! External tool invocation

mod invocation;
mod runner;
mod scripted;

pub use invocation::{ToolInvocation, ToolOutcome};
pub use runner::{ProcessRunner, ToolRunner};
pub use scripted::{ScriptedStep, ScriptedToolRunner};
