//! Running external tools (git, gradle) with streamed output
//!
//! Each tool gets a timeout; a process that outlives it is killed.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::debug;

/// Configuration for a CLI tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "git")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// URL to the documentation
    pub docs_url: &'static str,
    /// Longest a single invocation may run
    pub timeout: Duration,
}

/// Runs a CLI tool and opens its documentation
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Run the tool in `dir`, echoing its output indented under the prompt UI
    pub async fn run(&self, args: &[&str], dir: &Path) -> Result<()> {
        let cmd = format!("{} {}", self.config.name, args.join(" "));
        debug!(command = %cmd, dir = %dir.display(), "running tool");
        println!("{} {}", "Running:".dimmed(), cmd.yellow());

        let mut child = TokioCommand::new(self.config.name)
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start {}", self.config.display_name))?;

        let stdout = child
            .stdout
            .take()
            .context("Failed to capture stdout")?;
        let stderr = child
            .stderr
            .take()
            .context("Failed to capture stderr")?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();

        let output_task = async {
            let (mut stdout_open, mut stderr_open) = (true, true);
            while stdout_open || stderr_open {
                tokio::select! {
                    line = stdout_reader.next_line(), if stdout_open => match line {
                        Ok(Some(line)) => println!("  {}", line.dimmed()),
                        _ => stdout_open = false,
                    },
                    line = stderr_reader.next_line(), if stderr_open => match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        _ => stderr_open = false,
                    },
                }
            }
            child.wait().await
        };

        match timeout(self.config.timeout, output_task).await {
            Ok(Ok(status)) if status.success() => Ok(()),
            Ok(Ok(status)) => anyhow::bail!(
                "`{}` failed with exit code {}",
                cmd,
                status.code().unwrap_or(-1)
            ),
            Ok(Err(e)) => Err(e).with_context(|| format!("Failed to wait for `{}`", cmd)),
            Err(_) => anyhow::bail!(
                "`{}` timed out after {} seconds",
                cmd,
                self.config.timeout.as_secs()
            ),
        }
    }

    /// Open the tool's documentation in the default browser
    pub fn open_docs(&self) -> Result<()> {
        println!(
            "{}",
            format!(
                "Opening {} documentation in your browser...",
                self.config.display_name
            )
            .cyan()
        );
        open::that(self.config.docs_url)?;
        Ok(())
    }
}

/// Pre-configured tool manager for git
pub fn git_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "git",
        display_name: "Git",
        docs_url: "https://git-scm.com/doc",
        timeout: Duration::from_secs(30),
    })
}

/// Pre-configured tool manager for gradle
pub fn gradle_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "gradle",
        display_name: "Gradle",
        docs_url: "https://docs.gradle.org/current/userguide/gradle_wrapper.html",
        timeout: Duration::from_secs(180),
    })
}

/// Documentation-only entry for Java, which is never run directly
pub fn java_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "java",
        display_name: "Java",
        docs_url: "https://adoptium.net/installation/",
        timeout: Duration::from_secs(10),
    })
}
