use crate::runtime::tool::git_tool;
use anyhow::{Context, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub enum GitStep {
    Init,
    Add,
    Commit,
}

impl GitStep {
    pub const ALL: [GitStep; 3] = [GitStep::Init, GitStep::Add, GitStep::Commit];

    fn args(self) -> &'static [&'static str] {
        match self {
            GitStep::Init => &["init"],
            GitStep::Add => &["add", "."],
            GitStep::Commit => &["commit", "-m", "init"],
        }
    }
}

/// `git init`, stage everything and commit
pub async fn create_repo(project_dir: &Path) -> Result<()> {
    let git = git_tool();
    for step in GitStep::ALL {
        git.run(step.args(), project_dir)
            .await
            .with_context(|| format!("Failed to run git step: {:?}", step))?;
    }
    Ok(())
}
