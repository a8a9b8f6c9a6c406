//! Gradle wrapper generation
//!
//! The wrapper is produced by a locally installed Gradle inside an empty
//! scratch build, so Loom is never configured (that would download
//! Minecraft). The resulting files are copied into the project.

use crate::runtime::tool::gradle_tool;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// Gradle release the wrapper points at (Loom 1.7 needs 8.8 or newer)
pub const GRADLE_VERSION: &str = "8.10.2";

/// Files `gradle wrapper` produces, relative to the build root
pub const WRAPPER_FILES: [&str; 4] = [
    "gradlew",
    "gradlew.bat",
    "gradle/wrapper/gradle-wrapper.jar",
    "gradle/wrapper/gradle-wrapper.properties",
];

pub async fn generate(project_dir: &Path) -> Result<()> {
    let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
    fs::write(
        scratch.path().join("settings.gradle"),
        "rootProject.name = 'wrapper'\n",
    )
    .await
    .context("Failed to prepare scratch build")?;

    gradle_tool()
        .run(
            &["wrapper", "--gradle-version", GRADLE_VERSION, "--quiet"],
            scratch.path(),
        )
        .await?;

    copy_wrapper_files(scratch.path(), project_dir).await
}

/// Copy the wrapper scripts and jar; `fs::copy` keeps `gradlew` executable
async fn copy_wrapper_files(from: &Path, to: &Path) -> Result<()> {
    for file in WRAPPER_FILES {
        let target = to.join(file);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::copy(from.join(file), &target)
            .await
            .with_context(|| format!("Failed to copy {} to {}", file, target.display()))?;
    }
    Ok(())
}
