//! Render a template into memory, then write it out
//!
//! Planning does all of the rendering. Nothing touches the target directory
//! until every file and path has rendered, so a missing parameter never leaves
//! a half-written project behind.

use super::fetcher::TemplateFetcher;
use super::manifest::{Feature, TemplateManifest};
use super::render::{render, Params};
use anyhow::{bail, Context, Result};
use std::collections::{BTreeSet, HashSet};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

/// A file ready to be written, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Fully rendered template
#[derive(Debug, Clone, Default)]
pub struct TemplatePlan {
    pub directories: Vec<PathBuf>,
    pub files: Vec<PlannedFile>,

    /// Parameters no file or path referenced
    pub unused_parameters: Vec<String>,
}

/// Render every enabled file and directory of a template
pub async fn plan_template(
    fetcher: &mut TemplateFetcher,
    template_name: &str,
    manifest: &TemplateManifest,
    features: &[Feature],
    params: &Params,
) -> Result<TemplatePlan> {
    let mut referenced = BTreeSet::new();
    let mut plan = TemplatePlan::default();

    for dir in &manifest.directories {
        plan.directories
            .push(render_path(dir, params, &mut referenced)?);
    }

    let mut seen = HashSet::new();
    for file in manifest.enabled_files(features) {
        let path = render_path(file.destination(), params, &mut referenced)?;
        if !seen.insert(path.clone()) {
            bail!(
                "Template '{}' writes '{}' more than once",
                template_name,
                path.display()
            );
        }

        let bytes = fetcher.fetch_file_bytes(template_name, &file.source).await?;
        let contents = if file.render {
            let text = String::from_utf8(bytes)
                .with_context(|| format!("Template file '{}' is not valid UTF-8", file.source))?;
            let rendered = render(&text, params)
                .with_context(|| format!("Failed to render '{}'", file.source))?;
            referenced.extend(rendered.referenced);
            rendered.text.into_bytes()
        } else {
            bytes
        };

        debug!(source = %file.source, dest = %path.display(), "planned file");
        plan.files.push(PlannedFile { path, contents });
    }

    plan.unused_parameters = params
        .keys()
        .filter(|name| !referenced.contains(name.as_str()))
        .cloned()
        .collect();
    for name in &plan.unused_parameters {
        warn!(parameter = %name, template = template_name, "parameter is never referenced");
    }

    Ok(plan)
}

/// Render a manifest path and make sure it stays inside the project
fn render_path(
    template: &str,
    params: &Params,
    referenced: &mut BTreeSet<String>,
) -> Result<PathBuf> {
    let rendered = render(template, params)
        .with_context(|| format!("Failed to render path '{}'", template))?;
    let path = PathBuf::from(&rendered.text);

    if path.as_os_str().is_empty()
        || !path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        bail!(
            "Template path '{}' must be relative to the project root",
            rendered.text
        );
    }

    referenced.extend(rendered.referenced);
    Ok(path)
}

/// Write a rendered plan below `target_dir`, returning the files written
pub async fn write_plan(plan: &TemplatePlan, target_dir: &Path) -> Result<Vec<PathBuf>> {
    // Ensure target directory exists
    fs::create_dir_all(target_dir)
        .await
        .context("Failed to create target directory")?;

    for dir in &plan.directories {
        let full = target_dir.join(dir);
        fs::create_dir_all(&full)
            .await
            .with_context(|| format!("Failed to create directory: {}", full.display()))?;
    }

    let mut written = Vec::with_capacity(plan.files.len());
    for file in &plan.files {
        let target_path = target_dir.join(&file.path);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(&target_path, &file.contents)
            .await
            .with_context(|| format!("Failed to write file: {}", target_path.display()))?;

        written.push(file.path.clone());
    }

    Ok(written)
}
