//! Template manifest types and parsing

use serde::{Deserialize, Serialize};

/// Project option a template file depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Groovy build scripts selected
    Groovy,
    /// Kotlin build scripts selected
    Kotlin,
    /// A `ClientModInitializer` entrypoint is generated
    ClientEntrypoint,
    /// A `DedicatedServerModInitializer` entrypoint is generated
    ServerEntrypoint,
}

fn render_by_default() -> bool {
    true
}

/// One file shipped with a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFile {
    /// Source path relative to the template directory
    pub source: String,

    /// Destination path in the project (defaults to source). May contain placeholders.
    #[serde(default)]
    pub dest: Option<String>,

    /// Run the contents through the placeholder renderer; otherwise copy verbatim
    #[serde(default = "render_by_default")]
    pub render: bool,

    /// Only include the file when this feature is enabled
    #[serde(default)]
    pub requires: Option<Feature>,
}

impl TemplateFile {
    /// Get the destination path (falls back to source if dest not specified)
    pub fn destination(&self) -> &str {
        self.dest.as_deref().unwrap_or(&self.source)
    }

    pub fn is_enabled(&self, features: &[Feature]) -> bool {
        self.requires.map_or(true, |f| features.contains(&f))
    }
}

/// Root template manifest (templates/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootManifest {
    /// List of template directory names
    pub templates: Vec<String>,
}

/// Per-template manifest (templates/<name>/template.yaml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,

    /// Directories created even when no file lands in them. May contain placeholders.
    #[serde(default)]
    pub directories: Vec<String>,

    /// Files to render or copy
    pub files: Vec<TemplateFile>,
}

impl TemplateManifest {
    /// Files that apply to the given feature set, in manifest order
    pub fn enabled_files<'a>(
        &'a self,
        features: &'a [Feature],
    ) -> impl Iterator<Item = &'a TemplateFile> + 'a {
        self.files.iter().filter(move |f| f.is_enabled(features))
    }
}
