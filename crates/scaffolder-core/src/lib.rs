//! Scaffolder Core - library behind the `fabric-tools` CLI
//!
//! This library scaffolds Fabric mod projects from a bundled template set.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - template rendering and loading, version
//!   lookup, runtime detection
//! - **Layer 2: Workflow** - `ProductConfig`, `ModProject` and
//!   `scaffold::create_project`, usable from any UI
//! - **Layer 3: CLI/TUI Interface** - optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{scaffold, templates::TemplateFetcher, ProductConfig};
//!
//! let mut fetcher = TemplateFetcher::from_config(&MyConfig, None);
//! let manifest = fetcher.fetch_template_manifest("fabric-mod").await?;
//! let outcome = scaffold::create_project(&mut fetcher, "fabric-mod", &manifest, &project).await?;
//! ```

pub mod product;
pub mod project;
pub mod runtime;
pub mod scaffold;
pub mod templates;
pub mod versions;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use product::ProductConfig;
pub use project::{EntryPoint, GradleDsl, ModEnvironment, ModProject, ProjectLocation};
pub use runtime::{check_runtimes, Runtime, RuntimeInfo};
pub use scaffold::{create_project, ScaffoldOutcome};
pub use templates::{
    render, Params, RenderError, RenderWarning, Rendered, RootManifest, TemplateFetcher,
    TemplateManifest, TemplateSource,
};
pub use versions::{DependencyVersions, VersionManager};

#[cfg(feature = "tui")]
pub use tui::run;

/// CLI version - used for template compatibility checking
/// Each binary should define its own version, but this provides a fallback
pub const DEFAULT_CLI_VERSION: &str = "0.1.0";
