//! Template loading, rendering and planning
//!
//! This module provides:
//! - Template manifest types (RootManifest, TemplateManifest)
//! - Template loading from the embedded set or a local directory
//! - `${{ name }}` placeholder rendering
//! - Planning (render everything in memory) and writing
//! - Version compatibility checking

pub mod copier;
mod embedded;
pub mod fetcher;
pub mod manifest;
pub mod render;
pub mod version;

pub use copier::{plan_template, write_plan, PlannedFile, TemplatePlan};
pub use fetcher::{TemplateFetcher, TemplateSource};
pub use manifest::{Feature, RootManifest, TemplateFile, TemplateManifest};
pub use render::{placeholder_names, render, Params, RenderError, RenderWarning, Rendered};
pub use version::check_compatibility;
