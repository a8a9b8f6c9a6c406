//! Template loading from the embedded set or a local directory
//!
//! The embedded templates ship inside the binary. A local directory with the
//! same layout (root `template.yaml`, one folder per template) can replace
//! them during template development.

use super::embedded;
use super::manifest::{RootManifest, TemplateManifest};
use crate::product::ProductConfig;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

const MANIFEST_FILE: &str = "template.yaml";

/// Template source - either compiled in or a local directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    Local(PathBuf),
}

impl TemplateSource {
    /// Pick the source: explicit directory, then the product's env var, then embedded
    pub fn from_config<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Self {
        template_dir
            .or_else(|| std::env::var_os(config.template_dir_env()).map(PathBuf::from))
            .map_or(Self::Embedded, Self::Local)
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Template fetcher - reads manifests and files, caching what it has read
pub struct TemplateFetcher {
    source: TemplateSource,
    cache: HashMap<String, Vec<u8>>,
}

impl TemplateFetcher {
    pub fn new(source: TemplateSource) -> Self {
        Self {
            source,
            cache: HashMap::new(),
        }
    }

    /// Create a fetcher from a product config and an optional `--template-dir`
    pub fn from_config<C: ProductConfig>(config: &C, template_dir: Option<PathBuf>) -> Self {
        Self::new(TemplateSource::from_config(config, template_dir))
    }

    /// Create a fetcher for local templates
    pub fn from_local(path: PathBuf) -> Self {
        Self::new(TemplateSource::local(path))
    }

    async fn read(&mut self, path: &str) -> Result<&[u8]> {
        if !self.cache.contains_key(path) {
            let bytes = match &self.source {
                TemplateSource::Embedded => embedded::get(path)
                    .map(<[u8]>::to_vec)
                    .ok_or_else(|| anyhow::anyhow!("'{}' is not a bundled template file", path))?,
                TemplateSource::Local(dir) => {
                    let full_path = dir.join(path);
                    debug!(path = %full_path.display(), "reading template file");
                    fs::read(&full_path)
                        .await
                        .with_context(|| format!("Failed to read {}", full_path.display()))?
                }
            };
            self.cache.insert(path.to_string(), bytes);
        }

        self.cache
            .get(path)
            .map(Vec::as_slice)
            .ok_or_else(|| anyhow::anyhow!("'{}' missing from template cache", path))
    }

    /// Fetch the root manifest listing available templates
    pub async fn fetch_root_manifest(&mut self) -> Result<RootManifest> {
        let content = self.read(MANIFEST_FILE).await?;
        serde_yaml::from_slice(content).context("Failed to parse root manifest")
    }

    /// Fetch a specific template's manifest
    pub async fn fetch_template_manifest(
        &mut self,
        template_name: &str,
    ) -> Result<TemplateManifest> {
        let content = self
            .read(&format!("{}/{}", template_name, MANIFEST_FILE))
            .await?;
        serde_yaml::from_slice(content)
            .with_context(|| format!("Failed to parse template '{}' manifest", template_name))
    }

    /// Fetch a file from a template as bytes
    pub async fn fetch_file_bytes(
        &mut self,
        template_name: &str,
        file_path: &str,
    ) -> Result<Vec<u8>> {
        let bytes = self
            .read(&format!("{}/{}", template_name, file_path))
            .await
            .with_context(|| {
                format!(
                    "File '{}' not found in template '{}'",
                    file_path, template_name
                )
            })?;
        Ok(bytes.to_vec())
    }

    /// Get the template source
    pub fn source(&self) -> &TemplateSource {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestConfig;

    impl ProductConfig for TestConfig {
        fn name(&self) -> &'static str {
            "test"
        }

        fn display_name(&self) -> &'static str {
            "Test"
        }

        fn template_dir_env(&self) -> &'static str {
            "SCAFFOLDER_CORE_TEST_TEMPLATE_DIR"
        }

        fn docs_url(&self) -> &'static str {
            "https://example.com"
        }

        fn next_steps(
            &self,
            _dir: &std::path::Path,
            _project: &crate::project::ModProject,
            _has_wrapper: bool,
        ) -> Vec<String> {
            Vec::new()
        }

        fn upgrade_command(&self) -> &'static str {
            "true"
        }
    }

    #[test]
    fn test_source_precedence() {
        let env = TestConfig.template_dir_env();

        std::env::remove_var(env);
        assert_eq!(
            TemplateSource::from_config(&TestConfig, None),
            TemplateSource::Embedded
        );

        std::env::set_var(env, "/from/env");
        assert_eq!(
            TemplateSource::from_config(&TestConfig, None),
            TemplateSource::Local(PathBuf::from("/from/env"))
        );
        assert_eq!(
            TemplateSource::from_config(&TestConfig, Some(PathBuf::from("/from/flag"))),
            TemplateSource::Local(PathBuf::from("/from/flag"))
        );
        std::env::remove_var(env);
    }

    #[tokio::test]
    async fn test_embedded_root_manifest() {
        let mut fetcher = TemplateFetcher::new(TemplateSource::Embedded);
        let root = fetcher.fetch_root_manifest().await.unwrap();
        assert_eq!(root.templates, vec!["fabric-mod".to_string()]);

        let manifest = fetcher.fetch_template_manifest("fabric-mod").await.unwrap();
        assert_eq!(manifest.version, "0.1.0");
    }

    #[tokio::test]
    async fn test_embedded_missing_file() {
        let mut fetcher = TemplateFetcher::new(TemplateSource::Embedded);
        let err = fetcher
            .fetch_file_bytes("fabric-mod", "nope.txt")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }

    #[tokio::test]
    async fn test_local_templates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("template.yaml"), "templates: [demo]\n").unwrap();
        std::fs::create_dir(dir.path().join("demo")).unwrap();
        std::fs::write(
            dir.path().join("demo/template.yaml"),
            "name: Demo\ndescription: Test\nversion: 0.1.0\nfiles:\n  - source: hello.txt\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("demo/hello.txt"), "hi ${{ mod_id }}").unwrap();

        let mut fetcher = TemplateFetcher::from_local(dir.path().to_path_buf());
        let root = fetcher.fetch_root_manifest().await.unwrap();
        assert_eq!(root.templates, vec!["demo".to_string()]);

        let bytes = fetcher.fetch_file_bytes("demo", "hello.txt").await.unwrap();
        assert_eq!(bytes, b"hi ${{ mod_id }}");

        // Served from cache once read
        std::fs::remove_file(dir.path().join("demo/hello.txt")).unwrap();
        assert!(fetcher.fetch_file_bytes("demo", "hello.txt").await.is_ok());
    }
}
