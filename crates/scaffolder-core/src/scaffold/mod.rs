//! Project creation: render the template for a [`ModProject`] and write it
//!
//! Rendering happens completely in memory first. If writing then fails in a
//! directory this call created, the directory is removed again; directories
//! that already existed are never deleted.

pub mod git;
pub mod params;
pub mod wrapper;

use crate::project::ModProject;
use crate::templates::{copier, TemplateFetcher, TemplateManifest};
use anyhow::Result;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, warn};

pub use params::build_params;

/// What [`create_project`] wrote
#[derive(Debug, Clone)]
pub struct ScaffoldOutcome {
    pub project_dir: PathBuf,

    /// Files written, relative to `project_dir`
    pub files: Vec<PathBuf>,

    /// Parameters the template never referenced
    pub unused_parameters: Vec<String>,
}

pub async fn create_project(
    fetcher: &mut TemplateFetcher,
    template_name: &str,
    manifest: &TemplateManifest,
    project: &ModProject,
) -> Result<ScaffoldOutcome> {
    project.validate()?;

    let params = build_params(project)?;
    let plan = copier::plan_template(
        fetcher,
        template_name,
        manifest,
        &project.features(),
        &params,
    )
    .await?;

    let project_dir = project.location.path.clone();
    let existed = fs::try_exists(&project_dir).await.unwrap_or(true);

    match copier::write_plan(&plan, &project_dir).await {
        Ok(files) => {
            info!(
                dir = %project_dir.display(),
                files = files.len(),
                "project created"
            );
            Ok(ScaffoldOutcome {
                project_dir,
                files,
                unused_parameters: plan.unused_parameters,
            })
        }
        Err(e) => {
            if !existed {
                if let Err(cleanup) = fs::remove_dir_all(&project_dir).await {
                    warn!(
                        dir = %project_dir.display(),
                        error = %cleanup,
                        "failed to remove project directory after error"
                    );
                }
            }
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::tests::sample_project;
    use crate::project::{EntryPoint, GradleDsl};
    use crate::templates::TemplateSource;

    async fn embedded() -> (TemplateFetcher, TemplateManifest) {
        let mut fetcher = TemplateFetcher::new(TemplateSource::Embedded);
        let manifest = fetcher.fetch_template_manifest("fabric-mod").await.unwrap();
        (fetcher, manifest)
    }

    const ICON: &[u8] = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../templates/fabric-mod/common/icon.png"
    ));

    fn assert_fully_rendered(outcome: &ScaffoldOutcome) {
        for file in &outcome.files {
            let bytes = std::fs::read(outcome.project_dir.join(file)).unwrap();
            assert!(
                !bytes.windows(3).any(|w| w == b"${{"),
                "{} still contains a placeholder",
                file.display()
            );
        }
    }

    #[tokio::test]
    async fn test_create_kotlin_project() {
        let base = tempfile::tempdir().unwrap();
        let project = sample_project(base.path());
        let (mut fetcher, manifest) = embedded().await;

        let outcome = create_project(&mut fetcher, "fabric-mod", &manifest, &project)
            .await
            .unwrap();

        let root = base.path().join("ExampleMod");
        assert_eq!(outcome.project_dir, root);
        assert!(outcome.unused_parameters.is_empty());

        let build = std::fs::read_to_string(root.join("build.gradle.kts")).unwrap();
        assert!(build.contains("JavaLanguageVersion.of(21)"));
        assert!(build.contains(r#"project.property("mod_version")"#));
        assert!(!root.join("build.gradle").exists());

        let props = std::fs::read_to_string(root.join("gradle.properties")).unwrap();
        assert!(props.contains("minecraft_version=1.21\n"));
        assert!(props.contains("yarn_mappings=1.21+build.9\n"));
        assert!(props.contains("archives_base_name=examplemod\n"));

        let main = std::fs::read_to_string(root.join("src/main/java/com/example/ExampleMod.java"))
            .unwrap();
        assert!(main.starts_with("package com.example;"));
        assert!(main.contains(r#"MOD_ID = "examplemod""#));

        assert!(root.join("src/main/resources/assets/examplemod").is_dir());
        assert!(root.join("src/test/java").is_dir());
        assert!(root.join(".gitignore").is_file());

        let icon =
            std::fs::read(root.join("src/main/resources/assets/examplemod/icon.png")).unwrap();
        assert_eq!(icon, ICON);

        assert_fully_rendered(&outcome);
    }

    #[tokio::test]
    async fn test_fabric_mod_json_is_valid_json() {
        let base = tempfile::tempdir().unwrap();
        let mut project = sample_project(base.path());
        project.gradle_dsl = GradleDsl::Groovy;
        project.entrypoints.push(EntryPoint::Client);
        let (mut fetcher, manifest) = embedded().await;

        let outcome = create_project(&mut fetcher, "fabric-mod", &manifest, &project)
            .await
            .unwrap();
        assert_fully_rendered(&outcome);

        let root = base.path().join("ExampleMod");
        let raw =
            std::fs::read_to_string(root.join("src/main/resources/fabric.mod.json")).unwrap();
        // Gradle's processResources fills this one in later
        assert!(raw.contains(r#""version": "${version}""#));

        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["id"], "examplemod");
        assert_eq!(json["description"], "An \"example\" mod");
        assert_eq!(json["environment"], "*");
        assert_eq!(json["icon"], "assets/examplemod/icon.png");
        assert_eq!(json["depends"]["java"], ">=21");
        assert_eq!(json["entrypoints"]["client"][0], "com.example.ExampleModClient");

        assert!(root.join("build.gradle").is_file());
        assert!(root
            .join("src/main/java/com/example/ExampleModClient.java")
            .is_file());
        assert!(!root
            .join("src/main/java/com/example/ExampleModServer.java")
            .exists());
    }

    #[tokio::test]
    async fn test_java_8_project_uses_legacy_java_version_constant() {
        for dsl in GradleDsl::ALL {
            let base = tempfile::tempdir().unwrap();
            let mut project = sample_project(base.path());
            project.gradle_dsl = dsl;
            project.versions.minecraft = "1.16.5".to_string();
            project.versions.yarn_mappings = "1.16.5+build.10".to_string();
            let (mut fetcher, manifest) = embedded().await;

            let outcome = create_project(&mut fetcher, "fabric-mod", &manifest, &project)
                .await
                .unwrap();
            assert_fully_rendered(&outcome);

            let build =
                std::fs::read_to_string(outcome.project_dir.join(dsl.build_file())).unwrap();
            assert!(build.contains("sourceCompatibility = JavaVersion.VERSION_1_8"));
            assert!(build.contains("targetCompatibility = JavaVersion.VERSION_1_8"));
            assert!(!build.contains("VERSION_8"));
            assert!(build.contains("JavaLanguageVersion.of(8)"));
        }
    }

    #[tokio::test]
    async fn test_invalid_project_writes_nothing() {
        let base = tempfile::tempdir().unwrap();
        let mut project = sample_project(base.path());
        project.maven_group = "com..example".to_string();
        let (mut fetcher, manifest) = embedded().await;

        assert!(
            create_project(&mut fetcher, "fabric-mod", &manifest, &project)
                .await
                .is_err()
        );
        assert!(!base.path().join("ExampleMod").exists());
    }

    #[tokio::test]
    async fn test_render_failure_writes_nothing() {
        let templates = tempfile::tempdir().unwrap();
        std::fs::write(templates.path().join("template.yaml"), "templates: [t]\n").unwrap();
        std::fs::create_dir(templates.path().join("t")).unwrap();
        std::fs::write(
            templates.path().join("t/template.yaml"),
            "name: T\ndescription: T\nversion: 0.1.0\nfiles:\n  - source: a.txt\n  - source: b.txt\n",
        )
        .unwrap();
        std::fs::write(templates.path().join("t/a.txt"), "${{ mod_id }}").unwrap();
        std::fs::write(templates.path().join("t/b.txt"), "${{ not_a_parameter }}").unwrap();

        let base = tempfile::tempdir().unwrap();
        let project = sample_project(base.path());
        let mut fetcher = TemplateFetcher::from_local(templates.path().to_path_buf());
        let manifest = fetcher.fetch_template_manifest("t").await.unwrap();

        let err = create_project(&mut fetcher, "t", &manifest, &project)
            .await
            .unwrap_err();

        assert!(format!("{:#}", err).contains("not_a_parameter"));
        assert!(!base.path().join("ExampleMod").exists());
    }
}
