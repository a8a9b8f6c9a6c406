//! The mod being scaffolded: identity, dependency versions and options
//!
//! A [`ModProject`] is assembled from prompts or flags and validated once
//! before anything is rendered.

pub mod naming;
pub mod options;

use crate::templates::manifest::Feature;
use crate::versions::{java_version_for, DependencyVersions};
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub use naming::{sanitize_mod_id, sanitize_mod_name, validate_maven_group};
pub use options::{EntryPoint, GradleDsl, ModEnvironment};

pub const DEFAULT_MOD_NAME: &str = "MyMod";
pub const DEFAULT_MAVEN_GROUP: &str = "com.example";
pub const DEFAULT_MOD_VERSION: &str = "0.1.0";
pub const DEFAULT_LICENSE: &str = "MIT";

/// Where the project is created and the mod name it was derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLocation {
    pub mod_name: String,
    pub path: PathBuf,
}

impl ProjectLocation {
    /// Sanitize `input` into a mod name and place the project at `base_dir/<name>`
    pub fn new(input: &str, base_dir: &Path) -> Result<Self> {
        let mod_name = sanitize_mod_name(input);
        let path = base_dir.join(&mod_name);
        Self::at(mod_name, path)
    }

    /// Use an explicit project directory
    pub fn at(mod_name: String, path: PathBuf) -> Result<Self> {
        naming::validate_mod_name(&mod_name)?;

        if path.is_file() {
            bail!(
                "'{}' is an existing file, please provide a valid mod name",
                path.display()
            );
        }

        Ok(Self { mod_name, path })
    }
}

/// Everything needed to render the mod template
#[derive(Debug, Clone)]
pub struct ModProject {
    pub location: ProjectLocation,
    pub maven_group: String,
    pub gradle_dsl: GradleDsl,
    pub versions: DependencyVersions,
    pub mod_version: String,
    pub description: String,
    pub authors: Vec<String>,
    pub license: String,
    pub environment: ModEnvironment,
    pub entrypoints: Vec<EntryPoint>,
    pub git: bool,
}

impl ModProject {
    pub fn mod_name(&self) -> &str {
        &self.location.mod_name
    }

    pub fn mod_id(&self) -> String {
        sanitize_mod_id(&self.location.mod_name)
    }

    /// Maven group as a source directory path (`com.example` -> `com/example`)
    pub fn package_path(&self) -> String {
        self.maven_group.replace('.', "/")
    }

    pub fn java_version(&self) -> Result<u8> {
        java_version_for(&self.versions.minecraft)
    }

    pub fn has_entrypoint(&self, entrypoint: EntryPoint) -> bool {
        self.entrypoints.contains(&entrypoint)
    }

    /// Fully qualified class name for an entrypoint
    pub fn entrypoint_class(&self, entrypoint: EntryPoint) -> String {
        format!(
            "{}.{}{}",
            self.maven_group,
            self.mod_name(),
            entrypoint.class_suffix()
        )
    }

    /// Template features enabled by this project's options
    pub fn features(&self) -> Vec<Feature> {
        let mut features = vec![match self.gradle_dsl {
            GradleDsl::Groovy => Feature::Groovy,
            GradleDsl::Kotlin => Feature::Kotlin,
        }];
        if self.has_entrypoint(EntryPoint::Client) {
            features.push(Feature::ClientEntrypoint);
        }
        if self.has_entrypoint(EntryPoint::Server) {
            features.push(Feature::ServerEntrypoint);
        }
        features
    }

    pub fn validate(&self) -> Result<()> {
        naming::validate_mod_name(self.mod_name())?;
        naming::validate_mod_id(&self.mod_id())?;
        validate_maven_group(&self.maven_group)?;

        if self.mod_version.trim().is_empty() {
            bail!("Mod version cannot be empty");
        }

        for (label, value) in [
            ("Minecraft", &self.versions.minecraft),
            ("Yarn mappings", &self.versions.yarn_mappings),
            ("Fabric Loader", &self.versions.fabric_loader),
            ("Fabric API", &self.versions.fabric_api),
        ] {
            if value.trim().is_empty() {
                bail!("{} version cannot be empty", label);
            }
        }
        self.java_version()
            .with_context(|| format!("Cannot target Minecraft {}", self.versions.minecraft))?;

        if !self.has_entrypoint(EntryPoint::Main) {
            bail!("The main entrypoint is required");
        }
        if let Some(unsupported) = self
            .entrypoints
            .iter()
            .find(|e| !self.environment.supports(**e))
        {
            bail!(
                "The {} entrypoint cannot be used by a mod with environment '{}'",
                unsupported.key(),
                self.environment.as_str()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_project(dir: &Path) -> ModProject {
        ModProject {
            location: ProjectLocation::new("Example Mod", dir).unwrap(),
            maven_group: "com.example".to_string(),
            gradle_dsl: GradleDsl::Kotlin,
            versions: DependencyVersions {
                minecraft: "1.21".to_string(),
                yarn_mappings: "1.21+build.9".to_string(),
                fabric_loader: "0.16.5".to_string(),
                fabric_api: "0.102.0+1.21".to_string(),
            },
            mod_version: "0.1.0".to_string(),
            description: "An \"example\" mod".to_string(),
            authors: vec!["Alex".to_string()],
            license: "MIT".to_string(),
            environment: ModEnvironment::Universal,
            entrypoints: vec![EntryPoint::Main],
            git: false,
        }
    }

    #[test]
    fn test_location_sanitizes_name() {
        let location = ProjectLocation::new("Example Mod!", Path::new("/tmp/mods")).unwrap();
        assert_eq!(location.mod_name, "ExampleMod");
        assert_eq!(location.path, PathBuf::from("/tmp/mods/ExampleMod"));
    }

    #[test]
    fn test_location_rejects_leading_digit() {
        assert!(ProjectLocation::new("1Mod", Path::new(".")).is_err());
    }

    #[test]
    fn test_derived_names() {
        let project = sample_project(Path::new("/tmp"));
        assert_eq!(project.mod_id(), "examplemod");
        assert_eq!(project.package_path(), "com/example");
        assert_eq!(
            project.entrypoint_class(EntryPoint::Client),
            "com.example.ExampleModClient"
        );
        assert_eq!(project.java_version().unwrap(), 21);
    }

    #[test]
    fn test_features_follow_options() {
        let mut project = sample_project(Path::new("/tmp"));
        assert_eq!(project.features(), vec![Feature::Kotlin]);

        project.gradle_dsl = GradleDsl::Groovy;
        project.entrypoints.push(EntryPoint::Client);
        assert_eq!(
            project.features(),
            vec![Feature::Groovy, Feature::ClientEntrypoint]
        );
    }

    #[test]
    fn test_validate_rejects_incompatible_entrypoint() {
        let mut project = sample_project(Path::new("/tmp"));
        project.environment = ModEnvironment::Server;
        project.entrypoints.push(EntryPoint::Client);

        let err = project.validate().unwrap_err();
        assert!(err.to_string().contains("client entrypoint"));
    }

    #[test]
    fn test_validate_requires_main_entrypoint() {
        let mut project = sample_project(Path::new("/tmp"));
        project.entrypoints = vec![EntryPoint::Client];
        assert!(project.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_snapshot_versions() {
        let mut project = sample_project(Path::new("/tmp"));
        project.versions.minecraft = "24w14a".to_string();
        assert!(project.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_sample() {
        assert!(sample_project(Path::new("/tmp")).validate().is_ok());
    }
}
