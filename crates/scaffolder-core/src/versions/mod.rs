//! Minecraft, Yarn, Fabric Loader and Fabric API version lookup
//!
//! Game, mapping and loader versions come from Fabric Meta; Fabric API
//! releases come from Modrinth. Both base URLs can be overridden through the
//! environment (useful for mirrors and offline test servers).

pub mod java;
pub mod order;

use crate::product::ProductConfig;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

pub use java::java_version_for;
pub use order::{parse_lenient, sort_versions};

pub const DEFAULT_META_URL: &str = "https://meta.fabricmc.net";
pub const DEFAULT_MODRINTH_URL: &str = "https://api.modrinth.com";

/// Environment variable overriding the Fabric Meta base URL
pub const META_URL_ENV: &str = "FABRIC_META_URL";
/// Environment variable overriding the Modrinth API base URL
pub const MODRINTH_URL_ENV: &str = "MODRINTH_API_URL";

/// Modrinth project id of Fabric API
const FABRIC_API_PROJECT: &str = "P7dR8mSH";

/// The dependency versions written into `gradle.properties`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyVersions {
    pub minecraft: String,
    pub yarn_mappings: String,
    pub fabric_loader: String,
    pub fabric_api: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameVersion {
    pub version: String,
    pub stable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoaderVersion {
    pub version: String,
    pub stable: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YarnVersion {
    pub game_version: String,
    pub version: String,
    #[serde(default)]
    pub stable: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FabricApiVersion {
    pub version_number: String,
    #[serde(default)]
    pub game_versions: Vec<String>,
}

/// Stable Minecraft releases, in the order Fabric Meta lists them (newest first)
pub fn stable_game_versions(versions: &[GameVersion]) -> Vec<String> {
    versions
        .iter()
        .filter(|v| v.stable)
        .map(|v| v.version.clone())
        .collect()
}

/// Stable Fabric Loader releases, newest first
pub fn stable_loader_versions(versions: &[LoaderVersion]) -> Vec<String> {
    versions
        .iter()
        .filter(|v| v.stable)
        .map(|v| v.version.clone())
        .collect()
}

/// Yarn builds for a Minecraft version, newest first
pub fn compatible_yarn_versions(versions: &[YarnVersion], minecraft_version: &str) -> Vec<String> {
    sort_versions(
        versions
            .iter()
            .filter(|v| v.game_version == minecraft_version)
            .map(|v| v.version.clone()),
    )
}

/// Fabric API releases built for a Minecraft version, newest first
pub fn compatible_fabric_api_versions(
    versions: &[FabricApiVersion],
    minecraft_version: &str,
) -> Vec<String> {
    sort_versions(
        versions
            .iter()
            .filter(|v| v.game_versions.iter().any(|g| g == minecraft_version))
            .map(|v| v.version_number.clone()),
    )
}

/// Client for Fabric Meta and Modrinth
pub struct VersionManager {
    client: reqwest::Client,
    meta_url: Url,
    modrinth_url: Url,
}

impl VersionManager {
    pub fn new(meta_url: Url, modrinth_url: Url, user_agent: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            meta_url,
            modrinth_url,
        }
    }

    /// Create a manager from a product config, honouring URL overrides in the environment
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let meta_url = url_from_env(META_URL_ENV, DEFAULT_META_URL)?;
        let modrinth_url = url_from_env(MODRINTH_URL_ENV, DEFAULT_MODRINTH_URL)?;
        Ok(Self::new(meta_url, modrinth_url, config.user_agent()))
    }

    /// Build a URL by appending path segments, preserving query parameters
    fn build_url(base: &Url, segments: &[&str]) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("URL cannot have path segments: {}", base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        debug!(%url, "fetching {}", what);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch {} from {}", what, url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to fetch {} from {}: HTTP {}",
                what,
                url,
                response.status()
            );
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse {}", what))
    }

    pub async fn game_versions(&self) -> Result<Vec<GameVersion>> {
        let url = Self::build_url(&self.meta_url, &["v2", "versions", "game"])?;
        self.get_json(url, "Minecraft versions").await
    }

    pub async fn yarn_versions(&self) -> Result<Vec<YarnVersion>> {
        let url = Self::build_url(&self.meta_url, &["v2", "versions", "yarn"])?;
        self.get_json(url, "Yarn versions").await
    }

    pub async fn loader_versions(&self) -> Result<Vec<LoaderVersion>> {
        let url = Self::build_url(&self.meta_url, &["v2", "versions", "loader"])?;
        self.get_json(url, "Fabric Loader versions").await
    }

    pub async fn fabric_api_versions(&self) -> Result<Vec<FabricApiVersion>> {
        let url = Self::build_url(
            &self.modrinth_url,
            &["v2", "project", FABRIC_API_PROJECT, "version"],
        )?;
        self.get_json(url, "Fabric API versions").await
    }

    pub async fn stable_minecraft_versions(&self) -> Result<Vec<String>> {
        Ok(stable_game_versions(&self.game_versions().await?))
    }

    pub async fn stable_loader_versions(&self) -> Result<Vec<String>> {
        Ok(stable_loader_versions(&self.loader_versions().await?))
    }

    pub async fn compatible_yarn_versions(&self, minecraft_version: &str) -> Result<Vec<String>> {
        Ok(compatible_yarn_versions(
            &self.yarn_versions().await?,
            minecraft_version,
        ))
    }

    pub async fn compatible_fabric_api_versions(
        &self,
        minecraft_version: &str,
    ) -> Result<Vec<String>> {
        Ok(compatible_fabric_api_versions(
            &self.fabric_api_versions().await?,
            minecraft_version,
        ))
    }
}

fn url_from_env(env: &str, default: &str) -> Result<Url> {
    let url_str = std::env::var(env).unwrap_or_else(|_| default.to_string());
    Url::parse(&url_str).with_context(|| format!("Invalid URL in {}: {}", env, url_str))
}
