//! Placeholder values for the mod template

use crate::project::{EntryPoint, ModProject};
use crate::templates::Params;
use anyhow::{Context, Result};
use std::collections::BTreeMap;

/// Build the `${{ name }}` values for a project.
///
/// Values ending in `_json` are complete JSON literals (quoted strings,
/// arrays, objects) meant to be dropped into `fabric.mod.json` as-is.
pub fn build_params(project: &ModProject) -> Result<Params> {
    let entrypoints: BTreeMap<&str, Vec<String>> = EntryPoint::ALL
        .into_iter()
        .filter(|e| project.has_entrypoint(*e))
        .map(|e| (e.key(), vec![project.entrypoint_class(e)]))
        .collect();
    let java_version = project.java_version()?;

    let values = [
        ("mod_name", project.mod_name().to_string()),
        ("class_name", project.mod_name().to_string()),
        ("mod_id", project.mod_id()),
        ("base_name", project.mod_name().to_lowercase()),
        ("maven_group", project.maven_group.clone()),
        ("package_path", project.package_path()),
        ("mod_version", project.mod_version.clone()),
        ("minecraft_version", project.versions.minecraft.clone()),
        ("yarn_mappings", project.versions.yarn_mappings.clone()),
        ("fabric_loader_version", project.versions.fabric_loader.clone()),
        ("fabric_api_version", project.versions.fabric_api.clone()),
        ("java_version", java_version.to_string()),
        ("java_compat", java_compat(java_version)),
        ("environment", project.environment.as_str().to_string()),
        ("description_json", to_json(&project.description)?),
        ("authors_json", to_json(&project.authors)?),
        ("license_json", to_json(&project.license)?),
        ("entrypoints_json", to_json(&entrypoints)?),
    ];

    Ok(values
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect())
}

/// Suffix of Gradle's `JavaVersion` constant (`VERSION_1_8`, `VERSION_17`)
fn java_compat(java_version: u8) -> String {
    match java_version {
        ..=8 => format!("1_{}", java_version),
        _ => java_version.to_string(),
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).context("Failed to encode template value as JSON")
}
