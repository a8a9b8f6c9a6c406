//! Mod name, mod id and maven group rules

use anyhow::{bail, Result};

/// Longest mod id Fabric Loader accepts
const MAX_MOD_ID_LEN: usize = 64;

/// Keep only alphanumeric characters (the name doubles as the Java class name)
pub fn sanitize_mod_name(name: &str) -> String {
    name.chars().filter(|c| c.is_alphanumeric()).collect()
}

/// Lower-case the name and keep `[a-z0-9_]`
pub fn sanitize_mod_id(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|&c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        .collect()
}

pub fn validate_mod_name(name: &str) -> Result<()> {
    if name.is_empty() {
        bail!("Mod name cannot be empty");
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        bail!("Mod name '{}' must only contain alphanumeric characters", name);
    }
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        bail!("Mod name '{}' must start with a letter", name);
    }
    Ok(())
}

pub fn validate_mod_id(mod_id: &str) -> Result<()> {
    if mod_id.len() < 2 || mod_id.len() > MAX_MOD_ID_LEN {
        bail!(
            "Mod id '{}' must be between 2 and {} characters long",
            mod_id,
            MAX_MOD_ID_LEN
        );
    }
    if !mod_id.starts_with(|c: char| c.is_ascii_lowercase()) {
        bail!("Mod id '{}' must start with a lower-case letter", mod_id);
    }
    if !mod_id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        bail!("Mod id '{}' contains invalid characters", mod_id);
    }
    Ok(())
}

pub fn validate_maven_group(maven_group: &str) -> Result<()> {
    if maven_group.is_empty() {
        bail!("Maven group cannot be empty");
    }
    if !maven_group
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.')
    {
        bail!("Maven group can only contain alphanumeric characters and dots");
    }
    if maven_group.starts_with('.') || maven_group.ends_with('.') {
        bail!("Maven group cannot start or end with a dot");
    }
    if let Some(segment) = maven_group
        .split('.')
        .find(|s| s.is_empty() || s.starts_with(|c: char| c.is_ascii_digit()))
    {
        if segment.is_empty() {
            bail!("Maven group cannot contain empty segments");
        }
        bail!("Maven group segment '{}' cannot start with a digit", segment);
    }
    Ok(())
}
