//! Java release required by a Minecraft version

use super::order::parse_lenient;
use anyhow::{anyhow, Result};
use semver::Version;

/// Java release the given Minecraft version compiles against.
///
/// Pre-releases count as their target release, so `1.20.5-pre1` needs 21.
pub fn java_version_for(minecraft_version: &str) -> Result<u8> {
    let parsed = parse_lenient(minecraft_version).ok_or_else(|| {
        anyhow!(
            "Unsupported Minecraft version '{}': expected a release such as 1.20.1",
            minecraft_version
        )
    })?;
    let release = Version::new(parsed.major, parsed.minor, parsed.patch);

    Ok(if release >= Version::new(1, 20, 5) {
        21
    } else if release >= Version::new(1, 17, 0) {
        17
    } else {
        8
    })
}
