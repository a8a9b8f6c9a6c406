//! Templates compiled into the binary

macro_rules! embed {
    ($path:literal) => {
        (
            $path,
            include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../templates/", $path))
                as &[u8],
        )
    };
}

/// Paths relative to the `templates/` directory
const FILES: &[(&str, &[u8])] = &[
    embed!("template.yaml"),
    embed!("fabric-mod/template.yaml"),
    embed!("fabric-mod/gradle/build.gradle"),
    embed!("fabric-mod/gradle/build.gradle.kts"),
    embed!("fabric-mod/gradle/settings.gradle"),
    embed!("fabric-mod/gradle/settings.gradle.kts"),
    embed!("fabric-mod/gradle/gradle.properties"),
    embed!("fabric-mod/fabric/fabric.mod.json"),
    embed!("fabric-mod/fabric/java/Main.java"),
    embed!("fabric-mod/fabric/java/Client.java"),
    embed!("fabric-mod/fabric/java/Server.java"),
    embed!("fabric-mod/common/icon.png"),
    embed!("fabric-mod/common/gitignore"),
    embed!("fabric-mod/common/gitattributes"),
];

pub fn get(path: &str) -> Option<&'static [u8]> {
    FILES
        .iter()
        .find(|(name, _)| *name == path)
        .map(|(_, contents)| *contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::manifest::TemplateManifest;

    #[test]
    fn test_every_manifest_file_is_embedded() {
        let manifest: TemplateManifest =
            serde_yaml::from_slice(get("fabric-mod/template.yaml").unwrap()).unwrap();

        for file in &manifest.files {
            let path = format!("fabric-mod/{}", file.source);
            assert!(get(&path).is_some(), "{} is not embedded", path);
        }
    }

    #[test]
    fn test_unknown_path() {
        assert!(get("fabric-mod/missing.txt").is_none());
    }
}
