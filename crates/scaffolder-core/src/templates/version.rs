//! CLI and template version compatibility

use crate::versions::parse_lenient;

/// Warn when the running CLI is older than the version a template asks for.
///
/// Unparsable versions on either side skip the check.
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli = parse_lenient(cli_version)?;
    let template = parse_lenient(template_version)?;

    (cli < template).then(|| {
        format!(
            "This template needs fabric-tools {} or newer (running {}). Upgrade with: {}",
            template_version, cli_version, upgrade_command
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const UPGRADE: &str = "cargo install fabric-tools --force";

    #[test]
    fn test_older_cli_warns() {
        let warning = check_compatibility("0.1.0", "0.2", UPGRADE).unwrap();
        assert!(warning.contains("0.2"));
        assert!(warning.contains(UPGRADE));
    }

    #[test]
    fn test_same_or_newer_cli_is_silent() {
        assert!(check_compatibility("0.1.0", "0.1.0", UPGRADE).is_none());
        assert!(check_compatibility("1.0.0", "0.9.3", UPGRADE).is_none());
    }

    #[test]
    fn test_unparsable_versions_skip_check() {
        assert!(check_compatibility("dev", "0.1.0", UPGRADE).is_none());
        assert!(check_compatibility("0.1.0", "latest", UPGRADE).is_none());
    }
}
