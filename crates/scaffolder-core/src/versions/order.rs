//! Lenient semver parsing and newest-first ordering for game and mod versions

use semver::Version;

/// Parse a version that may omit its patch (or minor) component.
///
/// `1.21` becomes `1.21.0`, `1.21+build.9` becomes `1.21.0+build.9`, a leading
/// `v` is ignored. Snapshots such as `24w14a` return `None`.
pub fn parse_lenient(version: &str) -> Option<Version> {
    let cleaned = version.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);

    let split = cleaned.find(['-', '+']).unwrap_or(cleaned.len());
    let (core, suffix) = cleaned.split_at(split);

    let padding = match core.matches('.').count() {
        0 => ".0.0",
        1 => ".0",
        _ => "",
    };

    Version::parse(&format!("{}{}{}", core, padding, suffix)).ok()
}

/// Sort newest first; entries that are not versions are dropped
pub fn sort_versions<I>(versions: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut sorted: Vec<_> = versions
        .into_iter()
        .filter_map(|v| parse_lenient(&v).map(|parsed| (v, parsed)))
        .collect();

    sorted.sort_by(|(_, a), (_, b)| b.cmp(a));
    sorted.into_iter().map(|(v, _)| v).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pads_missing_components() {
        assert_eq!(parse_lenient("1.21").unwrap(), Version::new(1, 21, 0));
        assert_eq!(parse_lenient("v2").unwrap(), Version::new(2, 0, 0));
        assert_eq!(parse_lenient("1.20.1").unwrap(), Version::new(1, 20, 1));
    }

    #[test]
    fn test_parse_keeps_build_and_prerelease() {
        let yarn = parse_lenient("1.21+build.9").unwrap();
        assert_eq!(yarn.build.as_str(), "build.9");

        let pre = parse_lenient("1.21-pre1").unwrap();
        assert_eq!(pre.pre.as_str(), "pre1");
    }

    #[test]
    fn test_parse_rejects_snapshots() {
        assert!(parse_lenient("24w14a").is_none());
        assert!(parse_lenient("").is_none());
    }

    #[test]
    fn test_sort_newest_first_and_drop_invalid() {
        let sorted = sort_versions(vec![
            "0.92.2+1.20.1".to_string(),
            "not-a-version".to_string(),
            "0.102.0+1.21".to_string(),
            "0.100.1+1.21".to_string(),
        ]);
        assert_eq!(
            sorted,
            vec!["0.102.0+1.21", "0.100.1+1.21", "0.92.2+1.20.1"]
        );
    }
}
