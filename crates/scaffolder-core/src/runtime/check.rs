//! Runtime detection for Java, Git and Gradle

use anyhow::Result;
use std::fmt;
use std::process::Command;

/// External tools the generated project relies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Runtime {
    Java,
    Git,
    Gradle,
}

impl Runtime {
    pub fn display_name(&self) -> &'static str {
        match self {
            Runtime::Java => "Java",
            Runtime::Git => "Git",
            Runtime::Gradle => "Gradle",
        }
    }

    fn command(&self) -> &'static str {
        match self {
            Runtime::Java => "java",
            Runtime::Git => "git",
            Runtime::Gradle => "gradle",
        }
    }

    /// `java -version` predates `--version` and still works on Java 8
    fn version_arg(&self) -> &'static str {
        match self {
            Runtime::Java => "-version",
            Runtime::Git | Runtime::Gradle => "--version",
        }
    }

    fn install_hint(&self) -> &'static str {
        match self {
            Runtime::Java => "Java (install from https://adoptium.net)",
            Runtime::Git => "Git (install from https://git-scm.com)",
            Runtime::Gradle => "Gradle (install from https://gradle.org/install)",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub runtime: Runtime,
    pub version: Option<String>,
    pub available: bool,
}

impl RuntimeInfo {
    /// Java major release, when this is an available Java runtime
    pub fn java_major(&self) -> Option<u32> {
        match self.runtime {
            Runtime::Java => self.version.as_deref().and_then(java_major_version),
            _ => None,
        }
    }
}

/// Run `<tool> --version` and report what was found
pub fn check(runtime: Runtime) -> RuntimeInfo {
    let output = Command::new(runtime.command())
        .arg(runtime.version_arg())
        .output();

    match output {
        Ok(out) if out.status.success() => {
            // Java writes its banner to stderr
            let stdout = String::from_utf8_lossy(&out.stdout);
            let stderr = String::from_utf8_lossy(&out.stderr);
            RuntimeInfo {
                runtime,
                version: version_line(&stdout).or_else(|| version_line(&stderr)),
                available: true,
            }
        }
        _ => RuntimeInfo {
            runtime,
            version: None,
            available: false,
        },
    }
}

pub fn check_java() -> RuntimeInfo {
    check(Runtime::Java)
}

pub fn check_git() -> RuntimeInfo {
    check(Runtime::Git)
}

pub fn check_gradle() -> RuntimeInfo {
    check(Runtime::Gradle)
}

/// First line that carries a version number (skips Gradle's dashed banner)
fn version_line(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .find(|line| line.chars().any(|c| c.is_ascii_digit()) && !line.starts_with('-'))
        .map(str::to_string)
}

/// Extract the major release from a `java -version` banner.
///
/// Handles both `openjdk version "21.0.2"` and the legacy `java version "1.8.0_381"`.
pub fn java_major_version(banner: &str) -> Option<u32> {
    let token = banner
        .split_whitespace()
        .map(|t| t.trim_matches('"'))
        .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))?;

    let mut parts = token.split(['.', '_', '-', '+']);
    let first: u32 = parts.next()?.parse().ok()?;
    if first == 1 {
        parts.next()?.parse().ok()
    } else {
        Some(first)
    }
}

/// Check runtimes with no advisory runtimes (strict mode - fail on any missing).
pub fn check_runtimes(runtimes: &[Runtime]) -> Result<Vec<RuntimeInfo>> {
    check_runtimes_with_advisory(runtimes, &[])
}

/// Check runtimes; those in `advisory` get availability reported but don't cause failure.
pub fn check_runtimes_with_advisory(
    required: &[Runtime],
    advisory: &[Runtime],
) -> Result<Vec<RuntimeInfo>> {
    let mut results = Vec::new();
    let mut missing = Vec::new();

    for runtime in required {
        let info = check(*runtime);
        if !info.available {
            missing.push(runtime.install_hint());
        }
        results.push(info);
    }
    for runtime in advisory.iter().filter(|r| !required.contains(r)) {
        results.push(check(*runtime));
    }

    if !missing.is_empty() {
        anyhow::bail!(
            "Missing required runtimes:\n{}",
            missing
                .iter()
                .map(|m| format!("  - {}", m))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_major_modern() {
        assert_eq!(
            java_major_version(r#"openjdk version "21.0.2" 2024-01-16"#),
            Some(21)
        );
        assert_eq!(java_major_version(r#"openjdk version "17" 2021-09-14"#), Some(17));
    }

    #[test]
    fn test_java_major_legacy() {
        assert_eq!(java_major_version(r#"java version "1.8.0_381""#), Some(8));
    }

    #[test]
    fn test_java_major_unknown() {
        assert_eq!(java_major_version("no java here"), None);
    }

    #[test]
    fn test_version_line_skips_banner() {
        let gradle = "\n------------------------------------------------------------\nGradle 8.10.2\n------------------------------------------------------------\n";
        assert_eq!(version_line(gradle).as_deref(), Some("Gradle 8.10.2"));
    }

    #[test]
    fn test_runtime_info_accessors() {
        let info = RuntimeInfo {
            runtime: Runtime::Git,
            version: None,
            available: false,
        };
        assert!(info.java_major().is_none());
        assert!(Runtime::Git.install_hint().contains("git-scm.com"));
    }
}
