//! Choices that shape the generated project

use clap::ValueEnum;
use std::fmt;

/// Gradle build script language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum GradleDsl {
    Groovy,
    Kotlin,
}

impl GradleDsl {
    pub const ALL: [GradleDsl; 2] = [GradleDsl::Groovy, GradleDsl::Kotlin];

    pub const fn as_str(self) -> &'static str {
        match self {
            GradleDsl::Groovy => "groovy",
            GradleDsl::Kotlin => "kotlin",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            GradleDsl::Groovy => "Groovy",
            GradleDsl::Kotlin => "Kotlin",
        }
    }

    pub const fn build_file(self) -> &'static str {
        match self {
            GradleDsl::Groovy => "build.gradle",
            GradleDsl::Kotlin => "build.gradle.kts",
        }
    }
}

impl fmt::Display for GradleDsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side(s) the mod is loaded on, as written to `fabric.mod.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ModEnvironment {
    Client,
    Server,
    Universal,
}

impl ModEnvironment {
    pub const ALL: [ModEnvironment; 3] = [
        ModEnvironment::Universal,
        ModEnvironment::Client,
        ModEnvironment::Server,
    ];

    /// Value of the `environment` key in `fabric.mod.json`
    pub const fn as_str(self) -> &'static str {
        match self {
            ModEnvironment::Client => "client",
            ModEnvironment::Server => "server",
            ModEnvironment::Universal => "*",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            ModEnvironment::Client => "Client only",
            ModEnvironment::Server => "Server only",
            ModEnvironment::Universal => "Client and server",
        }
    }

    /// Whether an entrypoint can run in this environment
    pub fn supports(self, entrypoint: EntryPoint) -> bool {
        !matches!(
            (self, entrypoint),
            (ModEnvironment::Client, EntryPoint::Server)
                | (ModEnvironment::Server, EntryPoint::Client)
        )
    }
}

impl fmt::Display for ModEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Fabric entrypoint classes generated for the mod
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum EntryPoint {
    Main,
    Client,
    Server,
}

impl EntryPoint {
    pub const ALL: [EntryPoint; 3] = [EntryPoint::Main, EntryPoint::Client, EntryPoint::Server];

    /// Key under `entrypoints` in `fabric.mod.json`
    pub const fn key(self) -> &'static str {
        match self {
            EntryPoint::Main => "main",
            EntryPoint::Client => "client",
            EntryPoint::Server => "server",
        }
    }

    /// Appended to the mod class name to build the entrypoint class name
    pub const fn class_suffix(self) -> &'static str {
        match self {
            EntryPoint::Main => "",
            EntryPoint::Client => "Client",
            EntryPoint::Server => "Server",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            EntryPoint::Main => "Main (ModInitializer)",
            EntryPoint::Client => "Client (ClientModInitializer)",
            EntryPoint::Server => "Dedicated server (DedicatedServerModInitializer)",
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_entrypoint_support() {
        assert!(ModEnvironment::Universal.supports(EntryPoint::Client));
        assert!(ModEnvironment::Universal.supports(EntryPoint::Server));
        assert!(ModEnvironment::Client.supports(EntryPoint::Main));
        assert!(!ModEnvironment::Client.supports(EntryPoint::Server));
        assert!(!ModEnvironment::Server.supports(EntryPoint::Client));
    }

    #[test]
    fn test_environment_json_values() {
        assert_eq!(ModEnvironment::Universal.as_str(), "*");
        assert_eq!(ModEnvironment::Client.as_str(), "client");
    }
}
