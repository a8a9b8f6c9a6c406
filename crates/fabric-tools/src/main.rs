//! Fabric Tools CLI - Project scaffolding for Fabric mods

mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use scaffolder_core::project::{EntryPoint, GradleDsl, ModEnvironment, ModProject};
use scaffolder_core::tui::CreateArgs;
use scaffolder_core::ProductConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fabric product configuration
#[derive(Clone)]
pub struct FabricConfig;

impl ProductConfig for FabricConfig {
    fn name(&self) -> &'static str {
        "fabric-tools"
    }

    fn display_name(&self) -> &'static str {
        "Fabric Mod"
    }

    fn template_dir_env(&self) -> &'static str {
        "FABRIC_TEMPLATE_DIR"
    }

    fn docs_url(&self) -> &'static str {
        "https://fabricmc.net/wiki/tutorial:setup"
    }

    fn upgrade_command(&self) -> &'static str {
        "cargo install fabric-tools --force"
    }

    fn next_steps(&self, dir: &Path, project: &ModProject, has_wrapper: bool) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();
        let gradle = if has_wrapper { "./gradlew" } else { "gradle" };

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        // Step 2: Wrapper, when it could not be generated
        if !has_wrapper {
            steps.push(format!(
                "gradle wrapper --gradle-version {}",
                scaffolder_core::scaffold::wrapper::GRADLE_VERSION
            ));
        }

        // Step 3: Build the mod jar
        steps.push(format!("{} build", gradle));

        // Step 4: Launch the game
        if project.environment.supports(EntryPoint::Client) {
            steps.push(format!("{} runClient", gradle));
        }
        if project.environment.supports(EntryPoint::Server) {
            steps.push(format!("{} runServer", gradle));
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "fabric-tools")]
#[command(about = "CLI for scaffolding Fabric mod projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Fabric mod project
    Create(CliCreateArgs),
    /// Render a single template file with `${{ name }}` placeholders
    Render(render::RenderArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory to use for templates instead of the bundled ones (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    #[arg(short, long)]
    pub template: Option<String>,

    /// Mod name, also used as the main class name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory to create the project folder in (defaults to the current directory)
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Maven group, e.g. com.example
    #[arg(long)]
    pub maven_group: Option<String>,

    /// Gradle build script language
    #[arg(long, value_enum)]
    pub dsl: Option<GradleDsl>,

    #[arg(long)]
    pub minecraft_version: Option<String>,

    #[arg(long)]
    pub yarn_version: Option<String>,

    #[arg(long)]
    pub loader_version: Option<String>,

    #[arg(long)]
    pub fabric_api_version: Option<String>,

    /// Initial mod version
    #[arg(long)]
    pub mod_version: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    /// Authors (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub authors: Option<Vec<String>>,

    #[arg(long)]
    pub license: Option<String>,

    /// Where the mod runs
    #[arg(long, value_enum)]
    pub environment: Option<ModEnvironment>,

    /// Entrypoints to generate (comma-separated: main,client,server)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub entrypoints: Option<Vec<EntryPoint>>,

    /// Initialize a git repository
    #[arg(long, conflicts_with = "no_git")]
    pub git: bool,

    /// Do not initialize a git repository
    #[arg(long)]
    pub no_git: bool,

    /// Generate the Gradle wrapper with the local Gradle
    #[arg(long, conflicts_with = "no_wrapper")]
    pub wrapper: bool,

    /// Do not generate the Gradle wrapper
    #[arg(long)]
    pub no_wrapper: bool,

    /// Skip the Java/Git/Gradle check
    #[arg(long)]
    pub skip_runtime_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

/// Turn a `--flag` / `--no-flag` pair into an optional answer
fn flag_pair(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            template_dir: args.template_dir,
            template: args.template,
            name: args.name,
            directory: args.directory,
            maven_group: args.maven_group,
            dsl: args.dsl,
            minecraft_version: args.minecraft_version,
            yarn_version: args.yarn_version,
            loader_version: args.loader_version,
            fabric_api_version: args.fabric_api_version,
            mod_version: args.mod_version,
            description: args.description,
            authors: args.authors,
            license: args.license,
            environment: args.environment,
            entrypoints: args.entrypoints,
            git: flag_pair(args.git, args.no_git),
            wrapper: flag_pair(args.wrapper, args.no_wrapper),
            skip_runtime_check: args.skip_runtime_check,
            yes: args.yes,
        }
    }
}

/// Diagnostics go to stderr and stay off unless RUST_LOG asks for them
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init();
}

async fn run_create(config: &FabricConfig, args: CreateArgs) -> Result<()> {
    let result = scaffolder_core::run(config, args, CLI_VERSION).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    init_logging();

    let args = Args::parse();
    let config = FabricConfig;

    match args.command {
        Some(Command::Create(create_args)) => run_create(&config, create_args.into()).await,
        Some(Command::Render(render_args)) => render::execute(render_args).await,
        // No subcommand provided, default to create behavior (interactive mode)
        None => run_create(&config, CreateArgs::default()).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scaffolder_core::project::ProjectLocation;
    use scaffolder_core::DependencyVersions;

    fn project(environment: ModEnvironment) -> ModProject {
        ModProject {
            location: ProjectLocation::new("ExampleMod", Path::new("/tmp")).unwrap(),
            maven_group: "com.example".to_string(),
            gradle_dsl: GradleDsl::Kotlin,
            versions: DependencyVersions {
                minecraft: "1.21".to_string(),
                yarn_mappings: "1.21+build.9".to_string(),
                fabric_loader: "0.16.5".to_string(),
                fabric_api: "0.102.0+1.21".to_string(),
            },
            mod_version: "0.1.0".to_string(),
            description: String::new(),
            authors: Vec::new(),
            license: "MIT".to_string(),
            environment,
            entrypoints: vec![EntryPoint::Main],
            git: false,
        }
    }

    #[test]
    fn test_next_steps_with_wrapper() {
        let dir = Path::new("/tmp/ExampleMod");
        let steps = FabricConfig.next_steps(dir, &project(ModEnvironment::Universal), true);
        assert_eq!(
            steps,
            vec![
                "cd /tmp/ExampleMod",
                "./gradlew build",
                "./gradlew runClient",
                "./gradlew runServer",
            ]
        );
    }

    #[test]
    fn test_next_steps_without_wrapper() {
        let dir = Path::new("/tmp/ExampleMod");
        let steps = FabricConfig.next_steps(dir, &project(ModEnvironment::Client), false);
        assert!(steps[1].starts_with("gradle wrapper --gradle-version"));
        assert_eq!(steps[2], "gradle build");
        assert_eq!(steps.last().map(String::as_str), Some("gradle runClient"));
        assert!(!steps.iter().any(|s| s.contains("runServer")));
    }

    #[test]
    fn test_flag_pair() {
        assert_eq!(flag_pair(true, false), Some(true));
        assert_eq!(flag_pair(false, true), Some(false));
        assert_eq!(flag_pair(false, false), None);
    }

    #[test]
    fn test_create_flags_parse() {
        let args = Args::try_parse_from([
            "fabric-tools",
            "create",
            "--name",
            "ExampleMod",
            "--dsl",
            "groovy",
            "--environment",
            "client",
            "--entrypoints",
            "main,client",
            "--authors",
            "Steve,Alex",
            "--no-git",
            "-y",
        ])
        .unwrap();

        let Some(Command::Create(create)) = args.command else {
            panic!("expected create subcommand");
        };
        let create: CreateArgs = create.into();
        assert_eq!(create.name.as_deref(), Some("ExampleMod"));
        assert_eq!(create.dsl, Some(GradleDsl::Groovy));
        assert_eq!(create.environment, Some(ModEnvironment::Client));
        assert_eq!(
            create.entrypoints,
            Some(vec![EntryPoint::Main, EntryPoint::Client])
        );
        assert_eq!(
            create.authors,
            Some(vec!["Steve".to_string(), "Alex".to_string()])
        );
        assert_eq!(create.git, Some(false));
        assert_eq!(create.wrapper, None);
        assert!(create.yes);
    }

    #[test]
    fn test_render_flags_parse() {
        let args = Args::try_parse_from([
            "fabric-tools",
            "render",
            "build.gradle.kts",
            "-p",
            "java_version=21",
            "--param",
            "mod_id=examplemod",
            "-o",
            "out.kts",
        ])
        .unwrap();

        let Some(Command::Render(render)) = args.command else {
            panic!("expected render subcommand");
        };
        assert_eq!(render.params.len(), 2);
        assert_eq!(render.output, Some(PathBuf::from("out.kts")));
    }

    #[test]
    fn test_git_flags_conflict() {
        assert!(Args::try_parse_from(["fabric-tools", "create", "--git", "--no-git"]).is_err());
    }
}
