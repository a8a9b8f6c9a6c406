//! Charm-style CLI prompts using cliclack

use crate::product::ProductConfig;
use crate::project::{
    naming, EntryPoint, GradleDsl, ModEnvironment, ModProject, ProjectLocation, DEFAULT_LICENSE,
    DEFAULT_MAVEN_GROUP, DEFAULT_MOD_NAME, DEFAULT_MOD_VERSION,
};
use crate::runtime::check::{self, Runtime, RuntimeInfo};
use crate::runtime::tool::java_tool;
use crate::scaffold::{self, git, wrapper, ScaffoldOutcome};
use crate::templates::{
    version, RenderWarning, TemplateFetcher, TemplateManifest, TemplateSource,
};
use crate::versions::{DependencyVersions, VersionManager};
use anyhow::{Context, Result};
use std::future::Future;
use std::path::{Path, PathBuf};

/// Longest version list offered in a select prompt; older versions need a flag
const MAX_VERSION_CHOICES: usize = 15;

const DEFAULT_DESCRIPTION: &str = "A Fabric mod";

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the bundled ones
    pub template_dir: Option<PathBuf>,

    /// Template name to use
    pub template: Option<String>,

    /// Mod name (also the main class name)
    pub name: Option<String>,

    /// Directory the project folder is created in
    pub directory: Option<PathBuf>,

    pub maven_group: Option<String>,
    pub dsl: Option<GradleDsl>,

    pub minecraft_version: Option<String>,
    pub yarn_version: Option<String>,
    pub loader_version: Option<String>,
    pub fabric_api_version: Option<String>,

    pub mod_version: Option<String>,
    pub description: Option<String>,
    pub authors: Option<Vec<String>>,
    pub license: Option<String>,
    pub environment: Option<ModEnvironment>,

    /// Entrypoints to generate; `main` is always added
    pub entrypoints: Option<Vec<EntryPoint>>,

    /// Initialize a git repository
    pub git: Option<bool>,

    /// Generate the Gradle wrapper with a local Gradle
    pub wrapper: Option<bool>,

    /// Skip the Java/Git/Gradle report
    pub skip_runtime_check: bool,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

/// Run the CLI with interactive prompts
pub async fn run<C: ProductConfig>(config: &C, args: CreateArgs, cli_version: &str) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Report Java, Git and Gradle
    let runtimes = if args.skip_runtime_check {
        cliclack::log::info("Skipping runtime check")?;
        Vec::new()
    } else {
        let runtimes = report_runtimes()?;
        if !handle_missing_java(&runtimes, &args)? {
            return Ok(());
        }
        runtimes
    };

    // Step 2: Setup template fetcher
    let mut fetcher = setup_fetcher(config, &args)?;

    // Step 3: Select template
    let (template_name, manifest) = select_template(&mut fetcher, args.template.as_deref()).await?;

    if let Some(warning) =
        version::check_compatibility(cli_version, &manifest.version, config.upgrade_command())
    {
        cliclack::log::warning(format!("Version warning: {}", warning))?;
    }

    // Step 4: Mod name and location
    let location = select_location(&args)?;

    // Step 5: Build setup
    let maven_group = select_maven_group(&args)?;
    let gradle_dsl = select_dsl(&args)?;

    // Step 6: Dependency versions
    let versions = select_versions(config, &args).await?;

    // Step 7: Mod details
    let mod_version = text_or_prompt(
        args.mod_version.as_deref(),
        "Mod version",
        DEFAULT_MOD_VERSION,
        args.yes,
    )?;
    let description = text_or_prompt(
        args.description.as_deref(),
        "Description",
        DEFAULT_DESCRIPTION,
        args.yes,
    )?;
    let authors = select_authors(&args)?;
    let license = text_or_prompt(args.license.as_deref(), "License", DEFAULT_LICENSE, args.yes)?;
    let environment = select_environment(&args)?;
    let entrypoints = select_entrypoints(&args, environment)?;

    // Step 8: Post-creation steps
    let git = select_git(&args)?;
    let gradle_available = find_runtime(&runtimes, Runtime::Gradle)
        .map(|r| r.available)
        .unwrap_or_else(|| check::check_gradle().available);
    let generate_wrapper = select_wrapper(&args, gradle_available)?;

    let project = ModProject {
        location,
        maven_group,
        gradle_dsl,
        versions,
        mod_version,
        description,
        authors,
        license,
        environment,
        entrypoints,
        git,
    };

    warn_on_old_java(&runtimes, &project)?;

    // Step 9: Create project
    let outcome = create_project(&mut fetcher, &template_name, &manifest, &project).await?;

    let has_wrapper = generate_wrapper && run_wrapper(&outcome.project_dir).await?;

    if project.git {
        cliclack::log::step("Initializing git repository")?;
        match git::create_repo(&outcome.project_dir).await {
            Ok(()) => cliclack::log::success("Created git repository")?,
            Err(e) => cliclack::log::warning(format!(
                "{:#}\nThe project files were kept; initialize git manually.",
                e
            ))?,
        }
    }

    // Step 10: Show next steps
    print_next_steps(config, &outcome.project_dir, &project, has_wrapper)?;

    Ok(())
}

fn report_runtimes() -> Result<Vec<RuntimeInfo>> {
    let spinner = cliclack::spinner();
    spinner.start("Checking runtimes...");

    let runtimes = check::check_runtimes_with_advisory(
        &[],
        &[Runtime::Java, Runtime::Git, Runtime::Gradle],
    )?;

    let runtime_info: Vec<String> = runtimes
        .iter()
        .map(|r| {
            if r.available {
                format!(
                    "{} ({})",
                    r.runtime,
                    r.version.as_deref().unwrap_or("unknown")
                )
            } else {
                format!("{} (not installed)", r.runtime)
            }
        })
        .collect();
    spinner.stop(format!("Detected runtimes: {}", runtime_info.join(", ")));

    Ok(runtimes)
}

fn find_runtime(runtimes: &[RuntimeInfo], runtime: Runtime) -> Option<&RuntimeInfo> {
    runtimes.iter().find(|r| r.runtime == runtime)
}

/// Returns false when the user chose to stop and install Java first
fn handle_missing_java(runtimes: &[RuntimeInfo], args: &CreateArgs) -> Result<bool> {
    let java_missing = find_runtime(runtimes, Runtime::Java).is_some_and(|r| !r.available);
    if !java_missing {
        return Ok(true);
    }

    let tool = java_tool();
    cliclack::log::warning(format!(
        "{} is not installed. It is needed to build the mod.",
        tool.config().display_name
    ))?;

    if args.yes {
        cliclack::log::info(format!(
            "Continuing without {} (--yes mode)",
            tool.config().display_name
        ))?;
        return Ok(true);
    }

    let action: &str = cliclack::select("What would you like to do?")
        .item(
            "docs",
            format!("Open installation guide ({})", tool.config().docs_url),
            "",
        )
        .item(
            "skip",
            format!("Continue without {}", tool.config().display_name),
            "",
        )
        .interact()?;

    if action == "docs" {
        tool.open_docs()?;
        cliclack::outro(format!(
            "After installing {}, run this command again.",
            tool.config().display_name
        ))?;
        return Ok(false);
    }

    Ok(true)
}

fn setup_fetcher<C: ProductConfig>(config: &C, args: &CreateArgs) -> Result<TemplateFetcher> {
    let fetcher = TemplateFetcher::from_config(config, args.template_dir.clone());

    match fetcher.source() {
        TemplateSource::Local(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?
        }
        TemplateSource::Embedded => cliclack::log::info("Using bundled templates")?,
    }

    Ok(fetcher)
}

async fn select_template(
    fetcher: &mut TemplateFetcher,
    specified_template: Option<&str>,
) -> Result<(String, TemplateManifest)> {
    let spinner = cliclack::spinner();
    spinner.start("Loading templates...");

    let root_manifest = match fetcher.fetch_root_manifest().await {
        Ok(manifest) => manifest,
        Err(e) => {
            spinner.stop("Failed to load templates");
            return Err(e);
        }
    };

    // If a template was specified via --template flag, use it directly
    if let Some(template_name) = specified_template {
        if !root_manifest.templates.iter().any(|t| t == template_name) {
            spinner.stop("Failed to load templates");
            anyhow::bail!(
                "Template '{}' not found. Available templates: {}",
                template_name,
                root_manifest.templates.join(", ")
            );
        }

        let manifest = fetcher.fetch_template_manifest(template_name).await?;
        spinner.stop(format!(
            "Template: {} - {}",
            manifest.name, manifest.description
        ));
        return Ok((template_name.to_string(), manifest));
    }

    let mut templates: Vec<(String, TemplateManifest)> = Vec::new();
    for template_name in &root_manifest.templates {
        let manifest = fetcher.fetch_template_manifest(template_name).await?;
        templates.push((template_name.clone(), manifest));
    }

    spinner.stop("Templates loaded");

    // If only one template, use it automatically
    if templates.len() == 1 {
        if let Some((name, manifest)) = templates.pop() {
            cliclack::log::info(format!(
                "Using template: {} - {}",
                manifest.name, manifest.description
            ))?;
            return Ok((name, manifest));
        }
    }

    if templates.is_empty() {
        anyhow::bail!("No templates found.");
    }

    let mut select = cliclack::select("Select a template");
    for (idx, (_, manifest)) in templates.iter().enumerate() {
        select = select.item(idx, &manifest.name, &manifest.description);
    }
    let selected_idx: usize = select.interact()?;

    templates
        .into_iter()
        .nth(selected_idx)
        .context("Selected template is out of range")
}

fn select_location(args: &CreateArgs) -> Result<ProjectLocation> {
    let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let base_dir = match &args.directory {
        Some(dir) if dir.is_absolute() => dir.clone(),
        Some(dir) => current_dir.join(dir),
        None => current_dir,
    };

    if !base_dir.is_dir() {
        anyhow::bail!("Directory does not exist: {}", base_dir.display());
    }

    let location = match (&args.name, args.yes) {
        (Some(name), _) => ProjectLocation::new(name, &base_dir)?,
        (None, true) => ProjectLocation::new(DEFAULT_MOD_NAME, &base_dir)?,
        (None, false) => {
            let validate_dir = base_dir.clone();
            let input: String = cliclack::input("What's the name of your Fabric mod?")
                .placeholder(DEFAULT_MOD_NAME)
                .default_input(DEFAULT_MOD_NAME)
                .validate(move |input: &String| {
                    ProjectLocation::new(input, &validate_dir)
                        .map(|_| ())
                        .map_err(|e| e.to_string())
                })
                .interact()?;
            ProjectLocation::new(&input, &base_dir)?
        }
    };

    cliclack::log::info(format!("Project directory: {}", location.path.display()))?;

    // Warn if directory exists and has files
    if has_entries(&location.path) {
        cliclack::log::warning(format!(
            "'{}' already exists and is not empty. Existing files may be overwritten.",
            location.path.display()
        ))?;

        // Auto-confirm with --yes flag
        let confirm = if args.yes {
            true
        } else {
            cliclack::confirm("Use it anyway?")
                .initial_value(false)
                .interact()?
        };

        if !confirm {
            anyhow::bail!("Setup cancelled.");
        }
    }

    Ok(location)
}

fn has_entries(path: &Path) -> bool {
    std::fs::read_dir(path)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

fn select_maven_group(args: &CreateArgs) -> Result<String> {
    if let Some(group) = &args.maven_group {
        naming::validate_maven_group(group)?;
        return Ok(group.clone());
    }
    if args.yes {
        return Ok(DEFAULT_MAVEN_GROUP.to_string());
    }

    let group: String = cliclack::input("Maven group")
        .placeholder(DEFAULT_MAVEN_GROUP)
        .default_input(DEFAULT_MAVEN_GROUP)
        .validate(|input: &String| {
            naming::validate_maven_group(input).map_err(|e| e.to_string())
        })
        .interact()?;
    Ok(group)
}

fn select_dsl(args: &CreateArgs) -> Result<GradleDsl> {
    if let Some(dsl) = args.dsl {
        return Ok(dsl);
    }
    if args.yes {
        return Ok(GradleDsl::Kotlin);
    }

    let mut select = cliclack::select("Gradle build script language");
    for dsl in GradleDsl::ALL {
        select = select.item(dsl, dsl.display_name(), dsl.build_file());
    }
    Ok(select.initial_value(GradleDsl::Kotlin).interact()?)
}

async fn select_versions<C: ProductConfig>(
    config: &C,
    args: &CreateArgs,
) -> Result<DependencyVersions> {
    // Everything given on the command line: no network needed
    if let (Some(minecraft), Some(yarn), Some(loader), Some(api)) = (
        &args.minecraft_version,
        &args.yarn_version,
        &args.loader_version,
        &args.fabric_api_version,
    ) {
        return Ok(DependencyVersions {
            minecraft: minecraft.clone(),
            yarn_mappings: yarn.clone(),
            fabric_loader: loader.clone(),
            fabric_api: api.clone(),
        });
    }

    let manager = VersionManager::from_config(config)?;

    let minecraft = match &args.minecraft_version {
        Some(version) => version.clone(),
        None => {
            let versions = with_spinner(
                "Fetching Minecraft versions...",
                "Minecraft versions loaded",
                manager.stable_minecraft_versions(),
            )
            .await?;
            choose_version("Minecraft version", &versions, args.yes)?
        }
    };

    let (yarn_versions, loader_versions, api_versions) = with_spinner(
        &format!("Resolving versions for Minecraft {}...", minecraft),
        "Versions loaded",
        async {
            tokio::try_join!(
                fetch_unless(
                    args.yarn_version.is_some(),
                    manager.compatible_yarn_versions(&minecraft)
                ),
                fetch_unless(
                    args.loader_version.is_some(),
                    manager.stable_loader_versions()
                ),
                fetch_unless(
                    args.fabric_api_version.is_some(),
                    manager.compatible_fabric_api_versions(&minecraft)
                ),
            )
        },
    )
    .await?;

    let yarn_mappings = match &args.yarn_version {
        Some(version) => version.clone(),
        None if yarn_versions.is_empty() => {
            anyhow::bail!("No Yarn mappings found for Minecraft {}", minecraft)
        }
        None => choose_version("Yarn mappings", &yarn_versions, args.yes)?,
    };
    let fabric_loader = match &args.loader_version {
        Some(version) => version.clone(),
        None if loader_versions.is_empty() => anyhow::bail!("No stable Fabric Loader found"),
        None => choose_version("Fabric Loader version", &loader_versions, args.yes)?,
    };
    let fabric_api = match &args.fabric_api_version {
        Some(version) => version.clone(),
        None if api_versions.is_empty() => {
            anyhow::bail!("No Fabric API release found for Minecraft {}", minecraft)
        }
        None => choose_version("Fabric API version", &api_versions, args.yes)?,
    };

    Ok(DependencyVersions {
        minecraft,
        yarn_mappings,
        fabric_loader,
        fabric_api,
    })
}

async fn with_spinner<T>(
    start: &str,
    done: &str,
    task: impl Future<Output = Result<T>>,
) -> Result<T> {
    let spinner = cliclack::spinner();
    spinner.start(start);

    match task.await {
        Ok(value) => {
            spinner.stop(done);
            Ok(value)
        }
        Err(e) => {
            spinner.stop("Failed to fetch versions");
            Err(e)
        }
    }
}

async fn fetch_unless(
    skip: bool,
    fetch: impl Future<Output = Result<Vec<String>>>,
) -> Result<Vec<String>> {
    if skip {
        Ok(Vec::new())
    } else {
        fetch.await
    }
}

/// Pick from a newest-first list; `--yes` takes the newest
fn choose_version(prompt: &str, versions: &[String], yes: bool) -> Result<String> {
    let latest = versions
        .first()
        .with_context(|| format!("No {} available", prompt))?;

    if yes {
        cliclack::log::info(format!("{}: {}", prompt, latest))?;
        return Ok(latest.clone());
    }

    let mut select = cliclack::select(prompt);
    for (idx, version) in versions.iter().take(MAX_VERSION_CHOICES).enumerate() {
        select = select.item(version.clone(), version, if idx == 0 { "latest" } else { "" });
    }
    Ok(select.interact()?)
}

fn text_or_prompt(value: Option<&str>, prompt: &str, default: &str, yes: bool) -> Result<String> {
    if let Some(value) = value {
        return Ok(value.to_string());
    }
    if yes {
        return Ok(default.to_string());
    }

    let input: String = cliclack::input(prompt)
        .placeholder(default)
        .default_input(default)
        .interact()?;
    Ok(input)
}

fn select_authors(args: &CreateArgs) -> Result<Vec<String>> {
    if let Some(authors) = &args.authors {
        return Ok(clean_authors(authors.iter().map(String::as_str)));
    }
    if args.yes {
        return Ok(Vec::new());
    }

    let input: String = cliclack::input("Authors (comma-separated)")
        .placeholder("Steve, Alex")
        .required(false)
        .interact()?;
    Ok(clean_authors(input.split(',')))
}

fn clean_authors<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    names
        .into_iter()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn select_environment(args: &CreateArgs) -> Result<ModEnvironment> {
    if let Some(environment) = args.environment {
        return Ok(environment);
    }
    if args.yes {
        return Ok(ModEnvironment::Universal);
    }

    let mut select = cliclack::select("Where does the mod run?");
    for environment in ModEnvironment::ALL {
        select = select.item(environment, environment.display_name(), environment.as_str());
    }
    Ok(select.initial_value(ModEnvironment::Universal).interact()?)
}

fn select_entrypoints(args: &CreateArgs, environment: ModEnvironment) -> Result<Vec<EntryPoint>> {
    if let Some(entrypoints) = &args.entrypoints {
        return Ok(with_main_entrypoint(entrypoints.iter().copied()));
    }

    let extras: Vec<EntryPoint> = EntryPoint::ALL
        .into_iter()
        .filter(|e| *e != EntryPoint::Main && environment.supports(*e))
        .collect();

    if args.yes || extras.is_empty() {
        return Ok(vec![EntryPoint::Main]);
    }

    let mut multi = cliclack::multiselect("Additional entrypoints (optional)");
    for entrypoint in &extras {
        multi = multi.item(*entrypoint, entrypoint.display_name(), entrypoint.key());
    }
    let selected: Vec<EntryPoint> = multi.required(false).interact()?;

    Ok(with_main_entrypoint(selected))
}

/// Add the main entrypoint and sort into a stable order
fn with_main_entrypoint(entrypoints: impl IntoIterator<Item = EntryPoint>) -> Vec<EntryPoint> {
    let mut all: Vec<EntryPoint> = std::iter::once(EntryPoint::Main)
        .chain(entrypoints)
        .collect();
    all.sort();
    all.dedup();
    all
}

fn select_git(args: &CreateArgs) -> Result<bool> {
    let wanted = match args.git {
        Some(git) => git,
        None if args.yes => true,
        None => cliclack::confirm("Initialize a git repository?")
            .initial_value(true)
            .interact()?,
    };

    if wanted {
        if let Err(e) = check::check_runtimes(&[Runtime::Git]) {
            cliclack::log::warning(format!("{}\nSkipping the git repository.", e))?;
            return Ok(false);
        }
    }

    Ok(wanted)
}

fn select_wrapper(args: &CreateArgs, gradle_available: bool) -> Result<bool> {
    if !gradle_available {
        if args.wrapper == Some(true) {
            cliclack::log::warning("Gradle is not installed, skipping the Gradle wrapper.")?;
        }
        return Ok(false);
    }

    match args.wrapper {
        Some(wrapper) => Ok(wrapper),
        None if args.yes => Ok(true),
        None => Ok(cliclack::confirm("Generate the Gradle wrapper (gradlew)?")
            .initial_value(true)
            .interact()?),
    }
}

fn warn_on_old_java(runtimes: &[RuntimeInfo], project: &ModProject) -> Result<()> {
    let required = project.java_version()?;
    let installed = find_runtime(runtimes, Runtime::Java).and_then(RuntimeInfo::java_major);

    if let Some(installed) = installed {
        if installed < u32::from(required) {
            cliclack::log::warning(format!(
                "Minecraft {} needs Java {}, but Java {} is installed.",
                project.versions.minecraft, required, installed
            ))?;
        }
    }

    Ok(())
}

async fn create_project(
    fetcher: &mut TemplateFetcher,
    template_name: &str,
    manifest: &TemplateManifest,
    project: &ModProject,
) -> Result<ScaffoldOutcome> {
    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let outcome = match scaffold::create_project(fetcher, template_name, manifest, project).await {
        Ok(outcome) => outcome,
        Err(e) => {
            spinner.stop("Failed to create project");
            return Err(e);
        }
    };

    spinner.stop(format!(
        "Created {} files in {}",
        outcome.files.len(),
        outcome.project_dir.display()
    ));

    for name in &outcome.unused_parameters {
        cliclack::log::warning(RenderWarning::UnusedParameter(name.clone()).to_string())?;
    }

    Ok(outcome)
}

/// Returns whether the wrapper ended up in the project
async fn run_wrapper(project_dir: &Path) -> Result<bool> {
    cliclack::log::step(format!(
        "Generating Gradle wrapper ({})",
        wrapper::GRADLE_VERSION
    ))?;

    match wrapper::generate(project_dir).await {
        Ok(()) => {
            cliclack::log::success("Gradle wrapper generated")?;
            Ok(true)
        }
        Err(e) => {
            cliclack::log::warning(format!(
                "{:#}\nContinuing without the Gradle wrapper.",
                e
            ))?;
            Ok(false)
        }
    }
}

fn print_next_steps<C: ProductConfig>(
    config: &C,
    project_dir: &Path,
    project: &ModProject,
    has_wrapper: bool,
) -> Result<()> {
    let steps = config.next_steps(project_dir, project, has_wrapper);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro(format!("Happy modding! Docs: {}", config.docs_url()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_entrypoint_always_present() {
        assert_eq!(
            with_main_entrypoint([EntryPoint::Server, EntryPoint::Client, EntryPoint::Server]),
            vec![EntryPoint::Main, EntryPoint::Client, EntryPoint::Server]
        );
        assert_eq!(with_main_entrypoint([]), vec![EntryPoint::Main]);
    }

    #[test]
    fn test_clean_authors() {
        assert_eq!(
            clean_authors(" Steve, ,Alex ".split(',')),
            vec!["Steve".to_string(), "Alex".to_string()]
        );
        assert!(clean_authors("".split(',')).is_empty());
    }

    #[test]
    fn test_has_entries() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!has_entries(dir.path()));
        assert!(!has_entries(&dir.path().join("missing")));

        std::fs::write(dir.path().join("file.txt"), "x").unwrap();
        assert!(has_entries(dir.path()));
    }

    #[test]
    fn test_find_runtime() {
        let runtimes = vec![RuntimeInfo {
            runtime: Runtime::Gradle,
            version: Some("Gradle 8.10.2".to_string()),
            available: true,
        }];
        assert!(find_runtime(&runtimes, Runtime::Gradle).is_some());
        assert!(find_runtime(&runtimes, Runtime::Java).is_none());
    }

    #[test]
    fn test_wrapper_skipped_without_gradle() {
        let args = CreateArgs {
            wrapper: Some(false),
            ..Default::default()
        };
        assert!(!select_wrapper(&args, false).unwrap());
        assert!(!select_wrapper(&args, true).unwrap());
    }
}
