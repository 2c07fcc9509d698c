//! Internal implementation for create command

pub mod guide;
pub mod prompt;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use create_mn_app::config::Config;
use create_mn_app::errors::Cancelled;
use create_mn_app::installers::compiler::{self, CompilerStatus};
use create_mn_app::installers::proof_server::{self, ProofServerStatus};
use create_mn_app::installers::{packages, wallet, PackageInstaller, PackageManager};
use create_mn_app::requirements::{self, COMPACT_INSTALL_COMMAND, MIN_NODE_MAJOR};
use create_mn_app::scaffold::registry::{self, DEFAULT_TEMPLATE};
use create_mn_app::scaffold::{Scaffold, Template, TemplateSource, TemplateVars};
use create_mn_app::validation::{validate_project_name, ProjectName};
use create_mn_app::{debug, git, paths, ui};

use super::{CreateAppOptions, CreateOutcome};

const DEFAULT_PROJECT_NAME: &str = "my-midnight-app";

/// Main execution logic for create command
pub fn execute_create(
    project_directory: Option<String>,
    options: CreateAppOptions,
    config: &Config,
) -> Result<CreateOutcome> {
    let directory = resolve_directory(project_directory, options.interactive)?;

    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let project_path = cwd.join(&directory);
    let project_name = project_name_from_path(&project_path)?;
    let name = validate_project_name(&project_name)?;

    let template = resolve_template(options.template.as_deref(), config, options.interactive)?;
    debug::log_data("Selected template", template);

    prepare_target(&project_path, &cwd, &directory, options.interactive)?;

    let package_manager = resolve_package_manager(options.package_manager, config, &cwd)?;
    debug::log(format!("Using package manager: {package_manager}"));

    println!(
        "Creating a new Midnight app in {}.\n",
        project_path.display().to_string().green()
    );

    let mut run = Run {
        project_path,
        package_manager,
        options,
        warnings: Vec::new(),
    };

    match template.source {
        TemplateSource::Bundled => run.bundled(template, &name, config)?,
        TemplateSource::Remote { repo, branch } => run.remote(template, repo, branch, &name)?,
    }

    Ok(CreateOutcome {
        project_path: run.project_path,
        template: template.name,
        package_manager: run.package_manager,
        warnings: run.warnings,
    })
}

/// Directory argument, or the answer to the name prompt
fn resolve_directory(project_directory: Option<String>, interactive: bool) -> Result<String> {
    if let Some(dir) = project_directory.filter(|d| !d.trim().is_empty()) {
        return Ok(dir);
    }

    if !interactive {
        bail!(
            "Please specify the project directory:\n  create-mn-app {}",
            "<project-directory>".cyan()
        );
    }

    prompt::text("What is your project named?", DEFAULT_PROJECT_NAME, |answer| {
        validate_project_name(answer)
            .map(|_| ())
            .map_err(|e| e.first_problem().to_string())
    })
}

/// The package name is the last component of the target path
fn project_name_from_path(project_path: &Path) -> Result<String> {
    project_path
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .with_context(|| format!("Cannot derive a project name from {}", project_path.display()))
}

/// Template from the flag, the config, a prompt, or the default; must be
/// available
fn resolve_template(
    requested: Option<&str>,
    config: &Config,
    interactive: bool,
) -> Result<&'static Template> {
    let name = match requested.or(config.default_template.as_deref()) {
        Some(name) => name.to_string(),
        None if interactive => select_template()?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    lookup_template(&name)
}

fn lookup_template(name: &str) -> Result<&'static Template> {
    let Some(template) = registry::get(name) else {
        let known: Vec<&str> = registry::all().iter().map(|t| t.name).collect();
        bail!(
            "Template \"{name}\" not found. Available templates: {}",
            known.join(", ")
        );
    };

    if template.coming_soon || !template.available {
        bail!(
            "Template \"{}\" is coming soon and not available yet. Try \"{DEFAULT_TEMPLATE}\" instead.",
            template.name
        );
    }
    Ok(template)
}

fn select_template() -> Result<String> {
    let available: Vec<&Template> = registry::available().collect();
    let choices: Vec<(&str, &str)> = available.iter().map(|t| (t.display, t.description)).collect();
    let default = available
        .iter()
        .position(|t| t.name == DEFAULT_TEMPLATE)
        .unwrap_or(0);

    let index = prompt::select("Which template would you like to use?", &choices, default)?;
    Ok(available[index].name.to_string())
}

/// Clear an existing target only after the user agrees
fn prepare_target(project_path: &Path, cwd: &Path, directory: &str, interactive: bool) -> Result<()> {
    if !project_path.exists() {
        return Ok(());
    }

    if project_path == cwd {
        bail!("Refusing to overwrite the current directory; choose a new project directory");
    }

    if !interactive {
        bail!(
            "Directory {} already exists. Remove it or choose a different name.",
            project_path.display()
        );
    }

    let question = format!("Directory {} already exists. Overwrite?", directory.cyan());
    if !prompt::confirm(&question, false)? {
        return Err(Cancelled.into());
    }

    let removed = if project_path.is_dir() {
        fs::remove_dir_all(project_path)
    } else {
        fs::remove_file(project_path)
    };
    removed.with_context(|| format!("Failed to remove {}", project_path.display()))
}

/// Flag, then config, then detection from the current directory
fn resolve_package_manager(
    requested: Option<PackageManager>,
    config: &Config,
    cwd: &Path,
) -> Result<PackageManager> {
    if let Some(pm) = requested {
        return Ok(pm);
    }
    if let Some(ref configured) = config.package_manager {
        return configured
            .parse()
            .context("Invalid package_manager in config file");
    }
    Ok(packages::detect(cwd))
}

/// State threaded through the stages of one create run
struct Run {
    project_path: PathBuf,
    package_manager: PackageManager,
    options: CreateAppOptions,
    warnings: Vec<String>,
}

impl Run {
    fn warn(&mut self, step: ui::Step, message: impl Into<String>) {
        let message = message.into();
        step.warn(&message);
        self.warnings.push(message);
    }

    fn bundled(&mut self, template: &Template, name: &ProjectName, config: &Config) -> Result<()> {
        let step = ui::Step::start("Creating project structure...");
        match self.materialize(template, name, config) {
            Ok(count) => step.succeed(format!("Project structure created ({count} files)")),
            Err(e) => {
                step.fail("Failed to create project structure");
                return Err(e);
            }
        }

        let step = ui::Step::start("Generating secure wallet...");
        match wallet::generate(&self.project_path, template.contract_name) {
            Ok(seed) => step.succeed(format!("Wallet generated (seed: {}...)", &seed[..8])),
            Err(e) => {
                step.fail("Failed to generate wallet");
                return Err(e);
            }
        }

        if !self.options.skip_install {
            self.check_node();
            self.install();
        }

        if !self.options.skip_git {
            self.init_git();
        }

        self.check_proof_server();

        if !self.options.skip_install {
            self.compile_contract();
        }

        let project_name = name.as_str().to_string();
        guide::print_success(&project_name, &self.project_path, self.package_manager);
        Ok(())
    }

    fn materialize(&self, template: &Template, name: &ProjectName, config: &Config) -> Result<usize> {
        let root = paths::templates_root(config.templates_dir.as_deref(), template.name)
            .with_context(|| {
                format!(
                    "Bundled template {} not found. Set {} to a directory containing it.",
                    template.name,
                    paths::TEMPLATES_ENV
                )
            })?;
        debug::log(format!("Templates root: {}", root.display()));

        let vars = TemplateVars::for_project(name, Utc::now());
        debug::log_data("Template variables", vars.as_map());

        let written = Scaffold::new(root).create_project(template.name, &self.project_path, &vars)?;
        Ok(written.len())
    }

    fn check_node(&mut self) {
        let node = requirements::check_node(MIN_NODE_MAJOR);
        if !node.found {
            let message = match node.version {
                Some(ref v) => format!("Node.js {v} found, {MIN_NODE_MAJOR}+ is required"),
                None => format!("Node.js {MIN_NODE_MAJOR}+ not found"),
            };
            ui::warning(&message);
            self.warnings.push(message);
            if let Some(fix) = node.remediation() {
                println!("{}", format!("  {fix}").dimmed());
            }
        }
    }

    fn install(&mut self) {
        let pm = self.package_manager;
        let step = ui::Step::start(format!("Installing dependencies with {pm}..."));
        match PackageInstaller::new(pm).install(&self.project_path) {
            Ok(()) => step.succeed("Dependencies installed"),
            Err(e) => {
                debug::log(format!("{e:#}"));
                self.warn(step, "Failed to install dependencies");
                println!(
                    "{}",
                    "\n⚠ You can install dependencies manually by running:".yellow()
                );
                println!("{}", format!("  {}", pm.install_command()).cyan());
            }
        }
    }

    fn init_git(&mut self) {
        let step = ui::Step::start("Initializing git repository...");
        match git::init_repository(&self.project_path) {
            Ok(()) => step.succeed("Git repository initialized"),
            Err(e) => {
                debug::log(format!("{e:#}"));
                self.warn(step, "Git repository initialization skipped");
            }
        }
    }

    fn check_proof_server(&mut self) {
        let step = ui::Step::start("Checking Docker for proof server...");
        match proof_server::verify() {
            ProofServerStatus::Ready => step.succeed("Docker is ready for proof server"),
            ProofServerStatus::ImageMissing => {
                self.warn(step, "Proof server image not pulled yet");
                println!("{}", format!("  {}", proof_server::pull_command()).cyan());
            }
            ProofServerStatus::DockerUnavailable => {
                self.warn(step, "Docker not available - install it to use proof server");
            }
        }
    }

    fn compile_contract(&mut self) {
        let pm = self.package_manager;
        let step = ui::Step::start("Compiling initial contract...");
        match PackageInstaller::new(pm).run_script(&self.project_path, "compile") {
            Ok(()) => step.succeed("Contract compiled successfully"),
            Err(e) => {
                debug::log(format!("{e:#}"));
                self.warn(
                    step,
                    format!(
                        "Contract compilation skipped - run \"{} compile\" manually",
                        pm.run_command()
                    ),
                );
            }
        }
    }

    fn remote(&mut self, template: &Template, repo: &str, branch: &str, name: &ProjectName) -> Result<()> {
        let mut checks = vec![
            requirements::check_git(),
            requirements::check_node(MIN_NODE_MAJOR),
            requirements::check_docker(),
        ];
        if template.requires_compiler {
            checks.push(requirements::check_compact_compiler());
        }
        if !requirements::display_results(&checks) {
            self.warnings.push("Some requirements are missing".to_string());
        }

        if let Some(required) = template.min_compiler_version {
            self.negotiate_compiler(
                required,
                compiler::status(required),
                |question| prompt::confirm(question, true),
                || compiler::update(required),
            )?;
        }

        let step = ui::Step::start(format!("Cloning {}...", template.display));
        match git::clone_template(repo, branch, &self.project_path) {
            Ok(()) => step.succeed(format!("Cloned {repo}")),
            Err(e) => {
                step.fail("Failed to clone template");
                return Err(e);
            }
        }
        guide::print_post_clone(template);

        if !self.options.skip_git {
            self.init_git();
        }

        guide::print_setup_guide(template, name.as_str(), self.package_manager);
        Ok(())
    }

    /// Offer to install or update the Compact compiler when `status` shows
    /// it missing or older than `required`
    fn negotiate_compiler<C, U>(
        &mut self,
        required: &str,
        status: CompilerStatus,
        confirm: C,
        update: U,
    ) -> Result<()>
    where
        C: FnOnce(&str) -> Result<bool>,
        U: FnOnce() -> Result<String>,
    {
        let question = match status {
            CompilerStatus::UpToDate { current } => {
                ui::success(format!("Compact compiler {current} meets the required {required}"));
                return Ok(());
            }
            CompilerStatus::Outdated { current, required } => {
                ui::warning(format!(
                    "Compact compiler {current} is older than the required {required}"
                ));
                "Update the Compact compiler now?"
            }
            CompilerStatus::Missing => {
                ui::warning("Compact compiler not found");
                "Install the Compact compiler now?"
            }
        };

        if self.options.interactive && confirm(question)? {
            let step = ui::Step::start("Running the Compact installer...");
            match update() {
                Ok(version) => {
                    step.succeed(format!("Compact compiler {version} installed"));
                    return Ok(());
                }
                Err(e) => {
                    debug::log(format!("{e:#}"));
                    self.warn(step, format!("Compact compiler update failed: {e}"));
                }
            }
        } else {
            self.warnings
                .push(format!("Compact compiler {required}+ is required"));
        }

        println!("{}", "  Install it manually with:".dimmed());
        println!("{}", format!("  {COMPACT_INSTALL_COMMAND}").cyan());
        println!();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run_with(interactive: bool) -> Run {
        Run {
            project_path: PathBuf::from("/tmp/unused"),
            package_manager: PackageManager::Npm,
            options: CreateAppOptions {
                interactive,
                ..CreateAppOptions::default()
            },
            warnings: Vec::new(),
        }
    }

    fn outdated() -> CompilerStatus {
        CompilerStatus::Outdated {
            current: "0.20.0".into(),
            required: "0.25.0".into(),
        }
    }

    #[test]
    fn test_compiler_warning_without_a_terminal() {
        for status in [outdated(), CompilerStatus::Missing] {
            let mut run = run_with(false);
            run.negotiate_compiler(
                "0.25.0",
                status,
                |_| panic!("no prompt without a terminal"),
                || panic!("no install without consent"),
            )
            .unwrap();
            assert_eq!(run.warnings, vec!["Compact compiler 0.25.0+ is required"]);
        }
    }

    #[test]
    fn test_declined_compiler_update_is_recorded() {
        let mut run = run_with(true);
        run.negotiate_compiler("0.25.0", outdated(), |_| Ok(false), || {
            panic!("declined update must not run")
        })
        .unwrap();
        assert_eq!(run.warnings, vec!["Compact compiler 0.25.0+ is required"]);
    }

    #[test]
    fn test_update_leaving_old_compiler_is_a_warning() {
        let mut run = run_with(true);
        run.negotiate_compiler(
            "0.25.0",
            outdated(),
            |question| {
                assert!(question.contains("Update"));
                Ok(true)
            },
            || bail!("Compact compiler is still at 0.20.0 after the installer ran"),
        )
        .unwrap();
        assert_eq!(run.warnings.len(), 1);
        assert!(run.warnings[0].starts_with("Compact compiler update failed"));
        assert!(run.warnings[0].contains("0.20.0"));
    }

    #[test]
    fn test_successful_compiler_install() {
        let mut run = run_with(true);
        run.negotiate_compiler(
            "0.25.0",
            CompilerStatus::Missing,
            |question| {
                assert!(question.contains("Install"));
                Ok(true)
            },
            || Ok("0.26.0".to_string()),
        )
        .unwrap();
        assert!(run.warnings.is_empty());
    }

    #[test]
    fn test_current_compiler_needs_nothing() {
        let mut run = run_with(true);
        run.negotiate_compiler(
            "0.25.0",
            CompilerStatus::UpToDate {
                current: "0.25.0".into(),
            },
            |_| panic!("no prompt for an up-to-date compiler"),
            || panic!("no install for an up-to-date compiler"),
        )
        .unwrap();
        assert!(run.warnings.is_empty());
    }

    #[test]
    fn test_cancelled_compiler_prompt_propagates() {
        let mut run = run_with(true);
        let err = run
            .negotiate_compiler("0.25.0", outdated(), |_| Err(Cancelled.into()), || {
                panic!("cancelled prompt must not install")
            })
            .unwrap_err();
        assert!(create_mn_app::errors::is_cancelled(&err));
    }

    #[test]
    fn test_project_name_from_path() {
        assert_eq!(
            project_name_from_path(Path::new("/work/my-app")).unwrap(),
            "my-app"
        );
        assert_eq!(
            project_name_from_path(Path::new("/work/nested/dapp/.")).unwrap(),
            "dapp"
        );
        assert!(project_name_from_path(Path::new("/work/..")).is_err());
    }

    #[test]
    fn test_missing_directory_is_fatal_without_a_terminal() {
        let err = resolve_directory(None, false).unwrap_err();
        assert!(err.to_string().contains("project directory"));

        assert_eq!(
            resolve_directory(Some("my-app".into()), false).unwrap(),
            "my-app"
        );
    }

    #[test]
    fn test_template_resolution_order() {
        let config = Config {
            default_template: Some("counter".into()),
            ..Config::default()
        };

        let from_flag = resolve_template(Some("hello-world"), &config, false).unwrap();
        assert_eq!(from_flag.name, "hello-world");

        let from_config = resolve_template(None, &config, false).unwrap();
        assert_eq!(from_config.name, "counter");

        let fallback = resolve_template(None, &Config::default(), false).unwrap();
        assert_eq!(fallback.name, DEFAULT_TEMPLATE);
    }

    #[test]
    fn test_unavailable_templates_are_rejected() {
        let unknown = lookup_template("nope").unwrap_err().to_string();
        assert!(unknown.contains("not found"));
        assert!(unknown.contains("hello-world"));

        let soon = lookup_template("dex").unwrap_err().to_string();
        assert!(soon.contains("coming soon"));
    }

    #[test]
    fn test_package_manager_resolution_order() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            package_manager: Some("yarn".into()),
            ..Config::default()
        };

        let explicit =
            resolve_package_manager(Some(PackageManager::Bun), &config, temp.path()).unwrap();
        assert_eq!(explicit, PackageManager::Bun);

        let configured = resolve_package_manager(None, &config, temp.path()).unwrap();
        assert_eq!(configured, PackageManager::Yarn);

        let bad = Config {
            package_manager: Some("cargo".into()),
            ..Config::default()
        };
        assert!(resolve_package_manager(None, &bad, temp.path()).is_err());
    }

    #[test]
    fn test_existing_target_refused_without_a_terminal() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("taken");
        fs::create_dir(&target).unwrap();

        let err = prepare_target(&target, temp.path(), "taken", false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(target.exists());

        let fresh = temp.path().join("fresh");
        assert!(prepare_target(&fresh, temp.path(), "fresh", false).is_ok());
    }

    #[test]
    fn test_current_directory_never_overwritten() {
        let temp = TempDir::new().unwrap();
        let err = prepare_target(temp.path(), temp.path(), ".", true).unwrap_err();
        assert!(err.to_string().contains("current directory"));
    }
}
