use anyhow::Result;
use clap::{ArgGroup, Parser};
use colored::Colorize;
use std::process;

use create_mn_app::config::Config;
use create_mn_app::errors::{self, is_cancelled};
use create_mn_app::installers::PackageManager;
use create_mn_app::scaffold::registry;
use create_mn_app::version::TOOL_VERSION;
use create_mn_app::{debug, update};

mod commands;

use commands::create::{self, CreateAppOptions};

#[derive(Parser)]
#[command(
    name = "create-mn-app",
    version = env!("CARGO_PKG_VERSION"),
    about = "Create a new Midnight Network application",
    long_about = None
)]
#[command(group(
    ArgGroup::new("package_manager")
        .args(["use_npm", "use_yarn", "use_pnpm", "use_bun"])
        .multiple(false)
))]
struct Cli {
    /// Directory name for your project
    project_directory: Option<String>,

    /// Template to use (hello-world, counter, bboard, dex, midnight-kitties)
    #[arg(short, long, value_name = "NAME")]
    template: Option<String>,

    /// Use npm explicitly
    #[arg(long)]
    use_npm: bool,

    /// Use yarn explicitly
    #[arg(long)]
    use_yarn: bool,

    /// Use pnpm explicitly
    #[arg(long)]
    use_pnpm: bool,

    /// Use bun explicitly
    #[arg(long)]
    use_bun: bool,

    /// Skip package installation
    #[arg(long)]
    skip_install: bool,

    /// Skip git repository initialization
    #[arg(long)]
    skip_git: bool,

    /// Show detailed output
    #[arg(long)]
    verbose: bool,

    /// List templates and exit
    #[arg(long)]
    list_templates: bool,
}

impl Cli {
    fn package_manager(&self) -> Option<PackageManager> {
        [
            (self.use_npm, PackageManager::Npm),
            (self.use_yarn, PackageManager::Yarn),
            (self.use_pnpm, PackageManager::Pnpm),
            (self.use_bun, PackageManager::Bun),
        ]
        .into_iter()
        .find_map(|(chosen, pm)| chosen.then_some(pm))
    }
}

fn main() {
    let cli = Cli::parse();
    if cli.verbose {
        debug::enable();
    }

    if let Err(e) = run(cli) {
        eprintln!();
        eprintln!("{}", errors::format_error(&e, Some("creating app")));
        if !is_cancelled(&e) {
            errors::suggest_solution(&e);
        }
        if debug::is_enabled() {
            eprintln!("{}", "Error chain:".dimmed());
            for cause in e.chain() {
                eprintln!("{}", format!("  {cause}").dimmed());
            }
            eprintln!();
        }
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.list_templates {
        list_templates();
        return Ok(());
    }

    println!("\n{}{}\n", "create-mn-app".cyan().bold(), format!(" v{TOOL_VERSION}").dimmed());

    let config = Config::load()?;
    debug::log_data("Loaded config", &config);

    let options = CreateAppOptions {
        template: cli.template.clone(),
        package_manager: cli.package_manager(),
        skip_install: cli.skip_install,
        skip_git: cli.skip_git,
        interactive: create::is_interactive(),
    };

    let outcome = create::execute(cli.project_directory, options, &config)?;
    debug::log(format!(
        "Created {} from {} using {} with {} warning(s)",
        outcome.project_path.display(),
        outcome.template,
        outcome.package_manager,
        outcome.warnings.len()
    ));

    update::notify(&config);
    Ok(())
}

fn list_templates() {
    println!("{}", "Available templates:\n".bold());
    for template in registry::all() {
        let status = if template.coming_soon || !template.available {
            "(coming soon)".yellow()
        } else if template.is_remote() {
            "(remote)".blue()
        } else {
            "(bundled)".green()
        };
        println!(
            "  {} {} {}",
            format!("{:<18}", template.name).cyan(),
            template.description,
            status
        );
    }
    println!();
}
