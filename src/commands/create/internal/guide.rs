//! Post-creation guidance printed to the console

use colored::Colorize;
use std::path::Path;

use create_mn_app::installers::proof_server;
use create_mn_app::installers::wallet::DEFAULT_NETWORK;
use create_mn_app::installers::PackageManager;
use create_mn_app::scaffold::Template;
use create_mn_app::ui;

const DOCS_URL: &str = "https://docs.midnight.network";
const FAUCET_URL: &str = "https://midnight.network/test-faucet";

/// Scripts every bundled template defines, with what they do
const SCRIPTS: &[(&str, &str)] = &[
    ("setup", "Compile contract, build, and deploy"),
    ("cli", "Interactive CLI to test your contract"),
    ("compile", "Compile Compact contracts"),
    ("build", "Build TypeScript to JavaScript"),
];

/// `(command line, description)` for each script, spelled for `pm`
pub fn available_commands(pm: PackageManager) -> Vec<(String, &'static str)> {
    SCRIPTS
        .iter()
        .map(|(script, description)| (format!("{} {script}", pm.run_command()), *description))
        .collect()
}

/// Success banner with next steps for a bundled template
pub fn print_success(project_name: &str, project_path: &Path, pm: PackageManager) {
    let rule = ui::rule();

    println!();
    println!("{}", rule.green().bold());
    println!("{}", "🎉 Success! Your Midnight app is ready.".green().bold());
    println!("{}", rule.green().bold());
    println!();
    println!("{}", "📂 Project created at:".bold());
    println!("   {}", project_path.display().to_string().cyan());
    println!();
    println!("{}", "🚀 Next Steps:".bold());
    println!();
    println!("{} Navigate to your project:", "  1.".yellow());
    println!("     {}", format!("cd {project_name}").cyan());
    println!();
    println!("{} Start the development server:", "  2.".yellow());
    println!("     {}", format!("{} dev", pm.run_command()).cyan());
    println!(
        "{}",
        "     (Starts proof server + watches for file changes)".dimmed()
    );
    println!();
    println!("{}", "📚 Available Commands:".bold());
    println!();
    for (command, description) in available_commands(pm) {
        println!("  {}", command.cyan());
        println!("{}", format!("    {description}").dimmed());
        println!();
    }
    println!("{}", rule.green().bold());
    println!();
    print_tips();
}

fn print_tips() {
    println!("{}", "💡 Tips:".magenta());
    println!("{}", "   • Make sure Docker is running for the proof server".dimmed());
    println!("{}", "   • Check .env for your wallet seed and network config".dimmed());
    println!("{}", format!("   • Visit {DOCS_URL} for documentation").dimmed());
    println!();
    println!("Happy coding! {}", "🌙✨".yellow());
    println!();
}

/// Shown right after a remote template has been cloned
pub fn print_post_clone(template: &Template) {
    println!();
    ui::success("Successfully cloned example project!");
    println!();
    if template.requires_compiler {
        ui::warning("This project requires the Compact compiler to be installed.");
        println!("{}", "  Follow the setup instructions below to install it.".dimmed());
        println!();
    }
}

/// Template-specific setup instructions for remote templates
pub fn print_setup_guide(template: &Template, project_name: &str, pm: PackageManager) {
    if !template.is_remote() {
        return;
    }

    println!();
    println!("{}", "📚 Setup Instructions\n".blue().bold());

    match template.name {
        "counter" => print_counter_guide(project_name, pm),
        _ => {
            println!("{} Navigate to your project:", "1.".yellow());
            println!("   {}", format!("cd {project_name}").cyan());
            println!();
            println!("{} Install dependencies:", "2.".yellow());
            println!("   {}", pm.install_command().cyan());
            println!();
            print_full_guide_hint();
        }
    }
}

fn print_counter_guide(project_name: &str, pm: PackageManager) {
    let run = pm.run_command();

    println!("{}", "📂 Project Structure:".bold());
    println!("{}", "  contract/     - Smart contract in Compact language".dimmed());
    println!("{}", "  counter-cli/  - Command-line interface".dimmed());
    println!();

    println!("{}", "🚀 Getting Started:\n".bold());

    println!("{} Navigate to your project:", "1.".yellow());
    println!("   {}", format!("cd {project_name}").cyan());
    println!();

    println!("{} Install dependencies:", "2.".yellow());
    println!("   {}", pm.install_command().cyan());
    println!();

    println!("{} Compile the smart contract:", "3.".yellow());
    println!("   {}", format!("cd contract && {run} compact").cyan());
    println!("{}", "   (First time may download ~500MB of ZK parameters)".dimmed());
    println!();

    println!("{} Build the project:", "4.".yellow());
    println!("   {}", format!("{run} build").cyan());
    println!("   {}", format!("cd ../counter-cli && {run} build").cyan());
    println!();

    println!("{} Start the proof server (in a new terminal):", "5.".yellow());
    println!("   {}", proof_server::run_command(DEFAULT_NETWORK).cyan());
    println!("{}", "   Keep this running!".dimmed());
    println!();

    println!("{} Run the Counter DApp:", "6.".yellow());
    println!("   {}", format!("cd counter-cli && {run} start-testnet-remote").cyan());
    println!();

    println!("{}", "💡 Important Notes:\n".magenta().bold());
    println!("{}", "  • You'll need to create a wallet and fund it from the faucet".dimmed());
    println!("{}", format!("  • Testnet faucet: {FAUCET_URL}").dimmed());
    println!("{}", "  • Funding takes 2-3 minutes to process".dimmed());
    println!();

    print_full_guide_hint();
}

fn print_full_guide_hint() {
    println!("{}", "📖 Full Guide:".bold());
    println!("{}", "  See README.md for detailed instructions and troubleshooting".dimmed());
    println!();
}
