pub mod config;
pub mod debug;
pub mod errors;
pub mod git;
pub mod installers;
pub mod paths;
pub mod requirements;
pub mod scaffold;
pub mod ui;
pub mod update;
pub mod validation;
pub mod version;

// Re-export commonly used types
pub use installers::PackageManager;
pub use scaffold::{Scaffold, Template, TemplateVars};
pub use validation::{validate_project_name, ProjectName};
