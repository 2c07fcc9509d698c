//! Template materialization: copy a template tree into a new project.
//!
//! Files ending in [`TEMPLATE_SUFFIX`] are rendered through
//! [`render::render`] and written without the suffix; everything else is
//! copied byte for byte. A few placeholder names become dotfiles, since
//! packaging tools tend to drop real dotfiles.

pub mod registry;
pub mod render;

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use registry::{Template, TemplateSource};
pub use render::TemplateVars;

/// Marks a file for variable substitution
pub const TEMPLATE_SUFFIX: &str = ".template";

/// Placeholder file names and the names they are written as
const RENAMES: &[(&str, &str)] = &[
    ("_gitignore", ".gitignore"),
    ("_npmrc", ".npmrc"),
    ("_dockerignore", ".dockerignore"),
    ("_env.template", ".env.example"),
];

pub struct Scaffold {
    templates_path: PathBuf,
}

impl Scaffold {
    pub fn new(templates_path: impl AsRef<Path>) -> Self {
        Self {
            templates_path: templates_path.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the named template
    pub fn template_dir(&self, template: &str) -> PathBuf {
        self.templates_path.join(template)
    }

    /// Materialize `template` into `project_path`.
    ///
    /// `project_path` is created if missing. Returns every written file,
    /// in walk order.
    pub fn create_project(
        &self,
        template: &str,
        project_path: &Path,
        vars: &TemplateVars,
    ) -> Result<Vec<PathBuf>> {
        let source = self.template_dir(template);
        if !source.is_dir() {
            bail!(
                "Template \"{}\" not found in {}",
                template,
                self.templates_path.display()
            );
        }

        fs::create_dir_all(project_path).with_context(|| {
            format!("Failed to create project directory {}", project_path.display())
        })?;

        copy_tree(&source, project_path, vars)
    }
}

/// Copy `source` into `target`, rendering template files along the way
pub fn copy_tree(source: &Path, target: &Path, vars: &TemplateVars) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for entry in WalkDir::new(source).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to read template {}", source.display()))?;
        let relative = entry.path().strip_prefix(source)?;

        if entry.file_type().is_dir() {
            let dir = target.join(relative);
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let parent = relative.parent().unwrap_or_else(|| Path::new(""));
        let dest = target.join(parent).join(output_name(&file_name));

        if file_name.ends_with(TEMPLATE_SUFFIX) {
            let content = fs::read_to_string(entry.path())
                .with_context(|| format!("Failed to read {}", entry.path().display()))?;
            fs::write(&dest, render::render(&content, vars))
                .with_context(|| format!("Failed to write {}", dest.display()))?;
        } else {
            fs::copy(entry.path(), &dest)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        }

        written.push(dest);
    }

    Ok(written)
}

/// Name a template file is written under
pub fn output_name(file_name: &str) -> String {
    if let Some((_, renamed)) = RENAMES.iter().find(|(from, _)| *from == file_name) {
        return (*renamed).to_string();
    }
    match file_name.strip_suffix(TEMPLATE_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_names() {
        assert_eq!(output_name("_gitignore"), ".gitignore");
        assert_eq!(output_name("_env.template"), ".env.example");
        assert_eq!(output_name("package.json.template"), "package.json");
        assert_eq!(output_name("README.md"), "README.md");
        assert_eq!(output_name(".template"), ".template");
        assert_eq!(output_name("my.template.ts"), "my.template.ts");
    }

    #[test]
    fn test_missing_template_fails() {
        let temp = TempDir::new().unwrap();
        let scaffold = Scaffold::new(temp.path());
        let err = scaffold
            .create_project("nope", &temp.path().join("out"), &TemplateVars::default())
            .unwrap_err();
        assert!(err.to_string().contains("Template \"nope\" not found"));
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn test_create_project_renders_and_copies() {
        let temp = TempDir::new().unwrap();
        let tpl = temp.path().join("templates/basic");
        fs::create_dir_all(tpl.join("src")).unwrap();
        fs::write(tpl.join("package.json.template"), "{\"name\":\"{{projectName}}\"}").unwrap();
        fs::write(tpl.join("_gitignore"), "node_modules\n").unwrap();
        fs::write(tpl.join("src/raw.ts"), "// {{projectName}} stays\n").unwrap();

        let mut vars = TemplateVars::default();
        vars.insert("projectName", "demo");

        let out = temp.path().join("demo");
        let written = Scaffold::new(temp.path().join("templates"))
            .create_project("basic", &out, &vars)
            .unwrap();

        assert_eq!(written.len(), 3);
        assert_eq!(
            fs::read_to_string(out.join("package.json")).unwrap(),
            "{\"name\":\"demo\"}"
        );
        assert_eq!(fs::read_to_string(out.join(".gitignore")).unwrap(), "node_modules\n");
        assert_eq!(
            fs::read_to_string(out.join("src/raw.ts")).unwrap(),
            "// {{projectName}} stays\n"
        );
        assert!(!out.join("package.json.template").exists());
    }
}
