//! `{{variable}}` substitution for `.template` files.

use chrono::{DateTime, Datelike, Utc};
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::validation::ProjectName;

/// Variables available to template files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars(BTreeMap<String, String>);

impl TemplateVars {
    /// Standard variables for a new project created at `now`
    pub fn for_project(name: &ProjectName, now: DateTime<Utc>) -> Self {
        let mut vars = Self::default();
        vars.insert("projectName", name.as_str());
        vars.insert("capitalizedName", name.capitalized());
        vars.insert("kebabName", name.kebab());
        vars.insert("snakeName", name.snake());
        vars.insert("pascalName", name.pascal());
        vars.insert("timestamp", now.to_rfc3339());
        vars.insert("year", now.year().to_string());
        vars
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

/// Replace every `{{ key }}` in `content`. Unknown keys render empty.
pub fn render(content: &str, vars: &TemplateVars) -> String {
    static VAR_RE: OnceLock<Regex> = OnceLock::new();
    let re = VAR_RE.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("variable pattern is valid")
    });

    re.replace_all(content, |caps: &Captures| {
        vars.get(&caps[1]).unwrap_or("").to_string()
    })
    .into_owned()
}
