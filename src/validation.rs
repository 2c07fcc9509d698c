//! Project name rules (npm package-name compatible).

use std::fmt;

const MAX_NAME_LENGTH: usize = 214;
const BLOCKLIST: &[&str] = &["node_modules", "favicon.ico"];
const SPECIAL_CHARS: &[char] = &['~', '\'', '!', '(', ')', '*'];

/// A project name that passed [`validate_project_name`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

/// Rejected project name with every problem found, most important first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidProjectName {
    pub name: String,
    pub problems: Vec<String>,
}

impl fmt::Display for InvalidProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid project name \"{}\": {}",
            self.name,
            self.first_problem()
        )
    }
}

impl std::error::Error for InvalidProjectName {}

impl InvalidProjectName {
    /// Message shown when an interactive prompt rejects input
    pub fn first_problem(&self) -> &str {
        self.problems
            .first()
            .map(String::as_str)
            .unwrap_or("Invalid project name")
    }
}

/// Validate `name` against npm package-name rules.
///
/// Problems are ordered: hard errors first, then legacy-name warnings, then
/// the two project-specific checks (empty, uppercase).
pub fn validate_project_name(name: &str) -> Result<ProjectName, InvalidProjectName> {
    let mut problems = Vec::new();

    if name.is_empty() {
        problems.push("name length must be greater than zero".to_string());
    }
    if name.starts_with('.') {
        problems.push("name cannot start with a period".to_string());
    }
    if name.starts_with('_') {
        problems.push("name cannot start with an underscore".to_string());
    }
    if name.trim() != name {
        problems.push("name cannot contain leading or trailing spaces".to_string());
    }
    if BLOCKLIST.iter().any(|blocked| blocked.eq_ignore_ascii_case(name)) {
        problems.push(format!("{} is a blocklisted name", name.to_lowercase()));
    }
    if !name.is_empty() && !is_url_friendly(name) {
        problems.push("name can only contain URL-friendly characters".to_string());
    }

    // npm treats these as "warnings" but rejects them for new packages
    if name.len() > MAX_NAME_LENGTH {
        problems.push(format!(
            "name can no longer contain more than {MAX_NAME_LENGTH} characters"
        ));
    }
    if name.to_lowercase() != name {
        problems.push("name can no longer contain capital letters".to_string());
    }
    if name.contains(SPECIAL_CHARS) {
        problems.push("name can no longer contain special characters (\"~'!()*\")".to_string());
    }

    if problems.is_empty() {
        return Ok(ProjectName(name.to_string()));
    }

    if name.is_empty() {
        problems.push("Project name cannot be empty".to_string());
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        problems.push("Project name cannot contain uppercase letters".to_string());
    }

    Err(InvalidProjectName {
        name: name.to_string(),
        problems,
    })
}

// Characters encodeURIComponent leaves untouched, minus the special set
// reported separately above.
fn is_url_friendly(name: &str) -> bool {
    name.chars().all(|c| {
        c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') || SPECIAL_CHARS.contains(&c)
    })
}

impl ProjectName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First character uppercased: `my-app` → `My-app`
    pub fn capitalized(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Lowercase with whitespace runs as hyphens
    pub fn kebab(&self) -> String {
        self.0
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }

    /// `my-app.v2` → `my_app_v2`
    pub fn snake(&self) -> String {
        self.words().join("_")
    }

    /// `my-app` → `MyApp`
    pub fn pascal(&self) -> String {
        self.words()
            .iter()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect()
    }

    fn words(&self) -> Vec<&str> {
        self.0
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
