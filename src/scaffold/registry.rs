//! Known project templates.

use serde::Serialize;

/// Where a template's files come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TemplateSource {
    /// Shipped with the tool under the templates root
    Bundled,
    /// Shallow-cloned from GitHub (`owner/repo`)
    Remote {
        repo: &'static str,
        branch: &'static str,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct Template {
    pub name: &'static str,
    pub display: &'static str,
    pub description: &'static str,
    pub available: bool,
    pub coming_soon: bool,
    pub source: TemplateSource,
    pub requires_compiler: bool,
    /// Oldest Compact compiler the template builds with
    pub min_compiler_version: Option<&'static str>,
    /// Written as `CONTRACT_NAME` into the generated `.env`
    pub contract_name: &'static str,
}

impl Template {
    pub fn is_remote(&self) -> bool {
        matches!(self.source, TemplateSource::Remote { .. })
    }
}

pub const DEFAULT_TEMPLATE: &str = "hello-world";

pub const TEMPLATES: &[Template] = &[
    Template {
        name: "hello-world",
        display: "Hello World",
        description: "Simple starter template with basic contract deployment",
        available: true,
        coming_soon: false,
        source: TemplateSource::Bundled,
        requires_compiler: false,
        min_compiler_version: None,
        contract_name: "hello-world",
    },
    Template {
        name: "counter",
        display: "Counter",
        description: "Simple increment/decrement app demonstrating state management",
        available: true,
        coming_soon: false,
        source: TemplateSource::Remote {
            repo: "midnightntwrk/example-counter",
            branch: "main",
        },
        requires_compiler: true,
        min_compiler_version: Some("0.25.0"),
        contract_name: "counter",
    },
    Template {
        name: "bboard",
        display: "Bulletin Board (Bboard)",
        description: "Bulletin board with multi-user interactions and privacy patterns",
        available: false,
        coming_soon: true,
        source: TemplateSource::Remote {
            repo: "midnightntwrk/example-bboard",
            branch: "main",
        },
        requires_compiler: true,
        min_compiler_version: Some("0.25.0"),
        contract_name: "bboard",
    },
    Template {
        name: "dex",
        display: "Decentralized Exchange (DEX)",
        description: "Decentralized exchange using OpenZeppelin FungibleToken",
        available: false,
        coming_soon: true,
        source: TemplateSource::Bundled,
        requires_compiler: true,
        min_compiler_version: None,
        contract_name: "dex",
    },
    Template {
        name: "midnight-kitties",
        display: "Midnight Kitties",
        description: "Full stack DApp using NFT smart contract library (Crypto Kitties on Midnight)",
        available: false,
        coming_soon: true,
        source: TemplateSource::Bundled,
        requires_compiler: true,
        min_compiler_version: None,
        contract_name: "midnight-kitties",
    },
];

pub fn all() -> &'static [Template] {
    TEMPLATES
}

pub fn available() -> impl Iterator<Item = &'static Template> {
    TEMPLATES.iter().filter(|t| t.available)
}

pub fn get(name: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.name == name)
}
