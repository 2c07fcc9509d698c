//! Wallet seed generation and the project's `.env` files.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use zeroize::Zeroize;

/// Random bytes behind a seed; hex doubles the length
pub const SEED_BYTES: usize = 32;
pub const SEED_PLACEHOLDER: &str = "your_64_character_wallet_seed_here";
pub const DEFAULT_NETWORK: &str = "testnet";
pub const DEFAULT_PROOF_SERVER_URL: &str = "http://127.0.0.1:6300";

/// 32 bytes from the OS CSPRNG, lowercase hex
pub fn generate_seed() -> Result<String> {
    let mut bytes = [0u8; SEED_BYTES];
    getrandom::fill(&mut bytes)
        .map_err(|e| anyhow!("Failed to read from the system random generator: {e}"))?;
    let seed = hex::encode(bytes);
    bytes.zeroize();
    Ok(seed)
}

/// Generate a seed and write `.env` plus `.env.example` into `project_path`.
///
/// Returns the seed so the caller can show a prefix of it.
pub fn generate(project_path: &Path, contract_name: &str) -> Result<String> {
    let seed = generate_seed()?;

    let env_path = project_path.join(".env");
    fs::write(&env_path, env_file(&seed, contract_name, Utc::now()))
        .with_context(|| format!("Failed to write {}", env_path.display()))?;

    let example_path = project_path.join(".env.example");
    fs::write(&example_path, env_example_file(contract_name))
        .with_context(|| format!("Failed to write {}", example_path.display()))?;

    Ok(seed)
}

fn env_file(seed: &str, contract_name: &str, generated_at: DateTime<Utc>) -> String {
    format!(
        "# Midnight Network Configuration
# Generated on {generated}

# Network Configuration
MIDNIGHT_NETWORK={DEFAULT_NETWORK}
PROOF_SERVER_URL={DEFAULT_PROOF_SERVER_URL}

# Wallet Configuration (KEEP PRIVATE!)
WALLET_SEED={seed}

# Contract Configuration
CONTRACT_NAME={contract_name}

# Development Settings
DEBUG_LEVEL=info
AUTO_START_PROOF_SERVER=true

# Security Warning:
# Keep your wallet seed private and secure!
# Never commit this file to version control.
# Add .env to your .gitignore file.
",
        generated = generated_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    )
}

fn env_example_file(contract_name: &str) -> String {
    format!(
        "# Midnight Network Configuration
# Copy this file to .env and fill in your values

# Network Configuration
MIDNIGHT_NETWORK={DEFAULT_NETWORK}
PROOF_SERVER_URL={DEFAULT_PROOF_SERVER_URL}

# Wallet Configuration (KEEP PRIVATE!)
WALLET_SEED={SEED_PLACEHOLDER}

# Contract Configuration
CONTRACT_NAME={contract_name}

# Development Settings
DEBUG_LEVEL=info
AUTO_START_PROOF_SERVER=true
"
    )
}

/// Value of `key` in a dotenv-style file body
pub fn env_value<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    content
        .lines()
        .filter(|line| !line.trim_start().starts_with('#'))
        .find_map(|line| {
            let (k, v) = line.split_once('=')?;
            (k.trim() == key).then(|| v.trim())
        })
}
