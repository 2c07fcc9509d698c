//! Docker readiness for the local proof server.

use serde::Serialize;
use std::process::Command;

pub const PROOF_SERVER_IMAGE: &str = "midnightnetwork/proof-server";
pub const PROOF_SERVER_PORT: u16 = 6300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofServerStatus {
    /// Docker answers and the image is present
    Ready,
    /// Docker answers but the image has not been pulled
    ImageMissing,
    DockerUnavailable,
}

/// Check Docker, then look for the proof server image
pub fn verify() -> ProofServerStatus {
    if !is_docker_available() {
        return ProofServerStatus::DockerUnavailable;
    }
    if is_image_available() {
        ProofServerStatus::Ready
    } else {
        ProofServerStatus::ImageMissing
    }
}

pub fn is_docker_available() -> bool {
    Command::new("docker")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn is_image_available() -> bool {
    match Command::new("docker")
        .args(["images", PROOF_SERVER_IMAGE])
        .output()
    {
        Ok(output) => {
            output.status.success() && image_listed(&String::from_utf8_lossy(&output.stdout))
        }
        Err(_) => false,
    }
}

/// `docker images <image>` prints only a header when nothing matches
fn image_listed(listing: &str) -> bool {
    listing.lines().skip(1).any(|line| line.contains(PROOF_SERVER_IMAGE))
}

/// Command that pulls the image
pub fn pull_command() -> String {
    format!("docker pull {PROOF_SERVER_IMAGE}")
}

/// Command that runs the proof server in the foreground
pub fn run_command(network: &str) -> String {
    format!(
        "docker run -p {PROOF_SERVER_PORT}:{PROOF_SERVER_PORT} {PROOF_SERVER_IMAGE} -- 'midnight-proof-server --network {network}'"
    )
}
