//! Side-effecting setup steps for a new project: wallet, packages,
//! proof server readiness and compiler updates.

pub mod compiler;
pub mod packages;
pub mod proof_server;
pub mod wallet;

pub use packages::{PackageInstaller, PackageManager};
