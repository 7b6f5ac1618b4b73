// CLI command definitions

use super::service::{DeleteCommand, InstallCommand, ScaleCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "runtime-kube",
    version,
    about = "Runtime service lifecycle tool for Kubernetes",
    long_about = "A standalone CLI tool for installing and managing runtime services on Kubernetes"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Install a runtime service into a namespace (creates or updates the resource)
    Install(InstallCommand),

    /// Scale an installed runtime service to a new replica count
    Scale(ScaleCommand),

    /// Delete a runtime service
    Delete(DeleteCommand),
}
