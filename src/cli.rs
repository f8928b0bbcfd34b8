use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "autodeploy",
    version,
    about = "Decide which web applications in a directory are ready to deploy",
    long_about = "Autodeploy inspects a monitored directory of .war archives and exploded \
                  application directories, decides which entries are deployable, and \
                  resolves each one into a context path plus deployment options."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new config file
    Init(InitArgs),

    /// Evaluate every entry of the monitored directory once
    Scan(ScanArgs),

    /// Evaluate a single directory entry
    Check(CheckArgs),

    /// Resolve a deployable unit into a deployment descriptor
    Resolve(ResolveArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Path for the config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Path to the config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory to scan (overrides the config's monitored_dir)
    #[arg(long)]
    pub dir: Option<PathBuf>,

    /// Directory of explicit context descriptors (overrides the config)
    #[arg(long)]
    pub contexts: Option<String>,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Directory containing the entry
    pub dir: PathBuf,

    /// Entry name inside the directory
    pub name: String,

    /// Directory of explicit context descriptors
    #[arg(long)]
    pub contexts: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Path of the archive or exploded directory
    pub path: PathBuf,

    /// Path to the config file supplying deployment options
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Extract the archive before deploying
    #[arg(long)]
    pub extract: bool,

    /// Give the parent class loader priority
    #[arg(long)]
    pub parent_first: bool,

    /// Defaults descriptor to apply
    #[arg(long)]
    pub defaults: Option<PathBuf>,
}
