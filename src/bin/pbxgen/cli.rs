//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use pbxgen::util::config::Config;
use pbxgen::util::shell::ColorChoice;
use pbxgen::IdScheme;

/// pbxgen - generate an Xcode project file from the Swift sources in a directory
#[derive(Parser)]
#[command(name = "pbxgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output format for status messages
    #[arg(long, global = true, value_enum, default_value_t = MessageFormat::Human)]
    pub message_format: MessageFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MessageFormat {
    Human,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan for sources and write <Name>.xcodeproj/project.pbxproj
    Generate(GenerateArgs),

    /// List the source files that would be added to the project
    List(ListArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Discovery flags shared by `generate` and `list`.
#[derive(Args, Debug, Clone, Default)]
pub struct ScanArgs {
    /// Directory to scan (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Source file extension to collect
    #[arg(long)]
    pub extension: Option<String>,

    /// Skip directories whose path contains this text
    #[arg(long)]
    pub exclude: Option<String>,

    /// Sort files by path instead of keeping directory traversal order
    #[arg(long)]
    pub sort: bool,
}

impl ScanArgs {
    /// The flags as a config layer that overrides the config files.
    pub fn to_config(&self) -> Config {
        let mut config = Config::default();
        config.scan.extension = self.extension.clone();
        config.scan.exclude = self.exclude.clone();
        if self.sort {
            config.scan.sort = Some(true);
        }
        config
    }
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Project, target and scheme name
    #[arg(long)]
    pub name: Option<String>,

    /// Identifier scheme: random (fresh every run) or stable (derived from paths)
    #[arg(long, env = "PBXGEN_IDS")]
    pub ids: Option<IdScheme>,

    /// Print the project file to stdout instead of writing it
    #[arg(long, conflicts_with = "dry_run")]
    pub stdout: bool,

    /// Do everything except writing the project file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub scan: ScanArgs,

    /// Print the file list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
