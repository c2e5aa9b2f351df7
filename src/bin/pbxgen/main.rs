//! pbxgen CLI - generate an Xcode project file from a source tree

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pbxgen::util::Shell;
use pbxgen::DocumentError;

mod cli;
mod commands;

use cli::{Cli, Commands, MessageFormat};

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("pbxgen=debug")
    } else {
        EnvFilter::new("pbxgen=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(
        cli.quiet,
        cli.verbose,
        cli.color,
        cli.message_format == MessageFormat::Json,
    );

    if let Err(e) = run(cli.command, &shell) {
        if let Some(doc_err) = e.downcast_ref::<DocumentError>() {
            eprint!("{}", doc_err.to_diagnostic().format(shell.use_color()));
        } else if shell.is_json() {
            shell.error(format!("{:#}", e));
        } else {
            eprintln!("error: {:#}", e);
        }
        std::process::exit(1);
    }
}

fn run(command: Commands, shell: &Shell) -> Result<()> {
    match command {
        Commands::Generate(args) => commands::generate::execute(args, shell),
        Commands::List(args) => commands::list::execute(args, shell),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
