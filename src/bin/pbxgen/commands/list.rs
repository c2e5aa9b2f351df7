//! `pbxgen list` command

use anyhow::{Context, Result};

use crate::cli::ListArgs;
use crate::commands::{load_config, resolve_root};
use pbxgen::ops::discover;
use pbxgen::util::{Shell, Status};

pub fn execute(args: ListArgs, shell: &Shell) -> Result<()> {
    let root = resolve_root(args.scan.root.as_ref())?;
    let config = load_config(&root, args.scan.to_config())?;
    let files = discover(&root, &config.discover_options())?;

    if args.json || shell.is_json() {
        let json = serde_json::to_string_pretty(&files).context("failed to serialize file list")?;
        println!("{}", json);
        return Ok(());
    }

    for file in &files {
        println!("{}", file.path);
    }
    shell.status(
        Status::Found,
        format!("{} source file(s) under {}", files.len(), root.display()),
    );

    Ok(())
}
