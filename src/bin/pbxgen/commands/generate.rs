//! `pbxgen generate` command

use anyhow::Result;

use crate::cli::GenerateArgs;
use crate::commands::{load_config, resolve_root};
use pbxgen::core::SourceFile;
use pbxgen::ops::{generate, GenerateOptions, OutputMode};
use pbxgen::util::config::Config;
use pbxgen::util::diagnostic::suggestions;
use pbxgen::util::{Shell, Status};

/// The flags as a config layer that overrides the config files.
pub fn overrides(args: &GenerateArgs) -> Config {
    let mut config = args.scan.to_config();
    config.project.name = args.name.clone();
    config.scan.ids = args.ids;
    config
}

/// Options for the generate op; `--stdout` renders without writing.
pub fn options(args: &GenerateArgs, config: &Config) -> GenerateOptions {
    GenerateOptions {
        spec: config.project_spec(),
        scan: config.discover_options(),
        ids: config.id_scheme(),
        output: if args.stdout || args.dry_run {
            OutputMode::DryRun
        } else {
            OutputMode::Write
        },
    }
}

pub fn execute(args: GenerateArgs, shell: &Shell) -> Result<()> {
    let root = resolve_root(args.scan.root.as_ref())?;
    let config = load_config(&root, overrides(&args))?;
    let opts = options(&args, &config);

    // With --stdout, stdout carries the project file and nothing else.
    let emit_events = !args.stdout;

    shell.status(
        Status::Scanning,
        format!(
            "{} for `.{}` files ({} identifiers)",
            root.display(),
            opts.scan.extension.trim_start_matches('.'),
            opts.ids
        ),
    );

    let result = generate(&root, &opts)?;
    let entries = &result.rendered.entries;

    shell.status(Status::Found, format!("{} source file(s)", entries.len()));
    for entry in entries {
        shell.item(&entry.file.path);
        shell.verbose(
            Status::Info,
            format!("{} ref={} build={}", entry.file.path, entry.reference, entry.build),
        );
    }
    if entries.is_empty() {
        shell.warn(format!("no sources found; {}", suggestions::NO_SOURCES));
    }
    if emit_events {
        let files: Vec<&SourceFile> = entries.iter().map(|e| &e.file).collect();
        shell.json_event(&serde_json::json!({
            "reason": "sources-discovered",
            "root": root.display().to_string(),
            "files": files,
        }));
    }

    if args.stdout {
        print!("{}", result.rendered.contents);
        return Ok(());
    }

    if result.written {
        shell.status(Status::Wrote, result.manifest_path.display());
    } else {
        shell.status(
            Status::Skipped,
            format!("writing {} (dry run)", result.manifest_path.display()),
        );
    }

    shell.json_event(&serde_json::json!({
        "reason": "project-generated",
        "path": result.manifest_path.display().to_string(),
        "written": result.written,
        "sources": entries.len(),
    }));

    shell.status(Status::Finished, format!("project file for `{}`", opts.spec.name));
    shell.status(Status::Next, opts.spec.build_command(&config.destination()));

    Ok(())
}
