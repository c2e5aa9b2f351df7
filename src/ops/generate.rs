//! Implementation of `pbxgen generate`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::{IdAllocator, IdScheme, ProjectSpec, SourceFile};
use crate::ops::discover::{discover, DiscoverOptions};
use crate::pbxproj::{assign_ids, build_document, validate, writer, Document, SourceEntry};
use crate::util::diagnostic::suggestions;
use crate::util::fs::write_atomic;

/// Where the rendered project file goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Replace `<Name>.xcodeproj/project.pbxproj` under the root.
    #[default]
    Write,
    /// Return the contents without touching disk.
    DryRun,
}

/// Options for generating a project file.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub spec: ProjectSpec,
    pub scan: DiscoverOptions,
    pub ids: IdScheme,
    pub output: OutputMode,
}

/// A rendered, validated project file.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Discovered files with their identifiers, in discovery order.
    pub entries: Vec<SourceEntry>,
    pub document: Document,
    pub contents: String,
}

/// Result of a full generation run.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    pub manifest_path: PathBuf,
    pub rendered: Rendered,
    /// False for dry runs.
    pub written: bool,
}

/// Assign identifiers, build the document and validate it.
///
/// Nothing is written; a structural defect is returned as a
/// [`DocumentError`](crate::pbxproj::DocumentError).
pub fn render(spec: &ProjectSpec, files: &[SourceFile], scheme: IdScheme) -> Result<Rendered> {
    let mut alloc = IdAllocator::new(scheme);
    let entries = assign_ids(files, &mut alloc);
    let document = build_document(spec, &entries);

    validate(&document)?;

    let contents = writer::to_string(&document);
    tracing::debug!(
        "rendered {} objects ({} bytes)",
        document.objects().len(),
        contents.len()
    );

    Ok(Rendered {
        entries,
        document,
        contents,
    })
}

/// Replace the project file at `path` with `contents`.
///
/// The project bundle directory must already exist.
pub fn write_manifest(path: &Path, contents: &str) -> Result<()> {
    write_atomic(path, contents)
        .with_context(|| format!("failed to write project file {}", path.display()))
}

/// Discover sources under `root`, render the project file and write it.
///
/// The `<Name>.xcodeproj` bundle must already exist under `root`; it is never
/// created.
pub fn generate(root: &Path, opts: &GenerateOptions) -> Result<GenerateResult> {
    let files = discover(root, &opts.scan)?;
    let rendered = render(&opts.spec, &files, opts.ids)?;
    let manifest_path = opts.spec.manifest_path(root);

    let written = match opts.output {
        OutputMode::Write => {
            let bundle_dir = root.join(opts.spec.bundle_dir_name());
            if !bundle_dir.is_dir() {
                bail!(
                    "project bundle `{}` does not exist\n\
                     \n\
                     help: {}",
                    bundle_dir.display(),
                    suggestions::MISSING_BUNDLE
                );
            }
            write_manifest(&manifest_path, &rendered.contents)?;
            true
        }
        OutputMode::DryRun => false,
    };

    Ok(GenerateResult {
        manifest_path,
        rendered,
        written,
    })
}
