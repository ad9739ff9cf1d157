//! The weave command-line driver.
//!
//! Provides the `weavec` command with the following subcommands:
//!
//! - `weavec synth <manifest>` - Run a synthesis pass for every type in a
//!   weave.toml manifest and print the generated aspects
//! - `weavec names <manifest>` - Show the method name each operation
//!   resolves to, and what happened to it
//!
//! Options (synth):
//! - `--json` - Print one JSON object per type; diagnostics become JSON too
//! - `--out-dir` - Write each aspect to `<dir>/<package path>/<Aspect>.aj`
//! - `--type` - Only process the named type
//! - `--no-color` - Disable colorized diagnostics
//!
//! Logging goes to stderr and is controlled by `WEAVE_LOG` (default `warn`).

mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use weave_common::{MetadataId, TypeRef};
use weave_meta::{MemberRegistry, PluralRegistry};
use weave_synth::diagnostics::{render_diagnostic, DiagnosticOptions};
use weave_synth::{ItdTypeDetails, JsonOperation, MethodSpec, Outcome, SynthesisPass, Synthesizer};

use crate::manifest::{Manifest, TypeEntry};

#[derive(Parser)]
#[command(name = "weavec", version, about = "The weave JSON method synthesizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the JSON methods for the types in a manifest
    Synth {
        /// Path to the weave.toml manifest
        manifest: PathBuf,

        /// Output one JSON object per type (and JSON diagnostics) instead of aspect text
        #[arg(long)]
        json: bool,

        /// Write aspects to this directory instead of stdout
        #[arg(long = "out-dir", conflicts_with = "json")]
        out_dir: Option<PathBuf>,

        /// Only process this type (qualified or simple name)
        #[arg(long = "type")]
        type_name: Option<String>,

        /// Disable colorized output
        #[arg(long = "no-color")]
        no_color: bool,
    },
    /// Print the resolved method name of every operation
    Names {
        /// Path to the weave.toml manifest
        manifest: PathBuf,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Synth {
            manifest,
            json,
            out_dir,
            type_name,
            no_color,
        } => {
            let diag_opts = DiagnosticOptions {
                color: !no_color && !json,
                json,
            };
            synth(
                &manifest,
                type_name.as_deref(),
                out_dir.as_deref(),
                &diag_opts,
            )
        }
        Commands::Names { manifest } => names(&manifest),
    };

    match result {
        Ok(true) => {}
        // Failures were already reported per operation.
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("WEAVE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run one pass for `entry` against the manifest's declared members and
/// plurals.
fn run_pass(
    manifest: &Manifest,
    registry: &MemberRegistry,
    plurals: &PluralRegistry,
    entry: &TypeEntry,
) -> anyhow::Result<SynthesisPass> {
    let synthesizer = Synthesizer::builder()
        .governor(entry.name.clone())
        .introspection(registry)
        .naming(plurals)
        .config(&entry.json)
        .profile(manifest.serializer.clone())
        .path(entry.path)
        .build()
        .with_context(|| format!("cannot synthesize {}", entry.name))?;
    Ok(synthesizer.synthesize())
}

fn selected<'m>(
    manifest: &'m Manifest,
    type_name: Option<&str>,
) -> anyhow::Result<Vec<&'m TypeEntry>> {
    match type_name {
        None => Ok(manifest.types.iter().collect()),
        Some(name) => match manifest.find_type(name) {
            Some(entry) => Ok(vec![entry]),
            None => bail!("no type named `{}` in the manifest", name),
        },
    }
}

/// Returns `Ok(false)` if any operation failed.
fn synth(
    manifest_path: &Path,
    type_name: Option<&str>,
    out_dir: Option<&Path>,
    diag_opts: &DiagnosticOptions,
) -> anyhow::Result<bool> {
    let manifest = Manifest::from_file(manifest_path)?;
    let registry = manifest.registry();
    let plurals = manifest.plurals();
    let mut clean = true;

    for entry in selected(&manifest, type_name)? {
        let pass = run_pass(&manifest, &registry, &plurals, entry)?;
        let origin = format!("{} [{}]", manifest_path.display(), entry.name);
        for err in pass.errors() {
            clean = false;
            eprintln!("{}", render_diagnostic(err, &origin, diag_opts));
        }

        let outcomes: Vec<OutcomeReport> =
            pass.outcomes().iter().map(OutcomeReport::from).collect();
        let itd = pass.into_itd();

        if diag_opts.json {
            let report = TypeReport::new(&itd, outcomes);
            println!("{}", serde_json::to_string(&report)?);
        } else if let Some(dir) = out_dir {
            if itd.is_empty() {
                tracing::info!(governor = %itd.governor(), "nothing generated, no aspect written");
                continue;
            }
            let path = write_aspect(dir, &itd)?;
            println!("wrote {}", path.display());
        } else {
            print!("{}", itd.render_aspect());
        }
    }

    Ok(clean)
}

fn write_aspect(dir: &Path, itd: &ItdTypeDetails) -> anyhow::Result<PathBuf> {
    let aspect = itd.aspect_name();
    let mut target = dir.to_path_buf();
    if let Some(package) = aspect.package() {
        target.extend(package.split('.'));
    }
    std::fs::create_dir_all(&target)
        .with_context(|| format!("failed to create {}", target.display()))?;
    let path = target.join(format!("{}.aj", aspect.simple_name()));
    std::fs::write(&path, itd.render_aspect())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Returns `Ok(false)` if any operation failed.
fn names(manifest_path: &Path) -> anyhow::Result<bool> {
    let manifest = Manifest::from_file(manifest_path)?;
    let registry = manifest.registry();
    let plurals = manifest.plurals();
    let mut clean = true;

    for entry in &manifest.types {
        let pass = run_pass(&manifest, &registry, &plurals, entry)?;
        println!("{}", entry.name);
        for outcome in pass.outcomes() {
            let shown = match &outcome.outcome {
                Outcome::Disabled => "(disabled)".to_string(),
                Outcome::Overridden(handle) => format!("{} (declared)", handle.name),
                Outcome::Generated(spec) => spec.name().to_string(),
                Outcome::Failed(err) => {
                    clean = false;
                    format!("error: {}", err)
                }
            };
            println!("  {:<14} {}", outcome.operation.label(), shown);
        }
    }

    Ok(clean)
}

// ── JSON output ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TypeReport<'a> {
    #[serde(rename = "type")]
    ty: &'a TypeRef,
    declared_by: &'a MetadataId,
    aspect: &'a TypeRef,
    imports: Vec<&'a str>,
    methods: &'a [MethodSpec],
    outcomes: Vec<OutcomeReport>,
}

impl<'a> TypeReport<'a> {
    fn new(itd: &'a ItdTypeDetails, outcomes: Vec<OutcomeReport>) -> Self {
        TypeReport {
            ty: itd.governor(),
            declared_by: itd.declared_by(),
            aspect: itd.aspect_name(),
            imports: itd.imports().collect(),
            methods: itd.methods(),
            outcomes,
        }
    }
}

#[derive(Serialize)]
struct OutcomeReport {
    operation: JsonOperation,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<String>,
}

impl From<&weave_synth::OperationOutcome> for OutcomeReport {
    fn from(outcome: &weave_synth::OperationOutcome) -> Self {
        let (status, method) = match &outcome.outcome {
            Outcome::Disabled => ("disabled", None),
            Outcome::Overridden(handle) => ("overridden", Some(handle.name.clone())),
            Outcome::Generated(spec) => ("generated", Some(spec.name().to_string())),
            Outcome::Failed(_) => ("failed", None),
        };
        OutcomeReport {
            operation: outcome.operation,
            status,
            method,
        }
    }
}
