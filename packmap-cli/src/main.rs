use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use packmap_core::entry::RemoteConfig;
use packmap_core::generate::{generate, GenerateOptions};
use packmap_core::manifest::{Manifest, ModpackSection};
use packmap_core::{hasher, validate, writer};

#[derive(Parser)]
#[command(name = "packmap", version, about = "modpack manifest generator")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Scan modpacks and regenerate the manifest
    Generate {
        /// Directory whose subdirectories are modpacks
        /// (dot-directories such as .git are skipped)
        #[arg(long, default_value = "modpacks")]
        modpacks: PathBuf,
        /// Base URL the launcher downloads files from
        #[arg(long)]
        base_api_url: String,
        /// Optional object-storage key prefix
        #[arg(long)]
        storage_prefix: Option<String>,
        /// Manifest file to read and write
        #[arg(long, default_value = "map.json")]
        map: PathBuf,
        /// Globs (relative to a modpack root) to skip
        #[arg(long)]
        exclude: Vec<String>,
        /// Exit with status 1 when the manifest had to be rewritten
        /// (pre-commit hook mode)
        #[arg(long, default_value_t = false)]
        check: bool,
    },
    /// Schema-validate an existing manifest
    Validate { map: PathBuf },
    /// Print the digest the manifest would record for a file
    Hash { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Generate { modpacks, base_api_url, storage_prefix, map, exclude, check } => {
            run_generate(modpacks, base_api_url, storage_prefix, &map, exclude, check)
        }
        Cmd::Validate { map } => run_validate(&map),
        Cmd::Hash { file } => {
            let digest = hasher::hash_file(&file)?;
            println!("{digest}");
            Ok(())
        }
    }
}

fn section_file_count(section: &ModpackSection) -> usize {
    section.main_data.len()
        + section.client_data.len()
        + section.server_data.len()
        + section
            .client_additional_data
            .values()
            .map(Vec::len)
            .sum::<usize>()
}

fn manifest_file_count(manifest: &Manifest) -> usize {
    manifest.values().map(section_file_count).sum()
}

fn run_generate(
    modpacks: PathBuf,
    base_api_url: String,
    storage_prefix: Option<String>,
    map: &PathBuf,
    exclude: Vec<String>,
    check: bool,
) -> Result<()> {
    let previous = writer::load(map).context("load previous manifest")?;
    let opts = GenerateOptions {
        modpacks_dir: modpacks,
        remote: RemoteConfig { base_api_url, storage_prefix },
        exclude,
    };
    let report = generate(&opts, previous.as_ref())?;

    if !report.failures.is_empty() {
        for f in &report.failures {
            eprintln!("error: modpack {}: {}", f.name, f.error);
        }
        bail!(
            "{} modpack(s) failed; {} not written",
            report.failures.len(),
            map.display()
        );
    }
    validate::validate(&report.manifest)?;

    for (name, section) in &report.manifest {
        println!("{name}: {} files", section_file_count(section));
    }

    let new_json = writer::to_canonical_json(&report.manifest)?;
    let old_json = match &previous {
        Some(m) => Some(writer::to_canonical_json(m)?),
        None => None,
    };
    if old_json.as_deref() == Some(new_json.as_str()) {
        println!("{} up to date", map.display());
        return Ok(());
    }
    writer::write_atomic(&report.manifest, map)?;
    println!("wrote {}", map.display());
    if check {
        // Hook semantics: fail the commit so the regenerated manifest can
        // be staged.
        std::process::exit(1);
    }
    Ok(())
}

fn run_validate(map: &PathBuf) -> Result<()> {
    let manifest = writer::load(map)?
        .with_context(|| format!("{} does not exist", map.display()))?;
    validate::validate(&manifest)?;
    println!(
        "OK: {} modpack(s), {} file(s)",
        manifest.len(),
        manifest_file_count(&manifest)
    );
    Ok(())
}
