use crate::entry::RemoteConfig;
use crate::error::{MapError, Result};
use crate::manifest::Manifest;
use crate::{merge, scan};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::PathBuf;

pub struct GenerateOptions {
    /// Directory whose immediate subdirectories are modpacks.
    pub modpacks_dir: PathBuf,
    pub remote: RemoteConfig,
    /// Globs (relative to each modpack root) to leave out of the manifest.
    pub exclude: Vec<String>,
}

#[derive(Debug)]
pub struct ModpackFailure {
    pub name: String,
    pub error: MapError,
}

/// Outcome of one repository pass. When `failures` is non-empty nothing may
/// be written; the manifest only covers the modpacks that scanned cleanly.
#[derive(Debug)]
pub struct GenerateReport {
    pub manifest: Manifest,
    pub failures: Vec<ModpackFailure>,
}

fn build_exclude(patterns: &[String]) -> Result<GlobSet> {
    let mut b = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| MapError::Pattern {
            pattern: pattern.clone(),
            source,
        })?;
        b.add(glob);
    }
    b.build().map_err(|source| MapError::Pattern {
        pattern: patterns.join(","),
        source,
    })
}

/// Scan every modpack under `modpacks_dir` and merge each against the
/// previous manifest. A failing modpack is recorded and the rest still get
/// scanned, so one run surfaces every problem; the caller decides that any
/// failure blocks validation and writing.
pub fn generate(opts: &GenerateOptions, previous: Option<&Manifest>) -> Result<GenerateReport> {
    let exclude = build_exclude(&opts.exclude)?;

    let rd = fs::read_dir(&opts.modpacks_dir).map_err(|source| MapError::FileRead {
        path: opts.modpacks_dir.clone(),
        source,
    })?;
    let mut names: Vec<String> = Vec::new();
    for ent in rd {
        let ent = ent.map_err(|source| MapError::FileRead {
            path: opts.modpacks_dir.clone(),
            source,
        })?;
        if !ent.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let name = ent.file_name().to_string_lossy().into_owned();
        // Dot-directories (.git and similar tooling state) are not modpacks.
        if name.starts_with('.') {
            continue;
        }
        names.push(name);
    }
    names.sort();

    let mut manifest = Manifest::new();
    let mut failures = Vec::new();
    for name in names {
        let root = opts.modpacks_dir.join(&name);
        match scan::scan_modpack(&root, &name, &opts.remote, &exclude) {
            Ok(fresh) => {
                let merged = merge::merge_section(previous.and_then(|m| m.get(&name)), fresh);
                manifest.insert(name, merged);
            }
            Err(error) => failures.push(ModpackFailure { name, error }),
        }
    }
    Ok(GenerateReport { manifest, failures })
}
