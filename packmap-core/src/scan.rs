use crate::classify::{self, Category};
use crate::entry::{build_entry, RemoteConfig};
use crate::error::{MapError, Result};
use crate::hasher;
use crate::manifest::{ModpackSection, ServerConfig, SERVER_CONFIG_FILE};
use crate::validate;
use globset::GlobSet;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};

fn load_server_config(modpack_root: &Path) -> Result<ServerConfig> {
    let path = modpack_root.join(SERVER_CONFIG_FILE);
    if !path.is_file() {
        return Err(MapError::MissingConfig {
            modpack_root: modpack_root.to_path_buf(),
        });
    }
    let f = File::open(&path).map_err(|source| MapError::FileRead {
        path: path.clone(),
        source,
    })?;
    let config: ServerConfig =
        serde_json::from_reader(f).map_err(|e| MapError::InvalidConfig {
            path: path.clone(),
            reason: e.to_string(),
        })?;
    validate::check_config(&config).map_err(|reason| MapError::InvalidConfig { path, reason })?;
    Ok(config)
}

/// Walk one modpack tree and assemble its manifest section.
///
/// Regular files only; symlinks are neither followed nor recorded. The
/// config file itself and anything matching `exclude` are skipped. Entries
/// land in their category lists sorted lexicographically by relative path,
/// so an unchanged tree always scans to an identical section.
pub fn scan_modpack(
    modpack_root: &Path,
    name: &str,
    remote: &RemoteConfig,
    exclude: &GlobSet,
) -> Result<ModpackSection> {
    let config = load_server_config(modpack_root)?;

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for ent in walkdir::WalkDir::new(modpack_root).min_depth(1) {
        let ent = ent?;
        if !ent.file_type().is_file() {
            continue;
        }
        let p = ent.path();
        // Walked from modpack_root, so relativization cannot fail; if it
        // ever does, stop rather than feed an absolute path onward.
        let rel = pathdiff::diff_paths(p, modpack_root).ok_or_else(|| MapError::FileRead {
            path: p.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::Other,
                "path is not relative to the modpack root",
            ),
        })?;
        let rel = rel.to_string_lossy().replace('\\', "/");
        if rel == SERVER_CONFIG_FILE {
            continue;
        }
        if exclude.is_match(&rel) {
            continue;
        }
        files.push((rel, p.to_path_buf()));
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    // Classify everything up front so a bad directory name aborts before any
    // hashing work is spent.
    let mut classified = Vec::with_capacity(files.len());
    for (rel, path) in files {
        let cls = classify::classify(&rel)?;
        classified.push((rel, path, cls));
    }

    // Parallel hashing; the pre-sorted order, not completion order, fixes
    // the output order.
    let hashes: Vec<Result<String>> = classified
        .par_iter()
        .map(|(_, path, _)| hasher::hash_file(path))
        .collect();

    let mut section = ModpackSection {
        config,
        main_data: Vec::new(),
        client_data: Vec::new(),
        server_data: Vec::new(),
        client_additional_data: BTreeMap::new(),
    };
    for ((rel, _, cls), hash) in classified.into_iter().zip(hashes) {
        let entry = build_entry(name, &rel, &cls, hash?, remote);
        match cls.category {
            Category::Main => section.main_data.push(entry),
            Category::Client => section.client_data.push(entry),
            Category::Server => section.server_data.push(entry),
            Category::ClientAdditional(bundle) => section
                .client_additional_data
                .entry(bundle)
                .or_default()
                .push(entry),
        }
    }
    Ok(section)
}
