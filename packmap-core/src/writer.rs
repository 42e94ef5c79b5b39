use crate::error::{MapError, Result};
use crate::manifest::Manifest;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Load a previous manifest; `None` when the file does not exist yet.
pub fn load(path: &Path) -> Result<Option<Manifest>> {
    let f = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(MapError::FileRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let manifest = serde_json::from_reader(f).map_err(|source| MapError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(manifest))
}

/// Canonical serialized form: pretty JSON with BTreeMap key order and fixed
/// struct field order, plus a trailing newline. Equal manifests always
/// serialize to equal bytes.
pub fn to_canonical_json(manifest: &Manifest) -> Result<String> {
    let mut json = serde_json::to_string_pretty(manifest).map_err(MapError::Serialize)?;
    json.push('\n');
    Ok(json)
}

fn tmp_path(dest: &Path) -> PathBuf {
    let file_name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "map.json".to_string());
    let dir = dest.parent().filter(|p| !p.as_os_str().is_empty());
    dir.unwrap_or_else(|| Path::new("."))
        .join(format!(".{file_name}.tmp"))
}

fn write_file(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(bytes)?;
    f.sync_all()
}

/// Serialize and write via a temp file in the destination directory, then
/// rename into place. On failure the previous file is left untouched and
/// the temp file is removed.
pub fn write_atomic(manifest: &Manifest, dest: &Path) -> Result<()> {
    let json = to_canonical_json(manifest)?;
    let tmp = tmp_path(dest);
    if let Err(source) = write_file(&tmp, json.as_bytes()) {
        let _ = fs::remove_file(&tmp);
        return Err(MapError::Write {
            path: dest.to_path_buf(),
            source,
        });
    }
    if let Err(source) = fs::rename(&tmp, dest) {
        let _ = fs::remove_file(&tmp);
        return Err(MapError::Write {
            path: dest.to_path_buf(),
            source,
        });
    }
    Ok(())
}
