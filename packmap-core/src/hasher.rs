use crate::error::{MapError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const READ_CHUNK: usize = 64 * 1024;

/// Streamed blake3 digest of a file's bytes, lowercase hex. Identical bytes
/// give identical output regardless of path or timestamps.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut f = File::open(path).map_err(|source| MapError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let mut hasher = blake3::Hasher::new();
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = f.read(&mut buf).map_err(|source| MapError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Digest of an in-memory buffer; matches `hash_file` for the same bytes.
pub fn hash_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}
