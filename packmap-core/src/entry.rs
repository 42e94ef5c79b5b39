use crate::classify::Classification;
use crate::manifest::FileEntry;

/// Remote-location configuration, passed in explicitly so runs are
/// reproducible with injected values.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    /// Prefix for download URLs, e.g. a raw-content repository URL.
    pub base_api_url: String,
    /// Optional key prefix in remote object storage.
    pub storage_prefix: Option<String>,
}

/// Join URL/key segments with single `/` separators.
fn join_segments(base: &str, segments: &[&str]) -> String {
    let mut out = base.trim_end_matches('/').to_string();
    for seg in segments {
        out.push('/');
        out.push_str(seg.trim_matches('/'));
    }
    out
}

/// Compose one manifest entry from a file's modpack-relative path (forward
/// slashes), its classification, and its content digest. Pure; no I/O.
pub fn build_entry(
    modpack: &str,
    rel_path: &str,
    classification: &Classification,
    hash: String,
    remote: &RemoteConfig,
) -> FileEntry {
    let file_name = rel_path.rsplit('/').next().unwrap_or(rel_path).to_string();
    let api_url = Some(join_segments(&remote.base_api_url, &[modpack, rel_path]));
    let object_storage_key = remote
        .storage_prefix
        .as_deref()
        .map(|prefix| join_segments(prefix, &[modpack, rel_path]));
    FileEntry {
        file_name,
        api_url,
        object_storage_key,
        hash,
        dist_file_path: rel_path.to_string(),
        install_on_client: classification.install_on_client,
        install_on_server: classification.install_on_server,
    }
}
