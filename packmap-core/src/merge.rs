use crate::manifest::{FileEntry, ModpackSection};
use std::collections::HashMap;

/// Merge a freshly scanned section with its previous manifest section.
///
/// The fresh scan is authoritative for membership: entries for removed files
/// are dropped, new files are added as-is. Where a file survives with an
/// unchanged hash, the previous entry's `api_url` and `object_storage_key`
/// are kept verbatim, since they record where the bytes were actually
/// published; a changed hash means a re-upload, so the fresh fields win
/// wholesale. Config always comes from the fresh scan. Idempotent.
pub fn merge_section(previous: Option<&ModpackSection>, mut fresh: ModpackSection) -> ModpackSection {
    let Some(prev) = previous else {
        return fresh;
    };
    merge_list(&prev.main_data, &mut fresh.main_data);
    merge_list(&prev.client_data, &mut fresh.client_data);
    merge_list(&prev.server_data, &mut fresh.server_data);
    for (bundle, list) in fresh.client_additional_data.iter_mut() {
        if let Some(prev_list) = prev.client_additional_data.get(bundle) {
            merge_list(prev_list, list);
        }
    }
    fresh
}

fn merge_list(previous: &[FileEntry], fresh: &mut [FileEntry]) {
    let by_path: HashMap<&str, &FileEntry> = previous
        .iter()
        .map(|e| (e.dist_file_path.as_str(), e))
        .collect();
    for entry in fresh.iter_mut() {
        if let Some(prev) = by_path.get(entry.dist_file_path.as_str()) {
            if prev.hash == entry.hash {
                entry.api_url = prev.api_url.clone();
                entry.object_storage_key = prev.object_storage_key.clone();
            }
        }
    }
}
