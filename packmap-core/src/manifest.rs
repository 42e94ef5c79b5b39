use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the per-modpack configuration file expected at the modpack root.
pub const SERVER_CONFIG_FILE: &str = "server_config.json";

/// One file's record within the manifest. A launcher downloads the file from
/// `api_url` or `object_storage_key`, verifies it against `hash`, and places
/// it at `dist_file_path` relative to the install root.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    pub file_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_storage_key: Option<String>,
    pub hash: String,
    pub dist_file_path: String,
    pub install_on_client: bool,
    pub install_on_server: bool,
}

/// Hand-authored launcher configuration for one modpack. Read from
/// `server_config.json`, never computed. Unknown keys are tolerated here so
/// packs can carry extra launcher-specific settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub display_name: String,
    pub minecraft_version: String,
    pub forge_version: String,
    pub minecraft_profile: String,
    pub minecraft_server_ip: String,
    pub minecraft_server_port: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_icon: Option<FileEntry>,
}

/// Aggregate for one modpack: its config plus the category entry lists.
/// Lists are ordered lexicographically by `dist_file_path`. Unknown keys are
/// rejected at parse time: an unrecognized category list would otherwise be
/// dropped without a trace, the same silent loss the classifier refuses.
/// Free-form category names belong under `client_additional_data`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ModpackSection {
    pub config: ServerConfig,
    pub main_data: Vec<FileEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub client_data: Vec<FileEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub server_data: Vec<FileEntry>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub client_additional_data: BTreeMap<String, Vec<FileEntry>>,
}

/// The whole `map.json`: modpack name -> section. BTreeMap keeps key order
/// stable across runs so version-control diffs stay minimal.
pub type Manifest = BTreeMap<String, ModpackSection>;
