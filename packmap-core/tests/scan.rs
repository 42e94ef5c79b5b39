use globset::{Glob, GlobSet, GlobSetBuilder};
use packmap_core::entry::RemoteConfig;
use packmap_core::error::MapError;
use packmap_core::hasher::hash_bytes;
use packmap_core::scan::scan_modpack;
use std::path::Path;

fn remote() -> RemoteConfig {
    RemoteConfig {
        base_api_url: "https://example.com/files".to_string(),
        storage_prefix: Some("packs".to_string()),
    }
}

fn no_exclude() -> GlobSet {
    GlobSet::empty()
}

fn write_config(root: &Path) {
    let cfg = serde_json::json!({
        "display_name": "TFC Survival",
        "minecraft_version": "1.20.1",
        "forge_version": "47.2.0",
        "minecraft_profile": "tfc-survival",
        "minecraft_server_ip": "203.0.113.10",
        "minecraft_server_port": "25565",
    });
    std::fs::write(
        root.join("server_config.json"),
        serde_json::to_vec_pretty(&cfg).unwrap(),
    )
    .unwrap();
}

fn write(root: &Path, rel: &str, content: &[u8]) {
    let p = root.join(rel);
    std::fs::create_dir_all(p.parent().unwrap()).unwrap();
    std::fs::write(p, content).unwrap();
}

#[test]
fn scan_builds_sorted_categorized_section() {
    let td = tempfile::tempdir().unwrap();
    let root = td.path();
    write_config(root);
    // Deliberately created out of order.
    write(root, "main_data/mods/b.jar", b"bbb");
    write(root, "main_data/mods/a.jar", b"aaa");
    write(root, "server_data/server.properties", b"motd=hi");
    write(root, "client_data/options.txt", b"fov:90");
    write(root, "client_additional_data/maps/town.zip", b"zip");

    let s = scan_modpack(root, "tfc", &remote(), &no_exclude()).unwrap();

    assert_eq!(s.config.display_name, "TFC Survival");
    let main_paths: Vec<&str> = s.main_data.iter().map(|e| e.dist_file_path.as_str()).collect();
    assert_eq!(main_paths, ["main_data/mods/a.jar", "main_data/mods/b.jar"]);

    let a = &s.main_data[0];
    assert_eq!(a.file_name, "a.jar");
    assert_eq!(a.hash, hash_bytes(b"aaa"));
    assert_eq!(
        a.api_url.as_deref(),
        Some("https://example.com/files/tfc/main_data/mods/a.jar")
    );
    assert_eq!(
        a.object_storage_key.as_deref(),
        Some("packs/tfc/main_data/mods/a.jar")
    );
    assert!(a.install_on_client && a.install_on_server);

    assert_eq!(s.server_data.len(), 1);
    assert!(!s.server_data[0].install_on_client);
    assert!(s.server_data[0].install_on_server);

    assert_eq!(s.client_data.len(), 1);
    assert!(s.client_data[0].install_on_client);
    assert!(!s.client_data[0].install_on_server);

    assert_eq!(s.client_additional_data["maps"].len(), 1);
    assert_eq!(s.client_additional_data["maps"][0].file_name, "town.zip");
}

#[test]
fn config_file_is_not_a_data_entry() {
    let td = tempfile::tempdir().unwrap();
    let root = td.path();
    write_config(root);
    write(root, "main_data/a.jar", b"aaa");

    let s = scan_modpack(root, "tfc", &remote(), &no_exclude()).unwrap();
    assert_eq!(s.main_data.len(), 1);
    assert!(s.client_data.is_empty());
    assert!(s.server_data.is_empty());
}

#[test]
fn missing_config_fails_the_modpack() {
    let td = tempfile::tempdir().unwrap();
    write(td.path(), "main_data/a.jar", b"aaa");
    let err = scan_modpack(td.path(), "tfc", &remote(), &no_exclude()).unwrap_err();
    assert!(matches!(err, MapError::MissingConfig { .. }));
}

#[test]
fn malformed_config_fails_the_modpack() {
    let td = tempfile::tempdir().unwrap();
    let root = td.path();
    std::fs::write(root.join("server_config.json"), b"{\"display_name\": \"x\"}").unwrap();
    let err = scan_modpack(root, "tfc", &remote(), &no_exclude()).unwrap_err();
    assert!(matches!(err, MapError::InvalidConfig { .. }));
}

#[test]
fn unrecognized_directory_fails_instead_of_dropping_files() {
    let td = tempfile::tempdir().unwrap();
    let root = td.path();
    write_config(root);
    write(root, "extras/readme.txt", b"hi");
    let err = scan_modpack(root, "tfc", &remote(), &no_exclude()).unwrap_err();
    match err {
        MapError::UnrecognizedCategory { dir, .. } => assert_eq!(dir, "extras"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn excluded_globs_are_skipped() {
    let td = tempfile::tempdir().unwrap();
    let root = td.path();
    write_config(root);
    write(root, "main_data/a.jar", b"aaa");
    write(root, "main_data/a.jar.tmp", b"partial");

    let mut b = GlobSetBuilder::new();
    b.add(Glob::new("**/*.tmp").unwrap());
    let exclude = b.build().unwrap();

    let s = scan_modpack(root, "tfc", &remote(), &exclude).unwrap();
    assert_eq!(s.main_data.len(), 1);
    assert_eq!(s.main_data[0].file_name, "a.jar");
}

#[cfg(target_family = "unix")]
#[test]
fn symlinks_are_not_recorded() {
    let td = tempfile::tempdir().unwrap();
    let root = td.path();
    write_config(root);
    write(root, "main_data/a.jar", b"aaa");
    std::os::unix::fs::symlink(root.join("main_data/a.jar"), root.join("main_data/link.jar"))
        .unwrap();

    let s = scan_modpack(root, "tfc", &remote(), &no_exclude()).unwrap();
    assert_eq!(s.main_data.len(), 1);
    assert_eq!(s.main_data[0].file_name, "a.jar");
}

#[test]
fn rescanning_an_unchanged_tree_is_deterministic() {
    let td = tempfile::tempdir().unwrap();
    let root = td.path();
    write_config(root);
    write(root, "main_data/mods/a.jar", b"aaa");
    write(root, "main_data/mods/b.jar", b"bbb");
    write(root, "client_additional_data/maps/town.zip", b"zip");

    let first = scan_modpack(root, "tfc", &remote(), &no_exclude()).unwrap();
    let second = scan_modpack(root, "tfc", &remote(), &no_exclude()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn storage_key_is_omitted_without_a_prefix() {
    let td = tempfile::tempdir().unwrap();
    let root = td.path();
    write_config(root);
    write(root, "main_data/a.jar", b"aaa");

    let remote = RemoteConfig {
        base_api_url: "https://example.com/files".to_string(),
        storage_prefix: None,
    };
    let s = scan_modpack(root, "tfc", &remote, &no_exclude()).unwrap();
    assert_eq!(s.main_data[0].object_storage_key, None);
    assert!(s.main_data[0].api_url.is_some());
}
