use crate::error::{MapError, Result};
use crate::manifest::{FileEntry, Manifest, ModpackSection, ServerConfig};
use std::net::Ipv4Addr;

/// Schema-check the whole manifest. Runs strictly before persistence; an
/// invalid manifest is never written.
pub fn validate(manifest: &Manifest) -> Result<()> {
    for (name, section) in manifest {
        validate_section(name, section)?;
    }
    Ok(())
}

pub fn validate_section(name: &str, section: &ModpackSection) -> Result<()> {
    let fail = |context: String, reason: String| MapError::Validation { context, reason };

    check_config(&section.config).map_err(|r| fail(format!("{name}: config"), r))?;
    if let Some(icon) = &section.config.server_icon {
        check_entry(icon).map_err(|r| fail(format!("{name}: config.server_icon"), r))?;
    }

    let lists = [
        ("main_data", &section.main_data),
        ("client_data", &section.client_data),
        ("server_data", &section.server_data),
    ];
    for (list_name, list) in lists {
        for entry in list.iter() {
            check_entry(entry).map_err(|r| {
                fail(format!("{name}: {list_name}/{}", entry.dist_file_path), r)
            })?;
        }
    }
    for (bundle, list) in &section.client_additional_data {
        if bundle.is_empty() {
            return Err(fail(
                name.to_string(),
                "client_additional_data bundle name must not be empty".to_string(),
            ));
        }
        for entry in list.iter() {
            check_entry(entry).map_err(|r| {
                fail(
                    format!("{name}: client_additional_data/{bundle}/{}", entry.dist_file_path),
                    r,
                )
            })?;
        }
    }
    Ok(())
}

/// Field-level checks for a server config block. Returns the first problem
/// as a human-readable reason.
pub fn check_config(config: &ServerConfig) -> std::result::Result<(), String> {
    required("display_name", &config.display_name)?;
    required("minecraft_version", &config.minecraft_version)?;
    required("forge_version", &config.forge_version)?;
    required("minecraft_profile", &config.minecraft_profile)?;
    config
        .minecraft_server_ip
        .parse::<Ipv4Addr>()
        .map_err(|_| {
            format!(
                "minecraft_server_ip {:?} is not an IPv4 address",
                config.minecraft_server_ip
            )
        })?;
    let port = &config.minecraft_server_port;
    let port_ok = !port.is_empty()
        && port.len() <= 5
        && port.bytes().all(|b| b.is_ascii_digit())
        && port.parse::<u16>().map(|p| p != 0).unwrap_or(false);
    if !port_ok {
        return Err(format!("minecraft_server_port {port:?} is not a valid port"));
    }
    Ok(())
}

fn required(field: &str, value: &str) -> std::result::Result<(), String> {
    if value.is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    Ok(())
}

fn check_entry(entry: &FileEntry) -> std::result::Result<(), String> {
    required("file_name", &entry.file_name)?;
    required("hash", &entry.hash)?;
    required("dist_file_path", &entry.dist_file_path)?;
    if entry.api_url.is_none() && entry.object_storage_key.is_none() {
        return Err("entry has neither api_url nor object_storage_key".to_string());
    }
    // Destination paths are installed relative to the launcher's root; an
    // absolute path or parent traversal could escape it.
    if entry.dist_file_path.starts_with('/') {
        return Err(format!("dist_file_path {:?} is absolute", entry.dist_file_path));
    }
    if entry.dist_file_path.split('/').any(|seg| seg == "..") {
        return Err(format!(
            "dist_file_path {:?} contains parent traversal",
            entry.dist_file_path
        ));
    }
    Ok(())
}
