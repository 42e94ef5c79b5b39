use crate::error::{MapError, Result};

/// Installation category of a file, decided by the top-level directory it
/// lives under inside the modpack root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Category {
    /// `main_data/` — installed on both client and server.
    Main,
    /// `client_data/` — client only.
    Client,
    /// `server_data/` — server only.
    Server,
    /// `client_additional_data/<name>/` — optional client bundle keyed by name.
    ClientAdditional(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub install_on_client: bool,
    pub install_on_server: bool,
}

pub const MAIN_DATA_DIR: &str = "main_data";
pub const CLIENT_DATA_DIR: &str = "client_data";
pub const SERVER_DATA_DIR: &str = "server_data";
pub const CLIENT_ADDITIONAL_DIR: &str = "client_additional_data";

fn known(category: Category, client: bool, server: bool) -> Classification {
    Classification {
        category,
        install_on_client: client,
        install_on_server: server,
    }
}

/// Total mapping from a modpack-relative path (forward slashes) to its
/// category. Unknown top-level directories are an error rather than a
/// default so no file is silently dropped from the manifest.
pub fn classify(rel_path: &str) -> Result<Classification> {
    let unrecognized = |dir: &str| MapError::UnrecognizedCategory {
        dir: dir.to_string(),
        path: rel_path.to_string(),
    };
    // A file directly at the modpack root belongs to no category.
    let Some((top, rest)) = rel_path.split_once('/') else {
        return Err(unrecognized(rel_path));
    };
    match top {
        MAIN_DATA_DIR => Ok(known(Category::Main, true, true)),
        CLIENT_DATA_DIR => Ok(known(Category::Client, true, false)),
        SERVER_DATA_DIR => Ok(known(Category::Server, false, true)),
        CLIENT_ADDITIONAL_DIR => {
            // Needs a bundle name between the category dir and the file.
            let Some((bundle, _)) = rest.split_once('/') else {
                return Err(unrecognized(top));
            };
            Ok(known(
                Category::ClientAdditional(bundle.to_string()),
                true,
                false,
            ))
        }
        other => Err(unrecognized(other)),
    }
}
