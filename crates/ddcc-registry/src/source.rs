//! Read-only sources for remote baselines.
//!
//! A source is an `http(s)://` URL fetched with a blocking GET, or a
//! `file://` URL / plain path read from disk. No retries, no timeouts
//! beyond the client defaults: a failed fetch aborts the run.

use crate::error::RegistryError;
use crate::model::{MasterList, Registry};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

pub fn fetch_bytes(source: &str) -> Result<Vec<u8>, RegistryError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        tracing::info!(url = source, "fetching");
        let response = reqwest::blocking::get(source).map_err(|e| RegistryError::Fetch {
            url: source.to_string(),
            source: e,
        })?;
        if !response.status().is_success() {
            return Err(RegistryError::HttpStatus {
                url: source.to_string(),
                status: response.status().as_u16(),
            });
        }
        let bytes = response.bytes().map_err(|e| RegistryError::Fetch {
            url: source.to_string(),
            source: e,
        })?;
        return Ok(bytes.to_vec());
    }

    let path = match source.strip_prefix("file://") {
        Some(stripped) => PathBuf::from(stripped),
        None => PathBuf::from(source),
    };
    tracing::info!(path = %path.display(), "reading local snapshot");
    fs::read(&path).map_err(|e| RegistryError::io(path, e))
}

pub fn fetch_json<T: DeserializeOwned>(source: &str) -> Result<T, RegistryError> {
    let bytes = fetch_bytes(source)?;
    serde_json::from_slice(&bytes).map_err(|e| RegistryError::parse(source, e))
}

/// Community list from the info endpoint.
pub fn fetch_info(source: &str) -> Result<Registry, RegistryError> {
    fetch_json(source)
}

/// Addresses currently advertised by the master server, scheme stripped.
pub fn fetch_live_addresses(source: &str) -> Result<HashSet<String>, RegistryError> {
    let list: MasterList = fetch_json(source)?;
    Ok(live_addresses(&list))
}

/// Keep only what follows the last `://` of each advertised address.
pub fn live_addresses(list: &MasterList) -> HashSet<String> {
    list.servers
        .iter()
        .flat_map(|server| server.addresses.iter())
        .map(|address| address.rsplit("://").next().unwrap_or(address).to_string())
        .collect()
}
