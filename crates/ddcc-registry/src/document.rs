//! The registry document on disk: load, canonical rendering, atomic write.
//!
//! The document is kept as a `serde_json::Value` (with `preserve_order`)
//! so re-serialization keeps key order and any fields the typed model
//! does not know about. Canonical form is tab indentation plus one
//! trailing newline.

use crate::error::RegistryError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_REGISTRY_PATH: &str = "custom-communities-ddnet-info.json";

#[derive(Debug, Clone, PartialEq)]
pub struct RegistryDocument {
    root: Value,
}

impl RegistryDocument {
    pub fn from_value(root: Value) -> Result<Self, RegistryError> {
        let document = Self { root };
        document.communities()?;
        Ok(document)
    }

    pub fn parse(raw: &str, label: &str) -> Result<Self, RegistryError> {
        let root: Value = serde_json::from_str(raw).map_err(|e| RegistryError::parse(label, e))?;
        Self::from_value(root)
    }

    /// Load the document, returning it together with the raw file text.
    pub fn load(path: impl AsRef<Path>) -> Result<(Self, String), RegistryError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))?;
        let document = Self::parse(&raw, &path.display().to_string())?;
        Ok((document, raw))
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn communities(&self) -> Result<&[Value], RegistryError> {
        self.root
            .as_object()
            .ok_or_else(|| RegistryError::Shape("root must be an object".to_string()))?
            .get("communities")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| RegistryError::Shape("`communities` must be an array".to_string()))
    }

    pub fn communities_mut(&mut self) -> Result<&mut Vec<Value>, RegistryError> {
        self.root
            .as_object_mut()
            .ok_or_else(|| RegistryError::Shape("root must be an object".to_string()))?
            .get_mut("communities")
            .and_then(Value::as_array_mut)
            .ok_or_else(|| RegistryError::Shape("`communities` must be an array".to_string()))
    }

    pub fn render(&self) -> Result<String, RegistryError> {
        render_canonical(&self.root)
    }
}

/// Serialize with tab indentation and a single trailing newline.
pub fn render_canonical(value: &Value) -> Result<String, RegistryError> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(RegistryError::Render)?;
    out.push(b'\n');
    // serde_json only ever emits UTF-8.
    String::from_utf8(out).map_err(|e| {
        RegistryError::Shape(format!("rendered registry is not UTF-8: {e}"))
    })
}

/// Overwrite one field of a JSON object in place, keeping its
/// position in key order.
pub(crate) fn set_field(object: &mut Map<String, Value>, key: &str, value: Value) {
    if let Some(slot) = object.get_mut(key) {
        *slot = value;
    } else {
        object.insert(key.to_string(), value);
    }
}

/// Replace `path` with `contents` via a synced temp file and rename.
pub fn write_atomic(path: impl AsRef<Path>, contents: &str) -> Result<(), RegistryError> {
    let path = path.as_ref();
    let tmp_path = tmp_write_path(path);
    let write_result = (|| -> Result<(), RegistryError> {
        let mut file = File::create(&tmp_path).map_err(|e| RegistryError::io(&tmp_path, e))?;
        file.write_all(contents.as_bytes())
            .map_err(|e| RegistryError::io(&tmp_path, e))?;
        file.sync_all().map_err(|e| RegistryError::io(&tmp_path, e))?;
        Ok(())
    })();

    if let Err(error) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        RegistryError::io(path, e)
    })?;
    tracing::info!(path = %path.display(), "wrote registry document");
    Ok(())
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}
