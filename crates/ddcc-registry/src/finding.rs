//! Findings recorded by a check run.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod failure_class {
    pub const SCHEMA_INVALID: &str = "schema_invalid";
    pub const NOT_FORMATTED: &str = "not_formatted";
    pub const MALFORMED_ENTRY: &str = "malformed_entry";
    pub const ID_NOT_LOWERCASE: &str = "id_not_lowercase";
    pub const DUPLICATE_ID: &str = "duplicate_id";
    pub const DUPLICATE_NAME: &str = "duplicate_name";
    pub const DUPLICATE_ADDRESS: &str = "duplicate_address";
    pub const INVALID_FLAG_REGION: &str = "invalid_flag_region";
    pub const HAS_FINISHES: &str = "has_finishes";
    pub const CONTACT_URL_INVALID: &str = "contact_url_invalid";
    pub const CONTACT_URL_NOT_HTTPS: &str = "contact_url_not_https";
    pub const ICON_URL_PREFIX: &str = "icon_url_prefix";
    pub const ICON_NAME_NOT_LOWERCASE: &str = "icon_name_not_lowercase";
    pub const ICON_MISSING: &str = "icon_missing";
    pub const ICON_UNREADABLE: &str = "icon_unreadable";
    pub const ICON_DIMENSIONS: &str = "icon_dimensions";
    pub const ICON_SHA256: &str = "icon_sha256";
    pub const ICON_FILE_NOT_LOWERCASE: &str = "icon_file_not_lowercase";
    pub const ICON_FILE_COLLISION: &str = "icon_file_collision";
    pub const ICONS_DIR_MISSING: &str = "icons_dir_missing";
    pub const ADDRESS_NOT_LIVE: &str = "address_not_live";
}

/// How a finding affects the run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Remote data outside local authority; never fails the run.
    Warning,
    /// Correctable, but check-only mode left it in place.
    Fixable,
    /// Corrected in place; reported, but the run still passes.
    Fixed,
    /// Needs human judgment.
    Error,
}

impl Severity {
    pub fn fails_run(self) -> bool {
        matches!(self, Self::Fixable | Self::Error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub severity: Severity,
    pub failure_class: String,
    pub subject: String,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Fixable => write!(f, "{} (fixable)", self.message),
            Severity::Fixed => write!(f, "{} (fixed)", self.message),
            Severity::Warning | Severity::Error => write!(f, "{}", self.message),
        }
    }
}
