//! # ddcc-registry
//!
//! Curation checks for the DDNet custom community registry: a JSON
//! document of communities, cross-checked against the icon files beside
//! it and against two remote baselines.
//!
//! ```text
//! RegistryDocument      ← the JSON file, order-preserving
//!     │
//! ValidationSession     ← edit mode + findings + observed gamemodes
//!     │
//! validate_local        ← uniqueness, casing, URLs, icon header/hash
//! audit_remote          ← same checks over the info endpoint, warnings only
//!     │
//! run_format            ← the full format pass with write-back
//! check_liveness        ← registry addresses vs the master server list
//! ```

pub mod document;
pub mod error;
pub mod finding;
pub mod icons;
pub mod liveness;
pub mod model;
pub mod pipeline;
pub mod png;
pub mod schema;
pub mod session;
pub mod source;
pub mod unique;
pub mod validate;

pub use document::{DEFAULT_REGISTRY_PATH, RegistryDocument, render_canonical, write_atomic};
pub use error::RegistryError;
pub use finding::{Finding, Severity, failure_class};
pub use icons::{DEFAULT_ICONS_DIR, normalize_icon_names};
pub use liveness::{LivenessReport, MissingAddress, check_liveness};
pub use model::{
    Community, DEFAULT_INFO_URL, DEFAULT_MASTER_URL, Icon, MasterList, MasterServer, Registry,
    ServerGroup,
};
pub use pipeline::{FormatOptions, FormatOutcome, run_format};
pub use png::{PNG_SIGNATURE, PngMeta, png_meta_from_bytes, read_png_meta};
pub use schema::{DEFAULT_SCHEMA_PATH, SchemaOutcome, run_schema_validator};
pub use session::{EditMode, ValidationSession};
pub use source::{fetch_bytes, fetch_info, fetch_json, fetch_live_addresses, live_addresses};
pub use unique::{RegistryTrackers, UniqueTracker};
pub use validate::{
    ICON_HEIGHT, ICON_URL_PREFIX, ICON_WIDTH, audit_remote, parse_url, validate_local,
    verify_flag_region,
};
