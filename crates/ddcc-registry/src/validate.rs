//! Registry validation: the local pass (errors and fixes) and the remote
//! audit (warnings only).
//!
//! Both passes share the identity and server checks; they differ in who
//! has authority over the data. Local problems fail the run, remote ones
//! are only reported.

use crate::document::{RegistryDocument, set_field};
use crate::error::RegistryError;
use crate::finding::failure_class;
use crate::model::{Community, Registry, ServerGroup};
use crate::png::read_png_meta;
use crate::session::ValidationSession;
use crate::unique::RegistryTrackers;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use url::Url;

/// Icon URLs must start with this, compared case-sensitively.
pub const ICON_URL_PREFIX: &str =
    "https://raw.githubusercontent.com/SollyBunny/ddnet-custom-communities/refs/heads/main/icons/";
pub const ICON_WIDTH: u32 = 128;
pub const ICON_HEIGHT: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Authority {
    Local,
    Remote,
}

impl Authority {
    fn suffix(self) -> &'static str {
        match self {
            Self::Local => "",
            Self::Remote => " in master",
        }
    }

    fn report(
        self,
        session: &mut ValidationSession,
        failure_class: &str,
        subject: &str,
        message: String,
    ) {
        match self {
            Self::Local => session.error(failure_class, subject, message),
            Self::Remote => session.warn(failure_class, subject, message),
        }
    }
}

pub fn parse_url(raw: &str) -> Result<Url, url::ParseError> {
    Url::parse(raw)
}

/// Region/flag validity. Every pair is accepted until a policy exists.
pub fn verify_flag_region(_name: &str, _flag_id: &Value) -> bool {
    true
}

/// Audit the info endpoint's communities. Only ever records warnings.
pub fn audit_remote(registry: &Registry, session: &mut ValidationSession) {
    let mut trackers = RegistryTrackers::default();
    for community in &registry.communities {
        if community.id.to_lowercase() != community.id {
            session.warn(
                failure_class::ID_NOT_LOWERCASE,
                &community.id,
                format!("Non lower case ID in master: {}", community.id),
            );
        }
        check_identity(community, &mut trackers, session, Authority::Remote);
        check_server_groups(
            community.server_groups(),
            &mut trackers,
            session,
            Authority::Remote,
        );
    }
    tracing::debug!(
        communities = registry.communities.len(),
        "audited remote registry"
    );
}

/// Validate the local document, correcting fixable issues in place when
/// the session is in fix mode.
pub fn validate_local(
    document: &mut RegistryDocument,
    icons_dir: &Path,
    session: &mut ValidationSession,
) -> Result<(), RegistryError> {
    let mut trackers = RegistryTrackers::default();
    for (idx, entry) in document.communities_mut()?.iter_mut().enumerate() {
        let community = match Community::deserialize(&*entry) {
            Ok(community) => community,
            Err(err) => {
                session.error(
                    failure_class::MALFORMED_ENTRY,
                    format!("communities[{idx}]"),
                    format!("Malformed community entry communities[{idx}]: {err}"),
                );
                continue;
            }
        };
        let Some(object) = entry.as_object_mut() else {
            continue;
        };
        validate_community(&community, object, icons_dir, &mut trackers, session);
    }
    tracing::info!(
        gamemodes = ?session.gamemodes(),
        "observed gamemodes"
    );
    Ok(())
}

fn validate_community(
    community: &Community,
    object: &mut serde_json::Map<String, Value>,
    icons_dir: &Path,
    trackers: &mut RegistryTrackers,
    session: &mut ValidationSession,
) {
    let id = community.id.as_str();
    let lower_id = id.to_lowercase();
    if lower_id != id {
        session.fixable(
            failure_class::ID_NOT_LOWERCASE,
            id,
            format!("Non lower case ID: {id}"),
            || set_field(object, "id", Value::String(lower_id)),
        );
    }

    check_identity(community, trackers, session, Authority::Local);
    check_server_groups(
        community.server_groups(),
        trackers,
        session,
        Authority::Local,
    );

    if community.has_finishes {
        session.fixable(
            failure_class::HAS_FINISHES,
            id,
            format!("Community has finishes: {id}"),
            || set_field(object, "has_finishes", Value::Bool(false)),
        );
    }

    for contact_url in &community.contact_urls {
        match parse_url(contact_url) {
            Ok(parsed) if parsed.scheme() == "https" => {}
            Ok(_) => session.error(
                failure_class::CONTACT_URL_NOT_HTTPS,
                contact_url,
                format!("Contact URL not HTTPS: {contact_url}"),
            ),
            Err(err) => session.error(
                failure_class::CONTACT_URL_INVALID,
                contact_url,
                format!("Invalid URL: {contact_url} ({err})"),
            ),
        }
    }

    validate_icon(community, object, icons_dir, session);
}

fn validate_icon(
    community: &Community,
    object: &mut serde_json::Map<String, Value>,
    icons_dir: &Path,
    session: &mut ValidationSession,
) {
    let icon_url = community.icon.url.as_str();
    let Some(icon_name) = icon_url.strip_prefix(ICON_URL_PREFIX) else {
        session.error(
            failure_class::ICON_URL_PREFIX,
            icon_url,
            format!("Invalid icon URL (case sensitive): {icon_url}"),
        );
        return;
    };

    let lower_name = icon_name.to_lowercase();
    let mut file_name = icon_name.to_string();
    if lower_name != icon_name {
        let fixed_url = format!("{ICON_URL_PREFIX}{lower_name}");
        let applied = session.fixable(
            failure_class::ICON_NAME_NOT_LOWERCASE,
            icon_name,
            format!("Icon name not lowercase: {icon_name}"),
            || set_icon_field(object, "url", Value::String(fixed_url)),
        );
        if applied {
            file_name = lower_name;
        }
    }

    let icon_path = icons_dir.join(&file_name);
    let shown = icon_path.display().to_string();
    if !icon_path.is_file() {
        session.error(
            failure_class::ICON_MISSING,
            &shown,
            format!("Can't read icon: {shown}"),
        );
        return;
    }

    let meta = match read_png_meta(&icon_path) {
        Ok(Some(meta)) => meta,
        Ok(None) => {
            session.error(
                failure_class::ICON_UNREADABLE,
                &shown,
                format!("Can't read icon meta: {shown}"),
            );
            return;
        }
        Err(err) => {
            session.error(
                failure_class::ICON_UNREADABLE,
                &shown,
                format!("Can't read icon: {shown} ({err})"),
            );
            return;
        }
    };

    if meta.width != ICON_WIDTH || meta.height != ICON_HEIGHT {
        session.error(
            failure_class::ICON_DIMENSIONS,
            &shown,
            format!(
                "Icon is {}x{} not {ICON_WIDTH}x{ICON_HEIGHT}: {shown}",
                meta.width, meta.height
            ),
        );
    }
    if meta.sha256 != community.icon.sha256 {
        let message = format!("Icon SHA256 should be {}: {shown}", meta.sha256);
        session.fixable(failure_class::ICON_SHA256, &shown, message, || {
            set_icon_field(object, "sha256", Value::String(meta.sha256))
        });
    }
}

fn set_icon_field(object: &mut serde_json::Map<String, Value>, key: &str, value: Value) {
    if let Some(icon) = object.get_mut("icon").and_then(Value::as_object_mut) {
        set_field(icon, key, value);
    }
}

fn check_identity(
    community: &Community,
    trackers: &mut RegistryTrackers,
    session: &mut ValidationSession,
    authority: Authority,
) {
    let suffix = authority.suffix();
    if !trackers.ids.observe(community.id.as_str()) {
        authority.report(
            session,
            failure_class::DUPLICATE_ID,
            &community.id,
            format!("Non unique ID{suffix}: {}", community.id),
        );
    }
    if !trackers.names.observe(community.name.as_str()) {
        authority.report(
            session,
            failure_class::DUPLICATE_NAME,
            &community.name,
            format!("Non unique name{suffix}: {}", community.name),
        );
    }
}

fn check_server_groups(
    groups: &[ServerGroup],
    trackers: &mut RegistryTrackers,
    session: &mut ValidationSession,
    authority: Authority,
) {
    let suffix = authority.suffix();
    for group in groups {
        if !verify_flag_region(&group.name, &group.flag_id) {
            authority.report(
                session,
                failure_class::INVALID_FLAG_REGION,
                &group.name,
                format!("Invalid flag region{suffix}: {} {}", group.name, group.flag_id),
            );
        }
        for (gamemode, addresses) in &group.servers {
            session.record_gamemode(gamemode);
            for address in addresses {
                if !trackers.addresses.observe(address.as_str()) {
                    authority.report(
                        session,
                        failure_class::DUPLICATE_ADDRESS,
                        address,
                        format!("Non unique IP{suffix}: {address}"),
                    );
                }
            }
        }
    }
}
