//! Typed views over the registry JSON shape.
//!
//! The same shape is served by the info endpoint, so these types read
//! both the local document and the remote one. Local edits go through
//! [`crate::document::RegistryDocument`] instead, which keeps unknown
//! fields and key order intact.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_INFO_URL: &str = "https://info.ddnet.org/info";
pub const DEFAULT_MASTER_URL: &str = "https://master1.ddnet.org/ddnet/15/servers.json";

/// Root of the info endpoint response and of the local registry file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Registry {
    pub communities: Vec<Community>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Community {
    pub id: String,
    pub name: String,
    pub icon: Icon,
    #[serde(default)]
    pub has_finishes: bool,
    #[serde(default)]
    pub contact_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Icon {
    #[serde(default)]
    pub servers: Option<Vec<ServerGroup>>,
    #[serde(default)]
    pub sha256: String,
    #[serde(default)]
    pub url: String,
}

/// A regional group of servers, keyed by gamemode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerGroup {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "flagId", default)]
    pub flag_id: Value,
    #[serde(default)]
    pub servers: IndexMap<String, Vec<String>>,
}

impl Community {
    pub fn server_groups(&self) -> &[ServerGroup] {
        self.icon.servers.as_deref().unwrap_or_default()
    }

    /// Every `(gamemode, address)` pair across all server groups, in
    /// document order.
    pub fn addresses(&self) -> impl Iterator<Item = (&str, &str)> {
        self.server_groups().iter().flat_map(|group| {
            group.servers.iter().flat_map(|(gamemode, addresses)| {
                addresses
                    .iter()
                    .map(move |address| (gamemode.as_str(), address.as_str()))
            })
        })
    }
}

/// The master server list: only the advertised addresses matter here.
#[derive(Debug, Clone, Deserialize)]
pub struct MasterList {
    pub servers: Vec<MasterServer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MasterServer {
    #[serde(default)]
    pub addresses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn community_reads_info_shape_with_defaults() {
        let raw = json!({
            "id": "kog",
            "name": "KoG",
            "has_finishes": true,
            "icon": {
                "sha256": "abc",
                "url": "https://example.org/kog.png",
                "servers": [{
                    "name": "eu",
                    "flagId": 276,
                    "servers": {
                        "Gores": ["1.2.3.4:8303", "1.2.3.4:8304"],
                        "DDNet": ["5.6.7.8:8303"]
                    }
                }]
            }
        });
        let community: Community = serde_json::from_value(raw).expect("community should parse");
        assert!(community.has_finishes);
        assert!(community.contact_urls.is_empty());
        let pairs: Vec<(&str, &str)> = community.addresses().collect();
        assert_eq!(
            pairs,
            vec![
                ("Gores", "1.2.3.4:8303"),
                ("Gores", "1.2.3.4:8304"),
                ("DDNet", "5.6.7.8:8303"),
            ]
        );
    }

    #[test]
    fn community_without_servers_has_no_addresses() {
        let raw = json!({
            "id": "solo",
            "name": "Solo",
            "icon": { "sha256": "", "url": "" }
        });
        let community: Community = serde_json::from_value(raw).expect("community should parse");
        assert!(community.server_groups().is_empty());
        assert_eq!(community.addresses().count(), 0);
    }
}
