//! Online liveness: every registry address must be advertised by the
//! master server. Reporting only; the document is never touched.

use crate::document::RegistryDocument;
use crate::error::RegistryError;
use crate::model::Community;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingAddress {
    pub id: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LivenessReport {
    pub checked: usize,
    pub missing: Vec<MissingAddress>,
}

impl LivenessReport {
    pub fn passed(&self) -> bool {
        self.missing.is_empty()
    }
}

pub fn check_liveness(
    document: &RegistryDocument,
    live: &HashSet<String>,
) -> Result<LivenessReport, RegistryError> {
    let mut checked = 0;
    let mut missing = Vec::new();
    for (idx, entry) in document.communities()?.iter().enumerate() {
        let community = Community::deserialize(entry).map_err(|e| {
            RegistryError::Shape(format!("communities[{idx}] is malformed: {e}"))
        })?;
        for (_, address) in community.addresses() {
            checked += 1;
            if !live.contains(address) {
                missing.push(MissingAddress {
                    id: community.id.clone(),
                    address: address.to_string(),
                });
            }
        }
    }
    Ok(LivenessReport { checked, missing })
}
