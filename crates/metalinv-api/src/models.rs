//! Enrollment API model definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A bare-metal machine as returned by the enrollment API.
///
/// The server sends more fields than the inventory needs (build state,
/// NixOS configuration); unknown fields are ignored on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Machine {
    /// Machine identifier
    pub id: String,
    /// Manufacturer-assigned service tag
    pub service_tag: String,
    /// Primary MAC address
    pub mac_address: String,
    /// Enrollment status (enrolled, configured, building, ready, ...)
    pub status: String,
    /// Assigned hostname; the server sends an empty string until one is set
    #[serde(default)]
    pub hostname: Option<String>,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Opaque hardware descriptor reported at enrollment
    #[serde(default)]
    pub hardware: Option<Value>,
    /// Out-of-band management configuration
    #[serde(default)]
    pub bmc_info: Option<BmcInfo>,
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_seen_at: Option<DateTime<Utc>>,
}

impl Machine {
    /// Hostname used for inventory purposes: the assigned hostname when
    /// present and non-empty, otherwise the service tag.
    #[must_use]
    pub fn effective_hostname(&self) -> &str {
        match self.hostname.as_deref() {
            Some(hostname) if !hostname.is_empty() => hostname,
            _ => &self.service_tag,
        }
    }
}

/// BMC/IPMI configuration attached to a machine.
///
/// The password is part of the wire format but never serialized back out,
/// so it cannot leak into inventory output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BmcInfo {
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    /// IPMI, Redfish, etc.
    #[serde(default, rename = "type")]
    pub bmc_type: String,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub enabled: bool,
}

/// A custom machine group defined on the enrollment server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
