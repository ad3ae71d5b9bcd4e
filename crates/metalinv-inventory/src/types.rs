//! Inventory document type definitions
//!
//! The serialized shape is exactly what Ansible consumes: a `_meta` entry
//! with per-host variables, one entry per group, and an `all` entry whose
//! children are the status groups.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use metalinv_api::Machine;

/// Per-host variables attached to a host in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostVars {
    /// Address Ansible connects to; same as the inventory hostname
    pub ansible_host: String,
    pub machine_id: String,
    pub service_tag: String,
    pub mac_address: String,
    pub status: String,
    pub description: String,
    /// Opaque hardware descriptor, `{}` when the server reported none
    pub hardware: Value,
    /// BMC address, present only when the machine's BMC is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmc_address: Option<String>,
    /// BMC username, present only when the machine's BMC is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmc_username: Option<String>,
}

impl From<&Machine> for HostVars {
    fn from(machine: &Machine) -> Self {
        let bmc = machine.bmc_info.as_ref().filter(|bmc| bmc.enabled);
        Self {
            ansible_host: machine.effective_hostname().to_string(),
            machine_id: machine.id.clone(),
            service_tag: machine.service_tag.clone(),
            mac_address: machine.mac_address.clone(),
            status: machine.status.clone(),
            description: machine.description.clone().unwrap_or_default(),
            hardware: machine
                .hardware
                .clone()
                .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
            bmc_address: bmc.map(|bmc| bmc.ip_address.clone()),
            bmc_username: bmc.map(|bmc| bmc.username.clone()),
        }
    }
}

/// A single group entry: member hosts plus optional group variables.
///
/// Status groups carry no `vars`; custom groups carry description and tags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRecord {
    pub hosts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vars: Option<GroupVars>,
}

/// Variables attached to a custom group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupVars {
    pub group_description: String,
    pub group_tags: Vec<String>,
}

/// The `_meta` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Meta {
    pub hostvars: BTreeMap<String, HostVars>,
}

/// The `all` entry listing the status groups as children.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllGroup {
    pub children: Vec<String>,
}

/// The complete grouping document consumed by Ansible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryDocument {
    #[serde(rename = "_meta")]
    pub meta: Meta,
    #[serde(flatten)]
    pub groups: BTreeMap<String, GroupRecord>,
    pub all: AllGroup,
}

impl InventoryDocument {
    /// Variables for a single host, if the host is known to the inventory.
    #[must_use]
    pub fn host_vars(&self, hostname: &str) -> Option<&HostVars> {
        self.meta.hostvars.get(hostname)
    }
}
