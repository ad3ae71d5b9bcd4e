//! Inventory assembly from enrollment API data

use std::collections::BTreeMap;

use tracing::{debug, instrument, warn};

use metalinv_api::{Machine, MachineGroup};
use metalinv_client::EnrollmentApi;

use crate::error::InventoryError;
use crate::types::{AllGroup, GroupRecord, GroupVars, HostVars, InventoryDocument, Meta};

/// Group names the document claims for itself.
const RESERVED_KEYS: [&str; 2] = ["_meta", "all"];

/// Builds the Ansible inventory document from the enrollment API.
///
/// The document is built fresh on every call; there is no caching and no
/// incremental path.
pub struct InventoryBuilder<A> {
    api: A,
}

impl<A: EnrollmentApi> InventoryBuilder<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Fetch machines and groups and assemble the grouping document.
    ///
    /// # Errors
    /// Returns [`InventoryError::Machines`] if the machine list cannot be
    /// fetched. Custom-group failures are logged as a warning and the
    /// document is returned with zero custom groups.
    #[instrument(skip(self))]
    pub async fn build(&self) -> Result<InventoryDocument, InventoryError> {
        let machines = self
            .api
            .machines()
            .await
            .map_err(InventoryError::Machines)?;
        debug!(count = machines.len(), "fetched machines");

        let custom_groups = match self.fetch_custom_groups().await {
            Ok(groups) => groups,
            Err(err) => {
                warn!(error = %err, "continuing without custom groups");
                Vec::new()
            }
        };

        Ok(assemble(&machines, &custom_groups))
    }

    /// Hostvars for a single host, or `None` if the host is not in the
    /// inventory. Rebuilds the full document each time.
    ///
    /// # Errors
    /// Same contract as [`InventoryBuilder::build`].
    pub async fn host_vars(&self, hostname: &str) -> Result<Option<HostVars>, InventoryError> {
        let document = self.build().await?;
        Ok(document.host_vars(hostname).cloned())
    }

    /// Fetch every custom group together with its member machines.
    ///
    /// Any failure here discards all custom groups for this run; there is
    /// no partial recovery within the group listing.
    async fn fetch_custom_groups(
        &self,
    ) -> Result<Vec<(MachineGroup, Vec<Machine>)>, InventoryError> {
        let groups = self.api.groups().await.map_err(InventoryError::Groups)?;
        debug!(count = groups.len(), "fetched custom groups");

        let mut fetched = Vec::with_capacity(groups.len());
        for group in groups {
            let members = self
                .api
                .group_machines(&group.id)
                .await
                .map_err(InventoryError::Groups)?;
            fetched.push((group, members));
        }
        Ok(fetched)
    }
}

/// Assemble the inventory document from already-fetched data.
///
/// Pure: the document shape is fully determined by the inputs. Machines
/// land in one `status_<status>` group each, custom groups are keyed by
/// their sanitized name, and `all.children` lists the status groups in
/// first-appearance order.
#[must_use]
pub fn assemble(
    machines: &[Machine],
    custom_groups: &[(MachineGroup, Vec<Machine>)],
) -> InventoryDocument {
    let mut hostvars = BTreeMap::new();
    let mut groups: BTreeMap<String, GroupRecord> = BTreeMap::new();
    let mut status_order: Vec<String> = Vec::new();

    for machine in machines {
        let hostname = machine.effective_hostname().to_string();
        hostvars.insert(hostname.clone(), HostVars::from(machine));

        let status_group = format!("status_{}", machine.status);
        if !status_order.contains(&status_group) {
            status_order.push(status_group.clone());
        }
        groups
            .entry(status_group)
            .or_insert_with(|| GroupRecord {
                hosts: Vec::new(),
                vars: None,
            })
            .hosts
            .push(hostname);
    }

    for (group, members) in custom_groups {
        let key = group_key(&group.name);
        if RESERVED_KEYS.contains(&key.as_str()) {
            warn!(group = %group.name, "group name collides with a reserved inventory key, skipping");
            continue;
        }

        let hosts = members
            .iter()
            .map(|machine| machine.effective_hostname().to_string())
            .collect();
        groups.insert(
            key,
            GroupRecord {
                hosts,
                vars: Some(GroupVars {
                    group_description: group.description.clone().unwrap_or_default(),
                    group_tags: group.tags.clone().unwrap_or_default(),
                }),
            },
        );
    }

    InventoryDocument {
        meta: Meta { hostvars },
        groups,
        all: AllGroup {
            children: status_order,
        },
    }
}

/// Inventory key for a custom group: lowercased, spaces become underscores.
fn group_key(name: &str) -> String {
    name.replace(' ', "_").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn machine(value: serde_json::Value) -> Machine {
        serde_json::from_value(value).unwrap()
    }

    fn group(value: serde_json::Value) -> MachineGroup {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_hostname_defaults_to_service_tag() {
        let machines = [machine(json!({
            "id": "1",
            "service_tag": "SVT001",
            "mac_address": "aa:bb",
            "status": "active"
        }))];

        let document = assemble(&machines, &[]);

        let vars = document.host_vars("SVT001").unwrap();
        assert_eq!(vars.ansible_host, "SVT001");
        assert_eq!(document.groups["status_active"].hosts, vec!["SVT001"]);
        assert_eq!(document.all.children, vec!["status_active"]);
    }

    #[test]
    fn test_each_machine_in_exactly_one_status_group() {
        let machines = [
            machine(json!({
                "id": "1", "service_tag": "A1", "mac_address": "aa", "status": "ready",
                "hostname": "node-a"
            })),
            machine(json!({
                "id": "2", "service_tag": "B2", "mac_address": "bb", "status": "enrolled"
            })),
            machine(json!({
                "id": "3", "service_tag": "C3", "mac_address": "cc", "status": "ready"
            })),
        ];

        let document = assemble(&machines, &[]);

        for hostname in ["node-a", "B2", "C3"] {
            let containing: Vec<_> = document
                .groups
                .values()
                .filter(|record| record.hosts.iter().any(|h| h == hostname))
                .collect();
            assert_eq!(containing.len(), 1, "{hostname} in one status group");
        }
        assert_eq!(document.groups["status_ready"].hosts, vec!["node-a", "C3"]);
        // first-appearance order, not alphabetical
        assert_eq!(
            document.all.children,
            vec!["status_ready", "status_enrolled"]
        );
    }

    #[test]
    fn test_bmc_vars_only_when_enabled() {
        let machines = [
            machine(json!({
                "id": "1", "service_tag": "A1", "mac_address": "aa", "status": "ready",
                "bmc_info": {
                    "ip_address": "10.0.0.1", "username": "admin",
                    "password": "secret", "enabled": true
                }
            })),
            machine(json!({
                "id": "2", "service_tag": "B2", "mac_address": "bb", "status": "ready",
                "bmc_info": {
                    "ip_address": "10.0.0.2", "username": "admin",
                    "password": "secret", "enabled": false
                }
            })),
        ];

        let document = assemble(&machines, &[]);

        let with_bmc = document.host_vars("A1").unwrap();
        assert_eq!(with_bmc.bmc_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(with_bmc.bmc_username.as_deref(), Some("admin"));

        let without_bmc = document.host_vars("B2").unwrap();
        assert!(without_bmc.bmc_address.is_none());
        assert!(without_bmc.bmc_username.is_none());

        let rendered = serde_json::to_string(&document).unwrap();
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("password"));
    }

    #[test]
    fn test_custom_group_key_is_sanitized() {
        let machines = [machine(json!({
            "id": "1", "service_tag": "A1", "mac_address": "aa", "status": "ready"
        }))];
        let custom = [(
            group(json!({"id": "5", "name": "Web Servers", "tags": ["prod"]})),
            vec![machine(json!({
                "id": "1", "service_tag": "A1", "mac_address": "aa", "status": "ready"
            }))],
        )];

        let document = assemble(&machines, &custom);

        let record = &document.groups["web_servers"];
        assert_eq!(record.hosts, vec!["A1"]);
        let vars = record.vars.as_ref().unwrap();
        assert_eq!(vars.group_description, "");
        assert_eq!(vars.group_tags, vec!["prod"]);
    }

    #[test]
    fn test_reserved_keys_are_protected() {
        let machines = [machine(json!({
            "id": "1", "service_tag": "A1", "mac_address": "aa", "status": "ready"
        }))];
        let custom = [
            (group(json!({"id": "1", "name": "All"})), Vec::new()),
            (group(json!({"id": "2", "name": "_meta"})), Vec::new()),
        ];

        let document = assemble(&machines, &custom);

        assert!(!document.groups.contains_key("all"));
        assert!(!document.groups.contains_key("_meta"));
        assert_eq!(document.all.children, vec!["status_ready"]);
    }

    #[test]
    fn test_serialized_document_shape() {
        let machines = [machine(json!({
            "id": "1", "service_tag": "SVT001", "mac_address": "aa:bb", "status": "active"
        }))];
        let custom = [(
            group(json!({"id": "5", "name": "Web Servers", "description": "frontends"})),
            vec![machine(json!({
                "id": "1", "service_tag": "SVT001", "mac_address": "aa:bb", "status": "active"
            }))],
        )];

        let value = serde_json::to_value(assemble(&machines, &custom)).unwrap();

        assert_eq!(value["_meta"]["hostvars"]["SVT001"]["ansible_host"], "SVT001");
        assert_eq!(value["_meta"]["hostvars"]["SVT001"]["hardware"], json!({}));
        assert_eq!(value["_meta"]["hostvars"]["SVT001"]["description"], "");
        assert_eq!(value["status_active"]["hosts"], json!(["SVT001"]));
        // status groups carry no vars key at all
        assert!(value["status_active"].get("vars").is_none());
        assert_eq!(
            value["web_servers"]["vars"]["group_description"],
            "frontends"
        );
        assert_eq!(value["web_servers"]["vars"]["group_tags"], json!([]));
        assert_eq!(value["all"]["children"], json!(["status_active"]));
    }
}
