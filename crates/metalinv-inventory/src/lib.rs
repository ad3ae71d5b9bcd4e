//! metalinv-inventory: Ansible inventory document assembly
//!
//! Turns machines and groups fetched from the enrollment API into the
//! grouping document Ansible expects from a dynamic inventory script.

pub mod builder;
pub mod error;
pub mod types;

pub use builder::{InventoryBuilder, assemble};
pub use error::InventoryError;
pub use types::{AllGroup, GroupRecord, GroupVars, HostVars, InventoryDocument, Meta};
