//! metalinv-api: wire types for the Metal Enrollment API
//!
//! Serde models matching the JSON the enrollment server returns from
//! `/api/v1/machines` and `/api/v1/groups`.

pub mod models;

pub use models::{BmcInfo, Machine, MachineGroup};
