//! Enrollment API trait

use async_trait::async_trait;

use metalinv_api::{Machine, MachineGroup};

use crate::error::Result;

/// Read-only view of the enrollment API, as much of it as inventory
/// assembly needs. [`HttpClient`](crate::HttpClient) is the production
/// implementation; tests substitute mocks.
#[async_trait]
pub trait EnrollmentApi: Send + Sync {
    /// All enrolled machines.
    async fn machines(&self) -> Result<Vec<Machine>>;
    /// All custom machine groups.
    async fn groups(&self) -> Result<Vec<MachineGroup>>;
    /// Member machines of a single group.
    async fn group_machines(&self, group_id: &str) -> Result<Vec<Machine>>;
}
