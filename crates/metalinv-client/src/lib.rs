//! metalinv-client: HTTP client for the Metal Enrollment API
//!
//! # Example
//!
//! ```no_run
//! use metalinv_client::HttpClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new("http://localhost:8080")?.with_token("eyJ...");
//!
//! let machines = client.list_machines().await?;
//! for machine in &machines {
//!     println!("{} ({})", machine.effective_hostname(), machine.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod http;
pub mod traits;

pub use error::{ClientError, Result};
pub use http::{DEFAULT_TIMEOUT, HttpClient};
pub use traits::EnrollmentApi;
