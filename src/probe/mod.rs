pub mod mariadb;
pub mod mongo;
pub mod toolchain;

use std::time::Duration;

use serde::Serialize;

/// Upper bound on a single backend probe, connection attempt included.
pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize, Clone)]
pub struct ServiceStatus {
    pub name: String,
    pub icon: String,
    pub status: bool,
    pub info: String,
}
