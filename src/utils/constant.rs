//! # Application Constants
//!
//! Limits and defaults used across the application.

use std::time::Duration;

/// Maximum length of a superhero name, matching the `superhero.name` column.
pub const MAX_NAME_LEN: usize = 128;

/// Maximum length of a superhero power, matching the `superhero.power` column.
pub const MAX_POWER_LEN: usize = 64;

/// Address the server binds to when `APP_ADDR` is not set.
pub const DEFAULT_APP_ADDR: &str = "0.0.0.0:8080";

/// Pool size used when `DB_MAX_CONNECTIONS` is not set.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// How long to wait for a pooled connection before giving up.
pub const DB_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Mount path of the Vault database secrets engine when `VAULT_DB_MOUNT` is not set.
pub const DEFAULT_VAULT_DB_MOUNT: &str = "database";

/// Vault role used when `VAULT_DB_ROLE` is not set.
pub const DEFAULT_VAULT_DB_ROLE: &str = "superheroes";

/// Timeout for a single request to Vault.
pub const VAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Lower bound for the lease renewal interval
///
/// Very short leases would otherwise hammer Vault with renewals.
pub const MIN_LEASE_RENEWAL_INTERVAL: Duration = Duration::from_secs(5);
