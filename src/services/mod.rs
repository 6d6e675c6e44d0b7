//! # Services
//!
//! - **Repository** (`repository`) - Storage of superhero records
//! - **Generator** (`generator`) - Random names and powers for new records
//! - **Credentials** (`credentials`) - Static or Vault-issued database logins
//! - **Lease** (`lease`) - Background renewal of Vault leases

pub mod credentials;
pub mod generator;
pub mod lease;
pub mod repository;
