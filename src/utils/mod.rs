//! # Utility Modules
//!
//! - **Constants** (`constant`) - Limits and configuration defaults
//! - **Secrets** (`secret`) - Secret lookup from environment variables or mounted files

pub mod constant;
pub mod secret;
