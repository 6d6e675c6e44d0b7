//! # Secret Lookup
//!
//! Secrets such as the database URL or the Vault token can be injected either
//! directly through an environment variable or through a file whose path is
//! given by a companion `*_FILE` variable (the usual layout for Docker and
//! Kubernetes secret mounts). The file wins when both are present.

use std::fmt::Display;
use std::str::FromStr;
use std::{env, fs};

use tracing::{debug, error, warn};

/// Reads a secret from the file named by `file_env_var_name`, falling back to
/// the plain `env_var_name` variable.
///
/// Returns `None` when neither is set, or when the file cannot be read.
pub fn get_secret(file_env_var_name: &str, env_var_name: &str) -> Option<String> {
    if let Ok(secret_file_path) = env::var(file_env_var_name) {
        match fs::read_to_string(&secret_file_path) {
            Ok(content) => {
                debug!(%secret_file_path, "Loaded secret from file");
                Some(content.trim().to_string())
            }
            Err(e) => {
                error!(%secret_file_path, ?e, "Error reading secret file");
                None
            }
        }
    } else {
        env::var(env_var_name).ok().filter(|v| !v.is_empty())
    }
}

/// Reads a plain setting, using `default` when it is unset or empty.
pub fn env_or(env_var_name: &str, default: &str) -> String {
    env::var(env_var_name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses a setting, using `default` when it is unset or empty.
///
/// A value that does not parse is reported and replaced by `default`.
pub fn env_parse_or<T>(env_var_name: &str, default: T) -> T
where
    T: FromStr + Display,
{
    let Some(raw) = env::var(env_var_name).ok().filter(|v| !v.is_empty()) else {
        return default;
    };
    match raw.parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(env_var_name, %raw, %default, "Ignoring unparsable setting, using default");
            default
        }
    }
}
