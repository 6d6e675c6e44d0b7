//! # Database Credential Sources
//!
//! The database login is resolved at startup from one of two sources:
//!
//! - [`StaticCredentials`] - keeps the username and password embedded in `DATABASE_URL`
//! - [`VaultCredentials`] - short-lived credentials issued by the Vault database
//!   secrets engine, together with a lease that can be renewed
//!
//! `DATABASE_URL` always supplies the host, port and database name. A dynamic
//! source only overrides the login.
//!
//! ## Configuration
//!
//! [`credential_source_from_env`] picks Vault when `VAULT_ADDR` is set:
//! - `VAULT_ADDR` - Base URL of the Vault server
//! - `VAULT_TOKEN` / `VAULT_TOKEN_FILE` - Token used to authenticate
//! - `VAULT_DB_MOUNT` - Mount path of the database secrets engine (default `database`)
//! - `VAULT_DB_ROLE` - Role to request credentials for (default `superheroes`)

use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::utils::constant::*;
use crate::utils::secret::{env_or, get_secret};

/// Errors that can occur while resolving database credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("missing configuration: {0}")]
    MissingConfig(&'static str),

    #[error("invalid database url: {0}")]
    InvalidDatabaseUrl(#[source] sqlx::Error),

    #[error("request to Vault failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Vault answered with status {status}: {body}")]
    VaultStatus { status: u16, body: String },

    #[error("malformed Vault response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("lease renewal is not supported by this source")]
    RenewUnsupported,
}

/// A Vault lease attached to dynamically issued credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lease {
    pub id: String,
    pub duration: Duration,
    pub renewable: bool,
}

impl Lease {
    /// Interval at which the lease should be renewed: half its duration,
    /// but never below [`MIN_LEASE_RENEWAL_INTERVAL`].
    pub fn renewal_interval(&self) -> Duration {
        (self.duration / 2).max(MIN_LEASE_RENEWAL_INTERVAL)
    }
}

/// A database login, optionally backed by a lease.
#[derive(Debug, Clone)]
pub struct DbCredentials {
    pub username: String,
    pub password: SecretString,
    pub lease: Option<Lease>,
}

impl DbCredentials {
    /// Applies the login to connection options parsed from `DATABASE_URL`.
    pub fn apply(&self, options: PgConnectOptions) -> PgConnectOptions {
        options
            .username(&self.username)
            .password(self.password.expose_secret())
    }
}

/// Trait for credential providers
///
/// Implementations are called once at startup. The returned lease, if any,
/// is kept alive through [`CredentialSource::renew`].
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Fetches a database login.
    ///
    /// `None` means the login already present in `DATABASE_URL` should be used.
    async fn fetch(&self) -> Result<Option<DbCredentials>, CredentialError>;

    /// Extends the given lease. Sources without leases have nothing to do.
    async fn renew(&self, _lease: &Lease) -> Result<Lease, CredentialError> {
        Err(CredentialError::RenewUnsupported)
    }
}

/// Uses the login embedded in `DATABASE_URL`.
pub struct StaticCredentials;

#[async_trait]
impl CredentialSource for StaticCredentials {
    async fn fetch(&self) -> Result<Option<DbCredentials>, CredentialError> {
        debug!("Using static database credentials");
        Ok(None)
    }
}

/// Requests credentials from the Vault database secrets engine.
pub struct VaultCredentials {
    vault_addr: String,
    token: SecretString,
    mount: String,
    role: String,
    http_client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct VaultCredsResponse {
    #[serde(default)]
    lease_id: String,
    #[serde(default)]
    lease_duration: u64,
    #[serde(default)]
    renewable: bool,
    data: VaultCredsData,
}

#[derive(Debug, Deserialize)]
struct VaultCredsData {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct VaultRenewResponse {
    lease_id: String,
    lease_duration: u64,
    renewable: bool,
}

impl VaultCredentials {
    /// Creates a new Vault credential source.
    ///
    /// # Arguments
    ///
    /// * `vault_addr` - Base URL of the Vault server, e.g. `http://127.0.0.1:8200`
    /// * `token` - Vault token allowed to read `{mount}/creds/{role}`
    /// * `mount` - Mount path of the database secrets engine
    /// * `role` - Database role to request credentials for
    pub fn new(
        vault_addr: impl Into<String>,
        token: SecretString,
        mount: impl Into<String>,
        role: impl Into<String>,
    ) -> Result<Self, CredentialError> {
        let vault_addr = vault_addr.into().trim_end_matches('/').to_string();
        let mount = mount.into().trim_matches('/').to_string();
        let role = role.into();

        info!(%vault_addr, %mount, %role, "Initializing Vault credential source");

        let http_client = reqwest::Client::builder()
            .timeout(VAULT_REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            vault_addr,
            token,
            mount,
            role,
            http_client,
        })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, CredentialError> {
        let response = request
            .header("X-Vault-Token", self.token.expose_secret())
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            error!(status = status.as_u16(), "Vault request failed");
            return Err(CredentialError::VaultStatus {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl CredentialSource for VaultCredentials {
    #[instrument(skip(self), fields(role = %self.role))]
    async fn fetch(&self) -> Result<Option<DbCredentials>, CredentialError> {
        let url = format!("{}/v1/{}/creds/{}", self.vault_addr, self.mount, self.role);
        let body = self.send(self.http_client.get(url)).await?;
        let creds = parse_creds(&body)?;

        info!(
            username = %creds.username,
            lease_duration = ?creds.lease.as_ref().map(|l| l.duration),
            "Obtained dynamic database credentials"
        );
        Ok(Some(creds))
    }

    #[instrument(skip_all, fields(lease_id = %lease.id))]
    async fn renew(&self, lease: &Lease) -> Result<Lease, CredentialError> {
        let url = format!("{}/v1/sys/leases/renew", self.vault_addr);
        let request = self.http_client.put(url).json(&json!({
            "lease_id": lease.id,
            "increment": lease.duration.as_secs(),
        }));
        let body = self.send(request).await?;
        let renewed: VaultRenewResponse = serde_json::from_str(&body)?;

        debug!(lease_duration = renewed.lease_duration, "Lease renewed");
        Ok(Lease {
            id: renewed.lease_id,
            duration: Duration::from_secs(renewed.lease_duration),
            renewable: renewed.renewable,
        })
    }
}

fn parse_creds(body: &str) -> Result<DbCredentials, CredentialError> {
    let parsed: VaultCredsResponse = serde_json::from_str(body)?;

    let lease = (!parsed.lease_id.is_empty()).then(|| Lease {
        id: parsed.lease_id,
        duration: Duration::from_secs(parsed.lease_duration),
        renewable: parsed.renewable,
    });

    Ok(DbCredentials {
        username: parsed.data.username,
        password: SecretString::from(parsed.data.password),
        lease,
    })
}

/// Builds the credential source described by the environment.
///
/// # Errors
///
/// Returns [`CredentialError::MissingConfig`] when `VAULT_ADDR` is set
/// without a token.
pub fn credential_source_from_env() -> Result<Arc<dyn CredentialSource>, CredentialError> {
    credential_source_from_vars("VAULT_ADDR", "VAULT_TOKEN_FILE", "VAULT_TOKEN")
}

fn credential_source_from_vars(
    addr_var: &str,
    token_file_var: &str,
    token_var: &'static str,
) -> Result<Arc<dyn CredentialSource>, CredentialError> {
    match env::var(addr_var).ok().filter(|v| !v.is_empty()) {
        Some(vault_addr) => {
            info!("Using dynamic database credentials from [VaultCredentials]");
            let token = get_secret(token_file_var, token_var)
                .ok_or(CredentialError::MissingConfig(token_var))?;
            Ok(Arc::new(VaultCredentials::new(
                vault_addr,
                SecretString::from(token),
                env_or("VAULT_DB_MOUNT", DEFAULT_VAULT_DB_MOUNT),
                env_or("VAULT_DB_ROLE", DEFAULT_VAULT_DB_ROLE),
            )?))
        }
        None => {
            info!("Using static database credentials from [StaticCredentials]");
            Ok(Arc::new(StaticCredentials))
        }
    }
}

/// Parses `DATABASE_URL` (or the file named by `DATABASE_URL_FILE`) into
/// connection options. Credentials from a [`CredentialSource`] are applied on top.
pub fn connect_options_from_env() -> Result<PgConnectOptions, CredentialError> {
    connect_options_from_vars("DATABASE_URL_FILE", "DATABASE_URL")
}

fn connect_options_from_vars(
    file_var: &str,
    url_var: &'static str,
) -> Result<PgConnectOptions, CredentialError> {
    let database_url =
        get_secret(file_var, url_var).ok_or(CredentialError::MissingConfig(url_var))?;
    PgConnectOptions::from_str(&database_url).map_err(CredentialError::InvalidDatabaseUrl)
}
