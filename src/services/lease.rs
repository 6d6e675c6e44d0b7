//! # Lease Renewal
//!
//! Keeps a Vault lease alive for as long as the server runs. A failed renewal
//! (network error or non-2xx answer) is logged and retried on the next tick.
//! The task stops only when Vault reports the renewed lease as no longer
//! renewable; the credentials then expire with it.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use super::credentials::{CredentialSource, Lease};

/// Spawns a background task renewing `lease` at [`Lease::renewal_interval`].
///
/// Returns `None` without spawning when the lease is not renewable.
pub fn spawn_lease_renewal(
    source: Arc<dyn CredentialSource>,
    lease: Lease,
) -> Option<JoinHandle<()>> {
    if !lease.renewable {
        info!(lease_id = %lease.id, "Lease is not renewable, skipping renewal task");
        return None;
    }

    Some(tokio::spawn(renew_forever(source, lease)))
}

#[instrument(skip_all, fields(lease_id = %lease.id))]
async fn renew_forever(source: Arc<dyn CredentialSource>, mut lease: Lease) {
    let mut interval = tokio::time::interval(lease.renewal_interval());
    interval.tick().await; // first tick completes immediately

    loop {
        interval.tick().await;
        match source.renew(&lease).await {
            Ok(renewed) => {
                info!(lease_duration = ?renewed.duration, "Renewed database credential lease");
                let period = renewed.renewal_interval();
                if !renewed.renewable {
                    warn!("Lease can no longer be renewed, stopping renewal task");
                    return;
                }
                if period != interval.period() {
                    interval = tokio::time::interval(period);
                    interval.tick().await;
                }
                lease = renewed;
            }
            Err(e) => warn!(error = %e, "Failed to renew database credential lease"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::services::credentials::{CredentialError, DbCredentials};

    struct CountingSource {
        renewals: AtomicUsize,
        fail: bool,
        /// Duration and renewability handed back on renewal; `None` echoes the lease.
        renew_to: Option<(Duration, bool)>,
        seen: Mutex<Vec<Duration>>,
    }

    impl CountingSource {
        fn new(fail: bool, renew_to: Option<(Duration, bool)>) -> Arc<Self> {
            Arc::new(Self {
                renewals: AtomicUsize::new(0),
                fail,
                renew_to,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CredentialSource for CountingSource {
        async fn fetch(&self) -> Result<Option<DbCredentials>, CredentialError> {
            Ok(None)
        }

        async fn renew(&self, lease: &Lease) -> Result<Lease, CredentialError> {
            self.renewals.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(lease.duration);
            if self.fail {
                return Err(CredentialError::VaultStatus {
                    status: 400,
                    body: "lease not found or lease is not renewable".to_string(),
                });
            }
            let mut renewed = lease.clone();
            if let Some((duration, renewable)) = self.renew_to {
                renewed.duration = duration;
                renewed.renewable = renewable;
            }
            Ok(renewed)
        }
    }

    fn lease(renewable: bool) -> Lease {
        Lease {
            id: "database/creds/superheroes/abc".to_string(),
            duration: Duration::from_secs(60),
            renewable,
        }
    }

    #[tokio::test]
    async fn non_renewable_lease_spawns_nothing() {
        let source = CountingSource::new(false, None);

        assert!(spawn_lease_renewal(source, lease(false)).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn renews_every_half_lease() {
        let source = CountingSource::new(false, None);
        let handle = spawn_lease_renewal(source.clone(), lease(true)).unwrap();

        tokio::time::sleep(Duration::from_secs(95)).await;
        assert_eq!(source.renewals.load(Ordering::SeqCst), 3);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_running_after_failures() {
        let source = CountingSource::new(true, None);
        let handle = spawn_lease_renewal(source.clone(), lease(true)).unwrap();

        tokio::time::sleep(Duration::from_secs(65)).await;
        assert_eq!(source.renewals.load(Ordering::SeqCst), 2);
        assert!(!handle.is_finished());

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn stops_once_lease_is_no_longer_renewable() {
        let source = CountingSource::new(false, Some((Duration::from_secs(60), false)));
        let handle = spawn_lease_renewal(source.clone(), lease(true)).unwrap();

        tokio::time::sleep(Duration::from_secs(95)).await;
        assert_eq!(source.renewals.load(Ordering::SeqCst), 1);
        assert!(handle.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn follows_a_changed_lease_duration() {
        // 60s lease renews at 30s; Vault then shortens it to 20s, so renewals
        // follow every 10s with the new duration as increment.
        let source = CountingSource::new(false, Some((Duration::from_secs(20), true)));
        let handle = spawn_lease_renewal(source.clone(), lease(true)).unwrap();

        tokio::time::sleep(Duration::from_secs(55)).await;
        assert_eq!(source.renewals.load(Ordering::SeqCst), 3);
        assert_eq!(
            *source.seen.lock().unwrap(),
            vec![
                Duration::from_secs(60),
                Duration::from_secs(20),
                Duration::from_secs(20)
            ]
        );

        handle.abort();
    }
}
