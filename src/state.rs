//! Shared application state injected into every handler.

use std::sync::Arc;

use sha2::{Digest, Sha256};
use sqlx::PgPool;
use tokio_util::task::TaskTracker;
use tracing::info_span;

use crate::application::services::{LinkService, RedirectService, VisitService};
use crate::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};

pub type PgLinkService = LinkService<PgLinkRepository>;
pub type PgVisitService = VisitService<PgLinkRepository, PgVisitRepository>;
pub type PgRedirectService = RedirectService<PgLinkRepository, PgVisitRepository>;

/// Admin credentials for the basic-auth gate.
///
/// Only SHA-256 digests are kept so comparisons always hash inputs of
/// arbitrary length down to the same size.
#[derive(Clone)]
pub struct BasicCredentials {
    username_digest: [u8; 32],
    password_digest: [u8; 32],
}

impl BasicCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username_digest: Sha256::digest(username.as_bytes()).into(),
            password_digest: Sha256::digest(password.as_bytes()).into(),
        }
    }

    /// Builds credentials only when both parts are configured.
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (username, password) {
            (Some(u), Some(p)) => Some(Self::new(u, p)),
            _ => None,
        }
    }

    /// Checks a presented username/password pair.
    ///
    /// Both digests are always compared, whatever the first result.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = digest_eq(&self.username_digest, username);
        let pass_ok = digest_eq(&self.password_digest, password);
        user_ok & pass_ok
    }
}

fn digest_eq(expected: &[u8; 32], candidate: &str) -> bool {
    let actual: [u8; 32] = Sha256::digest(candidate.as_bytes()).into();
    expected
        .iter()
        .zip(actual.iter())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

impl std::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BasicCredentials(***)")
    }
}

/// Shared state: services wired to PostgreSQL plus request-level settings.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<PgPool>,
    pub link_service: Arc<PgLinkService>,
    pub visit_service: Arc<PgVisitService>,
    pub redirect_service: Arc<PgRedirectService>,
    /// `None` disables the basic-auth gate.
    pub credentials: Option<BasicCredentials>,
    pub behind_proxy: bool,
    /// Background visit accounting spawned by redirects.
    pub accounting: TaskTracker,
}

impl AppState {
    /// Wires repositories and services around `pool`.
    pub fn new(pool: PgPool, credentials: Option<BasicCredentials>, behind_proxy: bool) -> Self {
        let pool = Arc::new(pool);

        let link_repository = Arc::new(PgLinkRepository::new(Arc::clone(&pool)));
        let visit_repository = Arc::new(PgVisitRepository::new(Arc::clone(&pool)));

        let link_service = Arc::new(LinkService::new(
            Arc::clone(&link_repository),
            info_span!("link_service"),
        ));
        let visit_service = Arc::new(VisitService::new(
            Arc::clone(&link_repository),
            visit_repository,
            info_span!("visit_service"),
        ));
        let accounting = TaskTracker::new();
        let redirect_service = Arc::new(RedirectService::new(
            link_repository,
            Arc::clone(&visit_service),
            accounting.clone(),
            info_span!("redirect_service"),
        ));

        Self {
            pool,
            link_service,
            visit_service,
            redirect_service,
            credentials,
            behind_proxy,
            accounting,
        }
    }

    /// Waits for every in-flight visit accounting task to finish.
    ///
    /// Tasks spawned afterwards are still tracked and waited for.
    pub async fn drain_accounting(&self) {
        self.accounting.close();
        self.accounting.wait().await;
    }
}
