//! Session-to-admin mapping and the shared admin credential. Sessions are an
//! explicit key-value store with expiry; nothing framework-magic holds them.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use uuid::Uuid;

pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Admin sessions keyed by a random id. A hit slides the expiry forward, so
/// an active admin stays logged in; an idle session lapses after the ttl.
pub struct SessionStore {
    ttl: Duration,
    entries: Mutex<HashMap<String, Instant>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let mut entries = self.lock();
        entries.insert(id.clone(), Instant::now() + self.ttl);
        id
    }

    pub fn destroy(&self, id: &str) {
        self.lock().remove(id);
    }

    pub fn is_admin(&self, id: &str) -> bool {
        let mut entries = self.lock();
        let now = Instant::now();
        match entries.get_mut(id) {
            Some(expires_at) if *expires_at > now => {
                *expires_at = now + self.ttl;
                true
            }
            Some(_) => {
                entries.remove(id);
                false
            }
            None => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Instant>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One shared admin credential for the whole office, read from the
/// environment at startup. The digest form takes precedence so a deployment
/// can avoid keeping the plain password in its unit files.
#[derive(Debug, Clone)]
pub enum AdminCredential {
    Plain(String),
    Sha256Hex(String),
    Unset,
}

/// No admin credential configured on the server; login cannot succeed.
#[derive(Debug)]
pub struct CredentialUnset;

impl AdminCredential {
    pub fn from_env() -> Self {
        if let Ok(digest) = std::env::var("BUSBOARD_ADMIN_PASSWORD_SHA256") {
            if !digest.is_empty() {
                return AdminCredential::Sha256Hex(digest);
            }
        }
        if let Ok(plain) = std::env::var("BUSBOARD_ADMIN_PASSWORD") {
            if !plain.is_empty() {
                return AdminCredential::Plain(plain);
            }
        }
        AdminCredential::Unset
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, AdminCredential::Unset)
    }

    pub fn verify(&self, password: &str) -> Result<bool, CredentialUnset> {
        match self {
            AdminCredential::Plain(expected) => Ok(password == expected),
            AdminCredential::Sha256Hex(expected) => {
                let digest = format!("{:x}", Sha256::digest(password.as_bytes()));
                Ok(digest.eq_ignore_ascii_case(expected))
            }
            AdminCredential::Unset => Err(CredentialUnset),
        }
    }
}
