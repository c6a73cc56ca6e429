use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::session::DEFAULT_SESSION_TTL;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub data_dir: PathBuf,
    pub public_dir: PathBuf,
    pub session_ttl: Duration,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BUSBOARD_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            data_dir: PathBuf::from(
                env::var("BUSBOARD_DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            ),
            public_dir: PathBuf::from(
                env::var("BUSBOARD_PUBLIC_DIR").unwrap_or_else(|_| "public".to_string()),
            ),
            session_ttl: Duration::from_secs(env_u64(
                "BUSBOARD_SESSION_TTL_SECS",
                DEFAULT_SESSION_TTL.as_secs(),
            )),
        }
    }
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}
