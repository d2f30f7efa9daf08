use axum_extra::extract::cookie::Key;
use error_stack::ResultExt;
use kernel::KernelError;

const SERVER_PORT: &str = "SERVER_PORT";
const SECRET_KEY: &str = "SECRET_KEY";

const DEFAULT_PORT: &str = "5000";

pub struct ServerConfig {
    pub port: u16,
    /// Signs the flash cookie.
    pub key: Key,
}

impl ServerConfig {
    pub fn load() -> error_stack::Result<Self, KernelError> {
        let port = driver::env_or(SERVER_PORT, DEFAULT_PORT);
        let port = port
            .parse::<u16>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("Invalid {SERVER_PORT} value: {port}"))?;
        Ok(Self {
            port,
            key: signing_key(driver::env(SECRET_KEY).ok()),
        })
    }
}

fn signing_key(secret: Option<String>) -> Key {
    match secret.as_deref().map(|secret| Key::try_from(secret.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(_)) => {
            tracing::warn!("{SECRET_KEY} must be at least 64 bytes, using a random key");
            Key::generate()
        }
        None => {
            tracing::warn!("{SECRET_KEY} not set, using a random key");
            Key::generate()
        }
    }
}
