use error_stack::ResultExt;
use kernel::KernelError;

pub mod database;
pub mod error;

pub fn env(key: &str) -> error_stack::Result<String, KernelError> {
    dotenvy::var(key)
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| format!("Failed to read environment variable {key}"))
}

/// Reads `key`, falling back to `default` when it is unset.
pub fn env_or(key: &str, default: &str) -> String {
    env(key).unwrap_or_else(|_| {
        tracing::info!("{key} not set, using default");
        default.to_string()
    })
}
