use std::sync::{Arc, RwLock};

use thiserror::Error;

/// The two secrets every request needs: the webhook shared secret and the
/// Bot API token.
#[derive(Clone, PartialEq, Eq)]
pub struct Environment {
    pub secret: String,
    pub token: String,
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("secret", &"<redacted>")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("environment has not been initialized")]
    Uninitialized,
}

/// Holder for the current [`Environment`].
///
/// Owned by the application state rather than living in a global. Readers get
/// an `Arc` snapshot, so a request keeps the secrets it started with even if
/// the slot is overwritten while it runs.
#[derive(Default)]
pub struct EnvironmentSlot {
    current: RwLock<Option<Arc<Environment>>>,
}

impl EnvironmentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(env: Environment) -> Self {
        let slot = Self::new();
        slot.set(env);
        slot
    }

    /// Store `env`, replacing whatever was there.
    pub fn set(&self, env: Environment) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(Arc::new(env));
    }

    pub fn get(&self) -> Result<Arc<Environment>, EnvError> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(EnvError::Uninitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(secret: &str, token: &str) -> Environment {
        Environment {
            secret: secret.to_string(),
            token: token.to_string(),
        }
    }

    #[test]
    fn test_get_before_set_is_uninitialized() {
        let slot = EnvironmentSlot::new();
        assert_eq!(slot.get().unwrap_err(), EnvError::Uninitialized);
    }

    #[test]
    fn test_set_overwrites() {
        let slot = EnvironmentSlot::with(env("a", "1"));
        slot.set(env("b", "2"));
        assert_eq!(*slot.get().unwrap(), env("b", "2"));
    }

    #[test]
    fn test_snapshot_survives_overwrite() {
        let slot = EnvironmentSlot::with(env("a", "1"));
        let snapshot = slot.get().unwrap();
        slot.set(env("b", "2"));
        assert_eq!(snapshot.secret, "a");
        assert_eq!(snapshot.token, "1");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let rendered = format!("{:?}", env("hunter2", "123:abc"));
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("123:abc"));
    }
}
