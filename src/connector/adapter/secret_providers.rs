use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::application::SecretProvider;
use crate::domain::DomainError;

/// Reads secrets from process environment variables on every call.
pub struct EnvSecretProvider;

impl EnvSecretProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnvSecretProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SecretProvider for EnvSecretProvider {
    async fn resolve(&self, name: &str) -> Result<String, DomainError> {
        match std::env::var(name) {
            Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(DomainError::configuration(format!(
                "secret {} is not set in the environment",
                name
            ))),
        }
    }
}

/// Reads secrets from a mounted directory: secret `NAME` lives in `<dir>/NAME`.
///
/// The file is read on every call; surrounding whitespace is trimmed.
pub struct FileSecretProvider {
    dir: PathBuf,
}

impl FileSecretProvider {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// `SOLACE_SECRETS_DIR`, when set.
    pub fn from_env() -> Option<Self> {
        std::env::var("SOLACE_SECRETS_DIR").ok().map(Self::new)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl SecretProvider for FileSecretProvider {
    async fn resolve(&self, name: &str) -> Result<String, DomainError> {
        if name.contains('/') || name.contains('\\') || name.starts_with('.') {
            return Err(DomainError::configuration(format!(
                "invalid secret name: {}",
                name
            )));
        }

        let path = self.dir.join(name);
        debug!("Resolving secret {} from {}", name, path.display());

        let value = tokio::fs::read_to_string(&path).await.map_err(|e| {
            DomainError::configuration(format!(
                "secret {} could not be read from {}: {}",
                name,
                path.display(),
                e
            ))
        })?;

        let value = value.trim();
        if value.is_empty() {
            return Err(DomainError::configuration(format!("secret {} is empty", name)));
        }
        Ok(value.to_string())
    }
}
