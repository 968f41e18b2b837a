use std::collections::HashMap;

use tracing::warn;

use crate::application::CallerAuthenticator;
use crate::domain::{CallerIdentity, DomainError};

/// Authenticates callers against a fixed table of bearer tokens.
///
/// The table is written as `uid:token` pairs separated by commas, e.g.
/// `alice:s3cr3t,bob:t0ken`. An empty table rejects every caller.
pub struct StaticTokenAuthenticator {
    tokens: HashMap<String, CallerIdentity>,
}

impl StaticTokenAuthenticator {
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    pub fn with_token(mut self, uid: impl Into<String>, token: impl Into<String>) -> Self {
        self.tokens.insert(token.into(), CallerIdentity::new(uid));
        self
    }

    pub fn parse(table: &str) -> Result<Self, DomainError> {
        let mut authenticator = Self::new();
        for entry in table.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (uid, token) = entry.split_once(':').ok_or_else(|| {
                DomainError::configuration(format!(
                    "caller token entry '{}' must look like uid:token",
                    entry
                ))
            })?;
            let (uid, token) = (uid.trim(), token.trim());
            if uid.is_empty() || token.is_empty() {
                return Err(DomainError::configuration(format!(
                    "caller token entry '{}' has an empty uid or token",
                    entry
                )));
            }
            authenticator = authenticator.with_token(uid, token);
        }

        if authenticator.is_empty() {
            warn!("No caller tokens configured; every callable request will be rejected as unauthenticated");
        }
        Ok(authenticator)
    }

    /// Reads the table from `SOLACE_CALLER_TOKENS`.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::parse(&std::env::var("SOLACE_CALLER_TOKENS").unwrap_or_default())
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for StaticTokenAuthenticator {
    fn default() -> Self {
        Self::new()
    }
}

impl CallerAuthenticator for StaticTokenAuthenticator {
    fn authenticate(&self, bearer_token: Option<&str>) -> Option<CallerIdentity> {
        let token = bearer_token?.trim();
        if token.is_empty() {
            return None;
        }
        self.tokens.get(token).cloned()
    }
}
