use crate::domain::CallerIdentity;

/// Maps the credential presented with an invocation to a caller identity.
pub trait CallerAuthenticator: Send + Sync {
    /// `None` when no credential was presented or it is not recognised.
    fn authenticate(&self, bearer_token: Option<&str>) -> Option<CallerIdentity>;
}
