//! Role guards for protected operations
//!
//! A guard is a request-scoped predicate over an already-authenticated
//! identity's role. It runs strictly after identity resolution and never
//! inspects the raw token. The permitted set is fixed at registration time
//! for each protected operation.

use crate::{AuthError, AuthResult};
use std::collections::HashSet;

/// Role membership check attached to a protected operation
///
/// Membership is exact-match and case-sensitive: `"Admin"` does not satisfy
/// a guard built over `"admin"`.
#[derive(Debug, Clone, Default)]
pub struct RoleGuard {
    allowed: HashSet<String>,
}

impl RoleGuard {
    /// Create a guard permitting the given roles
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Permit an additional role
    pub fn allow<S: Into<String>>(mut self, role: S) -> Self {
        self.allowed.insert(role.into());
        self
    }

    /// Whether the role is in the permitted set
    pub fn allows(&self, role: &str) -> bool {
        self.allowed.contains(role)
    }

    /// Allow the request through or fail with `Forbidden`
    pub fn check(&self, role: &str) -> AuthResult<()> {
        if self.allows(role) {
            Ok(())
        } else {
            tracing::debug!(%role, "role not in permitted set");
            Err(AuthError::Forbidden {
                required: self.allowed.iter().cloned().collect::<Vec<_>>().join(", "),
            })
        }
    }
}
