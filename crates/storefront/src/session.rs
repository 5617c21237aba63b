//! The auth session: at most one logged-in identity.

use serde::{Deserialize, Serialize};

use minimart_core::{UserId, UserRole};

/// A logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
}

impl UserIdentity {
    /// The degraded local identity used when the backend cannot be
    /// reached during login. Always a shopper.
    #[must_use]
    pub fn guest(username: &str) -> Self {
        Self {
            id: UserId::new(0),
            username: username.to_string(),
            email: format!("{username}@guest.local"),
            full_name: username.to_string(),
            role: UserRole::Shopper,
        }
    }
}

/// Session state: anonymous or authenticated.
///
/// Login replaces the identity wholesale; logout clears it
/// unconditionally. Nothing here expires or persists - the session lives
/// and dies with the process.
#[derive(Debug, Default)]
pub struct AuthSession {
    user: Option<UserIdentity>,
}

impl AuthSession {
    /// Create an anonymous session.
    #[must_use]
    pub const fn new() -> Self {
        Self { user: None }
    }

    /// Move to authenticated, replacing any current identity.
    pub fn login(&mut self, identity: UserIdentity) {
        self.user = Some(identity);
    }

    /// Move to anonymous unconditionally.
    pub fn logout(&mut self) {
        self.user = None;
    }

    /// The current identity, if authenticated.
    #[must_use]
    pub const fn current(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    /// Whether anyone is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the logged-in user is an admin.
    ///
    /// This is the hard branch at the top of the view tree: when it is
    /// true the entire shopper surface is bypassed for the back-office
    /// surface, and only a logout brings the shopper surface back.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .is_some_and(|u| u.role == UserRole::Admin)
    }
}
