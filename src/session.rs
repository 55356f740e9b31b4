//! Explicit per-user context.
//!
//! There is no ambient "current user" anywhere in this crate: every store and client
//! operation takes a [`Session`] (or an `Option<&Session>` where anonymous access has a
//! defined meaning).

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Opaque user identifier, assigned by the identity provider
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// A signed-in user, and the bearer token to authenticate their requests with.
///
/// The token is optional: requests without one simply proceed unauthenticated, and
/// server-side authorization decides what happens next.
#[derive(Clone, Debug)]
pub struct Session {
    user: UserId,
    token: Option<String>,
}

impl Session {
    /// A session without a bearer token
    pub fn new<U: Into<UserId>>(user: U) -> Self {
        Self {
            user: user.into(),
            token: None,
        }
    }

    /// A session whose requests will carry `Authorization: Bearer <token>`
    pub fn with_token<U: Into<UserId>, T: ToString>(user: U, token: T) -> Self {
        Self {
            user: user.into(),
            token: Some(token.to_string()),
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
