//! Admin sign-in with expiring, server-verified sessions.
//!
//! A session is only valid while its token is registered here and has not
//! expired. Holding on to a token after logout or past its expiry grants
//! nothing.

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
};

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::AuthError;

/// Username and password as typed on the sign-in form.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// The signed-in administrator, as shown in the admin layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminProfile {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

/// An issued admin session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: Uuid,
    pub admin: AdminProfile,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Capability check used by the admin panel.
pub trait AdminAuth {
    /// The current session, if it exists and is still valid.
    fn current_session(&self) -> Result<Session, AuthError>;

    fn has_valid_session(&self) -> bool {
        self.current_session().is_ok()
    }

    /// Check the credentials and start a new session.
    fn login(&self, credentials: &Credentials) -> Result<Session, AuthError>;

    /// End the current session, if any.
    fn logout(&self);
}

/// Hex-encoded SHA-256 digest of a password.
///
/// Unsalted and compared with `==`; not meant for production password storage.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

#[derive(Debug)]
struct Account {
    profile: AdminProfile,
    password_digest: String,
}

/// Session-based [`AdminAuth`] over a fixed set of accounts.
#[derive(Debug)]
pub struct SessionAuth {
    accounts: HashMap<String, Account>,
    ttl: TimeDelta,
    sessions: RefCell<HashMap<Uuid, Session>>,
    current: Cell<Option<Uuid>>,
}

impl SessionAuth {
    pub fn new(ttl: TimeDelta) -> Self {
        Self {
            accounts: HashMap::new(),
            ttl,
            sessions: RefCell::new(HashMap::new()),
            current: Cell::new(None),
        }
    }

    /// Register an account with a plain-text password.
    pub fn with_account(self, profile: AdminProfile, password: &str) -> Self {
        self.with_hashed_account(profile, password_digest(password))
    }

    /// Register an account with a password digest from [`password_digest`].
    pub fn with_hashed_account(mut self, profile: AdminProfile, digest: String) -> Self {
        self.accounts.insert(
            profile.username.clone(),
            Account {
                profile,
                password_digest: digest.to_ascii_lowercase(),
            },
        );
        self
    }

    pub fn login_at(
        &self,
        credentials: &Credentials,
        now: DateTime<Utc>,
    ) -> Result<Session, AuthError> {
        let account = self
            .accounts
            .get(credentials.username.trim())
            .filter(|account| account.password_digest == password_digest(&credentials.password))
            .ok_or_else(|| {
                warn!(username = %credentials.username, "Rejected admin login");
                AuthError::InvalidCredentials
            })?;

        self.logout();

        let session = Session {
            token: Uuid::new_v4(),
            admin: account.profile.clone(),
            issued_at: now,
            expires_at: now + self.ttl,
        };
        self.sessions
            .borrow_mut()
            .insert(session.token, session.clone());
        self.current.set(Some(session.token));

        info!(username = %session.admin.username, expires_at = %session.expires_at, "Admin logged in");
        Ok(session)
    }

    /// Check an arbitrary token, evicting it if it has expired.
    pub fn verify_at(&self, token: Uuid, now: DateTime<Utc>) -> Result<Session, AuthError> {
        let mut sessions = self.sessions.borrow_mut();
        let session = sessions.get(&token).ok_or(AuthError::UnknownSession)?;
        if session.is_expired_at(now) {
            debug!(username = %session.admin.username, "Session expired");
            sessions.remove(&token);
            return Err(AuthError::SessionExpired);
        }
        Ok(session.clone())
    }

    /// Check the current session.
    pub fn current_session_at(&self, now: DateTime<Utc>) -> Result<Session, AuthError> {
        let token = self.current.get().ok_or(AuthError::UnknownSession)?;
        self.verify_at(token, now).inspect_err(|_| self.current.set(None))
    }
}

impl AdminAuth for SessionAuth {
    fn current_session(&self) -> Result<Session, AuthError> {
        self.current_session_at(Utc::now())
    }

    fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        self.login_at(credentials, Utc::now())
    }

    fn logout(&self) {
        if let Some(token) = self.current.take()
            && let Some(session) = self.sessions.borrow_mut().remove(&token)
        {
            info!(username = %session.admin.username, "Admin logged out");
        }
    }
}
