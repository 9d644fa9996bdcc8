//! Who is signed in.
//!
//! There is no real authentication here. `IdentityProvider` is the seam where a real identity
//! service would plug in; `MockProvider` derives a stable id from the email address, or returns a
//! fixed user for the "Google" button. No credential is verified and none is kept.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};

/// The message shown when an email or password is missing.
pub const MISSING_CREDENTIALS: &str = "Please enter email and password";

/// The signed-in user. `id` namespaces the user's stored records and must be stable across
/// sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    id: String,
    label: String,
    email: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, label: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            email: email.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display name.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// What the user signs in with.
#[derive(Clone)]
pub enum Credential {
    Email { email: String, password: String },
    Google,
}

impl Credential {
    pub fn email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credential::Email {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Email { email, .. } => f
                .debug_struct("Email")
                .field("email", email)
                .field("password", &"********")
                .finish(),
            Credential::Google => f.write_str("Google"),
        }
    }
}

/// Returned when a credential is rejected. The message is shown inline on the sign-in form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError(String);

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for AuthError {}

/// Turns credentials into an `Identity`.
pub trait IdentityProvider {
    /// Consumes the credential; nothing of it is retained beyond the returned `Identity`.
    fn sign_in(&self, credential: Credential) -> Result<Identity, AuthError>;

    /// Forgets any provider-side state for the current user.
    fn sign_out(&self) {}
}

/// The stand-in provider. Any non-empty email and password pair succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockProvider;

impl MockProvider {
    pub const GOOGLE_ID: &'static str = "google_user_123";
    pub const GOOGLE_LABEL: &'static str = "Google User";
    pub const GOOGLE_EMAIL: &'static str = "user@gmail.com";
}

impl IdentityProvider for MockProvider {
    fn sign_in(&self, credential: Credential) -> Result<Identity, AuthError> {
        match credential {
            Credential::Email { email, password } => {
                if email.is_empty() || password.is_empty() {
                    return Err(AuthError::new(MISSING_CREDENTIALS));
                }
                let label = email.split('@').next().unwrap_or_default().to_string();
                Ok(Identity::new(B64.encode(email.as_bytes()), label, email))
            }
            Credential::Google => Ok(Identity::new(
                Self::GOOGLE_ID,
                Self::GOOGLE_LABEL,
                Self::GOOGLE_EMAIL,
            )),
        }
    }
}
