//! In-process identity directory

use async_trait::async_trait;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::{AuthConfig, AuthError, AuthService, Claims, Registration, TokenIssuer, UserRecord};

/// Keeps user profiles in memory and issues tokens for them.
///
/// Passwords are required on the wire but are not stored or checked here:
/// credential verification belongs to the external identity provider.
#[derive(Debug)]
pub struct InMemoryAuthService {
    issuer: TokenIssuer,
    /// Profiles keyed by lowercased email
    users: RwLock<FxHashMap<String, UserRecord>>,
}

impl InMemoryAuthService {
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            issuer: TokenIssuer::new(config),
            users: RwLock::new(FxHashMap::default()),
        }
    }

    /// Number of registered users
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn require_credentials(email: &str, password: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    Ok(())
}

#[async_trait]
impl AuthService for InMemoryAuthService {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> Result<Registration, AuthError> {
        require_credentials(email, password)?;

        let user = {
            let mut users = self.users.write();
            let key = email_key(email);
            if users.contains_key(&key) {
                return Err(AuthError::EmailExists);
            }
            let user = UserRecord {
                uid: uuid::Uuid::new_v4().simple().to_string(),
                email: email.trim().to_string(),
                display_name,
            };
            users.insert(key, user.clone());
            user
        };

        let token = self.issuer.issue(&user.email, Some(&user.uid))?;
        info!(uid = %user.uid, "User registered");
        Ok(Registration { user, token })
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        require_credentials(email, password)?;

        let uid = self
            .users
            .read()
            .get(&email_key(email))
            .map(|user| user.uid.clone());

        info!(registered = uid.is_some(), "Login token issued");
        self.issuer.issue(email.trim(), uid.as_deref())
    }

    async fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.issuer.verify(token)
    }
}
