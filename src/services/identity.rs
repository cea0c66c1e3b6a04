//! # Identity Provider
//!
//! Who the shopper is. The session store calls an [`IdentityProvider`] for every sign-in
//! and registration; [`SimulatedIdentityProvider`] stands in for a hosted auth service.

use crate::model::{Role, UserId, UserProfile};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Sign-in failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Sign-in popup was closed before completing")]
    PopupCancelled,
    #[error("Identity provider error: {0}")]
    Provider(String),
}

/// Account creation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Email already in use: {0}")]
    EmailInUse(String),
    #[error("Invalid registration input: {0}")]
    InvalidInput(String),
    #[error("Identity provider error: {0}")]
    Provider(String),
}

/// External identity service.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Email and password sign-in.
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, AuthenticationError>;

    /// Third-party sign-in through a popup window.
    async fn authenticate_with_popup(&self) -> Result<UserProfile, AuthenticationError>;

    /// Creates an account and signs it in.
    async fn create_account(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, RegistrationError>;
}

/// In-memory identity provider.
///
/// * Any email and password signs in. The role is decided on every sign-in: admin if
///   the email contains `"admin"`, user otherwise. An email seen before keeps its uid and
///   display name; a new one gets a fresh uid and the part before `@` as its name.
/// * The popup always returns the same Google test account, unless built with
///   [`SimulatedIdentityProvider::cancelling_popups`].
/// * Registration rejects a blank name, an email without `@`, and an email already
///   registered. Registering an email that has only signed in before is allowed and keeps
///   its uid. Registered accounts start with the user role.
///
/// Every call waits `delay` first.
pub struct SimulatedIdentityProvider {
    delay: Duration,
    cancel_popups: bool,
    accounts: Mutex<HashMap<String, Account>>,
}

/// What the provider remembers about an email.
struct Account {
    uid: UserId,
    display_name: String,
    created_at: DateTime<Utc>,
    registered: bool,
}

impl Account {
    fn new(email: &str) -> Self {
        Self {
            uid: UserId(Uuid::new_v4().to_string()),
            display_name: local_part(email).to_string(),
            created_at: Utc::now(),
            registered: false,
        }
    }

    fn profile(&self, email: &str, role: Role) -> UserProfile {
        UserProfile {
            uid: self.uid.clone(),
            email: email.to_string(),
            display_name: self.display_name.clone(),
            role,
            created_at: self.created_at,
        }
    }
}

impl SimulatedIdentityProvider {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            cancel_popups: false,
            accounts: Mutex::new(HashMap::new()),
        }
    }

    /// Makes every popup sign-in fail as if the shopper closed the window.
    pub fn cancelling_popups(mut self) -> Self {
        self.cancel_popups = true;
        self
    }

    async fn simulate_latency(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

fn role_for(email: &str) -> Role {
    if email.contains("admin") {
        Role::Admin
    } else {
        Role::User
    }
}

fn local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

fn google_test_profile() -> UserProfile {
    UserProfile {
        uid: UserId::from("g-123"),
        email: "google@test.com".to_string(),
        display_name: "Google User".to_string(),
        role: Role::User,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl IdentityProvider for SimulatedIdentityProvider {
    #[instrument(skip(self, _password))]
    async fn authenticate(
        &self,
        email: &str,
        _password: &str,
    ) -> Result<UserProfile, AuthenticationError> {
        self.simulate_latency().await;
        let mut accounts = self.accounts.lock().await;
        let account = accounts.entry(email.to_string()).or_insert_with(|| {
            debug!("First sign-in, issuing uid");
            Account::new(email)
        });
        let profile = account.profile(email, role_for(email));
        info!(uid = %profile.uid, role = ?profile.role, "Authenticated");
        Ok(profile)
    }

    #[instrument(skip(self))]
    async fn authenticate_with_popup(&self) -> Result<UserProfile, AuthenticationError> {
        self.simulate_latency().await;
        if self.cancel_popups {
            warn!("Popup closed");
            return Err(AuthenticationError::PopupCancelled);
        }
        Ok(google_test_profile())
    }

    #[instrument(skip(self, _password))]
    async fn create_account(
        &self,
        name: &str,
        email: &str,
        _password: &str,
    ) -> Result<UserProfile, RegistrationError> {
        self.simulate_latency().await;
        if name.trim().is_empty() {
            return Err(RegistrationError::InvalidInput("name is required".into()));
        }
        let (local, domain) = email
            .split_once('@')
            .ok_or_else(|| RegistrationError::InvalidInput(format!("malformed email: {email}")))?;
        if local.is_empty() || domain.is_empty() {
            return Err(RegistrationError::InvalidInput(format!(
                "malformed email: {email}"
            )));
        }

        let mut accounts = self.accounts.lock().await;
        let account = accounts
            .entry(email.to_string())
            .or_insert_with(|| Account::new(email));
        if account.registered {
            warn!("Email already registered");
            return Err(RegistrationError::EmailInUse(email.to_string()));
        }
        account.registered = true;
        account.display_name = name.trim().to_string();
        let profile = account.profile(email, Role::User);
        info!(uid = %profile.uid, "Account created");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> SimulatedIdentityProvider {
        SimulatedIdentityProvider::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_admin_role_follows_email() {
        let idp = provider();
        let admin = idp.authenticate("admin@shop.com", "pw").await.unwrap();
        let user = idp.authenticate("sara@shop.com", "pw").await.unwrap();

        assert_eq!(admin.role, Role::Admin);
        assert!(admin.is_admin());
        assert_eq!(user.role, Role::User);
        assert_eq!(user.display_name, "sara");
    }

    #[tokio::test]
    async fn test_repeat_sign_in_keeps_uid() {
        let idp = provider();
        let first = idp.authenticate("sara@shop.com", "pw").await.unwrap();
        let second = idp.authenticate("sara@shop.com", "other").await.unwrap();
        assert_eq!(first.uid, second.uid);
    }

    #[tokio::test]
    async fn test_sign_in_after_registration_uses_email_role() {
        let idp = provider();
        let registered = idp
            .create_account("Boss", "admin@shop.com", "pw")
            .await
            .unwrap();
        assert_eq!(registered.role, Role::User);

        let signed_in = idp.authenticate("admin@shop.com", "pw").await.unwrap();
        assert_eq!(signed_in.role, Role::Admin);
        assert_eq!(signed_in.uid, registered.uid);
        assert_eq!(signed_in.display_name, "Boss");
    }

    #[tokio::test]
    async fn test_register_after_sign_in_keeps_uid() {
        let idp = provider();
        let signed_in = idp.authenticate("sara@shop.com", "pw").await.unwrap();
        let registered = idp
            .create_account("Sara", "sara@shop.com", "pw")
            .await
            .unwrap();
        assert_eq!(registered.uid, signed_in.uid);
        assert_eq!(registered.display_name, "Sara");

        assert_eq!(
            idp.create_account("Sara", "sara@shop.com", "pw").await.unwrap_err(),
            RegistrationError::EmailInUse("sara@shop.com".into())
        );
    }

    #[tokio::test]
    async fn test_popup_profile_and_cancellation() {
        let profile = provider().authenticate_with_popup().await.unwrap();
        assert_eq!(profile.uid, UserId::from("g-123"));
        assert_eq!(profile.email, "google@test.com");
        assert_eq!(profile.display_name, "Google User");
        assert_eq!(profile.role, Role::User);

        let err = provider()
            .cancelling_popups()
            .authenticate_with_popup()
            .await
            .unwrap_err();
        assert_eq!(err, AuthenticationError::PopupCancelled);
    }

    #[tokio::test]
    async fn test_register_uses_given_name_and_user_role() {
        let profile = provider()
            .create_account("  Ahmed Ali ", "admin@shop.com", "pw")
            .await
            .unwrap();
        assert_eq!(profile.display_name, "Ahmed Ali");
        assert_eq!(profile.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates_and_bad_input() {
        let idp = provider();
        idp.create_account("Sara", "sara@shop.com", "pw").await.unwrap();

        assert_eq!(
            idp.create_account("Sara", "sara@shop.com", "pw").await.unwrap_err(),
            RegistrationError::EmailInUse("sara@shop.com".into())
        );
        assert!(matches!(
            idp.create_account(" ", "x@shop.com", "pw").await,
            Err(RegistrationError::InvalidInput(_))
        ));
        assert!(matches!(
            idp.create_account("X", "no-at-sign", "pw").await,
            Err(RegistrationError::InvalidInput(_))
        ));
        assert!(matches!(
            idp.create_account("X", "@shop.com", "pw").await,
            Err(RegistrationError::InvalidInput(_))
        ));
    }
}
