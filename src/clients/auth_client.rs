//! # Auth Client
//!
//! The Auth Store: sign-in, registration and sign-out for one browsing session, plus the
//! `loading` flag the login page shows while the Google popup is open.
use crate::model::{Session, SessionId, UserProfile};
use crate::session_actor::{AuthError, SessionAction, SessionActionResult, SessionCreate};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use storefront_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client bound to a single session in the Session actor.
///
/// Clones share the session and the loading state.
#[derive(Clone)]
pub struct AuthClient {
    inner: ResourceClient<Session>,
    session_id: SessionId,
    /// Google sign-ins still waiting on the provider.
    loading: Arc<AtomicUsize>,
}

#[async_trait]
impl ActorClient<Session> for AuthClient {
    type Error = AuthError;

    fn inner(&self) -> &ResourceClient<Session> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<AuthError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => AuthError::NotFound(id),
            Err(other) => AuthError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// Counts one pending sign-in for as long as it lives.
struct Loading<'a>(&'a AtomicUsize);

impl<'a> Loading<'a> {
    fn start(pending: &'a AtomicUsize) -> Self {
        pending.fetch_add(1, Ordering::SeqCst);
        Self(pending)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AuthClient {
    pub fn new(inner: ResourceClient<Session>, session_id: SessionId) -> Self {
        Self {
            inner,
            session_id,
            loading: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Opens an anonymous session and binds a client to it.
    #[instrument(skip(inner))]
    pub async fn open(inner: ResourceClient<Session>) -> Result<Self, AuthError> {
        let session_id = inner
            .create(SessionCreate)
            .await
            .map_err(Self::map_error)?;
        debug!(%session_id, "Session opened");
        Ok(Self::new(inner, session_id))
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// True while any Google sign-in is waiting on the provider.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst) > 0
    }

    async fn sign_in(&self, action: SessionAction) -> Result<UserProfile, AuthError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(self.session_id, action)
            .await
            .map_err(Self::map_error)?
        {
            SessionActionResult::SignedIn(profile) => Ok(profile),
            SessionActionResult::SignedOut => Err(AuthError::ActorCommunicationError(
                "sign-in answered with SignedOut".into(),
            )),
        }
    }

    /// Email and password sign-in.
    #[instrument(skip(self, password), fields(session_id = %self.session_id))]
    pub async fn login(&self, email: &str, password: &str) -> Result<UserProfile, AuthError> {
        self.sign_in(SessionAction::Login {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    /// Google popup sign-in. [`AuthClient::is_loading`] is true until this returns.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn login_with_google(&self) -> Result<UserProfile, AuthError> {
        let _loading = Loading::start(&self.loading);
        self.sign_in(SessionAction::LoginWithGoogle).await
    }

    #[instrument(skip(self, password), fields(session_id = %self.session_id))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, AuthError> {
        self.sign_in(SessionAction::Register {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    /// Signs out. Succeeds whether or not anyone was signed in.
    #[instrument(skip(self), fields(session_id = %self.session_id))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        debug!("Sending request");
        self.inner
            .perform_action(self.session_id, SessionAction::Logout)
            .await
            .map_err(Self::map_error)?;
        Ok(())
    }

    /// The signed-in profile, or `None` for an anonymous session.
    pub async fn current_user(&self) -> Result<Option<UserProfile>, AuthError> {
        let session = self
            .fetch(self.session_id)
            .await?
            .ok_or_else(|| AuthError::NotFound(self.session_id.to_string()))?;
        Ok(session.user)
    }

    pub async fn is_admin(&self) -> Result<bool, AuthError> {
        Ok(self
            .current_user()
            .await?
            .is_some_and(|user| user.is_admin()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Role, UserId};
    use crate::services::AuthenticationError;
    use chrono::Utc;
    use storefront_actor::mock::{create_mock_client, expect_action, MockClient};

    fn profile(email: &str, role: Role) -> UserProfile {
        UserProfile {
            uid: UserId::from("u-1"),
            email: email.into(),
            display_name: "x".into(),
            role,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_loading_is_raised_only_during_google_sign_in() {
        let (client, mut receiver) = create_mock_client::<Session>(10);
        let auth = AuthClient::new(client, SessionId(1));
        assert!(!auth.is_loading());

        let task = {
            let auth = auth.clone();
            tokio::spawn(async move { auth.login_with_google().await })
        };

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, SessionId(1));
        assert!(matches!(action, SessionAction::LoginWithGoogle));
        assert!(auth.is_loading());

        responder
            .send(Err(FrameworkError::EntityError(Box::new(AuthError::from(
                AuthenticationError::PopupCancelled,
            )))))
            .unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(
            err,
            AuthError::Authentication(AuthenticationError::PopupCancelled)
        );
        assert!(!auth.is_loading());
    }

    #[tokio::test]
    async fn test_loading_stays_up_until_last_google_sign_in_finishes() {
        let (client, mut receiver) = create_mock_client::<Session>(10);
        let auth = AuthClient::new(client, SessionId(1));

        let first = {
            let auth = auth.clone();
            tokio::spawn(async move { auth.login_with_google().await })
        };
        let (_, _, first_responder) = expect_action(&mut receiver).await.unwrap();
        let second = {
            let auth = auth.clone();
            tokio::spawn(async move { auth.login_with_google().await })
        };
        let (_, _, second_responder) = expect_action(&mut receiver).await.unwrap();

        let google = profile("google@test.com", Role::User);
        first_responder
            .send(Ok(SessionActionResult::SignedIn(google.clone())))
            .unwrap();
        first.await.unwrap().unwrap();
        assert!(auth.is_loading());

        second_responder
            .send(Ok(SessionActionResult::SignedIn(google)))
            .unwrap();
        second.await.unwrap().unwrap();
        assert!(!auth.is_loading());
    }

    #[tokio::test]
    async fn test_is_admin_reads_session_profile() {
        let mut mock = MockClient::<Session>::new();
        let mut admin = Session::new(SessionId(1));
        admin.user = Some(profile("admin@shop.com", Role::Admin));
        let mut shopper = Session::new(SessionId(1));
        shopper.user = Some(profile("sara@shop.com", Role::User));

        mock.expect_get(SessionId(1)).return_ok(Some(admin));
        mock.expect_get(SessionId(1)).return_ok(Some(shopper));
        mock.expect_get(SessionId(1))
            .return_ok(Some(Session::new(SessionId(1))));

        let auth = AuthClient::new(mock.client(), SessionId(1));
        assert!(auth.is_admin().await.unwrap());
        assert!(!auth.is_admin().await.unwrap());
        assert!(!auth.is_admin().await.unwrap());
        mock.verify();
    }

    #[tokio::test]
    async fn test_login_returns_profile() {
        let mut mock = MockClient::<Session>::new();
        mock.expect_action(SessionId(3))
            .return_ok(SessionActionResult::SignedIn(profile("a@b.c", Role::User)));

        let auth = AuthClient::new(mock.client(), SessionId(3));
        let user = auth.login("a@b.c", "pw").await.unwrap();
        assert_eq!(user.email, "a@b.c");
        mock.verify();
    }
}
