//! [`ActorEntity`] implementation for [`Session`].

use super::actions::{SessionAction, SessionActionResult};
use super::error::AuthError;
use crate::model::{Session, SessionId};
use crate::services::IdentityProvider;
use async_trait::async_trait;
use std::sync::Arc;
use storefront_actor::ActorEntity;
use tracing::info;

/// Payload for opening a session. Sessions start anonymous.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionCreate;

#[async_trait]
impl ActorEntity for Session {
    type Id = SessionId;
    type Create = SessionCreate;
    type Update = ();
    type Action = SessionAction;
    type ActionResult = SessionActionResult;
    type Context = Arc<dyn IdentityProvider>;
    type Error = AuthError;

    fn from_create_params(id: SessionId, _params: SessionCreate) -> Result<Self, Self::Error> {
        Ok(Session::new(id))
    }

    // Sessions change only through actions.
    async fn on_update(
        &mut self,
        _update: (),
        _identity: &Arc<dyn IdentityProvider>,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Asks the identity provider and stores the profile it returns.
    ///
    /// Provider errors are returned as is; the session is only written after a success.
    async fn handle_action(
        &mut self,
        action: SessionAction,
        identity: &Arc<dyn IdentityProvider>,
    ) -> Result<SessionActionResult, Self::Error> {
        let profile = match action {
            SessionAction::Login { email, password } => {
                identity.authenticate(&email, &password).await?
            }
            SessionAction::LoginWithGoogle => identity.authenticate_with_popup().await?,
            SessionAction::Register {
                name,
                email,
                password,
            } => identity.create_account(&name, &email, &password).await?,
            SessionAction::Logout => {
                if let Some(user) = self.user.take() {
                    info!(session_id = %self.id, uid = %user.uid, "Signed out");
                }
                return Ok(SessionActionResult::SignedOut);
            }
        };
        info!(session_id = %self.id, uid = %profile.uid, role = ?profile.role, "Signed in");
        self.user = Some(profile.clone());
        Ok(SessionActionResult::SignedIn(profile))
    }
}
