use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session keys used by the back-office. Nothing else is ever stored per visitor.
pub mod keys {
    pub const USER_ID: &str = "authenticated_user_id";
    pub const USER: &str = "authenticated_user";
    pub const CSRF_TOKEN: &str = "pending_csrf_token";
}

/// SessionUser
///
/// Snapshot of the logged-in user taken at login. The role is what the access gate reads,
/// so a role change only takes effect on the next login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i32,
    pub role: String,
    pub firstname: String,
}

/// VisitorSession
///
/// Explicit per-request view of the visitor's session. Gates and controllers work on this
/// plain value; `load` and `persist` are the only places that talk to the session store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitorSession {
    pub user_id: Option<i32>,
    pub user: Option<SessionUser>,
    pub pending_csrf_token: Option<String>,
}

impl VisitorSession {
    /// Session state for a logged-in user with no pending token.
    pub fn authenticated(user: SessionUser) -> Self {
        Self {
            user_id: Some(user.id),
            user: Some(user),
            pending_csrf_token: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Role of the authenticated user, if any.
    pub fn role(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.role.as_str())
    }

    pub async fn load(session: &Session) -> Result<Self, tower_sessions::session::Error> {
        Ok(Self {
            user_id: session.get::<i32>(keys::USER_ID).await?,
            user: session.get::<SessionUser>(keys::USER).await?,
            pending_csrf_token: session.get::<String>(keys::CSRF_TOKEN).await?,
        })
    }

    /// Writes every field back; absent fields are removed from the store.
    pub async fn persist(&self, session: &Session) -> Result<(), tower_sessions::session::Error> {
        match self.user_id {
            Some(id) => session.insert(keys::USER_ID, id).await?,
            None => {
                session.remove_value(keys::USER_ID).await?;
            }
        }
        match &self.user {
            Some(user) => session.insert(keys::USER, user).await?,
            None => {
                session.remove_value(keys::USER).await?;
            }
        }
        match &self.pending_csrf_token {
            Some(token) => session.insert(keys::CSRF_TOKEN, token).await?,
            None => {
                session.remove_value(keys::CSRF_TOKEN).await?;
            }
        }
        Ok(())
    }
}
