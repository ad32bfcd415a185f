//! Process-wide session context.
//!
//! One [`SessionContext`] is created at server start and shut down on exit.
//! Pages read the current viewer through it instead of tracking auth state
//! themselves; anything interested in sign-in changes subscribes to its
//! event channel.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;
use wetube_common::{AppError, AppResult};

use super::backend::{AuthBackendService, Session};

const EVENT_CAPACITY: usize = 256;

/// A change in who is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut(Session),
}

struct SessionInner {
    auth: AuthBackendService,
    events: Mutex<Option<broadcast::Sender<SessionEvent>>>,
}

/// Shared handle to the session context.
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
}

impl SessionContext {
    /// Start the session context over an auth backend.
    #[must_use]
    pub fn init(auth: AuthBackendService) -> Self {
        let (tx, _) = broadcast::channel(EVENT_CAPACITY);
        tracing::debug!("Session context started");

        Self {
            inner: Arc::new(SessionInner {
                auth,
                events: Mutex::new(Some(tx)),
            }),
        }
    }

    /// Resolve a presented token to a session.
    ///
    /// Lookup failures are logged and treated as anonymous.
    pub async fn resolve(&self, token: Option<&str>) -> Option<Session> {
        let token = token.filter(|t| !t.is_empty())?;
        if self.is_closed() {
            return None;
        }

        match self.inner.auth.session_for_token(token).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Session lookup failed");
                None
            }
        }
    }

    /// Validate a token and announce the sign-in.
    pub async fn sign_in(&self, token: &str) -> AppResult<Session> {
        if self.is_closed() {
            return Err(AppError::Unauthorized);
        }

        let session = self
            .inner
            .auth
            .session_for_token(token)
            .await?
            .ok_or(AppError::Unauthorized)?;

        tracing::info!(user_id = %session.user_id, "Signed in");
        self.publish(SessionEvent::SignedIn(session.clone()));
        Ok(session)
    }

    /// Announce a sign-out.
    pub fn sign_out(&self, session: &Session) {
        tracing::info!(user_id = %session.user_id, "Signed out");
        self.publish(SessionEvent::SignedOut(session.clone()));
    }

    /// Receive session changes. Dropping the receiver unsubscribes.
    ///
    /// After shutdown the receiver is already closed.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        let guard = self
            .inner
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        match guard.as_ref() {
            Some(tx) => tx.subscribe(),
            None => broadcast::channel(1).1,
        }
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, broadcast::Sender::receiver_count)
    }

    /// Close the event channel. Subscribers see the stream end.
    pub fn shutdown(&self) {
        let closed = self
            .inner
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if closed.is_some() {
            tracing::debug!("Session context shut down");
        }
    }

    /// Whether [`Self::shutdown`] has run.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn publish(&self, event: SessionEvent) {
        let guard = self
            .inner
            .events
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(tx) = guard.as_ref() {
            // No receivers is fine
            let _ = tx.send(event);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::memory_backend::{BackendOp, MemoryBackend};
    use tokio::sync::broadcast::error::RecvError;

    fn alice() -> Session {
        Session {
            user_id: "01hzuser0000000000000alice".to_string(),
            username: "alice".to_string(),
        }
    }

    async fn context() -> (SessionContext, Arc<MemoryBackend>) {
        let backend = Arc::new(MemoryBackend::new());
        backend.insert_session("tok-alice", alice()).await;
        (SessionContext::init(backend.clone()), backend)
    }

    #[tokio::test]
    async fn test_resolve_known_and_unknown_tokens() {
        let (sessions, _) = context().await;

        assert_eq!(sessions.resolve(Some("tok-alice")).await, Some(alice()));
        assert_eq!(sessions.resolve(Some("nope")).await, None);
        assert_eq!(sessions.resolve(None).await, None);
        assert_eq!(sessions.resolve(Some("")).await, None);
    }

    #[tokio::test]
    async fn test_resolve_degrades_to_anonymous_on_error() {
        let (sessions, backend) = context().await;
        backend.fail(BackendOp::SessionForToken).await;

        assert_eq!(sessions.resolve(Some("tok-alice")).await, None);
    }

    #[tokio::test]
    async fn test_sign_in_publishes_event() {
        let (sessions, _) = context().await;
        let mut rx = sessions.subscribe();

        let session = sessions.sign_in("tok-alice").await.unwrap();
        sessions.sign_out(&session);

        assert_eq!(rx.recv().await.unwrap(), SessionEvent::SignedIn(alice()));
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::SignedOut(alice()));
    }

    #[tokio::test]
    async fn test_sign_in_unknown_token_is_unauthorized() {
        let (sessions, _) = context().await;

        let err = sessions.sign_in("nope").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[tokio::test]
    async fn test_dropping_receiver_unsubscribes() {
        let (sessions, _) = context().await;

        let rx = sessions.subscribe();
        let rx2 = sessions.subscribe();
        assert_eq!(sessions.subscriber_count(), 2);

        drop(rx);
        assert_eq!(sessions.subscriber_count(), 1);
        drop(rx2);
        assert_eq!(sessions.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_closes_subscribers() {
        let (sessions, _) = context().await;
        let mut rx = sessions.subscribe();

        sessions.shutdown();

        assert!(sessions.is_closed());
        assert!(matches!(rx.recv().await, Err(RecvError::Closed)));
        assert!(matches!(
            sessions.subscribe().recv().await,
            Err(RecvError::Closed)
        ));
        assert!(sessions.sign_in("tok-alice").await.is_err());
        assert_eq!(sessions.resolve(Some("tok-alice")).await, None);
    }
}
