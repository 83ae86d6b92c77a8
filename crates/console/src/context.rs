//! Explicit dependencies handed to every list and form flow

use std::sync::Arc;
use std::time::Duration;

use backoffice_core::{ConsoleConfig, SessionContext};

/// The API client, the logged-in session and the settings a view needs
///
/// Built once at login and passed down; nothing reads the persisted
/// session after that.
#[derive(Debug)]
pub struct ConsoleContext<A> {
    pub api: A,
    pub session: Arc<SessionContext>,
    pub config: Arc<ConsoleConfig>,
}

impl<A> ConsoleContext<A> {
    pub fn new(api: A, session: SessionContext, config: ConsoleConfig) -> Self {
        Self {
            api,
            session: Arc::new(session),
            config: Arc::new(config),
        }
    }

    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    pub fn redirect_delay(&self) -> Duration {
        self.config.redirect_delay()
    }
}

impl<A: Clone> Clone for ConsoleContext<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            session: Arc::clone(&self.session),
            config: Arc::clone(&self.config),
        }
    }
}

impl<A> PartialEq for ConsoleContext<A> {
    /// Contexts are equal when they share the same session and settings
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.session, &other.session) && Arc::ptr_eq(&self.config, &other.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_session() {
        let ctx = ConsoleContext::new((), SessionContext::new("tok", 3), ConsoleConfig::default());
        let other = ctx.clone();

        assert_eq!(ctx, other);
        assert_eq!(other.session.client_id, 3);
        assert_eq!(other.page_size(), 5);
        assert_eq!(other.redirect_delay(), Duration::from_millis(1500));

        let fresh = ConsoleContext::new((), SessionContext::new("tok", 3), ConsoleConfig::default());
        assert_ne!(ctx, fresh);
    }
}
