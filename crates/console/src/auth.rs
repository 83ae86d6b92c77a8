//! Sign-in and sign-out
//!
//! The only place the persisted session is written. Views receive the
//! resulting [`SessionContext`] through a
//! [`ConsoleContext`](crate::ConsoleContext).

use backoffice_core::{AuthApi, ConsoleError, ConsoleResult, Credentials, SessionContext, SessionStore};

/// Notice text for a rejected login
pub const INVALID_CREDENTIALS: &str = "Invalid Credentials";

/// Exchange credentials for a session and persist it
pub async fn sign_in<A: AuthApi>(
    api: &A,
    store: &SessionStore,
    credentials: &Credentials,
) -> ConsoleResult<SessionContext> {
    if credentials.user_name.trim().is_empty() || credentials.password.is_empty() {
        return Err(ConsoleError::validation("Username and password are required"));
    }

    tracing::debug!("Signing in as {}", credentials.user_name);
    let session = api
        .login(credentials)
        .await
        .inspect_err(|e| tracing::warn!("Login failed: {}", e))?;
    store.save(&session)?;
    tracing::info!("Signed in; tenant {}", session.client_id);
    Ok(session)
}

/// Message to show for a failed [`sign_in`]
pub fn sign_in_failure(err: &ConsoleError) -> String {
    match err {
        ConsoleError::Api { .. } | ConsoleError::InvalidSession(_) => INVALID_CREDENTIALS.to_string(),
        other => other.user_message(),
    }
}

/// Forget the persisted session
pub fn sign_out(store: &SessionStore) -> ConsoleResult<()> {
    store.clear()?;
    tracing::info!("Signed out");
    Ok(())
}
