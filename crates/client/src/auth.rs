//! Sign-in and sign-out flows.
//!
//! These glue an [`AuthGateway`] to a [`SessionHolder`]. The session is only
//! touched once the gateway has answered, so a rejected login leaves whatever
//! session existed before exactly as it was.

use bookstore_core::Identity;
use tracing::instrument;

use crate::error::{AuthError, ClientError};
use crate::gateway::AuthGateway;
use crate::session::SessionHolder;
use crate::storage::DurableStore;

/// Check credentials and, on success, make the result the live session.
///
/// # Errors
///
/// Returns the gateway's error unchanged (the session is not modified), or
/// `ClientError::Storage` if the session could not be persisted.
#[instrument(skip(gateway, holder, password))]
pub async fn sign_in<G, S>(
    gateway: &G,
    holder: &SessionHolder<S>,
    email: &str,
    password: &str,
) -> Result<Identity, ClientError>
where
    G: AuthGateway + ?Sized,
    S: DurableStore,
{
    let auth = gateway.login(email, password).await?;
    holder.save(auth.identity.clone(), auth.marker)?;
    Ok(auth.identity)
}

/// Create an account. The new account is not signed in.
///
/// # Errors
///
/// Returns the gateway's error.
#[instrument(skip(gateway, password))]
pub async fn register<G>(
    gateway: &G,
    name: &str,
    email: &str,
    password: &str,
) -> Result<Identity, ClientError>
where
    G: AuthGateway + ?Sized,
{
    let identity = gateway.register(name, email, password).await?;
    tracing::info!(user_id = %identity.id, "Account registered");
    Ok(identity)
}

/// End the session.
///
/// The gateway is told first, but the local session is cleared even if
/// that call fails: signing out must always work offline.
///
/// # Errors
///
/// Returns `ClientError::Storage` if the durable store could not be cleared.
#[instrument(skip_all)]
pub async fn sign_out<G, S>(gateway: &G, holder: &SessionHolder<S>) -> Result<(), ClientError>
where
    G: AuthGateway + ?Sized,
    S: DurableStore,
{
    let marker = holder.current().map(|s| s.marker);
    if let Err(e) = gateway.logout(marker.as_ref()).await {
        tracing::warn!(error = %e, "Gateway logout failed, clearing local session anyway");
    }
    holder.clear()?;
    Ok(())
}

/// Ask the gateway who the stored marker belongs to.
///
/// A marker the gateway no longer recognises ends the local session.
/// Returns `None` when there is no session to check.
///
/// # Errors
///
/// Returns transport errors unchanged; the session is kept in that case.
#[instrument(skip_all)]
pub async fn verify<G, S>(
    gateway: &G,
    holder: &SessionHolder<S>,
) -> Result<Option<Identity>, ClientError>
where
    G: AuthGateway + ?Sized,
    S: DurableStore,
{
    let Some(session) = holder.current() else {
        return Ok(None);
    };

    match gateway.current_user(&session.marker).await {
        Ok(identity) => Ok(Some(identity)),
        Err(ClientError::NotFound(_) | ClientError::Auth(AuthError::SessionRequired)) => {
            tracing::info!("Stored marker no longer recognised, signing out");
            holder.clear()?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
