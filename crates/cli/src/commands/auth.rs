//! Account commands: login, register, logout, whoami.

use bookstore_client::{View, auth};
use bookstore_core::Identity;
use secrecy::{ExposeSecret, SecretString};

use super::{CommandError, Context, emit};

/// Sign in and store the session.
///
/// # Errors
///
/// Returns `CommandError::AlreadySignedIn` if a session exists, or the
/// gateway's error if the credentials are rejected.
pub async fn login(ctx: &Context, email: &str, password: &SecretString) -> Result<(), CommandError> {
    ctx.enter(View::Login)?;

    let identity = auth::sign_in(&ctx.client, &ctx.holder, email, password.expose_secret()).await?;
    emit(&format!("Signed in as {}", describe(&identity)));
    Ok(())
}

/// Create an account, then sign in with it.
///
/// # Errors
///
/// Returns `CommandError::AlreadySignedIn` if a session exists, or the
/// gateway's error if registration or the follow-up sign-in fails.
pub async fn register(
    ctx: &Context,
    name: &str,
    email: &str,
    password: &SecretString,
) -> Result<(), CommandError> {
    ctx.enter(View::Register)?;

    let created = auth::register(&ctx.client, name, email, password.expose_secret()).await?;
    emit(&format!("Account created for {}", describe(&created)));

    auth::sign_in(&ctx.client, &ctx.holder, email, password.expose_secret()).await?;
    emit("Signed in");
    Ok(())
}

/// Sign out. Works without a session and without a reachable storefront.
///
/// # Errors
///
/// Returns an error only if the profile could not be cleared.
pub async fn logout(ctx: &Context) -> Result<(), CommandError> {
    let was_signed_in = ctx.holder.is_authenticated();
    auth::sign_out(&ctx.client, &ctx.holder).await?;
    emit(if was_signed_in {
        "Signed out"
    } else {
        "Not signed in"
    });
    Ok(())
}

/// Show the account the stored session belongs to.
///
/// The storefront is asked to confirm the marker; a marker it no longer
/// knows ends the session.
///
/// # Errors
///
/// Returns `CommandError::SignInRequired` without a live session.
pub async fn whoami(ctx: &Context) -> Result<(), CommandError> {
    ctx.enter(View::Profile)?;

    let identity = auth::verify(&ctx.client, &ctx.holder)
        .await?
        .ok_or(CommandError::SignInRequired)?;
    emit(&render_profile(&identity));
    Ok(())
}

fn describe(identity: &Identity) -> String {
    format!("{} <{}>", identity.name, identity.email)
}

fn render_profile(identity: &Identity) -> String {
    let mut out = format!(
        "{}\nid:    {}\nrole:  {}",
        describe(identity),
        identity.id,
        identity.role
    );
    if let Some(headline) = &identity.headline {
        out.push('\n');
        out.push_str(headline);
    }
    out
}
