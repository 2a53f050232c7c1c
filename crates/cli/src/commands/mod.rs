//! Subcommand implementations.
//!
//! Each command drives the client crate the way a front-end view would:
//! restricted commands consult the route guard first, and the session lives
//! in a file-backed store under the profile directory.

pub mod auth;
pub mod books;
pub mod cart;
pub mod orders;

use std::path::Path;

use bookstore_client::{
    CartError, ClientError, FileStore, GuardDecision, Session, SessionHolder, StorefrontClient,
    View, evaluate,
};
use thiserror::Error;
use url::Url;

/// Errors a command can end with.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The storefront or the session store failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// A cart line could not be applied.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The command needs a session and there is none.
    #[error("not signed in (run `bookstore login` first)")]
    SignInRequired,

    /// The command is only for signed-out users.
    #[error("already signed in as {0} (run `bookstore logout` first)")]
    AlreadySignedIn(String),
}

/// Everything a command needs: the storefront and the stored session.
pub struct Context {
    pub client: StorefrontClient,
    pub holder: SessionHolder<FileStore>,
}

impl Context {
    /// Connect to `api_url` and load the session kept in `profile_dir`.
    pub fn new(api_url: Url, profile_dir: &Path) -> Self {
        Self {
            client: StorefrontClient::new(api_url),
            holder: SessionHolder::new(FileStore::open(profile_dir)),
        }
    }

    /// Ask the route guard whether `view` may be shown.
    ///
    /// Returns the current session when admitted.
    pub fn enter(&self, view: View) -> Result<Option<Session>, CommandError> {
        let session = self.holder.current();
        match evaluate(session.as_ref(), &view) {
            GuardDecision::Admit => Ok(session),
            GuardDecision::Redirect(View::Login) => Err(CommandError::SignInRequired),
            GuardDecision::Redirect(_) => Err(CommandError::AlreadySignedIn(
                session
                    .map(|s| s.identity.email.to_string())
                    .unwrap_or_default(),
            )),
        }
    }
}

/// Write command output to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(text: &str) {
    println!("{text}");
}
