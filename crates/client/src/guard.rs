//! Route guard.
//!
//! Decides, per navigation, whether a view may render. The decision depends
//! only on whether a session is present: roles are not consulted and nothing
//! is cached between navigations.

use bookstore_core::{BookId, OrderId};

use crate::session::Session;

/// The views of the storefront front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Books,
    BookDetails(BookId),
    Cart,
    Login,
    Register,
    Profile,
    Feed,
    OrderDetails(OrderId),
    NotFound,
}

impl View {
    /// Where unauthenticated visitors are sent.
    pub const ENTRY_POINT: Self = Self::Login;

    /// Where authenticated visitors land after signing in.
    pub const HOME_SIGNED_IN: Self = Self::Profile;

    /// Whether this view needs a session.
    #[must_use]
    pub const fn is_restricted(&self) -> bool {
        matches!(self, Self::Profile | Self::Feed | Self::OrderDetails(_))
    }

    /// Route path for this view.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Books => "/books".to_owned(),
            Self::BookDetails(id) => format!("/book/{id}"),
            Self::Cart => "/cart".to_owned(),
            Self::Login => "/login".to_owned(),
            Self::Register => "/register".to_owned(),
            Self::Profile => "/profile".to_owned(),
            Self::Feed => "/feed".to_owned(),
            Self::OrderDetails(id) => format!("/order/{id}"),
            Self::NotFound => "/404".to_owned(),
        }
    }

    /// Resolve a route path. Unknown paths map to [`View::NotFound`].
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] | [""] => Self::Home,
            ["books"] => Self::Books,
            ["book", id] => id.parse().map_or(Self::NotFound, Self::BookDetails),
            ["cart"] => Self::Cart,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["profile"] => Self::Profile,
            ["feed"] => Self::Feed,
            ["order", id] => id.parse().map_or(Self::NotFound, Self::OrderDetails),
            _ => Self::NotFound,
        }
    }
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the requested view.
    Admit,
    /// Navigate here instead.
    Redirect(View),
}

/// Decide whether `view` may render given the current session.
///
/// Restricted views need a session; everything else is open. Signed-in
/// visitors asking for the login or register form are sent to their
/// profile instead.
#[must_use]
pub fn evaluate(session: Option<&Session>, view: &View) -> GuardDecision {
    match (session, view) {
        (None, v) if v.is_restricted() => GuardDecision::Redirect(View::ENTRY_POINT),
        (Some(_), View::Login | View::Register) => GuardDecision::Redirect(View::HOME_SIGNED_IN),
        _ => GuardDecision::Admit,
    }
}
