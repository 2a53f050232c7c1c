//! Bookstore client model.
//!
//! Everything a front end needs to hold a signed-in shopper and their cart:
//!
//! - [`storage`] - Durable key/value stores with cross-tab change events
//! - [`session`] - The session holder: at most one identity per browser context
//! - [`cart`] - The cart ledger and shipping policy
//! - [`guard`] - Route guard for identity-restricted views
//! - [`gateway`] - Auth gateway trait, fixture gateway and HTTP client
//! - [`auth`] - Sign-in/sign-out flows tying a gateway to a session holder
//!
//! # Threading
//!
//! Session and cart operations run to completion without suspension points.
//! The only async boundary is the gateway call.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod session;
pub mod storage;

pub use cart::{CartEntry, CartError, CartLedger, CartSummary, ShippingPolicy};
pub use error::{AuthError, ClientError};
pub use gateway::{AuthGateway, Authenticated, Credential, FixtureGateway, StorefrontClient};
pub use guard::{GuardDecision, View, evaluate};
pub use session::{Marker, Session, SessionHolder};
pub use storage::{DurableStore, FileStore, MemoryStore, StorageError, StorageEvent, TabId};
