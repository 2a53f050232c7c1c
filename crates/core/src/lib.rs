//! Bookstore Core - Shared types library.
//!
//! This crate provides common types used across all bookstore components:
//! - `storefront` - REST API serving the catalog, auth and orders
//! - `client` - Session, cart and route-guard model consumed by front ends
//! - `cli` - Command-line front end driving the client against a storefront
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no HTTP clients. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, identities, books, catalog
//!   queries, order tracking and the JSON envelopes of the storefront API

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
