//! Verdant Core - Shared domain types.
//!
//! This crate provides the domain model shared between the session
//! controller and any front end built on top of it:
//! - `types::id` - Newtype string IDs (`ProductId`, `UserId`)
//! - `types::product` - Catalog products and effective pricing
//! - `types::cart` - The cart quantity map and derived totals
//! - `types::user` - The authenticated user identity
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Cart arithmetic lives here so the invariants (positive
//! quantities, derived totals) can be tested without a backend.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, products, users, and the cart quantity map

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
