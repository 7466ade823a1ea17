//! Verdant Session - Storefront session controller.
//!
//! This crate owns all client-observable session state for a Verdant
//! storefront (authenticated user, seller flag, product catalog, cart,
//! search query, connectivity) and exposes the action functions that
//! mutate it. Rendering, routing, and toast plumbing live in the UI layer
//! consuming this crate.
//!
//! # Architecture
//!
//! - On startup the controller probes backend reachability once; the
//!   result selects a [`source::DataSource`] strategy: [`source::LiveSource`]
//!   over the REST backend, or [`source::DemoSource`] synthesizing
//!   deterministic local data.
//! - Loaders replace state wholesale, never field-by-field.
//! - Cart mutations apply optimistically and push the full latest cart
//!   snapshot to the backend (last write wins); a failed push never rolls
//!   back the local change.
//! - All backend failures are caught at the action boundary and mapped to
//!   [`notify::Notifier`] messages; none propagate to the UI as faults.
//!
//! # Example
//!
//! ```rust,ignore
//! use verdant_session::{SessionConfig, SessionController, TracingNotifier};
//!
//! let config = SessionConfig::from_env()?;
//! let mut session = SessionController::new(config, Box::new(TracingNotifier))?;
//! session.bootstrap().await;
//!
//! session.add_to_cart("p1".into()).await;
//! let total = session.total_cart_amount();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod controller;
pub mod demo;
pub mod notify;
pub mod source;
pub mod state;

pub use api::{ApiError, BackendClient, RegisterProfile};
pub use config::{ConfigError, SessionConfig};
pub use controller::SessionController;
pub use notify::{Notifier, TracingNotifier};
pub use state::{ConnectivityState, SessionState};
