//! Client-observable session state.
//!
//! A single owned container holding everything the UI reads. One instance
//! lives inside the controller per application session; there are no
//! ambient singletons. All updates are whole-value replacements applied by
//! the controller's action functions.

use serde::Serialize;

use verdant_core::{CartItems, Product, User};

/// Backend reachability, as established by the most recent health check.
///
/// Set once per probe, not polled continuously.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConnectivityState {
    /// Whether the last probe reached the backend.
    pub connected: bool,
    /// Whether a probe is currently in flight.
    pub checking: bool,
}

/// Everything the UI layer can observe about the session.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionState {
    /// The authenticated user, if any.
    pub user: Option<User>,
    /// Whether the session carries seller rights.
    pub is_seller: bool,
    /// Whether the UI should open its login prompt.
    pub show_login_prompt: bool,
    /// Current catalog search query.
    pub search_query: String,
    /// The product catalog, loaded or replaced wholesale.
    pub products: Vec<Product>,
    /// The cart quantity map.
    pub cart_items: CartItems,
    /// Backend reachability flags.
    pub connectivity: ConnectivityState,
}
