//! Authenticated user identity.

use serde::{Deserialize, Serialize};

use crate::types::cart::CartItems;
use crate::types::id::UserId;

/// The authenticated user, as reported by the backend.
///
/// Owned by the session once authenticated. The backend is the source of
/// truth while connected; demo mode fabricates a local value instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// The user's server-side cart.
    #[serde(default)]
    pub cart_items: CartItems,
}
