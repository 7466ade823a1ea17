//! Domain types for the Verdant storefront.

mod cart;
mod id;
mod product;
mod user;

pub use cart::CartItems;
pub use id::{ProductId, UserId};
pub use product::Product;
pub use user::User;
