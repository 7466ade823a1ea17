//! Live/demo data source strategy.
//!
//! Every backend-facing operation of the controller goes through the
//! [`DataSource`] trait. The controller selects an implementation once per
//! health check: [`LiveSource`] over the REST backend when it is
//! reachable, [`DemoSource`] synthesizing deterministic local data when it
//! is not. This keeps the two modes from branching inline at every call
//! site.

use async_trait::async_trait;

use verdant_core::{CartItems, Product, User};

use crate::api::{ApiError, BackendClient, RegisterProfile};
use crate::demo;

/// Backend-facing operations of the session controller.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the product catalog.
    async fn products(&self) -> Result<Vec<Product>, ApiError>;

    /// Fetch the user the current session belongs to, if any.
    async fn current_user(&self) -> Result<Option<User>, ApiError>;

    /// Whether the current session carries seller rights.
    async fn seller_status(&self) -> Result<bool, ApiError>;

    /// Authenticate with email and password.
    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError>;

    /// Register a new account.
    async fn register(&self, profile: &RegisterProfile) -> Result<User, ApiError>;

    /// Authenticate with a Google identity token.
    async fn google_login(&self, token: &str) -> Result<User, ApiError>;

    /// Authenticate as a seller.
    async fn seller_login(&self, email: &str, password: &str) -> Result<(), ApiError>;

    /// End the current session.
    async fn logout(&self) -> Result<(), ApiError>;

    /// Replace the server-side cart with the given snapshot.
    async fn push_cart(&self, cart: &CartItems) -> Result<(), ApiError>;
}

/// Data source backed by the live REST backend.
pub struct LiveSource {
    backend: BackendClient,
}

impl LiveSource {
    /// Wrap a backend client.
    #[must_use]
    pub const fn new(backend: BackendClient) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl DataSource for LiveSource {
    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.backend.list_products().await
    }

    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        self.backend.current_user().await
    }

    async fn seller_status(&self) -> Result<bool, ApiError> {
        self.backend.seller_status().await
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        self.backend.login(email, password).await
    }

    async fn register(&self, profile: &RegisterProfile) -> Result<User, ApiError> {
        self.backend.register(profile).await
    }

    async fn google_login(&self, token: &str) -> Result<User, ApiError> {
        self.backend.google_login(token).await
    }

    async fn seller_login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        self.backend.seller_login(email, password).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.backend.logout().await
    }

    async fn push_cart(&self, cart: &CartItems) -> Result<(), ApiError> {
        self.backend.update_cart(cart).await
    }
}

/// Data source synthesizing everything locally.
///
/// Issues no network calls. Sign-in accepts exactly the fixed demo
/// credential pair; registration and Google sign-in have nothing
/// deterministic to fabricate and are rejected as unavailable.
pub struct DemoSource;

#[async_trait]
impl DataSource for DemoSource {
    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(demo::demo_products())
    }

    async fn current_user(&self) -> Result<Option<User>, ApiError> {
        Ok(None)
    }

    async fn seller_status(&self) -> Result<bool, ApiError> {
        Ok(false)
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        if email == demo::DEMO_EMAIL && password == demo::DEMO_PASSWORD {
            Ok(demo::demo_user())
        } else {
            Err(ApiError::Rejected {
                message: format!(
                    "Store is offline. Demo sign-in accepts {} only",
                    demo::DEMO_EMAIL
                ),
            })
        }
    }

    async fn register(&self, _profile: &RegisterProfile) -> Result<User, ApiError> {
        Err(ApiError::Rejected {
            message: "Store is offline. Registration is unavailable".to_string(),
        })
    }

    async fn google_login(&self, _token: &str) -> Result<User, ApiError> {
        Err(ApiError::Rejected {
            message: "Store is offline. Google sign-in is unavailable".to_string(),
        })
    }

    async fn seller_login(&self, _email: &str, _password: &str) -> Result<(), ApiError> {
        Err(ApiError::Rejected {
            message: "Store is offline. Seller sign-in is unavailable".to_string(),
        })
    }

    async fn logout(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn push_cart(&self, _cart: &CartItems) -> Result<(), ApiError> {
        // Demo carts live only in memory
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_source_serves_fixed_catalog() {
        let source = DemoSource;
        let products = source.products().await.expect("demo products");
        assert_eq!(products, demo::demo_products());
    }

    #[tokio::test]
    async fn test_demo_source_has_no_session() {
        let source = DemoSource;
        assert!(source.current_user().await.expect("user").is_none());
        assert!(!source.seller_status().await.expect("seller"));
    }

    #[tokio::test]
    async fn test_demo_login_accepts_only_fixed_pair() {
        let source = DemoSource;
        let user = source
            .login(demo::DEMO_EMAIL, demo::DEMO_PASSWORD)
            .await
            .expect("demo login");
        assert_eq!(user, demo::demo_user());

        let err = source
            .login("june@example.com", "hunter2")
            .await
            .expect_err("wrong credentials");
        assert!(err.server_message().is_some());
    }

    #[tokio::test]
    async fn test_demo_register_and_google_are_unavailable() {
        let source = DemoSource;
        let profile = RegisterProfile {
            name: "June Park".to_string(),
            email: "june@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(source.register(&profile).await.is_err());
        assert!(source.google_login("token").await.is_err());
        assert!(source.seller_login("june@example.com", "hunter2").await.is_err());
    }

    #[tokio::test]
    async fn test_demo_cart_push_is_a_noop() {
        let source = DemoSource;
        assert!(source.push_cart(&CartItems::new()).await.is_ok());
        assert!(source.logout().await.is_ok());
    }
}
