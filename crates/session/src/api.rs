//! Backend REST API client.
//!
//! Thin typed wrapper over the Verdant backend's JSON endpoints. Every
//! response is an envelope of the form `{ success, message?, ... }`; a
//! 2xx status with `success: false` is treated exactly like a non-2xx
//! rejection. The session credential is a cookie, kept in the underlying
//! client's cookie jar, so no token handling happens here.
//!
//! Failures are classified into [`ApiError`]; callers at the action
//! boundary map them to notifications and fallbacks, never surface them
//! as faults.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use verdant_core::{CartItems, Product, User};

use crate::config::SessionConfig;

/// Errors that can occur when calling the backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response at all: timeout, connection failure, or transport error.
    #[error("backend unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The backend rejected the request and provided a message.
    #[error("{message}")]
    Rejected {
        /// Server-provided, user-presentable message.
        message: String,
    },

    /// The backend rejected the request without a usable message.
    #[error("request rejected with status {status}")]
    RejectedNoMessage {
        /// HTTP status code of the rejection.
        status: u16,
    },

    /// The response body could not be parsed.
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// The server-provided message, if the backend supplied one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => Some(message),
            _ => None,
        }
    }

    /// Whether this failure means the backend gave no response at all.
    #[must_use]
    pub const fn is_unreachable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

/// Registration details submitted by a new user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfile {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password; hashed server-side.
    pub password: String,
}

// =============================================================================
// Response envelopes
// =============================================================================

#[derive(Debug, Deserialize)]
struct StatusResponse {
    success: bool,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProductListResponse {
    success: bool,
    message: Option<String>,
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct AuthResponse {
    success: bool,
    message: Option<String>,
    user: Option<User>,
}

/// Error body the backend attaches to rejections, when it has one.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Classify a non-2xx (or `success: false`) response body.
fn rejection(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.is_empty());

    message.map_or(
        ApiError::RejectedNoMessage {
            status: status.as_u16(),
        },
        |message| ApiError::Rejected { message },
    )
}

// =============================================================================
// BackendClient
// =============================================================================

/// Client for the Verdant backend REST API.
///
/// Cheaply cloneable via `Arc`. Holds a cookie jar so the backend's
/// session cookie persists across calls.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base: Url,
}

impl BackendClient {
    /// Create a new backend client from session configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &SessionConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base: config.api_base.clone(),
            }),
        })
    }

    /// Resolve an API path against the configured base URL, keeping any
    /// deployment path prefix (e.g. `https://host/shop` + `/api/health`
    /// resolves to `https://host/shop/api/health`).
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.inner.base.clone();
        let prefix = self.inner.base.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}{path}"));
        url
    }

    /// Send a request and read the full body as text, keeping the status
    /// for the caller to classify.
    async fn execute_raw(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(StatusCode, String), ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Read the body as text first for better rejection diagnostics
        let body = response.text().await?;
        Ok((status, body))
    }

    /// Send a request and parse the JSON envelope, treating any non-2xx
    /// status as a rejection.
    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &'static str,
    ) -> Result<T, ApiError> {
        let (status, body) = self.execute_raw(request).await?;

        if !status.is_success() {
            warn!(
                endpoint,
                status = status.as_u16(),
                "backend returned non-success status"
            );
            return Err(rejection(status, &body));
        }

        parse_body(&body, endpoint)
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// One-shot health probe.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend does not answer with a 2xx within
    /// the configured timeout. Any error means "treat as disconnected".
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("/api/health"))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("health check ok");
            Ok(())
        } else {
            warn!(status = status.as_u16(), "health check rejected");
            Err(ApiError::RejectedNoMessage {
                status: status.as_u16(),
            })
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch the full product catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let request = self.inner.client.get(self.endpoint("/api/product/list"));
        let response: ProductListResponse = self.execute(request, "/api/product/list").await?;

        if response.success {
            Ok(response.products)
        } else {
            Err(envelope_rejection(response.message))
        }
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Ask the backend who the cookie session belongs to.
    ///
    /// Returns `Ok(None)` only when the backend explicitly answers that no
    /// session exists: a 2xx envelope with `success: false`, or a 401/403.
    /// That is a normal state, not a failure. Server-side trouble (a 5xx,
    /// say) is an error; callers must not read it as "signed out".
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, parse failures, and
    /// non-auth rejections.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<Option<User>, ApiError> {
        let request = self.inner.client.get(self.endpoint("/api/user/is-auth"));
        let (status, body) = self.execute_raw(request).await?;

        if is_auth_rejection(status) {
            return Ok(None);
        }
        if !status.is_success() {
            warn!(
                endpoint = "/api/user/is-auth",
                status = status.as_u16(),
                "backend returned non-success status"
            );
            return Err(rejection(status, &body));
        }

        let response: AuthResponse = parse_body(&body, "/api/user/is-auth")?;
        Ok(if response.success { response.user } else { None })
    }

    /// Ask the backend whether the cookie session carries seller rights.
    ///
    /// A `success: false` envelope or a 401/403 means "not a seller";
    /// other rejections are errors, not a verdict on seller rights.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, parse failures, and
    /// non-auth rejections.
    #[instrument(skip(self))]
    pub async fn seller_status(&self) -> Result<bool, ApiError> {
        let request = self.inner.client.get(self.endpoint("/api/seller/is-auth"));
        let (status, body) = self.execute_raw(request).await?;

        if is_auth_rejection(status) {
            return Ok(false);
        }
        if !status.is_success() {
            warn!(
                endpoint = "/api/seller/is-auth",
                status = status.as_u16(),
                "backend returned non-success status"
            );
            return Err(rejection(status, &body));
        }

        let response: StatusResponse = parse_body(&body, "/api/seller/is-auth")?;
        Ok(response.success)
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the server's message on bad
    /// credentials, or a transport error if the backend is unreachable.
    #[instrument(skip_all)]
    pub async fn login(&self, email: &str, password: &str) -> Result<User, ApiError> {
        let request = self
            .inner
            .client
            .post(self.endpoint("/api/user/login"))
            .json(&serde_json::json!({ "email": email, "password": password }));
        let response: AuthResponse = self.execute(request, "/api/user/login").await?;
        user_from_auth(response)
    }

    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` if the backend refuses the profile.
    #[instrument(skip_all)]
    pub async fn register(&self, profile: &RegisterProfile) -> Result<User, ApiError> {
        let request = self
            .inner
            .client
            .post(self.endpoint("/api/user/register"))
            .json(profile);
        let response: AuthResponse = self.execute(request, "/api/user/register").await?;
        user_from_auth(response)
    }

    /// Log in with a Google identity token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` if the backend refuses the token.
    #[instrument(skip_all)]
    pub async fn google_login(&self, token: &str) -> Result<User, ApiError> {
        let request = self
            .inner
            .client
            .post(self.endpoint("/api/user/google-auth"))
            .json(&serde_json::json!({ "token": token }));
        let response: AuthResponse = self.execute(request, "/api/user/google-auth").await?;
        user_from_auth(response)
    }

    /// Log in to the seller dashboard.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the server's message on bad
    /// credentials.
    #[instrument(skip_all)]
    pub async fn seller_login(&self, email: &str, password: &str) -> Result<(), ApiError> {
        let request = self
            .inner
            .client
            .post(self.endpoint("/api/seller/login"))
            .json(&serde_json::json!({ "email": email, "password": password }));
        let response: StatusResponse = self.execute(request, "/api/seller/login").await?;

        if response.success {
            Ok(())
        } else {
            Err(envelope_rejection(response.message))
        }
    }

    /// Invalidate the cookie session server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached; callers treat
    /// logout as best-effort.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("/api/user/logout"))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ApiError::RejectedNoMessage {
                status: status.as_u16(),
            })
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Replace the server-side cart with the given snapshot.
    ///
    /// Always sends the full cart, never a delta, so rapid successive
    /// pushes resolve to last-write-wins.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, cart), fields(items = cart.count()))]
    pub async fn update_cart(&self, cart: &CartItems) -> Result<(), ApiError> {
        let request = self
            .inner
            .client
            .post(self.endpoint("/api/cart/update"))
            .json(&serde_json::json!({ "cartItems": cart }));
        let response: StatusResponse = self.execute(request, "/api/cart/update").await?;

        if response.success {
            Ok(())
        } else {
            Err(envelope_rejection(response.message))
        }
    }
}

/// Whether a status is an auth-style rejection ("no session"), as opposed
/// to server-side trouble.
const fn is_auth_rejection(status: StatusCode) -> bool {
    status.as_u16() == 401 || status.as_u16() == 403
}

/// Parse a 2xx body into the expected envelope, logging parse failures.
fn parse_body<T: DeserializeOwned>(body: &str, endpoint: &'static str) -> Result<T, ApiError> {
    match serde_json::from_str(body) {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!(
                endpoint,
                error = %e,
                body = %body.chars().take(200).collect::<String>(),
                "failed to parse backend response"
            );
            Err(ApiError::Parse(e))
        }
    }
}

/// Classify a 2xx envelope that reports `success: false`.
fn envelope_rejection(message: Option<String>) -> ApiError {
    message.filter(|m| !m.is_empty()).map_or(
        ApiError::RejectedNoMessage {
            status: StatusCode::OK.as_u16(),
        },
        |message| ApiError::Rejected { message },
    )
}

/// Extract the user from an auth envelope, rejecting incomplete replies.
fn user_from_auth(response: AuthResponse) -> Result<User, ApiError> {
    if !response.success {
        return Err(envelope_rejection(response.message));
    }
    response.user.ok_or(ApiError::RejectedNoMessage {
        status: StatusCode::OK.as_u16(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let config = SessionConfig::new("https://shop.example/verdant".parse().unwrap());
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("/api/health").as_str(),
            "https://shop.example/verdant/api/health"
        );
    }

    #[test]
    fn test_endpoint_handles_bare_and_trailing_slash_bases() {
        let config = SessionConfig::new("https://shop.example".parse().unwrap());
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("/api/cart/update").as_str(),
            "https://shop.example/api/cart/update"
        );

        let config = SessionConfig::new("https://shop.example/verdant/".parse().unwrap());
        let client = BackendClient::new(&config).unwrap();
        assert_eq!(
            client.endpoint("/api/user/login").as_str(),
            "https://shop.example/verdant/api/user/login"
        );
    }

    #[test]
    fn test_auth_rejection_statuses_exclude_server_trouble() {
        assert!(is_auth_rejection(StatusCode::UNAUTHORIZED));
        assert!(is_auth_rejection(StatusCode::FORBIDDEN));
        assert!(!is_auth_rejection(StatusCode::SERVICE_UNAVAILABLE));
        assert!(!is_auth_rejection(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_auth_rejection(StatusCode::OK));
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Rejected {
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");

        let err = ApiError::RejectedNoMessage { status: 500 };
        assert_eq!(err.to_string(), "request rejected with status 500");
    }

    #[test]
    fn test_server_message_only_for_rejections() {
        let err = ApiError::Rejected {
            message: "Email already registered".to_string(),
        };
        assert_eq!(err.server_message(), Some("Email already registered"));

        let err = ApiError::RejectedNoMessage { status: 401 };
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_rejection_extracts_message_body() {
        let err = rejection(
            StatusCode::UNAUTHORIZED,
            r#"{"success": false, "message": "Invalid credentials"}"#,
        );
        assert!(matches!(err, ApiError::Rejected { message } if message == "Invalid credentials"));
    }

    #[test]
    fn test_rejection_without_message_keeps_status() {
        let err = rejection(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert!(matches!(err, ApiError::RejectedNoMessage { status: 500 }));
    }

    #[test]
    fn test_rejection_with_empty_message_keeps_status() {
        let err = rejection(StatusCode::BAD_GATEWAY, r#"{"message": ""}"#);
        assert!(matches!(err, ApiError::RejectedNoMessage { status: 502 }));
    }

    #[test]
    fn test_auth_envelope_success_requires_user() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"success": true, "message": null, "user": null}"#).unwrap();
        assert!(user_from_auth(response).is_err());
    }

    #[test]
    fn test_auth_envelope_carries_user() {
        let response: AuthResponse = serde_json::from_str(
            r#"{
                "success": true,
                "user": {"id": "u1", "name": "June Park", "email": "june@example.com"}
            }"#,
        )
        .unwrap();
        let user = user_from_auth(response).unwrap();
        assert_eq!(user.name, "June Park");
    }

    #[test]
    fn test_product_list_envelope_defaults_products() {
        let response: ProductListResponse =
            serde_json::from_str(r#"{"success": false, "message": "maintenance"}"#).unwrap();
        assert!(response.products.is_empty());
        assert_eq!(response.message.as_deref(), Some("maintenance"));
    }
}
