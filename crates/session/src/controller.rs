//! Storefront session controller.
//!
//! The single owner of client-observable session state and the action
//! functions that mutate it. Construct one instance per application
//! session and inject it into the UI; read access goes through
//! [`SessionController::state`].

use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use verdant_core::{ProductId, User};

use crate::api::{ApiError, BackendClient, RegisterProfile};
use crate::config::SessionConfig;
use crate::demo;
use crate::notify::Notifier;
use crate::source::{DataSource, DemoSource, LiveSource};
use crate::state::{ConnectivityState, SessionState};

/// Orchestrates session state against the backend (or demo data).
///
/// # Concurrency
///
/// Single-threaded and cooperative: every action is an `&mut self` async
/// function whose completion applies one whole-value state replacement.
/// Cart pushes always send the full latest snapshot, so rapid successive
/// mutations resolve to last-write-wins. There is no cancellation; a
/// superseded in-flight request that completes after a newer state change
/// may overwrite it. That is an accepted weakness of this layer, not a
/// bug to compensate for here.
pub struct SessionController {
    backend: BackendClient,
    source: Box<dyn DataSource>,
    notifier: Box<dyn Notifier>,
    state: SessionState,
}

impl SessionController {
    /// Create a controller in the initial, unprobed state.
    ///
    /// Starts disconnected with the demo source selected; call
    /// [`Self::bootstrap`] (or [`Self::check_connectivity`] plus the
    /// individual loaders) to establish the real mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: SessionConfig, notifier: Box<dyn Notifier>) -> Result<Self, reqwest::Error> {
        let backend = BackendClient::new(&config)?;

        Ok(Self {
            backend,
            source: Box::new(DemoSource),
            notifier,
            state: SessionState::default(),
        })
    }

    /// Read access to the session state for the UI layer.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    // =========================================================================
    // Connectivity
    // =========================================================================

    /// Probe the backend once and select the matching data source.
    ///
    /// One bounded-timeout call to the health endpoint; any failure
    /// (timeout, network error, non-2xx) counts as disconnected. Never
    /// retries; callers may invoke it again manually. Emits an error
    /// notification only on a connected-to-disconnected transition.
    #[instrument(skip(self))]
    pub async fn check_connectivity(&mut self) -> bool {
        self.state.connectivity.checking = true;
        let was_connected = self.state.connectivity.connected;

        let connected = match self.backend.health().await {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "health probe failed");
                false
            }
        };

        self.state.connectivity = ConnectivityState {
            connected,
            checking: false,
        };

        if connected {
            self.source = Box::new(LiveSource::new(self.backend.clone()));
            info!("backend reachable, using live data");
        } else {
            self.source = Box::new(DemoSource);
            info!("backend unreachable, using demo data");
            if was_connected {
                self.notifier
                    .error("Lost connection to the store. Switching to demo mode");
            }
        }

        connected
    }

    /// Probe connectivity, then load catalog, user, and seller status.
    pub async fn bootstrap(&mut self) {
        let connected = self.check_connectivity().await;
        if !connected {
            self.notifier
                .info("Store backend is unreachable. Browsing the demo catalog");
        }
        self.load_products().await;
        self.load_user().await;
        self.load_seller_status().await;
    }

    // =========================================================================
    // Loaders
    // =========================================================================

    /// Replace the catalog wholesale from the current source.
    ///
    /// A live failure falls back to the demo catalog and notifies; the
    /// demo source never fails.
    pub async fn load_products(&mut self) {
        match self.source.products().await {
            Ok(products) => self.state.products = products,
            Err(e) => {
                warn!(error = %e, "catalog load failed, falling back to demo catalog");
                self.state.products = demo::demo_products();
                self.notifier
                    .error("Could not load the catalog. Showing demo products");
            }
        }
    }

    /// Refresh the authenticated user from the current source.
    ///
    /// The backend explicitly reporting "no session" signs the user out
    /// quietly. A transport or parse failure never clears a previously
    /// known user; transient trouble must not destroy a session.
    pub async fn load_user(&mut self) {
        match self.source.current_user().await {
            Ok(Some(user)) => self.apply_signed_in(user),
            Ok(None) => {
                if self.state.user.take().is_some() {
                    debug!("backend reports no session, signing out locally");
                }
            }
            Err(e) => {
                warn!(error = %e, "user refresh failed, keeping known user");
                self.notifier.error("Could not refresh your account");
            }
        }
    }

    /// Refresh the seller flag from the current source.
    pub async fn load_seller_status(&mut self) {
        match self.source.seller_status().await {
            Ok(is_seller) => self.state.is_seller = is_seller,
            Err(e) => {
                warn!(error = %e, "seller status load failed, assuming not a seller");
                self.state.is_seller = false;
                self.notifier.error("Could not verify seller access");
            }
        }
    }

    // =========================================================================
    // Auth actions
    // =========================================================================

    /// Log in with email and password.
    ///
    /// Success replaces the user and cart together and clears the login
    /// prompt. Failure leaves any existing session untouched and notifies
    /// with the server's message when it provided one.
    pub async fn login(&mut self, email: &str, password: &str) -> bool {
        match self.source.login(email, password).await {
            Ok(user) => {
                self.apply_signed_in(user);
                self.notifier.success("Signed in");
                true
            }
            Err(e) => {
                self.notify_auth_failure(&e, "Sign-in failed");
                false
            }
        }
    }

    /// Register a new account and sign in as it.
    pub async fn register(&mut self, profile: RegisterProfile) -> bool {
        match self.source.register(&profile).await {
            Ok(user) => {
                self.apply_signed_in(user);
                self.notifier.success("Account created");
                true
            }
            Err(e) => {
                self.notify_auth_failure(&e, "Registration failed");
                false
            }
        }
    }

    /// Log in with a Google identity token.
    pub async fn google_login(&mut self, token: &str) -> bool {
        match self.source.google_login(token).await {
            Ok(user) => {
                self.apply_signed_in(user);
                self.notifier.success("Signed in with Google");
                true
            }
            Err(e) => {
                self.notify_auth_failure(&e, "Google sign-in failed");
                false
            }
        }
    }

    /// Log in to the seller dashboard.
    pub async fn seller_login(&mut self, email: &str, password: &str) -> bool {
        match self.source.seller_login(email, password).await {
            Ok(()) => {
                self.state.is_seller = true;
                self.notifier.success("Seller dashboard unlocked");
                true
            }
            Err(e) => {
                self.notify_auth_failure(&e, "Seller sign-in failed");
                false
            }
        }
    }

    /// End the session.
    ///
    /// The backend is notified best-effort; a failure there is logged and
    /// otherwise ignored. Local user, cart, and seller flag are always
    /// cleared.
    pub async fn logout(&mut self) {
        if let Err(e) = self.source.logout().await {
            warn!(error = %e, "backend logout failed, clearing local session anyway");
        }

        self.state.user = None;
        self.state.cart_items.clear();
        self.state.is_seller = false;
        self.notifier.success("Signed out");
    }

    fn apply_signed_in(&mut self, user: User) {
        // User and cart are replaced together, never one without the other
        self.state.cart_items = user.cart_items.clone();
        self.state.user = Some(user);
        self.state.show_login_prompt = false;
    }

    fn notify_auth_failure(&self, error: &ApiError, generic: &str) {
        debug!(error = %error, "auth action failed");
        match error.server_message() {
            Some(message) => self.notifier.error(message),
            None => self.notifier.error(generic),
        }
    }

    // =========================================================================
    // Cart actions
    // =========================================================================

    /// Add one unit of a product to the cart.
    pub async fn add_to_cart(&mut self, id: ProductId) {
        if self.block_anonymous_cart_mutation() {
            return;
        }
        self.state.cart_items.add(id);
        self.push_cart().await;
    }

    /// Set the quantity for a product; 0 removes it.
    pub async fn set_cart_quantity(&mut self, id: ProductId, quantity: u32) {
        if self.block_anonymous_cart_mutation() {
            return;
        }
        self.state.cart_items.set_quantity(id, quantity);
        self.push_cart().await;
    }

    /// Remove a product from the cart entirely.
    pub async fn remove_from_cart(&mut self, id: &ProductId) {
        if self.block_anonymous_cart_mutation() {
            return;
        }
        self.state.cart_items.remove(id);
        self.push_cart().await;
    }

    /// While connected, anonymous sessions may not mutate the cart; ask
    /// the UI to open its login prompt instead. Demo mode allows
    /// anonymous carts.
    fn block_anonymous_cart_mutation(&mut self) -> bool {
        if self.state.connectivity.connected && self.state.user.is_none() {
            self.state.show_login_prompt = true;
            self.notifier.info("Please sign in to manage your cart");
            true
        } else {
            false
        }
    }

    /// Push the full latest cart snapshot after an optimistic local
    /// mutation. A failed push keeps the local change.
    async fn push_cart(&mut self) {
        if !(self.state.connectivity.connected && self.state.user.is_some()) {
            return;
        }
        if let Err(e) = self.source.push_cart(&self.state.cart_items).await {
            warn!(error = %e, "cart push failed, keeping local change");
            self.notifier.error("Cart saved locally but not synced");
        }
    }

    // =========================================================================
    // Derived queries
    // =========================================================================

    /// Total number of items in the cart. Recomputed on every call.
    #[must_use]
    pub fn cart_count(&self) -> u64 {
        self.state.cart_items.count()
    }

    /// Total cart amount over the current catalog, truncated to 2 decimal
    /// places. Recomputed on every call, never cached.
    #[must_use]
    pub fn total_cart_amount(&self) -> Decimal {
        self.state.cart_items.total_amount(&self.state.products)
    }

    // =========================================================================
    // UI signals
    // =========================================================================

    /// Update the catalog search query.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }

    /// Ask the UI to open its login prompt.
    pub fn request_login(&mut self) {
        self.state.show_login_prompt = true;
    }

    /// Clear the login prompt flag (e.g., the user closed the dialog).
    pub fn dismiss_login_prompt(&mut self) {
        self.state.show_login_prompt = false;
    }
}
