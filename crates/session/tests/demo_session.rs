//! End-to-end demo-mode session.
//!
//! Runs a full shopping session through the public API against an address
//! nothing listens on: the controller must detect the backend is
//! unreachable, fall back to the deterministic demo catalog, and keep
//! every action working locally.

use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

use verdant_session::demo::{DEMO_EMAIL, DEMO_PASSWORD, demo_products};
use verdant_session::{Notifier, SessionConfig, SessionController};

/// Notifier that records messages for assertions.
#[derive(Clone, Default)]
struct RecordingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingNotifier {
    fn contains(&self, fragment: &str) -> bool {
        self.messages
            .lock()
            .expect("notifier lock")
            .iter()
            .any(|m| m.contains(fragment))
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.messages.lock().expect("notifier lock").push(message.to_string());
    }

    fn success(&self, message: &str) {
        self.messages.lock().expect("notifier lock").push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.messages.lock().expect("notifier lock").push(message.to_string());
    }
}

fn offline_session() -> (SessionController, RecordingNotifier) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // Port 9 (discard) refuses connections immediately
    let config = SessionConfig::new("http://127.0.0.1:9".parse().expect("url"));
    let notifier = RecordingNotifier::default();
    let controller =
        SessionController::new(config, Box::new(notifier.clone())).expect("controller");
    (controller, notifier)
}

#[tokio::test]
async fn offline_bootstrap_serves_demo_catalog() {
    let (mut session, notifier) = offline_session();

    session.bootstrap().await;

    let state = session.state();
    assert!(!state.connectivity.connected);
    assert!(!state.connectivity.checking);
    assert_eq!(state.products, demo_products());
    assert!(state.user.is_none());
    assert!(!state.is_seller);
    assert!(notifier.contains("demo"));
}

#[tokio::test]
async fn offline_shopping_round_trip() {
    let (mut session, _) = offline_session();
    session.bootstrap().await;

    // Anonymous cart mutation is allowed in demo mode
    let mug = demo_products().first().expect("demo catalog").id.clone();
    session.add_to_cart(mug.clone()).await;
    session.add_to_cart(mug.clone()).await;
    assert_eq!(session.cart_count(), 2);

    // Stoneware Mug is on offer at 19.00, so 2 x 19.00
    assert_eq!(session.total_cart_amount(), Decimal::new(3800, 2));

    session.remove_from_cart(&mug).await;
    assert_eq!(session.cart_count(), 0);
    assert_eq!(session.total_cart_amount(), Decimal::ZERO);
}

#[tokio::test]
async fn offline_login_accepts_demo_credentials_only() {
    let (mut session, notifier) = offline_session();
    session.bootstrap().await;

    assert!(!session.login("june@example.com", "hunter2").await);
    assert!(session.state().user.is_none());
    assert!(notifier.contains("offline"));

    assert!(session.login(DEMO_EMAIL, DEMO_PASSWORD).await);
    let user = session.state().user.as_ref().expect("demo user");
    assert_eq!(user.email, DEMO_EMAIL);

    session.logout().await;
    assert!(session.state().user.is_none());
    assert!(session.state().cart_items.is_empty());
}
