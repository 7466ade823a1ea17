//! Deterministic demo-mode data.
//!
//! When the backend is unreachable the controller serves this fixed
//! catalog and accepts a single fixed credential pair. Every call returns
//! identical data so disconnected behavior is repeatable.

use rust_decimal::Decimal;

use verdant_core::{CartItems, Product, ProductId, User, UserId};

/// Email accepted by demo-mode login.
pub const DEMO_EMAIL: &str = "demo@verdant.shop";

/// Password accepted by demo-mode login.
pub const DEMO_PASSWORD: &str = "verdant-demo";

/// The locally fabricated demo user.
#[must_use]
pub fn demo_user() -> User {
    User {
        id: UserId::new("demo-user"),
        name: "Demo Shopper".to_string(),
        email: DEMO_EMAIL.to_string(),
        cart_items: CartItems::new(),
    }
}

/// The fixed demo catalog.
#[must_use]
pub fn demo_products() -> Vec<Product> {
    vec![
        demo_product(
            "demo-mug",
            "Stoneware Mug",
            "Hand-thrown stoneware mug with a matte glaze.",
            Decimal::new(2400, 2),
            Some(Decimal::new(1900, 2)),
            "ceramics",
            &["stoneware"],
        ),
        demo_product(
            "demo-board",
            "Walnut Serving Board",
            "End-grain walnut board, finished with food-safe oil.",
            Decimal::new(5800, 2),
            None,
            "woodwork",
            &["walnut", "mineral oil"],
        ),
        demo_product(
            "demo-throw",
            "Herringbone Wool Throw",
            "Loom-woven lambswool throw in undyed natural tones.",
            Decimal::new(9600, 2),
            Some(Decimal::new(7200, 2)),
            "textiles",
            &["lambswool"],
        ),
        demo_product(
            "demo-vase",
            "Bud Vase Trio",
            "Three miniature porcelain vases in graduated heights.",
            Decimal::new(3500, 2),
            None,
            "ceramics",
            &["porcelain"],
        ),
        demo_product(
            "demo-candle",
            "Beeswax Pillar Candle",
            "Slow-burning pillar candle, unscented.",
            Decimal::new(1600, 2),
            Some(Decimal::new(1200, 2)),
            "home",
            &["beeswax", "cotton wick"],
        ),
        demo_product(
            "demo-basket",
            "Seagrass Market Basket",
            "Hand-woven basket with leather-wrapped handles.",
            Decimal::new(4400, 2),
            None,
            "home",
            &["seagrass", "leather"],
        ),
    ]
}

fn demo_product(
    id: &str,
    name: &str,
    description: &str,
    price: Decimal,
    offer_price: Option<Decimal>,
    category: &str,
    materials: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        price,
        offer_price,
        image: format!("/demo/{id}.jpg"),
        category: category.to_string(),
        in_stock: true,
        materials: materials.iter().map(ToString::to_string).collect(),
    }
}
