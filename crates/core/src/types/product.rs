//! Catalog product type.
//!
//! These types mirror the backend's JSON wire format (camelCase field
//! names, numeric prices) and provide a clean domain API on top of it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// A product in the catalog.
///
/// The catalog is always loaded or replaced wholesale; this controller
/// never patches individual fields of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Plain text description.
    pub description: String,
    /// List price.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Discounted price, if the product is on offer.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub offer_price: Option<Decimal>,
    /// Image URL.
    pub image: String,
    /// Category handle (e.g., "ceramics").
    pub category: String,
    /// Whether the product can currently be purchased.
    pub in_stock: bool,
    /// Materials the product is made from.
    #[serde(default)]
    pub materials: Vec<String>,
}

impl Product {
    /// The price a buyer actually pays: the offer price if one is set,
    /// otherwise the list price.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.offer_price.unwrap_or(self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: Decimal, offer_price: Option<Decimal>) -> Product {
        Product {
            id: ProductId::new("p1"),
            name: "Stoneware Mug".to_string(),
            description: "Hand-thrown stoneware mug".to_string(),
            price,
            offer_price,
            image: "https://cdn.example.com/mug.jpg".to_string(),
            category: "ceramics".to_string(),
            in_stock: true,
            materials: vec!["stoneware".to_string()],
        }
    }

    #[test]
    fn test_effective_price_prefers_offer() {
        let p = product(Decimal::new(1000, 2), Some(Decimal::new(800, 2)));
        assert_eq!(p.effective_price(), Decimal::new(800, 2));
    }

    #[test]
    fn test_effective_price_falls_back_to_list() {
        let p = product(Decimal::new(1000, 2), None);
        assert_eq!(p.effective_price(), Decimal::new(1000, 2));
    }

    #[test]
    fn test_deserializes_backend_wire_format() {
        let json = r#"{
            "id": "p1",
            "name": "Stoneware Mug",
            "description": "Hand-thrown stoneware mug",
            "price": 10,
            "offerPrice": 8.5,
            "image": "https://cdn.example.com/mug.jpg",
            "category": "ceramics",
            "inStock": true,
            "materials": ["stoneware"]
        }"#;
        let p: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(p.price, Decimal::new(10, 0));
        assert_eq!(p.offer_price, Some(Decimal::new(85, 1)));
        assert!(p.in_stock);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{
            "id": "p1",
            "name": "Stoneware Mug",
            "description": "Hand-thrown stoneware mug",
            "price": 10,
            "image": "https://cdn.example.com/mug.jpg",
            "category": "ceramics",
            "inStock": false
        }"#;
        let p: Product = serde_json::from_str(json).expect("deserialize");
        assert_eq!(p.offer_price, None);
        assert!(p.materials.is_empty());
    }
}
