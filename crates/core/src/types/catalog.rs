//! Catalog types sourced from the gateway.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A purchasable menu entry.
///
/// Catalog items are owned by the gateway; this layer only reads them and
/// issues create/update/delete requests followed by a re-fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Category label, matched against [`Category::name`] when filtering.
    pub category: String,
    /// Non-negative; enforced at the admin form boundary.
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imageURL", default)]
    pub image_url: String,
    /// Inactive items stay editable in the admin area but are hidden from
    /// the public menu.
    #[serde(rename = "activeStatus", default = "default_active")]
    pub active_status: bool,
}

const fn default_active() -> bool {
    true
}

/// Payload for creating a catalog item; the gateway assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    #[serde(rename = "imageURL")]
    pub image_url: String,
    #[serde(rename = "activeStatus")]
    pub active_status: bool,
}

/// A menu category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_deserializes_gateway_row() {
        let json = serde_json::json!({
            "id": "P-7",
            "name": "Momo Platter",
            "category": "Starters",
            "price": 450,
            "description": "Steamed dumplings",
            "imageURL": "https://img.example.net/momo.webp",
            "activeStatus": true
        });

        let product: Product = serde_json::from_value(json).expect("should parse");
        assert_eq!(product.id, "P-7");
        assert_eq!(product.price, Decimal::from(450));
        assert_eq!(product.image_url, "https://img.example.net/momo.webp");
        assert!(product.active_status);
    }

    #[test]
    fn product_missing_optional_fields_defaults() {
        // Sheets rows with empty cells arrive without the optional columns.
        let json = serde_json::json!({
            "id": "P-8",
            "name": "Thali",
            "category": "Mains",
            "price": "780.50"
        });

        let product: Product = serde_json::from_value(json).expect("should parse");
        assert_eq!(product.description, "");
        assert_eq!(product.image_url, "");
        assert!(product.active_status);
        assert_eq!(product.price.to_string(), "780.50");
    }

    #[test]
    fn new_product_serializes_wire_names() {
        let product = NewProduct {
            name: "Sel Roti".to_string(),
            category: "Desserts".to_string(),
            price: Decimal::from(120),
            description: String::new(),
            image_url: "https://img.example.net/selroti.webp".to_string(),
            active_status: false,
        };

        let value = serde_json::to_value(&product).expect("should serialize");
        assert!(value.get("imageURL").is_some());
        assert_eq!(value["activeStatus"], serde_json::json!(false));
    }
}
