use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reserved metadata key holding the concatenated long-form product
/// description. Always present in [`Product::metadata`], even when the
/// description is empty.
pub const DESCRIPTION_KEY: &str = "__description";

/// A catalog item normalized from listing + detail data, in the shape
/// expected by downstream storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Capture instant, integer seconds since the Unix epoch.
    pub timestamp: i64,
    /// External reference id: the vendor code when set, else the source
    /// record's unique id, else empty.
    #[serde(rename = "RPC")]
    pub rpc: String,
    /// Canonical product page URL.
    pub url: String,
    /// Listing name, with comma-joined volume/color labels appended when
    /// any exist (e.g. `"Cola, 0.5L, Red"`).
    pub title: String,
    pub marketing_tags: Vec<String>,
    /// Trimmed brand name; empty when the source has none.
    pub brand: String,
    /// Category path: parent category name (when present) followed by the
    /// category name.
    pub section: Vec<String>,
    pub price_data: PriceData,
    pub stock: Stock,
    pub assets: Assets,
    /// Spec sheet: description-block title → first value name, plus the
    /// [`DESCRIPTION_KEY`] entry.
    pub metadata: BTreeMap<String, String>,
    /// Number of volume/color filter labels found on the listing stub.
    pub variants: u32,
}

/// Price pair plus a human-readable discount tag.
///
/// Invariant: `original >= current` whenever `sale_tag` is non-empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceData {
    pub current: f64,
    pub original: f64,
    /// Discount phrase like `"Скидка 20%"`, empty when no reduction applies.
    pub sale_tag: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stock {
    pub in_stock: bool,
    /// Units available; `0` when the source reports none.
    pub count: i64,
}

/// Media references. The catalog API exposes a single image per product;
/// the remaining lists stay empty for schema compatibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Assets {
    pub main_image: Option<String>,
    pub set_images: Vec<String>,
    pub view360: Vec<String>,
    pub video: Vec<String>,
}

impl Product {
    /// Returns `true` when a discount tag is set.
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        !self.price_data.sale_tag.is_empty()
    }

    /// Returns the long-form description, empty when the source had none.
    #[must_use]
    pub fn description(&self) -> &str {
        self.metadata
            .get(DESCRIPTION_KEY)
            .map_or("", String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(sale_tag: &str) -> Product {
        let mut metadata = BTreeMap::new();
        metadata.insert(DESCRIPTION_KEY.to_string(), "Объем: 0.5 л".to_string());
        Product {
            timestamp: 1_700_000_000,
            rpc: "163989".to_string(),
            url: "https://alkoteka.com/product/cola".to_string(),
            title: "Cola, 0.5L".to_string(),
            marketing_tags: vec!["Хит".to_string()],
            brand: "Cola Co".to_string(),
            section: vec!["Напитки".to_string(), "Газировка".to_string()],
            price_data: PriceData {
                current: 80.0,
                original: 100.0,
                sale_tag: sale_tag.to_string(),
            },
            stock: Stock {
                in_stock: true,
                count: 12,
            },
            assets: Assets {
                main_image: Some("https://cdn.example/cola.jpg".to_string()),
                ..Assets::default()
            },
            metadata,
            variants: 1,
        }
    }

    #[test]
    fn is_discounted_true_when_sale_tag_set() {
        assert!(make_product("Скидка 20%").is_discounted());
    }

    #[test]
    fn is_discounted_false_when_sale_tag_empty() {
        assert!(!make_product("").is_discounted());
    }

    #[test]
    fn description_reads_reserved_metadata_key() {
        assert_eq!(make_product("").description(), "Объем: 0.5 л");
    }

    #[test]
    fn description_empty_when_key_missing() {
        let mut product = make_product("");
        product.metadata.clear();
        assert_eq!(product.description(), "");
    }

    #[test]
    fn rpc_serializes_uppercase() {
        let json = serde_json::to_value(make_product("")).expect("serialization failed");
        assert!(json.get("RPC").is_some());
        assert!(json.get("rpc").is_none());
    }

    #[test]
    fn serde_roundtrip_preserves_metadata() {
        let product = make_product("Скидка 20%");
        let json = serde_json::to_string(&product).expect("serialization failed");
        let decoded: Product = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(decoded.description(), product.description());
        assert_eq!(decoded.price_data.sale_tag, "Скидка 20%");
        assert_eq!(decoded.variants, 1);
    }
}
