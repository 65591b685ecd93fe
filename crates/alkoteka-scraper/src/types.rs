//! Raw response shapes for the Alkoteka `web-api/v1` endpoints.
//!
//! ## Observed wire behavior
//!
//! ### Locality directory (`/web-api/v1/city?page=N`)
//! Entries live under `meta.accented`, alongside a `meta.has_more_pages`
//! boolean. A locality entry carries `uuid` and `slug` plus a grab-bag of
//! presentation fields; the full entry is echoed back to the API as the
//! locality cookie, so unknown fields are preserved via `#[serde(flatten)]`
//! rather than dropped.
//!
//! ### Category listing (`/web-api/v1/product?...`)
//! `meta.total` is the category-wide item count; `results` holds the
//! listing stubs for the requested page. Stubs occasionally omit `price`,
//! `prev_price`, `quantity_total` or `image_url` (`null` or absent) — all
//! optional here, with fallback rules applied once in `normalize`.
//!
//! ### Product detail (`/web-api/v1/product/{slug}?...`)
//! The payload sits under `results`. `vendor_code` arrives as a string on
//! some products and a bare number on others; [`string_or_number`] coerces
//! both to `Option<String>` at the boundary.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// One page of the locality directory.
#[derive(Debug, Deserialize)]
pub struct LocalityPage {
    pub meta: LocalityPageMeta,
}

#[derive(Debug, Deserialize)]
pub struct LocalityPageMeta {
    /// Locality entries on this page.
    #[serde(default)]
    pub accented: Vec<LocalityRecord>,
    /// `true` while further directory pages exist.
    #[serde(default)]
    pub has_more_pages: bool,
}

/// A locality directory entry. Immutable once resolved; the whole record
/// (including the opaque `extra` fields) is serialized into the locality
/// cookie that scopes all subsequent requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalityRecord {
    /// Opaque locality identifier used in `city_uuid` query params.
    pub uuid: String,
    /// Display slug, matched case-insensitively against the target.
    pub slug: String,
    /// Remaining free-form fields, passed through unmodified.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Response of a category listing fetch.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub meta: ListingMeta,
    #[serde(default)]
    pub results: Vec<ProductStub>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingMeta {
    /// Category-wide item count, the admission-gate input.
    #[serde(default)]
    pub total: i64,
}

/// Listing-level product data, prior to detail enrichment. Not mutated
/// after creation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductStub {
    pub slug: String,
    pub name: String,
    /// Canonical product page URL.
    pub product_url: String,
    #[serde(default)]
    pub filter_labels: Vec<FilterLabel>,
    /// Marketing tags shown on the listing tile.
    #[serde(default)]
    pub action_labels: Vec<String>,
    /// Category reference. Absent on malformed stubs; normalization skips
    /// those with a diagnostic rather than fabricating a section.
    #[serde(default)]
    pub category: Option<CategoryRef>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub prev_price: Option<f64>,
    #[serde(default)]
    pub quantity_total: Option<i64>,
    /// Fallback image when the detail record has none.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// A filter facet attached to a listing stub, e.g.
/// `{ "filter": "obem", "title": "0.5 л" }`.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterLabel {
    pub filter: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRef {
    pub name: String,
    #[serde(default)]
    pub parent: Option<Box<CategoryRef>>,
}

/// Envelope of a product detail fetch.
#[derive(Debug, Deserialize)]
pub struct DetailResponse {
    pub results: ProductDetail,
}

/// Full per-product record. Consumed once by normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDetail {
    /// Display name, used for logging only.
    #[serde(default)]
    pub name: String,
    /// Vendor code; string or bare number on the wire.
    #[serde(default, deserialize_with = "string_or_number")]
    pub vendor_code: Option<String>,
    /// Unique id, the fallback external reference when `vendor_code` is
    /// empty.
    #[serde(default)]
    pub uuid: Option<String>,
    /// Brand line under the product name.
    #[serde(default)]
    pub subname: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub prev_price: Option<f64>,
    #[serde(default)]
    pub quantity_total: Option<i64>,
    /// Availability flag; absent means not available.
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Long-form description sections, in display order.
    #[serde(default)]
    pub text_blocks: Vec<TextBlock>,
    /// Spec-sheet sections, in display order.
    #[serde(default)]
    pub description_blocks: Vec<DescriptionBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub title: String,
    /// May contain literal `<br>` markup; replaced with newlines during
    /// normalization.
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DescriptionBlock {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub values: Vec<BlockValue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BlockValue {
    #[serde(default)]
    pub name: String,
}

/// Accepts a JSON string, number, or null and yields `Option<String>`.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn locality_record_flatten_roundtrips_opaque_fields() {
        let raw = json!({
            "uuid": "985b3eea",
            "slug": "krasnodar",
            "name": "Краснодар",
            "longitude": "38.9746",
            "accented": true,
        });
        let record: LocalityRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(record.uuid, "985b3eea");
        assert_eq!(record.slug, "krasnodar");
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn detail_vendor_code_accepts_number() {
        let detail: ProductDetail =
            serde_json::from_value(json!({ "vendor_code": 163989 })).unwrap();
        assert_eq!(detail.vendor_code.as_deref(), Some("163989"));
    }

    #[test]
    fn detail_vendor_code_accepts_string() {
        let detail: ProductDetail =
            serde_json::from_value(json!({ "vendor_code": "A-42" })).unwrap();
        assert_eq!(detail.vendor_code.as_deref(), Some("A-42"));
    }

    #[test]
    fn detail_vendor_code_null_is_none() {
        let detail: ProductDetail =
            serde_json::from_value(json!({ "vendor_code": null })).unwrap();
        assert!(detail.vendor_code.is_none());
    }

    #[test]
    fn detail_vendor_code_rejects_array() {
        let result = serde_json::from_value::<ProductDetail>(json!({ "vendor_code": [1] }));
        assert!(result.is_err());
    }

    #[test]
    fn detail_defaults_when_fields_absent() {
        let detail: ProductDetail = serde_json::from_value(json!({})).unwrap();
        assert!(!detail.available);
        assert!(detail.price.is_none());
        assert!(detail.text_blocks.is_empty());
        assert!(detail.description_blocks.is_empty());
    }

    #[test]
    fn stub_tolerates_null_optionals() {
        let stub: ProductStub = serde_json::from_value(json!({
            "slug": "cola",
            "name": "Cola",
            "product_url": "https://alkoteka.com/product/cola",
            "price": null,
            "prev_price": null,
            "quantity_total": null,
            "category": null,
        }))
        .unwrap();
        assert!(stub.price.is_none());
        assert!(stub.category.is_none());
        assert!(stub.filter_labels.is_empty());
    }

    #[test]
    fn category_ref_nests_parent() {
        let category: CategoryRef = serde_json::from_value(json!({
            "name": "Газировка",
            "parent": { "name": "Напитки" },
        }))
        .unwrap();
        assert_eq!(category.parent.unwrap().name, "Напитки");
    }
}
