//! Normalization from raw listing + detail data into the canonical
//! [`Product`] record.
//!
//! Pure, side-effect-free computation apart from the capture timestamp.
//! All missing/zero numeric source fields fall back along the documented
//! chains; the only hard requirement is the stub's category reference.

use std::collections::BTreeMap;

use alkoteka_core::{Assets, PriceData, Product, Stock, DESCRIPTION_KEY};

use crate::error::HarvestError;
use crate::types::{ProductDetail, ProductStub};

/// Filter keys whose labels describe purchasable variants of the same
/// listing (volume and color facets).
const VARIANT_FILTERS: &[&str] = &["obem", "cvet"];

/// Merges a listing stub and its detail record into a [`Product`].
///
/// # Errors
///
/// Returns [`HarvestError::MalformedResponse`] when the stub carries no
/// category reference — the section path cannot be fabricated.
pub fn normalize_item(
    stub: &ProductStub,
    detail: &ProductDetail,
) -> Result<Product, HarvestError> {
    let category = stub
        .category
        .as_ref()
        .ok_or_else(|| HarvestError::MalformedResponse {
            context: format!("listing stub \"{}\"", stub.slug),
            reason: "stub has no category reference".to_owned(),
        })?;

    let rpc = detail
        .vendor_code
        .clone()
        .filter(|code| !code.is_empty())
        .or_else(|| detail.uuid.clone())
        .unwrap_or_default();

    let variant_titles: Vec<&str> = stub
        .filter_labels
        .iter()
        .filter(|label| VARIANT_FILTERS.contains(&label.filter.as_str()))
        .map(|label| label.title.as_str())
        .collect();
    let title = if variant_titles.is_empty() {
        stub.name.clone()
    } else {
        format!("{}, {}", stub.name, variant_titles.join(", "))
    };
    let variants = u32::try_from(variant_titles.len()).unwrap_or(u32::MAX);

    let mut section = Vec::with_capacity(2);
    if let Some(parent) = &category.parent {
        section.push(parent.name.clone());
    }
    section.push(category.name.clone());

    let current = first_positive(&[detail.price, stub.price]);
    let original = first_positive(&[detail.prev_price, stub.prev_price, stub.price]);
    let sale_tag = if original > 0.0 && current < original {
        let pct = ((1.0 - current / original) * 100.0).round();
        format!("Скидка {pct:.0}%")
    } else {
        String::new()
    };

    let count = detail
        .quantity_total
        .filter(|q| *q > 0)
        .or_else(|| stub.quantity_total.filter(|q| *q > 0))
        .unwrap_or(0);

    let main_image = detail.image_url.clone().or_else(|| stub.image_url.clone());

    let description = detail
        .text_blocks
        .iter()
        .map(|block| format!("{}: {}", block.title, block.content.replace("<br>", "\n")))
        .collect::<Vec<_>>()
        .join("\n");
    let mut metadata = BTreeMap::new();
    metadata.insert(DESCRIPTION_KEY.to_owned(), description);
    // A later block with a duplicate title overwrites the earlier entry:
    // metadata is a mapping, not a multimap.
    for block in &detail.description_blocks {
        if let Some(first) = block.values.first() {
            metadata.insert(block.title.clone(), first.name.clone());
        }
    }

    let brand = detail
        .subname
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_owned();

    Ok(Product {
        timestamp: chrono::Utc::now().timestamp(),
        rpc,
        url: stub.product_url.clone(),
        title,
        marketing_tags: stub.action_labels.clone(),
        brand,
        section,
        price_data: PriceData {
            current,
            original,
            sale_tag,
        },
        stock: Stock {
            in_stock: detail.available,
            count,
        },
        assets: Assets {
            main_image,
            ..Assets::default()
        },
        metadata,
        variants,
    })
}

/// First strictly positive value in the chain, else 0. Zero and absent
/// source prices are equally "no data" on this wire.
fn first_positive(candidates: &[Option<f64>]) -> f64 {
    candidates
        .iter()
        .find_map(|c| c.filter(|v| *v > 0.0))
        .unwrap_or(0.0)
}
