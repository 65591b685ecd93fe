//! Category enumeration with the minimum-size admission gate.

use crate::client::AlkotekaClient;
use crate::error::HarvestError;
use crate::types::{LocalityRecord, ProductStub};

/// Categories reporting fewer items than this are discarded wholesale.
pub const ADMISSION_THRESHOLD: i64 = 100;

/// A category that passed the admission gate: its reported total plus
/// every stub from the single oversized listing page.
#[derive(Debug)]
pub struct AdmittedListing {
    pub category: String,
    /// Category-wide count as reported by the API. Seeds the progress
    /// expectation; may overestimate if detail fetches later fail.
    pub total: i64,
    pub stubs: Vec<ProductStub>,
}

/// Fetches one listing page for `category_slug` scoped to `locality` and
/// applies the admission gate.
///
/// Returns `Ok(None)` when the category's total is below
/// [`ADMISSION_THRESHOLD`] — a normal filtering outcome, logged at debug
/// and never as a failure. When admitted, every stub on the page is
/// emitted; the listing is never paginated further because the page size
/// is large enough to hold the full category.
///
/// # Errors
///
/// Any transport or decode error from the listing fetch. The caller skips
/// only this category on failure.
pub async fn fetch_category_listing(
    client: &AlkotekaClient,
    locality: &LocalityRecord,
    category_slug: &str,
) -> Result<Option<AdmittedListing>, HarvestError> {
    let response = client.fetch_listing(locality, category_slug).await?;
    let total = response.meta.total;

    if total < ADMISSION_THRESHOLD {
        tracing::debug!(
            category = category_slug,
            total,
            threshold = ADMISSION_THRESHOLD,
            "category below admission threshold, skipping"
        );
        return Ok(None);
    }

    tracing::info!(
        category = category_slug,
        total,
        stubs = response.results.len(),
        "category admitted"
    );
    Ok(Some(AdmittedListing {
        category: category_slug.to_owned(),
        total,
        stubs: response.results,
    }))
}
