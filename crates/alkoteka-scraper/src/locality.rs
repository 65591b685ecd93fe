//! Locality resolution: a linear scan of the paginated locality
//! directory, `FETCH_PAGE → EVALUATE → {DONE | FETCH_PAGE(next) | FAIL}`.

use crate::client::AlkotekaClient;
use crate::error::HarvestError;
use crate::types::LocalityRecord;

/// Pages through the locality directory until an entry's slug matches
/// `target` case-insensitively.
///
/// The first match terminates the scan — no further pages are fetched
/// even if more exist. Paging state is local to this call, so concurrent
/// resolutions never contaminate each other.
///
/// # Errors
///
/// - [`HarvestError::LocalityNotFound`] — no entry matched and the
///   directory reported no more pages. This is fatal to the whole run.
/// - Any transport or decode error from the page fetches.
pub async fn resolve_locality(
    client: &AlkotekaClient,
    target: &str,
) -> Result<LocalityRecord, HarvestError> {
    let target_lower = target.to_lowercase();
    let mut page: u32 = 1;

    loop {
        let meta = client.fetch_locality_page(page).await?.meta;
        if let Some(found) = meta
            .accented
            .into_iter()
            .find(|entry| entry.slug.to_lowercase() == target_lower)
        {
            tracing::debug!(locality = %found.slug, uuid = %found.uuid, page, "locality resolved");
            return Ok(found);
        }
        if !meta.has_more_pages {
            return Err(HarvestError::LocalityNotFound {
                locality: target.to_owned(),
                pages_scanned: page,
            });
        }
        page += 1;
    }
}
