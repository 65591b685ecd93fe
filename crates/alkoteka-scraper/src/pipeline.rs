//! Run orchestration: locality resolution, concurrent category
//! enumeration, bounded detail fan-out, normalization.

use futures::stream::{self, StreamExt};

use alkoteka_core::{HarvestConfig, Product};

use crate::client::AlkotekaClient;
use crate::error::HarvestError;
use crate::listing::{fetch_category_listing, AdmittedListing};
use crate::locality::resolve_locality;
use crate::normalize::normalize_item;
use crate::progress::ProgressObserver;
use crate::types::{LocalityRecord, ProductStub};

/// Drives one harvest run end to end.
pub struct Harvester {
    client: AlkotekaClient,
    config: HarvestConfig,
}

impl Harvester {
    /// # Errors
    ///
    /// Returns [`HarvestError::Http`] if the HTTP client cannot be built.
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestError> {
        let client = AlkotekaClient::from_config(&config)?;
        Ok(Self { client, config })
    }

    /// Runs the pipeline and returns the emitted records, in no
    /// particular order.
    ///
    /// A failed category listing skips that category; a failed or
    /// malformed product drops that product. Only locality resolution is
    /// fatal — it aborts before any category or detail fetch is issued.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::LocalityNotFound`] (or the transport error
    /// that interrupted directory paging) when the target locality cannot
    /// be resolved.
    pub async fn run(
        &self,
        observer: &dyn ProgressObserver,
    ) -> Result<Vec<Product>, HarvestError> {
        let locality = resolve_locality(&self.client, &self.config.locality).await?;
        tracing::info!(
            locality = %locality.slug,
            categories = self.config.categories.len(),
            "starting harvest"
        );

        // All category listings run concurrently; failures skip only the
        // affected category.
        let listings: Vec<AdmittedListing> = stream::iter(&self.config.categories)
            .map(|category| {
                let locality = &locality;
                async move {
                    match fetch_category_listing(&self.client, locality, category).await {
                        Ok(listing) => listing,
                        Err(e) => {
                            let e = HarvestError::CategoryFetchFailed {
                                category: category.clone(),
                                source: Box::new(e),
                            };
                            tracing::error!(error = %e, "skipping category");
                            None
                        }
                    }
                }
            })
            .buffer_unordered(self.config.categories.len().max(1))
            .filter_map(|listing| async move { listing })
            .collect()
            .await;

        // Seed the observer before the first item. The sum of admitted
        // totals may overestimate when detail fetches later fail.
        let expected = if listings.is_empty() {
            None
        } else {
            Some(
                listings
                    .iter()
                    .map(|l| u64::try_from(l.total).unwrap_or(0))
                    .sum(),
            )
        };
        observer.on_start(expected);

        let pairs: Vec<(String, ProductStub)> = listings
            .into_iter()
            .flat_map(|listing| {
                let category = listing.category;
                listing
                    .stubs
                    .into_iter()
                    .map(move |stub| (category.clone(), stub))
            })
            .collect();

        let products: Vec<Product> = stream::iter(pairs)
            .map(|(category, stub)| {
                let locality = &locality;
                async move { self.harvest_one(locality, &category, stub, observer).await }
            })
            .buffer_unordered(self.config.max_concurrent_details.max(1))
            .filter_map(|product| async move { product })
            .collect()
            .await;

        observer.on_finish();
        Ok(products)
    }

    /// Detail fetch + normalization for one stub. Every failure path
    /// returns `None`: the product is dropped, nothing else is affected.
    async fn harvest_one(
        &self,
        locality: &LocalityRecord,
        category: &str,
        stub: ProductStub,
        observer: &dyn ProgressObserver,
    ) -> Option<Product> {
        let detail = match self.client.fetch_detail(locality, &stub.slug).await {
            Ok(detail) => detail,
            Err(e) => {
                let e = HarvestError::DetailFetchFailed {
                    slug: stub.slug.clone(),
                    source: Box::new(e),
                };
                tracing::error!(category, error = %e, "dropping product");
                return None;
            }
        };

        tracing::debug!(item = %detail.name, category, "normalizing item");
        match normalize_item(&stub, &detail) {
            Ok(product) => {
                observer.on_item();
                Some(product)
            }
            Err(e) => {
                tracing::warn!(category, slug = %stub.slug, error = %e, "skipping product");
                None
            }
        }
    }
}
