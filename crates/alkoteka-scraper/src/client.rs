use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::Client;

use alkoteka_core::HarvestConfig;

use crate::error::HarvestError;
use crate::types::{DetailResponse, ListingResponse, LocalityPage, LocalityRecord, ProductDetail};

/// Fixed listing page size: one page sized large enough to contain a full
/// category in a single response.
pub const LISTING_PAGE_SIZE: u32 = 10_000;

const CITY_PATH: &str = "/web-api/v1/city";
const PRODUCT_PATH: &str = "/web-api/v1/product";

const LOCALITY_COOKIE: &str = "alkoteka_locality";
const AGE_CONFIRM_COOKIE: &str = "alkoteka_age_confirm";

/// Bytes that must not appear raw in a cookie value. Non-ASCII bytes are
/// always percent-encoded regardless of this set.
const COOKIE_VALUE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b',')
    .add(b';')
    .add(b'\\')
    .add(b'%');

/// HTTP client for the Alkoteka `web-api/v1` endpoints.
///
/// A thin typed transport: non-2xx statuses and body-shape mismatches
/// surface as typed errors. Retry and rate limiting are the caller's
/// concern — the dispatcher wrapping this client owns that policy.
pub struct AlkotekaClient {
    client: Client,
    /// Origin of the web API, no trailing slash.
    base_url: String,
}

impl AlkotekaClient {
    /// Creates a client with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, HarvestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Creates a client from a [`HarvestConfig`].
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::new`].
    pub fn from_config(config: &HarvestConfig) -> Result<Self, HarvestError> {
        Self::new(
            &config.base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches one page of the locality directory.
    ///
    /// # Errors
    ///
    /// - [`HarvestError::NotFound`] — HTTP 404.
    /// - [`HarvestError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`HarvestError::Http`] — network or TLS failure.
    /// - [`HarvestError::Deserialize`] — body is not the expected shape.
    pub async fn fetch_locality_page(&self, page: u32) -> Result<LocalityPage, HarvestError> {
        let url = format!("{}{CITY_PATH}?page={page}", self.base_url);
        self.get_json(&url, None, &format!("locality directory page {page}"))
            .await
    }

    /// Fetches the first listing page of a category, scoped to the
    /// resolved locality via `city_uuid` plus the locality-context and
    /// age-confirmation cookies.
    ///
    /// # Errors
    ///
    /// As [`Self::fetch_locality_page`].
    pub async fn fetch_listing(
        &self,
        locality: &LocalityRecord,
        category_slug: &str,
    ) -> Result<ListingResponse, HarvestError> {
        let url = self.listing_url(&locality.uuid, category_slug);
        let cookie = locality_cookie(locality)?;
        self.get_json(
            &url,
            Some(&cookie),
            &format!("category listing \"{category_slug}\""),
        )
        .await
    }

    /// Fetches the full detail record for one product slug.
    ///
    /// The locality cookies are sent here too: the API scopes pricing,
    /// availability, and age-gated products by them on every catalog
    /// request.
    ///
    /// # Errors
    ///
    /// As [`Self::fetch_locality_page`].
    pub async fn fetch_detail(
        &self,
        locality: &LocalityRecord,
        slug: &str,
    ) -> Result<ProductDetail, HarvestError> {
        let url = self.detail_url(&locality.uuid, slug);
        let cookie = locality_cookie(locality)?;
        let response: DetailResponse = self
            .get_json(&url, Some(&cookie), &format!("product detail \"{slug}\""))
            .await?;
        Ok(response.results)
    }

    async fn get_json<T>(
        &self,
        url: &str,
        cookie: Option<&str>,
        context: &str,
    ) -> Result<T, HarvestError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut request = self.client.get(url);
        if let Some(cookie) = cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(HarvestError::NotFound {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(HarvestError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<T>(&body).map_err(|e| HarvestError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }

    fn listing_url(&self, city_uuid: &str, category_slug: &str) -> String {
        format!(
            "{}{PRODUCT_PATH}?city_uuid={city_uuid}&root_category_slug={category_slug}&page=1&per_page={LISTING_PAGE_SIZE}",
            self.base_url
        )
    }

    fn detail_url(&self, city_uuid: &str, slug: &str) -> String {
        format!("{}{PRODUCT_PATH}/{slug}?city_uuid={city_uuid}", self.base_url)
    }
}

/// Builds the `Cookie` header value carrying the locality context and the
/// age-confirmation flag. The locality record is serialized back to JSON
/// verbatim, opaque fields included.
fn locality_cookie(locality: &LocalityRecord) -> Result<String, HarvestError> {
    let json = serde_json::to_string(locality).map_err(|e| HarvestError::Deserialize {
        context: format!("locality cookie for \"{}\"", locality.slug),
        source: e,
    })?;
    let encoded = utf8_percent_encode(&json, COOKIE_VALUE);
    Ok(format!(
        "{LOCALITY_COOKIE}={encoded}; {AGE_CONFIRM_COOKIE}=true"
    ))
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
