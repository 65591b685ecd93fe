use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("endpoint not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Fatal: the target locality is on no page of the locality directory.
    #[error("locality \"{locality}\" not found after scanning {pages_scanned} directory pages")]
    LocalityNotFound { locality: String, pages_scanned: u32 },

    /// The listing fetch for one category failed; that category is skipped.
    #[error("failed to fetch listing for category \"{category}\": {source}")]
    CategoryFetchFailed {
        category: String,
        #[source]
        source: Box<HarvestError>,
    },

    /// The detail fetch for one product failed; that product is dropped.
    #[error("failed to fetch detail for product \"{slug}\": {source}")]
    DetailFetchFailed {
        slug: String,
        #[source]
        source: Box<HarvestError>,
    },

    /// A required field no fallback chain covers is absent; the affected
    /// unit is skipped with a diagnostic.
    #[error("malformed response for {context}: {reason}")]
    MalformedResponse { context: String, reason: String },
}
