pub mod client;
pub mod error;
pub mod listing;
pub mod locality;
pub mod normalize;
pub mod pipeline;
pub mod progress;
pub mod types;

pub use client::{AlkotekaClient, LISTING_PAGE_SIZE};
pub use error::HarvestError;
pub use listing::{fetch_category_listing, AdmittedListing, ADMISSION_THRESHOLD};
pub use locality::resolve_locality;
pub use normalize::normalize_item;
pub use pipeline::Harvester;
pub use progress::{LogProgress, ProgressObserver};
pub use types::{ListingResponse, LocalityPage, LocalityRecord, ProductDetail, ProductStub};
