pub mod config;
pub mod product;

pub use config::{
    load_config, load_config_from_env, ConfigError, HarvestConfig, DEFAULT_CATEGORIES,
    DEFAULT_LOCALITY,
};
pub use product::{Assets, PriceData, Product, Stock, DESCRIPTION_KEY};
