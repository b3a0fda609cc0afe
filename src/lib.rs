pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod extract;
pub mod utils;

pub use adapters::{ner_http::HttpNerBackend, storage::LocalStorage};
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use crate::core::{
    etl::{EngineOutput, TripEngine},
    pipeline::TripPipeline,
};
pub use domain::model::{Strategy, TripInfo};
pub use extract::TripExtractor;
pub use utils::error::{Result, TripError};
