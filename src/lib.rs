pub mod config;
pub mod error;
pub mod fetcher;
pub mod provider;
pub mod report;

#[cfg(feature = "kaggle")]
pub mod archive;
#[cfg(feature = "kaggle")]
pub mod download;
#[cfg(feature = "kaggle")]
pub mod kaggle;

pub use config::FetchConfig;
pub use error::FetchError;
pub use fetcher::{DatasetFetcher, FetchReport, Progress};
pub use provider::{default_provider, DatasetHandle, DatasetProvider};
