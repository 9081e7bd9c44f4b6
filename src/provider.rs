use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::error::FetchError;

/// `owner/slug` identifier of a hosted dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetHandle {
    pub owner: String,
    pub slug: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HandleError {
    #[error("dataset handle {0:?} must look like owner/slug")]
    Malformed(String),
}

impl FromStr for DatasetHandle {
    type Err = HandleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(slug), None) if !owner.is_empty() && !slug.is_empty() => Ok(Self {
                owner: owner.to_string(),
                slug: slug.to_string(),
            }),
            _ => Err(HandleError::Malformed(s.to_string())),
        }
    }
}

impl fmt::Display for DatasetHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.slug)
    }
}

/// Something that can put a dataset on local disk and say where.
///
/// The returned directory belongs to the provider; callers only read from it.
pub trait DatasetProvider {
    fn name(&self) -> &'static str;

    fn dataset_download(&self, handle: &DatasetHandle) -> anyhow::Result<PathBuf>;
}

impl<T: DatasetProvider + ?Sized> DatasetProvider for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn dataset_download(&self, handle: &DatasetHandle) -> anyhow::Result<PathBuf> {
        (**self).dataset_download(handle)
    }
}

#[cfg(feature = "kaggle")]
pub fn default_provider() -> Result<Box<dyn DatasetProvider>, FetchError> {
    let provider = crate::kaggle::KaggleProvider::from_env().map_err(FetchError::Failed)?;
    Ok(Box::new(provider))
}

#[cfg(not(feature = "kaggle"))]
pub fn default_provider() -> Result<Box<dyn DatasetProvider>, FetchError> {
    Err(FetchError::ProviderUnavailable {
        provider: "Kaggle",
        hint: "Install a build that includes it: cargo install --path . --features kaggle"
            .to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_slug() {
        let handle: DatasetHandle = "rohanrao/formula-1-world-championship-1950-2020"
            .parse()
            .unwrap();
        assert_eq!(handle.owner, "rohanrao");
        assert_eq!(handle.slug, "formula-1-world-championship-1950-2020");
        assert_eq!(
            handle.to_string(),
            "rohanrao/formula-1-world-championship-1950-2020"
        );
    }

    #[test]
    fn rejects_malformed_handles() {
        for bad in ["", "owner", "owner/", "/slug", "a/b/c"] {
            assert_eq!(
                bad.parse::<DatasetHandle>(),
                Err(HandleError::Malformed(bad.to_string())),
                "{bad:?} should not parse"
            );
        }
    }

    #[cfg(not(feature = "kaggle"))]
    #[test]
    fn missing_provider_is_reported_not_installed() {
        let err = default_provider().err().unwrap();
        assert!(err.is_provider_unavailable());
    }
}
