use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{provider} download provider is not available in this build")]
    ProviderUnavailable {
        provider: &'static str,
        hint: String,
    },

    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

impl FetchError {
    pub fn is_provider_unavailable(&self) -> bool {
        matches!(self, FetchError::ProviderUnavailable { .. })
    }
}

impl From<std::io::Error> for FetchError {
    fn from(err: std::io::Error) -> Self {
        FetchError::Failed(err.into())
    }
}
