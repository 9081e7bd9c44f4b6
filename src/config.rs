use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::provider::DatasetHandle;

pub const DATASET: &str = "rohanrao/formula-1-world-championship-1950-2020";
pub const FALLBACK_URL: &str =
    "https://www.kaggle.com/datasets/rohanrao/formula-1-world-championship-1950-2020";
pub const DATA_SUFFIX: &str = ".csv";
pub const DATASET_DIR_NAME: &str = "dataset";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub dataset: DatasetHandle,
    pub destination: PathBuf,
    pub suffix: String,
    pub fallback_url: String,
}

impl FetchConfig {
    pub fn new(dataset: DatasetHandle, destination: PathBuf) -> Self {
        Self {
            dataset,
            destination,
            suffix: DATA_SUFFIX.to_string(),
            fallback_url: FALLBACK_URL.to_string(),
        }
    }

    /// Production configuration: the F1 dataset, copied into `dataset/`
    /// next to the running executable.
    pub fn for_current_exe() -> Result<Self> {
        let exe = std::env::current_exe().context("Failed to locate the running executable")?;
        let exe_dir = exe
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Executable path has no parent: {:?}", exe))?;

        Ok(Self::new(DATASET.parse()?, destination_in(exe_dir)))
    }
}

pub fn destination_in(base: &Path) -> PathBuf {
    base.join(DATASET_DIR_NAME)
}
