use anyhow::{Context, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::archive::{extract_zip, replace_dir};
use crate::download::{download_file, BasicAuth};
use crate::provider::{DatasetHandle, DatasetProvider};

pub const API_BASE: &str = "https://www.kaggle.com/api/v1";

const USER_AGENT: &str = concat!("f1-dataset-fetcher/", env!("CARGO_PKG_VERSION"));

/// Contents of `kaggle.json` as issued by the Kaggle account page.
#[derive(Debug, Clone, Deserialize)]
struct CredentialsFile {
    username: String,
    key: String,
}

/// Downloads dataset archives from the Kaggle public API and unpacks them
/// under `<cache_root>/datasets/<owner>/<slug>`.
pub struct KaggleProvider {
    client: Client,
    api_base: String,
    cache_root: PathBuf,
    auth: Option<BasicAuth>,
}

impl KaggleProvider {
    pub fn new(api_base: String, cache_root: PathBuf, auth: Option<BasicAuth>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            cache_root,
            auth,
        })
    }

    pub fn from_env() -> Result<Self> {
        let cache_root = match std::env::var_os("KAGGLEHUB_CACHE") {
            Some(dir) => PathBuf::from(dir),
            None => directories::BaseDirs::new()
                .ok_or_else(|| anyhow::anyhow!("Failed to get base directories"))?
                .cache_dir()
                .join("kagglehub"),
        };

        let home = directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf());
        let auth = resolve_credentials(|name| std::env::var(name).ok(), home.as_deref())?;
        if auth.is_none() {
            log::info!("No Kaggle credentials found, downloading anonymously");
        }

        Self::new(API_BASE.to_string(), cache_root, auth)
    }

    pub fn cache_dir(&self, handle: &DatasetHandle) -> PathBuf {
        self.cache_root
            .join("datasets")
            .join(&handle.owner)
            .join(&handle.slug)
    }

    fn download_url(&self, handle: &DatasetHandle) -> String {
        format!(
            "{}/datasets/download/{}/{}",
            self.api_base, handle.owner, handle.slug
        )
    }
}

impl DatasetProvider for KaggleProvider {
    fn name(&self) -> &'static str {
        "Kaggle"
    }

    fn dataset_download(&self, handle: &DatasetHandle) -> Result<PathBuf> {
        log::info!("Requesting dataset {} from Kaggle", handle);

        fs::create_dir_all(&self.cache_root).context("Failed to create cache directory")?;
        // Staging inside the cache root keeps the final move a plain rename.
        let staging = tempfile::tempdir_in(&self.cache_root)
            .context("Failed to create temporary directory")?;

        let zip_path = staging.path().join("dataset.zip");
        download_file(
            &self.client,
            &self.download_url(handle),
            self.auth.as_ref(),
            &zip_path,
        )?;

        let extract_dir = staging.path().join("extracted");
        fs::create_dir_all(&extract_dir)?;
        extract_zip(&zip_path, &extract_dir)?;

        let target = self.cache_dir(handle);
        replace_dir(&extract_dir, &target)?;

        log::info!("Dataset {} available at {:?}", handle, target);
        Ok(target)
    }
}

/// Finds Kaggle API credentials: `KAGGLE_USERNAME`/`KAGGLE_KEY` first, then
/// `kaggle.json` in `KAGGLE_CONFIG_DIR` or `~/.kaggle`. Absent credentials
/// are not an error; an unreadable `kaggle.json` is.
pub fn resolve_credentials<F>(env: F, home: Option<&Path>) -> Result<Option<BasicAuth>>
where
    F: Fn(&str) -> Option<String>,
{
    if let (Some(username), Some(key)) = (env("KAGGLE_USERNAME"), env("KAGGLE_KEY")) {
        log::info!("Using Kaggle credentials from environment");
        return Ok(Some(BasicAuth { username, key }));
    }

    let config_dir = match env("KAGGLE_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => match home {
            Some(home) => home.join(".kaggle"),
            None => return Ok(None),
        },
    };

    let path = config_dir.join("kaggle.json");
    if !path.exists() {
        return Ok(None);
    }

    let text = fs::read_to_string(&path).with_context(|| format!("Failed to read {:?}", path))?;
    let file: CredentialsFile =
        serde_json::from_str(&text).with_context(|| format!("Failed to parse {:?}", path))?;

    log::info!("Using Kaggle credentials from {:?}", path);
    Ok(Some(BasicAuth {
        username: file.username,
        key: file.key,
    }))
}
