use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::provider::DatasetProvider;

/// Progress points the fetcher reports while it works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress<'a> {
    Downloaded { source: &'a Path },
    Copying { destination: &'a Path },
    Copied { name: &'a str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchReport {
    pub source_dir: PathBuf,
    pub destination: PathBuf,
    pub copied: Vec<String>,
    pub available: Vec<String>,
}

pub struct DatasetFetcher<P> {
    config: FetchConfig,
    provider: P,
}

impl<P: DatasetProvider> DatasetFetcher<P> {
    pub fn new(config: FetchConfig, provider: P) -> Self {
        Self { config, provider }
    }

    pub fn run(&self) -> Result<FetchReport, FetchError> {
        self.run_with(|_| {})
    }

    /// Runs the whole fetch: destination first, then the provider, then the
    /// filtered copy. `on_progress` sees each step as it happens.
    pub fn run_with<F>(&self, mut on_progress: F) -> Result<FetchReport, FetchError>
    where
        F: FnMut(Progress<'_>),
    {
        let destination = &self.config.destination;
        log::info!("Fetching {} into {:?}", self.config.dataset, destination);

        ensure_dir(destination)?;

        let source_dir = self
            .provider
            .dataset_download(&self.config.dataset)
            .with_context(|| {
                format!(
                    "{} download of {} failed",
                    self.provider.name(),
                    self.config.dataset
                )
            })?;
        on_progress(Progress::Downloaded {
            source: &source_dir,
        });

        on_progress(Progress::Copying { destination });
        let copied = copy_matching(&source_dir, destination, &self.config.suffix, |name| {
            on_progress(Progress::Copied { name })
        })?;

        let available = list_matching(destination, &self.config.suffix)?;
        log::info!(
            "Copied {} files, {} available in {:?}",
            copied.len(),
            available.len(),
            destination
        );

        Ok(FetchReport {
            source_dir,
            destination: destination.clone(),
            copied,
            available,
        })
    }
}

/// Creates `path` (and parents) unless it already exists.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).with_context(|| format!("Failed to create directory {:?}", path))
}

/// Copies every regular file in `source` whose name ends with `suffix` into
/// `destination`, overwriting existing files. Permissions and modification
/// time are carried over. Returns the copied names in listing order.
pub fn copy_matching<F>(
    source: &Path,
    destination: &Path,
    suffix: &str,
    mut on_copied: F,
) -> Result<Vec<String>>
where
    F: FnMut(&str),
{
    let entries =
        fs::read_dir(source).with_context(|| format!("Failed to list {:?}", source))?;

    let mut copied = Vec::new();
    for entry in entries {
        let entry = entry?;
        let Some(name) = matching_name(&entry, suffix)? else {
            continue;
        };

        let src = entry.path();
        let dst = destination.join(&name);
        copy_preserving(&src, &dst)?;
        log::info!("Copied {:?} -> {:?}", src, dst);

        on_copied(&name);
        copied.push(name);
    }

    Ok(copied)
}

/// Sorted names of the regular files in `dir` that end with `suffix`.
pub fn list_matching(dir: &Path, suffix: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to list {:?}", dir))? {
        if let Some(name) = matching_name(&entry?, suffix)? {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn matching_name(entry: &fs::DirEntry, suffix: &str) -> Result<Option<String>> {
    let Ok(name) = entry.file_name().into_string() else {
        log::warn!("Skipping non UTF-8 file name {:?}", entry.file_name());
        return Ok(None);
    };

    if !name.ends_with(suffix) {
        return Ok(None);
    }

    // Follows symlinks so a linked data file still counts.
    if !entry.path().is_file() {
        log::warn!("Skipping {:?}: not a regular file", entry.path());
        return Ok(None);
    }

    Ok(Some(name))
}

fn copy_preserving(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst).with_context(|| format!("Failed to copy {:?} to {:?}", src, dst))?;

    let modified = fs::metadata(src)
        .and_then(|m| m.modified())
        .with_context(|| format!("Failed to read modification time of {:?}", src))?;
    // Read-only sources produce read-only copies; the owner can still set times.
    fs::File::options()
        .write(true)
        .open(dst)
        .or_else(|_| fs::File::open(dst))
        .and_then(|f| f.set_modified(modified))
        .with_context(|| format!("Failed to set modification time of {:?}", dst))?;

    Ok(())
}
