//! Console wording for each outcome of a fetch.

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::fetcher::{FetchReport, Progress};

pub fn banner() -> String {
    "Downloading F1 World Championship dataset from Kaggle...\nThis may take a few minutes..."
        .to_string()
}

pub fn progress_line(progress: &Progress<'_>) -> String {
    match progress {
        Progress::Downloaded { source } => format!("\nDataset downloaded to: {}", source.display()),
        Progress::Copying { destination } => {
            format!("\nCopying files to: {}", destination.display())
        }
        Progress::Copied { name } => format!("  Copied: {}", name),
    }
}

pub fn success_message(report: &FetchReport) -> String {
    let mut out = String::from("\n✅ Dataset ready! You can now run the dashboard.\n\nFiles available:");
    for name in &report.available {
        out.push_str("\n  - ");
        out.push_str(name);
    }
    out
}

pub fn failure_message(err: &FetchError, config: &FetchConfig) -> String {
    match err {
        FetchError::ProviderUnavailable { hint, .. } => {
            format!("❌ {}.\n{}\n\nPlease run this program again.", err, hint)
        }
        FetchError::Failed(cause) => format!(
            "❌ Error downloading dataset: {:#}\n\nAlternative: Download manually from:\n{}\n\nThen extract {} files to: {}",
            cause,
            config.fallback_url,
            data_kind(&config.suffix),
            config.destination.display()
        ),
    }
}

fn data_kind(suffix: &str) -> String {
    suffix.trim_start_matches('.').to_uppercase()
}
