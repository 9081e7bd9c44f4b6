use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub key: String,
}

pub fn download_file(
    client: &Client,
    url: &str,
    auth: Option<&BasicAuth>,
    output_path: &Path,
) -> Result<u64> {
    log::info!("Downloading from {} to {:?}", url, output_path);

    let mut request = client.get(url);
    if let Some(auth) = auth {
        log::info!("Authenticating as {}", auth.username);
        request = request.basic_auth(&auth.username, Some(&auth.key));
    }

    let mut response = request.send().context("Failed to download file")?;

    if !response.status().is_success() {
        anyhow::bail!("Download failed with status: {}", response.status());
    }

    let mut file = fs::File::create(output_path).context("Failed to create output file")?;

    let written = response
        .copy_to(&mut file)
        .context("Failed to write downloaded data")?;

    log::info!("Download completed: {} bytes", written);
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn writes_body_to_file() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/blob");
            then.status(200).body("hello");
        });

        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("blob.bin");
        let written = download_file(&Client::new(), &server.url("/blob"), None, &out).unwrap();

        mock.assert();
        assert_eq!(written, 5);
        assert_eq!(fs::read_to_string(&out).unwrap(), "hello");
    }

    #[test]
    fn sends_basic_auth_when_given() {
        let server = MockServer::start();
        // "jane:s3cret"
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/blob")
                .header("authorization", "Basic amFuZTpzM2NyZXQ=");
            then.status(200).body("ok");
        });

        let dir = tempfile::tempdir().unwrap();
        let auth = BasicAuth {
            username: "jane".to_string(),
            key: "s3cret".to_string(),
        };
        download_file(
            &Client::new(),
            &server.url("/blob"),
            Some(&auth),
            &dir.path().join("blob.bin"),
        )
        .unwrap();

        mock.assert();
    }

    #[test]
    fn non_success_status_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing");
            then.status(404);
        });

        let dir = tempfile::tempdir().unwrap();
        let err = download_file(
            &Client::new(),
            &server.url("/missing"),
            None,
            &dir.path().join("missing.bin"),
        )
        .unwrap_err();

        assert!(err.to_string().contains("404"));
    }
}
