//! Resource fetchers.
//!
//! The embedder only needs status, content type, and body per resource, so
//! the fetcher trait stays small and runtime-agnostic. Two backends ship: an
//! HTTP client behind the `http` feature and a filesystem base for offline
//! embedding and tests.

use clinimap_core::resource::FetchedResource;
use std::path::{Path, PathBuf};

pub type FetchResult = std::result::Result<FetchedResource, FetchError>;

/// Transport-level failures. The pipeline treats these the same as a non-2xx
/// status: log, and leave the section empty.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid resource location `{location}`: {message}")]
    Location { location: String, message: String },

    #[error("transport failure for `{path}`: {message}")]
    Transport { path: String, message: String },
}

/// Fetches one resource by its path relative to the fetcher's base.
pub trait ResourceFetcher {
    fn fetch(&self, path: &str) -> impl Future<Output = FetchResult>;
}

/// Serves resources from a local directory, with content types inferred from
/// file extensions. A missing file surfaces as a 404 outcome, matching the
/// HTTP backend, so validation treats both backends alike.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    base: PathBuf,
}

impl DirFetcher {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

fn content_type_for(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let content_type = match ext.as_str() {
        "svg" => "image/svg+xml",
        "xml" => "application/xml",
        "json" => "application/json",
        "html" | "htm" => "text/html",
        _ => return None,
    };
    Some(content_type.to_string())
}

impl ResourceFetcher for DirFetcher {
    async fn fetch(&self, path: &str) -> FetchResult {
        let full = self.base.join(path);
        match std::fs::read(&full) {
            Ok(body) => Ok(FetchedResource {
                status: 200,
                content_type: content_type_for(&full),
                body,
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(FetchedResource {
                status: 404,
                content_type: None,
                body: Vec::new(),
            }),
            Err(err) => Err(FetchError::Transport {
                path: path.to_string(),
                message: err.to_string(),
            }),
        }
    }
}

/// Fetches resources over HTTP(S), relative to a base URL.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base: url::Url,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    /// The base is normalized to end with `/` so resource paths resolve under
    /// it rather than replacing its last segment.
    pub fn new(mut base: url::Url) -> Self {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Self {
            base,
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[cfg(feature = "http")]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> FetchResult {
        let url = self.base.join(path).map_err(|err| FetchError::Location {
            location: format!("{}{path}", self.base),
            message: err.to_string(),
        })?;

        let transport = |err: reqwest::Error| FetchError::Transport {
            path: path.to_string(),
            message: err.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(transport)?.to_vec();

        Ok(FetchedResource {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn dir_fetcher_serves_files_with_inferred_content_types() {
        let tmp = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir_all(tmp.path().join("img")).expect("img dir");
        std::fs::write(tmp.path().join("img/title.svg"), "<svg/>").expect("write svg");

        let fetcher = DirFetcher::new(tmp.path());
        let fetched = block_on(fetcher.fetch("img/title.svg")).expect("fetch");
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.content_type.as_deref(), Some("image/svg+xml"));
        assert_eq!(fetched.body, b"<svg/>");
    }

    #[test]
    fn dir_fetcher_reports_missing_files_as_404() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let fetcher = DirFetcher::new(tmp.path());
        let fetched = block_on(fetcher.fetch("json/clinic_a.json")).expect("fetch");
        assert_eq!(fetched.status, 404);
        assert!(fetched.body.is_empty());
    }

    #[cfg(feature = "http")]
    #[test]
    fn http_fetcher_normalizes_the_base_to_a_directory() {
        let fetcher = HttpFetcher::new(url::Url::parse("https://cdn.example.com/widget").unwrap());
        let joined = fetcher.base.join("img/title.svg").unwrap();
        assert_eq!(joined.as_str(), "https://cdn.example.com/widget/img/title.svg");
    }
}
