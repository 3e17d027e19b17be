// src/services/loader.rs

//! CSV loading from files and HTTP endpoints.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::SourceConfig;
use crate::utils::http;

/// Raw outcome of a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Anything that can hand back the text stored at a location.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<FetchResponse>;
}

/// Fetches over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Ok(Self::new(http::create_client(config)?))
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn fetch(&self, location: &str) -> Result<FetchResponse> {
        let response = self.client.get(location).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(FetchResponse { status, body })
    }
}

/// Reads from the local filesystem.
///
/// A missing file answers 404 and an unreadable one 403, so callers see the
/// same failure surface as with HTTP.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl FileSource {
    fn path(location: &str) -> Result<PathBuf> {
        if location.starts_with("file://") {
            return Url::parse(location)?
                .to_file_path()
                .map_err(|_| AppError::config(format!("Not a local file URL: {location}")));
        }
        Ok(PathBuf::from(location))
    }
}

#[async_trait]
impl DataSource for FileSource {
    async fn fetch(&self, location: &str) -> Result<FetchResponse> {
        let path = Self::path(location)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(FetchResponse {
                status: 404,
                body: String::new(),
            }),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => Ok(FetchResponse {
                status: 403,
                body: String::new(),
            }),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

/// Picks HTTP or file access from the location itself.
#[derive(Debug, Clone)]
pub struct AnySource {
    http: HttpSource,
    file: FileSource,
}

impl AnySource {
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            http: HttpSource::from_config(config)?,
            file: FileSource,
        })
    }
}

#[async_trait]
impl DataSource for AnySource {
    async fn fetch(&self, location: &str) -> Result<FetchResponse> {
        if is_remote(location) {
            self.http.fetch(location).await
        } else {
            self.file.fetch(location).await
        }
    }
}

/// Whether a location needs the network.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Fetch the CSV text, failing on any status other than 200.
pub async fn load_csv(source: &dyn DataSource, location: &str) -> Result<String> {
    log::info!("Fetching members from {}", location);

    let response = source.fetch(location).await?;
    if !response.is_success() {
        log::error!(
            "Request failed.  Returned status of {} ({})",
            response.status,
            location
        );
        return Err(AppError::fetch(response.status, location));
    }

    log::debug!("Fetched {} bytes from {}", response.body.len(), location);
    Ok(response.body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response and return the URL to hit.
    async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/Members.csv")
    }

    #[test]
    fn test_is_remote() {
        assert!(is_remote("https://example.org/Members.csv"));
        assert!(is_remote("http://localhost/Members.csv"));
        assert!(!is_remote("./Members.csv"));
        assert!(!is_remote("file:///tmp/Members.csv"));
    }

    #[tokio::test]
    async fn test_file_source_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Members.csv");
        std::fs::write(&path, "header\nrow\n").unwrap();

        let body = load_csv(&FileSource, path.to_str().unwrap()).await.unwrap();
        assert_eq!(body, "header\nrow\n");
    }

    #[tokio::test]
    async fn test_file_source_accepts_file_url() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Members.csv");
        std::fs::write(&path, "header\n").unwrap();

        let url = Url::from_file_path(&path).unwrap();
        let response = FileSource.fetch(url.as_str()).await.unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope.csv");

        let err = load_csv(&FileSource, path.to_str().unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.fetch_status(), Some(404));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_file_is_403() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("Members.csv");
        std::fs::write(&path, "header\nrow\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes.
        if std::fs::read(&path).is_ok() {
            return;
        }

        let err = load_csv(&FileSource, path.to_str().unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.fetch_status(), Some(403));
    }

    #[tokio::test]
    async fn test_http_source_ok() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Length: 11\r\nConnection: close\r\n\r\nheader\nrow\n",
        )
        .await;
        let source = AnySource::from_config(&SourceConfig::default()).unwrap();

        let body = load_csv(&source, &url).await.unwrap();
        assert_eq!(body, "header\nrow\n");
    }

    #[tokio::test]
    async fn test_http_source_failure_status() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let source = HttpSource::from_config(&SourceConfig::default()).unwrap();

        let err = load_csv(&source, &url).await.unwrap_err();
        assert_eq!(err.fetch_status(), Some(404));
        assert_eq!(err.to_string(), "Request failed.  Returned status of 404");
    }
}
