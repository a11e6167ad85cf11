use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use seek_logging::{body_preview, seek_debug, seek_info, seek_warn};
use url::Url;

use crate::{ClientError, SearchResponse, StatusReport, UploadReceipt};

pub const STATUS_PATH: &str = "api/status";
pub const UPLOAD_PATH: &str = "api/upload";
pub const SEARCH_PATH: &str = "api/search";
/// Multipart field carrying the uploaded file.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait SearchService: Send + Sync {
    /// `GET /api/status`.
    async fn status(&self) -> Result<StatusReport, ClientError>;

    /// `POST /api/upload` with the file at `path` as the single multipart part.
    async fn upload(&self, file_name: &str, path: &Path) -> Result<UploadReceipt, ClientError>;

    /// `GET /api/search?q=...`.
    async fn search(&self, query: &str) -> Result<SearchResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSearchService {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestSearchService {
    pub fn new(settings: ServiceSettings) -> Result<Self, ClientError> {
        let base = parse_base(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(ClientError::from_reqwest)?;
        Ok(Self { client, base })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path)
            .map_err(|err| ClientError::InvalidBaseUrl {
                url: self.base.to_string(),
                message: err.to_string(),
            })
    }
}

/// Parses the service root; a missing trailing slash is added so that
/// endpoint paths resolve below any path prefix.
fn parse_base(raw: &str) -> Result<Url, ClientError> {
    let invalid = |message: String| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        message,
    };
    let mut base = Url::parse(raw.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme {}", base.scheme())));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

#[async_trait::async_trait]
impl SearchService for ReqwestSearchService {
    async fn status(&self) -> Result<StatusReport, ClientError> {
        let url = self.endpoint(STATUS_PATH)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::StatusRejected {
                status: status.as_u16(),
            });
        }
        let body = response.text().await.map_err(ClientError::from_reqwest)?;
        let report: StatusReport =
            serde_json::from_str(&body).map_err(|err| ClientError::Decode(err.to_string()))?;
        seek_debug!(
            "Status: documents={} status={:?} version={:?}",
            report.document_count(),
            report.status,
            report.version
        );
        Ok(report)
    }

    async fn upload(&self, file_name: &str, path: &Path) -> Result<UploadReceipt, ClientError> {
        let url = self.endpoint(UPLOAD_PATH)?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|err| ClientError::ReadFile {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;

        seek_info!("Sending upload request for: {} ({} bytes)", file_name, bytes.len());
        let form = Form::new().part(UPLOAD_FIELD, Part::bytes(bytes).file_name(file_name.to_string()));
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(ClientError::from_reqwest)?;
        seek_info!(
            "Upload response status: {} body: {}",
            status.as_u16(),
            body_preview(&body)
        );

        if !status.is_success() {
            return Err(ClientError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(UploadReceipt {
            status: status.as_u16(),
            body,
        })
    }

    async fn search(&self, query: &str) -> Result<SearchResponse, ClientError> {
        let mut url = self.endpoint(SEARCH_PATH)?;
        url.query_pairs_mut().append_pair("q", query);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            seek_warn!("Search for {:?} rejected with HTTP {}", query, status.as_u16());
            return Err(ClientError::SearchRejected {
                status: status.as_u16(),
            });
        }
        let body = response.text().await.map_err(ClientError::from_reqwest)?;
        serde_json::from_str(&body).map_err(|err| ClientError::Decode(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_gets_trailing_slash() {
        let base = parse_base("http://host:9000/seek").unwrap();
        assert_eq!(base.join(STATUS_PATH).unwrap().as_str(), "http://host:9000/seek/api/status");
    }

    #[test]
    fn rejects_non_http_base() {
        assert!(matches!(
            parse_base("ftp://host/"),
            Err(ClientError::InvalidBaseUrl { .. })
        ));
        assert!(parse_base("not a url").is_err());
    }
}
