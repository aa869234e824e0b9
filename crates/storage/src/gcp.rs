//! Cloud Storage client speaking the JSON REST API.

use std::sync::Arc;

use async_trait::async_trait;
use google_cloud_token::{TokenSource, TokenSourceProvider};
use snafu::ResultExt;

use crate::{
    error,
    error::{Error, Result},
    ObjectStorageClient,
};

const SCOPES: [&str; 1] = ["https://www.googleapis.com/auth/devstorage.read_write"];

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: http::Uri,
    token_source: Arc<dyn TokenSource>,
}

impl Client {
    /// Creates a new client with a default HTTP client.
    ///
    /// # Errors
    ///
    /// Fails when no Google Cloud credentials can be discovered in the
    /// environment.
    pub async fn new() -> Result<Self> {
        Self::with_http_client(reqwest::Client::new()).await
    }

    /// Creates a new client with the provided HTTP client.
    ///
    /// # Errors
    ///
    /// Fails when no Google Cloud credentials can be discovered in the
    /// environment.
    pub async fn with_http_client(http: reqwest::Client) -> Result<Self> {
        let token_source =
            google_cloud_auth::token::DefaultTokenSourceProvider::new(Self::auth_config())
                .await
                .context(error::InitializeTokenSourceSnafu)?
                .token_source();

        Ok(Self {
            http,
            endpoint: "https://storage.googleapis.com".parse().expect("valid uri"),
            token_source,
        })
    }

    async fn bearer_token(&self) -> Result<String> {
        let token = self.token_source.token().await.context(error::AcquireTokenSnafu)?;

        if token.starts_with("Bearer ") {
            Ok(token)
        } else {
            Ok(format!("Bearer {token}"))
        }
    }

    #[inline]
    fn auth_config() -> google_cloud_auth::project::Config<'static> {
        google_cloud_auth::project::Config::default().with_scopes(&SCOPES)
    }
}

#[async_trait]
impl ObjectStorageClient for Client {
    async fn upload(&self, bucket: &str, name: &str, content: &[u8]) -> Result<()> {
        let url = http::uri::Builder::from(self.endpoint.clone())
            .path_and_query(upload_path(bucket, name))
            .build()
            .expect("valid url")
            .to_string();

        let response = self
            .http
            .post(url)
            .header("Authorization", self.bearer_token().await?)
            .header("Content-Type", "text/plain")
            .body(content.to_vec())
            .send()
            .await
            .context(error::UnexpectedHttpResponseSnafu)?;

        let status_code = response.status();

        if status_code == reqwest::StatusCode::NOT_FOUND {
            return error::BucketNotFoundSnafu { bucket }.fail();
        }

        if status_code.is_client_error() {
            return Err(Error::ClientSide {
                status: status_code,
                location: snafu::location!(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        if status_code.is_server_error() {
            return Err(Error::ServerSide {
                status: status_code,
                location: snafu::location!(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        tracing::info!(bucket = %bucket, name = %name, size = content.len(), "Uploaded object");
        Ok(())
    }
}

/// Builds the media upload path, with the object name carried in the query
/// string so it may contain slashes.
fn upload_path(bucket: &str, name: &str) -> String {
    format!("/upload/storage/v1/b/{bucket}/o?uploadType=media&name={}", urlencoding::encode(name))
}

#[cfg(test)]
mod tests {
    use super::upload_path;

    #[test]
    fn test_upload_path() {
        assert_eq!(
            upload_path("reports", "daily.txt"),
            "/upload/storage/v1/b/reports/o?uploadType=media&name=daily.txt"
        );
    }

    #[test]
    fn test_upload_path_encodes_object_name() {
        assert_eq!(
            upload_path("reports", "2024/01 summary.txt"),
            "/upload/storage/v1/b/reports/o?uploadType=media&name=2024%2F01%20summary.txt"
        );
    }
}
