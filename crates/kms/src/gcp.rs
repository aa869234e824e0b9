//! Cloud KMS client speaking the JSON REST API.

use std::sync::Arc;

use async_trait::async_trait;
use base64::{prelude::BASE64_STANDARD, Engine};
use google_cloud_token::{TokenSource, TokenSourceProvider};
use snafu::ResultExt;

use crate::{
    error,
    error::{Error, Result},
    CryptoKeyPath, KeyManagementServiceClient,
};

const SCOPES: [&str; 1] = ["https://www.googleapis.com/auth/cloudkms"];

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
            endpoint: "https://cloudkms.googleapis.com".parse().expect("valid uri"),
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

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let url = http::uri::Builder::from(self.endpoint.clone())
            .path_and_query(path)
            .build()
            .expect("valid url")
            .to_string();

        let response = self
            .http
            .post(url)
            .header("Authorization", self.bearer_token().await?)
            .json(body)
            .send()
            .await
            .context(error::UnexpectedHttpResponseSnafu)?;

        let status_code = response.status();

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

        let response = response.text().await.context(error::UnexpectedHttpResponseSnafu)?;
        serde_json::from_str(&response).context(error::DeserializeJsonResponseSnafu)
    }

    #[inline]
    fn auth_config() -> google_cloud_auth::project::Config<'static> {
        google_cloud_auth::project::Config::default().with_scopes(&SCOPES)
    }
}

#[async_trait]
impl KeyManagementServiceClient for Client {
    async fn decrypt(&self, key: &CryptoKeyPath, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let path = format!("/v1/{}:decrypt", key.resource_name());
        let body = serde_json::json!({
            "ciphertext": BASE64_STANDARD.encode(ciphertext),
        });

        let response = self.post_json(&path, &body).await?;

        let Some(plaintext) = response.get("plaintext").and_then(|value| value.as_str()) else {
            return Err(error::UnexpectedJsonResponseSnafu {
                operation: "cannot parse plaintext from decrypt response",
                response,
            }
            .build());
        };

        BASE64_STANDARD.decode(plaintext).context(error::DecodePlaintextSnafu)
    }
}
