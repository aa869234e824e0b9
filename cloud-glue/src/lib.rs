//! # Cloud Glue
//!
//! Small helpers shared by functions running on Google Cloud.
//!
//! [`CloudGlue`] bundles the clients such a function typically touches:
//! decrypt a base64 encoded secret through Cloud KMS, drop a file into a
//! Cloud Storage bucket, and hand work to another function by publishing on
//! a Pub/Sub topic. Each helper is a thin forwarding call, so code that
//! needs a single service can depend on the matching capability crate
//! directly instead.
//!
//! ## Features
//!
//! - Clients injected as trait objects, so tests can swap in fakes
//! - One-call connection of the real clients via [`CloudGlue::connect`]
//! - Deployment introspection for function code in [`runtime`]

mod error;
pub mod runtime;

use std::sync::Arc;

use base64::{prelude::BASE64_STANDARD, Engine as _};
use serde::Serialize;
use snafu::ResultExt;

pub use error::{Error, Result};
pub use glue_kms::{CryptoKeyPath, KeyManagementServiceClient};
pub use glue_pubsub::{PublisherClient, TopicName};
pub use glue_storage::ObjectStorageClient;
pub use runtime::{function_name, is_test, FunctionContext};

/// Google Cloud clients wired together for a function invocation.
#[derive(Clone)]
pub struct CloudGlue {
    kms: Arc<dyn KeyManagementServiceClient>,
    storage: Arc<dyn ObjectStorageClient>,
    publisher: Arc<dyn PublisherClient>,
}

impl CloudGlue {
    /// Bundles the provided clients.
    #[must_use]
    pub fn new(
        kms: Arc<dyn KeyManagementServiceClient>,
        storage: Arc<dyn ObjectStorageClient>,
        publisher: Arc<dyn PublisherClient>,
    ) -> Self {
        Self { kms, storage, publisher }
    }

    /// Connects the real Google Cloud clients with ambient credentials.
    ///
    /// # Errors
    ///
    /// Fails when credentials cannot be discovered for one of the services.
    pub async fn connect() -> Result<Self> {
        tracing::info!("Connecting Google Cloud clients");

        let kms =
            glue_kms::gcp::Client::new().await.context(error::InitializeKeyManagementSnafu)?;
        let storage =
            glue_storage::gcp::Client::new().await.context(error::InitializeStorageSnafu)?;
        let publisher =
            glue_pubsub::gcp::Client::new().await.context(error::InitializePublisherSnafu)?;

        Ok(Self::new(Arc::new(kms), Arc::new(storage), Arc::new(publisher)))
    }

    /// Decrypts a base64 encoded ciphertext with the addressed crypto key
    /// and returns the plaintext bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeCiphertext`] when `ciphertext` is not valid
    /// base64; the key management service is not contacted in that case.
    /// Service failures are returned as [`Error::Decrypt`].
    pub async fn decrypt_key(&self, key: &CryptoKeyPath, ciphertext: &str) -> Result<Vec<u8>> {
        let ciphertext =
            BASE64_STANDARD.decode(ciphertext).context(error::DecodeCiphertextSnafu)?;

        self.kms
            .decrypt(key, &ciphertext)
            .await
            .with_context(|_| error::DecryptSnafu { key: key.resource_name() })
    }

    /// Stores `content` as the object `name` inside `bucket`, overwriting
    /// any existing object with that name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Upload`] when the bucket does not exist or the
    /// service rejects the request.
    pub async fn upload_object(&self, bucket: &str, name: &str, content: &str) -> Result<()> {
        self.storage
            .upload(bucket, name, content.as_bytes())
            .await
            .with_context(|_| error::UploadSnafu { bucket, name })
    }

    /// Serializes `payload` to JSON and publishes it on the topic, typically
    /// to trigger the function subscribed to it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializePayload`] when `payload` cannot be
    /// serialized; nothing is published in that case. Service failures are
    /// returned as [`Error::Publish`].
    pub async fn publish_json<T>(&self, payload: &T, topic: &TopicName) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_vec(payload).context(error::SerializePayloadSnafu)?;

        self.publisher
            .publish(topic, &data)
            .await
            .with_context(|_| error::PublishSnafu { topic: topic.resource_name() })
    }
}
