//! Behavior of the facade helpers, exercised against recording fakes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cloud_glue::{
    CloudGlue, CryptoKeyPath, Error, KeyManagementServiceClient, ObjectStorageClient,
    PublisherClient, TopicName,
};
use serde::Serialize;

#[derive(Default)]
struct FakeKms {
    plaintext: Vec<u8>,
    requests: Mutex<Vec<(CryptoKeyPath, Vec<u8>)>>,
    fail: bool,
}

#[async_trait]
impl KeyManagementServiceClient for FakeKms {
    async fn decrypt(&self, key: &CryptoKeyPath, ciphertext: &[u8]) -> glue_kms::Result<Vec<u8>> {
        if self.fail {
            return Err(glue_kms::Error::AcquireToken {
                location: snafu::location!(),
                source: "token backend unavailable".into(),
            });
        }

        self.requests.lock().unwrap().push((key.clone(), ciphertext.to_vec()));
        Ok(self.plaintext.clone())
    }
}

#[derive(Default)]
struct FakeStorage {
    uploads: Mutex<Vec<(String, String, Vec<u8>)>>,
    missing_bucket: Option<String>,
}

#[async_trait]
impl ObjectStorageClient for FakeStorage {
    async fn upload(&self, bucket: &str, name: &str, content: &[u8]) -> glue_storage::Result<()> {
        if self.missing_bucket.as_deref() == Some(bucket) {
            return Err(glue_storage::Error::BucketNotFound {
                location: snafu::location!(),
                bucket: bucket.to_string(),
            });
        }

        self.uploads.lock().unwrap().push((
            bucket.to_string(),
            name.to_string(),
            content.to_vec(),
        ));
        Ok(())
    }
}

#[derive(Default)]
struct FakePublisher {
    published: Mutex<Vec<(TopicName, Vec<u8>)>>,
    fail: bool,
}

#[async_trait]
impl PublisherClient for FakePublisher {
    async fn publish(&self, topic: &TopicName, data: &[u8]) -> glue_pubsub::Result<()> {
        if self.fail {
            return Err(glue_pubsub::Error::AcquireToken {
                location: snafu::location!(),
                source: "token backend unavailable".into(),
            });
        }

        self.published.lock().unwrap().push((topic.clone(), data.to_vec()));
        Ok(())
    }
}

struct Harness {
    glue: CloudGlue,
    kms: Arc<FakeKms>,
    storage: Arc<FakeStorage>,
    publisher: Arc<FakePublisher>,
}

impl Harness {
    fn new() -> Self {
        Self::with_fakes(FakeKms::default(), FakeStorage::default(), FakePublisher::default())
    }

    fn with_fakes(kms: FakeKms, storage: FakeStorage, publisher: FakePublisher) -> Self {
        let kms = Arc::new(kms);
        let storage = Arc::new(storage);
        let publisher = Arc::new(publisher);
        let glue = CloudGlue::new(kms.clone(), storage.clone(), publisher.clone());

        Self { glue, kms, storage, publisher }
    }
}

fn signing_key() -> CryptoKeyPath {
    CryptoKeyPath::new("my-project", "global", "signing", "primary")
}

#[derive(Serialize)]
struct ReportRequest {
    action: String,
    day: String,
}

struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(serde::ser::Error::custom("cannot be serialized"))
    }
}

#[tokio::test]
async fn test_decrypt_key_returns_plaintext_unchanged() {
    let harness = Harness::with_fakes(
        FakeKms { plaintext: b"secret value".to_vec(), ..FakeKms::default() },
        FakeStorage::default(),
        FakePublisher::default(),
    );

    // "aGVsbG8=" is the base64 encoding of "hello".
    let plaintext = harness.glue.decrypt_key(&signing_key(), "aGVsbG8=").await.unwrap();

    assert_eq!(plaintext, b"secret value");

    let requests = harness.kms.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0, signing_key());
    assert_eq!(requests[0].1, b"hello");
}

#[tokio::test]
async fn test_decrypt_key_rejects_malformed_base64_before_calling_the_service() {
    let harness = Harness::new();

    let error = harness.glue.decrypt_key(&signing_key(), "not base64!").await.unwrap_err();

    assert!(matches!(error, Error::DecodeCiphertext { .. }));
    assert!(harness.kms.requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_decrypt_key_propagates_service_errors() {
    let harness = Harness::with_fakes(
        FakeKms { fail: true, ..FakeKms::default() },
        FakeStorage::default(),
        FakePublisher::default(),
    );

    let error = harness.glue.decrypt_key(&signing_key(), "aGVsbG8=").await.unwrap_err();

    assert!(matches!(error, Error::Decrypt { .. }));

    // The capability error stays reachable and intact through the chain.
    let source = std::error::Error::source(&error).expect("should carry the service error");
    assert!(source.to_string().contains("token backend unavailable"));
}

#[tokio::test]
async fn test_upload_object_uploads_exactly_once_with_the_given_arguments() {
    let harness = Harness::new();

    harness.glue.upload_object("reports", "daily.txt", "all good").await.unwrap();

    let uploads = harness.storage.uploads.lock().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, "reports");
    assert_eq!(uploads[0].1, "daily.txt");
    assert_eq!(uploads[0].2, b"all good");
}

#[tokio::test]
async fn test_upload_object_reports_a_missing_bucket() {
    let harness = Harness::with_fakes(
        FakeKms::default(),
        FakeStorage { missing_bucket: Some("reports".to_string()), ..FakeStorage::default() },
        FakePublisher::default(),
    );

    let error = harness.glue.upload_object("reports", "daily.txt", "all good").await.unwrap_err();

    assert!(matches!(
        error,
        Error::Upload { source: glue_storage::Error::BucketNotFound { .. }, .. }
    ));
    assert!(error.to_string().contains("reports"));
    assert!(harness.storage.uploads.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_publish_json_serializes_the_payload_for_the_topic() {
    let harness = Harness::new();
    let topic = TopicName::new("my-project", "daily-report");
    let payload = ReportRequest { action: "generate".to_string(), day: "2024-01-15".to_string() };

    harness.glue.publish_json(&payload, &topic).await.unwrap();

    let published = harness.publisher.published.lock().unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, topic);

    let data: serde_json::Value = serde_json::from_slice(&published[0].1).unwrap();
    assert_eq!(data, serde_json::json!({ "action": "generate", "day": "2024-01-15" }));
}

#[tokio::test]
async fn test_publish_json_rejects_unserializable_payloads_without_publishing() {
    let harness = Harness::new();
    let topic = TopicName::new("my-project", "daily-report");

    let error = harness.glue.publish_json(&Unserializable, &topic).await.unwrap_err();

    assert!(matches!(error, Error::SerializePayload { .. }));
    assert!(harness.publisher.published.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_publish_json_propagates_service_errors() {
    let harness = Harness::with_fakes(
        FakeKms::default(),
        FakeStorage::default(),
        FakePublisher { fail: true, ..FakePublisher::default() },
    );
    let topic = TopicName::new("my-project", "daily-report");

    let error = harness
        .glue
        .publish_json(&ReportRequest { action: "generate".to_string(), day: String::new() }, &topic)
        .await
        .unwrap_err();

    assert!(matches!(error, Error::Publish { .. }));
}

#[tokio::test]
async fn test_operations_are_independent_of_each_other() {
    let harness = Harness::new();
    let topic = TopicName::new("my-project", "daily-report");

    harness.glue.upload_object("reports", "daily.txt", "all good").await.unwrap();
    harness
        .glue
        .publish_json(&ReportRequest { action: "generate".to_string(), day: String::new() }, &topic)
        .await
        .unwrap();

    assert_eq!(harness.storage.uploads.lock().unwrap().len(), 1);
    assert_eq!(harness.publisher.published.lock().unwrap().len(), 1);
    assert!(harness.kms.requests.lock().unwrap().is_empty());
}
