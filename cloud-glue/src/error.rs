use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to decode ciphertext as base64, error: {source}"))]
    DecodeCiphertext { source: base64::DecodeError },

    #[snafu(display("Failed to serialize payload to JSON, error: {source}"))]
    SerializePayload { source: serde_json::Error },

    #[snafu(display("Failed to initialize Key Management Service client, error: {source}"))]
    InitializeKeyManagement { source: glue_kms::Error },

    #[snafu(display("Failed to initialize object storage client, error: {source}"))]
    InitializeStorage { source: glue_storage::Error },

    #[snafu(display("Failed to initialize publisher client, error: {source}"))]
    InitializePublisher { source: glue_pubsub::Error },

    #[snafu(display("Failed to decrypt ciphertext with key {key}, error: {source}"))]
    Decrypt { key: String, source: glue_kms::Error },

    #[snafu(display("Failed to upload object `{name}` to bucket `{bucket}`, error: {source}"))]
    Upload { bucket: String, name: String, source: glue_storage::Error },

    #[snafu(display("Failed to publish message on topic {topic}, error: {source}"))]
    Publish { topic: String, source: glue_pubsub::Error },
}
