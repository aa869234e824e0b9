//! Cloud Storage capability, limited to the single-request object upload
//! serverless functions use for dropping small files into a bucket.

mod error;
pub mod gcp;

use async_trait::async_trait;

pub use error::{Error, Result};

#[async_trait]
pub trait ObjectStorageClient: Send + Sync {
    /// Stores `content` as the object `name` inside `bucket`, overwriting any
    /// existing object with that name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BucketNotFound`] when the bucket does not exist, and
    /// other errors when the service rejects the request.
    async fn upload(&self, bucket: &str, name: &str, content: &[u8]) -> Result<()>;
}
