//! Cloud Key Management Service capability.
//!
//! Application code depends on the [`KeyManagementServiceClient`] trait and
//! receives an implementation from its composition root, so tests can swap
//! the real service for a fake.

mod error;
pub mod gcp;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::{Error, Result};

/// Coordinates of a crypto key inside Cloud KMS.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CryptoKeyPath {
    pub project_id: String,
    pub location: String,
    pub key_ring: String,
    pub crypto_key: String,
}

impl CryptoKeyPath {
    #[must_use]
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
        key_ring: impl Into<String>,
        crypto_key: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
            key_ring: key_ring.into(),
            crypto_key: crypto_key.into(),
        }
    }

    /// Resource name the REST API addresses the key by.
    #[must_use]
    pub fn resource_name(&self) -> String {
        format!(
            "projects/{}/locations/{}/keyRings/{}/cryptoKeys/{}",
            self.project_id, self.location, self.key_ring, self.crypto_key
        )
    }
}

impl fmt::Display for CryptoKeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_name())
    }
}

#[async_trait]
pub trait KeyManagementServiceClient: Send + Sync {
    /// Decrypts `ciphertext` with the addressed crypto key and returns the
    /// plaintext bytes.
    ///
    /// # Errors
    ///
    /// Returns an error when the service rejects the request or the response
    /// cannot be interpreted.
    async fn decrypt(&self, key: &CryptoKeyPath, ciphertext: &[u8]) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::CryptoKeyPath;

    #[test]
    fn test_resource_name() {
        let key = CryptoKeyPath::new("my-project", "global", "my-ring", "my-key");

        assert_eq!(
            key.resource_name(),
            "projects/my-project/locations/global/keyRings/my-ring/cryptoKeys/my-key"
        );
        assert_eq!(key.to_string(), key.resource_name());
    }

    #[test]
    fn test_serde_round_trip() {
        let key = CryptoKeyPath::new("my-project", "asia-east1", "signing", "primary");

        let json = serde_json::to_string(&key).expect("should serialize");
        let parsed: CryptoKeyPath = serde_json::from_str(&json).expect("should deserialize");

        assert_eq!(parsed, key);
    }
}
