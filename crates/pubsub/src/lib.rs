//! Cloud Pub/Sub capability.
//!
//! [`PublisherClient`] is the seam application code programs against;
//! [`gcp::Client`] is the implementation that talks to the real service.

mod error;
pub mod gcp;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use error::{Error, Result};

/// Coordinates of a Pub/Sub topic.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TopicName {
    pub project_id: String,
    pub topic: String,
}

impl TopicName {
    #[must_use]
    pub fn new(project_id: impl Into<String>, topic: impl Into<String>) -> Self {
        Self { project_id: project_id.into(), topic: topic.into() }
    }

    /// Resource name the REST API addresses the topic by.
    #[must_use]
    pub fn resource_name(&self) -> String {
        format!("projects/{}/topics/{}", self.project_id, self.topic)
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.resource_name())
    }
}

#[async_trait]
pub trait PublisherClient: Send + Sync {
    /// Publishes `data` as a single message on the topic.
    ///
    /// # Errors
    ///
    /// Returns an error when the service rejects the request or the response
    /// cannot be interpreted.
    async fn publish(&self, topic: &TopicName, data: &[u8]) -> Result<()>;
}
