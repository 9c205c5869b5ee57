// FICHIER : provisioner/src/provision/pacing.rs

use crate::utils::{sleep, Duration};

/// Pauses fixes entre deux appels distants (courtoisie envers l'API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    pub attribute_delay: Duration,
    pub collection_delay: Duration,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self {
            attribute_delay: Duration::from_millis(1000),
            collection_delay: Duration::from_millis(2000),
        }
    }
}

impl PacingPolicy {
    pub fn new(attribute_delay: Duration, collection_delay: Duration) -> Self {
        Self {
            attribute_delay,
            collection_delay,
        }
    }

    /// Aucune pause (tests, émulateurs locaux).
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub async fn after_attribute(&self) {
        pause(self.attribute_delay).await;
    }

    pub async fn after_collection(&self) {
        pause(self.collection_delay).await;
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        sleep(delay).await;
    }
}
