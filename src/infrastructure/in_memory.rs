use crate::domain::charge::Charge;
use crate::domain::ports::ChargeSink;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory sink for issued charges.
///
/// Uses `Arc<RwLock<Vec<Charge>>>` so clones share the same record; keep one
/// clone to read back what was delivered through the other.
#[derive(Default, Clone)]
pub struct InMemoryChargeSink {
    charges: Arc<RwLock<Vec<Charge>>>,
}

impl InMemoryChargeSink {
    /// Creates a new, empty in-memory charge sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the delivered charges in delivery order.
    pub async fn charges(&self) -> Vec<Charge> {
        self.charges.read().await.clone()
    }
}

#[async_trait]
impl ChargeSink for InMemoryChargeSink {
    async fn deliver(&self, charge: &Charge) -> Result<()> {
        let mut charges = self.charges.write().await;
        charges.push(charge.clone());
        Ok(())
    }
}
