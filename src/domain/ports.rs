use super::charge::Charge;
use crate::error::Result;
use async_trait::async_trait;

/// Receives issued charges and delivers them to the payer.
///
/// This is the seam to the messaging layer: an implementation may post the
/// payment code as text, render it as a scannable image, or just record it.
#[async_trait]
pub trait ChargeSink: Send + Sync {
    async fn deliver(&self, charge: &Charge) -> Result<()>;
}

pub type ChargeSinkBox = Box<dyn ChargeSink>;
