use crate::domain::amount::Amount;
use crate::domain::charge::{Charge, ChargeRequest};
use crate::domain::payload::PayloadBuilder;
use crate::domain::ports::ChargeSinkBox;
use crate::error::{PixError, Result};
use std::collections::BTreeMap;
use tracing::Instrument;

/// A fixed-price item sold through the bot.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub id: String,
    pub description: String,
    pub price: Amount,
}

impl Offer {
    pub fn new(id: impl Into<String>, description: impl Into<String>, price: Amount) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            price,
        }
    }
}

/// Offers available for purchase, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    offers: BTreeMap<String, Offer>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offer(mut self, offer: Offer) -> Self {
        self.offers.insert(offer.id.clone(), offer);
        self
    }

    pub fn get(&self, id: &str) -> Option<&Offer> {
        self.offers.get(id)
    }
}

/// Issues charges for a single merchant.
///
/// `CheckoutService` builds a payment code for every request and hands the
/// resulting charge to its sink. Payload construction is pure, so a failed
/// request leaves nothing behind and is never retried.
pub struct CheckoutService {
    builder: PayloadBuilder,
    sink: ChargeSinkBox,
}

impl CheckoutService {
    /// Creates a new `CheckoutService` instance.
    ///
    /// # Arguments
    ///
    /// * `builder` - Payload builder bound to the merchant configuration.
    /// * `sink` - Where issued charges are delivered.
    pub fn new(builder: PayloadBuilder, sink: ChargeSinkBox) -> Self {
        Self { builder, sink }
    }

    /// Builds the payment code for `request` and delivers the charge.
    pub async fn issue(&self, request: ChargeRequest) -> Result<Charge> {
        let payload = self.builder.build(request.amount)?;

        tracing::info!(
            description = %request.description,
            amount = %request.amount,
            checksum = payload.checksum(),
            "payment code issued"
        );

        let charge = Charge {
            description: request.description,
            amount: request.amount,
            payload,
        };
        self.sink.deliver(&charge).await?;
        Ok(charge)
    }

    /// Issues a charge for the catalog offer with the given id.
    pub async fn issue_offer(&self, catalog: &Catalog, offer_id: &str) -> Result<Charge> {
        let offer = catalog
            .get(offer_id)
            .ok_or_else(|| PixError::UnknownOffer(offer_id.to_string()))?;
        self.issue(ChargeRequest::new(offer.price, offer.description.clone()))
            .instrument(tracing::info_span!("offer", offer = %offer.id))
            .await
    }
}
