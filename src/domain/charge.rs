use super::amount::Amount;
use super::payload::Payload;
use serde::{Deserialize, Serialize};

/// A request to charge a payer.
///
/// The description travels alongside the payment code for display and logging;
/// it is never encoded into the payload.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ChargeRequest {
    pub amount: Amount,
    #[serde(default)]
    pub description: String,
}

impl ChargeRequest {
    pub fn new(amount: Amount, description: impl Into<String>) -> Self {
        Self {
            amount,
            description: description.into(),
        }
    }
}

/// A charge that has been issued: the request plus its payment code.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct Charge {
    pub description: String,
    pub amount: Amount,
    #[serde(serialize_with = "serialize_payload")]
    pub payload: Payload,
}

fn serialize_payload<S>(payload: &Payload, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(payload.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_charge_request_deserialization() {
        let csv = "amount, description\n7.99, VIP access";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());
        let mut iter = reader.deserialize();

        let result: ChargeRequest = iter
            .next()
            .unwrap()
            .expect("Failed to deserialize charge request");

        assert_eq!(result.amount.value(), dec!(7.99));
        assert_eq!(result.description, "VIP access");
    }

    #[test]
    fn test_charge_request_rejects_negative_amount() {
        let csv = "amount, description\n-7.99, refund";
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(csv.as_bytes());

        let result: Option<Result<ChargeRequest, csv::Error>> = reader.deserialize().next();
        assert!(result.unwrap().is_err());
    }
}
