use crate::domain::charge::ChargeRequest;
use crate::error::{PixError, Result};
use std::io::Read;

/// Reads charge requests from a CSV source.
///
/// Expects an `amount, description` header. Whitespace is trimmed and a missing
/// description column is tolerated.
pub struct ChargeReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ChargeReader<R> {
    /// Creates a new `ChargeReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes charge requests.
    ///
    /// Rows shorter than the header are padded with empty fields first, so an
    /// amount-only row yields an empty description.
    pub fn charges(mut self) -> impl Iterator<Item = Result<ChargeRequest>> {
        // An unreadable header leaves this empty and every row then fails on `amount`.
        let headers = self.reader.headers().cloned().unwrap_or_default();
        self.reader.into_records().map(move |result| {
            let mut record = result?;
            while record.len() < headers.len() {
                record.push_field("");
            }
            record
                .deserialize::<ChargeRequest>(Some(&headers))
                .map_err(PixError::from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "amount, description\n7.99, VIP\n0.5, Tip\n10";
        let reader = ChargeReader::new(data.as_bytes());
        let results: Vec<Result<ChargeRequest>> = reader.charges().collect();

        assert_eq!(results.len(), 3);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.amount.value(), dec!(7.99));
        assert_eq!(first.description, "VIP");

        let last = results[2].as_ref().unwrap();
        assert_eq!(last.amount.to_payload_string(), "10.00");
        assert_eq!(last.description, "");
    }

    #[test]
    fn test_reader_amount_only_rows() {
        let data = "amount,description\n7.99\n1.50,\n";
        let reader = ChargeReader::new(data.as_bytes());
        let results: Vec<ChargeRequest> = reader.charges().map(|r| r.unwrap()).collect();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].amount.value(), dec!(7.99));
        assert_eq!(results[0].description, "");
        assert_eq!(results[1].description, "");
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "amount, description\nseven, VIP\n7.999, Too precise\n1.00, Fine";
        let reader = ChargeReader::new(data.as_bytes());
        let results: Vec<Result<ChargeRequest>> = reader.charges().collect();

        assert!(matches!(results[0], Err(PixError::Csv(_))));
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
