use super::amount::Amount;
use super::crc::checksum;
use super::field::{TaggedField, decode_fields};
use super::merchant::{MAX_CITY_LEN, MAX_NAME_LEN, MerchantConfig};
use crate::error::{PixError, Result};
use serde::Serialize;
use std::fmt;

pub const TAG_FORMAT_INDICATOR: &str = "00";
pub const TAG_MERCHANT_ACCOUNT: &str = "26";
pub const TAG_CATEGORY_CODE: &str = "52";
pub const TAG_CURRENCY: &str = "53";
pub const TAG_AMOUNT: &str = "54";
pub const TAG_COUNTRY: &str = "58";
pub const TAG_MERCHANT_NAME: &str = "59";
pub const TAG_MERCHANT_CITY: &str = "60";
pub const TAG_ADDITIONAL_DATA: &str = "62";
pub const TAG_CRC: &str = "63";

/// Sub-fields of the merchant account information template.
pub const SUBTAG_GUI: &str = "00";
pub const SUBTAG_KEY: &str = "01";
/// Sub-field of the additional data template.
pub const SUBTAG_REFERENCE: &str = "05";

pub const FORMAT_VERSION: &str = "01";
pub const GUI: &str = "BR.GOV.BCB.PIX";
pub const CATEGORY_UNCLASSIFIED: &str = "0000";
/// ISO 4217 numeric code for BRL.
pub const CURRENCY_BRL: &str = "986";
pub const COUNTRY_BR: &str = "BR";
/// Reference used when the charge carries no transaction id.
pub const NO_REFERENCE: &str = "***";

/// The checksum field header; the value is always four hex digits.
const CRC_HEADER: &str = "6304";
const CRC_LEN: usize = 4;

/// Everything a payload is built from.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadRequest<'a> {
    pub amount: Amount,
    pub merchant_key: &'a str,
    pub merchant_name: &'a str,
    pub merchant_city: &'a str,
}

impl<'a> PayloadRequest<'a> {
    pub fn new(merchant: &'a MerchantConfig, amount: Amount) -> Self {
        Self {
            amount,
            merchant_key: merchant.key(),
            merchant_name: merchant.name(),
            merchant_city: merchant.city(),
        }
    }
}

/// A complete merchant payment code.
///
/// Immutable once built. `as_str` is the text handed to payers (and to any
/// scannable-code renderer); `fields` is the same text split into top-level fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Payload {
    text: String,
    fields: Vec<TaggedField>,
}

impl Payload {
    /// Validates and decodes a payload produced by any conforming issuer.
    pub fn parse(text: &str) -> Result<Self> {
        let split = text
            .len()
            .checked_sub(CRC_LEN)
            .filter(|&at| text.is_char_boundary(at))
            .ok_or_else(|| PixError::MalformedPayload("payload too short".to_string()))?;
        let (covered, found) = text.split_at(split);
        if !covered.ends_with(CRC_HEADER) {
            return Err(PixError::MalformedPayload(format!(
                "missing trailing {CRC_HEADER} checksum field"
            )));
        }

        let expected = checksum(covered);
        if found != expected {
            return Err(PixError::ChecksumMismatch {
                expected,
                found: found.to_string(),
            });
        }

        let fields = decode_fields(text)?;
        match fields.last() {
            Some(last) if last.tag() == TAG_CRC && last.value().len() == CRC_LEN => {}
            _ => {
                return Err(PixError::MalformedPayload(
                    "checksum field is not the last field".to_string(),
                ));
            }
        }

        Ok(Self {
            text: text.to_string(),
            fields,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn fields(&self) -> &[TaggedField] {
        &self.fields
    }

    /// First top-level field carrying `tag`.
    pub fn field(&self, tag: &str) -> Option<&TaggedField> {
        self.fields.iter().find(|field| field.tag() == tag)
    }

    /// The four hex digits closing the payload.
    pub fn checksum(&self) -> &str {
        &self.text[self.text.len() - CRC_LEN..]
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Wraps the account key in the merchant account information template.
///
/// The template holds the GUI sub-field plus the key sub-field and must itself fit
/// 99 bytes, which caps the key at 77 bytes.
pub fn merchant_account_field(key: &str) -> Result<TaggedField> {
    TaggedField::nested(
        TAG_MERCHANT_ACCOUNT,
        &[
            TaggedField::new(SUBTAG_GUI, GUI)?,
            TaggedField::new(SUBTAG_KEY, key)?,
        ],
    )
}

fn check_limit(tag: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(PixError::FieldTooLong {
            tag: tag.to_string(),
            len: value.len(),
        });
    }
    Ok(())
}

/// Builds a static payment payload.
///
/// Fields are emitted in the canonical order some readers still depend on:
/// `00, 26{00,01}, 52, 53, 54, 58, 59, 60, 62{05}, 63`. The checksum covers every
/// byte up to and including the `6304` header of the checksum field.
pub fn build_payload(req: &PayloadRequest<'_>) -> Result<Payload> {
    if req.merchant_key.is_empty() {
        return Err(PixError::EmptyMerchantKey);
    }
    check_limit(TAG_MERCHANT_NAME, req.merchant_name, MAX_NAME_LEN)?;
    check_limit(TAG_MERCHANT_CITY, req.merchant_city, MAX_CITY_LEN)?;

    let account = merchant_account_field(req.merchant_key)?;
    let additional = TaggedField::nested(
        TAG_ADDITIONAL_DATA,
        &[TaggedField::new(SUBTAG_REFERENCE, NO_REFERENCE)?],
    )?;

    let mut fields = vec![
        TaggedField::new(TAG_FORMAT_INDICATOR, FORMAT_VERSION)?,
        account,
        TaggedField::new(TAG_CATEGORY_CODE, CATEGORY_UNCLASSIFIED)?,
        TaggedField::new(TAG_CURRENCY, CURRENCY_BRL)?,
        TaggedField::new(TAG_AMOUNT, req.amount.to_payload_string())?,
        TaggedField::new(TAG_COUNTRY, COUNTRY_BR)?,
        TaggedField::new(TAG_MERCHANT_NAME, req.merchant_name)?,
        TaggedField::new(TAG_MERCHANT_CITY, req.merchant_city)?,
        additional,
    ];

    let mut text: String = fields.iter().map(TaggedField::encode).collect();
    text.push_str(CRC_HEADER);
    let crc = checksum(&text);
    text.push_str(&crc);
    fields.push(TaggedField::new(TAG_CRC, crc.clone())?);

    tracing::debug!(fields = fields.len(), checksum = %crc, "built payload");

    Ok(Payload { text, fields })
}

/// Builds payloads for one merchant.
///
/// Holds the immutable merchant configuration so callers only supply an amount.
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    merchant: MerchantConfig,
}

impl PayloadBuilder {
    pub fn new(merchant: MerchantConfig) -> Self {
        Self { merchant }
    }

    pub fn build(&self, amount: Amount) -> Result<Payload> {
        build_payload(&PayloadRequest::new(&self.merchant, amount))
    }
}
