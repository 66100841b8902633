use crate::error::{PixError, Result};
use serde::Serialize;

/// Largest value a two-digit length prefix can describe.
pub const MAX_VALUE_LEN: usize = 99;

/// A single tag-length-value field.
///
/// The value is stored raw; its length prefix is always derived from the value
/// bytes when encoding, so the two can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedField {
    tag: String,
    value: String,
}

impl TaggedField {
    /// Creates a field, rejecting a tag that is not two ASCII digits or a value
    /// longer than 99 bytes.
    pub fn new(tag: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let tag = tag.into();
        let value = value.into();
        validate_tag(&tag)?;
        if value.len() > MAX_VALUE_LEN {
            return Err(PixError::FieldTooLong {
                tag,
                len: value.len(),
            });
        }
        Ok(Self { tag, value })
    }

    /// Creates a template field whose value is the encoded concatenation of `children`.
    pub fn nested(tag: impl Into<String>, children: &[TaggedField]) -> Result<Self> {
        let value: String = children.iter().map(TaggedField::encode).collect();
        Self::new(tag, value)
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Encodes as `tag ++ zero-padded byte length ++ value`.
    pub fn encode(&self) -> String {
        format!("{}{:02}{}", self.tag, self.value.len(), self.value)
    }

    pub fn encoded_len(&self) -> usize {
        4 + self.value.len()
    }
}

/// Encodes a single field.
pub fn encode_field(tag: &str, value: &str) -> Result<String> {
    TaggedField::new(tag, value).map(|field| field.encode())
}

/// Splits a TLV string into fields using the declared lengths.
///
/// Only the top level is decoded; template values such as the merchant account
/// information can be passed back in to decode their sub-fields.
pub fn decode_fields(input: &str) -> Result<Vec<TaggedField>> {
    let mut fields = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        let header = rest
            .get(..4)
            .filter(|header| header.is_ascii())
            .ok_or_else(|| PixError::MalformedPayload(format!("bad field header in {rest:?}")))?;
        let (tag, len) = header.split_at(2);
        if !len.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PixError::MalformedPayload(format!(
                "non-numeric length {len:?} for tag {tag}"
            )));
        }
        let len: usize = len
            .parse()
            .map_err(|_| PixError::MalformedPayload(format!("bad length for tag {tag}")))?;
        let value = rest.get(4..4 + len).ok_or_else(|| {
            PixError::MalformedPayload(format!("field {tag} declares {len} bytes past the end"))
        })?;

        let field = TaggedField::new(tag, value).map_err(|e| match e {
            PixError::InvalidTag(tag) => PixError::MalformedPayload(format!("invalid tag {tag:?}")),
            other => other,
        })?;
        rest = &rest[field.encoded_len()..];
        fields.push(field);
    }

    Ok(fields)
}

fn validate_tag(tag: &str) -> Result<()> {
    if tag.len() == 2 && tag.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(PixError::InvalidTag(tag.to_string()))
    }
}
